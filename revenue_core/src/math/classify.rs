use crate::common::enums::Status;

/// Compare an observed amount with its expectation.
///
/// `Undetermined` when either side is missing. A tie is `Above`.
pub fn classify(observed: Option<f64>, expected: Option<f64>) -> Status {
    match (observed, expected) {
        (Some(obs), Some(exp)) if obs >= exp => Status::Above,
        (Some(_), Some(_)) => Status::Below,
        _ => Status::Undetermined,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify() {
        assert_eq!(classify(Some(11.0), Some(10.0)), Status::Above);
        assert_eq!(classify(Some(9.0), Some(10.0)), Status::Below);
        assert_eq!(classify(None, Some(10.0)), Status::Undetermined);
        assert_eq!(classify(Some(9.0), None), Status::Undetermined);
        assert_eq!(classify(None, None), Status::Undetermined);
    }

    #[test]
    fn test_tie_is_above() {
        assert_eq!(classify(Some(10.0), Some(10.0)), Status::Above);
        assert_eq!(classify(Some(0.0), Some(0.0)), Status::Above);
    }

    #[test]
    fn test_idempotent() {
        for (o, e) in [(Some(1.0), Some(2.0)), (Some(2.0), Some(2.0)), (None, Some(1.0))] {
            assert_eq!(classify(o, e), classify(o, e));
        }
    }
}
