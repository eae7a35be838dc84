use strum_macros::{Display, EnumString};
use thiserror::Error;

/// Error codes for the forecast engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString)]
#[repr(i32)]
pub enum ErrCode {
    // Engine errors (0-99)
    #[strum(serialize = "_ENGINE_ERR_BEGIN")]
    EngineErrBegin = 0,
    #[strum(serialize = "PARA_ERROR")]
    ParaError = 5,
    #[strum(serialize = "CONFIG_ERROR")]
    ConfigError = 17,
    #[strum(serialize = "_ENGINE_ERR_END")]
    EngineErrEnd = 99,

    // Source data errors (200-299)
    #[strum(serialize = "_DATA_ERR_BEGIN")]
    DataErrBegin = 200,
    #[strum(serialize = "SRC_DATA_NOT_FOUND")]
    SrcDataNotFound = 201,
    #[strum(serialize = "SRC_DATA_FORMAT_ERROR")]
    SrcDataFormatError = 202,
    #[strum(serialize = "DUPLICATE_PERIOD")]
    DuplicatePeriod = 203,
    #[strum(serialize = "INVALID_AMOUNT")]
    InvalidAmount = 204,
    #[strum(serialize = "_DATA_ERR_END")]
    DataErrEnd = 299,
}

impl ErrCode {
    pub fn is_data_err(&self) -> bool {
        let code = *self as i32;
        code > Self::DataErrBegin as i32 && code < Self::DataErrEnd as i32
    }

    pub fn is_engine_err(&self) -> bool {
        let code = *self as i32;
        code > Self::EngineErrBegin as i32 && code < Self::EngineErrEnd as i32
    }
}

#[derive(Debug, Clone, Error)]
#[error("{errcode}: {msg}")]
pub struct ForecastError {
    pub errcode: ErrCode,
    pub msg: String,
}

impl ForecastError {
    pub fn new(message: impl Into<String>, code: ErrCode) -> Self {
        Self {
            errcode: code,
            msg: message.into(),
        }
    }

    pub fn is_data_err(&self) -> bool {
        self.errcode.is_data_err()
    }

    pub fn is_engine_err(&self) -> bool {
        self.errcode.is_engine_err()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_error_display() {
        let err = ForecastError::new("month 2024-03 appears twice", ErrCode::DuplicatePeriod);
        assert_eq!(err.to_string(), "DUPLICATE_PERIOD: month 2024-03 appears twice");
    }

    #[test]
    fn test_code_ranges() {
        assert!(ErrCode::DuplicatePeriod.is_data_err());
        assert!(ErrCode::InvalidAmount.is_data_err());
        assert!(!ErrCode::ParaError.is_data_err());
        assert!(ErrCode::ParaError.is_engine_err());
        assert!(!ErrCode::EngineErrEnd.is_engine_err());
    }

    #[test]
    fn test_code_from_str() {
        assert_eq!(ErrCode::from_str("INVALID_AMOUNT").unwrap(), ErrCode::InvalidAmount);
        assert!(ErrCode::from_str("NOT_A_CODE").is_err());
    }

    #[test]
    fn test_error_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<ForecastError>();
    }
}
