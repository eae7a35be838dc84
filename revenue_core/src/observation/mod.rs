pub mod observation;
pub mod observation_set;
