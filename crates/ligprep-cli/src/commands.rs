pub mod convert;
pub mod volume;
