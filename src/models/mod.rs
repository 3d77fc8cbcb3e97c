pub mod alert;
pub mod enums;
pub mod vital_sign;

pub use alert::*;
pub use enums::*;
pub use vital_sign::*;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ModelError {
    #[error("Invalid enum value for {field}: {value}")]
    InvalidEnum { field: String, value: String },
}
