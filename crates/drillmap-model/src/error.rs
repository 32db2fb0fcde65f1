use thiserror::Error;

/// Validation failures raised while constructing model values.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ModelError {
    #[error("invalid region code '{0}': expected exactly 6 ASCII digits")]
    InvalidRegionCode(String),
    #[error("invalid region prefix '{0}': expected 0, 2, 4 or 6 ASCII digits")]
    InvalidPrefix(String),
    #[error("value for region {code} is not a finite number: {value}")]
    NonFiniteValue { code: String, value: f64 },
}

pub type Result<T> = std::result::Result<T, ModelError>;
