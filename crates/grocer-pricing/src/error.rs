use thiserror::Error;

#[derive(Debug, Error)]
pub enum PricingError {
    #[error("failed to read unit table {path}: {source}")]
    UnitTableIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid unit table YAML: {0}")]
    UnitTableYaml(#[from] serde_yaml::Error),

    #[error("invalid unit table entry \"{unit}\": {reason}")]
    InvalidUnit { unit: String, reason: String },

    #[error("unit vocabulary does not compile: {0}")]
    Vocabulary(#[from] regex::Error),
}
