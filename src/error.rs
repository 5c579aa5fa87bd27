use thiserror::Error;

pub type Result<T> = std::result::Result<T, ValidationError>;

/// Everything that can go wrong while resolving options.
/// Raised before any geometry is produced, never corrected silently.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("unrecognized option: {0}")]
    UnrecognizedOption(String),

    #[error("invalid width: {0}")]
    InvalidWidth(f64),

    #[error("invalid height: {0}")]
    InvalidHeight(f64),

    #[error("invalid cell size: {0}")]
    InvalidCellSize(f64),

    #[error("grid too large: {width} x {height} at cell size {cell_size}")]
    GridTooLarge { width: f64, height: f64, cell_size: f64 },

    #[error("unrecognized color option: {0}")]
    UnrecognizedColorOption(String),

    #[error("invalid color {color:?}: {reason}")]
    InvalidColor { color: String, reason: String },

    #[error("color list is empty")]
    EmptyColorList,

    #[error("palette has no entries")]
    EmptyPalette,

    #[error("malformed options: {0}")]
    Malformed(String),
}

impl From<serde_json::Error> for ValidationError {
    fn from(err: serde_json::Error) -> Self {
        ValidationError::Malformed(err.to_string())
    }
}
