use thiserror::Error;

#[derive(Debug, Error)]
pub enum StitchError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),
    #[error("{id}: unsupported value for `{key}`: {value:?}")]
    UnsupportedValue {
        id: String,
        key: &'static str,
        value: String,
    },
    #[error("Invalid config: {0}")]
    InvalidConfig(String),
    #[error("Nothing to stitch")]
    Empty,
    #[error("No adjacency rule matched the tile at ({x}, {y})")]
    UnmatchedTile { x: i32, y: i32 },
}

pub type Result<T> = std::result::Result<T, StitchError>;
