//! Unified error types for tilemap operations

use std::path::PathBuf;
use thiserror::Error;

/// Header keyword of the text map format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeaderField {
    Width,
    Height,
    Layers,
}

impl HeaderField {
    /// The keyword as it appears in the file, including the colon.
    pub fn keyword(&self) -> &'static str {
        match self {
            HeaderField::Width => "width:",
            HeaderField::Height => "height:",
            HeaderField::Layers => "layers:",
        }
    }
}

impl std::fmt::Display for HeaderField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            HeaderField::Width => write!(f, "width"),
            HeaderField::Height => write!(f, "height"),
            HeaderField::Layers => write!(f, "layers"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum HeaderError {
    #[error("expected 'map:' identifier")]
    MissingMapKeyword,

    #[error("expected '{}' identifier", .0.keyword())]
    MissingKeyword(HeaderField),

    #[error("missing value for {0}")]
    MissingValue(HeaderField),

    #[error("invalid {field} {value}")]
    InvalidValue { field: HeaderField, value: u64 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellError {
    /// No digits where a tile identifier was expected.
    MissingTile,
    /// A tile identifier that is not followed by `,`.
    MissingSeparator,
}

impl std::fmt::Display for CellError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CellError::MissingTile => write!(f, "invalid/missing tile identifier"),
            CellError::MissingSeparator => write!(f, "expected ',' after tile"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PatternErrorKind {
    /// A character that is neither a parameter nor a motion letter.
    UnknownToken(char),
    /// A parameter letter without a following digit sequence.
    MissingNumber(char),
    /// A parameter whose value does not fit the field it sets.
    ValueOutOfRange(char),
    /// `n0` or `m0`.
    ZeroBrush(char),
    /// A repeat count that does not fit into `usize`.
    RepeatOverflow,
}

impl std::fmt::Display for PatternErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PatternErrorKind::UnknownToken(ch) => write!(f, "unknown character for pattern '{ch}'"),
            PatternErrorKind::MissingNumber(ch) => write!(f, "expected valid number after '{ch}'"),
            PatternErrorKind::ValueOutOfRange(ch) => write!(f, "number after '{ch}' is out of range"),
            PatternErrorKind::ZeroBrush(ch) => write!(f, "brush size after '{ch}' must be positive"),
            PatternErrorKind::RepeatOverflow => write!(f, "repeat count is too large"),
        }
    }
}

/// Main error type for tilemap operations
#[derive(Debug, Error)]
pub enum TileMapError {
    // === I/O Errors ===
    #[error("Could not open '{}': {source}", path.display())]
    IoUnavailable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Missing path, required for first load or save")]
    NoSourcePath,

    // === Loading Errors ===
    #[error("Malformed header: {0}")]
    MalformedHeader(HeaderError),

    #[error("{kind} at ({x}, {y}) layer {layer}")]
    MalformedCell { x: i32, y: i32, layer: usize, kind: CellError },

    #[error("Tile value overflow ({value}) at ({x}, {y}) layer {layer}")]
    ValueOverflow { x: i32, y: i32, layer: usize, value: u64 },

    #[error("Unexpected things at the end of file '{snippet}'...")]
    TrailingContent { snippet: String },

    #[error("Unsupported image: {message}")]
    UnsupportedImage { message: String },

    // === Saving Errors ===
    #[error("Can't save map with more than 4 layers as png, got {layers} layers")]
    UnsupportedLayerCountForImage { layers: usize },

    // === Edit Errors ===
    #[error("No valid copied selection")]
    NoCopyAnchor,

    #[error("Layer {layer} out of range (0..{layer_count})")]
    InvalidLayerIndex { layer: usize, layer_count: usize },

    #[error("Layers {layers:?} do not exist (0..{layer_count})")]
    InvalidLayerIndices { layers: Vec<usize>, layer_count: usize },

    #[error("Invalid size {width}x{height}")]
    InvalidSize { width: i64, height: i64 },

    #[error("In pattern word {word_index} '{word}' at position {position}: {kind}")]
    PatternSyntax {
        word_index: usize,
        word: String,
        position: usize,
        kind: PatternErrorKind,
    },

    // === External Errors ===
    #[error("Image processing error: {0}")]
    Image(#[from] image::ImageError),
}

/// Result type alias for tilemap operations
pub type Result<T> = std::result::Result<T, TileMapError>;

// === Convenience constructors ===
impl TileMapError {
    pub fn io_unavailable(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::IoUnavailable { path: path.into(), source }
    }

    pub fn invalid_size(width: impl Into<i64>, height: impl Into<i64>) -> Self {
        Self::InvalidSize {
            width: width.into(),
            height: height.into(),
        }
    }
}

impl From<HeaderError> for TileMapError {
    fn from(err: HeaderError) -> Self {
        TileMapError::MalformedHeader(err)
    }
}
