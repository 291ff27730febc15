use std::path::PathBuf;
use thiserror::Error;

/// Failure to parse or validate a single annotation line.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AnnotationError {
    #[error("expected 5 values, found {found} (got \"{line}\")")]
    MalformedRecord { line: String, found: usize },

    #[error("invalid {field} '{token}'; expected {expected} (got \"{line}\")")]
    InvalidValue {
        line: String,
        field: &'static str,
        token: String,
        expected: &'static str,
    },

    #[error("{field} out of range: {value} (expected {expected})")]
    OutOfRange {
        field: &'static str,
        value: f64,
        expected: &'static str,
    },
}

/// The main error type for yoloviz operations.
#[derive(Debug, Error)]
pub enum YolovizError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse {path} line {line}: {source}")]
    AnnotationParse {
        path: PathBuf,
        line: usize,
        #[source]
        source: AnnotationError,
    },

    #[error("Failed to read annotation file {path}: {source}")]
    AnnotationRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("File not found: {path}")]
    MissingFile { path: PathBuf },

    #[error("Image and annotation file stems don't match: {image} vs {annotation}")]
    StemMismatch { image: PathBuf, annotation: PathBuf },

    #[error("Failed to decode image {path}: {source}")]
    Decode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("Directory not found: {path}")]
    NotFound { path: PathBuf },

    #[error("Dataset empty: {path}")]
    EmptyDataset { path: PathBuf },

    #[error("Index {index} out of range for dataset of length {len}")]
    IndexOutOfRange { index: isize, len: usize },

    #[error("Failed while traversing {path}: {source}")]
    DirectoryWalk {
        path: PathBuf,
        #[source]
        source: walkdir::Error,
    },

    #[error("Unsupported color: {0}")]
    InvalidColor(String),

    #[error("Window error: {0}")]
    Window(String),

    #[error("Check failed with {errors} error(s) across {images} image(s)")]
    CheckFailed { errors: usize, images: usize },
}

impl YolovizError {
    /// Returns the underlying annotation error, if this is a parse failure.
    pub fn annotation_error(&self) -> Option<&AnnotationError> {
        match self {
            YolovizError::AnnotationParse { source, .. } => Some(source),
            _ => None,
        }
    }
}
