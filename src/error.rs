use thiserror::Error;

/// Application-level errors using thiserror for structured error handling.
///
/// These errors represent domain-specific failures that can occur during
/// application operation. They provide context and can be chained with anyhow.

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ColorParseError {
    #[error("Invalid hex color length: expected 6 digits, got {0}")]
    InvalidLength(usize),

    #[error("Invalid hex digit in color literal: {0:?}")]
    InvalidDigit(String),
}

#[derive(Error, Debug)]
pub enum DocumentError {
    #[error("Failed to read SVG file: {path}")]
    ReadFailed {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Not an SVG file: {path}")]
    NotSvg { path: String },

    #[error("No SVG file is loaded")]
    NoFileLoaded,
}

#[derive(Error, Debug)]
pub enum SaveError {
    #[error("Save name is empty")]
    EmptyFileName,

    #[error("Failed to write SVG file: {path}")]
    WriteFailed {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PatchError {
    #[error("Patch offset {offset} is out of bounds for text of length {len}")]
    OffsetOutOfBounds { offset: usize, len: usize },
}

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("Failed to parse SVG content")]
    InvalidSvg(#[source] Box<dyn std::error::Error + Send + Sync>),

    #[error("SVG has no renderable area at {width}x{height}")]
    EmptyPixmap { width: u32, height: u32 },

    #[error("Failed to encode rendered PNG")]
    EncodeFailed(#[source] Box<dyn std::error::Error + Send + Sync>),
}

#[derive(Error, Debug)]
pub enum TranscodeError {
    #[error("Failed to read SVG file: {path}")]
    ReadFailed {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to render SVG file: {path}")]
    RenderFailed {
        path: String,
        #[source]
        source: RenderError,
    },

    #[error("Failed to write PNG file: {path}")]
    WriteFailed {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to load configuration from {path}")]
    LoadFailed {
        path: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("Failed to save configuration to {path}")]
    SaveFailed {
        path: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("Failed to create config directory: {path}")]
    DirectoryCreationFailed {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Platform config directory is unavailable")]
    NoConfigDir,
}

/// Type alias for application Results using anyhow for context chaining
pub type AppResult<T> = anyhow::Result<T>;
