use thiserror::Error;

#[derive(Error, Debug)]
pub enum AurPackError {
    #[error("{path} not found. cargo-aurpack should be called at the root of the Rust project")]
    ManifestNotFound { path: String },

    #[error("Failed to parse manifest: {0}")]
    Manifest(#[from] cargo_manifest::Error),

    #[error("Missing `{0}` in Cargo.toml")]
    MissingField(&'static str),

    #[error("Invalid package.metadata: {0}")]
    Metadata(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Archive creation failed: {0}")]
    Package(String),

    #[error("`{command}` failed: {reason}")]
    ToolFailed { command: String, reason: String },

    #[error("Checksum placeholder not found in {path}")]
    PlaceholderMissing { path: String },

    #[error("Configuration error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, AurPackError>;
