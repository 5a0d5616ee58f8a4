use std::path::PathBuf;
use std::string::FromUtf8Error;
use thiserror::Error;

pub type Result<T, E = ConvertError> = std::result::Result<T, E>;

/// Everything that can abort a conversion run. None of these are recovered
/// inside the pipeline; they surface to `main` as a single message.
#[derive(Debug, Error)]
pub enum ConvertError {
    #[error("EPUB file not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("Document '{href}' is not valid UTF-8: {source}")]
    Encoding {
        href: String,
        #[source]
        source: FromUtf8Error,
    },

    #[error("Failed to read EPUB {}: {message}", .path.display())]
    ContainerFormat { path: PathBuf, message: String },

    #[error("Failed to write output file {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
