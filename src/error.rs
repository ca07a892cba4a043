use std::path::PathBuf;

use thiserror::Error;

/// Coarse failure category, one per class of fatal condition in the pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Io,
    MalformedInput,
    OutOfRange,
    Inference,
}

#[derive(Error, Debug)]
pub enum Error {
    #[error("I/O error on {}: {}", path.display(), source)]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to decode image: {0}")]
    ImageDecode(#[source] image::ImageError),
    #[error("failed to encode image: {0}")]
    ImageEncode(#[source] image::ImageError),
    #[error("invalid font file: {}", path.display())]
    Font { path: PathBuf },
    #[error("malformed model output: {0}")]
    MalformedInput(String),
    #[error("label index {index} out of range for table of {len} entries")]
    OutOfRange { index: i64, len: usize },
    #[error("inference failed: {0}")]
    Inference(#[from] ort::Error),
}

impl Error {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Error::Io {
            path: path.into(),
            source,
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::Io { .. } | Error::ImageDecode(_) | Error::ImageEncode(_) | Error::Font { .. } => {
                ErrorKind::Io
            }
            Error::MalformedInput(_) => ErrorKind::MalformedInput,
            Error::OutOfRange { .. } => ErrorKind::OutOfRange,
            Error::Inference(_) => ErrorKind::Inference,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
