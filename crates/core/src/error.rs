use thiserror::Error;

#[derive(Error, Debug)]
pub enum DumpError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Cannot reach remote resource: {0}")]
    UnreachableResource(String),

    #[error("Malformed last-modified metadata: {0}")]
    MalformedMetadata(String),

    #[error("Destination storage unavailable: {0}")]
    StorageUnavailable(String),

    #[error("Tracking store error: {0}")]
    Store(String),

    #[error("{0}")]
    Other(String),
}
