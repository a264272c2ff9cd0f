use thiserror::Error;

/// Every way a mosaic run can fail.
///
/// None of these is recovered locally: the stage that detects one stops and
/// hands it to the caller, which decides how to present it.
#[derive(Debug, Error)]
pub enum MosaicError {
    /// A playlist or album lookup came back empty.
    #[error("not found: {0}")]
    NotFound(String),

    /// The catalog rejected the credentials or the bearer token.
    #[error("authentication failed: {0}")]
    AuthFailure(String),

    /// The playlist reference could not be parsed or was refused as malformed.
    #[error("invalid playlist reference: {0}")]
    InvalidReference(String),

    /// The playlist yielded no album with artwork.
    #[error("playlist contains no albums to build a mosaic from")]
    EmptyInput,

    /// Downloading or decoding one artwork failed.
    #[error("could not fetch artwork {url}: {reason}")]
    FetchFailure { url: String, reason: String },

    /// The canvas could not be allocated.
    #[error("out of memory while allocating a {side}x{side} canvas")]
    OutOfMemory { side: u64 },

    #[error("configuration error: {0}")]
    Config(String),

    /// Any other catalog failure (transport error, unexpected status, bad payload).
    #[error("catalog request failed: {0}")]
    Catalog(String),

    #[error("image encoding failed: {0}")]
    Codec(#[from] image::ImageError),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl MosaicError {
    pub fn fetch(url: &str, reason: impl ToString) -> Self {
        MosaicError::FetchFailure {
            url: url.to_string(),
            reason: reason.to_string(),
        }
    }
}
