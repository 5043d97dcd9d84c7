//! Error types for the storage engine.

use thiserror::Error;

/// Errors that can occur while constructing carriers or moving payload
/// bits through them.
#[derive(Error, Debug)]
pub enum StegoError {
    /// The file extension does not map to a known carrier type.
    #[error(r#"extension "{0}" is not supported"#)]
    UnsupportedExtension(String),

    /// The audio file failed header validation.
    #[error("unsupported audio format: {0}")]
    UnsupportedFormat(String),

    /// Bit order generation yielded no result.
    #[error("failed to generate the bit order")]
    PermutationFailed,

    /// The payload does not fit in the carrier.
    #[error("insufficient space: {needed} / {capacity}")]
    InsufficientSpace {
        /// Payload size in bytes.
        needed: usize,
        /// Carrier capacity in bytes.
        capacity: usize,
    },

    /// The bit order has fewer entries than the transfer needs.
    #[error("bit order is too short: need {needed} entries, have {len}")]
    OrderTooShort {
        /// Bit slots required by the transfer.
        needed: usize,
        /// Entries available in the order.
        len: usize,
    },

    /// A bit order entry points outside the carrier's sample data.
    #[error("bit order entry {index} is out of bounds ({len} bytes of data)")]
    IndexOutOfBounds {
        /// The offending order entry.
        index: usize,
        /// Length of the sample data in bytes.
        len: usize,
    },

    /// A bit order entry did not resolve to a color channel.
    #[error("invalid color selection")]
    InvalidColorSelection,

    /// The decoded length header exceeds the carrier capacity, which
    /// signals corrupt data or a wrong seed.
    #[error("invalid size: declared {size} exceeds capacity {capacity}")]
    InvalidSize {
        /// Length decoded from the header.
        size: usize,
        /// Usable capacity in bytes.
        capacity: usize,
    },

    /// Image decode or encode error.
    #[error("image error: {0}")]
    Image(#[from] image::ImageError),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
