//! Carrier abstractions for hiding data in decoded media.
//!
//! A carrier owns the decoded raw samples of a medium and exposes
//! bit-level access to their least significant bits, both sequentially
//! from a byte cursor and in an externally supplied bit slot order.
//!
//! Supported media:
//! - Raster images (PNG, BMP, TIFF, WebP): one bit per color channel
//! - PCM audio (WAV): one bit per sample data byte

pub mod audio;
pub mod image;

pub use self::audio::AudioCarrier;
pub use self::image::ImageCarrier;

use std::io::SeekFrom;
use std::path::Path;

use crate::error::StegoError;

/// Bit-level access to a decoded medium.
///
/// Capacity is fixed at construction and never changes. The sequential
/// byte cursor is clamped to `[0, cap]`. Ordered operations ignore the
/// cursor entirely; their positions come from the supplied bit order.
///
/// Mutations are never persisted implicitly: the in-memory samples
/// change in place and reach disk only through [`save`](Carrier::save).
pub trait Carrier {
    /// Moves the sequential byte cursor and returns its new position,
    /// clamped to `[0, cap]`.
    fn seek(&mut self, pos: SeekFrom) -> usize;

    /// Sequentially extracts LSBs from the cursor position, packing
    /// them MSB-first into `dst`. Stops when `dst` is full or capacity
    /// is exhausted; a short read is not an error. Returns the number
    /// of whole bytes read and advances the cursor by that amount.
    fn read(&mut self, dst: &mut [u8]) -> Result<usize, StegoError>;

    /// Sequentially overwrites LSBs with the bits of `src`, leaving
    /// every other bit untouched. Fails with `InsufficientSpace` when
    /// `src` exceeds the carrier capacity.
    fn write(&mut self, src: &[u8]) -> Result<usize, StegoError>;

    /// Writes the bits of `src` into the slots named by `order`, one
    /// entry per bit, in logical MSB-first order.
    ///
    /// Fails with `OrderTooShort` when `order` has fewer than
    /// `8 * src.len()` entries, and with `InsufficientSpace` when the
    /// payload cannot fit. Slots written before an error are not
    /// rolled back.
    fn write_ord(&mut self, order: &[usize], src: &[u8]) -> Result<usize, StegoError>;

    /// Reads `size` bytes out of the slots named by `order` into the
    /// front of `dst`.
    ///
    /// Fails with `OrderTooShort` when `order` has fewer than
    /// `8 * size` entries. Panics if `dst` is shorter than `size`.
    fn read_ord(&self, order: &[usize], dst: &mut [u8], size: usize) -> Result<usize, StegoError>;

    /// Current sequential cursor position in bytes.
    fn offset(&self) -> usize;

    /// Storage capacity in bytes.
    fn cap(&self) -> usize;

    /// Serializes the current state of the medium to `path`.
    fn save(&self, path: &Path) -> Result<(), StegoError>;
}
