//! # Stegostore - Hide byte payloads in the noise of other files
//!
//! Stegostore hides an arbitrary byte payload in the least significant
//! bits of a carrier medium (a raster image or a PCM audio file) and
//! recovers it byte-for-byte later.
//!
//! ## Overview
//!
//! - The carrier is decoded once and addressed bit by bit: one bit per
//!   color channel for images (alpha excluded), one bit per sample data
//!   byte for audio
//! - A secret seed drives a deterministic shuffle of every bit slot, so
//!   the payload is **scattered**, not sequential. Without the seed the
//!   bit order is not guessable
//! - The payload is framed with a 3-byte little-endian length header
//!   occupying the first 24 slots of the scrambled order
//! - Mutations stay in memory until an explicit save re-encodes the
//!   medium (images) or re-assembles header plus data (WAV)
//!
//! The scrambling deters casual discovery, not a determined adversary:
//! the seed is folded through SHA-256 into a 64-bit generator seed, and
//! the generator is not used as a cipher. Encrypt the payload before
//! writing if confidentiality matters.
//!
//! ## Example Usage
//!
//! ```no_run
//! use stegostore::{Opts, Store};
//!
//! let opts = Opts {
//!     rand_seed: b"shared secret".to_vec(),
//!     ..Opts::default()
//! };
//!
//! // Hide a payload and save the mutated carrier.
//! let mut store = Store::new("cover.png", opts.clone())?;
//! store.write(b"meet at dawn")?;
//! store.save("cover_out.png")?;
//!
//! // Recover it later with the same seed.
//! let store = Store::new("cover_out.png", opts)?;
//! let mut payload = vec![0u8; store.size()?];
//! store.read(&mut payload)?;
//!
//! assert_eq!(payload, b"meet at dawn");
//! # Ok::<(), stegostore::StegoError>(())
//! ```
//!
//! ## Modules
//!
//! - [`carrier`]: per-medium bit-level access (images, PCM audio)
//! - [`permute`]: seed-derived bit slot ordering
//! - [`store`]: framing and the public read/write contract
//! - [`bits`]: sequential bit extraction
//! - [`locate`]: pixel/channel addressing for raster carriers

/// Number of bytes reserved for the little-endian payload length header.
pub const HEADER_LEN: usize = 3;

/// Number of bit slots the length header occupies.
pub const HEADER_BITS: usize = HEADER_LEN * 8;

pub mod bits;
pub mod carrier;
pub mod error;
pub mod locate;
pub mod permute;
pub mod store;

// Re-export commonly used types at the crate root
pub use carrier::{AudioCarrier, Carrier, ImageCarrier};
pub use error::StegoError;
pub use locate::{locate_px, locate_px_by_bit, PxLocation};
pub use permute::permutation;
pub use store::{Opts, Store};
