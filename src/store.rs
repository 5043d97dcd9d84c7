//! Length-prefixed payload framing over a permuted bit order.
//!
//! The store owns a carrier and the full-capacity bit order derived
//! from the configured seed. A payload is framed as a 3-byte
//! little-endian length followed by the payload bytes; the length
//! occupies the first 24 slots of the order, the payload the next
//! `length * 8`. Nothing about the frame is contiguous in storage;
//! every bit lands wherever its order entry points.

use image::ImageFormat;
use std::path::Path;

use crate::carrier::{AudioCarrier, Carrier, ImageCarrier};
use crate::error::StegoError;
use crate::permute::permutation;
use crate::{HEADER_BITS, HEADER_LEN};

/// Storage configuration.
///
/// `rand_seed` is effectively the secret key: it alone determines the
/// bit order, and a reader without it cannot locate the payload.
#[derive(Debug, Clone)]
pub struct Opts {
    /// Secret seed bytes the bit order is derived from.
    pub rand_seed: Vec<u8>,
    /// Fraction of the raw capacity to use. Values outside `(0, 1]`
    /// mean full capacity.
    pub use_space: f64,
    /// Reserved: flags that the payload is encrypted. No cipher is
    /// wired in; encrypt before write and decrypt after read.
    pub encrypted: bool,
    /// Reserved: key material for the above.
    pub secret_key: Vec<u8>,
}

impl Default for Opts {
    fn default() -> Self {
        Self {
            rand_seed: Vec::new(),
            use_space: 1.0,
            encrypted: false,
            secret_key: Vec::new(),
        }
    }
}

/// A steganographic store over a single carrier.
pub struct Store {
    carrier: Box<dyn Carrier>,
    opts: Opts,
    order: Vec<usize>,
}

impl Store {
    /// Opens the file at `path`, selecting the carrier type from the
    /// extension: `.png`, `.bmp`, `.tiff` and `.webp` decode as image
    /// carriers, `.wav` as an audio carrier.
    pub fn new<P: AsRef<Path>>(path: P, opts: Opts) -> Result<Self, StegoError> {
        let path = path.as_ref();
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("")
            .to_lowercase();

        let carrier: Box<dyn Carrier> = match ext.as_str() {
            "png" => Box::new(ImageCarrier::open(path, ImageFormat::Png)?),
            "bmp" => Box::new(ImageCarrier::open(path, ImageFormat::Bmp)?),
            "tiff" => Box::new(ImageCarrier::open(path, ImageFormat::Tiff)?),
            "webp" => Box::new(ImageCarrier::open(path, ImageFormat::WebP)?),
            "wav" => Box::new(AudioCarrier::open(path)?),
            _ => return Err(StegoError::UnsupportedExtension(ext)),
        };

        Self::with_carrier(carrier, opts)
    }

    /// Builds a store over an already constructed carrier.
    pub fn with_carrier(carrier: Box<dyn Carrier>, opts: Opts) -> Result<Self, StegoError> {
        let order = permutation(&opts.rand_seed, 0, carrier.cap() * 8)
            .ok_or(StegoError::PermutationFailed)?;

        Ok(Self {
            carrier,
            opts,
            order,
        })
    }

    /// Usable payload capacity in bytes: the carrier capacity minus the
    /// reserved header, scaled down by `use_space` when that is in
    /// `(0, 1]`.
    pub fn cap(&self) -> usize {
        let cap = self.carrier.cap().saturating_sub(HEADER_LEN);

        if cap < 1 {
            return 0;
        }

        let mut factor = 1.0;

        if self.opts.use_space > 0.0 && self.opts.use_space <= 1.0 {
            factor = self.opts.use_space;
        }

        let max = (cap as f64 * factor).floor() as usize;

        cap.min(max)
    }

    /// Decodes the stored payload length from the header slots.
    ///
    /// Fails with `InvalidSize` when the decoded value exceeds the
    /// usable capacity, which signals corrupt data or a wrong seed.
    pub fn size(&self) -> Result<usize, StegoError> {
        let cap = self.cap();

        let mut size_bytes = [0u8; 4];
        self.carrier
            .read_ord(&self.order, &mut size_bytes, HEADER_LEN)?;

        let size = u32::from_le_bytes(size_bytes) as usize;

        if size > cap {
            return Err(StegoError::InvalidSize {
                size,
                capacity: cap,
            });
        }

        Ok(size)
    }

    /// Reads up to `dst.len()` payload bytes into the front of `dst`.
    /// Returns the number of bytes read.
    pub fn read(&self, dst: &mut [u8]) -> Result<usize, StegoError> {
        let size = self.size()?;
        let read_size = dst.len().min(size);

        // Payload slots are the ones after the header's 24.
        self.carrier
            .read_ord(&self.order[HEADER_BITS..], dst, read_size)
    }

    /// Frames `b` with its length and scatters the frame across the
    /// carrier. Returns the number of payload bytes written.
    pub fn write(&mut self, b: &[u8]) -> Result<usize, StegoError> {
        let cap = self.cap();

        if b.len() > cap {
            return Err(StegoError::InsufficientSpace {
                needed: b.len(),
                capacity: cap,
            });
        }

        let len_bytes = (b.len() as u32).to_le_bytes();

        let mut frame = Vec::with_capacity(HEADER_LEN + b.len());
        frame.extend_from_slice(&len_bytes[..HEADER_LEN]);
        frame.extend_from_slice(b);

        let mut n = self.carrier.write_ord(&self.order, &frame)?;

        // Report payload bytes only; counts small enough to be header
        // alone pass through unadjusted.
        if n > 2 {
            n -= HEADER_LEN;
        }

        Ok(n)
    }

    /// Persists the carrier's current state to `path`.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), StegoError> {
        self.carrier.save(path.as_ref())
    }

    /// The underlying carrier.
    pub fn carrier(&self) -> &dyn Carrier {
        self.carrier.as_ref()
    }

    /// The underlying carrier, mutably.
    pub fn carrier_mut(&mut self) -> &mut dyn Carrier {
        self.carrier.as_mut()
    }
}
