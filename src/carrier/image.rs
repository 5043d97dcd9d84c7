//! LSB carrier over a decoded raster image.
//!
//! Bits live in the least significant bit of each color channel, three
//! per pixel, rows left to right. Alpha is preserved but never used for
//! storage. Capacity is `floor(width * height * 3 / 8)` bytes.

use image::{DynamicImage, ImageFormat, RgbaImage};
use std::fs;
use std::io::SeekFrom;
use std::path::Path;

use crate::bits::BitReader;
use crate::carrier::Carrier;
use crate::error::StegoError;
use crate::locate::{locate_px, locate_px_by_bit};

/// A raster image holding hidden data in its channel LSBs.
///
/// The pixel grid is decoded once at construction and mutated in place;
/// [`save`](Carrier::save) re-encodes it in the carrier's format.
pub struct ImageCarrier {
    rgba: RgbaImage,
    width: u32,
    height: u32,
    cap: usize,
    offset: usize,
    format: ImageFormat,
}

impl ImageCarrier {
    /// Decodes the file at `path` with the given format.
    pub fn open<P: AsRef<Path>>(path: P, format: ImageFormat) -> Result<Self, StegoError> {
        let bytes = fs::read(path)?;
        let img = image::load_from_memory_with_format(&bytes, format)?;

        Ok(Self::from_image(img, format))
    }

    /// Wraps an already decoded image. `format` selects the encoding
    /// used on save.
    pub fn from_image(img: DynamicImage, format: ImageFormat) -> Self {
        let rgba = img.to_rgba8();
        let (width, height) = rgba.dimensions();
        let cap = (width as usize) * (height as usize) * 3 / 8;

        Self {
            rgba,
            width,
            height,
            cap,
            offset: 0,
            format,
        }
    }

    /// Image width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Image height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// The decoded pixel grid.
    pub fn rgba(&self) -> &RgbaImage {
        &self.rgba
    }
}

impl Carrier for ImageCarrier {
    fn seek(&mut self, pos: SeekFrom) -> usize {
        let target = match pos {
            SeekFrom::Start(n) => n as i64,
            SeekFrom::Current(d) => self.offset as i64 + d,
            SeekFrom::End(d) => self.cap as i64 + d,
        };

        self.offset = target.clamp(0, self.cap as i64) as usize;
        self.offset
    }

    fn read(&mut self, dst: &mut [u8]) -> Result<usize, StegoError> {
        if dst.is_empty() {
            return Ok(0);
        }

        let Some(loc) = locate_px(self.width, self.height, self.offset) else {
            return Ok(0);
        };

        let mut x = loc.x;
        let mut y = loc.y;
        let start_channel = loc.channel;

        let size = dst.len() * 8; // Bits requested.
        let mut read = 0; // Bits extracted so far.
        let mut first_px = true;

        let mut bi = 0; // Destination byte index.
        let mut ii = 0u8; // Destination bit index within the byte.
        let mut nn = 0; // Whole bytes transferred.

        dst[0] = 0;

        loop {
            let pixel = *self.rgba.get_pixel(x, y);

            for (i, value) in pixel.0[..3].iter().enumerate() {
                // The cursor may start mid-pixel; skip the channels
                // before it on the first pixel only.
                if first_px && i < start_channel {
                    continue;
                }

                dst[bi] |= (value & 1) << (7 - ii);

                read += 1;
                ii += 1;

                if ii > 7 {
                    self.offset += 1;
                    bi += 1;
                    nn += 1;
                    ii = 0;

                    if bi < dst.len() {
                        dst[bi] = 0;
                    }
                }

                if read >= size {
                    break;
                }
            }

            if self.offset >= self.cap {
                self.offset = self.cap;
                break;
            }

            if read >= size {
                break;
            }

            x += 1;
            first_px = false;

            if x >= self.width {
                y += 1;
                x = 0;
            }

            if y >= self.height {
                break;
            }
        }

        Ok(nn)
    }

    fn write(&mut self, src: &[u8]) -> Result<usize, StegoError> {
        if src.len() > self.cap {
            return Err(StegoError::InsufficientSpace {
                needed: src.len(),
                capacity: self.cap,
            });
        }

        if src.is_empty() {
            return Ok(0);
        }

        let Some(loc) = locate_px(self.width, self.height, self.offset) else {
            return Ok(src.len());
        };

        let mut x = loc.x;
        let mut y = loc.y;
        let mut start_channel = loc.channel;

        let size = src.len() * 8;
        let mut done = 0;
        let mut reader = BitReader::new(src);

        loop {
            let mut pixel = *self.rgba.get_pixel(x, y);

            for channel in start_channel..3 {
                let bit = reader.next_bit();
                pixel.0[channel] = (pixel.0[channel] & 0xFE) | bit;
                done += 1;
            }

            self.rgba.put_pixel(x, y, pixel);
            x += 1;
            start_channel = 0;

            if done >= size {
                break;
            }

            if x >= self.width {
                y += 1;
                x = 0;
            }

            if y >= self.height {
                break;
            }
        }

        Ok(src.len())
    }

    fn write_ord(&mut self, order: &[usize], src: &[u8]) -> Result<usize, StegoError> {
        if src.len() > self.cap {
            return Err(StegoError::InsufficientSpace {
                needed: src.len(),
                capacity: self.cap,
            });
        }

        let total_bits = src.len() * 8;

        if order.len() < total_bits {
            return Err(StegoError::OrderTooShort {
                needed: total_bits,
                len: order.len(),
            });
        }

        let mut reader = BitReader::new(src);

        for &idx in &order[..total_bits] {
            let bit = reader.next_bit();

            let loc = locate_px_by_bit(self.width, self.height, idx)
                .ok_or(StegoError::InvalidColorSelection)?;

            let pixel = self.rgba.get_pixel_mut(loc.x, loc.y);
            pixel.0[loc.channel] = (pixel.0[loc.channel] & 0xFE) | bit;
        }

        Ok(src.len())
    }

    fn read_ord(&self, order: &[usize], dst: &mut [u8], size: usize) -> Result<usize, StegoError> {
        let total_bits = size * 8;

        if order.len() < total_bits {
            return Err(StegoError::OrderTooShort {
                needed: total_bits,
                len: order.len(),
            });
        }

        for b in &mut dst[..size] {
            *b = 0;
        }

        for (n, &idx) in order[..total_bits].iter().enumerate() {
            let loc = locate_px_by_bit(self.width, self.height, idx)
                .ok_or(StegoError::InvalidColorSelection)?;

            let bit = self.rgba.get_pixel(loc.x, loc.y).0[loc.channel] & 1;
            dst[n / 8] |= bit << (7 - n % 8);
        }

        Ok(size)
    }

    fn offset(&self) -> usize {
        self.offset
    }

    fn cap(&self) -> usize {
        self.cap
    }

    fn save(&self, path: &Path) -> Result<(), StegoError> {
        self.rgba.save_with_format(path, self.format)?;
        Ok(())
    }
}
