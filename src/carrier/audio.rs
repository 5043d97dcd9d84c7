//! LSB carrier over uncompressed PCM audio.
//!
//! Only canonical 16-bit PCM WAV files are accepted: a fixed 44-byte
//! header followed by the sample data. One bit is stored per data byte,
//! so capacity is `floor(data_len / 8)` bytes. The header is captured
//! at open, never mutated, and written back verbatim on save, so the
//! output file is byte-identical in length to the source.

use std::fs;
use std::io::SeekFrom;
use std::path::Path;

use crate::bits::BitReader;
use crate::carrier::Carrier;
use crate::error::StegoError;

/// Size of the canonical WAV header in bytes.
const HEADER_SIZE: usize = 44;

/// A PCM audio file holding hidden data in its sample byte LSBs.
pub struct AudioCarrier {
    header: [u8; HEADER_SIZE],
    data: Vec<u8>,
    cap: usize,
    offset: usize,
}

impl AudioCarrier {
    /// Reads and validates the WAV file at `path`.
    ///
    /// Fails with `UnsupportedFormat` unless the file is RIFF/WAVE with
    /// audio format tag 1 (PCM) and 16 bits per sample.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, StegoError> {
        let bytes = fs::read(path)?;

        if bytes.len() < HEADER_SIZE {
            return Err(StegoError::UnsupportedFormat(
                "file is shorter than a WAV header".into(),
            ));
        }

        if &bytes[0..4] != b"RIFF" || &bytes[8..12] != b"WAVE" {
            return Err(StegoError::UnsupportedFormat(
                "not a valid RIFF/WAVE file".into(),
            ));
        }

        let format_tag = u16::from_le_bytes([bytes[20], bytes[21]]);
        if format_tag != 1 {
            return Err(StegoError::UnsupportedFormat(format!(
                "audio format tag {format_tag} is not PCM"
            )));
        }

        let bits_per_sample = u16::from_le_bytes([bytes[34], bytes[35]]);
        if bits_per_sample != 16 {
            return Err(StegoError::UnsupportedFormat(format!(
                "only 16-bit PCM is supported, got {bits_per_sample} bits"
            )));
        }

        let mut header = [0u8; HEADER_SIZE];
        header.copy_from_slice(&bytes[..HEADER_SIZE]);

        let data = bytes[HEADER_SIZE..].to_vec();
        let cap = data.len() / 8;

        Ok(Self {
            header,
            data,
            cap,
            offset: 0,
        })
    }

    /// The PCM sample data section.
    pub fn data(&self) -> &[u8] {
        &self.data
    }
}

impl Carrier for AudioCarrier {
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
        let size = dst.len() * 8;
        let mut bit_index = self.offset * 8;
        let mut read = 0;

        for i in 0..size {
            if bit_index >= self.data.len() {
                break;
            }

            if i % 8 == 0 {
                dst[i / 8] = 0;
            }

            let bit = self.data[bit_index] & 1;
            dst[i / 8] |= bit << (7 - i % 8);

            bit_index += 1;
            read += 1;
        }

        self.offset += read / 8;

        Ok(read / 8)
    }

    fn write(&mut self, src: &[u8]) -> Result<usize, StegoError> {
        if src.len() > self.cap {
            return Err(StegoError::InsufficientSpace {
                needed: src.len(),
                capacity: self.cap,
            });
        }

        let size = src.len() * 8;
        let mut reader = BitReader::new(src);
        let mut bit_index = self.offset * 8;
        let mut done = 0;

        while done < size && bit_index < self.data.len() {
            let bit = reader.next_bit();
            self.data[bit_index] = (self.data[bit_index] & 0xFE) | bit;

            bit_index += 1;
            done += 1;
        }

        self.offset += done / 8;

        Ok(src.len())
    }

    fn write_ord(&mut self, order: &[usize], src: &[u8]) -> Result<usize, StegoError> {
        let total_bits = src.len() * 8;

        if order.len() < total_bits {
            return Err(StegoError::OrderTooShort {
                needed: total_bits,
                len: order.len(),
            });
        }

        if order.len() > self.cap * 8 {
            return Err(StegoError::InsufficientSpace {
                needed: order.len() / 8,
                capacity: self.cap,
            });
        }

        let mut bit_index = 0;

        for byte in src {
            for j in (0..8).rev() {
                let bit = (byte >> j) & 1;
                let data_index = order[bit_index];

                if data_index >= self.data.len() {
                    return Err(StegoError::IndexOutOfBounds {
                        index: data_index,
                        len: self.data.len(),
                    });
                }

                self.data[data_index] = (self.data[data_index] & 0xFE) | bit;
                bit_index += 1;
            }
        }

        Ok(src.len())
    }

    fn read_ord(&self, order: &[usize], dst: &mut [u8], size: usize) -> Result<usize, StegoError> {
        if order.len() < size * 8 {
            return Err(StegoError::OrderTooShort {
                needed: size * 8,
                len: order.len(),
            });
        }

        for i in 0..size {
            let mut value = 0u8;

            for j in 0..8 {
                let data_index = order[i * 8 + j];

                if data_index >= self.data.len() {
                    return Err(StegoError::IndexOutOfBounds {
                        index: data_index,
                        len: self.data.len(),
                    });
                }

                value |= (self.data[data_index] & 1) << (7 - j);
            }

            dst[i] = value;
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
        let mut out = Vec::with_capacity(HEADER_SIZE + self.data.len());
        out.extend_from_slice(&self.header);
        out.extend_from_slice(&self.data);

        fs::write(path, out)?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::permute::permutation;

    fn wav_header(data_len: u32) -> [u8; HEADER_SIZE] {
        let mut head = [0u8; HEADER_SIZE];
        head[0..4].copy_from_slice(b"RIFF");
        head[4..8].copy_from_slice(&(36 + data_len).to_le_bytes());
        head[8..12].copy_from_slice(b"WAVE");
        head[12..16].copy_from_slice(b"fmt ");
        head[16..20].copy_from_slice(&16u32.to_le_bytes());
        head[20..22].copy_from_slice(&1u16.to_le_bytes()); // PCM
        head[22..24].copy_from_slice(&1u16.to_le_bytes()); // mono
        head[24..28].copy_from_slice(&44100u32.to_le_bytes());
        head[28..32].copy_from_slice(&88200u32.to_le_bytes());
        head[32..34].copy_from_slice(&2u16.to_le_bytes());
        head[34..36].copy_from_slice(&16u16.to_le_bytes());
        head[36..40].copy_from_slice(b"data");
        head[40..44].copy_from_slice(&data_len.to_le_bytes());
        head
    }

    fn create_test_audio(data_len: usize) -> AudioCarrier {
        // Sample bytes from a sine wave, like a real recording would have.
        let data: Vec<u8> = (0..data_len)
            .map(|i| {
                let t = i as f64 / 44100.0;
                (f64::sin(2.0 * std::f64::consts::PI * 440.0 * t) * 127.0) as i8 as u8
            })
            .collect();

        AudioCarrier {
            header: wav_header(data_len as u32),
            data,
            cap: data_len / 8,
            offset: 0,
        }
    }

    #[test]
    fn test_capacity() {
        // 80000 data bytes, 1 bit each: 10000 payload bytes.
        let carrier = create_test_audio(80000);
        assert_eq!(carrier.cap(), 10000);
    }

    #[test]
    fn test_sequential_roundtrip() {
        let mut carrier = create_test_audio(8000);
        let data = b"Hello, audio steganography!";

        carrier.write(data).unwrap();

        carrier.seek(SeekFrom::Start(0));
        let mut dst = vec![0u8; data.len()];
        let read = carrier.read(&mut dst).unwrap();

        assert_eq!(read, data.len());
        assert_eq!(&dst, data);
    }

    #[test]
    fn test_sequential_write_advances_offset() {
        let mut carrier = create_test_audio(8000);

        carrier.write(b"abcd").unwrap();
        assert_eq!(carrier.offset(), 4);
    }

    #[test]
    fn test_write_insufficient_space() {
        let mut carrier = create_test_audio(80);
        let data = vec![0u8; 11];

        let result = carrier.write(&data);
        assert!(matches!(
            result,
            Err(StegoError::InsufficientSpace { .. })
        ));
    }

    #[test]
    fn test_ordered_roundtrip() {
        let mut carrier = create_test_audio(8000);
        let data: Vec<u8> = (0..500).map(|i| (i % 256) as u8).collect();

        let order = permutation(b"scatter", 0, carrier.cap() * 8).unwrap();
        carrier.write_ord(&order, &data).unwrap();

        let mut dst = vec![0u8; data.len()];
        carrier.read_ord(&order, &mut dst, data.len()).unwrap();

        assert_eq!(dst, data);
    }

    #[test]
    fn test_write_ord_order_too_short() {
        let mut carrier = create_test_audio(8000);
        let data = [0xAAu8; 4];
        let order: Vec<usize> = (0..31).collect();

        let result = carrier.write_ord(&order, &data);
        assert!(matches!(result, Err(StegoError::OrderTooShort { .. })));
    }

    #[test]
    fn test_write_ord_order_exceeds_capacity() {
        let mut carrier = create_test_audio(80);
        let order: Vec<usize> = (0..81).collect();

        let result = carrier.write_ord(&order, &[0x01]);
        assert!(matches!(
            result,
            Err(StegoError::InsufficientSpace { .. })
        ));
    }

    #[test]
    fn test_write_ord_index_out_of_bounds() {
        let mut carrier = create_test_audio(80);

        let mut order: Vec<usize> = (0..8).collect();
        order[3] = 80;

        let result = carrier.write_ord(&order, &[0x01]);
        assert!(matches!(result, Err(StegoError::IndexOutOfBounds { .. })));
    }

    #[test]
    fn test_read_ord_index_out_of_bounds() {
        let carrier = create_test_audio(80);

        let mut order: Vec<usize> = (0..8).collect();
        order[7] = 999;
        let mut dst = [0u8; 1];

        let result = carrier.read_ord(&order, &mut dst, 1);
        assert!(matches!(result, Err(StegoError::IndexOutOfBounds { .. })));
    }

    #[test]
    fn test_only_lsbs_change() {
        let original = create_test_audio(4000);
        let mut carrier = create_test_audio(4000);

        let data: Vec<u8> = (0..400).map(|i| (i * 11 % 256) as u8).collect();
        carrier.write(&data).unwrap();

        for (before, after) in original.data().iter().zip(carrier.data().iter()) {
            assert_eq!(before & 0xFE, after & 0xFE);
        }
    }

    #[test]
    fn test_seek_clamps() {
        let mut carrier = create_test_audio(800);
        let cap = carrier.cap();

        assert_eq!(carrier.seek(SeekFrom::Start(10)), 10);
        assert_eq!(carrier.seek(SeekFrom::Current(-50)), 0);
        assert_eq!(carrier.seek(SeekFrom::End(5)), cap);
    }
}
