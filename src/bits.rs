//! Sequential bit extraction over a byte buffer.

/// A stateful reader that hands out the bits of a byte slice one at a
/// time, most significant bit first.
///
/// Reading past the end is defined behavior: the reader keeps returning
/// `0` (silent zero-padding). Callers that care about exactness must not
/// request more bits than the buffer holds.
#[derive(Debug)]
pub struct BitReader<'a> {
    bytes: &'a [u8],
    byte_idx: usize,
    bit_idx: u8,
}

impl<'a> BitReader<'a> {
    /// Creates a reader positioned at the first bit of `bytes`.
    pub fn new(bytes: &'a [u8]) -> Self {
        Self {
            bytes,
            byte_idx: 0,
            bit_idx: 0,
        }
    }

    /// Returns the next bit (`0` or `1`) and advances the cursor.
    pub fn next_bit(&mut self) -> u8 {
        if self.byte_idx >= self.bytes.len() {
            return 0;
        }

        let mask = 0x80u8 >> self.bit_idx;
        let bit = u8::from(self.bytes[self.byte_idx] & mask > 0);

        self.bit_idx += 1;

        if self.bit_idx == 8 {
            self.bit_idx = 0;
            self.byte_idx += 1;
        }

        bit
    }

    /// Rewinds the cursor to the start of the buffer.
    pub fn reset(&mut self) {
        self.byte_idx = 0;
        self.bit_idx = 0;
    }
}
