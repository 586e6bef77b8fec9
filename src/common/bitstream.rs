use std::fmt::Display;
use std::mem;

use num_traits::PrimInt;

// Bit stream
//------------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct BitStream {
    data: Vec<u8>,
    // Bit length
    len: usize,
    // Bit capacity of the symbol being filled
    capacity: usize,
}

impl BitStream {
    pub fn new(capacity: usize) -> Self {
        Self { data: Vec::with_capacity((capacity + 7) >> 3), len: 0, capacity }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn data(&self) -> &[u8] {
        &self.data[..(self.len + 7) >> 3]
    }

    pub fn get(&self, index: usize) -> bool {
        if index >= self.len {
            return false;
        }
        (self.data[index >> 3] >> (7 - (index & 7))) & 1 == 1
    }

    pub fn truncate(&mut self, len: usize) {
        if len >= self.len {
            return;
        }
        self.len = len;
        self.data.truncate((len + 7) >> 3);
        let offset = len & 7;
        if offset > 0 {
            if let Some(last) = self.data.last_mut() {
                *last &= 0xFF << (8 - offset);
            }
        }
    }
}

impl From<&[u8]> for BitStream {
    fn from(inp: &[u8]) -> Self {
        let bit_len = inp.len() << 3;
        Self { data: inp.to_vec(), len: bit_len, capacity: bit_len }
    }
}

// Push bits for bit stream
//------------------------------------------------------------------------------

impl BitStream {
    /// Appends the low `size` bits of `bits`, most significant first.
    pub fn push_bits<T>(&mut self, bits: T, size: usize)
    where
        T: PrimInt + Display,
    {
        let max_bits = mem::size_of::<T>() * 8;
        debug_assert!(size <= max_bits, "Bit count {size} exceeds width of type: {max_bits}");
        debug_assert!(
            size >= max_bits - bits.leading_zeros() as usize,
            "Bit count shouldn't exceed bit length: Length {size}, Bits {bits}"
        );

        for i in (0..size).rev() {
            self.push((bits >> i) & T::one() == T::one());
        }
    }

    pub fn push(&mut self, bit: bool) {
        let pos = self.len >> 3;
        if pos >= self.data.len() {
            self.data.push(0);
        }

        if bit {
            let offset = self.len & 7;
            self.data[pos] |= 0b10000000 >> offset;
        }

        self.len += 1;
    }

    /// Appends whole bytes. Copies directly when the stream is byte aligned.
    pub fn extend(&mut self, bytes: &[u8]) {
        if self.len & 7 == 0 {
            self.data.extend_from_slice(bytes);
            self.len += bytes.len() << 3;
        } else {
            for &b in bytes {
                self.push_bits(b, 8);
            }
        }
    }
}
