// packer.rs
//
// Copyright (c) 2026  minitel-gif developers
//
//! Variable-width code packing
use std::ops::AddAssign;

/// Code Bits
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub(crate) struct Bits(u8);

impl From<u8> for Bits {
    fn from(bits: u8) -> Self {
        Bits(bits.min(Self::MAX.0))
    }
}

impl From<Bits> for u8 {
    fn from(bits: Bits) -> Self {
        bits.0
    }
}

impl AddAssign<u8> for Bits {
    fn add_assign(&mut self, rhs: u8) {
        self.0 = (self.0 + rhs).min(Self::MAX.0)
    }
}

impl Bits {
    /// Maximum code bits allowed for GIF
    pub(crate) const MAX: Self = Bits(12);

    /// Get the number of entries
    pub(crate) fn entries(self) -> u16 {
        1 << u16::from(self.0)
    }

    /// Get the bit mask
    fn mask(self) -> u32 {
        (1 << u32::from(self.0)) - 1
    }
}

/// Bit packer for LZW codes.
///
/// Codes are packed least-significant bit first, each one starting right
/// where the previous code ended, as GIF requires.  Complete bytes are
/// flushed as soon as they fill up, so a change of word width only affects
/// codes pushed after it.
#[derive(Debug)]
pub struct BitPacker {
    /// Current word width
    width: Bits,
    /// Pending bits
    code: u32,
    /// Number of pending bits
    n_bits: u8,
    /// Completed bytes
    buffer: Vec<u8>,
}

impl BitPacker {
    /// Create a new bit packer with an initial word width (clamped to 12).
    pub fn new(width: u8) -> Self {
        BitPacker {
            width: Bits::from(width),
            code: 0,
            n_bits: 0,
            buffer: Vec::new(),
        }
    }

    /// Get the current word width
    pub fn width(&self) -> u8 {
        self.width.into()
    }

    /// Set the word width used for subsequent pushes
    pub fn set_width(&mut self, width: u8) {
        self.width = Bits::from(width);
    }

    /// Increment the word width by one bit (up to 12)
    pub(crate) fn widen(&mut self) {
        self.width += 1;
    }

    pub(crate) fn bits(&self) -> Bits {
        self.width
    }

    /// Total number of bits pushed so far
    pub fn len_bits(&self) -> usize {
        self.buffer.len() * 8 + usize::from(self.n_bits)
    }

    /// Push one word at the current width.
    ///
    /// Bits of `value` above the width are discarded.
    pub fn push_word(&mut self, value: u16) {
        debug_assert!(u32::from(value) <= self.width.mask());
        self.code |= (u32::from(value) & self.width.mask()) << self.n_bits;
        self.n_bits += u8::from(self.width);
        while self.n_bits >= 8 {
            self.buffer.push(self.code as u8);
            self.code >>= 8;
            self.n_bits -= 8;
        }
    }

    /// Finish packing, padding the last byte with zero bits
    pub fn finish(mut self) -> Vec<u8> {
        if self.n_bits > 0 {
            self.buffer.push(self.code as u8);
        }
        self.buffer
    }
}

#[cfg(test)]
mod test {
    use super::*;

    /// Pack words by prepending bit strings, then reading bytes back from the
    /// tail of the string.
    fn pack_bit_string(words: &[(u16, u8)]) -> Vec<u8> {
        let mut s = String::new();
        for (value, width) in words {
            let w = usize::from(*width);
            s = format!("{:0w$b}{}", value, s, w = w);
        }
        let orphans = s.len() % 8;
        if orphans != 0 {
            s = "0".repeat(8 - orphans) + &s;
        }
        let mut bytes = vec![];
        let mut end = s.len();
        while end >= 8 {
            bytes.push(u8::from_str_radix(&s[end - 8..end], 2).unwrap());
            end -= 8;
        }
        bytes
    }

    fn pack(words: &[(u16, u8)]) -> Vec<u8> {
        let mut packer = BitPacker::new(words[0].1);
        for (value, width) in words {
            packer.set_width(*width);
            packer.push_word(*value);
        }
        packer.finish()
    }

    #[test]
    fn two_black_pixels() {
        let mut packer = BitPacker::new(5);
        for code in &[16, 0, 0, 17] {
            packer.push_word(*code);
        }
        assert_eq!(packer.len_bits(), 20);
        assert_eq!(packer.finish(), vec![0x10, 0x80, 0x08]);
    }

    #[test]
    fn one_transparent_pixel() {
        let mut packer = BitPacker::new(5);
        for code in &[16, 15, 17] {
            packer.push_word(*code);
        }
        assert_eq!(packer.len_bits(), 15);
        assert_eq!(packer.finish(), vec![0xF0, 0x45]);
    }

    #[test]
    fn empty() {
        assert_eq!(BitPacker::new(5).finish(), Vec::<u8>::new());
    }

    #[test]
    fn width_change() {
        let bytes = pack(&[(31, 5), (32, 6)]);
        assert_eq!(bytes, vec![0x1F, 0x04]);
    }

    #[test]
    fn width_clamped() {
        let mut packer = BitPacker::new(5);
        packer.set_width(13);
        assert_eq!(packer.width(), 12);
        packer.widen();
        assert_eq!(packer.width(), 12);
        packer.push_word(0xFFF);
        assert_eq!(packer.finish(), vec![0xFF, 0x0F]);
    }

    #[test]
    fn matches_bit_string() {
        let mut words = vec![(16, 5)];
        let mut width = 5;
        for i in 0..3000u16 {
            if i % 97 == 96 && width < 12 {
                width += 1;
            }
            let value = i.wrapping_mul(2654) % (1 << width);
            words.push((value, width));
        }
        words.push((17, width));
        assert_eq!(pack(&words), pack_bit_string(&words));
    }
}
