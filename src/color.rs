// color.rs
//
// Copyright (c) 2026  minitel-gif developers
//
//! Minitel color indexing
use pix::el::Pixel;
use pix::rgb::{Rgb, SRgba8};

/// Number of entries in the fixed palette
pub const PALETTE_LEN: usize = 16;

/// Fixed Minitel palette, as RGB triples
///
/// Entries 0-7 have one bit each for blue, green and red presence.  Entries
/// 8-14 are filler, and entry 15 is the placeholder for transparent pixels.
pub const PALETTE: [u8; PALETTE_LEN * 3] = [
    0x00, 0x00, 0x00, // black
    0x00, 0x00, 0xFF, // blue
    0x00, 0xFF, 0x00, // green
    0x00, 0xFF, 0xFF, // cyan
    0xFF, 0x00, 0x00, // red
    0xFF, 0x00, 0xFF, // magenta
    0xFF, 0xFF, 0x00, // yellow
    0xFF, 0xFF, 0xFF, // white
    0xFB, 0xFB, 0xFB,
    0xFB, 0xFB, 0xFB,
    0xFB, 0xFB, 0xFB,
    0xFB, 0xFB, 0xFB,
    0xFB, 0xFB, 0xFB,
    0xFB, 0xFB, 0xFB,
    0xFB, 0xFB, 0xFB,
    0xFB, 0xFB, 0xFB, // transparent
];

/// Index into the fixed palette (0-15)
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct ColorIndex(u8);

impl From<ColorIndex> for u8 {
    fn from(idx: ColorIndex) -> Self {
        idx.0
    }
}

impl From<SRgba8> for ColorIndex {
    fn from(clr: SRgba8) -> Self {
        ColorIndex::from_rgba(
            u8::from(Rgb::red(clr)),
            u8::from(Rgb::green(clr)),
            u8::from(Rgb::blue(clr)),
            u8::from(clr.alpha()),
        )
    }
}

impl ColorIndex {
    /// Index reserved for fully transparent pixels
    pub const TRANSPARENT: Self = ColorIndex(15);

    const RED: u8 = 0b0100;
    const GREEN: u8 = 0b0010;
    const BLUE: u8 = 0b0001;

    /// Create an index from an already quantized value.
    ///
    /// Returns `None` if `idx` is outside the palette.
    pub fn new(idx: u8) -> Option<Self> {
        if usize::from(idx) < PALETTE_LEN {
            Some(ColorIndex(idx))
        } else {
            None
        }
    }

    /// Map a color to its palette index.
    ///
    /// Any zero opacity is transparent.  Otherwise, each channel only counts
    /// as present or absent -- intensity is ignored.
    pub fn from_rgba(red: u8, green: u8, blue: u8, opacity: u8) -> Self {
        if opacity == 0 {
            return Self::TRANSPARENT;
        }
        let mut idx = 0;
        if red != 0 {
            idx |= Self::RED;
        }
        if green != 0 {
            idx |= Self::GREEN;
        }
        if blue != 0 {
            idx |= Self::BLUE;
        }
        ColorIndex(idx)
    }

    /// Get the palette entry as an RGB triple
    pub fn rgb(self) -> [u8; 3] {
        let i = usize::from(self.0) * 3;
        [PALETTE[i], PALETTE[i + 1], PALETTE[i + 2]]
    }

    /// Check if the index is the transparent placeholder
    pub fn is_transparent(self) -> bool {
        self == Self::TRANSPARENT
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn opaque_colors() {
        assert_eq!(u8::from(ColorIndex::from_rgba(0, 0, 0, 255)), 0);
        assert_eq!(u8::from(ColorIndex::from_rgba(0, 0, 1, 255)), 1);
        assert_eq!(u8::from(ColorIndex::from_rgba(0, 200, 0, 1)), 2);
        assert_eq!(u8::from(ColorIndex::from_rgba(0, 9, 9, 128)), 3);
        assert_eq!(u8::from(ColorIndex::from_rgba(255, 0, 0, 255)), 4);
        assert_eq!(u8::from(ColorIndex::from_rgba(3, 0, 3, 255)), 5);
        assert_eq!(u8::from(ColorIndex::from_rgba(1, 1, 0, 255)), 6);
        assert_eq!(u8::from(ColorIndex::from_rgba(255, 255, 255, 255)), 7);
    }

    #[test]
    fn transparent() {
        assert_eq!(ColorIndex::from_rgba(0, 0, 0, 0), ColorIndex::TRANSPARENT);
        assert_eq!(
            ColorIndex::from_rgba(255, 255, 255, 0),
            ColorIndex::TRANSPARENT
        );
        assert!(ColorIndex::from_rgba(1, 2, 3, 0).is_transparent());
        assert!(!ColorIndex::from_rgba(0, 0, 0, 1).is_transparent());
    }

    #[test]
    fn from_pixel() {
        let idx = ColorIndex::from(SRgba8::new(0, 0x80, 0xFF, 0xFF));
        assert_eq!(u8::from(idx), 3);
        let idx = ColorIndex::from(SRgba8::new(0xFF, 0x80, 0xFF, 0));
        assert_eq!(idx, ColorIndex::TRANSPARENT);
    }

    #[test]
    fn quantized() {
        assert_eq!(ColorIndex::new(15), Some(ColorIndex::TRANSPARENT));
        assert_eq!(ColorIndex::new(9).map(u8::from), Some(9));
        assert_eq!(ColorIndex::new(16), None);
    }

    #[test]
    fn palette_entries() {
        assert_eq!(ColorIndex::from_rgba(0, 0, 0, 1).rgb(), [0, 0, 0]);
        assert_eq!(ColorIndex::from_rgba(0, 0, 1, 1).rgb(), [0, 0, 0xFF]);
        assert_eq!(ColorIndex::from_rgba(1, 1, 0, 1).rgb(), [0xFF, 0xFF, 0]);
        assert_eq!(ColorIndex::TRANSPARENT.rgb(), [0xFB, 0xFB, 0xFB]);
        for i in 0..8u8 {
            let idx = ColorIndex::from_rgba(i & 4, i & 2, i & 1, 0xFF);
            assert_eq!(u8::from(idx), i);
        }
    }
}
