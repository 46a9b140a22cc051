// private.rs
//
// Copyright (c) 2026  minitel-gif developers
//
//! Private module for top-level items
use crate::color::ColorIndex;
use crate::encode::{self, BlockEnc};
use crate::error::{Error, Result};
use crate::lzw::TablePolicy;
use pix::rgb::SRgba8;
use pix::Raster;
use std::io::Write;

/// Default image width, in pixels
const DEFAULT_WIDTH: u32 = 320;

/// Default image height, in pixels
const DEFAULT_HEIGHT: u32 = 250;

/// Default delay, in milliseconds (25 Hz)
const DEFAULT_DELAY_MS: u32 = 40;

/// GIF encoder for Minitel images
///
/// Holds a single image: each call to [add] replaces the previous one, and
/// [save] produces a one-frame GIF89a file.
///
/// ## Example
/// ```
/// use minitel_gif::Encoder;
/// use pix::rgb::SRgba8;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let black = SRgba8::new(0, 0, 0, 255);
/// let mut enc = Encoder::default();
/// enc.add(&[black, black], 2, 1, 100)?;
/// let gif = enc.save()?;
/// assert_eq!(&gif[..6], b"GIF89a");
/// # Ok(())
/// # }
/// ```
///
/// [add]: struct.Encoder.html#method.add
/// [save]: struct.Encoder.html#method.save
#[derive(Clone, Debug)]
pub struct Encoder {
    /// Image width, in pixels
    width: u32,
    /// Image height, in pixels
    height: u32,
    /// Frame delay, in milliseconds
    delay_ms: u32,
    /// Full code table policy
    policy: TablePolicy,
    /// Color indices of the most recent image
    indices: Option<Vec<ColorIndex>>,
}

impl Default for Encoder {
    fn default() -> Self {
        Self::new(DEFAULT_WIDTH, DEFAULT_HEIGHT, DEFAULT_DELAY_MS)
    }
}

impl Encoder {
    /// Create a new encoder.
    ///
    /// Values are only checked once an image is added.
    pub fn new(width: u32, height: u32, delay_ms: u32) -> Self {
        Encoder {
            width,
            height,
            delay_ms,
            policy: TablePolicy::default(),
            indices: None,
        }
    }

    /// Set the policy for a full LZW code table
    pub fn with_table_policy(mut self, policy: TablePolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Get the image width
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Get the image height
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Get the frame delay, in milliseconds
    pub fn delay_ms(&self) -> u32 {
        self.delay_ms
    }

    /// Add an image, replacing any previous one.
    ///
    /// * `pixels`: row-major, `width * height` long.  Zero alpha is
    ///   transparent; any other alpha is opaque.
    /// * `delay_ms`: frame delay in milliseconds.
    pub fn add(
        &mut self,
        pixels: &[SRgba8],
        width: u32,
        height: u32,
        delay_ms: u32,
    ) -> Result<()> {
        let w = encode::dimension(width)?;
        let h = encode::dimension(height)?;
        if pixels.len() != usize::from(w) * usize::from(h) {
            return Err(Error::PixelCountMismatch);
        }
        self.width = width;
        self.height = height;
        self.delay_ms = delay_ms;
        self.indices =
            Some(pixels.iter().map(|p| ColorIndex::from(*p)).collect());
        Ok(())
    }

    /// Add an image from a raster, replacing any previous one.
    pub fn add_raster(
        &mut self,
        raster: &Raster<SRgba8>,
        delay_ms: u32,
    ) -> Result<()> {
        self.add(raster.pixels(), raster.width(), raster.height(), delay_ms)
    }

    /// Encode the most recent image into a GIF file
    pub fn save(&self) -> Result<Vec<u8>> {
        self.save_to(Vec::new())
    }

    /// Encode the most recent image into a writer
    pub fn save_to<W: Write>(&self, writer: W) -> Result<W> {
        let indices = self.indices.as_ref().ok_or(Error::MissingImage)?;
        let blocks = encode::frame_blocks(
            self.width,
            self.height,
            self.delay_ms,
            indices,
            self.policy,
        )?;
        let mut enc = BlockEnc::new(writer);
        for block in &blocks {
            enc.encode(block)?;
        }
        enc.into_inner()
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn black() -> SRgba8 {
        SRgba8::new(0, 0, 0, 255)
    }

    #[test]
    fn defaults() {
        let enc = Encoder::default();
        assert_eq!(enc.width(), 320);
        assert_eq!(enc.height(), 250);
        assert_eq!(enc.delay_ms(), 40);
        assert!(matches!(enc.save(), Err(Error::MissingImage)));
    }

    #[test]
    fn two_black_pixels() {
        let mut enc = Encoder::default();
        enc.add(&[black(), black()], 2, 1, 100).unwrap();
        assert_eq!(enc.width(), 2);
        assert_eq!(enc.height(), 1);
        let gif = enc.save().unwrap();
        assert_eq!(gif.len(), 6 + 7 + 48 + 8 + 10 + 6 + 1);
        assert_eq!(&gif[..6], b"GIF89a");
        // delay 100 ms = 10 cs
        assert_eq!(&gif[61..69], &[0x21, 0xF9, 0x04, 0x01, 10, 0, 0x0F, 0]);
        assert_eq!(&gif[79..], &[0x04, 0x03, 0x10, 0x80, 0x08, 0x00, 0x3B]);
    }

    #[test]
    fn one_transparent_pixel() {
        let mut enc = Encoder::new(1, 1, 40);
        enc.add(&[SRgba8::new(0, 0, 0, 0)], 1, 1, 40).unwrap();
        let gif = enc.save().unwrap();
        assert_eq!(&gif[79..], &[0x04, 0x02, 0xF0, 0x45, 0x00, 0x3B]);
    }

    #[test]
    fn add_replaces() {
        let mut enc = Encoder::default();
        let red = SRgba8::new(255, 0, 0, 255);
        enc.add(&[red; 6], 3, 2, 40).unwrap();
        enc.add(&[black(), black()], 2, 1, 100).unwrap();
        let mut single = Encoder::default();
        single.add(&[black(), black()], 2, 1, 100).unwrap();
        assert_eq!(enc.save().unwrap(), single.save().unwrap());
    }

    #[test]
    fn rejected_add_keeps_image() {
        let mut enc = Encoder::default();
        enc.add(&[black(), black()], 2, 1, 100).unwrap();
        let before = enc.save().unwrap();
        let res = enc.add(&[black(); 3], 2, 1, 100);
        assert!(matches!(res, Err(Error::PixelCountMismatch)));
        let res = enc.add(&[], 0, 1, 100);
        assert!(matches!(res, Err(Error::InvalidDimensions)));
        let res = enc.add(&[black()], 1, 70_000, 100);
        assert!(matches!(res, Err(Error::InvalidDimensions)));
        assert_eq!(enc.save().unwrap(), before);
    }

    #[test]
    fn idempotent() {
        let pixels: Vec<SRgba8> = (0..64u8)
            .map(|i| SRgba8::new(i & 1, i & 2, i & 4, i & 8))
            .collect();
        let mut enc = Encoder::default();
        enc.add(&pixels, 8, 8, 40).unwrap();
        assert_eq!(enc.save().unwrap(), enc.save().unwrap());
    }

    #[test]
    fn raster() {
        let mut raster = Raster::with_clear(2, 1);
        *raster.pixel_mut(0, 0) = black();
        *raster.pixel_mut(1, 0) = black();
        let mut enc = Encoder::default();
        enc.add_raster(&raster, 100).unwrap();
        let mut direct = Encoder::default();
        direct.add(&[black(), black()], 2, 1, 100).unwrap();
        assert_eq!(enc.save().unwrap(), direct.save().unwrap());
    }

    #[test]
    fn save_to_writer() {
        let mut enc = Encoder::default();
        enc.add(&[black()], 1, 1, 40).unwrap();
        let buf = enc.save_to(Vec::with_capacity(128)).unwrap();
        assert_eq!(buf, enc.save().unwrap());
    }
}
