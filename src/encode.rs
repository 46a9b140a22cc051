// encode.rs
//
// Copyright (c) 2026  minitel-gif developers
//
//! GIF container assembly
use crate::block::*;
use crate::color::{ColorIndex, PALETTE, PALETTE_LEN};
use crate::error::{Error, Result};
use crate::lzw::{self, TablePolicy, MIN_CODE_SIZE};
use std::convert::TryFrom;
use std::io::{self, Write};

/// Background color index (a filler palette entry)
const BACKGROUND_COLOR_IDX: u8 = 0x08;

/// Maximum length of a data sub-block
const SUB_BLOCK_SZ: usize = 0xFF;

impl Block {
    /// Format a block into a writer
    pub fn format<W: Write>(&self, w: &mut W) -> io::Result<()> {
        use crate::block::Block::*;
        match self {
            Header(b) => b.format(w),
            LogicalScreenDesc(b) => b.format(w),
            GlobalColorTable(b) => b.format(w),
            GraphicControl(b) => b.format(w),
            ImageDesc(b) => b.format(w),
            ImageData(b) => b.format(w),
            Trailer(b) => b.format(w),
        }
    }
}

impl Header {
    fn format<W: Write>(&self, w: &mut W) -> io::Result<()> {
        w.write_all(BlockCode::Header_.signature())?;
        w.write_all(&self.version())
    }
}

impl LogicalScreenDesc {
    fn format<W: Write>(&self, w: &mut W) -> io::Result<()> {
        let mut buf = Vec::with_capacity(BlockCode::LogicalScreenDesc_.size());
        buf.extend_from_slice(&self.screen_width().to_le_bytes());
        buf.extend_from_slice(&self.screen_height().to_le_bytes());
        buf.push(self.flags());
        buf.push(self.background_color_idx());
        buf.push(self.pixel_aspect_ratio());
        w.write_all(&buf)
    }
}

impl GlobalColorTable {
    fn format<W: Write>(&self, w: &mut W) -> io::Result<()> {
        w.write_all(self.colors())
    }
}

impl GraphicControl {
    fn format<W: Write>(&self, w: &mut W) -> io::Result<()> {
        w.write_all(BlockCode::Extension_.signature())?;
        let mut buf = Vec::with_capacity(7);
        buf.push(Self::LABEL);
        buf.push(Self::DATA_SIZE); // block size
        buf.push(self.flags());
        buf.extend_from_slice(&self.delay_time_cs().to_le_bytes());
        buf.push(self.transparent_color_idx());
        buf.push(0); // block terminator
        w.write_all(&buf)
    }
}

impl ImageDesc {
    fn format<W: Write>(&self, w: &mut W) -> io::Result<()> {
        w.write_all(BlockCode::ImageDesc_.signature())?;
        let mut buf = Vec::with_capacity(9);
        buf.extend_from_slice(&self.left().to_le_bytes());
        buf.extend_from_slice(&self.top().to_le_bytes());
        buf.extend_from_slice(&self.width().to_le_bytes());
        buf.extend_from_slice(&self.height().to_le_bytes());
        buf.push(self.flags());
        w.write_all(&buf)
    }
}

impl ImageData {
    fn format<W: Write>(&self, w: &mut W) -> io::Result<()> {
        w.write_all(&[self.min_code_size()])?;
        let mut bw = SubBlockWriter::new(w);
        bw.write_all(self.data())?;
        bw.flush()?;
        w.write_all(&[0]) // block terminator
    }
}

impl Trailer {
    fn format<W: Write>(&self, w: &mut W) -> io::Result<()> {
        w.write_all(BlockCode::Trailer_.signature())
    }
}

/// Writer which splits data into length-prefixed sub-blocks
struct SubBlockWriter<'a, W: Write> {
    writer: &'a mut W,
    buf: Vec<u8>,
}

impl<'a, W: Write> SubBlockWriter<'a, W> {
    fn new(writer: &'a mut W) -> Self {
        let buf = Vec::with_capacity(SUB_BLOCK_SZ);
        SubBlockWriter { writer, buf }
    }
}

impl<'a, W: Write> Write for SubBlockWriter<'a, W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let remaining = SUB_BLOCK_SZ - self.buf.len();
        let consumed = remaining.min(buf.len());
        self.buf.extend_from_slice(&buf[..consumed]);
        if self.buf.len() == SUB_BLOCK_SZ {
            self.writer.write_all(&[SUB_BLOCK_SZ as u8])?;
            self.writer.write_all(&self.buf)?;
            self.buf.clear();
        }
        Ok(consumed)
    }

    fn flush(&mut self) -> io::Result<()> {
        let len = self.buf.len();
        if len > 0 {
            self.writer.write_all(&[len as u8])?;
            self.writer.write_all(&self.buf)?;
            self.buf.clear();
        }
        Ok(())
    }
}

/// Check image dimensions fit in a GIF
pub(crate) fn dimension(value: u32) -> Result<u16> {
    match u16::try_from(value) {
        Ok(v) if v > 0 => Ok(v),
        _ => Err(Error::InvalidDimensions),
    }
}

/// Convert a delay in milliseconds to centiseconds
pub(crate) fn delay_time_cs(delay_ms: u32) -> Result<u16> {
    Ok(u16::try_from(delay_ms / 10)?)
}

/// Build the sequence of blocks for a single-frame GIF.
///
/// * `width` / `height`: image size in pixels.
/// * `delay_ms`: frame delay in milliseconds (truncated to centiseconds).
/// * `indices`: color indices, row-major; must hold `width * height`.
pub fn frame_blocks(
    width: u32,
    height: u32,
    delay_ms: u32,
    indices: &[ColorIndex],
    policy: TablePolicy,
) -> Result<Vec<Block>> {
    let width = dimension(width)?;
    let height = dimension(height)?;
    let delay_time_cs = delay_time_cs(delay_ms)?;
    let image_desc = ImageDesc::default().with_width(width).with_height(height);
    if indices.len() != image_desc.image_sz() {
        return Err(Error::PixelCountMismatch);
    }
    let data = lzw::compress(indices, policy)?;
    debug!(
        "image {}x{}: {} pixels -> {} bytes",
        width,
        height,
        indices.len(),
        data.len()
    );
    Ok(vec![
        Header::default().into(),
        LogicalScreenDesc::default()
            .with_screen_width(width)
            .with_screen_height(height)
            .with_global_color_table(PALETTE_LEN)
            .with_background_color_idx(BACKGROUND_COLOR_IDX)
            .into(),
        GlobalColorTable::with_colors(&PALETTE).into(),
        GraphicControl::default()
            .with_delay_time_cs(delay_time_cs)
            .with_transparent_color(Some(ColorIndex::TRANSPARENT.into()))
            .into(),
        image_desc.into(),
        ImageData::with_compressed(MIN_CODE_SIZE, data).into(),
        Trailer::default().into(),
    ])
}

/// Block encoder
///
/// Writes [Block]s in order to a writer.
///
/// [Block]: block/enum.Block.html
pub struct BlockEnc<W: Write> {
    /// Writer for output data
    writer: W,
}

impl<W: Write> BlockEnc<W> {
    /// Create a new block encoder
    pub fn new(writer: W) -> Self {
        BlockEnc { writer }
    }

    /// Encode one block
    pub fn encode(&mut self, block: &Block) -> Result<()> {
        block.format(&mut self.writer)?;
        Ok(())
    }

    /// Flush and return the writer
    pub fn into_inner(mut self) -> Result<W> {
        self.writer.flush()?;
        Ok(self.writer)
    }
}
