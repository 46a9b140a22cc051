// block.rs
//
// Copyright (c) 2026  minitel-gif developers
//
//! GIF file blocks
const CHANNELS: usize = 3;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub(crate) enum BlockCode {
    Header_,
    LogicalScreenDesc_,
    GlobalColorTable_,
    Extension_,
    ImageDesc_,
    ImageData_,
    Trailer_,
}

impl BlockCode {
    pub fn signature(self) -> &'static [u8] {
        use self::BlockCode::*;
        match self {
            Header_ => b"GIF",
            ImageDesc_ => b",", // (0x2C) Image separator
            Extension_ => b"!", // (0x21) Extension introducer
            Trailer_ => b";",   // (0x3B) GIF trailer
            _ => &[],
        }
    }

    /// Fixed size of a block, not counting sub-blocks
    pub fn size(self) -> usize {
        use self::BlockCode::*;
        match self {
            Header_ => 6,
            LogicalScreenDesc_ => 7,
            ImageDesc_ => 10,
            Trailer_ => 1,
            Extension_ => 2, // +sub-blocks
            ImageData_ => 1, // +sub-blocks
            GlobalColorTable_ => 0,
        }
    }
}

/// Header block
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Header {
    version: [u8; 3],
}

impl Default for Header {
    fn default() -> Self {
        Header::with_version(*b"89a")
    }
}

impl Header {
    pub fn with_version(version: [u8; 3]) -> Self {
        Header { version }
    }
    pub fn version(&self) -> [u8; 3] {
        self.version
    }
}

/// Logical screen descriptor block
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LogicalScreenDesc {
    screen_width: u16,
    screen_height: u16,
    flags: u8,
    background_color_idx: u8, // index into global color table
    pixel_aspect_ratio: u8,
}

impl LogicalScreenDesc {
    const COLOR_TABLE_PRESENT: u8 = 0b1000_0000;
    const COLOR_TABLE_SIZE: u8 = 0b0000_0111;

    pub fn with_screen_width(mut self, screen_width: u16) -> Self {
        self.screen_width = screen_width;
        self
    }
    pub fn screen_width(&self) -> u16 {
        self.screen_width
    }
    pub fn with_screen_height(mut self, screen_height: u16) -> Self {
        self.screen_height = screen_height;
        self
    }
    pub fn screen_height(&self) -> u16 {
        self.screen_height
    }
    pub fn flags(&self) -> u8 {
        self.flags
    }
    /// Declare a global color table with `len` entries (2-256).
    ///
    /// Color resolution and sort flag are left clear.
    pub fn with_global_color_table(mut self, len: usize) -> Self {
        let len = len.max(2).next_power_of_two().min(256);
        let bits = len.trailing_zeros() as u8 - 1;
        self.flags = Self::COLOR_TABLE_PRESENT | (bits & Self::COLOR_TABLE_SIZE);
        self
    }
    pub fn color_table_len(&self) -> usize {
        if self.flags & Self::COLOR_TABLE_PRESENT != 0 {
            2 << usize::from(self.flags & Self::COLOR_TABLE_SIZE)
        } else {
            0
        }
    }
    pub fn with_background_color_idx(mut self, background_color_idx: u8)
        -> Self
    {
        self.background_color_idx = background_color_idx;
        self
    }
    pub fn background_color_idx(&self) -> u8 {
        self.background_color_idx
    }
    pub fn pixel_aspect_ratio(&self) -> u8 {
        self.pixel_aspect_ratio
    }
}

/// Global color table block
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GlobalColorTable {
    colors: Vec<u8>,
}

impl GlobalColorTable {
    pub fn with_colors(colors: &[u8]) -> Self {
        debug_assert_eq!(colors.len() % CHANNELS, 0);
        let colors = colors.to_vec();
        GlobalColorTable { colors }
    }
    /// Number of color entries
    pub fn len(&self) -> usize {
        self.colors.len() / CHANNELS
    }
    pub fn colors(&self) -> &[u8] {
        &self.colors
    }
}

/// Graphic control extension block
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct GraphicControl {
    flags: u8,
    delay_time_cs: u16, // delay in centiseconds (hundredths of a second)
    transparent_color_idx: u8,
}

impl GraphicControl {
    /// Graphic control extension label
    pub(crate) const LABEL: u8 = 0xF9;
    /// Size of data sub-block
    pub(crate) const DATA_SIZE: u8 = 4;

    const TRANSPARENT_COLOR: u8 = 0b0000_0001;

    pub fn flags(&self) -> u8 {
        self.flags
    }
    pub fn delay_time_cs(&self) -> u16 {
        self.delay_time_cs
    }
    pub fn with_delay_time_cs(mut self, delay_time_cs: u16) -> Self {
        self.delay_time_cs = delay_time_cs;
        self
    }
    pub fn transparent_color(&self) -> Option<u8> {
        if self.flags & Self::TRANSPARENT_COLOR != 0 {
            Some(self.transparent_color_idx)
        } else {
            None
        }
    }
    pub fn transparent_color_idx(&self) -> u8 {
        self.transparent_color_idx
    }
    pub fn with_transparent_color(mut self, transparent_color: Option<u8>)
        -> Self
    {
        match transparent_color {
            Some(t) => {
                self.flags |= Self::TRANSPARENT_COLOR;
                self.transparent_color_idx = t;
            }
            None => {
                self.flags &= !Self::TRANSPARENT_COLOR;
                self.transparent_color_idx = 0;
            }
        }
        self
    }
}

/// Image descriptor block
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ImageDesc {
    left: u16,
    top: u16,
    width: u16,
    height: u16,
    flags: u8,
}

impl ImageDesc {
    pub fn with_left(mut self, left: u16) -> Self {
        self.left = left;
        self
    }
    pub fn left(&self) -> u16 {
        self.left
    }
    pub fn with_top(mut self, top: u16) -> Self {
        self.top = top;
        self
    }
    pub fn top(&self) -> u16 {
        self.top
    }
    pub fn with_width(mut self, width: u16) -> Self {
        self.width = width;
        self
    }
    pub fn width(&self) -> u16 {
        self.width
    }
    pub fn with_height(mut self, height: u16) -> Self {
        self.height = height;
        self
    }
    pub fn height(&self) -> u16 {
        self.height
    }
    pub fn flags(&self) -> u8 {
        self.flags
    }
    pub fn image_sz(&self) -> usize {
        usize::from(self.width) * usize::from(self.height)
    }
}

/// Image data block, already compressed
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ImageData {
    min_code_size: u8,
    data: Vec<u8>,
}

impl ImageData {
    pub fn with_compressed(min_code_size: u8, data: Vec<u8>) -> Self {
        ImageData {
            min_code_size,
            data,
        }
    }
    pub fn min_code_size(&self) -> u8 {
        self.min_code_size
    }
    pub fn data(&self) -> &[u8] {
        &self.data
    }
}

/// Trailer block
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Trailer {}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Block {
    Header(Header),
    LogicalScreenDesc(LogicalScreenDesc),
    GlobalColorTable(GlobalColorTable),
    GraphicControl(GraphicControl),
    ImageDesc(ImageDesc),
    ImageData(ImageData),
    Trailer(Trailer),
}

impl Block {
    pub(crate) fn code(&self) -> BlockCode {
        use self::Block::*;
        match self {
            Header(_) => BlockCode::Header_,
            LogicalScreenDesc(_) => BlockCode::LogicalScreenDesc_,
            GlobalColorTable(_) => BlockCode::GlobalColorTable_,
            GraphicControl(_) => BlockCode::Extension_,
            ImageDesc(_) => BlockCode::ImageDesc_,
            ImageData(_) => BlockCode::ImageData_,
            Trailer(_) => BlockCode::Trailer_,
        }
    }
    pub fn has_sub_blocks(&self) -> bool {
        use self::Block::*;
        matches!(self, GraphicControl(_) | ImageData(_))
    }
}

impl From<Header> for Block {
    fn from(b: Header) -> Self {
        Block::Header(b)
    }
}

impl From<LogicalScreenDesc> for Block {
    fn from(b: LogicalScreenDesc) -> Self {
        Block::LogicalScreenDesc(b)
    }
}

impl From<GlobalColorTable> for Block {
    fn from(b: GlobalColorTable) -> Self {
        Block::GlobalColorTable(b)
    }
}

impl From<GraphicControl> for Block {
    fn from(b: GraphicControl) -> Self {
        Block::GraphicControl(b)
    }
}

impl From<ImageDesc> for Block {
    fn from(b: ImageDesc) -> Self {
        Block::ImageDesc(b)
    }
}

impl From<ImageData> for Block {
    fn from(b: ImageData) -> Self {
        Block::ImageData(b)
    }
}

impl From<Trailer> for Block {
    fn from(b: Trailer) -> Self {
        Block::Trailer(b)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn block_size() {
        assert!(std::mem::size_of::<Block>() <= 40);
    }

    #[test]
    fn color_table_len() {
        let d = LogicalScreenDesc::default();
        assert_eq!(d.color_table_len(), 0);
        let d = LogicalScreenDesc::default().with_global_color_table(16);
        assert_eq!(d.flags(), 0b1000_0011);
        assert_eq!(d.color_table_len(), 16);
        let d = LogicalScreenDesc::default().with_global_color_table(0);
        assert_eq!(d.flags(), 0b1000_0000);
        let d = LogicalScreenDesc::default().with_global_color_table(9);
        assert_eq!(d.color_table_len(), 16);
        let d = LogicalScreenDesc::default().with_global_color_table(300);
        assert_eq!(d.flags(), 0b1000_0111);
        assert_eq!(d.color_table_len(), 256);
    }

    #[test]
    fn transparent_color() {
        let gc = GraphicControl::default();
        assert_eq!(gc.transparent_color(), None);
        let gc = gc.with_transparent_color(Some(15));
        assert_eq!(gc.flags(), 0b0000_0001);
        assert_eq!(gc.transparent_color(), Some(15));
        let gc = gc.with_transparent_color(None);
        assert_eq!(gc.flags(), 0);
        assert_eq!(gc.transparent_color_idx(), 0);
    }

    #[test]
    fn sub_blocks() {
        assert!(Block::from(ImageData::with_compressed(4, vec![]))
            .has_sub_blocks());
        assert!(Block::from(GraphicControl::default()).has_sub_blocks());
        assert!(!Block::from(Trailer::default()).has_sub_blocks());
        assert_eq!(Block::from(Header::default()).code().size(), 6);
    }
}
