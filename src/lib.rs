// lib.rs      minitel-gif crate.
//
// Copyright (c) 2026  minitel-gif developers
//
//! GIF89a encoding for Minitel images.
//!
//! Pixels are indexed into a fixed 16-entry palette (eight colors plus a
//! transparent placeholder), compressed with GIF's variable-width LZW and
//! wrapped in a single-frame GIF file.
#![forbid(unsafe_code)]

#[macro_use]
extern crate log;

pub mod block;
mod color;
mod encode;
mod error;
pub mod lzw;
mod packer;
mod private;

pub use crate::color::{ColorIndex, PALETTE, PALETTE_LEN};
pub use crate::encode::{frame_blocks, BlockEnc};
pub use crate::error::{Error, Result};
pub use crate::lzw::TablePolicy;
pub use crate::packer::BitPacker;
pub use crate::private::Encoder;
