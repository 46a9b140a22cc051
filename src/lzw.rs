// lzw.rs
//
// Copyright (c) 2026  minitel-gif developers
//
//! Lempel-Ziv-Welch compression for GIF
use crate::color::{ColorIndex, PALETTE_LEN};
use crate::error::{Error, Result};
use crate::packer::{BitPacker, Bits};
use std::cmp::Ordering;

/// Code type
pub type Code = u16;

/// LZW minimum code size for a 16-entry palette
pub const MIN_CODE_SIZE: u8 = 4;

/// Clear code
pub const CLEAR_CODE: Code = 1 << MIN_CODE_SIZE;

/// End-of-information code
pub const END_CODE: Code = CLEAR_CODE + 1;

/// First code assigned to a dictionary entry
const FIRST_CODE: Code = END_CODE + 1;

/// Code which is never assigned (table full)
const MAX_CODE: Code = (1 << 12) - 1;

/// Policy for a full code table
///
/// GIF codes are limited to 12 bits.  When the next code to assign would be
/// 4095, the table is full and something must give.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TablePolicy {
    /// Emit a clear code and start over with an empty dictionary
    Reset,
    /// Fail with [DictionaryOverflow](../enum.Error.html#variant.DictionaryOverflow)
    Reject,
}

impl Default for TablePolicy {
    fn default() -> Self {
        TablePolicy::Reset
    }
}

/// Sequence of color indices known to a [Dictionary]
///
/// A phrase of one index is its own code, without a dictionary entry.
///
/// [Dictionary]: struct.Dictionary.html
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Phrase {
    /// Code for the phrase
    code: Code,
    /// Number of indices
    len: usize,
}

impl From<ColorIndex> for Phrase {
    fn from(idx: ColorIndex) -> Self {
        Phrase {
            code: u8::from(idx).into(),
            len: 1,
        }
    }
}

impl Phrase {
    /// Get the code for the phrase
    pub fn code(self) -> Code {
        self.code
    }

    /// Get the number of indices in the phrase
    pub fn len(self) -> usize {
        self.len
    }
}

/// Node for code dictionary
///
/// Children of a node form a binary search tree ordered by symbol.
#[derive(Clone, Copy, Debug)]
struct Node {
    /// First child code
    next: Option<Code>,
    /// Left sibling code
    left: Option<Code>,
    /// Right sibling code
    right: Option<Code>,
    /// Last symbol of phrase
    symbol: u8,
}

/// Result of a dictionary search
enum Slot {
    /// Phrase has a code
    Found(Code),
    /// Phrase would be linked from a node
    Vacant(Code, Ordering),
}

impl Node {
    fn new(symbol: u8) -> Self {
        Node {
            next: None,
            left: None,
            right: None,
            symbol,
        }
    }

    /// Get a link code
    fn link(&self, ordering: Ordering) -> Option<Code> {
        match ordering {
            Ordering::Less => self.left,
            Ordering::Equal => self.next,
            Ordering::Greater => self.right,
        }
    }

    /// Set a link code
    fn set_link(&mut self, ordering: Ordering, code: Code) {
        match ordering {
            Ordering::Less => self.left = Some(code),
            Ordering::Equal => self.next = Some(code),
            Ordering::Greater => self.right = Some(code),
        }
    }
}

/// Code dictionary trie
///
/// Each entry is keyed by its prefix code and last symbol, so two phrases
/// with equal index sequences always share one code.
#[derive(Debug)]
pub struct Dictionary {
    /// Table of codes
    table: Vec<Node>,
}

impl Default for Dictionary {
    fn default() -> Self {
        Self::new()
    }
}

impl Dictionary {
    /// Create a new code dictionary
    pub fn new() -> Self {
        let mut dict = Dictionary {
            table: Vec::with_capacity(MAX_CODE.into()),
        };
        dict.reset();
        dict
    }

    /// Reset the dictionary
    pub fn reset(&mut self) {
        self.table.clear();
        for symbol in 0..PALETTE_LEN {
            self.table.push(Node::new(symbol as u8));
        }
        self.table.push(Node::new(0)); // clear code
        self.table.push(Node::new(0)); // end code
        debug_assert_eq!(self.next_code(), FIRST_CODE);
    }

    /// Get the next code to be assigned
    pub fn next_code(&self) -> Code {
        self.table.len() as Code
    }

    /// Search for a phrase extended by one symbol
    fn search(&self, prefix: Code, symbol: u8) -> Slot {
        let mut code = prefix;
        let mut ordering = Ordering::Equal;
        while let Some(c) = self.table[usize::from(code)].link(ordering) {
            code = c;
            ordering = symbol.cmp(&self.table[usize::from(code)].symbol);
            if ordering == Ordering::Equal {
                return Slot::Found(code);
            }
        }
        Slot::Vacant(code, ordering)
    }

    /// Look up a phrase extended by one index
    pub fn extend(&self, phrase: Phrase, idx: ColorIndex) -> Option<Phrase> {
        match self.search(phrase.code, idx.into()) {
            Slot::Found(code) => Some(Phrase {
                code,
                len: phrase.len + 1,
            }),
            Slot::Vacant(_, _) => None,
        }
    }

    /// Look up a sequence of indices
    pub fn lookup(&self, indices: &[ColorIndex]) -> Option<Phrase> {
        let (first, rest) = indices.split_first()?;
        rest.iter().try_fold(Phrase::from(*first), |phrase, idx| {
            self.extend(phrase, *idx)
        })
    }

    /// Insert a phrase extended by one index, returning its code
    pub fn insert(&mut self, phrase: Phrase, idx: ColorIndex) -> Code {
        let symbol = idx.into();
        match self.search(phrase.code, symbol) {
            Slot::Found(code) => code,
            Slot::Vacant(parent, ordering) => {
                let code = self.next_code();
                self.table[usize::from(parent)].set_link(ordering, code);
                self.table.push(Node::new(symbol));
                code
            }
        }
    }
}

/// LZW Data Compressor
///
/// Consumes color indices one at a time.  A clear code is packed on
/// creation; [finish] flushes the buffered phrase and the end code.
///
/// [finish]: struct.Compressor.html#method.finish
#[derive(Debug)]
pub struct Compressor {
    /// Code dictionary
    dict: Dictionary,
    /// Packer for output codes
    packer: BitPacker,
    /// Buffered phrase
    phrase: Option<Phrase>,
    /// Full table policy
    policy: TablePolicy,
    /// Number of codes packed
    n_codes: usize,
}

impl Default for Compressor {
    fn default() -> Self {
        Self::new(TablePolicy::default())
    }
}

impl Compressor {
    /// Create a new compressor
    pub fn new(policy: TablePolicy) -> Self {
        let mut compressor = Compressor {
            dict: Dictionary::new(),
            packer: BitPacker::new(MIN_CODE_SIZE + 1),
            phrase: None,
            policy,
            n_codes: 0,
        };
        compressor.pack(CLEAR_CODE);
        compressor
    }

    /// Get the current code width
    pub fn width(&self) -> u8 {
        self.packer.width()
    }

    /// Get the next code to be assigned
    pub fn next_code(&self) -> Code {
        self.dict.next_code()
    }

    /// Get the code dictionary
    pub fn dictionary(&self) -> &Dictionary {
        &self.dict
    }

    /// Pack one code
    fn pack(&mut self, code: Code) {
        trace!("code {} ({} bits)", code, self.packer.width());
        self.packer.push_word(code);
        self.n_codes += 1;
    }

    /// Pack the code of a phrase, widening codes if needed
    fn pack_phrase(&mut self, phrase: Phrase) {
        self.pack(phrase.code());
        let bits = self.packer.bits();
        if bits < Bits::MAX && self.dict.next_code() >= bits.entries() {
            self.packer.widen();
            trace!("code width {}", self.packer.width());
        }
    }

    /// Compress one color index
    pub fn push(&mut self, idx: ColorIndex) -> Result<()> {
        let phrase = match self.phrase {
            Some(phrase) => phrase,
            None => {
                self.phrase = Some(idx.into());
                return Ok(());
            }
        };
        if let Some(candidate) = self.dict.extend(phrase, idx) {
            self.phrase = Some(candidate);
            return Ok(());
        }
        self.pack_phrase(phrase);
        if self.dict.next_code() >= MAX_CODE {
            match self.policy {
                TablePolicy::Reset => {
                    debug!("code table full, resetting");
                    self.pack(CLEAR_CODE);
                    self.dict.reset();
                    self.packer.set_width(MIN_CODE_SIZE + 1);
                }
                TablePolicy::Reject => return Err(Error::DictionaryOverflow),
            }
        } else {
            self.dict.insert(phrase, idx);
        }
        self.phrase = Some(idx.into());
        Ok(())
    }

    /// Finish compressing, returning packed bytes
    pub fn finish(mut self) -> Vec<u8> {
        if let Some(phrase) = self.phrase.take() {
            self.pack_phrase(phrase);
        }
        self.pack(END_CODE);
        debug!(
            "compressed {} codes into {} bits",
            self.n_codes,
            self.packer.len_bits()
        );
        self.packer.finish()
    }
}

/// Compress a slice of color indices
pub fn compress(indices: &[ColorIndex], policy: TablePolicy) -> Result<Vec<u8>> {
    let mut compressor = Compressor::new(policy);
    for idx in indices {
        compressor.push(*idx)?;
    }
    Ok(compressor.finish())
}
