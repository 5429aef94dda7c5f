//! Sequence storage and residue access
//!
//! Subjects arrive either as one residue code per byte (protein, or
//! unpacked nucleotide) or as ncbi2na packed nucleotides.
//!
//! # Encoding Scheme (ncbi2na)
//! - A = 0b00 (0)
//! - C = 0b01 (1)
//! - G = 0b10 (2)
//! - T/U = 0b11 (3)
//!
//! # Packing Order
//! 4 nucleotides are packed into each byte, most significant bits first:
//! - Base 0: bits 6-7 (shift 6)
//! - Base 1: bits 4-5 (shift 4)
//! - Base 2: bits 2-3 (shift 2)
//! - Base 3: bits 0-1 (shift 0)

use std::sync::Arc;

pub use super::constants::COMPRESSION_RATIO;

/// Bit mask for extracting a single 2-bit base
const BASE_MASK: u8 = 0x03;

/// Lookup table for encoding ASCII nucleotides to 2-bit codes
/// Returns 0xFF for invalid/ambiguous bases
const ENCODE_TABLE: [u8; 256] = {
    let mut table = [0xFFu8; 256];
    table[b'A' as usize] = 0;
    table[b'a' as usize] = 0;
    table[b'C' as usize] = 1;
    table[b'c' as usize] = 1;
    table[b'G' as usize] = 2;
    table[b'g' as usize] = 2;
    table[b'T' as usize] = 3;
    table[b't' as usize] = 3;
    table[b'U' as usize] = 3;
    table[b'u' as usize] = 3;
    table
};

/// Lookup table for decoding 2-bit codes to ASCII nucleotides
const DECODE_TABLE: [u8; 4] = [b'A', b'C', b'G', b'T'];

/// Read-only residue access used by the extension loops.
///
/// Implemented for plain residue buffers and for packed nucleotides, so the
/// same X-drop code runs over both representations.
pub trait Residues {
    /// Number of residues
    fn len(&self) -> usize;

    /// Residue code at `pos`. Callers keep `pos < len()`.
    fn residue(&self, pos: usize) -> u8;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Residues for [u8] {
    #[inline(always)]
    fn len(&self) -> usize {
        <[u8]>::len(self)
    }

    #[inline(always)]
    fn residue(&self, pos: usize) -> u8 {
        self[pos]
    }
}

impl Residues for Vec<u8> {
    #[inline(always)]
    fn len(&self) -> usize {
        Vec::len(self)
    }

    #[inline(always)]
    fn residue(&self, pos: usize) -> u8 {
        self[pos]
    }
}

/// Split a base position into the byte holding it and the right shift that
/// brings its two bits down to the low end.
#[inline(always)]
pub const fn packed_position(pos: usize) -> (usize, u32) {
    let byte_index = pos / COMPRESSION_RATIO;
    let bit_shift = 6 - 2 * (pos % COMPRESSION_RATIO) as u32;
    (byte_index, bit_shift)
}

/// Extract the 2-bit base at `pos` from an ncbi2na packed buffer
#[inline(always)]
pub fn packed_base(data: &[u8], pos: usize) -> u8 {
    let (byte_index, bit_shift) = packed_position(pos);
    (data[byte_index] >> bit_shift) & BASE_MASK
}

/// Borrowed view of a packed nucleotide buffer
#[derive(Debug, Clone, Copy)]
pub struct PackedBases<'a> {
    data: &'a [u8],
    len: usize,
}

impl<'a> PackedBases<'a> {
    /// `len` is the number of bases; `data` must hold at least
    /// `ceil(len / 4)` bytes.
    pub fn new(data: &'a [u8], len: usize) -> Self {
        debug_assert!(data.len() * COMPRESSION_RATIO >= len);
        Self { data, len }
    }

    pub fn data(&self) -> &'a [u8] {
        self.data
    }
}

impl Residues for PackedBases<'_> {
    #[inline(always)]
    fn len(&self) -> usize {
        self.len
    }

    #[inline(always)]
    fn residue(&self, pos: usize) -> u8 {
        debug_assert!(pos < self.len, "Position out of bounds");
        packed_base(self.data, pos)
    }
}

/// How a `Sequence` stores its residues
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Encoding {
    /// One residue code per byte
    Residue,
    /// ncbi2na, four bases per byte
    Ncbi2naPacked,
}

/// Immutable sequence buffer.
///
/// Cloning is cheap (the buffer is reference counted), so one query can be
/// handed to several independent searches.
#[derive(Debug, Clone)]
pub struct Sequence {
    data: Arc<[u8]>,
    len: usize,
    encoding: Encoding,
}

/// Borrowed, encoding-resolved view of a `Sequence`
#[derive(Debug, Clone, Copy)]
pub enum SequenceView<'a> {
    Residue(&'a [u8]),
    Packed(PackedBases<'a>),
}

impl Sequence {
    /// Wrap already-encoded residues (one per byte)
    pub fn from_residues(residues: impl Into<Vec<u8>>) -> Self {
        let data: Vec<u8> = residues.into();
        let len = data.len();
        Self {
            data: data.into(),
            len,
            encoding: Encoding::Residue,
        }
    }

    /// Pack an ASCII nucleotide sequence into ncbi2na.
    ///
    /// Ambiguous bases (N, etc.) are stored as A (code 0).
    pub fn from_ascii_nucleotides(seq: &[u8]) -> Self {
        let len = seq.len();
        let packed_len = (len + COMPRESSION_RATIO - 1) / COMPRESSION_RATIO;
        let mut data = vec![0u8; packed_len];

        for (i, &base) in seq.iter().enumerate() {
            let code = ENCODE_TABLE[base as usize];
            if code != 0xFF {
                let (byte_index, bit_shift) = packed_position(i);
                data[byte_index] |= code << bit_shift;
            }
        }

        Self::from_packed(data, len)
    }

    /// Wrap an existing ncbi2na buffer holding `len` bases
    pub fn from_packed(data: impl Into<Vec<u8>>, len: usize) -> Self {
        let mut data: Vec<u8> = data.into();
        let needed = (len + COMPRESSION_RATIO - 1) / COMPRESSION_RATIO;
        data.resize(needed.max(data.len()), 0);
        Self {
            data: data.into(),
            len,
            encoding: Encoding::Ncbi2naPacked,
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    #[inline]
    pub fn encoding(&self) -> Encoding {
        self.encoding
    }

    /// Raw storage (packed bytes for ncbi2na)
    #[inline]
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn view(&self) -> SequenceView<'_> {
        match self.encoding {
            Encoding::Residue => SequenceView::Residue(&self.data),
            Encoding::Ncbi2naPacked => SequenceView::Packed(PackedBases::new(&self.data, self.len)),
        }
    }

    /// One residue code per byte, whatever the storage
    pub fn unpack(&self) -> Vec<u8> {
        match self.view() {
            SequenceView::Residue(r) => r.to_vec(),
            SequenceView::Packed(p) => (0..p.len()).map(|i| p.residue(i)).collect(),
        }
    }
}

impl Residues for Sequence {
    #[inline]
    fn len(&self) -> usize {
        self.len
    }

    #[inline]
    fn residue(&self, pos: usize) -> u8 {
        match self.encoding {
            Encoding::Residue => self.data[pos],
            Encoding::Ncbi2naPacked => packed_base(&self.data, pos),
        }
    }
}

/// Encode a single ASCII nucleotide to 2-bit code
///
/// # Returns
/// * `Some(code)` for valid bases (A, C, G, T/U)
/// * `None` for ambiguous or invalid bases
#[inline]
pub fn encode_base(base: u8) -> Option<u8> {
    let code = ENCODE_TABLE[base as usize];
    if code == 0xFF {
        None
    } else {
        Some(code)
    }
}

/// Decode a 2-bit code to ASCII nucleotide
#[inline]
pub fn decode_base(code: u8) -> u8 {
    DECODE_TABLE[(code & BASE_MASK) as usize]
}

/// Encode ASCII nucleotides to 2-bit codes, one per byte (queries are kept
/// unpacked). Ambiguous bases become A.
pub fn encode_ascii_nucleotides(seq: &[u8]) -> Vec<u8> {
    seq.iter().map(|&b| encode_base(b).unwrap_or(0)).collect()
}
