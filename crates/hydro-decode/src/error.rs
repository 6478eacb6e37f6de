//! Decode errors.

use std::fmt;

use thiserror::Error;

/// Data block described by a `(size, stride)` header pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Block {
    Vertex,
    Index,
}

impl fmt::Display for Block {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Vertex => f.write_str("vertex"),
            Self::Index => f.write_str("index"),
        }
    }
}

/// Errors that can occur while decoding a model asset.
///
/// Every variant names the structural assumption about the asset that did
/// not hold, so the message is useful without looking at a hex dump.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    /// A read ran past the end of the buffer.
    #[error(
        "unexpected end of data at offset {offset}: needed {needed} byte(s) but only {available} remain"
    )]
    TruncatedRead {
        offset: usize,
        needed: usize,
        available: usize,
    },

    /// A shader or object name was not valid UTF-8.
    #[error("name at offset {offset} is not valid UTF-8")]
    InvalidString { offset: usize },

    /// The animated layout's vertex block sentinel is absent.
    #[error(
        "vertex block sentinel (00 00 03 FF 00 00 00) not found; the asset is not an animated model or uses an unsupported layout"
    )]
    PatternNotFound,

    /// A declared block size is not a whole number of records.
    #[error("{block} block size {size} is not a multiple of its stride {stride}")]
    MalformedHeader { block: Block, size: u32, stride: u32 },

    /// The vertex stride cannot hold a position and a UV pair.
    #[error("vertex stride {stride} is smaller than the {minimum} bytes holding position and UV")]
    StrideTooSmall { stride: u32, minimum: u32 },

    /// The index count is not a multiple of three.
    #[error("index block holds {count} indices, which do not form whole triangles")]
    IncompleteTriangles { count: usize },

    /// An index references a vertex that was never decoded.
    #[error(
        "index {index} at position {position} references a vertex beyond the {vertex_count} decoded"
    )]
    IndexOutOfRange {
        position: usize,
        index: u16,
        vertex_count: usize,
    },
}

/// Result type for decode operations.
pub type DecodeResult<T> = Result<T, DecodeError>;
