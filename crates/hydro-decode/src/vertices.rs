//! Vertex block decoding.

use glam::{Vec2, Vec3};

use crate::cursor::ByteCursor;
use crate::error::{Block, DecodeError, DecodeResult};
use crate::float16::read_f16_be;

/// Byte offset of the position within a vertex record.
pub const POSITION_OFFSET: usize = 0;

/// Byte offset of the UV pair within a vertex record.
pub const UV_OFFSET: usize = 20;

/// Smallest stride that still holds position and UV.
pub const MIN_VERTEX_STRIDE: u32 = 24;

/// Decoded vertex block.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct VertexBlock {
    pub stride: u32,
    pub block_size: u32,
    pub positions: Vec<Vec3>,
    pub uvs: Vec<Vec2>,
}

/// Number of whole records in a block, or [`DecodeError::MalformedHeader`].
pub fn record_count(block: Block, size: u32, stride: u32) -> DecodeResult<usize> {
    if stride == 0 || size % stride != 0 {
        return Err(DecodeError::MalformedHeader {
            block,
            size,
            stride,
        });
    }
    Ok((size / stride) as usize)
}

/// Read a vertex block starting at its `(stride, size)` header.
///
/// # Format
///
/// - `u32` stride, `u32` block size
/// - `size / stride` records of `stride` bytes each:
///   - Bytes 0-11: position (3 × big-endian `f32`)
///   - Bytes 12-19: packed normal and tangent (skipped)
///   - Bytes 20-23: UV (2 × big-endian binary16)
///   - Remaining bytes up to the stride are skipped
pub fn read_vertex_block(cursor: &mut ByteCursor<'_>) -> DecodeResult<VertexBlock> {
    let stride = cursor.read_u32_be()?;
    let block_size = cursor.read_u32_be()?;
    let count = record_count(Block::Vertex, block_size, stride)?;
    tracing::debug!(stride, block_size, count, "vertex block header");

    if stride < MIN_VERTEX_STRIDE {
        return Err(DecodeError::StrideTooSmall {
            stride,
            minimum: MIN_VERTEX_STRIDE,
        });
    }
    cursor.ensure(block_size as usize)?;

    let mut positions = Vec::with_capacity(count);
    let mut uvs = Vec::with_capacity(count);
    for _ in 0..count {
        let (position, uv) = decode_vertex_record(cursor.read_fixed(stride as usize)?)?;
        positions.push(position);
        uvs.push(uv);
    }

    Ok(VertexBlock {
        stride,
        block_size,
        positions,
        uvs,
    })
}

/// Split one record into position and UV.
///
/// Bytes past [`MIN_VERTEX_STRIDE`] are ignored; a shorter record fails
/// with [`DecodeError::TruncatedRead`].
pub fn decode_vertex_record(record: &[u8]) -> DecodeResult<(Vec3, Vec2)> {
    let min = MIN_VERTEX_STRIDE as usize;
    let Some(fields) = record.get(..min) else {
        return Err(DecodeError::TruncatedRead {
            offset: 0,
            needed: min,
            available: record.len(),
        });
    };

    let float_at = |component: usize| {
        let start = POSITION_OFFSET + component * 4;
        f32::from_be_bytes([
            fields[start],
            fields[start + 1],
            fields[start + 2],
            fields[start + 3],
        ])
    };
    let half_at = |offset: usize| read_f16_be([fields[offset], fields[offset + 1]]);

    Ok((
        Vec3::new(float_at(0), float_at(1), float_at(2)),
        Vec2::new(half_at(UV_OFFSET), half_at(UV_OFFSET + 2)),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(position: [f32; 3], uv: [u16; 2], stride: usize) -> Vec<u8> {
        let mut out: Vec<u8> = position.iter().flat_map(|c| c.to_be_bytes()).collect();
        out.extend_from_slice(&[0x7F; 8]);
        out.extend_from_slice(&uv[0].to_be_bytes());
        out.extend_from_slice(&uv[1].to_be_bytes());
        out.resize(stride, 0xEE);
        out
    }

    #[test]
    fn decodes_position_and_uv() {
        let bytes = record([1.0, -2.5, 3.25], [0x3800, 0x3C00], 32);
        let (position, uv) = decode_vertex_record(&bytes).unwrap();
        assert_eq!(position, Vec3::new(1.0, -2.5, 3.25));
        assert_eq!(uv, Vec2::new(0.5, 1.0));
    }

    #[test]
    fn short_record_is_truncated() {
        let bytes = record([1.0, 2.0, 3.0], [0x3800, 0x3800], 24);
        assert_eq!(
            decode_vertex_record(&bytes[..23]),
            Err(DecodeError::TruncatedRead {
                offset: 0,
                needed: 24,
                available: 23
            })
        );
        assert!(decode_vertex_record(&[]).is_err());
        assert!(decode_vertex_record(&bytes).is_ok());
    }

    #[test]
    fn reads_block_and_stops_after_last_record() {
        let mut data = Vec::new();
        data.extend_from_slice(&28u32.to_be_bytes());
        data.extend_from_slice(&56u32.to_be_bytes());
        data.extend(record([1.0, 2.0, 3.0], [0x3800, 0x3800], 28));
        data.extend(record([4.0, 5.0, 6.0], [0x0000, 0x3C00], 28));
        data.extend_from_slice(b"tail");

        let mut cursor = ByteCursor::new(&data);
        let block = read_vertex_block(&mut cursor).unwrap();
        assert_eq!(block.stride, 28);
        assert_eq!(block.positions, vec![Vec3::new(1.0, 2.0, 3.0), Vec3::new(4.0, 5.0, 6.0)]);
        assert_eq!(block.uvs, vec![Vec2::new(0.5, 0.5), Vec2::new(0.0, 1.0)]);
        assert_eq!(cursor.position(), 8 + 56);
    }

    #[test]
    fn uneven_block_size_is_malformed() {
        let mut data = Vec::new();
        data.extend_from_slice(&24u32.to_be_bytes());
        data.extend_from_slice(&50u32.to_be_bytes());
        let mut cursor = ByteCursor::new(&data);
        assert_eq!(
            read_vertex_block(&mut cursor),
            Err(DecodeError::MalformedHeader {
                block: Block::Vertex,
                size: 50,
                stride: 24
            })
        );
    }

    #[test]
    fn zero_stride_is_malformed() {
        assert!(matches!(
            record_count(Block::Index, 0, 0),
            Err(DecodeError::MalformedHeader { stride: 0, .. })
        ));
    }

    #[test]
    fn short_stride_is_rejected() {
        let mut data = Vec::new();
        data.extend_from_slice(&12u32.to_be_bytes());
        data.extend_from_slice(&24u32.to_be_bytes());
        data.extend_from_slice(&[0; 24]);
        let mut cursor = ByteCursor::new(&data);
        assert_eq!(
            read_vertex_block(&mut cursor),
            Err(DecodeError::StrideTooSmall {
                stride: 12,
                minimum: MIN_VERTEX_STRIDE
            })
        );
    }

    #[test]
    fn oversized_block_fails_before_reading() {
        let mut data = Vec::new();
        data.extend_from_slice(&24u32.to_be_bytes());
        data.extend_from_slice(&(24 * 1_000_000u32).to_be_bytes());
        data.extend_from_slice(&[0; 24]);
        let mut cursor = ByteCursor::new(&data);
        assert!(matches!(
            read_vertex_block(&mut cursor),
            Err(DecodeError::TruncatedRead {
                offset: 8,
                available: 24,
                ..
            })
        ));
    }
}
