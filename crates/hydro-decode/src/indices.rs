//! Index block decoding.

use crate::cursor::ByteCursor;
use crate::error::{DecodeError, DecodeResult};

/// Size of one stored index.
pub const INDEX_SIZE: usize = 2;

/// Index block header, as read by a model layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IndexHeader {
    pub block_size: u32,
    pub stride: u32,
    pub count: usize,
}

/// Read `count` big-endian `u16` indices.
///
/// The indices form a triangle list: every consecutive three make one face.
pub fn read_indices(cursor: &mut ByteCursor<'_>, count: usize) -> DecodeResult<Vec<u16>> {
    cursor.ensure(count.saturating_mul(INDEX_SIZE))?;
    (0..count).map(|_| cursor.read_u16_be()).collect()
}

/// Check that `indices` form whole triangles over `vertex_count` vertices.
pub fn validate_triangle_list(indices: &[u16], vertex_count: usize) -> DecodeResult<()> {
    if indices.len() % 3 != 0 {
        return Err(DecodeError::IncompleteTriangles {
            count: indices.len(),
        });
    }
    if let Some((position, &index)) = indices
        .iter()
        .enumerate()
        .find(|&(_, &index)| usize::from(index) >= vertex_count)
    {
        return Err(DecodeError::IndexOutOfRange {
            position,
            index,
            vertex_count,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_big_endian_indices() {
        let data = [0x00, 0x00, 0x00, 0x01, 0x01, 0x00, 0xFF];
        let mut cursor = ByteCursor::new(&data);
        assert_eq!(read_indices(&mut cursor, 3), Ok(vec![0, 1, 256]));
        assert_eq!(cursor.remaining(), 1);
    }

    #[test]
    fn short_index_block_is_truncated() {
        let data = [0x00, 0x00, 0x00];
        let mut cursor = ByteCursor::new(&data);
        assert!(matches!(
            read_indices(&mut cursor, 2),
            Err(DecodeError::TruncatedRead { needed: 4, .. })
        ));
    }

    #[test]
    fn degenerate_triangles_are_allowed() {
        assert_eq!(validate_triangle_list(&[0, 1, 1], 2), Ok(()));
        assert_eq!(validate_triangle_list(&[], 0), Ok(()));
    }

    #[test]
    fn partial_triangle_is_rejected() {
        assert_eq!(
            validate_triangle_list(&[0, 1, 2, 0], 3),
            Err(DecodeError::IncompleteTriangles { count: 4 })
        );
    }

    #[test]
    fn reports_first_out_of_range_index() {
        assert_eq!(
            validate_triangle_list(&[0, 1, 2, 2, 3, 7], 3),
            Err(DecodeError::IndexOutOfRange {
                position: 4,
                index: 3,
                vertex_count: 3
            })
        );
    }
}
