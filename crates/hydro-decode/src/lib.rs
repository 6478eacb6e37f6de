//! Decode packed model assets extracted from `.apf` game archives.
//!
//! This crate provides pure synchronous decoding of the two binary model
//! layouts found in the archives into an indexed triangle [`Mesh`]. The byte
//! layout is reverse-engineered: headers are read field by field, and the
//! animated layout's vertex block is found by scanning for a sentinel.
//!
//! # Design principles
//!
//! - **Synchronous**: No async, no threading primitives
//! - **No I/O**: Decoding works on a byte slice; callers read and write files
//! - **Fail whole**: Any structural surprise aborts with a [`DecodeError`],
//!   never a partial mesh
//!
//! # Key functions
//!
//! - [`decode`]: Decode an asset given its [`ModelVariant`]
//! - [`decode_with`]: Decode with any [`ModelLayout`]
//! - [`find_all_offsets`]: Non-overlapping byte pattern search
//! - [`f16_to_f32`]: Widen a binary16 value

mod error;

pub mod cursor;
pub mod float16;
pub mod header;
pub mod indices;
pub mod layout;
pub mod scan;
#[cfg(any(test, feature = "test-tools"))]
pub mod testing;
pub mod vertices;

pub use glam;

pub use cursor::ByteCursor;
pub use error::{Block, DecodeError, DecodeResult};
pub use float16::{f16_to_f32, read_f16_be};
pub use header::ModelHeader;
pub use indices::IndexHeader;
pub use layout::{
    AnimatedLayout, ModelLayout, ModelVariant, SENTINEL_BACK_OFFSET, StaticLayout,
    VERTEX_SENTINEL,
};
pub use scan::{find_all_offsets, find_first};
pub use vertices::VertexBlock;

use glam::{Vec2, Vec3};

/// Indexed triangle mesh.
///
/// `positions` and `uvs` are parallel: entry `i` of each belongs to vertex
/// `i`. Every three consecutive `indices` make one triangle.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Mesh {
    pub positions: Vec<Vec3>,
    pub uvs: Vec<Vec2>,
    pub indices: Vec<u16>,
}

impl Mesh {
    #[must_use]
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    #[must_use]
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Iterate over triangles as index triples.
    pub fn triangles(&self) -> impl Iterator<Item = [u16; 3]> + '_ {
        self.indices
            .chunks_exact(3)
            .map(|tri| [tri[0], tri[1], tri[2]])
    }
}

/// Where the geometry blocks were found and how they were declared.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BlockLayout {
    /// Offset of the vertex block's `(stride, size)` pair.
    pub vertex_offset: usize,
    pub vertex_stride: u32,
    pub vertex_block_size: u32,
    /// Offset of the index block header.
    pub index_offset: usize,
    pub index_stride: u32,
    pub index_block_size: u32,
}

/// Result of decoding one model asset.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DecodedModel {
    pub header: ModelHeader,
    pub blocks: BlockLayout,
    pub mesh: Mesh,
}

/// Decode a model asset of the given variant.
pub fn decode(data: &[u8], variant: ModelVariant) -> DecodeResult<DecodedModel> {
    decode_with(data, variant.layout())
}

/// Decode a model asset using `layout` for the layout-specific steps.
///
/// The vertex and index records are shared by every layout: vertices follow
/// [`vertices::read_vertex_block`], and indices are big-endian `u16` values
/// forming a triangle list. Indices are checked against the vertex count.
pub fn decode_with<L: ModelLayout + ?Sized>(
    data: &[u8],
    layout: &L,
) -> DecodeResult<DecodedModel> {
    let mut cursor = ByteCursor::new(data);

    let header = layout.read_header(&mut cursor)?;
    tracing::debug!(
        shaders = header.shaders.len(),
        objects = header.object_names.len(),
        "read model header"
    );

    layout.locate_vertex_block(&mut cursor)?;
    let vertex_offset = cursor.position();
    let VertexBlock {
        stride: vertex_stride,
        block_size: vertex_block_size,
        positions,
        uvs,
    } = vertices::read_vertex_block(&mut cursor)?;

    let index_offset = cursor.position();
    let index_header = layout.read_index_header(&mut cursor)?;
    tracing::debug!(
        offset = index_offset,
        stride = index_header.stride,
        block_size = index_header.block_size,
        count = index_header.count,
        "index block header"
    );
    let indices = indices::read_indices(&mut cursor, index_header.count)?;
    indices::validate_triangle_list(&indices, positions.len())?;

    if cursor.remaining() > 0 {
        tracing::trace!(trailing = cursor.remaining(), "unread data after indices");
    }

    Ok(DecodedModel {
        header,
        blocks: BlockLayout {
            vertex_offset,
            vertex_stride,
            vertex_block_size,
            index_offset,
            index_stride: index_header.stride,
            index_block_size: index_header.block_size,
        },
        mesh: Mesh {
            positions,
            uvs,
            indices,
        },
    })
}
