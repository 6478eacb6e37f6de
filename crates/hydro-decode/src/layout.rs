//! Model layouts: where the two asset variants keep their tables and blocks.
//!
//! Both variants share the vertex and index record formats. They differ in
//! the header tables, in how the vertex block is found, and in the shape of
//! the index block header. [`ModelLayout`] captures exactly those three
//! differences; [`decode_with`](crate::decode_with) runs everything else.

use crate::cursor::ByteCursor;
use crate::error::{Block, DecodeError, DecodeResult};
use crate::header::{ModelHeader, read_object_table, read_shader_table};
use crate::indices::IndexHeader;
use crate::scan::find_first;
use crate::vertices::record_count;

/// Byte sequence used to find the vertex block of animated models.
pub const VERTEX_SENTINEL: [u8; 7] = [0x00, 0x00, 0x03, 0xFF, 0x00, 0x00, 0x00];

/// Distance from the first sentinel back to the vertex block's `(stride, size)` pair.
///
/// Inferred from observed assets rather than read from the header: the data
/// between the object table and the vertex block is not understood yet. An
/// asset with a different record layout may put the sentinel elsewhere.
pub const SENTINEL_BACK_OFFSET: usize = 32;

/// Index width of static models, which have no index stride field.
pub const STATIC_INDEX_STRIDE: u32 = 2;

/// Unknown bytes between a static model's index block size and its indices.
pub const STATIC_INDEX_PADDING: usize = 4;

/// The three layout-specific steps of decoding a model.
pub trait ModelLayout {
    /// Read the tables in front of the geometry.
    fn read_header(&self, cursor: &mut ByteCursor<'_>) -> DecodeResult<ModelHeader>;

    /// Position the cursor on the vertex block's `(stride, size)` pair.
    fn locate_vertex_block(&self, cursor: &mut ByteCursor<'_>) -> DecodeResult<()>;

    /// Read the index block header, leaving the cursor on the first index.
    fn read_index_header(&self, cursor: &mut ByteCursor<'_>) -> DecodeResult<IndexHeader>;
}

/// Layout of animated models (boats and other moving, colliding objects).
///
/// # Format
///
/// - `u32` shader count, then per shader a C string and a 4-byte marker
/// - `u32` object count, then per object a 32-byte zero-padded name
/// - Unknown data, ending where the vertex block begins
/// - Vertex block, located [`SENTINEL_BACK_OFFSET`] bytes before the first
///   [`VERTEX_SENTINEL`] in the file
/// - `u32` index block size, `u32` index stride, then the indices
#[derive(Debug, Clone, Copy, Default)]
pub struct AnimatedLayout;

impl ModelLayout for AnimatedLayout {
    fn read_header(&self, cursor: &mut ByteCursor<'_>) -> DecodeResult<ModelHeader> {
        let shaders = read_shader_table(cursor)?;
        let object_names = read_object_table(cursor)?;
        Ok(ModelHeader {
            shaders,
            object_names,
        })
    }

    fn locate_vertex_block(&self, cursor: &mut ByteCursor<'_>) -> DecodeResult<()> {
        // The whole buffer is searched, not just what follows the header.
        let sentinel =
            find_first(&VERTEX_SENTINEL, cursor.data()).ok_or(DecodeError::PatternNotFound)?;
        let start = sentinel
            .checked_sub(SENTINEL_BACK_OFFSET)
            .ok_or(DecodeError::PatternNotFound)?;
        tracing::debug!(sentinel, start, "located vertex block");
        cursor.seek(start);
        Ok(())
    }

    fn read_index_header(&self, cursor: &mut ByteCursor<'_>) -> DecodeResult<IndexHeader> {
        let block_size = cursor.read_u32_be()?;
        let stride = cursor.read_u32_be()?;
        let count = record_count(Block::Index, block_size, stride)?;
        Ok(IndexHeader {
            block_size,
            stride,
            count,
        })
    }
}

/// Layout of static models (level geometry and other fixed scenery).
///
/// # Format
///
/// - `u32` object count, then per object a shader C string and a 4-byte marker
/// - Vertex block, immediately after the shader list
/// - `u32` index block size, 4 bytes of padding, then `size / 2` indices
#[derive(Debug, Clone, Copy, Default)]
pub struct StaticLayout;

impl ModelLayout for StaticLayout {
    fn read_header(&self, cursor: &mut ByteCursor<'_>) -> DecodeResult<ModelHeader> {
        Ok(ModelHeader {
            shaders: read_shader_table(cursor)?,
            object_names: Vec::new(),
        })
    }

    fn locate_vertex_block(&self, _cursor: &mut ByteCursor<'_>) -> DecodeResult<()> {
        Ok(())
    }

    fn read_index_header(&self, cursor: &mut ByteCursor<'_>) -> DecodeResult<IndexHeader> {
        let block_size = cursor.read_u32_be()?;
        let count = record_count(Block::Index, block_size, STATIC_INDEX_STRIDE)?;
        cursor.skip(STATIC_INDEX_PADDING)?;
        Ok(IndexHeader {
            block_size,
            stride: STATIC_INDEX_STRIDE,
            count,
        })
    }
}

/// Which layout an asset uses.
///
/// The format carries no marker telling the two apart, so the caller chooses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ModelVariant {
    /// Moving objects: shader list, object name table, sentinel-located vertices.
    Animated,
    /// Scenery: one shader per object, vertices right after the header.
    Static,
}

impl ModelVariant {
    #[must_use]
    pub fn layout(self) -> &'static dyn ModelLayout {
        match self {
            Self::Animated => &AnimatedLayout,
            Self::Static => &StaticLayout,
        }
    }

    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Animated => "animated",
            Self::Static => "static",
        }
    }
}

impl std::fmt::Display for ModelVariant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
