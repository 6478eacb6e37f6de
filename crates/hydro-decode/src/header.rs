//! Shader and object name tables.

use crate::cursor::ByteCursor;
use crate::error::DecodeResult;

/// Length of the marker following each shader name (usually `D5 00 E0 91`).
pub const SHADER_MARKER_LEN: usize = 4;

/// Width of one zero-padded object name record.
pub const OBJECT_NAME_LEN: usize = 32;

/// Descriptive tables read ahead of the geometry.
///
/// None of this takes part in mesh reconstruction.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ModelHeader {
    /// One shader per slot (animated) or per object (static).
    pub shaders: Vec<String>,
    /// Object names; only the animated layout carries this table.
    pub object_names: Vec<String>,
}

/// Read a `u32` count followed by that many `{cstring, marker}` entries.
pub fn read_shader_table(cursor: &mut ByteCursor<'_>) -> DecodeResult<Vec<String>> {
    let count = cursor.read_u32_be()?;
    tracing::debug!(count, offset = cursor.position(), "shader table");

    let mut shaders = Vec::new();
    for _ in 0..count {
        shaders.push(cursor.read_cstring()?);
        cursor.skip(SHADER_MARKER_LEN)?;
    }
    Ok(shaders)
}

/// Read a `u32` count followed by that many 32-byte name records.
pub fn read_object_table(cursor: &mut ByteCursor<'_>) -> DecodeResult<Vec<String>> {
    let count = cursor.read_u32_be()?;
    tracing::debug!(count, offset = cursor.position(), "object table");

    cursor.ensure((count as usize).saturating_mul(OBJECT_NAME_LEN))?;
    (0..count)
        .map(|_| cursor.read_padded_name(OBJECT_NAME_LEN))
        .collect()
}
