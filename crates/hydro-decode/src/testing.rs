//! Synthetic asset construction for tests and sample data.
//!
//! Only compiled for tests or with the `test-tools` feature.

use crate::header::{OBJECT_NAME_LEN, SHADER_MARKER_LEN};
use crate::layout::{
    ModelVariant, SENTINEL_BACK_OFFSET, STATIC_INDEX_PADDING, STATIC_INDEX_STRIDE, VERTEX_SENTINEL,
};
use crate::vertices::{MIN_VERTEX_STRIDE, UV_OFFSET};

/// Marker observed after shader names.
pub const SHADER_MARKER: [u8; SHADER_MARKER_LEN] = [0xD5, 0x00, 0xE0, 0x91];

/// Smallest stride that leaves room for the sentinel inside each record.
pub const MIN_ANIMATED_STRIDE: u32 = 32;

/// Offset of the sentinel within an animated vertex record.
const SENTINEL_RECORD_OFFSET: usize = SENTINEL_BACK_OFFSET - 8;

/// A vertex to encode. `uv` is stored as binary16 and rounds accordingly.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TestVertex {
    pub position: [f32; 3],
    pub uv: [f32; 2],
}

/// Builds a model asset byte by byte.
///
/// Animated assets carry the vertex sentinel inside every vertex record, so
/// the first occurrence sits [`SENTINEL_BACK_OFFSET`] bytes after the vertex
/// block header, as in the observed files.
#[derive(Debug, Clone)]
pub struct AssetBuilder {
    variant: ModelVariant,
    shaders: Vec<String>,
    objects: Vec<String>,
    gap: usize,
    stride: u32,
    vertices: Vec<TestVertex>,
    indices: Vec<u16>,
    index_stride: u32,
    vertex_block_size: Option<u32>,
    sentinel: bool,
}

impl AssetBuilder {
    #[must_use]
    pub fn new(variant: ModelVariant) -> Self {
        let stride = match variant {
            ModelVariant::Animated => MIN_ANIMATED_STRIDE,
            ModelVariant::Static => MIN_VERTEX_STRIDE,
        };
        Self {
            variant,
            shaders: Vec::new(),
            objects: Vec::new(),
            gap: 0,
            stride,
            vertices: Vec::new(),
            indices: Vec::new(),
            index_stride: STATIC_INDEX_STRIDE,
            vertex_block_size: None,
            sentinel: true,
        }
    }

    #[must_use]
    pub fn shader(mut self, name: &str) -> Self {
        self.shaders.push(name.to_owned());
        self
    }

    /// Add an object name (animated only).
    #[must_use]
    pub fn object(mut self, name: &str) -> Self {
        assert!(name.len() <= OBJECT_NAME_LEN, "object name too long");
        self.objects.push(name.to_owned());
        self
    }

    /// Unknown bytes between the object table and the vertex block (animated only).
    #[must_use]
    pub fn gap(mut self, len: usize) -> Self {
        self.gap = len;
        self
    }

    #[must_use]
    pub fn stride(mut self, stride: u32) -> Self {
        self.stride = stride;
        self
    }

    #[must_use]
    pub fn vertices(mut self, vertices: Vec<TestVertex>) -> Self {
        self.vertices = vertices;
        self
    }

    #[must_use]
    pub fn indices(mut self, indices: Vec<u16>) -> Self {
        self.indices = indices;
        self
    }

    /// Declared index stride (animated only).
    ///
    /// Indices are still written as 2 bytes each; the stride only scales the
    /// declared index block size.
    #[must_use]
    pub fn index_stride(mut self, stride: u32) -> Self {
        self.index_stride = stride;
        self
    }

    /// Declare a vertex block size other than the real one.
    #[must_use]
    pub fn vertex_block_size(mut self, size: u32) -> Self {
        self.vertex_block_size = Some(size);
        self
    }

    /// Leave the vertex sentinel out of an animated asset.
    #[must_use]
    pub fn without_sentinel(mut self) -> Self {
        self.sentinel = false;
        self
    }

    #[must_use]
    pub fn build(&self) -> Vec<u8> {
        let animated = self.variant == ModelVariant::Animated;
        let mut out = Vec::new();

        put_u32(&mut out, self.shaders.len());
        for shader in &self.shaders {
            out.extend_from_slice(shader.as_bytes());
            out.push(0);
            out.extend_from_slice(&SHADER_MARKER);
        }

        if animated {
            put_u32(&mut out, self.objects.len());
            for name in &self.objects {
                let mut record = [0u8; OBJECT_NAME_LEN];
                record[..name.len()].copy_from_slice(name.as_bytes());
                out.extend_from_slice(&record);
            }
            out.resize(out.len() + self.gap, 0xCD);
        }

        let stride = self.stride as usize;
        let with_sentinel = animated && self.sentinel;
        if with_sentinel {
            assert!(
                self.stride >= MIN_ANIMATED_STRIDE,
                "animated stride must leave room for the sentinel"
            );
        }

        out.extend_from_slice(&self.stride.to_be_bytes());
        let block_size = self
            .vertex_block_size
            .unwrap_or_else(|| to_u32(self.vertices.len() * stride));
        out.extend_from_slice(&block_size.to_be_bytes());
        for vertex in &self.vertices {
            out.extend(encode_vertex(vertex, stride, with_sentinel));
        }

        if animated {
            put_u32(&mut out, self.indices.len() * self.index_stride as usize);
            out.extend_from_slice(&self.index_stride.to_be_bytes());
        } else {
            put_u32(&mut out, self.indices.len() * STATIC_INDEX_STRIDE as usize);
            out.extend_from_slice(&[0; STATIC_INDEX_PADDING]);
        }
        for index in &self.indices {
            out.extend_from_slice(&index.to_be_bytes());
        }
        out
    }
}

fn encode_vertex(vertex: &TestVertex, stride: usize, sentinel: bool) -> Vec<u8> {
    let mut record = vec![0xEE; stride];
    for (i, component) in vertex.position.iter().enumerate() {
        record[i * 4..i * 4 + 4].copy_from_slice(&component.to_be_bytes());
    }
    record[12..UV_OFFSET].fill(0x7F);
    for (i, component) in vertex.uv.iter().enumerate() {
        let bits = half::f16::from_f32(*component).to_bits();
        let at = UV_OFFSET + i * 2;
        record[at..at + 2].copy_from_slice(&bits.to_be_bytes());
    }
    if sentinel {
        record[SENTINEL_RECORD_OFFSET..SENTINEL_RECORD_OFFSET + VERTEX_SENTINEL.len()]
            .copy_from_slice(&VERTEX_SENTINEL);
    }
    record
}

fn put_u32(out: &mut Vec<u8>, value: usize) {
    out.extend_from_slice(&to_u32(value).to_be_bytes());
}

fn to_u32(value: usize) -> u32 {
    u32::try_from(value).expect("value fits in u32")
}
