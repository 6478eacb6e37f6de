//! Sequential big-endian reader over an in-memory asset.

use crate::error::{DecodeError, DecodeResult};

/// Read position over a borrowed byte buffer.
///
/// All multi-byte integers in the asset format are big-endian. The cursor
/// never mutates the buffer; the only state is the absolute read offset.
#[derive(Debug, Clone)]
pub struct ByteCursor<'a> {
    data: &'a [u8],
    position: usize,
}

impl<'a> ByteCursor<'a> {
    #[must_use]
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, position: 0 }
    }

    /// The whole underlying buffer, independent of the read position.
    #[must_use]
    pub fn data(&self) -> &'a [u8] {
        self.data
    }

    #[must_use]
    pub fn position(&self) -> usize {
        self.position
    }

    /// Bytes left between the read position and the end of the buffer.
    ///
    /// Zero when the cursor has been seeked past the end.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.data.len().saturating_sub(self.position)
    }

    /// Move to an absolute offset.
    ///
    /// No bounds check happens here; the next read past the end fails with
    /// [`DecodeError::TruncatedRead`].
    pub fn seek(&mut self, offset: usize) {
        self.position = offset;
    }

    /// Fail unless at least `needed` bytes remain.
    ///
    /// A cursor seeked past the end fails even for `needed == 0`.
    pub fn ensure(&self, needed: usize) -> DecodeResult<()> {
        let available = self.remaining();
        if needed > available || self.position > self.data.len() {
            return Err(DecodeError::TruncatedRead {
                offset: self.position,
                needed,
                available,
            });
        }
        Ok(())
    }

    /// Read the next `len` bytes and advance past them.
    pub fn read_fixed(&mut self, len: usize) -> DecodeResult<&'a [u8]> {
        self.ensure(len)?;
        let bytes = &self.data[self.position..self.position + len];
        self.position += len;
        Ok(bytes)
    }

    /// Skip `len` bytes of unmodeled data.
    pub fn skip(&mut self, len: usize) -> DecodeResult<()> {
        self.read_fixed(len).map(|_| ())
    }

    fn read_array<const N: usize>(&mut self) -> DecodeResult<[u8; N]> {
        let mut out = [0; N];
        out.copy_from_slice(self.read_fixed(N)?);
        Ok(out)
    }

    pub fn read_u32_be(&mut self) -> DecodeResult<u32> {
        self.read_array().map(u32::from_be_bytes)
    }

    pub fn read_u16_be(&mut self) -> DecodeResult<u16> {
        self.read_array().map(u16::from_be_bytes)
    }

    /// Read a zero-terminated UTF-8 string, consuming the terminator.
    pub fn read_cstring(&mut self) -> DecodeResult<String> {
        let start = self.position;
        let rest = self.data.get(start..).unwrap_or_default();
        let Some(len) = rest.iter().position(|&b| b == 0) else {
            return Err(DecodeError::TruncatedRead {
                offset: self.data.len().max(start),
                needed: 1,
                available: 0,
            });
        };

        let text = std::str::from_utf8(&rest[..len])
            .map_err(|_| DecodeError::InvalidString { offset: start })?;
        self.position += len + 1;
        Ok(text.to_owned())
    }

    /// Read a fixed-width name record and strip its zero padding.
    pub fn read_padded_name(&mut self, width: usize) -> DecodeResult<String> {
        let start = self.position;
        let bytes = self.read_fixed(width)?;
        let end = bytes.iter().rposition(|&b| b != 0).map_or(0, |i| i + 1);
        std::str::from_utf8(&bytes[..end])
            .map(str::to_owned)
            .map_err(|_| DecodeError::InvalidString { offset: start })
    }
}
