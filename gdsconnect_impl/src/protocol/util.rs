use crate::isc::info;
use crate::{FbError, FbResult};

/// Decodes a little-endian integer of up to eight bytes, as used in info buffers.
///
/// Values of up to four bytes are read as an `i32`, longer ones as an `i64`;
/// shorter values are not sign-extended. Bytes beyond the eighth are ignored.
#[allow(clippy::cast_possible_wrap)]
#[allow(clippy::cast_possible_truncation)]
pub fn vax_integer(bytes: &[u8]) -> i64 {
    let mut value = 0_u64;
    for (shift, b) in bytes.iter().take(8).enumerate() {
        value |= u64::from(*b) << (8 * shift);
    }
    if bytes.len() <= 4 {
        i64::from(value as u32 as i32)
    } else {
        value as i64
    }
}

/// Iterates over the `(item, value)` clusters of an info response.
///
/// Each cluster is an item byte, a two-byte little-endian length, and the value.
/// Iteration stops at `isc_info_end`; `isc_info_truncated` is returned as an item with
/// an empty value, so callers can ask for the rest.
#[derive(Debug)]
pub struct InfoReader<'a> {
    buffer: &'a [u8],
    pos: usize,
}

impl<'a> InfoReader<'a> {
    /// Creates a reader over an info response.
    pub fn new(buffer: &'a [u8]) -> Self {
        Self { buffer, pos: 0 }
    }

    fn take(&mut self, n: usize) -> FbResult<&'a [u8]> {
        let end = self.pos + n;
        if end > self.buffer.len() {
            return Err(FbError::ImplDetailed(format!(
                "info response truncated at offset {}",
                self.pos
            )));
        }
        let slice = &self.buffer[self.pos..end];
        self.pos = end;
        Ok(slice)
    }

    /// Reads a byte; used for responses with nested structures.
    pub(crate) fn read_u8(&mut self) -> FbResult<u8> {
        Ok(self.take(1)?[0])
    }

    /// Reads a two-byte length and as many bytes.
    pub(crate) fn read_value(&mut self) -> FbResult<&'a [u8]> {
        let len = self.take(2)?;
        let len = usize::from(u16::from_le_bytes([len[0], len[1]]));
        self.take(len)
    }

    /// Reads a two-byte length and an integer of that length.
    pub(crate) fn read_int(&mut self) -> FbResult<i64> {
        Ok(vax_integer(self.read_value()?))
    }

    /// Reads a two-byte length and a string of that length.
    pub(crate) fn read_string(&mut self) -> FbResult<String> {
        Ok(String::from_utf8_lossy(self.read_value()?).into_owned())
    }
}

impl<'a> Iterator for InfoReader<'a> {
    type Item = FbResult<(u8, &'a [u8])>;

    fn next(&mut self) -> Option<Self::Item> {
        let item = *self.buffer.get(self.pos)?;
        self.pos += 1;
        match item {
            info::END => {
                self.pos = self.buffer.len();
                None
            }
            info::TRUNCATED => {
                self.pos = self.buffer.len();
                Some(Ok((item, &[])))
            }
            info::ERROR => {
                let r = self.read_value().and_then(|v| {
                    Err(FbError::ImplDetailed(format!(
                        "server reports an error for an info item ({})",
                        vax_integer(v)
                    )))
                });
                self.pos = self.buffer.len();
                Some(r)
            }
            _ => {
                let r = self.read_value().map(|v| (item, v));
                if r.is_err() {
                    self.pos = self.buffer.len();
                }
                Some(r)
            }
        }
    }
}
