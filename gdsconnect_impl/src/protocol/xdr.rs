//! Primitive wire types.
//!
//! All words are big-endian. Opaque payloads are followed by zero bytes up to the
//! next multiple of four; buffers are opaque payloads with a preceding int32 length.
use crate::{protocol::Charset, FbResult};
use byteorder::{BigEndian, ReadBytesExt, WriteBytesExt};
use std::io::{Error, ErrorKind, Read, Result, Write};

const PAD: [u8; 4] = [0; 4];

/// Number of zero bytes that follow an opaque payload of length `len`.
pub(crate) fn padding(len: usize) -> usize {
    (4 - (len & 3)) & 3
}

fn wire_len(len: usize) -> Result<i32> {
    i32::try_from(len).map_err(|_| Error::new(ErrorKind::InvalidInput, "buffer too large for XDR"))
}

pub(crate) trait XdrWrite: Write {
    fn put_i32(&mut self, value: i32) -> Result<()> {
        self.write_i32::<BigEndian>(value)
    }

    fn put_i64(&mut self, value: i64) -> Result<()> {
        self.write_i64::<BigEndian>(value)
    }

    fn put_f32(&mut self, value: f32) -> Result<()> {
        self.write_f32::<BigEndian>(value)
    }

    fn put_f64(&mut self, value: f64) -> Result<()> {
        self.write_f64::<BigEndian>(value)
    }

    fn put_padding(&mut self, len: usize) -> Result<()> {
        self.write_all(&PAD[..padding(len)])
    }

    // payload plus padding, without length
    fn put_opaque(&mut self, data: &[u8]) -> Result<()> {
        self.write_all(data)?;
        self.put_padding(data.len())
    }

    fn put_buffer(&mut self, data: &[u8]) -> Result<()> {
        self.put_i32(wire_len(data.len())?)?;
        self.put_opaque(data)
    }

    fn put_str(&mut self, s: &str, charset: Charset) -> FbResult<()> {
        let bytes = charset.encode(s)?;
        Ok(self.put_buffer(&bytes)?)
    }

    // One blob segment, framed for op_batch_segments: the outer length is sent twice,
    // followed by the segment with a little-endian u16 length prefix.
    fn put_blob_buffer(&mut self, segment: &[u8]) -> Result<()> {
        let seg_len = u16::try_from(segment.len())
            .map_err(|_| Error::new(ErrorKind::InvalidInput, "blob segment too large"))?;
        let outer = wire_len(segment.len() + 2)?;
        self.put_i32(outer)?;
        self.put_i32(outer)?;
        self.write_all(&seg_len.to_le_bytes())?;
        self.write_all(segment)?;
        self.put_padding(segment.len() + 2)
    }
}

impl<W: Write + ?Sized> XdrWrite for W {}

pub(crate) trait XdrRead: Read {
    fn get_i32(&mut self) -> Result<i32> {
        self.read_i32::<BigEndian>()
    }

    fn get_i64(&mut self) -> Result<i64> {
        self.read_i64::<BigEndian>()
    }

    fn get_f32(&mut self) -> Result<f32> {
        self.read_f32::<BigEndian>()
    }

    fn get_f64(&mut self) -> Result<f64> {
        self.read_f64::<BigEndian>()
    }

    fn skip_padding(&mut self, len: usize) -> Result<()> {
        let mut pad = [0_u8; 4];
        self.read_exact(&mut pad[..padding(len)])
    }

    fn get_opaque(&mut self, len: usize) -> Result<Vec<u8>> {
        let mut data = vec![0_u8; len];
        self.read_exact(&mut data)?;
        self.skip_padding(len)?;
        Ok(data)
    }

    fn get_buffer(&mut self) -> Result<Vec<u8>> {
        let len = self.get_i32()?;
        let len = usize::try_from(len).map_err(|_| {
            Error::new(
                ErrorKind::InvalidData,
                format!("negative buffer length {len} on the wire"),
            )
        })?;
        self.get_opaque(len)
    }

    fn get_string(&mut self, charset: Charset) -> FbResult<String> {
        let bytes = self.get_buffer()?;
        charset.decode(&bytes)
    }
}

impl<R: Read + ?Sized> XdrRead for R {}
