use flate2::{Decompress, FlushDecompress, Status};
use std::io::{Error, ErrorKind, Read, Result};

const INPUT_CAPACITY: usize = 16 * 1024;
const OUTPUT_CAPACITY: usize = 32 * 1024;

// Inflates a zlib stream that the peer writes in sync-flushed pieces.
//
// Inflated bytes that are already available are handed out before the source is
// read again, so a reader that takes a reply word by word never waits for input
// the peer has not sent.
pub(crate) struct Inflater<R> {
    inner: R,
    decompress: Decompress,
    input: Box<[u8]>,
    in_pos: usize,
    in_len: usize,
    output: Box<[u8]>,
    out_pos: usize,
    out_len: usize,
}

impl<R: Read> Inflater<R> {
    pub fn new(inner: R) -> Self {
        Self {
            inner,
            decompress: Decompress::new(true),
            input: vec![0_u8; INPUT_CAPACITY].into_boxed_slice(),
            in_pos: 0,
            in_len: 0,
            output: vec![0_u8; OUTPUT_CAPACITY].into_boxed_slice(),
            out_pos: 0,
            out_len: 0,
        }
    }

    pub fn get_ref(&self) -> &R {
        &self.inner
    }

    pub fn get_mut(&mut self) -> &mut R {
        &mut self.inner
    }

    // Inflates from the buffered input into the (empty) output buffer.
    fn inflate(&mut self) -> Result<(usize, Status)> {
        let total_in = self.decompress.total_in();
        let total_out = self.decompress.total_out();
        let status = self
            .decompress
            .decompress(
                &self.input[self.in_pos..self.in_len],
                &mut self.output,
                FlushDecompress::None,
            )
            .map_err(|e| Error::new(ErrorKind::InvalidData, e))?;
        let consumed = usize::try_from(self.decompress.total_in() - total_in)
            .map_err(|e| Error::new(ErrorKind::InvalidData, e))?;
        let produced = usize::try_from(self.decompress.total_out() - total_out)
            .map_err(|e| Error::new(ErrorKind::InvalidData, e))?;
        self.in_pos += consumed;
        self.out_pos = 0;
        self.out_len = produced;
        Ok((consumed, status))
    }
}

impl<R: Read> Read for Inflater<R> {
    fn read(&mut self, buf: &mut [u8]) -> Result<usize> {
        if buf.is_empty() {
            return Ok(0);
        }
        loop {
            if self.out_pos < self.out_len {
                let n = buf.len().min(self.out_len - self.out_pos);
                buf[..n].copy_from_slice(&self.output[self.out_pos..self.out_pos + n]);
                self.out_pos += n;
                return Ok(n);
            }

            // pending output of the inflater comes first, also without new input
            let (consumed, status) = self.inflate()?;
            if self.out_len > 0 {
                continue;
            }
            if status == Status::StreamEnd {
                return Ok(0);
            }
            if self.in_pos < self.in_len {
                if consumed > 0 {
                    continue;
                }
                return Err(Error::new(
                    ErrorKind::InvalidData,
                    "compressed stream makes no progress",
                ));
            }

            let n = self.inner.read(&mut self.input)?;
            if n == 0 {
                return Ok(0);
            }
            self.in_pos = 0;
            self.in_len = n;
        }
    }
}

impl<R> std::fmt::Debug for Inflater<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        f.debug_struct("Inflater")
            .field("buffered_input", &(self.in_len - self.in_pos))
            .field("buffered_output", &(self.out_len - self.out_pos))
            .finish()
    }
}

#[cfg(test)]
mod test {
    use super::Inflater;
    use flate2::{write::ZlibEncoder, Compression};
    use std::io::{Cursor, Read, Write};

    #[test]
    fn inflates_sync_flushed_pieces() {
        let mut deflater = ZlibEncoder::new(Vec::new(), Compression::default());
        deflater.write_all(&[7_u8; 50_000]).unwrap();
        deflater.flush().unwrap();
        deflater.write_all(b"tail").unwrap();
        deflater.flush().unwrap();
        let wire = deflater.get_ref().clone();

        let mut inflater = Inflater::new(Cursor::new(wire));
        let mut body = vec![0_u8; 50_000];
        inflater.read_exact(&mut body).unwrap();
        assert!(body.iter().all(|b| *b == 7));
        let mut tail = [0_u8; 4];
        inflater.read_exact(&mut tail).unwrap();
        assert_eq!(&tail, b"tail");
        // the stream is not finished, but the source is exhausted
        assert_eq!(inflater.read(&mut tail).unwrap(), 0);
    }

    #[test]
    fn corrupt_input() {
        let mut inflater = Inflater::new(Cursor::new(vec![0xff_u8; 64]));
        let err = inflater.read(&mut [0_u8; 4]).unwrap_err();
        assert_eq!(err.kind(), std::io::ErrorKind::InvalidData);
    }
}
