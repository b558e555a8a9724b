use crate::protocol::xdr::XdrWrite;
use crate::protocol::{Charset, OpCode};
use crate::FbResult;

// The elements of a request, in wire order after the operation code.
#[derive(Debug)]
pub(crate) enum Part {
    Int(i32),
    Long(i64),
    // int32 length, bytes, padding
    Buffer(Vec<u8>),
    // a string, encoded with the connection's charset, framed as a buffer
    Str(String),
    // an encoded message; its words are already aligned
    Message(Vec<u8>),
    // one segment in op_batch_segments framing
    BlobBuffer(Vec<u8>),
}

// A single operation that is sent to the server.
#[derive(Debug)]
pub(crate) struct Request {
    op_code: OpCode,
    parts: Vec<Part>,
}

impl Request {
    pub fn new(op_code: OpCode) -> Self {
        Self {
            op_code,
            parts: Vec::new(),
        }
    }

    pub fn op_code(&self) -> OpCode {
        self.op_code
    }

    pub fn push(&mut self, part: Part) {
        self.parts.push(part);
    }

    pub fn int(mut self, i: i32) -> Self {
        self.push(Part::Int(i));
        self
    }

    pub fn long(mut self, l: i64) -> Self {
        self.push(Part::Long(l));
        self
    }

    pub fn buffer<B: Into<Vec<u8>>>(mut self, b: B) -> Self {
        self.push(Part::Buffer(b.into()));
        self
    }

    pub fn string<S: Into<String>>(mut self, s: S) -> Self {
        self.push(Part::Str(s.into()));
        self
    }

    pub fn message(mut self, m: Vec<u8>) -> Self {
        self.push(Part::Message(m));
        self
    }

    pub fn blob_buffer(mut self, segment: Vec<u8>) -> Self {
        self.push(Part::BlobBuffer(segment));
        self
    }

    pub fn emit(&self, charset: Charset, w: &mut dyn std::io::Write) -> FbResult<()> {
        trace!("Sending {} with {} parts", self.op_code, self.parts.len());
        w.put_i32(self.op_code.to_i32())?;
        for part in &self.parts {
            match *part {
                Part::Int(i) => w.put_i32(i)?,
                Part::Long(l) => w.put_i64(l)?,
                Part::Buffer(ref b) => w.put_buffer(b)?,
                Part::Str(ref s) => w.put_str(s, charset)?,
                Part::Message(ref m) => w.write_all(m)?,
                Part::BlobBuffer(ref segment) => w.put_blob_buffer(segment)?,
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::Request;
    use crate::protocol::{Charset, OpCode};

    #[test]
    fn emit_detach() {
        let mut w = Vec::<u8>::new();
        Request::new(OpCode::Detach)
            .int(7)
            .emit(Charset::Utf8, &mut w)
            .unwrap();
        assert_eq!(w, vec![0, 0, 0, 21, 0, 0, 0, 7]);
    }

    #[test]
    fn emit_attach() {
        let mut w = Vec::<u8>::new();
        Request::new(OpCode::Attach)
            .int(0)
            .string("db")
            .buffer(vec![1, 28, 1, b'u'])
            .emit(Charset::Utf8, &mut w)
            .unwrap();
        assert_eq!(
            w,
            vec![
                0, 0, 0, 19, 0, 0, 0, 0, 0, 0, 0, 2, b'd', b'b', 0, 0, 0, 0, 0, 4, 1, 28, 1,
                b'u'
            ]
        );
    }
}
