mod cipher;
mod inflate;

pub use self::cipher::{Arc4, StreamCipher};

use self::cipher::{CipherReader, CipherWriter};
use self::inflate::Inflater;
use crate::{FbError, FbResult};
use flate2::{write::ZlibEncoder, Compression};
use std::io::{BufReader, BufWriter, Read, Write};

type Source = CipherReader<BufReader<Box<dyn Read + Send>>>;
type Sink = CipherWriter<BufWriter<Box<dyn Write + Send>>>;

enum ReadLayer {
    Plain(Source),
    Inflate(Inflater<Source>),
    // only observable while a layer is being added
    Detached,
}

enum WriteLayer {
    Plain(Sink),
    Deflate(ZlibEncoder<Sink>),
    Detached,
}

/// The byte stream of a connection, with independent read and write halves.
///
/// Compression and encryption can each be added once, and never be removed.
/// The cipher always sits directly above the socket, below a compression layer.
pub struct WireStream {
    reader: ReadLayer,
    writer: WriteLayer,
}

impl WireStream {
    /// Creates a stream from the two halves of a transport.
    pub fn new(
        reader: Box<dyn Read + Send>,
        writer: Box<dyn Write + Send>,
        buffer_size: usize,
    ) -> Self {
        Self {
            reader: ReadLayer::Plain(CipherReader::new(BufReader::with_capacity(
                buffer_size,
                reader,
            ))),
            writer: WriteLayer::Plain(CipherWriter::new(BufWriter::with_capacity(
                buffer_size,
                writer,
            ))),
        }
    }

    /// True if zlib compression is active.
    pub fn is_compressed(&self) -> bool {
        matches!(self.reader, ReadLayer::Inflate(_))
    }

    /// True if a cipher is active.
    pub fn is_encrypted(&self) -> bool {
        match self.reader {
            ReadLayer::Plain(ref r) => r.is_encrypted(),
            ReadLayer::Inflate(ref r) => r.get_ref().is_encrypted(),
            ReadLayer::Detached => false,
        }
    }

    /// Adds zlib compression to both halves.
    ///
    /// # Errors
    ///
    /// `FbError::Usage` if compression is already active.
    pub fn enable_compression(&mut self) -> FbResult<()> {
        if self.is_compressed() {
            return Err(FbError::Usage("wire compression is already enabled"));
        }
        self.flush()?;
        self.reader = match std::mem::replace(&mut self.reader, ReadLayer::Detached) {
            ReadLayer::Plain(r) => ReadLayer::Inflate(Inflater::new(r)),
            other => other,
        };
        self.writer = match std::mem::replace(&mut self.writer, WriteLayer::Detached) {
            WriteLayer::Plain(w) => WriteLayer::Deflate(ZlibEncoder::new(w, Compression::default())),
            other => other,
        };
        debug!("Wire compression enabled");
        Ok(())
    }

    /// Adds a cipher to each half.
    ///
    /// # Errors
    ///
    /// `FbError::Usage` if encryption is already active.
    pub fn enable_encryption(
        &mut self,
        cipher_in: Box<dyn StreamCipher>,
        cipher_out: Box<dyn StreamCipher>,
    ) -> FbResult<()> {
        if self.is_encrypted() {
            return Err(FbError::Usage("wire encryption is already enabled"));
        }
        self.flush()?;
        match self.reader {
            ReadLayer::Plain(ref mut r) => r.set_cipher(cipher_in),
            ReadLayer::Inflate(ref mut r) => r.get_mut().set_cipher(cipher_in),
            ReadLayer::Detached => return Err(FbError::Impl("detached wire stream")),
        }
        match self.writer {
            WriteLayer::Plain(ref mut w) => w.set_cipher(cipher_out),
            WriteLayer::Deflate(ref mut w) => w.get_mut().set_cipher(cipher_out),
            WriteLayer::Detached => return Err(FbError::Impl("detached wire stream")),
        }
        debug!("Wire encryption enabled");
        Ok(())
    }
}

fn detached() -> std::io::Error {
    std::io::Error::new(std::io::ErrorKind::NotConnected, "detached wire stream")
}

impl Read for WireStream {
    fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
        match self.reader {
            ReadLayer::Plain(ref mut r) => r.read(buf),
            ReadLayer::Inflate(ref mut r) => r.read(buf),
            ReadLayer::Detached => Err(detached()),
        }
    }
}

impl Write for WireStream {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        match self.writer {
            WriteLayer::Plain(ref mut w) => w.write(buf),
            WriteLayer::Deflate(ref mut w) => w.write(buf),
            WriteLayer::Detached => Err(detached()),
        }
    }

    // With compression, this emits a zlib sync flush, so that the server can
    // decompress the complete request.
    fn flush(&mut self) -> std::io::Result<()> {
        match self.writer {
            WriteLayer::Plain(ref mut w) => w.flush(),
            WriteLayer::Deflate(ref mut w) => w.flush(),
            WriteLayer::Detached => Err(detached()),
        }
    }
}

impl std::fmt::Debug for WireStream {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        f.debug_struct("WireStream")
            .field("compressed", &self.is_compressed())
            .field("encrypted", &self.is_encrypted())
            .finish()
    }
}
