use std::io::{Read, Result, Write};

/// A symmetric stream cipher that is applied to all bytes of one direction of a
/// connection after wire encryption was negotiated.
pub trait StreamCipher: Send + std::fmt::Debug {
    /// Encrypts or decrypts `data` in place, advancing the cipher state.
    fn apply(&mut self, data: &mut [u8]);
}

/// The RC4 stream cipher, as used by the `Arc4` wire encryption plugin.
pub struct Arc4 {
    state: [u8; 256],
    i: u8,
    j: u8,
}

impl Arc4 {
    /// Initializes the cipher with a key of 1 to 256 bytes.
    ///
    /// # Errors
    ///
    /// `FbError::Usage` if the key is empty or too long.
    #[allow(clippy::cast_possible_truncation)]
    pub fn new(key: &[u8]) -> crate::FbResult<Self> {
        if key.is_empty() || key.len() > 256 {
            return Err(crate::FbError::Usage("Arc4 key must have 1 to 256 bytes"));
        }
        let mut state = [0_u8; 256];
        for (i, s) in state.iter_mut().enumerate() {
            *s = i as u8;
        }
        let mut j = 0_u8;
        for i in 0..256 {
            j = j.wrapping_add(state[i]).wrapping_add(key[i % key.len()]);
            state.swap(i, usize::from(j));
        }
        Ok(Self { state, i: 0, j: 0 })
    }
}

impl StreamCipher for Arc4 {
    fn apply(&mut self, data: &mut [u8]) {
        for b in data {
            self.i = self.i.wrapping_add(1);
            self.j = self.j.wrapping_add(self.state[usize::from(self.i)]);
            self.state.swap(usize::from(self.i), usize::from(self.j));
            let k = self.state[usize::from(
                self.state[usize::from(self.i)].wrapping_add(self.state[usize::from(self.j)]),
            )];
            *b ^= k;
        }
    }
}

impl std::fmt::Debug for Arc4 {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "Arc4")
    }
}

// Passes bytes through, or decrypts them once a cipher is installed.
#[derive(Debug)]
pub(crate) struct CipherReader<R> {
    inner: R,
    cipher: Option<Box<dyn StreamCipher>>,
}

impl<R: Read> CipherReader<R> {
    pub fn new(inner: R) -> Self {
        Self {
            inner,
            cipher: None,
        }
    }

    pub fn is_encrypted(&self) -> bool {
        self.cipher.is_some()
    }

    pub fn set_cipher(&mut self, cipher: Box<dyn StreamCipher>) {
        self.cipher = Some(cipher);
    }
}

impl<R: Read> Read for CipherReader<R> {
    fn read(&mut self, buf: &mut [u8]) -> Result<usize> {
        let n = self.inner.read(buf)?;
        if let Some(ref mut cipher) = self.cipher {
            cipher.apply(&mut buf[..n]);
        }
        Ok(n)
    }
}

// Passes bytes through, or encrypts them once a cipher is installed.
#[derive(Debug)]
pub(crate) struct CipherWriter<W: Write> {
    inner: W,
    cipher: Option<Box<dyn StreamCipher>>,
    scratch: Vec<u8>,
}

impl<W: Write> CipherWriter<W> {
    pub fn new(inner: W) -> Self {
        Self {
            inner,
            cipher: None,
            scratch: Vec::new(),
        }
    }

    pub fn is_encrypted(&self) -> bool {
        self.cipher.is_some()
    }

    pub fn set_cipher(&mut self, cipher: Box<dyn StreamCipher>) {
        self.cipher = Some(cipher);
    }
}

impl<W: Write> Write for CipherWriter<W> {
    fn write(&mut self, buf: &[u8]) -> Result<usize> {
        match self.cipher {
            None => self.inner.write(buf),
            Some(ref mut cipher) => {
                // the cipher state advances for every byte, so everything must be written
                self.scratch.clear();
                self.scratch.extend_from_slice(buf);
                cipher.apply(&mut self.scratch);
                self.inner.write_all(&self.scratch)?;
                Ok(buf.len())
            }
        }
    }

    fn flush(&mut self) -> Result<()> {
        self.inner.flush()
    }
}

#[cfg(test)]
mod test {
    use super::{Arc4, CipherReader, CipherWriter, StreamCipher};
    use std::io::{Cursor, Read, Write};

    #[test]
    fn arc4_test_vectors() {
        let mut data = b"Plaintext".to_vec();
        Arc4::new(b"Key").unwrap().apply(&mut data);
        assert_eq!(hex::encode(&data), "bbf316e8d940af0ad3");

        let mut data = b"Attack at dawn".to_vec();
        Arc4::new(b"Secret").unwrap().apply(&mut data);
        assert_eq!(hex::encode(&data), "45a01f645fc35b383552544b9bf5");

        assert!(Arc4::new(b"").is_err());
    }

    #[test]
    fn reader_and_writer_are_symmetric() {
        let mut w = CipherWriter::new(Vec::new());
        w.write_all(b"unencrypted").unwrap();
        w.set_cipher(Box::new(Arc4::new(b"k").unwrap()));
        assert!(w.is_encrypted());
        w.write_all(b"hello ").unwrap();
        w.write_all(b"world").unwrap();
        w.flush().unwrap();
        let wire = w.inner;
        assert_eq!(&wire[..11], b"unencrypted");
        assert_ne!(&wire[11..], b"hello world");

        let mut r = CipherReader::new(Cursor::new(wire));
        let mut head = [0_u8; 11];
        r.read_exact(&mut head).unwrap();
        r.set_cipher(Box::new(Arc4::new(b"k").unwrap()));
        let mut rest = String::new();
        r.read_to_string(&mut rest).unwrap();
        assert_eq!(rest, "hello world");
    }
}
