use crate::protocol::parts::BufferKind;
use crate::{FbError, FbResult};

/// A list of `(tag, content)` pairs in which each tag appears at most once.
///
/// Pushing content for a tag that is already present replaces that content in place,
/// so the position of the first occurrence is kept.
#[derive(Clone, Debug, Default, Eq, PartialEq, Hash)]
pub struct Clumplet {
    links: Vec<(u8, Vec<u8>)>,
}

impl Clumplet {
    /// Creates an empty clumplet.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a clumplet with a single link.
    pub fn with(tag: u8, content: &[u8]) -> Self {
        Self {
            links: vec![(tag, content.to_vec())],
        }
    }

    /// Sets the content for a tag.
    pub fn push(&mut self, tag: u8, content: &[u8]) {
        match self.links.iter_mut().find(|(t, _)| *t == tag) {
            Some((_, c)) => *c = content.to_vec(),
            None => self.links.push((tag, content.to_vec())),
        }
    }

    /// Merges all links of `other` into `self`; the content of `other` wins.
    pub fn append(&mut self, other: &Clumplet) {
        for (tag, content) in &other.links {
            self.push(*tag, content);
        }
    }

    /// The content for a tag.
    pub fn get(&self, tag: u8) -> Option<&[u8]> {
        self.links
            .iter()
            .find(|(t, _)| *t == tag)
            .map(|(_, c)| c.as_slice())
    }

    /// Iterates over the links in order.
    pub fn iter(&self) -> impl Iterator<Item = (u8, &[u8])> {
        self.links.iter().map(|(t, c)| (*t, c.as_slice()))
    }

    /// Number of links.
    pub fn len(&self) -> usize {
        self.links.len()
    }

    /// True if there is no link.
    pub fn is_empty(&self) -> bool {
        self.links.is_empty()
    }

    /// Encodes the links as `tag, length byte, content`, after the given version byte.
    ///
    /// # Errors
    ///
    /// `FbError::BufferOverflow` if some content is longer than 255 bytes.
    pub fn to_bytes(&self, version: u8) -> FbResult<Vec<u8>> {
        let mut out = vec![version];
        for (tag, content) in &self.links {
            let len = u8::try_from(content.len()).map_err(|_| FbError::BufferOverflow {
                kind: "clumplet",
                tag: *tag,
                len: content.len(),
            })?;
            out.push(*tag);
            out.push(len);
            out.extend_from_slice(content);
        }
        Ok(out)
    }
}

/// Iterates over the items of an encoded parameter buffer.
///
/// The layout of each item is derived from the buffer kind and, where the kind
/// mixes layouts, from the tag.
#[derive(Debug)]
pub struct ClumpletReader<'a> {
    kind: BufferKind,
    buffer: &'a [u8],
    pos: usize,
}

impl<'a> ClumpletReader<'a> {
    /// Creates a reader; the leading version (or action) byte is skipped.
    pub fn new(kind: BufferKind, buffer: &'a [u8]) -> Self {
        Self {
            kind,
            buffer,
            pos: usize::from(!buffer.is_empty()),
        }
    }

    /// The leading byte of the buffer.
    pub fn leading_byte(&self) -> Option<u8> {
        self.buffer.first().copied()
    }

    fn take(&mut self, n: usize) -> FbResult<&'a [u8]> {
        let end = self.pos + n;
        if end > self.buffer.len() {
            return Err(FbError::ImplDetailed(format!(
                "parameter buffer truncated at offset {} (need {} bytes)",
                self.pos, n
            )));
        }
        let slice = &self.buffer[self.pos..end];
        self.pos = end;
        Ok(slice)
    }

    fn read_item(&mut self) -> FbResult<(u8, &'a [u8])> {
        let tag = self.take(1)?[0];
        let len = match self.kind {
            BufferKind::Dpb | BufferKind::Bpb | BufferKind::SpbAttach => {
                usize::from(self.take(1)?[0])
            }
            BufferKind::WideDpb | BufferKind::WideSpbAttach => {
                let b = self.take(4)?;
                usize::try_from(u32::from_le_bytes([b[0], b[1], b[2], b[3]]))
                    .map_err(|_| FbError::Impl("parameter length exceeds address space"))?
            }
            BufferKind::Tpb => match tag {
                crate::isc::tpb::LOCK_READ
                | crate::isc::tpb::LOCK_WRITE
                | crate::isc::tpb::LOCK_TIMEOUT => usize::from(self.take(1)?[0]),
                _ => 0,
            },
            BufferKind::SpbStart => spb_start_len(tag, self)?,
        };
        Ok((tag, self.take(len)?))
    }
}

fn spb_start_len(tag: u8, reader: &mut ClumpletReader) -> FbResult<usize> {
    use crate::isc::spb;
    Ok(match tag {
        spb::DBNAME | spb::BKP_FILE | spb::USER_NAME | spb::PASSWORD | spb::SQL_ROLE_NAME => {
            let b = reader.take(2)?;
            usize::from(u16::from_le_bytes([b[0], b[1]]))
        }
        spb::OPTIONS | spb::BKP_FACTOR | spb::BKP_LENGTH => 4,
        _ => 0,
    })
}

impl<'a> Iterator for ClumpletReader<'a> {
    type Item = FbResult<(u8, &'a [u8])>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.pos >= self.buffer.len() {
            None
        } else {
            let item = self.read_item();
            if item.is_err() {
                self.pos = self.buffer.len();
            }
            Some(item)
        }
    }
}

#[cfg(test)]
mod test {
    use super::{Clumplet, ClumpletReader};
    use crate::protocol::parts::{BufferKind, ParameterBuffer};
    use crate::isc;

    #[test]
    fn merge_by_tag() {
        let mut c = Clumplet::with(isc::dpb::USER_NAME, b"first");
        c.append(&Clumplet::with(isc::dpb::PASSWORD, b"pw"));
        c.append(&Clumplet::with(isc::dpb::USER_NAME, b"second"));
        assert_eq!(c.len(), 2);
        assert_eq!(c.get(isc::dpb::USER_NAME), Some(&b"second"[..]));
        assert_eq!(
            c.iter().map(|(t, _)| t).collect::<Vec<_>>(),
            vec![isc::dpb::USER_NAME, isc::dpb::PASSWORD]
        );
        assert_eq!(
            c.to_bytes(1).unwrap(),
            vec![1, 28, 6, b's', b'e', b'c', b'o', b'n', b'd', 29, 2, b'p', b'w']
        );
        assert!(Clumplet::with(1, &[0; 300]).to_bytes(1).is_err());
    }

    #[test]
    fn read_back_parameter_buffers() {
        let mut dpb = ParameterBuffer::new(BufferKind::Dpb);
        dpb.add_string(isc::dpb::USER_NAME, "SYSDBA").unwrap();
        dpb.add_int(isc::dpb::SQL_DIALECT, 3).unwrap();
        let bytes = dpb.to_bytes();
        let items: Vec<_> = ClumpletReader::new(BufferKind::Dpb, &bytes)
            .collect::<Result<_, _>>()
            .unwrap();
        assert_eq!(
            items,
            vec![
                (isc::dpb::USER_NAME, &b"SYSDBA"[..]),
                (isc::dpb::SQL_DIALECT, &[3, 0, 0, 0][..])
            ]
        );

        let mut tpb = ParameterBuffer::new(BufferKind::Tpb);
        tpb.add_flag(isc::tpb::READ).unwrap();
        tpb.add_string(isc::tpb::LOCK_READ, "T").unwrap();
        tpb.add_flag(isc::tpb::SHARED).unwrap();
        let bytes = tpb.to_bytes();
        let reader = ClumpletReader::new(BufferKind::Tpb, &bytes);
        assert_eq!(reader.leading_byte(), Some(isc::tpb::VERSION3));
        let tags: Vec<u8> = reader.map(|i| i.unwrap().0).collect();
        assert_eq!(tags, vec![isc::tpb::READ, isc::tpb::LOCK_READ, isc::tpb::SHARED]);

        let mut spb = ParameterBuffer::service_action(isc::spb::ACTION_DB_STATS);
        spb.add_string(isc::spb::DBNAME, "employee").unwrap();
        spb.add_int(isc::spb::OPTIONS, 8).unwrap();
        let bytes = spb.to_bytes();
        let items: Vec<_> = ClumpletReader::new(BufferKind::SpbStart, &bytes)
            .map(Result::unwrap)
            .collect();
        assert_eq!(items[0], (isc::spb::DBNAME, &b"employee"[..]));
        assert_eq!(items[1], (isc::spb::OPTIONS, &[8, 0, 0, 0][..]));
    }

    #[test]
    fn truncated_buffer() {
        let bytes = [1_u8, 28, 10, b'a'];
        let mut reader = ClumpletReader::new(BufferKind::Dpb, &bytes);
        assert!(reader.next().unwrap().is_err());
        assert!(reader.next().is_none());
    }
}
