use crate::{isc, FbError, FbResult};

/// The kinds of parameter buffers that are sent to the server.
///
/// The kind decides which leading byte is written and how the length of an
/// argument value is encoded.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum BufferKind {
    /// Database parameter buffer with one-byte lengths (`isc_dpb_version1`).
    /// Upgrades itself to [`BufferKind::WideDpb`] when a value gets too long.
    Dpb,
    /// Database parameter buffer with four-byte lengths (`isc_dpb_version2`).
    WideDpb,
    /// Transaction parameter buffer (`isc_tpb_version3`). Flags are written without
    /// length byte.
    Tpb,
    /// Blob parameter buffer (`isc_bpb_version1`).
    Bpb,
    /// Service attach buffer with one-byte lengths (`isc_spb_version2`).
    /// Upgrades itself to [`BufferKind::WideSpbAttach`] when a value gets too long.
    SpbAttach,
    /// Service attach buffer with four-byte lengths (`isc_spb_version3`).
    WideSpbAttach,
    /// Service start buffer; its leading byte is the service action,
    /// strings have two-byte lengths and integers have no length at all.
    SpbStart,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum Encoding {
    Traditional,
    Wide,
    Tpb,
    SpbStart,
}

impl BufferKind {
    fn encoding(self) -> Encoding {
        match self {
            Self::Dpb | Self::Bpb | Self::SpbAttach => Encoding::Traditional,
            Self::WideDpb | Self::WideSpbAttach => Encoding::Wide,
            Self::Tpb => Encoding::Tpb,
            Self::SpbStart => Encoding::SpbStart,
        }
    }

    fn upgrade(self) -> Option<Self> {
        match self {
            Self::Dpb => Some(Self::WideDpb),
            Self::SpbAttach => Some(Self::WideSpbAttach),
            _ => None,
        }
    }

    /// The version byte that starts a buffer of this kind;
    /// `None` for [`BufferKind::SpbStart`], whose first byte is the service action.
    pub fn version(self) -> Option<u8> {
        match self {
            Self::Dpb => Some(isc::dpb::VERSION1),
            Self::WideDpb => Some(isc::dpb::VERSION2),
            Self::Tpb => Some(isc::tpb::VERSION3),
            Self::Bpb => Some(isc::bpb::VERSION1),
            Self::SpbAttach => Some(isc::spb::VERSION2),
            Self::WideSpbAttach => Some(isc::spb::VERSION3),
            Self::SpbStart => None,
        }
    }

    fn name(self) -> &'static str {
        match self {
            Self::Dpb | Self::WideDpb => "DPB",
            Self::Tpb => "TPB",
            Self::Bpb => "BPB",
            Self::SpbAttach | Self::WideSpbAttach | Self::SpbStart => "SPB",
        }
    }
}

/// The value of an [`Argument`].
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub enum ArgumentValue {
    /// The tag alone carries the information.
    Flag,
    /// A string, sent as its UTF-8 bytes.
    String(String),
    /// A single byte.
    Byte(u8),
    /// A 32-bit integer, sent little-endian.
    Int(i32),
    /// A 64-bit integer, sent little-endian.
    BigInt(i64),
    /// Raw bytes.
    Bytes(Vec<u8>),
}

/// One tagged entry of a [`ParameterBuffer`].
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct Argument {
    tag: u8,
    value: ArgumentValue,
}

impl Argument {
    /// The tag.
    pub fn tag(&self) -> u8 {
        self.tag
    }

    /// The value.
    pub fn value(&self) -> &ArgumentValue {
        &self.value
    }

    fn value_bytes(&self) -> Vec<u8> {
        match self.value {
            ArgumentValue::Flag => Vec::new(),
            ArgumentValue::String(ref s) => s.as_bytes().to_vec(),
            ArgumentValue::Byte(b) => vec![b],
            ArgumentValue::Int(i) => i.to_le_bytes().to_vec(),
            ArgumentValue::BigInt(i) => i.to_le_bytes().to_vec(),
            ArgumentValue::Bytes(ref v) => v.clone(),
        }
    }

    // Checks that the value fits the length field of the encoding.
    fn fits(&self, encoding: Encoding) -> bool {
        let len = self.value_bytes().len();
        match (encoding, &self.value) {
            (Encoding::Wide, _) => u32::try_from(len).is_ok(),
            (Encoding::SpbStart, ArgumentValue::String(_) | ArgumentValue::Bytes(_)) => {
                len <= usize::from(u16::MAX)
            }
            (Encoding::SpbStart, _) => true,
            (Encoding::Traditional | Encoding::Tpb, _) => len <= usize::from(u8::MAX),
        }
    }

    #[allow(clippy::cast_possible_truncation)]
    fn emit(&self, encoding: Encoding, out: &mut Vec<u8>) {
        let bytes = self.value_bytes();
        out.push(self.tag);
        match encoding {
            Encoding::Traditional => {
                out.push(bytes.len() as u8);
            }
            Encoding::Wide => {
                out.extend_from_slice(&(bytes.len() as u32).to_le_bytes());
            }
            Encoding::Tpb => {
                if self.value == ArgumentValue::Flag {
                    return;
                }
                out.push(bytes.len() as u8);
            }
            Encoding::SpbStart => match self.value {
                ArgumentValue::String(_) | ArgumentValue::Bytes(_) => {
                    out.extend_from_slice(&(bytes.len() as u16).to_le_bytes());
                }
                _ => {}
            },
        }
        out.extend_from_slice(&bytes);
    }

    fn encoded_len(&self, encoding: Encoding) -> usize {
        let value_len = self.value_bytes().len();
        let len_field = match (encoding, &self.value) {
            (Encoding::Traditional, _) => 1,
            (Encoding::Wide, _) => 4,
            (Encoding::Tpb, ArgumentValue::Flag) => 0,
            (Encoding::Tpb, _) => 1,
            (Encoding::SpbStart, ArgumentValue::String(_) | ArgumentValue::Bytes(_)) => 2,
            (Encoding::SpbStart, _) => 0,
        };
        1 + len_field + value_len
    }
}

/// An ordered list of tagged arguments that configures an attach, a transaction start,
/// a blob open, or a service request.
///
/// Arguments are written in insertion order. Equality is structural and
/// order-sensitive.
///
/// ```rust
/// use gdsconnect_impl::{isc, BufferKind, ParameterBuffer};
/// let mut dpb = ParameterBuffer::new(BufferKind::Dpb);
/// dpb.add_string(isc::dpb::USER_NAME, "SYSDBA").unwrap();
/// dpb.add_int(isc::dpb::SQL_DIALECT, 3).unwrap();
/// assert_eq!(dpb.len(), 1 + 2 + 6 + 2 + 4);
/// ```
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct ParameterBuffer {
    kind: BufferKind,
    leading_byte: u8,
    arguments: Vec<Argument>,
}

impl ParameterBuffer {
    /// Creates an empty buffer; for service start buffers use
    /// [`ParameterBuffer::service_action`] instead.
    pub fn new(kind: BufferKind) -> Self {
        Self {
            kind,
            leading_byte: kind.version().unwrap_or_default(),
            arguments: Vec::new(),
        }
    }

    /// Creates an empty service start buffer for the given action (`isc::spb::ACTION_*`).
    pub fn service_action(action: u8) -> Self {
        Self {
            kind: BufferKind::SpbStart,
            leading_byte: action,
            arguments: Vec::new(),
        }
    }

    /// The current kind; it can change when the buffer upgrades itself.
    pub fn kind(&self) -> BufferKind {
        self.kind
    }

    /// The arguments, in insertion order.
    pub fn arguments(&self) -> &[Argument] {
        &self.arguments
    }

    /// True if no argument was added.
    pub fn is_empty(&self) -> bool {
        self.arguments.is_empty()
    }

    /// Adds an argument.
    ///
    /// # Errors
    ///
    /// `FbError::BufferOverflow` if the value does not fit the length field of this buffer
    /// kind and the kind cannot be upgraded to the wide encoding.
    pub fn add_argument(&mut self, tag: u8, value: ArgumentValue) -> FbResult<()> {
        let argument = Argument { tag, value };
        if !argument.fits(self.kind.encoding()) {
            match self.kind.upgrade() {
                Some(wider) if argument.fits(wider.encoding()) => {
                    debug!(
                        "{} upgrades to the wide encoding for tag {}",
                        self.kind.name(),
                        tag
                    );
                    self.kind = wider;
                    self.leading_byte = wider.version().unwrap_or_default();
                }
                _ => {
                    return Err(FbError::BufferOverflow {
                        kind: self.kind.name(),
                        tag,
                        len: argument.value_bytes().len(),
                    });
                }
            }
        }
        self.arguments.push(argument);
        Ok(())
    }

    /// Adds a flag.
    pub fn add_flag(&mut self, tag: u8) -> FbResult<()> {
        self.add_argument(tag, ArgumentValue::Flag)
    }

    /// Adds a string.
    pub fn add_string<S: Into<String>>(&mut self, tag: u8, value: S) -> FbResult<()> {
        self.add_argument(tag, ArgumentValue::String(value.into()))
    }

    /// Adds a single byte.
    pub fn add_byte(&mut self, tag: u8, value: u8) -> FbResult<()> {
        self.add_argument(tag, ArgumentValue::Byte(value))
    }

    /// Adds a 32-bit integer.
    pub fn add_int(&mut self, tag: u8, value: i32) -> FbResult<()> {
        self.add_argument(tag, ArgumentValue::Int(value))
    }

    /// Adds a 64-bit integer.
    pub fn add_bigint(&mut self, tag: u8, value: i64) -> FbResult<()> {
        self.add_argument(tag, ArgumentValue::BigInt(value))
    }

    /// Adds raw bytes.
    pub fn add_bytes(&mut self, tag: u8, value: &[u8]) -> FbResult<()> {
        self.add_argument(tag, ArgumentValue::Bytes(value.to_vec()))
    }

    /// Removes the first argument with the given tag, and returns it.
    pub fn remove_argument(&mut self, tag: u8) -> Option<Argument> {
        let pos = self.arguments.iter().position(|a| a.tag == tag)?;
        Some(self.arguments.remove(pos))
    }

    /// True if an argument with the given tag exists.
    pub fn has_argument(&self, tag: u8) -> bool {
        self.arguments.iter().any(|a| a.tag == tag)
    }

    /// The value of the first argument with the given tag.
    pub fn get(&self, tag: u8) -> Option<&ArgumentValue> {
        self.arguments
            .iter()
            .find(|a| a.tag == tag)
            .map(|a| &a.value)
    }

    /// The encoded size in bytes, including the leading byte.
    pub fn len(&self) -> usize {
        let encoding = self.kind.encoding();
        1 + self
            .arguments
            .iter()
            .map(|a| a.encoded_len(encoding))
            .sum::<usize>()
    }

    /// The encoded buffer, including the leading byte.
    pub fn to_bytes(&self) -> Vec<u8> {
        let encoding = self.kind.encoding();
        let mut out = Vec::with_capacity(self.len());
        out.push(self.leading_byte);
        for argument in &self.arguments {
            argument.emit(encoding, &mut out);
        }
        out
    }

    // An empty BPB is sent as an empty buffer, not as a lone version byte.
    pub(crate) fn to_wire_bytes(&self) -> Vec<u8> {
        if self.kind == BufferKind::Bpb && self.is_empty() {
            Vec::new()
        } else {
            self.to_bytes()
        }
    }
}
