use crate::{FbError, FbResult};
use std::borrow::Cow;

/// The character set that is used for strings on the wire.
///
/// It is negotiated with `isc_dpb_lc_ctype` at attach time and applies to
/// SQL text, column values of character types, and names in describe information.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash)]
pub enum Charset {
    /// UTF-8 (`UTF8`, `UNICODE_FSS`).
    #[default]
    Utf8,
    /// ISO-8859-1 (`ISO8859_1`).
    Latin1,
    /// No conversion (`NONE`, `OCTETS`); bytes are passed through,
    /// and decoded lossily when text is required.
    None,
}

impl Charset {
    /// Finds the charset for a Firebird charset name (case insensitive).
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_ascii_uppercase().as_str() {
            "UTF8" | "UTF-8" | "UNICODE_FSS" => Some(Self::Utf8),
            "ISO8859_1" | "LATIN1" => Some(Self::Latin1),
            "NONE" | "OCTETS" => Some(Self::None),
            _ => None,
        }
    }

    /// The Firebird name of the charset, as it is sent in `isc_dpb_lc_ctype`.
    pub fn name(self) -> &'static str {
        match self {
            Self::Utf8 => "UTF8",
            Self::Latin1 => "ISO8859_1",
            Self::None => "NONE",
        }
    }

    pub(crate) fn encode(self, s: &str) -> FbResult<Cow<'_, [u8]>> {
        match self {
            Self::Utf8 | Self::None => Ok(Cow::Borrowed(s.as_bytes())),
            Self::Latin1 => s
                .chars()
                .map(|c| u8::try_from(u32::from(c)).map_err(|_| FbError::Charset(self.name())))
                .collect::<FbResult<Vec<u8>>>()
                .map(Cow::Owned),
        }
    }

    pub(crate) fn decode(self, bytes: &[u8]) -> FbResult<String> {
        match self {
            Self::Utf8 => {
                String::from_utf8(bytes.to_vec()).map_err(|_| FbError::Charset(self.name()))
            }
            Self::Latin1 => Ok(bytes.iter().map(|b| char::from(*b)).collect()),
            Self::None => Ok(String::from_utf8_lossy(bytes).into_owned()),
        }
    }
}
