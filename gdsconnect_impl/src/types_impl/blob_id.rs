/// The opaque 64-bit id of a blob or array, as found in a column value.
///
/// An id is only meaningful within the transaction that read or created it.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash, Serialize)]
pub struct BlobId(i64);

impl BlobId {
    /// Creates an id from its wire value.
    pub fn new(raw: i64) -> Self {
        Self(raw)
    }

    /// The wire value.
    pub fn raw(self) -> i64 {
        self.0
    }

    /// True for the id that marks "no blob".
    pub fn is_null(self) -> bool {
        self.0 == 0
    }
}

impl std::fmt::Display for BlobId {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        #[allow(clippy::cast_sign_loss, clippy::cast_possible_truncation)]
        let (high, low) = ((self.0 >> 32) as u32, self.0 as u32);
        write!(f, "{high:x}:{low:x}")
    }
}
