use crate::protocol::parts::{FbValue, XSqlDa};
use crate::protocol::xdr::{XdrRead, XdrWrite};
use crate::protocol::Charset;
use crate::{FbError, FbResult};
use std::sync::Arc;

// From protocol version 13 on, a row starts with a bitmap of its NULL columns,
// and NULL columns are not transported at all. Before, every value is followed by an
// int32 null indicator.
pub(crate) const NULL_BITMAP_PROTOCOL: i32 = 13;

const NULL_INDICATOR: i32 = -1;

/// A single row of a result, consisting of the contained `FbValue`s and
/// a reference to the column descriptors.
///
/// You can access individual values with `row[idx]`, or consume them in order with
/// `next_value()`.
#[derive(Clone, Debug)]
pub struct Row {
    metadata: Arc<XSqlDa>,
    values: std::collections::VecDeque<FbValue>,
}

impl Row {
    pub(crate) fn new(metadata: Arc<XSqlDa>, values: Vec<FbValue>) -> Self {
        Self {
            metadata,
            values: values.into(),
        }
    }

    /// Removes and returns the next value.
    pub fn next_value(&mut self) -> Option<FbValue> {
        self.values.pop_front()
    }

    /// Conveniently combines `next_value()` and `FbValue::try_into_i64()`.
    ///
    /// # Errors
    ///
    /// `FbError::Usage` if there is no more value, or if it is not an integer.
    pub fn next_i64(&mut self) -> FbResult<i64> {
        self.next_value()
            .ok_or(FbError::Usage("no more value"))?
            .try_into_i64()
    }

    /// Returns the number of remaining values.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns true if the row contains no more value.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Converts itself into the single contained value.
    ///
    /// # Errors
    ///
    /// `FbError::Usage` if the row is empty or has more than one value.
    pub fn into_single_value(mut self) -> FbResult<FbValue> {
        if self.len() > 1 {
            Err(FbError::Usage("Row has more than one field"))
        } else {
            self.next_value().ok_or(FbError::Usage("Row is empty"))
        }
    }

    /// Returns the column descriptors.
    pub fn metadata(&self) -> &XSqlDa {
        &self.metadata
    }

    /// Returns the remaining values.
    pub fn into_values(self) -> Vec<FbValue> {
        self.values.into()
    }

    pub(crate) fn parse(
        metadata: &Arc<XSqlDa>,
        protocol_version: i32,
        charset: Charset,
        rdr: &mut dyn std::io::Read,
    ) -> FbResult<Self> {
        let mut values = Vec::with_capacity(metadata.len());
        if protocol_version >= NULL_BITMAP_PROTOCOL {
            let bitmap = rdr.get_opaque(metadata.len().div_ceil(8))?;
            for (idx, var) in metadata.iter().enumerate() {
                if bitmap[idx / 8] & (1 << (idx % 8)) == 0 {
                    values.push(FbValue::parse(var, charset, rdr)?);
                } else {
                    values.push(FbValue::NULL);
                }
            }
        } else {
            for var in metadata.iter() {
                let value = FbValue::parse(var, charset, rdr)?;
                // a non-zero indicator discards whatever was read for the value
                if rdr.get_i32()? == 0 {
                    values.push(value);
                } else {
                    values.push(FbValue::NULL);
                }
            }
        }
        Ok(Self::new(Arc::clone(metadata), values))
    }
}

impl std::ops::Index<usize> for Row {
    type Output = FbValue;
    fn index(&self, idx: usize) -> &FbValue {
        &self.values[idx]
    }
}

impl std::fmt::Display for Row {
    fn fmt(&self, fmt: &mut std::fmt::Formatter) -> std::fmt::Result {
        for value in &self.values {
            write!(fmt, "{value}, ")?;
        }
        Ok(())
    }
}

// Encodes a message with one value per descriptor.
pub(crate) fn emit_message(
    metadata: &XSqlDa,
    values: &[FbValue],
    protocol_version: i32,
    charset: Charset,
) -> FbResult<Vec<u8>> {
    if values.len() != metadata.len() {
        return Err(usage_err!(
            "statement needs {} parameters, {} were given",
            metadata.len(),
            values.len()
        ));
    }
    for (idx, (var, value)) in metadata.iter().zip(values).enumerate() {
        if value.is_null() && !var.is_nullable() {
            debug!("NULL sent for parameter {idx}, which is not declared nullable");
        }
    }

    let mut w = Vec::new();
    if protocol_version >= NULL_BITMAP_PROTOCOL {
        let mut bitmap = vec![0_u8; values.len().div_ceil(8)];
        for (idx, value) in values.iter().enumerate() {
            if value.is_null() {
                bitmap[idx / 8] |= 1 << (idx % 8);
            }
        }
        w.put_opaque(&bitmap)?;
        for (var, value) in metadata.iter().zip(values) {
            if !value.is_null() {
                value.emit(var, charset, &mut w)?;
            }
        }
    } else {
        for (var, value) in metadata.iter().zip(values) {
            value.emit(var, charset, &mut w)?;
            w.put_i32(if value.is_null() { NULL_INDICATOR } else { 0 })?;
        }
    }
    Ok(w)
}
