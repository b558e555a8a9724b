use crate::protocol::xdr::{XdrRead, XdrWrite};
use crate::protocol::{
    parts::{SqlType, XSqlVar},
    Charset,
};
use crate::types::{BlobId, FbDate, FbTime, FbTimestamp};
use crate::{FbError, FbResult};
use bigdecimal::{num_bigint::BigInt, BigDecimal};
use num::ToPrimitive;

/// Enum for all supported database value types.
#[allow(non_camel_case_types)]
#[derive(Clone, Debug, PartialEq)]
pub enum FbValue {
    /// Representation of a database NULL value.
    NULL,
    /// Stores a 16-bit signed integer.
    SMALLINT(i16),
    /// Stores a 32-bit signed integer.
    INTEGER(i32),
    /// Stores a 64-bit signed integer.
    BIGINT(i64),
    /// Representation for integers with a negative scale (`NUMERIC`, `DECIMAL`).
    DECIMAL(BigDecimal),
    /// Stores a single-precision 32-bit floating-point number.
    FLOAT(f32),
    /// Stores a double-precision 64-bit floating-point number.
    DOUBLE(f64),
    /// Character data.
    TEXT(String),
    /// Character data with charset `OCTETS`.
    BINARY(Vec<u8>),
    /// DATE with day precision.
    DATE(FbDate),
    /// TIME with a precision of 100 microseconds.
    TIME(FbTime),
    /// TIMESTAMP with a precision of 100 microseconds.
    TIMESTAMP(FbTimestamp),
    /// Reference to a blob; its content is read with a [`Blob`](crate::sync::Blob).
    BLOB(BlobId),
    /// Reference to an array.
    ARRAY(BlobId),
    /// Stores a boolean value.
    BOOLEAN(bool),
}

impl FbValue {
    /// Returns true if the value is a NULL value.
    pub fn is_null(&self) -> bool {
        matches!(*self, Self::NULL)
    }

    /// Converts into an `i64`, for all integer variants and decimals without fraction.
    ///
    /// # Errors
    ///
    /// `FbError::UsageDetailed` for other variants.
    pub fn try_into_i64(self) -> FbResult<i64> {
        match self {
            Self::SMALLINT(i) => Ok(i64::from(i)),
            Self::INTEGER(i) => Ok(i64::from(i)),
            Self::BIGINT(i) => Ok(i),
            Self::DECIMAL(ref bd) if bd.is_integer() => bd
                .to_i64()
                .ok_or_else(|| usage_err!("{bd} does not fit into an i64")),
            v => Err(usage_err!("{v:?} is not an integer")),
        }
    }

    /// Converts into a `String`, for text values.
    ///
    /// # Errors
    ///
    /// `FbError::UsageDetailed` for other variants.
    pub fn try_into_string(self) -> FbResult<String> {
        match self {
            Self::TEXT(s) => Ok(s),
            v => Err(usage_err!("{v:?} is not a text value")),
        }
    }

    /// Returns the blob id of a `BLOB` value.
    ///
    /// # Errors
    ///
    /// `FbError::UsageDetailed` for other variants.
    pub fn try_into_blob_id(self) -> FbResult<BlobId> {
        match self {
            Self::BLOB(id) => Ok(id),
            v => Err(usage_err!("{v:?} is not a blob")),
        }
    }

    // Reads the value of a column, without its null indicator.
    pub(crate) fn parse(var: &XSqlVar, charset: Charset, rdr: &mut dyn std::io::Read) -> FbResult<Self> {
        Ok(match var.sql_type()? {
            SqlType::Text => {
                let bytes = rdr.get_opaque(non_negative(var.len())?)?;
                text_value(var, charset, bytes)?
            }
            SqlType::Varying => {
                let bytes = rdr.get_buffer()?;
                text_value(var, charset, bytes)?
            }
            SqlType::Short => {
                let i = rdr.get_i32()?;
                if var.scale() == 0 {
                    Self::SMALLINT(i16::try_from(i).map_err(|_| {
                        FbError::ImplDetailed(format!("SMALLINT value {i} out of range"))
                    })?)
                } else {
                    scaled(i64::from(i), var.scale())
                }
            }
            SqlType::Long => {
                let i = rdr.get_i32()?;
                if var.scale() == 0 {
                    Self::INTEGER(i)
                } else {
                    scaled(i64::from(i), var.scale())
                }
            }
            SqlType::Int64 => {
                let i = rdr.get_i64()?;
                if var.scale() == 0 {
                    Self::BIGINT(i)
                } else {
                    scaled(i, var.scale())
                }
            }
            SqlType::Float => Self::FLOAT(rdr.get_f32()?),
            SqlType::Double | SqlType::DFloat => Self::DOUBLE(rdr.get_f64()?),
            SqlType::Date => Self::DATE(FbDate::from_raw(rdr.get_i32()?)),
            SqlType::Time => Self::TIME(FbTime::from_raw(rdr.get_i32()?)?),
            SqlType::Timestamp => {
                let date = FbDate::from_raw(rdr.get_i32()?);
                let time = FbTime::from_raw(rdr.get_i32()?)?;
                Self::TIMESTAMP(FbTimestamp::new(date, time))
            }
            SqlType::Blob | SqlType::Quad => Self::BLOB(BlobId::new(rdr.get_i64()?)),
            SqlType::Array => Self::ARRAY(BlobId::new(rdr.get_i64()?)),
            SqlType::Boolean => {
                let b = rdr.get_opaque(1)?;
                Self::BOOLEAN(b[0] != 0)
            }
            SqlType::Null => Self::NULL,
        })
    }

    // Writes the value for a column, without null indicator.
    // NULL writes the zero value of the column type.
    #[allow(clippy::cast_possible_truncation)]
    pub(crate) fn emit(&self, var: &XSqlVar, charset: Charset, w: &mut Vec<u8>) -> FbResult<()> {
        let sql_type = var.sql_type()?;
        if self.is_null() {
            return emit_zero(sql_type, var, w);
        }
        match sql_type {
            SqlType::Text => {
                let bytes = self.text_bytes(charset)?;
                let len = non_negative(var.len())?;
                if bytes.len() > len {
                    return Err(usage_err!(
                        "value of {} bytes exceeds CHAR({len})",
                        bytes.len()
                    ));
                }
                let mut padded = bytes;
                padded.resize(len, if var.is_binary() { 0 } else { b' ' });
                w.put_opaque(&padded)?;
            }
            SqlType::Varying => {
                let bytes = self.text_bytes(charset)?;
                if bytes.len() > non_negative(var.len())? {
                    return Err(usage_err!(
                        "value of {} bytes exceeds VARCHAR({})",
                        bytes.len(),
                        var.len()
                    ));
                }
                w.put_buffer(&bytes)?;
            }
            SqlType::Short => {
                let i = self.scaled_integer(var.scale())?;
                let i = i16::try_from(i).map_err(|_| usage_err!("{i} does not fit a SMALLINT"))?;
                w.put_i32(i32::from(i))?;
            }
            SqlType::Long => {
                let i = self.scaled_integer(var.scale())?;
                w.put_i32(i32::try_from(i).map_err(|_| usage_err!("{i} does not fit an INTEGER"))?)?;
            }
            SqlType::Int64 => w.put_i64(self.scaled_integer(var.scale())?)?,
            SqlType::Float => match *self {
                Self::FLOAT(f) => w.put_f32(f)?,
                Self::DOUBLE(d) => w.put_f32(d as f32)?,
                _ => return Err(self.mismatch(sql_type)),
            },
            SqlType::Double | SqlType::DFloat => match *self {
                Self::FLOAT(f) => w.put_f64(f64::from(f))?,
                Self::DOUBLE(d) => w.put_f64(d)?,
                _ => return Err(self.mismatch(sql_type)),
            },
            SqlType::Date => match *self {
                Self::DATE(d) => w.put_i32(d.raw())?,
                Self::TIMESTAMP(ts) => w.put_i32(ts.date().raw())?,
                _ => return Err(self.mismatch(sql_type)),
            },
            SqlType::Time => match *self {
                Self::TIME(t) => w.put_i32(t.raw())?,
                Self::TIMESTAMP(ts) => w.put_i32(ts.time().raw())?,
                _ => return Err(self.mismatch(sql_type)),
            },
            SqlType::Timestamp => match *self {
                Self::TIMESTAMP(ts) => {
                    w.put_i32(ts.date().raw())?;
                    w.put_i32(ts.time().raw())?;
                }
                Self::DATE(d) => {
                    w.put_i32(d.raw())?;
                    w.put_i32(0)?;
                }
                _ => return Err(self.mismatch(sql_type)),
            },
            SqlType::Blob | SqlType::Quad | SqlType::Array => match *self {
                Self::BLOB(id) | Self::ARRAY(id) => w.put_i64(id.raw())?,
                _ => return Err(self.mismatch(sql_type)),
            },
            SqlType::Boolean => match *self {
                Self::BOOLEAN(b) => w.put_opaque(&[u8::from(b)])?,
                _ => return Err(self.mismatch(sql_type)),
            },
            SqlType::Null => {}
        }
        Ok(())
    }

    fn text_bytes(&self, charset: Charset) -> FbResult<Vec<u8>> {
        match *self {
            Self::TEXT(ref s) => Ok(charset.encode(s)?.into_owned()),
            Self::BINARY(ref b) => Ok(b.clone()),
            Self::SMALLINT(_) | Self::INTEGER(_) | Self::BIGINT(_) | Self::DECIMAL(_) => {
                Ok(self.to_string().into_bytes())
            }
            _ => Err(self.mismatch(SqlType::Varying)),
        }
    }

    // The unscaled integer for a column with the given scale.
    fn scaled_integer(&self, scale: i32) -> FbResult<i64> {
        let digits = -i64::from(scale);
        match *self {
            Self::SMALLINT(i) => scale_up(i64::from(i), digits),
            Self::INTEGER(i) => scale_up(i64::from(i), digits),
            Self::BIGINT(i) => scale_up(i, digits),
            Self::DECIMAL(ref bd) => {
                let (unscaled, _) = bd.with_scale(digits).as_bigint_and_exponent();
                unscaled
                    .to_i64()
                    .ok_or_else(|| usage_err!("{bd} does not fit the column"))
            }
            _ => Err(usage_err!("cannot send {self:?} to a numeric column")),
        }
    }

    fn mismatch(&self, sql_type: SqlType) -> FbError {
        usage_err!("cannot send {self:?} to a column of type {sql_type:?}")
    }
}

fn scale_up(i: i64, digits: i64) -> FbResult<i64> {
    let factor = u32::try_from(digits)
        .ok()
        .and_then(|d| 10_i64.checked_pow(d))
        .ok_or_else(|| usage_err!("unsupported scale {}", -digits))?;
    i.checked_mul(factor)
        .ok_or_else(|| usage_err!("{i} overflows when scaled by {digits} digits"))
}

fn scaled(unscaled: i64, scale: i32) -> FbValue {
    FbValue::DECIMAL(BigDecimal::new(BigInt::from(unscaled), -i64::from(scale)))
}

fn non_negative(len: i32) -> FbResult<usize> {
    usize::try_from(len).map_err(|_| FbError::ImplDetailed(format!("negative length {len}")))
}

fn text_value(var: &XSqlVar, charset: Charset, bytes: Vec<u8>) -> FbResult<FbValue> {
    if var.is_binary() {
        Ok(FbValue::BINARY(bytes))
    } else {
        Ok(FbValue::TEXT(charset.decode(&bytes)?))
    }
}

fn emit_zero(sql_type: SqlType, var: &XSqlVar, w: &mut Vec<u8>) -> FbResult<()> {
    match sql_type {
        SqlType::Text => w.put_opaque(&vec![b' '; non_negative(var.len())?])?,
        SqlType::Varying => w.put_buffer(&[])?,
        SqlType::Short | SqlType::Long | SqlType::Date | SqlType::Time => w.put_i32(0)?,
        SqlType::Float => w.put_f32(0.0)?,
        SqlType::Double | SqlType::DFloat => w.put_f64(0.0)?,
        SqlType::Int64 | SqlType::Blob | SqlType::Array | SqlType::Quad => w.put_i64(0)?,
        SqlType::Timestamp => {
            w.put_i32(0)?;
            w.put_i32(0)?;
        }
        SqlType::Boolean => w.put_opaque(&[0])?,
        SqlType::Null => {}
    }
    Ok(())
}

impl std::fmt::Display for FbValue {
    fn fmt(&self, fmt: &mut std::fmt::Formatter) -> std::fmt::Result {
        match *self {
            Self::NULL => write!(fmt, "<NULL>"),
            Self::SMALLINT(value) => write!(fmt, "{value}"),
            Self::INTEGER(value) => write!(fmt, "{value}"),
            Self::BIGINT(value) => write!(fmt, "{value}"),
            Self::DECIMAL(ref value) => write!(fmt, "{value}"),
            Self::FLOAT(value) => write!(fmt, "{value}"),
            Self::DOUBLE(value) => write!(fmt, "{value}"),
            Self::TEXT(ref value) => {
                if value.len() < 10_000 {
                    write!(fmt, "{value}")
                } else {
                    write!(fmt, "<STRING length = {}>", value.len())
                }
            }
            Self::BINARY(ref vec) => write!(fmt, "<BINARY length = {}>", vec.len()),
            Self::DATE(ref value) => write!(fmt, "{value}"),
            Self::TIME(ref value) => write!(fmt, "{value}"),
            Self::TIMESTAMP(ref value) => write!(fmt, "{value}"),
            Self::BLOB(ref id) => write!(fmt, "<BLOB {id}>"),
            Self::ARRAY(ref id) => write!(fmt, "<ARRAY {id}>"),
            Self::BOOLEAN(value) => write!(fmt, "{value}"),
        }
    }
}
