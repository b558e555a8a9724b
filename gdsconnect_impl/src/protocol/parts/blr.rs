use crate::isc::blr;
use crate::protocol::parts::{SqlType, XSqlDa};
use crate::{FbError, FbResult};

// Describes the message layout of a row to the server.
//
// Every value slot is followed by a `short` slot for its null indicator.
// An empty descriptor list yields an empty BLR.
#[allow(clippy::cast_possible_truncation)]
#[allow(clippy::cast_sign_loss)]
pub(crate) fn message_blr(xsqlda: &XSqlDa) -> FbResult<Vec<u8>> {
    if xsqlda.is_empty() {
        return Ok(Vec::new());
    }
    let slots = u16::try_from(xsqlda.len() * 2)
        .map_err(|_| FbError::Usage("too many columns for one message"))?;

    let mut out = Vec::with_capacity(8 + xsqlda.len() * 6);
    out.extend_from_slice(&[blr::VERSION5, blr::BEGIN, blr::MESSAGE, 0]);
    out.extend_from_slice(&slots.to_le_bytes());

    for var in xsqlda.iter() {
        match var.sql_type()? {
            SqlType::Varying => {
                out.push(blr::VARYING);
                out.extend_from_slice(&len_u16(var.len())?.to_le_bytes());
            }
            SqlType::Text => {
                out.push(blr::TEXT);
                out.extend_from_slice(&len_u16(var.len())?.to_le_bytes());
            }
            SqlType::Double => out.push(blr::DOUBLE),
            SqlType::Float => out.push(blr::FLOAT),
            SqlType::DFloat => out.push(blr::D_FLOAT),
            SqlType::Date => out.push(blr::SQL_DATE),
            SqlType::Time => out.push(blr::SQL_TIME),
            SqlType::Timestamp => out.push(blr::TIMESTAMP),
            SqlType::Blob | SqlType::Array | SqlType::Quad => {
                out.extend_from_slice(&[blr::QUAD, 0]);
            }
            SqlType::Long => out.extend_from_slice(&[blr::LONG, var.scale() as u8]),
            SqlType::Short => out.extend_from_slice(&[blr::SHORT, var.scale() as u8]),
            SqlType::Int64 => out.extend_from_slice(&[blr::INT64, var.scale() as u8]),
            SqlType::Boolean => out.push(blr::BOOL),
            SqlType::Null => {
                out.push(blr::TEXT);
                out.extend_from_slice(&0_u16.to_le_bytes());
            }
        }
        out.extend_from_slice(&[blr::SHORT, 0]);
    }
    out.extend_from_slice(&[blr::END, blr::EOC]);
    Ok(out)
}

fn len_u16(len: i32) -> FbResult<u16> {
    u16::try_from(len).map_err(|_| usage_err!("column length {len} does not fit a message"))
}
