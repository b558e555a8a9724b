use crate::protocol::parts::{ServerError, StatusVector};
use crate::protocol::xdr::XdrRead;
use crate::protocol::{Charset, OpCode};
use crate::{FbError, FbResult};

// Reads the next operation code, skipping keepalive packets.
pub(crate) fn read_op_code(rdr: &mut dyn std::io::Read) -> FbResult<OpCode> {
    loop {
        let raw = rdr.get_i32()?;
        match OpCode::from_i32(raw) {
            Some(OpCode::Dummy) => trace!("Skipping op_dummy"),
            Some(op_code) => {
                trace!("Received {op_code}");
                return Ok(op_code);
            }
            None => return Err(impl_err!("unknown operation code {raw} received")),
        }
    }
}

// The generic answer of the server (op_response).
#[derive(Debug)]
pub(crate) struct GenericResponse {
    pub object: i32,
    pub blob_id: i64,
    pub data: Vec<u8>,
}

impl GenericResponse {
    // Reads an op_response, including its op code.
    //
    // Warnings of the status vector are added to `warnings`; an error is returned as
    // `FbError::DbError`. In both cases the response is fully consumed.
    pub fn read(
        rdr: &mut dyn std::io::Read,
        warnings: &mut Vec<ServerError>,
    ) -> FbResult<Self> {
        match read_op_code(rdr)? {
            OpCode::Response => Self::parse(rdr, warnings),
            op_code => Err(impl_err!("expected op_response, got {op_code}")),
        }
    }

    // Reads the body of an op_response whose op code was already consumed.
    pub fn parse(
        rdr: &mut dyn std::io::Read,
        warnings: &mut Vec<ServerError>,
    ) -> FbResult<Self> {
        let object = rdr.get_i32()?;
        let blob_id = rdr.get_i64()?;
        let data = rdr.get_buffer()?;
        let status = StatusVector::parse(rdr)?;
        for warning in status.warnings {
            warn!("Server warning: {warning}");
            warnings.push(warning);
        }
        match status.error {
            Some(server_error) => Err(FbError::DbError {
                source: server_error,
            }),
            None => Ok(Self {
                object,
                blob_id,
                data,
            }),
        }
    }
}

// The reading side of a roundtrip, together with what is needed to decode the answer.
pub(crate) struct Reply<'a> {
    pub rdr: &'a mut dyn std::io::Read,
    pub protocol_version: i32,
    pub charset: Charset,
    pub warnings: &'a mut Vec<ServerError>,
}

impl Reply<'_> {
    pub fn op_code(&mut self) -> FbResult<OpCode> {
        read_op_code(self.rdr)
    }

    pub fn generic(&mut self) -> FbResult<GenericResponse> {
        GenericResponse::read(self.rdr, self.warnings)
    }

    // The body of an op_response whose op code was already read.
    pub fn generic_body(&mut self) -> FbResult<GenericResponse> {
        GenericResponse::parse(self.rdr, self.warnings)
    }
}
