mod plain_tcp_client;

pub(crate) use self::plain_tcp_client::PlainTcpConnector;

use crate::conn::WireStream;
use crate::{FbError, FbResult};

// The transport of a connection; it dies with the first transport failure.
#[derive(Debug)]
pub(crate) enum TcpClient {
    Wire(WireStream),

    // Needed if communication issues made the stream unusable.
    Dead,
}

impl TcpClient {
    pub fn stream(&mut self) -> FbResult<&mut WireStream> {
        match self {
            Self::Wire(stream) => Ok(stream),
            Self::Dead => Err(FbError::ConnectionBroken { source: None }),
        }
    }

    pub fn die(&mut self) {
        if !self.has_died() {
            info!("Connection is dead now");
        }
        *self = Self::Dead;
    }

    pub fn has_died(&self) -> bool {
        matches!(*self, Self::Dead)
    }
}

impl Drop for TcpClient {
    fn drop(&mut self) {
        trace!("Drop of TcpClient");
    }
}
