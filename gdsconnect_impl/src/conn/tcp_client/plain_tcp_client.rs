use crate::conn::{Connector, WireStream};
use crate::{ConnectParams, ConnectionConfiguration, FbResult};
use std::net::TcpStream;
use std::time::Instant;

// Opens a plain TCP connection; registered as "tcp".
#[derive(Debug)]
pub(crate) struct PlainTcpConnector;

impl Connector for PlainTcpConnector {
    fn connect(
        &self,
        params: &ConnectParams,
        config: &ConnectionConfiguration,
    ) -> FbResult<WireStream> {
        let start = Instant::now();
        let tcp_stream = TcpStream::connect(params.addr())?;
        tcp_stream.set_read_timeout(config.read_timeout())?;
        tcp_stream.set_nodelay(true)?;
        let reader = tcp_stream.try_clone()?;
        trace!(
            "Plain TCP connection to {} is initialized ({} µs)",
            params.addr(),
            Instant::now().duration_since(start).as_micros(),
        );
        Ok(WireStream::new(
            Box::new(reader),
            Box::new(tcp_stream),
            config.socket_buffer_size(),
        ))
    }
}
