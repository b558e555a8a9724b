use crate::conn::{
    connection_core::{ConnectionCore, OpenMode},
    ConnectorRegistry,
};
use crate::protocol::parts::ParameterBuffer;
use crate::protocol::{GenericResponse, Reply, Request};
use crate::{ConnectParams, ConnectionConfiguration, FbResult};
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Instant;

// The connection core, shared by the connection and the handles that were created on it.
//
// The mutex serializes the request/response exchanges on the socket.
#[derive(Clone, Debug)]
pub(crate) struct AmConnCore(Arc<Mutex<ConnectionCore>>);

impl AmConnCore {
    pub fn try_new(
        conn_params: ConnectParams,
        configuration: &ConnectionConfiguration,
        registry: &ConnectorRegistry,
        mode: OpenMode,
        dpb_extras: Option<&ParameterBuffer>,
    ) -> FbResult<Self> {
        trace!("trying to connect to {conn_params}");
        let start = Instant::now();
        let conn_core =
            ConnectionCore::try_new(conn_params, configuration, registry, mode, dpb_extras)?;
        debug!(
            "user \"{}\" successfully attached ({} µs) to {:?} (server version: {:?})",
            conn_core.connect_params().dbuser(),
            Instant::now().duration_since(start).as_micros(),
            conn_core.connect_params().database(),
            conn_core.server_version().map(ToString::to_string),
        );
        Ok(Self(Arc::new(Mutex::new(conn_core))))
    }

    pub fn lock(&self) -> FbResult<MutexGuard<ConnectionCore>> {
        Ok(self.0.lock()?)
    }

    pub fn send(&self, request: &Request) -> FbResult<GenericResponse> {
        self.lock()?.send(request)
    }

    pub fn roundtrip<T, F>(&self, request: &Request, parse: F) -> FbResult<T>
    where
        F: FnOnce(&mut Reply) -> FbResult<T>,
    {
        self.lock()?.roundtrip(request, parse)
    }

    pub fn db_handle(&self) -> FbResult<i32> {
        self.lock()?.db_handle()
    }

    // True if both refer to the same connection.
    pub fn is_same(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}
