use crate::conn::{tcp_client::TcpClient, Arc4, ConnectorRegistry, WireStream};
use crate::isc::{connect, dpb, info, spb};
use crate::protocol::parts::{BufferKind, ParameterBuffer, ServerError, ServerVersion};
use crate::protocol::xdr::XdrRead;
use crate::protocol::{Charset, GenericResponse, OpCode, Reply, Request};
use crate::{ConnectParams, ConnectionConfiguration, FbError, FbResult};
use debug_ignore::DebugIgnore;
use std::collections::{BTreeMap, BTreeSet};
use std::io::{ErrorKind, Write};

// How the database is opened.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum OpenMode {
    Attach,
    Create,
    // attach to the service manager
    Service,
}

impl OpenMode {
    fn op_code(self) -> OpCode {
        match self {
            Self::Attach => OpCode::Attach,
            Self::Create => OpCode::Create,
            Self::Service => OpCode::ServiceAttach,
        }
    }

    fn detach_op_code(self) -> OpCode {
        match self {
            Self::Attach | Self::Create => OpCode::Detach,
            Self::Service => OpCode::ServiceDetach,
        }
    }
}

#[derive(Debug)]
struct TransactionEntry {
    serial: u64,
    statements: BTreeSet<i32>,
}

// The state of an attached database: the socket, the negotiated protocol, and the
// handles that the server gave out on this attachment.
#[derive(Debug)]
pub(crate) struct ConnectionCore {
    connect_params: ConnectParams,
    config: ConnectionConfiguration,
    mode: OpenMode,
    protocol_version: i32,
    db_handle: Option<i32>,
    server_version: Option<ServerVersion>,
    warnings: Vec<ServerError>,
    transactions: BTreeMap<i32, TransactionEntry>,
    next_serial: u64,
    statements: BTreeSet<i32>,
    io_buffer: DebugIgnore<Vec<u8>>,
    tcp_client: TcpClient,
}

impl ConnectionCore {
    pub(crate) fn try_new(
        connect_params: ConnectParams,
        config: &ConnectionConfiguration,
        registry: &ConnectorRegistry,
        mode: OpenMode,
        dpb_extras: Option<&ParameterBuffer>,
    ) -> FbResult<Self> {
        let stream = registry.connect(&connect_params, config)?;
        let mut conn_core = Self {
            connect_params,
            config: config.clone(),
            mode,
            protocol_version: 0,
            db_handle: None,
            server_version: None,
            warnings: Vec::new(),
            transactions: BTreeMap::new(),
            next_serial: 0,
            statements: BTreeSet::new(),
            io_buffer: DebugIgnore(Vec::with_capacity(256)),
            tcp_client: TcpClient::Wire(stream),
        };

        conn_core.handshake()?;
        if let Some(key) = conn_core.connect_params.wire_crypt_key().cloned() {
            conn_core.start_encryption(ARC4_PLUGIN, SYMMETRIC_KEY, key.unsecure().as_bytes())?;
        }
        conn_core.open(dpb_extras)?;
        if mode == OpenMode::Service {
            return Ok(conn_core);
        }

        let version_info = conn_core.database_info(&[info::ISC_VERSION], 256)?;
        let server_version = ServerVersion::parse_info(&version_info)?;
        debug!("Server version: {server_version}");
        conn_core.server_version = Some(server_version);
        Ok(conn_core)
    }

    // op_connect, answered with op_accept (or one of its variants), or op_reject.
    fn handshake(&mut self) -> FbResult<()> {
        let offered: Vec<i32> = self.config.protocol_versions().to_vec();
        if offered.is_empty() {
            return Err(FbError::Usage("no protocol version configured"));
        }
        let max_type = if self.connect_params.is_compression_requested() {
            connect::PTYPE_BATCH_SEND | connect::PFLAG_COMPRESS
        } else {
            connect::PTYPE_BATCH_SEND
        };

        let count = i32::try_from(offered.len())
            .map_err(|_| FbError::Usage("too many protocol versions"))?;
        let mut request = Request::new(OpCode::Connect)
            .int(OpCode::Attach.to_i32())
            .int(connect::CONNECT_VERSION2)
            .int(connect::ARCH_GENERIC)
            .string(self.connect_params.database())
            .int(count)
            .buffer(user_identification(&get_os_user(), &get_host_name()));
        let mut weight = count * 2;
        for version in &offered {
            request = request
                .int(*version)
                .int(connect::ARCH_GENERIC)
                .int(connect::PTYPE_RPC)
                .int(max_type)
                .int(weight);
            weight -= 2;
        }

        let (version, arch, ptype) = self.roundtrip(&request, parse_accept)?;
        let normalized = version & connect::FB_PROTOCOL_MASK;
        if !offered
            .iter()
            .any(|v| v & connect::FB_PROTOCOL_MASK == normalized)
        {
            self.tcp_client.die();
            return Err(FbError::Negotiation(format!(
                "server accepted protocol version {normalized}, which was not offered"
            )));
        }
        debug!(
            "Handshake done: protocol version {normalized}, architecture {arch}, type {}",
            ptype & connect::PTYPE_MASK
        );
        self.protocol_version = normalized;

        if ptype & connect::PFLAG_COMPRESS != 0 {
            if self.connect_params.is_compression_requested() {
                self.tcp_client.stream()?.enable_compression()?;
            } else {
                self.tcp_client.die();
                return Err(FbError::Negotiation(
                    "server enabled compression, which was not requested".to_string(),
                ));
            }
        }
        Ok(())
    }

    // op_attach, op_create or op_service_attach, with the parameter buffer that is
    // derived from the connect parameters.
    fn open(&mut self, extras: Option<&ParameterBuffer>) -> FbResult<()> {
        let buffer = if self.mode == OpenMode::Service {
            self.service_parameter_buffer(extras)?
        } else {
            self.database_parameter_buffer(extras)?
        };
        let request = Request::new(self.mode.op_code())
            .int(0)
            .string(self.connect_params.database())
            .buffer(buffer.to_wire_bytes());
        let response = self.send(&request)?;
        debug!(
            "{} {} as user {}, handle {}",
            match self.mode {
                OpenMode::Attach => "Attached to",
                OpenMode::Create => "Created",
                OpenMode::Service => "Attached to service",
            },
            self.connect_params.database(),
            self.connect_params.dbuser(),
            response.object
        );
        self.db_handle = Some(response.object);
        Ok(())
    }

    fn database_parameter_buffer(
        &self,
        extras: Option<&ParameterBuffer>,
    ) -> FbResult<ParameterBuffer> {
        let params = &self.connect_params;
        let mut dpb = ParameterBuffer::new(BufferKind::Dpb);
        dpb.add_int(dpb::SQL_DIALECT, params.dialect())?;
        dpb.add_string(dpb::LC_CTYPE, params.charset().name())?;
        dpb.add_string(dpb::USER_NAME, params.dbuser())?;
        dpb.add_string(dpb::PASSWORD, params.password().unsecure())?;
        if let Some(role) = params.role() {
            dpb.add_string(dpb::SQL_ROLE_NAME, role)?;
        }
        if let Some(extras) = extras {
            for argument in extras.arguments() {
                dpb.add_argument(argument.tag(), argument.value().clone())?;
            }
        }
        trace!("DPB has {} bytes", dpb.len());
        Ok(dpb)
    }

    fn service_parameter_buffer(
        &self,
        extras: Option<&ParameterBuffer>,
    ) -> FbResult<ParameterBuffer> {
        let params = &self.connect_params;
        let mut spb = ParameterBuffer::new(BufferKind::SpbAttach);
        spb.add_string(spb::USER_NAME, params.dbuser())?;
        spb.add_string(spb::PASSWORD, params.password().unsecure())?;
        if let Some(role) = params.role() {
            spb.add_string(spb::SQL_ROLE_NAME, role)?;
        }
        if let Some(extras) = extras {
            for argument in extras.arguments() {
                spb.add_argument(argument.tag(), argument.value().clone())?;
            }
        }
        Ok(spb)
    }

    // Sends op_crypt and layers the cipher on both halves of the stream.
    pub(crate) fn start_encryption(
        &mut self,
        plugin: &str,
        key_name: &str,
        key: &[u8],
    ) -> FbResult<()> {
        if self.tcp_client.stream()?.is_encrypted() {
            return Err(FbError::Usage("wire encryption is already enabled"));
        }
        if plugin != ARC4_PLUGIN {
            return Err(usage_err!("unsupported wire encryption plugin '{plugin}'"));
        }
        if self.protocol_version < 13 {
            return Err(usage_err!(
                "wire encryption needs protocol version 13, the connection uses {}",
                self.protocol_version
            ));
        }
        let cipher_in = Arc4::new(key)?;
        let cipher_out = Arc4::new(key)?;
        self.send(
            &Request::new(OpCode::Crypt)
                .string(plugin)
                .string(key_name),
        )?;
        self.tcp_client
            .stream()?
            .enable_encryption(Box::new(cipher_in), Box::new(cipher_out))?;
        debug!("Wire encryption started with plugin {plugin}");
        Ok(())
    }

    pub(crate) fn db_handle(&self) -> FbResult<i32> {
        if self.tcp_client.has_died() {
            return Err(FbError::ConnectionBroken { source: None });
        }
        self.db_handle
            .ok_or(FbError::Usage("database is not attached"))
    }

    pub(crate) fn is_attached(&self) -> bool {
        self.db_handle.is_some() && !self.tcp_client.has_died()
    }

    pub(crate) fn is_broken(&self) -> bool {
        self.tcp_client.has_died()
    }

    pub(crate) fn connect_params(&self) -> &ConnectParams {
        &self.connect_params
    }

    pub(crate) fn configuration(&self) -> &ConnectionConfiguration {
        &self.config
    }

    pub(crate) fn configuration_mut(&mut self) -> &mut ConnectionConfiguration {
        &mut self.config
    }

    pub(crate) fn protocol_version(&self) -> i32 {
        self.protocol_version
    }

    pub(crate) fn is_compressed(&mut self) -> bool {
        self.tcp_client.stream().is_ok_and(|s| s.is_compressed())
    }

    pub(crate) fn is_encrypted(&mut self) -> bool {
        self.tcp_client.stream().is_ok_and(|s| s.is_encrypted())
    }

    pub(crate) fn server_version(&self) -> Option<&ServerVersion> {
        self.server_version.as_ref()
    }

    pub(crate) fn pop_warnings(&mut self) -> Option<Vec<ServerError>> {
        if self.warnings.is_empty() {
            None
        } else {
            Some(std::mem::take(&mut self.warnings))
        }
    }

    // op_info_database
    pub(crate) fn database_info(&mut self, items: &[u8], buffer_len: u32) -> FbResult<Vec<u8>> {
        let request = Request::new(OpCode::InfoDatabase)
            .int(self.db_handle()?)
            .int(0)
            .buffer(items)
            .int(buffer_length(buffer_len));
        Ok(self.send(&request)?.data)
    }

    pub(crate) fn ping(&mut self) -> FbResult<()> {
        self.db_handle()?;
        self.send(&Request::new(OpCode::Ping))?;
        Ok(())
    }

    // op_detach, followed by op_disconnect; afterwards the socket is closed.
    pub(crate) fn detach(&mut self) -> FbResult<()> {
        let handle = self.db_handle()?;
        if !self.transactions.is_empty() {
            return Err(usage_err!(
                "isc_open_trans: cannot detach with {} active transaction(s)",
                self.transactions.len()
            ));
        }
        self.send(&Request::new(self.mode.detach_op_code()).int(handle))?;
        debug!("Detached handle {handle}");
        self.close();
        Ok(())
    }

    pub(crate) fn drop_database(&mut self) -> FbResult<()> {
        let handle = self.db_handle()?;
        if self.mode == OpenMode::Service {
            return Err(FbError::Usage("a service connection has no database to drop"));
        }
        self.send(&Request::new(OpCode::DropDatabase).int(handle))?;
        debug!("Dropped database {}", self.connect_params.database());
        self.transactions.clear();
        self.close();
        Ok(())
    }

    fn close(&mut self) {
        self.db_handle = None;
        self.statements.clear();
        if let Ok(stream) = self.tcp_client.stream() {
            let disconnect = Request::new(OpCode::Disconnect);
            if let Err(e) = emit(&disconnect, self.connect_params.charset(), stream) {
                trace!("op_disconnect could not be sent: {e}");
            }
        }
        self.tcp_client.die();
    }

    // Sends a request and reads the generic response.
    // `Reply::generic` as a path is bound to one lifetime of `Reply`, which does not
    // satisfy the bound of `roundtrip`.
    #[allow(clippy::redundant_closure_for_method_calls)]
    pub(crate) fn send(&mut self, request: &Request) -> FbResult<GenericResponse> {
        self.roundtrip(request, |reply| reply.generic())
    }

    // Sends a request and parses the answer with the given function.
    //
    // Errors of the server leave the connection intact. Any other failure during the
    // exchange leaves the stream in an undefined position, so the connection dies.
    pub(crate) fn roundtrip<T, F>(&mut self, request: &Request, parse: F) -> FbResult<T>
    where
        F: FnOnce(&mut Reply) -> FbResult<T>,
    {
        let charset = self.connect_params.charset();
        // encoding errors are detected before anything is written
        self.io_buffer.clear();
        request.emit(charset, &mut *self.io_buffer)?;

        let stream = self.tcp_client.stream()?;
        let result = exchange(
            stream,
            &self.io_buffer,
            self.protocol_version,
            charset,
            &mut self.warnings,
            parse,
        );
        match result {
            Ok(t) => Ok(t),
            Err(e @ FbError::DbError { .. }) => Err(e),
            Err(e @ FbError::Negotiation(_)) => {
                info!("Connection discarded: {e}");
                self.tcp_client.die();
                Err(e)
            }
            Err(e) => {
                info!(
                    "roundtrip({}): connection discarded after \"{e}\"",
                    request.op_code()
                );
                self.tcp_client.die();
                Err(connection_broken(e, self.config.read_timeout()))
            }
        }
    }

    pub(crate) fn register_transaction(&mut self, tr_handle: i32) -> u64 {
        self.next_serial += 1;
        self.transactions.insert(
            tr_handle,
            TransactionEntry {
                serial: self.next_serial,
                statements: BTreeSet::new(),
            },
        );
        self.next_serial
    }

    pub(crate) fn unregister_transaction(&mut self, tr_handle: i32) {
        if let Some(entry) = self.transactions.remove(&tr_handle) {
            trace!(
                "Transaction {tr_handle} forgets {} statement(s)",
                entry.statements.len()
            );
        }
    }

    // True if the transaction that was registered with this serial is still active.
    pub(crate) fn is_transaction_active(&self, tr_handle: i32, serial: u64) -> bool {
        self.transactions
            .get(&tr_handle)
            .is_some_and(|entry| entry.serial == serial)
    }

    pub(crate) fn open_transactions(&self) -> usize {
        self.transactions.len()
    }

    pub(crate) fn register_statement(&mut self, stmt_handle: i32) {
        self.statements.insert(stmt_handle);
    }

    pub(crate) fn unregister_statement(&mut self, stmt_handle: i32) {
        self.statements.remove(&stmt_handle);
        for entry in self.transactions.values_mut() {
            entry.statements.remove(&stmt_handle);
        }
    }

    // Records that a statement was executed within a transaction.
    pub(crate) fn register_statement_use(&mut self, tr_handle: i32, stmt_handle: i32) {
        if let Some(entry) = self.transactions.get_mut(&tr_handle) {
            entry.statements.insert(stmt_handle);
        }
    }

    pub(crate) fn open_statements(&self) -> usize {
        self.statements.len()
    }
}

fn exchange<T, F>(
    stream: &mut WireStream,
    bytes: &[u8],
    protocol_version: i32,
    charset: Charset,
    warnings: &mut Vec<ServerError>,
    parse: F,
) -> FbResult<T>
where
    F: FnOnce(&mut Reply) -> FbResult<T>,
{
    stream.write_all(bytes)?;
    stream.flush()?;
    parse(&mut Reply {
        rdr: stream,
        protocol_version,
        charset,
        warnings,
    })
}

fn emit(request: &Request, charset: Charset, stream: &mut WireStream) -> FbResult<()> {
    request.emit(charset, stream)?;
    stream.flush()?;
    Ok(())
}

impl Drop for ConnectionCore {
    // try to detach from the database, ignore all errors
    fn drop(&mut self) {
        debug!("Drop of ConnectionCore, database handle = {:?}", self.db_handle);
        if let (Some(handle), Ok(stream)) = (self.db_handle, self.tcp_client.stream()) {
            let charset = self.connect_params.charset();
            let detach = Request::new(self.mode.detach_op_code()).int(handle);
            emit(&detach, charset, stream)
                .and_then(|()| emit(&Request::new(OpCode::Disconnect), charset, stream))
                .map_err(|e| {
                    warn!("Detach request failed with {e:?}");
                    e
                })
                .ok();
        }
    }
}

pub(crate) const ARC4_PLUGIN: &str = "Arc4";
pub(crate) const SYMMETRIC_KEY: &str = "Symmetric";

// The accepted protocol version, architecture and type.
fn parse_accept(reply: &mut Reply) -> FbResult<(i32, i32, i32)> {
    match reply.op_code()? {
        OpCode::Accept => {
            let version = reply.rdr.get_i32()?;
            let arch = reply.rdr.get_i32()?;
            let ptype = reply.rdr.get_i32()?;
            Ok((version, arch, ptype))
        }
        OpCode::CondAccept | OpCode::AcceptData => {
            let version = reply.rdr.get_i32()?;
            let arch = reply.rdr.get_i32()?;
            let ptype = reply.rdr.get_i32()?;
            let _data = reply.rdr.get_buffer()?;
            let plugin = String::from_utf8_lossy(&reply.rdr.get_buffer()?).into_owned();
            let authenticated = reply.rdr.get_i32()?;
            let _keys = reply.rdr.get_buffer()?;
            if authenticated == 0 {
                return Err(FbError::Negotiation(format!(
                    "server requests authentication with plugin '{plugin}', \
                     which is not supported"
                )));
            }
            Ok((version, arch, ptype))
        }
        OpCode::Reject => Err(FbError::Negotiation(
            "server rejected all offered protocol versions".to_string(),
        )),
        OpCode::Response => {
            let error = reply.generic_body().err();
            Err(FbError::Negotiation(match error {
                Some(e) => format!("connect attempt failed: {}", e.display_with_inner()),
                None => "unexpected response to op_connect".to_string(),
            }))
        }
        op_code => Err(impl_err!("unexpected {op_code} in handshake")),
    }
}

// The user identification block of op_connect: tag, one-byte length, value.
#[allow(clippy::cast_possible_truncation)]
fn user_identification(user: &str, host: &str) -> Vec<u8> {
    let mut out = Vec::with_capacity(user.len() + host.len() + 6);
    for (tag, value) in [
        (connect::CNCT_USER, user.as_bytes()),
        (connect::CNCT_HOST, host.as_bytes()),
        (connect::CNCT_USER_VERIFICATION, &[][..]),
    ] {
        let value = &value[..value.len().min(255)];
        out.push(tag);
        out.push(value.len() as u8);
        out.extend_from_slice(value);
    }
    out
}

fn buffer_length(len: u32) -> i32 {
    i32::try_from(len).unwrap_or(i32::MAX)
}

fn get_os_user() -> String {
    let os_user = username::get_user_name().unwrap_or_default();
    trace!("OS user: {os_user}");
    os_user
}

fn get_host_name() -> String {
    std::env::var("HOSTNAME").unwrap_or_else(|_| "localhost".to_string())
}

fn connection_broken(mut e: FbError, o_timeout: Option<std::time::Duration>) -> FbError {
    if let FbError::Io {
        source: ref mut io_error,
    } = e
    {
        // timeout in linux: WouldBlock, timeout in windows: TimedOut
        if matches!(io_error.kind(), ErrorKind::WouldBlock | ErrorKind::TimedOut) {
            *io_error = std::io::Error::new(
                ErrorKind::TimedOut,
                if let Some(timeout) = o_timeout {
                    format!("connection is broken (connection's read timeout had value {timeout:?})")
                } else {
                    "connection is broken (connection had no read timeout)".to_string()
                },
            );
        }
    }
    FbError::ConnectionBroken {
        source: Some(Box::new(e)),
    }
}

#[cfg(test)]
mod test {
    use super::{parse_accept, user_identification};
    use crate::isc::connect;
    use crate::protocol::xdr::XdrWrite;
    use crate::protocol::{Charset, OpCode, Reply};
    use crate::FbError;
    use std::io::Cursor;

    fn accept(bytes: Vec<u8>) -> Result<(i32, i32, i32), FbError> {
        let mut rdr = Cursor::new(bytes);
        let mut warnings = Vec::new();
        parse_accept(&mut Reply {
            rdr: &mut rdr,
            protocol_version: 0,
            charset: Charset::Utf8,
            warnings: &mut warnings,
        })
    }

    #[test]
    fn user_id_block() {
        assert_eq!(
            user_identification("bob", "hal"),
            vec![1, 3, b'b', b'o', b'b', 4, 3, b'h', b'a', b'l', 6, 0]
        );
    }

    #[test]
    fn accept_variants() {
        let mut w = Vec::new();
        w.put_i32(OpCode::Dummy.to_i32()).unwrap();
        w.put_i32(OpCode::Accept.to_i32()).unwrap();
        w.put_i32(connect::PROTOCOL_VERSION12).unwrap();
        w.put_i32(connect::ARCH_GENERIC).unwrap();
        w.put_i32(connect::PTYPE_BATCH_SEND).unwrap();
        assert_eq!(
            accept(w).unwrap(),
            (connect::PROTOCOL_VERSION12, 1, connect::PTYPE_BATCH_SEND)
        );

        let mut w = Vec::new();
        w.put_i32(OpCode::Reject.to_i32()).unwrap();
        assert!(matches!(accept(w), Err(FbError::Negotiation(_))));

        let mut w = Vec::new();
        w.put_i32(OpCode::CondAccept.to_i32()).unwrap();
        for i in [connect::PROTOCOL_VERSION13, 1, 3] {
            w.put_i32(i).unwrap();
        }
        w.put_buffer(b"salt").unwrap();
        w.put_buffer(b"Srp").unwrap();
        w.put_i32(0).unwrap();
        w.put_buffer(b"").unwrap();
        assert!(matches!(accept(w), Err(FbError::Negotiation(_))));
    }
}
