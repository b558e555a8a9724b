use crate::isc::connect;
use std::time::Duration;

/// Runtime settings of a connection.
///
/// The defaults are given by the `DEFAULT_*` constants.
#[derive(Debug, Clone)]
pub struct ConnectionConfiguration {
    fetch_size: u32,
    blob_read_length: u16,
    blob_write_length: u16,
    read_timeout: Option<Duration>,
    socket_buffer_size: usize,
    protocol_versions: Vec<i32>,
}

impl Default for ConnectionConfiguration {
    fn default() -> Self {
        Self {
            fetch_size: Self::DEFAULT_FETCH_SIZE,
            blob_read_length: Self::DEFAULT_BLOB_READ_LENGTH,
            blob_write_length: Self::DEFAULT_BLOB_WRITE_LENGTH,
            read_timeout: None,
            socket_buffer_size: Self::DEFAULT_SOCKET_BUFFER_SIZE,
            protocol_versions: Self::DEFAULT_PROTOCOL_VERSIONS.to_vec(),
        }
    }
}

impl ConnectionConfiguration {
    /// Default value for the number of rows that are requested with a single `op_fetch`.
    pub const DEFAULT_FETCH_SIZE: u32 = 400;

    /// Default value for the number of bytes that are requested with a single
    /// `op_get_segment`.
    pub const DEFAULT_BLOB_READ_LENGTH: u16 = 16 * 1024;

    /// Default value for the number of bytes that are sent with a single
    /// `op_batch_segments`.
    pub const DEFAULT_BLOB_WRITE_LENGTH: u16 = 32_767;

    /// Largest segment length the protocol allows.
    pub const MAX_SEGMENT_LENGTH: u16 = 32_767;

    /// Default size of the buffers around the socket.
    pub const DEFAULT_SOCKET_BUFFER_SIZE: usize = 32 * 1024;

    /// The protocol versions that are offered by default, in order of preference.
    pub const DEFAULT_PROTOCOL_VERSIONS: [i32; 4] = [
        connect::PROTOCOL_VERSION13,
        connect::PROTOCOL_VERSION12,
        connect::PROTOCOL_VERSION11,
        connect::PROTOCOL_VERSION10,
    ];

    /// Returns the connection's fetch size.
    pub fn fetch_size(&self) -> u32 {
        self.fetch_size
    }
    /// Sets the connection's fetch size; a value of 0 is replaced with 1.
    pub fn set_fetch_size(&mut self, fetch_size: u32) {
        self.fetch_size = fetch_size.max(1);
    }
    /// Builder-method for setting the connection's fetch size.
    #[must_use]
    pub fn with_fetch_size(mut self, fetch_size: u32) -> Self {
        self.set_fetch_size(fetch_size);
        self
    }

    /// Returns the connection's blob read length.
    pub fn blob_read_length(&self) -> u16 {
        self.blob_read_length
    }
    /// Sets the connection's blob read length, capped to
    /// [`ConnectionConfiguration::MAX_SEGMENT_LENGTH`].
    pub fn set_blob_read_length(&mut self, length: u16) {
        self.blob_read_length = length.clamp(1, Self::MAX_SEGMENT_LENGTH);
    }
    /// Builder-method for setting the connection's blob read length.
    #[must_use]
    pub fn with_blob_read_length(mut self, length: u16) -> Self {
        self.set_blob_read_length(length);
        self
    }

    /// Returns the connection's blob write length.
    pub fn blob_write_length(&self) -> u16 {
        self.blob_write_length
    }
    /// Sets the connection's blob write length, capped to
    /// [`ConnectionConfiguration::MAX_SEGMENT_LENGTH`].
    pub fn set_blob_write_length(&mut self, length: u16) {
        self.blob_write_length = length.clamp(1, Self::MAX_SEGMENT_LENGTH);
    }
    /// Builder-method for setting the connection's blob write length.
    #[must_use]
    pub fn with_blob_write_length(mut self, length: u16) -> Self {
        self.set_blob_write_length(length);
        self
    }

    /// Returns the socket read timeout.
    pub fn read_timeout(&self) -> Option<Duration> {
        self.read_timeout
    }
    /// Sets the socket read timeout; `None` waits forever.
    pub fn set_read_timeout(&mut self, read_timeout: Option<Duration>) {
        self.read_timeout = read_timeout;
    }
    /// Builder-method for setting the socket read timeout.
    #[must_use]
    pub fn with_read_timeout(mut self, read_timeout: Option<Duration>) -> Self {
        self.read_timeout = read_timeout;
        self
    }

    /// Returns the size of the buffers around the socket.
    pub fn socket_buffer_size(&self) -> usize {
        self.socket_buffer_size
    }
    /// Sets the size of the buffers around the socket.
    pub fn set_socket_buffer_size(&mut self, size: usize) {
        self.socket_buffer_size = size.max(1024);
    }
    /// Builder-method for setting the size of the buffers around the socket.
    #[must_use]
    pub fn with_socket_buffer_size(mut self, size: usize) -> Self {
        self.set_socket_buffer_size(size);
        self
    }

    /// Returns the protocol versions that are offered in the handshake.
    pub fn protocol_versions(&self) -> &[i32] {
        &self.protocol_versions
    }
    /// Sets the protocol versions that are offered in the handshake, in order of preference.
    pub fn set_protocol_versions(&mut self, versions: Vec<i32>) {
        self.protocol_versions = versions;
    }
    /// Builder-method for setting the offered protocol versions.
    #[must_use]
    pub fn with_protocol_versions(mut self, versions: Vec<i32>) -> Self {
        self.protocol_versions = versions;
        self
    }
}
