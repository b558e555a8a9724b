// advisable because not all test modules use all functions of this module:
#![allow(dead_code)]

use crate::fake_server::{FakeServer, Settings};
use flexi_logger::{opt_format, Logger, LoggerHandle};
use gdsconnect::{Connection, ConnectionConfiguration, FbResult};

// Returns a logger that prints out all info, warn and error messages.
pub fn init_logger() -> LoggerHandle {
    Logger::try_with_env_or_str("info")
        .unwrap()
        .format(opt_format)
        .start()
        .unwrap_or_else(|e| panic!("Logger initialization failed with {e}"))
}

pub fn closing_info(connection: Connection, start: std::time::Instant) -> FbResult<()> {
    log::info!(
        "Protocol version {}, total elapsed time: {:?}",
        connection.protocol_version()?,
        std::time::Instant::now().duration_since(start),
    );
    connection.detach()
}

pub fn start_server() -> FakeServer {
    FakeServer::start()
}

pub fn start_server_with(settings: Settings) -> FakeServer {
    FakeServer::with_settings(settings)
}

pub fn get_connection(server: &FakeServer) -> FbResult<Connection> {
    let connection = Connection::new(server.cp_builder())?;
    log::info!("TESTING WITH {}", server.url());
    Ok(connection)
}

pub fn get_connection_with_configuration(
    server: &FakeServer,
    config: &ConnectionConfiguration,
) -> FbResult<Connection> {
    Connection::with_configuration(server.cp_builder(), config)
}

// Fills T1 with the rows (1, "Name 1") to (count, "Name count"), and commits.
pub fn fill_t1(connection: &Connection, count: i32) -> FbResult<()> {
    let mut tr = connection.start_transaction()?;
    let mut insert = connection.prepare(&tr, "INSERT INTO T1 (ID, NAME) VALUES (?, ?)")?;
    for id in 1..=count {
        insert.execute(
            &tr,
            &[
                gdsconnect::FbValue::INTEGER(id),
                gdsconnect::FbValue::TEXT(format!("Name {id}")),
            ],
        )?;
    }
    insert.free()?;
    tr.commit()
}
