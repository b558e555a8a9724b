//! Numeric constants of the Firebird/InterBase client API.
//!
//! The values are fixed by the server; names follow the `isc_*` names of the C API
//! with the prefix replaced by the module name.

/// Tags of database parameter buffers (DPB).
pub mod dpb {
    pub const VERSION1: u8 = 1;
    pub const VERSION2: u8 = 2;
    pub const PAGE_SIZE: u8 = 4;
    pub const NUM_BUFFERS: u8 = 5;
    pub const FORCE_WRITE: u8 = 24;
    pub const USER_NAME: u8 = 28;
    pub const PASSWORD: u8 = 29;
    pub const PASSWORD_ENC: u8 = 30;
    pub const LC_MESSAGES: u8 = 47;
    pub const LC_CTYPE: u8 = 48;
    pub const OVERWRITE: u8 = 54;
    pub const CONNECT_TIMEOUT: u8 = 57;
    pub const DUMMY_PACKET_INTERVAL: u8 = 58;
    pub const SQL_ROLE_NAME: u8 = 60;
    pub const SET_PAGE_BUFFERS: u8 = 61;
    pub const SQL_DIALECT: u8 = 63;
    pub const SET_DB_CHARSET: u8 = 68;
    pub const PROCESS_ID: u8 = 71;
    pub const NO_DB_TRIGGERS: u8 = 72;
    pub const TRUSTED_AUTH: u8 = 73;
    pub const PROCESS_NAME: u8 = 74;
    pub const UTF8_FILENAME: u8 = 77;
    pub const SPECIFIC_AUTH_DATA: u8 = 84;
    pub const AUTH_PLUGIN_LIST: u8 = 85;
    pub const AUTH_PLUGIN_NAME: u8 = 86;
    pub const SESSION_TIME_ZONE: u8 = 91;
}

/// Tags of transaction parameter buffers (TPB).
pub mod tpb {
    pub const VERSION1: u8 = 1;
    pub const VERSION3: u8 = 3;
    pub const CONSISTENCY: u8 = 1;
    pub const CONCURRENCY: u8 = 2;
    pub const SHARED: u8 = 3;
    pub const PROTECTED: u8 = 4;
    pub const EXCLUSIVE: u8 = 5;
    pub const WAIT: u8 = 6;
    pub const NOWAIT: u8 = 7;
    pub const READ: u8 = 8;
    pub const WRITE: u8 = 9;
    pub const LOCK_READ: u8 = 10;
    pub const LOCK_WRITE: u8 = 11;
    pub const VERB_TIME: u8 = 12;
    pub const COMMIT_TIME: u8 = 13;
    pub const IGNORE_LIMBO: u8 = 14;
    pub const READ_COMMITTED: u8 = 15;
    pub const AUTOCOMMIT: u8 = 16;
    pub const REC_VERSION: u8 = 17;
    pub const NO_REC_VERSION: u8 = 18;
    pub const RESTART_REQUESTS: u8 = 19;
    pub const NO_AUTO_UNDO: u8 = 20;
    pub const LOCK_TIMEOUT: u8 = 21;
}

/// Tags of blob parameter buffers (BPB).
pub mod bpb {
    pub const VERSION1: u8 = 1;
    pub const SOURCE_TYPE: u8 = 1;
    pub const TARGET_TYPE: u8 = 2;
    pub const TYPE: u8 = 3;
    pub const SOURCE_INTERP: u8 = 4;
    pub const TARGET_INTERP: u8 = 5;
    pub const FILTER_PARAMETER: u8 = 6;
    pub const STORAGE: u8 = 7;

    pub const TYPE_SEGMENTED: u8 = 0;
    pub const TYPE_STREAM: u8 = 1;
}

/// Tags of service parameter buffers (SPB) and service actions.
pub mod spb {
    pub const VERSION1: u8 = 1;
    pub const VERSION2: u8 = 2;
    pub const VERSION3: u8 = 3;
    pub const USER_NAME: u8 = 28;
    pub const PASSWORD: u8 = 29;
    pub const CONNECT_TIMEOUT: u8 = 57;
    pub const DUMMY_PACKET_INTERVAL: u8 = 58;
    pub const SQL_ROLE_NAME: u8 = 60;
    pub const COMMAND_LINE: u8 = 105;
    pub const DBNAME: u8 = 106;
    pub const VERBOSE: u8 = 107;
    pub const OPTIONS: u8 = 108;
    pub const AUTH_PLUGIN_NAME: u8 = 111;
    pub const AUTH_PLUGIN_LIST: u8 = 112;
    pub const UTF8_FILENAME: u8 = 113;

    pub const BKP_FILE: u8 = 5;
    pub const BKP_FACTOR: u8 = 6;
    pub const BKP_LENGTH: u8 = 7;

    pub const ACTION_BACKUP: u8 = 1;
    pub const ACTION_RESTORE: u8 = 2;
    pub const ACTION_REPAIR: u8 = 3;
    pub const ACTION_ADD_USER: u8 = 4;
    pub const ACTION_DELETE_USER: u8 = 5;
    pub const ACTION_MODIFY_USER: u8 = 6;
    pub const ACTION_DISPLAY_USER: u8 = 7;
    pub const ACTION_PROPERTIES: u8 = 8;
    pub const ACTION_DB_STATS: u8 = 11;
    pub const ACTION_GET_LOG: u8 = 12;

    pub const INFO_SERVER_VERSION: u8 = 55;
    pub const INFO_IMPLEMENTATION: u8 = 56;
    pub const INFO_LINE: u8 = 62;
    pub const INFO_TO_EOF: u8 = 63;
    pub const INFO_TIMEOUT: u8 = 64;
}

/// Generic info items, and the items of `op_info_database`.
pub mod info {
    pub const END: u8 = 1;
    pub const TRUNCATED: u8 = 2;
    pub const ERROR: u8 = 3;
    pub const DATA_NOT_READY: u8 = 4;
    pub const LENGTH: u8 = 126;
    pub const FLAG_END: u8 = 127;

    pub const DB_ID: u8 = 4;
    pub const IMPLEMENTATION: u8 = 11;
    pub const ISC_VERSION: u8 = 12;
    pub const PAGE_SIZE: u8 = 14;
    pub const NUM_BUFFERS: u8 = 15;
    pub const ATTACHMENT_ID: u8 = 22;
    pub const ODS_VERSION: u8 = 32;
    pub const ODS_MINOR_VERSION: u8 = 33;
    pub const DB_SQL_DIALECT: u8 = 62;
    pub const DB_READ_ONLY: u8 = 63;
    pub const DB_SIZE_IN_PAGES: u8 = 64;
    pub const FIREBIRD_VERSION: u8 = 103;

    pub const REQ_SELECT_COUNT: u8 = 13;
    pub const REQ_INSERT_COUNT: u8 = 14;
    pub const REQ_UPDATE_COUNT: u8 = 15;
    pub const REQ_DELETE_COUNT: u8 = 16;

    pub const TRA_ID: u8 = 4;

    pub const BLOB_NUM_SEGMENTS: u8 = 4;
    pub const BLOB_MAX_SEGMENT: u8 = 5;
    pub const BLOB_TOTAL_LENGTH: u8 = 6;
    pub const BLOB_TYPE: u8 = 7;
}

/// Items of `op_info_sql` and of the describe part of `op_prepare_statement`.
pub mod sql_info {
    pub const SELECT: u8 = 4;
    pub const BIND: u8 = 5;
    pub const NUM_VARIABLES: u8 = 6;
    pub const DESCRIBE_VARS: u8 = 7;
    pub const DESCRIBE_END: u8 = 8;
    pub const SQLDA_SEQ: u8 = 9;
    pub const MESSAGE_SEQ: u8 = 10;
    pub const TYPE: u8 = 11;
    pub const SUB_TYPE: u8 = 12;
    pub const SCALE: u8 = 13;
    pub const LENGTH: u8 = 14;
    pub const NULL_IND: u8 = 15;
    pub const FIELD: u8 = 16;
    pub const RELATION: u8 = 17;
    pub const OWNER: u8 = 18;
    pub const ALIAS: u8 = 19;
    pub const SQLDA_START: u8 = 20;
    pub const STMT_TYPE: u8 = 21;
    pub const GET_PLAN: u8 = 22;
    pub const RECORDS: u8 = 23;
    pub const BATCH_FETCH: u8 = 24;
}

/// Tags of status vector entries.
pub mod arg {
    pub const END: i32 = 0;
    pub const GDS: i32 = 1;
    pub const STRING: i32 = 2;
    pub const CSTRING: i32 = 3;
    pub const NUMBER: i32 = 4;
    pub const INTERPRETED: i32 = 5;
    pub const VMS: i32 = 6;
    pub const UNIX: i32 = 7;
    pub const DOMAIN: i32 = 8;
    pub const DOS: i32 = 9;
    pub const WARNING: i32 = 18;
    pub const SQL_STATE: i32 = 19;
}

/// Selected ISC error codes.
pub mod error {
    pub const ARITH_EXCEPT: i32 = 335_544_321;
    pub const BAD_DB_FORMAT: i32 = 335_544_323;
    pub const BAD_DB_HANDLE: i32 = 335_544_324;
    pub const BAD_SEGSTR_HANDLE: i32 = 335_544_328;
    pub const BAD_TRANS_HANDLE: i32 = 335_544_332;
    pub const DEADLOCK: i32 = 335_544_336;
    pub const INTEG_FAIL: i32 = 335_544_342;
    pub const LOCK_CONFLICT: i32 = 335_544_345;
    pub const NO_CUR_REC: i32 = 335_544_348;
    pub const OPEN_TRANS: i32 = 335_544_357;
    pub const SEGMENT: i32 = 335_544_366;
    pub const SEGSTR_EOF: i32 = 335_544_367;
    pub const STREAM_EOF: i32 = 335_544_374;
    pub const UNAVAILABLE: i32 = 335_544_375;
    pub const WISH_LIST: i32 = 335_544_378;
    pub const CONNECT_REJECT: i32 = 335_544_421;
    pub const TRA_STATE: i32 = 335_544_468;
    pub const BAD_STMT_HANDLE: i32 = 335_544_485;
    pub const DSQL_CURSOR_ERR: i32 = 335_544_572;
    pub const DSQL_SQLDA_ERR: i32 = 335_544_583;
    pub const CONN_LOST: i32 = 335_544_648;
    pub const UNIQUE_KEY_VIOLATION: i32 = 335_544_665;
    pub const NETWORK_ERROR: i32 = 335_544_721;
    pub const NET_CONNECT_ERR: i32 = 335_544_722;
    pub const NET_READ_ERR: i32 = 335_544_726;
    pub const NET_WRITE_ERR: i32 = 335_544_727;
    pub const BAD_PROTOCOL: i32 = 335_544_751;
    pub const CANCELLED: i32 = 335_544_794;
}

/// Options of `op_free_statement`.
pub mod dsql {
    pub const CLOSE: i32 = 1;
    pub const DROP: i32 = 2;
    pub const UNPREPARE: i32 = 4;

    pub const SQL_DIALECT_V5: i32 = 1;
    pub const SQL_DIALECT_V6_TRANSITION: i32 = 2;
    pub const SQL_DIALECT_V6: i32 = 3;
}

/// Operation codes of the BLR message language.
pub mod blr {
    pub const VERSION5: u8 = 5;
    pub const BEGIN: u8 = 2;
    pub const MESSAGE: u8 = 4;
    pub const END: u8 = 255;
    pub const EOC: u8 = 76;

    pub const TEXT: u8 = 14;
    pub const TEXT2: u8 = 15;
    pub const SHORT: u8 = 7;
    pub const LONG: u8 = 8;
    pub const QUAD: u8 = 9;
    pub const FLOAT: u8 = 10;
    pub const D_FLOAT: u8 = 11;
    pub const SQL_DATE: u8 = 12;
    pub const SQL_TIME: u8 = 13;
    pub const INT64: u8 = 16;
    pub const DOUBLE: u8 = 27;
    pub const TIMESTAMP: u8 = 35;
    pub const VARYING: u8 = 37;
    pub const VARYING2: u8 = 38;
    pub const BOOL: u8 = 23;
}

/// Fields of the user identification block of `op_connect`, and
/// protocol negotiation values.
pub mod connect {
    pub const CNCT_USER: u8 = 1;
    pub const CNCT_PASSWD: u8 = 2;
    pub const CNCT_HOST: u8 = 4;
    pub const CNCT_GROUP: u8 = 5;
    pub const CNCT_USER_VERIFICATION: u8 = 6;
    pub const CNCT_SPECIFIC_DATA: u8 = 7;
    pub const CNCT_PLUGIN_NAME: u8 = 8;
    pub const CNCT_LOGIN: u8 = 9;
    pub const CNCT_PLUGIN_LIST: u8 = 10;
    pub const CNCT_CLIENT_CRYPT: u8 = 11;

    pub const CONNECT_VERSION2: i32 = 2;
    pub const CONNECT_VERSION3: i32 = 3;
    pub const ARCH_GENERIC: i32 = 1;

    pub const PTYPE_RPC: i32 = 2;
    pub const PTYPE_BATCH_SEND: i32 = 3;
    pub const PTYPE_OUT_OF_BAND: i32 = 4;
    pub const PTYPE_LAZY_SEND: i32 = 5;
    pub const PTYPE_MASK: i32 = 0xFF;
    pub const PFLAG_COMPRESS: i32 = 0x100;

    pub const FB_PROTOCOL_FLAG: i32 = 0x8000;
    pub const FB_PROTOCOL_MASK: i32 = !FB_PROTOCOL_FLAG & 0xFFFF;

    pub const PROTOCOL_VERSION10: i32 = 10;
    pub const PROTOCOL_VERSION11: i32 = FB_PROTOCOL_FLAG | 11;
    pub const PROTOCOL_VERSION12: i32 = FB_PROTOCOL_FLAG | 12;
    pub const PROTOCOL_VERSION13: i32 = FB_PROTOCOL_FLAG | 13;
}
