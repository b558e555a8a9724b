// The operation codes of the wire protocol.
//
// Every packet starts with one of these as an int32.
// Codes that this client never sends or expects are kept so that
// unexpected packets can be logged with a name.
macro_rules! op_codes {
    ($($name:ident = $value:literal,)+) => {
        #[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
        #[repr(i32)]
        pub enum OpCode {
            $(
                #[allow(missing_docs)]
                $name = $value,
            )+
        }

        impl OpCode {
            /// Returns the operation for a wire value, if it is known.
            pub fn from_i32(value: i32) -> Option<Self> {
                match value {
                    $($value => Some(Self::$name),)+
                    _ => None,
                }
            }
        }
    };
}

op_codes! {
    Void = 0,
    Connect = 1,
    Exit = 2,
    Accept = 3,
    Reject = 4,
    Protocol = 5,
    Disconnect = 6,
    Credit = 7,
    Continuation = 8,
    Response = 9,

    // page server, obsolete
    OpenFile = 10,
    CreateFile = 11,
    CloseFile = 12,
    ReadPage = 13,
    WritePage = 14,
    Lock = 15,
    ConvertLock = 16,
    ReleaseLock = 17,
    BlockingAst = 18,

    Attach = 19,
    Create = 20,
    Detach = 21,
    Compile = 22,
    Start = 23,
    StartAndSend = 24,
    Send = 25,
    Receive = 26,
    Unwind = 27,
    Release = 28,

    Transaction = 29,
    Commit = 30,
    Rollback = 31,
    Prepare = 32,
    Reconnect = 33,

    CreateBlob = 34,
    OpenBlob = 35,
    GetSegment = 36,
    PutSegment = 37,
    CancelBlob = 38,
    CloseBlob = 39,

    InfoDatabase = 40,
    InfoRequest = 41,
    InfoTransaction = 42,
    InfoBlob = 43,

    BatchSegments = 44,

    MgrSet = 45,
    MgrClear = 46,
    MgrReport = 47,

    QueEvents = 48,
    CancelEvents = 49,
    CommitRetaining = 50,
    Prepare2 = 51,
    Event = 52,
    ConnectRequest = 53,
    AuxConnect = 54,
    Ddl = 55,
    OpenBlob2 = 56,
    CreateBlob2 = 57,
    GetSlice = 58,
    PutSlice = 59,
    Slice = 60,
    SeekBlob = 61,

    // DSQL
    AllocateStatement = 62,
    Execute = 63,
    ExecImmediate = 64,
    Fetch = 65,
    FetchResponse = 66,
    FreeStatement = 67,
    PrepareStatement = 68,
    SetCursor = 69,
    InfoSql = 70,

    Dummy = 71,
    ResponsePiggyback = 72,
    StartAndReceive = 73,
    StartSendAndReceive = 74,
    ExecImmediate2 = 75,
    Execute2 = 76,
    Insert = 77,
    SqlResponse = 78,
    Transact = 79,
    TransactResponse = 80,
    DropDatabase = 81,

    ServiceAttach = 82,
    ServiceDetach = 83,
    ServiceInfo = 84,
    ServiceStart = 85,

    RollbackRetaining = 86,
    UpdateAccountInfo = 87,
    AuthenticateUser = 88,
    Partial = 89,
    TrustedAuth = 90,
    Cancel = 91,
    ContAuth = 92,
    Ping = 93,
    AcceptData = 94,
    AbortAuxConnection = 95,
    Crypt = 96,
    CryptKeyCallback = 97,
    CondAccept = 98,

    BatchCreate = 99,
    BatchMsg = 100,
    BatchExec = 101,
    BatchRls = 102,
    BatchCs = 103,
    BatchRegblob = 104,
    BatchBlobStream = 105,
    BatchSetBpb = 106,
    ReplData = 107,
    ReplReq = 108,
    BatchCancel = 109,
    BatchSync = 110,
    InfoBatch = 111,
    FetchScroll = 112,
    InfoCursor = 113,
}

impl OpCode {
    /// Returns the wire value.
    pub fn to_i32(self) -> i32 {
        self as i32
    }
}

impl std::fmt::Display for OpCode {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "op_{:?}({})", self, self.to_i32())
    }
}
