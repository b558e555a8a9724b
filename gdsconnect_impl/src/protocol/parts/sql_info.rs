use crate::isc::{info, sql_info};
use crate::protocol::parts::{XSqlDa, XSqlVar};
use crate::protocol::util::{vax_integer, InfoReader};
use crate::{FbError, FbResult};

/// The kind of a prepared statement, as reported by the server.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum StatementType {
    /// `SELECT`
    Select,
    /// `INSERT`
    Insert,
    /// `UPDATE`
    Update,
    /// `DELETE`
    Delete,
    /// DDL statements
    Ddl,
    /// Blob segment read
    GetSegment,
    /// Blob segment write
    PutSegment,
    /// `EXECUTE PROCEDURE`, and DML with `RETURNING`
    ExecProcedure,
    /// `SET TRANSACTION`
    StartTrans,
    /// `COMMIT`
    Commit,
    /// `ROLLBACK`
    Rollback,
    /// `SELECT ... FOR UPDATE`
    SelectForUpdate,
    /// `SET GENERATOR`
    SetGenerator,
    /// `SAVEPOINT`
    Savepoint,
    /// A statement type this client does not know.
    Other(i64),
}

impl StatementType {
    fn from_i64(i: i64) -> Self {
        match i {
            1 => Self::Select,
            2 => Self::Insert,
            3 => Self::Update,
            4 => Self::Delete,
            5 => Self::Ddl,
            6 => Self::GetSegment,
            7 => Self::PutSegment,
            8 => Self::ExecProcedure,
            9 => Self::StartTrans,
            10 => Self::Commit,
            11 => Self::Rollback,
            12 => Self::SelectForUpdate,
            13 => Self::SetGenerator,
            14 => Self::Savepoint,
            i => Self::Other(i),
        }
    }

    /// True if executing opens a cursor.
    pub fn opens_cursor(self) -> bool {
        matches!(self, Self::Select | Self::SelectForUpdate)
    }
}

/// Which descriptor list a part of a describe response belongs to.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Section {
    Select,
    Bind,
}

const DESCRIBE_VARS: [u8; 11] = [
    sql_info::DESCRIBE_VARS,
    sql_info::SQLDA_SEQ,
    sql_info::TYPE,
    sql_info::SUB_TYPE,
    sql_info::SCALE,
    sql_info::LENGTH,
    sql_info::FIELD,
    sql_info::RELATION,
    sql_info::OWNER,
    sql_info::ALIAS,
    sql_info::DESCRIBE_END,
];

// The items sent with op_prepare_statement.
pub(crate) fn prepare_items() -> Vec<u8> {
    let mut items = vec![sql_info::STMT_TYPE, sql_info::SELECT];
    items.extend_from_slice(&DESCRIBE_VARS);
    items.push(sql_info::BIND);
    items.extend_from_slice(&DESCRIBE_VARS);
    items
}

// The items for continuing a truncated describe response, starting at a 1-based index.
#[allow(clippy::cast_possible_truncation)]
pub(crate) fn continuation_items(section: Section, index: usize) -> Vec<u8> {
    let index = index.min(usize::from(u16::MAX)) as u16;
    let [lo, hi] = index.to_le_bytes();
    let mut items = vec![sql_info::SQLDA_START, 2, lo, hi];
    items.push(match section {
        Section::Select => sql_info::SELECT,
        Section::Bind => sql_info::BIND,
    });
    items.extend_from_slice(&DESCRIBE_VARS);
    items
}

/// The accumulated result of describe responses.
#[derive(Debug, Default)]
pub(crate) struct DescribeInfo {
    pub statement_type: Option<StatementType>,
    pub select: Option<XSqlDa>,
    pub bind: Option<XSqlDa>,
    // Set if the last response was truncated: the section and the index to continue with.
    pub truncated: Option<(Section, usize)>,
}

impl DescribeInfo {
    // Parses a describe response (or a continuation of one) into self.
    pub(crate) fn parse(&mut self, buffer: &[u8]) -> FbResult<()> {
        self.truncated = None;
        let mut rdr = InfoReader::new(buffer);
        let mut section = Section::Select;
        let mut index = 0_usize;
        loop {
            let item = match rdr.read_u8() {
                Ok(item) => item,
                // some servers omit the final isc_info_end
                Err(_) => return Ok(()),
            };
            match item {
                info::END => return Ok(()),
                info::TRUNCATED => {
                    self.truncated = Some((section, index.max(1)));
                    return Ok(());
                }
                sql_info::STMT_TYPE => {
                    self.statement_type = Some(StatementType::from_i64(rdr.read_int()?));
                }
                sql_info::SELECT => section = Section::Select,
                sql_info::BIND => section = Section::Bind,
                sql_info::DESCRIBE_VARS => {
                    let n = usize::try_from(rdr.read_int()?)
                        .map_err(|_| FbError::Impl("negative column count"))?;
                    let sqlda = match section {
                        Section::Select => &mut self.select,
                        Section::Bind => &mut self.bind,
                    };
                    if sqlda.as_ref().map_or(true, |s| s.len() != n) {
                        *sqlda = Some(XSqlDa::with_len(n));
                    }
                }
                sql_info::SQLDA_SEQ => {
                    index = usize::try_from(rdr.read_int()?)
                        .map_err(|_| FbError::Impl("negative column index"))?;
                }
                sql_info::DESCRIBE_END => {}
                sql_info::TYPE
                | sql_info::SUB_TYPE
                | sql_info::SCALE
                | sql_info::LENGTH
                | sql_info::FIELD
                | sql_info::RELATION
                | sql_info::OWNER
                | sql_info::ALIAS => {
                    let var = self.var_mut(section, index)?;
                    match item {
                        sql_info::TYPE => var.sqltype = int32(rdr.read_int()?)?,
                        sql_info::SUB_TYPE => var.sqlsubtype = int32(rdr.read_int()?)?,
                        sql_info::SCALE => var.sqlscale = int32(rdr.read_int()?)?,
                        sql_info::LENGTH => var.sqllen = int32(rdr.read_int()?)?,
                        sql_info::FIELD => var.field_name = rdr.read_string()?,
                        sql_info::RELATION => var.relation_name = rdr.read_string()?,
                        sql_info::OWNER => var.owner_name = rdr.read_string()?,
                        _ => var.alias_name = rdr.read_string()?,
                    }
                }
                other => {
                    return Err(FbError::ImplDetailed(format!(
                        "unexpected item {other} in describe response"
                    )));
                }
            }
        }
    }

    fn var_mut(&mut self, section: Section, index: usize) -> FbResult<&mut XSqlVar> {
        let sqlda = match section {
            Section::Select => self.select.as_mut(),
            Section::Bind => self.bind.as_mut(),
        };
        index
            .checked_sub(1)
            .and_then(|idx| sqlda.and_then(|s| s.get_mut(idx)))
            .ok_or_else(|| FbError::ImplDetailed(format!("column index {index} out of range")))
    }
}

fn int32(i: i64) -> FbResult<i32> {
    i32::try_from(i).map_err(|_| FbError::ImplDetailed(format!("value {i} out of range")))
}

/// Row counts of the last execution of a statement.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct AffectedRows {
    /// Rows read.
    pub selected: u64,
    /// Rows inserted.
    pub inserted: u64,
    /// Rows updated.
    pub updated: u64,
    /// Rows deleted.
    pub deleted: u64,
}

impl AffectedRows {
    /// Inserted, updated and deleted rows together.
    pub fn modified(&self) -> u64 {
        self.inserted + self.updated + self.deleted
    }

    // Parses the response to isc_info_sql_records.
    #[allow(clippy::cast_sign_loss)]
    pub(crate) fn parse(buffer: &[u8]) -> FbResult<Self> {
        let mut counts = Self::default();
        for cluster in InfoReader::new(buffer) {
            let (item, value) = cluster?;
            if item != sql_info::RECORDS {
                continue;
            }
            for sub in InfoReader::new(value) {
                let (sub_item, count) = sub?;
                let count = vax_integer(count).max(0) as u64;
                match sub_item {
                    info::REQ_SELECT_COUNT => counts.selected = count,
                    info::REQ_INSERT_COUNT => counts.inserted = count,
                    info::REQ_UPDATE_COUNT => counts.updated = count,
                    info::REQ_DELETE_COUNT => counts.deleted = count,
                    _ => {}
                }
            }
        }
        Ok(counts)
    }
}
