use crate::{FbError, FbResult};

/// The base SQL types of column and parameter descriptors.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Serialize)]
#[allow(clippy::upper_case_acronyms)]
pub enum SqlType {
    /// Fixed-length character data (`CHAR`), 452.
    Text,
    /// Variable-length character data (`VARCHAR`), 448.
    Varying,
    /// 16-bit integer, 500.
    Short,
    /// 32-bit integer, 496.
    Long,
    /// 64-bit integer, 580.
    Int64,
    /// Single precision float, 482.
    Float,
    /// Double precision float, 480.
    Double,
    /// VAX double, 530; transported like `Double`.
    DFloat,
    /// `DATE`, 570.
    Date,
    /// `TIME`, 560.
    Time,
    /// `TIMESTAMP`, 510.
    Timestamp,
    /// `BLOB`, 520.
    Blob,
    /// Array, 540.
    Array,
    /// Quad, 550.
    Quad,
    /// `BOOLEAN`, 32764.
    Boolean,
    /// The type of an untyped `NULL` literal, 32766.
    Null,
}

impl SqlType {
    /// Maps a type code; the nullability bit is ignored.
    pub fn from_code(code: i32) -> Option<Self> {
        Some(match code & !1 {
            452 => Self::Text,
            448 => Self::Varying,
            500 => Self::Short,
            496 => Self::Long,
            580 => Self::Int64,
            482 => Self::Float,
            480 => Self::Double,
            530 => Self::DFloat,
            570 => Self::Date,
            560 => Self::Time,
            510 => Self::Timestamp,
            520 => Self::Blob,
            540 => Self::Array,
            550 => Self::Quad,
            32764 => Self::Boolean,
            32766 => Self::Null,
            _ => return None,
        })
    }

    /// The type code, without nullability bit.
    pub fn code(self) -> i32 {
        match self {
            Self::Text => 452,
            Self::Varying => 448,
            Self::Short => 500,
            Self::Long => 496,
            Self::Int64 => 580,
            Self::Float => 482,
            Self::Double => 480,
            Self::DFloat => 530,
            Self::Date => 570,
            Self::Time => 560,
            Self::Timestamp => 510,
            Self::Blob => 520,
            Self::Array => 540,
            Self::Quad => 550,
            Self::Boolean => 32764,
            Self::Null => 32766,
        }
    }
}

/// Character set id of binary character data.
pub const CHARSET_OCTETS: i32 = 1;

/// Describes one column of a result row, or one parameter of a statement.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize)]
pub struct XSqlVar {
    pub(crate) sqltype: i32,
    pub(crate) sqlsubtype: i32,
    pub(crate) sqlscale: i32,
    pub(crate) sqllen: i32,
    pub(crate) field_name: String,
    pub(crate) relation_name: String,
    pub(crate) owner_name: String,
    pub(crate) alias_name: String,
}

impl XSqlVar {
    /// Creates a descriptor from a type code (including the nullability bit),
    /// a subtype, a scale, and a byte length.
    pub fn new(sqltype: i32, sqlsubtype: i32, sqlscale: i32, sqllen: i32) -> Self {
        Self {
            sqltype,
            sqlsubtype,
            sqlscale,
            sqllen,
            ..Self::default()
        }
    }

    /// The raw type code, including the nullability bit.
    pub fn type_code(&self) -> i32 {
        self.sqltype
    }

    /// The base type.
    ///
    /// # Errors
    ///
    /// `FbError::ImplDetailed` for type codes this client does not know.
    pub fn sql_type(&self) -> FbResult<SqlType> {
        SqlType::from_code(self.sqltype)
            .ok_or_else(|| FbError::ImplDetailed(format!("unknown SQL type {}", self.sqltype)))
    }

    /// True if the odd bit of the type code is set.
    pub fn is_nullable(&self) -> bool {
        self.sqltype & 1 == 1
    }

    /// The subtype; for character data, the low byte is the character set id.
    pub fn subtype(&self) -> i32 {
        self.sqlsubtype
    }

    /// The decimal scale, zero or negative.
    pub fn scale(&self) -> i32 {
        self.sqlscale
    }

    /// The declared length in bytes.
    pub fn len(&self) -> i32 {
        self.sqllen
    }

    /// True if the declared length is zero.
    pub fn is_empty(&self) -> bool {
        self.sqllen == 0
    }

    /// True for character data that is declared with charset `OCTETS`.
    pub fn is_binary(&self) -> bool {
        matches!(SqlType::from_code(self.sqltype), Some(SqlType::Text | SqlType::Varying))
            && self.sqlsubtype & 0xFF == CHARSET_OCTETS
    }

    /// The name of the column in its table, if described.
    pub fn field_name(&self) -> &str {
        &self.field_name
    }

    /// The table name.
    pub fn relation_name(&self) -> &str {
        &self.relation_name
    }

    /// The owner of the table.
    pub fn owner_name(&self) -> &str {
        &self.owner_name
    }

    /// The column label in the statement.
    pub fn alias_name(&self) -> &str {
        &self.alias_name
    }
}

/// The ordered descriptors of a row: the result columns or the parameters
/// of a prepared statement.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize)]
pub struct XSqlDa(Vec<XSqlVar>);

impl XSqlDa {
    /// Creates a descriptor list.
    pub fn new(vars: Vec<XSqlVar>) -> Self {
        Self(vars)
    }

    pub(crate) fn with_len(n: usize) -> Self {
        Self(vec![XSqlVar::default(); n])
    }

    pub(crate) fn get_mut(&mut self, idx: usize) -> Option<&mut XSqlVar> {
        self.0.get_mut(idx)
    }

    /// The column labels, in order.
    pub fn column_names(&self) -> Vec<&str> {
        self.0.iter().map(|v| v.alias_name.as_str()).collect()
    }
}

impl std::ops::Deref for XSqlDa {
    type Target = [XSqlVar];
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl std::fmt::Display for XSqlDa {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        for var in &self.0 {
            let type_name = SqlType::from_code(var.sqltype)
                .map_or_else(|| format!("{}", var.sqltype), |t| format!("{t:?}"));
            write!(f, "{}: {}({}), ", var.alias_name, type_name, var.sqllen)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::{SqlType, XSqlVar};

    #[test]
    fn type_codes() {
        let v = XSqlVar::new(497, 0, 0, 4);
        assert!(v.is_nullable());
        assert_eq!(v.sql_type().unwrap(), SqlType::Long);
        let v = XSqlVar::new(448, 1, 0, 10);
        assert!(!v.is_nullable());
        assert!(v.is_binary());
        assert!(XSqlVar::new(12345, 0, 0, 0).sql_type().is_err());
        for code in [452, 448, 500, 496, 580, 482, 480, 530, 570, 560, 510, 520, 540, 550] {
            assert_eq!(SqlType::from_code(code + 1).unwrap().code(), code);
        }
    }
}
