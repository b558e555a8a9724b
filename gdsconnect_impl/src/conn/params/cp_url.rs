use crate::protocol::Charset;
use crate::url;

pub(crate) struct UrlParts<'a> {
    pub host: &'a str,
    pub port: u16,
    pub database: &'a str,
    pub user: &'a str,
    pub charset: Charset,
    pub role: Option<&'a str>,
    pub dialect: i32,
    pub compression: bool,
    pub connector: &'a str,
}

// Writes the URL form of connect parameters, without password.
// Options with default values are omitted.
pub(crate) fn format_as_url(p: &UrlParts, f: &mut std::fmt::Formatter) -> std::fmt::Result {
    write!(f, "{}://", url::FIREBIRD)?;
    if !p.user.is_empty() {
        write!(f, "{}@", p.user)?;
    }
    write!(f, "{}", p.host)?;
    if p.port != url::DEFAULT_PORT {
        write!(f, ":{}", p.port)?;
    }
    write!(f, "/{}", p.database)?;

    let mut sep = std::iter::once("?").chain(std::iter::repeat("&"));
    let mut next_sep = || sep.next().unwrap_or("&");
    if p.charset != Charset::default() {
        write!(f, "{}{}={}", next_sep(), UrlOpt::Charset, p.charset.name())?;
    }
    if let Some(role) = p.role {
        write!(f, "{}{}={role}", next_sep(), UrlOpt::Role)?;
    }
    if p.dialect != crate::ConnectParams::DEFAULT_DIALECT {
        write!(f, "{}{}={}", next_sep(), UrlOpt::Dialect, p.dialect)?;
    }
    if p.compression {
        write!(f, "{}{}", next_sep(), UrlOpt::Compression)?;
    }
    if p.connector != crate::ConnectParams::DEFAULT_CONNECTOR {
        write!(f, "{}{}={}", next_sep(), UrlOpt::Connector, p.connector)?;
    }
    Ok(())
}

pub(crate) enum UrlOpt {
    Charset,
    Role,
    Dialect,
    Compression,
    Connector,
}

impl UrlOpt {
    pub fn from(s: &str) -> Option<Self> {
        match s {
            url::CHARSET => Some(UrlOpt::Charset),
            url::ROLE => Some(UrlOpt::Role),
            url::DIALECT => Some(UrlOpt::Dialect),
            url::COMPRESSION => Some(UrlOpt::Compression),
            url::CONNECTOR => Some(UrlOpt::Connector),
            _ => None,
        }
    }
}

impl std::fmt::Display for UrlOpt {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                UrlOpt::Charset => url::CHARSET,
                UrlOpt::Role => url::ROLE,
                UrlOpt::Dialect => url::DIALECT,
                UrlOpt::Compression => url::COMPRESSION,
                UrlOpt::Connector => url::CONNECTOR,
            }
        )
    }
}
