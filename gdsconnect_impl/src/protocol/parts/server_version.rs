use crate::isc::info;
use crate::protocol::util::InfoReader;
use crate::{FbError, FbResult};

/// The version of the server, as reported by `isc_info_isc_version`.
///
/// A version string looks like `WI-V3.0.10.33601 Firebird 3.0`: a platform code,
/// the server type, four version numbers, and the server name.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct ServerVersion {
    full: String,
    platform: String,
    server_type: String,
    major: u32,
    minor: u32,
    variant: u32,
    build: u32,
    server_name: String,
    extended: Vec<String>,
}

impl ServerVersion {
    /// Parses a version string.
    ///
    /// # Errors
    ///
    /// `FbError::Negotiation` if the string does not have the expected format.
    pub fn parse(s: &str) -> FbResult<Self> {
        let bad = || FbError::Negotiation(format!("unparseable server version {s:?}"));

        let (version, server_name) = s.trim().split_once(' ').ok_or_else(bad)?;
        let (platform, rest) = version.split_once('-').ok_or_else(bad)?;
        if platform.len() != 2 || !rest.is_char_boundary(1) {
            return Err(bad());
        }
        let (server_type, numbers) = rest.split_at(1);
        let mut numbers = numbers.split('.').map(str::parse::<u32>);
        let mut next = || numbers.next().and_then(Result::ok).ok_or_else(bad);
        let (major, minor, variant, build) = (next()?, next()?, next()?, next()?);
        if numbers.next().is_some() {
            return Err(bad());
        }

        Ok(Self {
            full: s.trim().to_string(),
            platform: platform.to_string(),
            server_type: server_type.to_string(),
            major,
            minor,
            variant,
            build,
            server_name: server_name.trim().to_string(),
            extended: Vec::new(),
        })
    }

    // Parses an info response for isc_info_isc_version: a count byte, then length-prefixed
    // strings; the first one is the server's version, the others describe further
    // components of a remote connection.
    pub(crate) fn parse_info(buffer: &[u8]) -> FbResult<Self> {
        for cluster in InfoReader::new(buffer) {
            let (item, value) = cluster?;
            if item != info::ISC_VERSION {
                continue;
            }
            let mut strings = Vec::new();
            let count = value.first().copied().unwrap_or(0);
            let mut pos = 1;
            for _ in 0..count {
                let len = usize::from(*value.get(pos).ok_or(FbError::Impl(
                    "truncated isc_info_isc_version response",
                ))?);
                let bytes = value
                    .get(pos + 1..pos + 1 + len)
                    .ok_or(FbError::Impl("truncated isc_info_isc_version response"))?;
                strings.push(String::from_utf8_lossy(bytes).into_owned());
                pos += 1 + len;
            }
            let mut strings = strings.into_iter();
            let mut version = Self::parse(&strings.next().ok_or_else(|| {
                FbError::Negotiation("server sent no version string".to_string())
            })?)?;
            version.extended = strings.collect();
            return Ok(version);
        }
        Err(FbError::Negotiation(
            "server did not report its version".to_string(),
        ))
    }

    /// The complete version string.
    pub fn full(&self) -> &str {
        &self.full
    }

    /// The platform code, e.g. `WI` or `LI`.
    pub fn platform(&self) -> &str {
        &self.platform
    }

    /// The server type, e.g. `V` for a production build or `T` for a test build.
    pub fn server_type(&self) -> &str {
        &self.server_type
    }

    /// Major version.
    pub fn major(&self) -> u32 {
        self.major
    }

    /// Minor version.
    pub fn minor(&self) -> u32 {
        self.minor
    }

    /// Variant.
    pub fn variant(&self) -> u32 {
        self.variant
    }

    /// Build number.
    pub fn build(&self) -> u32 {
        self.build
    }

    /// The server name, e.g. `Firebird 3.0`.
    pub fn server_name(&self) -> &str {
        &self.server_name
    }

    /// Further version strings that the server reported.
    pub fn extended(&self) -> &[String] {
        &self.extended
    }

    /// True if the version is at least `major.minor`.
    pub fn is_at_least(&self, major: u32, minor: u32) -> bool {
        (self.major, self.minor) >= (major, minor)
    }
}

impl std::fmt::Display for ServerVersion {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", self.full)
    }
}
