/// Error when a string is not a platform slug.
#[derive(Debug)]
pub struct InvalidPlatformError(pub String);

impl std::error::Error for InvalidPlatformError {}

impl std::fmt::Display for InvalidPlatformError {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "'{}' is not a valid platform", self.0)
    }
}

/// The platform a player is looked up on
#[derive(Debug, Clone, Copy, Eq, PartialEq, serde::Deserialize, serde::Serialize)]
#[serde(try_from = "String")]
#[serde(into = "String")]
pub enum Platform {
    /// Pc players
    Pc,

    /// Xbox Live players
    Xbl,

    /// Playstation Network players
    Psn,
}

impl Platform {
    /// The slug the api's urls use for this platform
    pub fn as_str(self) -> &'static str {
        match self {
            Platform::Pc => "pc",
            Platform::Xbl => "xbl",
            Platform::Psn => "psn",
        }
    }
}

impl Default for Platform {
    fn default() -> Self {
        Platform::Pc
    }
}

impl std::fmt::Display for Platform {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Platform {
    type Err = InvalidPlatformError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "pc" => Ok(Platform::Pc),
            "xbl" => Ok(Platform::Xbl),
            "psn" => Ok(Platform::Psn),
            _ => Err(InvalidPlatformError(s.to_string())),
        }
    }
}

impl TryFrom<String> for Platform {
    type Error = InvalidPlatformError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<Platform> for String {
    fn from(platform: Platform) -> Self {
        platform.as_str().to_string()
    }
}
