use crate::error::{BumpError, Result};
use regex::Regex;
use std::fmt;
use std::str::FromStr;

/// A `MAJOR.MINOR.PATCH` version as stored in the version file
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Version {
    pub major: u64,
    pub minor: u64,
    pub patch: u64,
}

impl Version {
    /// Create a new version
    pub fn new(major: u64, minor: u64, patch: u64) -> Self {
        Version {
            major,
            minor,
            patch,
        }
    }

    /// Parse the contents of a version file (e.g., "2.3.1\n" -> Version(2,3,1))
    ///
    /// Surrounding whitespace is ignored. Anything other than exactly three
    /// numeric components is rejected.
    pub fn parse(content: &str) -> Result<Self> {
        let trimmed = content.trim();

        let re = Regex::new(r"^([0-9]+)\.([0-9]+)\.([0-9]+)$")
            .map_err(|e| BumpError::version(format!("Invalid version pattern: {}", e)))?;
        let captures = re.captures(trimmed).ok_or_else(|| {
            BumpError::version(format!(
                "Invalid version format: '{}' - expected X.Y.Z",
                trimmed
            ))
        })?;

        let component = |index: usize, name: &str| -> Result<u64> {
            let raw = &captures[index];
            raw.parse::<u64>()
                .map_err(|_| BumpError::version(format!("Invalid {} version: {}", name, raw)))
        };

        Ok(Version {
            major: component(1, "major")?,
            minor: component(2, "minor")?,
            patch: component(3, "patch")?,
        })
    }

    /// Bump the selected component by one
    ///
    /// The other components are left untouched: a minor bump does not
    /// reset the patch number.
    pub fn bump(&self, bump_type: VersionBump) -> Result<Self> {
        let overflow = || BumpError::version(format!("Cannot bump {}: component overflow", self));

        match bump_type {
            VersionBump::Minor => Ok(Version {
                minor: self.minor.checked_add(1).ok_or_else(overflow)?,
                ..*self
            }),
            VersionBump::Patch => Ok(Version {
                patch: self.patch.checked_add(1).ok_or_else(overflow)?,
                ..*self
            }),
        }
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
    }
}

/// Which component of the version a bump increments
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VersionBump {
    Minor,
    Patch,
}

impl VersionBump {
    pub fn as_str(&self) -> &'static str {
        match self {
            VersionBump::Minor => "minor",
            VersionBump::Patch => "patch",
        }
    }
}

impl fmt::Display for VersionBump {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for VersionBump {
    type Err = BumpError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "minor" => Ok(VersionBump::Minor),
            "patch" => Ok(VersionBump::Patch),
            other => Err(BumpError::InvalidComponent(other.to_string())),
        }
    }
}
