//! Semantic version model
//!
//! Versions follow semver.org precedence: numeric core, then pre-release
//! identifiers, with build metadata ignored for ordering and equality.
//! See https://semver.org/#spec-item-11

use crate::domain::MajorMinor;
use crate::error::{MinVerError, Result};
use regex::Regex;
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;
use std::sync::LazyLock;

static VERSION_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(concat!(
        r"^(0|[1-9][0-9]*)\.(0|[1-9][0-9]*)\.(0|[1-9][0-9]*)",
        r"(?:-((?:0|[1-9][0-9]*|[0-9]*[A-Za-z-][0-9A-Za-z-]*)",
        r"(?:\.(?:0|[1-9][0-9]*|[0-9]*[A-Za-z-][0-9A-Za-z-]*))*))?",
        r"(?:\+([0-9A-Za-z-]+(?:\.[0-9A-Za-z-]+)*))?$",
    ))
    .expect("version pattern is a valid regex")
});

/// A single dot-separated pre-release identifier
///
/// Variant order matters: numeric identifiers always sort below
/// alphanumeric ones, so the derived `Ord` is the semver precedence rule.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Identifier {
    Numeric(u64),
    AlphaNumeric(String),
}

impl Identifier {
    /// Parse one identifier, rejecting empty text, characters outside
    /// `[0-9A-Za-z-]`, and numeric identifiers with leading zeros
    pub fn parse(s: &str) -> Result<Self> {
        s.parse()
    }
}

impl FromStr for Identifier {
    type Err = MinVerError;

    fn from_str(s: &str) -> Result<Self> {
        let invalid = || {
            MinVerError::config(format!(
                "Invalid pre-release identifier '{}'. Identifiers must be non-empty, \
                 contain only [0-9A-Za-z-], and numeric identifiers must not have leading zeros.",
                s
            ))
        };

        if s.is_empty() || !s.chars().all(|c| c.is_ascii_alphanumeric() || c == '-') {
            return Err(invalid());
        }

        if s.chars().all(|c| c.is_ascii_digit()) {
            if s.len() > 1 && s.starts_with('0') {
                return Err(invalid());
            }
            return s.parse::<u64>().map(Identifier::Numeric).map_err(|_| invalid());
        }

        Ok(Identifier::AlphaNumeric(s.to_string()))
    }
}

impl From<u64> for Identifier {
    fn from(value: u64) -> Self {
        Identifier::Numeric(value)
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Identifier::Numeric(n) => write!(f, "{}", n),
            Identifier::AlphaNumeric(s) => write!(f, "{}", s),
        }
    }
}

/// Semantic version representation
///
/// Equality, hashing and ordering ignore `build_metadata`.
#[derive(Debug, Clone)]
pub struct Version {
    pub major: u64,
    pub minor: u64,
    pub patch: u64,
    pub pre_release: Vec<Identifier>,
    pub build_metadata: Option<String>,
}

impl Version {
    /// Create a release version
    pub fn new(major: u64, minor: u64, patch: u64) -> Self {
        Version {
            major,
            minor,
            patch,
            pre_release: Vec::new(),
            build_metadata: None,
        }
    }

    /// Parse a version from tag text, requiring `prefix` to be present
    ///
    /// An empty prefix means no prefix is required. Returns `None` for
    /// anything that is not a valid version once the prefix is removed.
    ///
    /// # Example
    /// ```
    /// # use minver::domain::Version;
    /// assert_eq!(Version::parse("v1.2.3", "v"), Some(Version::new(1, 2, 3)));
    /// assert_eq!(Version::parse("1.2.3", "v"), None);
    /// assert_eq!(Version::parse("V1.2.3", "v"), None);
    /// ```
    pub fn parse(text: &str, prefix: &str) -> Option<Self> {
        let unprefixed = text.strip_prefix(prefix)?;
        let captures = VERSION_PATTERN.captures(unprefixed)?;

        let major = captures.get(1)?.as_str().parse::<u64>().ok()?;
        let minor = captures.get(2)?.as_str().parse::<u64>().ok()?;
        let patch = captures.get(3)?.as_str().parse::<u64>().ok()?;

        let pre_release = match captures.get(4) {
            Some(m) => m
                .as_str()
                .split('.')
                .map(|id| id.parse::<Identifier>().ok())
                .collect::<Option<Vec<_>>>()?,
            None => Vec::new(),
        };

        let build_metadata = captures.get(5).map(|m| m.as_str().to_string());

        Some(Version {
            major,
            minor,
            patch,
            pre_release,
            build_metadata,
        })
    }

    /// Replace the pre-release identifiers
    pub fn with_pre_release(mut self, pre_release: Vec<Identifier>) -> Self {
        self.pre_release = pre_release;
        self
    }

    /// Replace the build metadata
    pub fn with_build_metadata(mut self, build_metadata: Option<String>) -> Self {
        self.build_metadata = build_metadata;
        self
    }

    /// A version without pre-release identifiers
    pub fn is_release(&self) -> bool {
        self.pre_release.is_empty()
    }

    pub fn major_minor(&self) -> MajorMinor {
        MajorMinor::new(self.major, self.minor)
    }

    /// Increment one part of the numeric core, zeroing less significant parts
    ///
    /// The result is always a release version without build metadata. Fails
    /// when the part is already `u64::MAX`, since no higher version exists.
    pub fn bump(&self, part: VersionPart) -> Result<Self> {
        let next = |n: u64| {
            n.checked_add(1)
                .ok_or_else(|| MinVerError::version_overflow(self.to_string(), part))
        };
        let bumped = match part {
            VersionPart::Major => Version::new(next(self.major)?, 0, 0),
            VersionPart::Minor => Version::new(self.major, next(self.minor)?, 0),
            VersionPart::Patch => Version::new(self.major, self.minor, next(self.patch)?),
        };
        Ok(bumped)
    }

    /// Append the height as a new trailing numeric identifier
    ///
    /// The height never merges into an existing numeric identifier, so
    /// `1.0.0-beta.1` at height 3 becomes `1.0.0-beta.1.3`.
    pub fn with_height(mut self, height: usize) -> Self {
        self.pre_release.push(Identifier::from(height as u64));
        self
    }
}

/// The version used when no tag has been found: `0.0.0-alpha.0`
impl Default for Version {
    fn default() -> Self {
        Version::new(0, 0, 0).with_pre_release(vec![
            Identifier::AlphaNumeric("alpha".to_string()),
            Identifier::Numeric(0),
        ])
    }
}

impl FromStr for Version {
    type Err = MinVerError;

    fn from_str(s: &str) -> Result<Self> {
        Version::parse(s, "").ok_or_else(|| MinVerError::invalid_version(s))
    }
}

impl PartialEq for Version {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Version {}

impl Hash for Version {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.major.hash(state);
        self.minor.hash(state);
        self.patch.hash(state);
        self.pre_release.hash(state);
    }
}

impl PartialOrd for Version {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Version {
    fn cmp(&self, other: &Self) -> Ordering {
        self.major
            .cmp(&other.major)
            .then(self.minor.cmp(&other.minor))
            .then(self.patch.cmp(&other.patch))
            .then_with(|| {
                match (self.pre_release.is_empty(), other.pre_release.is_empty()) {
                    (true, true) => Ordering::Equal,
                    (true, false) => Ordering::Greater,
                    (false, true) => Ordering::Less,
                    // Vec ordering is lexicographic and a strict prefix sorts first
                    (false, false) => self.pre_release.cmp(&other.pre_release),
                }
            })
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)?;

        if let Some((first, rest)) = self.pre_release.split_first() {
            write!(f, "-{}", first)?;
            for id in rest {
                write!(f, ".{}", id)?;
            }
        }

        if let Some(meta) = &self.build_metadata {
            write!(f, "+{}", meta)?;
        }

        Ok(())
    }
}

/// The part of a version bumped when height is added to a release tag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum VersionPart {
    Major,
    Minor,
    #[default]
    Patch,
}

impl VersionPart {
    pub const VALID_VALUES: &'static str = "major, minor, patch (case insensitive)";
}

impl FromStr for VersionPart {
    type Err = MinVerError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "major" => Ok(VersionPart::Major),
            "minor" => Ok(VersionPart::Minor),
            "patch" => Ok(VersionPart::Patch),
            _ => Err(MinVerError::config(format!(
                "Invalid version part '{}'. Valid values are {}.",
                s,
                VersionPart::VALID_VALUES
            ))),
        }
    }
}

impl fmt::Display for VersionPart {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VersionPart::Major => write!(f, "major"),
            VersionPart::Minor => write!(f, "minor"),
            VersionPart::Patch => write!(f, "patch"),
        }
    }
}
