//! core::version
//!
//! Semantic version model for documentation directories.
//!
//! # Normalization
//!
//! Every version that is stored or compared has passed through
//! [`Version::normalize`]. Raw directory names and manifest strings are
//! never compared directly. The canonical form is
//! `vMAJOR.MINOR.PATCH[-PRERELEASE]`:
//!
//! - A missing leading `v` is accepted, as are missing minor/patch parts.
//! - Build metadata is dropped.
//! - Prerelease identifiers are kept verbatim, joined by dots.
//!
//! # Aliases
//!
//! Each version classifies as either [`Alias::Stable`] or [`Alias::Dev`].
//! Explicit pins always win; otherwise a version `>= v1.0.0` without a
//! prerelease is stable and everything else is dev.
//!
//! # Example
//!
//! ```
//! use docversions::core::version::{Alias, AliasPins, Version};
//!
//! let v = Version::normalize("1.2").unwrap();
//! assert_eq!(v.as_str(), "v1.2.0");
//! assert_eq!(v.minor().to_string(), "v1.2");
//!
//! let pins = AliasPins::default();
//! assert_eq!(pins.classify(&v), Alias::Stable);
//! assert_eq!(pins.classify(&Version::normalize("v2.0.0-rc.1").unwrap()), Alias::Dev);
//! ```

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use semver::{BuildMetadata, Prerelease};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Longest digit run accepted for a single version component.
const MAX_COMPONENT_DIGITS: usize = 16;

/// Errors from version parsing.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum VersionError {
    #[error("version string is empty")]
    Empty,

    #[error("version is not semantically formatted: {0}")]
    InvalidVersion(String),

    #[error("unknown alias '{0}', expected 'stable' or 'dev'")]
    UnknownAlias(String),
}

/// A normalized semantic version (`vMAJOR.MINOR.PATCH[-PRERELEASE]`).
///
/// Ordering is semver precedence: a prerelease sorts below its release and
/// build metadata never participates (it is stripped during normalization).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Version {
    semver: semver::Version,
    text: String,
}

impl Version {
    /// Loosely parse and normalize a version string.
    ///
    /// # Errors
    ///
    /// Returns [`VersionError::Empty`] for a blank string and
    /// [`VersionError::InvalidVersion`] when no numeric version core can be
    /// found anywhere in `raw`.
    ///
    /// # Example
    ///
    /// ```
    /// use docversions::core::version::Version;
    ///
    /// assert_eq!(Version::normalize("1.0.0").unwrap().as_str(), "v1.0.0");
    /// assert_eq!(Version::normalize("v2.1.0-beta.3+sha.5114f85").unwrap().as_str(), "v2.1.0-beta.3");
    /// assert!(Version::normalize("assets").is_err());
    /// ```
    pub fn normalize(raw: &str) -> Result<Self, VersionError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(VersionError::Empty);
        }

        let (major, minor, patch) =
            coerce(trimmed).ok_or_else(|| VersionError::InvalidVersion(raw.to_string()))?;

        // Prerelease tags only survive when the whole string is a valid
        // (loose) semver; a coerced fragment carries none.
        let pre = parse_loose(trimmed)
            .map(|v| v.pre)
            .unwrap_or(Prerelease::EMPTY);

        Ok(Self::from_semver(semver::Version {
            major,
            minor,
            patch,
            pre,
            build: BuildMetadata::EMPTY,
        }))
    }

    fn from_semver(semver: semver::Version) -> Self {
        let text = format!("v{}", semver);
        Self { semver, text }
    }

    /// The canonical string form, always prefixed with `v`.
    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// The underlying semver value.
    pub fn semver(&self) -> &semver::Version {
        &self.semver
    }

    /// Whether this version carries prerelease identifiers.
    pub fn is_prerelease(&self) -> bool {
        !self.semver.pre.is_empty()
    }

    /// The minor version this patch belongs to.
    pub fn minor(&self) -> MinorVersion {
        MinorVersion {
            major: self.semver.major,
            minor: self.semver.minor,
        }
    }
}

impl Ord for Version {
    fn cmp(&self, other: &Self) -> Ordering {
        self.semver.cmp_precedence(&other.semver)
    }
}

impl PartialOrd for Version {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl TryFrom<String> for Version {
    type Error = VersionError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::normalize(&value)
    }
}

impl From<Version> for String {
    fn from(version: Version) -> Self {
        version.text
    }
}

impl FromStr for Version {
    type Err = VersionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::normalize(s)
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

impl AsRef<str> for Version {
    fn as_ref(&self) -> &str {
        &self.text
    }
}

/// A version with the patch dropped (`vMAJOR.MINOR`).
///
/// Derived from a [`Version`], never stored on its own. Only used as the
/// name of the symlink aggregating every patch of a minor release.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MinorVersion {
    pub major: u64,
    pub minor: u64,
}

impl MinorVersion {
    /// Parse a minor-link name such as `v1.2`.
    ///
    /// Only the exact `vMAJOR.MINOR` shape (optional `v`) is accepted, so
    /// full versions and alias names never match.
    pub fn parse_name(name: &str) -> Option<Self> {
        let rest = name.strip_prefix('v').unwrap_or(name);
        let (major, minor) = rest.split_once('.')?;
        let component = |part: &str| -> Option<u64> {
            if part.is_empty() || part.len() > MAX_COMPONENT_DIGITS {
                return None;
            }
            if !part.bytes().all(|b| b.is_ascii_digit()) {
                return None;
            }
            part.parse().ok()
        };
        Some(Self {
            major: component(major)?,
            minor: component(minor)?,
        })
    }

    /// Whether `version` belongs to this minor group (prereleases included).
    pub fn contains(&self, version: &Version) -> bool {
        version.minor() == *self
    }
}

impl fmt::Display for MinorVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "v{}.{}", self.major, self.minor)
    }
}

/// A symbolic alias bound to at most one version.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Alias {
    Stable,
    Dev,
}

impl Alias {
    /// All aliases, in the order they are presented to readers.
    pub const ALL: [Alias; 2] = [Alias::Stable, Alias::Dev];

    /// The alias name, which is also its symlink name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Alias::Stable => "stable",
            Alias::Dev => "dev",
        }
    }
}

impl fmt::Display for Alias {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Alias {
    type Err = VersionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "stable" => Ok(Alias::Stable),
            "dev" => Ok(Alias::Dev),
            other => Err(VersionError::UnknownAlias(other.to_string())),
        }
    }
}

/// An alias override: either decided automatically or pinned to a version.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum VersionPin {
    #[default]
    Auto,
    Exact(Version),
}

impl VersionPin {
    /// Parse `"auto"` (any case) or a version string.
    pub fn parse(raw: &str) -> Result<Self, VersionError> {
        if raw.trim().eq_ignore_ascii_case("auto") {
            Ok(VersionPin::Auto)
        } else {
            Version::normalize(raw).map(VersionPin::Exact)
        }
    }

    /// The pinned version, if any.
    pub fn exact(&self) -> Option<&Version> {
        match self {
            VersionPin::Auto => None,
            VersionPin::Exact(v) => Some(v),
        }
    }
}

impl fmt::Display for VersionPin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VersionPin::Auto => f.write_str("auto"),
            VersionPin::Exact(v) => v.fmt(f),
        }
    }
}

/// The configured `stable`/`dev` overrides.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AliasPins {
    pub stable: VersionPin,
    pub dev: VersionPin,
}

impl AliasPins {
    pub fn new(stable: VersionPin, dev: VersionPin) -> Self {
        Self { stable, dev }
    }

    /// The pin configured for `alias`.
    pub fn pin(&self, alias: Alias) -> &VersionPin {
        match alias {
            Alias::Stable => &self.stable,
            Alias::Dev => &self.dev,
        }
    }

    /// Classify a version as stable or dev.
    ///
    /// A stable pin is checked before a dev pin, so a version pinned to both
    /// classifies as stable.
    pub fn classify(&self, version: &Version) -> Alias {
        if self.stable.exact() == Some(version) {
            Alias::Stable
        } else if self.dev.exact() == Some(version) {
            Alias::Dev
        } else if !version.is_prerelease() && version.semver().major >= 1 {
            Alias::Stable
        } else {
            Alias::Dev
        }
    }

    /// The greatest version in `versions` classifying as `alias`.
    pub fn latest<'a, I>(&self, alias: Alias, versions: I) -> Option<&'a Version>
    where
        I: IntoIterator<Item = &'a Version>,
    {
        versions
            .into_iter()
            .filter(|v| self.classify(v) == alias)
            .max()
    }
}

/// Whether a directory name is a complete (loose) semantic version.
///
/// Unlike [`Version::normalize`], this rejects partial versions such as
/// `v1.2`, so minor-version symlinks and non-version folders like `assets`
/// never count as version directories.
pub fn is_version_name(name: &str) -> bool {
    parse_loose(name).is_some()
}

/// Sort versions descending by precedence and drop duplicates.
pub fn sort_descending(versions: &mut Vec<Version>) {
    versions.sort_by(|a, b| b.cmp(a));
    versions.dedup();
}

/// Parse a full `MAJOR.MINOR.PATCH` version in loose form.
///
/// Tolerates leading `v`, `=` and whitespace, leading zeros in numeric
/// components (`v01.2.3`) and a prerelease without its hyphen
/// (`1.2.3beta` reads as `1.2.3-beta`).
fn parse_loose(raw: &str) -> Option<semver::Version> {
    let mut rest = raw
        .trim()
        .trim_start_matches(|c: char| c == 'v' || c == '=' || c.is_whitespace());

    let mut core = [0u64; 3];
    for (i, slot) in core.iter_mut().enumerate() {
        if i > 0 {
            rest = rest.strip_prefix('.')?;
        }
        let len = rest
            .find(|c: char| !c.is_ascii_digit())
            .unwrap_or(rest.len());
        if len == 0 || len > MAX_COMPONENT_DIGITS {
            return None;
        }
        *slot = rest[..len].parse().ok()?;
        rest = &rest[len..];
    }

    let tail = match rest.chars().next() {
        None | Some('-') | Some('+') => rest.to_string(),
        Some(c) if c.is_ascii_alphabetic() => format!("-{}", rest),
        Some(_) => return None,
    };
    semver::Version::parse(&format!("{}.{}.{}{}", core[0], core[1], core[2], tail)).ok()
}

/// Find the first `MAJOR[.MINOR[.PATCH]]` run of digits in `raw`.
///
/// Missing components default to zero.
fn coerce(raw: &str) -> Option<(u64, u64, u64)> {
    let bytes = raw.as_bytes();
    (0..bytes.len())
        .filter(|&i| bytes[i].is_ascii_digit() && (i == 0 || !bytes[i - 1].is_ascii_digit()))
        .find_map(|i| coerce_at(&raw[i..]))
}

fn coerce_at(s: &str) -> Option<(u64, u64, u64)> {
    let mut parts = [0u64; 3];
    let mut rest = s;

    for (i, slot) in parts.iter_mut().enumerate() {
        if i > 0 {
            match rest.strip_prefix('.') {
                Some(r) if r.starts_with(|c: char| c.is_ascii_digit()) => rest = r,
                _ => break,
            }
        }
        let len = rest
            .find(|c: char| !c.is_ascii_digit())
            .unwrap_or(rest.len());
        if len > MAX_COMPONENT_DIGITS {
            return None;
        }
        *slot = rest[..len].parse().ok()?;
        rest = &rest[len..];
    }

    Some((parts[0], parts[1], parts[2]))
}
