use serde::Deserialize;
use std::fmt;

/// Architecture name used by source packages
pub const SOURCE_ARCH: &str = "src";

/// Architecture name of architecture-independent packages
pub const NOARCH: &str = "noarch";

/// Identity of a package record: `name-[epoch:]version-release.arch`
///
/// Two records with the same NEVRA are the same package, regardless of how
/// many times the database returned them.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PackageId(String);

impl PackageId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PackageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A package record as returned by the package database
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PackageRecord {
    pub name: String,
    #[serde(default)]
    pub epoch: u32,
    pub version: String,
    pub release: String,
    pub arch: String,
    /// Name of the source package this binary was built from.
    /// Source packages themselves have none.
    #[serde(default)]
    pub source_name: Option<String>,
    #[serde(default)]
    pub requires: Vec<String>,
    #[serde(default)]
    pub recommends: Vec<String>,
    #[serde(default)]
    pub suggests: Vec<String>,
    #[serde(default)]
    pub provides: Vec<String>,
}

impl PackageRecord {
    pub fn new(name: &str, version: &str, release: &str, arch: &str) -> Self {
        Self {
            name: name.to_string(),
            epoch: 0,
            version: version.to_string(),
            release: release.to_string(),
            arch: arch.to_string(),
            source_name: None,
            requires: Vec::new(),
            recommends: Vec::new(),
            suggests: Vec::new(),
            provides: Vec::new(),
        }
    }

    pub fn with_source(mut self, source_name: &str) -> Self {
        self.source_name = Some(source_name.to_string());
        self
    }

    pub fn with_requires(mut self, requires: &[&str]) -> Self {
        self.requires = requires.iter().map(|r| r.to_string()).collect();
        self
    }

    pub fn with_recommends(mut self, recommends: &[&str]) -> Self {
        self.recommends = recommends.iter().map(|r| r.to_string()).collect();
        self
    }

    pub fn with_suggests(mut self, suggests: &[&str]) -> Self {
        self.suggests = suggests.iter().map(|r| r.to_string()).collect();
        self
    }

    pub fn with_provides(mut self, provides: &[&str]) -> Self {
        self.provides = provides.iter().map(|r| r.to_string()).collect();
        self
    }

    /// `[epoch:]version-release`, epoch omitted when zero
    pub fn evr(&self) -> String {
        if self.epoch == 0 {
            format!("{}-{}", self.version, self.release)
        } else {
            format!("{}:{}-{}", self.epoch, self.version, self.release)
        }
    }

    pub fn id(&self) -> PackageId {
        PackageId(format!("{}-{}.{}", self.name, self.evr(), self.arch))
    }

    pub fn is_source(&self) -> bool {
        self.arch == SOURCE_ARCH
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_package_id_without_epoch() {
        let pkg = PackageRecord::new("python3-scipy", "1.5.2", "2.fc33", "x86_64");
        assert_eq!(pkg.id().as_str(), "python3-scipy-1.5.2-2.fc33.x86_64");
        assert_eq!(pkg.evr(), "1.5.2-2.fc33");
    }

    #[test]
    fn test_package_id_with_epoch() {
        let mut pkg = PackageRecord::new("perl", "5.32.0", "1.fc33", "x86_64");
        pkg.epoch = 4;
        assert_eq!(pkg.id().as_str(), "perl-4:5.32.0-1.fc33.x86_64");
    }

    #[test]
    fn test_package_id_equality_is_by_nevra() {
        let a = PackageRecord::new("bash", "5.0", "1", "x86_64");
        let b = PackageRecord::new("bash", "5.0", "1", "x86_64").with_requires(&["glibc"]);
        assert_eq!(a.id(), b.id());
        assert_ne!(a.id(), PackageRecord::new("bash", "5.0", "1", "i686").id());
    }

    #[test]
    fn test_is_source() {
        assert!(PackageRecord::new("scipy", "1.5.2", "2", SOURCE_ARCH).is_source());
        assert!(!PackageRecord::new("scipy", "1.5.2", "2", NOARCH).is_source());
    }
}
