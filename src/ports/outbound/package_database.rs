use crate::explorer::domain::PackageRecord;
use crate::shared::Result;
use std::sync::Arc;

/// Filter for a package database lookup.
///
/// Every set field narrows the result; an empty `arches` list means
/// "any architecture".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PackageQuery {
    pub name: Option<String>,
    pub arches: Vec<String>,
    /// Relation the package must provide (`name [op evr]`)
    pub provides: Option<String>,
    /// Relation the package must require (reverse lookup)
    pub requires: Option<String>,
}

impl PackageQuery {
    pub fn named(name: &str, arches: &[String]) -> Self {
        Self {
            name: Some(name.to_string()),
            arches: arches.to_vec(),
            ..Self::default()
        }
    }

    pub fn providing(reldep: &str, arches: &[String]) -> Self {
        Self {
            provides: Some(reldep.to_string()),
            arches: arches.to_vec(),
            ..Self::default()
        }
    }

    pub fn requiring(reldep: &str, arches: &[String]) -> Self {
        Self {
            requires: Some(reldep.to_string()),
            arches: arches.to_vec(),
            ..Self::default()
        }
    }
}

/// PackageDatabase port for querying available packages
///
/// This port abstracts the repository metadata the tree is built from.
/// Calls are synchronous; the node tree memoizes their results per node.
pub trait PackageDatabase {
    /// Returns the available packages matching every field of `query`
    ///
    /// # Returns
    /// Matching records in a deterministic order; an empty list is not an error
    ///
    /// # Errors
    /// Returns an error only if the backing store cannot be consulted
    fn query(&self, query: &PackageQuery) -> Result<Vec<Arc<PackageRecord>>>;

    /// Resolves a free-text subject (a name, a glob, or a provide) to its
    /// best-matching packages, restricted to `arches`
    ///
    /// # Errors
    /// Returns an error only if the backing store cannot be consulted
    fn best_match(&self, subject: &str, arches: &[String]) -> Result<Vec<Arc<PackageRecord>>>;
}

impl<T: PackageDatabase + ?Sized> PackageDatabase for &T {
    fn query(&self, query: &PackageQuery) -> Result<Vec<Arc<PackageRecord>>> {
        (**self).query(query)
    }

    fn best_match(&self, subject: &str, arches: &[String]) -> Result<Vec<Arc<PackageRecord>>> {
        (**self).best_match(subject, arches)
    }
}
