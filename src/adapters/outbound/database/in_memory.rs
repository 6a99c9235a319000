use crate::explorer::domain::{compare_evr, PackageRecord, Reldep};
use crate::ports::outbound::{PackageDatabase, PackageQuery};
use crate::shared::Result;
use regex::Regex;
use std::sync::Arc;

/// InMemoryPackageDatabase adapter answering queries over a loaded
/// repository snapshot
///
/// Records are kept sorted by name, architecture and version so every query
/// returns them in the same order.
#[derive(Debug, Clone, Default)]
pub struct InMemoryPackageDatabase {
    records: Vec<Arc<PackageRecord>>,
}

impl InMemoryPackageDatabase {
    pub fn new(records: Vec<PackageRecord>) -> Self {
        let mut records: Vec<Arc<PackageRecord>> = records.into_iter().map(Arc::new).collect();
        records.sort_by(|a, b| {
            a.name
                .cmp(&b.name)
                .then_with(|| a.arch.cmp(&b.arch))
                .then_with(|| compare_evr(&a.evr(), &b.evr()))
        });
        records.dedup_by(|a, b| a.id() == b.id());
        Self { records }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    fn in_arches<'a>(
        &'a self,
        arches: &'a [String],
    ) -> impl Iterator<Item = &'a Arc<PackageRecord>> + 'a {
        self.records
            .iter()
            .filter(move |pkg| arches.is_empty() || arches.contains(&pkg.arch))
    }

    fn provides(pkg: &PackageRecord, wanted: &Reldep) -> bool {
        // every package implicitly provides its own name at its own EVR
        if wanted.name() == pkg.name && wanted.accepts_evr(&pkg.evr()) {
            return true;
        }
        pkg.provides
            .iter()
            .any(|provide| wanted.is_satisfied_by(&Reldep::parse(provide)))
    }

    fn requires(pkg: &PackageRecord, relation: &Reldep) -> bool {
        pkg.requires
            .iter()
            .any(|require| Reldep::parse(require).is_satisfied_by(relation))
    }

    /// `name.arch`, `name-version`, `name-version-release` and the full
    /// `name-[epoch:]version-release.arch` forms
    fn matches_nevra(pkg: &PackageRecord, subject: &str) -> bool {
        let name_version = format!("{}-{}", pkg.name, pkg.version);
        let name_evr = format!("{}-{}", pkg.name, pkg.evr());
        subject == format!("{}.{}", pkg.name, pkg.arch)
            || subject == name_version
            || subject == name_evr
            || subject == pkg.id().as_str()
    }

    fn glob(pattern: &str) -> Result<Regex> {
        let mut expr = String::from("^");
        for c in pattern.chars() {
            match c {
                '*' => expr.push_str(".*"),
                '?' => expr.push('.'),
                c => expr.push_str(&regex::escape(&c.to_string())),
            }
        }
        expr.push('$');
        Regex::new(&expr).map_err(|e| anyhow::anyhow!("Invalid subject pattern '{}': {}", pattern, e))
    }
}

impl PackageDatabase for InMemoryPackageDatabase {
    fn query(&self, query: &PackageQuery) -> Result<Vec<Arc<PackageRecord>>> {
        let provides = query.provides.as_deref().map(Reldep::parse);
        let requires = query.requires.as_deref().map(Reldep::parse);

        Ok(self
            .in_arches(&query.arches)
            .filter(|pkg| query.name.as_ref().is_none_or(|name| &pkg.name == name))
            .filter(|pkg| provides.as_ref().is_none_or(|p| Self::provides(pkg, p)))
            .filter(|pkg| requires.as_ref().is_none_or(|r| Self::requires(pkg, r)))
            .cloned()
            .collect())
    }

    fn best_match(&self, subject: &str, arches: &[String]) -> Result<Vec<Arc<PackageRecord>>> {
        let subject = subject.trim();
        if subject.is_empty() {
            return Ok(Vec::new());
        }

        let by_name: Vec<_> = self
            .in_arches(arches)
            .filter(|pkg| pkg.name == subject)
            .cloned()
            .collect();
        if !by_name.is_empty() {
            return Ok(by_name);
        }

        if subject.contains(['*', '?']) {
            let pattern = Self::glob(subject)?;
            return Ok(self
                .in_arches(arches)
                .filter(|pkg| pattern.is_match(&pkg.name))
                .cloned()
                .collect());
        }

        let by_nevra: Vec<_> = self
            .in_arches(arches)
            .filter(|pkg| Self::matches_nevra(pkg, subject))
            .cloned()
            .collect();
        if !by_nevra.is_empty() {
            return Ok(by_nevra);
        }

        self.query(&PackageQuery::providing(subject, arches))
    }
}
