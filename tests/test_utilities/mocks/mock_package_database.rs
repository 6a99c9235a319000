use pkg_explorer::prelude::*;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// Mock PackageDatabase counting calls, optionally failing every call
pub struct MockPackageDatabase {
    inner: InMemoryPackageDatabase,
    query_calls: AtomicUsize,
    best_match_calls: AtomicUsize,
    should_fail: bool,
}

impl MockPackageDatabase {
    pub fn new(records: Vec<PackageRecord>) -> Self {
        Self {
            inner: InMemoryPackageDatabase::new(records),
            query_calls: AtomicUsize::new(0),
            best_match_calls: AtomicUsize::new(0),
            should_fail: false,
        }
    }

    pub fn with_failure() -> Self {
        Self {
            should_fail: true,
            ..Self::new(Vec::new())
        }
    }

    pub fn query_count(&self) -> usize {
        self.query_calls.load(Ordering::SeqCst)
    }

    pub fn best_match_count(&self) -> usize {
        self.best_match_calls.load(Ordering::SeqCst)
    }

    pub fn total_calls(&self) -> usize {
        self.query_count() + self.best_match_count()
    }
}

impl PackageDatabase for MockPackageDatabase {
    fn query(&self, query: &PackageQuery) -> Result<Vec<Arc<PackageRecord>>> {
        self.query_calls.fetch_add(1, Ordering::SeqCst);
        if self.should_fail {
            anyhow::bail!("Mock package database failure");
        }
        self.inner.query(query)
    }

    fn best_match(&self, subject: &str, arches: &[String]) -> Result<Vec<Arc<PackageRecord>>> {
        self.best_match_calls.fetch_add(1, Ordering::SeqCst);
        if self.should_fail {
            anyhow::bail!("Mock package database failure");
        }
        self.inner.best_match(subject, arches)
    }
}
