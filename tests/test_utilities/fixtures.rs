use pkg_explorer::prelude::*;

/// A small Fedora-like repository: the SciPy stack, two zlib providers
/// and their build sources
pub fn scipy_repository() -> Vec<PackageRecord> {
    vec![
        PackageRecord::new("python3-scipy", "1.5.2", "2.fc33", "x86_64")
            .with_source("scipy")
            .with_requires(&["python3-numpy", "libz.so.1", "glibc"])
            .with_recommends(&["python3-pillow"]),
        PackageRecord::new("scipy", "1.5.2", "2.fc33", "src"),
        PackageRecord::new("python3-numpy", "1.19.4", "1.fc33", "x86_64")
            .with_source("numpy")
            .with_requires(&["glibc"]),
        PackageRecord::new("numpy", "1.19.4", "1.fc33", "src"),
        PackageRecord::new("python3-pillow", "8.0.1", "1.fc33", "x86_64").with_source("pillow"),
        PackageRecord::new("pillow", "8.0.1", "1.fc33", "src"),
        PackageRecord::new("zlib", "1.2.11", "23.fc33", "x86_64")
            .with_source("zlib")
            .with_provides(&["libz.so.1"]),
        PackageRecord::new("zlib-ng-compat", "2.0.2", "1.fc33", "x86_64")
            .with_source("zlib-ng")
            .with_provides(&["libz.so.1"]),
        PackageRecord::new("glibc", "2.32", "1.fc33", "x86_64").with_source("glibc"),
        PackageRecord::new("glibc", "2.32", "1.fc33", "src"),
        PackageRecord::new("texlive", "2020", "1.fc33", "noarch").with_source("texlive"),
        PackageRecord::new("kernel", "5.9.8", "200.fc33", "src"),
    ]
}

/// `scipy.yaml`: the SciPy stack for eln, not wanting texlive or kernel
pub fn scipy_workload() -> WorkloadDefinition {
    let mut definition = WorkloadDefinition::new("scipy.yaml");
    definition.name = Some("SciPy stack".to_string());
    definition.labels = vec!["eln".to_string()];
    definition.packages = vec!["python3-scipy".to_string()];
    definition.unwanted_packages = vec!["texlive".to_string()];
    definition.unwanted_source_packages = vec!["kernel".to_string()];
    definition
}

/// `base.yaml`: glibc for c9s only
pub fn base_workload() -> WorkloadDefinition {
    let mut definition = WorkloadDefinition::new("base.yaml");
    definition.name = Some("Base".to_string());
    definition.labels = vec!["c9s".to_string()];
    definition.packages = vec!["glibc".to_string()];
    definition
}
