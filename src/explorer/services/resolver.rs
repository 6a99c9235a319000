use crate::explorer::domain::{Node, PackageRecord, RequirementStrength, SOURCE_ARCH};
use crate::ports::outbound::{PackageDatabase, PackageQuery};
use crate::shared::Result;
use std::sync::Arc;

/// DependencyResolver service turning a node's intent into its children
///
/// Only the package database is consulted; workload, label and package
/// children come from data the node already carries.
pub struct DependencyResolver<D> {
    database: D,
    arches: Vec<String>,
}

impl<D: PackageDatabase> DependencyResolver<D> {
    pub fn new(database: D, arches: Vec<String>) -> Self {
        Self { database, arches }
    }

    pub fn arches(&self) -> &[String] {
        &self.arches
    }

    pub fn database(&self) -> &D {
        &self.database
    }

    /// Computes the ordered children of `node`
    ///
    /// Database failures are logged and produce no children.
    pub fn resolve(&self, node: &Node) -> Vec<Node> {
        match node {
            Node::Subject { text } => self.packages(
                self.database.best_match(text, &self.arches),
                "subject",
                text,
            ),
            Node::UnwantedSubject { text, source: true } => self.packages(
                self.database
                    .query(&PackageQuery::named(text, &[SOURCE_ARCH.to_string()])),
                "unwanted source",
                text,
            ),
            Node::UnwantedSubject { text, .. } => self.packages(
                self.database.best_match(text, &self.arches),
                "unwanted subject",
                text,
            ),
            Node::Query { name, arches } => self.packages(
                self.database.query(&PackageQuery::named(name, arches)),
                "query",
                name,
            ),
            Node::Package(pkg) => Self::package_children(pkg),
            Node::Requirement { reldep, .. } => sorted_by_label(self.packages(
                self.database
                    .query(&PackageQuery::providing(reldep, &self.arches)),
                "requirement",
                reldep,
            )),
            Node::Provide { reldep } => sorted_by_label(self.packages(
                self.database
                    .query(&PackageQuery::requiring(reldep, &self.arches)),
                "provide",
                reldep,
            )),
            Node::Workload(definition) => {
                if definition.is_degraded() {
                    return Vec::new();
                }
                let labels = definition
                    .labels
                    .iter()
                    .map(|name| Node::Label { name: name.clone() });
                let wanted = definition
                    .wanted_for(&self.arches)
                    .into_iter()
                    .map(|text| Node::Subject { text });
                let unwanted = definition
                    .unwanted_for(&self.arches)
                    .into_iter()
                    .map(|text| Node::UnwantedSubject {
                        text,
                        source: false,
                    });
                let unwanted_sources =
                    definition
                        .unwanted_source_packages
                        .iter()
                        .map(|text| Node::UnwantedSubject {
                            text: text.clone(),
                            source: true,
                        });
                let placeholders = definition
                    .package_placeholders
                    .iter()
                    .map(|name| Node::Placeholder { name: name.clone() });

                labels
                    .chain(wanted)
                    .chain(unwanted)
                    .chain(unwanted_sources)
                    .chain(placeholders)
                    .collect()
            }
            Node::Root(_) | Node::Label { .. } | Node::Placeholder { .. } | Node::Mod { .. } => {
                Vec::new()
            }
        }
    }

    /// Build source first, then strong requirements sorted by label, then
    /// weak ones (recommends, suggests) in their declared order
    fn package_children(pkg: &PackageRecord) -> Vec<Node> {
        let mut children = Vec::new();
        if let Some(source_name) = &pkg.source_name {
            children.push(Node::Query {
                name: source_name.clone(),
                arches: vec![SOURCE_ARCH.to_string()],
            });
        }

        let mut strong: Vec<&String> = pkg.requires.iter().collect();
        strong.sort();
        children.extend(strong.into_iter().map(|reldep| Node::Requirement {
            reldep: reldep.clone(),
            strength: RequirementStrength::Strong,
        }));

        children.extend(
            pkg.recommends
                .iter()
                .chain(pkg.suggests.iter())
                .map(|reldep| Node::Requirement {
                    reldep: reldep.clone(),
                    strength: RequirementStrength::Weak,
                }),
        );
        children
    }

    fn packages(&self, result: Result<Vec<Arc<PackageRecord>>>, what: &str, text: &str) -> Vec<Node> {
        match result {
            Ok(records) => records.into_iter().map(Node::Package).collect(),
            Err(e) => {
                log::warn!("Lookup of {} '{}' failed, showing no children: {:#}", what, text, e);
                Vec::new()
            }
        }
    }
}

fn sorted_by_label(mut nodes: Vec<Node>) -> Vec<Node> {
    nodes.sort_by_cached_key(|node| node.label());
    nodes
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::outbound::database::InMemoryPackageDatabase;
    use crate::explorer::domain::WorkloadDefinition;

    fn arches() -> Vec<String> {
        vec!["x86_64".to_string(), "noarch".to_string()]
    }

    fn resolver(records: Vec<PackageRecord>) -> DependencyResolver<InMemoryPackageDatabase> {
        DependencyResolver::new(InMemoryPackageDatabase::new(records), arches())
    }

    fn labels(nodes: &[Node]) -> Vec<String> {
        nodes.iter().map(|n| n.label()).collect()
    }

    #[test]
    fn test_package_children_order() {
        let pkg = PackageRecord::new("python3-scipy", "1.5.2", "2", "x86_64")
            .with_source("scipy")
            .with_requires(&["python3-numpy", "libc.so.6", "python3-libs"])
            .with_recommends(&["python3-pillow"])
            .with_suggests(&["python3-pytest", "python3-docs"]);
        let children = resolver(vec![]).resolve(&Node::Package(Arc::new(pkg)));

        assert_eq!(
            labels(&children),
            vec![
                "scipy",
                "libc.so.6",
                "python3-libs",
                "python3-numpy",
                "python3-pillow",
                "python3-pytest",
                "python3-docs",
            ]
        );
        assert!(matches!(&children[0], Node::Query { arches, .. } if arches == &["src"]));
        assert!(matches!(
            &children[4],
            Node::Requirement {
                strength: RequirementStrength::Weak,
                ..
            }
        ));
    }

    #[test]
    fn test_subject_restricted_to_arches() {
        let r = resolver(vec![
            PackageRecord::new("scipy", "1.5.2", "2", "src"),
            PackageRecord::new("python3-scipy", "1.5.2", "2", "x86_64"),
            PackageRecord::new("python3-scipy", "1.5.2", "2", "i686"),
        ]);
        let children = r.resolve(&Node::Subject {
            text: "python3-scipy".into(),
        });
        assert_eq!(children.len(), 1);
        assert!(matches!(&children[0], Node::Package(p) if p.arch == "x86_64"));
    }

    #[test]
    fn test_empty_lookup_is_not_an_error() {
        let children = resolver(vec![]).resolve(&Node::Subject {
            text: "does-not-exist".into(),
        });
        assert!(children.is_empty());
    }

    #[test]
    fn test_requirement_providers_sorted_by_label() {
        let r = resolver(vec![
            PackageRecord::new("zlib-ng-compat", "2.0", "1", "x86_64")
                .with_provides(&["libz.so.1()(64bit)"]),
            PackageRecord::new("zlib", "1.2.11", "1", "x86_64").with_provides(&["libz.so.1()(64bit)"]),
        ]);
        let children = r.resolve(&Node::Requirement {
            reldep: "libz.so.1()(64bit)".into(),
            strength: RequirementStrength::Strong,
        });
        assert_eq!(labels(&children), vec!["zlib", "zlib-ng-compat"]);
    }

    #[test]
    fn test_provide_lists_requirers() {
        let r = resolver(vec![
            PackageRecord::new("python3-scipy", "1.5.2", "2", "x86_64").with_requires(&["python3-numpy"]),
            PackageRecord::new("python3-pandas", "1.1", "1", "x86_64").with_requires(&["python3-numpy >= 1.15"]),
            PackageRecord::new("python3-six", "1.15", "1", "noarch"),
        ]);
        let children = r.resolve(&Node::Provide {
            reldep: "python3-numpy".into(),
        });
        assert_eq!(labels(&children), vec!["python3-pandas", "python3-scipy"]);
    }

    #[test]
    fn test_workload_children() {
        let mut wl = WorkloadDefinition::new("wl.yaml");
        wl.labels = vec!["eln".into()];
        wl.packages = vec!["python3-scipy".into()];
        wl.arch_packages.insert("x86_64".into(), vec!["intel-mkl".into()]);
        wl.unwanted_packages = vec!["texlive".into()];
        wl.unwanted_source_packages = vec!["kernel".into()];
        wl.package_placeholders = vec!["python3-magic".into()];

        let children = resolver(vec![]).resolve(&Node::Workload(Arc::new(wl)));
        assert_eq!(
            labels(&children),
            vec!["eln", "python3-scipy", "intel-mkl", "texlive", "kernel", "python3-magic"]
        );
        assert!(matches!(&children[0], Node::Label { .. }));
        assert!(matches!(&children[3], Node::UnwantedSubject { source: false, .. }));
        assert!(matches!(&children[4], Node::UnwantedSubject { source: true, .. }));
        assert!(matches!(&children[5], Node::Placeholder { .. }));
    }

    #[test]
    fn test_degraded_workload_has_no_children() {
        let wl = WorkloadDefinition::degraded("bad.yaml", "too large");
        assert!(resolver(vec![])
            .resolve(&Node::Workload(Arc::new(wl)))
            .is_empty());
    }
}
