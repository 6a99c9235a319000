//! Tree node kinds and their identities.
//!
//! A [`Node`] only carries the declarative intent of a tree element (a
//! subject string, a relation, a package record). Its children are produced
//! on demand by the resolver and cached by the node tree.

use super::color::Color;
use super::package::{PackageId, PackageRecord};
use super::workload::WorkloadDefinition;
use std::fmt;
use std::sync::Arc;

/// The fixed, ordered set of top-level collections
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum RootKind {
    Sources,
    Labels,
    Modifications,
    Workset,
}

impl RootKind {
    pub const ALL: [RootKind; 4] = [
        RootKind::Sources,
        RootKind::Labels,
        RootKind::Modifications,
        RootKind::Workset,
    ];

    pub fn position(self) -> usize {
        match self {
            RootKind::Sources => 0,
            RootKind::Labels => 1,
            RootKind::Modifications => 2,
            RootKind::Workset => 3,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            RootKind::Sources => "sources",
            RootKind::Labels => "labels",
            RootKind::Modifications => "modifications",
            RootKind::Workset => "workset",
        }
    }
}

impl std::str::FromStr for RootKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "sources" | "workloads" => Ok(RootKind::Sources),
            "labels" => Ok(RootKind::Labels),
            "modifications" | "mods" => Ok(RootKind::Modifications),
            "workset" => Ok(RootKind::Workset),
            _ => Err(format!(
                "Invalid root: {}. Please specify 'sources', 'labels', 'modifications' or 'workset'",
                s
            )),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RequirementStrength {
    /// `Requires:`
    Strong,
    /// `Recommends:` / `Suggests:`
    Weak,
}

/// Icons are referenced by their font-awesome names
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IconKind {
    ListAlt,
    Archive,
    Wrench,
    PuzzlePiece,
    Plus,
    Ban,
    Share,
    Tag,
    Briefcase,
    ExclamationTriangle,
    QuestionCircle,
    PaintBrush,
}

impl IconKind {
    pub fn name(self) -> &'static str {
        match self {
            IconKind::ListAlt => "list-alt",
            IconKind::Archive => "archive",
            IconKind::Wrench => "wrench",
            IconKind::PuzzlePiece => "puzzle-piece",
            IconKind::Plus => "plus",
            IconKind::Ban => "ban",
            IconKind::Share => "share",
            IconKind::Tag => "tag",
            IconKind::Briefcase => "briefcase",
            IconKind::ExclamationTriangle => "exclamation-triangle",
            IconKind::QuestionCircle => "question-circle",
            IconKind::PaintBrush => "paint-brush",
        }
    }

}

/// Kind tag of synthetic (non-package) identities
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Category {
    Root,
    Subject,
    UnwantedSubject,
    Query,
    Requirement,
    WeakRequirement,
    Provide,
    Label,
    Workload,
    Placeholder,
    Mod,
}

/// Identity that survives node recomputation; colors are stored under it
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum UnderlyingKey {
    Package(PackageId),
    Synthetic(Category, String),
}

/// Key of the override ("mod") registry
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum StableKey {
    Package(String),
    Label(String),
    Requirement(String),
}

impl fmt::Display for StableKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StableKey::Package(name) => write!(f, "package:{}", name),
            StableKey::Label(name) => write!(f, "label:{}", name),
            StableKey::Requirement(reldep) => write!(f, "requirement:{}", reldep),
        }
    }
}

#[derive(Debug, Clone)]
pub enum Node {
    Root(RootKind),
    /// Free-text package subject, resolved to best matches
    Subject { text: String },
    /// A subject a workload does not want; `source` resolves against `src`
    UnwantedSubject { text: String, source: bool },
    /// Exact name lookup restricted to the given architectures
    Query { name: String, arches: Vec<String> },
    Package(Arc<PackageRecord>),
    Requirement {
        reldep: String,
        strength: RequirementStrength,
    },
    /// Reverse edge: packages requiring `reldep`
    Provide { reldep: String },
    Label { name: String },
    Workload(Arc<WorkloadDefinition>),
    Placeholder { name: String },
    Mod { key: StableKey, color: Color },
}

impl Node {
    pub fn label(&self) -> String {
        match self {
            Node::Root(kind) => kind.name().to_string(),
            Node::Subject { text } | Node::UnwantedSubject { text, .. } => text.clone(),
            Node::Query { name, .. } => name.clone(),
            Node::Package(pkg) => pkg.name.clone(),
            Node::Requirement { reldep, .. } | Node::Provide { reldep } => reldep.clone(),
            Node::Label { name } | Node::Placeholder { name } => name.clone(),
            Node::Workload(definition) => definition.display_name(),
            Node::Mod { key, color } => format!("{} → {}", key, color),
        }
    }

    pub fn icon(&self) -> Option<IconKind> {
        match self {
            Node::Root(_) => None,
            Node::Subject { .. } | Node::Query { .. } => Some(IconKind::ListAlt),
            Node::UnwantedSubject { .. } => Some(IconKind::Ban),
            // packages without a source package are source packages themselves
            Node::Package(pkg) if pkg.source_name.is_none() => Some(IconKind::Wrench),
            Node::Package(_) => Some(IconKind::Archive),
            Node::Requirement {
                strength: RequirementStrength::Strong,
                ..
            } => Some(IconKind::PuzzlePiece),
            Node::Requirement { .. } => Some(IconKind::Plus),
            Node::Provide { .. } => Some(IconKind::Share),
            Node::Label { .. } => Some(IconKind::Tag),
            Node::Workload(definition) if definition.is_degraded() => {
                Some(IconKind::ExclamationTriangle)
            }
            Node::Workload(_) => Some(IconKind::Briefcase),
            Node::Placeholder { .. } => Some(IconKind::QuestionCircle),
            Node::Mod { .. } => Some(IconKind::PaintBrush),
        }
    }

    /// Whether the node is replaced by its only child in the displayed tree
    pub fn autoreplace(&self) -> bool {
        matches!(
            self,
            Node::Subject { .. } | Node::UnwantedSubject { .. } | Node::Query { .. }
        )
    }

    pub fn underlying_key(&self) -> UnderlyingKey {
        let synthetic = |category, name: String| UnderlyingKey::Synthetic(category, name);
        match self {
            Node::Root(kind) => synthetic(Category::Root, kind.name().to_string()),
            Node::Subject { text } => synthetic(Category::Subject, text.clone()),
            Node::UnwantedSubject { text, source } => synthetic(
                Category::UnwantedSubject,
                if *source {
                    format!("{}@src", text)
                } else {
                    text.clone()
                },
            ),
            Node::Query { name, arches } => {
                synthetic(Category::Query, format!("{}@{}", name, arches.join(",")))
            }
            Node::Package(pkg) => UnderlyingKey::Package(pkg.id()),
            Node::Requirement {
                reldep,
                strength: RequirementStrength::Strong,
            } => synthetic(Category::Requirement, reldep.clone()),
            Node::Requirement { reldep, .. } => synthetic(Category::WeakRequirement, reldep.clone()),
            Node::Provide { reldep } => synthetic(Category::Provide, reldep.clone()),
            Node::Label { name } => synthetic(Category::Label, name.clone()),
            Node::Workload(definition) => synthetic(
                Category::Workload,
                definition.path.display().to_string(),
            ),
            Node::Placeholder { name } => synthetic(Category::Placeholder, name.clone()),
            Node::Mod { key, .. } => synthetic(Category::Mod, key.to_string()),
        }
    }

    pub fn stable_key(&self) -> Option<StableKey> {
        match self {
            Node::Package(pkg) => Some(StableKey::Package(pkg.name.clone())),
            Node::Label { name } => Some(StableKey::Label(name.clone())),
            Node::Requirement { reldep, .. } => Some(StableKey::Requirement(reldep.clone())),
            _ => None,
        }
    }

    /// Whether the node has children, when that is known without resolving
    /// anything against the package database.
    pub fn known_has_children(&self) -> Option<bool> {
        match self {
            Node::Label { .. } | Node::Placeholder { .. } | Node::Mod { .. } => Some(false),
            Node::Package(pkg) => Some(
                pkg.source_name.is_some()
                    || !pkg.requires.is_empty()
                    || !pkg.recommends.is_empty()
                    || !pkg.suggests.is_empty(),
            ),
            Node::Workload(definition) => Some(
                !definition.labels.is_empty()
                    || !definition.packages.is_empty()
                    || definition.arch_packages.values().any(|v| !v.is_empty())
                    || definition.has_unwanted()
                    || !definition.package_placeholders.is_empty(),
            ),
            _ => None,
        }
    }

    pub fn is_label(&self, name: &str) -> bool {
        matches!(self, Node::Label { name: n } if n == name)
    }
}
