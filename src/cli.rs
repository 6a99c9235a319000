use clap::Parser;
use std::path::PathBuf;

use pkg_explorer::application::dto::OutputFormat;
use pkg_explorer::explorer::domain::RootKind;

/// Explore the dependency tree of RPM packages and workload definitions
#[derive(Parser, Debug)]
#[command(name = "pkg-explorer")]
#[command(version)]
#[command(
    about = "Explore the dependency tree of RPM packages and workload definitions",
    long_about = None
)]
pub struct Args {
    /// Package database: a TOML repository snapshot with [[package]] tables
    #[arg(short, long, value_name = "FILE")]
    pub database: Option<PathBuf>,

    /// Workload YAML file, or a directory of them.
    /// Can be specified multiple times: -w eln.yaml -w workloads/
    #[arg(short, long = "workload", value_name = "PATH")]
    pub workloads: Vec<PathBuf>,

    /// Add a subject to the workset (name, glob, NEVRA or provide)
    #[arg(short, long = "subject", value_name = "SUBJECT")]
    pub subjects: Vec<String>,

    /// Add an exact package name lookup to the workset
    #[arg(short, long = "query", value_name = "NAME")]
    pub queries: Vec<String>,

    /// Add the packages requiring a relation to the workset
    #[arg(long = "what-requires", value_name = "RELDEP")]
    pub what_requires: Vec<String>,

    /// Render only one root: sources, labels, modifications or workset
    #[arg(short, long)]
    pub root: Option<RootKind>,

    /// Levels rendered below each root [default: 3]
    #[arg(long)]
    pub depth: Option<usize>,

    /// Output format: text or json [default: text]
    #[arg(short, long)]
    pub format: Option<OutputFormat>,

    /// Output file path (if not specified, outputs to stdout)
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Show requirements as nodes instead of collapsing them into providers
    #[arg(long)]
    pub expand_requirements: bool,

    /// Label whose workloads are selected
    #[arg(long, value_name = "LABEL")]
    pub active_label: Option<String>,

    /// Workload (name or path) highlighted as active
    #[arg(long, value_name = "WORKLOAD")]
    pub active_workload: Option<String>,

    /// Path to config file (default: auto-discover pkg-explorer.config.yml)
    #[arg(short = 'c', long = "config", value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Prefix labels with their icon name in text output
    #[arg(long)]
    pub icons: bool,

    /// Disable colored text output
    #[arg(long)]
    pub no_color: bool,
}

impl Args {
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
