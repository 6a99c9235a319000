mod cli;
mod config;

use cli::Args;
use config::ConfigFile;
use pkg_explorer::adapters::outbound::console::StderrProgressReporter;
use pkg_explorer::adapters::outbound::filesystem::{
    discover_workload_files, TomlPackageDatabase, YamlWorkloadReader,
};
use pkg_explorer::application::dto::{ExploreRequest, OutputFormat};
use pkg_explorer::application::factories::{
    FormatterFactory, PresenterFactory, PresenterType, TextOptions,
};
use pkg_explorer::application::use_cases::ExploreTreeUseCase;
use pkg_explorer::explorer::services::SessionSettings;
use pkg_explorer::ports::inbound::ExploreTreePort;
use pkg_explorer::shared::error::{ExitCode, ExplorerError};
use pkg_explorer::shared::Result;
use std::io::IsTerminal;
use std::path::PathBuf;
use std::process;
use std::str::FromStr;

const DEFAULT_DEPTH: usize = 3;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    // clap exits with code 2 on invalid arguments
    let args = Args::parse_args();

    if let Err(e) = run(args) {
        eprintln!("\n❌ An error occurred:\n");
        eprintln!("{}", e);

        // Display error chain
        for cause in e.chain().skip(1) {
            eprintln!("\nCaused by: {}", cause);
        }

        eprintln!();
        process::exit(ExitCode::ApplicationError.as_i32());
    }
}

fn run(args: Args) -> Result<()> {
    let config = load_config(&args)?;

    let database_path = args
        .database
        .clone()
        .or_else(|| config.database.clone())
        .ok_or_else(|| ExplorerError::Validation {
            message: "no package database given. Pass --database <FILE> or set 'database' in pkg-explorer.config.yml".to_string(),
        })?;
    let database = TomlPackageDatabase::load(&database_path)?;

    let workload_args = if args.workloads.is_empty() {
        config.workloads.clone().unwrap_or_default()
    } else {
        args.workloads.clone()
    };
    let workloads = discover_workload_files(&workload_args)?;

    let format = resolve_format(&args, &config)?;
    let request = build_request(&args, &config, workloads);

    // Create use case with injected dependencies
    let use_case = ExploreTreeUseCase::new(
        database,
        YamlWorkloadReader::new(),
        StderrProgressReporter::new(),
    );
    let response = use_case.explore(request)?;

    eprintln!("{}", FormatterFactory::progress_message(format));
    let options = TextOptions {
        colored: !args.no_color && args.output.is_none() && std::io::stdout().is_terminal(),
        icons: args.icons,
    };
    let rendered = FormatterFactory::create(format, options).format(&response.snapshot)?;

    let presenter = PresenterFactory::create(PresenterType::from(args.output.clone()));
    presenter.present(&rendered)?;

    Ok(())
}

/// Explicit `--config`, else `pkg-explorer.config.yml` in the working directory
fn load_config(args: &Args) -> Result<ConfigFile> {
    if let Some(path) = &args.config {
        return config::load_config_from_path(path);
    }
    let cwd = std::env::current_dir()?;
    Ok(config::discover_config(&cwd)?.unwrap_or_default())
}

fn resolve_format(args: &Args, config: &ConfigFile) -> Result<OutputFormat> {
    if let Some(format) = args.format {
        return Ok(format);
    }
    match config.format.as_deref() {
        Some(format) => OutputFormat::from_str(format).map_err(|message| {
            ExplorerError::Validation {
                message: format!("config field 'format': {}", message),
            }
            .into()
        }),
        None => Ok(OutputFormat::default()),
    }
}

/// Merges CLI values over config values
fn build_request(args: &Args, config: &ConfigFile, workloads: Vec<PathBuf>) -> ExploreRequest {
    let defaults = SessionSettings::default();
    let settings = SessionSettings {
        arches: config.arches.clone().unwrap_or(defaults.arches),
        collapse_requirements: !args.expand_requirements
            && config
                .collapse_requirements
                .unwrap_or(defaults.collapse_requirements),
        annotation_batch_size: config
            .annotation_batch_size
            .unwrap_or(defaults.annotation_batch_size),
    };

    ExploreRequest {
        workloads,
        subjects: args.subjects.clone(),
        queries: args.queries.clone(),
        what_requires: args.what_requires.clone(),
        root: args.root.or_else(|| config.root_kind()),
        depth: args.depth.or(config.depth).unwrap_or(DEFAULT_DEPTH),
        active_label: args
            .active_label
            .clone()
            .or_else(|| config.active_label.clone()),
        active_workload: args
            .active_workload
            .clone()
            .or_else(|| config.active_workload.clone()),
        overrides: config.override_specs(),
        settings,
    }
}
