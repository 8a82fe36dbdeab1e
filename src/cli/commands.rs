//! Command dispatch and handlers.

use std::io;
use std::path::{Path, PathBuf};

use clap::CommandFactory;
use clap_complete::generate;
use termtree::Tree;
use tracing::{debug, instrument};

use crate::application::{ApplicationError, ConvertService};
use crate::cli::args::{Cli, Commands, ConfigCommands, SchemeArgs};
use crate::cli::error::{CliError, CliResult};
use crate::cli::output;
use crate::config::{global_config_path, local_config_path, Settings};
use crate::domain::arena::ClassificationTree;
use crate::domain::entities::SchemeMeta;
use generational_arena::Index;

pub fn execute_command(cli: &Cli) -> CliResult<()> {
    match &cli.command {
        Some(Commands::Convert {
            input,
            output,
            strict,
            scheme,
        }) => _convert(cli, input, output.as_deref(), *strict, scheme),
        Some(Commands::Tree { input }) => _tree(cli, input),
        Some(Commands::Check { input }) => _check(cli, input),
        Some(Commands::Config { command }) => _config(cli, command),
        Some(Commands::Completion { shell }) => {
            let mut cmd = Cli::command();
            let name = cmd.get_name().to_string();
            generate(*shell, &mut cmd, name, &mut io::stdout());
            Ok(())
        }
        None => Ok(()),
    }
}

fn load_settings(cli: &Cli) -> CliResult<Settings> {
    Ok(Settings::load(cli.config.as_deref())?)
}

/// CLI flags beat config file and environment.
fn scheme_with_overrides(mut meta: SchemeMeta, args: &SchemeArgs) -> SchemeMeta {
    if let Some(source) = &args.source {
        meta.source = source.clone();
    }
    if let Some(edition) = &args.edition {
        meta.edition = edition.clone();
    }
    if let Some(edition_date) = &args.edition_date {
        meta.edition_date = edition_date.clone();
    }
    if let Some(name) = &args.name {
        meta.name = name.clone();
    }
    if let Some(description) = &args.description {
        meta.description = description.clone();
    }
    if !args.tokens.is_empty() {
        meta.reference_tokens = args.tokens.clone();
    }
    meta
}

fn require_input(input: &Path) -> CliResult<()> {
    if !input.exists() {
        return Err(CliError::MissingInput(input.to_path_buf()));
    }
    Ok(())
}

fn default_output(settings: &Settings, input: &Path) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "classification".to_string());
    settings.out_dir.join(format!("{}.ifc", stem))
}

#[instrument(skip(cli, scheme))]
fn _convert(
    cli: &Cli,
    input: &Path,
    output: Option<&Path>,
    strict: bool,
    scheme: &SchemeArgs,
) -> CliResult<()> {
    require_input(input)?;
    let settings = load_settings(cli)?;
    let meta = scheme_with_overrides(settings.scheme.clone(), scheme);
    let out_path = output
        .map(Path::to_path_buf)
        .unwrap_or_else(|| default_output(&settings, input));
    debug!("input: {:?}, output: {:?}", input, out_path);

    let report = ConvertService::new(meta).convert(input, &out_path, strict)?;

    for warning in &report.warnings {
        output::warning(warning);
    }
    output::action("Generated", &report.output.display());
    output::detail(&format!(
        "{} entries, {} warnings",
        report.entries,
        report.warnings.len()
    ));
    Ok(())
}

#[instrument(skip(cli))]
fn _tree(cli: &Cli, input: &Path) -> CliResult<()> {
    require_input(input)?;
    let settings = load_settings(cli)?;
    let outcome = ConvertService::new(settings.scheme).load_tree(input)?;

    for warning in &outcome.warnings {
        output::warning(warning);
    }
    output::info(&render_tree(&outcome.tree));
    Ok(())
}

/// Render the hierarchy for terminal display, root labelled with the scheme.
fn render_tree(tree: &ClassificationTree) -> Tree<String> {
    let meta = tree.meta();
    let mut rendered = Tree::new(format!("{} ({})", meta.name, meta.edition));

    fn push_children(tree: &ClassificationTree, node_idx: Index, parent: &mut Tree<String>) {
        if let Some(node) = tree.get_node(node_idx) {
            for &child_idx in &node.children {
                if let Some(child) = tree.get_node(child_idx) {
                    let label = child
                        .entry
                        .as_ref()
                        .map(|e| e.to_string())
                        .unwrap_or_default();
                    let mut child_tree = Tree::new(label);
                    push_children(tree, child_idx, &mut child_tree);
                    parent.push(child_tree);
                }
            }
        }
    }

    push_children(tree, tree.root(), &mut rendered);
    rendered
}

#[instrument(skip(cli))]
fn _check(cli: &Cli, input: &Path) -> CliResult<()> {
    require_input(input)?;
    let settings = load_settings(cli)?;
    let report = ConvertService::new(settings.scheme).check(input)?;

    output::header(&input.display());
    output::detail(&format!("{} entries", report.entries));
    for (level, count) in &report.level_counts {
        output::detail(&format!("level {}: {} entries", level, count));
    }

    for warning in &report.warnings {
        output::failure(warning);
    }
    for finding in &report.findings {
        output::failure(finding);
    }

    if report.is_clean() {
        output::success("no findings");
        Ok(())
    } else {
        Err(CliError::ChecksFailed(report.finding_count()))
    }
}

fn _config(cli: &Cli, command: &ConfigCommands) -> CliResult<()> {
    match command {
        ConfigCommands::Show => {
            let settings = load_settings(cli)?;
            let rendered = toml::to_string_pretty(&settings).map_err(|e| {
                ApplicationError::Config {
                    message: e.to_string(),
                }
            })?;
            output::info(&rendered);
            Ok(())
        }
        ConfigCommands::Init { global } => {
            let path = if *global {
                global_config_path().ok_or_else(|| ApplicationError::Config {
                    message: "no config directory found".to_string(),
                })?
            } else {
                local_config_path(Path::new("."))
            };
            if path.exists() {
                return Err(CliError::InvalidArgs(format!(
                    "config already exists: {}",
                    path.display()
                )));
            }
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent).map_err(|e| ApplicationError::Config {
                    message: format!("create {}: {}", parent.display(), e),
                })?;
            }
            std::fs::write(&path, Settings::template()).map_err(|e| ApplicationError::Config {
                message: format!("write {}: {}", path.display(), e),
            })?;
            output::action("Created", &path.display());
            Ok(())
        }
        ConfigCommands::Path => {
            if let Some(global) = global_config_path() {
                let marker = if global.exists() { "(exists)" } else { "(absent)" };
                output::info(&format!("global: {} {}", global.display(), marker));
            }
            let local = local_config_path(Path::new("."));
            let marker = if local.exists() { "(exists)" } else { "(absent)" };
            output::info(&format!("local:  {} {}", local.display(), marker));
            Ok(())
        }
    }
}
