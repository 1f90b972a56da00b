//! CLI Tooling
//!
//! Command-line interface for every project operation. Parsing lives in
//! `Cli`/`Commands`; `CliContext` owns the per-invocation `Repository` and
//! turns each command into printable output.

use crate::config::{ConfigLoader, MvcConfig};
use crate::engine::Repository;
use crate::error::MvcError;
use crate::recipe::Recipe;
use crate::types::FileId;
use clap::{Parser, Subcommand};
use comfy_table::presets::UTF8_BORDERS_ONLY;
use comfy_table::Table;
use owo_colors::OwoColorize;
use serde_json::json;
use std::collections::BTreeMap;
use std::path::PathBuf;
use tracing::info;

/// MiniVC - file-based version tracking
#[derive(Parser)]
#[command(name = "mvc")]
#[command(about = "Track files through submit, save and release tiers")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Workspace directory
    #[arg(long, default_value = ".")]
    pub workspace: PathBuf,

    /// Repository base path (overrides config and MINIVC_BASE_PATH)
    #[arg(long)]
    pub base_path: Option<PathBuf>,

    /// Configuration file path (overrides default config loading)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Apply load/review recipes without asking for confirmation
    #[arg(long, short = 'y', global = true)]
    pub yes: bool,

    /// Enable verbose logging
    #[arg(long, default_value = "false")]
    pub verbose: bool,

    /// Log level (trace, debug, info, warn, error, off)
    #[arg(long)]
    pub log_level: Option<String>,

    /// Log format (json, text)
    #[arg(long)]
    pub log_format: Option<String>,

    /// Log output (stdout, stderr, file, file+stderr, both)
    #[arg(long)]
    pub log_output: Option<String>,

    /// Log file path (if output includes "file")
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Create a new project and bind this workspace to it
    Create {
        /// Project name
        project: String,
    },
    /// Load a project version into the workspace
    Load {
        /// Project name
        project: String,
        /// Release number to load (default: saved head)
        #[arg(long)]
        release: Option<u32>,
    },
    /// Submit workspace files as a new dev revision
    Submit {
        /// Files to submit
        #[arg(required = true)]
        files: Vec<String>,
        /// Description for this submit
        #[arg(long, short = 'd', default_value = "no description")]
        description: String,
    },
    /// Remove files from the project and the workspace
    Remove {
        /// Files to remove
        #[arg(required = true)]
        files: Vec<String>,
        /// Description for this removal
        #[arg(long, short = 'd', default_value = "no description")]
        description: String,
    },
    /// Fold pending submits into the stable version
    Save {
        /// Description for this version
        #[arg(long, short = 'd', default_value = "no description")]
        description: String,
    },
    /// Freeze the stable version as a numbered release
    Release {
        /// Description for this release
        #[arg(long, short = 'd', default_value = "no description")]
        description: String,
    },
    /// Materialize the pending submits into the workspace
    Review,
    /// List projects and their current versions
    List {
        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },
    /// Show pending submit descriptions
    Status {
        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },
    /// List files reachable from the current version
    Contents {
        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },
    /// List workspace files changed since they were last submitted
    Changes {
        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },
    /// Print the effective configuration
    Config,
}

/// CLI execution context
pub struct CliContext {
    repo: Repository,
    config: MvcConfig,
    assume_yes: bool,
}

impl CliContext {
    /// Build a context for `workspace` using an already resolved config.
    pub fn new(workspace: PathBuf, config: MvcConfig) -> Result<Self, MvcError> {
        let workspace = dunce::canonicalize(&workspace).map_err(|e| MvcError::io(&workspace, e))?;
        let base_path = if config.base_path.is_absolute() {
            config.base_path.clone()
        } else {
            std::env::current_dir()
                .map_err(|e| MvcError::ConfigError(format!("Failed to get current directory: {}", e)))?
                .join(&config.base_path)
        };
        let repo = Repository::open(base_path, workspace)?;
        Ok(Self {
            repo,
            config,
            assume_yes: false,
        })
    }

    /// Configuration with CLI overrides applied over files and environment.
    pub fn resolve_config(cli: &Cli) -> Result<MvcConfig, MvcError> {
        let mut config = match &cli.config {
            Some(path) => ConfigLoader::load_from_file(path)?,
            None => ConfigLoader::load()?,
        };
        if let Some(base_path) = &cli.base_path {
            config.base_path = base_path.clone();
        }
        if cli.verbose {
            config.logging.level = "debug".to_string();
        }
        if let Some(level) = &cli.log_level {
            config.logging.level = level.clone();
        }
        if let Some(format) = &cli.log_format {
            config.logging.format = format.clone();
        }
        if let Some(output) = &cli.log_output {
            config.logging.output = output.clone();
        }
        if let Some(file) = &cli.log_file {
            config.logging.file = Some(file.clone());
        }
        Ok(config)
    }

    pub fn with_assume_yes(mut self, assume_yes: bool) -> Self {
        self.assume_yes = assume_yes;
        self
    }

    pub fn repository(&self) -> &Repository {
        &self.repo
    }

    pub fn config(&self) -> &MvcConfig {
        &self.config
    }

    /// Execute a CLI command
    pub fn execute(&self, command: &Commands) -> Result<String, MvcError> {
        info!(command = command_name(command), workspace = %self.repo.user_path().display(), "Executing command");
        match command {
            Commands::Create { project } => {
                let created = self.repo.create(project)?;
                Ok(format!("Created project {} at {}", created.name, created.id))
            }
            Commands::Load { project, release } => self.handle_load(project, *release),
            Commands::Submit { files, description } => {
                let id = self.repo.submit(files, description)?;
                Ok(format!("Submitted {} file(s) as {}", files.len(), id))
            }
            Commands::Remove { files, description } => {
                let id = self.repo.remove(files, description)?;
                Ok(format!("Removed {} file(s) as {}", files.len(), id))
            }
            Commands::Save { description } => {
                let id = self.repo.save(description)?;
                Ok(format!("Saved stable version {}", id))
            }
            Commands::Release { description } => {
                let id = self.repo.release(description)?;
                Ok(format!("Released version {}", id))
            }
            Commands::Review => self.handle_review(),
            Commands::List { format } => {
                let projects = self.repo.list_projects()?;
                match format.as_str() {
                    "json" => Ok(format_project_list_json(&projects)),
                    _ => Ok(format_project_list_text(&projects)),
                }
            }
            Commands::Status { format } => {
                let lines = self.repo.status()?;
                Ok(format_lines(&lines, format, "Pending submits", "No pending submits."))
            }
            Commands::Contents { format } => {
                let files = self.repo.contents()?;
                Ok(format_lines(&files, format, "Contents", "No files tracked."))
            }
            Commands::Changes { format } => {
                let files = self.repo.changes()?;
                Ok(format_lines(&files, format, "Changed files", "No changes."))
            }
            Commands::Config => ConfigLoader::render(&self.config),
        }
    }

    /// Handle load command: plan, confirm, apply.
    fn handle_load(&self, project: &str, release: Option<u32>) -> Result<String, MvcError> {
        let recipe = self.repo.load(project, release)?;
        if !self.confirm_recipe(&recipe, "Load")? {
            return Ok("Load cancelled".to_string());
        }
        self.repo.load_finalize(&recipe)?;
        Ok(format!(
            "Loaded {} file(s) from {}",
            recipe.files_to_add.len(),
            recipe.project_name
        ))
    }

    /// Handle review command: plan, confirm, apply.
    fn handle_review(&self) -> Result<String, MvcError> {
        let recipe = self.repo.review()?;
        if !self.confirm_recipe(&recipe, "Review")? {
            return Ok("Review cancelled".to_string());
        }
        self.repo.review_finalize(&recipe)?;
        Ok(format!(
            "Reviewed {} file(s) from {}",
            recipe.files_to_add.len(),
            recipe.project_name
        ))
    }

    fn confirm_recipe(&self, recipe: &Recipe, action: &str) -> Result<bool, MvcError> {
        if self.assume_yes || recipe.is_empty() {
            return Ok(true);
        }
        eprintln!("{}", format_recipe_text(recipe));

        use dialoguer::Confirm;
        Confirm::new()
            .with_prompt(format!(
                "{} into {}? Existing files will be overwritten",
                action,
                self.repo.user_path().display()
            ))
            .default(false)
            .interact()
            .map_err(|e| MvcError::ConfigError(format!("Failed to get user input: {}", e)))
    }
}

/// Format a section heading with bold/underline.
fn format_section_heading(title: &str) -> String {
    format!("{}", title.bold().underline())
}

fn format_recipe_text(recipe: &Recipe) -> String {
    let mut out = format!("{}\n", format_section_heading(&recipe.project_name));
    for (file, source) in &recipe.files_to_add {
        out.push_str(&format!("  + {}  ({})\n", file, source.display()));
    }
    for file in &recipe.files_to_remove {
        out.push_str(&format!("  - {}\n", file));
    }
    out
}

fn format_project_list_text(projects: &BTreeMap<String, FileId>) -> String {
    if projects.is_empty() {
        return "No projects found.".to_string();
    }
    let mut table = Table::new();
    table.load_preset(UTF8_BORDERS_ONLY);
    table.set_header(vec!["Project", "Version"]);
    for (name, id) in projects {
        table.add_row(vec![name.clone(), id.to_string()]);
    }
    format!("{}", table)
}

fn format_project_list_json(projects: &BTreeMap<String, FileId>) -> String {
    let items: Vec<_> = projects
        .iter()
        .map(|(name, id)| json!({ "name": name, "version": id.to_string(), "id": id }))
        .collect();
    let result = json!({ "projects": items, "total": projects.len() });
    serde_json::to_string_pretty(&result).unwrap_or_else(|_| "{}".to_string())
}

fn format_lines(lines: &[String], format: &str, title: &str, empty_message: &str) -> String {
    match format {
        "json" => serde_json::to_string_pretty(&json!({ "items": lines, "total": lines.len() }))
            .unwrap_or_else(|_| "{}".to_string()),
        _ => {
            if lines.is_empty() {
                return empty_message.to_string();
            }
            let mut out = format!("{}\n", format_section_heading(title));
            for line in lines {
                out.push_str(line);
                out.push('\n');
            }
            out.trim_end().to_string()
        }
    }
}

fn command_name(command: &Commands) -> &'static str {
    match command {
        Commands::Create { .. } => "create",
        Commands::Load { .. } => "load",
        Commands::Submit { .. } => "submit",
        Commands::Remove { .. } => "remove",
        Commands::Save { .. } => "save",
        Commands::Release { .. } => "release",
        Commands::Review => "review",
        Commands::List { .. } => "list",
        Commands::Status { .. } => "status",
        Commands::Contents { .. } => "contents",
        Commands::Changes { .. } => "changes",
        Commands::Config => "config",
    }
}
