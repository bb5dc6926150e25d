//! sassmod CLI
//!
//! Main entry point for the `sassmod` command.

use clap::{Parser, Subcommand, ValueEnum};
use miette::Result;
use std::path::{Path, PathBuf};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use sassmod::diagnostics::line_col;
use sassmod::fix::apply_fixes;
use sassmod::lint::{IgnoreScope, LintConfig, LintLevel, Linter};
use sassmod::{parser, NamespaceIndex, SassmodError};

#[derive(Parser)]
#[command(name = "sassmod")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(
    about = "SCSS module-namespace migration linter",
    long_about = "Lints SCSS projects migrating from global @import inclusion to namespaced \
                  @use modules: variable references must be qualified with the namespace of \
                  the file that defines them, and @import directives must become @use."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Lint SCSS files, optionally rewriting them in place
    Lint {
        /// File or directory to lint
        #[arg(value_name = "PATH")]
        path: PathBuf,

        /// Apply fixes in place instead of reporting
        #[arg(long)]
        fix: bool,

        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,

        /// Project root the variable index is built from
        /// (default: PATH if a directory, else its parent)
        #[arg(long, value_name = "DIR")]
        project_root: Option<PathBuf>,

        /// Suppress findings in a scope (repeatable)
        #[arg(long, value_enum, value_name = "SCOPE")]
        ignore: Vec<IgnoreArg>,

        /// Allow specific lint (e.g., --allow use_module_namespace)
        #[arg(long, value_name = "LINT")]
        allow: Vec<String>,

        /// Warn for specific lint
        #[arg(long, value_name = "LINT")]
        warn: Vec<String>,

        /// Deny specific lint
        #[arg(long, value_name = "LINT")]
        deny: Vec<String>,

        /// Exit nonzero if any warnings were emitted
        #[arg(long)]
        deny_warnings: bool,
    },

    /// Dump the project's variable index
    Index {
        /// Project root to scan
        #[arg(value_name = "DIR")]
        root: PathBuf,

        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

#[derive(Clone, Copy, ValueEnum)]
enum IgnoreArg {
    Local,
    Global,
}

impl From<IgnoreArg> for IgnoreScope {
    fn from(arg: IgnoreArg) -> Self {
        match arg {
            IgnoreArg::Local => IgnoreScope::Local,
            IgnoreArg::Global => IgnoreScope::Global,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .with(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                EnvFilter::new(if cli.verbose { "debug" } else { "warn" })
            }),
        )
        .init();

    match cli.command {
        Commands::Lint {
            path,
            fix,
            format,
            project_root,
            ignore,
            allow,
            warn,
            deny,
            deny_warnings,
        } => lint_files(
            &path,
            fix,
            format,
            project_root.as_deref(),
            &ignore,
            &allow,
            &warn,
            &deny,
            deny_warnings,
        ),
        Commands::Index { root, format } => dump_index(&root, format),
    }
}

/// One rendered finding, anchored to its file
struct Finding {
    file: PathBuf,
    line: usize,
    col: usize,
    level: LintLevel,
    lint_id: String,
    message: String,
    help: Vec<String>,
}

#[allow(clippy::too_many_arguments)]
fn lint_files(
    path: &Path,
    fix: bool,
    format: OutputFormat,
    project_root: Option<&Path>,
    ignore: &[IgnoreArg],
    allow: &[String],
    warn: &[String],
    deny: &[String],
    deny_warnings: bool,
) -> Result<()> {
    // Build configuration: discovered file first, then CLI overrides merged
    // on top
    let mut config = match LintConfig::find_config(path) {
        Ok(Some(config)) => config,
        Ok(None) => LintConfig::default(),
        Err(err) => {
            // Invalid configuration disables the pass rather than guessing
            eprintln!("{:?}", miette::Report::new(SassmodError::from(err)));
            tracing::warn!("invalid configuration; nothing linted");
            return Ok(());
        }
    };
    let mut overrides = LintConfig::default();
    for scope in ignore {
        overrides.add_ignore((*scope).into());
    }
    for lint_name in allow {
        overrides.set_level(lint_name, LintLevel::Allow);
    }
    for lint_name in warn {
        overrides.set_level(lint_name, LintLevel::Warn);
    }
    for lint_name in deny {
        overrides.set_level(lint_name, LintLevel::Deny);
    }
    config.merge(&overrides);

    // The index is built exactly once, before any file is linted
    let root = match project_root {
        Some(root) => root.to_path_buf(),
        None if path.is_dir() => path.to_path_buf(),
        None => path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."))
            .to_path_buf(),
    };
    let index = NamespaceIndex::build(&root)?;
    tracing::info!(
        "indexed {} variables under `{}`",
        index.len(),
        root.display()
    );

    let files = if path.is_dir() {
        collect_scss_files(path)?
    } else {
        vec![path.to_path_buf()]
    };
    if files.is_empty() {
        println!("No .scss files found");
        return Ok(());
    }

    let linter = Linter::with_config(config);
    let mut findings = Vec::new();
    let mut total_warnings = 0usize;
    let mut total_errors = 0usize;
    let mut total_fixed = 0usize;

    for file in &files {
        let source = match std::fs::read_to_string(file) {
            Ok(source) => source,
            Err(err) => {
                eprintln!("Error reading {}: {}", file.display(), err);
                total_errors += 1;
                continue;
            }
        };

        let stylesheet = match parser::parse(&source, &file.to_string_lossy()) {
            Ok(stylesheet) => stylesheet,
            Err(err) => {
                eprintln!("{:?}", miette::Report::new(err));
                total_errors += 1;
                continue;
            }
        };

        let diagnostics = linter.lint(&stylesheet, &file.to_string_lossy(), &source, &index);

        if fix {
            let outcome = apply_fixes(&source, &diagnostics);
            if outcome.applied > 0 {
                std::fs::write(file, &outcome.output)
                    .map_err(|e| miette::miette!("Failed to write {}: {}", file.display(), e))?;
                tracing::info!("fixed {} issue(s) in {}", outcome.applied, file.display());
            }
            total_fixed += outcome.applied;
            continue;
        }

        for diag in diagnostics {
            match diag.level {
                LintLevel::Warn => total_warnings += 1,
                LintLevel::Deny => total_errors += 1,
                LintLevel::Allow => {}
            }
            let (line, col) = line_col(&source, diag.span.start);
            findings.push(Finding {
                file: file.clone(),
                line,
                col,
                level: diag.level,
                lint_id: diag.lint_id,
                message: diag.message,
                help: diag.suggestions.iter().map(|s| s.message.clone()).collect(),
            });
        }
    }

    if fix {
        println!(
            "Fixed {} issue(s) across {} file(s)",
            total_fixed,
            files.len()
        );
        return Ok(());
    }

    match format {
        OutputFormat::Json => {
            let entries: Vec<_> = findings
                .iter()
                .map(|f| {
                    serde_json::json!({
                        "file": f.file.display().to_string(),
                        "line": f.line,
                        "col": f.col,
                        "lint": f.lint_id,
                        "level": f.level.to_string(),
                        "message": f.message,
                    })
                })
                .collect();
            let report = serde_json::json!({
                "diagnostics": entries,
                "warnings": total_warnings,
                "errors": total_errors,
            });
            println!(
                "{}",
                serde_json::to_string_pretty(&report).unwrap_or_else(|_| "{}".to_string())
            );
        }
        OutputFormat::Text => {
            for finding in &findings {
                let level_str = match finding.level {
                    LintLevel::Warn => "warning",
                    LintLevel::Deny => "error",
                    LintLevel::Allow => "allow",
                };
                println!(
                    "{}:{}:{}: {} [{}]: {}",
                    finding.file.display(),
                    finding.line,
                    finding.col,
                    level_str,
                    finding.lint_id,
                    finding.message
                );
                for help in &finding.help {
                    println!("  help: {}", help);
                }
            }
            println!();
            println!(
                "Summary: {} warning(s), {} error(s)",
                total_warnings, total_errors
            );
        }
    }

    if total_errors > 0 || (deny_warnings && total_warnings > 0) {
        Err(miette::miette!("Linting failed with errors"))
    } else {
        Ok(())
    }
}

fn dump_index(root: &Path, format: OutputFormat) -> Result<()> {
    let index = NamespaceIndex::build(root)?;

    // Sorted for stable output
    let mut entries: Vec<(&str, &str)> = index.iter().collect();
    entries.sort();

    match format {
        OutputFormat::Json => {
            let map: serde_json::Map<String, serde_json::Value> = entries
                .into_iter()
                .map(|(name, ns)| (name.to_string(), serde_json::json!(ns)))
                .collect();
            println!(
                "{}",
                serde_json::to_string_pretty(&serde_json::Value::Object(map))
                    .unwrap_or_else(|_| "{}".to_string())
            );
        }
        OutputFormat::Text => {
            for (name, namespace) in entries {
                println!("${} -> {}", name, namespace);
            }
            println!();
            println!("{} variable(s) indexed", index.len());
        }
    }
    Ok(())
}

/// Recursively collect `.scss` files under a directory
fn collect_scss_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for path in sassmod::index::scan_files(dir)? {
        if path.extension().map(|e| e == "scss").unwrap_or(false) {
            files.push(path);
        }
    }
    Ok(files)
}
