mod error;
mod hint;
mod kit;
mod model;

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, anyhow};
use clap::{Parser, Subcommand};

use error::KitResult;
use hint::classify_hint;
use kit::installer::{install_project, resolve_target_root};
use kit::{InstallStep, KitCatalog, KitRegistry};
use model::config::AppConfig;
use model::kit::KitStatusRecord;

/// Events are recorded under the binary's crate name.
const DEFAULT_LOG_FILTER: &str = "kitctl=info";

#[derive(Parser, Debug)]
#[command(name = "kitctl", version, about = "Classify and install Modo kits")]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Install the kit named in the project file of the current directory
    Install,
    /// Parse host UI hints into kit name, state and version
    Classify {
        #[arg(value_name = "HINT", required = true)]
        hints: Vec<String>,
    },
    /// Search the kit catalog
    Search {
        #[arg(value_name = "QUERY", default_value = "")]
        query: String,
        /// Only list kits by this author
        #[arg(long)]
        author: Option<String>,
        /// File with one host hint per line, used to report install state
        #[arg(long, value_name = "FILE")]
        hints: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    // Initialize logging to file (stdout carries command output)
    let log_dir = directories::ProjectDirs::from("", "", "kitctl")
        .map(|d| d.data_dir().to_path_buf())
        .unwrap_or_else(std::env::temp_dir);
    fs::create_dir_all(&log_dir)?;

    let file_appender = tracing_appender::rolling::daily(&log_dir, "kitctl.log");
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(DEFAULT_LOG_FILTER));
    tracing_subscriber::fmt()
        .with_writer(non_blocking)
        .with_env_filter(filter)
        .init();

    let cli = Cli::parse();
    let config = AppConfig::load()?;

    let result = match cli.command.unwrap_or(Command::Install) {
        Command::Install => run_install(&config),
        Command::Classify { hints } => run_classify(&config, &hints),
        Command::Search {
            query,
            author,
            hints,
        } => run_search(&config, &query, author.as_deref(), hints),
    };

    if let Err(err) = &result {
        tracing::error!("kitctl failed: {err:#}");
    }
    result
}

fn run_install(config: &AppConfig) -> Result<()> {
    let repo_dir = std::env::current_dir().context("cannot determine working directory")?;
    let project_path = config.project_path(&repo_dir);

    let report = install_project(
        &project_path,
        &repo_dir,
        std::env::consts::OS,
        config.kits_dir_override(),
        |step: InstallStep| println!("{}", step.message()),
    )
    .context("kit installation failed")?;

    let action = if report.replaced { "replaced" } else { "installed" };
    println!(
        "{action} {} ({} files) -> {}",
        report.kit_name,
        report.files_copied,
        report.destination.display()
    );
    Ok(())
}

fn run_classify(config: &AppConfig, hints: &[String]) -> Result<()> {
    let kits_root = match resolve_target_root(std::env::consts::OS, config.kits_dir_override()) {
        Ok(root) => Some(root),
        Err(err) => {
            tracing::debug!("install paths unresolved: {err}");
            None
        }
    };

    let records = classify_all(hints, kits_root.as_deref()).context("failed to classify hints")?;
    for record in records {
        println!("{record}");
    }
    Ok(())
}

/// Classifies each hint on its own, in order, locating it under `kits_root`.
fn classify_all(hints: &[String], kits_root: Option<&Path>) -> KitResult<Vec<KitStatusRecord>> {
    hints
        .iter()
        .map(|hint| -> KitResult<KitStatusRecord> {
            let record = classify_hint(hint)?;
            Ok(match kits_root {
                Some(root) => {
                    let path = root.join(record.name());
                    record.with_install_path(path)
                }
                None => record,
            })
        })
        .collect()
}

fn run_search(
    config: &AppConfig,
    query: &str,
    author: Option<&str>,
    hints: Option<PathBuf>,
) -> Result<()> {
    let catalog_path = config
        .catalog_path()
        .ok_or_else(|| anyhow!("no kit catalog configured (set `catalog.path`)"))?;
    let catalog = KitCatalog::load(&catalog_path)?;

    let registry = match hints {
        Some(path) => {
            let raw = fs::read_to_string(&path)
                .with_context(|| format!("failed to read hints from {}", path.display()))?;
            KitRegistry::from_hints(raw.lines())?
        }
        None => KitRegistry::default(),
    };

    let mut matches = catalog.search(query);
    if let Some(author) = author {
        let by_author = catalog.by_author(author);
        matches.retain(|kit| by_author.contains(kit));
    }

    if matches.is_empty() {
        println!("no kits match {query:?}");
        return Ok(());
    }

    for kit in matches {
        let state = if registry.is_empty() {
            String::new()
        } else {
            format!(" [{}]", registry.install_state(kit))
        };
        println!("{} v{} by {}{state}", kit.name, kit.version, kit.author);
        if !kit.description.is_empty() {
            println!("    {}", kit.description);
        }
        for link in [&kit.url, &kit.help].into_iter().flatten() {
            println!("    {link}");
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_filter_targets_this_crate() {
        let target = DEFAULT_LOG_FILTER.split('=').next().unwrap();
        assert!(module_path!().starts_with(target), "{}", module_path!());
    }

    #[test]
    fn classify_keeps_each_hint_separate() {
        let hints = vec!["mkc version 1.0".to_string(), "mkc version 2.0".to_string()];
        let records = classify_all(&hints, None).unwrap();
        let versions: Vec<&str> = records.iter().map(|record| record.version()).collect();
        assert_eq!(versions, ["1.0", "2.0"]);
        assert!(records.iter().all(|record| record.install_path().is_none()));
    }

    #[test]
    fn classify_locates_records_under_kits_root() {
        let hints = vec![
            "([)mkc(]) ([)(j:2)(c:26646166)version ([)2.0(])".to_string(),
            "([)sleepy(]) ([)(j:2)(c:26646166)(])(disabled)".to_string(),
        ];
        let root = Path::new("kits");
        let records = classify_all(&hints, Some(root)).unwrap();
        assert_eq!(records[0].install_path(), Some(root.join("mkc").as_path()));
        assert_eq!(records[1].install_path(), Some(root.join("sleepy").as_path()));
        assert!(!records[1].is_enabled());
    }

    #[test]
    fn classify_stops_at_malformed_hint() {
        let hints = vec!["mkc version 1.0".to_string(), "garbage".to_string()];
        assert!(classify_all(&hints, None).is_err());
    }
}
