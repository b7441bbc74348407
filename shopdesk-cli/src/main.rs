use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};

use shopdesk_core::config::ShopdeskConfig;
use shopdesk_observability::init_tracing;
use shopdesk_runtime::{RuntimeOptions, ShopdeskRuntime};
use shopdesk_storage::CatalogKind;

#[derive(Parser)]
#[command(name = "shopdesk", version, about = "Customer-support assistant for the store catalog")]
struct Cli {
    /// SQLite database file. In-memory when omitted.
    #[arg(long, global = true, env = "SHOPDESK_DB")]
    db: Option<PathBuf>,

    /// TOML configuration file.
    #[arg(long, global = true, env = "SHOPDESK_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Answer a single question.
    Ask {
        #[arg(long, default_value = "cli")]
        channel: String,
        /// Print the chosen strategy and rule to stderr.
        #[arg(long)]
        explain: bool,
        question: String,
    },
    /// Read questions from stdin, one per line, within one channel.
    Chat {
        #[arg(long, default_value = "cli")]
        channel: String,
    },
    /// Upsert a JSON feed into the catalog.
    Load {
        #[arg(long, value_enum)]
        kind: Feed,
        file: PathBuf,
    },
    /// Re-embed inventory, products and pages into the vector collection.
    Reindex,
    /// Answer an order question with model-written SQL.
    Sql { question: String },
}

#[derive(Clone, Copy, ValueEnum)]
enum Feed {
    Inventory,
    Orders,
    Products,
    Pages,
}

impl From<Feed> for CatalogKind {
    fn from(feed: Feed) -> Self {
        match feed {
            Feed::Inventory => CatalogKind::Inventory,
            Feed::Orders => CatalogKind::Orders,
            Feed::Products => CatalogKind::Products,
            Feed::Pages => CatalogKind::Pages,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config_toml = match &cli.config {
        Some(path) => Some(
            std::fs::read_to_string(path)
                .with_context(|| format!("reading config {}", path.display()))?,
        ),
        None => None,
    };
    let config = match &config_toml {
        Some(raw) => ShopdeskConfig::from_toml(raw).context("parsing config")?,
        None => ShopdeskConfig::default(),
    };
    init_tracing(&config.observability);

    let opts = RuntimeOptions {
        db_path: cli.db.clone(),
        config_toml,
    };

    match cli.command {
        Command::Ask {
            channel,
            explain,
            question,
        } => {
            let runtime = shopdesk_runtime::initialize(opts)?;
            match runtime.handle_query(&channel, &question) {
                Ok(reply) => {
                    if explain {
                        let r = &reply.retrieval;
                        eprintln!(
                            "strategy={} rule={} found={} identifier_lookup={}",
                            r.strategy, r.rule, r.found, r.is_identifier_lookup
                        );
                    }
                    println!("{}", reply.text);
                }
                Err(e) => {
                    tracing::debug!(error = %e, "question failed");
                    println!("{}", e.user_message());
                }
            }
        }
        Command::Chat { channel } => {
            let runtime = shopdesk_runtime::initialize(opts)?;
            let stdin = io::stdin();
            let mut stdout = io::stdout();
            for line in stdin.lock().lines() {
                let line = line.context("reading stdin")?;
                let question = line.trim();
                if question.is_empty() {
                    continue;
                }
                writeln!(stdout, "{}\n", runtime.answer_or_apology(&channel, question))?;
                stdout.flush()?;
            }
        }
        Command::Load { kind, file } => {
            let runtime = ShopdeskRuntime::catalog_only(opts)?;
            let records = read_feed(&file)?;
            let report = runtime.load_feed(kind.into(), &records)?;
            println!(
                "{}: loaded {}, skipped {}",
                CatalogKind::from(kind).as_str(),
                report.loaded,
                report.skipped
            );
        }
        Command::Reindex => {
            let runtime = ShopdeskRuntime::catalog_only(opts)?;
            let report = runtime.reindex()?;
            println!(
                "indexed {} entries (inventory {}, products {}, pages {})",
                report.total(),
                report.inventory,
                report.products,
                report.pages
            );
        }
        Command::Sql { question } => {
            let runtime = shopdesk_runtime::initialize(opts)?;
            match runtime.generated_query(&question) {
                Ok(doc) => println!("{}", doc.content),
                Err(e) => println!("{}", e.user_message()),
            }
        }
    }
    Ok(())
}

/// A feed file holds a JSON array of records.
fn read_feed(path: &Path) -> Result<Vec<serde_json::Value>> {
    let raw = std::fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    let value: serde_json::Value =
        serde_json::from_str(&raw).with_context(|| format!("parsing {}", path.display()))?;
    match value {
        serde_json::Value::Array(records) => Ok(records),
        _ => bail!("{} must contain a JSON array of records", path.display()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_feed_maps_to_its_catalog_kind() {
        let pairs = [
            (Feed::Inventory, "inventory"),
            (Feed::Orders, "orders"),
            (Feed::Products, "products"),
            (Feed::Pages, "pages"),
        ];
        for (feed, name) in pairs {
            assert_eq!(CatalogKind::from(feed).as_str(), name);
        }
    }

    #[test]
    fn feed_file_must_hold_an_array() {
        let dir = tempfile::tempdir().unwrap();

        let good = dir.path().join("pages.json");
        std::fs::write(&good, r#"[{"id": 9, "name": "Shipping Policy"}, {"id": 10}]"#).unwrap();
        assert_eq!(read_feed(&good).unwrap().len(), 2);

        let object = dir.path().join("object.json");
        std::fs::write(&object, r#"{"id": 9}"#).unwrap();
        assert!(read_feed(&object).is_err());

        let broken = dir.path().join("broken.json");
        std::fs::write(&broken, "[{").unwrap();
        assert!(read_feed(&broken).is_err());

        assert!(read_feed(&dir.path().join("missing.json")).is_err());
    }

    #[test]
    fn load_command_parses_kind_and_global_db() {
        let cli = Cli::try_parse_from([
            "shopdesk",
            "load",
            "--kind",
            "orders",
            "orders.json",
            "--db",
            "shop.db",
        ])
        .unwrap();
        assert_eq!(cli.db, Some(PathBuf::from("shop.db")));
        match cli.command {
            Command::Load { kind, file } => {
                assert_eq!(CatalogKind::from(kind), CatalogKind::Orders);
                assert_eq!(file, PathBuf::from("orders.json"));
            }
            _ => panic!("expected load"),
        }
    }

    #[test]
    fn unknown_feed_kind_is_rejected() {
        assert!(Cli::try_parse_from(["shopdesk", "load", "--kind", "refunds", "x.json"]).is_err());
    }
}
