use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use pagepick_common::formatter::{format_mapping, format_preview};
use pagepick_common::protocol::{ErrorPayload, SelectorMapping};
use pagepick_engine::config::PagepickConfig;
use pagepick_engine::detect::auto_detect;
use pagepick_engine::extract::extract_items;
use pagepick_engine::feedgen::{RSS_ITEM_LIMIT, generate_rss};
use pagepick_engine::fetch::PageFetcher;
use pagepick_engine::store::FeedStore;
use std::path::PathBuf;
use url::Url;

#[derive(Parser)]
#[command(name = "pagepick", version, about = "Teach a content extractor where article data lives")]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Config file (defaults to ./pagepick.yaml, then ~/.pagepick/config.yaml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Emit JSON instead of formatted text
    #[arg(long, global = true)]
    json: bool,
}

#[derive(Subcommand)]
enum Command {
    /// Auto-detect a selector mapping for a page and preview it
    Detect {
        url: String,
    },
    /// Extract a preview using an explicit selector mapping
    Preview {
        url: String,
        #[command(flatten)]
        mapping: MappingArgs,
        /// Maximum number of items to extract
        #[arg(long, default_value_t = 20)]
        limit: usize,
    },
    /// Manage saved feeds
    Feed {
        #[command(subcommand)]
        action: FeedCommand,
    },
}

#[derive(Subcommand)]
enum FeedCommand {
    /// Save a feed definition
    Add {
        #[arg(long)]
        name: String,
        #[arg(long)]
        url: String,
        #[command(flatten)]
        mapping: MappingArgs,
    },
    /// List saved feeds
    List,
    /// Show one saved feed
    Show { id: u64 },
    /// Fetch a saved feed's page and render it as RSS XML
    Rss { id: u64 },
    /// Delete a saved feed
    Rm { id: u64 },
}

/// Selector mapping from a JSON file and/or individual flags; flags
/// override file entries.
#[derive(Args)]
struct MappingArgs {
    /// JSON file with a selector mapping (wire field names)
    #[arg(long)]
    mapping: Option<PathBuf>,

    #[arg(long)]
    item: Option<String>,
    #[arg(long)]
    title: Option<String>,
    #[arg(long)]
    link: Option<String>,
    #[arg(long)]
    content: Option<String>,
    #[arg(long)]
    date: Option<String>,
    #[arg(long)]
    author: Option<String>,
    #[arg(long)]
    image: Option<String>,
}

impl MappingArgs {
    fn resolve(self) -> anyhow::Result<SelectorMapping> {
        let mut mapping = match self.mapping {
            Some(path) => {
                let content = std::fs::read_to_string(&path)
                    .with_context(|| format!("reading mapping file {}", path.display()))?;
                serde_json::from_str(&content)
                    .with_context(|| format!("parsing mapping file {}", path.display()))?
            }
            None => SelectorMapping::default(),
        };

        if self.item.is_some() {
            mapping.item = self.item;
        }
        if self.title.is_some() {
            mapping.title = self.title;
        }
        if self.link.is_some() {
            mapping.link = self.link;
        }
        if self.content.is_some() {
            mapping.content = self.content;
        }
        if self.date.is_some() {
            mapping.date = self.date;
        }
        if self.author.is_some() {
            mapping.author = self.author;
        }
        if self.image.is_some() {
            mapping.image = self.image;
        }
        Ok(mapping)
    }
}

#[tokio::main]
async fn main() {
    // Log to stderr so stdout stays clean for output.
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    let cli = Cli::parse();
    let json = cli.json;

    if let Err(err) = run(cli).await {
        // Collaborator failures reach the operator as a distinguishable
        // message, never silently.
        if json {
            eprintln!(
                "{}",
                serde_json::to_string(&ErrorPayload::new(&err)).unwrap_or_default()
            );
        } else {
            eprintln!("Error: {:#}", err);
        }
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let config = match &cli.config {
        Some(path) => PagepickConfig::load_from(path).await?,
        None => PagepickConfig::load_default().await?,
    };
    tracing::debug!(?config.store_path, "config loaded");

    match cli.command {
        Command::Detect { url } => {
            let mut fetcher = PageFetcher::new(&config.fetch)?;
            let (mapping, preview) = auto_detect(&mut fetcher, &url).await?;
            if cli.json {
                let out = serde_json::json!({ "mapping": mapping, "preview": preview });
                println!("{}", serde_json::to_string_pretty(&out)?);
            } else {
                println!("{}", format_mapping(&mapping));
                println!();
                println!("{}", format_preview(&preview));
            }
        }

        Command::Preview {
            url,
            mapping,
            limit,
        } => {
            let mapping = mapping.resolve()?;
            let base_url = Url::parse(&url).context("invalid url")?;
            let mut fetcher = PageFetcher::new(&config.fetch)?;
            let html = fetcher.fetch(&url).await?;
            let items = extract_items(&html, &base_url, &mapping, limit)?;
            if cli.json {
                let out = serde_json::json!({ "items": items });
                println!("{}", serde_json::to_string_pretty(&out)?);
            } else {
                println!("{}", format_preview(&items));
            }
        }

        Command::Feed { action } => {
            let path = config
                .store_path
                .clone()
                .unwrap_or_else(FeedStore::default_path);
            let mut store = FeedStore::open(path)?;

            match action {
                FeedCommand::Add { name, url, mapping } => {
                    let mapping = mapping.resolve()?;
                    let feed = store.create(&name, &url, mapping)?;
                    if cli.json {
                        println!("{}", serde_json::to_string_pretty(feed)?);
                    } else {
                        println!("Saved feed [{}] {}", feed.id, feed.name);
                    }
                }
                FeedCommand::List => {
                    if cli.json {
                        println!("{}", serde_json::to_string_pretty(store.list())?);
                    } else if store.list().is_empty() {
                        println!("No saved feeds");
                    } else {
                        for feed in store.list() {
                            println!("[{}] {} ({})", feed.id, feed.name, feed.url);
                        }
                    }
                }
                FeedCommand::Show { id } => {
                    let feed = store
                        .get(id)
                        .ok_or_else(|| anyhow::anyhow!("no feed with id {id}"))?;
                    if cli.json {
                        println!("{}", serde_json::to_string_pretty(feed)?);
                    } else {
                        println!("[{}] {} ({})", feed.id, feed.name, feed.url);
                        println!("{}", format_mapping(&feed.mapping));
                    }
                }
                FeedCommand::Rss { id } => {
                    let feed = store
                        .get(id)
                        .ok_or_else(|| anyhow::anyhow!("no feed with id {id}"))?;
                    let base_url = Url::parse(&feed.url)
                        .with_context(|| format!("invalid feed url {:?}", feed.url))?;
                    let mut fetcher = PageFetcher::new(&config.fetch)?;
                    let html = fetcher.fetch(&feed.url).await?;
                    let items = extract_items(&html, &base_url, &feed.mapping, RSS_ITEM_LIMIT)?;
                    println!("{}", generate_rss(feed, &items));
                }
                FeedCommand::Rm { id } => {
                    store.delete(id)?;
                    println!("Deleted feed {id}");
                }
            }
        }
    }

    Ok(())
}
