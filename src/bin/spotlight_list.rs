//! Print a catalog listing filtered by category.
//!
//! Text output is meant for terminals, `html` emits the filter bar and card
//! grid fragment, and `json` emits the visible items with their routes. An
//! unknown category is not an error; it prints the empty-result notice.

use aef_spotlight::listing::{listing, render_listing_html, render_listing_text};
use aef_spotlight::runtime::{arg_string, catalog_path_or_default, init_logging, next_value};
use aef_spotlight::{BrowseSession, CatalogIndex, CatalogKey, CategoryFilter};
use anyhow::{Result, bail};
use std::env;
use std::path::PathBuf;

fn main() {
    init_logging();
    if let Err(err) = run() {
        eprintln!("{err:#}");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let args = CliArgs::parse()?;
    let path = catalog_path_or_default(args.catalog, &args.key)?;
    let index = CatalogIndex::load(&path)?;

    let mut session = BrowseSession::new(index.items());
    session.set_category(args.filter);

    match args.format {
        OutputFormat::Text => print!("{}", render_listing_text(&session, index.key())),
        OutputFormat::Html => print!(
            "{}",
            render_listing_html(&session, index.categories(), index.key())
        ),
        OutputFormat::Json => println!(
            "{}",
            serde_json::to_string_pretty(&listing(&session, index.key()))?
        ),
    }
    Ok(())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum OutputFormat {
    Text,
    Html,
    Json,
}

impl OutputFormat {
    fn from_str(raw: &str) -> Result<Self> {
        match raw {
            "text" => Ok(Self::Text),
            "html" => Ok(Self::Html),
            "json" => Ok(Self::Json),
            other => bail!("unknown format '{other}' (expected text|html|json)"),
        }
    }
}

struct CliArgs {
    catalog: Option<PathBuf>,
    key: CatalogKey,
    filter: CategoryFilter,
    format: OutputFormat,
}

impl CliArgs {
    fn parse() -> Result<Self> {
        let mut args = env::args_os().skip(1);
        let mut catalog = None;
        let mut key = CatalogKey::Spotlight;
        let mut filter = CategoryFilter::All;
        let mut format = OutputFormat::Text;

        while let Some(arg_os) = args.next() {
            let arg = arg_string(arg_os)?;
            match arg.as_str() {
                "--catalog" => catalog = Some(PathBuf::from(next_value(&mut args, "--catalog")?)),
                "--key" => key = CatalogKey::from_str(&next_value(&mut args, "--key")?),
                "--category" => {
                    filter = CategoryFilter::from_str(&next_value(&mut args, "--category")?)
                }
                "--format" => format = OutputFormat::from_str(&next_value(&mut args, "--format")?)?,
                "--help" | "-h" => {
                    print!("{}", usage());
                    std::process::exit(0);
                }
                other => bail!("unknown flag: {other}\n{}", usage()),
            }
        }

        Ok(Self {
            catalog,
            key,
            filter,
            format,
        })
    }
}

fn usage() -> &'static str {
    "Usage: spotlight-list [--catalog PATH | --key spotlight|forums] [--category NAME] [--format text|html|json]\n\
Lists catalog items matching the category (default: All) in catalog order.\n"
}
