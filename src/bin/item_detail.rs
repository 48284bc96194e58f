//! Render the detail view for one catalog item.
//!
//! The id is matched as a number, then as a string id, then as a slug.

use aef_spotlight::runtime::{arg_string, catalog_path_or_default, init_logging, next_value};
use aef_spotlight::{BrowseSession, CatalogIndex, CatalogKey, render_detail_html, render_detail_text};
use anyhow::{Result, anyhow, bail};
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

    let item = index.resolve(&args.id).ok_or_else(|| {
        anyhow!(
            "no item '{}' in catalog {} ({})",
            args.id,
            index.key(),
            path.display()
        )
    })?;
    let mut session = BrowseSession::new(index.items());
    session.select(Some(item));

    let rendered = if args.html {
        render_detail_html(session.detail(), index.key())
    } else {
        render_detail_text(session.detail(), index.key())
    };
    print!("{rendered}");
    Ok(())
}

struct CliArgs {
    catalog: Option<PathBuf>,
    key: CatalogKey,
    id: String,
    html: bool,
}

impl CliArgs {
    fn parse() -> Result<Self> {
        let mut args = env::args_os().skip(1);
        let mut catalog = None;
        let mut key = CatalogKey::Forums;
        let mut id: Option<String> = None;
        let mut html = false;

        while let Some(arg_os) = args.next() {
            let arg = arg_string(arg_os)?;
            match arg.as_str() {
                "--catalog" => catalog = Some(PathBuf::from(next_value(&mut args, "--catalog")?)),
                "--key" => key = CatalogKey::from_str(&next_value(&mut args, "--key")?),
                "--id" => id = Some(next_value(&mut args, "--id")?),
                "--format" => {
                    html = match next_value(&mut args, "--format")?.as_str() {
                        "text" => false,
                        "html" => true,
                        other => bail!("unknown format '{other}' (expected text|html)"),
                    }
                }
                "--help" | "-h" => {
                    print!("{}", usage());
                    std::process::exit(0);
                }
                other => bail!("unknown flag: {other}\n{}", usage()),
            }
        }

        let Some(id) = id.filter(|id| !id.trim().is_empty()) else {
            bail!("--id is required\n{}", usage());
        };

        Ok(Self {
            catalog,
            key,
            id,
            html,
        })
    }
}

fn usage() -> &'static str {
    "Usage: item-detail [--catalog PATH | --key forums|spotlight] --id ID [--format text|html]\n\
Prints the detail view for one item: overview, focus areas, objectives, pillars, stakeholders, purpose.\n"
}
