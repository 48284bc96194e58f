//! Validate content catalogs and print a per-category summary.
//!
//! With no `--catalog` flags every `*.json` file under the repo's `catalog/`
//! directory is checked. Any schema or index failure exits non-zero.

use aef_spotlight::runtime::{arg_string, init_logging, next_value};
use aef_spotlight::{
    CatalogIndex, CatalogRepository, CategoryFilter, derive_visible, find_repo_root,
    load_repository,
};
use anyhow::{Result, bail};
use std::env;
use std::fmt::{self, Write};
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
    let repository = if args.catalogs.is_empty() {
        load_repository(&find_repo_root()?)?
    } else {
        let mut repository = CatalogRepository::default();
        for path in &args.catalogs {
            repository.register(CatalogIndex::load(path)?);
        }
        repository
    };

    let mut output = String::new();
    for key in repository.keys() {
        if let Some(index) = repository.get(key) {
            render_summary(index, &mut output)?;
        }
    }
    print!("{output}");
    Ok(())
}

fn render_summary(index: &CatalogIndex, out: &mut impl Write) -> fmt::Result {
    writeln!(out, "{} ({})", index.title(), index.key())?;
    writeln!(out, "  items     : {}", index.items().len())?;
    writeln!(out, "  categories: {}", index.categories().len())?;
    for category in index.categories() {
        let count = derive_visible(index.items(), &CategoryFilter::only(category.as_str())).len();
        writeln!(out, "    {:<36} {}", category, count)?;
    }
    let unlisted = index
        .items()
        .iter()
        .filter(|item| {
            item.category_str()
                .is_none_or(|category| !index.categories().iter().any(|c| c == category))
        })
        .count();
    if unlisted > 0 {
        writeln!(out, "    {:<36} {}", "(not in filter list)", unlisted)?;
    }
    writeln!(out)
}

struct CliArgs {
    catalogs: Vec<PathBuf>,
}

impl CliArgs {
    fn parse() -> Result<Self> {
        let mut args = env::args_os().skip(1);
        let mut catalogs = Vec::new();
        while let Some(arg_os) = args.next() {
            let arg = arg_string(arg_os)?;
            match arg.as_str() {
                "--catalog" => catalogs.push(PathBuf::from(next_value(&mut args, "--catalog")?)),
                "--help" | "-h" => {
                    print!("{}", usage());
                    std::process::exit(0);
                }
                other => bail!("unknown flag: {other}\n{}", usage()),
            }
        }
        Ok(Self { catalogs })
    }
}

fn usage() -> &'static str {
    "Usage: catalog-check [--catalog PATH]...\n\
Validates content catalogs against schema/content_catalog.schema.json and prints item counts per category.\n"
}
