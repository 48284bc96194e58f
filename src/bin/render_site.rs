//! Render the Spotlight and Meetings pages plus one page per item.
//!
//! Listing pages land at `<out>/spotlight.html` and `<out>/meetings.html`;
//! item pages follow their routes (`<out>/spotlight/<slug>.html`,
//! `<out>/meetings/<id>.html`) and are rendered with the item's detail view
//! open. `--category` and `--select` only affect the Spotlight listing page.

use aef_spotlight::runtime::{arg_string, init_logging, next_value};
use aef_spotlight::site::{PageChrome, page_for, render_page, write_page};
use aef_spotlight::{
    AccountMenu, BrowseSession, CatalogIndex, CatalogKey, CategoryFilter, CurrentUser, ItemId,
    SiteNav, find_repo_root, load_repository, route_for,
};
use anyhow::{Result, bail};
use std::env;
use std::path::{Path, PathBuf};
use tracing::warn;

fn main() {
    init_logging();
    if let Err(err) = run() {
        eprintln!("{err:#}");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let args = CliArgs::parse()?;
    let root = match args.root.clone() {
        Some(root) => root,
        None => find_repo_root()?,
    };
    let repository = load_repository(&root)?;

    let account = AccountMenu::default();
    let mut written = 0usize;
    for key in repository.keys() {
        let Some(index) = repository.get(key) else {
            continue;
        };
        written += render_catalog(index, &args, &account)?;
    }
    println!("wrote {written} pages to {}", args.out.display());
    Ok(())
}

fn render_catalog(index: &CatalogIndex, args: &CliArgs, account: &AccountMenu) -> Result<usize> {
    let nav = SiteNav::new(page_for(index.key()));
    let chrome = PageChrome {
        nav: &nav,
        account,
        user: args.user.as_ref(),
    };

    let mut session = BrowseSession::new(index.items());
    if index.key() == &CatalogKey::Spotlight {
        session.set_category(args.filter.clone());
        if let Some(id) = &args.select {
            if !session.select_id(id) {
                warn!(item = %id, "--select did not match any Spotlight item");
            }
        }
    }
    let listing_name = match index.key() {
        CatalogKey::Forums => "meetings.html".to_string(),
        key => format!("{key}.html"),
    };
    write_page(&args.out, &listing_name, &render_page(index, &session, &chrome))?;
    let mut written = 1;

    for item in index.items() {
        let mut item_session = BrowseSession::new(index.items());
        item_session.select(Some(item));
        let route = route_for(index.key(), item);
        let (dir, name) = route_target(&args.out, &route)?;
        write_page(&dir, &name, &render_page(index, &item_session, &chrome))?;
        written += 1;
    }
    Ok(written)
}

/// Split `/section/leaf` into `<out>/section` and `leaf.html`.
fn route_target(out: &Path, route: &str) -> Result<(PathBuf, String)> {
    let trimmed = route.trim_start_matches('/');
    let Some((section, leaf)) = trimmed.rsplit_once('/') else {
        bail!("route '{route}' has no item segment");
    };
    if section.is_empty() || leaf.is_empty() || section.split('/').any(|part| part == "..") {
        bail!("route '{route}' cannot be mapped to a file");
    }
    Ok((out.join(section), format!("{leaf}.html")))
}

struct CliArgs {
    root: Option<PathBuf>,
    out: PathBuf,
    user: Option<CurrentUser>,
    filter: CategoryFilter,
    select: Option<ItemId>,
}

impl CliArgs {
    fn parse() -> Result<Self> {
        let mut args = env::args_os().skip(1);
        let mut root = None;
        let mut out = PathBuf::from("site");
        let mut user = CurrentUser::default();
        let mut signed_in = false;
        let mut filter = CategoryFilter::All;
        let mut select = None;

        while let Some(arg_os) = args.next() {
            let arg = arg_string(arg_os)?;
            match arg.as_str() {
                "--root" => root = Some(PathBuf::from(next_value(&mut args, "--root")?)),
                "--out" => out = PathBuf::from(next_value(&mut args, "--out")?),
                "--user-name" => {
                    user.full_name = Some(next_value(&mut args, "--user-name")?);
                    signed_in = true;
                }
                "--user-email" => {
                    user.email = Some(next_value(&mut args, "--user-email")?);
                    signed_in = true;
                }
                "--user-avatar" => {
                    user.avatar_url = Some(next_value(&mut args, "--user-avatar")?);
                    signed_in = true;
                }
                "--category" => {
                    filter = CategoryFilter::from_str(&next_value(&mut args, "--category")?)
                }
                "--select" => select = Some(ItemId::parse(&next_value(&mut args, "--select")?)),
                "--help" | "-h" => {
                    print!("{}", usage());
                    std::process::exit(0);
                }
                other => bail!("unknown flag: {other}\n{}", usage()),
            }
        }

        Ok(Self {
            root,
            out,
            user: signed_in.then_some(user),
            filter,
            select,
        })
    }
}

fn usage() -> &'static str {
    "Usage: render-site [--root DIR] [--out DIR] [--user-name NAME] [--user-email EMAIL] [--user-avatar URL] [--category NAME] [--select ID]\n\
Renders every catalog under <root>/catalog to static HTML in <out> (default: ./site).\n\
Any --user-* flag renders the header as signed in.\n"
}
