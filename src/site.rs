//! Full page assembly and output.
//!
//! A page is the header (navigation plus account section), a hero banner,
//! the filter bar and grid, and the detail overlay when something is
//! selected. Pages are plain strings; `write_page` persists them atomically.

use crate::account::{AccountMenu, CurrentUser};
use crate::catalog::{CatalogIndex, CatalogKey};
use crate::filter::BrowseSession;
use crate::listing::{write_filter_bar, write_grid};
use crate::markup::escape_html;
use crate::navigation::{SiteNav, SitePage};
use crate::presenter::render_detail_html;
use anyhow::{Context, Result, bail};
use std::fmt::{self, Write};
use std::fs;
use std::io::Write as _;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tracing::info;

const LOGO_URL: &str = "/assets/aef-logo.png";

/// Heading block at the top of a listing page.
#[derive(Clone, Copy, Debug)]
pub struct Hero {
    pub title: &'static str,
    pub subtitle: &'static str,
    pub blurb: &'static str,
}

impl Hero {
    pub fn for_catalog(key: &CatalogKey) -> Self {
        match key {
            CatalogKey::Forums => Hero {
                title: "Meetings",
                subtitle: "AEF Forums & Convenings",
                blurb: "Thematic forums where governments, investors, and institutions shape Africa's economic agenda.",
            },
            _ => Hero {
                title: "Spotlight",
                subtitle: "AEF Strategic Announcements & Institutional Milestones",
                blurb: "Spotlight is the official platform for Africa Economic Forum's major partnerships, flagship initiatives, institutional announcements, and strategic thought leadership shaping Africa's role in global realignments.",
            },
        }
    }
}

/// Header chrome state for one rendered page.
pub struct PageChrome<'a> {
    pub nav: &'a SiteNav,
    pub account: &'a AccountMenu,
    pub user: Option<&'a CurrentUser>,
}

/// Which site page a catalog is listed on.
pub fn page_for(key: &CatalogKey) -> SitePage {
    match key {
        CatalogKey::Forums => SitePage::Meetings,
        _ => SitePage::Spotlight,
    }
}

/// Render a complete listing page for `catalog` using `session`'s state.
pub fn render_page(catalog: &CatalogIndex, session: &BrowseSession<'_>, chrome: &PageChrome<'_>) -> String {
    let mut out = String::new();
    let _ = write_page_html(&mut out, catalog, session, chrome);
    out
}

fn write_page_html(
    out: &mut impl Write,
    catalog: &CatalogIndex,
    session: &BrowseSession<'_>,
    chrome: &PageChrome<'_>,
) -> fmt::Result {
    let hero = Hero::for_catalog(catalog.key());
    writeln!(out, "<!DOCTYPE html>")?;
    writeln!(out, "<html lang=\"en\">")?;
    writeln!(out, "<head>")?;
    writeln!(out, "<meta charset=\"utf-8\">")?;
    writeln!(out, "<title>{} | Africa Economic Forum</title>", escape_html(hero.title))?;
    writeln!(out, "</head>")?;
    writeln!(out, "<body>")?;

    writeln!(out, "<header>")?;
    writeln!(
        out,
        "<a class=\"logo\" href=\"{}\"><img src=\"{LOGO_URL}\" alt=\"AEF Logo\"></a>",
        SitePage::Home.path()
    )?;
    chrome.nav.write_links(out, "site-nav")?;
    chrome.account.write_html(out, chrome.user)?;
    chrome.nav.write_mobile(out)?;
    writeln!(out, "</header>")?;

    writeln!(out, "<section class=\"hero\">")?;
    writeln!(out, "<h1>{}</h1>", escape_html(hero.title))?;
    writeln!(out, "<h2>{}</h2>", escape_html(hero.subtitle))?;
    writeln!(out, "<p>{}</p>", escape_html(hero.blurb))?;
    writeln!(out, "</section>")?;

    if !catalog.categories().is_empty() {
        writeln!(out, "<section class=\"filters\">")?;
        write_filter_bar(out, catalog.categories(), session.filter())?;
        writeln!(out, "</section>")?;
    }

    writeln!(out, "<section class=\"listing\">")?;
    write_grid(out, session, catalog.key())?;
    writeln!(out, "</section>")?;

    out.write_str(&render_detail_html(session.detail(), catalog.key()))?;

    writeln!(out, "</body>")?;
    writeln!(out, "</html>")
}

/// Write `html` to `dir/name` through a temp file in the same directory.
pub fn write_page(dir: &Path, name: &str, html: &str) -> Result<PathBuf> {
    if name.is_empty() || name.contains('/') || name.contains('\\') {
        bail!("page name must be a bare file name, got '{name}'");
    }
    fs::create_dir_all(dir).with_context(|| format!("creating {}", dir.display()))?;
    let target = dir.join(name);
    let mut tmp = NamedTempFile::new_in(dir)
        .with_context(|| format!("creating temp file in {}", dir.display()))?;
    tmp.write_all(html.as_bytes())
        .with_context(|| format!("writing {}", target.display()))?;
    tmp.persist(&target)
        .with_context(|| format!("persisting {}", target.display()))?;
    info!(path = %target.display(), bytes = html.len(), "wrote page");
    Ok(target)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{CATALOG_SCHEMA_VERSION, CategoryFilter, ContentCatalog, ContentItem, ItemId};
    use tempfile::TempDir;

    fn spotlight() -> CatalogIndex {
        let mut first = ContentItem::new(ItemId::Slug("partnership".into()), "Partnership")
            .with_category("Institutional Partnership");
        first.overview = Some("A partnership overview.".into());
        CatalogIndex::from_catalog(ContentCatalog {
            schema_version: CATALOG_SCHEMA_VERSION.to_string(),
            key: CatalogKey::Spotlight,
            title: "Spotlight".into(),
            categories: vec!["Institutional Partnership".into(), "Flagship Platform".into()],
            items: vec![
                first,
                ContentItem::new(ItemId::Slug("platform".into()), "Platform")
                    .with_category("Flagship Platform"),
            ],
        })
        .unwrap()
    }

    #[test]
    fn page_includes_overlay_only_when_selected() {
        let catalog = spotlight();
        let nav = SiteNav::new(page_for(catalog.key()));
        let account = AccountMenu::default();
        let chrome = PageChrome {
            nav: &nav,
            account: &account,
            user: None,
        };
        let mut session = BrowseSession::new(catalog.items());
        let closed = render_page(&catalog, &session, &chrome);
        assert!(closed.contains("<h1>Spotlight</h1>"));
        assert!(closed.contains("Sign In"));
        assert!(!closed.contains("detail-overlay"));

        session.select(catalog.item(&ItemId::Slug("partnership".into())));
        let open = render_page(&catalog, &session, &chrome);
        assert!(open.contains("detail-overlay"));
        assert!(open.contains("A partnership overview."));
    }

    #[test]
    fn signed_in_state_does_not_change_listing() {
        let catalog = spotlight();
        let nav = SiteNav::new(SitePage::Spotlight);
        let account = AccountMenu::default();
        let user = CurrentUser {
            full_name: Some("Kofi Annan".into()),
            ..Default::default()
        };
        let mut session = BrowseSession::new(catalog.items());
        session.set_category(CategoryFilter::only("Flagship Platform"));

        let anonymous = render_page(
            &catalog,
            &session,
            &PageChrome {
                nav: &nav,
                account: &account,
                user: None,
            },
        );
        let signed_in = render_page(
            &catalog,
            &session,
            &PageChrome {
                nav: &nav,
                account: &account,
                user: Some(&user),
            },
        );
        let listing = |page: &str| {
            let start = page.find("<section class=\"listing\">").unwrap();
            page[start..].to_string()
        };
        assert_eq!(listing(&anonymous), listing(&signed_in));
        assert!(signed_in.contains(">KA</span>"));
    }

    #[test]
    fn write_page_replaces_existing_file() {
        let dir = TempDir::new().unwrap();
        let first = write_page(dir.path(), "spotlight.html", "one").unwrap();
        let second = write_page(dir.path(), "spotlight.html", "two").unwrap();
        assert_eq!(first, second);
        assert_eq!(fs::read_to_string(&second).unwrap(), "two");
        assert!(write_page(dir.path(), "../escape.html", "x").is_err());
    }
}
