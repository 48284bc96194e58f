//! List view: filter bar, item cards, and the empty-result notice.

use crate::catalog::{ALL_CATEGORIES_LABEL, CatalogKey, CategoryFilter, ContentItem};
use crate::filter::BrowseSession;
use crate::markup::escape_html;
use crate::navigation::route_for;
use serde::Serialize;
use std::fmt::{self, Write};

/// Message shown in place of the grid when nothing matches.
pub fn empty_notice(key: &CatalogKey) -> String {
    let noun = match key {
        CatalogKey::Spotlight => "articles",
        CatalogKey::Forums => "forums",
        CatalogKey::Other(_) => "items",
    };
    format!("No {noun} found in this category.")
}

/// Filter buttons: `All` followed by the catalog's categories.
pub fn write_filter_bar(
    out: &mut impl Write,
    categories: &[String],
    active: &CategoryFilter,
) -> fmt::Result {
    writeln!(out, "<div class=\"filter-bar\">")?;
    writeln!(out, "<span class=\"filter-label\">Filter by:</span>")?;
    let labels = std::iter::once(ALL_CATEGORIES_LABEL).chain(categories.iter().map(String::as_str));
    for label in labels {
        let pressed = active.as_str() == label;
        writeln!(
            out,
            "<button type=\"button\" class=\"filter{}\" data-category=\"{}\" aria-pressed=\"{pressed}\">{}</button>",
            if pressed { " active" } else { "" },
            escape_html(label),
            escape_html(label)
        )?;
    }
    writeln!(out, "</div>")
}

/// Card grid for the session's visible items, or the empty notice.
pub fn write_grid(out: &mut impl Write, session: &BrowseSession<'_>, key: &CatalogKey) -> fmt::Result {
    if session.visible().is_empty() {
        return writeln!(
            out,
            "<div class=\"empty\"><p>{}</p></div>",
            empty_notice(key)
        );
    }
    writeln!(out, "<div class=\"grid\">")?;
    for item in session.visible() {
        write_card(out, item, key)?;
    }
    writeln!(out, "</div>")
}

fn write_card(out: &mut impl Write, item: &ContentItem, key: &CatalogKey) -> fmt::Result {
    let title = escape_html(&item.title);
    writeln!(
        out,
        "<a class=\"card\" href=\"{}\" data-id=\"{}\">",
        escape_html(&route_for(key, item)),
        escape_html(&item.id.to_string())
    )?;
    if let Some(image) = &item.image {
        writeln!(out, "<img src=\"{}\" alt=\"{title}\">", escape_html(image))?;
    }
    writeln!(out, "<div class=\"card-body\">")?;
    if let Some(category) = item.category_str() {
        writeln!(out, "<span class=\"badge\">{}</span>", escape_html(category))?;
    }
    writeln!(out, "<h3>{title}</h3>")?;
    if let Some(summary) = &item.summary {
        writeln!(out, "<p>{}</p>", escape_html(summary))?;
    }
    writeln!(out, "<div class=\"card-footer\">")?;
    if let Some(date) = item.display_date() {
        writeln!(out, "<span class=\"date\">{date}</span>")?;
    }
    writeln!(out, "<span class=\"more\">Read More</span>")?;
    writeln!(out, "</div>")?;
    writeln!(out, "</div>")?;
    writeln!(out, "</a>")
}

/// Filter bar plus grid as one HTML fragment.
pub fn render_listing_html(
    session: &BrowseSession<'_>,
    categories: &[String],
    key: &CatalogKey,
) -> String {
    let mut out = String::new();
    let _ = write_filter_bar(&mut out, categories, session.filter())
        .and_then(|()| write_grid(&mut out, session, key));
    out
}

/// Terminal listing in the style of the other summaries.
pub fn render_listing_text(session: &BrowseSession<'_>, key: &CatalogKey) -> String {
    let mut out = String::new();
    let _ = write_listing_text(&mut out, session, key);
    out
}

fn write_listing_text(out: &mut impl Write, session: &BrowseSession<'_>, key: &CatalogKey) -> fmt::Result {
    writeln!(out, "{key} listing")?;
    writeln!(out, "==========================")?;
    writeln!(out, "filter : {}", session.filter())?;
    writeln!(
        out,
        "showing: {} of {}",
        session.visible().len(),
        session.items().len()
    )?;
    writeln!(out)?;
    if session.visible().is_empty() {
        return writeln!(out, "{}", empty_notice(key));
    }
    for (idx, item) in session.visible().iter().enumerate() {
        writeln!(out, "[#{}] {}", idx + 1, item.title)?;
        let mut facts = Vec::new();
        if let Some(category) = item.category_str() {
            facts.push(category.to_string());
        }
        if let Some(date) = item.display_date() {
            facts.push(date);
        }
        if !facts.is_empty() {
            writeln!(out, "  {}", facts.join(" | "))?;
        }
        writeln!(out, "  route: {}", route_for(key, item))?;
    }
    Ok(())
}

#[derive(Debug, Serialize)]
/// One row of the JSON listing.
pub struct ListingEntry<'a> {
    #[serde(flatten)]
    pub item: &'a ContentItem,
    pub route: String,
}

#[derive(Debug, Serialize)]
/// JSON listing: the active filter and the visible items with routes.
pub struct Listing<'a> {
    pub catalog: &'a CatalogKey,
    pub filter: &'a CategoryFilter,
    pub total: usize,
    pub items: Vec<ListingEntry<'a>>,
}

pub fn listing<'a>(session: &'a BrowseSession<'a>, key: &'a CatalogKey) -> Listing<'a> {
    Listing {
        catalog: key,
        filter: session.filter(),
        total: session.items().len(),
        items: session
            .visible()
            .iter()
            .map(|&item| ListingEntry {
                item,
                route: route_for(key, item),
            })
            .collect(),
    }
}
