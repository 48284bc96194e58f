//! Detail (modal) presenter.
//!
//! A selected item is turned into an ordered list of sections before anything
//! is rendered. The order is fixed here: overview, grouped lists
//! (focus areas, objectives, pillars), stakeholders, then the purpose block.
//! Fields missing from the record produce no section at all.
//!
//! Every close control in the rendered markup carries a `data-target` naming
//! a `ClickTarget`; `BrowseSession::handle_click` is the single place that
//! decides what a click does, so clicks inside the panel never close it.

use crate::catalog::{CatalogKey, ContentItem, Pillar};
use crate::filter::{BrowseSession, DetailState};
use crate::markup::{escape_html, write_list};
use std::fmt::{self, Write};

/// One rendered block of the detail view.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DetailSection<'a> {
    Overview(&'a str),
    KeyFocusAreas(&'a [String]),
    Objectives(&'a [String]),
    Pillars(&'a [Pillar]),
    Stakeholders(&'a [String]),
    Purpose(&'a str),
}

impl DetailSection<'_> {
    /// Section heading as shown for items of catalog `key`. Forum meetings
    /// title their closing block "Forum Purpose".
    pub fn heading(&self, key: &CatalogKey) -> &'static str {
        match self {
            DetailSection::Overview(_) => "Overview",
            DetailSection::KeyFocusAreas(_) => "Key Focus Areas",
            DetailSection::Objectives(_) => "Objectives",
            DetailSection::Pillars(_) => "Strategic Pillars",
            DetailSection::Stakeholders(_) => "Key Stakeholders",
            DetailSection::Purpose(_) => match key {
                CatalogKey::Forums => "Forum Purpose",
                _ => "Purpose",
            },
        }
    }

    fn class(&self) -> &'static str {
        match self {
            DetailSection::Overview(_) => "detail-overview",
            DetailSection::KeyFocusAreas(_) => "detail-key-areas",
            DetailSection::Objectives(_) => "detail-objectives",
            DetailSection::Pillars(_) => "detail-pillars",
            DetailSection::Stakeholders(_) => "detail-stakeholders",
            DetailSection::Purpose(_) => "detail-purpose",
        }
    }
}

/// Sections for `item`, in display order.
pub fn detail_sections(item: &ContentItem) -> Vec<DetailSection<'_>> {
    let mut sections = Vec::new();
    if let Some(overview) = item.overview.as_deref() {
        sections.push(DetailSection::Overview(overview));
    }
    if let Some(areas) = item.key_areas.as_deref() {
        sections.push(DetailSection::KeyFocusAreas(areas));
    }
    if let Some(objectives) = item.objectives.as_deref() {
        sections.push(DetailSection::Objectives(objectives));
    }
    if let Some(pillars) = item.pillars.as_deref() {
        sections.push(DetailSection::Pillars(pillars));
    }
    if let Some(stakeholders) = item.stakeholders.as_deref() {
        sections.push(DetailSection::Stakeholders(stakeholders));
    }
    if let Some(purpose) = item.purpose.as_deref() {
        sections.push(DetailSection::Purpose(purpose));
    }
    sections
}

/// Where a click landed inside the detail overlay.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ClickTarget {
    /// The dimmed backdrop around the panel.
    Overlay,
    /// Anywhere inside the panel that is not a close control.
    Panel,
    /// The round button over the header image.
    CloseButton,
    /// The "Close" button at the bottom of the panel.
    FooterClose,
}

impl ClickTarget {
    pub fn as_str(&self) -> &'static str {
        match self {
            ClickTarget::Overlay => "overlay",
            ClickTarget::Panel => "panel",
            ClickTarget::CloseButton => "close-button",
            ClickTarget::FooterClose => "footer-close",
        }
    }

    fn closes(&self) -> bool {
        !matches!(self, ClickTarget::Panel)
    }
}

/// What a click did to the detail view.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DetailOutcome {
    /// The view was open and is now closed.
    Closed,
    /// The click landed inside the panel and was contained.
    Contained,
    /// Nothing was open.
    Ignored,
}

impl BrowseSession<'_> {
    /// Apply a click on the detail overlay.
    pub fn handle_click(&mut self, target: ClickTarget) -> DetailOutcome {
        if !self.detail().is_open() {
            return DetailOutcome::Ignored;
        }
        if target.closes() {
            self.close();
            DetailOutcome::Closed
        } else {
            DetailOutcome::Contained
        }
    }
}

/// Render the detail overlay. A closed view renders nothing.
pub fn render_detail_html(state: DetailState<'_>, key: &CatalogKey) -> String {
    let mut out = String::new();
    if let DetailState::Open(item) = state {
        // Writing into a String cannot fail.
        let _ = write_detail_html(&mut out, item, key);
    }
    out
}

fn write_detail_html(out: &mut impl Write, item: &ContentItem, key: &CatalogKey) -> fmt::Result {
    let title = escape_html(&item.title);
    writeln!(
        out,
        "<div class=\"detail-overlay\" role=\"dialog\" aria-modal=\"true\" data-target=\"{}\">",
        ClickTarget::Overlay.as_str()
    )?;
    writeln!(
        out,
        "<div class=\"detail-panel\" data-target=\"{}\">",
        ClickTarget::Panel.as_str()
    )?;
    writeln!(out, "<div class=\"detail-header\">")?;
    if let Some(image) = &item.image {
        writeln!(out, "<img src=\"{}\" alt=\"{title}\">", escape_html(image))?;
    }
    writeln!(
        out,
        "<button type=\"button\" class=\"detail-close\" aria-label=\"Close\" data-target=\"{}\">&times;</button>",
        ClickTarget::CloseButton.as_str()
    )?;
    writeln!(out, "</div>")?;
    writeln!(out, "<div class=\"detail-body\">")?;
    writeln!(out, "<h2>{title}</h2>")?;
    for section in detail_sections(item) {
        write_section_html(out, &section, key)?;
    }
    writeln!(out, "</div>")?;
    writeln!(out, "<div class=\"detail-footer\">")?;
    writeln!(
        out,
        "<button type=\"button\" data-target=\"{}\">Close</button>",
        ClickTarget::FooterClose.as_str()
    )?;
    writeln!(out, "</div>")?;
    writeln!(out, "</div>")?;
    writeln!(out, "</div>")
}

fn write_section_html(
    out: &mut impl Write,
    section: &DetailSection<'_>,
    key: &CatalogKey,
) -> fmt::Result {
    writeln!(out, "<section class=\"{}\">", section.class())?;
    writeln!(out, "<h3>{}</h3>", section.heading(key))?;
    match section {
        DetailSection::Overview(text) | DetailSection::Purpose(text) => {
            writeln!(out, "<p>{}</p>", escape_html(text))?;
        }
        DetailSection::KeyFocusAreas(entries) | DetailSection::Objectives(entries) => {
            write_list(out, "checklist", entries)?;
        }
        DetailSection::Stakeholders(entries) => {
            writeln!(out, "<div class=\"tags\">")?;
            for entry in entries.iter() {
                writeln!(out, "  <span class=\"tag\">{}</span>", escape_html(entry))?;
            }
            writeln!(out, "</div>")?;
        }
        DetailSection::Pillars(pillars) => {
            for pillar in pillars.iter() {
                writeln!(out, "<h4>{}</h4>", escape_html(&pillar.title))?;
                write_list(out, "pillar-items", &pillar.items)?;
            }
        }
    }
    writeln!(out, "</section>")
}

/// Plain-text rendering of the detail view for terminals.
pub fn render_detail_text(state: DetailState<'_>, key: &CatalogKey) -> String {
    let mut out = String::new();
    if let DetailState::Open(item) = state {
        let _ = write_detail_text(&mut out, item, key);
    }
    out
}

fn write_detail_text(out: &mut impl Write, item: &ContentItem, key: &CatalogKey) -> fmt::Result {
    writeln!(out, "{}", item.title)?;
    writeln!(out, "{}", "=".repeat(item.title.chars().count().max(3)))?;
    if let Some(category) = item.category_str() {
        writeln!(out, "category: {category}")?;
    }
    if let Some(date) = item.display_date() {
        writeln!(out, "date:     {date}")?;
    }
    for section in detail_sections(item) {
        writeln!(out)?;
        writeln!(out, "{}", section.heading(key))?;
        match section {
            DetailSection::Overview(text) | DetailSection::Purpose(text) => {
                writeln!(out, "  {text}")?;
            }
            DetailSection::KeyFocusAreas(entries)
            | DetailSection::Objectives(entries)
            | DetailSection::Stakeholders(entries) => {
                for entry in entries {
                    writeln!(out, "  - {entry}")?;
                }
            }
            DetailSection::Pillars(pillars) => {
                for pillar in pillars {
                    writeln!(out, "  {}", pillar.title)?;
                    for entry in &pillar.items {
                        writeln!(out, "    - {entry}")?;
                    }
                }
            }
        }
    }
    Ok(())
}
