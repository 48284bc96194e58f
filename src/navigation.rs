//! Routing intents and the site navigation menu.
//!
//! Nothing here performs navigation; activating a card or a menu entry yields
//! a `NavigationIntent` for whatever router hosts the pages.

use crate::catalog::{CatalogKey, ContentItem};
use crate::markup::escape_html;
use std::fmt::{self, Write};

/// A request to move to another page.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum NavigationIntent {
    Home,
    SignIn,
    Profile,
    Item { path: String },
}

impl NavigationIntent {
    pub fn path(&self) -> &str {
        match self {
            NavigationIntent::Home => "/",
            NavigationIntent::SignIn => "/signin",
            NavigationIntent::Profile => "/profile",
            NavigationIntent::Item { path } => path,
        }
    }
}

/// Detail route for an item. Articles route by slug (falling back to the
/// id), forum meetings by id.
pub fn route_for(key: &CatalogKey, item: &ContentItem) -> String {
    match key {
        CatalogKey::Spotlight => match &item.slug {
            Some(slug) => format!("/spotlight/{slug}"),
            None => format!("/spotlight/{}", item.id),
        },
        CatalogKey::Forums => format!("/meetings/{}", item.id),
        CatalogKey::Other(section) => match &item.slug {
            Some(slug) => format!("/{section}/{slug}"),
            None => format!("/{section}/{}", item.id),
        },
    }
}

/// Intent emitted when a listing card is activated.
pub fn activate(key: &CatalogKey, item: &ContentItem) -> NavigationIntent {
    NavigationIntent::Item {
        path: route_for(key, item),
    }
}

/// Top-level site pages, in header order.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SitePage {
    Home,
    About,
    Initiatives,
    Stakeholders,
    Agenda,
    Spotlight,
    Meetings,
    Contact,
}

impl SitePage {
    pub const ALL: [SitePage; 8] = [
        SitePage::Home,
        SitePage::About,
        SitePage::Initiatives,
        SitePage::Stakeholders,
        SitePage::Agenda,
        SitePage::Spotlight,
        SitePage::Meetings,
        SitePage::Contact,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            SitePage::Home => "Home",
            SitePage::About => "About",
            SitePage::Initiatives => "Initiative",
            SitePage::Stakeholders => "Stakeholders",
            SitePage::Agenda => "Agenda",
            SitePage::Spotlight => "Spotlight",
            SitePage::Meetings => "Meetings",
            SitePage::Contact => "Contact",
        }
    }

    pub fn path(&self) -> &'static str {
        match self {
            SitePage::Home => "/",
            SitePage::About => "/about",
            SitePage::Initiatives => "/initiatives",
            SitePage::Stakeholders => "/stakeholders",
            SitePage::Agenda => "/agenda",
            SitePage::Spotlight => "/spotlight",
            SitePage::Meetings => "/meetings",
            SitePage::Contact => "/contact",
        }
    }
}

/// Header navigation state: which page is current and whether the mobile
/// menu is expanded.
#[derive(Clone, Debug)]
pub struct SiteNav {
    active: SitePage,
    mobile_open: bool,
}

impl SiteNav {
    pub fn new(active: SitePage) -> Self {
        Self {
            active,
            mobile_open: false,
        }
    }

    pub fn active(&self) -> SitePage {
        self.active
    }

    pub fn is_mobile_open(&self) -> bool {
        self.mobile_open
    }

    pub fn toggle_mobile(&mut self) {
        self.mobile_open = !self.mobile_open;
    }

    pub fn close_mobile(&mut self) {
        self.mobile_open = false;
    }

    /// Render the desktop link list, marking the active page.
    pub fn write_links(&self, out: &mut impl Write, class: &str) -> fmt::Result {
        writeln!(out, "<nav class=\"{class}\">")?;
        for page in SitePage::ALL {
            if page == self.active {
                writeln!(
                    out,
                    "  <a href=\"{}\" class=\"active\" aria-current=\"page\">{}</a>",
                    page.path(),
                    escape_html(page.label())
                )?;
            } else {
                writeln!(
                    out,
                    "  <a href=\"{}\">{}</a>",
                    page.path(),
                    escape_html(page.label())
                )?;
            }
        }
        writeln!(out, "</nav>")
    }

    /// Render the hamburger toggle and, when expanded, the mobile link list.
    pub fn write_mobile(&self, out: &mut impl Write) -> fmt::Result {
        let icon = if self.mobile_open { "close" } else { "menu" };
        writeln!(
            out,
            "<button type=\"button\" class=\"menu-toggle\" aria-expanded=\"{}\"><i class=\"ri-{icon}-line\"></i></button>",
            self.mobile_open
        )?;
        if self.mobile_open {
            self.write_links(out, "mobile-nav")?;
        }
        Ok(())
    }
}
