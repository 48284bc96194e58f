//! Category filtering and selection state for one view.
//!
//! `derive_visible` is the pure stable filter. `BrowseSession` owns the state
//! a single page view mutates: the active filter, the derived visible subset,
//! and which item (if any) is open in the detail view. Nothing here looks at
//! the signed-in user.

use crate::catalog::{CategoryFilter, ContentItem, ItemId};
use tracing::debug;

/// Reduce `items` to those matching `filter`, preserving catalog order.
///
/// `All` returns every item. A category no item carries yields an empty
/// vector; that is a normal outcome, not an error.
pub fn derive_visible<'a>(items: &'a [ContentItem], filter: &CategoryFilter) -> Vec<&'a ContentItem> {
    items
        .iter()
        .filter(|item| filter.matches(item.category.as_ref()))
        .collect()
}

/// Detail view state. There is no terminal state; the view toggles between
/// these for its whole lifetime.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum DetailState<'a> {
    #[default]
    Closed,
    Open(&'a ContentItem),
}

impl<'a> DetailState<'a> {
    pub fn is_open(&self) -> bool {
        matches!(self, DetailState::Open(_))
    }

    pub fn item(&self) -> Option<&'a ContentItem> {
        match self {
            DetailState::Open(item) => Some(item),
            DetailState::Closed => None,
        }
    }
}

/// Filter and selection state owned by one page view.
#[derive(Debug)]
pub struct BrowseSession<'a> {
    items: &'a [ContentItem],
    filter: CategoryFilter,
    visible: Vec<&'a ContentItem>,
    detail: DetailState<'a>,
}

impl<'a> BrowseSession<'a> {
    /// Start with no filtering and the detail view closed.
    pub fn new(items: &'a [ContentItem]) -> Self {
        Self {
            items,
            filter: CategoryFilter::All,
            visible: items.iter().collect(),
            detail: DetailState::Closed,
        }
    }

    pub fn items(&self) -> &'a [ContentItem] {
        self.items
    }

    pub fn filter(&self) -> &CategoryFilter {
        &self.filter
    }

    /// Replace the filter and recompute the visible subset.
    pub fn set_category(&mut self, filter: CategoryFilter) {
        self.visible = derive_visible(self.items, &filter);
        debug!(filter = %filter, visible = self.visible.len(), "category filter changed");
        self.filter = filter;
    }

    /// Items matching the current filter, in catalog order.
    pub fn visible(&self) -> &[&'a ContentItem] {
        &self.visible
    }

    pub fn detail(&self) -> DetailState<'a> {
        self.detail
    }

    pub fn selected(&self) -> Option<&'a ContentItem> {
        self.detail.item()
    }

    /// Open `item` in the detail view, replacing any open item. `None`
    /// closes the view.
    pub fn select(&mut self, item: Option<&'a ContentItem>) {
        match item {
            Some(item) => {
                debug!(item = %item.id, "detail view opened");
                self.detail = DetailState::Open(item);
            }
            None => self.close(),
        }
    }

    /// Select by id among this session's items. Unknown ids close the view.
    pub fn select_id(&mut self, id: &ItemId) -> bool {
        let found = self.items.iter().find(|item| &item.id == id);
        if found.is_none() {
            debug!(item = %id, "selected id not in catalog");
        }
        self.select(found);
        found.is_some()
    }

    /// Close the detail view. Closing an already closed view does nothing.
    pub fn close(&mut self) {
        if self.detail.is_open() {
            debug!("detail view closed");
        }
        self.detail = DetailState::Closed;
    }
}
