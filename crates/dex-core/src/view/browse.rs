//! Browsing state shared by the list and favorites screens.

use crate::catalog::Catalog;
use crate::model::Item;
use crate::nav::favorites::FavoritesStore;
use crate::nav::filter::{apply_filters, apply_search, FilterConditions};
use crate::nav::pagination::{total_pages, Pager};
use crate::view::route::ListQuery;

/// Search text, filter, page and cursor of a browsing screen.
///
/// Changing the search text, the filter or the page size goes back to
/// page 1 and the top of the page.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BrowseState {
    search: String,
    filter: FilterConditions,
    pager: Pager,
    cursor: usize,
}

/// One rendered page.
#[derive(Debug, Clone, PartialEq)]
pub struct PageView<'a> {
    pub items: Vec<&'a Item>,
    /// Items left after search and filter.
    pub matched: usize,
    pub total_pages: usize,
    pub page: usize,
    pub page_size: usize,
}

impl PageView<'_> {
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl BrowseState {
    pub fn new(page_size: usize) -> Self {
        Self {
            pager: Pager::new(page_size),
            ..Self::default()
        }
    }

    /// Restores a view from its query string parameters.
    pub fn from_query(query: &ListQuery) -> Self {
        Self {
            search: query.search.clone(),
            pager: Pager::new(query.items).with_page(query.page),
            ..Self::default()
        }
    }

    pub fn query(&self) -> ListQuery {
        ListQuery {
            page: self.pager.page(),
            items: self.pager.page_size(),
            search: self.search.clone(),
        }
    }

    pub fn search(&self) -> &str {
        &self.search
    }

    pub fn filter(&self) -> &FilterConditions {
        &self.filter
    }

    pub fn pager(&self) -> Pager {
        self.pager
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    #[must_use]
    pub fn with_search(self, search: impl Into<String>) -> Self {
        Self {
            search: search.into(),
            pager: self.pager.reset(),
            cursor: 0,
            ..self
        }
    }

    #[must_use]
    pub fn with_filter(self, filter: FilterConditions) -> Self {
        Self {
            filter,
            pager: self.pager.reset(),
            cursor: 0,
            ..self
        }
    }

    #[must_use]
    pub fn with_page_size(self, page_size: usize) -> Self {
        Self {
            pager: self.pager.with_page_size(page_size),
            cursor: 0,
            ..self
        }
    }

    /// Moves to another page; the cursor goes back to the top.
    #[must_use]
    pub fn with_pager(self, pager: Pager) -> Self {
        if pager == self.pager {
            return self;
        }
        Self {
            pager,
            cursor: 0,
            ..self
        }
    }

    #[must_use]
    pub fn with_cursor(self, cursor: usize) -> Self {
        Self { cursor, ..self }
    }

    /// Clears search and filter.
    #[must_use]
    pub fn cleared(self) -> Self {
        self.with_search(String::new())
            .with_filter(FilterConditions::default())
    }

    /// Runs search, then filter, then pagination over `items`.
    ///
    /// A page number past the end (after the collection shrank) shows the
    /// last page instead.
    pub fn page_of<'a, I>(&self, items: I) -> PageView<'a>
    where
        I: IntoIterator<Item = &'a Item>,
    {
        let matched = apply_filters(apply_search(items, &self.search), &self.filter);
        let pager = self.pager.clamped(matched.len());
        PageView {
            items: pager.slice(&matched).to_vec(),
            matched: matched.len(),
            total_pages: total_pages(matched.len(), pager.page_size()),
            page: pager.page(),
            page_size: pager.page_size(),
        }
    }
}

/// Favorited items that are loaded, in the order they were favorited.
pub fn favorite_items<'a>(catalog: &'a Catalog, favorites: &FavoritesStore) -> Vec<&'a Item> {
    favorites
        .ids()
        .iter()
        .filter_map(|id| catalog.get(*id))
        .collect()
}

/// Favorited ids with no loaded item yet.
pub fn missing_favorites(catalog: &Catalog, favorites: &FavoritesStore) -> Vec<u32> {
    favorites
        .ids()
        .iter()
        .copied()
        .filter(|id| catalog.get(*id).is_none())
        .collect()
}
