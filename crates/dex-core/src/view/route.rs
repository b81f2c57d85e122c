//! Screens, return state and the shareable list query string.

use url::form_urlencoded;

use crate::error::{CoreError, CoreResult};
use crate::view::browse::BrowseState;

/// The screens of the browser.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Screen {
    #[default]
    List,
    Detail(u32),
    Favorites,
}

impl Screen {
    pub fn title(self) -> String {
        match self {
            Self::List => "Catalog".to_owned(),
            Self::Detail(id) => format!("#{id:03}"),
            Self::Favorites => "Favorites".to_owned(),
        }
    }
}

/// What a screen looked like when the user left it for a detail view.
///
/// Pushed on the history when a detail opens and consumed once when the user
/// comes back.
#[derive(Debug, Clone, PartialEq)]
pub struct ReturnState {
    pub screen: Screen,
    pub browse: BrowseState,
}

impl ReturnState {
    pub fn new(screen: Screen, browse: BrowseState) -> Self {
        Self { screen, browse }
    }
}

const DEFAULT_PAGE_SIZE: usize = 20;

/// The `page`, `items` and `search` parameters of a list view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListQuery {
    pub page: usize,
    pub items: usize,
    pub search: String,
}

impl Default for ListQuery {
    fn default() -> Self {
        Self {
            page: 1,
            items: DEFAULT_PAGE_SIZE,
            search: String::new(),
        }
    }
}

fn positive(key: &str, value: &str) -> CoreResult<usize> {
    match value.trim().parse::<usize>() {
        Ok(n) if n > 0 => Ok(n),
        _ => Err(CoreError::InvalidQuery(format!("{key}={value}"))),
    }
}

impl ListQuery {
    /// Parses `page=2&items=50&search=pika` (a leading `?` is allowed).
    ///
    /// Missing parameters take their defaults; unknown ones are ignored.
    ///
    /// # Errors
    ///
    /// [`CoreError::InvalidQuery`] when `page` or `items` is not a positive
    /// integer.
    pub fn parse(query: &str) -> CoreResult<Self> {
        let query = query.strip_prefix('?').unwrap_or(query);
        let mut out = Self::default();
        for (key, value) in form_urlencoded::parse(query.as_bytes()) {
            match key.as_ref() {
                "page" => out.page = positive("page", &value)?,
                "items" => out.items = positive("items", &value)?,
                "search" => out.search = value.into_owned(),
                _ => {}
            }
        }
        Ok(out)
    }

    /// Serializes back to a query string. An empty search is omitted.
    pub fn to_query_string(&self) -> String {
        let mut serializer = form_urlencoded::Serializer::new(String::new());
        serializer
            .append_pair("page", &self.page.to_string())
            .append_pair("items", &self.items.to_string());
        if !self.search.is_empty() {
            serializer.append_pair("search", &self.search);
        }
        serializer.finish()
    }
}
