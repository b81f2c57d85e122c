//! Page slicing and the pager state.

/// Returns page `page` (1-based) of `items`.
///
/// The slice is clamped to the collection. Any out-of-range request,
/// including page 0 or a page size of 0, yields an empty slice.
pub fn paginate<T>(items: &[T], page: usize, page_size: usize) -> &[T] {
    if page == 0 || page_size == 0 {
        return &[];
    }
    let start = (page - 1).saturating_mul(page_size);
    if start >= items.len() {
        return &[];
    }
    let end = start.saturating_add(page_size).min(items.len());
    &items[start..end]
}

/// `ceil(count / page_size)`; zero items means zero pages.
#[must_use]
pub fn total_pages(count: usize, page_size: usize) -> usize {
    if page_size == 0 {
        return 0;
    }
    count.div_ceil(page_size)
}

/// Current page and page size.
///
/// Pages are 1-based. Any change to the page size goes back to page 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pager {
    page: usize,
    page_size: usize,
}

impl Default for Pager {
    fn default() -> Self {
        Self::new(20)
    }
}

impl Pager {
    #[must_use]
    pub fn new(page_size: usize) -> Self {
        Self {
            page: 1,
            page_size: page_size.max(1),
        }
    }

    #[must_use]
    pub fn page(&self) -> usize {
        self.page
    }

    #[must_use]
    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// Jumps to `page` without clamping; the next navigation call or
    /// [`Pager::clamped`] brings it back into range.
    #[must_use]
    pub fn with_page(self, page: usize) -> Self {
        Self {
            page: page.max(1),
            ..self
        }
    }

    #[must_use]
    pub fn with_page_size(self, page_size: usize) -> Self {
        Self::new(page_size)
    }

    #[must_use]
    pub fn reset(self) -> Self {
        Self { page: 1, ..self }
    }

    /// Pulls the page back into `[1, total_pages]`.
    #[must_use]
    pub fn clamped(self, count: usize) -> Self {
        let last = total_pages(count, self.page_size).max(1);
        Self {
            page: self.page.clamp(1, last),
            ..self
        }
    }

    #[must_use]
    pub fn next(self, count: usize) -> Self {
        Self {
            page: self.page + 1,
            ..self
        }
        .clamped(count)
    }

    #[must_use]
    pub fn prev(self, count: usize) -> Self {
        Self {
            page: self.page.saturating_sub(1),
            ..self
        }
        .clamped(count)
    }

    #[must_use]
    pub fn first(self) -> Self {
        self.reset()
    }

    #[must_use]
    pub fn last(self, count: usize) -> Self {
        Self {
            page: total_pages(count, self.page_size).max(1),
            ..self
        }
    }

    /// The items of the current page.
    pub fn slice<'a, T>(&self, items: &'a [T]) -> &'a [T] {
        paginate(items, self.page, self.page_size)
    }

    /// Page numbers to show in a pagination bar. When there are more than
    /// `width` pages, up to `width` consecutive pages starting two before the
    /// current one.
    #[must_use]
    pub fn page_window(&self, total: usize, width: usize) -> Vec<usize> {
        if width == 0 {
            return Vec::new();
        }
        if total <= width {
            return (1..=total).collect();
        }
        let start = self.page.saturating_sub(2).max(1);
        let end = (start + width - 1).min(total);
        (start..=end).collect()
    }

    /// 1-based inclusive `(first, last)` positions of the current page within
    /// `count` items, or `None` when the page is empty.
    #[must_use]
    pub fn item_range(&self, count: usize) -> Option<(usize, usize)> {
        let start = (self.page - 1) * self.page_size;
        if start >= count {
            return None;
        }
        Some((start + 1, (start + self.page_size).min(count)))
    }
}
