//! Menu drawer pages
//!
//! The side menu hosts a tab strip over a stack of pages. Only the labels
//! and the selection live here; page content belongs to the toolkit.

/// Labels shown when the menu is first built
pub const DEFAULT_PAGES: [&str; 3] = ["Online", "Library", "Online favorites"];

/// Ordered page titles with a current selection
#[derive(Debug, Clone, Default)]
pub struct MenuPages {
    titles: Vec<String>,
    current: Option<usize>,
}

impl MenuPages {
    /// Create an empty page stack
    pub fn new() -> Self {
        Self::default()
    }

    /// Create the stack with the default labels, first page selected
    pub fn with_defaults() -> Self {
        let mut pages = Self::new();
        pages.set_pages(DEFAULT_PAGES);
        pages
    }

    /// Append a page and return its index
    ///
    /// Untitled pages are named `Page {n}` (1-based). The first page added
    /// becomes current.
    pub fn add_page(&mut self, title: Option<&str>) -> usize {
        let index = self.titles.len();
        let title = match title {
            Some(title) => title.to_string(),
            None => format!("Page {}", index + 1),
        };
        self.titles.push(title);

        if self.current.is_none() {
            self.current = Some(index);
        }
        index
    }

    /// Replace all pages
    pub fn set_pages<I, S>(&mut self, titles: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.titles = titles.into_iter().map(Into::into).collect();
        self.current = if self.titles.is_empty() { None } else { Some(0) };
    }

    /// Select a page; out-of-range indices are ignored
    ///
    /// Returns whether the selection is now `index`.
    pub fn set_current(&mut self, index: usize) -> bool {
        if index >= self.titles.len() {
            return false;
        }
        self.current = Some(index);
        true
    }

    /// Remove a page and return its title
    ///
    /// Later pages shift down by one. The selection follows its page, or
    /// moves to the nearest remaining page when its page is removed.
    pub fn remove_page(&mut self, index: usize) -> Option<String> {
        if index >= self.titles.len() {
            return None;
        }
        let title = self.titles.remove(index);

        self.current = match self.current {
            _ if self.titles.is_empty() => None,
            Some(current) if current > index => Some(current - 1),
            Some(current) if current == index => Some(index.min(self.titles.len() - 1)),
            other => other,
        };
        Some(title)
    }

    pub fn current_index(&self) -> Option<usize> {
        self.current
    }

    /// Title of the selected page
    pub fn current_title(&self) -> Option<&str> {
        self.current
            .and_then(|i| self.titles.get(i))
            .map(String::as_str)
    }

    pub fn page_count(&self) -> usize {
        self.titles.len()
    }

    pub fn titles(&self) -> &[String] {
        &self.titles
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let pages = MenuPages::with_defaults();
        assert_eq!(pages.titles(), ["Online", "Library", "Online favorites"]);
        assert_eq!(pages.current_index(), Some(0));
        assert_eq!(pages.current_title(), Some("Online"));
    }

    #[test]
    fn test_add_page_names_untitled_pages() {
        let mut pages = MenuPages::new();
        assert_eq!(pages.current_index(), None);

        assert_eq!(pages.add_page(None), 0);
        assert_eq!(pages.add_page(Some("Radio")), 1);
        assert_eq!(pages.add_page(None), 2);

        assert_eq!(pages.titles(), ["Page 1", "Radio", "Page 3"]);
        assert_eq!(pages.current_index(), Some(0));
    }

    #[test]
    fn test_set_current_bounds() {
        let mut pages = MenuPages::with_defaults();
        assert!(pages.set_current(2));
        assert_eq!(pages.current_index(), Some(2));

        assert!(!pages.set_current(3));
        assert_eq!(pages.current_index(), Some(2));
    }

    #[test]
    fn test_remove_before_current_shifts_selection() {
        let mut pages = MenuPages::with_defaults();
        pages.set_current(2);

        assert_eq!(pages.remove_page(0).as_deref(), Some("Online"));
        assert_eq!(pages.current_index(), Some(1));
        assert_eq!(pages.current_title(), Some("Online favorites"));
    }

    #[test]
    fn test_remove_current_last_page_moves_back() {
        let mut pages = MenuPages::with_defaults();
        pages.set_current(2);

        pages.remove_page(2);
        assert_eq!(pages.current_index(), Some(1));
        assert_eq!(pages.current_title(), Some("Library"));
    }

    #[test]
    fn test_remove_all_clears_selection() {
        let mut pages = MenuPages::with_defaults();
        while pages.page_count() > 0 {
            pages.remove_page(0);
        }
        assert_eq!(pages.current_index(), None);
        assert!(pages.remove_page(0).is_none());
    }

    #[test]
    fn test_set_pages_replaces() {
        let mut pages = MenuPages::with_defaults();
        pages.set_current(2);
        pages.set_pages(vec!["A".to_string(), "B".to_string()]);
        assert_eq!(pages.page_count(), 2);
        assert_eq!(pages.current_index(), Some(0));

        pages.set_pages(Vec::<String>::new());
        assert_eq!(pages.current_index(), None);
    }
}
