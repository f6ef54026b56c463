//! Site search: a query box over a fixed index with type filters and
//! popular-search suggestions.

use std::cmp::Ordering;

use crate::error::StateError;
use crate::fixtures::{SearchEntry, SEARCH_SUGGESTIONS};
use crate::state::listing::ListAction;
use crate::state::{Listed, Listing, Reducer};

/// Queries shorter than this show nothing.
pub const MIN_QUERY: usize = 2;

/// `(value, label)`; `all` clears the type filter.
pub const FILTERS: &[(&str, &str)] = &[
    ("all", "All"),
    ("services", "Services"),
    ("products", "Products"),
    ("blog", "Blog"),
    ("team", "Team"),
    ("about", "About"),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchOrder {
    Title,
}

impl Listed for SearchEntry {
    type Sort = SearchOrder;

    fn category(&self) -> &str {
        self.category
    }

    fn haystack(&self) -> Vec<&str> {
        vec![self.title, self.description]
    }

    fn compare(a: &Self, b: &Self, sort: SearchOrder) -> Ordering {
        match sort {
            SearchOrder::Title => a.title.cmp(b.title),
        }
    }
}

/// What the dropdown under the search box shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Dropdown {
    #[default]
    Hidden,
    Suggestions,
    Results,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchAction {
    Focus,
    /// The box now holds this text
    Type(String),
    /// Pick a type filter by value
    Filter(String),
    Suggestion(usize),
    Clear,
    Escape,
}

#[derive(Debug, Clone)]
pub struct SiteSearch {
    index: Listing<SearchEntry>,
    query: String,
    filter: &'static str,
    dropdown: Dropdown,
}

impl Default for SiteSearch {
    fn default() -> Self {
        let entries = crate::fixtures::search_entries();
        let len = entries.len();
        Self {
            index: Listing::new(entries, len.max(1)),
            query: String::new(),
            filter: "all",
            dropdown: Dropdown::Hidden,
        }
    }
}

impl SiteSearch {
    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn filter(&self) -> &'static str {
        self.filter
    }

    pub fn dropdown(&self) -> Dropdown {
        self.dropdown
    }

    pub fn suggestions(&self) -> &'static [&'static str] {
        SEARCH_SUGGESTIONS
    }

    /// Matches for the current query; empty unless results are showing.
    pub fn results(&self) -> Vec<&SearchEntry> {
        if self.dropdown != Dropdown::Results {
            return Vec::new();
        }
        self.index.matching().collect()
    }

    pub fn count_label(&self) -> String {
        let n = self.results().len();
        format!("{} result{} found", n, if n == 1 { "" } else { "s" })
    }

    fn run(&mut self, query: &str) -> Result<(), StateError> {
        let query = query.trim();
        self.query = query.to_string();
        self.dropdown = match query.chars().count() {
            0 => Dropdown::Suggestions,
            n if n < MIN_QUERY => Dropdown::Hidden,
            _ => Dropdown::Results,
        };
        self.index.apply(ListAction::Search(self.query.clone()))
    }
}

impl Reducer for SiteSearch {
    type Action = SearchAction;

    fn apply(&mut self, action: SearchAction) -> Result<(), StateError> {
        match action {
            SearchAction::Focus => {
                let query = self.query.clone();
                self.run(&query)?;
            }
            SearchAction::Type(text) => self.run(&text)?,
            SearchAction::Filter(value) => {
                let (value, _) = FILTERS
                    .iter()
                    .find(|(v, _)| *v == value)
                    .ok_or_else(|| StateError::missing("search filter", &value))?;
                self.filter = *value;
                let category = (*value != "all").then(|| value.to_string());
                self.index.apply(ListAction::Filter(category))?;
            }
            SearchAction::Suggestion(i) => {
                let suggestion = SEARCH_SUGGESTIONS.get(i).ok_or(StateError::OutOfRange {
                    kind: "suggestion",
                    index: i,
                    len: SEARCH_SUGGESTIONS.len(),
                })?;
                self.run(suggestion)?;
            }
            SearchAction::Clear => self.run("")?,
            SearchAction::Escape => self.dropdown = Dropdown::Hidden,
        }
        Ok(())
    }
}

/// Split `text` into runs, flagging the ones that match `query` (ASCII case-insensitive).
pub fn highlight<'a>(text: &'a str, query: &str) -> Vec<(&'a str, bool)> {
    let query = query.trim();
    if query.is_empty() {
        return vec![(text, false)];
    }
    let haystack = text.to_ascii_lowercase();
    let needle = query.to_ascii_lowercase();
    let mut runs = Vec::new();
    let mut start = 0;
    while let Some(found) = haystack[start..].find(&needle) {
        let at = start + found;
        let end = at + needle.len();
        if at > start {
            runs.push((&text[start..at], false));
        }
        runs.push((&text[at..end], true));
        start = end;
    }
    if start < text.len() {
        runs.push((&text[start..], false));
    }
    runs
}

#[cfg(test)]
mod tests {
    use super::*;

    fn titles(search: &SiteSearch) -> Vec<&'static str> {
        search.results().iter().map(|e| e.title).collect()
    }

    #[test]
    fn test_short_queries_show_nothing() {
        let mut search = SiteSearch::default();
        search.apply(SearchAction::Focus).unwrap();
        assert_eq!(search.dropdown(), Dropdown::Suggestions);

        search.apply(SearchAction::Type("w".into())).unwrap();
        assert_eq!(search.dropdown(), Dropdown::Hidden);
        assert!(search.results().is_empty());

        search.apply(SearchAction::Type("  ".into())).unwrap();
        assert_eq!(search.dropdown(), Dropdown::Suggestions);
    }

    #[test]
    fn test_query_matches_title_and_description() {
        let mut search = SiteSearch::default();
        search.apply(SearchAction::Type("development".into())).unwrap();
        assert_eq!(titles(&search), vec!["Web Development Services", "Mobile App Development"]);
        assert_eq!(search.count_label(), "2 results found");

        search.apply(SearchAction::Type("talented".into())).unwrap();
        assert_eq!(titles(&search), vec!["Our Team"]);
        assert_eq!(search.count_label(), "1 result found");
    }

    #[test]
    fn test_filter_narrows_results() {
        let mut search = SiteSearch::default();
        search.apply(SearchAction::Type("design".into())).unwrap();
        assert_eq!(search.results().len(), 1);

        search.apply(SearchAction::Filter("services".into())).unwrap();
        assert!(search.results().is_empty());
        assert_eq!(search.count_label(), "0 results found");

        search.apply(SearchAction::Filter("all".into())).unwrap();
        assert_eq!(search.results().len(), 1);

        let err = search.apply(SearchAction::Filter("videos".into())).unwrap_err();
        assert_eq!(err, StateError::missing("search filter", "videos"));
        assert_eq!(search.filter(), "all");
    }

    #[test]
    fn test_suggestion_runs_a_search() {
        let mut search = SiteSearch::default();
        search.apply(SearchAction::Suggestion(3)).unwrap();
        assert_eq!(search.query(), "Digital Marketing");
        assert_eq!(titles(&search), vec!["Digital Marketing Strategy"]);

        assert!(search.apply(SearchAction::Suggestion(6)).is_err());

        search.apply(SearchAction::Escape).unwrap();
        assert!(search.results().is_empty());
        search.apply(SearchAction::Focus).unwrap();
        assert_eq!(search.results().len(), 1);

        search.apply(SearchAction::Clear).unwrap();
        assert_eq!(search.query(), "");
        assert_eq!(search.dropdown(), Dropdown::Suggestions);
    }

    #[test]
    fn test_highlight_runs() {
        assert_eq!(
            highlight("Web Development Services", "dev"),
            vec![("Web ", false), ("Dev", true), ("elopment Services", false)]
        );
        assert_eq!(highlight("Our Team", ""), vec![("Our Team", false)]);
        assert_eq!(highlight("aAa", "a"), vec![("a", true), ("A", true), ("a", true)]);
    }
}
