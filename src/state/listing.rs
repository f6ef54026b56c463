use std::cmp::Ordering;
use std::fmt::Debug;

use super::paging::{PageAction, Pager};
use super::Reducer;
use crate::error::StateError;

/// A record that can be shown in a filterable, sortable, paged list.
pub trait Listed {
    type Sort: Copy + PartialEq + Debug;

    fn category(&self) -> &str;

    /// Fields the free-text search looks at.
    fn haystack(&self) -> Vec<&str>;

    fn compare(a: &Self, b: &Self, sort: Self::Sort) -> Ordering;
}

/// Derived view over a fixed item list. The original order is never lost.
#[derive(Debug, Clone)]
pub struct Listing<T: Listed> {
    items: Vec<T>,
    view: Vec<usize>,
    category: Option<String>,
    search: String,
    sort: Option<T::Sort>,
    pager: Pager,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ListAction<S> {
    /// `None` shows every category.
    Filter(Option<String>),
    Search(String),
    /// `None` restores the original order.
    Sort(Option<S>),
    Clear,
    Page(PageAction),
}

impl<T: Listed> Listing<T> {
    pub fn new(items: Vec<T>, per_page: usize) -> Self {
        let view = (0..items.len()).collect();
        let pager = Pager::new(items.len(), per_page);
        Self {
            items,
            view,
            category: None,
            search: String::new(),
            sort: None,
            pager,
        }
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn category(&self) -> Option<&str> {
        self.category.as_deref()
    }

    pub fn search(&self) -> &str {
        &self.search
    }

    pub fn sort(&self) -> Option<T::Sort> {
        self.sort
    }

    pub fn pager(&self) -> &Pager {
        &self.pager
    }

    /// Distinct categories in first-seen order.
    pub fn categories(&self) -> Vec<&str> {
        let mut seen: Vec<&str> = Vec::new();
        for item in &self.items {
            let c = item.category();
            if !seen.contains(&c) {
                seen.push(c);
            }
        }
        seen
    }

    /// Every item passing the current filter, in display order.
    pub fn matching(&self) -> impl Iterator<Item = &T> + '_ {
        self.view.iter().map(|&i| &self.items[i])
    }

    pub fn matching_len(&self) -> usize {
        self.view.len()
    }

    /// The current page of the derived view.
    pub fn visible(&self) -> impl Iterator<Item = &T> + '_ {
        self.view[self.pager.range()].iter().map(|&i| &self.items[i])
    }

    fn matches(&self, item: &T) -> bool {
        let category_ok = self
            .category
            .as_deref()
            .map_or(true, |c| item.category() == c);
        if !category_ok {
            return false;
        }
        if self.search.is_empty() {
            return true;
        }
        let needle = self.search.to_lowercase();
        item.haystack()
            .iter()
            .any(|field| field.to_lowercase().contains(&needle))
    }

    fn rebuild(&mut self) {
        let mut view: Vec<usize> = (0..self.items.len())
            .filter(|&i| self.matches(&self.items[i]))
            .collect();
        if let Some(sort) = self.sort {
            // sort_by is stable, so ties keep their original order
            view.sort_by(|&a, &b| T::compare(&self.items[a], &self.items[b], sort));
        }
        self.view = view;
        self.pager.reset(self.view.len());
    }
}

impl<T: Listed> Reducer for Listing<T> {
    type Action = ListAction<T::Sort>;

    fn apply(&mut self, action: ListAction<T::Sort>) -> Result<(), StateError> {
        match action {
            ListAction::Filter(category) => {
                if let Some(c) = &category {
                    if !self.items.iter().any(|item| item.category() == c) {
                        return Err(StateError::missing("category", c));
                    }
                }
                self.category = category;
            }
            ListAction::Search(term) => self.search = term.trim().to_string(),
            ListAction::Sort(sort) => self.sort = sort,
            ListAction::Clear => {
                self.category = None;
                self.search.clear();
                self.sort = None;
            }
            ListAction::Page(page) => return self.pager.apply(page),
        }
        self.rebuild();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[derive(Debug, Clone, PartialEq)]
    struct Item {
        name: String,
        category: String,
        score: u32,
    }

    #[derive(Debug, Clone, Copy, PartialEq)]
    enum ByScore {
        Desc,
    }

    impl Listed for Item {
        type Sort = ByScore;

        fn category(&self) -> &str {
            &self.category
        }

        fn haystack(&self) -> Vec<&str> {
            vec![&self.name]
        }

        fn compare(a: &Self, b: &Self, _sort: ByScore) -> Ordering {
            b.score.cmp(&a.score)
        }
    }

    fn item(name: &str, category: &str, score: u32) -> Item {
        Item {
            name: name.to_string(),
            category: category.to_string(),
            score,
        }
    }

    fn sample() -> Vec<Item> {
        vec![
            item("Alpha", "news", 3),
            item("Bravo", "tips", 9),
            item("Charlie", "news", 5),
            item("Delta", "tips", 1),
            item("Echo", "news", 7),
        ]
    }

    fn names<'a>(it: impl Iterator<Item = &'a Item>) -> Vec<&'a str> {
        it.map(|i| i.name.as_str()).collect()
    }

    #[test]
    fn test_filter_by_category() {
        let mut l = Listing::new(sample(), 10);
        l.apply(ListAction::Filter(Some("tips".into()))).unwrap();
        assert_eq!(names(l.matching()), vec!["Bravo", "Delta"]);
    }

    #[test]
    fn test_unknown_category_is_missing() {
        let mut l = Listing::new(sample(), 10);
        assert!(l.apply(ListAction::Filter(Some("sports".into()))).is_err());
        assert_eq!(l.matching_len(), 5);
    }

    #[test]
    fn test_search_is_case_insensitive() {
        let mut l = Listing::new(sample(), 10);
        l.apply(ListAction::Search("  CHAR ".into())).unwrap();
        assert_eq!(names(l.matching()), vec!["Charlie"]);
        assert_eq!(l.search(), "CHAR");
    }

    #[test]
    fn test_sort_and_restore() {
        let mut l = Listing::new(sample(), 10);
        l.apply(ListAction::Sort(Some(ByScore::Desc))).unwrap();
        assert_eq!(
            names(l.matching()),
            vec!["Bravo", "Echo", "Charlie", "Alpha", "Delta"]
        );
        l.apply(ListAction::Sort(None)).unwrap();
        assert_eq!(names(l.matching()), names(l.items().iter()));
    }

    #[test]
    fn test_filtering_resets_page() {
        let mut l = Listing::new(sample(), 2);
        l.apply(ListAction::Page(PageAction::Last)).unwrap();
        assert_eq!(l.pager().page(), 3);
        assert_eq!(names(l.visible()), vec!["Echo"]);

        l.apply(ListAction::Filter(Some("news".into()))).unwrap();
        assert_eq!(l.pager().page(), 1);
        assert_eq!(names(l.visible()), vec!["Alpha", "Charlie"]);
    }

    #[test]
    fn test_categories_first_seen_order() {
        let l = Listing::new(sample(), 10);
        assert_eq!(l.categories(), vec!["news", "tips"]);
    }

    proptest! {
        #[test]
        fn filter_then_clear_restores_original(
            pick in 0usize..2,
            search in "[a-z]{0,3}",
            sorted in any::<bool>(),
        ) {
            let original = sample();
            let mut l = Listing::new(original.clone(), 3);
            let category = ["news", "tips"][pick];
            l.apply(ListAction::Filter(Some(category.to_string()))).unwrap();
            l.apply(ListAction::Search(search)).unwrap();
            if sorted {
                l.apply(ListAction::Sort(Some(ByScore::Desc))).unwrap();
            }
            l.apply(ListAction::Clear).unwrap();

            let restored: Vec<Item> = l.matching().cloned().collect();
            prop_assert_eq!(restored, original);
        }
    }
}
