use std::cmp::Ordering;
use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::fixtures::{BlogPost, PortfolioItem, Product};
use crate::state::{Listed, Listing};

pub const POSTS_PER_PAGE: usize = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PostSort {
    Newest,
    Oldest,
    Popular,
    /// Trending posts first, then by views
    Trending,
}

impl PostSort {
    pub const ALL: [PostSort; 4] = [Self::Newest, Self::Oldest, Self::Popular, Self::Trending];

    pub fn value(self) -> &'static str {
        match self {
            Self::Newest => "newest",
            Self::Oldest => "oldest",
            Self::Popular => "popular",
            Self::Trending => "trending",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Newest => "Newest First",
            Self::Oldest => "Oldest First",
            Self::Popular => "Most Popular",
            Self::Trending => "Trending",
        }
    }
}

impl Listed for BlogPost {
    type Sort = PostSort;

    fn category(&self) -> &str {
        self.category
    }

    fn haystack(&self) -> Vec<&str> {
        vec![self.title, self.excerpt, self.author]
    }

    fn compare(a: &Self, b: &Self, sort: PostSort) -> Ordering {
        match sort {
            PostSort::Newest => b.date.cmp(a.date),
            PostSort::Oldest => a.date.cmp(b.date),
            PostSort::Popular => b.views.cmp(&a.views),
            PostSort::Trending => b
                .trending
                .cmp(&a.trending)
                .then_with(|| b.views.cmp(&a.views)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProductSort {
    Featured,
    PriceLow,
    PriceHigh,
    Rating,
    /// Catalog order, newest first
    Newest,
}

impl ProductSort {
    pub const ALL: [ProductSort; 5] = [
        Self::Featured,
        Self::PriceLow,
        Self::PriceHigh,
        Self::Rating,
        Self::Newest,
    ];

    pub fn value(self) -> &'static str {
        match self {
            Self::Featured => "featured",
            Self::PriceLow => "price-low",
            Self::PriceHigh => "price-high",
            Self::Rating => "rating",
            Self::Newest => "newest",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Featured => "Featured",
            Self::PriceLow => "Price: Low to High",
            Self::PriceHigh => "Price: High to Low",
            Self::Rating => "Highest Rated",
            Self::Newest => "Newest",
        }
    }
}

impl Listed for Product {
    type Sort = ProductSort;

    fn category(&self) -> &str {
        self.category
    }

    fn haystack(&self) -> Vec<&str> {
        vec![self.name, self.category]
    }

    fn compare(a: &Self, b: &Self, sort: ProductSort) -> Ordering {
        match sort {
            ProductSort::Featured => b.featured.cmp(&a.featured),
            ProductSort::PriceLow => a.effective_price().cmp(&b.effective_price()),
            ProductSort::PriceHigh => b.effective_price().cmp(&a.effective_price()),
            ProductSort::Rating => b.rating.cmp(&a.rating),
            ProductSort::Newest => Ordering::Equal,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PortfolioSort {
    Featured,
    /// Most recent year first
    Newest,
}

impl PortfolioSort {
    pub const ALL: [PortfolioSort; 2] = [Self::Featured, Self::Newest];

    pub fn value(self) -> &'static str {
        match self {
            Self::Featured => "featured",
            Self::Newest => "newest",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Featured => "Featured",
            Self::Newest => "Newest",
        }
    }
}

impl Listed for PortfolioItem {
    type Sort = PortfolioSort;

    fn category(&self) -> &str {
        self.category
    }

    fn haystack(&self) -> Vec<&str> {
        let mut words = vec![self.title, self.client, self.description];
        words.extend(self.technologies.iter().copied());
        words
    }

    fn compare(a: &Self, b: &Self, sort: PortfolioSort) -> Ordering {
        match sort {
            PortfolioSort::Featured => b.featured.cmp(&a.featured),
            PortfolioSort::Newest => b.year.cmp(&a.year),
        }
    }
}

pub type BlogListing = Listing<BlogPost>;
pub type ProductGrid = Listing<Product>;
pub type Portfolio = Listing<PortfolioItem>;

pub fn blog_listing(per_page: usize) -> BlogListing {
    Listing::new(crate::fixtures::blog_posts(), per_page)
}

pub fn product_grid() -> ProductGrid {
    // The grid shows every product on one page
    let products = crate::fixtures::products();
    let len = products.len();
    Listing::new(products, len.max(1))
}

pub fn portfolio() -> Portfolio {
    let items = crate::fixtures::portfolio();
    let len = items.len();
    Listing::new(items, len.max(1))
}

/// `web-development` → `Web Development`.
pub fn category_label(slug: &str) -> String {
    slug.split('-')
        .filter(|w| !w.is_empty())
        .map(|w| {
            let mut chars = w.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// `2024-01-15` → `January 15, 2024`.
pub fn format_date(iso: &str) -> String {
    const MONTHS: [&str; 12] = [
        "January", "February", "March", "April", "May", "June", "July", "August", "September",
        "October", "November", "December",
    ];
    let mut parts = iso.splitn(3, '-');
    let (Some(y), Some(m), Some(d)) = (parts.next(), parts.next(), parts.next()) else {
        return iso.to_string();
    };
    let month = m
        .parse::<usize>()
        .ok()
        .and_then(|m| m.checked_sub(1))
        .and_then(|i| MONTHS.get(i));
    match (month, d.parse::<u32>()) {
        (Some(month), Ok(day)) => format!("{} {}, {}", month, day, y),
        _ => iso.to_string(),
    }
}

/// Product ids the visitor starred. Persisted as a preference.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Wishlist(BTreeSet<String>);

impl Wishlist {
    pub const KEY: &'static str = "wishlist";

    pub fn contains(&self, id: &str) -> bool {
        self.0.contains(id)
    }

    /// Returns true when the product is now on the list.
    pub fn toggle(&mut self, id: &str) -> bool {
        if self.0.remove(id) {
            false
        } else {
            self.0.insert(id.to_string());
            true
        }
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::listing::ListAction;
    use crate::state::Reducer;

    fn ids<'a>(it: impl Iterator<Item = &'a BlogPost>) -> Vec<u32> {
        it.map(|p| p.id).collect()
    }

    #[test]
    fn test_blog_first_page() {
        let blog = blog_listing(POSTS_PER_PAGE);
        assert_eq!(ids(blog.visible()), vec![1, 2, 3, 4]);
        assert_eq!(blog.pager().total_pages(), 2);
    }

    #[test]
    fn test_blog_sorts() {
        let mut blog = blog_listing(10);
        blog.apply(ListAction::Sort(Some(PostSort::Popular))).unwrap();
        assert_eq!(ids(blog.matching()), vec![3, 6, 5, 1, 2, 4]);

        blog.apply(ListAction::Sort(Some(PostSort::Trending))).unwrap();
        assert_eq!(ids(blog.matching()), vec![5, 1, 2, 3, 6, 4]);

        blog.apply(ListAction::Sort(Some(PostSort::Oldest))).unwrap();
        assert_eq!(ids(blog.matching()), vec![6, 5, 4, 3, 2, 1]);
    }

    #[test]
    fn test_blog_search_and_category() {
        let mut blog = blog_listing(10);
        blog.apply(ListAction::Search("api".into())).unwrap();
        assert_eq!(ids(blog.matching()), vec![5]);

        blog.apply(ListAction::Search("".into())).unwrap();
        blog.apply(ListAction::Filter(Some("news".into()))).unwrap();
        assert_eq!(ids(blog.matching()), vec![2, 6]);

        // Author names are searchable too
        blog.apply(ListAction::Search("emma".into())).unwrap();
        assert_eq!(ids(blog.matching()), vec![6]);
    }

    #[test]
    fn test_product_sorts() {
        let mut grid = product_grid();
        grid.apply(ListAction::Sort(Some(ProductSort::PriceLow))).unwrap();
        let first = grid.matching().next().map(|p| p.id);
        assert_eq!(first, Some("phone-case"));

        grid.apply(ListAction::Sort(Some(ProductSort::PriceHigh))).unwrap();
        assert_eq!(grid.matching().next().map(|p| p.id), Some("wireless-headphones"));

        grid.apply(ListAction::Sort(Some(ProductSort::Featured))).unwrap();
        let featured: Vec<&str> = grid.matching().take(2).map(|p| p.id).collect();
        assert_eq!(featured, vec!["wireless-headphones", "gaming-mouse"]);

        grid.apply(ListAction::Sort(Some(ProductSort::Newest))).unwrap();
        assert_eq!(grid.matching().next().map(|p| p.id), Some("wireless-headphones"));

        grid.apply(ListAction::Filter(Some("accessories".into()))).unwrap();
        assert_eq!(grid.matching_len(), 2);
    }

    #[test]
    fn test_portfolio_filter_and_sort() {
        let mut work = portfolio();
        assert_eq!(work.categories(), vec!["web-development", "mobile-development", "design"]);

        work.apply(ListAction::Filter(Some("mobile-development".into()))).unwrap();
        let ids: Vec<&str> = work.matching().map(|p| p.id).collect();
        assert_eq!(ids, vec!["mobile-banking-app", "fitness-tracker"]);

        work.apply(ListAction::Filter(None)).unwrap();
        work.apply(ListAction::Sort(Some(PortfolioSort::Newest))).unwrap();
        let years: Vec<u16> = work.matching().map(|p| p.year).collect();
        assert_eq!(years, vec![2024, 2024, 2024, 2023, 2023, 2023]);

        // Technologies are searchable
        work.apply(ListAction::Search("firebase".into())).unwrap();
        assert_eq!(work.matching_len(), 2);
    }

    #[test]
    fn test_category_label() {
        assert_eq!(category_label("web-development"), "Web Development");
        assert_eq!(category_label("design"), "Design");
    }

    #[test]
    fn test_format_date() {
        assert_eq!(format_date("2024-01-15"), "January 15, 2024");
        assert_eq!(format_date("2024-12-03"), "December 3, 2024");
        assert_eq!(format_date("garbage"), "garbage");
    }

    #[test]
    fn test_wishlist_toggle() {
        let mut w = Wishlist::default();
        assert!(w.toggle("smart-watch"));
        assert!(w.contains("smart-watch"));
        assert!(!w.toggle("smart-watch"));
        assert!(w.is_empty());
    }
}
