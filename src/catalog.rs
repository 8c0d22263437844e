//! In-memory read-model for the storefront. The base list is fetched once
//! from `/api/magazines` and every view is recomputed from it in full,
//! filter then sort then paginate, so stale filters never compound.

use chrono::NaiveDate;

use crate::model::Magazine;

pub const DEFAULT_PAGE_SIZE: usize = 12;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum CategoryFilter {
    /// The "all" sentinel, passes everything through.
    #[default]
    All,
    /// Exact case-insensitive category match.
    Category(String),
    /// Case-insensitive membership in the tag set.
    Tag(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortKey {
    /// `id` descending, the insertion-order default.
    #[default]
    Newest,
    /// Title ascending, case-insensitive.
    Title,
    /// Date descending; entries with unparseable dates sort as oldest.
    Date,
    /// Rating descending.
    Rating,
}

#[derive(Debug, Clone)]
pub struct CatalogQuery {
    pub category: CategoryFilter,
    /// Hide entries explicitly flagged out of the Discover grid.
    pub discover_only: bool,
    pub search: Option<String>,
    pub sort: SortKey,
    pub page_size: usize,
    /// "Load more" widens the window instead of replacing the page.
    pub pages: usize,
}

impl Default for CatalogQuery {
    fn default() -> Self {
        CatalogQuery {
            category: CategoryFilter::All,
            discover_only: false,
            search: None,
            sort: SortKey::Newest,
            page_size: DEFAULT_PAGE_SIZE,
            pages: 1,
        }
    }
}

/// Owns the transient catalog copy. Disposable: `refresh` overwrites it
/// wholesale with the next fetch result.
#[derive(Debug, Default)]
pub struct ReadModel {
    base: Vec<Magazine>,
}

impl ReadModel {
    pub fn new(items: Vec<Magazine>) -> Self {
        ReadModel { base: items }
    }

    pub fn refresh(&mut self, items: Vec<Magazine>) {
        self.base = items;
    }

    pub fn len(&self) -> usize {
        self.base.len()
    }

    pub fn is_empty(&self) -> bool {
        self.base.is_empty()
    }

    pub fn view(&self, query: &CatalogQuery) -> Vec<&Magazine> {
        let mut items: Vec<&Magazine> = self
            .base
            .iter()
            .filter(|m| matches_category(m, &query.category))
            .filter(|m| !query.discover_only || m.is_discover)
            .filter(|m| matches_search(m, query.search.as_deref()))
            .collect();

        // Vec::sort_by is stable, entries with equal keys keep base order.
        match query.sort {
            SortKey::Newest => items.sort_by(|a, b| b.id.cmp(&a.id)),
            SortKey::Title => {
                items.sort_by(|a, b| a.title.to_lowercase().cmp(&b.title.to_lowercase()))
            }
            SortKey::Date => {
                items.sort_by(|a, b| parse_date(b.date.as_deref()).cmp(&parse_date(a.date.as_deref())))
            }
            SortKey::Rating => items.sort_by(|a, b| b.rating.total_cmp(&a.rating)),
        }

        let visible = query.page_size.saturating_mul(query.pages.max(1));
        items.truncate(visible);
        items
    }
}

fn matches_category(magazine: &Magazine, filter: &CategoryFilter) -> bool {
    match filter {
        CategoryFilter::All => true,
        CategoryFilter::Category(category) => magazine.category.eq_ignore_ascii_case(category),
        CategoryFilter::Tag(tag) => magazine.tags.iter().any(|t| t.eq_ignore_ascii_case(tag)),
    }
}

fn matches_search(magazine: &Magazine, term: Option<&str>) -> bool {
    let term = match term {
        Some(term) if !term.is_empty() => term.to_lowercase(),
        _ => return true,
    };

    magazine.title.to_lowercase().contains(&term)
        || magazine.category.to_lowercase().contains(&term)
}

fn parse_date(value: Option<&str>) -> Option<NaiveDate> {
    let value = value?.trim();

    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .or_else(|_| NaiveDate::parse_from_str(value, "%d-%m-%Y"))
        .or_else(|_| NaiveDate::parse_from_str(value, "%B %d, %Y"))
        .ok()
        .or_else(|| {
            chrono::DateTime::parse_from_rfc3339(value)
                .ok()
                .map(|dt| dt.date_naive())
        })
}

/// Price after the stored discount, rounded to 2 decimals for display only.
pub fn effective_price(magazine: &Magazine) -> f64 {
    let raw = magazine.price * (1.0 - magazine.discount as f64 / 100.0);
    (raw * 100.0).round() / 100.0
}
