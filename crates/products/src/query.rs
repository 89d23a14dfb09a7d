//! List queries: substring filters and page windowing.

use core::num::NonZeroUsize;
use core::ops::Range;

use serde::Serialize;

use catalog_core::{DomainError, DomainResult};

use crate::product::Product;

pub const DEFAULT_PAGE: usize = 1;
pub const DEFAULT_LIMIT: usize = 5;

/// Case-insensitive substring filters, combined with AND.
///
/// Empty needles are treated as "no filter".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductFilter {
    name: Option<String>,
    category: Option<String>,
}

impl ProductFilter {
    pub fn new(name: Option<&str>, category: Option<&str>) -> Self {
        Self {
            name: normalize_needle(name),
            category: normalize_needle(category),
        }
    }

    pub fn matches(&self, product: &Product) -> bool {
        if let Some(needle) = &self.name {
            if !product.name().to_lowercase().contains(needle.as_str()) {
                return false;
            }
        }
        if let Some(needle) = &self.category {
            // Products created without a category never match a category filter.
            match product.category() {
                Some(category) if category.to_lowercase().contains(needle.as_str()) => {}
                _ => return false,
            }
        }
        true
    }
}

fn normalize_needle(needle: Option<&str>) -> Option<String> {
    needle.filter(|s| !s.is_empty()).map(str::to_lowercase)
}

/// 1-based page number plus page size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    page: NonZeroUsize,
    limit: NonZeroUsize,
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            page: NonZeroUsize::MIN,
            limit: NonZeroUsize::new(DEFAULT_LIMIT).unwrap_or(NonZeroUsize::MIN),
        }
    }
}

impl Pagination {
    pub fn new(page: NonZeroUsize, limit: NonZeroUsize) -> Self {
        Self { page, limit }
    }

    /// Parse raw query-string values; absent values take the defaults.
    ///
    /// Anything that is not a positive integer is rejected rather than
    /// coerced.
    pub fn parse(page: Option<&str>, limit: Option<&str>) -> DomainResult<Self> {
        let defaults = Self::default();
        Ok(Self {
            page: match page {
                Some(raw) => parse_positive("page", raw)?,
                None => defaults.page,
            },
            limit: match limit {
                Some(raw) => parse_positive("limit", raw)?,
                None => defaults.limit,
            },
        })
    }

    pub fn page(&self) -> usize {
        self.page.get()
    }

    pub fn limit(&self) -> usize {
        self.limit.get()
    }

    /// Half-open index range `[(page-1)*limit, page*limit)` clamped to `len`.
    pub fn window(&self, len: usize) -> Range<usize> {
        let start = (self.page() - 1).saturating_mul(self.limit()).min(len);
        let end = self.page().saturating_mul(self.limit()).min(len);
        start..end
    }

    pub fn total_pages(&self, total: usize) -> usize {
        total.div_ceil(self.limit())
    }
}

fn parse_positive(param: &'static str, raw: &str) -> DomainResult<NonZeroUsize> {
    raw.trim()
        .parse::<NonZeroUsize>()
        .map_err(|_| {
            DomainError::invalid_query(param, format!("expected a positive integer, got `{raw}`"))
        })
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductQuery {
    pub filter: ProductFilter,
    pub pagination: Pagination,
}

/// One page of a filtered listing.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductPage {
    /// Size of the filtered set before pagination.
    pub total_products: usize,
    pub current_page: usize,
    pub total_pages: usize,
    pub products: Vec<Product>,
}

impl ProductPage {
    /// Filter `products` in order, then cut out the requested page.
    pub fn build<'a>(
        products: impl IntoIterator<Item = &'a Product>,
        query: &ProductQuery,
    ) -> Self {
        let matched: Vec<&Product> = products
            .into_iter()
            .filter(|p| query.filter.matches(p))
            .collect();
        let total = matched.len();
        let window = query.pagination.window(total);

        Self {
            total_products: total,
            current_page: query.pagination.page(),
            total_pages: query.pagination.total_pages(total),
            products: matched[window].iter().map(|p| (*p).clone()).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn nz(n: usize) -> NonZeroUsize {
        NonZeroUsize::new(n).unwrap()
    }

    fn catalog(n: usize) -> Vec<Product> {
        (0..n)
            .map(|i| Product::new(i.to_string(), format!("item-{i}"), 1.0 + i as f64))
            .collect()
    }

    #[test]
    fn parse_uses_defaults_when_absent() {
        let p = Pagination::parse(None, None).unwrap();
        assert_eq!(p.page(), DEFAULT_PAGE);
        assert_eq!(p.limit(), DEFAULT_LIMIT);
    }

    #[test]
    fn parse_rejects_non_numeric_zero_and_negative() {
        for raw in ["abc", "0", "-1", "1.5", ""] {
            let err = Pagination::parse(Some(raw), None).unwrap_err();
            assert!(
                matches!(err, DomainError::InvalidQuery { param: "page", .. }),
                "page={raw:?} should be rejected"
            );
        }
        let err = Pagination::parse(None, Some("ten")).unwrap_err();
        assert!(matches!(err, DomainError::InvalidQuery { param: "limit", .. }));
    }

    #[test]
    fn second_page_of_size_one_returns_second_item() {
        let items = catalog(3);
        let query = ProductQuery {
            pagination: Pagination::new(nz(2), nz(1)),
            ..ProductQuery::default()
        };
        let page = ProductPage::build(&items, &query);
        assert_eq!(page.total_products, 3);
        assert_eq!(page.total_pages, 3);
        assert_eq!(page.current_page, 2);
        assert_eq!(page.products, vec![items[1].clone()]);
    }

    #[test]
    fn out_of_range_page_is_empty_not_an_error() {
        let items = catalog(3);
        let query = ProductQuery {
            pagination: Pagination::new(nz(7), nz(5)),
            ..ProductQuery::default()
        };
        let page = ProductPage::build(&items, &query);
        assert!(page.products.is_empty());
        assert_eq!(page.total_products, 3);
        assert_eq!(page.total_pages, 1);
    }

    #[test]
    fn huge_page_numbers_saturate() {
        let p = Pagination::new(nz(usize::MAX), nz(usize::MAX));
        assert_eq!(p.window(10), 10..10);
    }

    #[test]
    fn empty_result_has_zero_pages() {
        let query = ProductQuery {
            filter: ProductFilter::new(Some("nothing-matches"), None),
            ..ProductQuery::default()
        };
        let page = ProductPage::build(&catalog(4), &query);
        assert_eq!(page.total_products, 0);
        assert_eq!(page.total_pages, 0);
    }

    #[test]
    fn filters_are_case_insensitive_and_combined() {
        let laptop = Product::new("1", "Laptop", 1200.0).with_category("Electronics");
        let lamp = Product::new("2", "Lamp", 30.0).with_category("home");
        let pen = Product::new("3", "Pen", 2.0);

        let f = ProductFilter::new(Some("LA"), Some("elec"));
        assert!(f.matches(&laptop));
        assert!(!f.matches(&lamp));

        let by_category = ProductFilter::new(None, Some("home"));
        assert!(!by_category.matches(&pen));

        let empty = ProductFilter::new(Some(""), Some(""));
        assert!(empty.matches(&pen));
    }

    proptest! {
        #[test]
        fn pages_partition_the_filtered_set(n in 0usize..40, limit in 1usize..12) {
            let items = catalog(n);
            let limit = nz(limit);
            let first = ProductPage::build(&items, &ProductQuery {
                pagination: Pagination::new(nz(1), limit),
                ..ProductQuery::default()
            });

            let mut seen = Vec::new();
            for page in 1..=first.total_pages + 1 {
                let got = ProductPage::build(&items, &ProductQuery {
                    pagination: Pagination::new(nz(page), limit),
                    ..ProductQuery::default()
                });
                prop_assert!(got.products.len() <= limit.get());
                prop_assert_eq!(got.total_products, n);
                if page > first.total_pages {
                    prop_assert!(got.products.is_empty());
                }
                seen.extend(got.products);
            }
            prop_assert_eq!(seen, items);
        }

        #[test]
        fn total_pages_covers_every_item(total in 0usize..10_000, limit in 1usize..500) {
            let p = Pagination::new(nz(1), nz(limit));
            let pages = p.total_pages(total);
            prop_assert!(pages * limit >= total);
            prop_assert!(pages == 0 || (pages - 1) * limit < total);
        }
    }
}
