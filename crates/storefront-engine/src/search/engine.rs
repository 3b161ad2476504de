//! The catalog query engine: filter, sort, paginate.
//!
//! A pure function of the product collection and the query. All sorts are
//! stable, so ties keep collection order.

use std::cmp::Reverse;

use crate::catalog::Product;
use crate::search::filter::matches_text;
use crate::search::{CatalogQuery, Pagination, QueryPage, SortKey};

/// Run `query` over `products` and return the requested page.
///
/// A page past the end yields an empty item list, not an error.
pub fn query(products: &[Product], query: &CatalogQuery) -> QueryPage<Product> {
    let mut matched: Vec<&Product> = products
        .iter()
        .filter(|p| query.category.matches(p))
        .filter(|p| matches_text(p, &query.search_text))
        .collect();

    sort_products(&mut matched, query.sort);

    let pagination = Pagination::new(query.page, query.page_size, matched.len());
    let items = matched
        .into_iter()
        .skip(pagination.offset())
        .take(pagination.page_size)
        .cloned()
        .collect();

    QueryPage::new(items, pagination)
}

fn sort_products(products: &mut [&Product], sort: SortKey) {
    match sort {
        SortKey::Featured => products.sort_by_key(|p| !p.featured),
        SortKey::PriceLow => products.sort_by_key(|p| p.effective_price().amount_minor),
        SortKey::PriceHigh => products.sort_by_key(|p| Reverse(p.effective_price().amount_minor)),
        SortKey::Rating => products.sort_by(|a, b| b.rating_average.total_cmp(&a.rating_average)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::money::{Currency, Money};
    use crate::search::CategoryFilter;

    fn usd(major: i64) -> Money {
        Money::from_major(major, Currency::USD)
    }

    fn fixture() -> Vec<Product> {
        vec![
            Product::new("a", "Oak Table", usd(400)).with_category("Home").with_rating(4.1),
            Product::new("b", "Silk Scarf", usd(120)).with_category("Fashion").with_rating(4.9).featured(true),
            Product::new("c", "Brass Lamp", usd(90)).with_category("home").with_rating(4.5),
            Product::new("d", "Studio Headphones", usd(300))
                .with_discount_price(usd(80))
                .with_category("Audio")
                .with_rating(4.9),
            Product::new("e", "Leather Tote", usd(250)).with_category("Fashion").featured(true),
            Product::new("f", "Vinyl Player", usd(500)).with_category("Audio").with_rating(3.8),
        ]
    }

    fn ids(page: &QueryPage<Product>) -> Vec<&str> {
        page.items.iter().map(|p| p.id.as_str()).collect()
    }

    #[test]
    fn test_category_filter_independent_of_sort() {
        let products = fixture();
        for sort in [
            SortKey::Featured,
            SortKey::PriceLow,
            SortKey::PriceHigh,
            SortKey::Rating,
        ] {
            let q = CatalogQuery::new(8)
                .with_category(CategoryFilter::name("home"))
                .with_sort(sort);
            let page = query(&products, &q);
            let mut got = ids(&page);
            got.sort_unstable();
            assert_eq!(got, vec!["a", "c"], "sort {:?}", sort);
        }
    }

    #[test]
    fn test_featured_sort_is_stable() {
        let page = query(&fixture(), &CatalogQuery::new(8));
        assert_eq!(ids(&page), vec!["b", "e", "a", "c", "d", "f"]);
    }

    #[test]
    fn test_price_sorts_use_effective_price() {
        let low = query(&fixture(), &CatalogQuery::new(8).with_sort(SortKey::PriceLow));
        assert_eq!(ids(&low), vec!["d", "c", "b", "e", "a", "f"]);

        let high = query(&fixture(), &CatalogQuery::new(8).with_sort(SortKey::PriceHigh));
        assert_eq!(ids(&high), vec!["f", "a", "e", "b", "c", "d"]);
    }

    #[test]
    fn test_rating_sort_descending_with_stable_ties() {
        let page = query(&fixture(), &CatalogQuery::new(8).with_sort(SortKey::Rating));
        assert_eq!(ids(&page), vec!["b", "d", "c", "a", "f", "e"]);
    }

    #[test]
    fn test_search_text() {
        let page = query(&fixture(), &CatalogQuery::new(8).with_search("LAMP"));
        assert_eq!(ids(&page), vec!["c"]);
    }

    #[test]
    fn test_pages_cover_filtered_set_exactly_once() {
        let products = fixture();
        let first = query(&products, &CatalogQuery::new(4));
        assert_eq!(first.total_pages(), 2);

        let mut seen = Vec::new();
        for page in 1..=first.total_pages() {
            let result = query(&products, &CatalogQuery::new(4).with_page(page));
            seen.extend(result.items.into_iter().map(|p| p.id));
        }
        assert_eq!(seen.len(), products.len());
        let mut unique = seen.clone();
        unique.sort();
        unique.dedup();
        assert_eq!(unique.len(), products.len());
    }

    #[test]
    fn test_page_beyond_range_is_empty() {
        let page = query(&fixture(), &CatalogQuery::new(4).with_page(7));
        assert!(page.is_empty());
        assert_eq!(page.total_pages(), 2);
    }

    #[test]
    fn test_no_matches() {
        let page = query(&fixture(), &CatalogQuery::new(8).with_search("zeppelin"));
        assert!(page.is_empty());
        assert_eq!(page.total_pages(), 0);
    }
}
