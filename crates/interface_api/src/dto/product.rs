//! Product DTOs

use serde::Deserialize;

use domain_product::ProductFilter;

/// Query string of `GET /products`
#[derive(Debug, Default, Deserialize)]
pub struct ListProductsQuery {
    pub category: Option<String>,
    pub active: Option<bool>,
}

impl From<ListProductsQuery> for ProductFilter {
    fn from(query: ListProductsQuery) -> Self {
        ProductFilter {
            category: query.category.filter(|c| !c.is_empty()),
            active: query.active,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_category_is_no_filter() {
        let filter = ProductFilter::from(ListProductsQuery {
            category: Some(String::new()),
            active: Some(true),
        });

        assert_eq!(filter.category, None);
        assert_eq!(filter.active, Some(true));
    }
}
