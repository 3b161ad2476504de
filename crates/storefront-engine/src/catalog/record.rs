//! Provider wire records and their mapping into catalog types.
//!
//! Providers send prices as decimals (string or number) in dollars and
//! timestamps as RFC 3339 strings. Mapping converts prices to integer
//! minor units once, here, so nothing downstream handles floats.

use chrono::{DateTime, Utc};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::catalog::{Category, Product, ProductDetail, RelatedProduct, Review};
use crate::config::CatalogConfig;
use crate::error::CommerceError;
use crate::ids::{CategoryId, ProductId, ReviewId};
use crate::money::{Currency, Money};

/// Catalog prices are quoted in dollars.
pub const CATALOG_CURRENCY: Currency = Currency::USD;

const REVIEW_TITLE_CHARS: usize = 50;

/// A product as the provider returns it in listings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ProductRecord {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    pub price: Decimal,
    #[serde(default)]
    pub discount_price: Option<Decimal>,
    #[serde(default)]
    pub category: Option<CategoryRecord>,
    #[serde(default)]
    pub category_id: Option<String>,
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default)]
    pub ratings_average: Option<Decimal>,
    #[serde(default)]
    pub featured: Option<bool>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

/// An embedded category relation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CategoryRecord {
    pub id: String,
    pub name: String,
}

impl From<CategoryRecord> for Category {
    fn from(record: CategoryRecord) -> Self {
        Category::new(record.id, record.name)
    }
}

/// A product with the extra relations loaded for its detail view.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ProductDetailRecord {
    #[serde(flatten)]
    pub product: ProductRecord,
    #[serde(default)]
    pub features: Vec<String>,
    #[serde(default)]
    pub reviews: Vec<ReviewRecord>,
    #[serde(default)]
    pub related_products: Vec<RelatedProductRecord>,
}

impl From<ProductRecord> for ProductDetailRecord {
    fn from(product: ProductRecord) -> Self {
        Self {
            product,
            features: Vec::new(),
            reviews: Vec::new(),
            related_products: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ReviewRecord {
    pub id: String,
    pub rating: u8,
    #[serde(default)]
    pub comment: Option<String>,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub user: Option<ReviewerRecord>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ReviewerRecord {
    #[serde(default)]
    pub username: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RelatedProductRecord {
    pub id: String,
    pub name: String,
    pub price: Decimal,
    #[serde(default)]
    pub original_price: Option<Decimal>,
    #[serde(default)]
    pub rating: Option<Decimal>,
    #[serde(default)]
    pub image: Option<String>,
}

impl ProductRecord {
    /// Map into a [`Product`].
    ///
    /// Fails with `InvalidPrice` when a price is negative or too large for
    /// minor units.
    pub fn to_product(&self, config: &CatalogConfig) -> Result<Product, CommerceError> {
        let price = catalog_money(self.price, &self.id)?;
        let discount_price = self
            .discount_price
            .map(|d| catalog_money(d, &self.id))
            .transpose()?;

        let rating_average = self
            .ratings_average
            .and_then(|r| r.to_f64())
            .unwrap_or(0.0);
        let featured = self
            .featured
            .unwrap_or(rating_average > config.featured_rating_threshold);

        let category_id = self
            .category_id
            .clone()
            .or_else(|| self.category.as_ref().map(|c| c.id.clone()))
            .map(CategoryId::new);

        Ok(Product {
            id: ProductId::new(self.id.clone()),
            title: self.title.clone(),
            description: self.description.clone().unwrap_or_default(),
            price,
            discount_price,
            category: self
                .category
                .as_ref()
                .map(|c| c.name.clone())
                .unwrap_or_default(),
            category_id,
            images: self.images.clone(),
            rating_average,
            featured,
            created_at: self.created_at,
        })
    }
}

impl Product {
    /// Build a product from a provider record.
    pub fn from_record(record: &ProductRecord, config: &CatalogConfig) -> Result<Self, CommerceError> {
        record.to_product(config)
    }
}

impl ProductDetailRecord {
    /// Map into a [`ProductDetail`], preparing reviews for display.
    pub fn to_detail(&self, config: &CatalogConfig) -> Result<ProductDetail, CommerceError> {
        let product = self.product.to_product(config)?;
        let reviews = self
            .reviews
            .iter()
            .map(|r| r.to_review(&product.title))
            .collect();
        let related = self
            .related_products
            .iter()
            .map(RelatedProductRecord::to_related)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(ProductDetail {
            product,
            features: self.features.clone(),
            reviews,
            related,
        })
    }
}

impl ReviewRecord {
    /// Map into a displayable [`Review`].
    ///
    /// The title is the comment cut to 50 characters (with "..." when cut),
    /// or "Review for {product}" when there is no comment.
    pub fn to_review(&self, product_title: &str) -> Review {
        let title = match self.comment.as_deref() {
            Some(comment) if !comment.is_empty() => {
                let mut title: String = comment.chars().take(REVIEW_TITLE_CHARS).collect();
                if comment.chars().count() > REVIEW_TITLE_CHARS {
                    title.push_str("...");
                }
                title
            }
            _ => format!("Review for {}", product_title),
        };

        let user_name = self
            .user
            .as_ref()
            .and_then(|u| u.username.clone())
            .filter(|name| !name.is_empty())
            .unwrap_or_else(|| "Anonymous User".to_string());

        Review {
            id: ReviewId::new(self.id.clone()),
            user_name,
            rating: self.rating.clamp(1, 5),
            date: self.created_at.date_naive(),
            title,
            comment: self
                .comment
                .clone()
                .filter(|c| !c.is_empty())
                .unwrap_or_else(|| "No comment provided.".to_string()),
        }
    }
}

impl RelatedProductRecord {
    pub fn to_related(&self) -> Result<RelatedProduct, CommerceError> {
        Ok(RelatedProduct {
            id: ProductId::new(self.id.clone()),
            name: self.name.clone(),
            price: catalog_money(self.price, &self.id)?,
            original_price: self
                .original_price
                .map(|p| catalog_money(p, &self.id))
                .transpose()?,
            rating: self.rating.and_then(|r| r.to_f64()).unwrap_or(0.0),
            image: self.image.clone(),
        })
    }
}

fn catalog_money(amount: Decimal, product_id: &str) -> Result<Money, CommerceError> {
    if amount.is_sign_negative() && !amount.is_zero() {
        return Err(CommerceError::InvalidPrice(format!(
            "{} has negative price {}",
            product_id, amount
        )));
    }
    Money::from_decimal(amount, CATALOG_CURRENCY)
        .map_err(|_| CommerceError::InvalidPrice(format!("{} price {} out of range", product_id, amount)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record_json() -> serde_json::Value {
        serde_json::json!({
            "id": "prod-1",
            "title": "Obsidian Void Watch",
            "description": "A masterpiece of dark matter engineering.",
            "price": "45000.00",
            "discountPrice": 42500.5,
            "category": { "id": "cat-horology", "name": "Horology" },
            "images": ["https://img.example/watch.jpg"],
            "ratingsAverage": "4.9",
            "createdAt": "2025-03-01T10:00:00Z"
        })
    }

    #[test]
    fn test_product_mapping() {
        let record: ProductRecord = serde_json::from_value(record_json()).unwrap();
        let product = record.to_product(&CatalogConfig::default()).unwrap();

        assert_eq!(product.id.as_str(), "prod-1");
        assert_eq!(product.price, Money::new(4_500_000, Currency::USD));
        assert_eq!(product.discount_price, Some(Money::new(4_250_050, Currency::USD)));
        assert_eq!(product.category, "Horology");
        assert_eq!(product.category_id, Some(CategoryId::new("cat-horology")));
        assert!((product.rating_average - 4.9).abs() < f64::EPSILON);
        assert!(product.created_at.is_some());
    }

    #[test]
    fn test_featured_derived_from_rating_when_absent() {
        let mut record: ProductRecord = serde_json::from_value(record_json()).unwrap();
        assert!(record.to_product(&CatalogConfig::default()).unwrap().featured);

        record.ratings_average = Some(Decimal::new(48, 1));
        assert!(!record.to_product(&CatalogConfig::default()).unwrap().featured);

        record.featured = Some(true);
        assert!(record.to_product(&CatalogConfig::default()).unwrap().featured);
    }

    #[test]
    fn test_negative_price_rejected() {
        let mut record: ProductRecord = serde_json::from_value(record_json()).unwrap();
        record.price = Decimal::new(-1, 0);
        let result = record.to_product(&CatalogConfig::default());
        assert!(matches!(result, Err(CommerceError::InvalidPrice(_))));
    }

    #[test]
    fn test_minimal_record() {
        let record: ProductRecord = serde_json::from_value(serde_json::json!({
            "id": "p", "title": "Plain", "price": 10
        }))
        .unwrap();
        let product = record.to_product(&CatalogConfig::default()).unwrap();
        assert_eq!(product.description, "");
        assert_eq!(product.category, "");
        assert_eq!(product.category_id, None);
        assert!(!product.featured);
    }

    #[test]
    fn test_review_mapping() {
        let created_at = "2025-06-15T08:30:00Z".parse().unwrap();
        let long = ReviewRecord {
            id: "r1".to_string(),
            rating: 5,
            comment: Some("x".repeat(60)),
            created_at,
            user: Some(ReviewerRecord {
                username: Some("ana".to_string()),
            }),
        };
        let review = long.to_review("Watch");
        assert_eq!(review.title, format!("{}...", "x".repeat(50)));
        assert_eq!(review.user_name, "ana");
        assert_eq!(review.date.to_string(), "2025-06-15");

        let empty = ReviewRecord {
            id: "r2".to_string(),
            rating: 4,
            comment: None,
            created_at,
            user: None,
        };
        let review = empty.to_review("Watch");
        assert_eq!(review.title, "Review for Watch");
        assert_eq!(review.user_name, "Anonymous User");
        assert_eq!(review.comment, "No comment provided.");
    }

    #[test]
    fn test_detail_record_flattens_product() {
        let mut json = record_json();
        json["features"] = serde_json::json!(["Meteorite alloy band"]);
        json["relatedProducts"] = serde_json::json!([
            { "id": "related-1", "name": "Strap", "price": 89, "originalPrice": 129, "rating": 4.5 }
        ]);

        let record: ProductDetailRecord = serde_json::from_value(json).unwrap();
        let detail = record.to_detail(&CatalogConfig::default()).unwrap();
        assert_eq!(detail.product.title, "Obsidian Void Watch");
        assert_eq!(detail.features, vec!["Meteorite alloy band".to_string()]);
        assert_eq!(detail.related[0].price, Money::from_major(89, Currency::USD));
        assert_eq!(detail.review_average(), None);
    }
}
