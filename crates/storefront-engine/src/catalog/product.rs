//! Product types as the engine sees them.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::ids::{CategoryId, ProductId, ReviewId};
use crate::money::Money;

/// A product in the catalog.
///
/// Supplied by the catalog provider and never mutated by the engine.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Product {
    /// Unique product identifier.
    pub id: ProductId,
    /// Product title.
    pub title: String,
    /// Full description.
    pub description: String,
    /// List price.
    pub price: Money,
    /// Sale price, when the product is discounted.
    pub discount_price: Option<Money>,
    /// Category name.
    pub category: String,
    /// Relational category id, when the provider has one.
    pub category_id: Option<CategoryId>,
    /// Image URLs, primary first.
    pub images: Vec<String>,
    /// Average review rating.
    pub rating_average: f64,
    /// Whether the product is promoted in the default ordering.
    pub featured: bool,
    /// When the provider created the record.
    pub created_at: Option<DateTime<Utc>>,
}

impl Product {
    /// Create a product with the given list price and empty metadata.
    pub fn new(id: impl Into<ProductId>, title: impl Into<String>, price: Money) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            description: String::new(),
            price,
            discount_price: None,
            category: String::new(),
            category_id: None,
            images: Vec::new(),
            rating_average: 0.0,
            featured: false,
            created_at: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_discount_price(mut self, price: Money) -> Self {
        self.discount_price = Some(price);
        self
    }

    pub fn with_category(mut self, name: impl Into<String>) -> Self {
        self.category = name.into();
        self
    }

    pub fn with_category_id(mut self, id: impl Into<CategoryId>) -> Self {
        self.category_id = Some(id.into());
        self
    }

    pub fn with_image(mut self, url: impl Into<String>) -> Self {
        self.images.push(url.into());
        self
    }

    pub fn with_rating(mut self, rating: f64) -> Self {
        self.rating_average = rating;
        self
    }

    pub fn featured(mut self, featured: bool) -> Self {
        self.featured = featured;
        self
    }

    /// The price actually charged: the discount price if present.
    pub fn effective_price(&self) -> Money {
        self.discount_price.unwrap_or(self.price)
    }

    /// Check if the product is on sale.
    pub fn is_on_sale(&self) -> bool {
        self.discount_price
            .map(|d| d.amount_minor < self.price.amount_minor)
            .unwrap_or(false)
    }

    /// Calculate the discount percentage if on sale.
    pub fn discount_percentage(&self) -> Option<f64> {
        if !self.is_on_sale() || self.price.amount_minor <= 0 {
            return None;
        }
        let savings = self.price.amount_minor - self.effective_price().amount_minor;
        Some((savings as f64 / self.price.amount_minor as f64) * 100.0)
    }

    pub fn primary_image(&self) -> Option<&str> {
        self.images.first().map(String::as_str)
    }
}

/// Everything shown on a product detail view.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProductDetail {
    pub product: Product,
    /// Feature bullet points.
    pub features: Vec<String>,
    pub reviews: Vec<Review>,
    pub related: Vec<RelatedProduct>,
}

impl ProductDetail {
    /// Mean of the loaded review ratings, if there are any.
    pub fn review_average(&self) -> Option<f64> {
        if self.reviews.is_empty() {
            return None;
        }
        let sum: u32 = self.reviews.iter().map(|r| u32::from(r.rating)).sum();
        Some(f64::from(sum) / self.reviews.len() as f64)
    }
}

/// A review prepared for display.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Review {
    pub id: ReviewId,
    pub user_name: String,
    /// Star rating, 1 to 5.
    pub rating: u8,
    pub date: NaiveDate,
    pub title: String,
    pub comment: String,
}

/// A product suggested alongside the one being viewed.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RelatedProduct {
    pub id: ProductId,
    pub name: String,
    pub price: Money,
    pub original_price: Option<Money>,
    pub rating: f64,
    pub image: Option<String>,
}
