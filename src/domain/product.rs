use crate::domain::{Money, ProductId};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Represents a product in the catalog.
///
/// Stock is only ever changed through the inventory ledger and the rating
/// aggregate only through review moderation. Prices move through their own
/// actions; see [`ProductAction`](crate::product_actor::ProductAction).
///
/// While a discount runs, `original_price` holds the base price and `price`
/// the discounted one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub description: String,
    pub category: String,
    pub price: Money,
    pub original_price: Option<Money>,
    pub discount_rate: Option<u8>,
    pub stock: u32,
    pub rating_sum: u64,
    pub rating_count: u64,
}

impl Product {
    /// Creates a new Product instance.
    ///
    /// # Arguments
    /// * `id` - Unique identifier (typically set by the actor system)
    /// * `name` - Product name
    /// * `price` - Unit price
    /// * `stock` - Available stock quantity
    pub fn new(id: ProductId, name: impl Into<String>, price: Money, stock: u32) -> Self {
        Self {
            id,
            name: name.into(),
            description: String::new(),
            category: String::new(),
            price,
            original_price: None,
            discount_rate: None,
            stock,
            rating_sum: 0,
            rating_count: 0,
        }
    }

    /// Mean of every approved rating, or 0 when nothing has been approved.
    pub fn average_rating(&self) -> f64 {
        if self.rating_count == 0 {
            0.0
        } else {
            self.rating_sum as f64 / self.rating_count as f64
        }
    }

    pub fn in_stock(&self) -> bool {
        self.stock > 0
    }

    pub fn is_discounted(&self) -> bool {
        self.discount_rate.is_some()
    }
}

/// Params for Product creation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductCreate {
    pub name: String,
    pub description: String,
    pub category: String,
    pub price: Money,
    pub stock: u32,
}

impl ProductCreate {
    pub fn new(name: impl Into<String>, price: Money, stock: u32) -> Self {
        Self {
            name: name.into(),
            description: String::new(),
            category: String::new(),
            price,
            stock,
        }
    }

    pub fn in_category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }

    pub fn described_as(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }
}

/// Catalog edits. Price, stock and ratings have their own guarded paths.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProductUpdate {
    pub name: Option<String>,
    pub description: Option<String>,
    pub category: Option<String>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum StockFilter {
    #[default]
    Any,
    InStock,
    OutOfStock,
    /// Strictly fewer units than the threshold.
    Below(u32),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProductSort {
    Price,
    /// Average approved rating.
    Popularity,
    Name,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortOrder {
    #[default]
    Ascending,
    Descending,
}

/// Predicate and ordering for catalog searches.
#[derive(Debug, Clone, Default)]
pub struct ProductQuery {
    pub category: Option<String>,
    pub min_price: Option<Money>,
    pub max_price: Option<Money>,
    pub stock: StockFilter,
    pub text: Option<String>,
    pub sort: Option<(ProductSort, SortOrder)>,
}

impl ProductQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn in_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn price_between(mut self, min: Money, max: Money) -> Self {
        self.min_price = Some(min);
        self.max_price = Some(max);
        self
    }

    pub fn with_stock(mut self, stock: StockFilter) -> Self {
        self.stock = stock;
        self
    }

    /// Case-insensitive match against name and description. Blank text matches everything.
    pub fn search(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    pub fn sorted_by(mut self, sort: ProductSort, order: SortOrder) -> Self {
        self.sort = Some((sort, order));
        self
    }

    pub fn matches(&self, product: &Product) -> bool {
        if let Some(category) = &self.category {
            if !product.category.eq_ignore_ascii_case(category) {
                return false;
            }
        }
        if self.min_price.is_some_and(|min| product.price < min) {
            return false;
        }
        if self.max_price.is_some_and(|max| product.price > max) {
            return false;
        }
        let stock_ok = match self.stock {
            StockFilter::Any => true,
            StockFilter::InStock => product.in_stock(),
            StockFilter::OutOfStock => product.stock == 0,
            StockFilter::Below(threshold) => product.stock < threshold,
        };
        if !stock_ok {
            return false;
        }
        match self.text.as_deref().map(str::trim) {
            None | Some("") => true,
            Some(text) => {
                let needle = text.to_lowercase();
                product.name.to_lowercase().contains(&needle)
                    || product.description.to_lowercase().contains(&needle)
            }
        }
    }

    /// Orders `products` in place. Without a sort key the store's id order is kept.
    pub fn sort(&self, products: &mut [Product]) {
        let Some((key, order)) = self.sort else {
            return;
        };
        products.sort_by(|a, b| {
            let ordering = match key {
                ProductSort::Price => a.price.cmp(&b.price),
                ProductSort::Popularity => a
                    .average_rating()
                    .partial_cmp(&b.average_rating())
                    .unwrap_or(Ordering::Equal),
                ProductSort::Name => a.name.to_lowercase().cmp(&b.name.to_lowercase()),
            };
            match order {
                SortOrder::Ascending => ordering,
                SortOrder::Descending => ordering.reverse(),
            }
        });
    }
}
