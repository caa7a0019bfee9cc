//! Catalog products, and the category listing joined with reviews.

mod dto;
mod service;

pub use dto::{CreateProductDto, FindProductDto, ProductPatch};
pub use service::{ProductService, ProductWithReviews};

use serde::{Deserialize, Serialize};
use store::Document;
use validator::Validate;

pub const PRODUCT_NOT_FOUND_ERROR: &str = "Продукт с таким ID не найден";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct ProductCharacteristic {
    #[validate(length(min = 1, message = "Название характеристики не может быть пустым"))]
    pub name: String,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub image: String,
    pub title: String,
    pub price: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub old_price: Option<f64>,
    pub credit: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub calculated_rating: Option<f64>,
    pub description: String,
    pub advantages: String,
    pub dis_advantages: String,
    pub categories: Vec<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub characteristics: Vec<ProductCharacteristic>,
}

impl Document for Product {
    const COLLECTION: &'static str = "product";
}
