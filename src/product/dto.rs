use serde::Deserialize;
use validator::Validate;

use super::{Product, ProductCharacteristic};

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateProductDto {
    pub image: String,
    #[validate(length(min = 1, message = "Название продукта не может быть пустым"))]
    pub title: String,
    #[validate(range(min = 0.0, message = "Цена не может быть отрицательной"))]
    pub price: f64,
    #[validate(range(min = 0.0, message = "Цена не может быть отрицательной"))]
    pub old_price: Option<f64>,
    #[validate(range(min = 0.0))]
    pub credit: f64,
    pub description: String,
    pub advantages: String,
    pub dis_advantages: String,
    pub categories: Vec<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[validate(nested)]
    #[serde(default)]
    pub characteristics: Vec<ProductCharacteristic>,
}

impl From<CreateProductDto> for Product {
    fn from(dto: CreateProductDto) -> Self {
        Self {
            image: dto.image,
            title: dto.title,
            price: dto.price,
            old_price: dto.old_price,
            credit: dto.credit,
            calculated_rating: None,
            description: dto.description,
            advantages: dto.advantages,
            dis_advantages: dto.dis_advantages,
            categories: dto.categories,
            tags: dto.tags,
            characteristics: dto.characteristics,
        }
    }
}

/// Partial update: only fields present in the payload are written.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ProductPatch {
    pub image: Option<String>,
    #[validate(length(min = 1, message = "Название продукта не может быть пустым"))]
    pub title: Option<String>,
    #[validate(range(min = 0.0, message = "Цена не может быть отрицательной"))]
    pub price: Option<f64>,
    #[validate(range(min = 0.0, message = "Цена не может быть отрицательной"))]
    pub old_price: Option<f64>,
    #[validate(range(min = 0.0))]
    pub credit: Option<f64>,
    pub description: Option<String>,
    pub advantages: Option<String>,
    pub dis_advantages: Option<String>,
    pub categories: Option<Vec<String>>,
    pub tags: Option<Vec<String>>,
    #[validate(nested)]
    pub characteristics: Option<Vec<ProductCharacteristic>>,
}

impl ProductPatch {
    pub fn apply(self, product: &mut Product) {
        if let Some(image) = self.image {
            product.image = image;
        }
        if let Some(title) = self.title {
            product.title = title;
        }
        if let Some(price) = self.price {
            product.price = price;
        }
        if let Some(old_price) = self.old_price {
            product.old_price = Some(old_price);
        }
        if let Some(credit) = self.credit {
            product.credit = credit;
        }
        if let Some(description) = self.description {
            product.description = description;
        }
        if let Some(advantages) = self.advantages {
            product.advantages = advantages;
        }
        if let Some(dis_advantages) = self.dis_advantages {
            product.dis_advantages = dis_advantages;
        }
        if let Some(categories) = self.categories {
            product.categories = categories;
        }
        if let Some(tags) = self.tags {
            product.tags = tags;
        }
        if let Some(characteristics) = self.characteristics {
            product.characteristics = characteristics;
        }
    }
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct FindProductDto {
    #[validate(length(min = 1))]
    pub category: String,
    #[validate(range(min = 1, message = "limit должен быть больше 0"))]
    pub limit: usize,
}
