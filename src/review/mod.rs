//! Product reviews.

mod service;

pub use service::ReviewService;

use serde::{Deserialize, Serialize};
use store::Document;
use validator::{Validate, ValidationError};

use crate::validation::validate_object_id;

pub const REVIEW_NOT_FOUND: &str = "Отзыв с таким id не найден";
pub const RATING_TOO_LOW_ERROR: &str = "Рейтинг не может быть менее 1";
pub const RATING_TOO_HIGH_ERROR: &str = "Рейтинг не может быть более 5";

pub const MIN_RATING: u8 = 1;
pub const MAX_RATING: u8 = 5;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    pub name: String,
    pub title: String,
    pub description: String,
    pub rating: u8,
    /// Hex id of the reviewed product.
    pub product_id: String,
}

impl Document for Review {
    const COLLECTION: &'static str = "review";
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
#[validate(schema(function = "validate_rating"))]
pub struct CreateReviewDto {
    pub name: String,
    pub title: String,
    pub description: String,
    pub rating: u8,
    #[validate(custom(function = "validate_object_id"))]
    pub product_id: String,
}

fn validate_rating(dto: &CreateReviewDto) -> Result<(), ValidationError> {
    let message = if dto.rating < MIN_RATING {
        RATING_TOO_LOW_ERROR
    } else if dto.rating > MAX_RATING {
        RATING_TOO_HIGH_ERROR
    } else {
        return Ok(());
    };
    Err(ValidationError::new("rating").with_message(message.into()))
}

impl From<CreateReviewDto> for Review {
    fn from(dto: CreateReviewDto) -> Self {
        Self {
            name: dto.name,
            title: dto.title,
            description: dto.description,
            rating: dto.rating,
            product_id: dto.product_id.to_lowercase(),
        }
    }
}
