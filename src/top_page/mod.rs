//! SEO landing pages, addressable by id or by their human-readable alias.

mod dto;
mod service;

pub use dto::{CreateTopPageDto, FindTopPageDto, TopPagePatch};
pub use service::{TopPageGroup, TopPageGroupKey, TopPageLink, TopPageService};

use serde::{Deserialize, Serialize};
use store::Document;
use validator::Validate;

pub const TOP_PAGE_NOT_FOUND_ERROR: &str = "Страница с таким id не найдена";
pub const TOP_PAGE_ALIAS_NOT_FOUND_ERROR: &str = "Страница с таким alias не найдена";
pub const TOP_PAGE_ALIAS_TAKEN_ERROR: &str = "Страница с таким alias уже существует";

/// First-level catalog section. Serialized as its ordinal (`0..=3`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum TopLevelCategory {
    Courses,
    Services,
    Books,
    Products,
}

impl TryFrom<u8> for TopLevelCategory {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Self::Courses),
            1 => Ok(Self::Services),
            2 => Ok(Self::Books),
            3 => Ok(Self::Products),
            other => Err(format!("unknown top level category {other}")),
        }
    }
}

impl From<TopLevelCategory> for u8 {
    fn from(value: TopLevelCategory) -> Self {
        match value {
            TopLevelCategory::Courses => 0,
            TopLevelCategory::Services => 1,
            TopLevelCategory::Books => 2,
            TopLevelCategory::Products => 3,
        }
    }
}

/// Vacancy statistics shown on course pages.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct HhData {
    pub count: u64,
    #[validate(range(min = 0.0))]
    pub junior_salary: f64,
    #[validate(range(min = 0.0))]
    pub middle_salary: f64,
    #[validate(range(min = 0.0))]
    pub senior_salary: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TopPageAdvantage {
    pub title: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TopPage {
    pub first_category: TopLevelCategory,
    pub second_category: String,
    pub alias: String,
    pub title: String,
    pub category: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hh: Option<HhData>,
    #[serde(default)]
    pub advantages: Vec<TopPageAdvantage>,
    #[serde(default)]
    pub seo_text: String,
    #[serde(default)]
    pub tags_title: String,
    #[serde(default)]
    pub tags: Vec<String>,
}

impl Document for TopPage {
    const COLLECTION: &'static str = "top-page";

    fn unique_keys(&self) -> Vec<(&'static str, String)> {
        vec![("alias", self.alias.clone())]
    }

    fn text_fields(&self) -> Vec<&str> {
        vec![&self.title, &self.seo_text]
    }
}
