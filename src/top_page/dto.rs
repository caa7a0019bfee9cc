use serde::Deserialize;
use validator::Validate;

use super::{HhData, TopLevelCategory, TopPage, TopPageAdvantage};

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateTopPageDto {
    pub first_category: TopLevelCategory,
    pub second_category: String,
    #[validate(length(min = 1, message = "alias не может быть пустым"))]
    pub alias: String,
    #[validate(length(min = 1, message = "title не может быть пустым"))]
    pub title: String,
    pub category: String,
    #[validate(nested)]
    #[serde(default)]
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

impl From<CreateTopPageDto> for TopPage {
    fn from(dto: CreateTopPageDto) -> Self {
        Self {
            first_category: dto.first_category,
            second_category: dto.second_category,
            alias: dto.alias,
            title: dto.title,
            category: dto.category,
            hh: dto.hh,
            advantages: dto.advantages,
            seo_text: dto.seo_text,
            tags_title: dto.tags_title,
            tags: dto.tags,
        }
    }
}

/// Partial update: only fields present in the payload are written.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct TopPagePatch {
    pub first_category: Option<TopLevelCategory>,
    pub second_category: Option<String>,
    #[validate(length(min = 1, message = "alias не может быть пустым"))]
    pub alias: Option<String>,
    #[validate(length(min = 1, message = "title не может быть пустым"))]
    pub title: Option<String>,
    pub category: Option<String>,
    #[validate(nested)]
    pub hh: Option<HhData>,
    pub advantages: Option<Vec<TopPageAdvantage>>,
    pub seo_text: Option<String>,
    pub tags_title: Option<String>,
    pub tags: Option<Vec<String>>,
}

impl TopPagePatch {
    pub fn apply(self, page: &mut TopPage) {
        if let Some(first_category) = self.first_category {
            page.first_category = first_category;
        }
        if let Some(second_category) = self.second_category {
            page.second_category = second_category;
        }
        if let Some(alias) = self.alias {
            page.alias = alias;
        }
        if let Some(title) = self.title {
            page.title = title;
        }
        if let Some(category) = self.category {
            page.category = category;
        }
        if let Some(hh) = self.hh {
            page.hh = Some(hh);
        }
        if let Some(advantages) = self.advantages {
            page.advantages = advantages;
        }
        if let Some(seo_text) = self.seo_text {
            page.seo_text = seo_text;
        }
        if let Some(tags_title) = self.tags_title {
            page.tags_title = tags_title;
        }
        if let Some(tags) = self.tags {
            page.tags = tags;
        }
    }
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct FindTopPageDto {
    pub first_category: TopLevelCategory,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn payload() -> serde_json::Value {
        json!({
            "firstCategory": 0,
            "secondCategory": "Разработка",
            "alias": "typescript",
            "title": "Курсы TypeScript",
            "category": "typescript",
            "hh": { "count": 10, "juniorSalary": 80000, "middleSalary": 150000, "seniorSalary": 250000 },
            "advantages": [{ "title": "Типы", "description": "Меньше ошибок" }],
            "seoText": "Лучшие курсы",
            "tagsTitle": "Теги",
            "tags": ["ts"]
        })
    }

    #[test]
    fn create_dto_accepts_full_payload() {
        let dto: CreateTopPageDto = serde_json::from_value(payload()).unwrap();
        assert!(dto.validate().is_ok());

        let page = TopPage::from(dto);
        assert_eq!(page.first_category, TopLevelCategory::Courses);
        assert_eq!(page.hh.as_ref().unwrap().count, 10);
        assert_eq!(page.advantages.len(), 1);
    }

    #[test]
    fn create_dto_rejects_negative_salary_and_empty_alias() {
        let mut raw = payload();
        raw["alias"] = json!("");
        raw["hh"]["juniorSalary"] = json!(-1);
        let dto: CreateTopPageDto = serde_json::from_value(raw).unwrap();

        let errors = dto.validate().unwrap_err();
        let messages = crate::validation::error_messages(&errors);
        assert_eq!(messages.len(), 2);
        assert!(messages.contains(&"alias не может быть пустым".to_string()));
    }

    #[test]
    fn patch_only_touches_provided_fields() {
        let mut page = TopPage::from(serde_json::from_value::<CreateTopPageDto>(payload()).unwrap());
        let patch: TopPagePatch = serde_json::from_value(json!({ "title": "Новый" })).unwrap();
        patch.apply(&mut page);

        assert_eq!(page.title, "Новый");
        assert_eq!(page.alias, "typescript");
        assert_eq!(page.tags, vec!["ts"]);
    }
}
