use std::sync::Arc;

use serde::Serialize;
use store::{DocumentId, DocumentStore, Stored, StoreError};

use super::{
    CreateTopPageDto, TOP_PAGE_ALIAS_TAKEN_ERROR, TopLevelCategory, TopPage, TopPagePatch,
};
use crate::error::{ServiceError, ServiceResult};

/// One `secondCategory` bucket of [`TopPageService::find_by_category`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TopPageGroup {
    #[serde(rename = "_id")]
    pub id: TopPageGroupKey,
    pub pages: Vec<TopPageLink>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TopPageGroupKey {
    pub second_category: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TopPageLink {
    pub alias: String,
    pub title: String,
}

#[derive(Clone)]
pub struct TopPageService {
    store: Arc<DocumentStore>,
}

impl TopPageService {
    pub fn new(store: Arc<DocumentStore>) -> Self {
        Self { store }
    }

    pub fn create(&self, dto: CreateTopPageDto) -> ServiceResult<Stored<TopPage>> {
        self.store
            .collection::<TopPage>()
            .insert(dto.into())
            .map_err(alias_conflict)
    }

    pub fn find_by_id(&self, id: &DocumentId) -> ServiceResult<Option<Stored<TopPage>>> {
        Ok(self.store.collection::<TopPage>().find_by_id(id)?)
    }

    pub fn find_by_alias(&self, alias: &str) -> ServiceResult<Option<Stored<TopPage>>> {
        Ok(self
            .store
            .collection::<TopPage>()
            .find_one(|page| page.alias == alias)?)
    }

    pub fn delete_by_id(&self, id: &DocumentId) -> ServiceResult<Option<Stored<TopPage>>> {
        Ok(self.store.collection::<TopPage>().delete_by_id(id)?)
    }

    pub fn update_by_id(
        &self,
        id: &DocumentId,
        patch: TopPagePatch,
    ) -> ServiceResult<Option<Stored<TopPage>>> {
        self.store
            .collection::<TopPage>()
            .update_by_id(id, |page| patch.apply(page))
            .map_err(alias_conflict)
    }

    /// Pages of one first-level category, bucketed by `secondCategory`.
    ///
    /// Buckets appear in the order their first page was created.
    pub fn find_by_category(
        &self,
        first_category: TopLevelCategory,
    ) -> ServiceResult<Vec<TopPageGroup>> {
        let pages = self
            .store
            .collection::<TopPage>()
            .find(|page| page.first_category == first_category)?;

        let mut groups: Vec<TopPageGroup> = Vec::new();
        for page in pages {
            let page = page.into_inner();
            let link = TopPageLink {
                alias: page.alias,
                title: page.title,
            };
            match groups
                .iter_mut()
                .find(|group| group.id.second_category == page.second_category)
            {
                Some(group) => group.pages.push(link),
                None => groups.push(TopPageGroup {
                    id: TopPageGroupKey {
                        second_category: page.second_category,
                    },
                    pages: vec![link],
                }),
            }
        }
        Ok(groups)
    }

    /// Word search over page titles and SEO text.
    pub fn find_by_text(&self, text: &str) -> ServiceResult<Vec<Stored<TopPage>>> {
        Ok(self.store.collection::<TopPage>().text_search(text)?)
    }
}

fn alias_conflict(err: StoreError) -> ServiceError {
    match err {
        StoreError::Duplicate { field: "alias", .. } => {
            ServiceError::Conflict(TOP_PAGE_ALIAS_TAKEN_ERROR)
        }
        other => ServiceError::Store(other),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn service() -> TopPageService {
        TopPageService::new(Arc::new(DocumentStore::in_memory()))
    }

    fn dto(alias: &str, category: u8, second: &str, title: &str, seo: &str) -> CreateTopPageDto {
        serde_json::from_value(json!({
            "firstCategory": category,
            "secondCategory": second,
            "alias": alias,
            "title": title,
            "category": alias,
            "seoText": seo
        }))
        .unwrap()
    }

    #[test]
    fn create_then_lookup_by_id_and_alias() {
        let service = service();
        let created = service
            .create(dto("photoshop", 0, "Дизайн", "Курсы Photoshop", ""))
            .unwrap();

        let by_id = service.find_by_id(&created.id).unwrap().unwrap();
        assert_eq!(by_id.alias, "photoshop");
        let by_alias = service.find_by_alias("photoshop").unwrap().unwrap();
        assert_eq!(by_alias.id, created.id);

        assert!(service.find_by_alias("figma").unwrap().is_none());
        assert!(service.find_by_id(&DocumentId::new()).unwrap().is_none());
    }

    #[test]
    fn duplicate_alias_is_a_conflict() {
        let service = service();
        service.create(dto("go", 0, "Dev", "Go", "")).unwrap();
        let err = service.create(dto("go", 0, "Dev", "Go again", "")).unwrap_err();
        assert!(matches!(err, ServiceError::Conflict(TOP_PAGE_ALIAS_TAKEN_ERROR)));
    }

    #[test]
    fn update_and_delete_report_missing_pages() {
        let service = service();
        let created = service.create(dto("a", 1, "S", "Old", "")).unwrap();

        let patch = TopPagePatch {
            title: Some("New".into()),
            ..Default::default()
        };
        let updated = service.update_by_id(&created.id, patch.clone()).unwrap().unwrap();
        assert_eq!(updated.title, "New");
        assert!(service.update_by_id(&DocumentId::new(), patch).unwrap().is_none());

        assert!(service.delete_by_id(&created.id).unwrap().is_some());
        assert!(service.delete_by_id(&created.id).unwrap().is_none());
    }

    #[test]
    fn find_by_category_groups_by_second_category() {
        let service = service();
        service.create(dto("ts", 0, "Разработка", "TypeScript", "")).unwrap();
        service.create(dto("ps", 0, "Дизайн", "Photoshop", "")).unwrap();
        service.create(dto("go", 0, "Разработка", "Go", "")).unwrap();
        service.create(dto("book", 2, "Разработка", "Книга", "")).unwrap();

        let groups = service.find_by_category(TopLevelCategory::Courses).unwrap();
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].id.second_category, "Разработка");
        assert_eq!(
            groups[0].pages,
            vec![
                TopPageLink { alias: "ts".into(), title: "TypeScript".into() },
                TopPageLink { alias: "go".into(), title: "Go".into() },
            ]
        );
        assert_eq!(groups[1].pages.len(), 1);

        let json = serde_json::to_value(&groups[1]).unwrap();
        assert_eq!(
            json,
            json!({ "_id": { "secondCategory": "Дизайн" }, "pages": [{ "alias": "ps", "title": "Photoshop" }] })
        );

        assert!(service.find_by_category(TopLevelCategory::Services).unwrap().is_empty());
    }

    #[test]
    fn find_by_text_searches_title_and_seo_text() {
        let service = service();
        service.create(dto("ts", 0, "Dev", "Курсы TypeScript", "")).unwrap();
        service
            .create(dto("js", 0, "Dev", "JavaScript", "Основы перед typescript"))
            .unwrap();
        service.create(dto("ps", 0, "Design", "Photoshop", "")).unwrap();

        let hits = service.find_by_text("TypeScript").unwrap();
        let aliases: Vec<&str> = hits.iter().map(|page| page.alias.as_str()).collect();
        assert_eq!(aliases, vec!["ts", "js"]);
    }
}
