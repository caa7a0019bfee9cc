use std::sync::Arc;

use serde::Serialize;
use store::{DocumentId, DocumentStore, Stored};

use super::{CreateProductDto, FindProductDto, Product, ProductPatch};
use crate::error::ServiceResult;
use crate::review::Review;

/// A product joined with its reviews, newest review first.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductWithReviews {
    #[serde(flatten)]
    pub product: Stored<Product>,
    pub reviews: Vec<Stored<Review>>,
    pub review_count: usize,
    /// Mean rating, `null` when there are no reviews.
    pub review_avg: Option<f64>,
}

#[derive(Clone)]
pub struct ProductService {
    store: Arc<DocumentStore>,
}

impl ProductService {
    pub fn new(store: Arc<DocumentStore>) -> Self {
        Self { store }
    }

    pub fn create(&self, dto: CreateProductDto) -> ServiceResult<Stored<Product>> {
        Ok(self.store.collection::<Product>().insert(dto.into())?)
    }

    pub fn find_by_id(&self, id: &DocumentId) -> ServiceResult<Option<Stored<Product>>> {
        Ok(self.store.collection::<Product>().find_by_id(id)?)
    }

    pub fn delete_by_id(&self, id: &DocumentId) -> ServiceResult<Option<Stored<Product>>> {
        Ok(self.store.collection::<Product>().delete_by_id(id)?)
    }

    pub fn update_by_id(
        &self,
        id: &DocumentId,
        patch: ProductPatch,
    ) -> ServiceResult<Option<Stored<Product>>> {
        Ok(self
            .store
            .collection::<Product>()
            .update_by_id(id, |product| patch.apply(product))?)
    }

    /// The first `limit` products of a category, each with its reviews.
    pub fn find_with_reviews(&self, dto: &FindProductDto) -> ServiceResult<Vec<ProductWithReviews>> {
        let mut products = self
            .store
            .collection::<Product>()
            .find(|product| product.categories.iter().any(|c| *c == dto.category))?;
        products.truncate(dto.limit);

        if products.is_empty() {
            return Ok(Vec::new());
        }

        let product_ids: Vec<String> = products.iter().map(|p| p.id.to_string()).collect();
        let reviews = self
            .store
            .collection::<Review>()
            .find(|review| product_ids.contains(&review.product_id))?;

        Ok(products
            .into_iter()
            .map(|product| {
                let id = product.id.to_string();
                let mut own: Vec<Stored<Review>> = reviews
                    .iter()
                    .filter(|review| review.product_id == id)
                    .cloned()
                    .collect();
                own.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));

                let review_count = own.len();
                let review_avg = (review_count > 0).then(|| {
                    own.iter().map(|r| f64::from(r.rating)).sum::<f64>() / review_count as f64
                });

                ProductWithReviews {
                    product,
                    reviews: own,
                    review_count,
                    review_avg,
                }
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::review::{CreateReviewDto, ReviewService};
    use serde_json::json;

    fn product_dto(title: &str, categories: &[&str]) -> CreateProductDto {
        serde_json::from_value(json!({
            "image": "1.png",
            "title": title,
            "price": 100,
            "credit": 10,
            "description": "d",
            "advantages": "a",
            "disAdvantages": "d",
            "categories": categories,
        }))
        .unwrap()
    }

    fn review_dto(product_id: &DocumentId, rating: u8) -> CreateReviewDto {
        serde_json::from_value(json!({
            "name": "Тест",
            "title": "Заголовок",
            "description": "Описание",
            "rating": rating,
            "productId": product_id.to_string(),
        }))
        .unwrap()
    }

    #[test]
    fn update_changes_only_patched_field() {
        let store = Arc::new(DocumentStore::in_memory());
        let service = ProductService::new(store);
        let created = service.create(product_dto("Old", &["Product"])).unwrap();

        let patch = ProductPatch {
            title: Some("Новое название продукта".into()),
            ..Default::default()
        };
        let updated = service.update_by_id(&created.id, patch).unwrap().unwrap();
        assert_eq!(updated.title, "Новое название продукта");
        assert_eq!(updated.price, created.price);
        assert_eq!(updated.categories, created.categories);
    }

    #[test]
    fn find_with_reviews_filters_limits_and_aggregates() {
        let store = Arc::new(DocumentStore::in_memory());
        let products = ProductService::new(store.clone());
        let reviews = ReviewService::new(store);

        let first = products.create(product_dto("A", &["Product"])).unwrap();
        let second = products.create(product_dto("B", &["Product", "Other"])).unwrap();
        products.create(product_dto("C", &["Product"])).unwrap();
        products.create(product_dto("D", &["Other"])).unwrap();

        reviews.create(review_dto(&first.id, 4)).unwrap();
        let newest = reviews.create(review_dto(&first.id, 5)).unwrap();

        let found = products
            .find_with_reviews(&FindProductDto {
                category: "Product".into(),
                limit: 2,
            })
            .unwrap();

        assert_eq!(found.len(), 2);
        assert_eq!(found[0].product.id, first.id);
        assert_eq!(found[0].review_count, 2);
        assert_eq!(found[0].review_avg, Some(4.5));
        assert_eq!(found[0].reviews[0].id, newest.id);
        assert_eq!(found[1].product.id, second.id);
        assert_eq!(found[1].review_count, 0);
        assert_eq!(found[1].review_avg, None);

        let json = serde_json::to_value(&found[1]).unwrap();
        assert_eq!(json["title"], "B");
        assert_eq!(json["reviewCount"], 0);
        assert!(json["reviewAvg"].is_null());
    }

    #[test]
    fn missing_products_are_none() {
        let service = ProductService::new(Arc::new(DocumentStore::in_memory()));
        let id = DocumentId::new();
        assert!(service.find_by_id(&id).unwrap().is_none());
        assert!(service.delete_by_id(&id).unwrap().is_none());
        assert!(service.update_by_id(&id, ProductPatch::default()).unwrap().is_none());
    }
}
