use std::sync::Arc;

use store::{DocumentId, DocumentStore, Stored};

use super::{CreateReviewDto, Review};
use crate::error::ServiceResult;

#[derive(Clone)]
pub struct ReviewService {
    store: Arc<DocumentStore>,
}

impl ReviewService {
    pub fn new(store: Arc<DocumentStore>) -> Self {
        Self { store }
    }

    pub fn create(&self, dto: CreateReviewDto) -> ServiceResult<Stored<Review>> {
        Ok(self.store.collection::<Review>().insert(dto.into())?)
    }

    pub fn delete_by_id(&self, id: &DocumentId) -> ServiceResult<Option<Stored<Review>>> {
        Ok(self.store.collection::<Review>().delete_by_id(id)?)
    }

    /// Reviews of one product in creation order; empty for unknown products.
    pub fn find_by_product_id(&self, product_id: &DocumentId) -> ServiceResult<Vec<Stored<Review>>> {
        let wanted = product_id.to_string();
        Ok(self
            .store
            .collection::<Review>()
            .find(|review| review.product_id == wanted)?)
    }

    /// Remove every review of a product, returning how many were removed.
    ///
    /// Library API: product deletion over HTTP leaves reviews in place.
    pub fn delete_by_product_id(&self, product_id: &DocumentId) -> ServiceResult<usize> {
        let wanted = product_id.to_string();
        let removed = self
            .store
            .collection::<Review>()
            .delete_many(|review| review.product_id == wanted)?;
        tracing::debug!(%product_id, removed, "reviews removed for product");
        Ok(removed)
    }
}
