//! Storefront domain crate.
//!
//! Products, reviews, SEO top pages, user accounts and uploaded files, each
//! served by a small service over a shared [`store::DocumentStore`]. The HTTP
//! surface lives in the `storefront-server` crate; everything here is usable
//! without it.
//!
//! ```no_run
//! use std::sync::Arc;
//! use storefront::{DocumentStore, ProductService};
//!
//! let store = Arc::new(DocumentStore::in_memory());
//! let products = ProductService::new(store);
//! ```

pub mod auth;
pub mod error;
pub mod files;
pub mod product;
pub mod review;
pub mod top_page;
pub mod validation;

pub use store;
pub use store::{BackendConfig, DocumentId, DocumentStore, Stored};

pub use auth::{AuthDto, AuthService, Claims, JwtKeys, LoginResponse, RegisteredUser};
pub use error::{ServiceError, ServiceResult};
pub use files::{FileElementResponse, FilesService, UploadedFile};
pub use product::{CreateProductDto, FindProductDto, Product, ProductPatch, ProductService};
pub use review::{CreateReviewDto, Review, ReviewService};
pub use top_page::{
    CreateTopPageDto, FindTopPageDto, TopLevelCategory, TopPage, TopPagePatch, TopPageService,
};
pub use validation::{ID_VALIDATION_ERROR, error_messages};
