use async_trait::async_trait;
use mongodb::bson::oid::ObjectId;

use crate::error::ProductResult;
use crate::models::{
    CreateProduct, CreateReview, NavbarProduct, Product, RelatedProduct, UpdateProduct,
};

/// Repository trait for Product persistence
///
/// Every method is a single store operation. Lookups and updates that can
/// miss return `Ok(None)`; the service decides what a miss means.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProductRepository: Send + Sync {
    /// All products, in store order
    async fn list(&self) -> ProductResult<Vec<Product>>;

    /// All products projected to name, image and id
    async fn list_related(&self) -> ProductResult<Vec<RelatedProduct>>;

    /// All products projected to name, icon, short description and id
    async fn list_navbar(&self) -> ProductResult<Vec<NavbarProduct>>;

    /// Insert a new product
    async fn create(&self, input: CreateProduct) -> ProductResult<Product>;

    async fn get_by_id(&self, id: ObjectId) -> ProductResult<Option<Product>>;

    /// First product whose name equals `name`, ignoring case
    async fn find_by_name(&self, name: &str) -> ProductResult<Option<Product>>;

    /// Apply an allow-listed update, returning the post-update document
    async fn update_by_id(
        &self,
        id: ObjectId,
        input: UpdateProduct,
    ) -> ProductResult<Option<Product>>;

    /// Update the first product whose name equals `name`, ignoring case
    async fn update_by_name(
        &self,
        name: &str,
        input: UpdateProduct,
    ) -> ProductResult<Option<Product>>;

    /// Delete a product, returning the deleted document
    async fn delete(&self, id: ObjectId) -> ProductResult<Option<Product>>;

    /// Append a review atomically, returning the updated product
    async fn push_review(
        &self,
        id: ObjectId,
        review: CreateReview,
    ) -> ProductResult<Option<Product>>;

    /// Remove a review atomically.
    ///
    /// Fails with `NotFound` when the product is missing and with
    /// `ReviewNotFound` when the product has no such review; the document is
    /// left untouched in both cases.
    async fn pull_review(&self, id: ObjectId, review_id: ObjectId) -> ProductResult<Product>;
}
