use mongodb::bson::oid::ObjectId;
use std::sync::Arc;
use tracing::instrument;
use validator::Validate;

use crate::error::{ProductError, ProductResult};
use crate::models::{
    CreateProduct, CreateReview, NavbarProduct, Product, RelatedProduct, UpdateProduct,
    name_from_code, parse_id,
};
use crate::repository::ProductRepository;

fn object_id(raw: &str) -> ProductResult<ObjectId> {
    parse_id(raw).ok_or_else(|| ProductError::InvalidId(raw.to_string()))
}

/// Service layer for product catalog logic
#[derive(Clone)]
pub struct ProductService<R: ProductRepository> {
    repository: Arc<R>,
}

impl<R: ProductRepository> ProductService<R> {
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }

    #[instrument(skip(self))]
    pub async fn list_products(&self) -> ProductResult<Vec<Product>> {
        self.repository.list().await
    }

    #[instrument(skip(self, input))]
    pub async fn create_product(&self, input: CreateProduct) -> ProductResult<Product> {
        input.validate()?;
        self.repository.create(input).await
    }

    /// Look a product up by its derived code.
    ///
    /// The code is turned back into a name by mapping hyphens to spaces, so
    /// names that contain literal hyphens cannot be found this way.
    #[instrument(skip(self))]
    pub async fn get_by_code(&self, code: &str) -> ProductResult<Product> {
        self.repository
            .find_by_name(&name_from_code(code))
            .await?
            .ok_or(ProductError::NotFound)
    }

    #[instrument(skip(self, input))]
    pub async fn update_by_code(&self, code: &str, input: UpdateProduct) -> ProductResult<Product> {
        self.repository
            .update_by_name(&name_from_code(code), input)
            .await?
            .ok_or(ProductError::NotFound)
    }

    #[instrument(skip(self, input))]
    pub async fn update_by_id(&self, id: &str, input: UpdateProduct) -> ProductResult<Product> {
        let id = object_id(id)?;
        self.repository
            .update_by_id(id, input)
            .await?
            .ok_or(ProductError::NotFound)
    }

    /// Delete a product, returning what was deleted
    #[instrument(skip(self))]
    pub async fn delete_product(&self, id: &str) -> ProductResult<Product> {
        let id = object_id(id)?;
        self.repository
            .delete(id)
            .await?
            .ok_or(ProductError::NotFound)
    }

    /// Append a review. The rating is checked before anything touches the store.
    #[instrument(skip(self, review))]
    pub async fn add_review(&self, id: &str, review: CreateReview) -> ProductResult<Product> {
        review.validate()?;
        let id = object_id(id)?;
        self.repository
            .push_review(id, review)
            .await?
            .ok_or(ProductError::NotFound)
    }

    #[instrument(skip(self))]
    pub async fn delete_review(&self, id: &str, review_id: &str) -> ProductResult<Product> {
        let id = object_id(id)?;

        // A review id that cannot be an ObjectId matches no review
        let Some(review_id) = parse_id(review_id) else {
            return match self.repository.get_by_id(id).await? {
                Some(_) => Err(ProductError::ReviewNotFound),
                None => Err(ProductError::NotFound),
            };
        };

        self.repository.pull_review(id, review_id).await
    }

    #[instrument(skip(self))]
    pub async fn list_related(&self) -> ProductResult<Vec<RelatedProduct>> {
        self.repository.list_related().await
    }

    #[instrument(skip(self))]
    pub async fn list_navbar(&self) -> ProductResult<Vec<NavbarProduct>> {
        self.repository.list_navbar().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::REVIEW_RATING_MESSAGE;
    use crate::repository::MockProductRepository;
    use mockall::predicate::eq;

    fn robusta() -> Product {
        Product::new(CreateProduct {
            product_name: "Fine Robusta".to_string(),
            ..Default::default()
        })
    }

    #[tokio::test]
    async fn test_create_rejects_empty_name_without_store_call() {
        let mut mock_repo = MockProductRepository::new();
        mock_repo.expect_create().never();

        let service = ProductService::new(mock_repo);
        let result = service.create_product(CreateProduct::default()).await;

        assert!(matches!(result, Err(ProductError::Validation(_))));
    }

    #[tokio::test]
    async fn test_get_by_code_translates_hyphens() {
        let mut mock_repo = MockProductRepository::new();
        let product = robusta();
        let expected = product.clone();

        mock_repo
            .expect_find_by_name()
            .with(eq("fine robusta"))
            .times(1)
            .returning(move |_| Ok(Some(product.clone())));

        let service = ProductService::new(mock_repo);
        let found = service.get_by_code("Fine-Robusta").await.unwrap();

        assert_eq!(found, expected);
    }

    #[tokio::test]
    async fn test_get_by_code_miss_is_not_found() {
        let mut mock_repo = MockProductRepository::new();
        mock_repo.expect_find_by_name().returning(|_| Ok(None));

        let service = ProductService::new(mock_repo);
        let result = service.get_by_code("nothing-here").await;

        assert!(matches!(result, Err(ProductError::NotFound)));
    }

    #[tokio::test]
    async fn test_update_by_code_passes_translated_name() {
        let mut mock_repo = MockProductRepository::new();
        let mut product = robusta();
        product.product_short_description = Some("x".to_string());

        mock_repo
            .expect_update_by_name()
            .withf(|name, input| {
                name.eq_ignore_ascii_case("fine robusta")
                    && input.product_short_description.as_deref() == Some("x")
            })
            .times(1)
            .returning(move |_, _| Ok(Some(product.clone())));

        let service = ProductService::new(mock_repo);
        let update = UpdateProduct {
            product_short_description: Some("x".to_string()),
            ..Default::default()
        };
        let updated = service.update_by_code("fine-robusta", update).await.unwrap();

        assert_eq!(updated.product_short_description.as_deref(), Some("x"));
    }

    #[tokio::test]
    async fn test_invalid_id_never_reaches_store() {
        let mut mock_repo = MockProductRepository::new();
        mock_repo.expect_update_by_id().never();
        mock_repo.expect_delete().never();

        let service = ProductService::new(mock_repo);

        let update = service
            .update_by_id("not-an-id", UpdateProduct::default())
            .await;
        assert!(matches!(update, Err(ProductError::InvalidId(_))));

        let delete = service.delete_product("not-an-id").await;
        assert!(matches!(delete, Err(ProductError::InvalidId(_))));
    }

    #[tokio::test]
    async fn test_delete_missing_product_is_not_found() {
        let mut mock_repo = MockProductRepository::new();
        let id = ObjectId::new();

        mock_repo
            .expect_delete()
            .with(eq(id))
            .times(1)
            .returning(|_| Ok(None));

        let service = ProductService::new(mock_repo);
        let result = service.delete_product(&id.to_hex()).await;

        assert!(matches!(result, Err(ProductError::NotFound)));
    }

    #[tokio::test]
    async fn test_add_review_rejects_rating_before_store() {
        let mut mock_repo = MockProductRepository::new();
        mock_repo.expect_push_review().never();
        mock_repo.expect_get_by_id().never();

        let service = ProductService::new(mock_repo);
        let review = CreateReview {
            review_rating: Some(6),
            ..Default::default()
        };

        // Rating is checked even before the id is parsed
        let err = service.add_review("not-an-id", review).await.unwrap_err();
        assert!(matches!(err, ProductError::Validation(_)));
        assert_eq!(err.to_string(), REVIEW_RATING_MESSAGE);
    }

    #[tokio::test]
    async fn test_add_review_to_missing_product() {
        let mut mock_repo = MockProductRepository::new();
        mock_repo.expect_push_review().returning(|_, _| Ok(None));

        let service = ProductService::new(mock_repo);
        let review = CreateReview {
            review_rating: Some(3),
            ..Default::default()
        };
        let result = service.add_review(&ObjectId::new().to_hex(), review).await;

        assert!(matches!(result, Err(ProductError::NotFound)));
    }

    #[tokio::test]
    async fn test_delete_review_with_malformed_review_id() {
        let mut mock_repo = MockProductRepository::new();
        let product = robusta();
        let id = product.id;

        mock_repo.expect_pull_review().never();
        mock_repo
            .expect_get_by_id()
            .with(eq(id))
            .returning(move |_| Ok(Some(product.clone())));

        let service = ProductService::new(mock_repo);
        let result = service.delete_review(&id.to_hex(), "bogus").await;

        assert!(matches!(result, Err(ProductError::ReviewNotFound)));
    }

    #[tokio::test]
    async fn test_delete_review_on_missing_product() {
        let mut mock_repo = MockProductRepository::new();
        mock_repo.expect_get_by_id().returning(|_| Ok(None));

        let service = ProductService::new(mock_repo);
        let result = service
            .delete_review(&ObjectId::new().to_hex(), "bogus")
            .await;

        assert!(matches!(result, Err(ProductError::NotFound)));
    }

    #[tokio::test]
    async fn test_delete_review_delegates_to_pull() {
        let mut mock_repo = MockProductRepository::new();
        let product = robusta();
        let id = product.id;
        let review_id = ObjectId::new();

        mock_repo
            .expect_pull_review()
            .with(eq(id), eq(review_id))
            .times(1)
            .returning(move |_, _| Ok(product.clone()));

        let service = ProductService::new(mock_repo);
        let updated = service
            .delete_review(&id.to_hex(), &review_id.to_hex())
            .await
            .unwrap();

        assert_eq!(updated.id, id);
    }

    #[tokio::test]
    async fn test_store_errors_propagate() {
        let mut mock_repo = MockProductRepository::new();
        mock_repo
            .expect_list()
            .returning(|| Err(ProductError::Database("connection reset".to_string())));

        let service = ProductService::new(mock_repo);
        let result = service.list_products().await;

        assert!(matches!(result, Err(ProductError::Database(_))));
    }
}
