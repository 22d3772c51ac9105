//! MongoDB implementation of ProductRepository

use async_trait::async_trait;
use futures_util::TryStreamExt;
use mongodb::{
    Collection, Database, IndexModel,
    bson::{Document, doc, oid::ObjectId},
    options::{IndexOptions, ReturnDocument},
};
use tracing::instrument;

use crate::error::{ProductError, ProductResult};
use crate::models::{
    CreateProduct, CreateReview, NavbarProduct, Product, RelatedProduct, Review, UpdateProduct,
    name_pattern,
};
use crate::repository::ProductRepository;

/// Default collection name
pub const COLLECTION: &str = "products";

/// MongoDB implementation of the ProductRepository
#[derive(Clone)]
pub struct MongoProductRepository {
    collection: Collection<Product>,
}

impl MongoProductRepository {
    pub fn new(db: &Database) -> Self {
        Self::with_collection(db, COLLECTION)
    }

    pub fn with_collection(db: &Database, collection_name: &str) -> Self {
        let collection = db.collection::<Product>(collection_name);
        Self { collection }
    }

    /// Index backing the by-code lookups
    pub async fn init_indexes(&self) -> ProductResult<()> {
        let index = IndexModel::builder()
            .keys(doc! { "productName": 1 })
            .options(
                IndexOptions::builder()
                    .name("idx_product_name".to_string())
                    .build(),
            )
            .build();

        self.collection.create_index(index).await?;
        tracing::info!("Product indexes created successfully");
        Ok(())
    }

    fn id_filter(id: ObjectId) -> Document {
        doc! { "_id": id }
    }

    /// Case-insensitive exact match on `productName`
    fn name_filter(name: &str) -> Document {
        doc! {
            "productName": {
                "$regex": name_pattern(name),
                "$options": "i",
            }
        }
    }

    fn push_review_update(review: &Review) -> ProductResult<Document> {
        let review = mongodb::bson::to_document(review)
            .map_err(|e| ProductError::Database(e.to_string()))?;
        Ok(doc! {
            "$push": { "productReviews": review },
            "$inc": { "__v": 1 },
        })
    }

    fn pull_review_update(review_id: ObjectId) -> Document {
        doc! {
            "$pull": { "productReviews": { "_id": review_id } },
            "$inc": { "__v": 1 },
        }
    }

    async fn update_one_by(
        &self,
        filter: Document,
        input: UpdateProduct,
    ) -> ProductResult<Option<Product>> {
        let set = input.to_set_document();
        if set.is_empty() {
            return Ok(self.collection.find_one(filter).await?);
        }

        let product = self
            .collection
            .find_one_and_update(filter, doc! { "$set": set })
            .return_document(ReturnDocument::After)
            .await?;
        Ok(product)
    }
}

#[async_trait]
impl ProductRepository for MongoProductRepository {
    #[instrument(skip(self))]
    async fn list(&self) -> ProductResult<Vec<Product>> {
        let cursor = self.collection.find(doc! {}).await?;
        let products: Vec<Product> = cursor.try_collect().await?;
        Ok(products)
    }

    #[instrument(skip(self))]
    async fn list_related(&self) -> ProductResult<Vec<RelatedProduct>> {
        let cursor = self
            .collection
            .clone_with_type::<RelatedProduct>()
            .find(doc! {})
            .projection(RelatedProduct::projection())
            .await?;
        let products: Vec<RelatedProduct> = cursor.try_collect().await?;
        Ok(products)
    }

    #[instrument(skip(self))]
    async fn list_navbar(&self) -> ProductResult<Vec<NavbarProduct>> {
        let cursor = self
            .collection
            .clone_with_type::<NavbarProduct>()
            .find(doc! {})
            .projection(NavbarProduct::projection())
            .await?;
        let products: Vec<NavbarProduct> = cursor.try_collect().await?;
        Ok(products)
    }

    #[instrument(skip(self, input), fields(product_name = %input.product_name))]
    async fn create(&self, input: CreateProduct) -> ProductResult<Product> {
        let product = Product::new(input);

        self.collection.insert_one(&product).await?;

        tracing::info!(product_id = %product.id, "Product created successfully");
        Ok(product)
    }

    #[instrument(skip(self))]
    async fn get_by_id(&self, id: ObjectId) -> ProductResult<Option<Product>> {
        let product = self.collection.find_one(Self::id_filter(id)).await?;
        Ok(product)
    }

    #[instrument(skip(self))]
    async fn find_by_name(&self, name: &str) -> ProductResult<Option<Product>> {
        let product = self.collection.find_one(Self::name_filter(name)).await?;
        Ok(product)
    }

    #[instrument(skip(self, input))]
    async fn update_by_id(
        &self,
        id: ObjectId,
        input: UpdateProduct,
    ) -> ProductResult<Option<Product>> {
        let product = self.update_one_by(Self::id_filter(id), input).await?;
        if product.is_some() {
            tracing::info!(product_id = %id, "Product updated successfully");
        }
        Ok(product)
    }

    #[instrument(skip(self, input))]
    async fn update_by_name(
        &self,
        name: &str,
        input: UpdateProduct,
    ) -> ProductResult<Option<Product>> {
        let product = self.update_one_by(Self::name_filter(name), input).await?;
        if let Some(ref product) = product {
            tracing::info!(product_id = %product.id, "Product updated successfully");
        }
        Ok(product)
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: ObjectId) -> ProductResult<Option<Product>> {
        let product = self
            .collection
            .find_one_and_delete(Self::id_filter(id))
            .await?;
        if product.is_some() {
            tracing::info!(product_id = %id, "Product deleted successfully");
        }
        Ok(product)
    }

    #[instrument(skip(self, review))]
    async fn push_review(
        &self,
        id: ObjectId,
        review: CreateReview,
    ) -> ProductResult<Option<Product>> {
        let review = Review::new(review);
        let product = self
            .collection
            .find_one_and_update(Self::id_filter(id), Self::push_review_update(&review)?)
            .return_document(ReturnDocument::After)
            .await?;

        if product.is_some() {
            tracing::info!(product_id = %id, review_id = %review.id, "Review added");
        }
        Ok(product)
    }

    #[instrument(skip(self))]
    async fn pull_review(&self, id: ObjectId, review_id: ObjectId) -> ProductResult<Product> {
        let filter = doc! { "_id": id, "productReviews._id": review_id };
        let product = self
            .collection
            .find_one_and_update(filter, Self::pull_review_update(review_id))
            .return_document(ReturnDocument::After)
            .await?;

        match product {
            Some(product) => {
                tracing::info!(product_id = %id, review_id = %review_id, "Review deleted");
                Ok(product)
            }
            None => {
                let exists = self.collection.count_documents(Self::id_filter(id)).await? > 0;
                if exists {
                    Err(ProductError::ReviewNotFound)
                } else {
                    Err(ProductError::NotFound)
                }
            }
        }
    }
}
