//! HTTP handlers for the catalog API

use axum::{
    Json, Router,
    extract::{Path, State, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{delete, get, post, put},
};
use axum_helpers::{
    ApiError, Envelope, LenientJson,
    errors::responses::{BadRequestResponse, InternalServerErrorResponse, NotFoundResponse},
    format, respond,
};
use serde_json::json;
use std::sync::Arc;
use utoipa::OpenApi;

use crate::error::ProductError;
use crate::models::{
    CreateProduct, CreateReview, NavbarProductView, PricingInput, PricingView, ProductView,
    RelatedProductView, ReviewView, UpdateProduct, serialize,
};
use crate::repository::ProductRepository;
use crate::service::ProductService;

/// OpenAPI documentation for the catalog API
#[derive(OpenApi)]
#[openapi(
    paths(
        list_products,
        create_product,
        get_by_code,
        update_by_code,
        update_by_id,
        delete_product,
        add_review,
        delete_review,
        list_related,
        list_navbar,
    ),
    components(
        schemas(
            ProductView, ReviewView, PricingView, RelatedProductView, NavbarProductView,
            CreateProduct, CreateReview, UpdateProduct, PricingInput
        ),
        responses(NotFoundResponse, BadRequestResponse, InternalServerErrorResponse)
    ),
    tags(
        (name = "Products", description = "Product catalog endpoints")
    )
)]
pub struct ApiDoc;

type SharedService<R> = State<Arc<ProductService<R>>>;

/// Create the catalog router. Mounted under `/api` by the app.
pub fn router<R: ProductRepository + 'static>(service: ProductService<R>) -> Router {
    let shared_service = Arc::new(service);

    // The static `code` segment wins over `{id}`, so `/products/code/reviews`
    // only answers PUT and never reaches the review handlers.
    Router::new()
        .route("/products", get(list_products).post(create_product))
        .route("/products/code/{code}", put(update_by_code))
        .route(
            "/products/{id}",
            get(get_by_code).put(update_by_id).delete(delete_product),
        )
        .route("/products/{id}/reviews", post(add_review))
        .route("/products/{id}/reviews/{review_id}", delete(delete_review))
        .route("/related-products", get(list_related))
        .route("/navbar-products", get(list_navbar))
        .with_state(shared_service)
}

/// Map a domain failure to the envelope for one route.
///
/// Missing products and reviews are always 404 with a `null` body. Everything
/// else gets the route's own store-error status and message.
fn failure(err: ProductError, status: StatusCode, message: &str) -> ApiError {
    if err.is_not_found() {
        return ApiError::not_found(err.to_string());
    }
    tracing::debug!(error = %err, "Request failed");
    ApiError::new(status, message)
}

/// List all products
#[utoipa::path(
    get,
    path = "/products",
    tag = "Products",
    responses(
        (status = 200, description = "All products", body = Envelope<Vec<ProductView>>),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn list_products<R: ProductRepository>(
    State(service): SharedService<R>,
) -> Result<Response, ApiError> {
    let products = service.list_products().await.map_err(|e| {
        failure(e, StatusCode::INTERNAL_SERVER_ERROR, "Error fetching products")
    })?;

    let body: Vec<ProductView> = products.into_iter().map(serialize).collect();
    Ok(respond(StatusCode::OK, "Products fetched successfully", body))
}

/// Create a product
///
/// Answers `201 Created` with envelope code 200.
#[utoipa::path(
    post,
    path = "/products",
    tag = "Products",
    request_body = CreateProduct,
    responses(
        (status = 201, description = "Product created", body = Envelope<ProductView>),
        (status = 400, response = BadRequestResponse)
    )
)]
async fn create_product<R: ProductRepository>(
    State(service): SharedService<R>,
    payload: Result<LenientJson<CreateProduct>, JsonRejection>,
) -> Result<Response, ApiError> {
    const FAILED: &str = "Failed to add product";

    let LenientJson(input) = payload.map_err(|rejection| {
        tracing::debug!(error = %rejection.body_text(), "Rejected product body");
        ApiError::bad_request(FAILED)
    })?;

    let product = service
        .create_product(input)
        .await
        .map_err(|e| failure(e, StatusCode::BAD_REQUEST, FAILED))?;

    Ok((
        StatusCode::CREATED,
        Json(format(200, "Product added successfully", serialize(product))),
    )
        .into_response())
}

/// Get a product by its code
///
/// The code is matched case-insensitively against product names with
/// hyphens read as spaces.
#[utoipa::path(
    get,
    path = "/products/{productCode}",
    tag = "Products",
    params(("productCode" = String, Path, description = "Product code, e.g. `fine-robusta`")),
    responses(
        (status = 200, description = "Product found", body = Envelope<ProductView>),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn get_by_code<R: ProductRepository>(
    State(service): SharedService<R>,
    Path(code): Path<String>,
) -> Result<Response, ApiError> {
    let product = service
        .get_by_code(&code)
        .await
        .map_err(|e| failure(e, StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error"))?;

    Ok(respond(
        StatusCode::OK,
        "Product fetched successfully",
        serialize(product),
    ))
}

/// Update the first product matching a code
#[utoipa::path(
    put,
    path = "/products/code/{productCode}",
    tag = "Products",
    params(("productCode" = String, Path, description = "Product code")),
    request_body = UpdateProduct,
    responses(
        (status = 200, description = "Product updated", body = Envelope<ProductView>),
        (status = 400, response = BadRequestResponse),
        (status = 404, response = NotFoundResponse)
    )
)]
async fn update_by_code<R: ProductRepository>(
    State(service): SharedService<R>,
    Path(code): Path<String>,
    payload: Result<LenientJson<UpdateProduct>, JsonRejection>,
) -> Result<Response, ApiError> {
    let input = update_payload(payload)?;
    let product = service
        .update_by_code(&code, input)
        .await
        .map_err(|e| failure(e, StatusCode::BAD_REQUEST, UPDATE_FAILED))?;

    Ok(respond(
        StatusCode::OK,
        "Product updated successfully",
        serialize(product),
    ))
}

/// Update a product by id
#[utoipa::path(
    put,
    path = "/products/{id}",
    tag = "Products",
    params(("id" = String, Path, description = "Product id")),
    request_body = UpdateProduct,
    responses(
        (status = 200, description = "Product updated", body = Envelope<ProductView>),
        (status = 400, response = BadRequestResponse),
        (status = 404, response = NotFoundResponse)
    )
)]
async fn update_by_id<R: ProductRepository>(
    State(service): SharedService<R>,
    Path(id): Path<String>,
    payload: Result<LenientJson<UpdateProduct>, JsonRejection>,
) -> Result<Response, ApiError> {
    let input = update_payload(payload)?;
    let product = service
        .update_by_id(&id, input)
        .await
        .map_err(|e| failure(e, StatusCode::BAD_REQUEST, UPDATE_FAILED))?;

    Ok(respond(
        StatusCode::OK,
        "Product updated successfully",
        serialize(product),
    ))
}

const UPDATE_FAILED: &str = "Failed to update product";

fn update_payload(
    payload: Result<LenientJson<UpdateProduct>, JsonRejection>,
) -> Result<UpdateProduct, ApiError> {
    payload.map(|LenientJson(input)| input).map_err(|rejection| {
        tracing::debug!(error = %rejection.body_text(), "Rejected update body");
        ApiError::bad_request(UPDATE_FAILED)
    })
}

/// Delete a product by id, returning the deleted product
#[utoipa::path(
    delete,
    path = "/products/{id}",
    tag = "Products",
    params(("id" = String, Path, description = "Product id")),
    responses(
        (status = 200, description = "Product deleted", body = Envelope<ProductView>),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn delete_product<R: ProductRepository>(
    State(service): SharedService<R>,
    Path(id): Path<String>,
) -> Result<Response, ApiError> {
    let product = service
        .delete_product(&id)
        .await
        .map_err(|e| failure(e, StatusCode::INTERNAL_SERVER_ERROR, "Failed to delete product"))?;

    Ok(respond(
        StatusCode::OK,
        "Product deleted successfully",
        serialize(product),
    ))
}

/// Append a review to a product
///
/// Ratings outside 1..=5 are rejected before the product is touched.
#[utoipa::path(
    post,
    path = "/products/{id}/reviews",
    tag = "Products",
    params(("id" = String, Path, description = "Product id")),
    request_body = CreateReview,
    responses(
        (status = 201, description = "Review added", body = Envelope<ProductView>),
        (status = 400, response = BadRequestResponse),
        (status = 404, response = NotFoundResponse)
    )
)]
async fn add_review<R: ProductRepository>(
    State(service): SharedService<R>,
    Path(id): Path<String>,
    payload: Result<LenientJson<CreateReview>, JsonRejection>,
) -> Result<Response, ApiError> {
    let LenientJson(review) = payload.map_err(|rejection| ApiError::bad_request(rejection.body_text()))?;

    let product = service.add_review(&id, review).await.map_err(|e| {
        if e.is_not_found() {
            ApiError::not_found(e.to_string())
        } else {
            ApiError::bad_request(e.to_string())
        }
    })?;

    Ok(respond(
        StatusCode::CREATED,
        "Review added successfully",
        serialize(product),
    ))
}

/// Remove a review from a product
///
/// Store failures carry the error text in `body.fullError`.
#[utoipa::path(
    delete,
    path = "/products/{id}/reviews/{reviewId}",
    tag = "Products",
    params(
        ("id" = String, Path, description = "Product id"),
        ("reviewId" = String, Path, description = "Review id")
    ),
    responses(
        (status = 200, description = "Review deleted", body = Envelope<ProductView>),
        (status = 400, response = BadRequestResponse),
        (status = 404, response = NotFoundResponse)
    )
)]
async fn delete_review<R: ProductRepository>(
    State(service): SharedService<R>,
    Path((id, review_id)): Path<(String, String)>,
) -> Result<Response, ApiError> {
    let product = service.delete_review(&id, &review_id).await.map_err(|e| {
        if e.is_not_found() {
            ApiError::not_found(e.to_string())
        } else {
            ApiError::bad_request("Failed to delete review")
                .with_body(json!({ "fullError": e.to_string() }))
        }
    })?;

    Ok(respond(
        StatusCode::OK,
        "Review deleted successfully",
        serialize(product),
    ))
}

/// List every product's name, image and id
#[utoipa::path(
    get,
    path = "/related-products",
    tag = "Products",
    responses(
        (status = 200, description = "Related products", body = Envelope<Vec<RelatedProductView>>),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn list_related<R: ProductRepository>(
    State(service): SharedService<R>,
) -> Result<Response, ApiError> {
    let products = service.list_related().await.map_err(|e| {
        failure(e, StatusCode::INTERNAL_SERVER_ERROR, RELATED_FAILED)
    })?;

    let body: Vec<RelatedProductView> = products.into_iter().map(Into::into).collect();
    Ok(respond(StatusCode::OK, RELATED_FETCHED, body))
}

/// List every product's name, icon, short description and id
#[utoipa::path(
    get,
    path = "/navbar-products",
    tag = "Products",
    responses(
        (status = 200, description = "Navbar products", body = Envelope<Vec<NavbarProductView>>),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn list_navbar<R: ProductRepository>(
    State(service): SharedService<R>,
) -> Result<Response, ApiError> {
    let products = service.list_navbar().await.map_err(|e| {
        failure(e, StatusCode::INTERNAL_SERVER_ERROR, RELATED_FAILED)
    })?;

    // Same wording as the related listing; existing clients match on it
    let body: Vec<NavbarProductView> = products.into_iter().map(Into::into).collect();
    Ok(respond(StatusCode::OK, RELATED_FETCHED, body))
}

const RELATED_FETCHED: &str = "Related products fetched successfully";
const RELATED_FAILED: &str = "Failed to get related products";
