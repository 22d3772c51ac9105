use mongodb::bson::{Document, doc, oid::ObjectId};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;
use utoipa::ToSchema;
use validator::Validate;

static WHITESPACE_RUN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());

/// Message returned when a review rating is outside 1..=5.
///
/// Repeated as a literal in the `CreateReview` validator attribute.
pub const REVIEW_RATING_MESSAGE: &str = "Review rating must be between 1 and 5";

/// Derive the URL code for a product name: lowercase, every whitespace run
/// replaced by a single hyphen.
///
/// ```
/// assert_eq!(domain_catalog::models::derive_code("Fine  Robusta"), "fine-robusta");
/// ```
pub fn derive_code(name: &str) -> String {
    WHITESPACE_RUN
        .replace_all(&name.to_lowercase(), "-")
        .into_owned()
}

/// Product name a code is matched against: hyphens become single spaces,
/// then lowercase.
///
/// This is not the inverse of [`derive_code`]. Names containing literal
/// hyphens, or runs of several spaces, do not round-trip.
pub fn name_from_code(code: &str) -> String {
    code.replace('-', " ").to_lowercase()
}

/// Anchored pattern matching exactly `name`; apply it case-insensitively.
pub fn name_pattern(name: &str) -> String {
    format!("^{}$", regex::escape(name))
}

/// Parse a 24-hex-digit store identifier.
pub fn parse_id(raw: &str) -> Option<ObjectId> {
    ObjectId::parse_str(raw).ok()
}

/// Pricing block embedded in a product; replaced wholesale on update
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pricing {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    #[serde(default)]
    pub pricing_details: String,
    #[serde(default)]
    pub pricing_type: String,
    #[serde(default)]
    pub pricing_out_turn: String,
    #[serde(default)]
    pub pricing_count: String,
    #[serde(default)]
    pub pricing_moisture: String,
    #[serde(default)]
    pub pricing_defective: String,
}

impl Pricing {
    pub fn new(input: PricingInput) -> Self {
        Self {
            id: ObjectId::new(),
            pricing_details: input.pricing_details.unwrap_or_default(),
            pricing_type: input.pricing_type.unwrap_or_default(),
            pricing_out_turn: input.pricing_out_turn.unwrap_or_default(),
            pricing_count: input.pricing_count.unwrap_or_default(),
            pricing_moisture: input.pricing_moisture.unwrap_or_default(),
            pricing_defective: input.pricing_defective.unwrap_or_default(),
        }
    }

    fn to_document(&self) -> Document {
        doc! {
            "_id": self.id,
            "pricingDetails": &self.pricing_details,
            "pricingType": &self.pricing_type,
            "pricingOutTurn": &self.pricing_out_turn,
            "pricingCount": &self.pricing_count,
            "pricingMoisture": &self.pricing_moisture,
            "pricingDefective": &self.pricing_defective,
        }
    }
}

/// Review embedded in a product's review list
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub review_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub review_email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub review_comments: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub review_rating: Option<i32>,
}

impl Review {
    pub fn new(input: CreateReview) -> Self {
        Self {
            id: ObjectId::new(),
            review_name: input.review_name,
            review_email: input.review_email,
            review_comments: input.review_comments,
            review_rating: input.review_rating,
        }
    }
}

/// Product document as stored in the `products` collection.
///
/// `revision` is the store's `__v` counter; it never leaves the service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    pub product_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product_short_description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product_full_description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product_description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product_image_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product_icon: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product_review_image_url: Option<String>,
    #[serde(default)]
    pub product_reviews: Vec<Review>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product_pricing: Option<Pricing>,
    #[serde(rename = "__v", default)]
    pub revision: i64,
}

impl Product {
    /// Create a new product document from the CreateProduct DTO
    pub fn new(input: CreateProduct) -> Self {
        Self {
            id: ObjectId::new(),
            product_name: input.product_name,
            product_short_description: input.product_short_description,
            product_full_description: input.product_full_description,
            product_description: input.product_description,
            product_image_url: input.product_image_url,
            product_icon: input.product_icon,
            product_review_image_url: input.product_review_image_url,
            product_reviews: input.product_reviews.into_iter().map(Review::new).collect(),
            product_pricing: input.product_pricing.map(Pricing::new),
            revision: 0,
        }
    }

    /// Derived, never stored
    pub fn product_code(&self) -> String {
        derive_code(&self.product_name)
    }

    /// Apply an allow-listed update in memory, mirroring [`UpdateProduct::to_set_document`]
    pub fn apply_update(&mut self, update: UpdateProduct) {
        if let Some(name) = update.product_name {
            self.product_name = name;
        }
        if let Some(v) = update.product_short_description {
            self.product_short_description = Some(v);
        }
        if let Some(v) = update.product_full_description {
            self.product_full_description = Some(v);
        }
        if let Some(v) = update.product_description {
            self.product_description = Some(v);
        }
        if let Some(v) = update.product_image_url {
            self.product_image_url = Some(v);
        }
        if let Some(v) = update.product_icon {
            self.product_icon = Some(v);
        }
        if let Some(v) = update.product_review_image_url {
            self.product_review_image_url = Some(v);
        }
        if let Some(pricing) = update.product_pricing {
            self.product_pricing = Some(Pricing::new(pricing));
        }
    }
}

/// Projection used by the related-products listing
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RelatedProduct {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    pub product_name: String,
    #[serde(default)]
    pub product_image_url: Option<String>,
}

impl RelatedProduct {
    pub fn projection() -> Document {
        doc! { "productName": 1, "productImageUrl": 1, "_id": 1 }
    }
}

/// Projection used by the navigation bar listing
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NavbarProduct {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    pub product_name: String,
    #[serde(default)]
    pub product_icon: Option<String>,
    #[serde(default)]
    pub product_short_description: Option<String>,
}

impl NavbarProduct {
    pub fn projection() -> Document {
        doc! {
            "productName": 1,
            "productIcon": 1,
            "productShortDescription": 1,
            "_id": 1,
        }
    }
}

/// Pricing fields accepted from clients; missing fields default to ""
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PricingInput {
    pub pricing_details: Option<String>,
    pub pricing_type: Option<String>,
    pub pricing_out_turn: Option<String>,
    pub pricing_count: Option<String>,
    pub pricing_moisture: Option<String>,
    pub pricing_defective: Option<String>,
}

/// DTO for appending a review
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateReview {
    pub review_name: Option<String>,
    pub review_email: Option<String>,
    pub review_comments: Option<String>,
    #[validate(range(min = 1, max = 5, message = "Review rating must be between 1 and 5"))]
    pub review_rating: Option<i32>,
}

/// DTO for creating a new product
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateProduct {
    #[validate(length(min = 1, message = "productName is required"))]
    pub product_name: String,
    pub product_short_description: Option<String>,
    pub product_full_description: Option<String>,
    pub product_description: Option<String>,
    pub product_image_url: Option<String>,
    pub product_icon: Option<String>,
    pub product_review_image_url: Option<String>,
    #[serde(default)]
    #[validate(nested)]
    pub product_reviews: Vec<CreateReview>,
    pub product_pricing: Option<PricingInput>,
}

/// Allow-listed fields for full or partial product updates.
///
/// Absent and `null` fields are left untouched. Reviews are managed through
/// the review endpoints only.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProduct {
    pub product_name: Option<String>,
    pub product_short_description: Option<String>,
    pub product_full_description: Option<String>,
    pub product_description: Option<String>,
    pub product_image_url: Option<String>,
    pub product_icon: Option<String>,
    pub product_review_image_url: Option<String>,
    pub product_pricing: Option<PricingInput>,
}

impl UpdateProduct {
    /// Build the `$set` body; empty when nothing was supplied
    pub fn to_set_document(&self) -> Document {
        let mut set = Document::new();

        let scalars = [
            ("productName", &self.product_name),
            ("productShortDescription", &self.product_short_description),
            ("productFullDescription", &self.product_full_description),
            ("productDescription", &self.product_description),
            ("productImageUrl", &self.product_image_url),
            ("productIcon", &self.product_icon),
            ("productReviewImageUrl", &self.product_review_image_url),
        ];
        for (field, value) in scalars {
            if let Some(value) = value {
                set.insert(field, value.as_str());
            }
        }

        if let Some(ref pricing) = self.product_pricing {
            set.insert("productPricing", Pricing::new(pricing.clone()).to_document());
        }

        set
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Public view of a pricing block
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PricingView {
    pub id: String,
    pub pricing_details: String,
    pub pricing_type: String,
    pub pricing_out_turn: String,
    pub pricing_count: String,
    pub pricing_moisture: String,
    pub pricing_defective: String,
}

/// Public view of a review
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ReviewView {
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub review_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub review_email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub review_comments: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub review_rating: Option<i32>,
}

/// Public view of a product: `_id` renamed to `id`, `__v` dropped,
/// `productCode` attached
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProductView {
    pub id: String,
    pub product_code: String,
    pub product_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub product_short_description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub product_full_description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub product_description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub product_image_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub product_icon: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub product_review_image_url: Option<String>,
    #[serde(default)]
    pub product_reviews: Vec<ReviewView>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub product_pricing: Option<PricingView>,
}

/// Public view of a related-products entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RelatedProductView {
    pub id: String,
    pub product_code: String,
    pub product_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub product_image_url: Option<String>,
}

/// Public view of a navbar entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct NavbarProductView {
    pub id: String,
    pub product_code: String,
    pub product_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub product_icon: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub product_short_description: Option<String>,
}

impl From<Pricing> for PricingView {
    fn from(pricing: Pricing) -> Self {
        Self {
            id: pricing.id.to_hex(),
            pricing_details: pricing.pricing_details,
            pricing_type: pricing.pricing_type,
            pricing_out_turn: pricing.pricing_out_turn,
            pricing_count: pricing.pricing_count,
            pricing_moisture: pricing.pricing_moisture,
            pricing_defective: pricing.pricing_defective,
        }
    }
}

impl From<Review> for ReviewView {
    fn from(review: Review) -> Self {
        Self {
            id: review.id.to_hex(),
            review_name: review.review_name,
            review_email: review.review_email,
            review_comments: review.review_comments,
            review_rating: review.review_rating,
        }
    }
}

impl From<Product> for ProductView {
    fn from(product: Product) -> Self {
        Self {
            id: product.id.to_hex(),
            product_code: product.product_code(),
            product_name: product.product_name,
            product_short_description: product.product_short_description,
            product_full_description: product.product_full_description,
            product_description: product.product_description,
            product_image_url: product.product_image_url,
            product_icon: product.product_icon,
            product_review_image_url: product.product_review_image_url,
            product_reviews: product.product_reviews.into_iter().map(Into::into).collect(),
            product_pricing: product.product_pricing.map(Into::into),
        }
    }
}

impl From<RelatedProduct> for RelatedProductView {
    fn from(product: RelatedProduct) -> Self {
        Self {
            id: product.id.to_hex(),
            product_code: derive_code(&product.product_name),
            product_name: product.product_name,
            product_image_url: product.product_image_url,
        }
    }
}

impl From<NavbarProduct> for NavbarProductView {
    fn from(product: NavbarProduct) -> Self {
        Self {
            id: product.id.to_hex(),
            product_code: derive_code(&product.product_name),
            product_name: product.product_name,
            product_icon: product.product_icon,
            product_short_description: product.product_short_description,
        }
    }
}

/// Serialize a stored product for the response boundary
pub fn serialize(product: Product) -> ProductView {
    product.into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample_product() -> Product {
        Product::new(CreateProduct {
            product_name: "Fine Robusta".to_string(),
            product_short_description: Some("Dark roast".to_string()),
            product_reviews: vec![CreateReview {
                review_name: Some("Ana".to_string()),
                review_rating: Some(5),
                ..Default::default()
            }],
            product_pricing: Some(PricingInput {
                pricing_type: Some("FOB".to_string()),
                ..Default::default()
            }),
            ..Default::default()
        })
    }

    #[test]
    fn test_derive_code_lowercases_and_hyphenates() {
        assert_eq!(derive_code("Fine Robusta"), "fine-robusta");
        assert_eq!(derive_code("Fine \t\n Robusta  Beans"), "fine-robusta-beans");
    }

    #[test]
    fn test_derive_code_keeps_edge_whitespace_as_hyphens() {
        assert_eq!(derive_code(" Arabica "), "-arabica-");
    }

    #[test]
    fn test_name_from_code_maps_hyphens_to_spaces() {
        assert_eq!(name_from_code("Fine-Robusta"), "fine robusta");
    }

    #[test]
    fn test_literal_hyphen_names_are_ambiguous() {
        // "Semi-Washed" derives "semi-washed", which looks up "semi washed"
        let code = derive_code("Semi-Washed");
        assert_eq!(code, "semi-washed");
        assert_eq!(name_from_code(&code), "semi washed");
    }

    #[test]
    fn test_name_pattern_is_anchored_and_escaped() {
        assert_eq!(name_pattern(&name_from_code("fine-robusta")), "^fine robusta$");
        assert_eq!(name_pattern("c++"), r"^c\+\+$");
        assert!(Regex::new(&format!("(?i){}", name_pattern("fine robusta")))
            .unwrap()
            .is_match("Fine Robusta"));
    }

    #[test]
    fn test_parse_id() {
        assert!(parse_id("65a1b2c3d4e5f60718293a4b").is_some());
        assert!(parse_id("not-an-id").is_none());
    }

    #[test]
    fn test_new_product_assigns_sub_ids_and_pricing_defaults() {
        let product = sample_product();
        assert_eq!(product.revision, 0);
        assert_eq!(product.product_reviews.len(), 1);

        let pricing = product.product_pricing.unwrap();
        assert_eq!(pricing.pricing_type, "FOB");
        assert_eq!(pricing.pricing_details, "");
        assert_ne!(pricing.id, product.id);
    }

    #[test]
    fn test_serialize_strips_internal_fields() {
        let product = sample_product();
        let id = product.id.to_hex();

        let value = serde_json::to_value(serialize(product)).unwrap();
        let object = value.as_object().unwrap();

        assert!(!object.contains_key("_id"));
        assert!(!object.contains_key("__v"));
        assert_eq!(value["id"], json!(id));
        assert_eq!(value["productCode"], "fine-robusta");
        assert_eq!(value["productShortDescription"], "Dark roast");
        assert!(!object.contains_key("productIcon"));

        let review = &value["productReviews"][0];
        assert!(review.get("_id").is_none());
        assert_eq!(review["id"].as_str().unwrap().len(), 24);
        assert_eq!(review["reviewRating"], 5);

        let pricing = &value["productPricing"];
        assert!(pricing.get("_id").is_none());
        assert!(pricing["id"].is_string());
    }

    #[test]
    fn test_stored_document_uses_store_field_names() {
        let product = sample_product();
        let document = mongodb::bson::to_document(&product).unwrap();

        assert!(document.get_object_id("_id").is_ok());
        assert_eq!(document.get_i64("__v").unwrap(), 0);
        assert_eq!(document.get_str("productName").unwrap(), "Fine Robusta");
        assert!(!document.contains_key("productCode"));
        assert!(!document.contains_key("productIcon"));
    }

    #[test]
    fn test_stored_document_without_optional_fields_deserializes() {
        let id = ObjectId::new();
        let document = doc! { "_id": id, "productName": "Bare", "__v": 3_i32 };
        let product: Product = mongodb::bson::from_document(document).unwrap();

        assert_eq!(product.id, id);
        assert!(product.product_reviews.is_empty());
        assert!(product.product_pricing.is_none());
        assert_eq!(product.revision, 3);
    }

    #[test]
    fn test_create_product_requires_name() {
        let missing: Result<CreateProduct, _> =
            serde_json::from_value(json!({ "productShortDescription": "x" }));
        assert!(missing.is_err());

        let empty: CreateProduct = serde_json::from_value(json!({ "productName": "" })).unwrap();
        assert!(empty.validate().is_err());
    }

    #[test]
    fn test_create_product_validates_nested_review_rating() {
        let input: CreateProduct = serde_json::from_value(json!({
            "productName": "Liberica",
            "productReviews": [{ "reviewRating": 9 }]
        }))
        .unwrap();
        assert!(input.validate().is_err());
    }

    #[test]
    fn test_review_rating_range() {
        let ok = CreateReview {
            review_rating: Some(1),
            ..Default::default()
        };
        assert!(ok.validate().is_ok());

        let unrated = CreateReview::default();
        assert!(unrated.validate().is_ok());

        for rating in [0, 6, -1] {
            let bad = CreateReview {
                review_rating: Some(rating),
                ..Default::default()
            };
            assert!(bad.validate().is_err(), "rating {rating} should be rejected");
        }
    }

    #[test]
    fn test_review_rating_message_matches_constant() {
        let bad = CreateReview {
            review_rating: Some(9),
            ..Default::default()
        };
        let errors = bad.validate().unwrap_err();
        assert_eq!(
            errors.field_errors()["review_rating"][0].message.as_deref(),
            Some(REVIEW_RATING_MESSAGE)
        );
    }

    #[test]
    fn test_update_ignores_unknown_and_null_fields() {
        let update: UpdateProduct = serde_json::from_value(json!({
            "productShortDescription": "x",
            "productIcon": null,
            "__v": 99,
            "productReviews": []
        }))
        .unwrap();

        let set = update.to_set_document();
        assert_eq!(set.len(), 1);
        assert_eq!(set.get_str("productShortDescription").unwrap(), "x");
    }

    #[test]
    fn test_update_set_document_replaces_pricing_wholesale() {
        let update = UpdateProduct {
            product_pricing: Some(PricingInput {
                pricing_count: Some("12".to_string()),
                ..Default::default()
            }),
            ..Default::default()
        };

        let set = update.to_set_document();
        let pricing = set.get_document("productPricing").unwrap();
        assert!(pricing.get_object_id("_id").is_ok());
        assert_eq!(pricing.get_str("pricingCount").unwrap(), "12");
        assert_eq!(pricing.get_str("pricingType").unwrap(), "");
    }

    #[test]
    fn test_empty_update() {
        assert!(UpdateProduct::default().is_empty());
        assert!(UpdateProduct::default().to_set_document().is_empty());
    }

    #[test]
    fn test_apply_update_keeps_untouched_fields() {
        let mut product = sample_product();
        product.apply_update(UpdateProduct {
            product_short_description: Some("x".to_string()),
            ..Default::default()
        });

        assert_eq!(product.product_short_description.as_deref(), Some("x"));
        assert_eq!(product.product_name, "Fine Robusta");
        assert_eq!(product.product_reviews.len(), 1);
    }

    #[test]
    fn test_projection_views_carry_code() {
        let related = RelatedProductView::from(RelatedProduct {
            id: ObjectId::new(),
            product_name: "Fine Robusta".to_string(),
            product_image_url: None,
        });
        assert_eq!(related.product_code, "fine-robusta");

        let value = serde_json::to_value(&related).unwrap();
        assert!(value.get("productImageUrl").is_none());

        let navbar = NavbarProductView::from(NavbarProduct {
            id: ObjectId::new(),
            product_name: "Excelsa Peaberry".to_string(),
            product_icon: Some("/icons/e.svg".to_string()),
            product_short_description: None,
        });
        assert_eq!(navbar.product_code, "excelsa-peaberry");
        assert_eq!(navbar.product_icon.as_deref(), Some("/icons/e.svg"));
    }
}
