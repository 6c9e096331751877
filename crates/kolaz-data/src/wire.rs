//! Wire schema of the product API.
//!
//! Records mirror the backend's camelCase JSON. Optional sections and
//! missing arrays deserialize to their defaults so that projected responses
//! (`fields=color`) and partially filled admin records still parse.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// The `{ "data": ... }` envelope every endpoint answers with.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Envelope<T> {
    pub data: Option<T>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum DenimWash {
    Raw,
    LightWash,
    #[default]
    MediumWash,
    DarkWash,
    Black,
    AcidWash,
    Distressed,
    #[serde(other)]
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum JeansFit {
    Skinny,
    Slim,
    #[default]
    Straight,
    Bootcut,
    Relaxed,
    Baggy,
    #[serde(other)]
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum RiseType {
    LowRise,
    #[default]
    MidRise,
    HighRise,
    UltraHighRise,
    #[serde(other)]
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum StockStatus {
    #[default]
    InStock,
    LowStock,
    OutOfStock,
    PreOrder,
    #[serde(other)]
    Other,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct PocketStyle {
    pub pockets: u32,
    pub details: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub style: Option<String>,
}

/// Zipper or button hardware.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Hardware {
    pub material: String,
    pub details: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct DenimDetails {
    pub wash: DenimWash,
    pub fit: JeansFit,
    pub rise: RiseType,
    pub stretch: bool,
    /// Ounces per square yard.
    pub weight: f64,
    pub selvage: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fabric_origin: Option<String>,
    pub pocket_style: PocketStyle,
    pub zipper: Hardware,
    pub button: Hardware,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct WireColor {
    pub name: String,
    pub hex: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub swatch_image: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Brand {
    pub id: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub logo: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub story: Option<String>,
}

/// One purchasable size of a product.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct SizeVariant {
    pub sku: String,
    /// Waist x inseam (`"30x32"`) or a letter size.
    pub value: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub us: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub eu: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub uk: Option<String>,
    pub stock: i64,
    pub waist: f64,
    pub inseam: f64,
    pub thigh: f64,
    pub leg_opening: f64,
    /// Label shown in the size picker.
    pub size: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Fabric {
    pub composition: String,
    pub weight: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub texture: Option<String>,
}

/// Prices in major units of `currency`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct Pricing {
    pub base_price: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sale_price: Option<f64>,
    pub currency: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub discount_percentage: Option<f64>,
    pub is_on_sale: bool,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct CategoryInfo {
    pub main: String,
    pub sub_categories: Vec<String>,
    pub hierarchy: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Tags {
    pub style: Vec<String>,
    pub occasion: Vec<String>,
    pub features: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct Media {
    pub cover_image: String,
    pub images: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lookbook: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size_guide_image: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub video: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Rating {
    pub average: f64,
    pub count: i64,
    /// Review count per star, keyed `"1"` to `"5"`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub breakdown: Option<BTreeMap<String, i64>>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct FeaturedReview {
    pub text: String,
    pub author: String,
    pub rating: f64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct CareInstructions {
    pub washing: String,
    pub drying: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ironing: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bleaching: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dry_cleaning: Option<String>,
}

/// A product as stored by the backend.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct DenimProduct {
    #[serde(rename = "_id")]
    pub id: String,
    pub sku: String,
    pub name: String,
    pub slug: String,
    /// May contain HTML.
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub short_description: Option<String>,
    pub sell_count: i64,
    pub stock: i64,
    pub denim_details: DenimDetails,
    pub color: Vec<WireColor>,
    pub brand: Brand,
    pub sizes: Vec<SizeVariant>,
    pub fabric: Fabric,
    pub pricing: Pricing,
    pub stock_status: StockStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub restock_date: Option<String>,
    pub category: CategoryInfo,
    pub tags: Tags,
    pub media: Media,
    pub rating: Rating,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub featured_review: Option<FeaturedReview>,
    pub is_featured: bool,
    pub is_new_arrival: bool,
    pub is_best_seller: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_sustainable: Option<bool>,
    /// Soft-delete marker.
    pub is_deleted: bool,
    pub created_at: String,
    pub updated_at: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub release_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub related_products: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub frequently_bought_with: Option<Vec<String>>,
    pub care_instructions: CareInstructions,
}

/// Create or patch payload for the admin endpoints. Unset fields are omitted.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ProductInput {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sku: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub slug: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stock: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pricing: Option<Pricing>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<CategoryInfo>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub brand: Option<Brand>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<Vec<WireColor>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sizes: Option<Vec<SizeVariant>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub media: Option<Media>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Tags>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_featured: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_new_arrival: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_best_seller: Option<bool>,
}

impl ProductInput {
    /// Check whether any field is set.
    pub fn is_empty(&self) -> bool {
        self == &ProductInput::default()
    }
}
