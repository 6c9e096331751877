//! Conversion from the backend record to the storefront product.

use crate::wire::DenimProduct;
use kolaz_commerce::catalog::{Product, ProductColor};
use kolaz_commerce::{Currency, Money, ProductId};

/// Flatten a backend record into the storefront shape.
///
/// The record's own pricing currency wins when it is a known code;
/// otherwise `fallback` is used.
pub fn to_product(record: &DenimProduct, fallback: Currency) -> Product {
    let currency = Currency::from_code(&record.pricing.currency).unwrap_or(fallback);
    let tags = &record.tags;

    Product {
        id: ProductId::new(record.sku.clone()),
        name: record.name.clone(),
        price: Money::from_decimal(record.pricing.base_price, currency),
        sale_price: record
            .pricing
            .sale_price
            .filter(|p| *p > 0.0)
            .map(|p| Money::from_decimal(p, currency)),
        image: record.media.cover_image.clone(),
        images: record.media.images.clone(),
        category: record.category.main.clone(),
        subcategory: record
            .category
            .sub_categories
            .first()
            .cloned()
            .unwrap_or_default(),
        brand: record.brand.name.clone(),
        colors: record
            .color
            .iter()
            .map(|c| ProductColor::new(c.name.clone(), c.hex.clone()))
            .collect(),
        sizes: record.sizes.iter().map(|s| s.size.clone()).collect(),
        stock: record.stock,
        is_new_arrival: record.is_new_arrival,
        is_best_seller: record.is_best_seller,
        is_featured: record.is_featured,
        description: record.description.clone(),
        rating: record.rating.average,
        review_count: record.rating.count,
        tags: tags
            .style
            .iter()
            .chain(&tags.occasion)
            .chain(&tags.features)
            .cloned()
            .collect(),
    }
}

/// Map every record with [`to_product`].
pub fn to_products(records: &[DenimProduct], fallback: Currency) -> Vec<Product> {
    records.iter().map(|r| to_product(r, fallback)).collect()
}
