//! Product Fixtures

use rust_decimal::{Decimal, prelude::ToPrimitive};
use rusty_money::{
    Money,
    iso::{Currency, EUR, GBP, USD},
};
use serde::Deserialize;

use crate::{
    catalog::{Catalog, CatalogKind, Seller},
    fixtures::FixtureError,
    products::{Product, Rating},
};

/// Wrapper for catalogs in YAML
#[derive(Debug, Deserialize)]
pub struct ProductsFixture {
    /// Catalogs in display order
    pub catalogs: Vec<CatalogFixture>,
}

/// Catalog fixture
#[derive(Debug, Deserialize)]
pub struct CatalogFixture {
    /// Catalog handle
    pub key: String,

    /// Catalog title
    pub title: String,

    /// Seller profile; catalogs without one are recommendations
    #[serde(default)]
    pub seller: Option<SellerFixture>,

    /// Products in display order
    pub products: Vec<ProductFixture>,
}

/// Seller fixture
#[derive(Debug, Deserialize)]
pub struct SellerFixture {
    /// Seller name
    pub name: String,

    /// Average rating
    #[serde(default)]
    pub rating: Option<f64>,

    /// Verified seller badge
    #[serde(default)]
    pub verified: bool,
}

/// Product Fixture
#[derive(Debug, Deserialize)]
pub struct ProductFixture {
    /// Product handle within its catalog
    #[serde(default)]
    pub key: Option<String>,

    /// Product name
    pub name: String,

    /// Product code
    pub code: String,

    /// Product price (e.g., "24.99 USD")
    pub price: String,

    /// Image reference
    #[serde(default)]
    pub image: Option<String>,

    /// Availability, defaults to available
    #[serde(default = "available_by_default")]
    pub available: bool,

    /// Average rating
    #[serde(default)]
    pub rating: Option<f64>,

    /// Review count behind the rating
    #[serde(default)]
    pub reviews: u32,
}

fn available_by_default() -> bool {
    true
}

impl TryFrom<ProductFixture> for Product<'_> {
    type Error = FixtureError;

    fn try_from(fixture: ProductFixture) -> Result<Self, Self::Error> {
        let (minor_units, currency) = parse_price(&fixture.price)?;

        let rating = fixture
            .rating
            .map(|stars| parse_rating(stars, fixture.reviews))
            .transpose()?;

        Ok(Product {
            name: fixture.name,
            code: fixture.code,
            price: Money::from_minor(minor_units, currency),
            image: fixture.image,
            available: fixture.available,
            rating,
        })
    }
}

impl TryFrom<CatalogFixture> for Catalog<'_> {
    type Error = FixtureError;

    fn try_from(fixture: CatalogFixture) -> Result<Self, Self::Error> {
        let kind = match fixture.seller {
            Some(seller) => CatalogKind::Seller(Seller {
                rating: seller
                    .rating
                    .map(|stars| parse_rating(stars, 0))
                    .transpose()?,
                name: seller.name,
                verified: seller.verified,
            }),
            None => CatalogKind::Recommended,
        };

        let mut catalog = Catalog::new(fixture.title, kind);

        for product_fixture in fixture.products {
            let handle = product_fixture
                .key
                .clone()
                .ok_or_else(|| FixtureError::MissingKey(product_fixture.name.clone()))?;

            catalog.insert(handle, product_fixture.try_into()?);
        }

        Ok(catalog)
    }
}

/// Parse price string (e.g., "2.99 GBP") into minor units and currency
///
/// # Errors
///
/// Returns an error if the string is not in the format "AMOUNT CURRENCY",
/// if the amount cannot be parsed as a decimal, or if the currency code
/// is not recognized.
pub fn parse_price(s: &str) -> Result<(i64, &'static Currency), FixtureError> {
    let parts: Vec<&str> = s.split_whitespace().collect();

    if parts.len() != 2 {
        return Err(FixtureError::InvalidPrice(format!(
            "Expected format 'AMOUNT CURRENCY', got: {s}"
        )));
    }

    let amount = parts
        .first()
        .ok_or_else(|| FixtureError::InvalidPrice(s.to_string()))?
        .parse::<Decimal>()
        .map_err(|_err| FixtureError::InvalidPrice(s.to_string()))?;

    if amount.is_sign_negative() {
        return Err(FixtureError::InvalidPrice(s.to_string()));
    }

    let minor_units = amount
        .checked_mul(Decimal::new(100, 0))
        .and_then(|value| value.round_dp(0).to_i64())
        .ok_or_else(|| FixtureError::InvalidPrice(s.to_string()))?;

    let currency_code = parts
        .get(1)
        .ok_or_else(|| FixtureError::InvalidPrice(s.to_string()))?;

    let currency = match *currency_code {
        "GBP" => GBP,
        "USD" => USD,
        "EUR" => EUR,
        other => return Err(FixtureError::UnknownCurrency(other.to_string())),
    };

    Ok((minor_units, currency))
}

fn parse_rating(stars: f64, reviews: u32) -> Result<Rating, FixtureError> {
    let stars = Decimal::try_from(stars)
        .map_err(|_err| FixtureError::InvalidRating(stars.to_string()))?;

    Ok(Rating::new(stars.round_dp(1), reviews))
}
