//! Fixtures
//!
//! Store data for a cart session, loaded from YAML files grouped by set name:
//! `products/<set>.yml`, `items/<set>.yml`, `services/<set>.yml` and `membership/<set>.yml`.

use std::{fs, path::PathBuf};

use rustc_hash::FxHashMap;
use rusty_money::iso::Currency;
use serde::de::DeserializeOwned;
use thiserror::Error;
use tracing::debug;

use crate::{
    cart::{Cart, CartError},
    catalog::{Catalog, CatalogKind},
    fixtures::{
        items::ItemsFixture, membership::MembershipFixture, products::ProductsFixture,
        services::ServicesFixture,
    },
    membership::MembershipPlan,
    products::Product,
    services::{AddOnService, ServiceError},
};

pub mod items;
pub mod membership;
pub mod products;
pub mod services;

/// Fixture Parsing Errors
#[derive(Debug, Error)]
pub enum FixtureError {
    /// IO error reading fixture files
    #[error("Failed to read fixture file: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parsing error
    #[error("Failed to parse YAML: {0}")]
    Yaml(#[from] serde_norway::Error),

    /// Invalid price format
    #[error("Invalid price format: {0}")]
    InvalidPrice(String),

    /// Invalid rating value
    #[error("Invalid rating: {0}")]
    InvalidRating(String),

    /// Unknown currency code
    #[error("Unknown currency code: {0}")]
    UnknownCurrency(String),

    /// A catalog product has no handle
    #[error("Product {0} has no key")]
    MissingKey(String),

    /// Catalog not found
    #[error("Catalog not found: {0}")]
    CatalogNotFound(String),

    /// Currency mismatch between fixtures
    #[error("Currency mismatch: expected {0}, found {1}")]
    CurrencyMismatch(String, String),

    /// No priced data loaded yet
    #[error("No fixtures loaded yet; currency unknown")]
    NoCurrency,

    /// Invalid service pricing
    #[error("Invalid service: {0}")]
    Service(#[from] ServiceError),

    /// Cart creation error
    #[error("Failed to create cart: {0}")]
    Cart(#[from] CartError),
}

/// Fixture
#[derive(Debug)]
pub struct Fixture<'a> {
    /// Base path for fixture files
    base_path: PathBuf,

    /// Catalogs in display order, with handle lookups
    catalogs: Vec<Catalog<'a>>,
    catalog_keys: FxHashMap<String, usize>,

    /// Lines the cart starts with
    items: Vec<(Product<'a>, u32)>,

    /// Service catalog and the product code it is anchored to
    services: Vec<(String, AddOnService<'a>)>,
    service_anchor: Option<String>,

    /// Membership plan, the Elite plan when none is loaded
    plan: Option<MembershipPlan<'a>>,

    /// Currency for the fixture set
    currency: Option<&'a Currency>,
}

impl<'a> Fixture<'a> {
    /// Create a new empty fixture with default base path
    pub fn new() -> Self {
        Self::with_base_path("./fixtures")
    }

    /// Create a new empty fixture with custom base path
    pub fn with_base_path(base_path: impl Into<PathBuf>) -> Self {
        Self {
            base_path: base_path.into(),
            catalogs: Vec::new(),
            catalog_keys: FxHashMap::default(),
            items: Vec::new(),
            services: Vec::new(),
            service_anchor: None,
            plan: None,
            currency: None,
        }
    }

    /// Load catalogs from a YAML fixture file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed, or if there are currency mismatches.
    pub fn load_products(&mut self, name: &str) -> Result<&mut Self, FixtureError> {
        let fixture: ProductsFixture = self.read("products", name)?;

        for catalog_fixture in fixture.catalogs {
            let key = catalog_fixture.key.clone();
            let catalog: Catalog<'a> = catalog_fixture.try_into()?;

            for (_, product) in catalog.iter() {
                self.track_currency(product.price.currency())?;
            }

            debug!(catalog = %key, products = catalog.len(), "loaded catalog");

            self.catalog_keys.insert(key, self.catalogs.len());
            self.catalogs.push(catalog);
        }

        Ok(self)
    }

    /// Load the initial cart lines from a YAML fixture file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed, or if there are currency mismatches.
    pub fn load_items(&mut self, name: &str) -> Result<&mut Self, FixtureError> {
        let fixture: ItemsFixture = self.read("items", name)?;

        for item_fixture in fixture.items {
            let product: Product<'a> = item_fixture.product.try_into()?;

            self.track_currency(product.price.currency())?;
            self.items.push((product, item_fixture.quantity));
        }

        Ok(self)
    }

    /// Load the service catalog from a YAML fixture file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed, if a service is mispriced, or if there are
    /// currency mismatches.
    pub fn load_services(&mut self, name: &str) -> Result<&mut Self, FixtureError> {
        let fixture: ServicesFixture = self.read("services", name)?;

        self.service_anchor = fixture.anchor;

        for service_fixture in fixture.services {
            let key = service_fixture.key.clone();
            let service: AddOnService<'a> = service_fixture.try_into()?;

            self.track_currency(service.price().currency())?;
            self.services.push((key, service));
        }

        Ok(self)
    }

    /// Load the membership plan from a YAML fixture file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed, or if there are currency mismatches.
    pub fn load_membership(&mut self, name: &str) -> Result<&mut Self, FixtureError> {
        let fixture: MembershipFixture = self.read("membership", name)?;
        let plan: MembershipPlan<'a> = fixture.try_into()?;

        self.track_currency(plan.fee.currency())?;
        self.plan = Some(plan);

        Ok(self)
    }

    /// Load a complete fixture set (all four files with the same name)
    ///
    /// # Errors
    ///
    /// Returns an error if any of the fixture files cannot be loaded.
    pub fn from_set(name: &str) -> Result<Self, FixtureError> {
        Self::from_set_in("./fixtures", name)
    }

    /// Load a complete fixture set from a custom base path
    ///
    /// # Errors
    ///
    /// Returns an error if any of the fixture files cannot be loaded.
    pub fn from_set_in(base_path: impl Into<PathBuf>, name: &str) -> Result<Self, FixtureError> {
        let mut fixture = Self::with_base_path(base_path);

        fixture
            .load_products(name)?
            .load_items(name)?
            .load_services(name)?
            .load_membership(name)?;

        Ok(fixture)
    }

    /// Get a catalog by its handle
    ///
    /// # Errors
    ///
    /// Returns an error if the catalog is not found.
    pub fn catalog(&self, key: &str) -> Result<&Catalog<'a>, FixtureError> {
        self.catalog_keys
            .get(key)
            .and_then(|index| self.catalogs.get(*index))
            .ok_or_else(|| FixtureError::CatalogNotFound(key.to_string()))
    }

    /// All catalogs in display order
    pub fn catalogs(&self) -> &[Catalog<'a>] {
        &self.catalogs
    }

    /// The first recommendation catalog, if any
    pub fn recommended(&self) -> Option<&Catalog<'a>> {
        self.catalogs
            .iter()
            .find(|catalog| matches!(catalog.kind(), CatalogKind::Recommended))
    }

    /// Find a product by handle across all catalogs, returning the catalog it belongs to.
    pub fn find_product(&self, handle: &str) -> Option<&Catalog<'a>> {
        self.catalogs
            .iter()
            .find(|catalog| catalog.get(handle).is_some())
    }

    /// Initial cart lines
    pub fn items(&self) -> &[(Product<'a>, u32)] {
        &self.items
    }

    /// Get the currency
    ///
    /// # Errors
    ///
    /// Returns an error if no priced data has been loaded yet.
    pub fn currency(&self) -> Result<&'a Currency, FixtureError> {
        self.currency.ok_or(FixtureError::NoCurrency)
    }

    /// Build a fresh cart session from the loaded fixtures
    ///
    /// # Errors
    ///
    /// Returns an error if nothing priced has been loaded or if cart creation fails.
    pub fn cart(&self) -> Result<Cart<'a>, FixtureError> {
        let currency = self.currency()?;

        let plan = self
            .plan
            .clone()
            .unwrap_or_else(|| MembershipPlan::elite(currency));

        let mut cart = Cart::new(currency, plan)?;

        for (product, quantity) in &self.items {
            cart.add_line_item_with_quantity(product, *quantity)?;
        }

        for (key, service) in &self.services {
            cart.add_service(key.clone(), service.clone())?;
        }

        if let Some(anchor) = &self.service_anchor {
            cart.anchor_services(anchor.clone());
        }

        Ok(cart)
    }

    fn read<T: DeserializeOwned>(&self, category: &str, name: &str) -> Result<T, FixtureError> {
        let file_path = self.base_path.join(category).join(format!("{name}.yml"));
        let contents = fs::read_to_string(&file_path)?;

        debug!(path = %file_path.display(), "reading fixture");

        Ok(serde_norway::from_str(&contents)?)
    }

    fn track_currency(&mut self, currency: &'a Currency) -> Result<(), FixtureError> {
        match self.currency {
            Some(existing) if existing != currency => Err(FixtureError::CurrencyMismatch(
                existing.iso_alpha_code.to_string(),
                currency.iso_alpha_code.to_string(),
            )),
            Some(_) => Ok(()),
            None => {
                self.currency = Some(currency);

                Ok(())
            }
        }
    }
}

impl Default for Fixture<'_> {
    fn default() -> Self {
        Self::new()
    }
}
