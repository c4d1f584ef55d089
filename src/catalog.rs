//! Catalogs

use rustc_hash::FxHashMap;
use slotmap::SlotMap;

use crate::products::{Product, ProductKey, Rating};

/// Seller profile attached to a seller catalog.
#[derive(Debug, Clone)]
pub struct Seller {
    /// Seller display name
    pub name: String,

    /// Aggregate seller rating
    pub rating: Option<Rating>,

    /// Whether the seller has been verified
    pub verified: bool,
}

/// Where a catalog's products come from.
#[derive(Debug, Clone)]
pub enum CatalogKind {
    /// Suggestions shown while the cart is empty
    Recommended,

    /// Products listed by a third-party seller
    Seller(Seller),
}

/// An ordered, titled list of products.
#[derive(Debug)]
pub struct Catalog<'a> {
    title: String,
    kind: CatalogKind,
    products: SlotMap<ProductKey, Product<'a>>,
    handles: FxHashMap<String, ProductKey>,
    order: Vec<(String, ProductKey)>,
}

impl<'a> Catalog<'a> {
    /// Create an empty catalog.
    pub fn new(title: impl Into<String>, kind: CatalogKind) -> Self {
        Self {
            title: title.into(),
            kind,
            products: SlotMap::with_key(),
            handles: FxHashMap::default(),
            order: Vec::new(),
        }
    }

    /// Add a product under a string handle, replacing any product already using that handle.
    pub fn insert(&mut self, handle: impl Into<String>, product: Product<'a>) -> ProductKey {
        let handle = handle.into();

        if let Some(existing) = self.handles.get(&handle).copied() {
            if let Some(slot) = self.products.get_mut(existing) {
                *slot = product;
            }

            return existing;
        }

        let key = self.products.insert(product);

        self.handles.insert(handle.clone(), key);
        self.order.push((handle, key));

        key
    }

    /// Catalog title
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Catalog kind
    pub fn kind(&self) -> &CatalogKind {
        &self.kind
    }

    /// Seller profile, if this is a seller catalog
    pub fn seller(&self) -> Option<&Seller> {
        match &self.kind {
            CatalogKind::Seller(seller) => Some(seller),
            CatalogKind::Recommended => None,
        }
    }

    /// Look a product up by its handle.
    pub fn get(&self, handle: &str) -> Option<&Product<'a>> {
        self.handles
            .get(handle)
            .and_then(|key| self.products.get(*key))
    }

    /// Look a product up by its key.
    pub fn get_by_key(&self, key: ProductKey) -> Option<&Product<'a>> {
        self.products.get(key)
    }

    /// Products in insertion order, with their handles.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Product<'a>)> {
        self.order.iter().filter_map(|(handle, key)| {
            self.products
                .get(*key)
                .map(|product| (handle.as_str(), product))
        })
    }

    /// Number of products
    pub fn len(&self) -> usize {
        self.products.len()
    }

    /// Whether the catalog has no products
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}
