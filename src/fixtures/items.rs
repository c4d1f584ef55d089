//! Item Fixtures

use serde::Deserialize;

use crate::fixtures::products::ProductFixture;

/// Wrapper for the initial cart lines in YAML
#[derive(Debug, Deserialize)]
pub struct ItemsFixture {
    /// Lines in display order
    pub items: Vec<ItemFixture>,
}

/// A product already in the cart when the session starts.
#[derive(Debug, Deserialize)]
pub struct ItemFixture {
    /// The product itself
    #[serde(flatten)]
    pub product: ProductFixture,

    /// Starting quantity
    #[serde(default = "one")]
    pub quantity: u32,
}

fn one() -> u32 {
    1
}
