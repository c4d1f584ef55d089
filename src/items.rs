//! Line items

use std::fmt;

use rusty_money::{Money, iso::Currency};

use crate::{pricing::TotalPriceError, products::Product};

/// Identifier of a line item, unique within a cart session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LineItemId(u64);

impl LineItemId {
    /// Wrap a raw identifier.
    pub const fn new(value: u64) -> Self {
        Self(value)
    }

    /// Raw identifier value
    pub const fn value(self) -> u64 {
        self.0
    }
}

impl fmt::Display for LineItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "product-{}", self.0)
    }
}

/// A product in the cart with a quantity.
///
/// The quantity is always at least one; the cart removes an item rather than letting it reach zero.
#[derive(Debug, Clone, PartialEq)]
pub struct LineItem<'a> {
    id: LineItemId,
    name: String,
    code: String,
    unit_price: Money<'a, Currency>,
    quantity: u32,
    image: Option<String>,
    available: bool,
}

impl<'a> LineItem<'a> {
    /// Creates a line item with quantity one from a catalog product.
    pub fn from_product(id: LineItemId, product: &Product<'a>) -> Self {
        Self {
            id,
            name: product.name.clone(),
            code: product.code.clone(),
            unit_price: product.price,
            quantity: 1,
            image: product.image.clone(),
            available: product.available,
        }
    }

    /// Sets the product code shown for this line.
    #[must_use]
    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.code = code.into();
        self
    }

    /// Sets the starting quantity, never below one.
    #[must_use]
    pub fn with_quantity(mut self, quantity: u32) -> Self {
        self.quantity = quantity.max(1);
        self
    }

    /// Line item identifier
    pub fn id(&self) -> LineItemId {
        self.id
    }

    /// Display name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Product code
    pub fn code(&self) -> &str {
        &self.code
    }

    /// Price of a single unit
    pub fn unit_price(&self) -> &Money<'a, Currency> {
        &self.unit_price
    }

    /// Quantity, always at least one
    pub fn quantity(&self) -> u32 {
        self.quantity
    }

    /// Image reference
    pub fn image(&self) -> Option<&str> {
        self.image.as_deref()
    }

    /// Availability flag
    pub fn is_available(&self) -> bool {
        self.available
    }

    pub(crate) fn set_quantity(&mut self, quantity: u32) {
        debug_assert!(quantity >= 1, "line item quantity must stay positive");

        self.quantity = quantity.max(1);
    }

    /// Unit price multiplied by quantity.
    ///
    /// # Errors
    ///
    /// Returns [`TotalPriceError::Overflow`] if the product does not fit in minor units.
    pub fn line_total(&self) -> Result<Money<'a, Currency>, TotalPriceError> {
        let minor = self
            .unit_price
            .to_minor_units()
            .checked_mul(i64::from(self.quantity))
            .ok_or(TotalPriceError::Overflow)?;

        Ok(Money::from_minor(minor, self.unit_price.currency()))
    }
}
