//! Add-on services

use decimal_percentage::Percentage;
use rust_decimal::Decimal;
use rusty_money::{Money, MoneyError, iso::Currency};
use slotmap::new_key_type;
use smallvec::SmallVec;
use thiserror::Error;

new_key_type! {
    /// Service Key
    pub struct ServiceKey;
}

/// Errors raised while building a service.
#[derive(Debug, Error, PartialEq)]
pub enum ServiceError {
    /// The member price is higher than the standard price (service name).
    #[error("Service {0} has a member price above its standard price")]
    MemberPriceAboveStandard(String),

    /// Standard and member prices use different currencies (service name).
    #[error("Service {0} mixes currencies between standard and member price")]
    CurrencyMismatch(String),
}

/// Descriptive fields shown in the service details drawer.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ServiceDetails {
    /// Long description
    pub description: Option<String>,

    /// Bullet list of what the service includes
    pub bullets: SmallVec<[String; 6]>,

    /// Image reference
    pub image: Option<String>,
}

/// An optional extra charge with a standard and a member price.
#[derive(Debug, Clone, PartialEq)]
pub struct AddOnService<'a> {
    name: String,
    price: Money<'a, Currency>,
    member_price: Money<'a, Currency>,
    selected: bool,
    details: ServiceDetails,
}

impl<'a> AddOnService<'a> {
    /// Create an unselected service.
    ///
    /// # Errors
    ///
    /// - [`ServiceError::MemberPriceAboveStandard`]: the member price exceeds the standard price.
    /// - [`ServiceError::CurrencyMismatch`]: the two prices use different currencies.
    pub fn new(
        name: impl Into<String>,
        price: Money<'a, Currency>,
        member_price: Money<'a, Currency>,
    ) -> Result<Self, ServiceError> {
        let name = name.into();

        if price.currency() != member_price.currency() {
            return Err(ServiceError::CurrencyMismatch(name));
        }

        if member_price.to_minor_units() > price.to_minor_units() {
            return Err(ServiceError::MemberPriceAboveStandard(name));
        }

        Ok(Self {
            name,
            price,
            member_price,
            selected: false,
            details: ServiceDetails::default(),
        })
    }

    /// Attach descriptive details.
    #[must_use]
    pub fn with_details(mut self, details: ServiceDetails) -> Self {
        self.details = details;
        self
    }

    /// Service name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Standard price
    pub fn price(&self) -> &Money<'a, Currency> {
        &self.price
    }

    /// Discounted price for members
    pub fn member_price(&self) -> &Money<'a, Currency> {
        &self.member_price
    }

    /// Whether the service is selected
    pub fn is_selected(&self) -> bool {
        self.selected
    }

    /// Descriptive details
    pub fn details(&self) -> &ServiceDetails {
        &self.details
    }

    /// Flips the selected flag, returning the value it had before.
    pub(crate) fn toggle(&mut self) -> bool {
        let was_selected = self.selected;

        self.selected = !was_selected;

        was_selected
    }

    /// Whether members pay less than the standard price.
    pub fn has_member_pricing(&self) -> bool {
        self.member_price.to_minor_units() < self.price.to_minor_units()
    }

    /// Price billed for this service given the membership state.
    pub fn effective_price(&self, member: bool) -> Money<'a, Currency> {
        if member {
            self.member_price
        } else {
            self.price
        }
    }

    /// Difference between standard and member price.
    ///
    /// # Errors
    ///
    /// Returns a [`MoneyError`] if the subtraction fails.
    pub fn member_discount(&self) -> Result<Money<'a, Currency>, MoneyError> {
        self.price.sub(self.member_price)
    }

    /// Member discount as a fraction of the standard price.
    ///
    /// # Errors
    ///
    /// Returns a [`MoneyError`] if the subtraction fails.
    pub fn member_discount_percent(&self) -> Result<Percentage, MoneyError> {
        let discount_minor = self.member_discount()?.to_minor_units();
        let price_minor = self.price.to_minor_units();

        if price_minor == 0 {
            return Ok(Percentage::from(0.0));
        }

        Ok(Percentage::from(
            Decimal::from(discount_minor) / Decimal::from(price_minor),
        ))
    }
}
