//! Checkout

use rusty_money::{Money, iso::Currency};
use tracing::info;

use crate::{
    cart::Cart,
    pricing::{CartTotals, TotalPriceError},
};

/// What happens when the shopper proceeds to checkout.
#[derive(Debug, Clone, PartialEq)]
pub enum CheckoutOutcome<'a> {
    /// There is nothing to check out.
    EmptyCart,

    /// Services are selected without a membership: offer the membership first.
    OfferMembership {
        /// What the membership would knock off the selected services
        potential_savings: Money<'a, Currency>,
    },

    /// Go ahead with these totals.
    Proceed(CartTotals<'a>),
}

impl<'a> Cart<'a> {
    /// Decide the checkout step for the current state.
    ///
    /// # Errors
    ///
    /// Returns a [`TotalPriceError`] if the totals cannot be computed.
    pub fn checkout(&self) -> Result<CheckoutOutcome<'a>, TotalPriceError> {
        if self.is_empty() {
            return Ok(CheckoutOutcome::EmptyCart);
        }

        if !self.membership().is_active() && self.has_selected_services() {
            let mut potential_savings = Money::from_minor(0, self.currency());

            for (_, service) in self.services().filter(|(_, s)| s.is_selected()) {
                potential_savings = potential_savings.add(service.member_discount()?)?;
            }

            info!(%potential_savings, "offering membership before checkout");

            return Ok(CheckoutOutcome::OfferMembership { potential_savings });
        }

        let totals = self.totals()?;

        info!(total = %totals.grand_total, "proceeding to checkout");

        Ok(CheckoutOutcome::Proceed(totals))
    }
}
