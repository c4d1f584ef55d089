//! Pricing

use rusty_money::{Money, MoneyError, iso::Currency};
use thiserror::Error;

use crate::{items::LineItem, membership::Membership, services::AddOnService};

/// Errors that can occur while calculating totals.
#[derive(Debug, Error, PartialEq)]
pub enum TotalPriceError {
    /// A line total did not fit in minor units.
    #[error("line total overflowed")]
    Overflow,

    /// Wrapped money arithmetic or currency mismatch error.
    #[error(transparent)]
    Money(#[from] MoneyError),
}

/// Sum of `unit price × quantity` over the given line items.
///
/// # Errors
///
/// - [`TotalPriceError::Overflow`]: a line total did not fit in minor units.
/// - [`TotalPriceError::Money`]: wrapped money arithmetic or currency mismatch error.
pub fn total_price<'a>(
    items: &[LineItem<'a>],
    currency: &'a Currency,
) -> Result<Money<'a, Currency>, TotalPriceError> {
    let mut total = Money::from_minor(0, currency);

    for item in items {
        total = total.add(item.line_total()?)?;
    }

    Ok(total)
}

/// Totals derived from the cart state. Never stored; recomputed on demand.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CartTotals<'a> {
    /// Sum of line totals
    pub product_subtotal: Money<'a, Currency>,

    /// Selected services at their standard price
    pub service_subtotal: Money<'a, Currency>,

    /// Membership fee, zero when inactive
    pub membership_fee: Money<'a, Currency>,

    /// Member discount across selected services, zero when inactive
    pub savings: Money<'a, Currency>,

    /// Amount payable
    pub grand_total: Money<'a, Currency>,
}

impl<'a> CartTotals<'a> {
    /// Compute totals for the given cart contents.
    ///
    /// The service subtotal is taken at standard prices and the member discount is reported separately as
    /// `savings`, so that `grand_total = products + services + fee - savings` bills each selected service at its
    /// member price while the membership is active.
    ///
    /// # Errors
    ///
    /// Returns a [`TotalPriceError`] if money arithmetic overflows or currencies are mixed.
    pub fn compute<'s>(
        items: &[LineItem<'a>],
        services: impl IntoIterator<Item = &'s AddOnService<'a>>,
        membership: &Membership<'a>,
        currency: &'a Currency,
    ) -> Result<Self, TotalPriceError>
    where
        'a: 's,
    {
        let product_subtotal = total_price(items, currency)?;

        let mut service_subtotal = Money::from_minor(0, currency);
        let mut savings = Money::from_minor(0, currency);

        for service in services.into_iter().filter(|s| s.is_selected()) {
            service_subtotal = service_subtotal.add(*service.price())?;

            if membership.is_active() {
                savings = savings.add(service.member_discount()?)?;
            }
        }

        let membership_fee = membership.fee_due();

        let grand_total = product_subtotal
            .add(service_subtotal)?
            .add(membership_fee)?
            .sub(savings)?;

        debug_assert!(
            grand_total.to_minor_units() >= 0,
            "grand total must not go negative"
        );

        Ok(Self {
            product_subtotal,
            service_subtotal,
            membership_fee,
            savings,
            grand_total,
        })
    }

    /// Service subtotal after the member discount.
    ///
    /// # Errors
    ///
    /// Returns a [`MoneyError`] if the subtraction fails.
    pub fn billed_services(&self) -> Result<Money<'a, Currency>, MoneyError> {
        self.service_subtotal.sub(self.savings)
    }
}
