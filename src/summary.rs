//! Summary
//!
//! Terminal rendering of the cart contents and the order summary card.

use std::{io, iter};

use rusty_money::{Money, MoneyError, iso::Currency};
use tabled::{
    builder::Builder,
    settings::{
        Alignment, Style,
        object::{Columns, Rows},
    },
};
use thiserror::Error;

use crate::{
    cart::Cart,
    catalog::Catalog,
    membership::Membership,
    pricing::TotalPriceError,
    products::{Rating, StarBreakdown},
    services::AddOnService,
};

/// Errors that can occur while rendering a summary.
#[derive(Debug, Error)]
pub enum SummaryError {
    /// Error calculating the totals.
    #[error(transparent)]
    TotalPrice(#[from] TotalPriceError),

    /// Wrapper for money errors.
    #[error(transparent)]
    Money(#[from] MoneyError),

    /// IO error
    #[error("IO error")]
    IO,
}

/// One labelled row of the summary card.
#[derive(Debug, Clone, PartialEq)]
pub struct SummaryRow<'a> {
    /// Row label
    pub label: String,

    /// Amount shown; savings are negative
    pub amount: Money<'a, Currency>,
}

/// The order summary card: only the rows that apply to the current state, then the total.
#[derive(Debug, Clone, PartialEq)]
pub struct Summary<'a> {
    rows: Vec<SummaryRow<'a>>,
    total: Money<'a, Currency>,
}

impl<'a> Summary<'a> {
    /// Build the summary for a cart.
    ///
    /// The service row only appears when services are selected, the membership row only while active, and the
    /// savings row only while active with a non-zero discount.
    ///
    /// # Errors
    ///
    /// Returns a [`SummaryError`] if the totals cannot be computed.
    pub fn from_cart(cart: &Cart<'a>) -> Result<Self, SummaryError> {
        let totals = cart.totals()?;
        let membership = cart.membership();

        let mut rows = vec![SummaryRow {
            label: "Product value".to_string(),
            amount: totals.product_subtotal,
        }];

        if totals.service_subtotal.to_minor_units() > 0 {
            rows.push(SummaryRow {
                label: "Service value".to_string(),
                amount: totals.service_subtotal,
            });
        }

        if membership.is_active() {
            rows.push(SummaryRow {
                label: membership.plan().name.clone(),
                amount: totals.membership_fee,
            });

            if totals.savings.to_minor_units() > 0 {
                let zero = Money::from_minor(0, cart.currency());

                rows.push(SummaryRow {
                    label: format!("Savings with {}", membership.plan().name),
                    amount: zero.sub(totals.savings)?,
                });
            }
        }

        Ok(Self {
            rows,
            total: totals.grand_total,
        })
    }

    /// Rows above the total
    pub fn rows(&self) -> &[SummaryRow<'a>] {
        &self.rows
    }

    /// Grand total
    pub fn total(&self) -> Money<'a, Currency> {
        self.total
    }

    /// Write the cart lines and the summary card.
    ///
    /// # Errors
    ///
    /// Returns a [`SummaryError`] if a line total cannot be computed or the output cannot be written.
    pub fn write_to(&self, out: &mut impl io::Write, cart: &Cart<'_>) -> Result<(), SummaryError> {
        writeln!(out, "\nShopping Cart ({})", cart.item_count()).map_err(|_err| SummaryError::IO)?;

        if cart.is_empty() {
            writeln!(out, "Your cart is empty").map_err(|_err| SummaryError::IO)?;
        } else {
            write_line_items(out, cart)?;
        }

        write_services(out, cart)?;

        let mut builder = Builder::default();

        for row in &self.rows {
            builder.push_record([row.label.clone(), format!("{}", row.amount)]);
        }

        builder.push_record(["Total".to_string(), format!("{}", self.total)]);

        let mut table = builder.build();

        table.with(Style::rounded());
        table.modify(Columns::new(1..2), Alignment::right());

        writeln!(out, "{table}").map_err(|_err| SummaryError::IO)
    }
}

fn write_line_items(out: &mut impl io::Write, cart: &Cart<'_>) -> Result<(), SummaryError> {
    let mut builder = Builder::default();

    builder.push_record(["Id", "Product", "Code", "Qty", "Price"]);

    for item in cart.line_items() {
        let availability = if item.is_available() { "" } else { " (unavailable)" };

        builder.push_record([
            item.id().to_string(),
            format!("{}{availability}", item.name()),
            item.code().to_string(),
            item.quantity().to_string(),
            format!("{}", item.line_total()?),
        ]);
    }

    let mut table = builder.build();

    table.with(Style::modern_rounded());
    table.modify(Columns::new(3..5), Alignment::right());

    writeln!(out, "{table}").map_err(|_err| SummaryError::IO)
}

fn write_services(out: &mut impl io::Write, cart: &Cart<'_>) -> Result<(), SummaryError> {
    let member = cart.membership().is_active();
    let mut builder = Builder::default();
    let mut any = false;

    builder.push_record(["", "Service", "Price"]);

    for (_, service) in cart.offered_services() {
        any = true;

        let check = if service.is_selected() { "[x]" } else { "[ ]" };

        let price = if !service.has_member_pricing() {
            format!("{}", service.price())
        } else if member {
            format!("{} (was {})", service.member_price(), service.price())
        } else {
            format!(
                "{} or {} with {}",
                service.price(),
                service.member_price(),
                cart.membership().plan().name
            )
        };

        builder.push_record([check.to_string(), service.name().to_string(), price]);
    }

    if !any {
        return Ok(());
    }

    let mut table = builder.build();

    table.with(Style::modern_rounded());
    table.modify(Rows::first(), Alignment::center());

    writeln!(out, "{table}").map_err(|_err| SummaryError::IO)
}

/// Draw a rating as stars followed by the average, e.g. `★★★★½ 4.5`.
pub fn stars(rating: &Rating) -> String {
    let StarBreakdown { full, half, empty } = rating.star_breakdown();

    let glyphs: String = iter::repeat_n('★', usize::from(full))
        .chain(half.then_some('½'))
        .chain(iter::repeat_n('☆', usize::from(empty)))
        .collect();

    format!("{glyphs} {}", rating.stars())
}

/// Write a catalog listing, with the seller profile for seller catalogs.
///
/// # Errors
///
/// Returns [`SummaryError::IO`] if the output cannot be written.
pub fn write_catalog(out: &mut impl io::Write, catalog: &Catalog<'_>) -> Result<(), SummaryError> {
    writeln!(out, "\n{}", catalog.title()).map_err(|_err| SummaryError::IO)?;

    if let Some(seller) = catalog.seller() {
        let rating = seller
            .rating
            .map(|rating| format!(" {}", stars(&rating)))
            .unwrap_or_default();
        let badge = if seller.verified { " (verified seller)" } else { "" };

        writeln!(out, "{}{rating}{badge}", seller.name).map_err(|_err| SummaryError::IO)?;
    }

    let mut builder = Builder::default();

    builder.push_record(["Handle", "Product", "Code", "Price", "Rating"]);

    for (handle, product) in catalog.iter() {
        let availability = if product.available { "" } else { " (unavailable)" };
        let rating = product
            .rating
            .map(|rating| format!("{} ({})", stars(&rating), rating.reviews()))
            .unwrap_or_default();

        builder.push_record([
            handle.to_string(),
            format!("{}{availability}", product.name),
            product.code.clone(),
            format!("{}", product.price),
            rating,
        ]);
    }

    let mut table = builder.build();

    table.with(Style::modern_rounded());
    table.modify(Columns::new(3..4), Alignment::right());

    writeln!(out, "{table}").map_err(|_err| SummaryError::IO)
}

/// Write the details drawer for a service: prices, description and what it includes.
///
/// # Errors
///
/// Returns a [`SummaryError`] if the member discount cannot be computed or the output cannot be written.
pub fn write_service_details(
    out: &mut impl io::Write,
    service: &AddOnService<'_>,
    membership: &Membership<'_>,
) -> Result<(), SummaryError> {
    let selected = if service.is_selected() { " (in cart)" } else { "" };

    writeln!(out, "\n{}{selected}", service.name()).map_err(|_err| SummaryError::IO)?;

    if service.has_member_pricing() {
        writeln!(
            out,
            "{} or {} with {} (save {})",
            service.price(),
            service.member_price(),
            membership.plan().name,
            service.member_discount()?
        )
        .map_err(|_err| SummaryError::IO)?;
    } else {
        writeln!(out, "{}", service.price()).map_err(|_err| SummaryError::IO)?;
    }

    let details = service.details();

    if let Some(description) = &details.description {
        writeln!(out, "{description}").map_err(|_err| SummaryError::IO)?;
    }

    for bullet in &details.bullets {
        writeln!(out, "  - {bullet}").map_err(|_err| SummaryError::IO)?;
    }

    Ok(())
}
