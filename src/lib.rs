//! Clever Commerce
//!
//! Clever Commerce is the pricing engine behind a retail shopping cart: line items, optional add-on services with
//! member prices, a paid membership that unlocks those prices, and the totals derived from all three.

pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod fixtures;
pub mod items;
pub mod membership;
pub mod notices;
pub mod prelude;
pub mod pricing;
pub mod products;
pub mod services;
pub mod summary;
pub mod utils;
