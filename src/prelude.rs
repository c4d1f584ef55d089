//! Clever Commerce prelude.
//!
//! Convenience exports for common library consumers.

pub use crate::{
    cart::{Cart, CartError, PendingUndo, QuantityChange},
    catalog::{Catalog, CatalogKind, Seller},
    checkout::CheckoutOutcome,
    items::{LineItem, LineItemId},
    membership::{Membership, MembershipPlan},
    notices::{NOTICE_WINDOW, Notice, NoticeKind, UNDO_WINDOW},
    pricing::{CartTotals, TotalPriceError},
    products::{Product, ProductKey, Rating, StarBreakdown},
    services::{AddOnService, ServiceDetails, ServiceError, ServiceKey},
    summary::{Summary, SummaryError},
};
