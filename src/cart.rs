//! Cart

use jiff::Timestamp;
use rustc_hash::FxHashMap;
use rusty_money::iso::Currency;
use slotmap::SlotMap;
use thiserror::Error;
use tracing::{debug, info};

use crate::{
    catalog::{Catalog, CatalogKind},
    items::{LineItem, LineItemId},
    membership::{Membership, MembershipPlan},
    notices::{Notice, NoticeKind},
    pricing::{CartTotals, TotalPriceError},
    products::Product,
    services::{AddOnService, ServiceKey},
};

pub mod undo;

pub use undo::PendingUndo;

/// Errors related to cart construction.
#[derive(Debug, Error, PartialEq)]
pub enum CartError {
    /// A product or service uses a different currency than the cart (name, its currency, cart currency).
    #[error("{0} has currency {1}, but cart has currency {2}")]
    CurrencyMismatch(String, &'static str, &'static str),
}

/// Result of a quantity change.
#[derive(Debug, Clone, PartialEq)]
pub enum QuantityChange<'a> {
    /// The item is still in the cart with this quantity.
    Updated {
        /// New quantity
        quantity: u32,
    },

    /// The quantity would have dropped below one, so the item was removed.
    Removed(LineItem<'a>),

    /// No line item has that id.
    Missing,
}

/// Session-scoped cart: line items, add-on services and the membership toggle.
///
/// Totals are never stored; [`Cart::totals`] recomputes them from the current state.
#[derive(Debug)]
pub struct Cart<'a> {
    currency: &'a Currency,
    items: Vec<LineItem<'a>>,
    services: SlotMap<ServiceKey, AddOnService<'a>>,
    service_order: Vec<ServiceKey>,
    service_handles: FxHashMap<String, ServiceKey>,
    service_anchor: Option<String>,
    membership: Membership<'a>,
    next_id: u64,
    pending_undo: Option<PendingUndo<'a>>,
    clear_requested: bool,
    notice: Option<Notice>,
}

impl<'a> Cart<'a> {
    /// Create an empty cart with the given membership plan.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::CurrencyMismatch`] if the plan fee uses another currency.
    pub fn new(currency: &'a Currency, plan: MembershipPlan<'a>) -> Result<Self, CartError> {
        check_currency(&plan.name, plan.fee.currency(), currency)?;

        Ok(Self {
            currency,
            items: Vec::new(),
            services: SlotMap::with_key(),
            service_order: Vec::new(),
            service_handles: FxHashMap::default(),
            service_anchor: None,
            membership: Membership::new(plan),
            next_id: 1,
            pending_undo: None,
            clear_requested: false,
            notice: None,
        })
    }

    /// Cart currency
    pub fn currency(&self) -> &'a Currency {
        self.currency
    }

    // Line items

    /// Add a product with quantity one, returning the new line item's id.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::CurrencyMismatch`] if the product is priced in another currency.
    pub fn add_line_item(&mut self, product: &Product<'a>) -> Result<LineItemId, CartError> {
        self.add_line_item_with_quantity(product, 1)
    }

    /// Add a product with a starting quantity (at least one).
    ///
    /// # Errors
    ///
    /// Returns [`CartError::CurrencyMismatch`] if the product is priced in another currency.
    pub fn add_line_item_with_quantity(
        &mut self,
        product: &Product<'a>,
        quantity: u32,
    ) -> Result<LineItemId, CartError> {
        check_currency(&product.name, product.price.currency(), self.currency)?;

        let id = self.next_line_item_id();

        self.push_line_item(LineItem::from_product(id, product).with_quantity(quantity));

        Ok(id)
    }

    /// Add the product stored under `handle` in a catalog.
    ///
    /// Seller products get a `SELLER-<handle>` product code. Returns `Ok(None)` when the handle is unknown.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::CurrencyMismatch`] if the product is priced in another currency.
    pub fn add_from_catalog(
        &mut self,
        catalog: &Catalog<'a>,
        handle: &str,
    ) -> Result<Option<LineItemId>, CartError> {
        let Some(product) = catalog.get(handle) else {
            debug!(handle, catalog = catalog.title(), "catalog handle not found");

            return Ok(None);
        };

        check_currency(&product.name, product.price.currency(), self.currency)?;

        let id = self.next_line_item_id();
        let item = LineItem::from_product(id, product);

        let item = match catalog.kind() {
            CatalogKind::Seller(_) => item.with_code(format!("SELLER-{handle}")),
            CatalogKind::Recommended => item,
        };

        self.push_line_item(item);

        Ok(Some(id))
    }

    fn push_line_item(&mut self, item: LineItem<'a>) {
        info!(item = %item.id(), name = %item.name(), quantity = item.quantity(), "added line item");

        self.items.push(item);
        self.disarm_clear();
    }

    /// Line items in display order
    pub fn line_items(&self) -> &[LineItem<'a>] {
        &self.items
    }

    /// Look up a line item.
    pub fn line_item(&self, id: LineItemId) -> Option<&LineItem<'a>> {
        self.items.iter().find(|item| item.id() == id)
    }

    fn line_item_mut(&mut self, id: LineItemId) -> Option<&mut LineItem<'a>> {
        self.items.iter_mut().find(|item| item.id() == id)
    }

    /// Adjust a quantity by `delta`.
    ///
    /// A result below one removes the item instead (with the same undo window as [`Cart::remove_line_item`]).
    /// Unknown ids are ignored.
    pub fn change_quantity(
        &mut self,
        id: LineItemId,
        delta: i64,
        now: Timestamp,
    ) -> QuantityChange<'a> {
        let Some(item) = self.line_item_mut(id) else {
            debug!(item = %id, delta, "quantity change for unknown line item");

            return QuantityChange::Missing;
        };

        let target = i64::from(item.quantity()).saturating_add(delta);

        if target < 1 {
            return match self.remove_line_item(id, now) {
                Some(snapshot) => QuantityChange::Removed(snapshot),
                None => QuantityChange::Missing,
            };
        }

        let quantity = u32::try_from(target).unwrap_or(u32::MAX);

        item.set_quantity(quantity);
        self.disarm_clear();

        info!(item = %id, quantity, "changed line item quantity");

        QuantityChange::Updated { quantity }
    }

    /// Remove a line item, returning a snapshot of it.
    ///
    /// The snapshot replaces any earlier pending undo and can be restored with [`Cart::undo_removal`] until the
    /// undo window closes. Unknown ids are ignored.
    pub fn remove_line_item(&mut self, id: LineItemId, now: Timestamp) -> Option<LineItem<'a>> {
        let Some(index) = self.items.iter().position(|item| item.id() == id) else {
            debug!(item = %id, "removal of unknown line item");

            return None;
        };

        let removed = self.items.remove(index);

        self.disarm_clear();

        if let Some(previous) = self.pending_undo.as_ref() {
            debug!(item = %previous.snapshot().id(), "discarding earlier pending undo");
        }

        self.pending_undo = Some(PendingUndo::new(removed.clone(), now));
        self.raise(
            NoticeKind::ProductRemoved {
                name: removed.name().to_string(),
            },
            now,
        );

        info!(item = %id, "removed line item");

        Some(removed)
    }

    /// Restore the last removed item if the undo window is still open.
    ///
    /// The item comes back with its original id, price and quantity, at the end of the list.
    pub fn undo_removal(&mut self, now: Timestamp) -> Option<LineItemId> {
        let pending = self.pending_undo.take()?;

        if !pending.is_open(now) {
            debug!(item = %pending.snapshot().id(), "undo window closed");

            return None;
        }

        let snapshot = pending.into_snapshot();
        let id = snapshot.id();

        self.items.push(snapshot);
        self.disarm_clear();

        if self
            .notice
            .as_ref()
            .is_some_and(|notice| notice.kind().offers_undo())
        {
            self.notice = None;
        }

        info!(item = %id, "restored line item");

        Some(id)
    }

    /// The removal that can still be undone at `now`, if any.
    pub fn pending_undo(&self, now: Timestamp) -> Option<&PendingUndo<'a>> {
        self.pending_undo
            .as_ref()
            .filter(|pending| pending.is_open(now))
    }

    // Bulk clear

    /// First phase of clearing the cart. Returns whether a confirmation is now pending.
    ///
    /// An empty cart has nothing to clear, so no confirmation is armed. Any change to the line items before
    /// [`Cart::confirm_clear_all`] withdraws the request.
    pub fn request_clear_all(&mut self) -> bool {
        self.clear_requested = !self.items.is_empty();

        debug!(pending = self.clear_requested, "requested clear all");

        self.clear_requested
    }

    /// Drop a pending clear request.
    pub fn cancel_clear_all(&mut self) {
        self.clear_requested = false;
    }

    /// A confirmation only covers the items that were listed when it was requested.
    fn disarm_clear(&mut self) {
        if self.clear_requested {
            debug!("line items changed, clear request withdrawn");

            self.clear_requested = false;
        }
    }

    /// Whether a clear request is waiting for confirmation
    pub fn is_clear_pending(&self) -> bool {
        self.clear_requested
    }

    /// Second phase of clearing the cart.
    ///
    /// Empties the line items only if a request is pending and returns how many were removed. A confirmed clear
    /// cannot be undone and also discards any pending single-item undo.
    pub fn confirm_clear_all(&mut self) -> usize {
        if !self.clear_requested {
            debug!("clear all confirmed without a request");

            return 0;
        }

        self.clear_requested = false;

        let removed = self.items.len();

        self.items.clear();
        self.pending_undo = None;

        if self
            .notice
            .as_ref()
            .is_some_and(|notice| notice.kind().offers_undo())
        {
            self.notice = None;
        }

        info!(removed, "cleared all line items");

        removed
    }

    // Services

    /// Register a service under a handle. Services keep registration order.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::CurrencyMismatch`] if the service is priced in another currency.
    pub fn add_service(
        &mut self,
        handle: impl Into<String>,
        service: AddOnService<'a>,
    ) -> Result<ServiceKey, CartError> {
        check_currency(service.name(), service.price().currency(), self.currency)?;

        let key = self.services.insert(service);

        self.service_handles.insert(handle.into(), key);
        self.service_order.push(key);

        Ok(key)
    }

    /// Offer services only while a line item with this product code is in the cart.
    pub fn anchor_services(&mut self, product_code: impl Into<String>) {
        self.service_anchor = Some(product_code.into());
    }

    /// Look up a service key by handle.
    pub fn service_key(&self, handle: &str) -> Option<ServiceKey> {
        self.service_handles.get(handle).copied()
    }

    /// Look up a service.
    pub fn service(&self, key: ServiceKey) -> Option<&AddOnService<'a>> {
        self.services.get(key)
    }

    /// Services in registration order
    pub fn services(&self) -> impl Iterator<Item = (ServiceKey, &AddOnService<'a>)> {
        self.service_order
            .iter()
            .filter_map(|key| self.services.get(*key).map(|service| (*key, service)))
    }

    /// Services currently offered, taking the anchor product into account.
    pub fn offered_services(&self) -> impl Iterator<Item = (ServiceKey, &AddOnService<'a>)> {
        let offered = match self.service_anchor.as_deref() {
            Some(code) => self.items.iter().any(|item| item.code() == code),
            None => true,
        };

        self.services().filter(move |_| offered)
    }

    /// Flip a service's selected flag, returning the new value. Unknown keys are ignored.
    pub fn toggle_service(&mut self, key: ServiceKey, now: Timestamp) -> Option<bool> {
        let Some(service) = self.services.get_mut(key) else {
            debug!(?key, "toggle of unknown service");

            return None;
        };

        let was_selected = service.toggle();
        let name = service.name().to_string();

        info!(service = %name, selected = !was_selected, "toggled service");

        let kind = if was_selected {
            NoticeKind::ServiceRemoved { name }
        } else {
            NoticeKind::ServiceAdded { name }
        };

        self.raise(kind, now);

        Some(!was_selected)
    }

    /// Toggle a service by handle. Unknown handles are ignored.
    pub fn toggle_service_by_handle(&mut self, handle: &str, now: Timestamp) -> Option<bool> {
        let key = self.service_key(handle)?;

        self.toggle_service(key, now)
    }

    /// Whether any service is selected
    pub fn has_selected_services(&self) -> bool {
        self.services.values().any(AddOnService::is_selected)
    }

    // Membership

    /// Membership state
    pub fn membership(&self) -> &Membership<'a> {
        &self.membership
    }

    /// Turn the membership on or off. Selected services stay selected either way.
    pub fn set_membership(&mut self, active: bool, now: Timestamp) {
        if !self.membership.set_active(active) {
            debug!(active, "membership unchanged");

            return;
        }

        info!(active, "changed membership");

        let kind = if active {
            NoticeKind::MembershipAdded
        } else {
            NoticeKind::MembershipRemoved
        };

        self.raise(kind, now);
    }

    // Derived values

    /// Recompute totals from the current state.
    ///
    /// # Errors
    ///
    /// Returns a [`TotalPriceError`] if money arithmetic overflows.
    pub fn totals(&self) -> Result<CartTotals<'a>, TotalPriceError> {
        CartTotals::compute(
            &self.items,
            self.services.values(),
            &self.membership,
            self.currency,
        )
    }

    /// Number of entries shown in the cart header: line items plus the membership when active.
    pub fn item_count(&self) -> usize {
        self.items.len() + usize::from(self.membership.is_active())
    }

    /// Whether the cart has no line items
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    // Notices

    /// The notice on screen at `now`, if any.
    pub fn notice(&self, now: Timestamp) -> Option<&Notice> {
        self.notice.as_ref().filter(|notice| notice.is_visible(now))
    }

    /// Drop the notice and pending undo once their windows have closed.
    pub fn expire(&mut self, now: Timestamp) {
        if self
            .notice
            .as_ref()
            .is_some_and(|notice| !notice.is_visible(now))
        {
            self.notice = None;
        }

        if self
            .pending_undo
            .as_ref()
            .is_some_and(|pending| !pending.is_open(now))
        {
            debug!("pending undo expired");

            self.pending_undo = None;
        }
    }

    fn raise(&mut self, kind: NoticeKind, now: Timestamp) {
        self.notice = Some(Notice::new(kind, now));
    }

    fn next_line_item_id(&mut self) -> LineItemId {
        let id = LineItemId::new(self.next_id);

        self.next_id += 1;

        id
    }
}

fn check_currency(
    name: &str,
    found: &Currency,
    expected: &Currency,
) -> Result<(), CartError> {
    if found == expected {
        Ok(())
    } else {
        Err(CartError::CurrencyMismatch(
            name.to_string(),
            found.iso_alpha_code,
            expected.iso_alpha_code,
        ))
    }
}

#[cfg(test)]
mod tests {
    use jiff::SignedDuration;
    use rusty_money::{
        Money,
        iso::{EUR, USD},
    };
    use testresult::TestResult;

    use super::*;
    use crate::{
        catalog::Seller,
        notices::{NOTICE_WINDOW, UNDO_WINDOW},
    };

    fn t0() -> Result<Timestamp, jiff::Error> {
        Timestamp::from_second(1_700_000_000)
    }

    fn cart() -> Result<Cart<'static>, CartError> {
        Cart::new(USD, MembershipPlan::elite(USD))
    }

    fn detergent() -> Product<'static> {
        Product::new("Detergent", "1234567", Money::from_minor(2499, USD))
    }

    fn tv() -> Product<'static> {
        Product::new("TV", "7654321", Money::from_minor(309_900, USD))
    }

    #[test]
    fn add_line_item_assigns_fresh_ids() -> TestResult {
        let mut cart = cart()?;

        let first = cart.add_line_item(&detergent())?;
        let second = cart.add_line_item(&detergent())?;

        assert_ne!(first, second);
        assert_eq!(cart.line_items().len(), 2);
        assert_eq!(cart.line_item(first).map(LineItem::quantity), Some(1));

        Ok(())
    }

    #[test]
    fn add_line_item_rejects_other_currency() -> TestResult {
        let mut cart = cart()?;
        let product = Product::new("Euro thing", "E1", Money::from_minor(100, EUR));

        let result = cart.add_line_item(&product);

        assert_eq!(
            result,
            Err(CartError::CurrencyMismatch(
                "Euro thing".to_string(),
                "EUR",
                "USD"
            ))
        );
        assert!(cart.is_empty());

        Ok(())
    }

    #[test]
    fn increment_and_decrement() -> TestResult {
        let mut cart = cart()?;
        let id = cart.add_line_item(&detergent())?;

        assert_eq!(
            cart.change_quantity(id, 1, t0()?),
            QuantityChange::Updated { quantity: 2 }
        );
        assert_eq!(
            cart.change_quantity(id, -1, t0()?),
            QuantityChange::Updated { quantity: 1 }
        );

        Ok(())
    }

    #[test]
    fn decrement_from_one_removes() -> TestResult {
        let mut cart = cart()?;
        let id = cart.add_line_item(&detergent())?;

        let change = cart.change_quantity(id, -1, t0()?);

        assert!(matches!(change, QuantityChange::Removed(ref item) if item.id() == id));
        assert!(cart.line_item(id).is_none());
        assert!(cart.pending_undo(t0()?).is_some());

        Ok(())
    }

    #[test]
    fn large_negative_delta_removes() -> TestResult {
        let mut cart = cart()?;
        let id = cart.add_line_item_with_quantity(&detergent(), 3)?;

        let change = cart.change_quantity(id, -10, t0()?);

        assert!(matches!(change, QuantityChange::Removed(ref item) if item.quantity() == 3));

        Ok(())
    }

    #[test]
    fn unknown_ids_are_ignored() -> TestResult {
        let mut cart = cart()?;
        let id = cart.add_line_item(&detergent())?;
        let missing = LineItemId::new(999);

        assert_eq!(cart.change_quantity(missing, 1, t0()?), QuantityChange::Missing);
        assert!(cart.remove_line_item(missing, t0()?).is_none());
        assert_eq!(cart.line_items().len(), 1);
        assert_eq!(cart.line_item(id).map(LineItem::quantity), Some(1));
        assert!(cart.notice(t0()?).is_none());

        Ok(())
    }

    #[test]
    fn undo_restores_snapshot_at_end() -> TestResult {
        let mut cart = cart()?;
        let first = cart.add_line_item_with_quantity(&detergent(), 2)?;
        let second = cart.add_line_item(&tv())?;

        let removed = cart.remove_line_item(first, t0()?);
        let restored = cart.undo_removal(t0()?.checked_add(SignedDuration::from_secs(1))?);

        assert_eq!(restored, Some(first));
        assert_eq!(cart.line_items().last(), removed.as_ref());
        assert_eq!(cart.line_items().first().map(LineItem::id), Some(second));
        assert!(cart.notice(t0()?).is_none());

        Ok(())
    }

    #[test]
    fn undo_after_window_fails() -> TestResult {
        let mut cart = cart()?;
        let id = cart.add_line_item(&detergent())?;

        cart.remove_line_item(id, t0()?);

        assert_eq!(cart.undo_removal(t0()?.checked_add(UNDO_WINDOW)?), None);
        assert!(cart.is_empty());

        Ok(())
    }

    #[test]
    fn second_removal_replaces_pending_undo() -> TestResult {
        let mut cart = cart()?;
        let first = cart.add_line_item(&detergent())?;
        let second = cart.add_line_item(&tv())?;

        cart.remove_line_item(first, t0()?);
        cart.remove_line_item(second, t0()?);

        assert_eq!(cart.undo_removal(t0()?), Some(second));
        assert_eq!(cart.undo_removal(t0()?), None);
        assert!(cart.line_item(first).is_none());

        Ok(())
    }

    #[test]
    fn ids_are_not_reused_after_undo() -> TestResult {
        let mut cart = cart()?;
        let first = cart.add_line_item(&detergent())?;

        cart.remove_line_item(first, t0()?);
        let second = cart.add_line_item(&detergent())?;
        cart.undo_removal(t0()?);

        assert_ne!(first, second);
        assert_eq!(cart.line_items().len(), 2);

        Ok(())
    }

    #[test]
    fn confirm_without_request_is_noop() -> TestResult {
        let mut cart = cart()?;
        cart.add_line_item(&detergent())?;

        assert_eq!(cart.confirm_clear_all(), 0);
        assert_eq!(cart.line_items().len(), 1);

        Ok(())
    }

    #[test]
    fn cancelled_clear_keeps_items() -> TestResult {
        let mut cart = cart()?;
        cart.add_line_item(&detergent())?;

        assert!(cart.request_clear_all());
        cart.cancel_clear_all();

        assert_eq!(cart.confirm_clear_all(), 0);
        assert_eq!(cart.line_items().len(), 1);

        Ok(())
    }

    #[test]
    fn confirmed_clear_empties_and_drops_undo() -> TestResult {
        let mut cart = cart()?;
        let first = cart.add_line_item(&detergent())?;
        cart.add_line_item(&tv())?;
        cart.add_line_item(&tv())?;

        cart.remove_line_item(first, t0()?);

        assert!(cart.request_clear_all());
        assert_eq!(cart.confirm_clear_all(), 2);
        assert!(cart.is_empty());
        assert!(!cart.is_clear_pending());
        assert_eq!(cart.undo_removal(t0()?), None);
        assert_eq!(cart.totals()?.product_subtotal, Money::from_minor(0, USD));

        Ok(())
    }

    #[test]
    fn clear_request_is_withdrawn_when_items_change() -> TestResult {
        let mut cart = cart()?;
        let first = cart.add_line_item(&detergent())?;
        cart.add_line_item(&tv())?;

        assert!(cart.request_clear_all());
        cart.add_line_item(&tv())?;

        assert!(!cart.is_clear_pending());
        assert_eq!(cart.confirm_clear_all(), 0);
        assert_eq!(cart.line_items().len(), 3);

        assert!(cart.request_clear_all());
        cart.change_quantity(first, 1, t0()?);

        assert_eq!(cart.confirm_clear_all(), 0);

        assert!(cart.request_clear_all());
        cart.remove_line_item(first, t0()?);

        assert_eq!(cart.confirm_clear_all(), 0);

        assert!(cart.request_clear_all());
        cart.undo_removal(t0()?);

        assert_eq!(cart.confirm_clear_all(), 0);
        assert_eq!(cart.line_items().len(), 3);

        assert!(cart.request_clear_all());
        assert_eq!(cart.confirm_clear_all(), 3);

        Ok(())
    }

    #[test]
    fn request_on_empty_cart_is_not_armed() -> TestResult {
        let mut cart = cart()?;

        assert!(!cart.request_clear_all());
        assert!(!cart.is_clear_pending());

        Ok(())
    }

    #[test]
    fn toggle_service_raises_notice() -> TestResult {
        let mut cart = cart()?;
        let key = cart.add_service(
            "pixelguard",
            AddOnService::new(
                "PixelGuard Protection",
                Money::from_minor(5999, USD),
                Money::from_minor(2499, USD),
            )?,
        )?;

        assert_eq!(cart.toggle_service(key, t0()?), Some(true));
        assert_eq!(
            cart.notice(t0()?).map(Notice::kind),
            Some(&NoticeKind::ServiceAdded {
                name: "PixelGuard Protection".to_string()
            })
        );

        assert_eq!(cart.toggle_service_by_handle("pixelguard", t0()?), Some(false));
        assert_eq!(
            cart.notice(t0()?).map(Notice::kind),
            Some(&NoticeKind::ServiceRemoved {
                name: "PixelGuard Protection".to_string()
            })
        );
        assert!(cart.notice(t0()?.checked_add(NOTICE_WINDOW)?).is_none());

        Ok(())
    }

    #[test]
    fn toggle_unknown_service_is_ignored() -> TestResult {
        let mut cart = cart()?;

        assert_eq!(cart.toggle_service_by_handle("missing", t0()?), None);
        assert!(cart.notice(t0()?).is_none());

        Ok(())
    }

    #[test]
    fn services_are_offered_only_with_anchor_product() -> TestResult {
        let mut cart = cart()?;
        cart.add_service(
            "mount",
            AddOnService::new(
                "ProMount & Install",
                Money::from_minor(4099, USD),
                Money::from_minor(4099, USD),
            )?,
        )?;
        cart.anchor_services("7654321");

        assert_eq!(cart.offered_services().count(), 0);

        cart.add_line_item(&tv())?;

        assert_eq!(cart.offered_services().count(), 1);

        Ok(())
    }

    #[test]
    fn membership_toggle_keeps_services_selected() -> TestResult {
        let mut cart = cart()?;
        let key = cart.add_service(
            "smartstart",
            AddOnService::new(
                "SmartStart Calibration",
                Money::from_minor(29999, USD),
                Money::from_minor(14999, USD),
            )?,
        )?;

        cart.toggle_service(key, t0()?);
        cart.set_membership(true, t0()?);

        assert_eq!(cart.item_count(), 1);
        assert_eq!(
            cart.notice(t0()?).map(Notice::kind),
            Some(&NoticeKind::MembershipAdded)
        );

        cart.set_membership(false, t0()?);

        assert_eq!(cart.service(key).map(AddOnService::is_selected), Some(true));
        assert_eq!(cart.totals()?.savings, Money::from_minor(0, USD));
        assert_eq!(cart.item_count(), 0);

        Ok(())
    }

    #[test]
    fn seller_products_get_seller_code() -> TestResult {
        let mut cart = cart()?;
        let mut catalog = Catalog::new(
            "Products from Clean House",
            CatalogKind::Seller(Seller {
                name: "Clean House".to_string(),
                rating: None,
                verified: true,
            }),
        );
        catalog.insert("3", Product::new("Vacuum", "V", Money::from_minor(29999, USD)));

        let id = cart.add_from_catalog(&catalog, "3")?;

        assert_eq!(
            id.and_then(|id| cart.line_item(id)).map(LineItem::code),
            Some("SELLER-3")
        );
        assert_eq!(cart.add_from_catalog(&catalog, "missing")?, None);

        Ok(())
    }

    #[test]
    fn expire_drops_stale_state() -> TestResult {
        let mut cart = cart()?;
        let id = cart.add_line_item(&detergent())?;

        cart.remove_line_item(id, t0()?);
        cart.expire(t0()?.checked_add(UNDO_WINDOW)?);

        assert!(cart.pending_undo(t0()?).is_none());
        assert!(cart.notice(t0()?).is_none());

        Ok(())
    }
}
