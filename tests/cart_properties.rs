//! Behavioural properties of the cart that must hold for any sequence of shopper actions.

use jiff::{SignedDuration, Timestamp};
use proptest::{collection::vec, prelude::*, test_runner::TestCaseError};
use rusty_money::{Money, iso::USD};
use testresult::TestResult;

use clever_commerce::{fixtures::Fixture, prelude::*};

fn t0() -> Result<Timestamp, jiff::Error> {
    Timestamp::from_second(1_700_000_000)
}

fn cart() -> Result<Cart<'static>, CartError> {
    Cart::new(USD, MembershipPlan::elite(USD))
}

fn product(name: &str, minor: i64) -> Product<'static> {
    Product::new(name, name.to_uppercase(), Money::from_minor(minor, USD))
}

fn expected_subtotal(cart: &Cart<'_>) -> i64 {
    cart.line_items()
        .iter()
        .map(|item| item.unit_price().to_minor_units() * i64::from(item.quantity()))
        .sum()
}

#[test]
fn quantities_never_reach_zero() -> TestResult {
    let mut cart = cart()?;
    let id = cart.add_line_item_with_quantity(&product("kettle", 3999), 3)?;

    for _ in 0..5 {
        cart.change_quantity(id, -1, t0()?);

        assert!(cart.line_items().iter().all(|item| item.quantity() >= 1));
    }

    assert!(cart.line_item(id).is_none());
    assert_eq!(cart.change_quantity(id, -1, t0()?), QuantityChange::Missing);

    Ok(())
}

#[test]
fn product_subtotal_is_exact_sum() -> TestResult {
    let mut cart = cart()?;
    let now = t0()?;

    let kettle = cart.add_line_item(&product("kettle", 3999))?;
    let toaster = cart.add_line_item_with_quantity(&product("toaster", 2499), 2)?;
    let lamp = cart.add_line_item(&product("lamp", 1))?;

    let steps: [(LineItemId, i64); 6] = [
        (kettle, 4),
        (toaster, -1),
        (lamp, 10),
        (kettle, -2),
        (toaster, -1),
        (lamp, -3),
    ];

    for (id, delta) in steps {
        cart.change_quantity(id, delta, now);

        assert_eq!(
            cart.totals()?.product_subtotal.to_minor_units(),
            expected_subtotal(&cart)
        );
    }

    cart.remove_line_item(kettle, now);

    assert_eq!(
        cart.totals()?.product_subtotal,
        Money::from_minor(expected_subtotal(&cart), USD)
    );
    assert_eq!(cart.totals()?.product_subtotal, Money::from_minor(8, USD));

    Ok(())
}

#[test]
fn undo_restores_identical_item() -> TestResult {
    let mut cart = cart()?;
    let id = cart.add_line_item_with_quantity(&product("kettle", 3999), 4)?;
    let before = cart.line_item(id).cloned();

    cart.remove_line_item(id, t0()?);

    let later = t0()?.checked_add(SignedDuration::from_millis(4_999))?;

    assert_eq!(cart.undo_removal(later), Some(id));
    assert_eq!(cart.line_item(id).cloned(), before);

    Ok(())
}

#[test]
fn second_removal_loses_first() -> TestResult {
    let mut cart = cart()?;
    let first = cart.add_line_item(&product("kettle", 3999))?;
    let second = cart.add_line_item(&product("toaster", 2499))?;

    cart.remove_line_item(first, t0()?);
    cart.remove_line_item(second, t0()?);

    assert_eq!(
        cart.pending_undo(t0()?).map(|pending| pending.snapshot().id()),
        Some(second)
    );
    assert_eq!(cart.undo_removal(t0()?), Some(second));
    assert!(cart.line_item(first).is_none());

    Ok(())
}

#[test]
fn toggling_twice_is_a_no_op() -> TestResult {
    let mut cart = cart()?;
    let key = cart.add_service(
        "pixelguard",
        AddOnService::new(
            "PixelGuard Protection",
            Money::from_minor(5999, USD),
            Money::from_minor(2499, USD),
        )?,
    )?;

    let before = cart.totals()?.service_subtotal;

    cart.toggle_service(key, t0()?);
    cart.toggle_service(key, t0()?);

    assert_eq!(cart.service(key).map(AddOnService::is_selected), Some(false));
    assert_eq!(cart.totals()?.service_subtotal, before);

    Ok(())
}

#[test]
fn membership_changes_total_by_savings_less_fee() -> TestResult {
    let mut cart = cart()?;

    cart.add_line_item(&product("tv", 309_900))?;
    cart.add_service(
        "smartstart",
        AddOnService::new(
            "SmartStart Calibration",
            Money::from_minor(29999, USD),
            Money::from_minor(14999, USD),
        )?,
    )?;
    cart.toggle_service_by_handle("smartstart", t0()?);

    let non_member = cart.totals()?;

    cart.set_membership(true, t0()?);

    let member = cart.totals()?;

    assert_eq!(member.savings, Money::from_minor(15000, USD));
    assert_eq!(
        member.grand_total.to_minor_units() - non_member.grand_total.to_minor_units(),
        -10001
    );

    Ok(())
}

#[test]
fn clear_requires_confirmation() -> TestResult {
    let mut cart = cart()?;

    cart.add_line_item(&product("kettle", 3999))?;
    cart.add_line_item(&product("toaster", 2499))?;

    assert_eq!(cart.confirm_clear_all(), 0);
    assert_eq!(cart.line_items().len(), 2);

    cart.request_clear_all();

    assert_eq!(cart.confirm_clear_all(), 2);
    assert!(cart.is_empty());
    assert_eq!(cart.totals()?.product_subtotal, Money::from_minor(0, USD));

    Ok(())
}

#[test]
fn unknown_identifiers_never_change_state() -> TestResult {
    let mut cart = cart()?;
    let id = cart.add_line_item_with_quantity(&product("kettle", 3999), 2)?;
    let before = cart.totals()?;
    let missing = LineItemId::new(42);

    cart.change_quantity(missing, -1, t0()?);
    cart.remove_line_item(missing, t0()?);
    cart.toggle_service_by_handle("missing", t0()?);

    assert_eq!(cart.undo_removal(t0()?), None);
    assert_eq!(cart.totals()?, before);
    assert_eq!(cart.line_item(id).map(LineItem::quantity), Some(2));

    Ok(())
}

/// One shopper interaction in a generated session.
#[derive(Debug, Clone)]
enum Step {
    Add(usize),
    AddFromSeller(usize),
    Quantity(u64, i64),
    Remove(u64),
    Undo,
    Toggle(usize),
    Membership(bool),
    Clear,
    Confirm,
    Cancel,
    Wait(i64),
}

const RECOMMENDED: [&str; 6] = ["rec-1", "rec-2", "rec-3", "rec-4", "rec-5", "rec-6"];
const SELLER: [&str; 6] = ["1", "2", "3", "4", "5", "6"];
const SERVICES: [&str; 3] = ["smartstart", "pixelguard", "promount"];

fn step() -> impl Strategy<Value = Step> {
    prop_oneof![
        (0..RECOMMENDED.len()).prop_map(Step::Add),
        (0..SELLER.len()).prop_map(Step::AddFromSeller),
        (1u64..12, -3i64..=3).prop_map(|(id, delta)| Step::Quantity(id, delta)),
        (1u64..12).prop_map(Step::Remove),
        Just(Step::Undo),
        (0..SERVICES.len()).prop_map(Step::Toggle),
        any::<bool>().prop_map(Step::Membership),
        Just(Step::Clear),
        Just(Step::Confirm),
        Just(Step::Cancel),
        (0i64..8).prop_map(Step::Wait),
    ]
}

/// Replay a session over the shipped fixture set, checking the cart after every step.
fn replay(steps: &[Step]) -> TestResult {
    let fixture = Fixture::from_set("clever-commerce")?;
    let recommended = fixture.recommended().ok_or("no recommendations")?;
    let seller = fixture.catalog("clean-house")?;

    let mut cart = fixture.cart()?;
    let mut now = t0()?;

    for step in steps {
        match step {
            Step::Add(index) => {
                if let Some(handle) = RECOMMENDED.get(*index) {
                    cart.add_from_catalog(recommended, handle)?;
                }
            }
            Step::AddFromSeller(index) => {
                if let Some(handle) = SELLER.get(*index) {
                    cart.add_from_catalog(seller, handle)?;
                }
            }
            Step::Quantity(id, delta) => {
                cart.change_quantity(LineItemId::new(*id), *delta, now);
            }
            Step::Remove(id) => {
                cart.remove_line_item(LineItemId::new(*id), now);
            }
            Step::Undo => {
                cart.undo_removal(now);
            }
            Step::Toggle(index) => {
                if let Some(handle) = SERVICES.get(*index) {
                    cart.toggle_service_by_handle(handle, now);
                }
            }
            Step::Membership(active) => cart.set_membership(*active, now),
            Step::Clear => {
                cart.request_clear_all();
            }
            Step::Confirm => {
                let armed = cart.is_clear_pending();
                let listed = cart.line_items().len();

                assert_eq!(
                    cart.confirm_clear_all(),
                    if armed { listed } else { 0 },
                    "confirm removes exactly the listed items, and only when armed"
                );
            }
            Step::Cancel => cart.cancel_clear_all(),
            Step::Wait(seconds) => now = now.checked_add(SignedDuration::from_secs(*seconds))?,
        }

        cart.expire(now);

        let totals = cart.totals()?;

        assert!(
            totals.grand_total.to_minor_units() >= 0,
            "grand total went negative after {step:?}"
        );
        assert!(
            cart.line_items().iter().all(|item| item.quantity() >= 1),
            "a line item reached quantity zero after {step:?}"
        );
        assert_eq!(
            totals.product_subtotal.to_minor_units(),
            expected_subtotal(&cart),
            "product subtotal drifted after {step:?}"
        );

        let mut ids: Vec<LineItemId> = cart.line_items().iter().map(LineItem::id).collect();

        ids.sort_unstable();
        ids.dedup();

        assert_eq!(
            ids.len(),
            cart.line_items().len(),
            "duplicate line item ids after {step:?}"
        );
    }

    Ok(())
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 128,
        .. ProptestConfig::default()
    })]

    #[test]
    fn any_session_keeps_cart_consistent(steps in vec(step(), 1..60)) {
        replay(&steps).map_err(|err| TestCaseError::fail(format!("{err:?}")))?;
    }
}
