//! Clever Commerce
//!
//! Replays a script of shopper actions against a cart built from a fixture set, then prints the cart and its
//! order summary.
//!
//! Use `-f` to load a fixture set by name
//! Use `-p` to point at a different fixture directory
//! Pass actions as trailing arguments, e.g. `add:rec-2 inc:product-1 toggle:smartstart member:on checkout`
//! Use `browse:<catalog>` and `details:<service>` to list a catalog or a service's details

use std::io;

use anyhow::Result;
use clap::Parser;
use jiff::{SignedDuration, Timestamp};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use clever_commerce::{
    cart::Cart,
    checkout::CheckoutOutcome,
    fixtures::Fixture,
    summary::{Summary, write_catalog, write_service_details},
    utils::{Action, CartArgs},
};

/// Clever Commerce entry point
#[expect(clippy::print_stdout, reason = "Command line output to user")]
pub fn main() -> Result<()> {
    let args = CartArgs::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&args.log_level)),
        )
        .init();

    let fixture = Fixture::from_set_in(&args.path, &args.fixture)?;
    let mut cart = fixture.cart()?;
    let mut now = Timestamp::now();

    info!(fixture = %args.fixture, actions = args.actions.len(), "starting session");

    for action in &args.actions {
        if let Some(message) = apply(&fixture, &mut cart, action, &mut now)? {
            println!("{message}");
        }

        cart.expire(now);

        if let Some(notice) = cart.notice(now) {
            let hint = if notice.kind().offers_undo() { " [undo]" } else { "" };

            println!("> {}{hint}", notice.kind());
        }
    }

    let stdout = io::stdout();
    let mut handle = stdout.lock();

    Summary::from_cart(&cart)?.write_to(&mut handle, &cart)?;

    Ok(())
}

/// Apply one action, returning a line to show when the action has a visible outcome of its own.
fn apply<'a>(
    fixture: &Fixture<'a>,
    cart: &mut Cart<'a>,
    action: &Action,
    now: &mut Timestamp,
) -> Result<Option<String>> {
    let message = match action {
        Action::Add(handle) => match fixture.find_product(handle) {
            Some(catalog) => {
                cart.add_from_catalog(catalog, handle)?;

                None
            }
            None => Some(format!("No product with handle {handle}")),
        },
        Action::AddFromSeller { catalog, handle } => {
            let catalog = fixture.catalog(catalog)?;

            cart.add_from_catalog(catalog, handle)?
                .is_none()
                .then(|| format!("No product {handle} in {}", catalog.title()))
        }
        Action::Quantity(id, delta) => {
            cart.change_quantity(*id, *delta, *now);

            None
        }
        Action::Remove(id) => {
            cart.remove_line_item(*id, *now);

            None
        }
        Action::Undo => cart
            .undo_removal(*now)
            .is_none()
            .then(|| "Nothing to undo".to_string()),
        Action::Toggle(handle) => cart
            .toggle_service_by_handle(handle, *now)
            .is_none()
            .then(|| format!("No service with handle {handle}")),
        Action::Membership(active) => {
            cart.set_membership(*active, *now);

            None
        }
        Action::Clear => cart
            .request_clear_all()
            .then(|| "Remove all items? (confirm / cancel)".to_string()),
        Action::Confirm => {
            let removed = cart.confirm_clear_all();

            (removed > 0).then(|| format!("Removed {removed} items"))
        }
        Action::Cancel => {
            cart.cancel_clear_all();

            None
        }
        Action::Checkout => Some(match cart.checkout()? {
            CheckoutOutcome::EmptyCart => "Your cart is empty".to_string(),
            CheckoutOutcome::OfferMembership { potential_savings } => format!(
                "Join {} and save {potential_savings} on your services",
                cart.membership().plan().name
            ),
            CheckoutOutcome::Proceed(totals) => {
                format!("Proceeding to checkout: {}", totals.grand_total)
            }
        }),
        Action::Browse(key) => {
            let mut listing = Vec::new();

            write_catalog(&mut listing, fixture.catalog(key)?)?;

            Some(String::from_utf8(listing)?)
        }
        Action::Details(handle) => match cart.service_key(handle).and_then(|key| cart.service(key)) {
            Some(service) => {
                let mut details = Vec::new();

                write_service_details(&mut details, service, cart.membership())?;

                Some(String::from_utf8(details)?)
            }
            None => Some(format!("No service with handle {handle}")),
        },
        Action::Wait(seconds) => {
            match now.checked_add(SignedDuration::from_secs(*seconds)) {
                Ok(later) => *now = later,
                Err(err) => warn!(seconds, %err, "cannot advance clock"),
            }

            None
        }
    };

    Ok(message)
}
