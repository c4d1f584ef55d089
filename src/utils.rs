//! Utils

use std::{path::PathBuf, str::FromStr};

use clap::Parser;
use thiserror::Error;

use crate::items::LineItemId;

/// Arguments for the scripted cart session
#[derive(Debug, Parser)]
#[command(name = "clever-commerce", about = "Replay actions against the Clever Commerce cart")]
pub struct CartArgs {
    /// Fixture set to load
    #[clap(short, long, env = "CART_FIXTURE", default_value = "clever-commerce")]
    pub fixture: String,

    /// Directory holding the fixture files
    #[clap(short, long, env = "CART_FIXTURE_PATH", default_value = "./fixtures")]
    pub path: PathBuf,

    /// Log level (trace, debug, info, warn, error)
    #[clap(short, long, env = "RUST_LOG", default_value = "warn")]
    pub log_level: String,

    /// Actions to apply in order, e.g. `add:rec-1 inc:product-1 toggle:smartstart member:on checkout`
    #[clap(value_parser = Action::from_str)]
    pub actions: Vec<Action>,
}

/// Errors raised while parsing a scripted action.
#[derive(Debug, Error, PartialEq)]
pub enum ActionParseError {
    /// The action name is not recognised.
    #[error("unknown action: {0}")]
    Unknown(String),

    /// The action needs an argument it was not given.
    #[error("action {0} needs an argument")]
    MissingArgument(String),

    /// A line item id was not of the form `product-<n>` or `<n>`.
    #[error("invalid line item id: {0}")]
    InvalidId(String),

    /// A number could not be parsed.
    #[error("invalid number: {0}")]
    InvalidNumber(String),

    /// Time only moves forward.
    #[error("cannot wait a negative number of seconds: {0}")]
    NegativeWait(String),

    /// `member:` expects `on` or `off`.
    #[error("membership must be on or off, got {0}")]
    InvalidToggle(String),
}

/// One user interaction with the cart page.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// Add a product from any catalog by handle
    Add(String),

    /// Add a product from the named seller catalog (`seller:<catalog>:<handle>`)
    AddFromSeller {
        /// Seller catalog handle
        catalog: String,
        /// Product handle
        handle: String,
    },

    /// Change a quantity by a delta
    Quantity(LineItemId, i64),

    /// Remove a line item
    Remove(LineItemId),

    /// Undo the last removal
    Undo,

    /// Toggle a service by handle
    Toggle(String),

    /// Turn the membership on or off
    Membership(bool),

    /// Ask to clear all line items
    Clear,

    /// Confirm a pending clear
    Confirm,

    /// Cancel a pending clear
    Cancel,

    /// Proceed to checkout
    Checkout,

    /// List a catalog by handle
    Browse(String),

    /// Show the details of a service by handle
    Details(String),

    /// Let time pass, in seconds (never negative)
    Wait(i64),
}

impl FromStr for Action {
    type Err = ActionParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.splitn(3, ':');
        let name = parts.next().unwrap_or_default();
        let first = parts.next();
        let second = parts.next();

        let arg = || first.ok_or_else(|| ActionParseError::MissingArgument(name.to_string()));

        match name {
            "add" => Ok(Action::Add(arg()?.to_string())),
            "seller" => {
                let handle =
                    second.ok_or_else(|| ActionParseError::MissingArgument(name.to_string()))?;

                Ok(Action::AddFromSeller {
                    catalog: arg()?.to_string(),
                    handle: handle.to_string(),
                })
            }
            "inc" => Ok(Action::Quantity(parse_id(arg()?)?, 1)),
            "dec" => Ok(Action::Quantity(parse_id(arg()?)?, -1)),
            "qty" => {
                let delta =
                    second.ok_or_else(|| ActionParseError::MissingArgument(name.to_string()))?;

                Ok(Action::Quantity(parse_id(arg()?)?, parse_number(delta)?))
            }
            "remove" => Ok(Action::Remove(parse_id(arg()?)?)),
            "undo" => Ok(Action::Undo),
            "toggle" => Ok(Action::Toggle(arg()?.to_string())),
            "member" => match arg()? {
                "on" => Ok(Action::Membership(true)),
                "off" => Ok(Action::Membership(false)),
                other => Err(ActionParseError::InvalidToggle(other.to_string())),
            },
            "clear" => Ok(Action::Clear),
            "confirm" => Ok(Action::Confirm),
            "cancel" => Ok(Action::Cancel),
            "checkout" => Ok(Action::Checkout),
            "browse" => Ok(Action::Browse(arg()?.to_string())),
            "details" => Ok(Action::Details(arg()?.to_string())),
            "wait" => {
                let raw = arg()?;
                let seconds = parse_number(raw)?;

                if seconds < 0 {
                    return Err(ActionParseError::NegativeWait(raw.to_string()));
                }

                Ok(Action::Wait(seconds))
            }
            other => Err(ActionParseError::Unknown(other.to_string())),
        }
    }
}

fn parse_id(s: &str) -> Result<LineItemId, ActionParseError> {
    let raw = s.strip_prefix("product-").unwrap_or(s);

    raw.parse::<u64>()
        .map(LineItemId::new)
        .map_err(|_err| ActionParseError::InvalidId(s.to_string()))
}

fn parse_number(s: &str) -> Result<i64, ActionParseError> {
    s.parse::<i64>()
        .map_err(|_err| ActionParseError::InvalidNumber(s.to_string()))
}
