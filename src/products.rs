//! Products

use rust_decimal::{Decimal, prelude::ToPrimitive};
use rusty_money::{Money, iso::Currency};
use slotmap::new_key_type;

new_key_type! {
    /// Product Key
    pub struct ProductKey;
}

/// Catalog entry that can be added to the cart.
#[derive(Debug, Clone)]
pub struct Product<'a> {
    /// Product name
    pub name: String,

    /// Product code shown next to the line item
    pub code: String,

    /// Unit price
    pub price: Money<'a, Currency>,

    /// Image reference, used for display only
    pub image: Option<String>,

    /// Whether the product can currently be bought
    pub available: bool,

    /// Customer rating, only present on seller catalogs
    pub rating: Option<Rating>,
}

impl<'a> Product<'a> {
    /// Create an available product with no image or rating.
    pub fn new(name: impl Into<String>, code: impl Into<String>, price: Money<'a, Currency>) -> Self {
        Self {
            name: name.into(),
            code: code.into(),
            price,
            image: None,
            available: true,
            rating: None,
        }
    }
}

/// Star rating with a review count.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rating {
    stars: Decimal,
    reviews: u32,
}

/// Number of stars a rating is drawn with.
pub const MAX_STARS: u8 = 5;

impl Rating {
    /// Create a rating, clamping the stars to `0..=5`.
    pub fn new(stars: Decimal, reviews: u32) -> Self {
        Self {
            stars: stars.clamp(Decimal::ZERO, Decimal::from(MAX_STARS)),
            reviews,
        }
    }

    /// Average stars
    pub fn stars(&self) -> Decimal {
        self.stars
    }

    /// Number of reviews behind the average
    pub fn reviews(&self) -> u32 {
        self.reviews
    }

    /// Breaks the rating down into full, half and empty stars for display.
    pub fn star_breakdown(&self) -> StarBreakdown {
        let full = self.stars.floor().to_u8().unwrap_or(0).min(MAX_STARS);
        let half = self.stars.fract() >= Decimal::new(5, 1) && full < MAX_STARS;
        let empty = MAX_STARS - full - u8::from(half);

        StarBreakdown { full, half, empty }
    }
}

/// Full, half and empty star counts for a rating.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StarBreakdown {
    /// Full stars
    pub full: u8,

    /// Whether a half star follows the full stars
    pub half: bool,

    /// Empty stars
    pub empty: u8,
}
