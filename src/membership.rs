//! Membership

use rusty_money::{Money, iso::Currency};
use smallvec::SmallVec;

/// A paid plan that unlocks member pricing on services.
#[derive(Debug, Clone, PartialEq)]
pub struct MembershipPlan<'a> {
    /// Plan name
    pub name: String,

    /// Term label, e.g. "12-month plan"
    pub term: String,

    /// Flat fee charged while the membership is in the cart
    pub fee: Money<'a, Currency>,

    /// Benefits listed in the plan drawer
    pub benefits: SmallVec<[String; 4]>,
}

impl<'a> MembershipPlan<'a> {
    /// Create a plan with no listed benefits.
    pub fn new(
        name: impl Into<String>,
        term: impl Into<String>,
        fee: Money<'a, Currency>,
    ) -> Self {
        Self {
            name: name.into(),
            term: term.into(),
            fee,
            benefits: SmallVec::new(),
        }
    }

    /// The "Elite" annual plan at 49.99.
    pub fn elite(currency: &'a Currency) -> Self {
        let mut plan = Self::new("Elite", "12-month plan", Money::from_minor(4999, currency));

        plan.benefits.extend(
            [
                "Elite Price Deals",
                "Free delivery",
                "Priority customer support",
                "Early access to new products",
            ]
            .map(String::from),
        );

        plan
    }
}

/// Membership plan and whether it is active in the cart.
#[derive(Debug, Clone, PartialEq)]
pub struct Membership<'a> {
    plan: MembershipPlan<'a>,
    active: bool,
}

impl<'a> Membership<'a> {
    /// Inactive membership for the given plan.
    pub fn new(plan: MembershipPlan<'a>) -> Self {
        Self {
            plan,
            active: false,
        }
    }

    /// Plan details
    pub fn plan(&self) -> &MembershipPlan<'a> {
        &self.plan
    }

    /// Whether the membership is active
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Sets the flag, returning whether it changed.
    pub(crate) fn set_active(&mut self, active: bool) -> bool {
        let changed = self.active != active;

        self.active = active;

        changed
    }

    /// Fee charged for the current state: the plan fee when active, zero otherwise.
    pub fn fee_due(&self) -> Money<'a, Currency> {
        if self.active {
            self.plan.fee
        } else {
            Money::from_minor(0, self.plan.fee.currency())
        }
    }
}
