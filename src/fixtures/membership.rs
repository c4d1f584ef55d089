//! Membership Fixtures

use rusty_money::Money;
use serde::Deserialize;
use smallvec::SmallVec;

use crate::{
    fixtures::{FixtureError, products::parse_price},
    membership::MembershipPlan,
};

/// Membership plan fixture
#[derive(Debug, Deserialize)]
pub struct MembershipFixture {
    /// Plan name
    pub name: String,

    /// Term label
    pub term: String,

    /// Fee (e.g., "49.99 USD")
    pub fee: String,

    /// Listed benefits
    #[serde(default)]
    pub benefits: Vec<String>,
}

impl TryFrom<MembershipFixture> for MembershipPlan<'_> {
    type Error = FixtureError;

    fn try_from(fixture: MembershipFixture) -> Result<Self, Self::Error> {
        let (minor_units, currency) = parse_price(&fixture.fee)?;

        let mut plan = MembershipPlan::new(
            fixture.name,
            fixture.term,
            Money::from_minor(minor_units, currency),
        );

        plan.benefits = SmallVec::from_vec(fixture.benefits);

        Ok(plan)
    }
}
