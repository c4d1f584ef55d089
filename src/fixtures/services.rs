//! Service Fixtures

use rusty_money::Money;
use serde::Deserialize;
use smallvec::SmallVec;

use crate::{
    fixtures::{FixtureError, products::parse_price},
    services::{AddOnService, ServiceDetails},
};

/// Wrapper for the service catalog in YAML
#[derive(Debug, Deserialize)]
pub struct ServicesFixture {
    /// Product code the services are offered with
    #[serde(default)]
    pub anchor: Option<String>,

    /// Services in display order
    pub services: Vec<ServiceFixture>,
}

/// Service fixture
#[derive(Debug, Deserialize)]
pub struct ServiceFixture {
    /// Service handle
    pub key: String,

    /// Service name
    pub name: String,

    /// Standard price (e.g., "299.99 USD")
    pub price: String,

    /// Member price (e.g., "149.99 USD")
    pub member_price: String,

    /// Long description
    #[serde(default)]
    pub description: Option<String>,

    /// What the service includes
    #[serde(default)]
    pub details: Vec<String>,

    /// Image reference
    #[serde(default)]
    pub image: Option<String>,
}

impl TryFrom<ServiceFixture> for AddOnService<'_> {
    type Error = FixtureError;

    fn try_from(fixture: ServiceFixture) -> Result<Self, Self::Error> {
        let (price_minor, price_currency) = parse_price(&fixture.price)?;
        let (member_minor, member_currency) = parse_price(&fixture.member_price)?;

        let service = AddOnService::new(
            fixture.name,
            Money::from_minor(price_minor, price_currency),
            Money::from_minor(member_minor, member_currency),
        )?;

        Ok(service.with_details(ServiceDetails {
            description: fixture.description,
            bullets: SmallVec::from_vec(fixture.details),
            image: fixture.image,
        }))
    }
}
