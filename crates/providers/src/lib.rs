//! # Gridwatch Providers
//!
//! Feed adapters for the outage operators gridwatch watches. Each adapter
//! fetches its feed, classifies the provider-specific raw power codes into
//! the shared three-state alphabet, and hands interval construction to
//! `gridwatch_core::extract` so every feed produces the same canonical
//! `Slot` shape.

/// Aggregated svitlo.live feed adapter
pub mod svitlo;
/// Ternopil oblenergo API adapter
pub mod ternopil;

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono_tz::Tz;
use gridwatch_core::errors::EngineResult;
use gridwatch_core::models::outage::{RegionMeta, ScheduleFetch};
use mockall::automock;

/// Capability interface every outage feed implements.
///
/// Any transport error or malformed payload is a fetch failure for that
/// call — never "no outages" — whereas a syntactically valid day with an
/// empty outage list is a legitimate calm day. A day with no usable samples
/// at all is returned as an absent day, not an empty one.
#[automock]
#[async_trait]
pub trait OutageProvider: Send + Sync {
    fn id(&self) -> &'static str;

    /// Catalog of regions this provider can serve.
    async fn list_regions(&self) -> EngineResult<Vec<RegionMeta>>;

    /// Today's and tomorrow's schedule for one group/subgroup.
    async fn get_schedule(
        &self,
        region_code: &str,
        group: &str,
        subgroup: &str,
    ) -> EngineResult<ScheduleFetch>;
}

pub type ProviderMap = HashMap<String, Arc<dyn OutageProvider>>;

/// Build the provider registry keyed by provider id.
pub fn build_providers(timezone: Tz) -> ProviderMap {
    let mut providers: ProviderMap = HashMap::new();
    providers.insert(
        svitlo::PROVIDER_ID.to_string(),
        Arc::new(svitlo::SvitloProvider::new()),
    );
    providers.insert(
        ternopil::PROVIDER_ID.to_string(),
        Arc::new(ternopil::TernopilProvider::with_timezone(timezone)),
    );
    providers
}
