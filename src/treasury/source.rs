//! Data source seam for treasury endpoints.

use std::fmt::Debug;

use time::OffsetDateTime;

use super::types::{FxRate, HedgeRecommendation, TreasuryPosition};

/// Where treasury handlers get their data.
///
/// Callers pass the request time in; implementations stamp every record of a
/// single call with that same instant.
pub trait TreasuryDataSource: Debug + Send + Sync + 'static {
    /// Positions per book, in display order.
    fn positions(&self, as_of: OffsetDateTime) -> Vec<TreasuryPosition>;

    /// FX rates per pair, in display order.
    fn rates(&self, as_of: OffsetDateTime) -> Vec<FxRate>;

    /// Hedge recommendations in priority order.
    fn hedge_recommendations(&self) -> Vec<HedgeRecommendation>;
}
