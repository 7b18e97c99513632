//! Treasury module for positions, FX rates and hedge recommendations.
//!
//! This module handles:
//! - Treasury data types and their wire format
//! - The data source seam handlers read from
//! - Hardcoded mock data behind that seam

pub mod mock;
pub mod source;
pub mod types;

pub use mock::MockTreasuryData;
pub use source::TreasuryDataSource;
pub use types::{
    FxRate, HedgeAction, HedgeRecommendation, HedgeRecommendations, RateType, TreasuryPosition,
};
