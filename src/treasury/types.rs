//! Treasury data types and their JSON representation.
//!
//! Money and rates are [`Decimal`] in memory and JSON numbers on the wire.
//! Timestamps are UTC and serialize as RFC 3339.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};
use time::OffsetDateTime;

/// Position held in one trading book.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TreasuryPosition {
    /// Book the position belongs to (e.g. "FX-OPTIONS").
    pub book: String,
    /// ISO currency code of the notional.
    pub currency: String,
    /// Face value of the position.
    #[serde(with = "rust_decimal::serde::float")]
    pub notional: Decimal,
    /// Profit and loss as of `as_of`.
    #[serde(with = "rust_decimal::serde::float")]
    pub pnl: Decimal,
    /// Valuation time.
    #[serde(with = "time::serde::rfc3339")]
    pub as_of: OffsetDateTime,
}

/// Kind of FX quote.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, Default,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum RateType {
    /// Rate for immediate settlement.
    #[default]
    Spot,
    /// Rate for settlement at a future date.
    Forward,
}

/// FX rate for one currency pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FxRate {
    /// Currency pair, base/quote (e.g. "USD/EUR").
    pub pair: String,
    /// Units of quote currency per unit of base currency.
    #[serde(with = "rust_decimal::serde::float")]
    pub rate: Decimal,
    /// Time the rate applies to.
    #[serde(with = "time::serde::rfc3339")]
    pub as_of: OffsetDateTime,
    /// Rate provider name.
    pub provider: String,
    /// Quote kind.
    pub rate_type: RateType,
    /// Time the quote was produced.
    #[serde(with = "time::serde::rfc3339")]
    pub timestamp: OffsetDateTime,
}

/// Suggested hedging action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum HedgeAction {
    /// Buy a call option on the pair.
    BuyCall,
    /// Buy a put option on the pair.
    BuyPut,
    /// Sell the base currency forward.
    ForwardSell,
    /// Buy the base currency forward.
    ForwardBuy,
}

/// One hedge recommendation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HedgeRecommendation {
    /// Currency pair to hedge.
    pub pair: String,
    /// What to do.
    pub action: HedgeAction,
    /// Notional to hedge, in whole units of the base currency.
    pub notional: u64,
    /// Human-readable reason.
    pub rationale: String,
}

/// Envelope for the recommendations endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HedgeRecommendations {
    /// Time the recommendations were produced.
    #[serde(with = "time::serde::rfc3339")]
    pub as_of: OffsetDateTime,
    /// Recommendations in priority order.
    pub recommendations: Vec<HedgeRecommendation>,
}
