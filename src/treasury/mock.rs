//! Hardcoded treasury data.
//!
//! Stands in for a real position store and rate feed. Every call returns the
//! same records; only the timestamps move.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use time::OffsetDateTime;

use super::source::TreasuryDataSource;
use super::types::{FxRate, HedgeAction, HedgeRecommendation, RateType, TreasuryPosition};

/// Provider name reported on mock rates.
pub const MOCK_PROVIDER: &str = "mock";

const POSITIONS: [(&str, &str, Decimal, Decimal); 3] = [
    ("FX-OPTIONS", "USD", dec!(35000000.0), dec!(125500.0)),
    ("MMF", "EUR", dec!(18000000.0), dec!(-12250.0)),
    ("BONDS", "USD", dec!(12000000.0), dec!(5420.0)),
];

const RATES: [(&str, Decimal); 3] = [
    ("USD/EUR", dec!(0.91)),
    ("USD/INR", dec!(83.25)),
    ("EUR/GBP", dec!(0.86)),
];

/// Treasury data source backed by in-memory literals.
#[derive(Debug, Clone, Copy, Default)]
pub struct MockTreasuryData;

impl MockTreasuryData {
    /// Create the mock source.
    pub fn new() -> Self {
        Self
    }
}

impl TreasuryDataSource for MockTreasuryData {
    fn positions(&self, as_of: OffsetDateTime) -> Vec<TreasuryPosition> {
        POSITIONS
            .iter()
            .map(|&(book, currency, notional, pnl)| TreasuryPosition {
                book: book.to_string(),
                currency: currency.to_string(),
                notional,
                pnl,
                as_of,
            })
            .collect()
    }

    fn rates(&self, as_of: OffsetDateTime) -> Vec<FxRate> {
        RATES
            .iter()
            .map(|&(pair, rate)| FxRate {
                pair: pair.to_string(),
                rate,
                as_of,
                provider: MOCK_PROVIDER.to_string(),
                rate_type: RateType::Spot,
                timestamp: as_of,
            })
            .collect()
    }

    fn hedge_recommendations(&self) -> Vec<HedgeRecommendation> {
        vec![
            HedgeRecommendation {
                pair: "USD/INR".to_string(),
                action: HedgeAction::BuyCall,
                notional: 5_000_000,
                rationale: "Protect against INR depreciation risk on upcoming vendor payments"
                    .to_string(),
            },
            HedgeRecommendation {
                pair: "USD/EUR".to_string(),
                action: HedgeAction::ForwardSell,
                notional: 2_000_000,
                rationale: "Lock in EUR receivables for Q+1 corporate settlement".to_string(),
            },
        ]
    }
}
