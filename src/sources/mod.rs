//! Bar providers.

pub mod yahoo;

pub use yahoo::YahooFinanceClient;

use crate::error::{EngineError, FetchError};
use crate::types::{Bar, BarSeries, ExchangeClock};

/// Raw bars for one symbol at a provider-native interval.
#[derive(Debug, Clone, PartialEq)]
pub struct FetchedBars {
    /// Ascending by time; may be empty.
    pub bars: Vec<Bar>,
    /// Exchange offset from UTC at fetch time.
    pub utc_offset_secs: i32,
    /// IANA zone of the exchange, when the provider reports one.
    pub timezone: Option<String>,
}

impl FetchedBars {
    /// Exchange clock for bucket alignment; the zone wins over the fixed offset.
    pub fn clock(&self) -> ExchangeClock {
        ExchangeClock::resolve(self.timezone.as_deref(), self.utc_offset_secs)
    }

    /// Validate into a series on the exchange clock.
    pub fn to_series(&self) -> Result<BarSeries, EngineError> {
        BarSeries::with_clock(self.bars.clone(), self.clock())
    }
}

/// A source of historical OHLCV bars.
#[axum::async_trait]
pub trait BarSource: Send + Sync {
    /// Provider name, for logs.
    fn name(&self) -> &str;

    /// Fetch bars at the provider-native `interval` covering `lookback`
    /// (e.g. `"1h"` / `"730d"`).
    async fn fetch(
        &self,
        symbol: &str,
        interval: &str,
        lookback: &str,
    ) -> Result<FetchedBars, FetchError>;
}
