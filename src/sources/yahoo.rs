//! Yahoo Finance chart API client.
//!
//! Provides historical OHLCV bars for stocks, ETFs, indices and crypto
//! pairs through the unofficial v8 chart endpoint.

use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, warn};

use super::{BarSource, FetchedBars};
use crate::error::FetchError;
use crate::types::Bar;

const DEFAULT_BASE_URL: &str = "https://query1.finance.yahoo.com";

/// Yahoo Finance chart response.
#[derive(Debug, Deserialize)]
struct YahooChartResponse {
    chart: YahooChart,
}

#[derive(Debug, Deserialize)]
struct YahooChart {
    result: Option<Vec<YahooResult>>,
    error: Option<YahooError>,
}

#[derive(Debug, Deserialize)]
struct YahooError {
    code: String,
    description: String,
}

#[derive(Debug, Deserialize)]
struct YahooResult {
    meta: YahooMeta,
    timestamp: Option<Vec<i64>>,
    indicators: YahooIndicators,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct YahooMeta {
    symbol: String,
    #[serde(default)]
    gmtoffset: i32,
    exchange_timezone_name: Option<String>,
}

#[derive(Debug, Deserialize)]
struct YahooIndicators {
    quote: Vec<YahooQuote>,
}

#[derive(Debug, Deserialize)]
struct YahooQuote {
    open: Option<Vec<Option<f64>>>,
    high: Option<Vec<Option<f64>>>,
    low: Option<Vec<Option<f64>>>,
    close: Option<Vec<Option<f64>>>,
    volume: Option<Vec<Option<f64>>>,
}

/// One-letter Yahoo exchange suffixes that look like share classes.
const SINGLE_LETTER_EXCHANGES: &[&str] = &["F", "L", "T", "V"];

/// Normalize symbol for Yahoo Finance API.
/// Yahoo uses hyphens instead of dots for US share classes (e.g., BRK-B not BRK.B).
/// Exchange suffixes such as `.TW`, `.HK` or `.L` pass through.
fn normalize_yahoo_symbol(symbol: &str) -> String {
    let symbol = symbol.trim().to_uppercase();
    match symbol.rsplit_once('.') {
        Some((root, class))
            if !root.is_empty()
                && class.len() == 1
                && class.chars().all(|c| c.is_ascii_alphabetic())
                && !SINGLE_LETTER_EXCHANGES.contains(&class) =>
        {
            format!("{}-{}", root, class)
        }
        _ => symbol,
    }
}

/// Turn a chart response into bars.
///
/// Points missing any of open/high/low/close are skipped; a missing volume
/// counts as zero.
fn parse_chart(data: YahooChartResponse) -> Result<FetchedBars, FetchError> {
    if let Some(error) = data.chart.error {
        return Err(FetchError::Provider {
            code: error.code,
            description: error.description,
        });
    }

    let Some(result) = data.chart.result.and_then(|r| r.into_iter().next()) else {
        return Ok(FetchedBars {
            bars: Vec::new(),
            utc_offset_secs: 0,
            timezone: None,
        });
    };

    debug!(
        "Yahoo chart for {} ({})",
        result.meta.symbol,
        result.meta.exchange_timezone_name.as_deref().unwrap_or("UTC")
    );

    let utc_offset_secs = result.meta.gmtoffset;
    let timezone = result.meta.exchange_timezone_name;
    let timestamps = result.timestamp.unwrap_or_default();
    let Some(quote) = result.indicators.quote.into_iter().next() else {
        return Ok(FetchedBars {
            bars: Vec::new(),
            utc_offset_secs,
            timezone,
        });
    };

    let opens = quote.open.unwrap_or_default();
    let highs = quote.high.unwrap_or_default();
    let lows = quote.low.unwrap_or_default();
    let closes = quote.close.unwrap_or_default();
    let volumes = quote.volume.unwrap_or_default();

    let field = |values: &[Option<f64>], i: usize| values.get(i).copied().flatten();

    let mut bars = Vec::with_capacity(timestamps.len());
    let mut skipped = 0usize;
    for (i, &timestamp) in timestamps.iter().enumerate() {
        let (Some(open), Some(high), Some(low), Some(close)) = (
            field(&opens, i),
            field(&highs, i),
            field(&lows, i),
            field(&closes, i),
        ) else {
            skipped += 1;
            continue;
        };
        let volume = field(&volumes, i).unwrap_or(0.0);

        bars.push(Bar::new(
            timestamp * 1000, // Convert to milliseconds
            open,
            high,
            low,
            close,
            volume,
        ));
    }

    if skipped > 0 {
        debug!("Skipped {} incomplete Yahoo points", skipped);
    }

    Ok(FetchedBars {
        bars,
        utc_offset_secs,
        timezone,
    })
}

/// Yahoo Finance API client.
pub struct YahooFinanceClient {
    client: Client,
    base_url: String,
}

impl YahooFinanceClient {
    /// Create a new Yahoo Finance client.
    pub fn new(timeout: Duration) -> Result<Self, FetchError> {
        Self::with_base_url(DEFAULT_BASE_URL, timeout)
    }

    /// Create a client against another chart host.
    pub fn with_base_url(base_url: &str, timeout: Duration) -> Result<Self, FetchError> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent("Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36")
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    fn chart_url(&self, symbol: &str, range: &str, interval: &str) -> String {
        format!(
            "{}/v8/finance/chart/{}?range={}&interval={}&includePrePost=true",
            self.base_url,
            normalize_yahoo_symbol(symbol),
            range,
            interval
        )
    }

    /// Fetch historical bars for a symbol.
    ///
    /// Arguments:
    /// - symbol: Ticker (e.g., "AAPL", "BTC-USD", "^GSPC")
    /// - range: Time range ("60d", "730d", "5y", "10y", "max")
    /// - interval: Data interval ("15m", "30m", "1h", "1d", "1wk", "1mo")
    pub async fn get_historical_data(
        &self,
        symbol: &str,
        range: &str,
        interval: &str,
    ) -> Result<FetchedBars, FetchError> {
        let url = self.chart_url(symbol, range, interval);
        debug!("Fetching Yahoo Finance data: {}", url);

        let response = self.client.get(&url).send().await?;

        let status = response.status();
        if !status.is_success() {
            warn!("Yahoo Finance returned {} for {}", status, symbol);
            return Err(FetchError::Status(status.as_u16()));
        }

        let data: YahooChartResponse = response
            .json()
            .await
            .map_err(|e| FetchError::Parse(e.to_string()))?;

        parse_chart(data)
    }
}

#[axum::async_trait]
impl BarSource for YahooFinanceClient {
    fn name(&self) -> &str {
        "yahoo"
    }

    async fn fetch(
        &self,
        symbol: &str,
        interval: &str,
        lookback: &str,
    ) -> Result<FetchedBars, FetchError> {
        self.get_historical_data(symbol, lookback, interval).await
    }
}
