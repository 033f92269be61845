use serde::{Deserialize, Serialize};

/// Width of a synthetic bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "unit", content = "amount", rename_all = "snake_case")]
pub enum Bucket {
    /// Fixed elapsed time, aligned to the Unix epoch in exchange-local time.
    Hours(u32),
    /// Calendar months, aligned to January 1970 in exchange-local time.
    Months(u32),
}

impl Bucket {
    /// Short label for this bucket width.
    pub fn label(&self) -> String {
        match self {
            Bucket::Hours(n) => format!("{}h", n),
            Bucket::Months(n) => format!("{}mo", n),
        }
    }
}

/// How an interval label is obtained from the data source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum IntervalSpec {
    /// Fetched natively from the source.
    Direct {
        base: &'static str,
        lookback: &'static str,
    },
    /// Built by aggregating base bars into coarser buckets.
    Synthetic {
        base: &'static str,
        lookback: &'static str,
        bucket: Bucket,
    },
}

/// Label → spec table, in display order.
const INTERVALS: &[(&str, IntervalSpec)] = &[
    (
        "15m",
        IntervalSpec::Direct {
            base: "15m",
            lookback: "60d",
        },
    ),
    (
        "30m",
        IntervalSpec::Direct {
            base: "30m",
            lookback: "60d",
        },
    ),
    (
        "1h",
        IntervalSpec::Direct {
            base: "1h",
            lookback: "730d",
        },
    ),
    (
        "4h",
        IntervalSpec::Synthetic {
            base: "1h",
            lookback: "730d",
            bucket: Bucket::Hours(4),
        },
    ),
    (
        "1d",
        IntervalSpec::Direct {
            base: "1d",
            lookback: "5y",
        },
    ),
    (
        "1wk",
        IntervalSpec::Direct {
            base: "1wk",
            lookback: "10y",
        },
    ),
    (
        "6mo",
        IntervalSpec::Synthetic {
            base: "1mo",
            lookback: "max",
            bucket: Bucket::Months(6),
        },
    ),
    (
        "1y",
        IntervalSpec::Synthetic {
            base: "1mo",
            lookback: "max",
            bucket: Bucket::Months(12),
        },
    ),
];

impl IntervalSpec {
    /// Resolve a user-facing interval label.
    pub fn resolve(label: &str) -> Option<Self> {
        INTERVALS
            .iter()
            .find(|(l, _)| *l == label)
            .map(|(_, spec)| *spec)
    }

    /// All supported labels with their specs.
    pub fn all() -> &'static [(&'static str, IntervalSpec)] {
        INTERVALS
    }

    /// Interval code passed to the data source.
    pub fn base(&self) -> &'static str {
        match self {
            IntervalSpec::Direct { base, .. } | IntervalSpec::Synthetic { base, .. } => base,
        }
    }

    /// Lookback window passed to the data source.
    pub fn lookback(&self) -> &'static str {
        match self {
            IntervalSpec::Direct { lookback, .. } | IntervalSpec::Synthetic { lookback, .. } => {
                lookback
            }
        }
    }

    /// Bucket to aggregate into, if synthetic.
    pub fn bucket(&self) -> Option<Bucket> {
        match self {
            IntervalSpec::Direct { .. } => None,
            IntervalSpec::Synthetic { bucket, .. } => Some(*bucket),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_direct() {
        let spec = IntervalSpec::resolve("15m").unwrap();
        assert_eq!(spec.base(), "15m");
        assert_eq!(spec.lookback(), "60d");
        assert!(spec.bucket().is_none());
    }

    #[test]
    fn test_resolve_four_hour() {
        let spec = IntervalSpec::resolve("4h").unwrap();
        assert_eq!(spec.base(), "1h");
        assert_eq!(spec.lookback(), "730d");
        assert_eq!(spec.bucket(), Some(Bucket::Hours(4)));
    }

    #[test]
    fn test_resolve_calendar() {
        assert_eq!(
            IntervalSpec::resolve("1y").unwrap().bucket(),
            Some(Bucket::Months(12))
        );
        assert_eq!(
            IntervalSpec::resolve("6mo").unwrap().bucket(),
            Some(Bucket::Months(6))
        );
        assert_eq!(IntervalSpec::resolve("1y").unwrap().lookback(), "max");
    }

    #[test]
    fn test_resolve_unknown() {
        assert!(IntervalSpec::resolve("2h").is_none());
        assert!(IntervalSpec::resolve("").is_none());
    }

    #[test]
    fn test_labels_unique() {
        let labels: Vec<&str> = IntervalSpec::all().iter().map(|(l, _)| *l).collect();
        let mut deduped = labels.clone();
        deduped.sort();
        deduped.dedup();
        assert_eq!(labels.len(), deduped.len());
    }

    #[test]
    fn test_bucket_label() {
        assert_eq!(Bucket::Hours(4).label(), "4h");
        assert_eq!(Bucket::Months(12).label(), "12mo");
    }

    #[test]
    fn test_spec_serialization() {
        let json = serde_json::to_string(&IntervalSpec::resolve("4h").unwrap()).unwrap();
        assert!(json.contains("\"kind\":\"synthetic\""));
        assert!(json.contains("\"unit\":\"hours\""));
    }
}
