//! Heuristic trading signal derived from a 24h move and market cap
//!
//! This is a presentational label, not a recommendation engine. Thresholds
//! are fixed:
//!
//! | 24h change | signal | rationale |
//! |---|---|---|
//! | > 15 | STRONG_BUY | very bullish momentum |
//! | > 7 | BUY | bullish trend |
//! | > 2 | HOLD | moderate growth |
//! | > -5 | HOLD | consolidation |
//! | > -12 | SELL | downward pressure |
//! | otherwise | STRONG_SELL | heavy selling |
//!
//! Coins with a known market cap under $100M get a low-cap qualifier.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Market caps below this (and above zero) are flagged as low cap
pub const LOW_CAP_THRESHOLD: f64 = 100_000_000.0;

const LOW_CAP_QUALIFIER: &str = "HIGH RISK / LOW CAP";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SignalKind {
    StrongBuy,
    Buy,
    Hold,
    Sell,
    StrongSell,
}

impl SignalKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::StrongBuy => "STRONG_BUY",
            Self::Buy => "BUY",
            Self::Hold => "HOLD",
            Self::Sell => "SELL",
            Self::StrongSell => "STRONG_SELL",
        }
    }

    pub fn emoji(&self) -> &'static str {
        match self {
            Self::StrongBuy => "🚀",
            Self::Buy => "🟢",
            Self::Hold => "🟡",
            Self::Sell => "🔴",
            Self::StrongSell => "💀",
        }
    }
}

impl fmt::Display for SignalKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

impl RiskLevel {
    /// Bucket by absolute 24h move: under 5% low, under 15% medium
    pub fn from_change(change_24h: f64) -> Self {
        let magnitude = change_24h.abs();
        if magnitude < 5.0 {
            Self::Low
        } else if magnitude < 15.0 {
            Self::Medium
        } else {
            Self::High
        }
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Low => "Low",
            Self::Medium => "Medium",
            Self::High => "High",
        })
    }
}

/// Short-term outlook line shown under the signal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outlook {
    Bullish,
    Consolidation,
    Bearish,
}

impl Outlook {
    pub fn from_change(change_24h: f64) -> Self {
        if change_24h > 5.0 {
            Self::Bullish
        } else if change_24h > -5.0 {
            Self::Consolidation
        } else {
            Self::Bearish
        }
    }

    pub fn describe(&self) -> &'static str {
        match self {
            Self::Bullish => "✅ Bullish trend forming",
            Self::Consolidation => "⚠️ Market consolidation",
            Self::Bearish => "❌ Bearish pressure",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Signal {
    pub kind: SignalKind,
    pub risk: RiskLevel,
    pub outlook: Outlook,
    /// Market cap known and below [`LOW_CAP_THRESHOLD`]
    pub low_cap: bool,
    base_rationale: &'static str,
}

impl Signal {
    /// Display label, e.g. `BUY` or `BUY (HIGH RISK / LOW CAP)`
    pub fn label(&self) -> String {
        if self.low_cap {
            format!("{} ({LOW_CAP_QUALIFIER})", self.kind)
        } else {
            self.kind.to_string()
        }
    }

    pub fn rationale(&self) -> String {
        if self.low_cap {
            format!("{}, high risk: low market cap", self.base_rationale)
        } else {
            self.base_rationale.to_string()
        }
    }
}

/// Derive a signal. Total over all inputs; NaN reads as no movement.
pub fn generate(change_24h: f64, market_cap: f64) -> Signal {
    let change = if change_24h.is_nan() { 0.0 } else { change_24h };

    let (kind, base_rationale) = if change > 15.0 {
        (SignalKind::StrongBuy, "very bullish momentum")
    } else if change > 7.0 {
        (SignalKind::Buy, "bullish trend")
    } else if change > 2.0 {
        (SignalKind::Hold, "moderate growth")
    } else if change > -5.0 {
        (SignalKind::Hold, "consolidation")
    } else if change > -12.0 {
        (SignalKind::Sell, "downward pressure")
    } else {
        (SignalKind::StrongSell, "heavy selling")
    };

    Signal {
        kind,
        risk: RiskLevel::from_change(change),
        outlook: Outlook::from_change(change),
        low_cap: market_cap > 0.0 && market_cap < LOW_CAP_THRESHOLD,
        base_rationale,
    }
}
