//! Declared pass/fail criteria evaluated over the final metric snapshot.
//!
//! Rates are fixed-point integers scaled by 10,000 so threshold math stays
//! in integer arithmetic end to end.
use std::fmt;

use crate::error::ValidationError;
use crate::metrics::SummarySnapshot;

const RATE_SCALE: u64 = 10_000;

/// Upper bound on a rate in [0, 1], stored as parts per 10,000.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateBound {
    per_10000: u64,
}

impl RateBound {
    #[must_use]
    pub const fn from_per_10000(per_10000: u64) -> Self {
        Self { per_10000 }
    }

    #[must_use]
    pub const fn per_10000(self) -> u64 {
        self.per_10000
    }

    /// Parse a decimal string such as `0.1` or `0.25` with up to four
    /// fractional digits.
    ///
    /// # Errors
    ///
    /// Returns an error when the value is not a plain non-negative decimal.
    pub fn parse(value: &str) -> Result<Self, ValidationError> {
        let trimmed = value.trim();
        let invalid = || ValidationError::InvalidRate {
            value: value.to_owned(),
        };
        if trimmed.is_empty() {
            return Err(invalid());
        }

        let (int_part, frac_part) = match trimmed.split_once('.') {
            Some((int_part, frac_part)) => (int_part, frac_part),
            None => (trimmed, ""),
        };
        if int_part.is_empty() && frac_part.is_empty() {
            return Err(invalid());
        }
        if frac_part.len() > 4 {
            return Err(invalid());
        }

        let int_value: u64 = if int_part.is_empty() {
            0
        } else {
            int_part.parse().map_err(|_parse_err| invalid())?
        };

        let mut frac_value: u64 = 0;
        if !frac_part.is_empty() {
            frac_value = frac_part.parse().map_err(|_parse_err| invalid())?;
            for _ in frac_part.len()..4 {
                frac_value = frac_value.saturating_mul(10);
            }
        }

        let per_10000 = int_value
            .checked_mul(RATE_SCALE)
            .and_then(|scaled| scaled.checked_add(frac_value))
            .ok_or_else(invalid)?;
        Ok(Self { per_10000 })
    }
}

impl fmt::Display for RateBound {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        let int_part = self.per_10000 / RATE_SCALE;
        let frac_part = self.per_10000 % RATE_SCALE;
        if frac_part == 0 {
            return write!(formatter, "{}", int_part);
        }
        let digits = format!("{:04}", frac_part);
        write!(formatter, "{}.{}", int_part, digits.trim_end_matches('0'))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Threshold {
    /// 95th-percentile request latency must stay below the given bound.
    DurationP95Below { ms: u64 },
    /// The `errors` Rate (failed iterations / observed iterations) must stay
    /// below the given bound.
    ErrorRateBelow { bound: RateBound },
}

impl fmt::Display for Threshold {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Threshold::DurationP95Below { ms } => {
                write!(formatter, "http_req_duration: p(95)<{}", ms)
            }
            Threshold::ErrorRateBelow { bound } => {
                write!(formatter, "errors: rate<{}", bound)
            }
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct ThresholdResult {
    pub threshold: Threshold,
    pub passed: bool,
}

/// Evaluate every declared threshold against a frozen snapshot.
///
/// Pure and deterministic: evaluating the same snapshot twice yields
/// identical results.
#[must_use]
pub fn evaluate(snapshot: &SummarySnapshot, thresholds: &[Threshold]) -> Vec<ThresholdResult> {
    thresholds
        .iter()
        .map(|threshold| ThresholdResult {
            threshold: *threshold,
            passed: check(snapshot, *threshold),
        })
        .collect()
}

fn check(snapshot: &SummarySnapshot, threshold: Threshold) -> bool {
    match threshold {
        Threshold::DurationP95Below { ms } => snapshot.p95_latency_ms < ms,
        Threshold::ErrorRateBelow { bound } => {
            if snapshot.error_total == 0 {
                return true;
            }
            let lhs = u128::from(snapshot.error_failures).saturating_mul(u128::from(RATE_SCALE));
            let rhs =
                u128::from(snapshot.error_total).saturating_mul(u128::from(bound.per_10000()));
            lhs < rhs
        }
    }
}
