//! Price and return containers for GARCH models.
//!
//! Purpose
//! -------
//! Provide small, validated containers for the price input and the derived
//! percentage-return series. All input validation happens here, so the
//! likelihood evaluator can rely on finite returns.
//!
//! Key behaviors
//! -------------
//! - [`PriceSeries`] holds `(timestamp, price)` pairs with equal lengths and
//!   strictly increasing timestamps. Price values are checked when returns
//!   are derived.
//! - [`ReturnSeries::from_prices`] computes percentage returns, simple
//!   (`100 · (p_t − p_{t−1}) / p_{t−1}`, the default) or log
//!   (`100 · ln(p_t / p_{t−1})`), labeled with the later timestamp.
//! - [`ReturnSeries::new`] wraps already-computed returns without timestamps.
//! - Mean and population variance (divisor `n`) are cached at construction.
//!
//! Invariants & assumptions
//! ------------------------
//! - A `ReturnSeries` is non-empty and every value is finite.
//! - When present, `timestamps.len() == values.len()`.
//!
//! Testing notes
//! -------------
//! - Unit tests cover the return formulas, length `n − 1`, invalid prices,
//!   non-finite returns, ordering checks, and cached moments.
use crate::volatility::{
    core::validation::{validate_prices, validate_returns, validate_timestamps},
    errors::{GarchError, GarchResult},
};
use chrono::NaiveDateTime;
use ndarray::Array1;

/// How returns are derived from consecutive prices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReturnKind {
    /// `100 · (p_t − p_{t−1}) / p_{t−1}`.
    #[default]
    Simple,
    /// `100 · ln(p_t / p_{t−1})`.
    Log,
}

impl ReturnKind {
    fn apply(&self, prev: f64, curr: f64) -> f64 {
        match self {
            ReturnKind::Simple => 100.0 * (curr - prev) / prev,
            ReturnKind::Log => 100.0 * (curr / prev).ln(),
        }
    }
}

/// Ordered `(timestamp, price)` observations.
#[derive(Debug, Clone, PartialEq)]
pub struct PriceSeries {
    timestamps: Vec<NaiveDateTime>,
    prices: Vec<f64>,
}

impl PriceSeries {
    /// # Errors
    /// - `LengthMismatch` when the vectors differ in length.
    /// - `NonIncreasingTimestamp` at the first out-of-order timestamp.
    pub fn new(timestamps: Vec<NaiveDateTime>, prices: Vec<f64>) -> GarchResult<Self> {
        if timestamps.len() != prices.len() {
            return Err(GarchError::LengthMismatch {
                timestamps: timestamps.len(),
                prices: prices.len(),
            });
        }
        validate_timestamps(&timestamps)?;
        Ok(PriceSeries { timestamps, prices })
    }

    pub fn timestamps(&self) -> &[NaiveDateTime] {
        &self.timestamps
    }

    pub fn prices(&self) -> &[f64] {
        &self.prices
    }

    pub fn len(&self) -> usize {
        self.prices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.prices.is_empty()
    }
}

/// Ordered percentage returns, optionally labeled with timestamps.
#[derive(Debug, Clone, PartialEq)]
pub struct ReturnSeries {
    values: Array1<f64>,
    timestamps: Option<Vec<NaiveDateTime>>,
    kind: Option<ReturnKind>,
    mean: f64,
    variance: f64,
}

impl ReturnSeries {
    /// Derive returns from `prices`; the result has `prices.len() − 1` entries.
    ///
    /// # Errors
    /// - `InsufficientData` with fewer than 2 prices.
    /// - `InvalidPrice` for the first non-positive or non-finite price.
    /// - `NonFiniteReturn` if a price ratio overflows.
    pub fn from_prices(prices: &PriceSeries, kind: ReturnKind) -> GarchResult<Self> {
        if prices.len() < 2 {
            return Err(GarchError::InsufficientData { needed: 2, found: prices.len() });
        }
        validate_prices(prices.prices())?;
        let values: Array1<f64> =
            prices.prices().windows(2).map(|w| kind.apply(w[0], w[1])).collect();
        validate_returns(values.view())?;
        let timestamps = prices.timestamps()[1..].to_vec();
        Ok(Self::build(values, Some(timestamps), Some(kind)))
    }

    /// Wrap already-computed returns (no timestamps, unknown kind).
    ///
    /// # Errors
    /// - `InsufficientData` for an empty array.
    /// - `NonFiniteReturn` for the first NaN/±inf.
    pub fn new(values: Array1<f64>) -> GarchResult<Self> {
        if values.is_empty() {
            return Err(GarchError::InsufficientData { needed: 1, found: 0 });
        }
        validate_returns(values.view())?;
        Ok(Self::build(values, None, None))
    }

    fn build(
        values: Array1<f64>, timestamps: Option<Vec<NaiveDateTime>>, kind: Option<ReturnKind>,
    ) -> Self {
        let n = values.len() as f64;
        let mean = values.sum() / n;
        let variance = values.iter().map(|r| (r - mean) * (r - mean)).sum::<f64>() / n;
        ReturnSeries { values, timestamps, kind, mean, variance }
    }

    pub fn values(&self) -> &Array1<f64> {
        &self.values
    }

    pub fn timestamps(&self) -> Option<&[NaiveDateTime]> {
        self.timestamps.as_deref()
    }

    pub fn kind(&self) -> Option<ReturnKind> {
        self.kind
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Sample mean.
    pub fn mean(&self) -> f64 {
        self.mean
    }

    /// Population sample variance (divisor `n`).
    pub fn variance(&self) -> f64 {
        self.variance
    }

    /// Last observed return, if any.
    pub fn last(&self) -> Option<f64> {
        self.values.last().copied()
    }

    /// `(timestamp, return)` pairs; timestamps are `None` for unlabeled series.
    pub fn pairs(&self) -> impl Iterator<Item = (Option<NaiveDateTime>, f64)> + '_ {
        self.values
            .iter()
            .enumerate()
            .map(move |(i, &r)| (self.timestamps.as_ref().map(|ts| ts[i]), r))
    }
}
