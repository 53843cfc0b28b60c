use chrono::NaiveDate;

use crate::analysis::slicer::YearMonthSlice;
use crate::config::SEASONALITY;

/// One observation of a qualifying slice with its per-slice features.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DerivedObservation {
    pub date: NaiveDate,
    pub close: f64,
    pub daily_return: f64,
    /// 1-based, gap-free index within the slice
    pub trading_day: usize,
    pub trading_week: usize,
    pub day_of_month: u32,
    /// Cumulative return rebased on the slice's first close
    pub month_return: f64,
    /// Centered rolling mean of daily returns, `None` at the slice edges
    pub rolling_momentum: Option<f64>,
    pub is_win: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DerivedSlice {
    pub year: i32,
    pub rows: Vec<DerivedObservation>,
}

impl DerivedSlice {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

pub fn trading_week(trading_day: usize) -> usize {
    (trading_day - 1) / SEASONALITY.features.trading_days_per_week + 1
}

/// Centered rolling mean over `window` points. Positions without a full
/// window on both sides stay `None`, as does everything when the input is
/// shorter than the window. A window holding a non-finite value is `None`.
pub fn centered_rolling_mean(values: &[f64], window: usize) -> Vec<Option<f64>> {
    let mut out = vec![None; values.len()];
    if window == 0 || values.len() < window {
        return out;
    }
    let half = window / 2;
    for (offset, chunk) in values.windows(window).enumerate() {
        if chunk.iter().all(|v| v.is_finite()) {
            out[offset + half] = Some(chunk.iter().sum::<f64>() / window as f64);
        }
    }
    out
}

pub fn derive_features(slice: &YearMonthSlice) -> DerivedSlice {
    let observations = &slice.observations;

    let Some(first_close) = observations.first().map(|obs| obs.close) else {
        return DerivedSlice {
            year: slice.year,
            rows: Vec::new(),
        };
    };

    let returns: Vec<f64> = observations
        .iter()
        .map(|obs| obs.daily_return.unwrap_or(f64::NAN))
        .collect();
    let momentum = centered_rolling_mean(&returns, SEASONALITY.features.momentum_window);

    let rows = observations
        .iter()
        .zip(momentum)
        .enumerate()
        .map(|(idx, (obs, rolling_momentum))| {
            let trading_day = idx + 1;
            let daily_return = returns[idx];
            DerivedObservation {
                date: obs.date,
                close: obs.close,
                daily_return,
                trading_day,
                trading_week: trading_week(trading_day),
                day_of_month: obs.day_of_month(),
                month_return: obs.close / first_close - 1.0,
                rolling_momentum,
                is_win: daily_return > 0.0,
            }
        })
        .collect();

    DerivedSlice {
        year: slice.year,
        rows,
    }
}
