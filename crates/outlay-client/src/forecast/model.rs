//! Additive trend/seasonality model.
//!
//! `y(t) = trend(t) + Σ seasonality_k(t) + ε`, where the trend is piecewise
//! linear with potential changepoints over the early history and each
//! seasonality is a truncated Fourier series. Coefficients are the MAP
//! estimate under Gaussian priors, i.e. a ridge solve of the normal equations,
//! so fitting is closed-form and deterministic.

use std::f64::consts::PI;

use chrono::NaiveDateTime;
use statrs::distribution::{ContinuousCDF, Normal};
use tracing::debug;

use crate::forecast::linalg::{Cholesky, SquareMatrix};
use crate::forecast::policy::{
    FORECAST_POLICY_VERSION, ForecastPolicy, SeasonalitySpec, SeasonalityToggle,
};
use crate::forecast::types::{ForecastPoint, TimeSeriesPoint};
use crate::{ClientError, ClientResult};

const SECONDS_PER_DAY: f64 = 86_400.0;
const MIN_DISTINCT_TIMESTAMPS: usize = 2;
const YEARLY_MIN_SPAN_DAYS: f64 = 730.0;
const WEEKLY_MIN_SPAN_DAYS: f64 = 14.0;
const WEEKLY_MAX_SPACING_DAYS: f64 = 7.0;
/// Lower bound on the noise variance in scaled units (σ = 1% of max |y|), so an
/// exact fit still yields an interval of positive width.
const MIN_RESIDUAL_VARIANCE: f64 = 1e-4;

#[derive(Debug, Clone, Copy)]
pub struct AdditiveTrendModel {
    policy: ForecastPolicy,
}

#[derive(Debug, Clone)]
struct FourierComponent {
    name: &'static str,
    period_days: f64,
    order: usize,
}

/// Maps a timestamp onto one row of the design matrix.
#[derive(Debug, Clone)]
struct DesignLayout {
    start: NaiveDateTime,
    span_seconds: f64,
    changepoints: Vec<f64>,
    seasonalities: Vec<FourierComponent>,
}

#[derive(Debug, Clone)]
pub struct FittedModel {
    layout: DesignLayout,
    coefficients: Vec<f64>,
    factor: Cholesky,
    y_scale: f64,
    residual_variance: f64,
    trend_delta_scale: f64,
    z_score: f64,
    last_timestamp: NaiveDateTime,
}

impl AdditiveTrendModel {
    pub fn new(policy: ForecastPolicy) -> Self {
        Self { policy }
    }

    pub fn fit(&self, history: &[TimeSeriesPoint]) -> ClientResult<FittedModel> {
        let mut rows = history.to_vec();
        rows.sort_by(|left, right| left.timestamp.cmp(&right.timestamp));

        let distinct = count_distinct_timestamps(&rows);
        if distinct < MIN_DISTINCT_TIMESTAMPS {
            return Err(ClientError::insufficient_history(
                MIN_DISTINCT_TIMESTAMPS,
                distinct,
            ));
        }
        if rows.iter().any(|row| !row.value.is_finite()) {
            return Err(ClientError::model_fit_failed("values must be finite"));
        }

        let (Some(first), Some(last)) = (rows.first(), rows.last()) else {
            return Err(ClientError::insufficient_history(
                MIN_DISTINCT_TIMESTAMPS,
                0,
            ));
        };
        let start = first.timestamp;
        let last_timestamp = last.timestamp;
        let span_seconds = seconds_between(start, last_timestamp);

        let y_scale = rows
            .iter()
            .map(|row| row.value.abs())
            .fold(0.0_f64, f64::max);
        let y_scale = if y_scale > 0.0 { y_scale } else { 1.0 };

        let mut layout = DesignLayout {
            start,
            span_seconds,
            changepoints: Vec::new(),
            seasonalities: Vec::new(),
        };
        layout.changepoints = place_changepoints(&layout, &rows, self.policy);
        layout.seasonalities = resolve_seasonalities(&rows, span_seconds, self.policy);

        let penalties = layout.penalties(self.policy);
        let width = penalties.len();
        let mut gram = SquareMatrix::zeros(width);
        let mut moment = vec![0.0; width];
        let mut design = Vec::with_capacity(rows.len());
        for row in &rows {
            let x = layout.row(row.timestamp);
            let y = row.value / y_scale;
            gram.add_outer(&x);
            for (target, feature) in moment.iter_mut().zip(&x) {
                *target += feature * y;
            }
            design.push((x, y));
        }
        for (index, penalty) in penalties.iter().enumerate() {
            gram.add(index, index, *penalty);
        }

        let factor = Cholesky::decompose(&gram).ok_or_else(|| {
            ClientError::model_fit_failed("penalized design matrix is not positive definite")
        })?;
        let coefficients = factor.solve(&moment);
        if coefficients.iter().any(|value| !value.is_finite()) {
            return Err(ClientError::model_fit_failed(
                "solver produced non-finite coefficients",
            ));
        }

        let residual_sum_squares = design
            .iter()
            .map(|(x, y)| (y - dot(x, &coefficients)).powi(2))
            .sum::<f64>();
        let degrees_of_freedom = rows.len().saturating_sub(2).max(1);
        let residual_variance =
            (residual_sum_squares / degrees_of_freedom as f64).max(MIN_RESIDUAL_VARIANCE);

        let deltas = layout.changepoint_coefficients(&coefficients);
        let trend_delta_scale = if deltas.is_empty() {
            0.0
        } else {
            deltas.iter().map(|value| value.abs()).sum::<f64>() / deltas.len() as f64
        };

        let standard_normal = Normal::new(0.0, 1.0)
            .map_err(|error| ClientError::model_fit_failed(&error.to_string()))?;
        let z_score = standard_normal.inverse_cdf(self.policy.upper_quantile());

        debug!(
            policy = FORECAST_POLICY_VERSION,
            rows = rows.len(),
            distinct_timestamps = distinct,
            changepoints = layout.changepoints.len(),
            seasonalities = ?layout.seasonality_names(),
            residual_variance,
            "fitted additive trend model"
        );

        Ok(FittedModel {
            layout,
            coefficients,
            factor,
            y_scale,
            residual_variance,
            trend_delta_scale,
            z_score,
            last_timestamp,
        })
    }
}

impl FittedModel {
    pub fn last_timestamp(&self) -> NaiveDateTime {
        self.last_timestamp
    }

    pub fn seasonality_names(&self) -> Vec<&'static str> {
        self.layout.seasonality_names()
    }

    pub fn predict(&self, timestamps: &[NaiveDateTime]) -> ClientResult<Vec<ForecastPoint>> {
        let mut points = Vec::with_capacity(timestamps.len());
        for timestamp in timestamps {
            let x = self.layout.row(*timestamp);
            let yhat = dot(&x, &self.coefficients);

            let leverage = self.factor.inverse_quadratic_form(&x);
            let variance = self.residual_variance * (1.0 + leverage)
                + self.trend_variance(self.layout.scaled_time(*timestamp));
            let half_width = self.z_score * variance.max(0.0).sqrt();

            let point = ForecastPoint {
                date: timestamp.date(),
                yhat: yhat * self.y_scale,
                yhat_lower: (yhat - half_width) * self.y_scale,
                yhat_upper: (yhat + half_width) * self.y_scale,
            };
            if !(point.yhat.is_finite() && point.yhat_lower.is_finite() && point.yhat_upper.is_finite())
            {
                return Err(ClientError::model_fit_failed(
                    "forecast produced non-finite values",
                ));
            }
            points.push(point);
        }
        Ok(points)
    }

    /// Variance from future slope changes: changepoints keep arriving at the
    /// historical rate with Laplace-distributed magnitude.
    fn trend_variance(&self, scaled_time: f64) -> f64 {
        if scaled_time <= 1.0 || self.trend_delta_scale == 0.0 {
            return 0.0;
        }
        let rate = self.layout.changepoints.len() as f64;
        let laplace_variance = 2.0 * self.trend_delta_scale.powi(2);
        rate * laplace_variance * (scaled_time - 1.0).powi(3) / 3.0
    }
}

impl DesignLayout {
    fn scaled_time(&self, timestamp: NaiveDateTime) -> f64 {
        seconds_between(self.start, timestamp) / self.span_seconds
    }

    /// `[1, t, (t - s_1)+ .. (t - s_k)+, sin/cos pairs ..]`
    fn row(&self, timestamp: NaiveDateTime) -> Vec<f64> {
        let t = self.scaled_time(timestamp);
        let mut x = Vec::with_capacity(self.width());
        x.push(1.0);
        x.push(t);
        for changepoint in &self.changepoints {
            x.push((t - changepoint).max(0.0));
        }

        let days = days_since_epoch(timestamp);
        for component in &self.seasonalities {
            for harmonic in 1..=component.order {
                let angle = 2.0 * PI * harmonic as f64 * days / component.period_days;
                x.push(angle.sin());
                x.push(angle.cos());
            }
        }
        x
    }

    fn width(&self) -> usize {
        2 + self.changepoints.len()
            + self
                .seasonalities
                .iter()
                .map(|component| component.order * 2)
                .sum::<usize>()
    }

    /// Ridge weights per column; intercept and base slope are unpenalized.
    fn penalties(&self, policy: ForecastPolicy) -> Vec<f64> {
        let mut penalties = vec![0.0, 0.0];
        penalties.extend(std::iter::repeat_n(
            policy.changepoint_penalty(),
            self.changepoints.len(),
        ));
        penalties.extend(std::iter::repeat_n(
            policy.seasonality_penalty(),
            self.width() - 2 - self.changepoints.len(),
        ));
        penalties
    }

    fn changepoint_coefficients<'a>(&self, coefficients: &'a [f64]) -> &'a [f64] {
        &coefficients[2..2 + self.changepoints.len()]
    }

    fn seasonality_names(&self) -> Vec<&'static str> {
        self.seasonalities
            .iter()
            .map(|component| component.name)
            .collect()
    }
}

/// Changepoints sit on history timestamps spread evenly over the first
/// `changepoint_range` of the rows; the first row never hosts one.
fn place_changepoints(
    layout: &DesignLayout,
    rows: &[TimeSeriesPoint],
    policy: ForecastPolicy,
) -> Vec<f64> {
    let eligible = (rows.len() as f64 * policy.changepoint_range).floor() as usize;
    let count = policy.max_changepoints.min(eligible.saturating_sub(1));
    if count == 0 {
        return Vec::new();
    }

    let step = (eligible - 1) as f64 / count as f64;
    (1..=count)
        .map(|position| (position as f64 * step).round() as usize)
        .filter_map(|index| rows.get(index))
        .map(|row| layout.scaled_time(row.timestamp))
        .collect()
}

fn resolve_seasonalities(
    rows: &[TimeSeriesPoint],
    span_seconds: f64,
    policy: ForecastPolicy,
) -> Vec<FourierComponent> {
    let span_days = span_seconds / SECONDS_PER_DAY;
    let min_spacing_days = min_spacing_seconds(rows) / SECONDS_PER_DAY;

    policy
        .seasonalities()
        .into_iter()
        .filter(|spec| seasonality_enabled(spec, span_days, min_spacing_days))
        .map(|spec| FourierComponent {
            name: spec.name,
            period_days: spec.period_days,
            order: spec.fourier_order,
        })
        .collect()
}

fn seasonality_enabled(spec: &SeasonalitySpec, span_days: f64, min_spacing_days: f64) -> bool {
    match spec.toggle {
        SeasonalityToggle::Enabled => true,
        SeasonalityToggle::Disabled => false,
        SeasonalityToggle::Auto => {
            if spec.period_days >= 365.0 {
                span_days >= YEARLY_MIN_SPAN_DAYS
            } else if spec.period_days >= 7.0 {
                span_days >= WEEKLY_MIN_SPAN_DAYS && min_spacing_days < WEEKLY_MAX_SPACING_DAYS
            } else {
                min_spacing_days < 1.0
            }
        }
    }
}

fn count_distinct_timestamps(sorted: &[TimeSeriesPoint]) -> usize {
    let mut count = 0;
    let mut previous: Option<NaiveDateTime> = None;
    for row in sorted {
        if previous != Some(row.timestamp) {
            count += 1;
            previous = Some(row.timestamp);
        }
    }
    count
}

fn min_spacing_seconds(sorted: &[TimeSeriesPoint]) -> f64 {
    sorted
        .windows(2)
        .map(|pair| seconds_between(pair[0].timestamp, pair[1].timestamp))
        .filter(|gap| *gap > 0.0)
        .fold(f64::INFINITY, f64::min)
}

fn seconds_between(from: NaiveDateTime, to: NaiveDateTime) -> f64 {
    (to - from).num_milliseconds() as f64 / 1000.0
}

fn days_since_epoch(timestamp: NaiveDateTime) -> f64 {
    let utc = timestamp.and_utc();
    (utc.timestamp() as f64 + f64::from(utc.timestamp_subsec_millis()) / 1000.0) / SECONDS_PER_DAY
}

fn dot(left: &[f64], right: &[f64]) -> f64 {
    left.iter().zip(right).map(|(a, b)| a * b).sum()
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime};

    use super::AdditiveTrendModel;
    use crate::forecast::policy::FORECAST_POLICY_V1;
    use crate::forecast::timeline::month_end_timeline;
    use crate::forecast::types::TimeSeriesPoint;
    use crate::input::date::month_end_after;

    fn monthly_series(months: u32, value: impl Fn(u32) -> f64) -> Vec<TimeSeriesPoint> {
        let origin = NaiveDate::from_ymd_opt(2023, 1, 1).unwrap_or(NaiveDate::MIN);
        (0..months)
            .map(|offset| TimeSeriesPoint {
                timestamp: month_end_after(origin, offset).and_time(NaiveTime::MIN),
                value: value(offset),
            })
            .collect()
    }

    fn at(day: i64) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 1, 1)
            .unwrap_or(NaiveDate::MIN)
            .and_time(NaiveTime::MIN)
            + Duration::days(day)
    }

    #[test]
    fn constant_history_forecasts_the_constant() {
        let history = monthly_series(24, |_| 100.0);
        let fitted = AdditiveTrendModel::new(FORECAST_POLICY_V1).fit(&history);
        assert!(fitted.is_ok());
        if let Ok(model) = fitted {
            let future = month_end_timeline(model.last_timestamp(), 12);
            let forecast = model.predict(&future);
            assert!(forecast.is_ok());
            if let Ok(points) = forecast {
                assert_eq!(points.len(), 12);
                for point in points {
                    assert!((point.yhat - 100.0).abs() < 1e-3);
                    assert!(point.yhat_lower <= 100.0 + 1e-3);
                    assert!(point.yhat_upper >= 100.0 - 1e-3);
                }
            }
        }
    }

    #[test]
    fn linear_history_extrapolates_upward() {
        let history = monthly_series(18, |offset| 50.0 + 5.0 * f64::from(offset));
        let fitted = AdditiveTrendModel::new(FORECAST_POLICY_V1).fit(&history);
        assert!(fitted.is_ok());
        if let Ok(model) = fitted {
            let future = month_end_timeline(model.last_timestamp(), 12);
            let forecast = model.predict(&future);
            assert!(forecast.is_ok());
            if let Ok(points) = forecast {
                assert!(points[0].yhat > 120.0);
                assert!(points[11].yhat > points[0].yhat);
            }
        }
    }

    #[test]
    fn bounds_widen_with_noisy_history() {
        let history = monthly_series(24, |offset| {
            if offset % 2 == 0 { 80.0 } else { 120.0 }
        });
        let fitted = AdditiveTrendModel::new(FORECAST_POLICY_V1).fit(&history);
        assert!(fitted.is_ok());
        if let Ok(model) = fitted {
            let future = month_end_timeline(model.last_timestamp(), 12);
            let forecast = model.predict(&future);
            assert!(forecast.is_ok());
            if let Ok(points) = forecast {
                for point in points {
                    assert!(point.yhat_lower < point.yhat);
                    assert!(point.yhat < point.yhat_upper);
                }
            }
        }
    }

    #[test]
    fn unordered_duplicates_fit_like_sorted_input() {
        let sorted = vec![
            TimeSeriesPoint { timestamp: at(0), value: 10.0 },
            TimeSeriesPoint { timestamp: at(0), value: 14.0 },
            TimeSeriesPoint { timestamp: at(31), value: 20.0 },
            TimeSeriesPoint { timestamp: at(60), value: 26.0 },
        ];
        let mut shuffled = sorted.clone();
        shuffled.reverse();

        let model = AdditiveTrendModel::new(FORECAST_POLICY_V1);
        let left = model.fit(&sorted);
        let right = model.fit(&shuffled);
        assert!(left.is_ok() && right.is_ok());
        if let (Ok(left_model), Ok(right_model)) = (left, right) {
            let future = month_end_timeline(left_model.last_timestamp(), 3);
            let left_points = left_model.predict(&future);
            let right_points = right_model.predict(&future);
            assert!(left_points.is_ok() && right_points.is_ok());
            if let (Ok(a), Ok(b)) = (left_points, right_points) {
                for (l, r) in a.iter().zip(&b) {
                    assert!((l.yhat - r.yhat).abs() < 1e-9);
                }
            }
        }
    }

    #[test]
    fn single_timestamp_is_insufficient_history() {
        let history = vec![
            TimeSeriesPoint { timestamp: at(3), value: 10.0 },
            TimeSeriesPoint { timestamp: at(3), value: 12.0 },
        ];
        let fitted = AdditiveTrendModel::new(FORECAST_POLICY_V1).fit(&history);
        assert!(fitted.is_err());
        if let Err(error) = fitted {
            assert_eq!(error.code, "insufficient_history");
        }
    }

    #[test]
    fn seasonalities_follow_history_shape() {
        let monthly = AdditiveTrendModel::new(FORECAST_POLICY_V1).fit(&monthly_series(36, |_| 1.0));
        assert!(monthly.is_ok());
        if let Ok(model) = monthly {
            assert_eq!(model.seasonality_names(), vec!["yearly", "daily"]);
        }

        let daily = (0..30)
            .map(|day| TimeSeriesPoint { timestamp: at(day), value: 5.0 })
            .collect::<Vec<TimeSeriesPoint>>();
        let dense = AdditiveTrendModel::new(FORECAST_POLICY_V1).fit(&daily);
        assert!(dense.is_ok());
        if let Ok(model) = dense {
            assert_eq!(model.seasonality_names(), vec!["weekly", "daily"]);
        }
    }

    #[test]
    fn exact_two_point_fit_keeps_open_bounds() {
        let history = vec![
            TimeSeriesPoint { timestamp: at(4), value: 10.0 },
            TimeSeriesPoint { timestamp: at(35), value: 20.0 },
        ];
        let fitted = AdditiveTrendModel::new(FORECAST_POLICY_V1).fit(&history);
        assert!(fitted.is_ok());
        if let Ok(model) = fitted {
            let future = month_end_timeline(model.last_timestamp(), 12);
            let forecast = model.predict(&future);
            assert!(forecast.is_ok());
            if let Ok(points) = forecast {
                for point in points {
                    assert!(point.yhat_lower < point.yhat);
                    assert!(point.yhat < point.yhat_upper);
                }
            }
        }
    }
}
