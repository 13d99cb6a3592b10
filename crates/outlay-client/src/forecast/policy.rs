/// Number of month-end periods every forecast projects.
pub const PREDICTION_LIMIT_IN_MONTHS: usize = 12;

/// Identifier for the model configuration below, logged with each fit.
pub const FORECAST_POLICY_VERSION: &str = "additive-trend/v1";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeasonalityToggle {
    /// Enabled when the history is long and dense enough to observe the cycle.
    Auto,
    Enabled,
    Disabled,
}

#[derive(Debug, Clone, Copy)]
pub struct SeasonalitySpec {
    pub name: &'static str,
    pub period_days: f64,
    pub fourier_order: usize,
    pub toggle: SeasonalityToggle,
}

/// Fit configuration for the additive trend/seasonality model.
///
/// Prior scales are standard deviations of the coefficient priors and are
/// compared against `observation_noise_scale` to derive ridge penalties, so a
/// small prior means a strongly shrunk coefficient.
#[derive(Debug, Clone, Copy)]
pub struct ForecastPolicy {
    pub interval_width: f64,
    pub max_changepoints: usize,
    pub changepoint_range: f64,
    pub changepoint_prior_scale: f64,
    pub seasonality_prior_scale: f64,
    pub observation_noise_scale: f64,
    pub yearly: SeasonalitySpec,
    pub weekly: SeasonalitySpec,
    pub daily: SeasonalitySpec,
}

impl ForecastPolicy {
    pub fn seasonalities(self) -> [SeasonalitySpec; 3] {
        [self.yearly, self.weekly, self.daily]
    }

    pub fn changepoint_penalty(self) -> f64 {
        (self.observation_noise_scale / self.changepoint_prior_scale).powi(2)
    }

    pub fn seasonality_penalty(self) -> f64 {
        (self.observation_noise_scale / self.seasonality_prior_scale).powi(2)
    }

    /// Two-sided quantile probability of the upper bound.
    pub fn upper_quantile(self) -> f64 {
        0.5 + self.interval_width / 2.0
    }
}

pub const FORECAST_POLICY_V1: ForecastPolicy = ForecastPolicy {
    interval_width: 0.92,
    max_changepoints: 25,
    changepoint_range: 0.8,
    changepoint_prior_scale: 0.05,
    seasonality_prior_scale: 10.0,
    observation_noise_scale: 0.5,
    yearly: SeasonalitySpec {
        name: "yearly",
        period_days: 365.25,
        fourier_order: 10,
        toggle: SeasonalityToggle::Auto,
    },
    weekly: SeasonalitySpec {
        name: "weekly",
        period_days: 7.0,
        fourier_order: 3,
        toggle: SeasonalityToggle::Auto,
    },
    // Forced on even for coarse data; the default would leave it off.
    daily: SeasonalitySpec {
        name: "daily",
        period_days: 1.0,
        fourier_order: 4,
        toggle: SeasonalityToggle::Enabled,
    },
};
