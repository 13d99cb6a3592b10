use serde::Serialize;

/// Linear map of an observed `[min, max]` onto `feature_range`.
///
/// Learned per aggregation run and never persisted, so normalized values from
/// different runs are not comparable.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MinMaxScaler {
    pub feature_range: (f64, f64),
    pub data_min: f64,
    pub data_max: f64,
}

impl MinMaxScaler {
    /// Returns `None` for an empty column.
    pub fn fit(values: &[f64]) -> Option<Self> {
        Self::fit_with_range(values, (0.0, 1.0))
    }

    pub fn fit_with_range(values: &[f64], feature_range: (f64, f64)) -> Option<Self> {
        let data_min = values.iter().copied().reduce(f64::min)?;
        let data_max = values.iter().copied().reduce(f64::max)?;
        Some(Self {
            feature_range,
            data_min,
            data_max,
        })
    }

    pub fn data_range(&self) -> f64 {
        self.data_max - self.data_min
    }

    pub fn transform(&self, value: f64) -> f64 {
        let (low, high) = self.feature_range;
        low + (value - self.data_min) * (high - low) / self.effective_range()
    }

    pub fn inverse_transform(&self, scaled: f64) -> f64 {
        let (low, high) = self.feature_range;
        self.data_min + (scaled - low) * self.effective_range() / (high - low)
    }

    pub fn transform_all(&self, values: &[f64]) -> Vec<f64> {
        values.iter().map(|value| self.transform(*value)).collect()
    }

    // A zero-width range maps every value to the lower bound.
    fn effective_range(&self) -> f64 {
        let range = self.data_range();
        if range == 0.0 { 1.0 } else { range }
    }
}

#[cfg(test)]
mod tests {
    use super::MinMaxScaler;

    #[test]
    fn maps_extremes_onto_unit_interval() {
        let scaler = MinMaxScaler::fit(&[10.0, 20.0, 30.0]);
        assert!(scaler.is_some());
        if let Some(fitted) = scaler {
            assert_eq!(fitted.transform_all(&[10.0, 20.0, 30.0]), vec![0.0, 0.5, 1.0]);
            assert!((fitted.inverse_transform(0.25) - 15.0).abs() < 1e-12);
        }
    }

    #[test]
    fn constant_column_maps_to_lower_bound() {
        let scaler = MinMaxScaler::fit(&[42.0, 42.0]);
        assert!(scaler.is_some());
        if let Some(fitted) = scaler {
            assert_eq!(fitted.data_range(), 0.0);
            assert_eq!(fitted.transform_all(&[42.0, 42.0]), vec![0.0, 0.0]);
        }
    }

    #[test]
    fn empty_column_has_no_scaler() {
        assert!(MinMaxScaler::fit(&[]).is_none());
    }
}
