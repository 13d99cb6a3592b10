use std::collections::BTreeMap;

use serde::Serialize;

use crate::aggregate::features::DatedAmount;
use crate::aggregate::scaler::MinMaxScaler;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MonthlyAggregate {
    pub month: u32,
    pub amount: f64,
    pub amount_normalized: f64,
}

/// Sums amounts per month-of-year, ascending. Months with no rows are absent.
pub fn sum_by_month(rows: &[DatedAmount]) -> Vec<(u32, f64)> {
    let mut totals: BTreeMap<u32, f64> = BTreeMap::new();
    for row in rows {
        *totals.entry(row.features.month).or_insert(0.0) += row.amount;
    }
    totals.into_iter().collect()
}

/// Fits a scaler over the monthly totals and attaches normalized values.
pub fn normalize_totals(totals: &[(u32, f64)]) -> Option<(Vec<MonthlyAggregate>, MinMaxScaler)> {
    let amounts = totals.iter().map(|(_, amount)| *amount).collect::<Vec<f64>>();
    let scaler = MinMaxScaler::fit(&amounts)?;

    let monthly = totals
        .iter()
        .map(|(month, amount)| MonthlyAggregate {
            month: *month,
            amount: *amount,
            amount_normalized: scaler.transform(*amount),
        })
        .collect();
    Some((monthly, scaler))
}
