//! Descriptive statistics and frequency tables.

use crate::table::value::Value;
use std::collections::HashMap;

/// Count, moments and quartiles of a numeric column's non-null values.
#[derive(Clone, Debug, PartialEq)]
pub struct Describe {
    pub count: usize,
    pub mean: f64,
    /// Sample standard deviation (N - 1 denominator)
    pub std: f64,
    pub min: f64,
    pub q25: f64,
    pub q50: f64,
    pub q75: f64,
    pub max: f64,
}

impl Describe {
    /// With no values every statistic except `count` is NaN; with one value `std` is NaN.
    pub fn from_values(values: &[f64]) -> Self {
        let count = values.len();
        if count == 0 {
            return Describe {
                count,
                mean: f64::NAN,
                std: f64::NAN,
                min: f64::NAN,
                q25: f64::NAN,
                q50: f64::NAN,
                q75: f64::NAN,
                max: f64::NAN,
            };
        }

        let mut sorted = values.to_vec();
        sorted.sort_by(f64::total_cmp);
        let mean = values.iter().sum::<f64>() / count as f64;
        let std = if count < 2 {
            f64::NAN
        } else {
            let squares = values.iter().map(|value| (value - mean).powi(2)).sum::<f64>();
            (squares / (count - 1) as f64).sqrt()
        };
        Describe {
            count,
            mean,
            std,
            min: sorted[0],
            q25: quantile(&sorted, 0.25),
            q50: quantile(&sorted, 0.5),
            q75: quantile(&sorted, 0.75),
            max: sorted[count - 1],
        }
    }

    /// (statistic name, value) in report order.
    pub fn rows(&self) -> [(&'static str, f64); 8] {
        [
            ("count", self.count as f64),
            ("mean", self.mean),
            ("std", self.std),
            ("min", self.min),
            ("25%", self.q25),
            ("50%", self.q50),
            ("75%", self.q75),
            ("max", self.max),
        ]
    }
}

/// Linear interpolation between the order statistics around `q * (n - 1)`.
/// `sorted` must be non-empty and ascending.
fn quantile(sorted: &[f64], q: f64) -> f64 {
    let position = q * (sorted.len() - 1) as f64;
    let lower = position.floor() as usize;
    let upper = position.ceil() as usize;
    let fraction = position - lower as f64;
    sorted[lower] + (sorted[upper] - sorted[lower]) * fraction
}

/// Distinct values with their occurrence counts, most frequent first.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Frequencies {
    pub entries: Vec<(Value, usize)>,
}

impl Frequencies {
    /// Counts non-null values. Equal counts keep first-seen order.
    pub fn count<'a, I>(values: I) -> Self
    where
        I: IntoIterator<Item = &'a Value>,
    {
        let mut positions = HashMap::<(u8, String), usize>::new();
        let mut entries = Vec::<(Value, usize)>::new();
        for value in values.into_iter().filter(|value| !value.is_null()) {
            match positions.get(&value.distinct_key()) {
                Some(position) => entries[*position].1 += 1,
                None => {
                    positions.insert(value.distinct_key(), entries.len());
                    entries.push((value.to_owned(), 1));
                }
            }
        }
        // stable: ties stay in first-seen order
        entries.sort_by(|a, b| b.1.cmp(&a.1));
        Frequencies { entries }
    }

    /// Keeps the `top` most frequent entries.
    pub fn truncate(mut self, top: Option<usize>) -> Self {
        if let Some(top) = top {
            self.entries.truncate(top);
        }
        self
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
