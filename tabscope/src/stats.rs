//! Column-level statistics shared by the analyzers.

use std::collections::HashMap;

use arrow::array::{Array, ArrayRef, AsArray, Int32Array, Int64Array};
use arrow::compute::cast;
use arrow::datatypes::{DataType, Float64Type, Int64Type};
use arrow::util::display::{ArrayFormatter, FormatOptions};

use crate::classify::is_floating;
use crate::error::{Result, TabscopeError};

/// Per-row missing flags: logical nulls, plus NaN in floating point columns.
pub fn missing_mask(array: &ArrayRef) -> Result<Vec<bool>> {
    let mut mask = match array.logical_nulls() {
        Some(nulls) => (0..array.len()).map(|i| nulls.is_null(i)).collect(),
        None => vec![false; array.len()],
    };
    if is_floating(array.data_type()) {
        let floats = cast(array, &DataType::Float64)?;
        for (flag, value) in mask.iter_mut().zip(floats.as_primitive::<Float64Type>().iter()) {
            if value.is_some_and(f64::is_nan) {
                *flag = true;
            }
        }
    }
    Ok(mask)
}

/// Number of missing values in a column.
pub fn missing_count(array: &ArrayRef) -> Result<usize> {
    if !is_floating(array.data_type()) {
        return Ok(array.logical_null_count());
    }
    Ok(missing_mask(array)?.into_iter().filter(|m| *m).count())
}

/// Non-missing values of a numeric column as `f64`.
pub fn numeric_values(array: &ArrayRef) -> Result<Vec<f64>> {
    let floats = cast(array, &DataType::Float64)?;
    Ok(floats
        .as_primitive::<Float64Type>()
        .iter()
        .flatten()
        .filter(|v| !v.is_nan())
        .collect())
}

/// Non-missing values of a datetime column in its native unit
/// (days for `Date32`, milliseconds for `Date64`, the timestamp unit otherwise).
pub fn datetime_ticks(array: &ArrayRef) -> Result<Vec<i64>> {
    let ticks = match array.data_type() {
        DataType::Date32 => cast(&cast(array, &DataType::Int32)?, &DataType::Int64)?,
        DataType::Date64 | DataType::Timestamp(_, _) => cast(array, &DataType::Int64)?,
        other => {
            return Err(TabscopeError::Internal(format!(
                "{other} is not a datetime type"
            )))
        }
    };
    Ok(ticks.as_primitive::<Int64Type>().iter().flatten().collect())
}

/// Renders ticks of a datetime type back into display strings.
pub fn format_ticks(ticks: &[i64], data_type: &DataType) -> Result<Vec<String>> {
    let array: ArrayRef = match data_type {
        DataType::Date32 => {
            let days = ticks
                .iter()
                .map(|&t| {
                    i32::try_from(t).map_err(|_| {
                        TabscopeError::Internal(format!("day offset {t} out of Date32 range"))
                    })
                })
                .collect::<Result<Vec<i32>>>()?;
            cast(&Int32Array::from(days), data_type)?
        }
        _ => cast(&Int64Array::from(ticks.to_vec()), data_type)?,
    };
    display_values(&array).map(|values| values.into_iter().map(Option::unwrap_or_default).collect())
}

/// Display strings for every row; `None` where the value is missing.
pub fn display_values(array: &ArrayRef) -> Result<Vec<Option<String>>> {
    let mask = missing_mask(array)?;
    let options = FormatOptions::default();
    let formatter = ArrayFormatter::try_new(array.as_ref(), &options)?;
    Ok(mask
        .iter()
        .enumerate()
        .map(|(i, missing)| (!missing).then(|| formatter.value(i).to_string()))
        .collect())
}

/// Distinct non-missing values with their counts, most frequent first.
///
/// Ties keep the order in which values first appear.
pub fn value_frequencies(values: &[Option<String>]) -> Vec<(String, u64)> {
    let mut counts: HashMap<&str, (u64, usize)> = HashMap::new();
    for (position, value) in values.iter().enumerate() {
        if let Some(value) = value {
            counts.entry(value.as_str()).or_insert((0, position)).0 += 1;
        }
    }
    let mut frequencies: Vec<_> = counts.into_iter().collect();
    frequencies.sort_by(|(_, (count_a, first_a)), (_, (count_b, first_b))| {
        count_b.cmp(count_a).then(first_a.cmp(first_b))
    });
    frequencies
        .into_iter()
        .map(|(value, (count, _))| (value.to_string(), count))
        .collect()
}

/// Arithmetic mean; NaN when empty.
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return f64::NAN;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Sample standard deviation (n - 1 denominator); NaN below two values.
pub fn sample_std(values: &[f64]) -> f64 {
    if values.len() < 2 {
        return f64::NAN;
    }
    let mean = mean(values);
    let sum_sq: f64 = values.iter().map(|v| (v - mean).powi(2)).sum();
    (sum_sq / (values.len() - 1) as f64).sqrt()
}

/// Quantile of ascending values by linear interpolation between closest ranks.
pub fn quantile(sorted: &[f64], p: f64) -> f64 {
    if sorted.is_empty() {
        return f64::NAN;
    }
    let position = p * (sorted.len() - 1) as f64;
    let lower = position.floor() as usize;
    let upper = position.ceil() as usize;
    let (Some(low), Some(high)) = (sorted.get(lower), sorted.get(upper)) else {
        return f64::NAN;
    };
    low + (high - low) * (position - lower as f64)
}

/// Formats a percentile as a row label: `0.25` → `25%`, `0.025` → `2.5%`.
pub fn percentile_label(p: f64) -> String {
    let percent = format!("{:.4}", p * 100.0);
    let trimmed = percent.trim_end_matches('0').trim_end_matches('.');
    format!("{trimmed}%")
}

#[cfg(test)]
mod tests {
    use super::*;
    use arrow::array::{Date32Array, Float64Array, NullArray, StringArray, TimestampSecondArray};
    use std::sync::Arc;

    #[test]
    fn test_missing_mask_counts_nan_in_floats() {
        let array: ArrayRef = Arc::new(Float64Array::from(vec![
            Some(1.0),
            None,
            Some(f64::NAN),
            Some(2.0),
        ]));
        assert_eq!(missing_mask(&array).unwrap(), vec![false, true, true, false]);
        assert_eq!(missing_count(&array).unwrap(), 2);
    }

    #[test]
    fn test_missing_count_null_array() {
        let array: ArrayRef = Arc::new(NullArray::new(3));
        assert_eq!(missing_count(&array).unwrap(), 3);
    }

    #[test]
    fn test_numeric_values_skip_missing() {
        let array: ArrayRef = Arc::new(Float64Array::from(vec![
            Some(1.5),
            None,
            Some(f64::NAN),
            Some(-2.0),
        ]));
        assert_eq!(numeric_values(&array).unwrap(), vec![1.5, -2.0]);
    }

    #[test]
    fn test_quantile_interpolates() {
        let values = [1.0, 2.0, 3.0, 4.0];
        assert_eq!(quantile(&values, 0.0), 1.0);
        assert_eq!(quantile(&values, 1.0), 4.0);
        assert!((quantile(&values, 0.5) - 2.5).abs() < 1e-12);
        assert!((quantile(&values, 0.25) - 1.75).abs() < 1e-12);
        assert!(quantile(&[], 0.5).is_nan());
    }

    #[test]
    fn test_mean_and_std() {
        let values = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
        assert!((mean(&values) - 5.0).abs() < 1e-12);
        assert!((sample_std(&values) - 2.138089935299395).abs() < 1e-12);
        assert!(sample_std(&[1.0]).is_nan());
        assert!(mean(&[]).is_nan());
    }

    #[test]
    fn test_value_frequencies_order() {
        let values = vec![
            Some("blue".to_string()),
            Some("red".to_string()),
            None,
            Some("red".to_string()),
            Some("green".to_string()),
        ];
        assert_eq!(
            value_frequencies(&values),
            vec![
                ("red".to_string(), 2),
                ("blue".to_string(), 1),
                ("green".to_string(), 1)
            ]
        );
    }

    #[test]
    fn test_display_values() {
        let array: ArrayRef = Arc::new(StringArray::from(vec![Some("a"), None]));
        assert_eq!(
            display_values(&array).unwrap(),
            vec![Some("a".to_string()), None]
        );
    }

    #[test]
    fn test_datetime_ticks_round_trip_through_display() {
        let dates: ArrayRef = Arc::new(Date32Array::from(vec![Some(0), None, Some(31)]));
        let ticks = datetime_ticks(&dates).unwrap();
        assert_eq!(ticks, vec![0, 31]);
        assert_eq!(
            format_ticks(&ticks, &DataType::Date32).unwrap(),
            vec!["1970-01-01".to_string(), "1970-02-01".to_string()]
        );

        let stamps: ArrayRef = Arc::new(TimestampSecondArray::from(vec![86_400]));
        let ticks = datetime_ticks(&stamps).unwrap();
        assert_eq!(ticks, vec![86_400]);
        assert_eq!(
            format_ticks(&ticks, stamps.data_type()).unwrap(),
            vec!["1970-01-02T00:00:00".to_string()]
        );
    }

    #[test]
    fn test_percentile_label() {
        assert_eq!(percentile_label(0.25), "25%");
        assert_eq!(percentile_label(0.5), "50%");
        assert_eq!(percentile_label(0.025), "2.5%");
        assert_eq!(percentile_label(1.0), "100%");
    }
}
