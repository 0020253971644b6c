//! Column type classification.
//!
//! Every column falls into exactly one [`ColumnKind`], derived from its
//! declared Arrow type. Classification is recomputed on every call.

use std::fmt;

use arrow::datatypes::{DataType, Schema};
use serde::{Deserialize, Serialize};

/// Semantic type group of a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColumnKind {
    /// `Boolean` columns
    Boolean,
    /// Integers, floats and decimals
    Numeric,
    /// Timestamps and dates
    Datetime,
    /// Strings, binary, dictionaries, durations, nested types and the rest
    Other,
}

impl ColumnKind {
    /// Order in which type groups are described.
    pub const DESCRIBE_ORDER: [ColumnKind; 4] = [
        ColumnKind::Datetime,
        ColumnKind::Numeric,
        ColumnKind::Boolean,
        ColumnKind::Other,
    ];

    /// Classifies an Arrow data type.
    pub fn of(data_type: &DataType) -> Self {
        match data_type {
            DataType::Boolean => Self::Boolean,
            DataType::Int8
            | DataType::Int16
            | DataType::Int32
            | DataType::Int64
            | DataType::UInt8
            | DataType::UInt16
            | DataType::UInt32
            | DataType::UInt64
            | DataType::Float16
            | DataType::Float32
            | DataType::Float64
            | DataType::Decimal128(_, _)
            | DataType::Decimal256(_, _) => Self::Numeric,
            DataType::Timestamp(_, _) | DataType::Date32 | DataType::Date64 => Self::Datetime,
            _ => Self::Other,
        }
    }
}

impl fmt::Display for ColumnKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Boolean => "boolean",
            Self::Numeric => "numeric",
            Self::Datetime => "datetime",
            Self::Other => "other",
        };
        f.write_str(name)
    }
}

/// Returns true for floating point types, whose NaN values count as missing.
pub fn is_floating(data_type: &DataType) -> bool {
    matches!(
        data_type,
        DataType::Float16 | DataType::Float32 | DataType::Float64
    )
}

/// Classifies every field of a schema, in column order.
pub fn classify_schema(schema: &Schema) -> Vec<ColumnKind> {
    schema
        .fields()
        .iter()
        .map(|field| ColumnKind::of(field.data_type()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use arrow::datatypes::{Field, TimeUnit};
    use std::sync::Arc;

    #[test]
    fn test_numeric_types() {
        for dt in [
            DataType::Int8,
            DataType::UInt64,
            DataType::Float32,
            DataType::Float64,
            DataType::Decimal128(10, 2),
        ] {
            assert_eq!(ColumnKind::of(&dt), ColumnKind::Numeric, "{dt}");
        }
    }

    #[test]
    fn test_boolean_is_not_numeric() {
        assert_eq!(ColumnKind::of(&DataType::Boolean), ColumnKind::Boolean);
    }

    #[test]
    fn test_datetime_types() {
        assert_eq!(
            ColumnKind::of(&DataType::Timestamp(TimeUnit::Nanosecond, None)),
            ColumnKind::Datetime
        );
        assert_eq!(
            ColumnKind::of(&DataType::Timestamp(TimeUnit::Second, Some("UTC".into()))),
            ColumnKind::Datetime
        );
        assert_eq!(ColumnKind::of(&DataType::Date32), ColumnKind::Datetime);
        assert_eq!(ColumnKind::of(&DataType::Date64), ColumnKind::Datetime);
    }

    #[test]
    fn test_other_types() {
        for dt in [
            DataType::Utf8,
            DataType::LargeUtf8,
            DataType::Binary,
            DataType::Null,
            DataType::Duration(TimeUnit::Millisecond),
            DataType::Dictionary(Box::new(DataType::Int32), Box::new(DataType::Utf8)),
            DataType::List(Arc::new(Field::new("item", DataType::Int64, true))),
        ] {
            assert_eq!(ColumnKind::of(&dt), ColumnKind::Other, "{dt}");
        }
    }

    #[test]
    fn test_classify_schema_preserves_order() {
        let schema = Schema::new(vec![
            Field::new("flag", DataType::Boolean, false),
            Field::new("name", DataType::Utf8, true),
            Field::new("score", DataType::Float64, true),
        ]);
        assert_eq!(
            classify_schema(&schema),
            vec![ColumnKind::Boolean, ColumnKind::Other, ColumnKind::Numeric]
        );
    }

    #[test]
    fn test_is_floating() {
        assert!(is_floating(&DataType::Float64));
        assert!(!is_floating(&DataType::Int64));
        assert!(!is_floating(&DataType::Decimal128(5, 1)));
    }
}
