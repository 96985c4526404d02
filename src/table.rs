//! Common tabular schema
//!
//! Every report row type describes itself as named, typed columns through
//! [`TableRow`]. A [`Table`] is the normalized, report-independent result:
//! column names plus rows of [`Value`]s, ready to be written out as CSV.

use chrono::NaiveDate;

/// One typed table value
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Null,
    Int(i64),
    Float(f64),
    Date(NaiveDate),
}

impl Value {
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Int(i) => Some(*i as f64),
            Value::Float(f) => Some(*f),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Int(i) => Some(*i),
            _ => None,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Text form used for CSV output (`.` decimals, ISO dates, empty null)
    pub fn render(&self) -> String {
        match self {
            Value::Null => String::new(),
            Value::Int(i) => i.to_string(),
            Value::Float(f) => f.to_string(),
            Value::Date(d) => d.format("%Y-%m-%d").to_string(),
        }
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Int(v)
    }
}

impl From<u8> for Value {
    fn from(v: u8) -> Self {
        Value::Int(i64::from(v))
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Float(v)
    }
}

impl From<Option<f64>> for Value {
    fn from(v: Option<f64>) -> Self {
        v.map_or(Value::Null, Value::Float)
    }
}

impl From<NaiveDate> for Value {
    fn from(v: NaiveDate) -> Self {
        Value::Date(v)
    }
}

/// A row type with a fixed column layout
pub trait TableRow {
    /// Column names, in output order
    const COLUMNS: &'static [&'static str];

    /// Values matching [`TableRow::COLUMNS`] one-to-one
    fn values(&self) -> Vec<Value>;
}

/// Normalized report result
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Table {
    columns: Vec<String>,
    rows: Vec<Vec<Value>>,
}

impl Table {
    pub fn new(columns: Vec<String>) -> Self {
        Self {
            columns,
            rows: Vec::new(),
        }
    }

    /// Table from typed rows
    pub fn from_rows<R: TableRow>(rows: &[R]) -> Self {
        let mut table = Self::new(R::COLUMNS.iter().map(|c| c.to_string()).collect());
        table.rows = rows.iter().map(TableRow::values).collect();
        table
    }

    /// Append a row
    ///
    /// Short rows are padded with [`Value::Null`]; extra values are dropped.
    pub fn push_row(&mut self, mut values: Vec<Value>) {
        values.resize(self.columns.len(), Value::Null);
        self.rows.push(values);
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[Vec<Value>] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    /// All values of one column, top to bottom
    pub fn column(&self, name: &str) -> Option<Vec<&Value>> {
        let idx = self.column_index(name)?;
        Some(self.rows.iter().map(|row| &row[idx]).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Sample {
        hour: u8,
        price: Option<f64>,
    }

    impl TableRow for Sample {
        const COLUMNS: &'static [&'static str] = &["hour", "price"];

        fn values(&self) -> Vec<Value> {
            vec![self.hour.into(), self.price.into()]
        }
    }

    #[test]
    fn test_from_rows() {
        let table = Table::from_rows(&[
            Sample {
                hour: 0,
                price: Some(1.5),
            },
            Sample {
                hour: 1,
                price: None,
            },
        ]);

        assert_eq!(table.columns(), &["hour".to_string(), "price".to_string()]);
        assert_eq!(table.len(), 2);
        assert_eq!(
            table.column("price").unwrap(),
            vec![&Value::Float(1.5), &Value::Null]
        );
        assert!(table.column("volume").is_none());
    }

    #[test]
    fn test_push_row_pads() {
        let mut table = Table::new(vec!["a".to_string(), "b".to_string()]);
        table.push_row(vec![Value::Int(1)]);
        assert_eq!(table.rows()[0], vec![Value::Int(1), Value::Null]);
    }

    #[test]
    fn test_numeric_accessors() {
        assert_eq!(Value::Int(7).as_f64(), Some(7.0));
        assert_eq!(Value::Float(2.5).as_f64(), Some(2.5));
        assert_eq!(Value::Float(2.0).as_i64(), None);
        assert_eq!(Value::Int(7).as_i64(), Some(7));
        assert_eq!(Value::Null.as_f64(), None);
        assert!(Value::Null.is_null());
        assert!(!Value::Int(0).is_null());
    }

    #[test]
    fn test_render_uses_period_decimals() {
        assert_eq!(Value::Float(12.5).render(), "12.5");
        assert_eq!(Value::Int(-3).render(), "-3");
        assert_eq!(Value::Null.render(), "");
        assert_eq!(
            Value::Date(NaiveDate::from_ymd_opt(2018, 10, 1).unwrap()).render(),
            "2018-10-01"
        );
    }
}
