//! Dated tables of prices, returns and derived factor columns.
//!
//! A [`Table`] is a polars [`DataFrame`] whose first column is `date`, followed
//! by one `f64` column per base series (ticker) and any derived columns
//! appended by the annotators. Dates are strictly increasing.

use crate::{
    FactorError, Result,
    registry::{ColumnKey, MetricKind},
};
use chrono::NaiveDate;
use polars::prelude::*;

/// Name of the date index column.
pub const DATE_COLUMN: &str = "date";

/// Table of adjusted close prices.
pub type PriceTable = Table;

/// Table of daily simple returns.
pub type ReturnTable = Table;

/// Table of rolling betas, one column per ticker.
pub type BetaTable = Table;

/// Date-indexed table of `f64` columns.
#[derive(Debug, Clone)]
pub struct Table {
    dates: Vec<NaiveDate>,
    frame: DataFrame,
    derived: Vec<ColumnKey>,
}

impl Table {
    /// Build a table from a date index and named value columns.
    ///
    /// Every column must have one cell per date; `None` marks a missing value.
    pub fn from_columns<I, S>(dates: Vec<NaiveDate>, columns: I) -> Result<Self>
    where
        I: IntoIterator<Item = (S, Vec<Option<f64>>)>,
        S: Into<String>,
    {
        validate_dates(&dates)?;

        let mut frame_columns = vec![Series::new(DATE_COLUMN.into(), dates.as_slice()).into_column()];
        for (name, values) in columns {
            let name: String = name.into();
            if name == DATE_COLUMN {
                return Err(FactorError::DuplicateColumn(name));
            }
            frame_columns.push(Series::new(name.into(), values).into_column());
        }

        Ok(Self {
            dates,
            frame: DataFrame::new(frame_columns)?,
            derived: Vec::new(),
        })
    }

    /// Wrap a frame produced from another table's date index.
    pub(crate) fn from_frame(dates: Vec<NaiveDate>, frame: DataFrame) -> Self {
        Self {
            dates,
            frame,
            derived: Vec::new(),
        }
    }

    /// Date index.
    pub fn dates(&self) -> &[NaiveDate] {
        &self.dates
    }

    /// Number of rows.
    pub fn height(&self) -> usize {
        self.dates.len()
    }

    /// Backing DataFrame, including the `date` column.
    pub const fn frame(&self) -> &DataFrame {
        &self.frame
    }

    /// Names of all value columns, base and derived, in insertion order.
    pub fn value_columns(&self) -> Vec<String> {
        self.frame
            .get_column_names()
            .into_iter()
            .filter(|name| name.as_str() != DATE_COLUMN)
            .map(|name| name.to_string())
            .collect()
    }

    /// Names of the base columns (those not appended by an annotator).
    pub fn base_columns(&self) -> Vec<String> {
        self.value_columns()
            .into_iter()
            .filter(|name| !self.derived.iter().any(|key| key.to_string() == *name))
            .collect()
    }

    /// Whether a column with this name exists.
    pub fn contains(&self, name: &str) -> bool {
        self.frame.get_column_index(name).is_some()
    }

    /// Cells of a value column.
    pub fn values(&self, name: &str) -> Result<Vec<Option<f64>>> {
        if name == DATE_COLUMN {
            return Err(FactorError::MissingColumn(name.to_string()));
        }
        let column = self
            .frame
            .column(name)
            .map_err(|_| FactorError::MissingColumn(name.to_string()))?;
        let column = column.cast(&DataType::Float64)?;
        Ok(column.f64()?.into_iter().collect())
    }

    /// Keys of the derived columns, in insertion order.
    pub fn derived_keys(&self) -> &[ColumnKey] {
        &self.derived
    }

    /// Cells of a derived column.
    pub fn derived_values(&self, key: &ColumnKey) -> Result<Vec<Option<f64>>> {
        if !self.derived.contains(key) {
            return Err(FactorError::MissingColumn(key.to_string()));
        }
        self.values(&key.to_string())
    }

    /// Append a derived column under `key`.
    pub fn append(&mut self, key: ColumnKey, values: Vec<Option<f64>>) -> Result<()> {
        let name = key.to_string();
        if self.derived.contains(&key) || self.contains(&name) {
            return Err(FactorError::DuplicateColumn(name));
        }
        self.frame.with_column(Series::new(name.into(), values))?;
        self.derived.push(key);
        Ok(())
    }

    /// `date` plus every derived column of the given metrics.
    ///
    /// Columns are grouped by metric in the order given, then by insertion.
    pub fn select_metrics(&self, metrics: &[MetricKind]) -> Result<DataFrame> {
        let mut names = vec![DATE_COLUMN.to_string()];
        for metric in metrics {
            names.extend(
                self.derived
                    .iter()
                    .filter(|key| key.metric == *metric)
                    .map(ToString::to_string),
            );
        }
        Ok(self.frame.select(names)?)
    }

    /// Rows where `mask` is true, preserving derived keys.
    pub(crate) fn filter_rows(&self, mask: &[bool]) -> Result<Self> {
        let predicate = BooleanChunked::from_slice("mask".into(), mask);
        let frame = self.frame.filter(&predicate)?;
        let dates = self
            .dates
            .iter()
            .zip(mask)
            .filter_map(|(date, keep)| keep.then_some(*date))
            .collect();

        Ok(Self {
            dates,
            frame,
            derived: self.derived.clone(),
        })
    }
}

fn validate_dates(dates: &[NaiveDate]) -> Result<()> {
    if let Some(pair) = dates.windows(2).find(|pair| pair[0] >= pair[1]) {
        return Err(FactorError::UnorderedDates {
            previous: pair[0].to_string(),
            current: pair[1].to_string(),
        });
    }
    Ok(())
}
