//! Price table loading.
//!
//! A [`PriceSource`] turns a [`PriceRequest`] into a dense price table. The
//! shipped [`CsvPriceSource`] reads a wide CSV file with a `date` column and
//! one close-price column per symbol.

use crate::{FactorError, Result, table::Table};
use chrono::{Days, NaiveDate};
use polars::prelude::*;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Symbols and date range to load.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PriceRequest {
    /// Tickers to compute factors for
    pub tickers: Vec<String>,
    /// Benchmark symbol, loaded alongside the tickers
    pub benchmark: String,
    /// First date of the range (inclusive)
    pub start: NaiveDate,
    /// Last date of the range (exclusive)
    pub end: NaiveDate,
}

impl PriceRequest {
    /// Create a request for `[start, end)`.
    pub fn new(
        tickers: Vec<String>,
        benchmark: impl Into<String>,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Self> {
        if start >= end {
            return Err(FactorError::InvalidDateRange {
                start: start.to_string(),
                end: end.to_string(),
            });
        }
        Ok(Self {
            tickers,
            benchmark: benchmark.into(),
            start,
            end,
        })
    }

    /// Create a request for the `lookback_days` calendar days before `end`.
    pub fn trailing(
        tickers: Vec<String>,
        benchmark: impl Into<String>,
        end: NaiveDate,
        lookback_days: u32,
    ) -> Result<Self> {
        let start = end
            .checked_sub_days(Days::new(u64::from(lookback_days)))
            .ok_or_else(|| FactorError::InvalidDateRange {
                start: format!("{end} - {lookback_days} days"),
                end: end.to_string(),
            })?;
        Self::new(tickers, benchmark, start, end)
    }

    /// Tickers followed by the benchmark, without duplicates.
    pub fn symbols(&self) -> Vec<String> {
        let mut symbols = Vec::with_capacity(self.tickers.len() + 1);
        for symbol in self.tickers.iter().chain(std::iter::once(&self.benchmark)) {
            if !symbols.contains(symbol) {
                symbols.push(symbol.clone());
            }
        }
        symbols
    }

    /// Whether `date` falls in `[start, end)`.
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date < self.end
    }
}

/// Supplier of daily close prices.
pub trait PriceSource: std::fmt::Debug {
    /// Load one column per requested symbol over the requested range.
    fn fetch(&self, request: &PriceRequest) -> Result<Table>;
}

/// Wide CSV price file: `date,SYM1,SYM2,...` with ISO dates.
///
/// Every cell is read as text and parsed as `f64`. Empty cells are missing
/// prices; any other cell that is not a number is a parse error. Requested
/// symbols absent from the file become all-missing columns.
#[derive(Debug, Clone)]
pub struct CsvPriceSource {
    path: PathBuf,
}

impl CsvPriceSource {
    /// Create a source reading `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path of the CSV file.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl PriceSource for CsvPriceSource {
    fn fetch(&self, request: &PriceRequest) -> Result<Table> {
        let frame = CsvReadOptions::default()
            .with_has_header(true)
            .with_infer_schema_length(Some(0))
            .try_into_reader_with_file_path(Some(self.path.clone()))?
            .finish()?;

        let prices = prices_from_frame(&frame, request)?;
        info!(
            path = %self.path.display(),
            rows = prices.height(),
            symbols = request.symbols().len(),
            "loaded price table"
        );
        Ok(prices)
    }
}

/// Select the requested symbols and date range from a wide price frame.
pub(crate) fn prices_from_frame(frame: &DataFrame, request: &PriceRequest) -> Result<Table> {
    let date_name = frame
        .get_column_names()
        .into_iter()
        .find(|name| name.eq_ignore_ascii_case("date"))
        .map(|name| name.to_string())
        .ok_or_else(|| FactorError::MissingColumn("date".to_string()))?;

    let raw_dates = frame.column(&date_name)?.cast(&DataType::String)?;
    let mut rows = Vec::new();
    for (index, value) in raw_dates.str()?.into_iter().enumerate() {
        let text = value.ok_or_else(|| FactorError::Parse(format!("missing date at row {index}")))?;
        let date = NaiveDate::parse_from_str(text.trim(), "%Y-%m-%d")
            .map_err(|e| FactorError::Parse(format!("invalid date '{text}' at row {index}: {e}")))?;
        if request.contains(date) {
            rows.push((index, date));
        }
    }
    rows.sort_by_key(|&(_, date)| date);

    let mut columns = Vec::new();
    for symbol in request.symbols() {
        let values = match frame.column(&symbol) {
            Ok(column) => price_cells(column, &symbol, &rows)?,
            Err(_) => {
                warn!(symbol = %symbol, "symbol missing from price file");
                vec![None; rows.len()]
            }
        };
        columns.push((symbol, values));
    }

    let dates = rows.into_iter().map(|(_, date)| date).collect();
    Table::from_columns(dates, columns)
}

/// Prices of `symbol` at the selected rows.
fn price_cells(
    column: &Column,
    symbol: &str,
    rows: &[(usize, NaiveDate)],
) -> Result<Vec<Option<f64>>> {
    if column.dtype() != &DataType::String {
        let column = column.strict_cast(&DataType::Float64)?;
        let cells = column.f64()?;
        return Ok(rows.iter().map(|&(index, _)| cells.get(index)).collect());
    }

    let cells = column.str()?;
    rows.iter()
        .map(|&(index, date)| {
            let Some(text) = cells.get(index).map(str::trim).filter(|t| !t.is_empty()) else {
                return Ok(None);
            };
            text.parse::<f64>().map(Some).map_err(|_| {
                FactorError::Parse(format!(
                    "invalid price '{text}' for {symbol} on {date} at row {index}"
                ))
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn request(start: NaiveDate, end: NaiveDate) -> PriceRequest {
        PriceRequest::new(
            vec!["AAPL".to_string(), "DELISTED".to_string()],
            "^GSPC",
            start,
            end,
        )
        .unwrap()
    }

    #[test]
    fn test_symbols_append_benchmark_once() {
        let mut req = request(date(2024, 1, 1), date(2024, 2, 1));
        assert_eq!(req.symbols(), vec!["AAPL", "DELISTED", "^GSPC"]);

        req.tickers.push("^GSPC".to_string());
        assert_eq!(req.symbols(), vec!["AAPL", "DELISTED", "^GSPC"]);
    }

    #[test]
    fn test_invalid_range_rejected() {
        let result = PriceRequest::new(Vec::new(), "^GSPC", date(2024, 2, 1), date(2024, 2, 1));
        assert!(matches!(result, Err(FactorError::InvalidDateRange { .. })));
    }

    #[test]
    fn test_trailing_request() {
        let req = PriceRequest::trailing(Vec::new(), "^GSPC", date(2024, 12, 31), 365).unwrap();
        assert_eq!(req.start, date(2024, 1, 1));
        assert!(req.contains(date(2024, 1, 1)));
        assert!(!req.contains(date(2024, 12, 31)));
    }

    #[test]
    fn test_frame_selection() {
        let frame = df![
            "Date" => ["2024-01-04", "2024-01-02", "2024-01-03", "2023-12-29"],
            "AAPL" => [Some(187.0), Some(185.5), None, Some(192.5)],
            "MSFT" => [370.0, 371.0, 372.0, 376.0],
            "^GSPC" => [4688.0, 4742.0, 4704.0, 4770.0],
        ]
        .unwrap();

        let prices = prices_from_frame(&frame, &request(date(2024, 1, 1), date(2024, 2, 1))).unwrap();

        assert_eq!(prices.dates(), &[date(2024, 1, 2), date(2024, 1, 3), date(2024, 1, 4)]);
        assert_eq!(prices.value_columns(), vec!["AAPL", "DELISTED", "^GSPC"]);
        assert_eq!(prices.values("AAPL").unwrap(), vec![Some(185.5), None, Some(187.0)]);
        assert!(prices.values("DELISTED").unwrap().iter().all(Option::is_none));
        assert_eq!(prices.values("^GSPC").unwrap()[0], Some(4742.0));
    }

    #[test]
    fn test_duplicate_dates_rejected() {
        let frame = df![
            "date" => ["2024-01-02", "2024-01-02"],
            "AAPL" => [1.0, 2.0],
        ]
        .unwrap();

        let result = prices_from_frame(&frame, &request(date(2024, 1, 1), date(2024, 2, 1)));
        assert!(matches!(result, Err(FactorError::UnorderedDates { .. })));
    }

    #[test]
    fn test_csv_source_reads_file() {
        let path = std::env::temp_dir().join("rolling_factors_prices_test.csv");
        std::fs::write(
            &path,
            "date,AAPL,^GSPC\n2024-01-02,185.5,4742\n2024-01-03,,4704.5\n2024-01-04,187.25,4688\n",
        )
        .unwrap();

        let source = CsvPriceSource::new(&path);
        let prices = source.fetch(&request(date(2024, 1, 1), date(2024, 2, 1))).unwrap();
        std::fs::remove_file(&path).unwrap();

        assert_eq!(prices.height(), 3);
        assert_eq!(prices.values("AAPL").unwrap(), vec![Some(185.5), None, Some(187.25)]);
        assert_eq!(
            prices.values("^GSPC").unwrap(),
            vec![Some(4742.0), Some(4704.5), Some(4688.0)]
        );
        assert_eq!(source.path(), path.as_path());
    }

    #[test]
    fn test_csv_decimals_after_long_integer_run() {
        let path = std::env::temp_dir().join("rolling_factors_integer_run_test.csv");
        let start = date(2024, 1, 1);
        let mut text = String::from("date,AAPL,^GSPC\n");
        for i in 0..150u64 {
            let day = start.checked_add_days(Days::new(i)).unwrap();
            let market = if i < 120 {
                format!("{}", 4700 + i)
            } else {
                format!("{}.25", 4700 + i)
            };
            text.push_str(&format!("{day},{},{market}\n", 180 + i));
        }
        std::fs::write(&path, text).unwrap();

        let prices = CsvPriceSource::new(&path)
            .fetch(&request(date(2024, 1, 1), date(2025, 1, 1)))
            .unwrap();
        std::fs::remove_file(&path).unwrap();

        let market = prices.values("^GSPC").unwrap();
        assert_eq!(prices.height(), 150);
        assert_eq!(market[0], Some(4700.0));
        assert_eq!(market[119], Some(4819.0));
        assert_eq!(market[120], Some(4820.25));
        assert_eq!(prices.values("AAPL").unwrap()[149], Some(329.0));
    }

    #[test]
    fn test_csv_non_numeric_cell_rejected() {
        let path = std::env::temp_dir().join("rolling_factors_bad_cell_test.csv");
        std::fs::write(
            &path,
            "date,AAPL,^GSPC\n2024-01-02,185.5,4742\n2024-01-03,n/a,4704.5\n2024-01-04,187.25,4688\n",
        )
        .unwrap();

        let result = CsvPriceSource::new(&path).fetch(&request(date(2024, 1, 1), date(2024, 2, 1)));
        std::fs::remove_file(&path).unwrap();

        let message = match result {
            Err(FactorError::Parse(message)) => message,
            other => panic!("expected parse error, got {other:?}"),
        };
        assert!(message.contains("AAPL"));
        assert!(message.contains("2024-01-03"));
    }

    #[test]
    fn test_numeric_frame_cast_is_strict() {
        let frame = df![
            "date" => ["2024-01-02", "2024-01-03"],
            "AAPL" => [185_i64, 186],
            "^GSPC" => [4742.0, 4704.5],
        ]
        .unwrap();

        let prices = prices_from_frame(&frame, &request(date(2024, 1, 1), date(2024, 2, 1))).unwrap();
        assert_eq!(prices.values("AAPL").unwrap(), vec![Some(185.0), Some(186.0)]);
    }
}
