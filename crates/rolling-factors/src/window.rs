//! Trailing window iteration over a dated column.
//!
//! [`trailing_windows`] walks a column row by row and yields, for each row
//! `t`, the slice of rows `t - window + 1 ..= t`. Rows that do not yet have
//! `window` rows of history yield `None`. The iterator borrows the column and
//! can be cloned to restart it.

use crate::{FactorError, Result};

/// Rows `t - window + 1 ..= t` of a column.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Window<'a> {
    values: &'a [Option<f64>],
}

impl<'a> Window<'a> {
    /// Raw cells of the window, oldest first.
    pub const fn values(&self) -> &'a [Option<f64>] {
        self.values
    }

    /// Number of rows in the window.
    pub const fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether the window holds no rows.
    pub const fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Observed values, or `None` if any cell in the window is missing.
    pub fn observations(&self) -> Option<Vec<f64>> {
        self.values.iter().copied().collect()
    }

    /// Value of the most recent row.
    pub fn last(&self) -> Option<f64> {
        self.values.last().copied().flatten()
    }
}

/// Iterator over the trailing windows of a column.
#[derive(Debug, Clone)]
pub struct TrailingWindows<'a> {
    values: &'a [Option<f64>],
    window: usize,
    position: usize,
}

/// Trailing windows of `window` rows over `values`, one item per row.
pub const fn trailing_windows(values: &[Option<f64>], window: usize) -> TrailingWindows<'_> {
    TrailingWindows {
        values,
        window,
        position: 0,
    }
}

impl<'a> Iterator for TrailingWindows<'a> {
    type Item = Option<Window<'a>>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.position >= self.values.len() {
            return None;
        }
        let end = self.position + 1;
        self.position = end;

        if end < self.window {
            return Some(None);
        }
        Some(Some(Window {
            values: &self.values[end - self.window..end],
        }))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.values.len() - self.position;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for TrailingWindows<'_> {}

/// Two aligned windows ending on the same row.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PairedWindow<'a> {
    /// Window over the first column
    pub left: Window<'a>,
    /// Window over the second column
    pub right: Window<'a>,
}

impl PairedWindow<'_> {
    /// Observed values of both columns, or `None` if either has a gap.
    pub fn observations(&self) -> Option<(Vec<f64>, Vec<f64>)> {
        Some((self.left.observations()?, self.right.observations()?))
    }
}

/// Trailing windows over two columns of equal length.
pub fn paired_windows<'a>(
    left: &'a [Option<f64>],
    right: &'a [Option<f64>],
    window: usize,
) -> impl Iterator<Item = Option<PairedWindow<'a>>> + 'a {
    trailing_windows(left, window)
        .zip(trailing_windows(right, window))
        .map(|(left, right)| {
            Some(PairedWindow {
                left: left?,
                right: right?,
            })
        })
}

/// Apply `statistic` to every complete window of `values`.
///
/// Rows whose window is incomplete or contains a missing cell are missing in
/// the output. The output has the same length as the input.
pub fn rolling_apply<F>(values: &[Option<f64>], window: usize, statistic: F) -> Vec<Option<f64>>
where
    F: Fn(&[f64]) -> Option<f64>,
{
    trailing_windows(values, window)
        .map(|w| {
            w.and_then(|w| w.observations())
                .and_then(|obs| statistic(&obs))
        })
        .collect()
}

/// Reject windows of zero rows.
pub(crate) fn ensure_window(window: usize) -> Result<()> {
    if window == 0 {
        return Err(FactorError::InvalidWindow(window));
    }
    Ok(())
}
