//! Stats module - Descriptive statistics behind the charts

mod calculator;

pub use calculator::{BoxStats, CorrelationMatrix, HistogramBin, StatsCalculator};
