//! Data module - CSV loading, range filtering and column extraction

mod filter;
mod loader;
mod processor;

pub use filter::{AgeRange, FilterError, FilterState, RangeFilter};
pub use loader::{DashboardData, DataLoader, DataPaths, CROSS_SECTIONAL_CSV, LONGITUDINAL_CSV};
pub use processor::DataProcessor;

/// Column names shared by the OASIS cross-sectional and longitudinal files.
pub mod columns {
    pub const AGE: &str = "Age";
    pub const SEX: &str = "M/F";
    pub const MMSE: &str = "MMSE";
    pub const CDR: &str = "CDR";
    pub const NWBV: &str = "nWBV";
    pub const ETIV: &str = "eTIV";
    pub const SUBJECT_ID: &str = "Subject ID";
    pub const VISIT: &str = "Visit";

    /// Columns of the correlation heatmap, in display order.
    pub const CORRELATION: [&str; 5] = [AGE, MMSE, CDR, NWBV, ETIV];
}
