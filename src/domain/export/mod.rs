//! Export module: pure tabular projections over results and directories.

mod report;
mod round_one;
mod round_two;

pub use report::{CellValue, Report, ReportSheet};
pub use round_one::round_one_workbook;
pub use round_two::{round_two_full, round_two_top3};
