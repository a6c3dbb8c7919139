//! Point extraction, summary statistics and text reporting

pub mod extract;
pub mod locate;
pub mod report;
pub mod series;
pub mod summary;

pub use extract::PointExtractor;
pub use locate::{CellLocator, GridCell, NearestByAxis, NearestEuclidean};
pub use report::{parse_table, render, Report, ReportHeader, ReportRow};
pub use series::{ExtractedSeries, SeriesKind};
pub use summary::{summarize, SeriesStats, Summary};
