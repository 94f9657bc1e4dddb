//! JWXT Grid - occupancy and conflicts
//!
//! A caller-owned weekday × section × week grid for one schedule-review
//! session, with a read-only conflict detector, an auto-restoring hover
//! preview and week-range summaries for display.
//!
//! The grid is plain owned data. Clone it per candidate evaluation or
//! serialize access; `fill` overwrites cells.

mod conflict;
mod grid;
mod preview;
mod summary;

pub use conflict::{CellConflict, ConflictStatus};
pub use grid::{FillReport, OccupancyGrid};
pub use preview::PreviewGuard;
pub use summary::{summarize_indices, summarize_row, RangeSegment, RangeSummary};
