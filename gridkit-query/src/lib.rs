//! Query pipeline for gridkit.
//!
//! Turns rows, a column set and the current query state into the exact
//! visible row window:
//!
//! - [`filter`]: per-field filter descriptors and the predicate evaluator
//! - [`sort`]: multi-key, type-aware, stable ordering with nulls last
//! - [`page`]: page clamping and window slicing
//!
//! [`QueryState::run`] chains the three in that fixed order. Every function
//! here is pure: nothing is mutated and nothing is cached.

pub mod filter;
pub mod page;
mod pipeline;
pub mod sort;

pub use filter::{Condition, FilterDescriptor, FilterState, Operator};
pub use page::{paginate, PageInfo, PageState, PageWindow, DEFAULT_PAGE_SIZE};
pub use pipeline::{QueryOutput, QueryState};
pub use sort::{compare_rows, SortEntry, SortOrder, SortState};
