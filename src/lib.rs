//! Heuristic table mining from layout-preserving extracted text.
//!
//! The engine consumes plain text produced by an external, layout-keeping
//! extractor and infers tabular structure from whitespace geometry alone:
//! no schema, no cell markers, no access to the source document's drawing
//! commands. Detection finds contiguous runs of lines that look tabular,
//! the header line's spacing fixes the column boundaries, and every other
//! line in the run is sliced into cells at those boundaries.

pub mod config;
pub mod error;
pub mod logging;
pub mod miner;

pub use config::MineConfig;
pub use error::{MineError, MineResult};
pub use miner::{MineOptions, MineStats, TableMiner, TableView, Tables};
