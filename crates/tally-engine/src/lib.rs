//! tally-engine - formula language for the tally spreadsheet.
//!
//! Parsing, reference shifting, unparsing and evaluation of cell formulas.
//! Storage and memoization live in `tally-core`.

pub mod builtins;
pub mod engine;
