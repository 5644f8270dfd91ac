//! tally-core - sheet store, edit operations and storage.

pub mod error;
pub mod sheet;
pub mod storage;

pub use error::{Result, TallyError};
pub use sheet::{Clipboard, MAX_EVAL_DEPTH, Sheet};

pub use tally_engine::engine::{CellRange, CellRef, Delta, Value};
