//! Sheet state and logic (UI-agnostic).

mod eval;
mod io;
mod ops;
mod state;

pub use ops::Clipboard;
pub use state::{MAX_EVAL_DEPTH, Sheet};
