//! File storage for sheets.

mod csv;

pub use self::csv::{ExportMode, delimiter_for, dump_csv, load_csv, read_csv, write_csv};
