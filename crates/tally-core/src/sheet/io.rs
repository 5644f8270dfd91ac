use super::Sheet;
use crate::error::Result;
use crate::storage::{ExportMode, dump_csv, load_csv};
use std::path::Path;

impl Sheet {
    /// Load a sheet from a CSV or TSV file.
    pub fn load(path: &Path) -> Result<Self> {
        load_csv(path)
    }

    /// Save raw cell text to `path`.
    pub fn save(&self, path: &Path) -> Result<()> {
        dump_csv(path, self, ExportMode::Raw)
    }

    /// Save evaluated values to `path`.
    pub fn export_values(&self, path: &Path, bar_width: usize) -> Result<()> {
        dump_csv(path, self, ExportMode::Display { bar_width })
    }
}
