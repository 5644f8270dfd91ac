//! CSV/TSV import and export.
//!
//! Cells round-trip as raw text: formulas are stored with their leading `=`.
//! Exporting in [`ExportMode::Display`] writes evaluated values instead.

use crate::error::Result;
use crate::sheet::Sheet;
use csv::{ReaderBuilder, Terminator, WriterBuilder};
use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;
use tally_engine::engine::{CellRef, format_value};
use tracing::info;

/// What to write for each cell on export.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ExportMode {
    /// The text the cell was set to.
    Raw,
    /// The evaluated value, bars drawn `bar_width` characters wide.
    Display { bar_width: usize },
}

/// Tab for `.tsv` paths, comma for everything else.
pub fn delimiter_for(path: &Path) -> u8 {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some(ext) if ext.eq_ignore_ascii_case("tsv") => b'\t',
        _ => b',',
    }
}

/// Read delimited records into a new sheet. Record `n`, field `m` becomes
/// row `n`, column `m`; every field goes through [`Sheet::set`], so empty
/// fields leave no cell behind.
pub fn read_csv<R: Read>(reader: R, delimiter: u8) -> Result<Sheet> {
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .delimiter(delimiter)
        .from_reader(reader);

    let mut sheet = Sheet::new();
    for (row, record) in reader.records().enumerate() {
        let record = record?;
        for (col, field) in record.iter().enumerate() {
            sheet.set(CellRef::new(col, row), field);
        }
    }
    Ok(sheet)
}

/// Load a CSV or TSV file, chosen by extension.
pub fn load_csv(path: &Path) -> Result<Sheet> {
    let file = File::open(path)?;
    let sheet = read_csv(file, delimiter_for(path))?;
    info!(
        path = %path.display(),
        cells = sheet.len(),
        width = sheet.width(),
        height = sheet.height(),
        "loaded sheet"
    );
    Ok(sheet)
}

/// Write rows `0..height` and columns `0..width` of the sheet.
/// An empty sheet writes nothing.
pub fn write_csv<W: Write>(
    writer: W,
    sheet: &Sheet,
    mode: ExportMode,
    delimiter: u8,
) -> Result<()> {
    let mut writer = WriterBuilder::new()
        .has_headers(false)
        .flexible(true)
        .delimiter(delimiter)
        .terminator(Terminator::CRLF)
        .from_writer(writer);

    for row in 0..sheet.height() {
        let record: Vec<String> = (0..sheet.width())
            .map(|col| {
                let cell = CellRef::new(col, row);
                match mode {
                    ExportMode::Raw => sheet.get_raw(&cell),
                    ExportMode::Display { bar_width } => {
                        format_value(&sheet.get_value(&cell), bar_width)
                    }
                }
            })
            .collect();
        writer.write_record(&record)?;
    }
    writer.flush()?;
    Ok(())
}

/// Save a sheet as CSV or TSV, chosen by extension.
pub fn dump_csv(path: &Path, sheet: &Sheet, mode: ExportMode) -> Result<()> {
    let file = File::create(path)?;
    write_csv(file, sheet, mode, delimiter_for(path))?;
    info!(path = %path.display(), ?mode, "saved sheet");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tally_engine::engine::Value;

    fn cell(name: &str) -> CellRef {
        name.parse().unwrap()
    }

    fn written(sheet: &Sheet, mode: ExportMode, delimiter: u8) -> String {
        let mut out = Vec::new();
        write_csv(&mut out, sheet, mode, delimiter).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_delimiter_for_extension() {
        assert_eq!(delimiter_for(Path::new("data.tsv")), b'\t');
        assert_eq!(delimiter_for(Path::new("DATA.TSV")), b'\t');
        assert_eq!(delimiter_for(Path::new("data.csv")), b',');
        assert_eq!(delimiter_for(Path::new("data")), b',');
    }

    #[test]
    fn test_read_csv_sets_every_field() {
        let input = "1,2,=A1+B1\n,hello\n";
        let sheet = read_csv(input.as_bytes(), b',').unwrap();
        assert_eq!(sheet.len(), 4);
        assert_eq!((sheet.width(), sheet.height()), (3, 2));
        assert_eq!(sheet.get_raw(&cell("A2")), "");
        assert_eq!(sheet.get_value(&cell("C1")), Value::Int(3));
        assert_eq!(sheet.get_value(&cell("B2")), Value::Str("hello".to_string()));
    }

    #[test]
    fn test_read_quoted_fields() {
        let input = "\"=SUM(A2:A3)\",\"a, b\"\n1\n2\n";
        let sheet = read_csv(input.as_bytes(), b',').unwrap();
        assert_eq!(sheet.get_raw(&cell("B1")), "a, b");
        assert_eq!(sheet.get_value(&cell("A1")), Value::Int(3));
    }

    #[test]
    fn test_read_tsv() {
        let sheet = read_csv("x\ty\n".as_bytes(), b'\t').unwrap();
        assert_eq!(sheet.get_raw(&cell("B1")), "y");
    }

    #[test]
    fn test_write_raw_and_display() {
        let mut sheet = Sheet::new();
        sheet.set(cell("A1"), "3");
        sheet.set(cell("B1"), "=A1*2");
        sheet.set(cell("C2"), "=A1/2");
        sheet.set(cell("A2"), "=bar(1)");

        assert_eq!(
            written(&sheet, ExportMode::Raw, b','),
            "3,=A1*2,\r\n=bar(1),,=A1/2\r\n"
        );
        assert_eq!(
            written(&sheet, ExportMode::Display { bar_width: 2 }, b','),
            "3,6,\r\n██,,1.5\r\n"
        );
    }

    #[test]
    fn test_write_quotes_delimiters() {
        let mut sheet = Sheet::new();
        sheet.set(cell("A1"), "a,b");
        sheet.set(cell("B1"), "=SUM(A2:A3)");
        assert_eq!(
            written(&sheet, ExportMode::Raw, b','),
            "\"a,b\",=SUM(A2:A3)\r\n"
        );
        assert_eq!(
            written(&sheet, ExportMode::Raw, b'\t'),
            "a,b\t=SUM(A2:A3)\r\n"
        );
    }

    #[test]
    fn test_empty_sheet_writes_nothing() {
        assert_eq!(written(&Sheet::new(), ExportMode::Raw, b','), "");
    }

    #[test]
    fn test_dump_and_load_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sheet.tsv");

        let mut sheet = Sheet::new();
        sheet.set(cell("A1"), "1");
        sheet.set(cell("A2"), "2");
        sheet.set(cell("B2"), "=SUM($A$1:A2)");
        sheet.set(cell("C1"), "note, with comma");
        dump_csv(&path, &sheet, ExportMode::Raw).unwrap();

        let loaded = load_csv(&path).unwrap();
        assert_eq!(loaded.cells(), sheet.cells());
        for c in sheet.cells() {
            assert_eq!(loaded.get_raw(&c), sheet.get_raw(&c));
        }
        assert_eq!(loaded.get_value(&cell("B2")), Value::Int(3));
    }

    #[test]
    fn test_load_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_csv(&dir.path().join("missing.csv")).unwrap_err();
        assert!(matches!(err, crate::TallyError::Io(_)));
    }
}
