//! Roster import from spreadsheets and their exports.
//!
//! Reads the first column of every row of a workbook (`.xlsx`, `.xls`,
//! `.xlsm`, `.xlsb`, `.ods`) or of a CSV, TSV or plain one-name-per-line
//! file. There is no header row. Blank cells are skipped.

use crate::error::RosterError;
use calamine::{open_workbook, Reader, Sheets};
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

/// Byte-order mark some spreadsheet tools put at the start of CSV exports.
const BOM: char = '\u{feff}';

/// Extensions read as workbooks. Everything else is delimited text.
const WORKBOOK_EXTENSIONS: [&str; 5] = ["xlsx", "xls", "xlsm", "xlsb", "ods"];

/// Sheet read when a workbook has one by this name.
const DEFAULT_SHEET: &str = "Sheet1";

/// Import names from the file at `path`.
///
/// Workbooks are picked by extension. Files ending in `.tsv` are split on
/// tabs, everything else on commas.
///
/// # Errors
///
/// Returns [`RosterError::NoNames`] if the file contains no non-blank first
/// column, or an I/O / parse error.
pub fn import_file(path: impl AsRef<Path>) -> Result<Vec<String>, RosterError> {
    let path = path.as_ref();
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase)
        .unwrap_or_default();

    let names = if WORKBOOK_EXTENSIONS.contains(&ext.as_str()) {
        read_workbook(path, &ext)?
    } else {
        let delimiter = if ext == "tsv" { b'\t' } else { b',' };
        read_first_column(File::open(path)?, delimiter)?
    };
    if names.is_empty() {
        return Err(RosterError::NoNames(path.to_path_buf()));
    }

    tracing::info!(path = %path.display(), count = names.len(), "imported names");
    Ok(names)
}

/// Read column A of `Sheet1`, or of the first sheet if there is none by
/// that name. `ext` is the lowercase file extension and picks the format.
///
/// # Errors
///
/// Returns an error if the workbook cannot be opened or the sheet cannot
/// be parsed.
pub fn read_workbook(path: &Path, ext: &str) -> Result<Vec<String>, calamine::Error> {
    let mut workbook: Sheets<BufReader<File>> = match ext {
        "xls" => Sheets::Xls(open_workbook(path).map_err(calamine::Error::Xls)?),
        "xlsb" => Sheets::Xlsb(open_workbook(path).map_err(calamine::Error::Xlsb)?),
        "ods" => Sheets::Ods(open_workbook(path).map_err(calamine::Error::Ods)?),
        _ => Sheets::Xlsx(open_workbook(path).map_err(calamine::Error::Xlsx)?),
    };
    let index = workbook
        .sheet_names()
        .iter()
        .position(|name| name == DEFAULT_SHEET)
        .unwrap_or(0);
    let Some(range) = workbook.worksheet_range_at(index) else {
        return Ok(Vec::new());
    };
    let range = range?;

    // The range starts at the first used column, which is not A when A is empty.
    if range.start().map_or(true, |(_, col)| col != 0) {
        return Ok(Vec::new());
    }

    let names = range
        .rows()
        .filter_map(|row| row.first())
        .map(|cell| cell.to_string().trim().to_string())
        .filter(|name| !name.is_empty())
        .collect();
    Ok(names)
}

/// Read the first column of every record from `reader`.
///
/// # Errors
///
/// Returns an error if the input is not valid UTF-8 or cannot be read.
pub fn read_first_column<R: Read>(reader: R, delimiter: u8) -> Result<Vec<String>, csv::Error> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .delimiter(delimiter)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut names = Vec::new();
    for record in rdr.records() {
        let record = record?;
        let Some(cell) = record.get(0) else {
            continue;
        };
        let cell = cell.trim_start_matches(BOM).trim();
        if !cell.is_empty() {
            names.push(cell.to_string());
        }
    }
    Ok(names)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_first_column_only() {
        let input = "Ana,10,A\nBo,11\nCy\n";
        let names = read_first_column(input.as_bytes(), b',').unwrap();
        assert_eq!(names, vec!["Ana", "Bo", "Cy"]);
    }

    #[test]
    fn test_skips_blank_cells() {
        let input = "Ana\n\n ,x\n,y\nBo\n";
        let names = read_first_column(input.as_bytes(), b',').unwrap();
        assert_eq!(names, vec!["Ana", "Bo"]);
    }

    #[test]
    fn test_strips_bom_and_keeps_unicode() {
        let input = "\u{feff}张三\n李四\n";
        let names = read_first_column(input.as_bytes(), b',').unwrap();
        assert_eq!(names, vec!["张三", "李四"]);
    }

    #[test]
    fn test_quoted_names_with_commas() {
        let input = "\"Doe, Jane\",1\nBo\n";
        let names = read_first_column(input.as_bytes(), b',').unwrap();
        assert_eq!(names, vec!["Doe, Jane", "Bo"]);
    }

    #[test]
    fn test_import_tsv_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("class.tsv");
        fs::write(&path, "Ana\t1,2\nBo\t3\n").unwrap();

        assert_eq!(import_file(&path).unwrap(), vec!["Ana", "Bo"]);
    }

    #[test]
    fn test_import_empty_file_fails() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("class.csv");
        fs::write(&path, "\n , \n").unwrap();

        assert!(matches!(import_file(&path), Err(RosterError::NoNames(_))));
    }

    fn fixture(name: &str) -> std::path::PathBuf {
        Path::new(env!("CARGO_MANIFEST_DIR"))
            .join("tests/fixtures")
            .join(name)
    }

    #[test]
    fn test_import_workbook_first_column() {
        let names = import_file(fixture("class.xlsx")).unwrap();
        assert_eq!(names, vec!["Ana", "Bo", "张三"]);
    }

    #[test]
    fn test_import_workbook_without_names_fails() {
        let result = import_file(fixture("blank.xlsx"));
        assert!(matches!(result, Err(RosterError::NoNames(_))));
    }

    #[test]
    fn test_import_corrupt_workbook_fails() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("class.XLSX");
        fs::write(&path, "Ana,Bo\n").unwrap();

        assert!(matches!(import_file(&path), Err(RosterError::Workbook(_))));
    }

    #[test]
    fn test_import_missing_file_fails() {
        let dir = tempfile::tempdir().expect("tempdir");
        let result = import_file(dir.path().join("nope.csv"));
        assert!(matches!(result, Err(RosterError::Io(_))));
    }
}
