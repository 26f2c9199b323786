//! CSV table loading.
//!
//! The first record is the header row; every following record must have the
//! same number of fields. Values are kept as strings exactly as read.

use csv::{ReaderBuilder, StringRecord};
use pc_common::{Error, Result};
use std::fs::{self, File};
use std::io::{BufReader, Read};
use std::path::Path;
use tracing::debug;

/// Field delimiter used when neither the caller nor the file extension picks one.
pub const DEFAULT_DELIMITER: u8 = b',';

/// Headers plus data rows of one delimited file.
#[derive(Debug, Clone)]
pub struct Table {
    headers: Vec<String>,
    rows: Vec<StringRecord>,
}

/// Borrowed view of one data row, addressable by column name.
#[derive(Debug, Clone, Copy)]
pub struct Row<'a> {
    table: &'a Table,
    record: &'a StringRecord,
}

impl<'a> Row<'a> {
    /// Value of `column` in this row, `None` if the table has no such column.
    pub fn get(&self, column: &str) -> Option<&'a str> {
        let idx = self.table.column_index(column)?;
        self.record.get(idx)
    }

    /// Value at a column position.
    pub fn get_index(&self, idx: usize) -> Option<&'a str> {
        self.record.get(idx)
    }
}

impl Table {
    /// Parse a table from any reader.
    ///
    /// Input with no header record is rejected; a header with no data rows
    /// yields an empty table.
    pub fn from_reader<R: Read>(reader: R, delimiter: u8) -> std::result::Result<Self, String> {
        let mut rdr = ReaderBuilder::new()
            .delimiter(delimiter)
            .has_headers(true)
            .flexible(false)
            .from_reader(reader);

        let header_record = rdr.headers().map_err(|e| e.to_string())?;
        if header_record.is_empty() {
            return Err("input has no header row".to_string());
        }
        let headers: Vec<String> = header_record.iter().map(str::to_string).collect();

        let mut rows = Vec::new();
        for record in rdr.records() {
            rows.push(record.map_err(|e| e.to_string())?);
        }

        Ok(Table { headers, rows })
    }

    /// Header names in file order.
    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    /// Number of data rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Position of `name` in the header row. The first occurrence wins when a
    /// header is repeated.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == name)
    }

    /// Row at `idx`.
    pub fn row(&self, idx: usize) -> Option<Row<'_>> {
        self.rows.get(idx).map(|record| Row {
            table: self,
            record,
        })
    }

    /// All data rows in file order.
    pub fn rows(&self) -> impl Iterator<Item = Row<'_>> + '_ {
        self.rows.iter().map(move |record| Row {
            table: self,
            record,
        })
    }

    /// Check that the key column and every data column exist.
    ///
    /// The key column is checked first, then data columns in request order;
    /// the first absent name is reported together with the available headers.
    pub fn require_columns(&self, key_column: &str, data_columns: &[String]) -> Result<()> {
        let requested = std::iter::once(key_column).chain(data_columns.iter().map(String::as_str));
        for column in requested {
            if self.column_index(column).is_none() {
                return Err(Error::MissingColumn {
                    column: column.to_string(),
                    available: self.headers.clone(),
                });
            }
        }
        Ok(())
    }
}

/// Pick the delimiter for `path`: tab for `.tsv`, comma otherwise.
pub fn delimiter_for_path(path: &Path) -> u8 {
    match path.extension().and_then(|e| e.to_str()) {
        Some(ext) if ext.eq_ignore_ascii_case("tsv") => b'\t',
        _ => DEFAULT_DELIMITER,
    }
}

/// Parse a `--delimiter` argument.
///
/// Accepts a single ASCII character, or `\t` / `tab` for a tab.
pub fn parse_delimiter(s: &str) -> std::result::Result<u8, String> {
    match s {
        "\\t" | "tab" | "\t" => Ok(b'\t'),
        _ => {
            let mut chars = s.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) if c.is_ascii() && c != '"' && c != '\n' && c != '\r' => {
                    Ok(c as u8)
                }
                _ => Err(format!(
                    "delimiter must be a single ASCII character other than a quote or newline, got '{}'",
                    s
                )),
            }
        }
    }
}

/// Read the table at `path`.
///
/// `delimiter` overrides the extension-based default.
pub fn load_table(path: &Path, delimiter: Option<u8>) -> Result<Table> {
    let not_found = |reason: String| Error::FileNotFound {
        path: path.to_path_buf(),
        reason,
    };

    let meta = fs::metadata(path).map_err(|e| not_found(e.to_string()))?;
    if !meta.is_file() {
        return Err(not_found("not a regular file".to_string()));
    }
    let file = File::open(path).map_err(|e| not_found(e.to_string()))?;

    let delimiter = delimiter.unwrap_or_else(|| delimiter_for_path(path));
    debug!(
        path = %path.display(),
        delimiter = %(delimiter as char).escape_default(),
        "Reading table"
    );

    let table = Table::from_reader(BufReader::new(file), delimiter).map_err(|reason| {
        Error::Parse {
            path: path.to_path_buf(),
            reason,
        }
    })?;

    debug!(
        rows = table.len(),
        columns = table.headers().len(),
        "Table loaded"
    );
    Ok(table)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn parse(input: &str) -> Table {
        Table::from_reader(input.as_bytes(), b',').unwrap()
    }

    fn write_file(dir: &tempfile::TempDir, name: &str, contents: &[u8]) -> std::path::PathBuf {
        let path = dir.path().join(name);
        let mut f = File::create(&path).unwrap();
        f.write_all(contents).unwrap();
        path
    }

    #[test]
    fn test_reads_headers_and_rows() {
        let table = parse("unit,result\nA,pass\nB,fail\n");
        assert_eq!(table.headers(), ["unit", "result"]);
        assert_eq!(table.len(), 2);
        let row = table.row(1).unwrap();
        assert_eq!(row.get("unit"), Some("B"));
        assert_eq!(row.get("result"), Some("fail"));
        assert_eq!(row.get("missing"), None);
    }

    #[test]
    fn test_header_only_has_no_rows() {
        let table = parse("unit,result\n");
        assert!(table.is_empty());
        assert_eq!(table.headers().len(), 2);
    }

    #[test]
    fn test_empty_input_rejected() {
        let err = Table::from_reader("".as_bytes(), b',').unwrap_err();
        assert!(err.contains("no header"));
    }

    #[test]
    fn test_ragged_row_rejected() {
        assert!(Table::from_reader("a,b\n1,2,3\n".as_bytes(), b',').is_err());
        assert!(Table::from_reader("a,b\n1\n".as_bytes(), b',').is_err());
    }

    #[test]
    fn test_quoted_fields() {
        let table = parse("unit,note\n\"A, west\",\"said \"\"pass\"\"\"\n");
        let row = table.row(0).unwrap();
        assert_eq!(row.get("unit"), Some("A, west"));
        assert_eq!(row.get("note"), Some("said \"pass\""));
    }

    #[test]
    fn test_values_are_not_trimmed() {
        let table = parse("unit,result\n A , pass \n");
        assert_eq!(table.row(0).unwrap().get("unit"), Some(" A "));
    }

    #[test]
    fn test_duplicate_header_first_wins() {
        let table = parse("x,x\n1,2\n");
        assert_eq!(table.column_index("x"), Some(0));
        assert_eq!(table.row(0).unwrap().get("x"), Some("1"));
    }

    #[test]
    fn test_require_columns_checks_key_first() {
        let table = parse("unit,result\n");
        let err = table
            .require_columns("team", &["also_missing".to_string()])
            .unwrap_err();
        match err {
            Error::MissingColumn { column, available } => {
                assert_eq!(column, "team");
                assert_eq!(available, vec!["unit", "result"]);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_require_columns_reports_first_missing_data_column() {
        let table = parse("unit,result\n");
        let err = table
            .require_columns("unit", &["result".into(), "b".into(), "c".into()])
            .unwrap_err();
        assert!(matches!(err, Error::MissingColumn { ref column, .. } if column == "b"));
        assert!(table.require_columns("unit", &["result".into()]).is_ok());
    }

    #[test]
    fn test_column_names_are_case_sensitive() {
        let table = parse("Unit,result\n");
        assert!(table.require_columns("unit", &["result".into()]).is_err());
    }

    #[test]
    fn test_parse_delimiter() {
        assert_eq!(parse_delimiter(";"), Ok(b';'));
        assert_eq!(parse_delimiter("\\t"), Ok(b'\t'));
        assert_eq!(parse_delimiter("tab"), Ok(b'\t'));
        assert!(parse_delimiter("").is_err());
        assert!(parse_delimiter(";;").is_err());
        assert!(parse_delimiter("é").is_err());
    }

    #[test]
    fn test_delimiter_for_path() {
        assert_eq!(delimiter_for_path(Path::new("data.tsv")), b'\t');
        assert_eq!(delimiter_for_path(Path::new("data.TSV")), b'\t');
        assert_eq!(delimiter_for_path(Path::new("data.csv")), b',');
        assert_eq!(delimiter_for_path(Path::new("data")), b',');
    }

    #[test]
    fn test_load_table_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_table(&dir.path().join("absent.csv"), None).unwrap_err();
        assert!(matches!(err, Error::FileNotFound { .. }));
    }

    #[test]
    fn test_load_table_directory_is_not_a_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_table(dir.path(), None).unwrap_err();
        assert!(matches!(err, Error::FileNotFound { .. }));
    }

    #[test]
    fn test_load_table_tsv_by_extension() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(&dir, "data.tsv", b"unit\tresult\nA\tpass\n");
        let table = load_table(&path, None).unwrap();
        assert_eq!(table.headers(), ["unit", "result"]);
    }

    #[test]
    fn test_load_table_explicit_delimiter_wins() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(&dir, "data.tsv", b"unit;result\nA;pass\n");
        let table = load_table(&path, Some(b';')).unwrap();
        assert_eq!(table.row(0).unwrap().get("result"), Some("pass"));
    }

    #[test]
    fn test_load_table_invalid_utf8_is_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(&dir, "bad.csv", b"unit,result\nA,\xff\xfe\n");
        let err = load_table(&path, None).unwrap_err();
        assert!(matches!(err, Error::Parse { .. }));
    }

    #[test]
    fn test_load_table_empty_file_is_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(&dir, "empty.csv", b"");
        let err = load_table(&path, None).unwrap_err();
        assert!(matches!(err, Error::Parse { .. }));
    }
}
