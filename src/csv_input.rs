use std::fs::File;
use std::io::Read;
use std::path::Path;

use csv::{ReaderBuilder, Trim};

use crate::error::{Error, Result};

/// Cell contents treated as a missing value (compared case-insensitively, after trimming)
const MISSING_VALUE_TOKENS: &[&str] = &["", "na", "n/a", "#n/a", "nan", "null", "none", "-"];

/// The observations of one column, in file order, with the missing cells removed
#[derive(Clone, Debug, PartialEq)]
pub struct Column {
    /// Header of the column
    pub name: String,
    /// Parsed observations
    pub values: Vec<f64>,
    /// Number of data rows in the input, including the discarded ones
    pub rows: usize,
}

impl Column {
    /// Number of rows whose cell was missing or not a number
    pub fn discarded(&self) -> usize {
        self.rows - self.values.len()
    }
}

/// Reads comma-separated data with a header row and extracts the numeric cells of `column`
///
/// Rows shorter than the header count as missing in `column`.
///
/// # Errors
///
/// [`Error::MissingColumn`] if no header equals `column`, [`Error::CsvError`] on malformed input.
pub fn read_column<R: Read>(reader: R, column: &str) -> Result<Column> {
    let mut reader = ReaderBuilder::new()
        .flexible(true)
        .trim(Trim::All)
        .from_reader(reader);

    let headers = reader.headers()?.clone();
    let index = match headers.iter().position(|header| header == column) {
        Some(index) => index,
        None => {
            return Err(Error::MissingColumn {
                column: column.to_owned(),
                available: headers.iter().map(String::from).collect(),
            })
        }
    };

    let mut values = vec![];
    let mut rows = 0;
    for record in reader.records() {
        let record = record?;
        rows += 1;

        match record.get(index).and_then(parse_observation) {
            Some(value) => values.push(value),
            None => info!("Row {}: discarding {:?}", rows, record.get(index)),
        }
    }

    Ok(Column {
        name: column.to_owned(),
        values,
        rows,
    })
}

/// Opens `path` and reads `column` out of it, see [`read_column`]
pub fn read_column_from_path<P: AsRef<Path>>(path: P, column: &str) -> Result<Column> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|inner| Error::AccessError {
        path: path.to_owned(),
        inner,
    })?;

    info!("Reading column '{}' from {:?}", column, path);
    read_column(file, column)
}

fn parse_observation(cell: &str) -> Option<f64> {
    let cell = cell.trim();
    if MISSING_VALUE_TOKENS
        .iter()
        .any(|token| cell.eq_ignore_ascii_case(token))
    {
        return None;
    }

    cell.parse().ok()
}

#[cfg(test)]
mod test {
    use super::read_column;
    use crate::error::Error;

    #[test]
    fn extracts_named_column_in_order() {
        let data = "student,study_hours,grade\n\
                    a,1.5,B\n\
                    b,3,A\n\
                    c,0.25,C\n";

        let column = read_column(data.as_bytes(), "study_hours").unwrap();

        assert_eq!(column.name, "study_hours");
        assert_eq!(column.values, vec![1.5, 3., 0.25]);
        assert_eq!(column.rows, 3);
        assert_eq!(column.discarded(), 0);
    }

    #[test]
    fn discards_missing_and_non_numeric_cells() {
        let data = "study_hours\n2\n\nNA\nnan\n n/a \nabc\n-\n4.5\nNULL\n";

        let column = read_column(data.as_bytes(), "study_hours").unwrap();

        assert_eq!(column.values, vec![2., 4.5]);
        // The blank line is skipped by the reader, it is not a row
        assert_eq!(column.rows, 8);
        assert_eq!(column.discarded(), 6);
    }

    #[test]
    fn short_rows_count_as_missing() {
        let data = "id,study_hours\n1,2.0\n2\n3,1.0\n";

        let column = read_column(data.as_bytes(), "study_hours").unwrap();

        assert_eq!(column.values, vec![2., 1.]);
        assert_eq!(column.discarded(), 1);
    }

    #[test]
    fn headers_and_cells_are_trimmed() {
        let data = "id , study_hours \n1,  2.5 \n";

        let column = read_column(data.as_bytes(), "study_hours").unwrap();

        assert_eq!(column.values, vec![2.5]);
    }

    #[test]
    fn missing_column() {
        let data = "hours,grade\n1,A\n";

        match read_column(data.as_bytes(), "study_hours") {
            Err(Error::MissingColumn { column, available }) => {
                assert_eq!(column, "study_hours");
                assert_eq!(available, vec!["hours".to_owned(), "grade".to_owned()]);
            }
            other => panic!("expected MissingColumn, got {:?}", other),
        }
    }

    #[test]
    fn header_only_yields_no_observations() {
        let column = read_column("study_hours\n".as_bytes(), "study_hours").unwrap();

        assert!(column.values.is_empty());
        assert_eq!(column.rows, 0);
    }
}
