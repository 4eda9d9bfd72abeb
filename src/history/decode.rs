use tracing::debug;

use crate::history::dates::{self, DateFormat};
use crate::history::record::{Column, Record};

/// Decode history-file text into records, in file order.
///
/// The first line names the columns. Unknown column names are skipped for
/// every row. Rows whose date is not a strict `MM/DD/YY` are dropped without
/// an error so one bad line never blocks the rest of the file.
pub fn decode(text: &str) -> Vec<Record> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(text.trim().as_bytes());

    let columns: Vec<Option<Column>> = match reader.headers() {
        Ok(headers) => headers.iter().map(Column::from_header).collect(),
        Err(err) => {
            debug!(%err, "history header unreadable; no rows decoded");
            return Vec::new();
        }
    };
    let Some(date_idx) = columns.iter().rposition(|c| *c == Some(Column::Date)) else {
        debug!("history header has no Date column; no rows decoded");
        return Vec::new();
    };

    let mut out = Vec::new();
    for (idx, row) in reader.records().enumerate() {
        let line = idx + 2;
        let row = match row {
            Ok(row) => row,
            Err(err) => {
                debug!(line, %err, "dropping unreadable history line");
                continue;
            }
        };

        let raw_date = row.get(date_idx).unwrap_or_default();
        let Some(date) = dates::to_canonical(raw_date, DateFormat::ShortYearSlash) else {
            debug!(line, raw_date, "dropping history line with invalid date");
            continue;
        };

        let mut record = Record::blank(date);
        for (pos, column) in columns.iter().enumerate() {
            let Some(column) = column else {
                continue;
            };
            if let Some(slot) = record.value_mut(*column) {
                *slot = row.get(pos).unwrap_or_default().to_string();
            }
        }
        out.push(record);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEADER: &str = "Date,N1,N2,N3,N4,N5,Cash Ball";

    #[test]
    fn decodes_legacy_lines_in_file_order() {
        let text = format!("{HEADER}\n03/04/23,10,20,30,31,32,4\n01/02/23,1,2,3,4,5,6\n");
        let records = decode(&text);
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].date.to_string(), "2023-03-04");
        assert_eq!(records[0].values(), ["10", "20", "30", "31", "32", "4"]);
        assert_eq!(records[1].date.to_string(), "2023-01-02");
    }

    #[test]
    fn drops_rows_with_invalid_dates() {
        let text = format!(
            "{HEADER}\n01/02/23,1,2,3,4,5,6\n2023-01-03,1,2,3,4,5,6\n1/4/23,1,2,3,4,5,6\n\n02/30/23,1,2,3,4,5,6\n01/05/23,6,5,4,3,2,1"
        );
        let records = decode(&text);
        let dates: Vec<String> = records.iter().map(|r| r.date.to_string()).collect();
        assert_eq!(dates, vec!["2023-01-02", "2023-01-05"]);
        let data_lines = text.lines().count() - 1;
        assert!(records.len() <= data_lines);
    }

    #[test]
    fn trims_cells_and_tolerates_crlf() {
        let text = "Date , N1,N2,N3,N4,N5, Cash Ball\r\n 01/02/23 , 1 ,2,3,4,5, 6 \r\n";
        let records = decode(text);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].values(), ["1", "2", "3", "4", "5", "6"]);
    }

    #[test]
    fn unknown_columns_are_ignored() {
        let text = "Date,Multiplier,N1,N2,N3,N4,N5,Cash Ball\n01/02/23,x3,1,2,3,4,5,6";
        let records = decode(text);
        assert_eq!(records[0].values(), ["1", "2", "3", "4", "5", "6"]);
    }

    #[test]
    fn short_rows_read_missing_cells_as_empty() {
        let text = format!("{HEADER}\n01/02/23,1,2");
        let records = decode(&text);
        assert_eq!(records[0].values(), ["1", "2", "", "", "", ""]);
    }

    #[test]
    fn no_date_column_or_empty_text_yields_nothing() {
        assert!(decode("").is_empty());
        assert!(decode("N1,N2\n1,2").is_empty());
        assert!(decode(HEADER).is_empty());
    }

    #[test]
    fn decoding_is_idempotent() {
        let text = format!("{HEADER}\n01/02/23,1,2,3,4,5,6\nbad,1,2,3,4,5,6\n05/06/99,9,9,9,9,9,9");
        assert_eq!(decode(&text), decode(&text));
    }
}
