use std::collections::BTreeMap;

use crate::history::dates::CanonicalDate;
use crate::history::record::Record;

/// Date-keyed set of records; a later insert for the same date replaces
/// the earlier record entirely.
#[derive(Debug, Clone, Default)]
pub struct RecordSet {
    by_date: BTreeMap<CanonicalDate, Record>,
}

impl RecordSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, record: Record) -> Option<Record> {
        self.by_date.insert(record.date, record)
    }

    pub fn extend<I: IntoIterator<Item = Record>>(&mut self, records: I) {
        for record in records {
            self.insert(record);
        }
    }

    pub fn len(&self) -> usize {
        self.by_date.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_date.is_empty()
    }

    pub fn latest_date(&self) -> Option<CanonicalDate> {
        self.by_date.keys().next_back().copied()
    }

    /// Records ascending by date.
    pub fn into_sorted(self) -> Vec<Record> {
        self.by_date.into_values().collect()
    }
}

/// Merge previously stored records with newly submitted ones.
///
/// `previous` is inserted first and `incoming` second, so on a shared date
/// the incoming record wins. The result is ascending by date.
pub fn merge(previous: Vec<Record>, incoming: Vec<Record>) -> Vec<Record> {
    let mut set = RecordSet::new();
    set.extend(previous);
    set.extend(incoming);
    set.into_sorted()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::history::decode::decode;
    use crate::history::record::SubmittedRow;

    const HISTORY: &str = "Date,N1,N2,N3,N4,N5,Cash Ball\n01/02/23,1,2,3,4,5,6";

    fn rec(date: &str, values: &str) -> Record {
        let date = CanonicalDate::parse_iso(date).expect("iso date");
        Record::from_values(date, values.split(','))
    }

    #[test]
    fn incoming_overwrites_previous_on_same_date() {
        let a = rec("2023-01-02", "1,2,3,4,5,6");
        let b = rec("2023-01-02", "9,9,9,9,9,9");
        assert_eq!(merge(vec![a], vec![b.clone()]), vec![b]);
    }

    #[test]
    fn later_incoming_wins_within_one_batch() {
        let first = rec("2023-01-02", "1,1,1,1,1,1");
        let second = rec("2023-01-02", "2,2,2,2,2,2");
        assert_eq!(merge(Vec::new(), vec![first, second.clone()]), vec![second]);
    }

    #[test]
    fn output_is_ascending_by_date() {
        let previous = vec![
            rec("2024-05-01", "1,2,3,4,5,6"),
            rec("1999-12-31", "1,2,3,4,5,6"),
            rec("2023-07-15", "1,2,3,4,5,6"),
        ];
        let incoming = vec![rec("2000-01-01", "1,2,3,4,5,6"), rec("2023-07-15", "7,7,7,7,7,7")];
        let merged = merge(previous, incoming);
        let keys: Vec<String> = merged.iter().map(|r| r.date.to_string()).collect();
        let mut sorted = keys.clone();
        sorted.sort();
        assert_eq!(keys, sorted);
        assert_eq!(merged.len(), 4);
        assert!(merged.windows(2).all(|w| w[0].date < w[1].date));
    }

    #[test]
    fn history_merged_with_later_submission_keeps_both() {
        let previous = decode(HISTORY);
        let incoming: Vec<Record> = [SubmittedRow::new("02/03/2024", "7,8,9,10,11,12")]
            .iter()
            .filter_map(SubmittedRow::to_record)
            .collect();
        let merged = merge(previous, incoming);
        assert_eq!(merged.len(), 2);
        assert_eq!(merged[0].date.to_string(), "2023-01-02");
        assert_eq!(merged[0].values(), ["1", "2", "3", "4", "5", "6"]);
        assert_eq!(merged[1].date.to_string(), "2024-02-03");
        assert_eq!(merged[1].values(), ["7", "8", "9", "10", "11", "12"]);
    }

    #[test]
    fn submission_for_same_day_in_other_format_replaces_history() {
        let previous = decode(HISTORY);
        let incoming: Vec<Record> = [SubmittedRow::new("01/02/2023", "11,12,13,14,15,16")]
            .iter()
            .filter_map(SubmittedRow::to_record)
            .collect();
        let merged = merge(previous, incoming);
        assert_eq!(merged.len(), 1);
        assert_eq!(merged[0].date.to_string(), "2023-01-02");
        assert_eq!(merged[0].values(), ["11", "12", "13", "14", "15", "16"]);
    }

    #[test]
    fn record_set_reports_latest_date() {
        let mut set = RecordSet::new();
        assert!(set.is_empty());
        set.extend([rec("2023-01-02", ""), rec("2024-02-03", ""), rec("2021-01-01", "")]);
        assert_eq!(set.len(), 3);
        assert_eq!(set.latest_date().map(|d| d.to_string()).as_deref(), Some("2024-02-03"));
    }
}
