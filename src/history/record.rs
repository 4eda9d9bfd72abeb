use serde::{Deserialize, Serialize};

use crate::history::dates::{self, CanonicalDate, DateFormat};

/// Number of value fields carried by every draw: five numbers and the cash ball.
pub const VALUE_FIELDS: usize = 6;

/// One dated draw result. Values are kept as trimmed text, never parsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    pub date: CanonicalDate,
    pub n1: String,
    pub n2: String,
    pub n3: String,
    pub n4: String,
    pub n5: String,
    pub cash_ball: String,
}

impl Record {
    pub fn blank(date: CanonicalDate) -> Self {
        Self::from_values(date, [""; 0])
    }

    /// Build a record from positional values; missing values are empty,
    /// values past the sixth are ignored.
    pub fn from_values<I, S>(date: CanonicalDate, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut it = values.into_iter().map(|v| v.as_ref().trim().to_string());
        let mut next = || it.next().unwrap_or_default();
        Self {
            date,
            n1: next(),
            n2: next(),
            n3: next(),
            n4: next(),
            n5: next(),
            cash_ball: next(),
        }
    }

    pub fn values(&self) -> [&str; VALUE_FIELDS] {
        [
            self.n1.as_str(),
            self.n2.as_str(),
            self.n3.as_str(),
            self.n4.as_str(),
            self.n5.as_str(),
            self.cash_ball.as_str(),
        ]
    }

    pub fn value_mut(&mut self, column: Column) -> Option<&mut String> {
        match column {
            Column::Date => None,
            Column::N1 => Some(&mut self.n1),
            Column::N2 => Some(&mut self.n2),
            Column::N3 => Some(&mut self.n3),
            Column::N4 => Some(&mut self.n4),
            Column::N5 => Some(&mut self.n5),
            Column::CashBall => Some(&mut self.cash_ball),
        }
    }
}

/// Columns recognised in the history file header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Column {
    Date,
    N1,
    N2,
    N3,
    N4,
    N5,
    CashBall,
}

impl Column {
    pub const ALL: [Column; 7] = [
        Column::Date,
        Column::N1,
        Column::N2,
        Column::N3,
        Column::N4,
        Column::N5,
        Column::CashBall,
    ];

    /// Map a trimmed header token; unknown tokens have no column.
    pub fn from_header(token: &str) -> Option<Self> {
        match token.trim() {
            "Date" => Some(Self::Date),
            "N1" => Some(Self::N1),
            "N2" => Some(Self::N2),
            "N3" => Some(Self::N3),
            "N4" => Some(Self::N4),
            "N5" => Some(Self::N5),
            "Cash Ball" => Some(Self::CashBall),
            _ => None,
        }
    }

    pub fn history_label(self) -> &'static str {
        match self {
            Self::Date => "Date",
            Self::N1 => "N1",
            Self::N2 => "N2",
            Self::N3 => "N3",
            Self::N4 => "N4",
            Self::N5 => "N5",
            Self::CashBall => "Cash Ball",
        }
    }
}

/// The fixed first line of the history file.
pub fn history_header() -> String {
    Column::ALL
        .iter()
        .map(|c| c.history_label())
        .collect::<Vec<_>>()
        .join(",")
}

/// A draw as typed into the entry form.
///
/// Field names match the JSON the form emits: `data` is the date as typed,
/// `numeros` the six values joined by commas.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmittedRow {
    #[serde(rename = "data")]
    pub date: String,
    pub numeros: String,
}

impl SubmittedRow {
    pub fn new(date: impl Into<String>, numeros: impl Into<String>) -> Self {
        Self {
            date: date.into(),
            numeros: numeros.into(),
        }
    }

    /// Parse the `DATE=n1,n2,...` shorthand used on the command line.
    pub fn parse_flag(raw: &str) -> Option<Self> {
        let (date, numeros) = raw.split_once('=')?;
        if date.trim().is_empty() {
            return None;
        }
        Some(Self::new(date.trim(), numeros.trim()))
    }

    pub fn values(&self) -> Vec<&str> {
        self.numeros.split(',').map(str::trim).collect()
    }

    /// Map onto a record using the strict `MM/DD/YYYY` form.
    pub fn to_record(&self) -> Option<Record> {
        let date = dates::to_canonical(&self.date, DateFormat::LongYearSlash)?;
        Some(Record::from_values(date, self.values()))
    }
}
