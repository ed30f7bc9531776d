use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// FilterValue – a single cell of a filterable column
// ---------------------------------------------------------------------------

/// The value a record exposes for one [`FilterColumn`].
/// Selections are stored in `BTreeSet`s, so `FilterValue` must be `Ord`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum FilterValue {
    Integer(i64),
    Date(NaiveDate),
    Text(String),
}

impl fmt::Display for FilterValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FilterValue::Integer(i) => write!(f, "{i}"),
            FilterValue::Date(d) => write!(f, "{}", d.format("%d/%m/%Y")),
            FilterValue::Text(s) => write!(f, "{s}"),
        }
    }
}

// ---------------------------------------------------------------------------
// FilterColumn – the columns a user can filter on
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum FilterColumn {
    Team,
    Position,
    Sprint,
    Date,
    FullName,
    Surname,
}

impl FilterColumn {
    /// Columns narrowing the quadrant chart, in application order.
    pub const CHAIN: [FilterColumn; 4] = [
        FilterColumn::Team,
        FilterColumn::Position,
        FilterColumn::Sprint,
        FilterColumn::Date,
    ];

    pub const ALL: [FilterColumn; 6] = [
        FilterColumn::Team,
        FilterColumn::Position,
        FilterColumn::Sprint,
        FilterColumn::Date,
        FilterColumn::FullName,
        FilterColumn::Surname,
    ];

    /// Human readable label for filter widgets.
    pub fn label(self) -> &'static str {
        match self {
            FilterColumn::Team => "Team",
            FilterColumn::Position => "Position",
            FilterColumn::Sprint => "Sprint number",
            FilterColumn::Date => "Test date",
            FilterColumn::FullName => "Athlete",
            FilterColumn::Surname => "Athlete (surname)",
        }
    }
}

// ---------------------------------------------------------------------------
// Sprint – the "Num Sprint" cell
// ---------------------------------------------------------------------------

/// Sprint identifier: usually a number, sometimes a free-text label.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Sprint {
    Number(i64),
    Label(String),
}

impl fmt::Display for Sprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Sprint::Number(n) => write!(f, "{n}"),
            Sprint::Label(s) => write!(f, "{s}"),
        }
    }
}

// ---------------------------------------------------------------------------
// AthleteKey – which name column identifies an athlete
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AthleteKey {
    /// "NOM Prénom"
    #[default]
    FullName,
    /// "NOM"
    Surname,
}

impl AthleteKey {
    pub fn column(self) -> FilterColumn {
        match self {
            AthleteKey::FullName => FilterColumn::FullName,
            AthleteKey::Surname => FilterColumn::Surname,
        }
    }
}

// ---------------------------------------------------------------------------
// TestRecord – one row of the results sheet
// ---------------------------------------------------------------------------

/// A single sprint test result. Immutable once loaded.
#[derive(Debug, Clone, PartialEq)]
pub struct TestRecord {
    pub team: String,
    pub position: String,
    pub sprint: Sprint,
    pub test_date: NaiveDate,
    pub full_name: String,
    pub surname: String,
    /// Theoretical maximal velocity (m/s).
    pub v0: f64,
    /// Theoretical maximal horizontal force (N/kg).
    pub f0: f64,
}

impl TestRecord {
    /// The value this record exposes for `column`.
    pub fn value(&self, column: FilterColumn) -> FilterValue {
        match column {
            FilterColumn::Team => FilterValue::Text(self.team.clone()),
            FilterColumn::Position => FilterValue::Text(self.position.clone()),
            FilterColumn::Sprint => match &self.sprint {
                Sprint::Number(n) => FilterValue::Integer(*n),
                Sprint::Label(s) => FilterValue::Text(s.clone()),
            },
            FilterColumn::Date => FilterValue::Date(self.test_date),
            FilterColumn::FullName => FilterValue::Text(self.full_name.clone()),
            FilterColumn::Surname => FilterValue::Text(self.surname.clone()),
        }
    }

    /// Whether the record's value for `column` is in `selected`.
    pub fn matches(&self, column: FilterColumn, selected: &BTreeSet<FilterValue>) -> bool {
        // Text columns are the common case; avoid cloning the string for them.
        match column {
            FilterColumn::Team => contains_text(selected, &self.team),
            FilterColumn::Position => contains_text(selected, &self.position),
            FilterColumn::FullName => contains_text(selected, &self.full_name),
            FilterColumn::Surname => contains_text(selected, &self.surname),
            FilterColumn::Sprint | FilterColumn::Date => selected.contains(&self.value(column)),
        }
    }

    /// Display name under the configured identity key.
    pub fn athlete(&self, key: AthleteKey) -> &str {
        match key {
            AthleteKey::FullName => &self.full_name,
            AthleteKey::Surname => &self.surname,
        }
    }
}

fn contains_text(selected: &BTreeSet<FilterValue>, text: &str) -> bool {
    selected
        .iter()
        .any(|v| matches!(v, FilterValue::Text(s) if s == text))
}

// ---------------------------------------------------------------------------
// FvDataset – the complete loaded sheet
// ---------------------------------------------------------------------------

/// The full parsed dataset with pre-computed distinct values per column.
#[derive(Debug, Clone, Default)]
pub struct FvDataset {
    /// All test records, in file order.
    pub records: Vec<TestRecord>,
    /// For each filterable column the sorted set of distinct values.
    pub unique_values: BTreeMap<FilterColumn, BTreeSet<FilterValue>>,
}

impl FvDataset {
    /// Build column indices from the loaded records.
    pub fn from_records(records: Vec<TestRecord>) -> Self {
        let mut unique_values: BTreeMap<FilterColumn, BTreeSet<FilterValue>> = BTreeMap::new();
        for rec in &records {
            for col in FilterColumn::ALL {
                unique_values.entry(col).or_default().insert(rec.value(col));
            }
        }
        FvDataset {
            records,
            unique_values,
        }
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the dataset is empty.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Every row index, in file order.
    pub fn all_rows(&self) -> Vec<usize> {
        (0..self.records.len()).collect()
    }
}
