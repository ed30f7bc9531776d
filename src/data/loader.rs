use std::path::Path;

use anyhow::{Context, Result, bail};
use arrow::array::{Array, ArrayRef, AsArray};
use arrow::compute::cast;
use arrow::datatypes::{DataType, Date32Type, Float64Type, Int64Type};
use calamine::{Data, Reader, open_workbook_auto};
use chrono::{DateTime, Days, NaiveDate, NaiveDateTime};
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use serde_json::Value as JsonValue;

use super::model::{FvDataset, Sprint, TestRecord};

// ---------------------------------------------------------------------------
// Column names of the "Data F-V" sheet
// ---------------------------------------------------------------------------

pub const COL_TEAM: &str = "Equipes";
pub const COL_POSITION: &str = "Poste";
pub const COL_SPRINT: &str = "Num Sprint";
pub const COL_DATE: &str = "Date du test";
pub const COL_FULL_NAME: &str = "NOM Prénom";
pub const COL_SURNAME: &str = "NOM";
pub const COL_V0: &str = "V0 (m/s)";
pub const COL_F0: &str = "F0 (N/kg)";

/// Raised when the header row does not carry the columns the viewer needs.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SchemaError {
    #[error("missing required column '{0}'")]
    MissingColumn(&'static str),
    #[error("missing athlete name column: expected 'NOM Prénom' or 'NOM'")]
    MissingNameColumn,
}

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load F-V test results from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.csv`     – header row, `,` or `;` separated, `.` decimal separator
/// * `.json`    – `[{ "Equipes": "...", "V0 (m/s)": 9.1, ... }, ...]`
/// * `.parquet` – one column per field, any reasonable Arrow type
/// * `.xlsx`    – first worksheet of the workbook (also `.xlsm`, `.xlsb`,
///   `.xls` and `.ods`)
pub fn load_file(path: &Path) -> Result<FvDataset> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    match ext.as_str() {
        "csv" | "txt" => load_csv(path),
        "json" => load_json(path),
        "parquet" | "pq" => load_parquet(path),
        "xlsx" | "xlsm" | "xlsb" | "xls" | "ods" => load_workbook(path),
        other => bail!("Unsupported file extension: .{other}"),
    }
}

// ---------------------------------------------------------------------------
// Raw cells and header resolution shared by all formats
// ---------------------------------------------------------------------------

/// A loosely typed cell as read from the file, before it becomes part of a
/// [`TestRecord`].
#[derive(Debug, Clone, PartialEq)]
enum Cell {
    Null,
    Integer(i64),
    Float(f64),
    Date(NaiveDate),
    Text(String),
}

static NULL_CELL: Cell = Cell::Null;

/// How a bare number in the date column is read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum NumericDates {
    /// Milliseconds since 1970-01-01, as written by `DataFrame.to_json()`.
    EpochMillis,
    /// Spreadsheet serial day, counted from 1899-12-30.
    SerialDays,
}

/// Position of each required column in a row, resolved once per file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct ColumnMap {
    team: usize,
    position: usize,
    sprint: usize,
    date: usize,
    full_name: Option<usize>,
    surname: Option<usize>,
    v0: usize,
    f0: usize,
}

impl ColumnMap {
    fn resolve<S: AsRef<str>>(headers: &[S]) -> Result<Self, SchemaError> {
        let find = |name: &str| headers.iter().position(|h| h.as_ref().trim() == name);
        let require =
            |name: &'static str| find(name).ok_or(SchemaError::MissingColumn(name));

        let full_name = find(COL_FULL_NAME);
        let surname = find(COL_SURNAME);
        if full_name.is_none() && surname.is_none() {
            return Err(SchemaError::MissingNameColumn);
        }

        Ok(ColumnMap {
            team: require(COL_TEAM)?,
            position: require(COL_POSITION)?,
            sprint: require(COL_SPRINT)?,
            date: require(COL_DATE)?,
            full_name,
            surname,
            v0: require(COL_V0)?,
            f0: require(COL_F0)?,
        })
    }

    /// Indices this map reads, in no particular order.
    fn used(&self) -> impl Iterator<Item = usize> {
        [self.team, self.position, self.sprint, self.date, self.v0, self.f0]
            .into_iter()
            .chain(self.full_name)
            .chain(self.surname)
    }

    /// Turn one row of raw cells into a typed record.
    fn build_record(
        &self,
        row: usize,
        cells: &[Cell],
        numeric_dates: NumericDates,
    ) -> Result<TestRecord> {
        let cell = |idx: usize| cells.get(idx).unwrap_or(&NULL_CELL);

        let full_name = self.full_name.map(|i| cell_text(cell(i)));
        let surname = self.surname.map(|i| cell_text(cell(i)));
        let (full_name, surname) = match (full_name, surname) {
            (Some(full), Some(sur)) => (full, sur),
            (Some(full), None) => {
                let sur = full.split_whitespace().next().unwrap_or_default().to_string();
                (full, sur)
            }
            (None, Some(sur)) => (sur.clone(), sur),
            (None, None) => return Err(SchemaError::MissingNameColumn.into()),
        };

        Ok(TestRecord {
            team: cell_text(cell(self.team)),
            position: cell_text(cell(self.position)),
            sprint: cell_sprint(cell(self.sprint)),
            test_date: cell_date(cell(self.date), numeric_dates)
                .with_context(|| format!("Row {row}, '{COL_DATE}'"))?,
            full_name,
            surname,
            v0: cell_f64(cell(self.v0)).with_context(|| format!("Row {row}, '{COL_V0}'"))?,
            f0: cell_f64(cell(self.f0)).with_context(|| format!("Row {row}, '{COL_F0}'"))?,
        })
    }
}

fn cell_text(cell: &Cell) -> String {
    match cell {
        Cell::Null => String::new(),
        Cell::Integer(i) => i.to_string(),
        Cell::Float(f) => f.to_string(),
        Cell::Date(d) => d.format("%Y-%m-%d").to_string(),
        Cell::Text(s) => s.trim().to_string(),
    }
}

fn cell_sprint(cell: &Cell) -> Sprint {
    match cell {
        Cell::Integer(i) => Sprint::Number(*i),
        Cell::Float(f) if f.fract() == 0.0 && f.is_finite() => Sprint::Number(*f as i64),
        Cell::Text(s) => match s.trim().parse::<i64>() {
            Ok(n) => Sprint::Number(n),
            Err(_) => Sprint::Label(s.trim().to_string()),
        },
        other => Sprint::Label(cell_text(other)),
    }
}

/// Empty numeric cells become NaN, like a spreadsheet blank read into a frame.
fn cell_f64(cell: &Cell) -> Result<f64> {
    match cell {
        Cell::Null => Ok(f64::NAN),
        Cell::Integer(i) => Ok(*i as f64),
        Cell::Float(f) => Ok(*f),
        Cell::Text(s) if s.trim().is_empty() => Ok(f64::NAN),
        Cell::Text(s) => s
            .trim()
            .parse::<f64>()
            .with_context(|| format!("'{s}' is not a number")),
        Cell::Date(d) => bail!("expected a number, found date {d}"),
    }
}

fn cell_date(cell: &Cell, numeric_dates: NumericDates) -> Result<NaiveDate> {
    match (cell, numeric_dates) {
        (Cell::Date(d), _) => Ok(*d),
        (Cell::Integer(ms), NumericDates::EpochMillis) => DateTime::from_timestamp_millis(*ms)
            .map(|dt| dt.date_naive())
            .with_context(|| format!("timestamp {ms} out of range")),
        (Cell::Integer(days), NumericDates::SerialDays) => serial_day(*days as f64),
        (Cell::Float(days), NumericDates::SerialDays) => serial_day(*days),
        (Cell::Text(s), _) => parse_date(s).with_context(|| format!("'{s}' is not a date")),
        (Cell::Null, _) => bail!("empty date"),
        (Cell::Float(f), NumericDates::EpochMillis) => bail!("expected a date, found number {f}"),
    }
}

/// Day 1 is 1900-01-01; the time of day, if any, is dropped.
fn serial_day(days: f64) -> Result<NaiveDate> {
    if !(days.is_finite() && days >= 1.0) {
        bail!("expected a date, found number {days}");
    }
    NaiveDate::from_ymd_opt(1899, 12, 30)
        .and_then(|epoch| epoch.checked_add_days(Days::new(days.trunc() as u64)))
        .with_context(|| format!("serial day {days} out of range"))
}

const DATE_FORMATS: [&str; 3] = ["%Y-%m-%d", "%d/%m/%Y", "%d-%m-%Y"];
const DATETIME_FORMATS: [&str; 2] = ["%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S%.f"];

fn parse_date(s: &str) -> Option<NaiveDate> {
    let s = s.trim().trim_end_matches('Z');
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(s, fmt).ok())
        .or_else(|| {
            DATETIME_FORMATS
                .iter()
                .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
                .map(|dt| dt.date())
        })
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

/// CSV layout: header row with the sheet's column names, one test per row.
/// Spreadsheets set to a French locale export with `;`, so the delimiter is
/// taken from the header line.
fn load_csv(path: &Path) -> Result<FvDataset> {
    let text = std::fs::read_to_string(path).context("reading CSV file")?;
    let text = text.trim_start_matches('\u{feff}');

    let header_line = text.lines().next().unwrap_or("");
    let delimiter = if header_line.contains(';') && !header_line.contains(',') {
        b';'
    } else {
        b','
    };

    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .flexible(true)
        .from_reader(text.as_bytes());
    let headers: Vec<String> = reader
        .headers()
        .context("reading CSV headers")?
        .iter()
        .map(|h| h.to_string())
        .collect();
    let columns = ColumnMap::resolve(&headers)?;

    let mut records = Vec::new();
    for (row_no, result) in reader.records().enumerate() {
        let row = row_no + 1;
        let record = result.with_context(|| format!("CSV row {row}"))?;
        if record.iter().all(|v| v.trim().is_empty()) {
            continue;
        }
        let cells: Vec<Cell> = record.iter().map(guess_cell).collect();
        records.push(columns.build_record(row, &cells, NumericDates::SerialDays)?);
    }

    Ok(FvDataset::from_records(records))
}

fn guess_cell(s: &str) -> Cell {
    let s = s.trim();
    if s.is_empty() {
        return Cell::Null;
    }
    if let Ok(i) = s.parse::<i64>() {
        return Cell::Integer(i);
    }
    if let Ok(f) = s.parse::<f64>() {
        return Cell::Float(f);
    }
    Cell::Text(s.to_string())
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// Expected JSON schema (records-oriented, `df.to_json(orient='records')`):
///
/// ```json
/// [
///   {
///     "Equipes": "U19", "Poste": "Ailier", "Num Sprint": 1,
///     "Date du test": "2023-09-12", "NOM Prénom": "DUPONT Jean",
///     "V0 (m/s)": 9.31, "F0 (N/kg)": 7.92
///   },
///   ...
/// ]
/// ```
fn load_json(path: &Path) -> Result<FvDataset> {
    let text = std::fs::read_to_string(path).context("reading JSON file")?;
    let root: JsonValue = serde_json::from_str(&text).context("parsing JSON")?;

    let rows = root.as_array().context("Expected top-level JSON array")?;
    let Some(first) = rows.first() else {
        return Ok(FvDataset::default());
    };

    let headers: Vec<String> = first
        .as_object()
        .context("Row 1 is not a JSON object")?
        .keys()
        .cloned()
        .collect();
    let columns = ColumnMap::resolve(&headers)?;

    let mut records = Vec::with_capacity(rows.len());
    for (i, value) in rows.iter().enumerate() {
        let row = i + 1;
        let obj = value
            .as_object()
            .with_context(|| format!("Row {row} is not a JSON object"))?;
        let cells: Vec<Cell> = headers
            .iter()
            .map(|h| obj.get(h).map_or(Cell::Null, json_to_cell))
            .collect();
        records.push(columns.build_record(row, &cells, NumericDates::EpochMillis)?);
    }

    Ok(FvDataset::from_records(records))
}

fn json_to_cell(val: &JsonValue) -> Cell {
    match val {
        JsonValue::String(s) => Cell::Text(s.clone()),
        JsonValue::Number(n) => {
            if let Some(i) = n.as_i64() {
                Cell::Integer(i)
            } else if let Some(f) = n.as_f64() {
                Cell::Float(f)
            } else {
                Cell::Text(n.to_string())
            }
        }
        JsonValue::Null => Cell::Null,
        other => Cell::Text(other.to_string()),
    }
}

// ---------------------------------------------------------------------------
// Workbook loader
// ---------------------------------------------------------------------------

/// Read the first worksheet of a spreadsheet. Its first row holds the column
/// names; cells formatted as dates arrive as dates, and plain numbers in the
/// date column are taken as serial days.
fn load_workbook(path: &Path) -> Result<FvDataset> {
    let mut workbook = open_workbook_auto(path).context("opening workbook")?;
    let range = workbook
        .worksheet_range_at(0)
        .context("Workbook has no worksheet")?
        .context("reading first worksheet")?;

    let mut rows = range.rows();
    let Some(header_row) = rows.next() else {
        return Ok(FvDataset::default());
    };
    let headers: Vec<String> = header_row
        .iter()
        .map(|h| h.to_string().trim().to_string())
        .collect();
    let columns = ColumnMap::resolve(&headers)?;

    let mut records = Vec::new();
    for (row_no, cells) in rows.enumerate() {
        let row = row_no + 1;
        let cells: Vec<Cell> = cells.iter().map(workbook_cell).collect();
        if cells.iter().all(|c| matches!(c, Cell::Null)) {
            continue;
        }
        records.push(columns.build_record(row, &cells, NumericDates::SerialDays)?);
    }

    Ok(FvDataset::from_records(records))
}

fn workbook_cell(data: &Data) -> Cell {
    match data {
        Data::Empty | Data::Error(_) => Cell::Null,
        Data::Int(i) => Cell::Integer(*i),
        Data::Float(f) => Cell::Float(*f),
        Data::String(s) if s.trim().is_empty() => Cell::Null,
        Data::String(s) => Cell::Text(s.clone()),
        Data::Bool(b) => Cell::Text(b.to_string()),
        Data::DateTime(dt) => match dt.as_datetime() {
            Some(dt) => Cell::Date(dt.date()),
            None => Cell::Float(dt.as_f64()),
        },
        Data::DateTimeIso(s) | Data::DurationIso(s) => Cell::Text(s.clone()),
    }
}

// ---------------------------------------------------------------------------
// Parquet loader
// ---------------------------------------------------------------------------

/// Load a Parquet file written by Pandas (`df.to_parquet()`) or Polars.
///
/// Column types are normalised before reading: integers to Int64, floats to
/// Float64, dates and timestamps to Date32, everything else to Utf8.
fn load_parquet(path: &Path) -> Result<FvDataset> {
    let file = std::fs::File::open(path).context("opening parquet file")?;
    let builder =
        ParquetRecordBatchReaderBuilder::try_new(file).context("reading parquet metadata")?;
    let reader = builder.build().context("building parquet reader")?;

    let mut records = Vec::new();
    let mut row = 0;

    for batch_result in reader {
        let batch = batch_result.context("reading parquet record batch")?;
        let schema = batch.schema();
        let headers: Vec<&str> = schema.fields().iter().map(|f| f.name().as_str()).collect();
        let columns = ColumnMap::resolve(&headers)?;

        let mut normalized: Vec<Option<ArrayRef>> = vec![None; headers.len()];
        for idx in columns.used() {
            let array = normalize_array(batch.column(idx))
                .with_context(|| format!("converting column '{}'", headers[idx]))?;
            normalized[idx] = Some(array);
        }

        for batch_row in 0..batch.num_rows() {
            row += 1;
            let cells: Vec<Cell> = normalized
                .iter()
                .map(|col| col.as_ref().map_or(Cell::Null, |a| extract_cell(a, batch_row)))
                .collect();
            records.push(columns.build_record(row, &cells, NumericDates::SerialDays)?);
        }
    }

    Ok(FvDataset::from_records(records))
}

// -- Arrow helpers --

fn normalize_array(col: &ArrayRef) -> Result<ArrayRef> {
    let target = match col.data_type() {
        DataType::Int8
        | DataType::Int16
        | DataType::Int32
        | DataType::Int64
        | DataType::UInt8
        | DataType::UInt16
        | DataType::UInt32
        | DataType::UInt64 => DataType::Int64,
        DataType::Float16 | DataType::Float32 | DataType::Float64 => DataType::Float64,
        DataType::Date32 | DataType::Date64 | DataType::Timestamp(_, _) => DataType::Date32,
        _ => DataType::Utf8,
    };
    Ok(cast(col, &target)?)
}

/// Extract a single cell from a normalised Arrow column.
fn extract_cell(col: &ArrayRef, row: usize) -> Cell {
    if col.is_null(row) {
        return Cell::Null;
    }
    match col.data_type() {
        DataType::Int64 => Cell::Integer(col.as_primitive::<Int64Type>().value(row)),
        DataType::Float64 => Cell::Float(col.as_primitive::<Float64Type>().value(row)),
        DataType::Date32 => col
            .as_primitive::<Date32Type>()
            .value_as_date(row)
            .map_or(Cell::Null, Cell::Date),
        _ => Cell::Text(col.as_string::<i32>().value(row).to_string()),
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;
    use std::sync::Arc;

    use arrow::array::{Date32Array, Float64Array, Int32Array, StringArray};
    use arrow::datatypes::{Field, Schema};
    use arrow::record_batch::RecordBatch;
    use parquet::arrow::ArrowWriter;
    use rust_xlsxwriter::{Format, Workbook};

    use super::*;
    use crate::data::model::FilterColumn;

    fn write_file(suffix: &str, contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(suffix).tempfile().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file.flush().unwrap();
        file
    }

    const CSV: &str = "\
Equipes,Poste,Num Sprint,Date du test,NOM Prénom,NOM,V0 (m/s),F0 (N/kg)
U19,Ailier,1,2023-09-12,DUPONT Jean,DUPONT,9.31,7.92
U19,Centre,2,12/09/2023,MARTIN Paul,MARTIN,8.95,8.10
Pro,Pilier,1,2023-10-03 00:00:00,DURAND Luc,DURAND,7.80,9.05
";

    #[test]
    fn loads_csv_into_typed_records() {
        let file = write_file(".csv", CSV);
        let ds = load_file(file.path()).unwrap();

        assert_eq!(ds.len(), 3);
        let first = &ds.records[0];
        assert_eq!(first.team, "U19");
        assert_eq!(first.sprint, Sprint::Number(1));
        assert_eq!(first.test_date, NaiveDate::from_ymd_opt(2023, 9, 12).unwrap());
        assert_eq!(first.full_name, "DUPONT Jean");
        assert!((first.v0 - 9.31).abs() < 1e-12);
        assert!((first.f0 - 7.92).abs() < 1e-12);

        // Day-first date and a datetime both resolve to a plain date.
        assert_eq!(ds.records[1].test_date, first.test_date);
        assert_eq!(
            ds.records[2].test_date,
            NaiveDate::from_ymd_opt(2023, 10, 3).unwrap()
        );
        assert_eq!(ds.unique_values[&FilterColumn::Date].len(), 2);
    }

    #[test]
    fn semicolon_csv_with_bom_is_detected() {
        let text = "\u{feff}Equipes;Poste;Num Sprint;Date du test;NOM;V0 (m/s);F0 (N/kg)\n\
                    U17;Arrière;S1;2024-02-01;LEROY;9.9;7.1\n";
        let file = write_file(".csv", text);
        let ds = load_file(file.path()).unwrap();

        let rec = &ds.records[0];
        assert_eq!(rec.team, "U17");
        assert_eq!(rec.sprint, Sprint::Label("S1".into()));
        // Only the surname column exists: it stands in for the full name.
        assert_eq!(rec.full_name, "LEROY");
        assert_eq!(rec.surname, "LEROY");
    }

    #[test]
    fn surname_is_derived_from_full_name() {
        let text = "Equipes,Poste,Num Sprint,Date du test,NOM Prénom,V0 (m/s),F0 (N/kg)\n\
                    A,B,1,2024-02-01,LEROY Marc,9.9,7.1\n";
        let file = write_file(".csv", text);
        let ds = load_file(file.path()).unwrap();
        assert_eq!(ds.records[0].surname, "LEROY");
    }

    #[test]
    fn missing_column_is_reported_by_name() {
        let text = "Equipes,Poste,Num Sprint,Date du test,NOM,F0 (N/kg)\nA,B,1,2024-02-01,X,7.1\n";
        let file = write_file(".csv", text);
        let err = load_file(file.path()).unwrap_err();
        assert_eq!(
            err.downcast_ref::<SchemaError>(),
            Some(&SchemaError::MissingColumn(COL_V0))
        );
    }

    #[test]
    fn missing_both_name_columns_fails() {
        let headers = ["Equipes", "Poste", "Num Sprint", "Date du test", "V0 (m/s)", "F0 (N/kg)"];
        assert_eq!(
            ColumnMap::resolve(&headers[..]),
            Err(SchemaError::MissingNameColumn)
        );
    }

    #[test]
    fn bad_number_reports_row_and_column() {
        let text = "Equipes,Poste,Num Sprint,Date du test,NOM,V0 (m/s),F0 (N/kg)\n\
                    A,B,1,2024-02-01,X,fast,7.1\n";
        let file = write_file(".csv", text);
        let msg = format!("{:#}", load_file(file.path()).unwrap_err());
        assert!(msg.contains("Row 1"), "{msg}");
        assert!(msg.contains(COL_V0), "{msg}");
    }

    #[test]
    fn blank_numbers_become_nan() {
        let text = "Equipes,Poste,Num Sprint,Date du test,NOM,V0 (m/s),F0 (N/kg)\n\
                    A,B,1,2024-02-01,X,,7.1\n";
        let file = write_file(".csv", text);
        let ds = load_file(file.path()).unwrap();
        assert!(ds.records[0].v0.is_nan());
    }

    #[test]
    fn loads_records_oriented_json() {
        // 1694476800000 ms = 2023-09-12T00:00:00Z
        let text = r#"[
            {"Equipes": "U19", "Poste": "Ailier", "Num Sprint": 1,
             "Date du test": 1694476800000, "NOM Prénom": "DUPONT Jean", "NOM": "DUPONT",
             "V0 (m/s)": 9.31, "F0 (N/kg)": 7.92},
            {"Equipes": "U19", "Poste": "Centre", "Num Sprint": 2.0,
             "Date du test": "2023-09-12T00:00:00.000Z", "NOM Prénom": "MARTIN Paul", "NOM": "MARTIN",
             "V0 (m/s)": 9, "F0 (N/kg)": 8.1}
        ]"#;
        let file = write_file(".json", text);
        let ds = load_file(file.path()).unwrap();

        assert_eq!(ds.len(), 2);
        let date = NaiveDate::from_ymd_opt(2023, 9, 12).unwrap();
        assert_eq!(ds.records[0].test_date, date);
        assert_eq!(ds.records[1].test_date, date);
        assert_eq!(ds.records[1].sprint, Sprint::Number(2));
        assert_eq!(ds.records[1].v0, 9.0);
    }

    #[test]
    fn empty_json_array_is_an_empty_dataset() {
        let file = write_file(".json", "[]");
        assert!(load_file(file.path()).unwrap().is_empty());
    }

    #[test]
    fn loads_parquet_with_native_types() {
        let schema = Arc::new(Schema::new(vec![
            Field::new(COL_TEAM, DataType::Utf8, false),
            Field::new(COL_POSITION, DataType::Utf8, false),
            Field::new(COL_SPRINT, DataType::Int32, false),
            Field::new(COL_DATE, DataType::Date32, false),
            Field::new(COL_FULL_NAME, DataType::Utf8, false),
            Field::new(COL_V0, DataType::Float64, true),
            Field::new(COL_F0, DataType::Float64, false),
        ]));
        // 19612 days after 1970-01-01 = 2023-09-12
        let batch = RecordBatch::try_new(
            schema.clone(),
            vec![
                Arc::new(StringArray::from(vec!["U19", "Pro"])),
                Arc::new(StringArray::from(vec!["Ailier", "Pilier"])),
                Arc::new(Int32Array::from(vec![1, 2])),
                Arc::new(Date32Array::from(vec![19612, 19612])),
                Arc::new(StringArray::from(vec!["DUPONT Jean", "DURAND Luc"])),
                Arc::new(Float64Array::from(vec![Some(9.31), None])),
                Arc::new(Float64Array::from(vec![7.92, 9.05])),
            ],
        )
        .unwrap();

        let file = tempfile::Builder::new().suffix(".parquet").tempfile().unwrap();
        let mut writer = ArrowWriter::try_new(file.reopen().unwrap(), schema, None).unwrap();
        writer.write(&batch).unwrap();
        writer.close().unwrap();

        let ds = load_file(file.path()).unwrap();
        assert_eq!(ds.len(), 2);
        assert_eq!(ds.records[1].sprint, Sprint::Number(2));
        assert_eq!(
            ds.records[0].test_date,
            NaiveDate::from_ymd_opt(2023, 9, 12).unwrap()
        );
        assert_eq!(ds.records[1].surname, "DURAND");
        assert!(ds.records[1].v0.is_nan());
    }

    #[test]
    fn loads_first_worksheet_of_a_workbook() {
        let file = tempfile::Builder::new().suffix(".xlsx").tempfile().unwrap();
        let mut workbook = Workbook::new();
        let date_format = Format::new().set_num_format("dd/mm/yyyy");
        let sheet = workbook.add_worksheet().set_name("Data F-V").unwrap();
        let headers = [
            COL_TEAM, COL_POSITION, COL_SPRINT, COL_DATE, COL_FULL_NAME, COL_SURNAME, COL_V0, COL_F0,
        ];
        for (col, name) in headers.iter().enumerate() {
            sheet.write_string(0, col as u16, *name).unwrap();
        }
        // Row 1: date-formatted cell. Row 2: the same day as a bare serial.
        for (row, (name, sprint, v0, f0)) in
            [("DUPONT Jean", 1.0, 9.31, 7.92), ("MARTIN Paul", 2.0, 8.95, 8.1)]
                .into_iter()
                .enumerate()
        {
            let row = row as u32 + 1;
            sheet.write_string(row, 0, "U19").unwrap();
            sheet.write_string(row, 1, "Ailier").unwrap();
            sheet.write_number(row, 2, sprint).unwrap();
            if row == 1 {
                sheet.write_number_with_format(row, 3, 45181.0, &date_format).unwrap();
            } else {
                sheet.write_number(row, 3, 45181.0).unwrap();
            }
            sheet.write_string(row, 4, name).unwrap();
            sheet.write_string(row, 5, name.split(' ').next().unwrap()).unwrap();
            sheet.write_number(row, 6, v0).unwrap();
            sheet.write_number(row, 7, f0).unwrap();
        }
        workbook.save(file.path()).unwrap();

        let ds = load_file(file.path()).unwrap();
        assert_eq!(ds.len(), 2);
        let day = NaiveDate::from_ymd_opt(2023, 9, 12).unwrap();
        assert_eq!(ds.records[0].test_date, day);
        assert_eq!(ds.records[1].test_date, day);
        assert_eq!(ds.records[0].sprint, Sprint::Number(1));
        assert_eq!(ds.records[1].full_name, "MARTIN Paul");
        assert!((ds.records[1].f0 - 8.1).abs() < 1e-12);
    }

    #[test]
    fn workbook_without_required_column_is_rejected() {
        let file = tempfile::Builder::new().suffix(".xlsx").tempfile().unwrap();
        let mut workbook = Workbook::new();
        let sheet = workbook.add_worksheet();
        for (col, name) in [COL_TEAM, COL_POSITION, COL_SPRINT, COL_DATE, COL_FULL_NAME, COL_V0]
            .iter()
            .enumerate()
        {
            sheet.write_string(0, col as u16, *name).unwrap();
        }
        workbook.save(file.path()).unwrap();

        let err = load_file(file.path()).unwrap_err();
        assert_eq!(
            err.downcast_ref::<SchemaError>(),
            Some(&SchemaError::MissingColumn(COL_F0))
        );
    }

    #[test]
    fn csv_serial_date_is_read_as_spreadsheet_day() {
        let file = write_file(
            ".csv",
            "\
Equipes;Poste;Num Sprint;Date du test;NOM Prénom;V0 (m/s);F0 (N/kg)
U19;Ailier;1;45181;DUPONT Jean;9.31;7.92
U19;Ailier;2;45181.75;DUPONT Jean;9.10;7.80
",
        );
        let ds = load_file(file.path()).unwrap();
        let day = NaiveDate::from_ymd_opt(2023, 9, 12).unwrap();
        assert_eq!(ds.records[0].test_date, day);
        assert_eq!(ds.records[1].test_date, day);
    }

    #[test]
    fn csv_date_below_first_serial_day_is_rejected() {
        let file = write_file(
            ".csv",
            "\
Equipes,Poste,Num Sprint,Date du test,NOM Prénom,V0 (m/s),F0 (N/kg)
U19,Ailier,1,-3,DUPONT Jean,9.31,7.92
",
        );
        let msg = format!("{:#}", load_file(file.path()).unwrap_err());
        assert!(msg.contains("Row 1, 'Date du test'"), "{msg}");
    }
}
