use std::fmt;
use std::io::Read;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use arrow::array::{Array, ArrayRef, AsArray};
use arrow::datatypes::{DataType, Float32Type, Float64Type, Int32Type, Int64Type};
use arrow::record_batch::RecordBatch;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use parquet::file::reader::ChunkReader;
use serde::Deserialize;

use super::error::RecordError;
use super::model::{LaunchDataset, LaunchRecord, Outcome};

pub const COL_LAUNCH_SITE: &str = "Launch Site";
pub const COL_PAYLOAD: &str = "Payload Mass (kg)";
pub const COL_CLASS: &str = "class";
pub const COL_BOOSTER_CATEGORY: &str = "Booster Version Category";
pub const COL_FLIGHT_NUMBER: &str = "Flight Number";
pub const COL_BOOSTER_VERSION: &str = "Booster Version";

const REQUIRED_COLUMNS: [&str; 4] = [COL_LAUNCH_SITE, COL_PAYLOAD, COL_CLASS, COL_BOOSTER_CATEGORY];

// ---------------------------------------------------------------------------
// Dataset source & format
// ---------------------------------------------------------------------------

/// Where the launch table comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DatasetSource {
    Url(String),
    File(PathBuf),
}

impl DatasetSource {
    /// `http://` and `https://` locations are URLs, everything else a path.
    pub fn parse(location: &str) -> Self {
        let lower = location.to_ascii_lowercase();
        if lower.starts_with("http://") || lower.starts_with("https://") {
            DatasetSource::Url(location.to_string())
        } else {
            DatasetSource::File(PathBuf::from(location))
        }
    }
}

impl fmt::Display for DatasetSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DatasetSource::Url(url) => write!(f, "{url}"),
            DatasetSource::File(path) => write!(f, "{}", path.display()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataFormat {
    Csv,
    Json,
    Parquet,
}

impl DataFormat {
    /// Guess the format from the extension of a path or URL.
    pub fn from_location(location: &str) -> Option<Self> {
        // Drop any URL query / fragment before looking at the extension.
        let trimmed = location
            .split(['?', '#'])
            .next()
            .unwrap_or(location);
        let ext = Path::new(trimmed)
            .extension()
            .and_then(|e| e.to_str())?
            .to_ascii_lowercase();

        match ext.as_str() {
            "csv" => Some(DataFormat::Csv),
            "json" => Some(DataFormat::Json),
            "parquet" | "pq" => Some(DataFormat::Parquet),
            _ => None,
        }
    }
}

// ---------------------------------------------------------------------------
// Public entry-points
// ---------------------------------------------------------------------------

/// Load the launch table from a URL or a local file.
pub fn load_source(source: &DatasetSource) -> Result<LaunchDataset> {
    let dataset = match source {
        DatasetSource::Url(url) => load_url(url),
        DatasetSource::File(path) => load_file(path),
    }
    .with_context(|| format!("loading launch records from {source}"))?;

    log::info!(
        "Loaded {} launches from {source} ({} sites, {} booster categories)",
        dataset.len(),
        dataset.sites.len(),
        dataset.booster_categories.len()
    );
    Ok(dataset)
}

/// Load a launch table from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.csv`     – header row with the launch columns (the published dataset)
/// * `.json`    – `[{ "Launch Site": "...", "class": 1, ... }, ...]`
/// * `.parquet` – flat columns with the same names
pub fn load_file(path: &Path) -> Result<LaunchDataset> {
    let name = path.to_string_lossy();
    match DataFormat::from_location(&name) {
        Some(DataFormat::Csv) => {
            let file = std::fs::File::open(path).context("opening CSV file")?;
            parse_csv(file)
        }
        Some(DataFormat::Json) => {
            let bytes = std::fs::read(path).context("reading JSON file")?;
            parse_json(&bytes)
        }
        Some(DataFormat::Parquet) => {
            let file = std::fs::File::open(path).context("opening parquet file")?;
            parse_parquet(file)
        }
        None => {
            let ext = path
                .extension()
                .and_then(|e| e.to_str())
                .unwrap_or("");
            bail!("Unsupported file extension: .{ext}")
        }
    }
}

/// Fetch the table once over HTTP. Unknown extensions are read as CSV.
fn load_url(url: &str) -> Result<LaunchDataset> {
    log::debug!("GET {url}");
    let response = reqwest::blocking::get(url).with_context(|| format!("requesting {url}"))?;
    let status = response.status();
    if !status.is_success() {
        bail!("GET {url} returned HTTP {status}");
    }
    let body = response.bytes().context("reading response body")?;

    match DataFormat::from_location(url).unwrap_or(DataFormat::Csv) {
        DataFormat::Csv => parse_csv(&body[..]),
        DataFormat::Json => parse_json(&body),
        DataFormat::Parquet => parse_parquet(body),
    }
}

// ---------------------------------------------------------------------------
// Row decoding shared by CSV and JSON
// ---------------------------------------------------------------------------

/// One source row as it appears on disk.  Extra columns are ignored.
#[derive(Debug, Deserialize)]
struct RawLaunchRow {
    #[serde(rename = "Launch Site")]
    launch_site: String,
    #[serde(rename = "Payload Mass (kg)")]
    payload_mass_kg: f64,
    #[serde(rename = "class")]
    class: f64,
    #[serde(rename = "Booster Version Category")]
    booster_version_category: String,
    #[serde(rename = "Flight Number", default)]
    flight_number: Option<u32>,
    #[serde(rename = "Booster Version", default)]
    booster_version: Option<String>,
}

impl RawLaunchRow {
    fn into_record(self, row: usize) -> Result<LaunchRecord, RecordError> {
        let outcome = outcome_from_number(self.class, row)?;
        let payload_mass_kg = checked_payload(self.payload_mass_kg, row)?;
        Ok(LaunchRecord {
            launch_site: self.launch_site,
            payload_mass_kg,
            outcome,
            booster_version_category: self.booster_version_category,
            flight_number: self.flight_number,
            booster_version: self.booster_version.filter(|v| !v.is_empty()),
        })
    }
}

fn outcome_from_number(value: f64, row: usize) -> Result<Outcome, RecordError> {
    if value.fract() == 0.0 {
        if let Some(outcome) = Outcome::from_class(value as i64) {
            return Ok(outcome);
        }
    }
    Err(RecordError::InvalidClass { row, value })
}

fn checked_payload(value: f64, row: usize) -> Result<f64, RecordError> {
    if value.is_finite() && value >= 0.0 {
        Ok(value)
    } else {
        Err(RecordError::InvalidPayload { row, value })
    }
}

fn checked_flight_number(value: f64, row: usize) -> Result<u32, RecordError> {
    if value.fract() == 0.0 && (0.0..=f64::from(u32::MAX)).contains(&value) {
        Ok(value as u32)
    } else {
        Err(RecordError::InvalidFlightNumber { row, value })
    }
}

// ---------------------------------------------------------------------------
// CSV
// ---------------------------------------------------------------------------

/// Parse a CSV table with a header row naming the launch columns.
pub fn parse_csv<R: Read>(input: R) -> Result<LaunchDataset> {
    // Trimmed headers are what serde matches field names against.
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::Headers)
        .from_reader(input);
    let headers = reader.headers().context("reading CSV headers")?.clone();

    for col in REQUIRED_COLUMNS {
        if !headers.iter().any(|h| h == col) {
            return Err(RecordError::MissingColumn(col.to_string()).into());
        }
    }

    let mut records = Vec::new();
    for (row_no, result) in reader.deserialize::<RawLaunchRow>().enumerate() {
        let raw = result.with_context(|| format!("CSV row {row_no}"))?;
        records.push(raw.into_record(row_no)?);
    }

    Ok(LaunchDataset::from_records(records))
}

// ---------------------------------------------------------------------------
// JSON
// ---------------------------------------------------------------------------

/// Records-oriented JSON, the default `df.to_json(orient='records')`:
///
/// ```json
/// [
///   { "Launch Site": "CCAFS LC-40", "Payload Mass (kg)": 0.0,
///     "class": 0, "Booster Version Category": "v1.0" },
///   ...
/// ]
/// ```
pub fn parse_json(input: &[u8]) -> Result<LaunchDataset> {
    let rows: Vec<serde_json::Value> =
        serde_json::from_slice(input).context("Expected top-level JSON array")?;

    let mut records = Vec::with_capacity(rows.len());
    for (i, value) in rows.into_iter().enumerate() {
        if let Some(obj) = value.as_object() {
            if let Some(col) = REQUIRED_COLUMNS.iter().find(|c| !obj.contains_key(**c)) {
                return Err(RecordError::MissingColumn(col.to_string()).into());
            }
        }
        let raw: RawLaunchRow =
            serde_json::from_value(value).with_context(|| format!("JSON row {i}"))?;
        records.push(raw.into_record(i)?);
    }

    Ok(LaunchDataset::from_records(records))
}

// ---------------------------------------------------------------------------
// Parquet
// ---------------------------------------------------------------------------

/// Load a Parquet table with flat launch columns.
///
/// Works with files written by both **Pandas** (`df.to_parquet()`) and
/// **Polars** (`df.write_parquet()`): strings may be Utf8 or LargeUtf8,
/// numbers any of Int32/Int64/Float32/Float64.
pub fn parse_parquet<T: ChunkReader + 'static>(input: T) -> Result<LaunchDataset> {
    let builder =
        ParquetRecordBatchReaderBuilder::try_new(input).context("reading parquet metadata")?;
    let reader = builder.build().context("building parquet reader")?;

    let mut records = Vec::new();

    for batch_result in reader {
        let batch = batch_result.context("reading parquet record batch")?;

        let site_col = column(&batch, COL_LAUNCH_SITE)?;
        let payload_col = column(&batch, COL_PAYLOAD)?;
        let class_col = column(&batch, COL_CLASS)?;
        let booster_col = column(&batch, COL_BOOSTER_CATEGORY)?;
        let flight_col = column(&batch, COL_FLIGHT_NUMBER).ok();
        let version_col = column(&batch, COL_BOOSTER_VERSION).ok();

        for i in 0..batch.num_rows() {
            let row = records.len();
            let class = number_at(class_col, i, COL_CLASS)?
                .ok_or_else(|| null_value(row, COL_CLASS))?;
            let payload = number_at(payload_col, i, COL_PAYLOAD)?
                .ok_or_else(|| null_value(row, COL_PAYLOAD))?;

            let flight_number = match flight_col {
                Some(col) => number_at(col, i, COL_FLIGHT_NUMBER)?
                    .map(|n| checked_flight_number(n, row))
                    .transpose()?,
                None => None,
            };
            let booster_version = match version_col {
                Some(col) => string_at(col, i, COL_BOOSTER_VERSION)?,
                None => None,
            };

            records.push(LaunchRecord {
                launch_site: string_at(site_col, i, COL_LAUNCH_SITE)?
                    .ok_or_else(|| null_value(row, COL_LAUNCH_SITE))?,
                payload_mass_kg: checked_payload(payload, row)?,
                outcome: outcome_from_number(class, row)?,
                booster_version_category: string_at(booster_col, i, COL_BOOSTER_CATEGORY)?
                    .ok_or_else(|| null_value(row, COL_BOOSTER_CATEGORY))?,
                flight_number,
                booster_version,
            });
        }
    }

    Ok(LaunchDataset::from_records(records))
}

// -- Parquet / Arrow helpers --

fn column<'a>(batch: &'a RecordBatch, name: &str) -> Result<&'a ArrayRef, RecordError> {
    batch
        .schema()
        .index_of(name)
        .map(|i| batch.column(i))
        .map_err(|_| RecordError::MissingColumn(name.to_string()))
}

fn null_value(row: usize, column: &str) -> RecordError {
    RecordError::NullValue {
        row,
        column: column.to_string(),
    }
}

fn type_error(col: &ArrayRef, column: &str) -> RecordError {
    RecordError::ColumnType {
        column: column.to_string(),
        found: format!("{:?}", col.data_type()),
    }
}

/// Read a string cell, `None` for null.
fn string_at(col: &ArrayRef, row: usize, column: &str) -> Result<Option<String>, RecordError> {
    if col.is_null(row) {
        return Ok(None);
    }
    let value = match col.data_type() {
        DataType::Utf8 => col.as_string::<i32>().value(row),
        DataType::LargeUtf8 => col.as_string::<i64>().value(row),
        _ => return Err(type_error(col, column)),
    };
    Ok(Some(value.to_string()))
}

/// Read a numeric cell as `f64`, `None` for null.
fn number_at(col: &ArrayRef, row: usize, column: &str) -> Result<Option<f64>, RecordError> {
    if col.is_null(row) {
        return Ok(None);
    }
    let value = match col.data_type() {
        DataType::Float64 => col.as_primitive::<Float64Type>().value(row),
        DataType::Float32 => col.as_primitive::<Float32Type>().value(row) as f64,
        DataType::Int64 => col.as_primitive::<Int64Type>().value(row) as f64,
        DataType::Int32 => col.as_primitive::<Int32Type>().value(row) as f64,
        _ => return Err(type_error(col, column)),
    };
    Ok(Some(value))
}
