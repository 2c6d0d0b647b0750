//! Template input loading.
//!
//! Input files are turned into the value sent as a template parameter:
//! CSV files become a list of row maps, text files a single string and YAML
//! files a structured document.

use std::collections::BTreeMap;
use std::path::Path;

use serde_json::{Map, Value};
use tracing::debug;

use crate::errors::RunnerError;
use crate::filesys::file::File;

/// CSV column whose escaped newlines are expanded on load
pub const ADDITIONAL_CONFIG_COLUMN: &str = "additional_config";

/// One CSV row keyed by header
pub type InputRow = BTreeMap<String, String>;

/// Loaded template input
#[derive(Debug, Clone, PartialEq)]
pub enum InputPayload {
    /// Rows of a CSV file
    Rows(Vec<InputRow>),

    /// Contents of a text file
    Text(String),

    /// Parsed YAML document
    Document(Value),

    /// No input at all
    Empty,
}

impl InputPayload {
    /// Console rendering of the loaded data, `None` for no input
    pub fn dump(&self) -> Result<Option<String>, RunnerError> {
        let dump = match self {
            InputPayload::Rows(rows) => {
                format!("CSV Data:\n{}", serde_json::to_string_pretty(rows)?)
            }
            InputPayload::Text(text) => format!("TXT Data:\n{}", text),
            InputPayload::Document(document) => {
                format!("YAML Data:\n{}", serde_json::to_string_pretty(document)?)
            }
            InputPayload::Empty => return Ok(None),
        };
        Ok(Some(dump))
    }

    /// Template parameters carrying this payload under `key`.
    ///
    /// An empty payload yields an empty parameter map.
    pub fn into_params(self, key: &str) -> Map<String, Value> {
        let mut params = Map::new();
        let value = match self {
            InputPayload::Rows(rows) => Value::Array(
                rows.into_iter()
                    .map(|row| {
                        Value::Object(
                            row.into_iter()
                                .map(|(k, v)| (k, Value::String(v)))
                                .collect(),
                        )
                    })
                    .collect(),
            ),
            InputPayload::Text(text) => Value::String(text),
            InputPayload::Document(document) => document,
            InputPayload::Empty => return params,
        };
        params.insert(key.to_string(), value);
        params
    }
}

/// Supported input file formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputFormat {
    Csv,
    Text,
    Yaml,
}

impl InputFormat {
    /// Pick the format from the file extension, case-insensitively
    pub fn from_path(path: &Path) -> Result<Self, RunnerError> {
        match File::new(path).extension().as_deref() {
            Some("csv") => Ok(InputFormat::Csv),
            Some("txt") => Ok(InputFormat::Text),
            Some("yaml") | Some("yml") => Ok(InputFormat::Yaml),
            _ => Err(RunnerError::UnsupportedInput(path.display().to_string())),
        }
    }
}

/// Load an input file, choosing the parser by extension.
///
/// The extension is checked before the file is opened.
pub async fn load_input(path: &Path, echo: bool) -> Result<InputPayload, RunnerError> {
    let format = InputFormat::from_path(path)?;
    load_input_as(path, format, echo).await
}

/// Load an input file with an explicit format, printing it when `echo` is set
pub async fn load_input_as(
    path: &Path,
    format: InputFormat,
    echo: bool,
) -> Result<InputPayload, RunnerError> {
    debug!("Loading {:?} input from {}", format, path.display());
    let contents = File::new(path).read_string().await?;

    let payload = match format {
        InputFormat::Csv => InputPayload::Rows(parse_csv(&contents)?),
        InputFormat::Text => InputPayload::Text(contents),
        InputFormat::Yaml => InputPayload::Document(parse_yaml(&contents)?),
    };

    if echo {
        if let Some(dump) = payload.dump()? {
            println!("{}\n", dump);
        }
    }

    Ok(payload)
}

/// Parse CSV text into one map per row, keyed by the header row
pub fn parse_csv(contents: &str) -> Result<Vec<InputRow>, RunnerError> {
    let mut reader = csv::ReaderBuilder::new().from_reader(contents.as_bytes());

    let mut rows = Vec::new();
    for record in reader.deserialize::<InputRow>() {
        let mut row = record?;
        if let Some(config) = row.get_mut(ADDITIONAL_CONFIG_COLUMN) {
            *config = config.replace("\\n", "\n");
        }
        rows.push(row);
    }

    Ok(rows)
}

/// Parse a YAML document; an empty document is `null`
pub fn parse_yaml(contents: &str) -> Result<Value, RunnerError> {
    if contents.trim().is_empty() {
        return Ok(Value::Null);
    }
    Ok(serde_yaml_ng::from_str(contents)?)
}
