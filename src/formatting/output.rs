use std::fmt;
use std::str::FromStr;

use crate::error::{TrackerError, TrackerResult};
use crate::models::StoryRecord;
use super::table::render_table;
use super::utils::cell_text;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    Table,
    #[default]
    Json,
    Yaml,
    Csv,
}

impl OutputFormat {
    pub const NAMES: [&'static str; 4] = ["table", "json", "yaml", "csv"];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Table => "table",
            Self::Json => "json",
            Self::Yaml => "yaml",
            Self::Csv => "csv",
        }
    }
}

impl FromStr for OutputFormat {
    type Err = TrackerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "table" => Ok(Self::Table),
            "json" => Ok(Self::Json),
            "yaml" | "yml" => Ok(Self::Yaml),
            "csv" => Ok(Self::Csv),
            other => Err(TrackerError::InvalidInput(format!(
                "Unknown output format '{}'. Expected one of: {}",
                other,
                Self::NAMES.join(", ")
            ))),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

pub fn render_json(records: &[StoryRecord]) -> TrackerResult<String> {
    let mut json = serde_json::to_string_pretty(records)?;
    json.push('\n');
    Ok(json)
}

pub fn render_yaml(records: &[StoryRecord]) -> TrackerResult<String> {
    Ok(serde_yaml::to_string(records)?)
}

/// Header row from the first record's keys; every row follows that order.
pub fn render_csv(records: &[StoryRecord]) -> TrackerResult<String> {
    let Some(first) = records.first() else {
        return Ok(String::new());
    };

    let headers: Vec<&String> = first.keys().collect();
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(headers.iter().map(|h| h.as_str()))?;

    for record in records {
        let row: Vec<String> = headers
            .iter()
            .map(|key| record.get(key.as_str()).map(cell_text).unwrap_or_default())
            .collect();
        writer.write_record(&row)?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| TrackerError::RenderError(format!("Failed to flush CSV output: {}", e)))?;
    String::from_utf8(bytes)
        .map_err(|e| TrackerError::RenderError(format!("CSV output is not UTF-8: {}", e)))
}

pub fn render(records: &[StoryRecord], format: OutputFormat, colorize: bool) -> TrackerResult<String> {
    match format {
        OutputFormat::Json => render_json(records),
        OutputFormat::Yaml => render_yaml(records),
        OutputFormat::Csv => render_csv(records),
        OutputFormat::Table => Ok(render_table(records, colorize)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn records() -> Vec<StoryRecord> {
        serde_json::from_value(json!([
            {"id": 1, "name": "Café, menu", "labels": ["a", "b"], "accepted_at": null},
            {"id": 2, "name": "Plain", "labels": [], "accepted_at": "2021-01-02T00:00:00Z"}
        ]))
        .unwrap()
    }

    #[test]
    fn test_format_from_str() {
        assert_eq!("table".parse::<OutputFormat>().unwrap(), OutputFormat::Table);
        assert_eq!("YAML".parse::<OutputFormat>().unwrap(), OutputFormat::Yaml);
        assert!("xml".parse::<OutputFormat>().is_err());
        assert_eq!(OutputFormat::default(), OutputFormat::Json);
    }

    #[test]
    fn test_json_is_pretty_with_two_spaces() {
        let json = render_json(&records()).unwrap();
        assert!(json.starts_with("[\n  {\n    \"id\": 1,\n    \"name\""));
        let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed[1]["name"], json!("Plain"));
    }

    #[test]
    fn test_yaml_keeps_unicode() {
        let yaml = render_yaml(&records()).unwrap();
        assert!(yaml.contains("Café, menu"));
        assert!(yaml.contains("- id: 1"));
    }

    #[test]
    fn test_csv_rows_follow_first_header() {
        let csv = render_csv(&records()).unwrap();
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines[0], "id,name,labels,accepted_at");
        assert_eq!(lines[1], "1,\"Café, menu\",\"a");
        assert_eq!(lines[2], "b\",");
        assert_eq!(lines[3], "2,Plain,,2021-01-02T00:00:00Z");
    }

    #[test]
    fn test_empty_outputs() {
        assert_eq!(render(&[], OutputFormat::Json, false).unwrap().trim(), "[]");
        assert_eq!(render(&[], OutputFormat::Yaml, false).unwrap().trim(), "[]");
        assert_eq!(render(&[], OutputFormat::Csv, false).unwrap(), "");
        assert_eq!(render(&[], OutputFormat::Table, false).unwrap(), "");
    }
}
