//! Output formatting for mapon-cli (json lines, pretty json, table, csv)

use std::io::{self, Write};

use anyhow::Result;
use chrono::{DateTime, Utc};
use clap::ValueEnum;
use colored::Colorize;
use serde::{Deserialize, Serialize};
use tabled::{Table, Tabled};

/// Output format options
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// One compact JSON record per line (default)
    #[default]
    Json,
    /// Indented JSON, one record after another
    Pretty,
    /// ASCII table of flattened rows
    Table,
    /// CSV of flattened rows
    Csv,
}

/// Context for output rendering
pub struct OutputContext {
    pub format: OutputFormat,
    pub quiet: bool,
}

impl OutputContext {
    pub fn new(format: OutputFormat, no_color: bool, quiet: bool) -> Self {
        if no_color {
            colored::control::set_override(false);
        }
        Self { format, quiet }
    }

    /// Print a success message (unless in quiet mode)
    pub fn success(&self, msg: &str) {
        if !self.quiet {
            eprintln!("{}", msg.green());
        }
    }

    /// Print records to stdout in the configured format.
    ///
    /// JSON formats print the full records; table and CSV print the rows
    /// produced by `to_rows`.
    pub fn print<T, R, F>(&self, records: &[T], to_rows: F) -> Result<()>
    where
        T: Serialize,
        R: Tabled,
        F: Fn(&T) -> Vec<R>,
    {
        let stdout = io::stdout();
        let mut out = stdout.lock();
        self.write(&mut out, records, to_rows)?;
        out.flush()?;
        Ok(())
    }

    pub fn write<W, T, R, F>(&self, out: &mut W, records: &[T], to_rows: F) -> Result<()>
    where
        W: Write,
        T: Serialize,
        R: Tabled,
        F: Fn(&T) -> Vec<R>,
    {
        match self.format {
            OutputFormat::Json => {
                for record in records {
                    writeln!(out, "{}", serde_json::to_string(record)?)?;
                }
            }
            OutputFormat::Pretty => {
                for record in records {
                    writeln!(out, "{}", serde_json::to_string_pretty(record)?)?;
                }
            }
            OutputFormat::Table => {
                let rows: Vec<R> = records.iter().flat_map(&to_rows).collect();
                if rows.is_empty() {
                    if !self.quiet {
                        writeln!(out, "No data")?;
                    }
                } else {
                    writeln!(out, "{}", Table::new(rows))?;
                }
            }
            OutputFormat::Csv => {
                let rows: Vec<R> = records.iter().flat_map(&to_rows).collect();
                write_csv(out, &rows)?;
            }
        }
        Ok(())
    }
}

/// Write rows as CSV, header first
fn write_csv<W: Write, R: Tabled>(out: &mut W, rows: &[R]) -> Result<()> {
    let headers: Vec<String> = R::headers().iter().map(|h| escape_csv(h)).collect();
    writeln!(out, "{}", headers.join(","))?;

    for row in rows {
        let values: Vec<String> = row.fields().iter().map(|v| escape_csv(v)).collect();
        writeln!(out, "{}", values.join(","))?;
    }
    Ok(())
}

/// Escape a value for CSV output
fn escape_csv(value: &str) -> String {
    if value.contains(',') || value.contains('"') || value.contains('\n') {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

// =============================================================================
// Cell helpers
// =============================================================================

pub fn time_cell(time: Option<&DateTime<Utc>>) -> String {
    time.map(mapon_conv::format_rfc3339)
        .unwrap_or_else(|| "-".to_string())
}

pub fn text_cell(value: Option<&str>) -> String {
    value.unwrap_or("-").to_string()
}

pub fn opt_cell<T: ToString>(value: Option<T>) -> String {
    value.map(|v| v.to_string()).unwrap_or_else(|| "-".to_string())
}

pub fn bool_cell(value: bool) -> String {
    if value {
        "Yes".to_string()
    } else {
        "No".to_string()
    }
}

// =============================================================================
// Display types for various commands
// =============================================================================

#[derive(Debug, Tabled)]
pub struct UnitRow {
    #[tabled(rename = "ID")]
    pub id: i64,
    #[tabled(rename = "Label")]
    pub label: String,
    #[tabled(rename = "Number")]
    pub number: String,
    #[tabled(rename = "Type")]
    pub unit_type: String,
    #[tabled(rename = "Fuel")]
    pub fuel_type: String,
    #[tabled(rename = "Status")]
    pub status: String,
    #[tabled(rename = "Speed")]
    pub speed: String,
    #[tabled(rename = "Location")]
    pub location: String,
    #[tabled(rename = "Updated")]
    pub updated: String,
}

#[derive(Debug, Tabled)]
pub struct DriverRow {
    #[tabled(rename = "ID")]
    pub id: i64,
    #[tabled(rename = "Name")]
    pub name: String,
    #[tabled(rename = "Phone")]
    pub phone: String,
    #[tabled(rename = "Email")]
    pub email: String,
    #[tabled(rename = "Tachograph")]
    pub tachograph: String,
    #[tabled(rename = "Blocked")]
    pub blocked: String,
}

#[derive(Debug, Tabled)]
pub struct RouteRow {
    #[tabled(rename = "ID")]
    pub id: i64,
    #[tabled(rename = "Unit")]
    pub unit_id: i64,
    #[tabled(rename = "Type")]
    pub route_type: String,
    #[tabled(rename = "Start")]
    pub start: String,
    #[tabled(rename = "End")]
    pub end: String,
    #[tabled(rename = "Distance (m)")]
    pub distance_m: i64,
    #[tabled(rename = "Avg km/h")]
    pub avg_speed: f64,
    #[tabled(rename = "Max km/h")]
    pub max_speed: f64,
}

#[derive(Debug, Tabled)]
pub struct ObjectRow {
    #[tabled(rename = "ID")]
    pub id: i64,
    #[tabled(rename = "Name")]
    pub name: String,
    #[tabled(rename = "Group")]
    pub group_id: i64,
    #[tabled(rename = "Private")]
    pub private: String,
    #[tabled(rename = "Color")]
    pub color: String,
}

#[derive(Debug, Tabled)]
pub struct AlertRow {
    #[tabled(rename = "ID")]
    pub id: i64,
    #[tabled(rename = "Unit")]
    pub unit_id: i64,
    #[tabled(rename = "Driver")]
    pub driver_id: i64,
    #[tabled(rename = "Type")]
    pub alert_type: String,
    #[tabled(rename = "Message")]
    pub message: String,
    #[tabled(rename = "Time")]
    pub time: String,
    #[tabled(rename = "Location")]
    pub location: String,
}

#[derive(Debug, Tabled)]
pub struct GroupRow {
    #[tabled(rename = "ID")]
    pub id: i64,
    #[tabled(rename = "Name")]
    pub name: String,
    #[tabled(rename = "Parent")]
    pub parent: String,
}

#[derive(Debug, Tabled)]
pub struct GroupUnitRow {
    #[tabled(rename = "Unit")]
    pub unit_id: i64,
}

#[derive(Debug, Tabled)]
pub struct TellTaleRow {
    #[tabled(rename = "Unit")]
    pub unit_id: i64,
    #[tabled(rename = "Tell-tale")]
    pub telltale_id: i32,
    #[tabled(rename = "Name")]
    pub name: String,
    #[tabled(rename = "Value")]
    pub value: i32,
    #[tabled(rename = "Meaning")]
    pub title: String,
    #[tabled(rename = "Time")]
    pub time: String,
}

/// One metric sample, used by the CAN and history point feeds
#[derive(Debug, Tabled)]
pub struct MetricRow {
    #[tabled(rename = "Unit")]
    pub unit_id: i64,
    #[tabled(rename = "Metric")]
    pub metric: String,
    #[tabled(rename = "Value")]
    pub value: String,
    #[tabled(rename = "Time")]
    pub time: String,
}

#[derive(Debug, Tabled)]
pub struct DebugInfoRow {
    #[tabled(rename = "Unit")]
    pub unit_id: i64,
    #[tabled(rename = "Firmware")]
    pub fw_version: String,
    #[tabled(rename = "GPS")]
    pub gps_status: String,
    #[tabled(rename = "Last location")]
    pub last_location: String,
    #[tabled(rename = "At")]
    pub last_location_time: String,
    #[tabled(rename = "CAN km")]
    pub can_total_distance: String,
}

/// On/off interval, used by ignitions and digital inputs
#[derive(Debug, Tabled)]
pub struct IntervalRow {
    #[tabled(rename = "Unit")]
    pub unit_id: i64,
    #[tabled(rename = "Input")]
    pub input: String,
    #[tabled(rename = "On")]
    pub on: String,
    #[tabled(rename = "Off")]
    pub off: String,
}

#[derive(Debug, Tabled)]
pub struct InputExtendedRow {
    #[tabled(rename = "Unit")]
    pub unit_id: i64,
    #[tabled(rename = "Input")]
    pub input_id: i64,
    #[tabled(rename = "Label")]
    pub label: String,
    #[tabled(rename = "On")]
    pub on: String,
    #[tabled(rename = "Off")]
    pub off: String,
    #[tabled(rename = "Distance (m)")]
    pub distance_m: i64,
    #[tabled(rename = "Driver")]
    pub driver_id: i64,
}

#[derive(Debug, Tabled)]
pub struct DrivingTimeRow {
    #[tabled(rename = "Driver")]
    pub driver_id: i64,
    #[tabled(rename = "Name")]
    pub name: String,
    #[tabled(rename = "State")]
    pub state: String,
    #[tabled(rename = "Driving today (s)")]
    pub today: String,
    #[tabled(rename = "Remaining today (s)")]
    pub today_remaining: String,
    #[tabled(rename = "Driving week (s)")]
    pub week: String,
}

#[derive(Debug, Tabled)]
pub struct FieldRow {
    #[tabled(rename = "Unit")]
    pub unit_id: i64,
    #[tabled(rename = "Key")]
    pub key: String,
    #[tabled(rename = "Value")]
    pub value: String,
}

/// One sensor reading, used by temperature and humidity
#[derive(Debug, Tabled)]
pub struct SensorRow {
    #[tabled(rename = "Unit")]
    pub unit_id: i64,
    #[tabled(rename = "Sensor")]
    pub sensor: i32,
    #[tabled(rename = "Value")]
    pub value: f64,
    #[tabled(rename = "Time")]
    pub time: String,
}

#[derive(Debug, Tabled)]
pub struct IbuttonRow {
    #[tabled(rename = "Unit")]
    pub unit_id: i64,
    #[tabled(rename = "iButton")]
    pub value: String,
    #[tabled(rename = "Time")]
    pub time: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Serialize)]
    struct Record {
        id: i64,
        name: Option<String>,
        tags: Vec<&'static str>,
    }

    fn records() -> Vec<Record> {
        vec![
            Record {
                id: 1,
                name: Some("Truck, 12".to_string()),
                tags: vec!["a"],
            },
            Record {
                id: 2,
                name: None,
                tags: vec![],
            },
        ]
    }

    fn to_rows(r: &Record) -> Vec<GroupRow> {
        vec![GroupRow {
            id: r.id,
            name: text_cell(r.name.as_deref()),
            parent: "-".to_string(),
        }]
    }

    fn render(format: OutputFormat) -> String {
        let ctx = OutputContext {
            format,
            quiet: false,
        };
        let mut out = Vec::new();
        ctx.write(&mut out, &records(), to_rows).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_json_lines() {
        assert_eq!(
            render(OutputFormat::Json),
            "{\"id\":1,\"name\":\"Truck, 12\",\"tags\":[\"a\"]}\n{\"id\":2,\"name\":null,\"tags\":[]}\n"
        );
    }

    #[test]
    fn test_csv_escapes_and_keeps_column_order() {
        assert_eq!(
            render(OutputFormat::Csv),
            "ID,Name,Parent\n1,\"Truck, 12\",-\n2,-,-\n"
        );
    }

    #[test]
    fn test_table_has_headers() {
        let table = render(OutputFormat::Table);
        assert!(table.contains("Name"));
        assert!(table.contains("Truck, 12"));
    }

    #[test]
    fn test_empty_table() {
        let ctx = OutputContext {
            format: OutputFormat::Table,
            quiet: false,
        };
        let mut out = Vec::new();
        ctx.write(&mut out, &Vec::<Record>::new(), to_rows).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "No data\n");
    }

    #[test]
    fn test_cells() {
        assert_eq!(time_cell(None), "-");
        assert_eq!(opt_cell(Some(5)), "5");
        assert_eq!(opt_cell::<i32>(None), "-");
        assert_eq!(bool_cell(true), "Yes");
    }
}
