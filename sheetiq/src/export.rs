// Copyright (c) 2024-2025 Sheetiq Contributors
// SPDX-License-Identifier: Apache-2.0
//
//! Result export as spreadsheet or delimited bytes
//!
//! Both formats write the header row first and then the rows in result
//! order. Exporters only read the result.

use crate::error::{Result, SheetiqError};
use crate::exec::QueryResult;
use crate::types::Value;
use chrono::{DateTime, Local};
use rust_xlsxwriter::{Format, Workbook, Worksheet};
use std::path::Path;

/// Download formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Spreadsheet,
    Delimited,
}

impl ExportFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Spreadsheet => "xlsx",
            ExportFormat::Delimited => "csv",
        }
    }

    pub fn mime_type(&self) -> &'static str {
        match self {
            ExportFormat::Spreadsheet => {
                "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet"
            }
            ExportFormat::Delimited => "text/csv",
        }
    }

    /// Pick the format from a file extension
    pub fn from_path(path: &Path) -> Result<Self> {
        let extension = path
            .extension()
            .map(|ext| ext.to_string_lossy().to_ascii_lowercase())
            .unwrap_or_default();
        match extension.as_str() {
            "xlsx" => Ok(ExportFormat::Spreadsheet),
            "csv" => Ok(ExportFormat::Delimited),
            other => Err(SheetiqError::Export(format!(
                "unsupported export extension '{}' (use .xlsx or .csv)",
                other
            ))),
        }
    }
}

/// Serializes query results for download
#[derive(Debug, Clone)]
pub struct ResultExporter {
    sheet_name: String,
}

impl Default for ResultExporter {
    fn default() -> Self {
        Self::new("Query Result")
    }
}

impl ResultExporter {
    pub fn new(sheet_name: impl Into<String>) -> Self {
        Self {
            sheet_name: sheet_name.into(),
        }
    }

    /// Bytes in the requested format
    pub fn to_bytes(&self, result: &QueryResult, format: ExportFormat) -> Result<Vec<u8>> {
        match format {
            ExportFormat::Spreadsheet => self.to_spreadsheet_bytes(result),
            ExportFormat::Delimited => self.to_delimited_bytes(result),
        }
    }

    /// A single-sheet xlsx workbook
    pub fn to_spreadsheet_bytes(&self, result: &QueryResult) -> Result<Vec<u8>> {
        let mut workbook = Workbook::new();
        let worksheet = workbook.add_worksheet();
        worksheet.set_name(&self.sheet_name).map_err(export_error)?;

        let header = Format::new().set_bold();
        let date_format = Format::new().set_num_format("yyyy-mm-dd");
        let timestamp_format = Format::new().set_num_format("yyyy-mm-dd hh:mm:ss");

        for (col, column) in result.columns.iter().enumerate() {
            worksheet
                .write_string_with_format(0, column_number(col)?, &column.name, &header)
                .map_err(export_error)?;
        }

        for (row_idx, row) in result.rows.iter().enumerate() {
            let row_number = u32::try_from(row_idx + 1)
                .map_err(|_| SheetiqError::Export("too many rows for a worksheet".to_string()))?;
            for (col, value) in row.iter().enumerate() {
                write_cell(
                    worksheet,
                    row_number,
                    column_number(col)?,
                    value,
                    &date_format,
                    &timestamp_format,
                )?;
            }
        }

        let bytes = workbook.save_to_buffer().map_err(export_error)?;
        log::debug!(
            "Exported {} rows to {} spreadsheet bytes",
            result.row_count(),
            bytes.len()
        );
        Ok(bytes)
    }

    /// Comma separated text, `\n` after every record including the last
    pub fn to_delimited_bytes(&self, result: &QueryResult) -> Result<Vec<u8>> {
        let mut writer = csv::WriterBuilder::new()
            .terminator(csv::Terminator::Any(b'\n'))
            .from_writer(Vec::new());

        writer
            .write_record(result.columns.iter().map(|c| c.name.as_str()))
            .map_err(export_error)?;
        for row in &result.rows {
            writer
                .write_record(row.iter().map(Value::to_string))
                .map_err(export_error)?;
        }

        writer.into_inner().map_err(export_error)
    }

    /// Write to `path`, choosing the format from its extension
    pub fn write_to_path(&self, result: &QueryResult, path: impl AsRef<Path>) -> Result<ExportFormat> {
        let path = path.as_ref();
        let format = ExportFormat::from_path(path)?;
        let bytes = self.to_bytes(result, format)?;
        std::fs::write(path, bytes)?;
        log::info!("Exported {} rows to {:?}", result.row_count(), path);
        Ok(format)
    }
}

/// `<prefix>_<YYYYmmdd_HHMMSS>.<ext>`
pub fn export_file_name(prefix: &str, format: ExportFormat, at: DateTime<Local>) -> String {
    format!(
        "{}_{}.{}",
        prefix,
        at.format("%Y%m%d_%H%M%S"),
        format.extension()
    )
}

fn write_cell(
    worksheet: &mut Worksheet,
    row: u32,
    col: u16,
    value: &Value,
    date_format: &Format,
    timestamp_format: &Format,
) -> Result<()> {
    match value {
        Value::Null => return Ok(()),
        Value::Boolean(b) => worksheet.write_boolean(row, col, *b),
        Value::Integer(i) => worksheet.write_number(row, col, *i as f64),
        Value::Float(f) if f.is_finite() => worksheet.write_number(row, col, *f),
        Value::Float(f) => worksheet.write_string(row, col, f.to_string()),
        Value::Text(s) => worksheet.write_string(row, col, s),
        Value::Date(d) => worksheet.write_datetime_with_format(row, col, d, date_format),
        Value::Timestamp(ts) => worksheet.write_datetime_with_format(row, col, ts, timestamp_format),
    }
    .map_err(export_error)?;
    Ok(())
}

fn column_number(col: usize) -> Result<u16> {
    u16::try_from(col).map_err(|_| SheetiqError::Export("too many columns for a worksheet".to_string()))
}

fn export_error(cause: impl std::fmt::Display) -> SheetiqError {
    SheetiqError::Export(cause.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Column, DataType};
    use chrono::TimeZone;

    fn sample() -> QueryResult {
        QueryResult::new(
            vec![
                Column::new("id", DataType::Integer),
                Column::new("note", DataType::Text),
                Column::new("amount", DataType::Float),
            ],
            vec![
                vec![Value::Integer(1), Value::Text("plain".into()), Value::Float(10.0)],
                vec![Value::Integer(2), Value::Text("a, b".into()), Value::Null],
                vec![Value::Integer(3), Value::Text("two\nlines".into()), Value::Float(2.5)],
            ],
        )
    }

    #[test]
    fn test_delimited_quotes_when_needed() {
        let bytes = ResultExporter::default().to_delimited_bytes(&sample()).unwrap();
        let text = String::from_utf8(bytes).unwrap();
        assert_eq!(
            text,
            "id,note,amount\n1,plain,10.0\n2,\"a, b\",\n3,\"two\nlines\",2.5\n"
        );
    }

    #[test]
    fn test_delimited_header_only_for_empty_result() {
        let result = QueryResult::new(vec![Column::new("n", DataType::Integer)], vec![]);
        let bytes = ResultExporter::default().to_delimited_bytes(&result).unwrap();
        assert_eq!(bytes, b"n\n");
    }

    #[test]
    fn test_spreadsheet_is_zip_container() {
        let bytes = ResultExporter::default().to_spreadsheet_bytes(&sample()).unwrap();
        assert!(bytes.starts_with(b"PK"));
    }

    #[test]
    fn test_export_does_not_mutate() {
        let result = sample();
        let before = result.clone();
        let exporter = ResultExporter::default();
        exporter.to_spreadsheet_bytes(&result).unwrap();
        exporter.to_delimited_bytes(&result).unwrap();
        assert_eq!(result, before);
    }

    #[test]
    fn test_format_from_path() {
        assert_eq!(
            ExportFormat::from_path(Path::new("out.XLSX")).unwrap(),
            ExportFormat::Spreadsheet
        );
        assert_eq!(
            ExportFormat::from_path(Path::new("out.csv")).unwrap(),
            ExportFormat::Delimited
        );
        assert!(ExportFormat::from_path(Path::new("out.txt")).is_err());
    }

    #[test]
    fn test_export_file_name() {
        let at = Local.with_ymd_and_hms(2024, 7, 4, 9, 5, 3).unwrap();
        assert_eq!(
            export_file_name("sheetiq_results", ExportFormat::Delimited, at),
            "sheetiq_results_20240704_090503.csv"
        );
    }
}
