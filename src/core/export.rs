use crate::domain::report::{DashboardReport, SeriesField};
use crate::utils::error::{Result, StatsError};
use serde::Serialize;
use std::io::Write;
use zip::write::{SimpleFileOptions, ZipWriter};

pub const JSON_FILE: &str = "dashboard.json";
pub const TRENDS_FILE: &str = "trends.csv";
pub const SALARY_FILE: &str = "salary_distribution.csv";
pub const RECRUITERS_FILE: &str = "top_recruiters.csv";
pub const BRANCH_FILE: &str = "branch_breakdown.csv";
pub const ZIP_FILE: &str = "dashboard_report.zip";

/// A rendered output file, not yet written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifact {
    pub name: &'static str,
    pub data: Vec<u8>,
}

pub fn render_json(report: &DashboardReport) -> Result<Artifact> {
    Ok(Artifact {
        name: JSON_FILE,
        data: serde_json::to_vec_pretty(report)?,
    })
}

pub fn render_csv(report: &DashboardReport) -> Result<Vec<Artifact>> {
    Ok(vec![
        Artifact {
            name: TRENDS_FILE,
            data: trends_csv(report)?,
        },
        Artifact {
            name: SALARY_FILE,
            data: rows_csv(&report.salary_distribution)?,
        },
        Artifact {
            name: RECRUITERS_FILE,
            data: rows_csv(&report.top_recruiters)?,
        },
        Artifact {
            name: BRANCH_FILE,
            data: rows_csv(&report.branch_breakdown)?,
        },
    ])
}

/// 將 JSON 與所有 CSV 打包成一個 ZIP
pub fn render_zip(report: &DashboardReport) -> Result<Artifact> {
    let mut files = vec![render_json(report)?];
    files.extend(render_csv(report)?);

    let mut zip = ZipWriter::new(std::io::Cursor::new(Vec::new()));
    for file in &files {
        zip.start_file(file.name, SimpleFileOptions::default())?;
        zip.write_all(&file.data)?;
    }
    let cursor = zip.finish()?;

    Ok(Artifact {
        name: ZIP_FILE,
        data: cursor.into_inner(),
    })
}

/// Renders the requested formats; unknown names are rejected.
pub fn render(report: &DashboardReport, formats: &[String]) -> Result<Vec<Artifact>> {
    let mut artifacts = Vec::new();
    for format in formats {
        match format.as_str() {
            "json" => artifacts.push(render_json(report)?),
            "csv" => artifacts.extend(render_csv(report)?),
            "zip" => artifacts.push(render_zip(report)?),
            other => {
                return Err(StatsError::InvalidConfigValueError {
                    field: "output_formats".to_string(),
                    value: other.to_string(),
                    reason: "Valid formats: json, csv, zip".to_string(),
                })
            }
        }
    }
    Ok(artifacts)
}

fn rows_csv<T: Serialize>(rows: &[T]) -> Result<Vec<u8>> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    for row in rows {
        writer.serialize(row)?;
    }
    finish(writer)
}

// 趨勢資料的欄位是動態的，csv 無法直接序列化 flatten map
fn trends_csv(report: &DashboardReport) -> Result<Vec<u8>> {
    let mut writer = csv::Writer::from_writer(Vec::new());

    let mut header = vec!["year"];
    header.extend(SeriesField::ALL.iter().map(|f| f.column()));
    writer.write_record(&header)?;

    for point in &report.trends {
        let mut record = vec![point.year.to_string()];
        record.extend(
            SeriesField::ALL
                .iter()
                .map(|f| point.get(*f).map(|v| v.to_string()).unwrap_or_default()),
        );
        writer.write_record(&record)?;
    }
    finish(writer)
}

fn finish(writer: csv::Writer<Vec<u8>>) -> Result<Vec<u8>> {
    writer
        .into_inner()
        .map_err(|e| StatsError::IoError(e.into_error()))
}
