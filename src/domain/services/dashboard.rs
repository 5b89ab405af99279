use crate::domain::model::RecordSet;
use crate::domain::report::{DashboardReport, SeriesField};
use crate::domain::services::{buckets, growth, metrics, ranking, series};
use crate::domain::services::ranking::RankKey;
use crate::domain::services::years::{YearSelection, DEFAULT_TREND_YEARS};
use chrono::{DateTime, Utc};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReportOptions {
    pub year: Option<i32>,
    pub top_n: usize,
    pub trend_years: usize,
}

impl Default for ReportOptions {
    fn default() -> Self {
        Self {
            year: None,
            top_n: ranking::DEFAULT_TOP_N,
            trend_years: DEFAULT_TREND_YEARS,
        }
    }
}

/// Assembles every dashboard view for the selected year.
///
/// The report year is `options.year` or the most recent year in the data; the
/// comparison year is the closest earlier year that has records.
pub fn build_report(
    records: &RecordSet,
    options: &ReportOptions,
    generated_at: DateTime<Utc>,
) -> DashboardReport {
    let selection = YearSelection::from_records(records);
    let report_year = options.year.or(selection.current_year());
    let previous_year = report_year.and_then(|y| selection.year_before(y));

    let current = metrics::derived_metrics(records, report_year);
    let previous = metrics::derived_metrics(records, previous_year);
    let yoy = growth::year_over_year(&current, previous_year.map(|_| &previous));

    let (salary_distribution, top_recruiters, top_by_package, branch_breakdown) = match report_year {
        Some(y) => (
            buckets::salary_distribution(records, y),
            ranking::top_n(records, y, options.top_n, RankKey::TotalOffers),
            ranking::top_n(records, y, options.top_n, RankKey::Salary),
            metrics::branch_breakdown(records, y),
        ),
        None => (Vec::new(), Vec::new(), Vec::new(), Vec::new()),
    };

    let trends = series::build_series(
        records,
        &selection.chart_years(options.trend_years),
        &SeriesField::ALL,
    );

    DashboardReport {
        generated_at,
        years: selection.years().to_vec(),
        report_year,
        previous_year,
        current,
        previous,
        growth: yoy,
        salary_distribution,
        top_recruiters,
        top_by_package,
        trends,
        branch_breakdown,
    }
}
