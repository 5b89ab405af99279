use crate::domain::model::{Branch, CompanyRecord, RecordSet};
use crate::domain::report::RankedEntry;
use crate::utils::error::{Result, StatsError};
use std::cmp::Ordering;
use std::str::FromStr;

pub const DISPLAY_NAME_LIMIT: usize = 15;
pub const DEFAULT_TOP_N: usize = 10;

/// Numeric field a ranking sorts on.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RankKey {
    #[default]
    TotalOffers,
    Salary,
    InternshipPpo,
}

impl RankKey {
    pub fn value(&self, company: &CompanyRecord) -> f64 {
        match self {
            RankKey::TotalOffers => f64::from(company.total_offers),
            RankKey::Salary => company.salary.unwrap_or(0.0),
            RankKey::InternshipPpo => f64::from(company.internship_ppo),
        }
    }
}

impl FromStr for RankKey {
    type Err = StatsError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "offers" | "total_offers" => Ok(RankKey::TotalOffers),
            "salary" | "package" => Ok(RankKey::Salary),
            "ppo" | "internship_ppo" => Ok(RankKey::InternshipPpo),
            other => Err(StatsError::InvalidConfigValueError {
                field: "rank_by".to_string(),
                value: other.to_string(),
                reason: "Expected one of: offers, salary, ppo".to_string(),
            }),
        }
    }
}

pub fn display_name(full_name: &str) -> String {
    if full_name.chars().count() > DISPLAY_NAME_LIMIT {
        let head: String = full_name.chars().take(DISPLAY_NAME_LIMIT).collect();
        format!("{}...", head)
    } else {
        full_name.to_string()
    }
}

/// Top `n` companies of `year` by `key`, highest first.
///
/// The sort is stable: equal keys keep their input order.
pub fn top_n_by<F>(records: &RecordSet, year: i32, n: usize, key: F) -> Vec<RankedEntry>
where
    F: Fn(&CompanyRecord) -> f64,
{
    sorted_desc(records.companies_in(year), key)
        .into_iter()
        .take(n)
        .map(|(metric_value, company)| RankedEntry {
            display_name: display_name(&company.company_name),
            full_name: company.company_name.clone(),
            metric_value,
        })
        .collect()
}

pub fn top_n(records: &RecordSet, year: i32, n: usize, key: RankKey) -> Vec<RankedEntry> {
    top_n_by(records, year, n, |c| key.value(c))
}

fn sorted_desc<'a, I, F>(companies: I, key: F) -> Vec<(f64, &'a CompanyRecord)>
where
    I: Iterator<Item = &'a CompanyRecord>,
    F: Fn(&CompanyRecord) -> f64,
{
    let mut keyed: Vec<(f64, &CompanyRecord)> = companies
        .map(|c| {
            let k = key(c);
            // NaN 視為 0，-0.0 視為 0.0
            let k = if k.is_nan() { 0.0 } else { k + 0.0 };
            (k, c)
        })
        .collect();
    keyed.sort_by(|a, b| b.0.total_cmp(&a.0));
    keyed
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TableSort {
    #[default]
    Name,
    Offers,
    Salary,
}

/// Filters for the per-year company detail table.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CompanyQuery {
    pub search: Option<String>,
    pub branch: Option<Branch>,
    pub sort: TableSort,
}

impl CompanyQuery {
    fn matches(&self, company: &CompanyRecord) -> bool {
        let name_ok = self.search.as_deref().map_or(true, |needle| {
            company
                .company_name
                .to_lowercase()
                .contains(&needle.trim().to_lowercase())
        });
        let branch_ok = self.branch.map_or(true, |b| company.offers_for(b) > 0);
        name_ok && branch_ok
    }
}

pub fn company_table<'a>(
    records: &'a RecordSet,
    year: i32,
    query: &CompanyQuery,
) -> Vec<&'a CompanyRecord> {
    let rows = records.companies_in(year).filter(|c| query.matches(c));

    match query.sort {
        TableSort::Name => {
            let mut rows: Vec<&CompanyRecord> = rows.collect();
            rows.sort_by(|a, b| compare_names(&a.company_name, &b.company_name));
            rows
        }
        TableSort::Offers => sorted_desc(rows, |c| RankKey::TotalOffers.value(c))
            .into_iter()
            .map(|(_, c)| c)
            .collect(),
        TableSort::Salary => sorted_desc(rows, |c| RankKey::Salary.value(c))
            .into_iter()
            .map(|(_, c)| c)
            .collect(),
    }
}

fn compare_names(a: &str, b: &str) -> Ordering {
    a.to_lowercase().cmp(&b.to_lowercase())
}
