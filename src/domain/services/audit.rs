use crate::domain::model::{Branch, RecordSet};
use crate::domain::services::metrics::total_students_across_branches;
use std::collections::HashSet;
use std::fmt;

/// A data-quality problem that does not stop aggregation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordWarning {
    GenderSplitMismatch {
        year: i32,
        branch: Branch,
        selected_total: u32,
        split_sum: u32,
    },
    DuplicatePlacement {
        year: i32,
        branch: Branch,
    },
    OfferCountMismatch {
        year: i32,
        company: String,
        total_offers: u32,
        branch_sum: u64,
    },
    MissingCompanyName {
        year: i32,
        row: usize,
    },
    MissingYear {
        entity: String,
        row: usize,
    },
}

impl fmt::Display for RecordWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordWarning::GenderSplitMismatch {
                year,
                branch,
                selected_total,
                split_sum,
            } => write!(
                f,
                "{} {}: selected_total {} but male + female = {}",
                year, branch, selected_total, split_sum
            ),
            RecordWarning::DuplicatePlacement { year, branch } => {
                write!(f, "{} {}: more than one placement row", year, branch)
            }
            RecordWarning::OfferCountMismatch {
                year,
                company,
                total_offers,
                branch_sum,
            } => write!(
                f,
                "{} {}: total_offers {} but branch counts sum to {}",
                year, company, total_offers, branch_sum
            ),
            RecordWarning::MissingCompanyName { year, row } => {
                write!(f, "{} company row {} has no name", year, row)
            }
            RecordWarning::MissingYear { entity, row } => {
                write!(f, "{} row {} has no usable year and was skipped", entity, row)
            }
        }
    }
}

pub fn audit_records(records: &RecordSet) -> Vec<RecordWarning> {
    let mut warnings: Vec<RecordWarning> = records
        .skipped
        .iter()
        .map(|s| RecordWarning::MissingYear {
            entity: s.entity.clone(),
            row: s.row,
        })
        .collect();
    let mut seen = HashSet::new();

    for record in &records.placements {
        let split_sum = record.selected_male.saturating_add(record.selected_female);
        // 性別欄位全為 0 時代表未填，不算不一致
        if split_sum != 0 && split_sum != record.selected_total {
            warnings.push(RecordWarning::GenderSplitMismatch {
                year: record.year,
                branch: record.branch,
                selected_total: record.selected_total,
                split_sum,
            });
        }
        if !seen.insert((record.year, record.branch)) {
            warnings.push(RecordWarning::DuplicatePlacement {
                year: record.year,
                branch: record.branch,
            });
        }
    }

    for (row, company) in records.companies.iter().enumerate() {
        if company.company_name.trim().is_empty() {
            warnings.push(RecordWarning::MissingCompanyName {
                year: company.year,
                row,
            });
        }
        let branch_sum = total_students_across_branches(company);
        if branch_sum != 0 && branch_sum != u64::from(company.total_offers) {
            warnings.push(RecordWarning::OfferCountMismatch {
                year: company.year,
                company: company.company_name.clone(),
                total_offers: company.total_offers,
                branch_sum,
            });
        }
    }

    warnings
}
