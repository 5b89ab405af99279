use crate::domain::model::RecordSet;
use crate::domain::report::SalaryBucket;

/// Salary ranges in LPA: lower bound inclusive, upper bound exclusive, last one open.
pub const SALARY_RANGES: [(&str, f64, Option<f64>); 6] = [
    ("0-5", 0.0, Some(5.0)),
    ("5-10", 5.0, Some(10.0)),
    ("10-15", 10.0, Some(15.0)),
    ("15-20", 15.0, Some(20.0)),
    ("20-25", 20.0, Some(25.0)),
    ("25+", 25.0, None),
];

fn bucket_index(salary: f64) -> usize {
    SALARY_RANGES
        .iter()
        .position(|(_, min, max)| salary >= *min && max.map_or(true, |m| salary < m))
        // 負值與 NaN 歸入第一個區間
        .unwrap_or(0)
}

/// Histogram of company packages for `year`, in range order.
///
/// Undisclosed salaries count as 0, so every row lands in exactly one bucket.
pub fn salary_distribution(records: &RecordSet, year: i32) -> Vec<SalaryBucket> {
    let mut counts = [0usize; SALARY_RANGES.len()];
    for company in records.companies_in(year) {
        counts[bucket_index(company.salary.unwrap_or(0.0))] += 1;
    }

    SALARY_RANGES
        .iter()
        .zip(counts)
        .map(|((label, min, max), count)| SalaryBucket {
            range_label: format!("{} LPA", label),
            min: *min,
            max: *max,
            count,
        })
        .collect()
}
