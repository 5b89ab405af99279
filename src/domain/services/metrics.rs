use crate::domain::model::{Branch, CompanyRecord, PlacementRecord, RecordSet};
use crate::domain::report::{
    BranchPlacement, DerivedMetrics, Fixed, PackageStats, PlacementTotals,
};

/// Restricts placement aggregation to one branch or the whole institute.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum BranchFilter {
    #[default]
    All,
    Only(Branch),
}

impl BranchFilter {
    pub fn matches(&self, branch: Branch) -> bool {
        match self {
            BranchFilter::All => true,
            BranchFilter::Only(b) => *b == branch,
        }
    }
}

pub fn total_companies(records: &RecordSet, year: i32) -> usize {
    records.companies_in(year).count()
}

pub fn total_offers(records: &RecordSet, year: i32) -> u64 {
    records
        .companies_in(year)
        .map(|c| u64::from(c.total_offers))
        .sum()
}

/// Sum of the recruitment-catalog branch counts on one company row.
///
/// Used as the offers-per-student denominator; it is not the enrolled headcount.
pub fn total_students_across_branches(company: &CompanyRecord) -> u64 {
    Branch::RECRUITMENT
        .iter()
        .map(|b| u64::from(company.offers_for(*b)))
        .sum()
}

pub fn offers_per_student(records: &RecordSet, year: i32) -> Fixed {
    let students: u64 = records
        .companies_in(year)
        .map(total_students_across_branches)
        .sum();
    ratio(total_offers(records, year), students, 1.0, 2)
}

pub fn package_stats(records: &RecordSet, year: i32) -> PackageStats {
    let salaries: Vec<f64> = records
        .companies_in(year)
        .filter_map(|c| c.salary)
        .filter(|s| *s > 0.0)
        .collect();

    if salaries.is_empty() {
        return PackageStats::zero();
    }

    let average = salaries.iter().sum::<f64>() / salaries.len() as f64;
    let highest = salaries.iter().copied().fold(f64::MIN, f64::max);

    PackageStats {
        average: Fixed::new(average, 2),
        highest: Fixed::new(highest, 2),
    }
}

pub fn placement_totals(records: &RecordSet, year: i32, filter: BranchFilter) -> PlacementTotals {
    records
        .placements_in(year)
        .filter(|r| filter.matches(r.branch))
        .fold(PlacementTotals::default(), |mut acc, r| {
            accumulate(&mut acc, r);
            acc
        })
}

pub fn placement_rate(records: &RecordSet, year: i32) -> Fixed {
    placement_rate_for(records, year, BranchFilter::All)
}

pub fn placement_rate_for(records: &RecordSet, year: i32, filter: BranchFilter) -> Fixed {
    let totals = placement_totals(records, year, filter);
    ratio(totals.selected_total, totals.class_total, 100.0, 1)
}

pub fn students_placed(records: &RecordSet, year: i32) -> u64 {
    placement_totals(records, year, BranchFilter::All).selected_total
}

/// Per-branch placement rows for one year, in catalog order.
///
/// Branches without a record that year are left out.
pub fn branch_breakdown(records: &RecordSet, year: i32) -> Vec<BranchPlacement> {
    Branch::ALL
        .iter()
        .filter(|b| records.placements_in(year).any(|r| r.branch == **b))
        .map(|b| {
            let totals = placement_totals(records, year, BranchFilter::Only(*b));
            BranchPlacement {
                branch: *b,
                class_total: totals.class_total,
                selected_total: totals.selected_total,
                placement_rate: ratio(totals.selected_total, totals.class_total, 100.0, 1),
            }
        })
        .collect()
}

/// All summary metrics for `year`; `None` yields the zero-valued object.
pub fn derived_metrics(records: &RecordSet, year: Option<i32>) -> DerivedMetrics {
    let Some(y) = year else {
        return DerivedMetrics::empty(None);
    };

    let packages = package_stats(records, y);
    let totals = placement_totals(records, y, BranchFilter::All);

    DerivedMetrics {
        year: Some(y),
        total_companies: total_companies(records, y),
        total_offers: total_offers(records, y),
        offers_per_student: offers_per_student(records, y),
        average_package: packages.average,
        highest_package: packages.highest,
        placement_rate: ratio(totals.selected_total, totals.class_total, 100.0, 1),
        students_placed: totals.selected_total,
        class_total: totals.class_total,
    }
}

fn accumulate(acc: &mut PlacementTotals, record: &PlacementRecord) {
    acc.class_total += u64::from(record.class_total);
    acc.selected_total += u64::from(record.selected_total);
    acc.selected_male += u64::from(record.selected_male);
    acc.selected_female += u64::from(record.selected_female);
    acc.eligible += u64::from(record.eligible);
    acc.registered += u64::from(record.registered);
    acc.total_offers += u64::from(record.total_offers);
}

fn ratio(numerator: u64, denominator: u64, scale: f64, places: usize) -> Fixed {
    if denominator == 0 {
        return Fixed::zero(places);
    }
    Fixed::new(numerator as f64 / denominator as f64 * scale, places)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::services::fixtures::sample_records;

    #[test]
    fn test_company_counts_and_offers() {
        let records = sample_records();

        assert_eq!(total_companies(&records, 2024), 3);
        assert_eq!(total_offers(&records, 2024), 115);
        assert_eq!(total_companies(&records, 2023), 2);
        assert_eq!(total_offers(&records, 2023), 60);
    }

    #[test]
    fn test_total_students_ignores_non_catalog_branches() {
        let company = CompanyRecord::new(2024, "X", 10)
            .with_branch(Branch::Cse, 4)
            .with_branch(Branch::Auto, 3)
            .with_branch(Branch::Aids, 100);

        assert_eq!(total_students_across_branches(&company), 7);
    }

    #[test]
    fn test_offers_per_student() {
        let records = sample_records();

        assert_eq!(offers_per_student(&records, 2024).to_string(), "1.00");
        // 60 / 55
        assert_eq!(offers_per_student(&records, 2023).to_string(), "1.09");
    }

    #[test]
    fn test_offers_per_student_without_companies_is_zero() {
        let records = sample_records();

        assert_eq!(offers_per_student(&records, 1999).to_string(), "0.00");
        assert_eq!(
            offers_per_student(&RecordSet::default(), 2024).to_string(),
            "0.00"
        );
    }

    #[test]
    fn test_offers_per_student_with_zero_branch_counts_is_zero() {
        let records = RecordSet::new(vec![], vec![CompanyRecord::new(2024, "X", 12)]);
        assert_eq!(offers_per_student(&records, 2024).to_string(), "0.00");
    }

    #[test]
    fn test_package_stats_average_and_highest() {
        let stats = package_stats(&sample_records(), 2024);

        assert_eq!(stats.average.to_string(), "12.00");
        assert_eq!(stats.highest.to_string(), "15.00");
    }

    #[test]
    fn test_package_stats_skip_undisclosed_and_zero_salaries() {
        let records = RecordSet::new(
            vec![],
            vec![
                CompanyRecord::new(2024, "A", 1).with_salary(0.0),
                CompanyRecord::new(2024, "B", 1),
                CompanyRecord::new(2024, "C", 1).with_salary(7.25),
            ],
        );
        let stats = package_stats(&records, 2024);

        assert_eq!(stats.average.to_string(), "7.25");
        assert_eq!(stats.highest.to_string(), "7.25");
        assert_eq!(package_stats(&records, 2020), PackageStats::zero());
    }

    #[test]
    fn test_placement_rate_one_decimal() {
        let records = sample_records();

        assert_eq!(placement_rate(&records, 2024).to_string(), "80.0");
        assert_eq!(placement_rate(&records, 2023).to_string(), "75.0");
        assert_eq!(placement_rate(&records, 2010).to_string(), "0.0");
    }

    #[test]
    fn test_placement_rate_for_branch() {
        let records = sample_records();

        let cse = placement_rate_for(&records, 2024, BranchFilter::Only(Branch::Cse));
        assert_eq!(cse.to_string(), "83.3");
        let mech = placement_rate_for(&records, 2024, BranchFilter::Only(Branch::Mech));
        assert_eq!(mech.to_string(), "0.0");
    }

    #[test]
    fn test_branch_breakdown_in_catalog_order() {
        let rows = branch_breakdown(&sample_records(), 2024);

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].branch, Branch::Cse);
        assert_eq!(rows[1].branch, Branch::Ece);
        assert_eq!(rows[1].placement_rate.to_string(), "75.0");
    }

    #[test]
    fn test_derived_metrics_for_missing_year_is_zero() {
        let metrics = derived_metrics(&RecordSet::default(), None);
        assert_eq!(metrics, DerivedMetrics::empty(None));

        let metrics = derived_metrics(&sample_records(), Some(2024));
        assert_eq!(metrics.total_companies, 3);
        assert_eq!(metrics.students_placed, 400);
        assert_eq!(metrics.class_total, 500);
        assert_eq!(metrics.placement_rate.to_string(), "80.0");
    }

    #[test]
    fn test_aggregation_is_idempotent() {
        let records = sample_records();

        assert_eq!(
            derived_metrics(&records, Some(2024)),
            derived_metrics(&records, Some(2024))
        );
        assert_eq!(package_stats(&records, 2023), package_stats(&records, 2023));
    }
}
