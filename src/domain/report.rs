use crate::domain::model::Branch;
use chrono::{DateTime, Utc};
use serde::{Serialize, Serializer};
use std::collections::BTreeMap;
use std::fmt;

/// A value rounded to a fixed number of decimal places.
///
/// Displays and serializes with exactly `places` digits (`"0.00"`, `"80.0"`),
/// the form the dashboard cards show.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Fixed {
    value: f64,
    places: usize,
}

impl Fixed {
    pub fn new(value: f64, places: usize) -> Self {
        Self {
            value: round_to(value, places),
            places,
        }
    }

    pub fn zero(places: usize) -> Self {
        Self::new(0.0, places)
    }

    pub fn value(&self) -> f64 {
        self.value
    }

    pub fn places(&self) -> usize {
        self.places
    }
}

impl fmt::Display for Fixed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.*}", self.places, self.value)
    }
}

impl Serialize for Fixed {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

pub fn round_to(value: f64, places: usize) -> f64 {
    if !value.is_finite() {
        return 0.0;
    }
    let factor = 10f64.powi(places as i32);
    let rounded = (value * factor).round() / factor;
    // 避免顯示 "-0.0"
    if rounded == 0.0 {
        0.0
    } else {
        rounded
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PackageStats {
    pub average: Fixed,
    pub highest: Fixed,
}

impl PackageStats {
    pub fn zero() -> Self {
        Self {
            average: Fixed::zero(2),
            highest: Fixed::zero(2),
        }
    }
}

/// Summary metrics for a single year.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DerivedMetrics {
    pub year: Option<i32>,
    pub total_companies: usize,
    pub total_offers: u64,
    pub offers_per_student: Fixed,
    pub average_package: Fixed,
    pub highest_package: Fixed,
    pub placement_rate: Fixed,
    pub students_placed: u64,
    pub class_total: u64,
}

impl DerivedMetrics {
    pub fn empty(year: Option<i32>) -> Self {
        Self {
            year,
            total_companies: 0,
            total_offers: 0,
            offers_per_student: Fixed::zero(2),
            average_package: Fixed::zero(2),
            highest_package: Fixed::zero(2),
            placement_rate: Fixed::zero(1),
            students_placed: 0,
            class_total: 0,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlacementTotals {
    pub class_total: u64,
    pub selected_total: u64,
    pub selected_male: u64,
    pub selected_female: u64,
    pub eligible: u64,
    pub registered: u64,
    pub total_offers: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BranchPlacement {
    pub branch: Branch,
    pub class_total: u64,
    pub selected_total: u64,
    pub placement_rate: Fixed,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SalaryBucket {
    pub range_label: String,
    pub min: f64,
    /// `None` is an open upper bound.
    pub max: Option<f64>,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RankedEntry {
    pub display_name: String,
    pub full_name: String,
    pub metric_value: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum SeriesField {
    Companies,
    Offers,
    PlacementRate,
    AveragePackage,
    HighestPackage,
    StudentsPlaced,
}

impl SeriesField {
    pub const ALL: [SeriesField; 6] = [
        SeriesField::Companies,
        SeriesField::Offers,
        SeriesField::PlacementRate,
        SeriesField::AveragePackage,
        SeriesField::HighestPackage,
        SeriesField::StudentsPlaced,
    ];

    pub fn column(&self) -> &'static str {
        match self {
            SeriesField::Companies => "companies",
            SeriesField::Offers => "offers",
            SeriesField::PlacementRate => "placementRate",
            SeriesField::AveragePackage => "averagePackage",
            SeriesField::HighestPackage => "highestPackage",
            SeriesField::StudentsPlaced => "studentsPlaced",
        }
    }
}

/// One point on a multi-year trend chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeriesPoint {
    pub year: i32,
    #[serde(flatten)]
    pub values: BTreeMap<SeriesField, f64>,
}

impl SeriesPoint {
    pub fn get(&self, field: SeriesField) -> Option<f64> {
        self.values.get(&field).copied()
    }
}

/// Change against the previous year. Rates use point difference, everything
/// else relative growth in percent.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct YearOverYear {
    pub companies: f64,
    pub offers: f64,
    pub offers_per_student: f64,
    pub average_package: f64,
    pub highest_package: f64,
    pub students_placed: f64,
    pub placement_rate_points: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardReport {
    pub generated_at: DateTime<Utc>,
    pub years: Vec<i32>,
    pub report_year: Option<i32>,
    pub previous_year: Option<i32>,
    pub current: DerivedMetrics,
    pub previous: DerivedMetrics,
    pub growth: YearOverYear,
    pub salary_distribution: Vec<SalaryBucket>,
    pub top_recruiters: Vec<RankedEntry>,
    pub top_by_package: Vec<RankedEntry>,
    pub trends: Vec<SeriesPoint>,
    pub branch_breakdown: Vec<BranchPlacement>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_formats_with_places() {
        assert_eq!(Fixed::zero(2).to_string(), "0.00");
        assert_eq!(Fixed::new(80.0, 1).to_string(), "80.0");
        assert_eq!(Fixed::new(2.0 / 3.0, 2).to_string(), "0.67");
        assert_eq!(Fixed::new(-0.01, 1).to_string(), "0.0");
        assert_eq!(Fixed::new(f64::NAN, 1).value(), 0.0);
    }

    #[test]
    fn test_fixed_serializes_as_string() {
        let json = serde_json::to_value(Fixed::new(12.0, 2)).unwrap();
        assert_eq!(json, serde_json::json!("12.00"));
    }

    #[test]
    fn test_series_point_flattens_fields() {
        let mut values = BTreeMap::new();
        values.insert(SeriesField::Companies, 3.0);
        values.insert(SeriesField::PlacementRate, 80.0);
        let point = SeriesPoint { year: 2024, values };

        let json = serde_json::to_value(&point).unwrap();
        assert_eq!(json["year"], 2024);
        assert_eq!(json["companies"], 3.0);
        assert_eq!(json["placementRate"], 80.0);
    }
}
