use crate::domain::model::RecordSet;
use crate::domain::report::{SeriesField, SeriesPoint};
use crate::domain::services::metrics;
use std::collections::BTreeMap;

/// One point per year, in the order given, carrying only `fields`.
///
/// Years without records still produce a point with zero values so the chart
/// axis stays continuous.
pub fn build_series(records: &RecordSet, years: &[i32], fields: &[SeriesField]) -> Vec<SeriesPoint> {
    years
        .iter()
        .map(|&year| SeriesPoint {
            year,
            values: fields
                .iter()
                .map(|field| (*field, field_value(records, year, *field)))
                .collect::<BTreeMap<_, _>>(),
        })
        .collect()
}

fn field_value(records: &RecordSet, year: i32, field: SeriesField) -> f64 {
    match field {
        SeriesField::Companies => metrics::total_companies(records, year) as f64,
        SeriesField::Offers => metrics::total_offers(records, year) as f64,
        SeriesField::PlacementRate => metrics::placement_rate(records, year).value(),
        SeriesField::AveragePackage => metrics::package_stats(records, year).average.value(),
        SeriesField::HighestPackage => metrics::package_stats(records, year).highest.value(),
        SeriesField::StudentsPlaced => metrics::students_placed(records, year) as f64,
    }
}
