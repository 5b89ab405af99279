use crate::domain::report::{round_to, DerivedMetrics, YearOverYear};

/// Relative change in percent, rounded to one decimal.
///
/// Without a baseline (`None` or zero) the change is reported as 0.
pub fn growth(current: f64, previous: Option<f64>) -> f64 {
    match previous {
        Some(p) if p != 0.0 && p.is_finite() => round_to((current - p) / p * 100.0, 1),
        _ => 0.0,
    }
}

/// Plain difference for metrics that are already percentages.
///
/// A 0% baseline is a real value; only a missing baseline yields 0.
pub fn point_difference(current: f64, previous: Option<f64>) -> f64 {
    match previous {
        Some(p) if p.is_finite() => round_to(current - p, 1),
        _ => 0.0,
    }
}

pub fn year_over_year(current: &DerivedMetrics, previous: Option<&DerivedMetrics>) -> YearOverYear {
    let Some(prev) = previous else {
        return YearOverYear::default();
    };

    YearOverYear {
        companies: growth(
            current.total_companies as f64,
            Some(prev.total_companies as f64),
        ),
        offers: growth(current.total_offers as f64, Some(prev.total_offers as f64)),
        offers_per_student: growth(
            current.offers_per_student.value(),
            Some(prev.offers_per_student.value()),
        ),
        average_package: growth(
            current.average_package.value(),
            Some(prev.average_package.value()),
        ),
        highest_package: growth(
            current.highest_package.value(),
            Some(prev.highest_package.value()),
        ),
        students_placed: growth(
            current.students_placed as f64,
            Some(prev.students_placed as f64),
        ),
        // 前一年沒有任何學生時，比率沒有基準
        placement_rate_points: point_difference(
            current.placement_rate.value(),
            (prev.class_total > 0).then(|| prev.placement_rate.value()),
        ),
    }
}
