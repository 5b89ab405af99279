use crate::domain::model::RecordSet;
use std::collections::BTreeSet;

/// 預設趨勢圖顯示的年數
pub const DEFAULT_TREND_YEARS: usize = 5;

/// Distinct years present in a record set, most recent first.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct YearSelection {
    years: Vec<i32>,
}

impl YearSelection {
    pub fn from_records(records: &RecordSet) -> Self {
        let distinct: BTreeSet<i32> = records
            .placements
            .iter()
            .map(|r| r.year)
            .chain(records.companies.iter().map(|r| r.year))
            .collect();

        Self {
            years: distinct.into_iter().rev().collect(),
        }
    }

    pub fn years(&self) -> &[i32] {
        &self.years
    }

    pub fn current_year(&self) -> Option<i32> {
        self.years.first().copied()
    }

    pub fn previous_year(&self) -> Option<i32> {
        self.years.get(1).copied()
    }

    /// The year before `year` that has records, if any.
    pub fn year_before(&self, year: i32) -> Option<i32> {
        self.years.iter().copied().find(|y| *y < year)
    }

    pub fn contains(&self, year: i32) -> bool {
        self.years.contains(&year)
    }

    /// Most recent `size` years, descending.
    pub fn window(&self, size: usize) -> Vec<i32> {
        self.years.iter().copied().take(size).collect()
    }

    pub fn trend_window(&self) -> Vec<i32> {
        self.window(DEFAULT_TREND_YEARS)
    }

    /// Same years as [`window`](Self::window), oldest first for chart axes.
    pub fn chart_years(&self, size: usize) -> Vec<i32> {
        let mut years = self.window(size);
        years.reverse();
        years
    }

    pub fn is_empty(&self) -> bool {
        self.years.is_empty()
    }
}
