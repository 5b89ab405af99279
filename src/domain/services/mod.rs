//! Pure aggregation over an in-memory [`RecordSet`](crate::domain::model::RecordSet).
//!
//! Nothing here performs IO or keeps state between calls; every function takes
//! the record snapshot plus scalar parameters and returns fresh value objects.

pub mod audit;
pub mod buckets;
pub mod dashboard;
pub mod growth;
pub mod metrics;
pub mod ranking;
pub mod series;
pub mod years;

#[cfg(test)]
pub(crate) mod fixtures;
