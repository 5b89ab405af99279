// Domain layer: record model, report value objects and the pure aggregation services.

pub mod model;
pub mod ports;
pub mod report;

pub mod services;
