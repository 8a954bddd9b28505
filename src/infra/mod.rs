//! Concrete [`TabularSource`](crate::services::TabularSource) implementations.

pub mod csv_export;
pub mod google;
