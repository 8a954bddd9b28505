pub mod tabular_source;

pub use tabular_source::TabularSource;
