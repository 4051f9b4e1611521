pub mod facet;
pub mod pagination;
pub mod params;
pub mod predicate;
pub mod record;
pub mod sort;
pub mod statistics;

/// Facet value meaning "apply no constraint on this dimension".
pub const ALL: &str = "All";
