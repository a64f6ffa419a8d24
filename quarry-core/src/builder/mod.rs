//! Query builder module

pub mod fragments;
pub mod predicate;
pub mod query;

// Re-export types from submodules
pub use fragments::IntoFragments;
pub use predicate::{Joiner, Predicate};
pub use query::{Cte, QueryBuilder};
