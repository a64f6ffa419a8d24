//! Quarry Core - a fluent builder for SELECT queries.
//!
//! Clauses are accumulated in any order and rendered with a fixed layout:
//! one clause per line, CTE bodies indented two spaces per level. Column
//! expressions, predicates and table names are opaque strings and are used
//! verbatim.
//!
//! ```
//! use quarry_core::table;
//!
//! let query = table("tips")
//!     .unwrap()
//!     .where_("tip < 10")
//!     .or_where("total_bill > 10");
//!
//! assert_eq!(query.build(), "SELECT *\nFROM tips\nWHERE tip < 10 OR total_bill > 10");
//! ```

pub mod builder;
pub mod config;
pub mod error;

// Re-export main types
pub use builder::{Cte, IntoFragments, Joiner, Predicate, QueryBuilder};
pub use config::BuildOptions;
pub use error::{Error, Result};

/// Create a new query builder selecting from the given table
pub fn table(name: &str) -> Result<QueryBuilder> {
    QueryBuilder::new(name)
}
