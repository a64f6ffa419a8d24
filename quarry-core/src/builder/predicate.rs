//! WHERE predicate bookkeeping

use serde::{Deserialize, Serialize};
use std::fmt::{self, Display};

use crate::{Error, Result};

/// How a predicate combines with the predicates before it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Joiner {
    And,
    Or,
}

impl Joiner {
    /// Get the SQL keyword for this joiner
    pub fn as_str(&self) -> &'static str {
        match self {
            Joiner::And => "AND",
            Joiner::Or => "OR",
        }
    }
}

impl Display for Joiner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A WHERE predicate. The first predicate of a query carries no joiner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Predicate {
    pub expression: String,
    pub joiner: Option<Joiner>,
}

/// Append `expressions` to `predicates`, each joined with `joiner` unless it
/// is the very first predicate.
pub(crate) fn push_predicates(
    predicates: &mut Vec<Predicate>,
    expressions: Vec<String>,
    joiner: Joiner,
) {
    for expression in expressions {
        let joiner = if predicates.is_empty() { None } else { Some(joiner) };
        predicates.push(Predicate { expression, joiner });
    }
}

/// Check that only the first predicate lacks a joiner
pub(crate) fn validate_joiners(predicates: &[Predicate]) -> Result<()> {
    for (i, predicate) in predicates.iter().enumerate() {
        match (i, predicate.joiner) {
            (0, Some(joiner)) => {
                return Err(Error::invalid_argument(format!(
                    "first WHERE predicate '{}' must not have a joiner, found {}",
                    predicate.expression, joiner
                )));
            }
            (i, None) if i > 0 => {
                return Err(Error::invalid_argument(format!(
                    "WHERE predicate '{}' is missing a joiner",
                    predicate.expression
                )));
            }
            _ => {}
        }
    }
    Ok(())
}

/// Render predicates as a WHERE body, e.g. `a AND b OR c`
pub(crate) fn render_predicates(predicates: &[Predicate]) -> String {
    let mut sql = String::new();
    for predicate in predicates {
        if let Some(joiner) = predicate.joiner {
            sql.push(' ');
            sql.push_str(joiner.as_str());
            sql.push(' ');
        }
        sql.push_str(&predicate.expression);
    }
    sql
}
