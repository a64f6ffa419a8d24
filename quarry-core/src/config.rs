//! Render-time options for query builders

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Options that change how a single builder renders.
///
/// Options apply to the builder they are set on only. CTE bodies keep
/// their own options.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BuildOptions {
    /// Prepend GROUP BY columns that were not explicitly selected to the
    /// SELECT list.
    pub group_by_in_select: bool,
}

impl Default for BuildOptions {
    fn default() -> Self {
        Self {
            group_by_in_select: true,
        }
    }
}

impl BuildOptions {
    /// Load options from a JSON document. Missing fields take their defaults.
    ///
    /// # Examples
    /// ```
    /// use quarry_core::BuildOptions;
    ///
    /// let options = BuildOptions::from_json(r#"{"group_by_in_select": false}"#).unwrap();
    /// assert!(!options.group_by_in_select);
    /// ```
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| Error::config("could not parse build options", e))
    }

    /// Disable merging GROUP BY columns into the SELECT list
    pub fn without_group_by_in_select(mut self) -> Self {
        self.group_by_in_select = false;
        self
    }
}
