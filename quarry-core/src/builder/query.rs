//! SELECT query builder with common table expressions

use serde::{Deserialize, Serialize};
use std::fmt::{self, Display};

use super::fragments::IntoFragments;
use super::predicate::{push_predicates, render_predicates, validate_joiners, Joiner, Predicate};
use crate::{BuildOptions, Error, Result};

/// Indentation applied per CTE nesting level
const INDENT: &str = "  ";

/// A named subquery rendered in the WITH clause
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cte {
    pub alias: String,
    pub query: QueryBuilder,
}

/// Builder for a single SELECT query.
///
/// Every method consumes the builder and returns it, so calls chain in any
/// order and the final value reflects all of them. Fragments are used
/// verbatim; nothing is quoted or validated.
///
/// # Examples
/// ```
/// use quarry_core::table;
///
/// let query = table("tips")
///     .unwrap()
///     .group_by(["day", "time"])
///     .select(["MAX(tip) AS tip_max", "MIN(tip) AS tip_min"]);
///
/// assert_eq!(
///     query.build(),
///     "SELECT day, time, MAX(tip) AS tip_max, MIN(tip) AS tip_min\nFROM tips\nGROUP BY day, time"
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueryBuilder {
    source: String,
    #[serde(default)]
    selected_columns: Vec<String>,
    #[serde(default)]
    where_predicates: Vec<Predicate>,
    #[serde(default)]
    group_by_columns: Vec<String>,
    #[serde(default)]
    order_by_columns: Vec<String>,
    #[serde(default)]
    ctes: Vec<Cte>,
    #[serde(default)]
    limit_value: Option<u64>,
    #[serde(default)]
    offset_value: Option<u64>,
    #[serde(default)]
    options: BuildOptions,
}

impl QueryBuilder {
    /// Create a new builder selecting from `source`
    pub fn new(source: &str) -> Result<Self> {
        Self::with_options(source, BuildOptions::default())
    }

    /// Create a new builder selecting from `source` with explicit options
    pub fn with_options(source: &str, options: BuildOptions) -> Result<Self> {
        validate_name("source", source)?;

        Ok(Self {
            source: source.to_string(),
            selected_columns: Vec::new(),
            where_predicates: Vec::new(),
            group_by_columns: Vec::new(),
            order_by_columns: Vec::new(),
            ctes: Vec::new(),
            limit_value: None,
            offset_value: None,
            options,
        })
    }

    /// Select columns. Repeated calls accumulate.
    ///
    /// # Examples
    /// ```
    /// use quarry_core::table;
    ///
    /// let query = table("tips").unwrap().select(["a", "b"]).select("c");
    /// assert_eq!(query.build(), "SELECT a, b, c\nFROM tips");
    /// ```
    pub fn select<T>(mut self, columns: T) -> Self
    where
        T: IntoFragments,
    {
        self.selected_columns.extend(columns.into_fragments());
        self
    }

    /// Add WHERE predicates joined with AND
    ///
    /// # Examples
    /// ```
    /// use quarry_core::table;
    ///
    /// let query = table("tips").unwrap().where_(["tip < 10", "tip > 2"]);
    /// assert_eq!(query.build(), "SELECT *\nFROM tips\nWHERE tip < 10 AND tip > 2");
    /// ```
    pub fn where_<T>(mut self, predicates: T) -> Self
    where
        T: IntoFragments,
    {
        push_predicates(&mut self.where_predicates, predicates.into_fragments(), Joiner::And);
        self
    }

    /// Add WHERE predicates joined with OR
    pub fn or_where<T>(mut self, predicates: T) -> Self
    where
        T: IntoFragments,
    {
        push_predicates(&mut self.where_predicates, predicates.into_fragments(), Joiner::Or);
        self
    }

    /// Add WHERE predicates joined with AND (same as where_)
    pub fn and_where<T>(self, predicates: T) -> Self
    where
        T: IntoFragments,
    {
        self.where_(predicates)
    }

    /// Add GROUP BY columns
    pub fn group_by<T>(mut self, columns: T) -> Self
    where
        T: IntoFragments,
    {
        self.group_by_columns.extend(columns.into_fragments());
        self
    }

    /// Add ORDER BY columns
    pub fn order_by<T>(mut self, columns: T) -> Self
    where
        T: IntoFragments,
    {
        self.order_by_columns.extend(columns.into_fragments());
        self
    }

    /// Set the LIMIT clause
    pub fn limit(mut self, count: u64) -> Self {
        self.limit_value = Some(count);
        self
    }

    /// Set the OFFSET clause
    pub fn offset(mut self, offset: u64) -> Self {
        self.offset_value = Some(offset);
        self
    }

    /// Replace the render options
    pub fn options(mut self, options: BuildOptions) -> Self {
        self.options = options;
        self
    }

    /// Register `query` as a common table expression named `alias`.
    ///
    /// The query is taken by value: the CTE renders the state it had when
    /// it was registered.
    ///
    /// # Examples
    /// ```
    /// use quarry_core::table;
    ///
    /// let query = table("foo").unwrap().cte(table("bar").unwrap(), "t").unwrap();
    /// assert_eq!(query.build(), "WITH t AS (\n  SELECT *\n  FROM bar\n)\nSELECT *\nFROM foo");
    /// ```
    pub fn cte(mut self, query: QueryBuilder, alias: &str) -> Result<Self> {
        validate_name("CTE alias", alias)?;

        tracing::debug!(alias, source = %query.source, "registering CTE");
        self.ctes.push(Cte {
            alias: alias.to_string(),
            query,
        });
        Ok(self)
    }

    /// The table or subquery following FROM
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Explicitly selected columns, in call order
    pub fn selected_columns(&self) -> &[String] {
        &self.selected_columns
    }

    /// WHERE predicates, in call order
    pub fn predicates(&self) -> &[Predicate] {
        &self.where_predicates
    }

    /// GROUP BY columns, in call order
    pub fn group_by_columns(&self) -> &[String] {
        &self.group_by_columns
    }

    /// ORDER BY columns, in call order
    pub fn order_by_columns(&self) -> &[String] {
        &self.order_by_columns
    }

    /// Registered CTEs, in registration order
    pub fn ctes(&self) -> &[Cte] {
        &self.ctes
    }

    /// Options this builder renders with
    pub fn build_options(&self) -> &BuildOptions {
        &self.options
    }

    /// The columns the SELECT clause will list: GROUP BY columns missing from
    /// the selection come first, in GROUP BY order, followed by the selected
    /// columns. Empty means `*`.
    pub fn effective_columns(&self) -> Vec<&str> {
        let mut columns: Vec<&str> = Vec::new();

        if self.options.group_by_in_select {
            for column in &self.group_by_columns {
                let selected = self.selected_columns.iter().any(|c| c == column);
                if !selected && !columns.contains(&column.as_str()) {
                    columns.push(column);
                }
            }
        }

        columns.extend(self.selected_columns.iter().map(String::as_str));
        columns
    }

    /// Render the query
    pub fn build(&self) -> String {
        let mut lines = Vec::new();
        self.write_lines(&mut lines, 0);
        let sql = lines.join("\n");

        tracing::trace!(source = %self.source, len = sql.len(), "built query");
        sql
    }

    /// Render the query wrapped in a `<pre>` block for HTML display
    pub fn to_html(&self) -> String {
        format!("<pre>{}</pre>", self.build())
    }

    /// Serialize the query definition to JSON
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Load a query definition from JSON, checking the source, the WHERE
    /// joiners and every CTE alias, recursively
    pub fn from_json(json: &str) -> Result<Self> {
        let query: Self = serde_json::from_str(json)?;
        query.validate()?;
        Ok(query)
    }

    fn validate(&self) -> Result<()> {
        validate_name("source", &self.source)?;
        validate_joiners(&self.where_predicates)?;
        for cte in &self.ctes {
            validate_name("CTE alias", &cte.alias)?;
            cte.query.validate()?;
        }
        Ok(())
    }

    /// Append the rendered lines of this query to `lines`, indented `depth`
    /// levels. CTE bodies are written at `depth + 1`.
    fn write_lines(&self, lines: &mut Vec<String>, depth: usize) {
        // WITH clause
        for (i, cte) in self.ctes.iter().enumerate() {
            let keyword = if i == 0 { "WITH " } else { "" };
            push_indented(lines, depth, &format!("{}{} AS (", keyword, cte.alias));

            cte.query.write_lines(lines, depth + 1);

            let close = if i + 1 < self.ctes.len() { ")," } else { ")" };
            push_indented(lines, depth, close);
        }

        // SELECT clause
        let columns = self.effective_columns();
        let select_list = if columns.is_empty() {
            "*".to_string()
        } else {
            columns.join(", ")
        };
        push_indented(lines, depth, &format!("SELECT {}", select_list));

        // FROM clause
        push_indented(lines, depth, &format!("FROM {}", self.source));

        // WHERE clause
        if !self.where_predicates.is_empty() {
            let body = render_predicates(&self.where_predicates);
            push_indented(lines, depth, &format!("WHERE {}", body));
        }

        // GROUP BY clause
        if !self.group_by_columns.is_empty() {
            let body = self.group_by_columns.join(", ");
            push_indented(lines, depth, &format!("GROUP BY {}", body));
        }

        // ORDER BY clause
        if !self.order_by_columns.is_empty() {
            let body = self.order_by_columns.join(", ");
            push_indented(lines, depth, &format!("ORDER BY {}", body));
        }

        if let Some(limit) = self.limit_value {
            push_indented(lines, depth, &format!("LIMIT {}", limit));
        }

        if let Some(offset) = self.offset_value {
            push_indented(lines, depth, &format!("OFFSET {}", offset));
        }
    }
}

impl Display for QueryBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.build())
    }
}

/// Push `text` line by line, prefixing each non-blank line with `depth` indents.
/// Fragments containing newlines stay aligned with the enclosing block.
fn push_indented(lines: &mut Vec<String>, depth: usize, text: &str) {
    for line in text.split('\n') {
        if depth == 0 || line.trim().is_empty() {
            lines.push(line.to_string());
        } else {
            lines.push(format!("{}{}", INDENT.repeat(depth), line));
        }
    }
}

fn validate_name(what: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        tracing::debug!(what, "rejecting empty name");
        return Err(Error::invalid_argument(format!("{} must not be empty", what)));
    }
    Ok(())
}
