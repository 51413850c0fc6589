use crate::Param;

/// One `AND`-joined term of a WHERE clause with the parameters its
/// placeholders bind.
#[derive(Debug)]
pub(super) struct Predicate {
    sql: String,
    params: Vec<Param>,

    /// The optional filter column this term belongs to
    filter: Option<String>,
}

/// A WHERE clause under construction.
///
/// Terms belonging to an optional filter can be left out when rendering,
/// which drops both their SQL text and their parameters.
#[derive(Debug, Default)]
pub(super) struct Conjunction {
    terms: Vec<Predicate>,
}

impl Conjunction {
    /// A term without placeholders.
    pub(super) fn push(&mut self, sql: String) {
        self.terms.push(Predicate {
            sql,
            params: vec![],
            filter: None,
        });
    }

    /// A term with a single placeholder.
    pub(super) fn push_param(&mut self, sql: String, param: Param) {
        self.terms.push(Predicate {
            sql,
            params: vec![param],
            filter: None,
        });
    }

    /// A term that only appears in variants where `column` is filtered on.
    pub(super) fn push_filter(&mut self, column: &str, sql: String, param: Param) {
        self.terms.push(Predicate {
            sql,
            params: vec![param],
            filter: Some(column.to_string()),
        });
    }

    pub(super) fn has_filter(&self, column: &str) -> bool {
        self.terms
            .iter()
            .any(|term| term.filter.as_deref() == Some(column))
    }

    /// Renders the clause keeping the optional terms whose column `keep`
    /// accepts. Returns an empty string when no term remains.
    pub(super) fn render(&self, keep: impl Fn(&str) -> bool) -> (String, Vec<Param>) {
        let mut sql = String::new();
        let mut params = vec![];

        for term in &self.terms {
            if term.filter.as_deref().is_some_and(|column| !keep(column)) {
                continue;
            }

            if !sql.is_empty() {
                sql.push_str(" AND ");
            }
            sql.push_str(&term.sql);
            params.extend(term.params.iter().cloned());
        }

        (sql, params)
    }

    pub(super) fn render_all(&self) -> (String, Vec<Param>) {
        self.render(|_| true)
    }
}
