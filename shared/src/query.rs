//! Record query model, rendered as the URL query pairs the gateway
//! forwards verbatim to the backend (`select`, `eq.`, `in.(...)`,
//! `gte.`/`lte.`, `offset`, `limit`).

/// One column predicate.
#[derive(Debug, Clone, PartialEq)]
pub enum Predicate {
    /// `field=eq.value`
    Eq(String),
    /// `field=in.(a,b,c)`
    In(Vec<String>),
    /// `field=gte.from&field=lte.to`
    Between { from: String, to: String },
}

/// Query against one backend table.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecordQuery {
    table: String,
    select: Vec<String>,
    predicates: Vec<(String, Predicate)>,
    offset: Option<u64>,
    limit: Option<u64>,
}

impl RecordQuery {
    pub fn table(name: impl Into<String>) -> Self {
        Self {
            table: name.into(),
            ..Default::default()
        }
    }

    /// Set the column projection
    pub fn select<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.select = fields.into_iter().map(Into::into).collect();
        self
    }

    /// Add an equality predicate
    pub fn eq(mut self, field: impl Into<String>, value: impl Into<String>) -> Self {
        self.predicates.push((field.into(), Predicate::Eq(value.into())));
        self
    }

    /// Add a membership predicate
    pub fn in_list<I, S>(mut self, field: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let values = values.into_iter().map(Into::into).collect();
        self.predicates.push((field.into(), Predicate::In(values)));
        self
    }

    /// Add an inclusive range predicate
    pub fn between(mut self, field: impl Into<String>, from: impl ToString, to: impl ToString) -> Self {
        self.predicates.push((
            field.into(),
            Predicate::Between {
                from: from.to_string(),
                to: to.to_string(),
            },
        ));
        self
    }

    pub fn offset(mut self, offset: u64) -> Self {
        self.offset = Some(offset);
        self
    }

    pub fn limit(mut self, limit: u64) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn table_name(&self) -> &str {
        &self.table
    }

    /// Render the URL query pairs. A range predicate emits two pairs on
    /// the same field.
    pub fn to_query_pairs(&self) -> Vec<(String, String)> {
        let mut pairs = Vec::new();

        if !self.select.is_empty() {
            pairs.push(("select".to_string(), self.select.join(",")));
        }

        for (field, predicate) in &self.predicates {
            match predicate {
                Predicate::Eq(value) => {
                    pairs.push((field.clone(), format!("eq.{}", value)));
                }
                Predicate::In(values) => {
                    pairs.push((field.clone(), format!("in.({})", values.join(","))));
                }
                Predicate::Between { from, to } => {
                    pairs.push((field.clone(), format!("gte.{}", from)));
                    pairs.push((field.clone(), format!("lte.{}", to)));
                }
            }
        }

        if let Some(offset) = self.offset {
            pairs.push(("offset".to_string(), offset.to_string()));
        }
        if let Some(limit) = self.limit {
            pairs.push(("limit".to_string(), limit.to_string()));
        }

        pairs
    }
}
