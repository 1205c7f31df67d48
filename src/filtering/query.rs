use crate::constants::DEFAULT_STORY_FIELDS;

/// A single server-side search predicate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterTerm {
    Label(String),
    UpdatedAfter(String),
    UpdatedBefore(String),
    IncludeDone(bool),
}

impl FilterTerm {
    pub fn to_query(&self) -> String {
        match self {
            Self::Label(label) => format!("label:\"{}\"", label),
            Self::UpdatedAfter(date) => format!("updated_after:\"{}\"", date),
            Self::UpdatedBefore(date) => format!("updated_before:\"{}\"", date),
            Self::IncludeDone(include) => format!("includedone:{}", include),
        }
    }
}

/// Query parameters for the stories endpoint.
///
/// Finished stories are always included; the date and label terms only
/// narrow the search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoryQuery {
    labels: Vec<String>,
    updated_after: Option<String>,
    updated_before: Option<String>,
    fields: Vec<String>,
}

impl StoryQuery {
    pub fn new() -> Self {
        Self {
            labels: Vec::new(),
            updated_after: None,
            updated_before: None,
            fields: DEFAULT_STORY_FIELDS.iter().map(|f| f.to_string()).collect(),
        }
    }

    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.labels.push(label.into());
        self
    }

    pub fn labels<I, S>(mut self, labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.labels.extend(labels.into_iter().map(Into::into));
        self
    }

    pub fn updated_after(mut self, date: impl Into<String>) -> Self {
        self.updated_after = Some(date.into());
        self
    }

    pub fn updated_before(mut self, date: impl Into<String>) -> Self {
        self.updated_before = Some(date.into());
        self
    }

    /// Replace the requested field list. An empty list keeps the defaults.
    pub fn fields<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let fields: Vec<String> = fields.into_iter().map(Into::into).collect();
        if !fields.is_empty() {
            self.fields = fields;
        }
        self
    }

    pub fn requested_labels(&self) -> &[String] {
        &self.labels
    }

    pub fn terms(&self) -> Vec<FilterTerm> {
        let mut terms: Vec<FilterTerm> = self
            .labels
            .iter()
            .map(|label| FilterTerm::Label(label.clone()))
            .collect();

        if let Some(date) = &self.updated_after {
            terms.push(FilterTerm::UpdatedAfter(date.clone()));
        }
        if let Some(date) = &self.updated_before {
            terms.push(FilterTerm::UpdatedBefore(date.clone()));
        }

        terms.push(FilterTerm::IncludeDone(true));
        terms
    }

    pub fn filter_expression(&self) -> String {
        self.terms()
            .iter()
            .map(FilterTerm::to_query)
            .collect::<Vec<_>>()
            .join(" ")
    }

    pub fn to_params(&self) -> Vec<(&'static str, String)> {
        vec![
            ("filter", self.filter_expression()),
            ("fields", self.fields.join(",")),
        ]
    }
}

impl Default for StoryQuery {
    fn default() -> Self {
        Self::new()
    }
}
