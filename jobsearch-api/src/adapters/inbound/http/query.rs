//! Query-string parameters of `GET /search` and their validation.

use serde::{Deserialize, Serialize};

use crate::domain::models::{RegionFilter, SearchQuery};

const MAX_VALUES_PER_FIELD: usize = 50;
const MAX_REGION_NAME_LEN: usize = 20;
const MAX_WORK_DAY_LEN: usize = 20;
const MAX_TYPE_LEN: usize = 10;
const MAX_EDUCATION_LEN: usize = 20;
const MAX_SEARCH_LEN: usize = 100;

/// Raw parameters; list fields may be repeated (`city=a&city=b`).
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct SearchParams {
    pub city: Vec<String>,
    pub district: Vec<String>,
    pub town: Vec<String>,
    pub work_day: Vec<String>,
    pub posting_type: Vec<String>,
    pub employment_type: Vec<String>,
    pub education: Option<String>,
    pub search: Option<String>,
}

/// A single rejected input value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

#[derive(Debug, Default)]
struct Collector {
    errors: Vec<FieldError>,
}

impl Collector {
    fn list(&mut self, field: &str, values: Vec<String>, max_len: usize) -> Vec<String> {
        let mut cleaned: Vec<String> = Vec::new();
        for value in values {
            if let Some(value) = self.value(field, value, max_len) {
                if !cleaned.contains(&value) {
                    cleaned.push(value);
                }
            }
        }

        if cleaned.len() > MAX_VALUES_PER_FIELD {
            self.errors.push(FieldError::new(
                field,
                format!("at most {MAX_VALUES_PER_FIELD} values are allowed"),
            ));
        }
        cleaned
    }

    /// Trims `value`; blank values are dropped, not rejected.
    fn value(&mut self, field: &str, value: String, max_len: usize) -> Option<String> {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return None;
        }
        if trimmed.chars().count() > max_len {
            self.errors.push(FieldError::new(
                field,
                format!("must be at most {max_len} characters"),
            ));
            return None;
        }
        if trimmed.chars().any(char::is_control) {
            self.errors
                .push(FieldError::new(field, "must not contain control characters"));
            return None;
        }
        // Undecodable percent-escapes arrive as U+FFFD.
        if trimmed.contains(char::REPLACEMENT_CHARACTER) {
            self.errors.push(FieldError::new(field, "must be valid UTF-8"));
            return None;
        }
        Some(trimmed.to_string())
    }
}

impl SearchParams {
    /// Normalizes the parameters into a [`SearchQuery`], or reports every
    /// offending field at once.
    pub fn validate(self) -> Result<SearchQuery, Vec<FieldError>> {
        let mut collector = Collector::default();

        let region = RegionFilter {
            cities: collector.list("city", self.city, MAX_REGION_NAME_LEN),
            districts: collector.list("district", self.district, MAX_REGION_NAME_LEN),
            towns: collector.list("town", self.town, MAX_REGION_NAME_LEN),
        };
        let query = SearchQuery {
            region,
            work_days: collector.list("work_day", self.work_day, MAX_WORK_DAY_LEN),
            posting_types: collector.list("posting_type", self.posting_type, MAX_TYPE_LEN),
            employment_types: collector.list(
                "employment_type",
                self.employment_type,
                MAX_TYPE_LEN,
            ),
            education: self
                .education
                .and_then(|value| collector.value("education", value, MAX_EDUCATION_LEN)),
            text: self
                .search
                .and_then(|value| collector.value("search", value, MAX_SEARCH_LEN)),
        };

        if collector.errors.is_empty() {
            Ok(query)
        } else {
            Err(collector.errors)
        }
    }
}
