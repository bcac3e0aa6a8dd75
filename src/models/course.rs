//! Course data structures: input stubs, parsed detail attributes, and the
//! merged output record.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::Result;

/// Canonical output columns, in the exact order of the published dataset.
pub const OUTPUT_FIELDS: [&str; 26] = [
    "index",
    "title",
    "university",
    "language",
    "url",
    "weeks_max",
    "weeks_min",
    "hours_min",
    "hours_max",
    "start_date",
    "end_date",
    "credit_units",
    "certificate",
    "competence",
    "course_format",
    "directions",
    "intro",
    "links",
    "result_abilities",
    "about",
    "syllabus",
    "result_knowledge",
    "result_skills",
    "results",
    "specifications",
    "custom_info",
];

/// One catalog row as produced by the external list crawler.
///
/// All values are passthrough strings; only `url` is interpreted.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct CourseStub {
    /// Position in the catalog listing
    #[serde(default)]
    pub index: String,

    /// Course title
    #[serde(default)]
    pub title: String,

    /// Offering university
    #[serde(default)]
    pub university: String,

    /// Absolute URL of the course detail page
    #[serde(default)]
    pub url: String,

    /// Enrollment start date
    #[serde(default)]
    pub start_date: String,

    /// Enrollment end date
    #[serde(default)]
    pub end_date: String,
}

impl CourseStub {
    /// Check that the stub carries a fetchable URL.
    pub fn validate(&self) -> Result<()> {
        if self.url.trim().is_empty() {
            return Err(crate::error::AppError::validation("course url is empty"));
        }
        Url::parse(&self.url)?;
        Ok(())
    }
}

/// Attributes extracted from one course detail page.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CourseDetail {
    /// Leading description block of the details panel
    pub intro: Option<String>,

    /// Course length in weeks, (min, max)
    pub weeks: Option<(u32, u32)>,

    /// Weekly workload in hours, (min, max)
    pub hours: Option<(u32, u32)>,

    /// Credit units granted
    pub credit_units: Option<u32>,

    /// Two-letter language code; empty string for unrecognized languages
    pub language: Option<String>,

    /// Whether the page advertises a certificate
    pub certificate: bool,

    /// Subject-group ids referenced by the page, in page order.
    /// `Some(vec![])` means the block was present but empty.
    pub directions: Option<Vec<u32>>,

    /// Dynamic `custom_fieldN_body` blocks, keyed by their label
    pub custom_info: BTreeMap<String, String>,

    /// Remaining labeled blocks (syllabus, competence, ...), copied verbatim
    pub sections: BTreeMap<String, String>,
}

/// A course stub enriched with its detail-page attributes.
///
/// Detail fields take precedence over stub fields on name collision, and a
/// verbatim details-panel section takes precedence over both.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CourseRecord {
    pub stub: CourseStub,
    pub detail: CourseDetail,
}

impl CourseRecord {
    /// Merge detail attributes over a stub.
    pub fn merge(stub: CourseStub, detail: CourseDetail) -> Self {
        Self { stub, detail }
    }

    /// Render the record as one row in [`OUTPUT_FIELDS`] order.
    pub fn to_row(&self) -> Vec<String> {
        OUTPUT_FIELDS.iter().map(|name| self.field(name)).collect()
    }

    /// Resolve one output column by name; unknown or absent fields are empty.
    pub fn field(&self, name: &str) -> String {
        if let Some(text) = self.detail.sections.get(name) {
            return text.clone();
        }

        match name {
            "index" => self.stub.index.clone(),
            "title" => self.stub.title.clone(),
            "university" => self.stub.university.clone(),
            "url" => self.stub.url.clone(),
            "start_date" => self.stub.start_date.clone(),
            "end_date" => self.stub.end_date.clone(),
            "language" => self.detail.language.clone().unwrap_or_default(),
            "weeks_min" => render_opt(self.detail.weeks.map(|(min, _)| min)),
            "weeks_max" => render_opt(self.detail.weeks.map(|(_, max)| max)),
            "hours_min" => render_opt(self.detail.hours.map(|(min, _)| min)),
            "hours_max" => render_opt(self.detail.hours.map(|(_, max)| max)),
            "credit_units" => render_opt(self.detail.credit_units),
            "certificate" => {
                if self.detail.certificate {
                    "1".to_string()
                } else {
                    String::new()
                }
            }
            "directions" => self
                .detail
                .directions
                .as_ref()
                .map(|ids| serde_json::to_string(ids).unwrap_or_default())
                .unwrap_or_default(),
            "intro" => self.detail.intro.clone().unwrap_or_default(),
            "custom_info" => {
                if self.detail.custom_info.is_empty() {
                    String::new()
                } else {
                    serde_json::to_string(&self.detail.custom_info).unwrap_or_default()
                }
            }
            _ => String::new(),
        }
    }
}

fn render_opt(value: Option<u32>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}
