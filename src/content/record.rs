//! Report, model and slide records

use chrono::NaiveDate;
use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize};

/// Accept identifiers written either as strings or as bare numbers
fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::{self, Visitor};
    use std::fmt;

    struct StringOrNumber;

    impl<'de> Visitor<'de> for StringOrNumber {
        type Value = String;

        fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
            formatter.write_str("a string or a number")
        }

        fn visit_str<E>(self, value: &str) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(value.to_string())
        }

        fn visit_string<E>(self, value: String) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(value)
        }

        fn visit_i64<E>(self, value: i64) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(value.to_string())
        }

        fn visit_u64<E>(self, value: u64) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(value.to_string())
        }

        fn visit_f64<E>(self, value: f64) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(value.to_string())
        }
    }

    deserializer.deserialize_any(StringOrNumber)
}

/// Front-matter of a research report.
///
/// Only `id` is required; the other recognized keys fall back to empty
/// values so that a sparse document still lists.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportFrontmatter {
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub publish_date: String,
    #[serde(default)]
    pub author: String,
    #[serde(default)]
    pub research_type: String,
    #[serde(default)]
    pub summary: String,
    /// Reference to an external slide deck; presence enables deck resolution
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub slides_source: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub layout: Option<String>,

    /// Slides written directly in the front-matter. Never part of list output.
    #[serde(default, rename = "slides", skip_serializing)]
    inline_slides: Vec<Slide>,

    /// Additional custom fields
    #[serde(flatten)]
    pub extra: IndexMap<String, serde_yaml::Value>,
}

impl ReportFrontmatter {
    /// Create front-matter with only the identifying fields set
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            publish_date: String::new(),
            author: String::new(),
            research_type: String::new(),
            summary: String::new(),
            slides_source: None,
            layout: None,
            inline_slides: Vec::new(),
            extra: IndexMap::new(),
        }
    }

    /// Slides embedded in the document itself
    pub fn inline_slides(&self) -> &[Slide] {
        &self.inline_slides
    }

    pub fn publish_date(&self) -> Option<NaiveDate> {
        parse_publish_date(&self.publish_date)
    }
}

/// Front-matter of a financial model
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModelFrontmatter {
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub publish_date: String,
    #[serde(default)]
    pub author: String,
    #[serde(default)]
    pub model_type: String,
    #[serde(default)]
    pub summary: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub screenshots: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub layout: Option<String>,

    /// Additional custom fields
    #[serde(flatten)]
    pub extra: IndexMap<String, serde_yaml::Value>,
}

impl ModelFrontmatter {
    pub fn publish_date(&self) -> Option<NaiveDate> {
        parse_publish_date(&self.publish_date)
    }
}

/// One slide of a report presentation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Slide {
    pub title: String,
    /// Free text; bullet points are separated by line breaks
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    /// "title", "content", "chart", ...
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chart_data: Option<ChartData>,
}

impl Slide {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            content: None,
            image_url: None,
            kind: None,
            chart_data: None,
        }
    }

    /// Content split into its bullet lines
    pub fn bullets(&self) -> Vec<&str> {
        self.content
            .as_deref()
            .map(|c| {
                c.lines()
                    .map(|line| line.trim().trim_start_matches('•').trim())
                    .filter(|line| !line.is_empty())
                    .collect()
            })
            .unwrap_or_default()
    }
}

/// Chart series of a slide; values are percentages
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartData {
    pub labels: Vec<String>,
    pub values: Vec<f64>,
}

impl ChartData {
    /// Labels and values line up one to one
    pub fn is_consistent(&self) -> bool {
        self.labels.len() == self.values.len()
    }

    /// Paired (label, value) points; extra entries on either side are dropped
    pub fn points(&self) -> impl Iterator<Item = (&str, f64)> {
        self.labels
            .iter()
            .map(String::as_str)
            .zip(self.values.iter().copied())
    }
}

/// A fully resolved report: front-matter, rendered body and slide deck
#[derive(Debug, Clone, Serialize)]
pub struct ReportRecord {
    #[serde(flatten)]
    pub meta: ReportFrontmatter,
    /// Rendered HTML body
    pub content: String,
    pub slides: Vec<Slide>,
}

/// A fully resolved model: front-matter and rendered body
#[derive(Debug, Clone, Serialize)]
pub struct ModelRecord {
    #[serde(flatten)]
    pub meta: ModelFrontmatter,
    /// Rendered HTML body
    pub content: String,
}

fn parse_publish_date(s: &str) -> Option<NaiveDate> {
    let s = s.trim();
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .or_else(|_| NaiveDate::parse_from_str(s, "%Y/%m/%d"))
        .ok()
        .or_else(|| {
            chrono::DateTime::parse_from_rfc3339(s)
                .ok()
                .map(|dt| dt.date_naive())
        })
}
