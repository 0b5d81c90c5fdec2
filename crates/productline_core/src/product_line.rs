use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::Timestamp;

pub type ProductLineId = String;

/// A recurring imagery-processing configuration that accumulates jobs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductLine {
    pub id: ProductLineId,
    pub name: String,
    pub created_on: Timestamp,
    pub starts_on: Timestamp,
    pub expires_on: Option<Timestamp>,
    pub algorithm_name: String,
    /// Maximum accepted cloud cover, in percent.
    pub image_cloud_cover: f64,
    pub spatial_filter_name: Option<String>,
    pub owner: String,
    pub geometry: Option<Value>,
}

impl ProductLine {
    pub fn new(id: impl Into<ProductLineId>, name: impl Into<String>, created_on: Timestamp) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            created_on,
            starts_on: created_on,
            expires_on: None,
            algorithm_name: String::new(),
            image_cloud_cover: 0.0,
            spatial_filter_name: None,
            owner: String::new(),
            geometry: None,
        }
    }
}

pub(crate) fn format_date(value: Timestamp) -> String {
    value.format("%m/%d/%Y").to_string()
}

/// Uppercases the first letter of every whitespace-separated word.
pub(crate) fn title_case(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut at_word_start = true;
    for ch in input.chars() {
        if at_word_start && ch.is_ascii_lowercase() {
            out.push(ch.to_ascii_uppercase());
        } else {
            out.push(ch);
        }
        at_word_start = ch.is_whitespace();
    }
    out
}
