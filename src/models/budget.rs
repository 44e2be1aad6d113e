//! Monthly budgets and their spending categories
//!
//! A [`Budget`] is keyed by its period and holds an ordered list of [`Tag`]s,
//! each of which may carry nested [`SubTag`]s with their own limits.

use serde::{Deserialize, Serialize};

use super::money::Money;
use super::period::Period;

/// Spending limits defined for one calendar month
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Budget {
    pub year: i32,
    pub month: u32,
    #[serde(default)]
    pub tags: Vec<Tag>,
}

impl Budget {
    pub fn new(year: i32, month: u32, tags: Vec<Tag>) -> Self {
        Self { year, month, tags }
    }

    pub fn period(&self) -> Period {
        Period::new(self.year, self.month)
    }

    pub fn find_tag(&self, tag_id: &str) -> Option<&Tag> {
        self.tags.iter().find(|t| t.id == tag_id)
    }

    pub fn find_tag_mut(&mut self, tag_id: &str) -> Option<&mut Tag> {
        self.tags.iter_mut().find(|t| t.id == tag_id)
    }
}

/// A spending category with its own maximum amount
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tag {
    pub id: String,
    pub name: String,
    pub max_amount: Money,
    #[serde(default)]
    pub sub_tags: Vec<SubTag>,
}

impl Tag {
    pub fn new(id: impl Into<String>, name: impl Into<String>, max_amount: Money) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            max_amount,
            sub_tags: Vec::new(),
        }
    }

    /// Builder-style helper to attach subtags
    pub fn with_sub_tags(mut self, sub_tags: Vec<SubTag>) -> Self {
        self.sub_tags = sub_tags;
        self
    }

    pub fn find_subtag(&self, subtag_id: &str) -> Option<&SubTag> {
        self.sub_tags.iter().find(|s| s.id == subtag_id)
    }

    pub fn find_subtag_mut(&mut self, subtag_id: &str) -> Option<&mut SubTag> {
        self.sub_tags.iter_mut().find(|s| s.id == subtag_id)
    }
}

/// A subcategory nested under a [`Tag`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubTag {
    pub id: String,
    pub name: String,
    pub max_amount: Money,
}

impl SubTag {
    pub fn new(id: impl Into<String>, name: impl Into<String>, max_amount: Money) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            max_amount,
        }
    }
}
