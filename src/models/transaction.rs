//! Transaction model
//!
//! A transaction is a dated amount attributed to a tag and, optionally, one of
//! that tag's subtags. Tag references are plain ids and are never checked
//! against the budgets.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::money::Money;
use super::period::Period;

/// A single recorded income or expense entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub id: String,
    pub year: i32,
    pub month: u32,
    pub day: u32,
    /// Positive amounts are spending
    pub amount: Money,
    pub description: String,
    pub tag_id: String,
    #[serde(default)]
    pub subtag_id: Option<String>,
}

impl Transaction {
    pub fn period(&self) -> Period {
        Period::new(self.year, self.month)
    }

    /// Date rendered as `YYYY-MM-DD`
    pub fn date_string(&self) -> String {
        format!("{:04}-{:02}-{:02}", self.year, self.month, self.day)
    }

    /// `tag` or `tag/subtag`
    pub fn tag_path(&self) -> String {
        match &self.subtag_id {
            Some(sub) => format!("{}/{}", self.tag_id, sub),
            None => self.tag_id.clone(),
        }
    }

    /// Match on tag id; with `subtag_id` given, the subtag must match exactly
    pub fn matches_tag(&self, tag_id: &str, subtag_id: Option<&str>) -> bool {
        if self.tag_id != tag_id {
            return false;
        }
        match subtag_id {
            Some(sub) => self.subtag_id.as_deref() == Some(sub),
            None => true,
        }
    }
}

impl fmt::Display for Transaction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {} [{}]",
            self.date_string(),
            self.amount,
            self.description,
            self.tag_path()
        )
    }
}

/// Fields of a transaction before it has been stored
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTransaction {
    pub id: String,
    pub year: i32,
    pub month: u32,
    pub day: u32,
    pub amount: Money,
    pub description: String,
    pub tag_id: String,
    pub subtag_id: Option<String>,
}

impl From<NewTransaction> for Transaction {
    fn from(new: NewTransaction) -> Self {
        Self {
            id: new.id,
            year: new.year,
            month: new.month,
            day: new.day,
            amount: new.amount,
            description: new.description,
            tag_id: new.tag_id,
            subtag_id: new.subtag_id,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(subtag: Option<&str>) -> Transaction {
        Transaction {
            id: "t1".into(),
            year: 2024,
            month: 6,
            day: 5,
            amount: Money::from_cents(4250),
            description: "lunch".into(),
            tag_id: "food".into(),
            subtag_id: subtag.map(String::from),
        }
    }

    #[test]
    fn test_date_and_path() {
        let txn = sample(Some("dining"));
        assert_eq!(txn.date_string(), "2024-06-05");
        assert_eq!(txn.tag_path(), "food/dining");
        assert_eq!(sample(None).tag_path(), "food");
    }

    #[test]
    fn test_matches_tag() {
        let plain = sample(None);
        let dining = sample(Some("dining"));

        assert!(plain.matches_tag("food", None));
        assert!(dining.matches_tag("food", None));
        assert!(dining.matches_tag("food", Some("dining")));
        assert!(!plain.matches_tag("food", Some("dining")));
        assert!(!dining.matches_tag("rent", None));
    }

    #[test]
    fn test_json_shape() {
        let value = serde_json::to_value(sample(None)).unwrap();
        assert_eq!(value["tagId"], "food");
        assert!(value["subtagId"].is_null());
        assert_eq!(value["amount"], 42.5);

        let json = r#"{"id":"t2","year":2024,"month":6,"day":1,"amount":10,
                       "description":"bus","tagId":"transport"}"#;
        let txn: Transaction = serde_json::from_str(json).unwrap();
        assert_eq!(txn.subtag_id, None);
    }
}
