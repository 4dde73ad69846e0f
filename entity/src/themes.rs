use sea_orm::FromJsonQueryResult;
use serde::{Deserialize, Serialize};

/// Ordered list of conversation themes extracted from a customer's messages,
/// stored as a JSON column. Order reflects extraction recency and is carried
/// through to personalization context unchanged.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, FromJsonQueryResult, Default)]
pub struct Themes(pub Vec<String>);

impl Themes {
    pub fn into_vec(self) -> Vec<String> {
        self.0
    }
}

impl From<Vec<String>> for Themes {
    fn from(themes: Vec<String>) -> Self {
        Themes(themes)
    }
}
