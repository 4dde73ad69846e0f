use sea_orm::FromJsonQueryResult;
use serde::{Deserialize, Serialize};

/// A single day's devotional content within a plan. Authored upstream and
/// immutable here; content fields may be absent on older records.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct DailyDevotion {
    #[serde(default)]
    pub day_number: Option<i32>,
    #[serde(default)]
    pub verse_reference: Option<String>,
    #[serde(default)]
    pub verse_text: Option<String>,
    #[serde(default)]
    pub reflection: Option<String>,
    #[serde(default)]
    pub journal_prompt: Option<String>,
}

/// Ordered list of plan days, stored as a JSON column.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, FromJsonQueryResult, Default)]
pub struct PlanDays(pub Vec<DailyDevotion>);

impl PlanDays {
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The content for a 1-based day index, when it is in range.
    pub fn day(&self, day_number: i32) -> Option<&DailyDevotion> {
        if day_number < 1 {
            return None;
        }
        self.0.get(day_number as usize - 1)
    }
}
