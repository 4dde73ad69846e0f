//! Inbound lifecycle event payloads.
//!
//! Every field below is optional at the serde level: upstream publishers have
//! historically omitted fields, and the drop-malformed policy lives in the
//! handlers rather than in deserialization. Only a payload that is not valid
//! JSON for the envelope shape fails to deserialize.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Event published by the registration service when a customer completes
/// sign-up.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerRegistered {
    #[serde(default)]
    pub event_id: Option<String>,
    #[serde(default)]
    pub event_type: Option<String>,
    #[serde(default)]
    pub event_time: Option<DateTime<Utc>>,
    #[serde(default)]
    pub subject: Option<String>,
    #[serde(default)]
    pub data: Option<CustomerRegisteredData>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerRegisteredData {
    #[serde(default)]
    pub customer_id: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub registration_stage: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

/// Event published by the subscriptions service once payment succeeds and the
/// subscription becomes active.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubscriptionActivated {
    #[serde(default)]
    pub event_id: Option<String>,
    #[serde(default)]
    pub event_type: Option<String>,
    #[serde(default)]
    pub event_time: Option<DateTime<Utc>>,
    #[serde(default)]
    pub subject: Option<String>,
    #[serde(default)]
    pub data: Option<SubscriptionActivatedData>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubscriptionActivatedData {
    #[serde(default)]
    pub customer_id: Option<String>,
    #[serde(default)]
    pub phone_number: Option<String>,
    #[serde(default)]
    pub subscription_id: Option<String>,
    #[serde(default)]
    pub stripe_price_id: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub activated_at: Option<DateTime<Utc>>,
}
