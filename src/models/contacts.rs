use chrono::{DateTime, Utc};
use mongodb::bson::{
    oid::ObjectId,
    serde_helpers::{chrono_datetime_as_bson_datetime, serialize_object_id_as_hex_string},
};
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};

/// Read state of a contact message. Moves one way: `unread -> read`.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, Display, EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum ContactStatus {
    #[default]
    Unread,
    Read,
}

impl ContactStatus {
    /// Staying in the same state is always allowed.
    pub fn can_transition_to(self, next: ContactStatus) -> bool {
        match (self, next) {
            (current, next) if current == next => true,
            (ContactStatus::Unread, ContactStatus::Read) => true,
            _ => false,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactMessage {
    #[serde(rename = "_id", serialize_with = "serialize_object_id_as_hex_string")]
    pub id: ObjectId,
    pub name: String,
    pub email: String,
    pub message: String,
    #[serde(default)]
    pub status: ContactStatus,
    #[serde(deserialize_with = "chrono_datetime_as_bson_datetime::deserialize")]
    pub created_at: DateTime<Utc>,
    #[serde(deserialize_with = "chrono_datetime_as_bson_datetime::deserialize")]
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewContact {
    pub name: String,
    pub email: String,
    pub message: String,
    pub status: ContactStatus,
}

/// Public contact form payload. Fields are optional so that missing ones
/// surface as validation errors rather than body rejections.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SubmitContactRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub message: Option<String>,
}

/// Fields an update may overwrite. Anything else in the body is ignored.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateContactRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<ContactStatus>,
}

impl UpdateContactRequest {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.email.is_none() && self.message.is_none() && self.status.is_none()
    }
}
