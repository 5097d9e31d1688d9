use chrono::{DateTime, SecondsFormat, Utc};
use mongodb::bson::{oid::ObjectId, serde_helpers::chrono_datetime_as_bson_datetime, Bson, Document};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Field that never leaves the service.
pub const PASSWORD_FIELD: &str = "password";

/// A stored user, password included. Never serialize this into a response;
/// reads go through [`PublicUser`].
///
/// User documents are provisioned outside this service, so only the id and
/// timestamps are guaranteed.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
    #[serde(deserialize_with = "chrono_datetime_as_bson_datetime::deserialize")]
    pub created_at: DateTime<Utc>,
    #[serde(deserialize_with = "chrono_datetime_as_bson_datetime::deserialize")]
    pub updated_at: DateTime<Utc>,
}

/// User as returned by the API: every stored field except the password.
///
/// Built from the raw document so that users with extra or missing fields
/// read back as stored. Ids render as hex strings and timestamps as RFC 3339.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct PublicUser(Map<String, Value>);

impl PublicUser {
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.0.get(field)
    }
}

impl From<Document> for PublicUser {
    fn from(mut document: Document) -> Self {
        document.remove(PASSWORD_FIELD);
        Self(
            document
                .into_iter()
                .map(|(key, value)| (key, bson_to_json(value)))
                .collect(),
        )
    }
}

fn bson_to_json(value: Bson) -> Value {
    match value {
        Bson::ObjectId(id) => Value::String(id.to_hex()),
        Bson::DateTime(at) => {
            Value::String(at.to_chrono().to_rfc3339_opts(SecondsFormat::Millis, true))
        }
        Bson::Document(document) => Value::Object(
            document
                .into_iter()
                .map(|(key, value)| (key, bson_to_json(value)))
                .collect(),
        ),
        Bson::Array(values) => Value::Array(values.into_iter().map(bson_to_json).collect()),
        other => other.into_relaxed_extjson(),
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewUser {
    pub username: String,
    pub email: String,
    pub password: String,
}

/// Fields a user may overwrite on their own record.
///
/// The caller identifier (`userId`) travels in the same body but is checked
/// before this is parsed and is never stored.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateUserRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
}
