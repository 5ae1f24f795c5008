//! Custom audience payloads
//!
//! Records added to or removed from a custom audience are never sent in the
//! clear: each one is SHA-256 hashed and sent as lowercase hex, in a single
//! batch session.
//!
//! See: <https://developers.facebook.com/docs/marketing-api/audiences/guides/custom-audiences>

use serde::{Deserialize, Serialize};
use serde_json::Value;
use sha2::{Digest, Sha256};
use uuid::Uuid;

use crate::{GraphError, Result};

/// Default audience subtype
pub const DEFAULT_SUBTYPE: &str = "CUSTOM";

/// Default source of the customer data
pub const DEFAULT_CUSTOMER_FILE_SOURCE: &str = "USER_PROVIDED_ONLY";

/// Hashes one record as lowercase hex SHA-256
pub fn hash_record(record: &str) -> String {
    hex::encode(Sha256::digest(record.as_bytes()))
}

/// Hashes every record, keeping order
pub fn hash_records<I, S>(records: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    records
        .into_iter()
        .map(|record| hash_record(record.as_ref()))
        .collect()
}

/// Random seven-digit batch session id
pub fn new_session_id() -> u64 {
    let mut id = Uuid::new_v4().as_u128();
    while id >= 10_000_000 {
        id /= 10;
    }
    id as u64
}

/// Upload session of an audience users batch
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AudienceSession {
    pub session_id: u64,
    pub batch_seq: u32,
    pub last_batch_flag: bool,
    pub estimated_num_total: usize,
}

/// Hashed records and the schema describing them
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AudienceData {
    /// E.g. `EMAIL`, `PHONE`
    pub schema: String,
    pub data: Vec<String>,
}

/// Body of `POST`/`DELETE /{audience_id}/users`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AudiencePayload {
    pub session: AudienceSession,
    pub payload: AudienceData,
}

impl AudiencePayload {
    /// Builds a single-batch payload, hashing `records`
    pub fn new<I, S>(schema: impl Into<String>, records: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let data = hash_records(records);
        Self {
            session: AudienceSession {
                session_id: new_session_id(),
                batch_seq: 1,
                last_batch_flag: true,
                estimated_num_total: data.len(),
            },
            payload: AudienceData {
                schema: schema.into(),
                data,
            },
        }
    }
}

/// Hashes the records of a raw audience users body
///
/// `body` must carry `payload.schema` and a `payload.data` array of strings.
/// A `session` set by the caller is kept, otherwise a single-batch session
/// is added.
pub fn hash_body(body: &Value) -> Result<Value> {
    let invalid = |reason: &str| GraphError::InvalidRequest(format!("audience body {reason}"));

    let schema = body
        .pointer("/payload/schema")
        .and_then(Value::as_str)
        .ok_or_else(|| invalid("needs a payload.schema string"))?;
    let records = body
        .pointer("/payload/data")
        .and_then(Value::as_array)
        .ok_or_else(|| invalid("needs a payload.data array"))?
        .iter()
        .map(|record| {
            record
                .as_str()
                .ok_or_else(|| invalid("records must be strings"))
        })
        .collect::<Result<Vec<&str>>>()?;

    let mut hashed = serde_json::to_value(AudiencePayload::new(schema, records))
        .map_err(|e| invalid(&format!("could not be serialized: {e}")))?;
    if let (Some(session), Some(object)) = (body.get("session"), hashed.as_object_mut()) {
        object.insert("session".to_string(), session.clone());
    }
    Ok(hashed)
}

/// Body of `POST /{account_id}/customaudiences`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomAudienceSpec {
    pub name: String,
    pub description: String,
    pub subtype: String,
    /// `USER_PROVIDED_ONLY`, `PARTNER_PROVIDED_ONLY` or
    /// `BOTH_USER_AND_PARTNER_PROVIDED`
    pub customer_file_source: String,
}

impl CustomAudienceSpec {
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            subtype: DEFAULT_SUBTYPE.to_string(),
            customer_file_source: DEFAULT_CUSTOMER_FILE_SOURCE.to_string(),
        }
    }

    pub fn with_subtype(mut self, subtype: impl Into<String>) -> Self {
        self.subtype = subtype.into();
        self
    }

    pub fn with_customer_file_source(mut self, source: impl Into<String>) -> Self {
        self.customer_file_source = source.into();
        self
    }
}
