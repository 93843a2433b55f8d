use iso8601_timestamp::Timestamp;

/// What a one-time code was issued for
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum CodePurpose {
    Registration,
}

impl CodePurpose {
    pub fn as_str(&self) -> &'static str {
        match self {
            CodePurpose::Registration => "registration",
        }
    }
}

/// Pending verification challenge
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct OneTimeCode {
    /// Unique Id
    #[serde(rename = "_id")]
    pub id: String,

    /// Account this code belongs to
    pub account_id: String,

    /// What the code proves once matched
    pub purpose: CodePurpose,

    /// Argon2 hash of the 4-digit code
    pub code_hash: String,

    /// Time at which this code was issued
    pub created_at: Timestamp,

    /// Time at which this code stops being accepted
    pub expires_at: Timestamp,
}
