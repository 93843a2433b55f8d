use super::AccountKind;

/// Inline sign-up fields accepted when a first-time user requests a code
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct SignupFields {
    pub name: String,
    pub phone_number: String,
    pub address: String,
}

/// Outcome of requesting a verification code
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct PendingVerification {
    /// Account the code was issued for
    pub account_id: String,

    /// Where the code was sent
    pub email: String,

    /// Which collection the account was resolved in
    pub kind: AccountKind,

    /// Plaintext code, present only when no mail relay is configured
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
}

/// Outcome of a successful code submission
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct CodeVerification {
    pub account_id: String,

    pub kind: AccountKind,

    /// Users may be logged straight in; agents stay gated on approval
    pub auto_login: bool,
}
