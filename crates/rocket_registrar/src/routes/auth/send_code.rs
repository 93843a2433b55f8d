//! Request an email verification code
//! POST /auth/send_code
use registrar::models::{AccountKind, PendingVerification, SignupFields};
use registrar::{Registrar, Result};
use rocket::serde::json::Json;
use rocket::State;

/// # Code Request Data
#[derive(Serialize, Deserialize)]
pub struct DataSendCode {
    /// Email to verify
    pub email: String,
    /// Known account id, if the client already holds one
    pub account_id: Option<String>,
    /// Which collection to resolve the email in
    #[serde(default)]
    pub kind: AccountKind,
    /// Inline sign-up fields for first-time users
    pub signup: Option<SignupFields>,
}

#[derive(Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ResponseSendCode {
    Pending(PendingVerification),
}

/// # Send Code
///
/// Issue a fresh verification code and email it to the account.
#[post("/auth/send_code", data = "<data>")]
pub async fn send_code(
    registrar: &State<Registrar>,
    data: Json<DataSendCode>,
) -> Result<Json<ResponseSendCode>> {
    let data = data.into_inner();

    let pending = registrar
        .request_code(
            &data.email,
            data.account_id.as_deref(),
            data.kind,
            data.signup,
        )
        .await?;

    Ok(Json(ResponseSendCode::Pending(pending)))
}
