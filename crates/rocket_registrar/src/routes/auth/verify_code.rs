//! Submit an email verification code
//! POST /auth/verify_code
use registrar::models::{AccountKind, CodeVerification};
use registrar::{Registrar, Result};
use rocket::serde::json::Json;
use rocket::State;

/// # Code Submission Data
#[derive(Serialize, Deserialize)]
pub struct DataVerifyCode {
    /// Account the code was issued for
    pub account_id: String,
    /// The 4-digit code as entered
    pub code: String,
    /// Which collection the account lives in
    #[serde(default)]
    pub kind: AccountKind,
}

#[derive(Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ResponseVerifyCode {
    Verified(CodeVerification),
}

/// # Verify Code
///
/// Match a submitted code against the live one for the account.
#[post("/auth/verify_code", data = "<data>")]
pub async fn verify_code(
    registrar: &State<Registrar>,
    data: Json<DataVerifyCode>,
) -> Result<Json<ResponseVerifyCode>> {
    let data = data.into_inner();

    let outcome = registrar
        .verify_code(&data.account_id, &data.code, data.kind)
        .await?;

    Ok(Json(ResponseVerifyCode::Verified(outcome)))
}
