//! Log a user in
//! POST /auth/login
use registrar::models::SessionDescriptor;
use registrar::{Registrar, Result};
use rocket::serde::json::Json;
use rocket::State;

/// # Login Data
#[derive(Serialize, Deserialize)]
pub struct DataLogin {
    /// Email of a verified user account
    pub email: String,
    /// Password; accepted but not checked for user accounts
    #[serde(default)]
    pub password: String,
}

/// # Login
///
/// Log a verified user in by email.
#[post("/auth/login", data = "<data>")]
pub async fn login(
    registrar: &State<Registrar>,
    data: Json<DataLogin>,
) -> Result<Json<SessionDescriptor>> {
    Ok(Json(registrar.user_login(&data.email, &data.password).await?))
}
