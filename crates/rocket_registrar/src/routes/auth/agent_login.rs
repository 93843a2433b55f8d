//! Log an agent in
//! POST /auth/agent_login
use registrar::models::SessionDescriptor;
use registrar::{Registrar, Result};
use rocket::serde::json::Json;
use rocket::State;

/// # Agent Login Data
#[derive(Serialize, Deserialize)]
pub struct DataAgentLogin {
    /// Email of an approved agent account
    pub email: String,
    /// Password
    pub password: String,
}

/// # Agent Login
///
/// Log an approved agent in by email and password.
#[post("/auth/agent_login", data = "<data>")]
pub async fn agent_login(
    registrar: &State<Registrar>,
    data: Json<DataAgentLogin>,
) -> Result<Json<SessionDescriptor>> {
    let data = data.into_inner();

    Ok(Json(registrar.agent_login(&data.email, &data.password).await?))
}
