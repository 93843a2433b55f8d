//! Fetch every user account
//! GET /users
use registrar::models::User;
use registrar::{Registrar, Result};
use rocket::serde::json::Json;
use rocket::State;

/// # Fetch Users
///
/// Fetch all user accounts, for the admin listing.
#[get("/users")]
pub async fn fetch_users(registrar: &State<Registrar>) -> Result<Json<Vec<User>>> {
    Ok(Json(registrar.database.find_users().await?))
}
