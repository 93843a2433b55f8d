//! Delete a user account
//! DELETE /users/<id>
use registrar::{Registrar, Result};
use rocket::State;
use rocket_empty::EmptyResponse;

/// # Delete User
///
/// Delete a user account by id. The reserved super admin is refused.
#[delete("/users/<id>")]
pub async fn delete_user(registrar: &State<Registrar>, id: &str) -> Result<EmptyResponse> {
    let user = registrar.database.find_user(id).await?;
    user.delete(registrar).await.map(|_| EmptyResponse)
}
