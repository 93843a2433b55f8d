//! Delete an agent account
//! DELETE /agents/<id>
use registrar::{Registrar, Result};
use rocket::State;
use rocket_empty::EmptyResponse;

/// # Delete Agent
///
/// Delete an agent account by id, along with its stored photo.
#[delete("/agents/<id>")]
pub async fn delete_agent(registrar: &State<Registrar>, id: &str) -> Result<EmptyResponse> {
    let agent = registrar.database.find_agent(id).await?;
    agent.delete(registrar).await.map(|_| EmptyResponse)
}
