//! Update an agent's approval state
//! PATCH /agents/<id>
use registrar::models::AgentProfile;
use registrar::{Registrar, Result};
use rocket::serde::json::Json;
use rocket::State;

/// # Approval Data
#[derive(Serialize, Deserialize)]
pub struct DataUpdateAgent {
    /// Whether the agent may log in
    pub approved: bool,
}

/// # Update Agent
///
/// Grant or revoke an agent's login approval.
#[patch("/agents/<id>", data = "<data>")]
pub async fn update_agent(
    registrar: &State<Registrar>,
    id: &str,
    data: Json<DataUpdateAgent>,
) -> Result<Json<AgentProfile>> {
    let mut agent = registrar.database.find_agent(id).await?;
    agent.set_approved(registrar, data.into_inner().approved).await?;

    Ok(Json(agent.into()))
}
