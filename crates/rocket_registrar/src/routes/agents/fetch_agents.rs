//! Fetch every agent account
//! GET /agents
use registrar::models::AgentProfile;
use registrar::{Registrar, Result};
use rocket::serde::json::Json;
use rocket::State;

/// # Fetch Agents
///
/// Fetch all agent accounts, with credential material stripped.
#[get("/agents")]
pub async fn fetch_agents(registrar: &State<Registrar>) -> Result<Json<Vec<AgentProfile>>> {
    Ok(Json(
        registrar
            .database
            .find_agents()
            .await?
            .into_iter()
            .map(Into::into)
            .collect(),
    ))
}

#[cfg(test)]
mod tests {
    use crate::test::*;

    #[async_std::test]
    async fn success() {
        let (registrar, _) = for_test("fetch_agents::success").await;

        Agent::create(
            &registrar,
            "Ana".into(),
            "ana@example.com".into(),
            "0123456789".into(),
            "1 Main St".into(),
            "secret1".into(),
            "ana.png",
            b"not a real png",
        )
        .await
        .unwrap();

        let client = bootstrap_rocket_with_registrar(
            registrar,
            routes![crate::routes::agents::fetch_agents::fetch_agents],
        )
        .await;

        let res = client.get("/agents").dispatch().await;
        assert_eq!(res.status(), Status::Ok);

        let body = res.into_string().await.unwrap();
        let agents: Vec<AgentProfile> = serde_json::from_str(&body).unwrap();

        assert_eq!(agents.len(), 1);
        assert_eq!(agents[0].email, "ana@example.com");
        assert!(!body.contains("password"));
    }
}
