//! Create a new agent account
//! POST /agents
use base64::prelude::{Engine, BASE64_STANDARD};
use registrar::models::{Agent, AgentProfile};
use registrar::{Error, Registrar, Result};
use rocket::serde::json::Json;
use rocket::State;

/// # Agent Data
#[derive(Serialize, Deserialize)]
pub struct DataCreateAgent {
    /// Display name
    pub name: String,
    /// Valid email address
    pub email: String,
    /// Contact phone number
    pub phone_number: String,
    /// Postal address
    pub address: String,
    /// Password
    pub password: String,
    /// Original photo file name
    pub photo_name: String,
    /// Base64-encoded profile photo
    pub photo: String,
}

/// # Create Agent
///
/// Create a new agent account, pending admin approval.
#[post("/agents", data = "<data>")]
pub async fn create_agent(
    registrar: &State<Registrar>,
    data: Json<DataCreateAgent>,
) -> Result<Json<AgentProfile>> {
    let data = data.into_inner();

    let photo = BASE64_STANDARD
        .decode(&data.photo)
        .map_err(|_| Error::IncorrectData { with: "photo" })?;

    let agent = Agent::create(
        registrar,
        data.name,
        data.email,
        data.phone_number,
        data.address,
        data.password,
        &data.photo_name,
        &photo,
    )
    .await?;

    Ok(Json(agent.into()))
}

#[cfg(test)]
mod tests {
    use crate::test::*;
    use base64::prelude::{Engine, BASE64_STANDARD};

    #[async_std::test]
    async fn success() {
        let (client, receiver) = bootstrap_rocket(
            "create_agent",
            "success",
            routes![crate::routes::agents::create_agent::create_agent],
        )
        .await;

        let res = client
            .post("/agents")
            .header(ContentType::JSON)
            .body(
                json!({
                    "name": "Ana",
                    "email": "ana@example.com",
                    "phone_number": "0123456789",
                    "address": "1 Main St",
                    "password": "secret1",
                    "photo_name": "ana.png",
                    "photo": BASE64_STANDARD.encode(b"not a real png")
                })
                .to_string(),
            )
            .dispatch()
            .await;

        assert_eq!(res.status(), Status::Ok);

        let body = res.into_string().await.unwrap();
        let profile: AgentProfile = serde_json::from_str(&body).unwrap();
        assert!(!profile.approved);

        // credential material never leaves the server
        assert!(!body.contains("password"));

        assert!(matches!(
            receiver.try_recv().expect("an event"),
            RegistrarEvent::CreateAgent { agent } if agent.id == profile.id
        ));
    }

    #[async_std::test]
    async fn fail_short_password() {
        let (client, _) = bootstrap_rocket(
            "create_agent",
            "fail_short_password",
            routes![crate::routes::agents::create_agent::create_agent],
        )
        .await;

        let res = client
            .post("/agents")
            .header(ContentType::JSON)
            .body(
                json!({
                    "name": "Ana",
                    "email": "ana@example.com",
                    "phone_number": "0123456789",
                    "address": "1 Main St",
                    "password": "short",
                    "photo_name": "ana.png",
                    "photo": BASE64_STANDARD.encode(b"not a real png")
                })
                .to_string(),
            )
            .dispatch()
            .await;

        assert_eq!(res.status(), Status::BadRequest);
        assert_eq!(
            res.into_string().await,
            Some("{\"type\":\"ShortPassword\"}".into())
        );
    }

    #[async_std::test]
    async fn fail_undecodable_photo() {
        let (client, _) = bootstrap_rocket(
            "create_agent",
            "fail_undecodable_photo",
            routes![crate::routes::agents::create_agent::create_agent],
        )
        .await;

        let res = client
            .post("/agents")
            .header(ContentType::JSON)
            .body(
                json!({
                    "name": "Ana",
                    "email": "ana@example.com",
                    "phone_number": "0123456789",
                    "address": "1 Main St",
                    "password": "secret1",
                    "photo_name": "ana.png",
                    "photo": "!!! not base64 !!!"
                })
                .to_string(),
            )
            .dispatch()
            .await;

        assert_eq!(res.status(), Status::BadRequest);
        assert_eq!(
            res.into_string().await,
            Some("{\"type\":\"IncorrectData\",\"with\":\"photo\"}".into())
        );
    }
}
