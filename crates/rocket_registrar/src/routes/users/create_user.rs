//! Create a new user account
//! POST /users
use registrar::models::User;
use registrar::{Registrar, Result};
use rocket::serde::json::Json;
use rocket::State;

/// # User Data
#[derive(Serialize, Deserialize)]
pub struct DataCreateUser {
    /// Display name
    pub name: String,
    /// Valid email address
    pub email: String,
    /// Contact phone number
    pub phone_number: String,
    /// Postal address
    pub address: String,
}

/// # Create User
///
/// Create a new, unverified user account.
#[post("/users", data = "<data>")]
pub async fn create_user(
    registrar: &State<Registrar>,
    data: Json<DataCreateUser>,
) -> Result<Json<User>> {
    let data = data.into_inner();

    Ok(Json(
        User::create(
            registrar,
            data.name,
            data.email,
            data.phone_number,
            data.address,
        )
        .await?,
    ))
}

#[cfg(test)]
mod tests {
    use crate::test::*;

    #[async_std::test]
    async fn success() {
        let (client, _) = bootstrap_rocket(
            "create_user",
            "success",
            routes![crate::routes::users::create_user::create_user],
        )
        .await;

        let res = client
            .post("/users")
            .header(ContentType::JSON)
            .body(
                json!({
                    "name": "Jan",
                    "email": "jan@example.com",
                    "phone_number": "0123456789",
                    "address": "1 Main St"
                })
                .to_string(),
            )
            .dispatch()
            .await;

        assert_eq!(res.status(), Status::Ok);

        let user: User = serde_json::from_str(&res.into_string().await.unwrap()).unwrap();
        assert_eq!(user.email, "jan@example.com");
        assert!(!user.verified);
    }

    #[async_std::test]
    async fn fail_blank_field() {
        let (client, _) = bootstrap_rocket(
            "create_user",
            "fail_blank_field",
            routes![crate::routes::users::create_user::create_user],
        )
        .await;

        let res = client
            .post("/users")
            .header(ContentType::JSON)
            .body(
                json!({
                    "name": "Jan",
                    "email": " ",
                    "phone_number": "0123456789",
                    "address": "1 Main St"
                })
                .to_string(),
            )
            .dispatch()
            .await;

        assert_eq!(res.status(), Status::BadRequest);
        assert_eq!(
            res.into_string().await,
            Some("{\"type\":\"IncorrectData\",\"with\":\"email\"}".into())
        );
    }

    #[async_std::test]
    async fn fail_duplicate_email() {
        let (registrar, _) = for_test("create_user::fail_duplicate_email").await;
        let client = bootstrap_rocket_with_registrar(
            registrar,
            routes![crate::routes::users::create_user::create_user],
        )
        .await;

        let body = json!({
            "name": "Jan",
            "email": "jan@example.com",
            "phone_number": "0123456789",
            "address": "1 Main St"
        })
        .to_string();

        let res = client
            .post("/users")
            .header(ContentType::JSON)
            .body(body.clone())
            .dispatch()
            .await;
        assert_eq!(res.status(), Status::Ok);

        let res = client
            .post("/users")
            .header(ContentType::JSON)
            .body(body)
            .dispatch()
            .await;

        assert_eq!(res.status(), Status::BadRequest);
        assert_eq!(
            res.into_string().await,
            Some("{\"type\":\"DuplicateEmail\"}".into())
        );
    }

    #[async_std::test]
    async fn fail_reserved_email() {
        let (client, _) = bootstrap_rocket(
            "create_user",
            "fail_reserved_email",
            routes![crate::routes::users::create_user::create_user],
        )
        .await;

        let res = client
            .post("/users")
            .header(ContentType::JSON)
            .body(
                json!({
                    "name": "Mallory",
                    "email": "admin@example.com",
                    "phone_number": "1",
                    "address": "nowhere"
                })
                .to_string(),
            )
            .dispatch()
            .await;

        assert_eq!(res.status(), Status::Forbidden);
        assert_eq!(
            res.into_string().await,
            Some("{\"type\":\"ReservedAccount\"}".into())
        );
    }
}
