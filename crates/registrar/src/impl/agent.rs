use iso8601_timestamp::Timestamp;

use crate::{
    models::Agent, util, Error, Registrar, RegistrarEvent, Result, Success,
};

impl Agent {
    /// Create a new agent account at sign-up
    ///
    /// Agents always start unapproved; email verification alone never
    /// unlocks their login.
    #[allow(clippy::too_many_arguments)]
    pub async fn create(
        registrar: &Registrar,
        name: String,
        email: String,
        phone_number: String,
        address: String,
        plaintext_password: String,
        photo_name: &str,
        photo: &[u8],
    ) -> Result<Agent> {
        for (field, value) in [
            ("name", &name),
            ("email", &email),
            ("phone_number", &phone_number),
            ("address", &address),
        ] {
            if value.trim().is_empty() {
                return Err(Error::IncorrectData { with: field });
            }
        }

        if plaintext_password.len() < 6 {
            return Err(Error::ShortPassword);
        }

        if photo.is_empty() {
            return Err(Error::IncorrectData { with: "photo" });
        }

        if registrar.is_reserved_email(&email) {
            return Err(Error::ReservedAccount);
        }

        if registrar
            .database
            .find_agent_by_email(&email)
            .await?
            .is_some()
        {
            return Err(Error::DuplicateEmail);
        }

        let password = util::hash(&plaintext_password)?;
        let photo = registrar.config.files.store_photo(photo_name, photo).await?;

        let now = Timestamp::now_utc();
        let agent = Agent {
            id: ulid::Ulid::new().to_string(),

            name,
            email,
            phone_number,
            address,

            password,
            photo,
            approved: false,

            created_at: now,
            updated_at: now,
        };

        registrar.database.save_agent(&agent).await?;

        registrar
            .publish_event(RegistrarEvent::CreateAgent {
                agent: agent.clone(),
            })
            .await;

        Ok(agent)
    }

    /// Whether this agent may authenticate
    pub fn can_authenticate(&self) -> bool {
        self.approved
    }

    /// Verify the agent's password is correct
    pub fn verify_password(&self, plaintext_password: &str) -> Success {
        if self.password.is_empty() {
            return Err(Error::InvalidCredentials);
        }

        if util::verify_hash(plaintext_password, &self.password) {
            Ok(())
        } else {
            Err(Error::InvalidCredentials)
        }
    }

    /// Grant or revoke login approval
    pub async fn set_approved(&mut self, registrar: &Registrar, approved: bool) -> Success {
        self.approved = approved;
        self.save(registrar).await?;

        if approved {
            registrar
                .publish_event(RegistrarEvent::ApproveAgent {
                    agent_id: self.id.clone(),
                })
                .await;
        }

        Ok(())
    }

    /// Save model, stamping the update time
    pub async fn save(&mut self, registrar: &Registrar) -> Success {
        self.updated_at = Timestamp::now_utc();
        registrar.database.save_agent(self).await
    }

    /// Delete this agent, removing the stored photo first
    ///
    /// Photo removal is best-effort and never fails the deletion.
    pub async fn delete(self, registrar: &Registrar) -> Success {
        if !self.photo.is_empty() {
            registrar.config.files.remove(&self.photo).await;
        }

        registrar.database.delete_agent(&self.id).await?;

        registrar
            .publish_event(RegistrarEvent::DeleteAgent { agent_id: self.id })
            .await;

        Ok(())
    }
}
