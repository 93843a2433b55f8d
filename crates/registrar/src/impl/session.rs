use crate::{
    models::{Role, SessionDescriptor},
    Error, Registrar, Result,
};

impl Registrar {
    /// Log a user in by email
    ///
    /// Users carry no stored password; possession of the mailbox,
    /// proven by code verification, is their credential. The password
    /// is accepted for wire compatibility and not checked.
    pub async fn user_login(&self, email: &str, _password: &str) -> Result<SessionDescriptor> {
        let user = self
            .database
            .find_user_by_email(email)
            .await?
            .ok_or(Error::InvalidCredentials)?;

        if user.role == Role::User && !user.verified {
            return Err(Error::UnverifiedAccount);
        }

        Ok(SessionDescriptor {
            id: user.id,
            name: user.name,
            email: user.email,
            role: match user.role {
                Role::Superadmin => "superadmin".to_string(),
                Role::User => "user".to_string(),
            },
        })
    }

    /// Log an agent in by email and password
    ///
    /// The approval gate is checked before the password so an
    /// unapproved agent always sees the same answer.
    pub async fn agent_login(&self, email: &str, password: &str) -> Result<SessionDescriptor> {
        let agent = self
            .database
            .find_agent_by_email(email)
            .await?
            .ok_or(Error::InvalidCredentials)?;

        if !agent.can_authenticate() {
            return Err(Error::PendingApproval);
        }

        agent.verify_password(password)?;

        Ok(SessionDescriptor {
            id: agent.id,
            name: agent.name,
            email: agent.email,
            role: "agent".to_string(),
        })
    }
}
