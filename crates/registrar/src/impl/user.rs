use iso8601_timestamp::Timestamp;

use crate::{
    models::{Role, User},
    Error, Registrar, RegistrarEvent, Result, Success,
};

impl User {
    /// Create a new user account through public sign-up
    pub async fn create(
        registrar: &Registrar,
        name: String,
        email: String,
        phone_number: String,
        address: String,
    ) -> Result<User> {
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

        // The super admin account is bootstrapped, never signed up
        if registrar.is_reserved_email(&email) {
            return Err(Error::ReservedAccount);
        }

        if registrar
            .database
            .find_user_by_email(&email)
            .await?
            .is_some()
        {
            return Err(Error::DuplicateEmail);
        }

        let now = Timestamp::now_utc();
        let user = User {
            id: ulid::Ulid::new().to_string(),

            name,
            email,
            phone_number,
            address,

            role: Role::User,
            verified: false,
            external_id: None,
            avatar: None,

            created_at: now,
            updated_at: now,
        };

        registrar.database.save_user(&user).await?;

        registrar
            .publish_event(RegistrarEvent::CreateUser { user: user.clone() })
            .await;

        Ok(user)
    }

    /// Find-or-create merge for third-party sign-in
    ///
    /// Accounts created here are pre-verified; existing accounts get
    /// missing external fields backfilled.
    pub async fn external_sign_in(
        registrar: &Registrar,
        name: String,
        email: String,
        external_id: String,
        avatar: Option<String>,
    ) -> Result<User> {
        if registrar.is_reserved_email(&email) {
            return Err(Error::ReservedAccount);
        }

        if let Some(mut user) = registrar.database.find_user_by_email(&email).await? {
            let mut changed = false;

            if user.external_id.is_none() {
                user.external_id = Some(external_id);
                changed = true;
            }

            if user.avatar.is_none() && avatar.is_some() {
                user.avatar = avatar;
                changed = true;
            }

            if changed {
                user.save(registrar).await?;
            }

            Ok(user)
        } else {
            let now = Timestamp::now_utc();
            let user = User {
                id: ulid::Ulid::new().to_string(),

                name,
                email,
                phone_number: String::new(),
                address: String::new(),

                role: Role::User,
                verified: true,
                external_id: Some(external_id),
                avatar,

                created_at: now,
                updated_at: now,
            };

            registrar.database.save_user(&user).await?;

            registrar
                .publish_event(RegistrarEvent::CreateUser { user: user.clone() })
                .await;

            Ok(user)
        }
    }

    /// Save model, stamping the update time
    pub async fn save(&mut self, registrar: &Registrar) -> Success {
        self.updated_at = Timestamp::now_utc();
        registrar.database.save_user(self).await
    }

    /// Delete this account
    ///
    /// The reserved super admin can never be deleted.
    pub async fn delete(self, registrar: &Registrar) -> Success {
        if self.role == Role::Superadmin || registrar.is_reserved_email(&self.email) {
            return Err(Error::ReservedAccount);
        }

        registrar.database.delete_user(&self.id).await?;

        registrar
            .publish_event(RegistrarEvent::DeleteUser { user_id: self.id })
            .await;

        Ok(())
    }
}

impl Registrar {
    /// Idempotent bootstrap of the reserved super admin account
    ///
    /// Run once at startup, after migrations.
    pub async fn ensure_reserved_admin(&self) -> Success {
        let email = self.config.reserved_admin_email.clone();

        if self.database.find_user_by_email(&email).await?.is_some() {
            return Ok(());
        }

        let now = Timestamp::now_utc();
        let user = User {
            id: ulid::Ulid::new().to_string(),

            name: "Super Admin".to_string(),
            email,
            phone_number: String::new(),
            address: String::new(),

            role: Role::Superadmin,
            verified: true,
            external_id: None,
            avatar: None,

            created_at: now,
            updated_at: now,
        };

        self.database.save_user(&user).await?;

        info!("Initialised the reserved super admin account");

        Ok(())
    }
}
