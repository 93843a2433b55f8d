use iso8601_timestamp::{Duration, Timestamp};

use crate::{
    models::{CodePurpose, OneTimeCode},
    Registrar, Result, Success,
};

impl OneTimeCode {
    /// Issue a fresh code for (account, purpose)
    ///
    /// Any code already live for the key is invalidated first, so at
    /// most one live code exists per account and purpose.
    pub async fn issue(
        registrar: &Registrar,
        account_id: String,
        purpose: CodePurpose,
        code_hash: String,
    ) -> Result<OneTimeCode> {
        registrar.database.delete_codes(&account_id, purpose).await?;

        let now = Timestamp::now_utc();
        let code = OneTimeCode {
            id: ulid::Ulid::new().to_string(),

            account_id,
            purpose,
            code_hash,

            created_at: now,
            // codes last 5 minutes
            expires_at: now + Duration::minutes(5),
        };

        registrar.database.save_code(&code).await?;

        Ok(code)
    }

    /// Check if this code has passed its expiry
    pub fn is_expired(&self) -> bool {
        self.expires_at <= Timestamp::now_utc()
    }

    /// Consume this code after a successful match
    pub async fn claim(self, registrar: &Registrar) -> Success {
        registrar
            .database
            .delete_codes(&self.account_id, self.purpose)
            .await
    }
}
