use crate::{
    models::{Agent, CodePurpose, OneTimeCode, User},
    Result, Success,
};

use super::Migration;

#[async_trait]
pub trait AbstractDatabase: std::marker::Sync {
    /// Run a database migration
    async fn run_migration(&self, migration: Migration) -> Success;

    /// Find user by id
    async fn find_user(&self, id: &str) -> Result<User>;

    /// Find user by email
    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>>;

    /// List every user
    async fn find_users(&self) -> Result<Vec<User>>;

    /// Save user
    async fn save_user(&self, user: &User) -> Success;

    /// Delete user
    async fn delete_user(&self, id: &str) -> Success;

    /// Find agent by id
    async fn find_agent(&self, id: &str) -> Result<Agent>;

    /// Find agent by email
    async fn find_agent_by_email(&self, email: &str) -> Result<Option<Agent>>;

    /// List every agent
    async fn find_agents(&self) -> Result<Vec<Agent>>;

    /// Save agent
    async fn save_agent(&self, agent: &Agent) -> Success;

    /// Delete agent
    async fn delete_agent(&self, id: &str) -> Success;

    /// Find the live code for (account, purpose), skipping expired records
    async fn find_code(&self, account_id: &str, purpose: CodePurpose)
        -> Result<Option<OneTimeCode>>;

    /// Save one-time code
    async fn save_code(&self, code: &OneTimeCode) -> Success;

    /// Delete all codes for (account, purpose); no error if none exist
    async fn delete_codes(&self, account_id: &str, purpose: CodePurpose) -> Success;

    /// Delete every code past its expiry, returning how many were removed
    async fn delete_expired_codes(&self) -> Result<u64>;
}
