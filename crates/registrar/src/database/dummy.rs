use crate::{
    models::{Agent, CodePurpose, OneTimeCode, User},
    Error, Result, Success,
};

use futures::lock::Mutex;
use std::collections::HashMap;
use std::sync::Arc;

use super::{definition::AbstractDatabase, Migration};

#[derive(Default, Clone)]
pub struct DummyDb {
    pub users: Arc<Mutex<HashMap<String, User>>>,
    pub agents: Arc<Mutex<HashMap<String, Agent>>>,
    pub codes: Arc<Mutex<HashMap<String, OneTimeCode>>>,
}

#[async_trait]
impl AbstractDatabase for DummyDb {
    /// Run a database migration
    async fn run_migration(&self, migration: Migration) -> Success {
        debug!("skip migration {:?}", migration);
        Ok(())
    }

    /// Find user by id
    async fn find_user(&self, id: &str) -> Result<User> {
        let users = self.users.lock().await;
        users.get(id).cloned().ok_or(Error::UnknownAccount)
    }

    /// Find user by email
    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>> {
        let users = self.users.lock().await;
        Ok(users
            .values()
            .find(|user| user.email.eq_ignore_ascii_case(email))
            .cloned())
    }

    /// List every user
    async fn find_users(&self) -> Result<Vec<User>> {
        let users = self.users.lock().await;
        Ok(users.values().cloned().collect())
    }

    /// Save user
    async fn save_user(&self, user: &User) -> Success {
        let mut users = self.users.lock().await;
        users.insert(user.id.to_string(), user.clone());
        Ok(())
    }

    /// Delete user
    async fn delete_user(&self, id: &str) -> Success {
        let mut users = self.users.lock().await;
        if users.remove(id).is_some() {
            Ok(())
        } else {
            Err(Error::UnknownAccount)
        }
    }

    /// Find agent by id
    async fn find_agent(&self, id: &str) -> Result<Agent> {
        let agents = self.agents.lock().await;
        agents.get(id).cloned().ok_or(Error::UnknownAccount)
    }

    /// Find agent by email
    async fn find_agent_by_email(&self, email: &str) -> Result<Option<Agent>> {
        let agents = self.agents.lock().await;
        Ok(agents
            .values()
            .find(|agent| agent.email.eq_ignore_ascii_case(email))
            .cloned())
    }

    /// List every agent
    async fn find_agents(&self) -> Result<Vec<Agent>> {
        let agents = self.agents.lock().await;
        Ok(agents.values().cloned().collect())
    }

    /// Save agent
    async fn save_agent(&self, agent: &Agent) -> Success {
        let mut agents = self.agents.lock().await;
        agents.insert(agent.id.to_string(), agent.clone());
        Ok(())
    }

    /// Delete agent
    async fn delete_agent(&self, id: &str) -> Success {
        let mut agents = self.agents.lock().await;
        if agents.remove(id).is_some() {
            Ok(())
        } else {
            Err(Error::UnknownAccount)
        }
    }

    /// Find the live code for (account, purpose), skipping expired records
    async fn find_code(
        &self,
        account_id: &str,
        purpose: CodePurpose,
    ) -> Result<Option<OneTimeCode>> {
        let codes = self.codes.lock().await;
        Ok(codes
            .values()
            .find(|code| {
                code.account_id == account_id && code.purpose == purpose && !code.is_expired()
            })
            .cloned())
    }

    /// Save one-time code
    async fn save_code(&self, code: &OneTimeCode) -> Success {
        let mut codes = self.codes.lock().await;
        codes.insert(code.id.to_string(), code.clone());
        Ok(())
    }

    /// Delete all codes for (account, purpose); no error if none exist
    async fn delete_codes(&self, account_id: &str, purpose: CodePurpose) -> Success {
        let mut codes = self.codes.lock().await;
        codes.retain(|_, code| code.account_id != account_id || code.purpose != purpose);
        Ok(())
    }

    /// Delete every code past its expiry, returning how many were removed
    async fn delete_expired_codes(&self) -> Result<u64> {
        let mut codes = self.codes.lock().await;
        let before = codes.len();
        codes.retain(|_, code| !code.is_expired());
        Ok((before - codes.len()) as u64)
    }
}
