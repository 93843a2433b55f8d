use crate::models::{Agent, User};

#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(tag = "event_type")]
pub enum RegistrarEvent {
    CreateUser { user: User },
    CreateAgent { agent: Agent },
    ApproveAgent { agent_id: String },
    DeleteUser { user_id: String },
    DeleteAgent { agent_id: String },
}
