use iso8601_timestamp::Timestamp;

/// Role attached to a user account
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Regular sign-up
    User,
    /// The single reserved bootstrap account
    Superadmin,
}

/// Which of the two account collections a record lives in
#[derive(Debug, Default, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum AccountKind {
    #[default]
    User,
    Agent,
}

/// User account model
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct User {
    /// Unique Id
    #[serde(rename = "_id")]
    pub id: String,

    /// Display name
    pub name: String,

    /// User's email
    pub email: String,

    /// Contact phone number
    pub phone_number: String,

    /// Postal address
    pub address: String,

    /// Account role
    pub role: Role,

    /// Whether the email address has been verified
    #[serde(default)]
    pub verified: bool,

    /// Id assigned by a third-party sign-in provider
    #[serde(skip_serializing_if = "Option::is_none")]
    pub external_id: Option<String>,

    /// Avatar reference provided by a third-party sign-in provider
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,

    /// Time at which this account was created
    pub created_at: Timestamp,

    /// Time of the last mutation
    pub updated_at: Timestamp,
}

/// Agent account model
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Agent {
    /// Unique Id
    #[serde(rename = "_id")]
    pub id: String,

    /// Display name
    pub name: String,

    /// Agent's email
    pub email: String,

    /// Contact phone number
    pub phone_number: String,

    /// Postal address
    pub address: String,

    /// Argon2 hashed password
    pub password: String,

    /// Relative reference to the stored profile photo
    pub photo: String,

    /// Whether an administrator has approved this agent for login
    #[serde(default)]
    pub approved: bool,

    /// Time at which this account was created
    pub created_at: Timestamp,

    /// Time of the last mutation
    pub updated_at: Timestamp,
}

/// A record from either account collection
#[derive(Debug, Clone)]
pub enum Account {
    User(User),
    Agent(Agent),
}

impl Account {
    pub fn id(&self) -> &str {
        match self {
            Account::User(user) => &user.id,
            Account::Agent(agent) => &agent.id,
        }
    }

    pub fn email(&self) -> &str {
        match self {
            Account::User(user) => &user.email,
            Account::Agent(agent) => &agent.email,
        }
    }

    pub fn kind(&self) -> AccountKind {
        match self {
            Account::User(_) => AccountKind::User,
            Account::Agent(_) => AccountKind::Agent,
        }
    }
}

/// Agent record with credential material stripped, safe to hand out
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct AgentProfile {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    pub email: String,
    pub phone_number: String,
    pub address: String,
    pub photo: String,
    pub approved: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl From<Agent> for AgentProfile {
    fn from(agent: Agent) -> AgentProfile {
        AgentProfile {
            id: agent.id,
            name: agent.name,
            email: agent.email,
            phone_number: agent.phone_number,
            address: agent.address,
            photo: agent.photo,
            approved: agent.approved,
            created_at: agent.created_at,
            updated_at: agent.updated_at,
        }
    }
}
