#[derive(Serialize, Debug, PartialEq, Eq)]
#[serde(tag = "type")]
pub enum Error {
    IncorrectData {
        with: &'static str,
    },
    DatabaseError {
        operation: &'static str,
        with: &'static str,
    },
    InternalError,
    RenderFail,

    DuplicateEmail,
    ReservedAccount,
    UnknownAccount,

    UnknownOrExpiredCode,
    InvalidCode,

    InvalidCredentials,
    PendingApproval,
    UnverifiedAccount,
    ShortPassword,

    EmailFailed {
        reason: String,
        /// Plaintext code, exposed only when configured as a dev fallback
        #[serde(skip_serializing_if = "Option::is_none")]
        code: Option<String>,
    },
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
pub type Success = Result<()>;
