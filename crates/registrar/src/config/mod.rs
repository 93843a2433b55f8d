mod email_verification;
mod files;

pub use email_verification::*;
pub use files::*;

/// Registrar configuration
#[derive(Serialize, Deserialize, Clone)]
pub struct Config {
    /// Email verification
    pub email_verification: EmailVerificationConfig,

    /// Profile photo storage
    pub files: FileStorageConfig,

    /// Email reserved for the bootstrap super admin
    ///
    /// This address can never be claimed through any public sign-up
    /// path, and the account behind it can never be deleted.
    pub reserved_admin_email: String,

    /// Include the plaintext code in delivery-failure errors
    ///
    /// Debugging escape hatch for environments without a working mail
    /// relay; never enable in production.
    pub expose_code_on_failure: bool,
}

impl Default for Config {
    fn default() -> Config {
        Config {
            email_verification: Default::default(),
            files: Default::default(),
            reserved_admin_email: "admin@example.com".into(),
            expose_code_on_failure: false,
        }
    }
}
