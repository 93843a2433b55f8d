use rand::Rng;

use crate::{
    config::EmailVerificationConfig,
    models::{
        Account, AccountKind, CodePurpose, CodeVerification, OneTimeCode, PendingVerification,
        SignupFields, User,
    },
    util, Error, Registrar, Result,
};

impl Registrar {
    /// Resolve the account a code request is aimed at
    ///
    /// An explicit id wins; otherwise the email is looked up in both
    /// collections, users first.
    async fn resolve_account(
        &self,
        email: &str,
        account_id: Option<&str>,
        kind: AccountKind,
    ) -> Result<Option<Account>> {
        if let Some(id) = account_id {
            // a stale id falls through to email resolution; anything
            // else is a real failure
            let found = match kind {
                AccountKind::User => match self.database.find_user(id).await {
                    Ok(user) => Some(Account::User(user)),
                    Err(Error::UnknownAccount) => None,
                    Err(err) => return Err(err),
                },
                AccountKind::Agent => match self.database.find_agent(id).await {
                    Ok(agent) => Some(Account::Agent(agent)),
                    Err(Error::UnknownAccount) => None,
                    Err(err) => return Err(err),
                },
            };

            if found.is_some() {
                return Ok(found);
            }
        }

        if let Some(user) = self.database.find_user_by_email(email).await? {
            return Ok(Some(Account::User(user)));
        }

        Ok(self
            .database
            .find_agent_by_email(email)
            .await?
            .map(Account::Agent))
    }

    /// Issue and dispatch a one-time code for an account
    ///
    /// Users may be created inline on their first request; agents must
    /// already exist, having been created at sign-up.
    pub async fn request_code(
        &self,
        email: &str,
        account_id: Option<&str>,
        kind: AccountKind,
        signup: Option<SignupFields>,
    ) -> Result<PendingVerification> {
        if email.trim().is_empty() {
            return Err(Error::IncorrectData { with: "email" });
        }

        let account = match self.resolve_account(email, account_id, kind).await? {
            Some(account) => account,
            None => match kind {
                AccountKind::Agent => return Err(Error::UnknownAccount),
                AccountKind::User => {
                    let signup = signup.ok_or(Error::UnknownAccount)?;

                    Account::User(
                        User::create(
                            self,
                            signup.name,
                            email.to_string(),
                            signup.phone_number,
                            signup.address,
                        )
                        .await?,
                    )
                }
            },
        };

        // 4 digit decimal code
        let code = rand::thread_rng().gen_range(1000..=9999).to_string();
        let code_hash = util::hash(&code)?;

        OneTimeCode::issue(
            self,
            account.id().to_string(),
            CodePurpose::Registration,
            code_hash,
        )
        .await?;

        let mut exposed_code = None;
        match &self.config.email_verification {
            EmailVerificationConfig::Enabled { smtp, templates } => {
                if let Err(err) =
                    smtp.send_email(account.email(), &templates.verify, json!({ "code": code }))
                {
                    return Err(match err {
                        Error::EmailFailed { reason, .. } => Error::EmailFailed {
                            reason,
                            code: self.config.expose_code_on_failure.then(|| code.clone()),
                        },
                        other => other,
                    });
                }
            }
            // without a relay the caller is handed the code directly
            EmailVerificationConfig::Disabled => exposed_code = Some(code),
        }

        Ok(PendingVerification {
            account_id: account.id().to_string(),
            email: account.email().to_string(),
            kind: account.kind(),
            code: exposed_code,
        })
    }

    /// Check a submitted code and advance the account's state
    ///
    /// A matched user becomes verified and may be logged straight in; a
    /// matched agent stays gated behind admin approval.
    pub async fn verify_code(
        &self,
        account_id: &str,
        code: &str,
        kind: AccountKind,
    ) -> Result<CodeVerification> {
        if account_id.is_empty() || code.is_empty() {
            return Err(Error::IncorrectData { with: "code" });
        }

        let record = self
            .database
            .find_code(account_id, CodePurpose::Registration)
            .await?
            .ok_or(Error::UnknownOrExpiredCode)?;

        // a mismatch keeps the stored code live
        if !util::verify_hash(code, &record.code_hash) {
            return Err(Error::InvalidCode);
        }

        let auto_login = match kind {
            AccountKind::User => {
                let mut user = self.database.find_user(account_id).await?;
                user.verified = true;
                user.save(self).await?;
                true
            }
            AccountKind::Agent => {
                // approval is untouched; only prove the account exists
                self.database.find_agent(account_id).await?;
                false
            }
        };

        record.claim(self).await?;

        Ok(CodeVerification {
            account_id: account_id.to_string(),
            kind,
            auto_login,
        })
    }
}

#[cfg(test)]
mod tests {
    use iso8601_timestamp::{Duration, Timestamp};

    use crate::test::{create_test_agent, create_test_user, for_test};
    use crate::{
        models::{AccountKind, CodePurpose, SignupFields},
        Error,
    };

    #[async_std::test]
    async fn user_flow_sets_verified_and_allows_auto_login() {
        let registrar = for_test();
        let user = create_test_user(&registrar, "u@x.com").await;
        assert!(!user.verified);

        let pending = registrar
            .request_code("u@x.com", None, AccountKind::User, None)
            .await
            .unwrap();
        assert_eq!(pending.account_id, user.id);
        assert_eq!(pending.kind, AccountKind::User);
        let code = pending.code.expect("code exposed without a relay");

        let outcome = registrar
            .verify_code(&user.id, &code, AccountKind::User)
            .await
            .unwrap();
        assert!(outcome.auto_login);

        let user = registrar.database.find_user(&user.id).await.unwrap();
        assert!(user.verified);

        // the code is consumed
        assert_eq!(
            registrar
                .verify_code(&user.id, &code, AccountKind::User)
                .await
                .unwrap_err(),
            Error::UnknownOrExpiredCode
        );
    }

    #[async_std::test]
    async fn agent_flow_never_touches_approval() {
        let registrar = for_test();
        let agent = create_test_agent(&registrar, "a@x.com", "secret1").await;

        let pending = registrar
            .request_code("a@x.com", None, AccountKind::Agent, None)
            .await
            .unwrap();
        assert_eq!(pending.kind, AccountKind::Agent);
        let code = pending.code.unwrap();

        let outcome = registrar
            .verify_code(&agent.id, &code, AccountKind::Agent)
            .await
            .unwrap();
        assert!(!outcome.auto_login);

        let agent = registrar.database.find_agent(&agent.id).await.unwrap();
        assert!(!agent.approved);
    }

    #[async_std::test]
    async fn unknown_agents_cannot_request_codes() {
        let registrar = for_test();

        assert_eq!(
            registrar
                .request_code("ghost@x.com", None, AccountKind::Agent, None)
                .await
                .unwrap_err(),
            Error::UnknownAccount
        );
    }

    #[async_std::test]
    async fn first_request_with_signup_fields_creates_the_user() {
        let registrar = for_test();

        let pending = registrar
            .request_code(
                "new@x.com",
                None,
                AccountKind::User,
                Some(SignupFields {
                    name: "New".into(),
                    phone_number: "1".into(),
                    address: "addr".into(),
                }),
            )
            .await
            .unwrap();

        let user = registrar
            .database
            .find_user(&pending.account_id)
            .await
            .unwrap();
        assert_eq!(user.email, "new@x.com");
        assert!(!user.verified);

        // without sign-up fields an unknown user is simply not found
        assert_eq!(
            registrar
                .request_code("other@x.com", None, AccountKind::User, None)
                .await
                .unwrap_err(),
            Error::UnknownAccount
        );
    }

    #[async_std::test]
    async fn reissuing_invalidates_the_first_code() {
        let registrar = for_test();
        let user = create_test_user(&registrar, "u@x.com").await;

        let first = registrar
            .request_code("u@x.com", None, AccountKind::User, None)
            .await
            .unwrap()
            .code
            .unwrap();

        // codes are random; reissue until the two differ
        let second = loop {
            let code = registrar
                .request_code("u@x.com", None, AccountKind::User, None)
                .await
                .unwrap()
                .code
                .unwrap();

            if code != first {
                break code;
            }
        };

        assert_eq!(
            registrar
                .verify_code(&user.id, &first, AccountKind::User)
                .await
                .unwrap_err(),
            Error::InvalidCode
        );

        registrar
            .verify_code(&user.id, &second, AccountKind::User)
            .await
            .unwrap();
    }

    #[async_std::test]
    async fn wrong_code_leaves_the_record_live() {
        let registrar = for_test();
        let user = create_test_user(&registrar, "u@x.com").await;

        let code = registrar
            .request_code("u@x.com", None, AccountKind::User, None)
            .await
            .unwrap()
            .code
            .unwrap();

        let wrong = if code == "1000" { "1001" } else { "1000" };
        assert_eq!(
            registrar
                .verify_code(&user.id, wrong, AccountKind::User)
                .await
                .unwrap_err(),
            Error::InvalidCode
        );

        // the correct code still goes through afterwards
        registrar
            .verify_code(&user.id, &code, AccountKind::User)
            .await
            .unwrap();
    }

    #[async_std::test]
    async fn expired_codes_fail_as_unknown() {
        let registrar = for_test();
        let user = create_test_user(&registrar, "u@x.com").await;

        let code = registrar
            .request_code("u@x.com", None, AccountKind::User, None)
            .await
            .unwrap()
            .code
            .unwrap();

        let mut record = registrar
            .database
            .find_code(&user.id, CodePurpose::Registration)
            .await
            .unwrap()
            .unwrap();
        record.expires_at = Timestamp::now_utc() - Duration::seconds(1);
        registrar.database.save_code(&record).await.unwrap();

        assert_eq!(
            registrar
                .verify_code(&user.id, &code, AccountKind::User)
                .await
                .unwrap_err(),
            Error::UnknownOrExpiredCode
        );
    }

    #[async_std::test]
    async fn resolution_by_id_beats_resolution_by_email() {
        let registrar = for_test();
        let agent = create_test_agent(&registrar, "same@x.com", "secret1").await;

        let pending = registrar
            .request_code("same@x.com", Some(&agent.id), AccountKind::Agent, None)
            .await
            .unwrap();

        assert_eq!(pending.account_id, agent.id);
        assert_eq!(pending.kind, AccountKind::Agent);
    }

    #[async_std::test]
    async fn stale_id_falls_back_to_email_resolution() {
        let registrar = for_test();
        let user = create_test_user(&registrar, "u@x.com").await;

        let pending = registrar
            .request_code("u@x.com", Some("01J0000000000000000000STALE"), AccountKind::User, None)
            .await
            .unwrap();

        assert_eq!(pending.account_id, user.id);
    }
}
