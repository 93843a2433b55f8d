use bson::{to_document, DateTime, Document};
use futures::stream::TryStreamExt;
use mongodb::options::{Collation, CollationStrength, FindOneOptions, UpdateOptions};
use std::ops::Deref;

use crate::{
    models::{Agent, CodePurpose, OneTimeCode, User},
    Error, Result, Success,
};

use super::{definition::AbstractDatabase, Migration};

#[derive(Clone)]
pub struct MongoDb(pub mongodb::Database);

impl Deref for MongoDb {
    type Target = mongodb::Database;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

fn now_rfc3339() -> String {
    DateTime::now()
        .try_to_rfc3339_string()
        .expect("failed to convert to rfc3339 time string")
}

fn email_collation() -> FindOneOptions {
    FindOneOptions::builder()
        .collation(
            Collation::builder()
                .locale("en")
                .strength(CollationStrength::Secondary)
                .build(),
        )
        .build()
}

#[async_trait]
impl AbstractDatabase for MongoDb {
    /// Run a database migration
    async fn run_migration(&self, migration: Migration) -> Success {
        match migration {
            #[cfg(debug_assertions)]
            Migration::WipeAll => {
                // Drop the entire database
                self.drop().await.unwrap();
            }
            Migration::M2025_11_14EnsureUpToSpec => {
                if self
                    .collection::<Document>("users")
                    .list_index_names()
                    .await
                    .unwrap_or_default()
                    .contains(&"email".to_owned())
                {
                    return Ok(());
                }

                // Make sure all collections exist
                let list = self.list_collection_names().await.unwrap();
                let collections = ["users", "agents", "one_time_codes"];

                for name in collections {
                    if !list.contains(&name.to_string()) {
                        self.create_collection(name).await.unwrap();
                    }
                }

                // Per-collection unique email index
                for name in ["users", "agents"] {
                    let col = self.collection::<Document>(name);
                    col.drop_indexes().await.unwrap();

                    self.run_command(doc! {
                        "createIndexes": name,
                        "indexes": [
                            {
                                "key": {
                                    "email": 1
                                },
                                "name": "email",
                                "unique": true,
                                "collation": {
                                    "locale": "en",
                                    "strength": 2
                                }
                            }
                        ]
                    })
                    .await
                    .unwrap();
                }

                // Setup index for `one_time_codes`
                let col = self.collection::<Document>("one_time_codes");
                col.drop_indexes().await.unwrap();

                self.run_command(doc! {
                    "createIndexes": "one_time_codes",
                    "indexes": [
                        {
                            "key": {
                                "account_id": 1,
                                "purpose": 1
                            },
                            "name": "account_purpose"
                        },
                        {
                            "key": {
                                "expires_at": 1
                            },
                            "name": "expiry"
                        }
                    ]
                })
                .await
                .unwrap();
            }
        }

        Ok(())
    }

    /// Find user by id
    async fn find_user(&self, id: &str) -> Result<User> {
        self.collection("users")
            .find_one(doc! {
                "_id": id
            })
            .await
            .map_err(|_| Error::DatabaseError {
                operation: "find_one",
                with: "user",
            })?
            .ok_or(Error::UnknownAccount)
    }

    /// Find user by email
    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>> {
        self.collection("users")
            .find_one(doc! {
                "email": email
            })
            .with_options(email_collation())
            .await
            .map_err(|_| Error::DatabaseError {
                operation: "find_one",
                with: "user",
            })
    }

    /// List every user
    async fn find_users(&self) -> Result<Vec<User>> {
        self.collection::<User>("users")
            .find(doc! {})
            .await
            .map_err(|_| Error::DatabaseError {
                operation: "find",
                with: "users",
            })?
            .try_collect()
            .await
            .map_err(|_| Error::DatabaseError {
                operation: "collect",
                with: "users",
            })
    }

    /// Save user
    async fn save_user(&self, user: &User) -> Success {
        self.collection::<User>("users")
            .update_one(
                doc! {
                    "_id": &user.id
                },
                doc! {
                    "$set": to_document(user).map_err(|_| Error::DatabaseError {
                        operation: "to_document",
                        with: "user",
                    })?
                },
            )
            .with_options(UpdateOptions::builder().upsert(true).build())
            .await
            .map_err(|_| Error::DatabaseError {
                operation: "upsert_one",
                with: "user",
            })
            .map(|_| ())
    }

    /// Delete user
    async fn delete_user(&self, id: &str) -> Success {
        self.collection::<User>("users")
            .delete_one(doc! {
                "_id": id
            })
            .await
            .map_err(|_| Error::DatabaseError {
                operation: "delete_one",
                with: "user",
            })
            .map(|_| ())
    }

    /// Find agent by id
    async fn find_agent(&self, id: &str) -> Result<Agent> {
        self.collection("agents")
            .find_one(doc! {
                "_id": id
            })
            .await
            .map_err(|_| Error::DatabaseError {
                operation: "find_one",
                with: "agent",
            })?
            .ok_or(Error::UnknownAccount)
    }

    /// Find agent by email
    async fn find_agent_by_email(&self, email: &str) -> Result<Option<Agent>> {
        self.collection("agents")
            .find_one(doc! {
                "email": email
            })
            .with_options(email_collation())
            .await
            .map_err(|_| Error::DatabaseError {
                operation: "find_one",
                with: "agent",
            })
    }

    /// List every agent
    async fn find_agents(&self) -> Result<Vec<Agent>> {
        self.collection::<Agent>("agents")
            .find(doc! {})
            .await
            .map_err(|_| Error::DatabaseError {
                operation: "find",
                with: "agents",
            })?
            .try_collect()
            .await
            .map_err(|_| Error::DatabaseError {
                operation: "collect",
                with: "agents",
            })
    }

    /// Save agent
    async fn save_agent(&self, agent: &Agent) -> Success {
        self.collection::<Agent>("agents")
            .update_one(
                doc! {
                    "_id": &agent.id
                },
                doc! {
                    "$set": to_document(agent).map_err(|_| Error::DatabaseError {
                        operation: "to_document",
                        with: "agent",
                    })?
                },
            )
            .with_options(UpdateOptions::builder().upsert(true).build())
            .await
            .map_err(|_| Error::DatabaseError {
                operation: "upsert_one",
                with: "agent",
            })
            .map(|_| ())
    }

    /// Delete agent
    async fn delete_agent(&self, id: &str) -> Success {
        self.collection::<Agent>("agents")
            .delete_one(doc! {
                "_id": id
            })
            .await
            .map_err(|_| Error::DatabaseError {
                operation: "delete_one",
                with: "agent",
            })
            .map(|_| ())
    }

    /// Find the live code for (account, purpose), skipping expired records
    async fn find_code(
        &self,
        account_id: &str,
        purpose: CodePurpose,
    ) -> Result<Option<OneTimeCode>> {
        self.collection("one_time_codes")
            .find_one(doc! {
                "account_id": account_id,
                "purpose": purpose.as_str(),
                "expires_at": {
                    "$gt": now_rfc3339()
                }
            })
            .await
            .map_err(|_| Error::DatabaseError {
                operation: "find_one",
                with: "one_time_code",
            })
    }

    /// Save one-time code
    async fn save_code(&self, code: &OneTimeCode) -> Success {
        self.collection::<OneTimeCode>("one_time_codes")
            .update_one(
                doc! {
                    "_id": &code.id
                },
                doc! {
                    "$set": to_document(code).map_err(|_| Error::DatabaseError {
                        operation: "to_document",
                        with: "one_time_code",
                    })?
                },
            )
            .with_options(UpdateOptions::builder().upsert(true).build())
            .await
            .map_err(|_| Error::DatabaseError {
                operation: "upsert_one",
                with: "one_time_code",
            })
            .map(|_| ())
    }

    /// Delete all codes for (account, purpose); no error if none exist
    async fn delete_codes(&self, account_id: &str, purpose: CodePurpose) -> Success {
        self.collection::<OneTimeCode>("one_time_codes")
            .delete_many(doc! {
                "account_id": account_id,
                "purpose": purpose.as_str()
            })
            .await
            .map_err(|_| Error::DatabaseError {
                operation: "delete_many",
                with: "one_time_code",
            })
            .map(|_| ())
    }

    /// Delete every code past its expiry, returning how many were removed
    async fn delete_expired_codes(&self) -> Result<u64> {
        self.collection::<OneTimeCode>("one_time_codes")
            .delete_many(doc! {
                "expires_at": {
                    "$lte": now_rfc3339()
                }
            })
            .await
            .map_err(|_| Error::DatabaseError {
                operation: "delete_many",
                with: "one_time_code",
            })
            .map(|result| result.deleted_count)
    }
}
