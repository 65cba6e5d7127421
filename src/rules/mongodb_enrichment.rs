// ==================== MONGODB USER ENRICHMENT ====================
// Looks up the login email in the users collection and copies `foo`
// into the id token claims.

use super::Rule;
use crate::{
    config::MongoSettings,
    database::MongoConnector,
    models::{AuthContext, DbUserRecord, LoginUser},
    utils::{AppError, DatabaseError},
};
use async_trait::async_trait;
use mongodb::bson::doc;
use std::sync::Arc;

pub const USERS_COLLECTION: &str = "users";
pub const FOO_CLAIM: &str = "https://example.com/foo";

pub struct UserEnrichmentRule {
    settings: MongoSettings,
    connector: Arc<dyn MongoConnector>,
}

impl UserEnrichmentRule {
    pub fn new(settings: MongoSettings, connector: Arc<dyn MongoConnector>) -> Self {
        Self { settings, connector }
    }

    /// Enrich `context` with the user's `foo` from the database.
    ///
    /// On error the context is left exactly as it was. A missing user, or a
    /// user without `foo`, is not an error.
    pub async fn run(&self, user: &LoginUser, context: &mut AuthContext) -> Result<(), DatabaseError> {
        let client = self.connector.connect(&self.settings.connection_string).await?;
        let users = client
            .database(&self.settings.database)
            .collection(USERS_COLLECTION);

        log::debug!("🔍 Looking up user profile: {}", user.email);

        let record = users
            .find_one(doc! { "email": user.email.as_str() })
            .await?
            .map(DbUserRecord::from);

        match record.and_then(|r| r.foo()) {
            Some(foo) => {
                log::info!("✅ Added {} to id token for {}", FOO_CLAIM, user.email);
                context.set_id_token_claim(FOO_CLAIM, foo);
            }
            None => log::debug!("No profile data for {}", user.email),
        }

        Ok(())
    }

    /// Callback form of [`run`](Self::run): `callback(error, user, context)` is
    /// called once, with `error` set only when the lookup failed.
    pub async fn invoke<F, R>(&self, user: LoginUser, mut context: AuthContext, callback: F) -> R
    where
        F: FnOnce(Option<DatabaseError>, LoginUser, AuthContext) -> R,
    {
        let error = self.run(&user, &mut context).await.err();
        callback(error, user, context)
    }
}

#[async_trait]
impl Rule for UserEnrichmentRule {
    fn name(&self) -> &str {
        "mongodb"
    }

    async fn execute(&self, user: &LoginUser, context: &mut AuthContext) -> Result<(), AppError> {
        let (error, enriched) = self
            .invoke(user.clone(), std::mem::take(context), |error, _, context| (error, context))
            .await;
        *context = enriched;

        match error {
            Some(err) => Err(err.into()),
            None => Ok(()),
        }
    }
}
