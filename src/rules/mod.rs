pub mod mongodb_enrichment;

use crate::models::{AuthContext, LoginUser};
use crate::utils::AppError;
use async_trait::async_trait;

pub use mongodb_enrichment::UserEnrichmentRule;

/// A step of the login pipeline. It may read the user and mutate the context;
/// an error aborts the login.
#[async_trait]
pub trait Rule: Send + Sync {
    fn name(&self) -> &str;

    async fn execute(&self, user: &LoginUser, context: &mut AuthContext) -> Result<(), AppError>;
}
