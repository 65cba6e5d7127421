use crate::{
    models::{AuthContext, LoginUser},
    rules::Rule,
    utils::AppError,
};
use std::sync::Arc;

/// Runs rules in order against one login. The first failing rule stops the
/// login and its error is returned as is.
#[derive(Clone, Default)]
pub struct RulePipeline {
    rules: Vec<Arc<dyn Rule>>,
}

impl RulePipeline {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_rule(mut self, rule: Arc<dyn Rule>) -> Self {
        self.rules.push(rule);
        self
    }

    pub fn rule_names(&self) -> Vec<&str> {
        self.rules.iter().map(|r| r.name()).collect()
    }

    pub async fn run(&self, user: &LoginUser, mut context: AuthContext) -> Result<AuthContext, AppError> {
        for rule in &self.rules {
            log::debug!("▶️  Running rule '{}' for {}", rule.name(), user.email);
            rule.execute(user, &mut context).await?;
        }

        Ok(context)
    }
}
