use super::{AuthContext, LoginUser};
use serde::{Deserialize, Serialize};

/// One login, as read by the CLI.
#[derive(Debug, Deserialize, Clone)]
pub struct LoginEvent {
    pub user: LoginUser,
    #[serde(default)]
    pub context: AuthContext,
}

/// What the CLI prints after the rules ran.
#[derive(Debug, Serialize)]
pub struct LoginOutcome {
    pub user: LoginUser,
    pub context: AuthContext,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id_token: Option<String>,
}
