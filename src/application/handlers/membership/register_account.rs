//! RegisterAccountHandler - Creates the account record for a signed-in user.

use std::sync::Arc;

use crate::domain::foundation::AuthenticatedUser;
use crate::domain::membership::{Account, MembershipError};
use crate::ports::AccountRepository;

/// Profile details collected at sign-up. The id and email come from the
/// session, never from the request body.
#[derive(Debug, Clone)]
pub struct RegisterAccountCommand {
    pub actor: AuthenticatedUser,
    pub name: String,
    pub phone: String,
    pub gender: Option<String>,
}

#[derive(Debug, Clone)]
pub struct RegisterAccountResult {
    pub account: Account,
    /// False when the account already existed and was returned unchanged.
    pub created: bool,
}

pub struct RegisterAccountHandler {
    accounts: Arc<dyn AccountRepository>,
}

impl RegisterAccountHandler {
    pub fn new(accounts: Arc<dyn AccountRepository>) -> Self {
        Self { accounts }
    }

    pub async fn handle(
        &self,
        cmd: RegisterAccountCommand,
    ) -> Result<RegisterAccountResult, MembershipError> {
        if let Some(account) = self.accounts.find_by_id(&cmd.actor.id).await? {
            return Ok(RegisterAccountResult {
                account,
                created: false,
            });
        }

        let mut account = Account::register(
            cmd.actor.id.clone(),
            cmd.name,
            cmd.actor.email.clone(),
            cmd.phone,
            cmd.gender,
        )?;
        account.is_admin = cmd.actor.is_admin();

        self.accounts.save(&account).await?;
        tracing::info!(account_id = %account.id, "Account registered");

        Ok(RegisterAccountResult {
            account,
            created: true,
        })
    }
}
