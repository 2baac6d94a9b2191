use crate::{
    error::DealbirdError,
    shared::usecase::{execute, UseCase},
};
use actix_web::{web, HttpResponse};
use dealbird_api_structs::create_account::{APIResponse, RequestBody};
use dealbird_domain::Account;
use dealbird_infra::DealbirdContext;

/// Account signup is gated by a deployment-wide secret code rather than an
/// API key, since the caller has no key yet. The response carries the fresh
/// `secret_api_key` that every admin route authenticates with.
pub async fn create_account_controller(
    ctx: web::Data<DealbirdContext>,
    body: web::Json<RequestBody>,
) -> Result<HttpResponse, DealbirdError> {
    let usecase = CreateAccountUseCase { code: body.0.code };
    execute(usecase, &ctx)
        .await
        .map(|res| HttpResponse::Created().json(APIResponse::new(res.account)))
        .map_err(DealbirdError::from)
}

#[derive(Debug)]
struct CreateAccountUseCase {
    code: String,
}

#[derive(Debug)]
enum UseCaseError {
    InvalidSecretCode,
    Storage,
}

impl From<UseCaseError> for DealbirdError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::InvalidSecretCode => {
                Self::Unauthorized("Invalid create account code provided".into())
            }
            UseCaseError::Storage => Self::InternalError,
        }
    }
}

#[derive(Debug)]
struct UseCaseRes {
    pub account: Account,
}

#[async_trait::async_trait(?Send)]
impl UseCase for CreateAccountUseCase {
    type Response = UseCaseRes;

    type Error = UseCaseError;

    const NAME: &'static str = "CreateAccount";

    async fn execute(&mut self, ctx: &DealbirdContext) -> Result<Self::Response, Self::Error> {
        if self.code != ctx.config.create_account_secret_code {
            return Err(UseCaseError::InvalidSecretCode);
        }

        // A new account starts without a webhook; reminders for it are
        // skipped until one is configured.
        let account = Account::new();
        match ctx.repos.accounts.insert(&account).await {
            Ok(_) => Ok(UseCaseRes { account }),
            Err(_) => Err(UseCaseError::Storage),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dealbird_infra::setup_context;

    #[actix_web::main]
    #[test]
    async fn rejects_invalid_create_account_code() {
        let ctx = setup_context().await;
        let mut usecase = CreateAccountUseCase {
            code: format!("{}-invalid", ctx.config.create_account_secret_code),
        };
        assert!(usecase.execute(&ctx).await.is_err());
    }

    #[actix_web::main]
    #[test]
    async fn creates_account_with_api_key_and_no_webhook() {
        let ctx = setup_context().await;
        let mut usecase = CreateAccountUseCase {
            code: ctx.config.create_account_secret_code.clone(),
        };
        let res = usecase.execute(&ctx).await.expect("To create account");
        assert!(res.account.secret_api_key.starts_with("sk_"));
        assert!(res.account.settings.webhook.is_none());
        assert!(ctx.repos.accounts.find(&res.account.id).await.is_some());
    }
}
