use crate::error::DealbirdError;
use actix_web::HttpRequest;
use dealbird_domain::Account;
use dealbird_infra::DealbirdContext;

pub async fn protect_account_route(
    req: &HttpRequest,
    ctx: &DealbirdContext,
) -> Result<Account, DealbirdError> {
    let api_key = match req.headers().get("x-api-key") {
        Some(api_key) => match api_key.to_str() {
            Ok(api_key) => api_key,
            Err(_) => {
                return Err(DealbirdError::Unauthorized(
                    "Malformed api key provided".to_string(),
                ))
            }
        },
        None => {
            return Err(DealbirdError::Unauthorized(
                "Unable to find api-key in x-api-key header".to_string(),
            ))
        }
    };

    let account = ctx.repos.accounts.find_by_apikey(api_key).await;

    match account {
        Some(acc) => Ok(acc),
        None => Err(DealbirdError::Unauthorized(
            "Invalid api-key provided in x-api-key header".to_string(),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::test::TestRequest;
    use dealbird_infra::setup_context;

    async fn setup_account(ctx: &DealbirdContext) -> Account {
        let account = Account::new();
        ctx.repos
            .accounts
            .insert(&account)
            .await
            .expect("To insert account");
        account
    }

    #[actix_web::main]
    #[test]
    async fn rejects_missing_or_bogus_api_key() {
        let ctx = setup_context().await;
        setup_account(&ctx).await;

        let req = TestRequest::default().to_http_request();
        assert!(protect_account_route(&req, &ctx).await.is_err());

        let req = TestRequest::default()
            .insert_header(("x-api-key", "sk_bogus"))
            .to_http_request();
        assert!(protect_account_route(&req, &ctx).await.is_err());
    }

    #[actix_web::main]
    #[test]
    async fn accepts_valid_api_key() {
        let ctx = setup_context().await;
        let account = setup_account(&ctx).await;

        let req = TestRequest::default()
            .insert_header(("x-api-key", account.secret_api_key.clone()))
            .to_http_request();
        let res = protect_account_route(&req, &ctx).await;
        assert_eq!(res.expect("To authenticate account").id, account.id);
    }
}
