//! HTTP routing table.

use axum::{
    Router,
    routing::{get, patch},
};
use tower_http::trace::TraceLayer;

use crate::{handlers, services::account_service::AccountService};

/// Build the application router around a shared `AccountService`.
pub fn router(service: AccountService) -> Router {
    Router::new()
        .route("/health", get(handlers::health::health_check))
        .route(
            "/account",
            get(handlers::accounts::list_accounts).post(handlers::accounts::create_account),
        )
        .route(
            "/account/{id}",
            get(handlers::accounts::get_account)
                .patch(handlers::accounts::withdraw)
                .delete(handlers::accounts::delete_account),
        )
        .route("/account/deposit/{id}", patch(handlers::accounts::deposit))
        .layer(TraceLayer::new_for_http())
        .with_state(service)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::{
        body::{Body, to_bytes},
        http::{Method, Request, StatusCode, header},
    };
    use serde_json::{Value, json};
    use tower::ServiceExt;

    use super::*;
    use crate::repository::memory::InMemoryAccountRepository;

    fn app() -> Router {
        router(AccountService::new(Arc::new(InMemoryAccountRepository::new())))
    }

    async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let mut request = Request::builder().method(method).uri(uri);
        let body = match body {
            Some(value) => {
                request = request.header(header::CONTENT_TYPE, "application/json");
                Body::from(value.to_string())
            }
            None => Body::empty(),
        };

        let response = app
            .clone()
            .oneshot(request.body(body).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };

        (status, value)
    }

    fn sample() -> Value {
        json!({ "number": 123, "ag": "ABC", "type": "SAVINGS", "balance": 100 })
    }

    #[tokio::test]
    async fn account_lifecycle() {
        let app = app();

        let (status, created) = send(&app, Method::POST, "/account", Some(sample())).await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(created["id"], 1);
        assert_eq!(created["number"], 123);
        assert_eq!(created["ag"], "ABC");
        assert_eq!(created["type"], "SAVINGS");
        assert_eq!(created["balance"], 100.0);

        let (status, list) = send(&app, Method::GET, "/account", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(list.as_array().unwrap().len(), 1);

        let (status, account) =
            send(&app, Method::PATCH, "/account/1", Some(json!({ "amount": 2 }))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(account["balance"], 98.0);

        let (status, account) = send(
            &app,
            Method::PATCH,
            "/account/deposit/1",
            Some(json!({ "amount": 50 })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(account["balance"], 148.0);

        let (status, error) =
            send(&app, Method::PATCH, "/account/1", Some(json!({ "amount": 500 }))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(error["error"]["message"], "Insufficient balance");

        let (_, account) = send(&app, Method::GET, "/account/1", None).await;
        assert_eq!(account["balance"], 148.0);

        let (status, deleted) = send(&app, Method::DELETE, "/account/1", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(deleted, json!(true));

        let (status, error) = send(&app, Method::GET, "/account/1", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(error["error"]["code"], "not_found");
        assert_eq!(error["error"]["message"], "Account with id 1 not found");
    }

    #[tokio::test]
    async fn empty_store_lists_nothing() {
        let (status, list) = send(&app(), Method::GET, "/account", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(list, json!([]));
    }

    #[tokio::test]
    async fn duplicate_number_returns_conflict() {
        let app = app();
        send(&app, Method::POST, "/account", Some(sample())).await;

        let (status, error) = send(&app, Method::POST, "/account", Some(sample())).await;
        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(error["error"]["message"], "Account number must be unique");
    }

    #[tokio::test]
    async fn validation_errors_are_bad_requests() {
        let app = app();

        let (status, error) = send(
            &app,
            Method::POST,
            "/account",
            Some(json!({ "number": 1, "ag": "", "type": "CHECKING", "balance": 0 })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(error["error"]["message"], "ag should not be empty");

        let (status, error) = send(
            &app,
            Method::POST,
            "/account",
            Some(json!({ "number": 1, "ag": "A", "type": "GOLD", "balance": 0 })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(
            error["error"]["message"],
            "type must be one of the following values: SAVINGS, CHECKING"
        );

        let (status, _) = send(
            &app,
            Method::POST,
            "/account",
            Some(json!({ "number": "abc", "ag": "A", "type": "SAVINGS", "balance": 0 })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, error) = send(
            &app,
            Method::POST,
            "/account",
            Some(json!({ "number": 1, "ag": "A", "type": 5, "balance": 0 })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(
            error["error"]["message"],
            "type must be one of the following values: SAVINGS, CHECKING"
        );
    }

    #[tokio::test]
    async fn balance_overflow_is_bad_request() {
        let app = app();

        let (status, _) = send(
            &app,
            Method::POST,
            "/account",
            Some(json!({ "number": 1, "ag": "A", "type": "SAVINGS", "balance": 1.5e308 })),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);

        let (status, error) = send(
            &app,
            Method::PATCH,
            "/account/deposit/1",
            Some(json!({ "amount": 1.5e308 })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(error["error"]["message"], "Resulting balance is out of range");

        let (_, account) = send(&app, Method::GET, "/account/1", None).await;
        assert_eq!(account["balance"], 1.5e308);
    }

    #[tokio::test]
    async fn non_numeric_id_is_bad_request() {
        let (status, error) = send(&app(), Method::GET, "/account/abc", None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(error["error"]["code"], "bad_request");
    }

    #[tokio::test]
    async fn deposit_into_missing_account_is_not_found() {
        let (status, _) = send(
            &app(),
            Method::PATCH,
            "/account/deposit/42",
            Some(json!({ "amount": 1 })),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn health_reports_connected() {
        let (status, body) = send(&app(), Method::GET, "/health", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "healthy");
    }
}
