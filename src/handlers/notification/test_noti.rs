use axum::{extract::State, Json};
use mongodb::bson::doc;
use std::sync::Arc;

use crate::{
    constants::*,
    jwt::JwtClaims,
    models::{GenericResponse, User},
    utils::AppError,
};

#[cfg(test)]
use mockall_double::double;

#[cfg_attr(test, double)]
use crate::database::AppDatabase;
#[cfg_attr(test, double)]
use crate::push::client::PushClient;

/// Send test notification
///
/// Sends a fixed test push notification back to the devices of the
/// calling user. The target is always the authenticated caller.
#[utoipa::path(
    post,
    path = "/api/v1/notification/test",
    security(("authorization" = [])),
    responses(
        (status = 200, description = "Test notification sent", body = GenericResponse),
        (status = 401, description = "Missing or invalid bearer token", body = GenericResponse),
        (status = 404, description = "User profile not found", body = GenericResponse),
        (status = 412, description = "No notification tokens registered", body = GenericResponse),
        (status = 500, description = "Notification could not be delivered", body = GenericResponse)
    ),
    tag = "Notification API"
)]
pub async fn test_notification_handler(
    claims: JwtClaims,
    State(db): State<Arc<AppDatabase>>,
) -> Result<Json<GenericResponse>, AppError> {
    tracing::debug!("test notification requested by user: {}", claims.id);
    let mut push = PushClient::new();
    let res = send_test_notification(&db, &mut push, &claims.id).await?;
    Ok(Json(res))
}

/// Unlike the daily scan this path is synchronous for the caller, so
/// absence conditions and delivery failures surface as typed errors
/// instead of being swallowed
async fn send_test_notification(
    db: &Arc<AppDatabase>,
    push: &mut PushClient,
    user_id: &str,
) -> Result<GenericResponse, AppError> {
    let filter = doc! {"id": user_id};
    let user = db
        .find_one::<User>(DB_NAME, COLL_USERS, Some(filter), None)
        .await?
        .ok_or(AppError::NotFound("User profile not found".into()))?;
    let fcm_tokens = user.fcm_tokens.unwrap_or_default();
    if fcm_tokens.is_empty() {
        let msg =
            "No notification tokens found for your account. Please ensure notifications are enabled";
        return Err(AppError::FailedPrecondition(msg.into()));
    }
    let outcome = push
        .send_multicast(user_id, &fcm_tokens, TEST_PUSH_TITLE, TEST_PUSH_BODY)
        .await
        .map_err(|err| {
            tracing::error!("error sending test notification to {}: {:?}", user_id, err);
            AppError::AnyError(err)
        })?;
    tracing::debug!(
        "test notification for user {}: {} sent successfully, {} failed",
        user_id,
        outcome.success_count,
        outcome.failure_count
    );
    let res = GenericResponse {
        success: true,
        message: "Test notification sent successfully".to_owned(),
    };
    Ok(res)
}

#[cfg(test)]
mod tests {
    use axum::{body::Body, http::Request, http::StatusCode, routing::post, Router};
    use mockall::predicate::{always, eq};
    use tower::ServiceExt; // for `oneshot` and `ready`

    use super::*;
    use crate::push::client::MulticastOutcome;

    fn user_with_tokens(id: &str, tokens: Option<Vec<&str>>) -> User {
        User {
            id: id.to_string(),
            name: "Test User".to_string(),
            fcm_tokens: tokens.map(|t| t.into_iter().map(String::from).collect()),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_unauthenticated_request_touches_nothing() {
        // the strict mock asserts that no read and no send happens
        let db = Arc::new(AppDatabase::default());
        let app = Router::new()
            .route("/notification/test", post(test_notification_handler))
            .with_state(db);
        let req = Request::builder()
            .uri("/notification/test")
            .method("POST")
            .body(Body::empty())
            .unwrap();
        let res = app.oneshot(req).await.unwrap();
        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_user_not_found() {
        let filter = Some(doc! {"id": "u1"});
        let mut mock_db = AppDatabase::default();
        mock_db
            .expect_find_one::<User>()
            .with(eq(DB_NAME), eq(COLL_USERS), eq(filter), always())
            .times(1)
            .returning(|_, _, _, _| Ok(None));
        let db = Arc::new(mock_db);
        let mut mock_push = PushClient::default();
        let result = send_test_notification(&db, &mut mock_push, "u1").await;
        let Err(AppError::NotFound(msg)) = result else {
            panic!("AppError::NotFound should be received");
        };
        assert_eq!(msg, "User profile not found");
    }

    #[tokio::test]
    async fn test_user_without_tokens_failed_precondition() {
        let mut mock_db = AppDatabase::default();
        mock_db
            .expect_find_one::<User>()
            .times(1)
            .returning(|_, _, _, _| Ok(Some(user_with_tokens("u1", Some(vec![])))));
        let db = Arc::new(mock_db);
        // no expectation on the push client, a send attempt would panic
        let mut mock_push = PushClient::default();
        let result = send_test_notification(&db, &mut mock_push, "u1").await;
        let Err(AppError::FailedPrecondition(_)) = result else {
            panic!("AppError::FailedPrecondition should be received");
        };
    }

    #[tokio::test]
    async fn test_send_success() {
        let mut mock_db = AppDatabase::default();
        mock_db
            .expect_find_one::<User>()
            .times(1)
            .returning(|_, _, _, _| Ok(Some(user_with_tokens("u1", Some(vec!["t1", "t2"])))));
        let db = Arc::new(mock_db);
        let mut mock_push = PushClient::default();
        mock_push
            .expect_send_multicast()
            .withf(|user_id, tokens, title, body| {
                user_id == "u1"
                    && tokens.len() == 2
                    && title == TEST_PUSH_TITLE
                    && body == TEST_PUSH_BODY
            })
            .times(1)
            .returning(|_, _, _, _| Ok(MulticastOutcome { success_count: 2, failure_count: 0 }));
        let result = send_test_notification(&db, &mut mock_push, "u1").await.unwrap();
        assert_eq!(result.success, true);
        assert_eq!(result.message, "Test notification sent successfully");
    }

    #[tokio::test]
    async fn test_send_failure_surfaces_internal_error() {
        let mut mock_db = AppDatabase::default();
        mock_db
            .expect_find_one::<User>()
            .times(1)
            .returning(|_, _, _, _| Ok(Some(user_with_tokens("u1", Some(vec!["t1"])))));
        let db = Arc::new(mock_db);
        let mut mock_push = PushClient::default();
        mock_push
            .expect_send_multicast()
            .times(1)
            .returning(|_, _, _, _| Err(anyhow::anyhow!("fcm transport down")));
        let result = send_test_notification(&db, &mut mock_push, "u1").await;
        let Err(AppError::AnyError(_)) = result else {
            panic!("AppError::AnyError should be received");
        };
    }
}
