use std::sync::Arc;

use anyhow::Result;
use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use sea_orm::{Database, DatabaseConnection};
use sea_orm_migration::MigratorTrait;
use tower::ServiceExt;

use schedule::{
    api::rest::dto::{
        CreateUserReq, ItemEnvelope, MessageDto, ScheduleItemReq, ScheduleListDto, UserEnvelope,
    },
    contract::model::{NewUser, ScheduleFilter, ScheduleItemInput},
    domain::error::DomainError,
    infra::storage::migrations::Migrator,
    Service,
};

/// Create a fresh test database for each test
async fn create_test_db() -> DatabaseConnection {
    let db = Database::connect("sqlite::memory:")
        .await
        .expect("Failed to connect to test database");

    Migrator::up(&db, None)
        .await
        .expect("Failed to run migrations");

    db
}

async fn create_test_service() -> Arc<Service> {
    Arc::new(Service::new(create_test_db().await))
}

async fn create_test_router() -> Router {
    schedule::api::rest::routes::router(create_test_service().await)
}

fn new_user(telegram_id: i64, username: &str) -> NewUser {
    NewUser {
        telegram_id,
        username: username.to_string(),
        first_name: String::new(),
    }
}

fn item_input(user_id: i64, day: &str, start: &str, subject: &str) -> ScheduleItemInput {
    ScheduleItemInput {
        user_id,
        day_of_week: day.to_string(),
        time_start: start.to_string(),
        time_end: "10:30".to_string(),
        subject: subject.to_string(),
        description: String::new(),
    }
}

#[tokio::test]
async fn test_create_then_get_item_round_trip() -> Result<()> {
    let service = create_test_service().await;
    let (user, _) = service.create_or_get_user(new_user(1001, "owner")).await?;

    let mut input = item_input(user.id, "Monday", "09:00", "Math");
    input.description = "room 12".to_string();

    let created = service.create_item(input.clone()).await?;
    assert!(created.id > 0);
    assert_eq!(created.user_id, input.user_id);
    assert_eq!(created.day_of_week, input.day_of_week);
    assert_eq!(created.time_start, input.time_start);
    assert_eq!(created.time_end, input.time_end);
    assert_eq!(created.subject, input.subject);
    assert_eq!(created.description, input.description);

    let fetched = service.get_item(created.id).await?;
    assert_eq!(fetched, created);

    Ok(())
}

#[tokio::test]
async fn test_create_or_get_user_is_idempotent() -> Result<()> {
    let service = create_test_service().await;

    let (first, created) = service
        .create_or_get_user(new_user(123456789, "test_user"))
        .await?;
    assert!(created);
    assert!(first.id > 0);

    // Second call with a different username returns the stored row
    // unchanged: get-or-create, not an upsert.
    let (second, created) = service
        .create_or_get_user(new_user(123456789, "renamed"))
        .await?;
    assert!(!created);
    assert_eq!(second, first);

    Ok(())
}

#[tokio::test]
async fn test_create_or_get_user_rejects_bad_telegram_id() -> Result<()> {
    let service = create_test_service().await;

    let result = service.create_or_get_user(new_user(0, "nobody")).await;
    assert!(matches!(
        result,
        Err(DomainError::Validation { ref field, .. }) if field == "telegram_id"
    ));

    Ok(())
}

#[tokio::test]
async fn test_get_user_not_found() -> Result<()> {
    let service = create_test_service().await;

    let result = service.get_user_by_telegram_id(42).await;
    assert!(matches!(result, Err(DomainError::UserNotFound { .. })));

    Ok(())
}

#[tokio::test]
async fn test_item_validation_reports_first_missing_field() -> Result<()> {
    let service = create_test_service().await;

    let empty = ScheduleItemInput::default();
    let result = service.create_item(empty).await;
    assert!(matches!(
        result,
        Err(DomainError::Validation { ref field, .. }) if field == "user_id"
    ));

    let mut missing_day = item_input(1, "Monday", "09:00", "Math");
    missing_day.day_of_week = String::new();
    let result = service.create_item(missing_day).await;
    assert!(matches!(
        result,
        Err(DomainError::Validation { ref field, .. }) if field == "day_of_week"
    ));

    let mut missing_subject = item_input(1, "Monday", "09:00", "Math");
    missing_subject.subject = "  ".to_string();
    let result = service.create_item(missing_subject).await;
    assert!(matches!(
        result,
        Err(DomainError::Validation { ref field, .. }) if field == "subject"
    ));

    Ok(())
}

#[tokio::test]
async fn test_update_is_full_overwrite() -> Result<()> {
    let service = create_test_service().await;
    let (user, _) = service.create_or_get_user(new_user(1002, "owner")).await?;

    let mut input = item_input(user.id, "Monday", "09:00", "Math");
    input.description = "bring calculator".to_string();
    let created = service.create_item(input).await?;

    // Update carries only the required fields; description is omitted and
    // must come back cleared, not retained.
    let update = item_input(user.id, "Monday", "09:00", "Physics");
    let updated = service.update_item(created.id, update).await?;

    assert_eq!(updated.id, created.id);
    assert_eq!(updated.subject, "Physics");
    assert_eq!(updated.description, "");
    assert_eq!(updated.created_at, created.created_at);

    let fetched = service.get_item(created.id).await?;
    assert_eq!(fetched, updated);

    Ok(())
}

#[tokio::test]
async fn test_update_missing_item_is_not_found() -> Result<()> {
    let service = create_test_service().await;

    let result = service
        .update_item(9999, item_input(1, "Monday", "09:00", "Math"))
        .await;
    assert!(matches!(result, Err(DomainError::ItemNotFound { id: 9999 })));

    Ok(())
}

#[tokio::test]
async fn test_delete_is_silently_idempotent() -> Result<()> {
    let service = create_test_service().await;
    let (user, _) = service.create_or_get_user(new_user(1003, "owner")).await?;

    let created = service
        .create_item(item_input(user.id, "Tuesday", "08:00", "History"))
        .await?;

    service.delete_item(created.id).await?;
    let result = service.get_item(created.id).await;
    assert!(matches!(result, Err(DomainError::ItemNotFound { .. })));

    // Deleting the same id again (or any id that never existed) succeeds.
    service.delete_item(created.id).await?;
    service.delete_item(424242).await?;

    Ok(())
}

#[tokio::test]
async fn test_list_ordering_and_filters() -> Result<()> {
    let service = create_test_service().await;
    let (alice, _) = service.create_or_get_user(new_user(2001, "alice")).await?;
    let (bob, _) = service.create_or_get_user(new_user(2002, "bob")).await?;

    service
        .create_item(item_input(alice.id, "Tuesday", "10:00", "Chemistry"))
        .await?;
    service
        .create_item(item_input(bob.id, "Monday", "08:00", "History"))
        .await?;
    service
        .create_item(item_input(alice.id, "Monday", "09:00", "Math"))
        .await?;

    // No filters: everything, ascending by time_start.
    let all = service.list_items(ScheduleFilter::default()).await?;
    let starts: Vec<&str> = all.iter().map(|e| e.item.time_start.as_str()).collect();
    assert_eq!(starts, vec!["08:00", "09:00", "10:00"]);

    // Every entry carries its eagerly loaded owner.
    for entry in &all {
        let owner = entry.owner.as_ref().expect("owner should be joined");
        assert_eq!(owner.id, entry.item.user_id);
    }

    // Single filter.
    let alices = service
        .list_items(ScheduleFilter {
            user_id: Some(alice.id),
            day_of_week: None,
        })
        .await?;
    assert_eq!(alices.len(), 2);
    assert!(alices.iter().all(|e| e.item.user_id == alice.id));

    let mondays = service
        .list_items(ScheduleFilter {
            user_id: None,
            day_of_week: Some("Monday".to_string()),
        })
        .await?;
    assert_eq!(mondays.len(), 2);

    // Both filters: the intersection.
    let alice_monday = service
        .list_items(ScheduleFilter {
            user_id: Some(alice.id),
            day_of_week: Some("Monday".to_string()),
        })
        .await?;
    assert_eq!(alice_monday.len(), 1);
    assert_eq!(alice_monday[0].item.subject, "Math");

    // No matches is a valid, empty result.
    let fridays = service
        .list_items(ScheduleFilter {
            user_id: None,
            day_of_week: Some("Friday".to_string()),
        })
        .await?;
    assert!(fridays.is_empty());

    Ok(())
}

// --- REST surface ---

fn json_request(method: &str, uri: &str, body: &impl serde::Serialize) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(serde_json::to_string(body).unwrap()))
        .unwrap()
}

fn empty_request(method: &str, uri: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

async fn body_json<T: serde::de::DeserializeOwned>(response: axum::response::Response) -> T {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("failed to read body");
    serde_json::from_slice(&bytes).expect("failed to decode body")
}

#[tokio::test]
async fn test_rest_health() -> Result<()> {
    let router = create_test_router().await;

    let response = router.oneshot(empty_request("GET", "/health")).await?;
    assert_eq!(response.status(), StatusCode::OK);

    let health: schedule::api::rest::dto::HealthDto = body_json(response).await;
    assert_eq!(health.status, "OK");
    assert_eq!(health.database, "connected");

    Ok(())
}

#[tokio::test]
async fn test_rest_create_user_twice() -> Result<()> {
    let router = create_test_router().await;
    let req = CreateUserReq {
        telegram_id: 123456789,
        username: "test_user".to_string(),
        first_name: String::new(),
    };

    let response = router
        .clone()
        .oneshot(json_request("POST", "/api/users", &req))
        .await?;
    assert_eq!(response.status(), StatusCode::CREATED);
    let first: UserEnvelope = body_json(response).await;
    assert!(first.user.id > 0);
    assert_eq!(first.user.telegram_id, 123456789);
    assert_eq!(first.message.as_deref(), Some("User created successfully"));

    let response = router
        .oneshot(json_request("POST", "/api/users", &req))
        .await?;
    assert_eq!(response.status(), StatusCode::OK);
    let second: UserEnvelope = body_json(response).await;
    assert_eq!(second.user.id, first.user.id);
    assert_eq!(second.message.as_deref(), Some("User already exists"));

    Ok(())
}

#[tokio::test]
async fn test_rest_get_user() -> Result<()> {
    let router = create_test_router().await;
    let req = CreateUserReq {
        telegram_id: 555,
        username: "lookup".to_string(),
        first_name: "Look".to_string(),
    };

    router
        .clone()
        .oneshot(json_request("POST", "/api/users", &req))
        .await?;

    let response = router
        .clone()
        .oneshot(empty_request("GET", "/api/users/555"))
        .await?;
    assert_eq!(response.status(), StatusCode::OK);
    let envelope: UserEnvelope = body_json(response).await;
    assert_eq!(envelope.user.username, "lookup");

    let response = router
        .clone()
        .oneshot(empty_request("GET", "/api/users/556"))
        .await?;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    // A non-numeric path id is a client error.
    let response = router
        .oneshot(empty_request("GET", "/api/users/not-a-number"))
        .await?;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    Ok(())
}

#[tokio::test]
async fn test_rest_schedule_create_and_filter() -> Result<()> {
    let router = create_test_router().await;

    let user_req = CreateUserReq {
        telegram_id: 777,
        username: "student".to_string(),
        first_name: String::new(),
    };
    let response = router
        .clone()
        .oneshot(json_request("POST", "/api/users", &user_req))
        .await?;
    let user: UserEnvelope = body_json(response).await;

    let item_req = ScheduleItemReq {
        user_id: user.user.id,
        day_of_week: "Monday".to_string(),
        time_start: "09:00".to_string(),
        time_end: "10:30".to_string(),
        subject: "Math".to_string(),
        description: String::new(),
    };
    let response = router
        .clone()
        .oneshot(json_request("POST", "/api/schedule", &item_req))
        .await?;
    assert_eq!(response.status(), StatusCode::CREATED);
    let created: ItemEnvelope = body_json(response).await;
    assert!(created.item.id > 0);
    assert_eq!(created.message.as_deref(), Some("Schedule item created"));

    let response = router
        .clone()
        .oneshot(empty_request("GET", "/api/schedule?day=Monday"))
        .await?;
    assert_eq!(response.status(), StatusCode::OK);
    let list: ScheduleListDto = body_json(response).await;
    assert_eq!(list.items.len(), 1);
    assert_eq!(list.items[0].id, created.item.id);
    assert_eq!(list.items[0].subject, "Math");

    let uri = format!("/api/schedule?user_id={}&day=Monday", user.user.id);
    let response = router.clone().oneshot(empty_request("GET", &uri)).await?;
    let list: ScheduleListDto = body_json(response).await;
    assert_eq!(list.items.len(), 1);

    let response = router
        .oneshot(empty_request("GET", "/api/schedule?day=Friday"))
        .await?;
    let list: ScheduleListDto = body_json(response).await;
    assert!(list.items.is_empty());

    Ok(())
}

#[tokio::test]
async fn test_rest_get_schedule_item_by_id() -> Result<()> {
    let router = create_test_router().await;

    let user_req = CreateUserReq {
        telegram_id: 888,
        username: String::new(),
        first_name: String::new(),
    };
    let response = router
        .clone()
        .oneshot(json_request("POST", "/api/users", &user_req))
        .await?;
    let user: UserEnvelope = body_json(response).await;

    let item_req = ScheduleItemReq {
        user_id: user.user.id,
        day_of_week: "Wednesday".to_string(),
        time_start: "12:00".to_string(),
        time_end: "13:00".to_string(),
        subject: "Biology".to_string(),
        description: String::new(),
    };
    let response = router
        .clone()
        .oneshot(json_request("POST", "/api/schedule", &item_req))
        .await?;
    let created: ItemEnvelope = body_json(response).await;

    let uri = format!("/api/schedule/{}", created.item.id);
    let response = router.clone().oneshot(empty_request("GET", &uri)).await?;
    assert_eq!(response.status(), StatusCode::OK);
    let fetched: ItemEnvelope = body_json(response).await;
    assert_eq!(fetched.item.subject, "Biology");

    let response = router
        .oneshot(empty_request("GET", "/api/schedule/9999"))
        .await?;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    Ok(())
}

#[tokio::test]
async fn test_rest_validation_error_body() -> Result<()> {
    let router = create_test_router().await;

    let missing_subject = ScheduleItemReq {
        user_id: 1,
        day_of_week: "Monday".to_string(),
        time_start: "09:00".to_string(),
        time_end: "10:30".to_string(),
        subject: String::new(),
        description: String::new(),
    };
    let response = router
        .oneshot(json_request("POST", "/api/schedule", &missing_subject))
        .await?;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body: serde_json::Value = body_json(response).await;
    let message = body["error"].as_str().expect("error message");
    assert!(message.contains("subject"));

    Ok(())
}

#[tokio::test]
async fn test_rest_put_missing_then_delete_same_id() -> Result<()> {
    let router = create_test_router().await;

    let update = ScheduleItemReq {
        user_id: 1,
        day_of_week: "Monday".to_string(),
        time_start: "09:00".to_string(),
        time_end: "10:30".to_string(),
        subject: "Math".to_string(),
        description: String::new(),
    };
    let response = router
        .clone()
        .oneshot(json_request("PUT", "/api/schedule/31337", &update))
        .await?;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    // Delete on the same missing id still confirms success.
    let response = router
        .oneshot(empty_request("DELETE", "/api/schedule/31337"))
        .await?;
    assert_eq!(response.status(), StatusCode::OK);
    let confirmation: MessageDto = body_json(response).await;
    assert_eq!(confirmation.message, "Schedule item deleted");

    Ok(())
}

#[tokio::test]
async fn test_rest_update_clears_omitted_fields() -> Result<()> {
    let router = create_test_router().await;

    let user_req = CreateUserReq {
        telegram_id: 999,
        username: String::new(),
        first_name: String::new(),
    };
    let response = router
        .clone()
        .oneshot(json_request("POST", "/api/users", &user_req))
        .await?;
    let user: UserEnvelope = body_json(response).await;

    let create = ScheduleItemReq {
        user_id: user.user.id,
        day_of_week: "Thursday".to_string(),
        time_start: "14:00".to_string(),
        time_end: "15:00".to_string(),
        subject: "Art".to_string(),
        description: "bring brushes".to_string(),
    };
    let response = router
        .clone()
        .oneshot(json_request("POST", "/api/schedule", &create))
        .await?;
    let created: ItemEnvelope = body_json(response).await;

    // Raw body without a description field: the full-overwrite contract
    // clears it.
    let uri = format!("/api/schedule/{}", created.item.id);
    let raw = serde_json::json!({
        "user_id": user.user.id,
        "day_of_week": "Thursday",
        "time_start": "14:00",
        "time_end": "15:00",
        "subject": "Sculpture"
    });
    let response = router
        .oneshot(json_request("PUT", &uri, &raw))
        .await?;
    assert_eq!(response.status(), StatusCode::OK);
    let updated: ItemEnvelope = body_json(response).await;
    assert_eq!(updated.item.subject, "Sculpture");
    assert_eq!(updated.item.description, "");
    assert_eq!(updated.message.as_deref(), Some("Schedule item updated"));

    Ok(())
}
