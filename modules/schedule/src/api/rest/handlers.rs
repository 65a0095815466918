use std::sync::Arc;

use axum::{
    extract::{Path, Query},
    http::StatusCode,
    response::Json,
    Extension,
};
use tracing::info;

use crate::api::rest::dto::{
    CreateUserReq, HealthDto, ItemEnvelope, ListScheduleQuery, MessageDto, ScheduleItemDto,
    ScheduleItemReq, ScheduleListDto, UserEnvelope,
};
use crate::api::rest::error::ApiError;
use crate::domain::service::Service;

/// Health check
pub async fn health() -> Json<HealthDto> {
    Json(HealthDto {
        status: "OK".to_string(),
        service: "schedule-backend".to_string(),
        database: "connected".to_string(),
    })
}

/// Create a user, or return the existing one for this telegram_id
pub async fn create_user(
    Extension(svc): Extension<Arc<Service>>,
    Json(req): Json<CreateUserReq>,
) -> Result<(StatusCode, Json<UserEnvelope>), ApiError> {
    info!("Creating user: {:?}", req);

    let (user, created) = svc.create_or_get_user(req.into()).await?;
    let (status, message) = if created {
        (StatusCode::CREATED, "User created successfully")
    } else {
        (StatusCode::OK, "User already exists")
    };

    Ok((
        status,
        Json(UserEnvelope {
            user: user.into(),
            message: Some(message.to_string()),
        }),
    ))
}

/// Get a user by Telegram ID
pub async fn get_user(
    Extension(svc): Extension<Arc<Service>>,
    Path(telegram_id): Path<i64>,
) -> Result<Json<UserEnvelope>, ApiError> {
    info!("Getting user with telegram_id: {}", telegram_id);

    let user = svc.get_user_by_telegram_id(telegram_id).await?;
    Ok(Json(UserEnvelope {
        user: user.into(),
        message: None,
    }))
}

/// Create a schedule item
pub async fn create_schedule_item(
    Extension(svc): Extension<Arc<Service>>,
    Json(req): Json<ScheduleItemReq>,
) -> Result<(StatusCode, Json<ItemEnvelope>), ApiError> {
    info!("Creating schedule item: {:?}", req);

    let item = svc.create_item(req.into()).await?;
    Ok((
        StatusCode::CREATED,
        Json(ItemEnvelope {
            item: item.into(),
            message: Some("Schedule item created".to_string()),
        }),
    ))
}

/// List schedule items with optional user/day filters
pub async fn list_schedule(
    Extension(svc): Extension<Arc<Service>>,
    Query(query): Query<ListScheduleQuery>,
) -> Result<Json<ScheduleListDto>, ApiError> {
    info!("Listing schedule with query: {:?}", query);

    let entries = svc.list_items(query.into()).await?;
    // The owner is loaded with each entry but never serialized.
    let items = entries
        .into_iter()
        .map(|entry| ScheduleItemDto::from(entry.item))
        .collect();

    Ok(Json(ScheduleListDto { items }))
}

/// Get a schedule item by id
pub async fn get_schedule_item(
    Extension(svc): Extension<Arc<Service>>,
    Path(id): Path<i64>,
) -> Result<Json<ItemEnvelope>, ApiError> {
    info!("Getting schedule item: {}", id);

    let item = svc.get_item(id).await?;
    Ok(Json(ItemEnvelope {
        item: item.into(),
        message: None,
    }))
}

/// Overwrite a schedule item
pub async fn update_schedule_item(
    Extension(svc): Extension<Arc<Service>>,
    Path(id): Path<i64>,
    Json(req): Json<ScheduleItemReq>,
) -> Result<Json<ItemEnvelope>, ApiError> {
    info!("Updating schedule item {} with: {:?}", id, req);

    let item = svc.update_item(id, req.into()).await?;
    Ok(Json(ItemEnvelope {
        item: item.into(),
        message: Some("Schedule item updated".to_string()),
    }))
}

/// Delete a schedule item; succeeds even when the id is already gone
pub async fn delete_schedule_item(
    Extension(svc): Extension<Arc<Service>>,
    Path(id): Path<i64>,
) -> Result<Json<MessageDto>, ApiError> {
    info!("Deleting schedule item: {}", id);

    svc.delete_item(id).await?;
    Ok(Json(MessageDto {
        message: "Schedule item deleted".to_string(),
    }))
}
