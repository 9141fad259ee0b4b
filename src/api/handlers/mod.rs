use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};

use super::extract::{JsonBody, PathParams};
use super::ApiError;
use crate::db::Database;
use crate::models::*;

// ============================================================
// Health
// ============================================================

pub async fn health() -> impl IntoResponse {
    Json(serde_json::json!({ "status": "ok" }))
}

// ============================================================
// Menus
// ============================================================

pub async fn list_menus(State(db): State<Database>) -> Result<Json<Vec<Menu>>, ApiError> {
    Ok(Json(db.list_menus()?))
}

pub async fn get_menu(
    State(db): State<Database>,
    PathParams(menu_id): PathParams<EntityId>,
) -> Result<Json<Menu>, ApiError> {
    Ok(Json(db.get_menu(menu_id)?))
}

pub async fn create_menu(
    State(db): State<Database>,
    JsonBody(input): JsonBody<CreateMenuInput>,
) -> Result<(StatusCode, Json<Menu>), ApiError> {
    let menu = db.create_menu(input)?;
    Ok((StatusCode::CREATED, Json(menu)))
}

pub async fn update_menu(
    State(db): State<Database>,
    PathParams(menu_id): PathParams<EntityId>,
    JsonBody(input): JsonBody<UpdateMenuInput>,
) -> Result<Json<Menu>, ApiError> {
    Ok(Json(db.update_menu(menu_id, input)?))
}

/// Succeeds whether or not the menu existed.
pub async fn delete_menu(
    State(db): State<Database>,
    PathParams(menu_id): PathParams<EntityId>,
) -> Result<StatusCode, ApiError> {
    db.delete_menu(menu_id)?;
    Ok(StatusCode::OK)
}

// ============================================================
// Submenus
// ============================================================

pub async fn list_submenus(
    State(db): State<Database>,
    PathParams(menu_id): PathParams<EntityId>,
) -> Result<Json<Vec<Submenu>>, ApiError> {
    Ok(Json(db.list_submenus(menu_id)?))
}

pub async fn get_submenu(
    State(db): State<Database>,
    PathParams((menu_id, submenu_id)): PathParams<(EntityId, EntityId)>,
) -> Result<Json<Submenu>, ApiError> {
    Ok(Json(db.get_submenu(menu_id, submenu_id)?))
}

pub async fn create_submenu(
    State(db): State<Database>,
    PathParams(menu_id): PathParams<EntityId>,
    JsonBody(input): JsonBody<CreateSubmenuInput>,
) -> Result<(StatusCode, Json<Submenu>), ApiError> {
    let submenu = db.create_submenu(menu_id, input)?;
    Ok((StatusCode::CREATED, Json(submenu)))
}

pub async fn update_submenu(
    State(db): State<Database>,
    PathParams((menu_id, submenu_id)): PathParams<(EntityId, EntityId)>,
    JsonBody(input): JsonBody<UpdateSubmenuInput>,
) -> Result<Json<Submenu>, ApiError> {
    Ok(Json(db.update_submenu(menu_id, submenu_id, input)?))
}

/// Succeeds whether or not the submenu existed under this menu.
pub async fn delete_submenu(
    State(db): State<Database>,
    PathParams((menu_id, submenu_id)): PathParams<(EntityId, EntityId)>,
) -> Result<StatusCode, ApiError> {
    db.delete_submenu(menu_id, submenu_id)?;
    Ok(StatusCode::OK)
}

// ============================================================
// Dishes
// ============================================================

/// Returns an empty list, not 404, when the submenu path does not resolve.
pub async fn list_dishes(
    State(db): State<Database>,
    PathParams((menu_id, submenu_id)): PathParams<(EntityId, EntityId)>,
) -> Result<Json<Vec<Dish>>, ApiError> {
    Ok(Json(db.list_dishes(menu_id, submenu_id)?))
}

pub async fn get_dish(
    State(db): State<Database>,
    PathParams((menu_id, submenu_id, dish_id)): PathParams<(EntityId, EntityId, EntityId)>,
) -> Result<Json<Dish>, ApiError> {
    Ok(Json(db.get_dish(menu_id, submenu_id, dish_id)?))
}

pub async fn create_dish(
    State(db): State<Database>,
    PathParams((menu_id, submenu_id)): PathParams<(EntityId, EntityId)>,
    JsonBody(input): JsonBody<CreateDishInput>,
) -> Result<(StatusCode, Json<Dish>), ApiError> {
    let dish = db.create_dish(menu_id, submenu_id, input)?;
    Ok((StatusCode::CREATED, Json(dish)))
}

pub async fn update_dish(
    State(db): State<Database>,
    PathParams((menu_id, submenu_id, dish_id)): PathParams<(EntityId, EntityId, EntityId)>,
    JsonBody(input): JsonBody<UpdateDishInput>,
) -> Result<Json<Dish>, ApiError> {
    Ok(Json(db.update_dish(menu_id, submenu_id, dish_id, input)?))
}

pub async fn delete_dish(
    State(db): State<Database>,
    PathParams((menu_id, submenu_id, dish_id)): PathParams<(EntityId, EntityId, EntityId)>,
) -> Result<StatusCode, ApiError> {
    db.delete_dish(menu_id, submenu_id, dish_id)?;
    Ok(StatusCode::OK)
}
