use axum::extract::State;
use serde_json::Value;

use albayan_core::models::Item;

use crate::error::ApiError;
use crate::extract::UuidPath;
use crate::response::Reply;
use crate::routes::DEFINITION_ID;
use crate::state::AppState;
use crate::upload::DefinitionForm;

pub async fn list_definitions(
    State(state): State<AppState>,
) -> Result<Reply<Vec<Item>>, ApiError> {
    let definitions = state.definitions.list().await?;
    Ok(Reply::ok(definitions))
}

pub async fn create_definition(
    State(state): State<AppState>,
    form: DefinitionForm,
) -> Result<Reply<Item>, ApiError> {
    state
        .schemas
        .report_definition
        .check(&Value::Object(form.fields.clone()))?;

    let definition = state.definitions.create(form.fields, form.file).await?;
    Ok(Reply::created(definition))
}

pub async fn get_definition(
    State(state): State<AppState>,
    path: UuidPath,
) -> Result<Reply<Item>, ApiError> {
    let id = path.get(DEFINITION_ID)?;
    let definition = state.definitions.get(id).await?.ok_or(ApiError::NotFound)?;
    Ok(Reply::ok(definition))
}

pub async fn update_definition(
    State(state): State<AppState>,
    path: UuidPath,
    form: DefinitionForm,
) -> Result<Reply<Item>, ApiError> {
    let id = path.get(DEFINITION_ID)?;
    state
        .schemas
        .report_definition
        .check(&Value::Object(form.fields.clone()))?;

    let definition = state.definitions.update(id, form.fields, form.file).await?;
    Ok(Reply::ok(definition))
}

pub async fn delete_definition(
    State(state): State<AppState>,
    path: UuidPath,
) -> Result<Reply<()>, ApiError> {
    let id = path.get(DEFINITION_ID)?;
    state.definitions.delete(id).await?;
    Ok(Reply::accepted())
}
