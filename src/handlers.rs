//! CRUD handlers: each one translates a request into a single store call plus
//! a rendered page or a redirect to the list route.

use crate::error::AppError;
use crate::forms::{self, FormValues};
use crate::state::AppState;
use crate::store::Record;
use crate::view;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
    Form,
};

fn not_found(state: &AppState, id: i64) -> AppError {
    AppError::NotFound(format!("{} {} does not exist", state.entity.name, id))
}

async fn fetch(state: &AppState, id: i64) -> Result<Record, AppError> {
    state
        .store
        .get(state.entity, id)
        .await?
        .ok_or_else(|| not_found(state, id))
}

/// GET / (student_list)
pub async fn list(State(state): State<AppState>) -> Result<Html<String>, AppError> {
    let records = state.store.list(state.entity).await?;
    Ok(Html(view::list_page(state.entity, &records)))
}

/// GET /view/:id (student_detail)
pub async fn detail(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Html<String>, AppError> {
    let record = fetch(&state, id).await?;
    Ok(Html(view::detail_page(state.entity, &record)))
}

/// GET /new (student_new, form)
pub async fn new_form(State(state): State<AppState>) -> Html<String> {
    Html(view::form_page(
        state.entity,
        "/new",
        &format!("New {}", state.entity.name),
        &FormValues::new(),
        &Default::default(),
    ))
}

/// POST /new (student_new, submit)
pub async fn create(
    State(state): State<AppState>,
    Form(submitted): Form<FormValues>,
) -> Result<Response, AppError> {
    let values = forms::editable_values(state.entity, &submitted);
    if let Err(errors) = forms::validate(state.entity, &values) {
        let page = view::form_page(
            state.entity,
            "/new",
            &format!("New {}", state.entity.name),
            &values,
            &errors,
        );
        return Ok((StatusCode::UNPROCESSABLE_ENTITY, Html(page)).into_response());
    }
    let record = state.store.create(state.entity, &values).await?;
    tracing::info!(entity = state.entity.name, id = record.id, "created");
    Ok(Redirect::to("/").into_response())
}

/// GET /edit/:id (student_edit, form)
pub async fn edit_form(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Html<String>, AppError> {
    let record = fetch(&state, id).await?;
    Ok(Html(view::form_page(
        state.entity,
        &format!("/edit/{}", id),
        &format!("Edit {}", state.entity.name),
        &record.values,
        &Default::default(),
    )))
}

/// POST /edit/:id (student_edit, submit). Unknown id is a 404 before the
/// submission is validated, matching the detail route.
pub async fn edit(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Form(submitted): Form<FormValues>,
) -> Result<Response, AppError> {
    fetch(&state, id).await?;
    let values = forms::editable_values(state.entity, &submitted);
    if let Err(errors) = forms::validate(state.entity, &values) {
        let page = view::form_page(
            state.entity,
            &format!("/edit/{}", id),
            &format!("Edit {}", state.entity.name),
            &values,
            &errors,
        );
        return Ok((StatusCode::UNPROCESSABLE_ENTITY, Html(page)).into_response());
    }
    state
        .store
        .update(state.entity, id, &values)
        .await?
        .ok_or_else(|| not_found(&state, id))?;
    tracing::info!(entity = state.entity.name, id, "updated");
    Ok(Redirect::to("/").into_response())
}

/// GET /delete/:id (student_delete, confirmation step)
pub async fn delete_confirm(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Html<String>, AppError> {
    let record = fetch(&state, id).await?;
    Ok(Html(view::confirm_delete_page(state.entity, &record)))
}

/// POST /delete/:id (student_delete, submit)
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Response, AppError> {
    if !state.store.delete(state.entity, id).await? {
        return Err(not_found(&state, id));
    }
    tracing::info!(entity = state.entity.name, id, "deleted");
    Ok(Redirect::to("/").into_response())
}
