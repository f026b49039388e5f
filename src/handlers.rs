use crate::errors::AppError;
use crate::models::{BehaviorRecord, BehaviorStats, NewBehavior, ResetResponse};
use crate::service::BehaviorService;
use crate::state::AppState;
use crate::storage::FileStore;
use crate::ui::{render_analytics, render_dashboard, render_tracker};
use axum::{
    extract::{rejection::JsonRejection, State},
    response::{Html, Redirect},
    Form, Json,
};
use std::sync::Arc;

const RECENT_ON_DASHBOARD: usize = 5;

pub async fn index() -> Redirect {
    Redirect::to("/dashboard")
}

pub async fn dashboard(State(state): State<AppState>) -> Html<String> {
    let service = state.service.lock().await;
    let stats = service.stats();
    let behaviors = service.all_behaviors();
    let recent = &behaviors[..behaviors.len().min(RECENT_ON_DASHBOARD)];
    Html(render_dashboard(&stats, recent))
}

pub async fn tracker(State(state): State<AppState>) -> Html<String> {
    let service = state.service.lock().await;
    Html(render_tracker(service.all_behaviors()))
}

pub async fn analytics(State(state): State<AppState>) -> Html<String> {
    let service = state.service.lock().await;
    Html(render_analytics(&service.stats()))
}

pub async fn tracker_add(
    State(state): State<AppState>,
    Form(payload): Form<NewBehavior>,
) -> Result<Redirect, AppError> {
    mutate(&state, move |service| service.add_behavior(payload)).await?;
    Ok(Redirect::to("/tracker"))
}

pub async fn tracker_reset(State(state): State<AppState>) -> Result<Redirect, AppError> {
    mutate(&state, |service| service.reset()).await?;
    Ok(Redirect::to("/tracker"))
}

pub async fn get_behaviors(State(state): State<AppState>) -> Json<Vec<BehaviorRecord>> {
    let service = state.service.lock().await;
    Json(service.all_behaviors().to_vec())
}

pub async fn add_behavior(
    State(state): State<AppState>,
    payload: Result<Json<NewBehavior>, JsonRejection>,
) -> Result<Json<BehaviorRecord>, AppError> {
    let Json(payload) = payload.map_err(|err| AppError::bad_request(err.body_text()))?;
    let record = mutate(&state, move |service| service.add_behavior(payload)).await?;
    Ok(Json(record))
}

pub async fn get_stats(State(state): State<AppState>) -> Json<BehaviorStats> {
    let service = state.service.lock().await;
    Json(service.stats())
}

pub async fn reset(State(state): State<AppState>) -> Result<Json<ResetResponse>, AppError> {
    let total_actions = mutate(&state, |service| {
        service.reset();
        service.all_behaviors().len() as u64
    })
    .await?;
    Ok(Json(ResetResponse { total_actions }))
}

/// Runs a mutation, and the file write behind it, on the blocking pool.
pub(crate) async fn mutate<T, F>(state: &AppState, apply: F) -> Result<T, AppError>
where
    F: FnOnce(&mut BehaviorService<FileStore>) -> T + Send + 'static,
    T: Send + 'static,
{
    let mut service = Arc::clone(&state.service).lock_owned().await;
    tokio::task::spawn_blocking(move || apply(&mut service))
        .await
        .map_err(AppError::internal)
}
