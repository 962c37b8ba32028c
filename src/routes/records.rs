// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! CRUD routes shared by every record type.

use crate::error::Result;
use crate::extract::{JsonBody, PathParam};
use crate::models::{Project, Resource, Skill};
use crate::services::RecordStore;
use crate::AppState;
use axum::{
    extract::State,
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde::Serialize;
use std::sync::Arc;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// A record type mounted under `/api`.
pub trait Routed: Resource {
    /// Collection path, e.g. `/api/projects`.
    const PATH: &'static str;
    /// Display label used in confirmations ("Project").
    const LABEL: &'static str;

    fn store(state: &AppState) -> &RecordStore<Self>;
}

impl Routed for Project {
    const PATH: &'static str = "/api/projects";
    const LABEL: &'static str = "Project";

    fn store(state: &AppState) -> &RecordStore<Self> {
        &state.projects
    }
}

impl Routed for Skill {
    const PATH: &'static str = "/api/skills";
    const LABEL: &'static str = "Skill";

    fn store(state: &AppState) -> &RecordStore<Self> {
        &state.skills
    }
}

/// List/create on the collection, get/replace/delete on `{id}`.
pub fn routes<R: Routed>() -> Router<Arc<AppState>> {
    Router::new()
        .route(R::PATH, get(list::<R>).post(create::<R>))
        .route(
            &format!("{}/{{id}}", R::PATH),
            get(fetch::<R>).put(update::<R>).delete(remove::<R>),
        )
}

#[derive(Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct DeleteResponse {
    pub success: bool,
    pub message: String,
}

async fn list<R: Routed>(State(state): State<Arc<AppState>>) -> Result<Json<Vec<R>>> {
    Ok(Json(R::store(&state).list().await?))
}

async fn fetch<R: Routed>(
    State(state): State<Arc<AppState>>,
    PathParam(id): PathParam<String>,
) -> Result<Json<R>> {
    Ok(Json(R::store(&state).get(&id).await?))
}

async fn create<R: Routed>(
    State(state): State<Arc<AppState>>,
    JsonBody(input): JsonBody<R::Input>,
) -> Result<(StatusCode, Json<R>)> {
    let record = R::store(&state).create(input).await?;
    Ok((StatusCode::CREATED, Json(record)))
}

async fn update<R: Routed>(
    State(state): State<Arc<AppState>>,
    PathParam(id): PathParam<String>,
    JsonBody(input): JsonBody<R::Input>,
) -> Result<Json<R>> {
    Ok(Json(R::store(&state).update(&id, input).await?))
}

async fn remove<R: Routed>(
    State(state): State<Arc<AppState>>,
    PathParam(id): PathParam<String>,
) -> Result<Json<DeleteResponse>> {
    R::store(&state).delete(&id).await?;
    Ok(Json(DeleteResponse {
        success: true,
        message: format!("{} deleted", R::LABEL),
    }))
}
