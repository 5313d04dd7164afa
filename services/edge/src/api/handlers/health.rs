//! Probe endpoints. The edge has no dependencies to check, so both only report
//! that the process is up; `/health` adds build metadata.

use crate::GIT_COMMIT_HASH;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Json},
};
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, PartialEq, Eq)]
pub struct Health {
    commit: String,
    name: String,
    version: String,
}

pub async fn health() -> impl IntoResponse {
    Json(Health {
        commit: GIT_COMMIT_HASH.to_string(),
        name: env!("CARGO_PKG_NAME").to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

pub async fn live() -> impl IntoResponse {
    StatusCode::OK
}
