//! services/api/src/web/tutorials.rs
//!
//! Handlers for the tutorial catalog: listing, lookup, ownership queries,
//! mutations, reviews and the aggregate statistics.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Json},
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::info;
use tutorhub_core::catalog::{fields, distinct_languages, PriceOrder, TutorialStats};
use tutorhub_core::domain::{Collection, Document, Filter, FindOptions};
use utoipa::{IntoParams, ToSchema};

use crate::web::error::HttpError;
use crate::web::state::AppState;

//=========================================================================================
// Request/Response Types
//=========================================================================================

#[derive(Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct TutorialListQuery {
    /// Exact language to filter by.
    pub category: Option<String>,
    /// `low2high` or `high2low`; anything else keeps the store order.
    pub sort_by: Option<String>,
}

#[derive(Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct OwnerQuery {
    pub email: String,
}

#[derive(Deserialize, ToSchema)]
pub struct ReviewRequest {
    pub id: String,
}

#[derive(Serialize, ToSchema)]
pub struct ReviewResponse {
    pub success: bool,
    pub message: String,
    pub review: i64,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StatsResponse {
    pub total_reviews: i64,
    pub total_languages: usize,
    pub total_tutorials: usize,
    pub total_tutors: usize,
}

impl From<TutorialStats> for StatsResponse {
    fn from(stats: TutorialStats) -> Self {
        Self {
            total_reviews: stats.total_reviews,
            total_languages: stats.total_languages,
            total_tutorials: stats.total_tutorials,
            total_tutors: stats.total_tutors,
        }
    }
}

//=========================================================================================
// Read Handlers
//=========================================================================================

/// GET /findTutorials - List tutorials, optionally filtered by language and sorted by price
#[utoipa::path(
    get,
    path = "/findTutorials",
    params(TutorialListQuery),
    responses(
        (status = 200, description = "Matching tutorial documents"),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn find_tutorials_handler(
    State(state): State<Arc<AppState>>,
    Query(query): Query<TutorialListQuery>,
) -> Result<Json<Vec<Document>>, HttpError> {
    let mut filter = Filter::new();
    if let Some(category) = query.category.filter(|c| !c.is_empty()) {
        filter = filter.eq(fields::LANGUAGE, category);
    }

    let options = match query.sort_by.as_deref().and_then(PriceOrder::parse) {
        Some(order) => FindOptions::sorted(order.to_sort()),
        None => FindOptions::default(),
    };

    let tutorials = state
        .store
        .find(Collection::Tutorials, &filter, &options)
        .await?;
    Ok(Json(tutorials))
}

/// GET /findCategories - Distinct tutorial languages
#[utoipa::path(
    get,
    path = "/findCategories",
    responses(
        (status = 200, description = "Distinct languages", body = Vec<String>),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn find_categories_handler(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<String>>, HttpError> {
    let tutorials = state
        .store
        .find(Collection::Tutorials, &Filter::new(), &FindOptions::default())
        .await?;
    Ok(Json(distinct_languages(&tutorials)))
}

/// GET /findTutors/{category} - Tutorials teaching exactly this language
#[utoipa::path(
    get,
    path = "/findTutors/{category}",
    params(("category" = String, Path, description = "Language to match exactly")),
    responses(
        (status = 200, description = "Matching tutorial documents, possibly empty"),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn find_tutors_by_category_handler(
    State(state): State<Arc<AppState>>,
    Path(category): Path<String>,
) -> Result<Json<Vec<Document>>, HttpError> {
    let filter = Filter::new().eq(fields::LANGUAGE, category);
    let tutors = state
        .store
        .find(Collection::Tutorials, &filter, &FindOptions::default())
        .await?;
    Ok(Json(tutors))
}

/// GET /tutor/{id} - A single tutorial, or `null` when the id is unknown
#[utoipa::path(
    get,
    path = "/tutor/{id}",
    params(("id" = String, Path, description = "Tutorial identifier")),
    responses(
        (status = 200, description = "The tutorial document or null"),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn tutor_by_id_handler(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<Option<Document>>, HttpError> {
    let tutorial = state.store.find_by_id(Collection::Tutorials, &id).await?;
    Ok(Json(tutorial))
}

/// GET /myTutorials - Tutorials owned by the given email
#[utoipa::path(
    get,
    path = "/myTutorials",
    params(OwnerQuery),
    responses(
        (status = 200, description = "Tutorial documents owned by the email"),
        (status = 400, description = "Missing email"),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn my_tutorials_handler(
    State(state): State<Arc<AppState>>,
    Query(query): Query<OwnerQuery>,
) -> Result<Json<Vec<Document>>, HttpError> {
    let filter = Filter::new().eq(fields::EMAIL, query.email);
    let tutorials = state
        .store
        .find(Collection::Tutorials, &filter, &FindOptions::default())
        .await?;
    Ok(Json(tutorials))
}

/// GET /stats - Aggregate counts over the whole catalog
#[utoipa::path(
    get,
    path = "/stats",
    responses(
        (status = 200, description = "Catalog statistics", body = StatsResponse),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn stats_handler(
    State(state): State<Arc<AppState>>,
) -> Result<Json<StatsResponse>, HttpError> {
    let tutorials = state
        .store
        .find(Collection::Tutorials, &Filter::new(), &FindOptions::default())
        .await?;
    Ok(Json(TutorialStats::compute(&tutorials).into()))
}

//=========================================================================================
// Mutation Handlers
//=========================================================================================

/// POST /addTutorial - Store the body as a new tutorial
#[utoipa::path(
    post,
    path = "/addTutorial",
    request_body(content_type = "application/json", description = "Any tutorial document."),
    responses(
        (status = 200, description = "Insert result with the assigned id"),
        (status = 422, description = "Body is not a JSON object"),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn add_tutorial_handler(
    State(state): State<Arc<AppState>>,
    Json(tutorial): Json<Document>,
) -> Result<impl IntoResponse, HttpError> {
    let outcome = state
        .store
        .insert_one(Collection::Tutorials, tutorial)
        .await?;
    info!("Tutorial {} added", outcome.inserted_id);
    Ok(Json(outcome))
}

/// PUT /updateTutorial/{id} - Set the given fields on a tutorial
#[utoipa::path(
    put,
    path = "/updateTutorial/{id}",
    params(("id" = String, Path, description = "Tutorial identifier")),
    request_body(content_type = "application/json", description = "Fields to set."),
    responses(
        (status = 200, description = "Update result with matched and modified counts"),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn update_tutorial_handler(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(fields): Json<Document>,
) -> Result<impl IntoResponse, HttpError> {
    let outcome = state
        .store
        .update_by_id(Collection::Tutorials, &id, fields)
        .await?;
    Ok(Json(outcome))
}

/// DELETE /deleteTutorial/{id} - Remove a tutorial; bookings referencing it are kept
#[utoipa::path(
    delete,
    path = "/deleteTutorial/{id}",
    params(("id" = String, Path, description = "Tutorial identifier")),
    responses(
        (status = 200, description = "Delete result with the deleted count"),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn delete_tutorial_handler(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, HttpError> {
    let outcome = state
        .store
        .delete_by_id(Collection::Tutorials, &id)
        .await?;
    if outcome.deleted_count > 0 {
        info!("Tutorial {} deleted", id);
    }
    Ok(Json(outcome))
}

/// POST /addReview - Increment the review counter of a tutorial
#[utoipa::path(
    post,
    path = "/addReview",
    request_body = ReviewRequest,
    responses(
        (status = 200, description = "Review counted", body = ReviewResponse),
        (status = 404, description = "No tutorial with this id"),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn add_review_handler(
    State(state): State<Arc<AppState>>,
    Json(req): Json<ReviewRequest>,
) -> Result<impl IntoResponse, HttpError> {
    let review = state
        .store
        .increment_by_id(Collection::Tutorials, &req.id, fields::REVIEW)
        .await?
        .ok_or_else(|| HttpError::NotFound("Tutorial not found".to_string()))?;

    Ok((
        StatusCode::OK,
        Json(ReviewResponse {
            success: true,
            message: "Review added successfully".to_string(),
            review,
        }),
    ))
}
