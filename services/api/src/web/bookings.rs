//! services/api/src/web/bookings.rs
//!
//! Handlers for booking tutors and listing a user's bookings.

use axum::{
    extract::{Extension, Query, State},
    response::{IntoResponse, Json},
};
use serde::Deserialize;
use std::sync::Arc;
use tracing::{info, warn};
use tutorhub_core::catalog::fields;
use tutorhub_core::domain::{Collection, Document, Filter, FindOptions};
use utoipa::IntoParams;

use crate::token::IdentityClaim;
use crate::web::error::HttpError;
use crate::web::state::AppState;

#[derive(Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct BookingQuery {
    pub email: Option<String>,
}

/// POST /bookTutor - Store the body as a new booking
#[utoipa::path(
    post,
    path = "/bookTutor",
    request_body(content_type = "application/json", description = "Any booking document."),
    responses(
        (status = 200, description = "Insert result with the assigned id"),
        (status = 422, description = "Body is not a JSON object"),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn book_tutor_handler(
    State(state): State<Arc<AppState>>,
    Json(booking): Json<Document>,
) -> Result<impl IntoResponse, HttpError> {
    let outcome = state
        .store
        .insert_one(Collection::BookedTutors, booking)
        .await?;
    info!("Booking {} created", outcome.inserted_id);
    Ok(Json(outcome))
}

/// GET /myBookedTutors - Bookings of the authenticated user
///
/// The `email` query parameter must equal the email of the token claim.
#[utoipa::path(
    get,
    path = "/myBookedTutors",
    params(BookingQuery),
    responses(
        (status = 200, description = "Booking documents of the user"),
        (status = 401, description = "Missing or invalid token cookie"),
        (status = 403, description = "Email does not match the token"),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn my_booked_tutors_handler(
    State(state): State<Arc<AppState>>,
    Extension(claim): Extension<IdentityClaim>,
    Query(query): Query<BookingQuery>,
) -> Result<Json<Vec<Document>>, HttpError> {
    let email = match (query.email, claim.email()) {
        (Some(requested), Some(owned)) if requested == owned => requested,
        _ => {
            warn!("Booking lookup for a foreign email refused");
            return Err(HttpError::Forbidden);
        }
    };

    let bookings = state
        .store
        .find(
            Collection::BookedTutors,
            &Filter::new().eq(fields::EMAIL, email),
            &FindOptions::default(),
        )
        .await?;
    Ok(Json(bookings))
}
