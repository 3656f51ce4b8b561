//! services/api/src/web/rest.rs
//!
//! Contains the master definition for the OpenAPI specification, the payloads
//! shared by several endpoints and the liveness handler.

use serde::Serialize;
use utoipa::{OpenApi, ToSchema};

use crate::web::{auth, bookings, tutorials};

//=========================================================================================
// OpenAPI Master Definition
//=========================================================================================

#[derive(OpenApi)]
#[openapi(
    paths(
        root_handler,
        tutorials::find_tutorials_handler,
        tutorials::find_categories_handler,
        tutorials::find_tutors_by_category_handler,
        tutorials::tutor_by_id_handler,
        tutorials::my_tutorials_handler,
        tutorials::stats_handler,
        tutorials::add_tutorial_handler,
        tutorials::update_tutorial_handler,
        tutorials::delete_tutorial_handler,
        tutorials::add_review_handler,
        bookings::book_tutor_handler,
        bookings::my_booked_tutors_handler,
        auth::issue_token_handler,
        auth::logout_handler,
    ),
    components(
        schemas(
            SuccessResponse,
            tutorials::ReviewRequest,
            tutorials::ReviewResponse,
            tutorials::StatsResponse,
        )
    ),
    tags(
        (name = "Tutor Marketplace API", description = "Tutorials, bookings, reviews and credentials.")
    )
)]
pub struct ApiDoc;

impl ApiDoc {
    /// The published document, titled and versioned after this service.
    pub fn document() -> utoipa::openapi::OpenApi {
        let mut document = Self::openapi();
        document.info.title = "Tutor Marketplace API".to_string();
        document.info.version = env!("CARGO_PKG_VERSION").to_string();
        document
    }
}

//=========================================================================================
// Shared Payloads
//=========================================================================================

/// `{"success": true}`
#[derive(Serialize, ToSchema)]
pub struct SuccessResponse {
    pub success: bool,
}

impl SuccessResponse {
    pub fn ok() -> Self {
        Self { success: true }
    }
}

//=========================================================================================
// Liveness
//=========================================================================================

/// GET / - Liveness text
#[utoipa::path(
    get,
    path = "/",
    responses((status = 200, description = "Server is up", body = String))
)]
pub async fn root_handler() -> &'static str {
    "Tutor marketplace server is running"
}
