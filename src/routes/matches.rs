use actix_web::{web, HttpResponse, Responder};
use validator::Validate;
use crate::models::{
    AllocationEntry, BatchResponse, CleanupResponse, ErrorResponse, FindMatchRequest, FindMatchResponse,
    HealthResponse, InteractionRequest, RegisterMentorRequest, SubmitRequestRequest,
};
use crate::services::{MatchStore, StoreError};
use std::sync::Arc;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<MatchStore>,
}

/// Configure all match-related routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        .route("/health", web::get().to(health_check))
        .route("/mentors", web::post().to(register_mentor))
        .route("/mentors/{id}", web::get().to(get_mentor))
        .route("/requests", web::post().to(submit_request))
        .route("/matches/find", web::post().to(find_match))
        .route("/matches/batch", web::post().to(allocate_batch))
        .route("/matches/cleanup", web::post().to(cleanup_matches))
        .route("/matches/{id}", web::get().to(get_match))
        .route("/matches/{id}/complete", web::post().to(complete_match))
        .route("/matches/{id}/cancel", web::post().to(cancel_match))
        .route("/matches/{id}/interaction", web::post().to(record_interaction));
}

fn validation_error(errors: validator::ValidationErrors) -> HttpResponse {
    HttpResponse::BadRequest().json(ErrorResponse {
        error: "Validation failed".to_string(),
        message: errors.to_string(),
        status_code: 400,
    })
}

/// Map a store error onto an HTTP response
fn store_error(err: StoreError) -> HttpResponse {
    let (mut builder, error, status_code) = match &err {
        StoreError::NotFound(_) => (HttpResponse::NotFound(), "Not found", 404),
        StoreError::RequestNotPending(_) => (HttpResponse::Conflict(), "Request not pending", 409),
        StoreError::CapacityExhausted(_) => (HttpResponse::Conflict(), "Capacity exhausted", 409),
        StoreError::InvalidTransition(_) => (HttpResponse::Conflict(), "Invalid transition", 409),
    };

    tracing::info!("Store error: {}", err);
    builder.json(ErrorResponse {
        error: error.to_string(),
        message: err.to_string(),
        status_code,
    })
}

/// Health check endpoint
async fn health_check() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now(),
    })
}

/// Register mentor endpoint
///
/// POST /api/v1/mentors
async fn register_mentor(
    state: web::Data<AppState>,
    req: web::Json<RegisterMentorRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        return validation_error(errors);
    }

    let mentor = state.store.register_mentor(req.into_inner().into()).await;
    HttpResponse::Created().json(mentor)
}

/// GET /api/v1/mentors/{id}
async fn get_mentor(state: web::Data<AppState>, path: web::Path<String>) -> impl Responder {
    match state.store.mentor(&path).await {
        Ok(mentor) => HttpResponse::Ok().json(mentor),
        Err(e) => store_error(e),
    }
}

/// Submit mentee request endpoint
///
/// POST /api/v1/requests
///
/// Request body:
/// ```json
/// {
///   "menteeId": "string",
///   "college": "string",
///   "topics": ["anxiety"],
///   "preferredAvailability": { "monday": ["evening"] },
///   "urgency": "low|medium|high"
/// }
/// ```
async fn submit_request(
    state: web::Data<AppState>,
    req: web::Json<SubmitRequestRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        return validation_error(errors);
    }

    let request = state.store.submit_request(req.into_inner().into()).await;
    HttpResponse::Created().json(request)
}

/// Find match endpoint
///
/// POST /api/v1/matches/find
///
/// Request body:
/// ```json
/// { "requestId": "string" }
/// ```
///
/// Responds with `"match": null` when no mentor is eligible.
async fn find_match(
    state: web::Data<AppState>,
    req: web::Json<FindMatchRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        return validation_error(errors);
    }

    tracing::info!("Finding match for request: {}", req.request_id);

    match state.store.find_match(&req.request_id).await {
        Ok(mentor_match) => HttpResponse::Ok().json(FindMatchResponse {
            request_id: req.request_id.clone(),
            mentor_match,
        }),
        Err(e) => store_error(e),
    }
}

/// Allocate all pending requests
///
/// POST /api/v1/matches/batch
async fn allocate_batch(state: web::Data<AppState>) -> impl Responder {
    let results = match state.store.allocate_pending().await {
        Ok(results) => results,
        Err(e) => {
            tracing::error!("Batch allocation failed: {}", e);
            return store_error(e);
        }
    };

    let allocations: Vec<AllocationEntry> = results
        .into_iter()
        .map(|(request, mentor_match)| AllocationEntry {
            request_id: request.id,
            mentee_id: request.mentee_id,
            urgency: request.urgency,
            mentor_match,
        })
        .collect();

    let matched = allocations.iter().filter(|a| a.mentor_match.is_some()).count();
    let unmatched = allocations.len() - matched;

    HttpResponse::Ok().json(BatchResponse {
        allocations,
        matched,
        unmatched,
    })
}

/// GET /api/v1/matches/{id}
async fn get_match(state: web::Data<AppState>, path: web::Path<String>) -> impl Responder {
    match state.store.get_match(&path).await {
        Ok(mentor_match) => HttpResponse::Ok().json(mentor_match),
        Err(e) => store_error(e),
    }
}

/// POST /api/v1/matches/{id}/complete
async fn complete_match(state: web::Data<AppState>, path: web::Path<String>) -> impl Responder {
    match state.store.complete_match(&path).await {
        Ok(mentor_match) => HttpResponse::Ok().json(mentor_match),
        Err(e) => store_error(e),
    }
}

/// POST /api/v1/matches/{id}/cancel
async fn cancel_match(state: web::Data<AppState>, path: web::Path<String>) -> impl Responder {
    match state.store.cancel_match(&path).await {
        Ok(mentor_match) => HttpResponse::Ok().json(mentor_match),
        Err(e) => store_error(e),
    }
}

/// Record match activity
///
/// POST /api/v1/matches/{id}/interaction
///
/// Request body (optional timestamp, defaults to now):
/// ```json
/// { "at": "2024-05-01T09:00:00Z" }
/// ```
async fn record_interaction(
    state: web::Data<AppState>,
    path: web::Path<String>,
    req: Option<web::Json<InteractionRequest>>,
) -> impl Responder {
    let at = req.and_then(|body| body.into_inner().at);

    match state.store.record_interaction(&path, at).await {
        Ok(mentor_match) => HttpResponse::Ok().json(mentor_match),
        Err(e) => store_error(e),
    }
}

/// Expire inactive matches
///
/// POST /api/v1/matches/cleanup
async fn cleanup_matches(state: web::Data<AppState>) -> impl Responder {
    let sweep = state.store.cleanup_inactive().await;

    HttpResponse::Ok().json(CleanupResponse {
        count: sweep.matches.len(),
        expired: sweep.matches,
        expired_requests: sweep.requests,
    })
}
