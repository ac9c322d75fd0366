use actix_web::{get, post, web, HttpResponse};
use validator::Validate;

use crate::{
    app_state::AppState,
    errors::AppError,
    models::dto::request::{PageQuery, SubmitAttemptRequest},
    models::dto::response::AttemptListResponse,
};

/// Server-side submission path: grade against the stored quiz and record
/// the attempt. The score in the response is the one shown to the user.
#[post("/api/quizzes/{id}/attempts")]
pub async fn submit_attempt(
    state: web::Data<AppState>,
    quiz_id: web::Path<String>,
    request: web::Json<SubmitAttemptRequest>,
) -> Result<HttpResponse, AppError> {
    let request = request.into_inner();
    request.validate()?;

    let quiz = state.quiz_service.get_quiz(&quiz_id).await?;

    let attempt = state
        .attempt_service
        .submit_attempt(&request.user_id, &quiz, request.answers)
        .await
        .map_err(|error| {
            state.permission_events.capture("submit_attempt", &error);
            error
        })?;

    Ok(HttpResponse::Created().json(attempt))
}

#[get("/api/attempts/{id}")]
pub async fn get_attempt(
    state: web::Data<AppState>,
    id: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let attempt = state.attempt_service.get_attempt(&id).await?;
    Ok(HttpResponse::Ok().json(attempt))
}

#[get("/api/users/{user_id}/attempts")]
pub async fn get_user_attempts(
    state: web::Data<AppState>,
    user_id: web::Path<String>,
    query: web::Query<PageQuery>,
) -> Result<HttpResponse, AppError> {
    let (attempts, total) = state
        .attempt_service
        .get_user_attempts(
            &user_id,
            query.quiz_id.as_deref(),
            query.offset,
            query.limit,
        )
        .await?;

    Ok(HttpResponse::Ok().json(AttemptListResponse { attempts, total }))
}
