use actix_web::{delete, get, post, web, HttpResponse};
use validator::Validate;

use crate::{
    app_state::AppState,
    errors::{AppError, AppResult},
    models::domain::Quiz,
    models::dto::request::{
        CreateQuizRequest, GenerateQuestionRequest, GenerateQuizRequest, PageQuery,
    },
    models::dto::response::{
        ErrorBody, GenerateQuestionResponse, GenerateQuizResponse, PagedResponse,
    },
};

#[get("/health")]
pub async fn health_check(state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    state.database.health_check().await?;
    Ok(HttpResponse::Ok().body("OK"))
}

/// The AI-assist endpoint. Every failure kind (bad body, upstream fetch,
/// missing model output) collapses to one 500 with `{error}`; callers read
/// the message, not the status, to decide remediation.
#[post("/api/quizzes/generate")]
pub async fn generate_quiz(
    state: web::Data<AppState>,
    request: web::Json<GenerateQuizRequest>,
) -> HttpResponse {
    match generate_flow(&state, request.into_inner()).await {
        Ok(quiz) => HttpResponse::Ok().json(GenerateQuizResponse { quiz }),
        Err(error) => {
            state.permission_events.capture("generate_quiz", &error);
            log::error!("quiz generation failed: {}", error);
            HttpResponse::InternalServerError().json(ErrorBody {
                error: error.to_string(),
            })
        }
    }
}

pub async fn generate_flow(state: &AppState, request: GenerateQuizRequest) -> AppResult<Quiz> {
    request.validate()?;
    let quiz = state.generation_service.generate_quiz(&request).await?;
    state.quiz_service.create_quiz(quiz).await
}

/// Assist hook of the manual quiz builder: regenerate a single question.
/// Nothing is persisted; the builder decides what to keep.
#[post("/api/questions/generate")]
pub async fn generate_question(
    state: web::Data<AppState>,
    request: web::Json<GenerateQuestionRequest>,
) -> HttpResponse {
    let request = request.into_inner();

    let result = match request.validate() {
        Ok(()) => {
            state
                .generation_service
                .generate_single_question(&request.topic, request.difficulty)
                .await
        }
        Err(err) => Err(err.into()),
    };

    match result {
        Ok(question) => HttpResponse::Ok().json(GenerateQuestionResponse { question }),
        Err(error) => {
            log::error!("question generation failed: {}", error);
            HttpResponse::InternalServerError().json(ErrorBody {
                error: error.to_string(),
            })
        }
    }
}

#[get("/api/quizzes/{id}")]
pub async fn get_quiz(
    state: web::Data<AppState>,
    id: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let quiz = state.quiz_service.get_quiz(&id).await?;
    Ok(HttpResponse::Ok().json(quiz))
}

#[get("/api/quizzes")]
pub async fn list_quizzes(
    state: web::Data<AppState>,
    query: web::Query<PageQuery>,
) -> Result<HttpResponse, AppError> {
    let (quizzes, total) = state
        .quiz_service
        .list_quizzes(query.offset, query.limit)
        .await?;

    Ok(HttpResponse::Ok().json(PagedResponse {
        items: quizzes,
        total,
        offset: query.offset,
        limit: query.limit,
    }))
}

/// Manual authoring path used by the admin quiz builder.
#[post("/api/quizzes")]
pub async fn create_quiz(
    state: web::Data<AppState>,
    request: web::Json<CreateQuizRequest>,
) -> Result<HttpResponse, AppError> {
    let request = request.into_inner();
    request.validate()?;

    let quiz = state.quiz_service.create_quiz(request.into_quiz()).await?;
    Ok(HttpResponse::Created().json(quiz))
}

#[delete("/api/quizzes/{id}")]
pub async fn delete_quiz(
    state: web::Data<AppState>,
    id: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    state.quiz_service.delete_quiz(&id).await?;
    Ok(HttpResponse::NoContent().finish())
}
