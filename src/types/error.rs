use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use sea_orm::DbErr;
use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    // domain rule violations
    #[error("team_name already exists")]
    TeamExists,
    #[error("PR id already exists")]
    PrExists,
    #[error("cannot reassign on merged PR")]
    PrMerged,
    #[error("reviewer is not assigned to this PR")]
    NotAssigned,
    #[error("no active replacement candidate in team")]
    NoCandidate,
    #[error("inactive user cannot create PR")]
    AuthorInactive,
    #[error("{0} not found")]
    NotFound(&'static str),

    // infra things
    #[error(transparent)]
    Db(DbErr),
    #[error("internal error: {0}")]
    Internal(String),
}

impl From<DbErr> for AppError {
    fn from(e: DbErr) -> Self {
        match &e {
            DbErr::RecordNotFound(_) => AppError::NotFound("Record"),
            _ => AppError::Db(e),
        }
    }
}

#[derive(Serialize)]
struct ErrorBody<'a, 'b> {
    error: &'a str,
    message: &'b str,
}

impl AppError {
    fn kind(&self) -> &'static str {
        match self {
            Self::TeamExists => "TEAM_EXISTS",
            Self::PrExists => "PR_EXISTS",
            Self::PrMerged => "PR_MERGED",
            Self::NotAssigned => "NOT_ASSIGNED",
            Self::NoCandidate => "NO_CANDIDATE",
            Self::AuthorInactive => "AUTHOR_INACTIVE",
            Self::NotFound(_) => "NOT_FOUND",
            Self::Db(_) => "DB_ERROR",
            Self::Internal(_) => "INTERNAL_ERROR",
        }
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::TeamExists
            | Self::PrExists
            | Self::PrMerged
            | Self::NotAssigned
            | Self::NoCandidate => StatusCode::CONFLICT,
            Self::AuthorInactive => StatusCode::BAD_REQUEST,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Db(_) | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        // Persistence failures keep their detail out of the response body.
        let message = match self {
            Self::Db(_) | Self::Internal(_) => "Unexpected error".to_string(),
            other => other.to_string(),
        };
        HttpResponse::build(self.status_code()).json(ErrorBody {
            error: self.kind(),
            message: &message,
        })
    }
}
