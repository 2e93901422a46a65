use actix_web::{get, web};
use serde::Deserialize;
use std::sync::Arc;

use crate::db::service::DbService;
use crate::types::response::{ApiResponse, ApiResult};
use crate::types::user::{PullRequestShortRes, UserReviewsRes};

#[derive(Deserialize)]
pub struct ReviewQuery {
    pub user_id: String,
}

#[get("/getReview")]
pub async fn get_review(
    db: web::Data<Arc<DbService>>,
    query: web::Query<ReviewQuery>,
) -> ApiResult<UserReviewsRes> {
    let (user, pull_requests) = db.get_user_reviews(&query.user_id).await?;
    Ok(ApiResponse::Ok(UserReviewsRes {
        user_id: user.id,
        pull_requests: pull_requests
            .into_iter()
            .map(PullRequestShortRes::from_model)
            .collect(),
    }))
}
