use actix_web::{post, web};
use std::sync::Arc;

use crate::db::service::DbService;
use crate::types::pull_request::{PullRequestRes, RPullRequestCreate};
use crate::types::response::{ApiResponse, ApiResult};

#[post("/create")]
pub async fn create(
    db: web::Data<Arc<DbService>>,
    data: web::Json<RPullRequestCreate>,
) -> ApiResult<PullRequestRes> {
    let (pr, reviewers) = db
        .create_pull_request(
            &data.pull_request_id,
            &data.pull_request_name,
            &data.author_id,
        )
        .await?;
    Ok(ApiResponse::Created(PullRequestRes::from_model(
        pr, reviewers,
    )))
}
