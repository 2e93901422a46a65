use actix_web::{post, web};
use std::sync::Arc;

use crate::db::service::DbService;
use crate::types::pull_request::{PullRequestRes, RPullRequestMerge};
use crate::types::response::{ApiResponse, ApiResult};

#[post("/merge")]
pub async fn merge(
    db: web::Data<Arc<DbService>>,
    data: web::Json<RPullRequestMerge>,
) -> ApiResult<PullRequestRes> {
    let (pr, reviewers) = db.merge_pull_request(&data.pull_request_id).await?;
    Ok(ApiResponse::Ok(PullRequestRes::from_model(pr, reviewers)))
}
