use actix_web::{post, web};
use std::sync::Arc;

use crate::db::service::DbService;
use crate::types::pull_request::{PullRequestReassignRes, PullRequestRes, RPullRequestReassign};
use crate::types::response::{ApiResponse, ApiResult};

#[post("/reassign")]
pub async fn reassign(
    db: web::Data<Arc<DbService>>,
    data: web::Json<RPullRequestReassign>,
) -> ApiResult<PullRequestReassignRes> {
    let (pr, reviewers, replaced_by) = db
        .reassign_reviewer(&data.pull_request_id, &data.old_user_id)
        .await?;
    Ok(ApiResponse::Ok(PullRequestReassignRes {
        pr: PullRequestRes::from_model(pr, reviewers),
        replaced_by,
    }))
}
