use actix_web::{post, web};
use std::sync::Arc;

use crate::db::service::DbService;
use crate::types::response::{ApiResponse, ApiResult};
use crate::types::user::{RSetIsActive, UserRes};

#[post("/setIsActive")]
pub async fn set_is_active(
    db: web::Data<Arc<DbService>>,
    data: web::Json<RSetIsActive>,
) -> ApiResult<UserRes> {
    let user = db.set_user_active(&data.user_id, data.is_active).await?;
    Ok(ApiResponse::Ok(UserRes::from_model(user)))
}
