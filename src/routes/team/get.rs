use actix_web::{get, web};
use serde::Deserialize;
use std::sync::Arc;

use crate::db::service::DbService;
use crate::types::error::AppError;
use crate::types::response::{ApiResponse, ApiResult};
use crate::types::team::TeamRes;

#[derive(Deserialize)]
pub struct TeamQuery {
    pub team_name: String,
}

#[get("/get")]
pub async fn get(db: web::Data<Arc<DbService>>, query: web::Query<TeamQuery>) -> ApiResult<TeamRes> {
    let (team, members) = db
        .get_team(&query.team_name)
        .await?
        .ok_or(AppError::NotFound("Team"))?;
    Ok(ApiResponse::Ok(TeamRes::from_models(team, members)))
}
