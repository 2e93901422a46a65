use actix_web::{post, web};
use std::sync::Arc;

use crate::db::service::DbService;
use crate::types::response::{ApiResponse, ApiResult};
use crate::types::team::{RTeamCreate, TeamRes};

#[post("/add")]
pub async fn add(db: web::Data<Arc<DbService>>, data: web::Json<RTeamCreate>) -> ApiResult<TeamRes> {
    let (team, members) = db.create_team(&data.team_name, &data.members).await?;
    Ok(ApiResponse::Created(TeamRes::from_models(team, members)))
}
