use chrono::Utc;
use entity::team::{ActiveModel as TeamActive, Entity as Team, Model as TeamModel};
use entity::user::{Entity as User, Model as UserModel};
use sea_orm::{
    ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, QueryOrder, Set, TransactionTrait,
};

use crate::db::service::DbService;
use crate::db::users::upsert_user;
use crate::types::error::AppError;
use crate::types::team::RTeamMember;

impl DbService {
    /// Create `name` and idempotently upsert every member into it, all in
    /// one transaction. Members already known elsewhere are moved here.
    pub async fn create_team(
        &self,
        name: &str,
        members: &[RTeamMember],
    ) -> Result<(TeamModel, Vec<UserModel>), AppError> {
        let txn = self.db.begin().await?;

        if Team::find_by_id(name).one(&txn).await?.is_some() {
            return Err(AppError::TeamExists);
        }

        Team::insert(TeamActive {
            name: Set(name.to_owned()),
            created_at: Set(Utc::now()),
        })
        .exec(&txn)
        .await?;

        for member in members {
            upsert_user(&txn, member, name).await?;
        }

        let team = Team::find_by_id(name)
            .one(&txn)
            .await?
            .ok_or_else(|| AppError::Internal("team vanished mid-transaction".to_string()))?;
        let members = team_members(&txn, name).await?;
        txn.commit().await?;
        Ok((team, members))
    }

    pub async fn get_team(
        &self,
        name: &str,
    ) -> Result<Option<(TeamModel, Vec<UserModel>)>, AppError> {
        let Some(team) = Team::find_by_id(name).one(&self.db).await? else {
            return Ok(None);
        };
        let members = team_members(&self.db, name).await?;
        Ok(Some((team, members)))
    }
}

async fn team_members<C: ConnectionTrait>(
    conn: &C,
    team_name: &str,
) -> Result<Vec<UserModel>, AppError> {
    Ok(User::find()
        .filter(entity::user::Column::TeamName.eq(team_name))
        .order_by_asc(entity::user::Column::Id)
        .all(conn)
        .await?)
}
