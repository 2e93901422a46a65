use chrono::Utc;
use entity::pull_request::{Entity as PullRequest, Model as PullRequestModel, PrStatus};
use entity::user::{ActiveModel as UserActive, Entity as User, Model as UserModel};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, QueryOrder, Set,
    TransactionTrait,
};

use crate::assignment::{self, picker};
use crate::db::pull_requests::{add_assignment, remove_assignment, reviewer_ids_of};
use crate::db::service::DbService;
use crate::types::error::AppError;
use crate::types::team::RTeamMember;

impl DbService {
    pub async fn get_user(&self, id: &str) -> Result<Option<UserModel>, AppError> {
        Ok(User::find_by_id(id).one(&self.db).await?)
    }

    /// Pull requests the user is assigned to review, any status. Merged
    /// pull requests keep their reviewer set, so they show up here too.
    pub async fn get_user_reviews(
        &self,
        user_id: &str,
    ) -> Result<(UserModel, Vec<PullRequestModel>), AppError> {
        let user = self
            .get_user(user_id)
            .await?
            .ok_or(AppError::NotFound("User"))?;
        let pull_requests = PullRequest::find()
            .inner_join(entity::pr_reviewer::Entity)
            .filter(entity::pr_reviewer::Column::UserId.eq(user_id))
            .order_by_asc(entity::pull_request::Column::Id)
            .all(&self.db)
            .await?;
        Ok((user, pull_requests))
    }

    /// Toggle the active flag. Activation is a plain flip; deactivation
    /// hands every OPEN review slot of the user to another team member (or
    /// drops the slot when nobody is left), atomically with the flag.
    pub async fn set_user_active(
        &self,
        user_id: &str,
        active: bool,
    ) -> Result<UserModel, AppError> {
        let user = self
            .get_user(user_id)
            .await?
            .ok_or(AppError::NotFound("User"))?;
        if user.is_active == active {
            return Ok(user);
        }

        if active {
            let mut am: UserActive = user.into();
            am.is_active = Set(true);
            am.updated_at = Set(Utc::now());
            return Ok(am.update(&self.db).await?);
        }

        self.deactivate_user(user).await
    }

    async fn deactivate_user(&self, user: UserModel) -> Result<UserModel, AppError> {
        let user_id = user.id.clone();
        let team_name = user.team_name.clone();

        let txn = self.db.begin().await?;

        let open_reviews = PullRequest::find()
            .inner_join(entity::pr_reviewer::Entity)
            .filter(entity::pr_reviewer::Column::UserId.eq(user_id.as_str()))
            .filter(entity::pull_request::Column::Status.eq(PrStatus::Open))
            .all(&txn)
            .await?;

        let mut am: UserActive = user.into();
        am.is_active = Set(false);
        am.updated_at = Set(Utc::now());
        let updated = am.update(&txn).await?;

        let reassigned = open_reviews.len();
        for pr in open_reviews {
            // The user is inactive within this transaction already, so the
            // exclusion set only needs the author and the other reviewers.
            let mut exclude = vec![pr.author_id.clone()];
            exclude.extend(
                reviewer_ids_of(&txn, &pr.id)
                    .await?
                    .into_iter()
                    .filter(|id| id != &user_id),
            );

            let candidates = assignment::active_candidates(&txn, &team_name, &exclude).await?;
            remove_assignment(&txn, &user_id, &pr.id).await?;
            if let Some(replacement) =
                picker::pick_replacement(&candidates, &mut rand::thread_rng())
            {
                add_assignment(&txn, &replacement.id, &pr.id).await?;
            }
        }

        txn.commit().await?;
        log::info!("Deactivated user {user_id}; revisited {reassigned} open reviews");
        Ok(updated)
    }
}

/// Create the user or move/update them in place. Team creation calls this
/// once per member.
pub(crate) async fn upsert_user<C: ConnectionTrait>(
    conn: &C,
    member: &RTeamMember,
    team_name: &str,
) -> Result<(), AppError> {
    let now = Utc::now();
    match User::find_by_id(member.user_id.as_str()).one(conn).await? {
        Some(existing) => {
            let mut am: UserActive = existing.into();
            am.username = Set(member.username.clone());
            am.is_active = Set(member.is_active);
            am.team_name = Set(team_name.to_owned());
            am.updated_at = Set(now);
            am.update(conn).await?;
        }
        None => {
            User::insert(UserActive {
                id: Set(member.user_id.clone()),
                username: Set(member.username.clone()),
                is_active: Set(member.is_active),
                team_name: Set(team_name.to_owned()),
                created_at: Set(now),
                updated_at: Set(now),
            })
            .exec(conn)
            .await?;
        }
    }
    Ok(())
}
