//! Reviewer selection: who is eligible, how loaded they are, and which of
//! them get the assignment. The queries are generic over `ConnectionTrait`
//! so they run inside the same transaction as the writes they feed.

pub mod picker;

use entity::pull_request::{self, PrStatus};
use entity::{pr_reviewer, user};
use sea_orm::{ColumnTrait, ConnectionTrait, EntityTrait, PaginatorTrait, QueryFilter};

use crate::types::error::AppError;

/// An eligible user together with their current open-review load.
pub struct Candidate {
    pub user: user::Model,
    pub open_reviews: u64,
}

/// Every active member of `team_name` whose id is not in `exclude_ids`.
/// An empty result is a valid outcome; callers decide what it means.
pub async fn active_candidates<C: ConnectionTrait>(
    conn: &C,
    team_name: &str,
    exclude_ids: &[String],
) -> Result<Vec<user::Model>, AppError> {
    let mut query = user::Entity::find()
        .filter(user::Column::TeamName.eq(team_name))
        .filter(user::Column::IsActive.eq(true));
    if !exclude_ids.is_empty() {
        query = query.filter(user::Column::Id.is_not_in(exclude_ids.iter().cloned()));
    }
    Ok(query.all(conn).await?)
}

/// Number of OPEN pull requests `user_id` currently reviews.
pub async fn open_review_count<C: ConnectionTrait>(
    conn: &C,
    user_id: &str,
) -> Result<u64, AppError> {
    Ok(pr_reviewer::Entity::find()
        .filter(pr_reviewer::Column::UserId.eq(user_id))
        .inner_join(pull_request::Entity)
        .filter(pull_request::Column::Status.eq(PrStatus::Open))
        .count(conn)
        .await?)
}

/// Candidates annotated with load, ready for the weighted picker.
pub async fn candidates_with_load<C: ConnectionTrait>(
    conn: &C,
    team_name: &str,
    exclude_ids: &[String],
) -> Result<Vec<Candidate>, AppError> {
    let users = active_candidates(conn, team_name, exclude_ids).await?;
    let mut candidates = Vec::with_capacity(users.len());
    for user in users {
        let open_reviews = open_review_count(conn, &user.id).await?;
        candidates.push(Candidate { user, open_reviews });
    }
    Ok(candidates)
}
