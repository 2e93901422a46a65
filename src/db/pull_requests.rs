use chrono::Utc;
use entity::pr_reviewer::{ActiveModel as PrReviewerActive, Entity as PrReviewer};
use entity::pull_request::{
    ActiveModel as PrActive, Entity as PullRequest, Model as PullRequestModel, PrStatus,
};
use entity::user::Entity as User;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, Set,
    TransactionTrait,
};

use crate::assignment::{self, picker};
use crate::db::service::DbService;
use crate::types::error::AppError;

impl DbService {
    pub async fn get_pull_request(
        &self,
        id: &str,
    ) -> Result<Option<(PullRequestModel, Vec<String>)>, AppError> {
        let Some(pr) = PullRequest::find_by_id(id).one(&self.db).await? else {
            return Ok(None);
        };
        let reviewers = reviewer_ids_of(&self.db, id).await?;
        Ok(Some((pr, reviewers)))
    }

    /// Create an OPEN pull request and assign up to two reviewers from the
    /// author's team, biased toward lower load. Fewer than two reviewers is
    /// valid when the team is short on candidates.
    pub async fn create_pull_request(
        &self,
        id: &str,
        name: &str,
        author_id: &str,
    ) -> Result<(PullRequestModel, Vec<String>), AppError> {
        let txn = self.db.begin().await?;

        if PullRequest::find_by_id(id).one(&txn).await?.is_some() {
            return Err(AppError::PrExists);
        }
        let author = User::find_by_id(author_id)
            .one(&txn)
            .await?
            .ok_or(AppError::NotFound("Author"))?;
        if !author.is_active {
            return Err(AppError::AuthorInactive);
        }

        let exclude = vec![author.id.clone()];
        let candidates =
            assignment::candidates_with_load(&txn, &author.team_name, &exclude).await?;
        let reviewers = picker::select_reviewers(candidates, &mut rand::thread_rng());

        PullRequest::insert(PrActive {
            id: Set(id.to_owned()),
            name: Set(name.to_owned()),
            author_id: Set(author.id),
            status: Set(PrStatus::Open),
            created_at: Set(Utc::now()),
            merged_at: Set(None),
        })
        .exec(&txn)
        .await?;

        let mut reviewer_ids = Vec::with_capacity(reviewers.len());
        for reviewer in reviewers {
            add_assignment(&txn, &reviewer.id, id).await?;
            reviewer_ids.push(reviewer.id);
        }

        let pr = require_pull_request(&txn, id).await?;
        txn.commit().await?;
        Ok((pr, reviewer_ids))
    }

    /// OPEN -> MERGED. Merging an already merged pull request is a no-op
    /// reporting the current state; the reviewer set stays frozen.
    pub async fn merge_pull_request(
        &self,
        id: &str,
    ) -> Result<(PullRequestModel, Vec<String>), AppError> {
        let txn = self.db.begin().await?;

        let pr = require_pull_request(&txn, id).await?;
        if pr.status.is_terminal() {
            let reviewers = reviewer_ids_of(&txn, id).await?;
            return Ok((pr, reviewers));
        }

        let mut am: PrActive = pr.into();
        am.status = Set(PrStatus::Merged);
        am.merged_at = Set(Some(Utc::now()));
        am.update(&txn).await?;

        let pr = require_pull_request(&txn, id).await?;
        let reviewers = reviewer_ids_of(&txn, id).await?;
        txn.commit().await?;
        Ok((pr, reviewers))
    }

    /// Swap one assigned reviewer for a uniformly chosen team member not
    /// already involved with this pull request.
    pub async fn reassign_reviewer(
        &self,
        pull_request_id: &str,
        old_user_id: &str,
    ) -> Result<(PullRequestModel, Vec<String>, String), AppError> {
        let txn = self.db.begin().await?;

        let pr = require_pull_request(&txn, pull_request_id).await?;
        if !pr.status.allows_reviewer_changes() {
            return Err(AppError::PrMerged);
        }
        let old_user = User::find_by_id(old_user_id)
            .one(&txn)
            .await?
            .ok_or(AppError::NotFound("User to be replaced"))?;

        let reviewer_ids = reviewer_ids_of(&txn, pull_request_id).await?;
        if !reviewer_ids.iter().any(|id| id == old_user_id) {
            return Err(AppError::NotAssigned);
        }

        let mut exclude = vec![pr.author_id.clone()];
        exclude.extend(reviewer_ids);

        let candidates =
            assignment::active_candidates(&txn, &old_user.team_name, &exclude).await?;
        let replacement_id = match picker::pick_replacement(&candidates, &mut rand::thread_rng())
        {
            Some(replacement) => replacement.id.clone(),
            None => return Err(AppError::NoCandidate),
        };

        remove_assignment(&txn, old_user_id, pull_request_id).await?;
        add_assignment(&txn, &replacement_id, pull_request_id).await?;

        let reviewers = reviewer_ids_of(&txn, pull_request_id).await?;
        txn.commit().await?;
        Ok((pr, reviewers, replacement_id))
    }
}

async fn require_pull_request<C: ConnectionTrait>(
    conn: &C,
    id: &str,
) -> Result<PullRequestModel, AppError> {
    PullRequest::find_by_id(id)
        .one(conn)
        .await?
        .ok_or(AppError::NotFound("PR"))
}

/// Current reviewer ids of a pull request, straight off the association rows.
pub(crate) async fn reviewer_ids_of<C: ConnectionTrait>(
    conn: &C,
    pull_request_id: &str,
) -> Result<Vec<String>, AppError> {
    Ok(PrReviewer::find()
        .filter(entity::pr_reviewer::Column::PullRequestId.eq(pull_request_id))
        .all(conn)
        .await?
        .into_iter()
        .map(|row| row.user_id)
        .collect())
}

pub(crate) async fn add_assignment<C: ConnectionTrait>(
    conn: &C,
    user_id: &str,
    pull_request_id: &str,
) -> Result<(), AppError> {
    PrReviewer::insert(PrReviewerActive {
        user_id: Set(user_id.to_owned()),
        pull_request_id: Set(pull_request_id.to_owned()),
        created_at: Set(Utc::now()),
    })
    .exec(conn)
    .await?;
    Ok(())
}

pub(crate) async fn remove_assignment<C: ConnectionTrait>(
    conn: &C,
    user_id: &str,
    pull_request_id: &str,
) -> Result<(), AppError> {
    PrReviewer::delete_by_id((user_id.to_owned(), pull_request_id.to_owned()))
        .exec(conn)
        .await?;
    Ok(())
}
