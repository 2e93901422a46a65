use entity::pull_request::{self, PrStatus};
use entity::user;
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug)]
pub struct RSetIsActive {
    pub user_id: String,
    pub is_active: bool,
}

#[derive(Serialize, Deserialize, Debug)]
pub struct UserRes {
    pub user_id: String,
    pub username: String,
    pub team_name: String,
    pub is_active: bool,
}

impl UserRes {
    pub fn from_model(user: user::Model) -> Self {
        UserRes {
            user_id: user.id,
            username: user.username,
            team_name: user.team_name,
            is_active: user.is_active,
        }
    }
}

/// Abbreviated pull request view for review listings.
#[derive(Serialize, Deserialize, Debug)]
pub struct PullRequestShortRes {
    pub pull_request_id: String,
    pub pull_request_name: String,
    pub author_id: String,
    pub status: PrStatus,
}

impl PullRequestShortRes {
    pub fn from_model(pr: pull_request::Model) -> Self {
        PullRequestShortRes {
            pull_request_id: pr.id,
            pull_request_name: pr.name,
            author_id: pr.author_id,
            status: pr.status,
        }
    }
}

#[derive(Serialize, Deserialize, Debug)]
pub struct UserReviewsRes {
    pub user_id: String,
    pub pull_requests: Vec<PullRequestShortRes>,
}
