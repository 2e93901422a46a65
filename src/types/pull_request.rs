use chrono::{DateTime, Utc};
use entity::pull_request::{self, PrStatus};
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug)]
pub struct RPullRequestCreate {
    pub pull_request_id: String,
    pub pull_request_name: String,
    pub author_id: String,
}

#[derive(Serialize, Deserialize, Debug)]
pub struct RPullRequestMerge {
    pub pull_request_id: String,
}

#[derive(Serialize, Deserialize, Debug)]
pub struct RPullRequestReassign {
    pub pull_request_id: String,
    pub old_user_id: String,
}

#[derive(Serialize, Deserialize, Debug)]
pub struct PullRequestRes {
    pub pull_request_id: String,
    pub pull_request_name: String,
    pub author_id: String,
    pub status: PrStatus,
    pub created_at: DateTime<Utc>,
    pub merged_at: Option<DateTime<Utc>>,
    /// Unordered, duplicate-free.
    pub assigned_reviewers: Vec<String>,
}

impl PullRequestRes {
    pub fn from_model(pr: pull_request::Model, assigned_reviewers: Vec<String>) -> Self {
        PullRequestRes {
            pull_request_id: pr.id,
            pull_request_name: pr.name,
            author_id: pr.author_id,
            status: pr.status,
            created_at: pr.created_at,
            merged_at: pr.merged_at,
            assigned_reviewers,
        }
    }
}

#[derive(Serialize, Deserialize, Debug)]
pub struct PullRequestReassignRes {
    pub pr: PullRequestRes,
    pub replaced_by: String,
}
