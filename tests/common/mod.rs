use review_roster::db::service::DbService;
use std::sync::Arc;

pub mod client;

pub struct TestContext {
    pub db: Arc<DbService>,
}

impl TestContext {
    pub async fn new() -> TestContext {
        // Fresh in-memory database per test; migrations run on connect.
        let db = Arc::new(
            DbService::new("sqlite::memory:")
                .await
                .expect("Failed to initialize DbService"),
        );
        TestContext { db }
    }
}

// Test data helpers
pub mod test_data {
    use review_roster::types::team::{RTeamCreate, RTeamMember};

    pub fn member(id: &str) -> RTeamMember {
        RTeamMember {
            user_id: id.to_string(),
            username: format!("User {id}"),
            is_active: true,
        }
    }

    #[allow(dead_code)]
    pub fn inactive_member(id: &str) -> RTeamMember {
        RTeamMember {
            is_active: false,
            ..member(id)
        }
    }

    pub fn sample_team(name: &str, member_ids: &[&str]) -> RTeamCreate {
        RTeamCreate {
            team_name: name.to_string(),
            members: member_ids.iter().map(|id| member(id)).collect(),
        }
    }
}
