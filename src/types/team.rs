use entity::{team, user};
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct RTeamMember {
    pub user_id: String,
    pub username: String,
    pub is_active: bool,
}

#[derive(Serialize, Deserialize, Debug)]
pub struct RTeamCreate {
    pub team_name: String,
    pub members: Vec<RTeamMember>,
}

#[derive(Serialize, Deserialize, Debug)]
pub struct TeamMemberRes {
    pub user_id: String,
    pub username: String,
    pub is_active: bool,
}

#[derive(Serialize, Deserialize, Debug)]
pub struct TeamRes {
    pub team_name: String,
    pub members: Vec<TeamMemberRes>,
}

impl TeamRes {
    pub fn from_models(team: team::Model, members: Vec<user::Model>) -> Self {
        TeamRes {
            team_name: team.name,
            members: members
                .into_iter()
                .map(|m| TeamMemberRes {
                    user_id: m.id,
                    username: m.username,
                    is_active: m.is_active,
                })
                .collect(),
        }
    }
}
