use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Pull request lifecycle. OPEN is the initial state, MERGED the only other
/// one; the sole legal transition is OPEN -> MERGED.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PrStatus {
    #[sea_orm(string_value = "OPEN")]
    Open,
    #[sea_orm(string_value = "MERGED")]
    Merged,
}

impl PrStatus {
    /// MERGED is terminal; nothing leaves it.
    pub fn is_terminal(&self) -> bool {
        matches!(self, PrStatus::Merged)
    }

    /// Reviewer assignments may only be added or removed while OPEN.
    pub fn allows_reviewer_changes(&self) -> bool {
        matches!(self, PrStatus::Open)
    }
}

#[derive(Debug, Clone, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "pull_request")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub name: String,
    pub author_id: String, // FK -> user.id
    pub status: PrStatus,
    pub created_at: DateTimeUtc,
    pub merged_at: Option<DateTimeUtc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::AuthorId",
        to = "super::user::Column::Id",
        on_update = "Cascade",
        on_delete = "Cascade"
    )]
    Author,

    #[sea_orm(has_many = "super::pr_reviewer::Entity")]
    ReviewerAssignment,
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Author.def()
    }
}

impl Related<super::pr_reviewer::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ReviewerAssignment.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
