//! Weekly availability entity - The recurring default hours per weekday.
//!
//! `day_of_week` counts from Sunday (`0`) to Saturday (`6`). There is at most one
//! row per (`barber_id`, `day_of_week`); writes go through upsert helpers in
//! `core::schedule` to keep it that way.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Weekly availability database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "weekly_availability")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Barber this row belongs to
    pub barber_id: i64,
    /// 0 = Sunday .. 6 = Saturday
    pub day_of_week: i32,
    /// Whether the barber works on this weekday by default
    pub is_available: bool,
    /// Opening time of the default window
    pub start_time: Time,
    /// Closing time of the default window
    pub end_time: Time,
}

/// Defines relationships between `WeeklyAvailability` and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each row belongs to one barber
    #[sea_orm(
        belongs_to = "super::barber::Entity",
        from = "Column::BarberId",
        to = "super::barber::Column::Id"
    )]
    Barber,
}

impl Related<super::barber::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Barber.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
