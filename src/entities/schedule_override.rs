//! Schedule override entity - A date-specific exception to the weekly hours.
//!
//! When a row exists for (`barber_id`, `date`) it replaces the weekly default for
//! that date entirely. Times are optional because a closed day needs none.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Schedule override database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "schedules")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Barber this override applies to
    pub barber_id: i64,
    /// The single calendar date being overridden
    pub date: Date,
    /// Open or closed on this date, regardless of the weekly row
    pub is_available: bool,
    pub start_time: Option<Time>,
    pub end_time: Option<Time>,
}

/// Defines relationships between `ScheduleOverride` and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each override belongs to one barber
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
