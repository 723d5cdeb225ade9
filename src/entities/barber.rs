//! Barber entity - A service provider with an independent calendar.
//!
//! Barbers own their weekly availability, date overrides and appointments.
//! Inactive barbers stay in the table but are hidden from booking.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Barber database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "barbers")]
pub struct Model {
    /// Unique identifier for the barber
    #[sea_orm(primary_key)]
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    /// Contact address used for booking notifications
    pub email: String,
    pub bio: Option<String>,
    /// Short tagline shown next to the name (e.g., "Fades & beard work")
    pub specialty: Option<String>,
    /// Public URL of the profile picture, if one was uploaded
    pub profile_img: Option<String>,
    /// Whether the barber can currently be booked
    pub is_active: bool,
    /// When the barber was added; listing order follows this
    pub created_at: DateTime,
}

/// Defines relationships between Barber and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// One barber has many weekly availability rows (at most one per weekday)
    #[sea_orm(has_many = "super::weekly_availability::Entity")]
    WeeklyAvailability,
    /// One barber has many date overrides (at most one per date)
    #[sea_orm(has_many = "super::schedule_override::Entity")]
    ScheduleOverrides,
    /// One barber has many appointments
    #[sea_orm(has_many = "super::appointment::Entity")]
    Appointments,
}

impl Related<super::weekly_availability::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::WeeklyAvailability.def()
    }
}

impl Related<super::schedule_override::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ScheduleOverrides.def()
    }
}

impl Related<super::appointment::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Appointments.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
