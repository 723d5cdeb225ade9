//! Service entity - A bookable offering (haircut, beard trim, ...).
//!
//! The duration is what turns an appointment's start time into its end time.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Service database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "services")]
pub struct Model {
    /// Unique identifier for the service
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Display name (e.g., "Skin Fade")
    pub name: String,
    pub description: Option<String>,
    /// Length of the service in minutes
    pub duration_minutes: i32,
    /// Price in dollars
    pub price: f64,
    /// Inactive services are hidden from booking
    pub is_active: bool,
}

/// Defines relationships between Service and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// One service is referenced by many appointments
    #[sea_orm(has_many = "super::appointment::Entity")]
    Appointments,
}

impl Related<super::appointment::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Appointments.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
