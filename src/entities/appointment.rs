//! Appointment entity - A customer's booking of a barber for a service.
//!
//! Times are local wall-clock values (`NaiveDateTime`); the shop runs in a single
//! zone. `status` is stored as text and parsed through
//! `core::appointment::AppointmentStatus`.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Appointment database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "appointments")]
pub struct Model {
    /// Unique identifier for the appointment
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Barber performing the service
    pub barber_id: i64,
    /// Service being booked
    pub service_id: i64,
    pub customer_first_name: String,
    pub customer_last_name: String,
    pub customer_email: String,
    pub customer_phone: Option<String>,
    /// When the appointment begins
    pub start_time: DateTime,
    /// Start time plus the service duration
    pub end_time: DateTime,
    /// One of `"pending"`, `"confirmed"`, `"completed"`, `"cancelled"`
    pub status: String,
    /// When the booking was made
    pub created_at: DateTime,
}

/// Defines relationships between Appointment and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each appointment belongs to one barber
    #[sea_orm(
        belongs_to = "super::barber::Entity",
        from = "Column::BarberId",
        to = "super::barber::Column::Id"
    )]
    Barber,
    /// Each appointment references one service
    #[sea_orm(
        belongs_to = "super::service::Entity",
        from = "Column::ServiceId",
        to = "super::service::Column::Id"
    )]
    Service,
}

impl Related<super::barber::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Barber.def()
    }
}

impl Related<super::service::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Service.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
