//! Entity module - Contains all SeaORM entity definitions for the database.
//! These entities represent the shop's tables and their relationships.
//! Each entity has a Model struct for data and an Entity struct for operations.

pub mod appointment;
pub mod barber;
pub mod schedule_override;
pub mod service;
pub mod weekly_availability;

// Re-export specific types to avoid conflicts
pub use appointment::{
    Column as AppointmentColumn, Entity as Appointment, Model as AppointmentModel,
};
pub use barber::{Column as BarberColumn, Entity as Barber, Model as BarberModel};
pub use schedule_override::{
    Column as ScheduleOverrideColumn, Entity as ScheduleOverride, Model as ScheduleOverrideModel,
};
pub use service::{Column as ServiceColumn, Entity as Service, Model as ServiceModel};
pub use weekly_availability::{
    Column as WeeklyAvailabilityColumn, Entity as WeeklyAvailability,
    Model as WeeklyAvailabilityModel,
};
