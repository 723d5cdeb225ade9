//! Service business logic - The menu of bookable offerings.
//!
//! A service's duration is what `create_appointment` adds to the start time to get the
//! end time, so it must be positive. Prices must be finite and non-negative.

use crate::{
    entities::{Service, service},
    errors::{Error, Result},
};
use sea_orm::{QueryOrder, Set, prelude::*};
use serde::Deserialize;

/// Fields supplied when adding or editing a service.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ServiceInput {
    pub name: String,
    pub description: Option<String>,
    pub duration_minutes: i32,
    pub price: f64,
}

impl ServiceInput {
    fn validated(self) -> Result<Self> {
        let name = self.name.trim().to_string();
        if name.is_empty() {
            return Err(Error::invalid("Service name cannot be empty"));
        }
        if self.duration_minutes <= 0 {
            return Err(Error::invalid(format!(
                "Service duration must be positive, got {} minutes",
                self.duration_minutes
            )));
        }
        if !self.price.is_finite() || self.price < 0.0 {
            return Err(Error::invalid(format!("Invalid price: {}", self.price)));
        }
        Ok(Self { name, ..self })
    }
}

/// Active services, cheapest first.
pub async fn get_active_services(db: &DatabaseConnection) -> Result<Vec<service::Model>> {
    Service::find()
        .filter(service::Column::IsActive.eq(true))
        .order_by_asc(service::Column::Price)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Finds a service by ID, including inactive ones.
///
/// # Returns
/// `Some(service)` if found, `None` otherwise
pub async fn get_service_by_id(
    db: &DatabaseConnection,
    service_id: i64,
) -> Result<Option<service::Model>> {
    Service::find_by_id(service_id)
        .one(db)
        .await
        .map_err(Into::into)
}

/// Adds an active service.
///
/// # Arguments
/// * `db` - Database connection
/// * `input` - Name, optional description, duration in minutes and price
///
/// # Errors
/// Returns an error if:
/// - The name is blank
/// - The duration is not positive, or the price is negative or not finite
/// - The database insert fails
pub async fn create_service(
    db: &DatabaseConnection,
    input: ServiceInput,
) -> Result<service::Model> {
    let input = input.validated()?;

    service::ActiveModel {
        name: Set(input.name),
        description: Set(input.description),
        duration_minutes: Set(input.duration_minutes),
        price: Set(input.price),
        is_active: Set(true),
        ..Default::default()
    }
    .insert(db)
    .await
    .map_err(Into::into)
}

/// Replaces a service's name, description, duration and price.
///
/// Existing appointments keep the end time computed when they were booked.
///
/// # Errors
/// Returns an error if the input fails validation, the service does not exist, or
/// the database update fails.
pub async fn update_service(
    db: &DatabaseConnection,
    service_id: i64,
    input: ServiceInput,
) -> Result<service::Model> {
    let input = input.validated()?;

    let mut service: service::ActiveModel = Service::find_by_id(service_id)
        .one(db)
        .await?
        .ok_or(Error::ServiceNotFound { id: service_id })?
        .into();

    service.name = Set(input.name);
    service.description = Set(input.description);
    service.duration_minutes = Set(input.duration_minutes);
    service.price = Set(input.price);

    service.update(db).await.map_err(Into::into)
}

/// Removes a service from the booking menu.
pub async fn deactivate_service(
    db: &DatabaseConnection,
    service_id: i64,
) -> Result<service::Model> {
    let mut service: service::ActiveModel = Service::find_by_id(service_id)
        .one(db)
        .await?
        .ok_or(Error::ServiceNotFound { id: service_id })?
        .into();

    service.is_active = Set(false);
    service.update(db).await.map_err(Into::into)
}
