//! Appointment business logic - Booking, listing and managing appointments.
//!
//! Booking is a plain insert: the end time is derived from the service duration and the
//! new row starts as `pending`. No slot is held or locked while a customer fills in the
//! form, so two customers picking the same hour can both succeed. Checking the slot
//! first (see `core::availability`) narrows that window but does not close it.

use crate::{
    entities::{Appointment, Barber, Service, appointment, barber, service},
    errors::{Error, Result},
};
use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime};
use sea_orm::{QueryOrder, Set, prelude::*};
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};
use tracing::info;

/// Lifecycle state of an appointment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AppointmentStatus {
    Pending,
    Confirmed,
    Completed,
    /// Cancelled appointments never block a slot
    Cancelled,
}

impl AppointmentStatus {
    /// The text stored in `appointments.status`.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Confirmed => "confirmed",
            Self::Completed => "completed",
            Self::Cancelled => "cancelled",
        }
    }

    /// Whether an appointment in this state occupies its slot.
    #[must_use]
    pub const fn blocks_slot(self) -> bool {
        !matches!(self, Self::Cancelled)
    }
}

impl fmt::Display for AppointmentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AppointmentStatus {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pending" => Ok(Self::Pending),
            "confirmed" => Ok(Self::Confirmed),
            "completed" => Ok(Self::Completed),
            "cancelled" => Ok(Self::Cancelled),
            _ => Err(Error::InvalidStatus {
                status: s.to_string(),
            }),
        }
    }
}

impl appointment::Model {
    /// Parses the stored status text.
    pub fn parsed_status(&self) -> Result<AppointmentStatus> {
        self.status.parse()
    }
}

/// Contact details collected from the customer.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CustomerDetails {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: Option<String>,
}

impl CustomerDetails {
    /// Checks required fields and the email shape, returning the trimmed details.
    pub fn validated(self) -> Result<Self> {
        let first_name = self.first_name.trim().to_string();
        let last_name = self.last_name.trim().to_string();
        let email = self.email.trim().to_string();

        if first_name.is_empty() {
            return Err(Error::invalid("First name is required"));
        }
        if last_name.is_empty() {
            return Err(Error::invalid("Last name is required"));
        }
        if email.is_empty() {
            return Err(Error::invalid("Email is required"));
        }
        if !is_plausible_email(&email) {
            return Err(Error::invalid("Please enter a valid email address"));
        }

        let phone = self
            .phone
            .map(|phone| phone.trim().to_string())
            .filter(|phone| !phone.is_empty());

        Ok(Self {
            first_name,
            last_name,
            email,
            phone,
        })
    }
}

/// `local@domain.tld` with no whitespace and exactly one `@`.
fn is_plausible_email(email: &str) -> bool {
    if email.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') {
        return false;
    }
    domain
        .char_indices()
        .any(|(i, c)| c == '.' && i > 0 && i + 1 < domain.len())
}

/// A booking request as submitted by a customer.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct NewAppointment {
    pub barber_id: i64,
    pub service_id: i64,
    pub start_time: NaiveDateTime,
    pub customer: CustomerDetails,
}

impl NewAppointment {
    /// Builds a request for a slot picked as a date plus a wall-clock time.
    #[must_use]
    pub fn at(
        barber_id: i64,
        service_id: i64,
        date: NaiveDate,
        time: NaiveTime,
        customer: CustomerDetails,
    ) -> Self {
        Self {
            barber_id,
            service_id,
            start_time: date.and_time(time),
            customer,
        }
    }
}

/// Looks up a barber and service that can both currently be booked.
async fn bookable_pair(
    db: &DatabaseConnection,
    barber_id: i64,
    service_id: i64,
) -> Result<(barber::Model, service::Model)> {
    let barber = Barber::find_by_id(barber_id)
        .one(db)
        .await?
        .filter(|barber| barber.is_active)
        .ok_or(Error::BarberNotFound { id: barber_id })?;

    let service = Service::find_by_id(service_id)
        .one(db)
        .await?
        .filter(|service| service.is_active)
        .ok_or(Error::ServiceNotFound { id: service_id })?;

    Ok((barber, service))
}

fn end_time_for(start_time: NaiveDateTime, service: &service::Model) -> NaiveDateTime {
    start_time + Duration::minutes(i64::from(service.duration_minutes))
}

/// Creates a `pending` appointment ending `duration_minutes` after its start.
///
/// # Errors
/// Returns an error if:
/// - A customer field is missing or the email is malformed
/// - The barber or service does not exist or is inactive
/// - The database insert fails
pub async fn create_appointment(
    db: &DatabaseConnection,
    request: NewAppointment,
) -> Result<appointment::Model> {
    let customer = request.customer.validated()?;
    let (barber, service) = bookable_pair(db, request.barber_id, request.service_id).await?;

    let appointment = appointment::ActiveModel {
        barber_id: Set(barber.id),
        service_id: Set(service.id),
        customer_first_name: Set(customer.first_name),
        customer_last_name: Set(customer.last_name),
        customer_email: Set(customer.email),
        customer_phone: Set(customer.phone),
        start_time: Set(request.start_time),
        end_time: Set(end_time_for(request.start_time, &service)),
        status: Set(AppointmentStatus::Pending.as_str().to_string()),
        created_at: Set(chrono::Local::now().naive_local()),
        ..Default::default()
    };

    let created = appointment.insert(db).await?;
    info!(
        appointment_id = created.id,
        barber_id = created.barber_id,
        start = %created.start_time,
        "Appointment booked"
    );
    Ok(created)
}

/// New barber, service and start time for an existing appointment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct RescheduleInput {
    pub barber_id: i64,
    pub service_id: i64,
    pub start_time: NaiveDateTime,
}

/// Moves an appointment to another barber, service or time.
///
/// The end time is derived again from the (possibly new) service duration. Like
/// booking, this does not check whether the target slot is free. Status and
/// customer details are left as they are.
///
/// # Arguments
/// * `db` - Database connection
/// * `appointment_id` - Appointment to move
/// * `input` - Target barber, service and start time
///
/// # Errors
/// Returns an error if:
/// - The appointment does not exist
/// - The barber or service does not exist or is inactive
/// - The database update fails
pub async fn reschedule_appointment(
    db: &DatabaseConnection,
    appointment_id: i64,
    input: RescheduleInput,
) -> Result<appointment::Model> {
    let existing = Appointment::find_by_id(appointment_id)
        .one(db)
        .await?
        .ok_or(Error::AppointmentNotFound { id: appointment_id })?;
    let (barber, service) = bookable_pair(db, input.barber_id, input.service_id).await?;

    let mut appointment: appointment::ActiveModel = existing.into();
    appointment.barber_id = Set(barber.id);
    appointment.service_id = Set(service.id);
    appointment.start_time = Set(input.start_time);
    appointment.end_time = Set(end_time_for(input.start_time, &service));

    let updated = appointment.update(db).await?;
    info!(
        appointment_id,
        barber_id = updated.barber_id,
        start = %updated.start_time,
        end = %updated.end_time,
        "Appointment rescheduled"
    );
    Ok(updated)
}

/// Finds an appointment by its unique ID.
pub async fn get_appointment_by_id(
    db: &DatabaseConnection,
    appointment_id: i64,
) -> Result<Option<appointment::Model>> {
    Appointment::find_by_id(appointment_id)
        .one(db)
        .await
        .map_err(Into::into)
}

/// Optional filters for [`list_appointments`]; unset fields match everything.
#[derive(Debug, Clone, Default)]
pub struct AppointmentFilter {
    pub status: Option<AppointmentStatus>,
    pub barber_id: Option<i64>,
    /// Inclusive lower bound on the start time
    pub from: Option<NaiveDateTime>,
    /// Inclusive upper bound on the start time
    pub to: Option<NaiveDateTime>,
}

/// Lists appointments matching `filter`, newest start time first.
pub async fn list_appointments(
    db: &DatabaseConnection,
    filter: &AppointmentFilter,
) -> Result<Vec<appointment::Model>> {
    let mut query = Appointment::find();

    if let Some(status) = filter.status {
        query = query.filter(appointment::Column::Status.eq(status.as_str()));
    }
    if let Some(barber_id) = filter.barber_id {
        query = query.filter(appointment::Column::BarberId.eq(barber_id));
    }
    if let Some(from) = filter.from {
        query = query.filter(appointment::Column::StartTime.gte(from));
    }
    if let Some(to) = filter.to {
        query = query.filter(appointment::Column::StartTime.lte(to));
    }

    query
        .order_by_desc(appointment::Column::StartTime)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Moves an appointment to `status`. Cancelling frees its slot immediately.
pub async fn update_appointment_status(
    db: &DatabaseConnection,
    appointment_id: i64,
    status: AppointmentStatus,
) -> Result<appointment::Model> {
    let mut appointment: appointment::ActiveModel = Appointment::find_by_id(appointment_id)
        .one(db)
        .await?
        .ok_or(Error::AppointmentNotFound { id: appointment_id })?
        .into();

    appointment.status = Set(status.as_str().to_string());
    let updated = appointment.update(db).await?;
    info!(appointment_id, %status, "Appointment status changed");
    Ok(updated)
}

/// Permanently removes an appointment, returning the deleted row.
///
/// The returned model lets the caller notify the barber about the cancellation.
pub async fn delete_appointment(
    db: &DatabaseConnection,
    appointment_id: i64,
) -> Result<appointment::Model> {
    let appointment = Appointment::find_by_id(appointment_id)
        .one(db)
        .await?
        .ok_or(Error::AppointmentNotFound { id: appointment_id })?;

    Appointment::delete_by_id(appointment_id).exec(db).await?;
    info!(appointment_id, "Appointment deleted");
    Ok(appointment)
}
