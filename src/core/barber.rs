//! Barber business logic - Creating, listing and editing barbers.

use crate::{
    entities::{Barber, barber},
    errors::{Error, Result},
};
use sea_orm::{PaginatorTrait, QueryOrder, Set, prelude::*};
use serde::Deserialize;
use tracing::info;

/// Fields supplied when adding or editing a barber.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct BarberInput {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub bio: Option<String>,
    pub specialty: Option<String>,
    pub profile_img: Option<String>,
}

impl BarberInput {
    fn validated(self) -> Result<Self> {
        let first_name = self.first_name.trim().to_string();
        let last_name = self.last_name.trim().to_string();
        let email = self.email.trim().to_string();
        if first_name.is_empty() || last_name.is_empty() {
            return Err(Error::invalid("Barber first and last name are required"));
        }
        if email.is_empty() {
            return Err(Error::invalid("Barber email is required"));
        }

        let blank_to_none = |value: Option<String>| {
            value
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        Ok(Self {
            first_name,
            last_name,
            email,
            bio: blank_to_none(self.bio),
            specialty: blank_to_none(self.specialty),
            profile_img: blank_to_none(self.profile_img),
        })
    }
}

/// Active barbers in the order they joined.
pub async fn get_active_barbers(db: &DatabaseConnection) -> Result<Vec<barber::Model>> {
    Barber::find()
        .filter(barber::Column::IsActive.eq(true))
        .order_by_asc(barber::Column::CreatedAt)
        .order_by_asc(barber::Column::Id)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Number of active barbers.
pub async fn count_active_barbers(db: &DatabaseConnection) -> Result<u64> {
    Barber::find()
        .filter(barber::Column::IsActive.eq(true))
        .count(db)
        .await
        .map_err(Into::into)
}

/// Finds a barber by ID, active or not.
///
/// # Arguments
/// * `db` - Database connection
/// * `barber_id` - ID of the barber to look up
///
/// # Returns
/// `Some(barber)` if found, `None` otherwise
pub async fn get_barber_by_id(
    db: &DatabaseConnection,
    barber_id: i64,
) -> Result<Option<barber::Model>> {
    Barber::find_by_id(barber_id).one(db).await.map_err(Into::into)
}

/// Adds an active barber.
///
/// Names and email are trimmed; blank bio, specialty or image become `None`.
///
/// # Errors
/// Returns an error if:
/// - The first name, last name or email is blank
/// - The database insert fails
pub async fn create_barber(db: &DatabaseConnection, input: BarberInput) -> Result<barber::Model> {
    let input = input.validated()?;

    let barber = barber::ActiveModel {
        first_name: Set(input.first_name),
        last_name: Set(input.last_name),
        email: Set(input.email),
        bio: Set(input.bio),
        specialty: Set(input.specialty),
        profile_img: Set(input.profile_img),
        is_active: Set(true),
        created_at: Set(chrono::Local::now().naive_local()),
        ..Default::default()
    };

    let created = barber.insert(db).await?;
    info!(barber_id = created.id, "Barber created");
    Ok(created)
}

/// Replaces a barber's profile fields.
///
/// # Arguments
/// * `db` - Database connection
/// * `barber_id` - ID of the barber to edit
/// * `input` - New profile, validated like [`create_barber`]
///
/// # Errors
/// Returns an error if:
/// - A required field is blank
/// - The barber does not exist
/// - The database update fails
pub async fn update_barber(
    db: &DatabaseConnection,
    barber_id: i64,
    input: BarberInput,
) -> Result<barber::Model> {
    let input = input.validated()?;

    let mut barber: barber::ActiveModel = Barber::find_by_id(barber_id)
        .one(db)
        .await?
        .ok_or(Error::BarberNotFound { id: barber_id })?
        .into();

    barber.first_name = Set(input.first_name);
    barber.last_name = Set(input.last_name);
    barber.email = Set(input.email);
    barber.bio = Set(input.bio);
    barber.specialty = Set(input.specialty);
    barber.profile_img = Set(input.profile_img);

    barber.update(db).await.map_err(Into::into)
}

/// Hides a barber from booking without touching their history.
///
/// Inactive barbers are left out of [`get_active_barbers`] and cannot receive new
/// appointments. Passing `true` brings them back.
pub async fn set_barber_active(
    db: &DatabaseConnection,
    barber_id: i64,
    is_active: bool,
) -> Result<barber::Model> {
    let mut barber: barber::ActiveModel = Barber::find_by_id(barber_id)
        .one(db)
        .await?
        .ok_or(Error::BarberNotFound { id: barber_id })?
        .into();

    barber.is_active = Set(is_active);
    barber.update(db).await.map_err(Into::into)
}

/// Permanently removes a barber.
///
/// Fails with a database error while the barber still has schedule rows or
/// appointments referencing them; deactivate instead in that case.
pub async fn delete_barber(db: &DatabaseConnection, barber_id: i64) -> Result<()> {
    let result = Barber::delete_by_id(barber_id).exec(db).await?;
    if result.rows_affected == 0 {
        return Err(Error::BarberNotFound { id: barber_id });
    }
    info!(barber_id, "Barber deleted");
    Ok(())
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::test_utils::*;

    #[tokio::test]
    async fn test_create_barber_validation() -> Result<()> {
        let db = setup_test_db().await?;

        let result = create_barber(
            &db,
            BarberInput {
                first_name: "  ".to_string(),
                ..barber_input("Sam")
            },
        )
        .await;
        assert!(matches!(result, Err(Error::InvalidInput { .. })));

        let created = create_barber(
            &db,
            BarberInput {
                specialty: Some("   ".to_string()),
                ..barber_input("Sam")
            },
        )
        .await?;
        assert_eq!(created.specialty, None);
        assert!(created.is_active);
        Ok(())
    }

    #[tokio::test]
    async fn test_active_barbers_listing_and_count() -> Result<()> {
        let db = setup_test_db().await?;
        let first = create_barber(&db, barber_input("Sam")).await?;
        let second = create_barber(&db, barber_input("Alex")).await?;
        set_barber_active(&db, first.id, false).await?;

        let active = get_active_barbers(&db).await?;
        assert_eq!(active.len(), 1);
        assert_eq!(active[0].id, second.id);
        assert_eq!(count_active_barbers(&db).await?, 1);
        Ok(())
    }

    #[tokio::test]
    async fn test_update_and_delete_barber() -> Result<()> {
        let db = setup_test_db().await?;
        let barber = create_barber(&db, barber_input("Sam")).await?;

        let updated = update_barber(
            &db,
            barber.id,
            BarberInput {
                bio: Some("Ten years behind the chair".to_string()),
                ..barber_input("Samantha")
            },
        )
        .await?;
        assert_eq!(updated.first_name, "Samantha");
        assert!(updated.bio.is_some());

        delete_barber(&db, barber.id).await?;
        assert!(get_barber_by_id(&db, barber.id).await?.is_none());
        assert!(matches!(
            delete_barber(&db, barber.id).await,
            Err(Error::BarberNotFound { .. })
        ));
        Ok(())
    }
}
