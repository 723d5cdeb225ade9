use chair_time::{
    config::{database, shop},
    core::{availability::AvailabilityResolver, barber, calendar, seed, source::SeaOrmSource},
    errors::Result,
};
use chrono::Local;
use dotenvy::dotenv;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // 1. Initialize tracing (as early as possible)
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // 2. Load .env file; env vars can also be set externally
    dotenv().ok();
    info!("Attempted to load .env file.");

    // 3. Load the shop configuration
    let shop_config = shop::load_default_config()
        .inspect_err(|e| error!("Critical error loading shop configuration: {}", e))?;

    // 4. Initialize database
    let db = database::create_connection()
        .await
        .inspect_err(|e| error!("Failed to connect to database: {}", e))?;
    database::create_tables(&db)
        .await
        .inspect(|_| info!("Database initialized successfully."))
        .inspect_err(|e| error!("Failed to initialize database: {}", e))?;

    // 5. Seed barbers, hours and services that are not in the database yet
    seed::seed_from_config(&db, &shop_config)
        .await
        .inspect_err(|e| error!("Failed to seed shop data: {}", e))?;

    // 6. Report what the booking page would offer over the booking window
    let today = Local::now().date_naive();
    let (start, end) = calendar::booking_window(today, shop_config.booking.horizon_days);
    let resolver = AvailabilityResolver::new(SeaOrmSource::new(&db));

    for barber in barber::get_active_barbers(&db).await? {
        let dates = resolver.list_bookable_dates(barber.id, start, end).await?;
        let next_open = match dates.first() {
            Some(&date) => {
                let slots = resolver.compute_slots(barber.id, date).await?;
                let slots = calendar::disable_past_slots(date, &slots, Local::now().naive_local());
                let open = slots.iter().filter(|slot| slot.is_available).count();
                format!("{date} ({open} open slots)")
            }
            None => "none".to_string(),
        };
        info!(
            barber = %format!("{} {}", barber.first_name, barber.last_name),
            bookable_days = dates.len(),
            next_open = %next_open,
            "Availability from {} to {}",
            start,
            end
        );
    }

    Ok(())
}
