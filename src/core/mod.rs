//! Core booking logic, independent of any web or chat front end.

/// Appointment booking and status management
pub mod appointment;
/// Day resolution, bookable dates and hourly slot computation
pub mod availability;
/// Barber profiles
pub mod barber;
/// Month navigation and presentation helpers for the date picker
pub mod calendar;
/// Stale-response guard for interactive slot queries
pub mod latest;
/// Weekly hours and per-date overrides
pub mod schedule;
/// First-run seeding from the shop configuration
pub mod seed;
/// Service menu
pub mod service;
/// Read-only data access used by the availability resolver
pub mod source;
