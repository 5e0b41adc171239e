//! SeaORM entity definitions
//!
//! These are database-specific entities separate from domain models.

pub mod car;
pub mod payment;
pub mod reservation;
pub mod review;
pub mod user;
