pub mod binding;
pub mod connection;
pub mod error;
pub mod migrations;
pub mod repositories;

pub use binding::PgSessionConnection;
pub use connection::{Database, DatabaseConfig};
pub use error::{DatabaseError, Result};
pub use repositories::{nutrition::NutritionEntryRepository, users::UserRepository};
