// Homefront - Core Library
// Exposes all modules for use in CLI, API server, and tests

pub mod money;
pub mod validate;
pub mod mortgage;
pub mod affordability;
pub mod schedule;
pub mod listings;
pub mod config;

// Only compile the UI module when the TUI feature is enabled
#[cfg(feature = "tui")]
pub mod ui;

// Re-export commonly used types
pub use money::{format_currency, format_currency_cents, parse_currency};
pub use validate::{ErrorKind, ValidationError, ValidationResult};
pub use mortgage::{MortgageInputs, MortgageQuote};
pub use affordability::{
    AffordabilityEstimate, AffordabilityInputs, DebtServicePolicy, GDS_CAP, TDS_CAP,
};
pub use schedule::ScheduleRow;
pub use listings::{Listing, ListingBook, ListingFilter, PropertyType};
pub use config::MlsConfig;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
