pub mod carry;
pub mod error;
pub mod types;

#[cfg(feature = "returns")]
pub mod returns;

#[cfg(feature = "costs")]
pub mod costs;

#[cfg(feature = "risk")]
pub mod risk;

#[cfg(feature = "recommendation")]
pub mod recommendation;

pub use error::DeedAnalyticsError;
pub use types::*;

/// Standard result type for all deed-analytics operations
pub type DeedAnalyticsResult<T> = Result<T, DeedAnalyticsError>;
