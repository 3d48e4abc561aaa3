//! Momentum factors - measures of trend persistence
//!
//! Momentum is read off the price table as a trailing percentage change.

pub mod price_momentum;

pub use price_momentum::{PriceMomentum, add_momentum};
