//! User-visible notifications and localized strings.

mod notifications_model;
mod notifier;
mod translator;

pub use notifications_model::*;
pub use notifier::*;
pub use translator::*;
