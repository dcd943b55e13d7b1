//! Link checkers
//!
//! Checkers decide which extracted links are queued:
//!
//! - [`CheckerGroup`]: accepts a link only if every member accepts it
//! - [`DuplicateChecker`]: accepts a link the first time it is seen
//! - [`HostChecker`]: accepts links on the same host as their source link
//!
//! The robots.txt gate is [`crate::robots::RobotsChecker`], re-exported here.

mod duplicate;
mod group;
mod host;

pub use crate::robots::RobotsChecker;
pub use duplicate::DuplicateChecker;
pub use group::CheckerGroup;
pub use host::HostChecker;
