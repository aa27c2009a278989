//! Article location helpers.
//!
//! # Module Structure
//!
//! - `tags`: Tag catalogs (containers, leaves, phrasing, void, block)
//! - `pruning`: Removal of unlikely and hidden sections before scoring
//! - `readability`: Alternative article locator backed by `dom_smoothie`
//!   (feature `readability`)

pub mod pruning;
#[cfg(feature = "readability")]
pub mod readability;
pub mod tags;

pub use pruning::prune_unwanted_sections;
