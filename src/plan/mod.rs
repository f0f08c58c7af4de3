//! The layout and mapping engine: census expansion, tower building,
//! switch resolution, and coordinate placement.

pub mod expand;
pub mod layout;
pub mod switches;
pub mod towers;

pub use expand::expand_census;
pub use layout::{layout, LayoutPoint, SitePlan};
pub use switches::assign_switches;
pub use towers::build_towers;
