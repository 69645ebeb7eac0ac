//! Core type definitions

mod control_point;
mod region;
mod wall;

pub use control_point::*;
pub use region::*;
pub use wall::*;
