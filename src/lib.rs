//! Helpers to prepare RGB-D dataset folders for reconstruction: natural
//! order file listing, dataset layout checks and pose log reading/writing.

pub mod error;
pub mod io;
pub mod trajectory;
pub mod transform;


pub use crate::error::Error;
pub use crate::trajectory::Trajectory;
pub use crate::transform::Transform;
