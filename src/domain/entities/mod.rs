//! Domain Entities
//!
//! Core domain objects of the gym server, each with the repository trait
//! that defines how it is stored.

mod appointment;
mod gym;
mod offering;
mod post;
mod user;

pub use appointment::*;
pub use gym::*;
pub use offering::*;
pub use post::*;
pub use user::*;
