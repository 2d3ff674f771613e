//! Request handlers.

pub mod applications;
pub mod auth;
pub mod courses;
pub mod health;
pub mod jobs;
pub mod plans;
pub mod profiles;

pub use applications::*;
pub use auth::*;
pub use courses::*;
pub use health::*;
pub use jobs::*;
pub use plans::*;
pub use profiles::*;
