//! Business services.

pub mod account;

pub use account::AccountService;
