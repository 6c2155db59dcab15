pub mod api;
pub mod balance;
