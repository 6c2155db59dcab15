pub mod api;
pub mod balance;
pub mod health;
