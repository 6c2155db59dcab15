pub mod balance;
pub mod health;
