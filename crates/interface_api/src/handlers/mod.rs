//! Request handlers

pub mod health;
pub mod restatement;
pub mod tariff;
