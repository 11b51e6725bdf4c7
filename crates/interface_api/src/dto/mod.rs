//! Request and response bodies

pub mod restatement;
pub mod tariff;
