pub mod accounts;
pub mod sales;
