pub mod account_store;
pub mod password;
pub mod sales_ledger;
