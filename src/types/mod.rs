pub mod account;
pub mod money;
pub mod sale;

pub use account::{Credentials, User};
pub use money::Money;
pub use sale::{NewSale, Sale, SaleSubmission, SalesTotals};
