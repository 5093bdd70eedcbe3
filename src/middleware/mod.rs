pub mod json_body;
pub mod session;

pub use json_body::JsonBody;
pub use session::{CurrentUser, SessionPolicy};
