pub mod auth;
pub mod request_id;

pub use auth::{AuthMethod, StaffAuth, StaffSession};
pub use request_id::{RequestId, RequestIdMiddleware};
