//! Authentication: the session credential, where it is kept, and what the
//! signed-in role may reach.

mod credential;
mod password;
mod role;
mod store;

pub use credential::{CurrentUser, LoginResponse, SessionCredential};
pub use password::{validate_password_change, validate_password_reset, MIN_PASSWORD_LEN};
pub use role::{Page, Role};
pub use store::{CredentialStore, FileCredentialStore, MemoryCredentialStore};
