//! Google Sheets transport: service-account auth, Drive name lookup, Sheets values read.

mod auth;
mod sheets;

pub use auth::{SCOPES, service_account_token};
pub use sheets::GoogleSheetsSource;
