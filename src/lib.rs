//! Builder360 client core
//!
//! Platform-agnostic half of the marketplace front-end. Everything that
//! touches the browser is reached through a trait so the logic here can be
//! driven from native tests:
//! - `request::HttpClient`: transport
//! - `storage::KeyValueStore`: persistent key-value storage
//! - `navigator::Navigator`: forced navigation on session expiry
//!
//! On top of those sit the `ApiClient` wrapper, the `SessionManager`, the
//! form validators, the listing search state and the route table.

// =========================================================
// Cross-platform logging macros
// =========================================================

#[cfg(target_arch = "wasm32")]
#[macro_export]
macro_rules! log_info {
    ($($t:tt)*) => ($crate::__console::log_1(&format!($($t)*).into()))
}

#[cfg(not(target_arch = "wasm32"))]
#[macro_export]
macro_rules! log_info {
    ($($t:tt)*) => (println!($($t)*))
}

#[cfg(target_arch = "wasm32")]
#[macro_export]
macro_rules! log_warn {
    ($($t:tt)*) => ($crate::__console::warn_1(&format!($($t)*).into()))
}

#[cfg(not(target_arch = "wasm32"))]
#[macro_export]
macro_rules! log_warn {
    ($($t:tt)*) => (eprintln!($($t)*))
}

#[cfg(target_arch = "wasm32")]
#[macro_export]
macro_rules! log_error {
    ($($t:tt)*) => ($crate::__console::error_1(&format!($($t)*).into()))
}

#[cfg(not(target_arch = "wasm32"))]
#[macro_export]
macro_rules! log_error {
    ($($t:tt)*) => (eprintln!($($t)*))
}

#[cfg(target_arch = "wasm32")]
#[doc(hidden)]
pub use web_sys::console as __console;

pub mod api;
pub mod config;
pub mod navigator;
pub mod request;
pub mod route;
pub mod search;
pub mod session;
pub mod storage;
pub mod validation;

pub use api::{ApiClient, ApiError, ApiResult};
pub use config::ClientConfig;
pub use navigator::Navigator;
pub use request::{HttpClient, HttpRequest, HttpResponse, TransportError};
pub use route::AppRoute;
pub use session::{SessionManager, SessionState};
pub use storage::{KeyValueStore, MemoryStore};

pub use builder360_shared as shared;
