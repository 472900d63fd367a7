/// Application name
pub const APP_NAME: &str = "Buzzin";

/// Base path every API route is nested under
pub const API_BASE_PATH: &str = "/api";

/// Default HTTP API port (server)
pub const DEFAULT_HTTP_PORT: u16 = 5000;

/// API base URL the client falls back to when nothing is configured
pub const DEFAULT_API_URL: &str = "http://localhost:5000/api";

/// Local storage key holding the generated anonymous user id
pub const STORAGE_KEY_USER_ID: &str = "userId";

/// Local storage key holding the cached link list (JSON array)
pub const STORAGE_KEY_LINKS: &str = "links";

/// How long a toast notification stays visible, in milliseconds
pub const TOAST_DURATION_MS: u64 = 2_000;
