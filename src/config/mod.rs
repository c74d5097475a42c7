pub mod settings;

pub use settings::{API_KEY_ENV, Settings, normalize_base_url, resolve_api_key};
