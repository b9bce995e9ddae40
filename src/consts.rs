pub const GRAPH_API_BASE_URL: &str = "https://graph.facebook.com";
pub const GRAPH_API_VERSION: &str = "v2.11";

/// Locale applied to greetings and persistent menus when none is given.
pub const DEFAULT_LOCALE: &str = "default";

/// Profile fields fetched by [`crate::MessengerClient::get_user_data`] when
/// the caller does not narrow them.
pub const DEFAULT_USER_FIELDS: &str = "first_name,last_name,profile_pic,locale,timezone,gender";
