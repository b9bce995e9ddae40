//! Environment-driven configuration.
//!
//! All values the library needs to talk to the Graph API come from
//! environment variables. The page access token and the webhook verify
//! token are secrets; never log them.

use envconfig::Envconfig;

#[derive(Envconfig, Clone)]
pub struct Config {
    /// 🔒 SENSITIVE: Page access token used to authenticate Send API calls
    #[envconfig(from = "FB_PAGE_ACCESS_TOKEN")]
    pub page_access_token: String,

    /// 🔒 SENSITIVE: Token compared against `hub.verify_token` on webhook
    /// verification requests
    #[envconfig(from = "FB_VERIFY_TOKEN")]
    pub verify_token: String,

    /// 🔒 SENSITIVE: App secret; when set, every request also carries an
    /// `appsecret_proof` parameter
    #[envconfig(from = "FB_APP_SECRET")]
    pub app_secret: Option<String>,

    /// Graph API host (NON-SENSITIVE); override for test doubles
    #[envconfig(from = "GRAPH_API_BASE_URL", default = "https://graph.facebook.com")]
    pub graph_base_url: String,

    /// Graph API version segment (NON-SENSITIVE)
    #[envconfig(from = "GRAPH_API_VERSION", default = "v2.11")]
    pub graph_version: String,
}
