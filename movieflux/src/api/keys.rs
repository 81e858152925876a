/// Environment variable holding the catalog API key
pub const API_KEY_ENV: &str = "TMDB_API_KEY";

const UNEXPANDED_PLACEHOLDER: &str = "$(TMDB_API_KEY)";

/// Source of the catalog API key, consulted on every request
pub trait ApiKeyProvider: Send + Sync {
    fn api_key(&self) -> Option<String>;
}

/// Reads the key from `TMDB_API_KEY`
#[derive(Debug, Clone, Copy, Default)]
pub struct EnvApiKeyProvider;

impl ApiKeyProvider for EnvApiKeyProvider {
    fn api_key(&self) -> Option<String> {
        std::env::var(API_KEY_ENV)
            .ok()
            .and_then(|raw| normalize_api_key(&raw))
    }
}

/// A fixed key, or none at all
#[derive(Debug, Clone, Default)]
pub struct StaticApiKeyProvider(Option<String>);

impl StaticApiKeyProvider {
    pub fn new(key: impl Into<String>) -> Self {
        Self(normalize_api_key(&key.into()))
    }

    pub fn missing() -> Self {
        Self(None)
    }
}

impl ApiKeyProvider for StaticApiKeyProvider {
    fn api_key(&self) -> Option<String> {
        self.0.clone()
    }
}

/// Trim whitespace; blank values and an unexpanded build placeholder count
/// as no key.
pub fn normalize_api_key(raw: &str) -> Option<String> {
    let key = raw.trim();
    if key.is_empty() || key == UNEXPANDED_PLACEHOLDER {
        None
    } else {
        Some(key.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_api_key() {
        assert_eq!(normalize_api_key("  abc123\n").as_deref(), Some("abc123"));
        assert_eq!(normalize_api_key(""), None);
        assert_eq!(normalize_api_key("   "), None);
        assert_eq!(normalize_api_key("$(TMDB_API_KEY)"), None);
        assert_eq!(normalize_api_key(" $(TMDB_API_KEY) "), None);
    }

    #[test]
    fn test_static_provider() {
        assert_eq!(
            StaticApiKeyProvider::new("key").api_key().as_deref(),
            Some("key")
        );
        assert_eq!(StaticApiKeyProvider::new(" ").api_key(), None);
        assert_eq!(StaticApiKeyProvider::missing().api_key(), None);
    }
}
