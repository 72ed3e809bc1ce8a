const DEFAULT_CHAT_PATH: &str = "/chat";

/// Builder for [`HttpTransportConfig`].
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct HttpTransportConfigBuilder {
    base_url: String,
    chat_path: Option<String>,
}

impl HttpTransportConfigBuilder {
    /// Creates a builder with the given endpoint base, for example
    /// `http://localhost:5000`.
    #[inline]
    pub fn with_base_url<S: Into<String>>(base_url: S) -> Self {
        Self {
            base_url: base_url.into(),
            chat_path: None,
        }
    }

    /// Sets the path of the chat route, relative to the base. Defaults to
    /// `/chat`.
    #[inline]
    pub fn with_chat_path<S: Into<String>>(mut self, chat_path: S) -> Self {
        self.chat_path = Some(chat_path.into());
        self
    }

    /// Builds the configuration.
    pub fn build(self) -> HttpTransportConfig {
        let base = self.base_url.trim().trim_end_matches('/');
        let path = self.chat_path.as_deref().unwrap_or(DEFAULT_CHAT_PATH);
        let path = path.trim().trim_start_matches('/');
        HttpTransportConfig {
            chat_url: format!("{base}/{path}"),
        }
    }
}

/// Configuration for [`crate::HttpTransport`].
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct HttpTransportConfig {
    pub(crate) chat_url: String,
}

impl HttpTransportConfig {
    /// The full URL requests are posted to.
    #[inline]
    pub fn chat_url(&self) -> &str {
        &self.chat_url
    }
}
