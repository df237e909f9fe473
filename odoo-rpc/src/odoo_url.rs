#[derive(Debug, Clone)]
pub struct OdooUrl(String);

impl AsRef<str> for OdooUrl {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl OdooUrl {
    pub fn new(base: impl Into<String>) -> Self {
        Self(base.into())
    }

    /// Append the given path to the URL.
    pub fn append_path(&self, path: &str) -> Self {
        let trimmed_url = self.0.trim_end_matches('/');
        let trimmed_path = path.trim_start_matches('/');
        Self(format!("{}/{}", trimmed_url, trimmed_path))
    }

    /// `/web/dataset/call_kw/<model>/<method>`, the path the web client uses.
    pub fn call_kw(&self, model: &str, method: &str) -> Self {
        self.append_path(&format!("/web/dataset/call_kw/{}/{}", model, method))
    }
}
