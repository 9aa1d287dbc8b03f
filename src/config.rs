use crate::model::ChallengeId;

/// Attribute on the document root that may carry the endpoint base.
pub const ENDPOINT_BASE_ATTR: &str = "data-endpoint-base";

/// Per-page settings shared by the launcher and the submission controller.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClientConfig {
    endpoint_base: String,
    pub bonus_float_delay_ms: u32,
    pub reveal_redirect_delay_ms: u32,
    pub chapters_redirect_delay_ms: u32,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            endpoint_base: String::new(),
            bonus_float_delay_ms: 700,
            reveal_redirect_delay_ms: 1800,
            chapters_redirect_delay_ms: 2200,
        }
    }
}

impl ClientConfig {
    pub fn with_endpoint_base(base: &str) -> Self {
        Self {
            endpoint_base: base.trim().trim_end_matches('/').to_string(),
            ..Self::default()
        }
    }

    /// Picks the endpoint base from the explicit argument first, then from the root element's
    /// attribute. Blank values fall through to the next source.
    pub fn resolve(explicit: Option<&str>, root_attr: Option<&str>) -> Self {
        let base = [explicit, root_attr]
            .into_iter()
            .flatten()
            .find(|b| !b.trim().is_empty())
            .unwrap_or("");
        Self::with_endpoint_base(base)
    }

    pub fn endpoint_base(&self) -> &str {
        &self.endpoint_base
    }

    pub fn start_url(&self, id: &ChallengeId) -> String {
        format!("{}/start/{}", self.endpoint_base, id)
    }

    pub fn submit_url(&self, id: &ChallengeId) -> String {
        format!("{}/submit/{}", self.endpoint_base, id)
    }

    pub fn content_url(&self, id: &ChallengeId) -> String {
        format!("{}/content/{}", self.endpoint_base, id)
    }

    pub fn chapters_url(&self, revealed: bool) -> String {
        if revealed {
            format!("{}/chapters?revealed=1", self.endpoint_base)
        } else {
            format!("{}/chapters", self.endpoint_base)
        }
    }
}
