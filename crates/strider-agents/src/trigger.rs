use serde::{Deserialize, Serialize};

/// Trigger volume that only reports bodies carrying one of its tags
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TriggerZone {
    pub allowed_tags: Vec<String>,
}

impl TriggerZone {
    pub fn new<I, S>(tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            allowed_tags: tags.into_iter().map(Into::into).collect(),
        }
    }

    pub fn accepts(&self, tag: &str) -> bool {
        self.allowed_tags.iter().any(|allowed| allowed == tag)
    }
}

impl Default for TriggerZone {
    fn default() -> Self {
        Self::new(["agent"])
    }
}
