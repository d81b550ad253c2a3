//! Authenticated identity as reported by the session provider.

use crate::identifiers::UserId;
use serde::{Deserialize, Serialize};

/// The signed-in user. Absence of a session is `Option::None` at use sites.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionIdentity {
    pub uid: UserId,
    #[serde(default)]
    pub display_name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default, rename = "photoURL")]
    pub photo_url: Option<String>,
}

impl SessionIdentity {
    /// Identity with only the opaque id set
    pub fn new(uid: impl Into<UserId>) -> Self {
        Self {
            uid: uid.into(),
            display_name: None,
            email: None,
            photo_url: None,
        }
    }

    pub fn with_display_name(mut self, name: impl Into<String>) -> Self {
        self.display_name = Some(name.into());
        self
    }

    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    pub fn with_photo_url(mut self, url: impl Into<String>) -> Self {
        self.photo_url = Some(url.into());
        self
    }

    /// Best label for greeting the user: display name, then email, then uid.
    pub fn label(&self) -> &str {
        self.display_name
            .as_deref()
            .or(self.email.as_deref())
            .unwrap_or_else(|| self.uid.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_label_fallbacks() {
        let bare = SessionIdentity::new("u1");
        assert_eq!(bare.label(), "u1");
        let mailed = bare.clone().with_email("a@b.c");
        assert_eq!(mailed.label(), "a@b.c");
        let named = mailed.with_display_name("Ada");
        assert_eq!(named.label(), "Ada");
    }

    #[test]
    fn test_photo_url_wire_name() {
        let id = SessionIdentity::new("u1").with_photo_url("p.png");
        let value = serde_json::to_value(&id).unwrap();
        assert_eq!(value["photoURL"], "p.png");
    }
}
