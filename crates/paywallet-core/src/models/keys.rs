use serde::{Deserialize, Serialize};

/// The signed-in user's key pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyPair {
    #[serde(rename = "publicKey")]
    pub public_key: String,
    #[serde(rename = "privateKey")]
    pub private_key: String,
}

/// An entry from the public key directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "ts", derive(ts_rs::TS))]
#[cfg_attr(feature = "ts", ts(export))]
pub struct PublicKeyEntry {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(rename = "publicKey")]
    pub public_key: String,
}

impl PublicKeyEntry {
    pub fn display_name(&self) -> &str {
        self.name.as_deref().filter(|n| !n.is_empty()).unwrap_or("Unnamed")
    }
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct PasswordCheck {
    #[serde(rename = "isPasswordCorrect", default)]
    pub is_password_correct: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_public_key_entries() {
        let json = r#"[
            {"_id":"1","name":"Alice Wonderland","publicKey":"0x1A2b3C4d5E6f7A8B9c0D1e2F3a4B5c6D7e8F9a0B"},
            {"_id":"2","publicKey":"0x9F8e7D6c5B4a3F2e1D0c9B8a7F6e5D4c3B2a1F0E"}
        ]"#;
        let entries: Vec<PublicKeyEntry> = serde_json::from_str(json).unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].display_name(), "Alice Wonderland");
        assert_eq!(entries[1].display_name(), "Unnamed");
    }
}
