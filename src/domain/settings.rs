use super::order::GatewayId;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Settings key under which the host stores the secret API key.
pub const API_KEY_SETTING: &str = "securionpay_api_key";

/// A configured SecurionPay secret key.
///
/// An empty stored value means the gateway is unconfigured, which is a
/// valid state rather than an error: operations that need the key refuse
/// safely instead of failing.
#[derive(Clone, PartialEq, Eq)]
pub struct ApiKey(String);

impl ApiKey {
    /// Reads the key from its stored settings value. Empty or
    /// whitespace-only values mean "not configured".
    pub fn from_setting(value: &str) -> Option<Self> {
        let value = value.trim();
        if value.is_empty() {
            None
        } else {
            Some(Self(value.to_string()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

// Secrets stay out of debug output and logs.
impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ApiKey(***)")
    }
}

/// A gateway choice offered in the host's checkout dropdown.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GatewayListing {
    pub id: GatewayId,
    pub admin_label: String,
    pub checkout_label: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldKind {
    Header,
    Text,
}

/// One row of the host's settings-form schema.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SettingsField {
    pub id: String,
    pub kind: FieldKind,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub desc: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionLink {
    pub label: String,
    pub url: String,
}

/// Registers SecurionPay in the host's list of payment gateways.
pub fn add_payment_gateway(mut gateways: Vec<GatewayListing>) -> Vec<GatewayListing> {
    gateways.push(GatewayListing {
        id: GatewayId::Securionpay,
        admin_label: "SecurionPay".to_string(),
        checkout_label: "SecurionPay".to_string(),
    });
    gateways
}

/// Appends the SecurionPay section to the host's gateway settings schema:
/// one header row and the API secret key field.
pub fn add_payment_gateway_settings(mut settings: Vec<SettingsField>) -> Vec<SettingsField> {
    settings.push(SettingsField {
        id: "securionpay_gateway_heading".to_string(),
        kind: FieldKind::Header,
        name: "SecurionPay Payment Gateway".to_string(),
        size: None,
        desc: None,
    });
    settings.push(SettingsField {
        id: API_KEY_SETTING.to_string(),
        kind: FieldKind::Text,
        name: "API Secret Key".to_string(),
        size: Some("regular".to_string()),
        desc: Some(
            "You can find your Secret Key in your SecurionPay account settings under API keys."
                .to_string(),
        ),
    });
    settings
}

/// Appends the settings-page link shown next to the plugin entry.
pub fn add_plugin_action_links(mut links: Vec<ActionLink>) -> Vec<ActionLink> {
    links.push(ActionLink {
        label: "Settings".to_string(),
        url: "edit.php?post_type=download&page=edd-settings&tab=gateways".to_string(),
    });
    links
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_key_from_setting() {
        assert_eq!(ApiKey::from_setting(""), None);
        assert_eq!(ApiKey::from_setting("   "), None);

        let key = ApiKey::from_setting("sk_test_abc").unwrap();
        assert_eq!(key.as_str(), "sk_test_abc");
    }

    #[test]
    fn test_api_key_debug_is_redacted() {
        let key = ApiKey::from_setting("sk_test_abc").unwrap();
        assert_eq!(format!("{key:?}"), "ApiKey(***)");
    }

    #[test]
    fn test_add_payment_gateway_appends() {
        let existing = vec![GatewayListing {
            id: GatewayId::Paypal,
            admin_label: "PayPal".to_string(),
            checkout_label: "PayPal".to_string(),
        }];

        let gateways = add_payment_gateway(existing);
        assert_eq!(gateways.len(), 2);
        assert_eq!(gateways[0].id, GatewayId::Paypal);
        assert_eq!(gateways[1].id, GatewayId::Securionpay);
        assert_eq!(gateways[1].checkout_label, "SecurionPay");
    }

    #[test]
    fn test_settings_schema() {
        let settings = add_payment_gateway_settings(Vec::new());
        assert_eq!(settings.len(), 2);
        assert_eq!(settings[0].kind, FieldKind::Header);
        assert_eq!(settings[1].kind, FieldKind::Text);
        assert_eq!(settings[1].id, API_KEY_SETTING);
    }

    #[test]
    fn test_action_links_append_settings_page() {
        let links = add_plugin_action_links(Vec::new());
        assert_eq!(links.len(), 1);
        assert_eq!(links[0].label, "Settings");
        assert!(links[0].url.contains("tab=gateways"));
    }
}
