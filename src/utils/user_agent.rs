//! User-agent classification backed by `woothee`.

use woothee::parser::Parser;

/// Coarse visitor device class used for redirect targeting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeviceType {
    Desktop,
    Mobile,
    Console,
}

impl DeviceType {
    pub fn is_mobile(self) -> bool {
        matches!(self, DeviceType::Mobile)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            DeviceType::Desktop => "desktop",
            DeviceType::Mobile => "mobile",
            DeviceType::Console => "console",
        }
    }
}

/// Parsed user-agent fields. `None` means the parser could not tell.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserAgentInfo {
    pub browser_name: Option<String>,
    pub browser_version: Option<String>,
    pub os_name: Option<String>,
    pub os_version: Option<String>,
    pub device_type: Option<DeviceType>,
}

impl UserAgentInfo {
    /// Classified device, `Desktop` when the parser gave no classification.
    pub fn device(&self) -> DeviceType {
        self.device_type.unwrap_or(DeviceType::Desktop)
    }
}

/// Stateless user-agent parser.
#[derive(Debug, Clone, Copy, Default)]
pub struct UserAgentParser;

impl UserAgentParser {
    pub fn new() -> Self {
        Self
    }

    /// Parses a user-agent string. Empty or unrecognized input yields all-`None` fields.
    pub fn parse(&self, user_agent: &str) -> UserAgentInfo {
        if user_agent.trim().is_empty() {
            return UserAgentInfo::default();
        }

        let Some(result) = Parser::new().parse(user_agent) else {
            return UserAgentInfo::default();
        };

        UserAgentInfo {
            browser_name: known(&result.name),
            browser_version: known(&result.version),
            os_name: known(&result.os),
            os_version: known(&result.os_version),
            device_type: device_from_category(&result.category),
        }
    }

    /// Shortcut for redirect targeting.
    pub fn classify(&self, user_agent: Option<&str>) -> DeviceType {
        user_agent
            .map(|ua| self.parse(ua).device())
            .unwrap_or(DeviceType::Desktop)
    }
}

fn known(value: &str) -> Option<String> {
    let value = value.trim();
    if value.is_empty() || value == "UNKNOWN" {
        None
    } else {
        Some(value.to_string())
    }
}

fn device_from_category(category: &str) -> Option<DeviceType> {
    match category {
        "smartphone" | "mobilephone" => Some(DeviceType::Mobile),
        "appliance" => Some(DeviceType::Console),
        _ => None,
    }
}
