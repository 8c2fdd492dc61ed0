//! All setting definitions with their default values.

/// A single setting definition.
#[derive(Debug, Clone, Copy)]
pub struct SettingDef {
    pub key: &'static str,
    pub default: &'static str,
    pub description: &'static str,
}

/// Every environment variable the server reads.
pub const SETTINGS: &[SettingDef] = &[
    SettingDef {
        key: "BIND_ADDRESS",
        default: "0.0.0.0",
        description: "Interface both listeners bind to",
    },
    SettingDef {
        key: "SERVER_PORT",
        default: "8080",
        description: "Port of the image processing service",
    },
    SettingDef {
        key: "KEEP_ALIVE_PORT",
        default: "8081",
        description: "Port of the liveness listener",
    },
    SettingDef {
        key: "KEEP_ALIVE_ENABLED",
        default: "true",
        description: "Start the liveness listener",
    },
    SettingDef {
        key: "FONT_PATH",
        default: "NeueMontreal-Regular.otf",
        description: "TTF/OTF face used for every text tier",
    },
    SettingDef {
        key: "ACCEPT_INVALID_CERTS",
        default: "false",
        description: "Skip TLS certificate verification when fetching images",
    },
    SettingDef {
        key: "FETCH_TIMEOUT_SECS",
        default: "30",
        description: "Whole-request timeout for image fetches",
    },
];

/// Get the default value for a setting key, or `None` if not defined.
pub fn get_default(key: &str) -> Option<&'static str> {
    SETTINGS.iter().find(|def| def.key == key).map(|def| def.default)
}
