use serde::{Deserialize, Serialize};

/// A quick-commerce platform the client aggregates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    Zepto,
    Blinkit,
}

impl Platform {
    #[must_use]
    pub fn display_name(self) -> &'static str {
        match self {
            Platform::Zepto => "Zepto",
            Platform::Blinkit => "Blinkit",
        }
    }

    /// Session-store key under which this platform's validated locations live.
    ///
    /// Matches the keys the web front end wrote to tab storage, so a store
    /// exported from the browser can be read back unchanged.
    #[must_use]
    pub fn validated_locations_key(self) -> &'static str {
        match self {
            Platform::Zepto => "zeptoValidatedLocations",
            Platform::Blinkit => "blinkitValidatedLocations",
        }
    }
}

impl std::fmt::Display for Platform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Platform::Zepto => write!(f, "zepto"),
            Platform::Blinkit => write!(f, "blinkit"),
        }
    }
}

impl std::str::FromStr for Platform {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "zepto" => Ok(Platform::Zepto),
            "blinkit" => Ok(Platform::Blinkit),
            other => Err(format!("unknown platform \"{other}\"")),
        }
    }
}
