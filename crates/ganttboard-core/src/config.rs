use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use url::Url;

/// Configuration validation errors
#[derive(Debug, Clone)]
pub struct ConfigValidationError {
    pub field: String,
    pub message: String,
}

impl std::fmt::Display for ConfigValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Result of config validation
#[derive(Debug, Clone, Default)]
pub struct ValidationResult {
    pub errors: Vec<ConfigValidationError>,
    pub warnings: Vec<ConfigValidationError>,
}

impl ValidationResult {
    /// Returns true if there are no errors (warnings are OK)
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// Add an error
    pub fn add_error(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.errors.push(ConfigValidationError {
            field: field.into(),
            message: message.into(),
        });
    }

    /// Add a warning
    pub fn add_warning(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.warnings.push(ConfigValidationError {
            field: field.into(),
            message: message.into(),
        });
    }

    /// Get a user-friendly message summarizing all errors
    pub fn error_summary(&self) -> String {
        if self.errors.is_empty() {
            return String::new();
        }
        self.errors
            .iter()
            .map(|e| e.to_string())
            .collect::<Vec<_>>()
            .join("; ")
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Trello API credentials and the portfolio board to read
    #[serde(default)]
    pub trello: TrelloConfig,

    /// Auxiliary iCalendar feeds merged into the timeline
    #[serde(default)]
    pub calendars: Vec<CalendarSource>,

    /// Label/category colour overrides for the rendered bars
    #[serde(default)]
    pub colours: ColourConfig,
}

/// Trello API credentials
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrelloConfig {
    /// Trello API key
    /// Create at: https://trello.com/power-ups/admin
    pub api_key: String,
    /// Trello API token for the key above
    pub api_token: String,
    /// ID of the portfolio board whose cards feed the timeline
    pub board_id: String,
}

impl TrelloConfig {
    /// Check if credentials are configured (not placeholders)
    pub fn is_configured(&self) -> bool {
        !self.api_key.is_empty()
            && !self.api_token.is_empty()
            && !self.board_id.is_empty()
            && !self.api_key.starts_with("YOUR_")
            && !self.api_token.starts_with("YOUR_")
            && !self.board_id.starts_with("YOUR_")
    }
}

impl Default for TrelloConfig {
    fn default() -> Self {
        Self {
            api_key: "YOUR_TRELLO_API_KEY".to_string(),
            api_token: "YOUR_TRELLO_API_TOKEN".to_string(),
            board_id: "YOUR_BOARD_ID".to_string(),
        }
    }
}

/// One auxiliary ICS feed (holiday calendars, team leave, ...)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalendarSource {
    /// Display name, also the colour-lookup key for the feed's bars
    pub name: String,
    /// HTTP(S) endpoint serving the raw ICS text
    pub url: String,
    /// Category the feed's events are filed under ("ME", "LRL", anything
    /// else lands in the Other bucket). Defaults to Other when omitted.
    #[serde(default)]
    pub category: Option<String>,
}

/// Colour table for timeline bars, keyed by label text or category name
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ColourConfig {
    #[serde(default = "default_label_colours")]
    pub labels: BTreeMap<String, String>,

    /// Colour used when neither the first label nor the category matches
    #[serde(default = "default_bar_colour")]
    pub default_colour: String,
}

fn default_label_colours() -> BTreeMap<String, String> {
    BTreeMap::from([
        ("ME".to_string(), "#00b8d9".to_string()),
        ("LRL".to_string(), "#ff991f".to_string()),
        ("Holiday".to_string(), "#ff5630".to_string()),
    ])
}

fn default_bar_colour() -> String {
    "#0052cc".to_string()
}

impl Default for ColourConfig {
    fn default() -> Self {
        Self {
            labels: default_label_colours(),
            default_colour: default_bar_colour(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            trello: TrelloConfig::default(),
            calendars: Vec::new(),
            colours: ColourConfig::default(),
        }
    }
}

impl Config {
    /// Load configuration from file, creating default if it doesn't exist
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    /// Load configuration from an explicit path, creating default if missing
    pub fn load_from(config_path: &Path) -> Result<Self> {
        if !config_path.exists() {
            let config = Self::default();
            config.save_to(config_path)?;
            return Ok(config);
        }

        let contents =
            std::fs::read_to_string(config_path).context("Failed to read config file")?;

        let config: Config = toml::from_str(&contents).context("Failed to parse config file")?;

        Ok(config)
    }

    /// Load configuration and validate it
    ///
    /// Returns the config along with any validation warnings.
    /// Returns an error if validation fails with critical errors.
    pub fn load_validated() -> Result<(Self, ValidationResult)> {
        let config = Self::load()?;
        let validation = config.validate();

        if !validation.is_valid() {
            anyhow::bail!(
                "Configuration validation failed: {}",
                validation.error_summary()
            );
        }

        if !validation.warnings.is_empty() {
            for warning in &validation.warnings {
                tracing::warn!("Config warning: {}", warning);
            }
        }

        Ok((config, validation))
    }

    /// Validate the configuration
    ///
    /// Returns a ValidationResult containing any errors or warnings.
    pub fn validate(&self) -> ValidationResult {
        let mut result = ValidationResult::default();

        // Trello not being configured is a warning: the board fetch fails
        // with a user-visible message at load time.
        if !self.trello.is_configured() {
            result.add_warning(
                "trello",
                "Trello credentials not configured - board loading will fail",
            );
        }

        for (i, source) in self.calendars.iter().enumerate() {
            let field = format!("calendars[{}].url", i);
            self.validate_url(&source.url, &field, &mut result);

            if source.name.trim().is_empty() {
                result.add_error(format!("calendars[{}].name", i), "Feed name is empty");
            }
        }

        for (label, colour) in &self.colours.labels {
            if !looks_like_colour(colour) {
                result.add_warning(
                    format!("colours.labels.{}", label),
                    format!("'{}' does not look like a #rrggbb colour", colour),
                );
            }
        }
        if !looks_like_colour(&self.colours.default_colour) {
            result.add_warning(
                "colours.default_colour",
                format!(
                    "'{}' does not look like a #rrggbb colour",
                    self.colours.default_colour
                ),
            );
        }

        result
    }

    /// Validate a URL field
    fn validate_url(&self, url_str: &str, field_name: &str, result: &mut ValidationResult) {
        match Url::parse(url_str) {
            Ok(url) => {
                if url.scheme() != "http" && url.scheme() != "https" {
                    result.add_error(
                        field_name,
                        format!("URL must use http or https scheme, got: {}", url.scheme()),
                    );
                }

                if url.host().is_none() {
                    result.add_error(field_name, "URL must have a host");
                }

                if let Some(port) = url.port() {
                    if port == 0 {
                        result.add_error(field_name, "Port cannot be 0");
                    }
                }
            }
            Err(e) => {
                result.add_error(field_name, format!("Invalid URL: {}", e));
            }
        }
    }

    /// Save configuration to the default location
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    /// Save configuration to an explicit path
    pub fn save_to(&self, config_path: &Path) -> Result<()> {
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent).context("Failed to create config directory")?;
        }

        let contents = toml::to_string_pretty(self).context("Failed to serialize config")?;

        std::fs::write(config_path, contents).context("Failed to write config file")?;

        Ok(())
    }

    /// Get the path to the configuration file
    fn config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .context("Failed to get config directory")?
            .join("ganttboard");

        Ok(config_dir.join("config.toml"))
    }
}

fn looks_like_colour(value: &str) -> bool {
    value.len() == 7
        && value.starts_with('#')
        && value[1..].chars().all(|c| c.is_ascii_hexdigit())
}
