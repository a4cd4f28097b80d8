//! Holds the default translatable policy shared by every registration.

use super::{
    ConfigError,
    TranslatableSettings,
};

/// Owns the current [`TranslatableSettings`].
///
/// Registrations copy the policy they need at bind time; generated
/// accessors consult the manager again at call time to check requested
/// locales against the *current* locale set. Not synchronized: mutate it
/// during setup or teardown only.
#[derive(Default, Debug, Clone)]
pub struct ConfigManager {
    /// Current defaults
    current_settings: TranslatableSettings,
}

impl ConfigManager {
    #[must_use]
    pub fn new() -> Self {
        Self { current_settings: TranslatableSettings::default() }
    }

    /// Applies `mutator` to a copy of the current settings and keeps the
    /// result if it validates.
    ///
    /// # Errors
    /// `ConfigError::ValidationErrors` if the mutated settings are invalid;
    /// the previous settings stay in effect.
    pub fn configure(
        &mut self,
        mutator: impl FnOnce(&mut TranslatableSettings),
    ) -> Result<(), ConfigError> {
        let mut settings = self.current_settings.clone();
        mutator(&mut settings);
        self.update_settings(settings)
    }

    /// Replaces the settings wholesale.
    pub fn update_settings(&mut self, new_settings: TranslatableSettings) -> Result<(), ConfigError> {
        tracing::debug!("Updating settings...");

        new_settings.validate().map_err(ConfigError::ValidationErrors)?;

        self.current_settings = new_settings;
        tracing::debug!("Settings updated: {:?}", self.current_settings);

        Ok(())
    }

    /// Replaces the settings from a JSON document.
    ///
    /// Keys left out of the document take their default values. Callback
    /// settings cannot be expressed in JSON and are reset.
    ///
    /// # Errors
    /// - JSON parse error
    /// - Validation error
    pub fn update_from_json(&mut self, json: &str) -> Result<(), ConfigError> {
        let settings: TranslatableSettings = serde_json::from_str(json)?;
        self.update_settings(settings)
    }

    /// Restores the fixed initial defaults.
    pub fn reset_to_defaults(&mut self) {
        tracing::debug!("Resetting settings to defaults");
        self.current_settings = TranslatableSettings::default();
    }

    #[must_use]
    pub const fn get_settings(&self) -> &TranslatableSettings {
        &self.current_settings
    }
}
