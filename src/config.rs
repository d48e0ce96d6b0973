//! TOML configuration file.
//!
//! The file is optional. A missing file yields [`Config::default`]; a file
//! that exists but cannot be read or parsed is an error. Command-line flags
//! are applied on top by [`Config::apply_overrides`].
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::bus::BusKind;
use crate::error::ConfigError;
use crate::walker::ListBusesOptions;

/// Settings loaded from `config.toml`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Standard bus to connect to when no address is given.
    pub bus: BusKind,
    /// Explicit bus address; takes precedence over `bus`.
    pub address: Option<String>,
    /// Defaults for the `buses` listing.
    pub buses: BusListing,
}

/// `[buses]` section.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BusListing {
    /// List owned names instead of activatable names.
    pub hide_inactive: bool,
    /// Keep private `:`-prefixed names.
    pub include_private: bool,
    /// Sort names lexicographically.
    pub sorted: bool,
}

impl Default for BusListing {
    fn default() -> Self {
        let opts = ListBusesOptions::default();
        Self {
            hide_inactive: opts.hide_inactive,
            include_private: opts.include_private,
            sorted: opts.sorted,
        }
    }
}

impl From<BusListing> for ListBusesOptions {
    fn from(listing: BusListing) -> Self {
        Self {
            hide_inactive: listing.hide_inactive,
            include_private: listing.include_private,
            sorted: listing.sorted,
        }
    }
}

/// Command-line values that take precedence over the file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Overrides {
    /// Forced bus kind.
    pub bus: Option<BusKind>,
    /// Forced bus address.
    pub address: Option<String>,
}

impl Config {
    /// Load the configuration from `path`, or from the default location.
    ///
    /// Only the default location may be absent; an explicit `path` must
    /// exist.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read and
    /// [`ConfigError::InvalidSyntax`] if it is not valid TOML for this schema.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => Self::load_from(path),
            None => match default_path() {
                Some(path) if path.exists() => Self::load_from(&path),
                _ => Ok(Self::default()),
            },
        }
    }

    /// Load the configuration from an explicit file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file is missing or cannot be read
    /// and [`ConfigError::InvalidSyntax`] if it is not valid TOML for this
    /// schema.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;

        toml::from_str(&content).map_err(|e| ConfigError::InvalidSyntax {
            file: path.display().to_string(),
            message: e.message().to_string(),
        })
    }

    /// Apply command-line overrides.
    ///
    /// Choosing a bus kind on the command line discards an address from the
    /// file, since the user asked for a specific standard bus.
    #[must_use]
    pub fn apply_overrides(mut self, overrides: &Overrides) -> Self {
        if let Some(bus) = overrides.bus {
            self.bus = bus;
            self.address = None;
        }
        if let Some(address) = &overrides.address {
            self.address = Some(address.clone());
        }
        self
    }
}

/// Return `$XDG_CONFIG_HOME/dbushelp/config.toml` (or `~/.config/dbushelp/config.toml`).
fn default_path() -> Option<PathBuf> {
    let base = std::env::var_os("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .or_else(|| std::env::var_os("HOME").map(|home| PathBuf::from(home).join(".config")))?;
    Some(base.join("dbushelp").join("config.toml"))
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;
    use crate::logging::TEST_ENV_MUTEX;
    use std::fs;

    fn write_config(content: &str) -> (tempfile::TempDir, PathBuf) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, content).unwrap();
        (dir, path)
    }

    #[test]
    #[allow(unsafe_code)]
    fn missing_default_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let _lock = TEST_ENV_MUTEX
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        // SAFETY: Protected by TEST_ENV_MUTEX; restored before lock is released.
        unsafe {
            std::env::set_var("XDG_CONFIG_HOME", dir.path());
        }
        let config = Config::load(None);
        // SAFETY: Still holding TEST_ENV_MUTEX.
        unsafe {
            std::env::remove_var("XDG_CONFIG_HOME");
        }
        let config = config.unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.bus, BusKind::Session);
        assert!(config.buses.hide_inactive);
        assert!(!config.buses.include_private);
        assert!(config.buses.sorted);
    }

    #[test]
    fn missing_explicit_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.toml");
        let err = Config::load(Some(&path)).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
        assert!(err.to_string().contains("absent.toml"));
    }

    #[test]
    fn explicit_path_is_used() {
        let (_dir, path) = write_config("bus = \"system\"\n");
        let config = Config::load(Some(&path)).unwrap();
        assert_eq!(config.bus, BusKind::System);
    }

    #[test]
    fn full_file_is_parsed() {
        let (_dir, path) = write_config(
            "bus = \"system\"\n\
             address = \"unix:path=/run/test_bus\"\n\
             \n\
             [buses]\n\
             hide_inactive = false\n\
             include_private = true\n\
             sorted = false\n",
        );
        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.bus, BusKind::System);
        assert_eq!(config.address.as_deref(), Some("unix:path=/run/test_bus"));
        let opts: ListBusesOptions = config.buses.into();
        assert_eq!(
            opts,
            ListBusesOptions {
                hide_inactive: false,
                include_private: true,
                sorted: false,
            }
        );
    }

    #[test]
    fn partial_section_keeps_other_defaults() {
        let (_dir, path) = write_config("[buses]\ninclude_private = true\n");
        let config = Config::load_from(&path).unwrap();
        assert!(config.buses.include_private);
        assert!(config.buses.hide_inactive);
        assert!(config.buses.sorted);
    }

    #[test]
    fn unknown_bus_kind_is_rejected() {
        let (_dir, path) = write_config("bus = \"starter\"\n");
        let err = Config::load_from(&path).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidSyntax { .. }));
        assert!(err.to_string().contains("starter"));
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let (_dir, path) = write_config("colour = true\n");
        assert!(matches!(
            Config::load_from(&path),
            Err(ConfigError::InvalidSyntax { .. })
        ));
    }

    #[test]
    fn bus_override_discards_file_address() {
        let config = Config {
            address: Some("unix:path=/tmp/x".to_string()),
            ..Config::default()
        }
        .apply_overrides(&Overrides {
            bus: Some(BusKind::System),
            address: None,
        });
        assert_eq!(config.bus, BusKind::System);
        assert_eq!(config.address, None);
    }

    #[test]
    fn address_override_wins() {
        let config = Config::default().apply_overrides(&Overrides {
            bus: None,
            address: Some("tcp:host=localhost,port=4000".to_string()),
        });
        assert_eq!(config.address.as_deref(), Some("tcp:host=localhost,port=4000"));
    }
}
