use crate::error::WadError;
use crate::wad_header::PWAD;
use std::collections::HashMap;
use std::fs;
use std::path::Path;

/// Default number of bytes shown per lump by the hex dump.
pub const DEFAULT_HEX_DUMP_LIMIT: usize = 64;

/// Options of a [`WadArchive`](crate::wad_archive::WadArchive), optionally read from a
/// `key = value` file.
///
/// Recognised keys are `tag`, `strict_sprites` and `hex_dump_limit`. Other keys are kept
/// and can be read back with [`WadConfig::get`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WadConfig {
    /// Tag written to archives created from scratch.
    pub tag: [u8; 4],
    /// Whether sprite lumps must match their declared dimensions when decoded.
    pub strict_sprites: bool,
    /// Maximum number of payload bytes shown per lump by the hex dump.
    pub hex_dump_limit: usize,
    variables: HashMap<String, String>,
}

impl Default for WadConfig {
    fn default() -> Self {
        Self {
            tag: PWAD,
            strict_sprites: false,
            hex_dump_limit: DEFAULT_HEX_DUMP_LIMIT,
            variables: HashMap::new(),
        }
    }
}

impl WadConfig {
    /// Creates a configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads a configuration file on top of the defaults.
    pub fn from_file<P: AsRef<Path>>(file_name: P) -> Result<Self, WadError> {
        let mut config = Self::new();
        config.load(file_name)?;
        Ok(config)
    }

    /// Loads configuration variables from a file.
    ///
    /// # Arguments
    ///
    /// * `file_name` - The path to the configuration file.
    pub fn load<P: AsRef<Path>>(&mut self, file_name: P) -> Result<(), WadError> {
        let text = fs::read_to_string(file_name)?;
        self.parse(&text)
    }

    /// Applies `key = value` lines. Empty lines and `#` comments are ignored.
    pub fn parse(&mut self, text: &str) -> Result<(), WadError> {
        for (number, line) in text.lines().enumerate() {
            let line = line.trim();

            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            let Some((name, value)) = line.split_once('=') else {
                return Err(WadError::format(format!(
                    "config line {}: expected `key = value`, got {line:?}",
                    number + 1
                )));
            };
            self.set(name.trim(), value.trim())?;
        }

        Ok(())
    }

    /// Sets one variable, validating the recognised keys.
    pub fn set(&mut self, name: &str, value: &str) -> Result<(), WadError> {
        match name {
            "tag" => {
                self.tag = value.as_bytes().try_into().map_err(|_| {
                    WadError::format(format!("tag must be 4 bytes, got {value:?}"))
                })?;
            }
            "strict_sprites" => {
                self.strict_sprites = value.parse().map_err(|_| {
                    WadError::format(format!("strict_sprites must be true or false, got {value:?}"))
                })?;
            }
            "hex_dump_limit" => {
                self.hex_dump_limit = value.parse().map_err(|_| {
                    WadError::format(format!("hex_dump_limit must be a number, got {value:?}"))
                })?;
            }
            _ => {}
        }
        self.variables.insert(name.to_string(), value.to_string());
        Ok(())
    }

    /// Retrieves the raw value of a variable by name, if it was set.
    pub fn get(&self, var_name: &str) -> Option<&str> {
        self.variables.get(var_name).map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = WadConfig::new();
        assert_eq!(&config.tag, b"PWAD");
        assert!(!config.strict_sprites);
        assert_eq!(config.hex_dump_limit, 64);
    }

    #[test]
    fn parses_known_and_unknown_keys() {
        let mut config = WadConfig::new();
        config
            .parse(
                "# archive options\n\
                 tag = IWAD\n\
                 \n\
                 strict_sprites = true\n\
                 hex_dump_limit=16\n\
                 author = someone\n",
            )
            .unwrap();
        assert_eq!(&config.tag, b"IWAD");
        assert!(config.strict_sprites);
        assert_eq!(config.hex_dump_limit, 16);
        assert_eq!(config.get("author"), Some("someone"));
        assert_eq!(config.get("tag"), Some("IWAD"));
        assert_eq!(config.get("missing"), None);
    }

    #[test]
    fn bad_values_are_rejected() {
        assert!(WadConfig::new().parse("tag = WAD").is_err());
        assert!(WadConfig::new().parse("strict_sprites = yes").is_err());
        assert!(WadConfig::new().parse("hex_dump_limit = -1").is_err());
        assert!(WadConfig::new().parse("just some words").is_err());
    }
}
