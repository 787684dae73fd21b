use serde::de::{DeserializeOwned, MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_yaml::{Mapping, Value};
use std::fmt;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::idioms::{IdiomTable, DEFAULT_IDIOMS};
use crate::speech::VoiceTable;

/// Config file name inside the user's config directory
pub const CONFIG_FILE_NAME: &str = "speakup.yml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("invalid YAML config: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("invalid TOML config: {0}")]
    Toml(#[from] toml::de::Error),
}

/// Application configuration
///
/// Parsed field by field: a field that is missing or malformed takes its
/// default while the rest of the file still applies.
#[derive(Debug, Clone, Default, Serialize, PartialEq, Eq)]
pub struct Config {
    /// Phrases for F1-F12, in order. Absent means the built-in pair.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub idioms: Option<Vec<String>>,
    /// Language code to voice name
    pub voices: VoiceList,
    /// Language for untagged lines (defaults to the first voice)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_language: Option<String>,
    pub speech: SpeechConfig,
}

impl Config {
    /// Load from `path`, or the default location when `None`.
    ///
    /// A missing file yields the defaults. An unreadable or malformed file is
    /// reported and also yields the defaults.
    pub fn load(path: Option<&Path>) -> Self {
        let path = match path.map(Path::to_path_buf).or_else(Self::config_path) {
            Some(path) => path,
            None => {
                warn!("No config directory found, using defaults");
                return Self::default();
            }
        };

        if !path.exists() {
            debug!("No config at {:?}, using defaults", path);
            return Self::default();
        }

        match Self::read(&path) {
            Ok(config) => {
                info!("Loaded config from {:?}", path);
                config
            }
            Err(e) => {
                warn!("Ignoring config: {}", e);
                Self::default()
            }
        }
    }

    /// Read and parse a config file, picking the format from its extension
    pub fn read(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        match path.extension().and_then(|ext| ext.to_str()) {
            Some("toml") => Self::from_toml_str(&contents),
            _ => Self::from_yaml_str(&contents),
        }
    }

    /// Parse YAML. Only a syntax error fails; bad fields fall back.
    pub fn from_yaml_str(contents: &str) -> Result<Self, ConfigError> {
        if contents.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(Self::from_value(serde_yaml::from_str(contents)?))
    }

    /// Parse TOML. Only a syntax error fails; bad fields fall back.
    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        Ok(Self::from_value(toml::from_str(contents)?))
    }

    /// Build from a parsed document, one field at a time
    fn from_value(value: Value) -> Self {
        let mut config = Self::default();
        let Some(fields) = as_mapping(value, "config") else {
            return config;
        };

        if let Some(idioms) = field::<Vec<Phrase>>(&fields, "idioms") {
            config.idioms = Some(idioms.into_iter().map(|phrase| phrase.0).collect());
        }
        if let Some(voices) = field(&fields, "voices") {
            config.voices = voices;
        }
        if let Some(language) = field(&fields, "default_language") {
            config.default_language = Some(language);
        }

        let speech = fields
            .get("speech")
            .cloned()
            .and_then(|value| as_mapping(value, "speech"));
        if let Some(speech) = speech {
            if let Some(command) = field(&speech, "command") {
                config.speech.command = command;
            }
            if let Some(extra_args) = field(&speech, "extra_args") {
                config.speech.extra_args = extra_args;
            }
        }

        config
    }

    pub fn to_yaml(&self) -> Result<String, ConfigError> {
        Ok(serde_yaml::to_string(self)?)
    }

    /// `$XDG_CONFIG_HOME/speakup.yml`, falling back to `~/.config/speakup.yml`
    pub fn config_path() -> Option<PathBuf> {
        let base = std::env::var_os("XDG_CONFIG_HOME")
            .filter(|dir| !dir.is_empty())
            .map(PathBuf::from)
            .or_else(|| std::env::var_os("HOME").map(|home| PathBuf::from(home).join(".config")))?;
        Some(base.join(CONFIG_FILE_NAME))
    }

    pub fn idiom_table(&self) -> IdiomTable {
        match &self.idioms {
            Some(idioms) => IdiomTable::from_phrases(idioms.iter().map(String::as_str)),
            None => IdiomTable::from_phrases(DEFAULT_IDIOMS.iter().copied()),
        }
    }

    pub fn voice_table(&self) -> VoiceTable {
        VoiceTable::new(self.voices.0.clone(), self.default_language.clone())
    }
}

fn as_mapping(value: Value, name: &str) -> Option<Mapping> {
    match value {
        Value::Mapping(mapping) => Some(mapping),
        Value::Null => None,
        other => {
            warn!("Ignoring {}: expected a mapping, found {:?}", name, other);
            None
        }
    }
}

/// Parse one field, `None` when it is absent, null or malformed
fn field<T: DeserializeOwned>(fields: &Mapping, key: &str) -> Option<T> {
    let value = fields.get(key).filter(|value| !value.is_null())?;
    match serde_yaml::from_value(value.clone()) {
        Ok(parsed) => Some(parsed),
        Err(e) => {
            warn!("Ignoring config field '{}': {}", key, e);
            None
        }
    }
}

/// An idiom entry; numbers and booleans are taken as their text
struct Phrase(String);

impl<'de> Deserialize<'de> for Phrase {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Scalar {
            Text(String),
            Integer(i64),
            Float(f64),
            Bool(bool),
        }

        Ok(Phrase(match Scalar::deserialize(deserializer)? {
            Scalar::Text(text) => text,
            Scalar::Integer(n) => n.to_string(),
            Scalar::Float(n) => n.to_string(),
            Scalar::Bool(b) => b.to_string(),
        }))
    }
}

/// Ordered `language: voice` mapping
///
/// Kept as a list so the first entry written in the file stays first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VoiceList(pub Vec<(String, String)>);

impl Default for VoiceList {
    fn default() -> Self {
        Self(vec![
            ("en".to_string(), "english".to_string()),
            ("de".to_string(), "german".to_string()),
        ])
    }
}

impl Serialize for VoiceList {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (language, voice) in &self.0 {
            map.serialize_entry(language, voice)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for VoiceList {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct VoiceListVisitor;

        impl<'de> Visitor<'de> for VoiceListVisitor {
            type Value = VoiceList;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a mapping of language codes to voice names")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
                let mut voices: Vec<(String, String)> =
                    Vec::with_capacity(access.size_hint().unwrap_or(0));
                while let Some((language, voice)) = access.next_entry::<String, String>()? {
                    match voices.iter_mut().find(|(code, _)| *code == language) {
                        Some(entry) => entry.1 = voice,
                        None => voices.push((language, voice)),
                    }
                }
                Ok(VoiceList(voices))
            }
        }

        deserializer.deserialize_map(VoiceListVisitor)
    }
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct SpeechConfig {
    /// espeak-compatible synthesizer binary
    pub command: String,
    /// Arguments passed before the voice selection
    pub extra_args: Vec<String>,
}

impl Default for SpeechConfig {
    fn default() -> Self {
        Self {
            command: "espeak".to_string(),
            extra_args: Vec::new(),
        }
    }
}
