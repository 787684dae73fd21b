use regex::Regex;
use std::sync::LazyLock;

/// `<code>rest`, anchored over the whole line
static LANGUAGE_TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^<([^>]*)>(.*)$").expect("language tag pattern is valid"));

/// Language code to voice mapping, in configuration order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VoiceTable {
    voices: Vec<(String, String)>,
    default_language: Option<String>,
}

impl VoiceTable {
    /// Without an explicit default, the first configured language is used.
    pub fn new(voices: Vec<(String, String)>, default_language: Option<String>) -> Self {
        let default_language =
            default_language.or_else(|| voices.first().map(|(language, _)| language.clone()));
        Self {
            voices,
            default_language,
        }
    }

    pub fn default_language(&self) -> Option<&str> {
        self.default_language.as_deref()
    }

    pub fn voice_for(&self, language: &str) -> Option<&str> {
        self.voices
            .iter()
            .find(|(code, _)| code == language)
            .map(|(_, voice)| voice.as_str())
    }

    pub fn languages(&self) -> impl Iterator<Item = &str> {
        self.voices.iter().map(|(code, _)| code.as_str())
    }
}

/// What to say and which voice to say it with
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Utterance<'a> {
    /// `None` keeps whatever voice the backend used last
    pub voice: Option<&'a str>,
    /// Trimmed text, empty when there is nothing to say
    pub text: &'a str,
}

impl Utterance<'_> {
    pub fn is_silent(&self) -> bool {
        self.text.is_empty()
    }
}

/// Resolve a submitted line into an utterance.
///
/// A leading `<code>` picks the language for this line only, otherwise the
/// default language applies. Unknown languages select no voice. The voice is
/// resolved even when only whitespace is left to say.
pub fn dispatch<'a>(raw: &'a str, voices: &'a VoiceTable) -> Utterance<'a> {
    let (language, text) = match LANGUAGE_TAG.captures(raw) {
        Some(caps) => {
            let code = caps.get(1).map_or("", |m| m.as_str());
            let rest = caps.get(2).map_or("", |m| m.as_str());
            (Some(code), rest)
        }
        None => (voices.default_language(), raw),
    };

    Utterance {
        voice: language.and_then(|language| voices.voice_for(language)),
        text: text.trim(),
    }
}
