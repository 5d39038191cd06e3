//! Best-effort lookup that pre-fills the back of a card from its front
//! text. Failures are logged and swallowed; the user can always type
//! the back by hand.

#[cfg(feature = "translation")]
use std::time::Duration;

use crate::core::AutofillLanguage;
#[cfg(feature = "translation")]
use crate::core::KarteiError;

#[cfg(feature = "translation")]
const ENDPOINT: &str = "https://translate.googleapis.com/translate_a/single";
#[cfg(feature = "translation")]
const TIMEOUT_SECS: u64 = 10;

/// Lookup backend, picked once at startup. Builds without the
/// `translation` feature only ever get the no-op variant.
pub enum Translator {
    Disabled,
    #[cfg(feature = "translation")]
    Google(GoogleTranslate),
}

impl Translator {
    #[cfg(feature = "translation")]
    pub fn new() -> Self {
        match GoogleTranslate::new() {
            Ok(google) => Translator::Google(google),
            Err(e) => {
                eprintln!("Translation client unavailable: {}", e);
                Translator::Disabled
            }
        }
    }

    #[cfg(not(feature = "translation"))]
    pub fn new() -> Self {
        Translator::Disabled
    }

    pub fn is_available(&self) -> bool {
        !matches!(self, Translator::Disabled)
    }

    pub fn translate(&self, text: &str, language: AutofillLanguage) -> Option<String> {
        let code = language.code()?;
        let text = text.trim();
        if text.is_empty() {
            return None;
        }

        match self {
            Translator::Disabled => None,
            #[cfg(feature = "translation")]
            Translator::Google(google) => match google.translate(text, code) {
                Ok(translated) => Some(translated),
                Err(e) => {
                    eprintln!("Translation lookup failed: {}", e);
                    None
                }
            },
        }
    }
}

impl Default for Translator {
    fn default() -> Self {
        Translator::new()
    }
}

#[cfg(feature = "translation")]
pub struct GoogleTranslate {
    client: reqwest::blocking::Client,
}

#[cfg(feature = "translation")]
impl GoogleTranslate {
    pub fn new() -> Result<Self, KarteiError> {
        let client =
            reqwest::blocking::Client::builder().timeout(Duration::from_secs(TIMEOUT_SECS)).build()?;
        Ok(GoogleTranslate { client })
    }

    fn translate(&self, text: &str, target_code: &str) -> Result<String, KarteiError> {
        let response = self
            .client
            .get(ENDPOINT)
            .query(&[
                ("client", "gtx"),
                ("sl", "auto"),
                ("tl", target_code),
                ("dt", "t"),
                ("q", text),
            ])
            .send()?;

        if !response.status().is_success() {
            return Err(KarteiError::Custom(format!(
                "Translation endpoint returned {}",
                response.status()
            )));
        }

        let body: serde_json::Value = response.json()?;
        parse_translation(&body)
            .ok_or_else(|| KarteiError::Custom("Unexpected translation payload".to_string()))
    }
}

/// The endpoint answers with a nested array whose first element lists
/// `[translated, original, ...]` segments.
#[cfg(any(feature = "translation", test))]
fn parse_translation(body: &serde_json::Value) -> Option<String> {
    let segments = body.get(0)?.as_array()?;
    let mut out = String::new();
    for segment in segments {
        if let Some(text) = segment.get(0).and_then(|v| v.as_str()) {
            out.push_str(text);
        }
    }
    let out = out.trim().to_string();
    if out.is_empty() {
        None
    } else {
        Some(out)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_parse_translation_concatenates_segments() {
        let body = json!([
            [["Hola, ", "Hello, ", null, null, 10], ["mundo", "world", null, null, 10]],
            null,
            "en"
        ]);
        assert_eq!(parse_translation(&body), Some("Hola, mundo".to_string()));
    }

    #[test]
    fn test_parse_translation_rejects_unexpected_shapes() {
        assert_eq!(parse_translation(&json!({})), None);
        assert_eq!(parse_translation(&json!([])), None);
        assert_eq!(parse_translation(&json!([[]])), None);
        assert_eq!(parse_translation(&json!([[["", "x", null]]])), None);
    }

    #[test]
    fn test_language_codes() {
        assert_eq!(AutofillLanguage::Disabled.code(), None);
        assert_eq!(AutofillLanguage::Spanish.code(), Some("es"));
        assert_eq!(AutofillLanguage::Chinese.code(), Some("zh-CN"));
        assert_eq!(AutofillLanguage::Japanese.code(), Some("ja"));
    }

    #[test]
    fn test_translate_short_circuits_without_target() {
        let translator = Translator::new();
        // No target language or no input text means no lookup at all.
        assert_eq!(translator.translate("hello", AutofillLanguage::Disabled), None);
        assert_eq!(translator.translate("   ", AutofillLanguage::Spanish), None);
    }

    #[test]
    fn test_disabled_translator_is_silent() {
        let translator = Translator::Disabled;
        assert!(!translator.is_available());
        assert_eq!(translator.translate("hello", AutofillLanguage::Spanish), None);
    }
}
