//! Localized strings used by the engine.

use crate::constants::{
    BALANCES_ERROR_MESSAGE_KEY, BALANCES_ERROR_TITLE_KEY, BALANCES_TASK_TITLE_KEY,
    MULTIPLE_ASSETS_KEY, PROTOCOL_ERROR_MESSAGE_KEY, PROTOCOL_ERROR_TITLE_KEY,
};

/// Resolves a translation key with named arguments.
///
/// Arguments replace `{name}` placeholders in the resolved template.
pub trait Translator: Send + Sync {
    fn translate(&self, key: &str, args: &[(&str, &str)]) -> String;
}

/// English strings. Unknown keys resolve to the key itself.
#[derive(Clone, Default)]
pub struct EnglishTranslator;

impl EnglishTranslator {
    fn template(key: &str) -> Option<&'static str> {
        match key {
            MULTIPLE_ASSETS_KEY => Some("Multiple Assets"),
            BALANCES_TASK_TITLE_KEY => Some("Fetching DeFi balances"),
            BALANCES_ERROR_TITLE_KEY => Some("DeFi balances"),
            BALANCES_ERROR_MESSAGE_KEY => {
                Some("Failed to fetch the DeFi balances: {message}")
            }
            PROTOCOL_ERROR_TITLE_KEY => Some("{protocol} balances"),
            PROTOCOL_ERROR_MESSAGE_KEY => {
                Some("Failed to fetch the {protocol} balances: {message}")
            }
            _ => None,
        }
    }
}

impl Translator for EnglishTranslator {
    fn translate(&self, key: &str, args: &[(&str, &str)]) -> String {
        let Some(template) = Self::template(key) else {
            return key.to_string();
        };
        args.iter()
            .fold(template.to_string(), |text, (name, value)| {
                text.replace(&format!("{{{}}}", name), value)
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_translate_substitutes_arguments() {
        let text = EnglishTranslator.translate(
            PROTOCOL_ERROR_MESSAGE_KEY,
            &[("protocol", "aave"), ("message", "timeout")],
        );
        assert_eq!(text, "Failed to fetch the aave balances: timeout");
    }

    #[test]
    fn test_unknown_key_resolves_to_key() {
        assert_eq!(EnglishTranslator.translate("missing.key", &[]), "missing.key");
    }

    #[test]
    fn test_multiple_assets_label() {
        assert_eq!(
            EnglishTranslator.translate(MULTIPLE_ASSETS_KEY, &[]),
            "Multiple Assets"
        );
    }
}
