// src/common/i18n.rs

use std::collections::HashMap;

pub const DEFAULT_LOCALE: &str = "en";
pub const SUPPORTED_LOCALES: [&str; 2] = ["en", "pt"];

// Catálogos embutidos no binário
const CATALOGS: [(&str, &str); 2] = [
    ("en", include_str!("../../locales/en.json")),
    ("pt", include_str!("../../locales/pt.json")),
];

/// Mensagens traduzidas, indexadas por idioma e depois por chave.
#[derive(Debug, Clone, Default)]
pub struct I18nStore {
    catalogs: HashMap<String, HashMap<String, String>>,
}

impl I18nStore {
    pub fn load() -> anyhow::Result<Self> {
        let mut catalogs = HashMap::new();
        for (lang, raw) in CATALOGS {
            let messages: HashMap<String, String> = serde_json::from_str(raw)
                .map_err(|e| anyhow::anyhow!("Catálogo '{}' inválido: {}", lang, e))?;
            catalogs.insert(lang.to_string(), messages);
        }
        Ok(Self { catalogs })
    }

    /// Busca no idioma pedido, depois no padrão; em último caso devolve a própria chave.
    pub fn translate(&self, locale: &str, key: &str) -> String {
        self.lookup(locale, key)
            .or_else(|| self.lookup(DEFAULT_LOCALE, key))
            .unwrap_or(key)
            .to_string()
    }

    /// Igual a `translate`, substituindo `{nome}` pelos argumentos.
    pub fn translate_with(&self, locale: &str, key: &str, args: &[(&str, &str)]) -> String {
        args.iter().fold(self.translate(locale, key), |message, (name, value)| {
            message.replace(&format!("{{{}}}", name), value)
        })
    }

    fn lookup(&self, locale: &str, key: &str) -> Option<&str> {
        self.catalogs
            .get(locale)
            .and_then(|messages| messages.get(key))
            .map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_catalog_has_the_same_keys() {
        let store = I18nStore::load().unwrap();
        let en = &store.catalogs["en"];
        for lang in SUPPORTED_LOCALES {
            let catalog = &store.catalogs[lang];
            for key in en.keys() {
                assert!(catalog.contains_key(key), "'{}' sem a chave '{}'", lang, key);
            }
        }
    }

    #[test]
    fn unknown_locale_falls_back_to_english() {
        let store = I18nStore::load().unwrap();
        assert_eq!(
            store.translate("sw", "invalid_credentials"),
            store.translate("en", "invalid_credentials")
        );
    }

    #[test]
    fn unknown_key_is_returned_as_is() {
        let store = I18nStore::load().unwrap();
        assert_eq!(store.translate("en", "no_such_key"), "no_such_key");
    }

    #[test]
    fn placeholders_are_replaced() {
        let store = I18nStore::load().unwrap();
        let message = store.translate_with("en", "registration_already_exists", &[("value", "UAH 123X")]);
        assert!(message.contains("UAH 123X"));
        assert!(!message.contains("{value}"));
    }
}
