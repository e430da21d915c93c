// src/middleware/i18n.rs

use axum::extract::FromRequestParts;
use axum::http::{header, request::Parts, HeaderMap};

use crate::common::i18n::{DEFAULT_LOCALE, SUPPORTED_LOCALES};

// Idioma da resposta, vindo do Accept-Language
#[derive(Debug, Clone)]
pub struct Locale(pub String);

impl Locale {
    pub fn from_headers(headers: &HeaderMap) -> Self {
        let lang = headers
            .get(header::ACCEPT_LANGUAGE)
            .and_then(|value| value.to_str().ok())
            .and_then(|raw| {
                // "pt-BR,pt;q=0.9" -> só a parte primária de cada tag
                let primary: Vec<String> = accept_language::parse(raw)
                    .iter()
                    .map(|tag| tag.split('-').next().unwrap_or(tag).to_lowercase())
                    .collect();
                primary
                    .into_iter()
                    .find(|lang| SUPPORTED_LOCALES.contains(&lang.as_str()))
            })
            .unwrap_or_else(|| DEFAULT_LOCALE.to_string());

        Locale(lang)
    }
}

impl<S> FromRequestParts<S> for Locale
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(Locale::from_headers(&parts.headers))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn with_header(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(header::ACCEPT_LANGUAGE, HeaderValue::from_str(value).unwrap());
        headers
    }

    #[test]
    fn picks_the_first_supported_language() {
        assert_eq!(Locale::from_headers(&with_header("pt-BR,pt;q=0.9,en;q=0.8")).0, "pt");
        assert_eq!(Locale::from_headers(&with_header("sw-KE,en-GB;q=0.7")).0, "en");
    }

    #[test]
    fn defaults_to_english() {
        assert_eq!(Locale::from_headers(&HeaderMap::new()).0, "en");
        assert_eq!(Locale::from_headers(&with_header("fr-FR")).0, "en");
    }
}
