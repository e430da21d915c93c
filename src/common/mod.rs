pub mod error;
pub mod filters;
pub mod i18n;
pub mod validation;
