//! Translation and locale-aware formatting helpers for Handlebars templates.
//!
//! The crate exposes six helpers bound to a localization engine:
//!
//! | helper | alias | result |
//! |---|---|---|
//! | `translate` | `__` | translated text, inserted unescaped |
//! | `currentLocale` | `_locale` | the active language |
//! | `localeIs` | | whether the active language equals the argument |
//! | `formatDate` | `_date` | a localized date |
//! | `formatNumber` | `_num` | a localized number |
//! | `formatPrice` | `_price` | a localized currency amount |
//!
//! ```ignore
//! use handlebars::Handlebars;
//! use handlebars_i18n::{Environment, register_helpers};
//! use i18n_catalog::Catalog;
//! use serde_json::json;
//!
//! let env = Environment::new(Catalog::with_language("en"));
//! env.configure(&[json!([["en", {"greeting": "Hello {{name}}"}]])]);
//!
//! let mut handlebars = Handlebars::new();
//! register_helpers(&mut handlebars, &env.init());
//! let text = handlebars.render_template(r#"{{translate "greeting" name="Ann"}}"#, &())?;
//! assert_eq!(text, "Hello Ann");
//! ```

mod adapter;
mod bindings;
mod configure;
mod engine;
mod environment;
mod error;
pub mod format;
mod global;
mod options;
mod presets;
mod registry;
mod value;

pub use adapter::{I18nHelper, register_helpers};
pub use bindings::{DEFAULT_FORMAT_LOCALE, HelperBindings};
pub use configure::{ConfigEntry, parse_table};
pub use engine::{Localizer, SharedLocalizer, share};
pub use environment::Environment;
pub use error::{ConfigError, HelperError};
pub use format::{FormatError, FormatKind, Formatter, IcuFormatter};
pub use global::{configure, environment, init, language, reset, set_language};
pub use options::InvocationOptions;
pub use presets::{ALL_LANGUAGES, FormatPresets, PRESET_OPTION};
pub use registry::{
    ALIASES, CURRENT_LOCALE, FORMAT_DATE, FORMAT_NUMBER, FORMAT_PRICE, HELPER_NAMES, HelperFn,
    HelperRegistry, LOCALE_IS, TRANSLATE, canonical_name,
};
pub use value::RenderValue;
