//! Namespaced translation catalog.
//!
//! A [`Catalog`] stores translation resources keyed by language, namespace
//! and key path, and resolves keys with interpolation, CLDR plural suffixes,
//! context suffixes and a language fallback chain.

mod catalog;
mod error;
mod interpolation;
mod plural;
mod store;

pub use catalog::{Catalog, DEFAULT_NAMESPACE};
pub use error::{BundleError, LoadError};
pub use interpolation::{Segment, Template, parse_interpolation};
pub use plural::{plural_category, plural_category_decimal};
pub use store::{ResourceStore, validate_bundle, value_kind};

/// Re-exported so callers can build option maps without a direct
/// `serde_json` dependency.
pub use serde_json::{Map, Value};

/// Creates a `serde_json::Map<String, Value>` of translation options.
///
/// Values are converted with `serde_json::Value::from`, so integers,
/// floats, booleans and strings can be passed directly.
///
/// # Example
///
/// ```
/// use i18n_catalog::options;
///
/// let opts = options! { "count" => 3, "name" => "Alice" };
/// assert_eq!(opts.len(), 2);
/// assert_eq!(opts["count"].as_i64(), Some(3));
/// assert_eq!(opts["name"].as_str(), Some("Alice"));
/// ```
#[macro_export]
macro_rules! options {
    {} => {
        $crate::Map::<String, $crate::Value>::new()
    };
    { $($key:expr => $value:expr),+ $(,)? } => {
        {
            let mut map = $crate::Map::<String, $crate::Value>::new();
            $(
                map.insert($key.to_string(), $crate::Value::from($value));
            )+
            map
        }
    };
}
