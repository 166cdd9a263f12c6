//! Name → helper function mapping produced by `init`.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use serde_json::Value;

use crate::bindings::HelperBindings;
use crate::error::HelperError;
use crate::options::InvocationOptions;
use crate::value::RenderValue;

pub const TRANSLATE: &str = "translate";
pub const CURRENT_LOCALE: &str = "currentLocale";
pub const LOCALE_IS: &str = "localeIs";
pub const FORMAT_DATE: &str = "formatDate";
pub const FORMAT_NUMBER: &str = "formatNumber";
pub const FORMAT_PRICE: &str = "formatPrice";

/// Canonical helper names, in registration order.
pub const HELPER_NAMES: [&str; 6] = [
    TRANSLATE,
    CURRENT_LOCALE,
    LOCALE_IS,
    FORMAT_DATE,
    FORMAT_NUMBER,
    FORMAT_PRICE,
];

/// Short names accepted for each helper, as `(alias, canonical)`.
pub const ALIASES: [(&str, &str); 5] = [
    ("__", TRANSLATE),
    ("_locale", CURRENT_LOCALE),
    ("_date", FORMAT_DATE),
    ("_num", FORMAT_NUMBER),
    ("_price", FORMAT_PRICE),
];

/// A callable helper.
pub type HelperFn = Arc<
    dyn Fn(&[Value], Option<&InvocationOptions>) -> Result<RenderValue, HelperError>
        + Send
        + Sync,
>;

type BindingMethod =
    fn(&HelperBindings, &[Value], Option<&InvocationOptions>) -> Result<RenderValue, HelperError>;

fn helper_fn<F>(f: F) -> HelperFn
where
    F: Fn(&[Value], Option<&InvocationOptions>) -> Result<RenderValue, HelperError>
        + Send
        + Sync
        + 'static,
{
    Arc::new(f)
}

/// Resolve an alias to its canonical helper name.
pub fn canonical_name(name: &str) -> Option<&'static str> {
    HELPER_NAMES
        .into_iter()
        .find(|canonical| *canonical == name)
        .or_else(|| {
            ALIASES
                .into_iter()
                .find(|(alias, _)| *alias == name)
                .map(|(_, canonical)| canonical)
        })
}

/// The helpers built by `init`, keyed by canonical name.
///
/// A registry never changes after construction. Each `init` call returns a
/// new one; registries only share the engine, presets and formatter they
/// were built from.
#[derive(Clone)]
pub struct HelperRegistry {
    helpers: BTreeMap<&'static str, HelperFn>,
}

impl HelperRegistry {
    pub fn new(bindings: HelperBindings) -> Self {
        let bindings = Arc::new(bindings);
        let bind = |method: BindingMethod| {
            let bindings = Arc::clone(&bindings);
            helper_fn(move |args, options| method(&bindings, args, options))
        };

        let helpers = BTreeMap::from([
            (TRANSLATE, bind(HelperBindings::translate)),
            (CURRENT_LOCALE, bind(HelperBindings::current_locale)),
            (LOCALE_IS, bind(HelperBindings::locale_is)),
            (FORMAT_DATE, bind(HelperBindings::format_date)),
            (FORMAT_NUMBER, bind(HelperBindings::format_number)),
            (FORMAT_PRICE, bind(HelperBindings::format_price)),
        ]);
        Self { helpers }
    }

    /// The helper registered under `name` or one of its aliases.
    pub fn get(&self, name: &str) -> Option<&HelperFn> {
        canonical_name(name).and_then(|canonical| self.helpers.get(canonical))
    }

    /// Call a helper by name.
    pub fn call(
        &self,
        name: &str,
        args: &[Value],
        options: Option<&InvocationOptions>,
    ) -> Result<RenderValue, HelperError> {
        let helper = self.get(name).ok_or_else(|| HelperError::UnknownHelper {
            name: name.to_string(),
        })?;
        helper(args, options)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Canonical helper names, sorted.
    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.helpers.keys().copied()
    }

    pub fn len(&self) -> usize {
        self.helpers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.helpers.is_empty()
    }

    /// Canonical names with their helpers.
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &HelperFn)> {
        self.helpers.iter().map(|(name, helper)| (*name, helper))
    }
}

impl fmt::Debug for HelperRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HelperRegistry")
            .field("helpers", &self.helpers.keys().collect::<Vec<_>>())
            .finish()
    }
}
