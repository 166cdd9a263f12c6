//! The six template helpers.

use std::sync::{Arc, RwLock};

use i18n_catalog::value_kind;
use serde_json::Value;

use crate::engine::SharedLocalizer;
use crate::error::HelperError;
use crate::format::{FormatKind, Formatter};
use crate::options::InvocationOptions;
use crate::presets::FormatPresets;
use crate::registry::{FORMAT_DATE, FORMAT_NUMBER, FORMAT_PRICE, TRANSLATE};
use crate::value::RenderValue;

/// Locale used by the formatting helpers while no language is active.
pub const DEFAULT_FORMAT_LOCALE: &str = "en";

/// Helper implementations bound to one engine, preset table and formatter.
///
/// Every helper takes the positional arguments of the call and the trailing
/// invocation options. `None` options means the caller broke the calling
/// convention; template engines always supply them.
#[derive(Clone)]
pub struct HelperBindings {
    engine: SharedLocalizer,
    presets: Arc<RwLock<FormatPresets>>,
    formatter: Arc<dyn Formatter>,
}

impl HelperBindings {
    pub fn new(
        engine: SharedLocalizer,
        presets: Arc<RwLock<FormatPresets>>,
        formatter: Arc<dyn Formatter>,
    ) -> Self {
        Self {
            engine,
            presets,
            formatter,
        }
    }

    /// The engine's active language, read once per helper call.
    pub fn active_locale(&self) -> Option<String> {
        let engine = self.engine.read().expect("localizer lock poisoned");
        engine.current_language().map(str::to_string)
    }

    /// `{{translate "key" count=2}}`: look up a translation.
    ///
    /// The result is always [`RenderValue::Raw`] since resources may contain
    /// markup. Keys without a resource come back unchanged.
    pub fn translate(
        &self,
        args: &[Value],
        options: Option<&InvocationOptions>,
    ) -> Result<RenderValue, HelperError> {
        let options = options.ok_or(HelperError::MissingOptions { helper: TRANSLATE })?;
        let key = match args.first() {
            None => {
                return Err(HelperError::MissingArgument {
                    helper: TRANSLATE,
                    index: 0,
                });
            }
            Some(Value::String(key)) => key,
            Some(other) => {
                return Err(HelperError::InvalidArgument {
                    helper: TRANSLATE,
                    index: 0,
                    expected: "string",
                    found: value_kind(other),
                });
            }
        };
        let engine = self.engine.read().expect("localizer lock poisoned");
        let translated = engine.lookup(key, &options.hash);
        tracing::trace!(key = key.as_str(), "translate");
        Ok(RenderValue::Raw(translated))
    }

    /// `{{currentLocale}}`: the active language, or nothing when unset.
    pub fn current_locale(
        &self,
        _args: &[Value],
        _options: Option<&InvocationOptions>,
    ) -> Result<RenderValue, HelperError> {
        Ok(self
            .active_locale()
            .map_or(RenderValue::Missing, RenderValue::Escaped))
    }

    /// `{{#if (localeIs "en")}}`: exact, case-sensitive comparison with the
    /// active language.
    pub fn locale_is(
        &self,
        args: &[Value],
        _options: Option<&InvocationOptions>,
    ) -> Result<RenderValue, HelperError> {
        let matches = match (self.active_locale(), args.first()) {
            (Some(current), Some(Value::String(candidate))) => current == *candidate,
            _ => false,
        };
        Ok(RenderValue::Bool(matches))
    }

    pub fn format_date(
        &self,
        args: &[Value],
        options: Option<&InvocationOptions>,
    ) -> Result<RenderValue, HelperError> {
        self.format(FORMAT_DATE, FormatKind::DateTime, args, options)
    }

    pub fn format_number(
        &self,
        args: &[Value],
        options: Option<&InvocationOptions>,
    ) -> Result<RenderValue, HelperError> {
        self.format(FORMAT_NUMBER, FormatKind::Number, args, options)
    }

    pub fn format_price(
        &self,
        args: &[Value],
        options: Option<&InvocationOptions>,
    ) -> Result<RenderValue, HelperError> {
        self.format(FORMAT_PRICE, FormatKind::Price, args, options)
    }

    fn format(
        &self,
        helper: &'static str,
        kind: FormatKind,
        args: &[Value],
        options: Option<&InvocationOptions>,
    ) -> Result<RenderValue, HelperError> {
        let options = options.ok_or(HelperError::MissingOptions { helper })?;
        let locale = self
            .active_locale()
            .unwrap_or_else(|| DEFAULT_FORMAT_LOCALE.to_string());
        let resolved = self
            .presets
            .read()
            .expect("format presets lock poisoned")
            .resolve(&locale, kind, &options.hash);
        let value = args.first().unwrap_or(&Value::Null);

        let formatted = self
            .formatter
            .format(kind, &locale, value, &resolved)
            .inspect_err(|error| {
                tracing::debug!(helper, locale = locale.as_str(), %error, "formatting failed");
            })?;
        Ok(RenderValue::Escaped(formatted))
    }
}
