//! CLDR plural category resolution.
//!
//! Different languages have different plural rules: English has "one" and
//! "other", Russian has "one", "few", "many" and "other", and Arabic uses all
//! six categories. The category selects the `_one`/`_other`/... key suffix.
//!
//! Plural rules are cached per thread by language and region, so tags that
//! differ only in case, script or extensions (`en-US`, `en-us`,
//! `en-Latn-US-u-ca-buddhist`) share one `PluralRules` instance.

use std::cell::RefCell;
use std::str::FromStr;

use fixed_decimal::Decimal;
use icu_locale_core::subtags::{Language, Region};
use icu_locale_core::{LanguageIdentifier, Locale, locale};
use icu_plurals::{PluralCategory, PluralOperands, PluralRuleType, PluralRules};

/// Cache key: the subtags plural rules depend on (`pt` and `pt-PT` differ).
type RulesKey = (Language, Option<Region>);

thread_local! {
    /// Per-thread cache of `PluralRules` keyed by language and region.
    static PLURAL_RULES_CACHE: RefCell<Vec<(RulesKey, Option<PluralRules>)>> = const { RefCell::new(Vec::new()) };
}

/// Reduce a language tag to its cache key. Tags that do not parse use English.
fn rules_key(lang: &str) -> RulesKey {
    let loc = Locale::from_str(lang).unwrap_or(locale!("en"));
    (loc.id.language, loc.id.region)
}

fn build_rules((language, region): RulesKey) -> Option<PluralRules> {
    let id = LanguageIdentifier {
        language,
        region,
        ..LanguageIdentifier::UNKNOWN
    };
    PluralRules::try_new(Locale::from(id).into(), PluralRuleType::Cardinal.into()).ok()
}

/// Translate a `PluralCategory` enum to its key suffix.
fn category_str(category: PluralCategory) -> &'static str {
    match category {
        PluralCategory::Zero => "zero",
        PluralCategory::One => "one",
        PluralCategory::Two => "two",
        PluralCategory::Few => "few",
        PluralCategory::Many => "many",
        PluralCategory::Other => "other",
    }
}

fn with_rules(lang: &str, f: impl FnOnce(&PluralRules) -> PluralCategory) -> &'static str {
    let key = rules_key(lang);
    PLURAL_RULES_CACHE.with_borrow_mut(|cache| {
        let index = match cache.iter().position(|(cached, _)| *cached == key) {
            Some(index) => index,
            None => {
                cache.push((key, build_rules(key)));
                cache.len() - 1
            }
        };
        cache[index]
            .1
            .as_ref()
            .map_or("other", |rules| category_str(f(rules)))
    })
}

#[cfg(test)]
fn cached_rules() -> usize {
    PLURAL_RULES_CACHE.with_borrow(Vec::len)
}

/// Get the CLDR plural category for an integer in a given language.
///
/// Returns one of: "zero", "one", "two", "few", "many", "other".
///
/// # Examples
///
/// ```
/// use i18n_catalog::plural_category;
///
/// assert_eq!(plural_category("en", 1), "one");
/// assert_eq!(plural_category("en", 2), "other");
///
/// assert_eq!(plural_category("ru", 1), "one");
/// assert_eq!(plural_category("ru", 2), "few");
/// assert_eq!(plural_category("ru", 5), "many");
/// ```
pub fn plural_category(lang: &str, n: i64) -> &'static str {
    with_rules(lang, |rules| rules.category_for(n))
}

/// Get the CLDR plural category for a decimal count such as `1.5`.
///
/// Whole numbers are routed through [`plural_category`]; fractional values
/// are categorized from their decimal representation so visible fraction
/// digits take part in the rule.
pub fn plural_category_decimal(lang: &str, n: f64) -> &'static str {
    if n.fract() == 0.0 && n.abs() < 9.0e15 {
        return plural_category(lang, n as i64);
    }
    match Decimal::from_str(&n.abs().to_string()) {
        Ok(decimal) => with_rules(lang, |rules| {
            rules.category_for(PluralOperands::from(&decimal))
        }),
        Err(_) => "other",
    }
}
