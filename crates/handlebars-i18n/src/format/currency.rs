//! Currency symbols, minor units and symbol placement.

/// ISO 4217 minor unit digits for a currency code.
pub fn currency_digits(code: &str) -> i16 {
    match code {
        "BIF" | "CLP" | "DJF" | "GNF" | "ISK" | "JPY" | "KMF" | "KRW" | "PYG" | "RWF" | "UGX"
        | "VND" | "VUV" | "XAF" | "XOF" | "XPF" => 0,
        "BHD" | "IQD" | "JOD" | "KWD" | "LYD" | "OMR" | "TND" => 3,
        _ => 2,
    }
}

/// Display symbol for common currencies.
pub fn currency_symbol(code: &str) -> Option<&'static str> {
    let symbol = match code {
        "EUR" => "€",
        "USD" => "$",
        "GBP" => "£",
        "JPY" => "¥",
        "CNY" => "CN¥",
        "INR" => "₹",
        "KRW" => "₩",
        "RUB" => "₽",
        "UAH" => "₴",
        "TRY" => "₺",
        "ILS" => "₪",
        "BRL" => "R$",
        "PLN" => "zł",
        "CHF" => "CHF",
        _ => return None,
    };
    Some(symbol)
}

/// Languages that write the currency before the amount without a space.
const PREFIX_LANGUAGES: &[&str] = &["en", "ja", "zh", "ko", "hi", "th"];

/// Whether `locale` places the currency before the amount.
pub(crate) fn is_prefix_locale(locale: &str) -> bool {
    let language = locale.split(['-', '_']).next().unwrap_or(locale);
    PREFIX_LANGUAGES.contains(&language)
}

/// Normalize and validate a three-letter ISO 4217 code.
pub(crate) fn normalize_code(code: &str) -> Option<String> {
    let code = code.trim();
    (code.len() == 3 && code.chars().all(|c| c.is_ascii_alphabetic()))
        .then(|| code.to_ascii_uppercase())
}
