use std::collections::BTreeMap;
use std::sync::LazyLock;

/// Language used when a request does not name one
pub const DEFAULT_LANGUAGE: &str = "en";

/// Language codes accepted by the synthesis provider, with display names
const SUPPORTED_LANGUAGES: &[(&str, &str)] = &[
    ("af", "Afrikaans"),
    ("sq", "Albanian"),
    ("ar", "Arabic"),
    ("hy", "Armenian"),
    ("ca", "Catalan"),
    ("zh", "Chinese"),
    ("zh-cn", "Chinese (Mandarin/China)"),
    ("zh-tw", "Chinese (Mandarin/Taiwan)"),
    ("hr", "Croatian"),
    ("cs", "Czech"),
    ("da", "Danish"),
    ("nl", "Dutch"),
    ("en", "English"),
    ("en-au", "English (Australia)"),
    ("en-uk", "English (United Kingdom)"),
    ("en-us", "English (United States)"),
    ("eo", "Esperanto"),
    ("fi", "Finnish"),
    ("fr", "French"),
    ("de", "German"),
    ("el", "Greek"),
    ("ht", "Haitian Creole"),
    ("hi", "Hindi"),
    ("hu", "Hungarian"),
    ("is", "Icelandic"),
    ("id", "Indonesian"),
    ("it", "Italian"),
    ("ja", "Japanese"),
    ("ko", "Korean"),
    ("la", "Latin"),
    ("lv", "Latvian"),
    ("mk", "Macedonian"),
    ("no", "Norwegian"),
    ("pl", "Polish"),
    ("pt", "Portuguese"),
    ("pt-br", "Portuguese (Brazil)"),
    ("ro", "Romanian"),
    ("ru", "Russian"),
    ("sr", "Serbian"),
    ("sk", "Slovak"),
    ("es", "Spanish"),
    ("es-es", "Spanish (Spain)"),
    ("es-us", "Spanish (United States)"),
    ("sw", "Swahili"),
    ("sv", "Swedish"),
    ("ta", "Tamil"),
    ("th", "Thai"),
    ("tr", "Turkish"),
    ("vi", "Vietnamese"),
    ("cy", "Welsh"),
];

static CATALOG: LazyLock<BTreeMap<&'static str, &'static str>> =
    LazyLock::new(|| SUPPORTED_LANGUAGES.iter().copied().collect());

/// Read-only mapping of language code to display name, fixed for the process lifetime
pub fn language_catalog() -> &'static BTreeMap<&'static str, &'static str> {
    &CATALOG
}

/// Whether the provider is known to accept `code`.
/// Informational only: requests are never rejected locally for an unknown code.
pub fn is_supported_language(code: &str) -> bool {
    CATALOG.contains_key(code)
}
