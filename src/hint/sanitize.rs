use std::sync::LazyLock;

use regex::Regex;

/// Formatting artifacts the host embeds in `kit.toggleEnabled` hints:
/// the ETX delimiter, the `([)`/`(])` bracket escapes and the fixed
/// justification/colour code.
static FORMATTING_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\x03|\(\[\)|\(\]\)|\(j:2\)\(c:26646166\)").expect("valid hint formatting regex")
});

/// Strips host formatting from a raw hint and trims surrounding whitespace.
///
/// `([)MODO_KIT_CENTRAL(]) ([)(j:2)(c:26646166)version ([)2.0(])` becomes
/// `MODO_KIT_CENTRAL version 2.0`.
///
/// Removal repeats until nothing matches, so artifacts split by another
/// artifact (e.g. `(\x03[)`) are removed too and the result is stable
/// under a second pass.
pub fn sanitize_hint(value: &str) -> String {
    let mut current = value.to_string();
    loop {
        let stripped = FORMATTING_RE.replace_all(&current, "");
        if stripped.len() == current.len() {
            break;
        }
        current = stripped.into_owned();
    }
    current.trim().to_string()
}
