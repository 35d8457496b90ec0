use crate::error::{KitError, KitResult};
use crate::hint::sanitize::sanitize_hint;
use crate::model::kit::{KitStatusRecord, NOT_APPLICABLE};

const DISABLED_MARKER: &str = "disabled";
const DISABLED_SUFFIX: &str = "(disabled)";
const VERSION_TOKEN: &str = "version";

/// Parses a raw host hint into a [`KitStatusRecord`].
///
/// Disabled detection is a plain substring test on `disabled`, so a kit
/// whose name contains that word is always reported as disabled.
pub fn classify_hint(raw: &str) -> KitResult<KitStatusRecord> {
    let sanitized = sanitize_hint(raw);

    if sanitized.contains(DISABLED_MARKER) {
        let name = sanitized
            .split(DISABLED_SUFFIX)
            .next()
            .unwrap_or_default()
            .trim();
        if name.is_empty() {
            return Err(KitError::malformed(raw, "disabled hint has no kit name"));
        }
        tracing::debug!(kit = name, "classified disabled kit");
        return Ok(KitStatusRecord::disabled(name));
    }

    let mut parts = sanitized.split(VERSION_TOKEN);
    let (Some(name), Some(version), None) = (parts.next(), parts.next(), parts.next()) else {
        return Err(KitError::malformed(
            raw,
            format!("expected exactly one `{VERSION_TOKEN}` token or a `{DISABLED_MARKER}` marker"),
        ));
    };

    let name = name.trim();
    let version = version.trim();
    if name.is_empty() {
        return Err(KitError::malformed(raw, "hint has no kit name"));
    }
    if version.is_empty() || version == NOT_APPLICABLE {
        return Err(KitError::malformed(raw, "hint has no usable version"));
    }

    tracing::debug!(kit = name, version, "classified enabled kit");
    Ok(KitStatusRecord::enabled(name, version))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn disabled_hint() {
        let record =
            classify_hint("([)MODO_KIT_CENTRAL(]) ([)(j:2)(c:26646166)(])(disabled)").unwrap();
        assert_eq!(record, KitStatusRecord::disabled("MODO_KIT_CENTRAL"));
        assert_eq!(record.version(), "n/a");
    }

    #[test]
    fn enabled_hint() {
        let record =
            classify_hint("([)MODO_KIT_CENTRAL(]) ([)(j:2)(c:26646166)version ([)2.0(])").unwrap();
        assert_eq!(record.name(), "MODO_KIT_CENTRAL");
        assert!(record.is_enabled());
        assert_eq!(record.version(), "2.0");
        assert!(record.install_path().is_none());
    }

    #[test]
    fn plain_name_version_form() {
        let record = classify_hint("  Some Kit   version   1.2.3  ").unwrap();
        assert_eq!(record, KitStatusRecord::enabled("Some Kit", "1.2.3"));
    }

    #[test]
    fn any_disabled_substring_disables() {
        let record = classify_hint("disabled-tools version 1.0").unwrap();
        assert!(!record.is_enabled());
        assert_eq!(record.name(), "disabled-tools version 1.0");
        assert_eq!(record.version(), NOT_APPLICABLE);
    }

    #[test]
    fn missing_tokens_is_malformed() {
        let err = classify_hint("([)JUST_A_NAME(])").unwrap_err();
        assert!(matches!(err, KitError::MalformedHint { .. }));
    }

    #[test]
    fn repeated_version_token_is_malformed() {
        let err = classify_hint("kit version 1 version 2").unwrap_err();
        assert!(matches!(err, KitError::MalformedHint { .. }));
    }

    #[test]
    fn empty_parts_are_malformed() {
        assert!(classify_hint("version 2.0").is_err());
        assert!(classify_hint("kit version").is_err());
        assert!(classify_hint("(disabled)").is_err());
        assert!(classify_hint("kit version n/a").is_err());
    }
}
