//! Partial bundle export and import.
//!
//! A bundle is a small JavaScript module that registers every exported
//! partial on a template engine handed in by the consuming application:
//!
//! ```js
//! exports.partials = function(engine, atob) {
//! engine.registerPartial("button-icon", engine.compile(atob('PGk+PC9pPg==')));
//! };
//! ```
//!
//! Template sources are base64-encoded so arbitrary markup survives being
//! quoted into a JS string. [`import_bundle`] parses the same shape back,
//! which lets one styleguide consume the partials another one exported.

use std::sync::LazyLock;

use base64::Engine;
use base64::prelude::BASE64_STANDARD;
use regex::Regex;

use crate::error::TemplateError;

static PARTIAL_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r#"^engine\.registerPartial\("([^"]+)",\s*engine\.compile\(atob\('([A-Za-z0-9+/=]*)'\)\)\);$"#,
    )
    .unwrap()
});

/// Serialize named partial sources into a registerable JS bundle.
///
/// Sources are trimmed before encoding; surrounding whitespace in partial
/// files carries no meaning and would otherwise leak into every consumer.
#[must_use]
pub fn export_bundle<'a>(partials: impl IntoIterator<Item = (&'a str, &'a str)>) -> String {
    let lines: Vec<String> = partials
        .into_iter()
        .map(|(name, source)| {
            let encoded = BASE64_STANDARD.encode(source.trim());
            format!("engine.registerPartial(\"{name}\", engine.compile(atob('{encoded}')));")
        })
        .collect();

    format!(
        "exports.partials = function(engine, atob) {{\n{}\n}};\n",
        lines.join("\n")
    )
}

/// Parse a partial bundle back into `(name, source)` pairs.
///
/// Accepts the exact shape [`export_bundle`] produces, plus arbitrary
/// leading indentation per line.
///
/// # Errors
///
/// Returns [`TemplateError::InvalidBundle`] for lines that are neither
/// wrapper boilerplate nor a well-formed registration, and for
/// registrations whose payload is not base64-encoded UTF-8.
pub fn import_bundle(bundle: &str) -> Result<Vec<(String, String)>, TemplateError> {
    let mut partials = Vec::new();

    for (idx, raw_line) in bundle.lines().enumerate() {
        let line = raw_line.trim();
        if line.is_empty() || line.starts_with("exports.partials") || line == "};" {
            continue;
        }

        let caps = PARTIAL_LINE
            .captures(line)
            .ok_or_else(|| TemplateError::InvalidBundle {
                line: idx + 1,
                reason: "expected an engine.registerPartial(...) call".to_owned(),
            })?;

        let name = caps[1].to_owned();
        let decoded =
            BASE64_STANDARD
                .decode(&caps[2])
                .map_err(|err| TemplateError::InvalidBundle {
                    line: idx + 1,
                    reason: err.to_string(),
                })?;
        let source = String::from_utf8(decoded).map_err(|err| TemplateError::InvalidBundle {
            line: idx + 1,
            reason: err.to_string(),
        })?;

        partials.push((name, source));
    }

    Ok(partials)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_export_wraps_registrations() {
        let bundle = export_bundle([("icon", "<i></i>")]);

        assert!(bundle.starts_with("exports.partials = function(engine, atob) {\n"));
        assert!(bundle.ends_with("\n};\n"));
        assert!(bundle.contains("engine.registerPartial(\"icon\", engine.compile(atob("));
    }

    #[test]
    fn test_export_trims_sources() {
        let bundle = export_bundle([("icon", "  <i></i>\n")]);
        let partials = import_bundle(&bundle).unwrap();

        assert_eq!(partials, vec![("icon".to_owned(), "<i></i>".to_owned())]);
    }

    #[test]
    fn test_round_trip_preserves_names_and_sources() {
        let bundle = export_bundle([
            ("button-icon", "<i class=\"icon\"></i>"),
            ("card-header", "<header>{{ title }}</header>"),
        ]);

        let partials = import_bundle(&bundle).unwrap();

        assert_eq!(
            partials,
            vec![
                ("button-icon".to_owned(), "<i class=\"icon\"></i>".to_owned()),
                (
                    "card-header".to_owned(),
                    "<header>{{ title }}</header>".to_owned()
                ),
            ]
        );
    }

    #[test]
    fn test_import_tolerates_indentation() {
        let bundle = "exports.partials = function(engine, atob){\n      engine.registerPartial(\"a\", engine.compile(atob('eA==')));\n    };";

        let partials = import_bundle(bundle).unwrap();

        assert_eq!(partials, vec![("a".to_owned(), "x".to_owned())]);
    }

    #[test]
    fn test_import_empty_bundle() {
        let bundle = export_bundle([]);

        assert_eq!(import_bundle(&bundle).unwrap(), vec![]);
    }

    #[test]
    fn test_import_rejects_garbage_line() {
        let err = import_bundle("exports.partials = function(engine, atob) {\nnot a registration\n};\n")
            .unwrap_err();

        assert!(matches!(err, TemplateError::InvalidBundle { line: 2, .. }));
    }

    #[test]
    fn test_import_rejects_bad_base64() {
        let bundle =
            "engine.registerPartial(\"a\", engine.compile(atob('%%%')));";

        assert!(import_bundle(bundle).is_err());
    }
}
