use anyhow::Error;

pub(crate) fn format(err: &Error) -> String {
    let mut out = format!("Error: {err:#}");
    let hints = suggestions(err);
    if !hints.is_empty() {
        out.push_str("\n\nHints:\n");
        for hint in hints {
            out.push_str("- ");
            out.push_str(&hint);
            out.push('\n');
        }
    }
    out
}

fn suggestions(err: &Error) -> Vec<String> {
    let chain: Vec<String> = err.chain().map(|e| e.to_string()).collect();
    let haystack = chain.join(" | ").to_ascii_lowercase();
    let mut out: Vec<String> = Vec::new();

    if haystack.contains("data_root_missing") || haystack.contains("data root") {
        push_hint(
            &mut out,
            "Point `--data` at the directory holding one folder per tournament.",
        );
        push_hint(
            &mut out,
            "Or set `data_root` in `t9a.toml` in the working directory.",
        );
    }

    if haystack.contains("failed to read") || haystack.contains("no such file or directory") {
        push_hint(&mut out, "Verify the file exists and is readable.");
    }

    if haystack.contains("invalid toml") {
        push_hint(
            &mut out,
            "Check the TOML syntax and key names. Dates are quoted strings, e.g. `start_date = \"2024-01-31\"`.",
        );
    }

    if haystack.contains("invalid json") {
        push_hint(&mut out, "Check the JSON syntax of the query file.");
    }

    if haystack.contains("unknown faction") {
        push_hint(
            &mut out,
            "Use a faction code such as `OnG` or `EoS`, or a full name such as \"Orcs and Goblins\".",
        );
    }

    if haystack.contains("contains a unit named") {
        push_hint(
            &mut out,
            "Unit names must match the data exactly; run `t9a units --faction <CODE>` to list them.",
        );
    }

    if haystack.contains("exceeds maximum")
        || haystack.contains("is after end date")
        || haystack.contains("is inverted")
    {
        push_hint(
            &mut out,
            "Swap the bounds so the minimum comes first; every range is inclusive.",
        );
    }

    if haystack.contains("both required and banned") {
        push_hint(
            &mut out,
            "An option cannot be both required and banned on the same unit slot.",
        );
    }

    out
}

fn push_hint(out: &mut Vec<String>, hint: &str) {
    if !out.iter().any(|h| h == hint) {
        out.push(hint.to_string());
    }
}

#[cfg(test)]
mod tests {
    use anyhow::anyhow;

    use super::{format, suggestions};

    #[test]
    fn suggests_for_missing_data_root() {
        let err = anyhow!("[data_root_missing] data root data does not exist or is not a directory");
        let hints = suggestions(&err);
        assert!(hints.iter().any(|h| h.contains("--data")));
        assert!(hints.iter().any(|h| h.contains("t9a.toml")));
    }

    #[test]
    fn suggests_for_unknown_faction() {
        let err = anyhow!("[unknown_faction] unknown faction code 'XX'");
        let hints = suggestions(&err);
        assert!(hints.iter().any(|h| h.contains("OnG")));
    }

    #[test]
    fn suggests_for_unknown_unit() {
        let err = anyhow!("[invalid_query] no OnG list contains a unit named 'Wolf Rider'");
        let hints = suggestions(&err);
        assert!(hints.iter().any(|h| h.contains("t9a units")));
    }

    #[test]
    fn suggests_for_inverted_ranges() {
        let err = anyhow!("list_size: minimum 5000 exceeds maximum 4000");
        let hints = suggestions(&err);
        assert_eq!(hints.len(), 1);
        assert!(hints[0].contains("inclusive"));
    }

    #[test]
    fn suggests_for_bad_toml_through_context() {
        let err = anyhow!("invalid TOML in t9a.toml: expected `=`")
            .context("Failed to load settings from t9a.toml");
        let hints = suggestions(&err);
        assert!(hints.iter().any(|h| h.contains("quoted strings")));
    }

    #[test]
    fn format_includes_hints_section() {
        let err = anyhow!("[unknown_faction] unknown faction code 'XX'");
        let rendered = format(&err);
        assert!(rendered.starts_with("Error:"));
        assert!(rendered.contains("Hints:"));
    }

    #[test]
    fn format_without_hints_is_just_the_error() {
        let err = anyhow!("something unexpected");
        assert_eq!(format(&err), "Error: something unexpected");
    }
}
