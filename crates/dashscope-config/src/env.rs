use std::sync::OnceLock;

use regex::Regex;

/// Expand `{{ env.VAR }}` placeholders in raw config text
///
/// An optional fallback is supported via `{{ env.VAR | default("value") }}`;
/// without one, an unset variable is an error. Text that does not match the
/// placeholder shape passes through unchanged.
pub fn expand_env(input: &str) -> Result<String, String> {
    static PLACEHOLDER: OnceLock<Regex> = OnceLock::new();
    let placeholder = PLACEHOLDER.get_or_init(|| {
        Regex::new(r#"\{\{\s*env\.([A-Za-z0-9_]+)\s*(?:\|\s*default\("([^"]*)"\))?\s*\}\}"#)
            .expect("placeholder pattern is valid")
    });

    let mut output = String::with_capacity(input.len());
    let mut last_end = 0;

    for captures in placeholder.captures_iter(input) {
        let whole = captures.get(0).expect("capture 0 always present");
        let name = &captures[1];
        let fallback = captures.get(2).map(|m| m.as_str());

        output.push_str(&input[last_end..whole.start()]);

        match std::env::var(name) {
            Ok(value) => output.push_str(&value),
            Err(_) => match fallback {
                Some(value) => output.push_str(value),
                None => return Err(format!("environment variable not found: `{name}`")),
            },
        }

        last_end = whole.end();
    }

    output.push_str(&input[last_end..]);
    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_text_passes_through() {
        let input = "key = \"value\"";
        assert_eq!(expand_env(input).unwrap(), input);
    }

    #[test]
    fn single_placeholder_expands() {
        temp_env::with_var("TEST_VAR", Some("hello"), || {
            let result = expand_env("key = \"{{ env.TEST_VAR }}\"").unwrap();
            assert_eq!(result, "key = \"hello\"");
        });
    }

    #[test]
    fn multiple_placeholders_expand() {
        let vars = [("FOO", Some("foo")), ("BAR", Some("bar"))];
        temp_env::with_vars(vars, || {
            let result = expand_env("a = \"{{ env.FOO }}\"\nb = \"{{ env.BAR }}\"").unwrap();
            assert_eq!(result, "a = \"foo\"\nb = \"bar\"");
        });
    }

    #[test]
    fn missing_variable_errors() {
        temp_env::with_var_unset("MISSING_VAR", || {
            let err = expand_env("key = \"{{ env.MISSING_VAR }}\"").unwrap_err();
            assert!(err.contains("MISSING_VAR"));
        });
    }

    #[test]
    fn fallback_used_when_variable_unset() {
        temp_env::with_var_unset("OPTIONAL_VAR", || {
            let result =
                expand_env("key = \"{{ env.OPTIONAL_VAR | default(\"fallback\") }}\"").unwrap();
            assert_eq!(result, "key = \"fallback\"");
        });
    }

    #[test]
    fn fallback_ignored_when_variable_set() {
        temp_env::with_var("OPTIONAL_VAR", Some("actual"), || {
            let result =
                expand_env("key = \"{{ env.OPTIONAL_VAR | default(\"fallback\") }}\"").unwrap();
            assert_eq!(result, "key = \"actual\"");
        });
    }

    #[test]
    fn unscoped_placeholder_is_left_alone() {
        let input = "key = \"{{ other.VAR }}\"";
        assert_eq!(expand_env(input).unwrap(), input);
    }
}
