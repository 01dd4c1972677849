//! `${dotted.key}` placeholder expansion
//!
//! Scaffolded files may reference project settings, e.g.
//! `base_url: ${project.local.uri}`. Placeholders naming a scalar setting
//! are replaced; anything else is left untouched.

use crate::config::ResolvedConfig;

/// Replace placeholders in `text` with values from `config`
pub fn expand(text: &str, config: &ResolvedConfig) -> String {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;

    while let Some(start) = rest.find("${") {
        out.push_str(&rest[..start]);
        let after = &rest[start + 2..];
        let Some(end) = after.find('}') else {
            out.push_str(&rest[start..]);
            return out;
        };

        let key = &after[..end];
        match lookup(key, config) {
            Some(value) => out.push_str(&value),
            None => out.push_str(&rest[start..start + 2 + end + 1]),
        }
        rest = &after[end + 1..];
    }

    out.push_str(rest);
    out
}

fn lookup(key: &str, config: &ResolvedConfig) -> Option<String> {
    let valid = !key.is_empty()
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-'));
    if !valid {
        return None;
    }
    config.get_str(key)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> ResolvedConfig {
        ResolvedConfig::from_yaml(
            "project:\n  local:\n    uri: http://site.test\n  machine_name: site\ntests:\n  run-server: true\n",
        )
        .unwrap()
    }

    #[test]
    fn test_replaces_known_keys() {
        let out = expand("base_url: ${project.local.uri}\nname: ${project.machine_name}\n", &config());
        assert_eq!(out, "base_url: http://site.test\nname: site\n");
    }

    #[test]
    fn test_scalars_of_any_type() {
        assert_eq!(expand("server: ${tests.run-server}", &config()), "server: true");
    }

    #[test]
    fn test_unknown_and_non_scalar_keys_are_kept() {
        let text = "a: ${nope.nothing}\nb: ${project.local}\nc: ${}\n";
        assert_eq!(expand(text, &config()), text);
    }

    #[test]
    fn test_unterminated_placeholder_is_kept() {
        assert_eq!(expand("x: ${project.local.uri", &config()), "x: ${project.local.uri");
    }
}
