use anyhow::{bail, Result};
use std::collections::HashMap;

/// A piece of a `{{var}}` template.
#[derive(Debug, PartialEq)]
enum Segment<'a> {
    Text(&'a str),
    /// `name` is trimmed; `raw` is the slot exactly as written, braces included.
    Var { name: &'a str, raw: &'a str },
    /// A trailing `{{` with no closing `}}`.
    Unclosed(&'a str),
}

fn segments(template: &str) -> Vec<Segment<'_>> {
    let mut out = Vec::new();
    let mut rest = template;

    while let Some(open) = rest.find("{{") {
        if open > 0 {
            out.push(Segment::Text(&rest[..open]));
        }
        let after_open = &rest[open + 2..];
        match after_open.find("}}") {
            Some(close) => {
                out.push(Segment::Var {
                    name: after_open[..close].trim(),
                    raw: &rest[open..open + 2 + close + 2],
                });
                rest = &after_open[close + 2..];
            }
            None => {
                out.push(Segment::Unclosed(&rest[open..]));
                return out;
            }
        }
    }

    if !rest.is_empty() {
        out.push(Segment::Text(rest));
    }
    out
}

/// Fill `{{var}}` slots from `vars`.
///
/// Values are inserted verbatim and never rescanned, so a value containing
/// `{{...}}` stays literal. Unknown slots and a malformed trailing `{{` are
/// emitted unchanged.
pub fn resolve_runtime_vars(template: &str, vars: &HashMap<&str, &str>) -> String {
    let extra: usize = vars.values().map(|v| v.len()).sum();
    let mut result = String::with_capacity(template.len() + extra);

    for segment in segments(template) {
        match segment {
            Segment::Text(text) | Segment::Unclosed(text) => result.push_str(text),
            Segment::Var { name, raw } => match vars.get(name) {
                Some(value) => result.push_str(value),
                None => result.push_str(raw),
            },
        }
    }

    result
}

/// Reject unclosed slots and any slot not in `allowed`.
pub fn validate_template(template: &str, allowed: &[&str]) -> Result<()> {
    for segment in segments(template) {
        match segment {
            Segment::Unclosed(text) => {
                bail!("Unclosed template variable: {}", text.lines().next().unwrap_or(text))
            }
            Segment::Var { name, .. } if !allowed.contains(&name) => {
                bail!(
                    "Unknown template variable: {{{{{}}}}}. Allowed runtime vars: {:?}",
                    name,
                    allowed
                );
            }
            _ => {}
        }
    }
    Ok(())
}

/// Names of all well-formed slots, in order of appearance.
pub fn template_vars(template: &str) -> Vec<&str> {
    segments(template)
        .into_iter()
        .filter_map(|s| match s {
            Segment::Var { name, .. } => Some(name),
            _ => None,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_runtime_vars() {
        let result = resolve_runtime_vars(
            "문맥: {{context}}\n질문: {{ question }}",
            &HashMap::from([("context", "FastFix 300"), ("question", "보수제?")]),
        );
        assert_eq!(result, "문맥: FastFix 300\n질문: 보수제?");
    }

    #[test]
    fn leaves_unknown_vars_intact() {
        let result = resolve_runtime_vars(
            "{{context}} {{ today }}",
            &HashMap::from([("context", "ctx")]),
        );
        assert_eq!(result, "ctx {{ today }}");
    }

    #[test]
    fn inserted_values_are_not_rescanned() {
        let result = resolve_runtime_vars(
            "{{context}}|{{question}}",
            &HashMap::from([("context", "{{question}}"), ("question", "q")]),
        );
        assert_eq!(result, "{{question}}|q");
    }

    #[test]
    fn single_braces_pass_through() {
        let template = r#"{"thought": "..."} {{question}}"#;
        let result = resolve_runtime_vars(template, &HashMap::from([("question", "q")]));
        assert_eq!(result, r#"{"thought": "..."} q"#);
    }

    #[test]
    fn unclosed_slot_is_emitted_as_is() {
        let result = resolve_runtime_vars("a {{question", &HashMap::from([("question", "q")]));
        assert_eq!(result, "a {{question");
    }

    #[test]
    fn validates_template() {
        let allowed = ["context", "question"];
        assert!(validate_template("{{context}} {{question}}", &allowed).is_ok());
        assert!(validate_template("{{taxonomy}}", &allowed).is_err());
        assert!(validate_template("{{context", &allowed).is_err());
    }

    #[test]
    fn lists_template_vars() {
        assert_eq!(
            template_vars("{{context}} and {{ question }} {{context}}"),
            vec!["context", "question", "context"]
        );
    }
}
