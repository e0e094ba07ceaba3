use crate::env::Env;

/// Third-party API key variables and the integration each one enables.
pub const KNOWN_INTEGRATIONS: [(&str, &str); 3] = [
    ("OPENAI_API_KEY", "OpenAI"),
    ("ANTHROPIC_API_KEY", "Anthropic"),
    ("GOOGLE_API_KEY", "Google"),
];

/// Names of the integrations whose key is present. Detection only; nothing
/// else depends on the result.
pub fn detect(env: &Env) -> Vec<&'static str> {
    KNOWN_INTEGRATIONS
        .iter()
        .filter(|(key, _)| env.contains(key))
        .map(|(_, name)| *name)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detects_only_present_keys() {
        let env = Env::from_pairs([
            ("OPENAI_API_KEY", "sk-1"),
            ("ANTHROPIC_API_KEY", ""),
            ("GOOGLE_API_KEY", "g-1"),
        ]);
        assert_eq!(detect(&env), vec!["OpenAI", "Google"]);
        assert!(detect(&Env::default()).is_empty());
    }
}
