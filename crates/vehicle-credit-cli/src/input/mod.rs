pub mod file;
pub mod stdin;

use serde::de::DeserializeOwned;

/// Document syntax accepted for requests, tables and policies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Syntax {
    Json,
    Yaml,
}

impl Syntax {
    /// JSON when the text opens an object or array, YAML otherwise.
    pub fn sniff(text: &str) -> Self {
        match text.trim_start().chars().next() {
            Some('{') | Some('[') => Syntax::Json,
            _ => Syntax::Yaml,
        }
    }
}

/// Parse `contents` into a typed request. `origin` names the source in errors.
pub fn parse_document<T: DeserializeOwned>(
    contents: &str,
    syntax: Syntax,
    origin: &str,
) -> Result<T, Box<dyn std::error::Error>> {
    let parsed = match syntax {
        Syntax::Yaml => serde_yaml::from_str(contents)
            .map_err(|e| format!("Failed to parse {origin} as YAML: {e}"))?,
        Syntax::Json => serde_json::from_str(contents)
            .map_err(|e| format!("Failed to parse {origin} as JSON: {e}"))?,
    };
    Ok(parsed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use vehicle_credit_core::PricingPolicy;

    #[test]
    fn test_sniff_syntax() {
        assert_eq!(Syntax::sniff("  {\"policy_fee\": \"1\"}"), Syntax::Json);
        assert_eq!(Syntax::sniff("[]"), Syntax::Json);
        assert_eq!(Syntax::sniff("policy_fee: \"1\""), Syntax::Yaml);
    }

    #[test]
    fn test_yaml_and_json_policies_agree() {
        let yaml: PricingPolicy = parse_document(
            "policy_fee: \"250000\"\ninterest_fallback_rate: \"0.05\"\n",
            Syntax::Yaml,
            "stdin",
        )
        .unwrap();
        let json: PricingPolicy = parse_document(
            r#"{"policy_fee": "250000", "interest_fallback_rate": "0.05"}"#,
            Syntax::Json,
            "stdin",
        )
        .unwrap();
        assert_eq!(yaml, json);
        assert_eq!(yaml.policy_fee.to_string(), "250000");
    }

    #[test]
    fn test_parse_error_names_origin() {
        let err = parse_document::<PricingPolicy>("{not json", Syntax::Json, "stdin").unwrap_err();
        assert!(err.to_string().contains("stdin"));
    }
}
