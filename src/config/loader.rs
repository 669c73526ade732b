//! Configuration loader with TOML parsing and environment variable overrides

use super::schema::LexmaskConfig;
use crate::domain::errors::LexmaskError;
use crate::domain::result::Result;
use regex::Regex;
use std::fs;
use std::path::Path;

/// Loads configuration from a TOML file
///
/// This function:
/// 1. Reads the TOML file
/// 2. Performs environment variable substitution (${VAR} syntax)
/// 3. Parses the TOML into LexmaskConfig
/// 4. Applies environment variable overrides (LEXMASK_* prefix)
/// 5. Validates the configuration
///
/// # Errors
///
/// Returns an error if:
/// - File cannot be read
/// - TOML parsing fails
/// - A referenced environment variable is not set
/// - Configuration validation fails
///
/// # Examples
///
/// ```no_run
/// use lexmask::config::loader::load_config;
///
/// let config = load_config("lexmask.toml").expect("Failed to load config");
/// ```
pub fn load_config(path: impl AsRef<Path>) -> Result<LexmaskConfig> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(LexmaskError::Configuration(format!(
            "Configuration file not found: {}",
            path.display()
        )));
    }

    let contents = fs::read_to_string(path).map_err(|e| {
        LexmaskError::Configuration(format!(
            "Failed to read configuration file {}: {}",
            path.display(),
            e
        ))
    })?;

    load_config_str(&contents)
}

/// Loads configuration from a file if it exists, otherwise from defaults
///
/// Environment overrides and validation apply in both cases.
pub fn load_config_or_default(path: impl AsRef<Path>) -> Result<LexmaskConfig> {
    let path = path.as_ref();
    if path.exists() {
        return load_config(path);
    }

    tracing::debug!(path = %path.display(), "No configuration file, using defaults");
    let mut config = LexmaskConfig::default();
    apply_env_overrides(&mut config)?;
    validate(&config)?;
    Ok(config)
}

/// Parses configuration from TOML content
pub fn load_config_str(contents: &str) -> Result<LexmaskConfig> {
    let contents = substitute_env_vars(contents)?;

    let mut config: LexmaskConfig = toml::from_str(&contents)
        .map_err(|e| LexmaskError::Configuration(format!("Failed to parse TOML: {}", e)))?;

    apply_env_overrides(&mut config)?;
    validate(&config)?;

    Ok(config)
}

fn validate(config: &LexmaskConfig) -> Result<()> {
    config.validate().map_err(|e| {
        LexmaskError::Configuration(format!("Configuration validation failed: {}", e))
    })
}

/// Substitutes environment variables in the format ${VAR_NAME}
///
/// Comment lines are copied unchanged.
///
/// # Errors
///
/// Returns an error naming every referenced variable that is not set
pub fn substitute_env_vars(input: &str) -> Result<String> {
    let re = Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)\}")
        .map_err(|e| LexmaskError::Configuration(format!("Invalid substitution pattern: {e}")))?;
    let mut result = String::with_capacity(input.len());
    let mut missing_vars: Vec<String> = Vec::new();

    for line in input.lines() {
        if line.trim_start().starts_with('#') {
            result.push_str(line);
            result.push('\n');
            continue;
        }

        let mut processed_line = line.to_string();
        for cap in re.captures_iter(line) {
            let var_name = &cap[1];
            match std::env::var(var_name) {
                Ok(value) => {
                    let placeholder = format!("${{{}}}", var_name);
                    processed_line = processed_line.replace(&placeholder, &value);
                }
                Err(_) => {
                    if !missing_vars.iter().any(|v| v == var_name) {
                        missing_vars.push(var_name.to_string());
                    }
                }
            }
        }
        result.push_str(&processed_line);
        result.push('\n');
    }

    if !missing_vars.is_empty() {
        return Err(LexmaskError::Configuration(format!(
            "Missing required environment variables: {}",
            missing_vars.join(", ")
        )));
    }

    Ok(result)
}

fn parse_override<T: std::str::FromStr>(name: &str, value: &str) -> Result<T>
where
    T::Err: std::fmt::Display,
{
    value.trim().parse().map_err(|e| {
        LexmaskError::Configuration(format!("Invalid value '{value}' for {name}: {e}"))
    })
}

/// Applies environment variable overrides using the LEXMASK_* prefix
///
/// Environment variables follow the pattern: LEXMASK_<SECTION>_<KEY>,
/// for example LEXMASK_EXTRACTION_CONFIDENCE_THRESHOLD.
pub fn apply_env_overrides(config: &mut LexmaskConfig) -> Result<()> {
    // Application overrides
    if let Ok(val) = std::env::var("LEXMASK_APPLICATION_LOG_LEVEL") {
        config.application.log_level = val;
    }

    // Extraction overrides
    if let Ok(val) = std::env::var("LEXMASK_EXTRACTION_CONFIDENCE_THRESHOLD") {
        config.extraction.confidence_threshold =
            parse_override("LEXMASK_EXTRACTION_CONFIDENCE_THRESHOLD", &val)?;
    }
    if let Ok(val) = std::env::var("LEXMASK_EXTRACTION_CONTEXT_WINDOW") {
        config.extraction.context_window =
            parse_override("LEXMASK_EXTRACTION_CONTEXT_WINDOW", &val)?;
    }
    if let Ok(val) = std::env::var("LEXMASK_EXTRACTION_MAX_TEXT_CHARS") {
        config.extraction.max_text_chars =
            Some(parse_override("LEXMASK_EXTRACTION_MAX_TEXT_CHARS", &val)?);
    }
    if let Ok(val) = std::env::var("LEXMASK_EXTRACTION_PATTERN_CATALOG") {
        config.extraction.pattern_catalog = Some(val);
    }

    // Masking overrides
    if let Ok(val) = std::env::var("LEXMASK_MASKING_MASK_TOKEN") {
        config.masking.mask_token = val;
    }
    if let Ok(val) = std::env::var("LEXMASK_MASKING_ENTITIES_TO_MASK") {
        config.masking.entities_to_mask = val
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();
    }

    // Audit overrides
    if let Ok(val) = std::env::var("LEXMASK_AUDIT_ENABLED") {
        config.audit.enabled = parse_override("LEXMASK_AUDIT_ENABLED", &val)?;
    }
    if let Ok(val) = std::env::var("LEXMASK_AUDIT_LOG_PATH") {
        config.audit.log_path = val;
    }

    // Logging overrides
    if let Ok(val) = std::env::var("LEXMASK_LOGGING_LOCAL_ENABLED") {
        config.logging.local_enabled = parse_override("LEXMASK_LOGGING_LOCAL_ENABLED", &val)?;
    }
    if let Ok(val) = std::env::var("LEXMASK_LOGGING_LOCAL_PATH") {
        config.logging.local_path = val;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_substitute_env_vars() {
        std::env::set_var("LEXMASK_LOADER_TEST_TOKEN", "[MASKED]");
        let input = "mask_token = \"${LEXMASK_LOADER_TEST_TOKEN}\"";
        let result = substitute_env_vars(input).unwrap();
        assert_eq!(result, "mask_token = \"[MASKED]\"\n");
        std::env::remove_var("LEXMASK_LOADER_TEST_TOKEN");
    }

    #[test]
    fn test_substitute_env_vars_missing() {
        std::env::remove_var("LEXMASK_LOADER_MISSING_VAR");
        let input = "mask_token = \"${LEXMASK_LOADER_MISSING_VAR}\"";
        let err = substitute_env_vars(input).unwrap_err();
        assert!(err.to_string().contains("LEXMASK_LOADER_MISSING_VAR"));
    }

    #[test]
    fn test_substitute_env_vars_skips_comments() {
        std::env::remove_var("LEXMASK_LOADER_COMMENTED_VAR");
        let input = "# mask_token = \"${LEXMASK_LOADER_COMMENTED_VAR}\"";
        assert!(substitute_env_vars(input).is_ok());
    }

    #[test]
    fn test_load_config_missing_file() {
        let result = load_config("nonexistent.toml");
        assert!(matches!(result, Err(LexmaskError::Configuration(_))));
    }

    #[test]
    fn test_load_config_valid() {
        let toml_content = r#"
[application]
log_level = "debug"

[extraction]
confidence_threshold = 0.8
max_text_chars = 512

[masking]
mask_token = "<PII>"
entities_to_mask = ["JUDGE", "LAWYER"]
"#;

        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(toml_content.as_bytes()).unwrap();
        temp_file.flush().unwrap();

        let config = load_config(temp_file.path()).unwrap();
        assert_eq!(config.application.log_level, "debug");
        assert_eq!(config.extraction.confidence_threshold, 0.8);
        assert_eq!(config.extraction.max_text_chars, Some(512));
        assert_eq!(config.masking.mask_token, "<PII>");
        assert_eq!(config.masking.entities_to_mask, vec!["JUDGE", "LAWYER"]);
    }

    #[test]
    fn test_load_config_invalid_values() {
        let result = load_config_str("[extraction]\nconfidence_threshold = 2.0\n");
        assert!(matches!(result, Err(LexmaskError::Configuration(msg)) if msg.contains("confidence_threshold")));
    }

    #[test]
    fn test_load_config_malformed_toml() {
        let result = load_config_str("[extraction\nconfidence_threshold = 0.5\n");
        assert!(matches!(result, Err(LexmaskError::Configuration(_))));
    }
}
