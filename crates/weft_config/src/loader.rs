//! Configuration file loading and validation.

use crate::error::ConfigError;
use crate::types::GeneratorConfig;
use std::path::Path;

/// Loads and validates a job configuration from a file.
pub fn load_config(path: &Path) -> Result<GeneratorConfig, ConfigError> {
    let content = std::fs::read_to_string(path)?;
    load_config_from_str(&content)
}

/// Parses and validates a job configuration from a string.
///
/// Useful for testing without filesystem dependencies.
pub fn load_config_from_str(content: &str) -> Result<GeneratorConfig, ConfigError> {
    let config: GeneratorConfig =
        toml::from_str(content).map_err(|e| ConfigError::ParseError(e.to_string()))?;
    validate_config(&config)?;
    Ok(config)
}

/// Validates that required fields are present and entries are consistent.
fn validate_config(config: &GeneratorConfig) -> Result<(), ConfigError> {
    if config.interconnect.design.is_empty() {
        return Err(ConfigError::MissingField("interconnect.design".to_string()));
    }
    if config.interconnect.component.is_empty() {
        return Err(ConfigError::MissingField(
            "interconnect.component".to_string(),
        ));
    }
    if config.interconnect.bus.is_empty() {
        return Err(ConfigError::MissingField("interconnect.bus".to_string()));
    }
    if config.widths.address == 0 || config.widths.data == 0 {
        return Err(ConfigError::ValidationError(
            "address and data widths must be nonzero".to_string(),
        ));
    }
    check_unique_indices(
        config.targets.iter().map(|t| t.index),
        config.targets.len(),
        "targets",
    )?;
    check_unique_indices(
        config.initiators.iter().map(|i| i.index),
        config.initiators.len(),
        "initiators",
    )?;
    for target in &config.targets {
        if target.name.is_empty() {
            return Err(ConfigError::MissingField("targets.name".to_string()));
        }
    }
    for initiator in &config.initiators {
        if initiator.name.is_empty() {
            return Err(ConfigError::MissingField("initiators.name".to_string()));
        }
    }
    Ok(())
}

/// Checks that explicit indices, when given, are given for every entry
/// and are unique.
fn check_unique_indices(
    indices: impl Iterator<Item = Option<u32>>,
    entry_count: usize,
    list: &str,
) -> Result<(), ConfigError> {
    let explicit: Vec<u32> = indices.flatten().collect();
    if explicit.is_empty() {
        return Ok(());
    }
    if explicit.len() != entry_count {
        return Err(ConfigError::ValidationError(format!(
            "either all or none of the {list} entries may carry an explicit index"
        )));
    }
    let mut seen = std::collections::BTreeSet::new();
    for index in explicit {
        if !seen.insert(index) {
            return Err(ConfigError::ValidationError(format!(
                "duplicate index {index} in {list}"
            )));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const MINIMAL: &str = r#"
[interconnect]
design = "tut.fi:flat:soc:1.0"
component = "tut.fi:flat:interconnect:1.0"
bus = "pulp:protocol:axi4:1.0"
protocol = "axi4"
"#;

    #[test]
    fn parse_minimal_config() {
        let config = load_config_from_str(MINIMAL).unwrap();
        assert_eq!(config.interconnect.design, "tut.fi:flat:soc:1.0");
        assert_eq!(
            config.interconnect.protocol,
            crate::types::ProtocolFamily::Axi4
        );
    }

    #[test]
    fn missing_design_errors() {
        let toml = r#"
[interconnect]
design = ""
component = "tut.fi:flat:interconnect:1.0"
bus = "pulp:protocol:axi4:1.0"
protocol = "axi4"
"#;
        let err = load_config_from_str(toml).unwrap_err();
        assert!(matches!(err, ConfigError::MissingField(_)));
    }

    #[test]
    fn zero_width_errors() {
        let toml = r#"
[interconnect]
design = "tut.fi:flat:soc:1.0"
component = "tut.fi:flat:interconnect:1.0"
bus = "pulp:protocol:axi4:1.0"
protocol = "axi4"

[widths]
address = 0
"#;
        let err = load_config_from_str(toml).unwrap_err();
        assert!(matches!(err, ConfigError::ValidationError(_)));
    }

    #[test]
    fn duplicate_index_errors() {
        let toml = r#"
[interconnect]
design = "tut.fi:flat:soc:1.0"
component = "tut.fi:flat:interconnect:1.0"
bus = "pulp:protocol:axi4:1.0"
protocol = "axi4"

[[targets]]
name = "a"
index = 0

[[targets]]
name = "b"
index = 0
"#;
        let err = load_config_from_str(toml).unwrap_err();
        assert!(matches!(err, ConfigError::ValidationError(_)));
    }

    #[test]
    fn partial_indices_error() {
        let toml = r#"
[interconnect]
design = "tut.fi:flat:soc:1.0"
component = "tut.fi:flat:interconnect:1.0"
bus = "pulp:protocol:axi4:1.0"
protocol = "axi4"

[[initiators]]
name = "a"
index = 0

[[initiators]]
name = "b"
"#;
        let err = load_config_from_str(toml).unwrap_err();
        assert!(matches!(err, ConfigError::ValidationError(_)));
    }

    #[test]
    fn invalid_toml_errors() {
        let err = load_config_from_str("this is not valid toml {{{}}}").unwrap_err();
        assert!(matches!(err, ConfigError::ParseError(_)));
    }

    #[test]
    fn io_error_from_nonexistent_file() {
        let err = load_config(Path::new("/nonexistent/weft.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::IoError(_)));
    }
}
