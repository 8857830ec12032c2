//! KDL configuration parser
//!
//! ```kdl
//! combo "copy" "Ctrl+C"
//! combo "select-word" {
//!     key "W"
//!     modifiers "LeftCtrl" "LeftShift"
//! }
//! ```

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use keycombo::{parse_key, ComboDefinition, ComboError, Key};

use crate::error::ConfigError;
use crate::model::*;

/// Source span of a KDL node's name
fn node_span(node: &kdl::KdlNode) -> miette::SourceSpan {
    // kdl carries its own miette version, so rebuild the span from offset/len
    let span = node.name().span();
    miette::SourceSpan::from((span.offset(), span.len()))
}

/// Source span of a single KDL entry
fn entry_span(entry: &kdl::KdlEntry) -> miette::SourceSpan {
    let span = entry.span();
    miette::SourceSpan::from((span.offset(), span.len()))
}

/// Positional (unnamed) string arguments of a node, with their entries
fn string_args(node: &kdl::KdlNode) -> impl Iterator<Item = (&kdl::KdlEntry, Option<&str>)> {
    node.entries()
        .iter()
        .filter(|entry| entry.name().is_none())
        .map(|entry| (entry, entry.value().as_string()))
}

/// Parse a configuration file, expanding a leading `~` in `path`
pub fn load_config(path: &str) -> Result<ComboConfig, ConfigError> {
    let path: PathBuf = shellexpand::tilde(path).into_owned().into();
    tracing::info!("Loading combos from {}", path.display());
    parse_config(&path)
}

/// Parse a configuration file from the given path
pub fn parse_config(path: &Path) -> Result<ComboConfig, ConfigError> {
    let content = std::fs::read_to_string(path)?;
    parse_config_str(&content)
}

/// Parse configuration from a string
pub fn parse_config_str(content: &str) -> Result<ComboConfig, ConfigError> {
    let doc: kdl::KdlDocument = content.parse().map_err(|e: kdl::KdlError| {
        let span = miette::SourceSpan::from((e.span.offset(), e.span.len()));
        ConfigError::ParseError {
            src: content.to_string(),
            span,
            source: e,
        }
    })?;

    let mut config = ComboConfig::default();
    let mut seen = HashSet::new();

    for node in doc.nodes() {
        match node.name().value() {
            "combo" => {
                let binding = parse_combo(node, content)?;
                if !seen.insert(binding.name.clone()) {
                    return Err(ConfigError::DuplicateCombo {
                        name: binding.name,
                        src: content.to_string(),
                        span: node_span(node),
                    });
                }
                tracing::debug!("Parsed combo '{}': {}", binding.name, binding.definition);
                config.combos.push(binding);
            }
            name => {
                tracing::warn!("Unknown top-level node: {}", name);
            }
        }
    }

    Ok(config)
}

fn parse_combo(node: &kdl::KdlNode, source: &str) -> Result<ComboBinding, ConfigError> {
    let mut args = string_args(node);

    let name = match args.next() {
        Some((_, Some(name))) => name.to_string(),
        _ => {
            return Err(ConfigError::MissingField {
                field: "combo name (e.g., `combo \"copy\" \"Ctrl+C\"`)".to_string(),
            })
        }
    };

    let invalid = |span: miette::SourceSpan, source_err: ComboError| ConfigError::InvalidCombo {
        name: name.clone(),
        src: source.to_string(),
        span,
        source: source_err,
    };

    let inline = args.next();
    let definition = match (inline, node.children()) {
        (Some((entry, Some(chord))), None) => chord
            .parse::<ComboDefinition>()
            .map_err(|e| invalid(entry_span(entry), e))?,
        (Some((entry, None)), None) => {
            return Err(invalid(
                entry_span(entry),
                ComboError::Parse {
                    input: entry.value().to_string(),
                    reason: "expected a string such as \"Ctrl+C\"".to_string(),
                },
            ))
        }
        (None, Some(children)) => parse_combo_block(children, &name, source)?,
        (Some(_), Some(_)) => {
            return Err(ConfigError::Invalid {
                message: format!(
                    "Combo '{}' has both an inline combo string and a block. Use one or the other.",
                    name
                ),
            })
        }
        (None, None) => {
            return Err(ConfigError::MissingField {
                field: format!("key for combo '{}'", name),
            })
        }
    };

    Ok(ComboBinding { name, definition })
}

fn parse_combo_block(
    children: &kdl::KdlDocument,
    name: &str,
    source: &str,
) -> Result<ComboDefinition, ConfigError> {
    let invalid = |span: miette::SourceSpan, reason: String, input: String| {
        ConfigError::InvalidCombo {
            name: name.to_string(),
            src: source.to_string(),
            span,
            source: ComboError::Parse { input, reason },
        }
    };

    let mut key: Option<Key> = None;
    let mut modifiers: Vec<Key> = Vec::new();
    let mut modifier_spans: Vec<miette::SourceSpan> = Vec::new();
    let mut modifiers_span = None;

    for child in children.nodes() {
        match child.name().value() {
            "key" => {
                let Some((entry, value)) = string_args(child).next() else {
                    return Err(ConfigError::MissingField {
                        field: format!("key name for combo '{}'", name),
                    });
                };
                let value = value.unwrap_or_default();
                key = Some(parse_key(value).ok_or_else(|| {
                    invalid(
                        entry_span(entry),
                        format!("unknown key: '{}'", value),
                        value.to_string(),
                    )
                })?);
            }
            "modifiers" => {
                modifiers_span = Some(node_span(child));
                for (entry, value) in string_args(child) {
                    let value = value.unwrap_or_default();
                    let modifier = parse_key(value).ok_or_else(|| {
                        invalid(
                            entry_span(entry),
                            format!("unknown key: '{}'", value),
                            value.to_string(),
                        )
                    })?;
                    if modifiers.contains(&modifier) {
                        return Err(invalid(
                            entry_span(entry),
                            format!("duplicate key: '{}'", value),
                            value.to_string(),
                        ));
                    }
                    modifiers.push(modifier);
                    modifier_spans.push(entry_span(entry));
                }
            }
            other => {
                tracing::warn!("Unknown option in combo '{}': {}", name, other);
            }
        }
    }

    let key = key.ok_or_else(|| ConfigError::MissingField {
        field: format!("key for combo '{}'", name),
    })?;

    // A modifier cannot also be the terminal key
    if let Some(pos) = modifiers.iter().position(|m| *m == key) {
        let key_name = keycombo::key_name(key);
        return Err(invalid(
            modifier_spans[pos],
            format!("duplicate key: '{}'", key_name),
            key_name,
        ));
    }

    ComboDefinition::with_modifiers(key, &modifiers).map_err(|e| ConfigError::InvalidCombo {
        name: name.to_string(),
        src: source.to_string(),
        span: modifiers_span.unwrap_or_else(|| miette::SourceSpan::from((0, 0))),
        source: e,
    })
}
