// Copyright (c) 2024-2026 Martin Schröder <info@swedishembedded.com>
//
// SPDX-License-Identifier: MIT
//! Layered configuration loading.
//!
//! Configuration is assembled from a fixed list of locations, lowest
//! priority first, each parsed as TOML and overlaid onto the result so far.
//! A missing file in the standard list is simply skipped; a path given
//! explicitly (the `--config` flag) must exist.

use std::path::{Path, PathBuf};

use anyhow::{bail, Context};
use tracing::debug;

use crate::Config;

/// One candidate configuration file.
struct Layer {
    path: PathBuf,
    /// Where this layer came from, for log lines and error messages.
    origin: &'static str,
    /// Required layers fail the load when the file is absent.
    required: bool,
}

impl Layer {
    fn optional(path: PathBuf, origin: &'static str) -> Self {
        Layer { path, origin, required: false }
    }

    /// Parse this layer, or `None` when an optional file is absent.
    fn parse(&self) -> anyhow::Result<Option<toml::Value>> {
        if !self.path.is_file() {
            if self.required {
                bail!("config file not found: {}", self.path.display());
            }
            return Ok(None);
        }
        let text = std::fs::read_to_string(&self.path)
            .with_context(|| format!("reading {}", self.path.display()))?;
        let doc: toml::Value = toml::from_str(&text)
            .with_context(|| format!("parsing {}", self.path.display()))?;
        debug!(origin = self.origin, path = %self.path.display(), "applying config layer");
        Ok(Some(doc))
    }
}

/// The search list, lowest priority first.  `extra` (the `--config` flag)
/// always lands last so it wins every conflict.
fn layers(extra: Option<&Path>) -> Vec<Layer> {
    let mut layers = vec![Layer::optional(
        PathBuf::from("/etc/axiom/config.toml"),
        "system",
    )];
    if let Some(home) = dirs::home_dir() {
        layers.push(Layer::optional(home.join(".config/axiom/config.toml"), "home"));
    }
    if let Some(cfg) = dirs::config_dir() {
        layers.push(Layer::optional(cfg.join("axiom/config.toml"), "xdg"));
    }
    layers.push(Layer::optional(PathBuf::from(".axiom/config.toml"), "workspace"));
    layers.push(Layer::optional(PathBuf::from("axiom.toml"), "workspace"));
    if let Some(p) = extra {
        layers.push(Layer { path: p.to_path_buf(), origin: "flag", required: true });
    }
    layers
}

/// Load configuration from every discovered layer.  With no files on disk
/// the compiled-in defaults are returned unchanged.
pub fn load(extra: Option<&Path>) -> anyhow::Result<Config> {
    let mut merged: Option<toml::Value> = None;
    for layer in layers(extra) {
        let Some(doc) = layer.parse()? else { continue };
        match merged.as_mut() {
            Some(acc) => overlay(acc, doc),
            None => merged = Some(doc),
        }
    }
    match merged {
        Some(value) => value.try_into().context("invalid configuration"),
        None => Ok(Config::default()),
    }
}

/// Lay `over` on top of `base`: tables merge key by key, anything else is
/// replaced outright.
fn overlay(base: &mut toml::Value, over: toml::Value) {
    match over {
        toml::Value::Table(entries) => {
            if let toml::Value::Table(target) = base {
                for (key, value) in entries {
                    match target.get_mut(&key) {
                        Some(slot) => overlay(slot, value),
                        None => {
                            target.insert(key, value);
                        }
                    }
                }
            } else {
                *base = toml::Value::Table(entries);
            }
        }
        other => *base = other,
    }
}

// ─── Unit tests ──────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn doc(s: &str) -> toml::Value {
        toml::from_str(s).unwrap()
    }

    // ── overlay ───────────────────────────────────────────────────────────────

    #[test]
    fn overlay_replaces_conflicting_scalars() {
        let mut base = doc(r#"timeout_secs = 120"#);
        overlay(&mut base, doc(r#"timeout_secs = 5"#));
        assert_eq!(base["timeout_secs"].as_integer(), Some(5));
    }

    #[test]
    fn overlay_keeps_keys_the_upper_layer_does_not_mention() {
        let mut base = doc("[server]\nbase_url = \"http://localhost:8000\"\ntimeout_secs = 120");
        overlay(&mut base, doc("[server]\ntimeout_secs = 5"));
        assert_eq!(base["server"]["base_url"].as_str(), Some("http://localhost:8000"));
        assert_eq!(base["server"]["timeout_secs"].as_integer(), Some(5));
    }

    #[test]
    fn later_layer_wins_across_a_chain_of_overlays() {
        let mut base = doc("[tui]\nascii = false");
        overlay(&mut base, doc("[session]\ntopic = \"geometry\""));
        overlay(&mut base, doc("[tui]\nascii = true"));
        assert_eq!(base["tui"]["ascii"].as_bool(), Some(true));
        assert_eq!(base["session"]["topic"].as_str(), Some("geometry"));
    }

    #[test]
    fn overlay_replaces_a_scalar_with_a_table() {
        let mut base = doc(r#"server = "oops""#);
        overlay(&mut base, doc("[server]\ntimeout_secs = 5"));
        assert_eq!(base["server"]["timeout_secs"].as_integer(), Some(5));
    }

    // ── load ──────────────────────────────────────────────────────────────────

    #[test]
    fn missing_explicit_path_is_an_error() {
        let result = load(Some(Path::new("/tmp/axiom_nonexistent_config_xyz.toml")));
        assert!(result.is_err());
    }

    #[test]
    fn no_files_found_yields_compiled_defaults() {
        let cfg = load(None).unwrap();
        assert_eq!(cfg.session.topic, "algebra");
    }

    #[test]
    fn explicit_file_overrides_defaults() {
        use std::io::Write;
        let mut f = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            f,
            "[server]\nbase_url = \"https://tutor.example.com\"\n\n[session]\ntopic = \"geometry\""
        )
        .unwrap();
        let cfg = load(Some(f.path())).unwrap();
        assert_eq!(cfg.server.base_url, "https://tutor.example.com");
        assert_eq!(cfg.session.topic, "geometry");
        // untouched sections keep defaults
        assert_eq!(cfg.session.difficulty, "easy");
    }

    #[test]
    fn unparseable_explicit_file_is_an_error() {
        use std::io::Write;
        let mut f = tempfile::NamedTempFile::new().unwrap();
        writeln!(f, "this is not toml [[[").unwrap();
        assert!(load(Some(f.path())).is_err());
    }
}
