use crate::conf::{RuntimeConfig, load_config, load_rules};
use crate::rules::Rule;
use anyhow::Context;
use serde::Serialize;
use std::path::PathBuf;

#[derive(Serialize)]
struct ResolvedConfig<'a> {
    config: &'a RuntimeConfig,
    rules_path: PathBuf,
    rules: &'a [Rule],
}

pub fn dump(path: PathBuf, json: bool, yaml: bool) -> anyhow::Result<()> {
    let cfg = load_config(&path)?;
    let rules_path = cfg.rules_path();
    let rules = load_rules(&rules_path)
        .with_context(|| format!("failed to load rules referenced by {}", cfg.source.display()))?;

    let resolved = ResolvedConfig {
        config: &cfg,
        rules_path,
        rules: rules.rules(),
    };

    if yaml {
        dump_yaml(&resolved)?;
    } else if json || !yaml {
        // default: json
        dump_json(&resolved)?;
    }

    Ok(())
}

fn dump_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    let s = serde_json::to_string_pretty(value)?;
    println!("{s}");
    Ok(())
}

fn dump_yaml<T: Serialize>(value: &T) -> anyhow::Result<()> {
    let s = serde_yaml::to_string(value)?;
    println!("{s}");
    Ok(())
}
