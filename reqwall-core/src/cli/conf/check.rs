use crate::conf::types::Origin;
use crate::conf::{load_config, load_rules, validate_config};
use std::path::PathBuf;

pub fn check(path: PathBuf, plain: bool, json: bool) -> anyhow::Result<()> {
    //--------------------------------------------------------------------------
    // Hard fail: the config itself must parse
    //--------------------------------------------------------------------------
    let cfg = match load_config(&path) {
        Ok(cfg) => cfg,
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(1);
        }
    };

    //--------------------------------------------------------------------------
    // A broken rule file is reported alongside the other issues
    //--------------------------------------------------------------------------
    let rules_path = cfg.rules_path();
    let (rules, rules_error) = match load_rules(&rules_path) {
        Ok(rules) => (rules, None),
        Err(err) => (Default::default(), Some(err)),
    };

    let mut report = validate_config(&cfg, &rules);
    if let Some(err) = rules_error {
        let origin = Origin::new(&rules_path, "rules", None);
        report.rules_file_unreadable(&err.to_string(), &origin);
    }

    if json {
        report.render_json()?;
    } else if plain {
        report.render_plain();
    } else {
        report.render_pretty();
    }

    if report.has_errors() {
        std::process::exit(1);
    }

    if !json {
        println!("✔ Config loaded successfully");
        println!("✔ {} rules", rules.len());
        println!(
            "✔ {} drop rules",
            rules.rules().iter().filter(|r| r.drops()).count()
        );
        println!("✔ queue {}", cfg.queue.num);
    }

    Ok(())
}

