//! Developer tasks (schema generation, explain coverage, demo validation).
//!
//! Keeping this separate avoids bloating the end-user CLI.

use anyhow::{Context, bail};
use schemars::schema_for;
use std::fs;
use std::path::PathBuf;

/// Get the project root (parent of xtask directory).
fn project_root() -> anyhow::Result<PathBuf> {
    let manifest_dir = match std::env::var("CARGO_MANIFEST_DIR") {
        Ok(dir) => PathBuf::from(dir),
        Err(_) => std::env::current_dir().context("determine current directory")?,
    };

    // If we're in the xtask directory, go up one level
    if manifest_dir.ends_with("xtask")
        && let Some(parent) = manifest_dir.parent()
    {
        return Ok(parent.to_path_buf());
    }
    Ok(manifest_dir)
}

/// Get the schemas directory path.
fn schemas_dir() -> anyhow::Result<PathBuf> {
    Ok(project_root()?.join("schemas"))
}

/// Schema definition with its target filename.
struct SchemaSpec {
    filename: &'static str,
    generate: fn() -> schemars::Schema,
}

/// Generate the cfgguard report schema.
fn generate_report_schema() -> schemars::Schema {
    schema_for!(cfgguard_types::CfgguardReport)
}

/// Generate the cfgguard.toml schema.
fn generate_config_schema() -> schemars::Schema {
    schema_for!(cfgguard_settings::CfgguardConfigV1)
}

/// List of schemas to generate.
fn schema_specs() -> Vec<SchemaSpec> {
    vec![
        SchemaSpec {
            filename: "cfgguard.report.v1.json",
            generate: generate_report_schema,
        },
        SchemaSpec {
            filename: "cfgguard.config.v1.json",
            generate: generate_config_schema,
        },
    ]
}

/// Serialize a schema to pretty-printed JSON with trailing newline.
fn serialize_schema(schema: &schemars::Schema) -> anyhow::Result<String> {
    let mut json = serde_json::to_string_pretty(schema).context("Failed to serialize schema")?;
    json.push('\n');
    Ok(json)
}

/// Emit schemas to the schemas/ directory.
fn emit_schemas() -> anyhow::Result<()> {
    let dir = schemas_dir()?;
    fs::create_dir_all(&dir).context("Failed to create schemas directory")?;

    for spec in schema_specs() {
        let json = serialize_schema(&(spec.generate)())?;
        let path = dir.join(spec.filename);

        fs::write(&path, &json)
            .with_context(|| format!("Failed to write schema to {}", path.display()))?;

        println!("Wrote {}", path.display());
    }

    println!("\nSchemas emitted successfully.");
    Ok(())
}

/// Validate that schemas in the repo match what would be generated.
fn validate_schemas() -> anyhow::Result<()> {
    let dir = schemas_dir()?;
    let mut missing = Vec::new();
    let mut mismatched = Vec::new();

    for spec in schema_specs() {
        let path = dir.join(spec.filename);

        if !path.exists() {
            missing.push(spec.filename);
            continue;
        }

        let expected = serialize_schema(&(spec.generate)())?;
        let actual = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read {}", path.display()))?;

        if expected != actual {
            mismatched.push(spec.filename);
        }
    }

    if missing.is_empty() && mismatched.is_empty() {
        println!("All schemas are up to date.");
        return Ok(());
    }

    for name in &missing {
        eprintln!("  missing: {name}");
    }
    for name in &mismatched {
        eprintln!("  out of date: {name}");
    }
    bail!("Schemas are out of date. Run `cargo xtask emit-schemas` to regenerate.")
}

/// Every check id and code must have a complete explanation.
fn explain_coverage() -> anyhow::Result<()> {
    let check_ids = cfgguard_types::explain::all_check_ids();
    let codes = cfgguard_types::explain::all_codes();
    let mut errors = Vec::new();

    for id in check_ids.iter().chain(codes) {
        match cfgguard_types::lookup_explanation(id) {
            Some(exp) => {
                if exp.title.is_empty() {
                    errors.push(format!("'{id}' has empty title"));
                }
                if exp.description.is_empty() {
                    errors.push(format!("'{id}' has empty description"));
                }
                if exp.remediation.is_empty() {
                    errors.push(format!("'{id}' has empty remediation"));
                }
            }
            None => errors.push(format!("'{id}' has no explanation")),
        }
    }

    if errors.is_empty() {
        println!("✓ {} check IDs have explanations", check_ids.len());
        println!("✓ {} codes have explanations", codes.len());
        Ok(())
    } else {
        for error in &errors {
            eprintln!("  - {error}");
        }
        bail!(
            "Explain coverage validation failed with {} errors",
            errors.len()
        )
    }
}

/// The demo schema and tool config must always load.
fn check_demos() -> anyhow::Result<()> {
    let demos = project_root()?.join("demos");

    let config_path = demos.join("cfgguard.toml");
    let config_text = fs::read_to_string(&config_path)
        .with_context(|| format!("Failed to read {}", config_path.display()))?;
    let config = cfgguard_settings::parse_config_toml(&config_text)
        .with_context(|| format!("Invalid demo config {}", config_path.display()))?;
    cfgguard_settings::resolve_config(config, cfgguard_settings::Overrides::default())
        .with_context(|| format!("Demo config {} does not resolve", config_path.display()))?;
    println!("✓ {} resolves", config_path.display());

    let path = demos.join("cfgguard.yaml");
    let text = fs::read_to_string(&path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let schema = cfgguard_schema::parse_schema_yaml(&text)
        .with_context(|| format!("Invalid demo schema {}", path.display()))?;
    println!(
        "✓ {} loads: {} keys, {} invariants, {} environments",
        path.display(),
        schema.config.len(),
        schema.invariants.len(),
        schema.environments.len()
    );
    Ok(())
}

fn print_help() {
    eprintln!("xtask commands:");
    eprintln!("  help              Show this message");
    eprintln!("  emit-schemas      Generate JSON schemas from Rust types to schemas/");
    eprintln!("  validate-schemas  Check if schemas/ matches generated output (for CI)");
    eprintln!("  print-schema-ids  Print known schema IDs");
    eprintln!("  explain-coverage  Validate all check IDs and codes have explanations");
    eprintln!("  check-demos       Validate the demo schema and config under demos/");
}

fn main() -> anyhow::Result<()> {
    let args: Vec<String> = std::env::args().collect();
    let cmd = args.get(1).map(|s| s.as_str()).unwrap_or("help");

    match cmd {
        "help" | "--help" | "-h" => {
            print_help();
            Ok(())
        }
        "emit-schemas" => emit_schemas(),
        "validate-schemas" => validate_schemas(),
        "explain-coverage" => explain_coverage(),
        "check-demos" => check_demos(),
        "print-schema-ids" => {
            for spec in schema_specs() {
                println!("{}", spec.filename.trim_end_matches(".json"));
            }
            Ok(())
        }
        other => bail!("unknown xtask command: {other}\n\nRun `cargo xtask help` for usage."),
    }
    .context("xtask failed")
}
