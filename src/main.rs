use anyhow::Context;
use clap::Parser;
use cylc_forms::cli::{Cli, Command};
use cylc_forms::config::Settings;
use cylc_forms::filter::{filter_tasks, TaskFilter, TaskRow};
use cylc_forms::mutation::MutationForm;
use cylc_forms::registry::{coerce_number, Registry, Widget};
use cylc_forms::resolver::Resolver;
use cylc_forms::rules;
use cylc_forms::schema::SchemaIndex;
use serde_json::{json, Value};
use std::path::Path;
use tracing::info;

fn main() -> anyhow::Result<()> {
    // Logs go to stderr, results to stdout
    tracing_subscriber::fmt().with_writer(std::io::stderr).init();

    let cli = Cli::parse();
    let settings = Settings::new_with_cli(&cli)?;
    let registry = Registry::from_settings(&settings)?;

    match &cli.command {
        Command::Mutations { schema } => {
            let schema = load_schema(schema)?;
            for mutation in schema.mutations()? {
                let args: Vec<String> = mutation
                    .args
                    .iter()
                    .map(|a| format!("{}: {}", a.name, a.type_ref))
                    .collect();
                println!("{}({})", mutation.name, args.join(", "));
            }
        }
        Command::Resolve { schema, mutation } => {
            let schema = load_schema(schema)?;
            let resolver = Resolver::from_settings(&registry, &schema, &settings);
            let form = MutationForm::new(&schema, &resolver, mutation)?;
            info!("Resolved mutation {}", form.name());

            let output = json!({
                "form": form.form().element(),
                "variables": form.variables(),
                "valid": form.is_valid(),
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        Command::Validate { type_name, value } => {
            let descriptor = registry.lookup(type_name)?;
            let value = match descriptor.widget {
                Widget::Number => coerce_number(value),
                Widget::Switch => Value::Bool(value.parse().context("expected true or false")?),
                _ => Value::String(value.clone()),
            };

            let failures = rules::validate(&descriptor.rules, &value);
            println!("{}", serde_json::to_string_pretty(&failures)?);
            if !failures.is_empty() {
                anyhow::bail!("{} failed {} rule(s)", type_name, failures.len());
            }
        }
        Command::Filter {
            tasks,
            name,
            states,
        } => {
            let rows = load_tasks(tasks)?;
            let filter = TaskFilter {
                name: name.clone(),
                states: states.clone(),
            };
            let kept = filter_tasks(&rows, &filter);
            println!("{}", serde_json::to_string_pretty(&kept)?);
        }
        Command::Config => {
            print!("{}", settings.to_toml()?);
        }
    }

    Ok(())
}

fn load_schema(path: &Path) -> anyhow::Result<SchemaIndex> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read schema {}", path.display()))?;
    Ok(SchemaIndex::from_introspection(&content)?)
}

fn load_tasks(path: &Path) -> anyhow::Result<Vec<TaskRow>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read tasks {}", path.display()))?;
    let rows = match path.extension().and_then(|e| e.to_str()) {
        Some("yaml" | "yml") => serde_yaml::from_str(&content)?,
        _ => serde_json::from_str(&content)?,
    };
    Ok(rows)
}
