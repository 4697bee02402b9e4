use cylc_forms::config::Settings;
use cylc_forms::registry::{Registry, Widget};
use cylc_forms::rules::Rule;
use std::fs;
use tempfile::TempDir;

#[test]
fn test_load_settings_and_scalars() -> anyhow::Result<()> {
    let temp_dir = TempDir::new()?;
    let root = temp_dir.path();

    fs::create_dir_all(root.join("config/scalars"))?;

    let settings_toml = r#"
[defaults]
dense = false

[resolver]
max_depth = 12

[[scalars]]
name = "FlowNumber"
widget = "number"
rules = ["integer"]
"#;
    fs::write(root.join("cylc-forms.toml"), settings_toml)?;

    let scalar_json = r#"
{
    "name": "JobID",
    "placeholder": "cycle/task/NN",
    "rules": ["no_spaces"]
}
"#;
    fs::write(root.join("config/scalars/job_id.json"), scalar_json)?;

    let scalar_yaml = r#"
name: XtriggerLabel
rules: [no_spaces]
"#;
    fs::write(root.join("config/scalars/xtrigger.yaml"), scalar_yaml)?;

    // Ignored: not JSON or YAML
    fs::write(root.join("config/scalars/README.txt"), "notes")?;

    let settings = Settings::from_root(root.to_str().unwrap())?;

    assert!(!settings.defaults.dense);
    assert!(settings.defaults.filled);
    assert_eq!(settings.resolver.max_depth, 12);
    assert_eq!(settings.scalars.len(), 3);

    let registry = Registry::from_settings(&settings)?;
    let flow = registry.lookup("FlowNumber")?;
    assert_eq!(flow.widget, Widget::Number);
    assert_eq!(flow.rules, vec![Rule::Integer]);
    assert!(!flow.props.dense);

    let job = registry.lookup("JobID")?;
    assert_eq!(job.props.placeholder.as_deref(), Some("cycle/task/NN"));
    assert!(registry.lookup("XtriggerLabel").is_ok());

    Ok(())
}

#[test]
fn test_missing_file_uses_defaults() -> anyhow::Result<()> {
    let temp_dir = TempDir::new()?;
    let settings = Settings::from_root(temp_dir.path().to_str().unwrap())?;

    assert!(settings.defaults.dense);
    assert_eq!(settings.resolver.max_depth, 20);
    assert!(settings.scalars.is_empty());
    Ok(())
}

#[test]
fn test_builtin_shadowing_rejected() -> anyhow::Result<()> {
    let temp_dir = TempDir::new()?;
    let root = temp_dir.path();

    let settings_toml = r#"
[[scalars]]
name = "CyclePoint"
"#;
    fs::write(root.join("cylc-forms.toml"), settings_toml)?;

    let err = Settings::from_root(root.to_str().unwrap()).unwrap_err();
    assert!(err.to_string().contains("built-in"));
    Ok(())
}

#[test]
fn test_unknown_rule_rejected() -> anyhow::Result<()> {
    let temp_dir = TempDir::new()?;
    let root = temp_dir.path();
    fs::create_dir_all(root.join("config/scalars"))?;
    fs::write(
        root.join("config/scalars/bad.yaml"),
        "name: Bad\nrules: [no_tabs]\n",
    )?;

    assert!(Settings::from_root(root.to_str().unwrap()).is_err());
    Ok(())
}
