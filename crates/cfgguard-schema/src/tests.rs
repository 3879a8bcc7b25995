use super::*;
use cfgguard_domain::rule::{RuleError, RuleExpr};

const SAMPLE: &str = r#"
config:
  db.env:
    type: enum
    required: true
    values: [dev, staging, prod]
  db.url:
    required: true
  log.level:
    type: string
invariants:
  - name: prod-db
    rule: 'execution.env=="prod"   ⇒ db.env == "prod"'
environments:
  prod:
    allow:
      db.env: prod
    deny:
      db.url: ["*localhost*", "*127.0.0.1*"]
      log.level: [debug]
  dev: {}
"#;

#[test]
fn parses_sample_schema() {
    let schema = parse_schema_yaml(SAMPLE).unwrap();

    assert_eq!(schema.config.len(), 3);
    let db_env = &schema.config["db.env"];
    assert_eq!(db_env.config_type, ConfigType::Enum);
    assert!(db_env.required);
    assert_eq!(db_env.values, vec!["dev", "staging", "prod"]);
    assert_eq!(schema.config["log.level"].config_type, ConfigType::String);
    assert!(!schema.config["log.level"].required);

    let inv = schema.invariant("prod-db").unwrap();
    assert!(matches!(inv.expr, RuleExpr::Implication { .. }));
    assert_eq!(inv.rule, r#"execution.env=="prod"   ⇒ db.env == "prod""#);

    let prod = schema.contract("prod").unwrap();
    assert_eq!(prod.allow["db.env"].values, vec!["prod"]);
    assert!(!prod.allow["db.env"].is_glob);
    assert!(prod.deny["db.url"].is_glob);
    assert!(!prod.deny["log.level"].is_glob);
    assert!(schema.contract("dev").unwrap().allow.is_empty());
}

#[test]
fn canonical_yaml_reloads_to_same_schema() {
    let schema = parse_schema_yaml(SAMPLE).unwrap();
    let yaml = to_yaml(&schema).unwrap();
    assert!(yaml.contains(r#"execution.env == "prod" => db.env == "prod""#));

    let reloaded = parse_schema_yaml(&yaml).unwrap();
    assert_eq!(reloaded.config, schema.config);
    assert_eq!(reloaded.environments, schema.environments);
    assert_eq!(reloaded.invariants[0].expr, schema.invariants[0].expr);
}

#[test]
fn undefined_rule_keys_name_the_invariant() {
    let yaml = r#"
config:
  other.key: {}
invariants:
  - name: broken
    rule: 'missing.key == "x"'
"#;
    let err = parse_schema_yaml(yaml).unwrap_err();
    match &err {
        SchemaError::Rule { name, source } => {
            assert_eq!(name, "broken");
            assert!(matches!(source, RuleError::UndefinedKeys { .. }));
        }
        other => panic!("unexpected error: {other}"),
    }
    assert!(err.to_string().contains("missing.key"));
}

#[test]
fn syntax_errors_are_reported() {
    let yaml = r#"
invariants:
  - name: bad
    rule: 'a == "unterminated'
"#;
    let err = parse_schema_yaml(yaml).unwrap_err();
    assert!(matches!(
        err,
        SchemaError::Rule {
            source: RuleError::UnterminatedString { .. },
            ..
        }
    ));
}

#[test]
fn invariant_names_are_validated() {
    let dup = r#"
config:
  a: {}
invariants:
  - name: same
    rule: a
  - name: same
    rule: a
"#;
    assert!(matches!(
        parse_schema_yaml(dup),
        Err(SchemaError::DuplicateInvariant { .. })
    ));

    let bad = r#"
config:
  a: {}
invariants:
  - name: "has space"
    rule: a
"#;
    assert!(matches!(
        parse_schema_yaml(bad),
        Err(SchemaError::InvalidInvariantName { .. })
    ));
}

#[test]
fn enum_without_values_is_rejected() {
    let yaml = "config:\n  log.level:\n    type: enum\n";
    assert!(matches!(
        parse_schema_yaml(yaml),
        Err(SchemaError::EmptyEnum { .. })
    ));
}

#[test]
fn keys_must_be_referencable() {
    let yaml = "config:\n  \"db..url\": {}\n";
    assert!(matches!(
        parse_schema_yaml(yaml),
        Err(SchemaError::InvalidKey { .. })
    ));
}

#[test]
fn execution_env_cannot_be_declared_as_a_key() {
    let yaml = r#"
config:
  execution.env:
    required: true
invariants:
  - name: shadow
    rule: 'execution.env == "prod"'
"#;
    let err = parse_schema_yaml(yaml).unwrap_err();
    assert!(matches!(&err, SchemaError::ReservedKey { key } if key == "execution.env"));
    assert!(err.to_string().contains("execution.env"));
}

#[test]
fn execution_prefixed_keys_are_still_allowed() {
    let yaml = "config:\n  execution.region: {}\n  execution.env.name: {}\n";
    let schema = parse_schema_yaml(yaml).unwrap();
    assert_eq!(schema.config.len(), 2);
}

#[test]
fn allow_side_keys_must_be_declared_too() {
    let yaml = r#"
config:
  db.env: {}
environments:
  staging:
    allow:
      db.region: [eu]
"#;
    assert!(matches!(
        parse_schema_yaml(yaml),
        Err(SchemaError::UnknownContractKey { environment, key })
            if environment == "staging" && key == "db.region"
    ));
}

#[test]
fn contracts_must_constrain_declared_keys() {
    let yaml = r#"
config:
  db.env: {}
environments:
  prod:
    deny:
      db.host: ["*localhost*"]
"#;
    let err = parse_schema_yaml(yaml).unwrap_err();
    assert!(err.to_string().contains("db.host"));
    assert!(err.to_string().contains("prod"));
}

#[test]
fn unknown_fields_are_rejected() {
    assert!(matches!(
        parse_schema_yaml("configs: {}\n"),
        Err(SchemaError::Yaml(_))
    ));
}

#[test]
fn load_schema_reports_missing_file() {
    let err = load_schema(Utf8Path::new("definitely/not/here.yaml")).unwrap_err();
    assert!(matches!(err, SchemaError::Io { .. }));
    assert!(err.to_string().contains("definitely/not/here.yaml"));
}
