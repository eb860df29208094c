use super::*;

#[test]
fn severity_order_is_off_info_warn_error() {
    assert!(Severity::Off < Severity::Info);
    assert!(Severity::Info < Severity::Warn);
    assert!(Severity::Warn < Severity::Error);
    let ranks: Vec<u8> = Severity::ALL.iter().map(|s| s.rank()).collect();
    assert_eq!(ranks, vec![0, 1, 2, 3]);
}

#[test]
fn severity_parses_case_insensitively() {
    assert_eq!("ERROR".parse::<Severity>().unwrap(), Severity::Error);
    assert_eq!("warning".parse::<Severity>().unwrap(), Severity::Warn);
    assert!("fatal".parse::<Severity>().is_err());
}

#[test]
fn advisory_severities() {
    assert!(Severity::Off.is_advisory());
    assert!(Severity::Info.is_advisory());
    assert!(!Severity::Warn.is_advisory());
    assert!(!Severity::Error.is_advisory());
}

#[test]
fn preset_next_chain() {
    assert_eq!(Preset::Init.next(), Some(Preset::Dev));
    assert_eq!(Preset::Dev.next(), Some(Preset::Stable));
    assert_eq!(Preset::Stable.next(), None);
}

#[test]
fn preset_from_str_unknown_is_error() {
    let err = "strict".parse::<Preset>().unwrap_err();
    assert!(matches!(err, DoctorError::UnknownPreset(ref name) if name == "strict"));
}

#[test]
fn default_config_uses_dev_preset() {
    let config = DoctorConfig::default();
    assert_eq!(config.preset, Some(Preset::Dev));
    assert_eq!(config.effective_preset(), Preset::Dev);
    assert!(config.rules.is_empty());
    assert!(config.ignore.is_none());
}

#[test]
fn parse_full_config_from_toml() {
    let content = r#"
preset = "stable"
ignore = ["cargo/*"]

[rules]
"files/readme" = "off"
"manifest/keywords" = "error"

[options."manifest/keywords"]
min = 3
style = "kebab"
"#;
    let config: DoctorConfig = toml::from_str(content).unwrap();

    assert_eq!(config.preset, Some(Preset::Stable));
    assert_eq!(config.rules.get("files/readme"), Some(&Severity::Off));
    assert_eq!(config.rules.get("manifest/keywords"), Some(&Severity::Error));
    let options = config.rule_options("manifest/keywords");
    assert_eq!(options.min, Some(3));
    assert_eq!(options.get_str("style"), Some("kebab"));
    assert_eq!(config.ignore.as_deref(), Some(&["cargo/*".to_string()][..]));
}

#[test]
fn parsed_config_without_preset_leaves_it_unset() {
    let config: DoctorConfig = toml::from_str("[rules]\n\"files/license\" = \"warn\"\n").unwrap();
    assert_eq!(config.preset, None);
    assert_eq!(config.effective_preset(), Preset::Dev);
}

#[test]
fn rule_options_default_when_missing() {
    let config = DoctorConfig::default();
    let options = config.rule_options("manifest/keywords");
    assert_eq!(options.min_or(1), 1);
    assert_eq!(options.max_or(10), 10);
    assert!(options.get("anything").is_none());
}

#[test]
fn rule_options_string_list() {
    let options: RuleOptions = toml::from_str("files = [\"dist\", \"README.md\"]").unwrap();
    assert_eq!(
        options.get_strings("files"),
        Some(vec!["dist".to_string(), "README.md".to_string()])
    );
}

#[test]
fn ignore_matcher_matches_rule_globs() {
    let matcher = IgnoreMatcher::new(&["cargo/*".to_string(), "files/license".to_string()]).unwrap();
    assert!(matcher.is_ignored("cargo/fmt"));
    assert!(matcher.is_ignored("files/license"));
    assert!(!matcher.is_ignored("files/readme"));
}

#[test]
fn empty_ignore_matcher_ignores_nothing() {
    let matcher = IgnoreMatcher::default();
    assert!(!matcher.is_ignored("files/readme"));
}

#[test]
fn invalid_ignore_pattern_is_error() {
    let err = IgnoreMatcher::new(&["files/[".to_string()]).unwrap_err();
    assert!(matches!(err, DoctorError::InvalidPattern { .. }));
}
