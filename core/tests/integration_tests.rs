use std::collections::HashMap;
use std::num::IntErrorKind;
use std::time::Duration;

use flagbind_core::*;

#[derive(Debug, Default, Clone, PartialEq, Bindable)]
struct Nested {
    #[flag(long = "ConnTimeout", short = "c")]
    conn_timeout: Option<Duration>,
}

#[derive(Debug, Default, Clone, PartialEq, Bindable)]
struct DbConfig {
    #[flag(long = "host", short = "h")]
    host: Option<String>,
    user: Option<String>,
    password: Option<String>,
    nested: Nested,
    #[flag(long = "nestednamed", short = "n")]
    nested_named: Nested,
}

#[derive(Debug, Default, Clone, PartialEq, Bindable)]
struct AppConfig {
    #[flag(long = "name", short = "n")]
    name: Option<String>,
    #[flag(long = "thread-count", short = "c")]
    thread_count: Option<i32>,
    #[flag(long = "databases", short = "d")]
    databases: Vec<DbConfig>,
    enabled: bool,
    #[flag(short = "e")]
    bool_e: bool,
    #[flag(short = "f")]
    bool_f: bool,
    #[flag(short = "g")]
    bool_g: bool,
    #[flag(short = "h")]
    bool_h: bool,
}

fn bind(args: &[&str]) -> std::result::Result<AppConfig, BindError> {
    let groups = split(args);
    let mut config = AppConfig::default();
    Flags::new(&groups[0]).unmarshal(&mut config)?;
    Ok(config)
}

fn timeout(secs: u64) -> Nested {
    Nested {
        conn_timeout: Some(Duration::from_secs(secs)),
    }
}

// ============================================================================
// Basic binding
// ============================================================================

#[test]
fn test_empty_source_changes_nothing() {
    assert_eq!(bind(&[]).unwrap(), AppConfig::default());
}

#[test]
fn test_short_names_are_fallbacks() {
    let config = bind(&["-n=chris", "-c=5"]).unwrap();
    assert_eq!(config.name.as_deref(), Some("chris"));
    assert_eq!(config.thread_count, Some(5));
}

#[test]
fn test_long_name_beats_short_regardless_of_order() {
    let config = bind(&["-n=short", "--name=long"]).unwrap();
    assert_eq!(config.name.as_deref(), Some("long"));
}

#[test]
fn test_identifier_is_long_name_when_undeclared() {
    let config = bind(&["--enabled", "--databases[0].user=admin"]).unwrap();
    assert!(config.enabled);
    assert_eq!(config.databases[0].user.as_deref(), Some("admin"));
}

#[test]
fn test_first_duplicate_wins() {
    let config = bind(&["--name=first", "--name=second"]).unwrap();
    assert_eq!(config.name.as_deref(), Some("first"));
}

#[test]
fn test_bundled_short_booleans() {
    let config = bind(&["-efh"]).unwrap();
    assert!(config.bool_e);
    assert!(config.bool_f);
    assert!(!config.bool_g);
    assert!(config.bool_h);
}

#[test]
fn test_explicit_false_boolean() {
    let groups = split(["-g=false"]);
    let mut config = AppConfig {
        bool_g: true,
        ..AppConfig::default()
    };
    Flags::new(&groups[0]).unmarshal(&mut config).unwrap();
    assert!(!config.bool_g);
}

// ============================================================================
// Slices and nesting
// ============================================================================

#[test]
fn test_slice_length_from_highest_index() {
    let config = bind(&["--databases[2].host=c"]).unwrap();
    assert_eq!(config.databases.len(), 3);
    assert_eq!(config.databases[0], DbConfig::default());
    assert_eq!(config.databases[2].host.as_deref(), Some("c"));
}

#[test]
fn test_slice_order_independence() {
    let forward = bind(&["--databases[0].host=a", "--databases[1].host=b"]).unwrap();
    let backward = bind(&["--databases[1].host=b", "--databases[0].host=a"]).unwrap();
    assert_eq!(forward, backward);
    assert_eq!(forward.databases[1].host.as_deref(), Some("b"));
}

#[test]
fn test_all_short_lineage_matches_all_long() {
    let short = bind(&["-d[3].n.c=40s"]).unwrap();
    let long = bind(&["--databases[3].nestednamed.ConnTimeout=40s"]).unwrap();

    assert_eq!(short, long);
    assert_eq!(short.databases.len(), 4);
    assert_eq!(short.databases[3].nested_named, timeout(40));
    assert_eq!(short.databases[3].nested, Nested::default());
}

#[test]
fn test_cross_lineage_keys_leave_fields_unset() {
    for key in [
        "-d[0].nestednamed.c=40s",
        "--databases[0].n.ConnTimeout=40s",
        "--databases[0].n.c=40s",
        "-d[0].n.ConnTimeout=40s",
    ] {
        let config = bind(&[key]).unwrap();
        // The index still sizes the slice.
        assert_eq!(config.databases, vec![DbConfig::default()], "{key}");
    }

    let config = bind(&["--databases[0].h=x"]).unwrap();
    assert_eq!(config.databases[0].host, None);
}

#[test]
fn test_undeclared_short_level_uses_long_token_in_short_lineage() {
    let config = bind(&["-d[0].nested.c=5s", "-d[0].password=secret"]).unwrap();
    assert_eq!(config.databases[0].nested, timeout(5));
    assert_eq!(config.databases[0].password.as_deref(), Some("secret"));

    let config = bind(&["-d[0].nested.ConnTimeout=5s"]).unwrap();
    assert_eq!(config.databases[0].nested, Nested::default());
}

#[test]
fn test_nested_scenario() {
    let config = bind(&[
        "--name=app",
        "-c=8",
        "--databases[0].host=primary",
        "-d[0].nested.c=5s",
        "-d[1].h=replica",
        "-d[1].password=secret",
        "--databases[1].nestednamed.ConnTimeout=1m30s",
        "--enabled=true",
    ])
    .unwrap();

    let expected = AppConfig {
        name: Some("app".to_string()),
        thread_count: Some(8),
        databases: vec![
            DbConfig {
                host: Some("primary".to_string()),
                nested: timeout(5),
                ..DbConfig::default()
            },
            DbConfig {
                host: Some("replica".to_string()),
                password: Some("secret".to_string()),
                nested_named: timeout(90),
                ..DbConfig::default()
            },
        ],
        enabled: true,
        ..AppConfig::default()
    };
    assert_eq!(config, expected);
}

#[test]
fn test_slice_without_indexed_flags_is_emptied() {
    let groups = split(["--name=x"]);
    let mut config = AppConfig {
        databases: vec![DbConfig {
            host: Some("stale".to_string()),
            ..DbConfig::default()
        }],
        ..AppConfig::default()
    };
    Flags::new(&groups[0]).unmarshal(&mut config).unwrap();
    assert!(config.databases.is_empty());
    assert_eq!(config.name.as_deref(), Some("x"));
}

#[test]
fn test_slice_with_indexed_flags_is_replaced() {
    let groups = split(["--databases[1].user=u"]);
    let mut config = AppConfig {
        databases: vec![DbConfig {
            host: Some("stale".to_string()),
            ..DbConfig::default()
        }],
        ..AppConfig::default()
    };
    Flags::new(&groups[0]).unmarshal(&mut config).unwrap();
    assert_eq!(config.databases.len(), 2);
    assert_eq!(config.databases[0], DbConfig::default());
}

// ============================================================================
// Errors
// ============================================================================

#[test]
fn test_non_numeric_index_is_path_parse_error() {
    let err = bind(&["--databases[nan].host=x"]).unwrap_err();
    match err {
        BindError::PathParse {
            struct_path,
            key,
            source: SliceIndexError::Invalid(e),
        } => {
            assert_eq!(struct_path, "databases");
            assert_eq!(key, "--databases[nan].host");
            assert_eq!(e.kind(), &IntErrorKind::InvalidDigit);
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_overflowing_index_is_path_parse_error() {
    let err = bind(&["-d[18446744073709551616].host=x"]).unwrap_err();
    assert!(matches!(
        err,
        BindError::PathParse {
            source: SliceIndexError::Invalid(_),
            ..
        }
    ));
    assert_eq!(err.struct_path(), Some("databases"));
}

#[test]
fn test_index_above_limit_is_rejected() {
    let groups = split(["--databases[100].host=x"]);
    let mut config = AppConfig::default();
    let err = Flags::new(&groups[0])
        .with_options(BindOptions { max_slice_len: 64 })
        .unmarshal(&mut config)
        .unwrap_err();
    assert!(matches!(
        err,
        BindError::PathParse {
            source: SliceIndexError::ExceedsLimit {
                index: 100,
                limit: 64
            },
            ..
        }
    ));
}

#[test]
fn test_parse_error_aborts_binding() {
    let err = bind(&["-c=many", "--databases[0].host=a"]).unwrap_err();
    match &err {
        BindError::Parse {
            struct_path,
            flag,
            source: CoercionError::InvalidInt(_),
        } => {
            assert_eq!(struct_path, "thread_count");
            assert_eq!(flag, "-c");
        }
        other => panic!("unexpected error: {other}"),
    }
    assert_eq!(
        err.to_string(),
        "flag '-c' failed to parse because invalid digit found in string"
    );
}

#[test]
fn test_bad_duration_in_slice_reports_full_path() {
    let err = bind(&["-d[0].n.c=forever"]).unwrap_err();
    match err {
        BindError::Parse {
            struct_path, flag, ..
        } => {
            assert_eq!(struct_path, "databases[0].nested_named.conn_timeout");
            assert_eq!(flag, "-d[0].n.c");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[derive(Debug, Default, Bindable)]
struct BadShort {
    #[flag(long = "name", short = "n")]
    name: Option<String>,
    #[flag(long = "port", short = "pt")]
    port: Option<u16>,
}

#[test]
fn test_malformed_short_fails_before_any_mutation() {
    let groups = split(["--name=x", "--port=80"]);
    let mut config = BadShort::default();
    let err = Flags::new(&groups[0]).unmarshal(&mut config).unwrap_err();
    match err {
        BindError::ShortFlagDeclaration { field, short } => {
            assert_eq!(field, "port");
            assert_eq!(short, "pt");
        }
        other => panic!("unexpected error: {other}"),
    }
    assert_eq!(config.name, None);
}

#[derive(Debug, Default, Bindable)]
struct BadNestedShort {
    name: Option<String>,
    #[flag(long = "items")]
    items: Vec<BadShort>,
}

#[test]
fn test_malformed_short_in_slice_element_is_found() {
    let groups = split(["--name=x"]);
    let mut config = BadNestedShort::default();
    let err = Flags::new(&groups[0]).unmarshal(&mut config).unwrap_err();
    assert!(matches!(
        err,
        BindError::ShortFlagDeclaration { ref field, .. } if field == "items.port"
    ));
    assert_eq!(config.name, None);
}

#[test]
fn test_non_record_destination_is_programming_error() {
    let group = Group::root();
    let mut value = 7u32;
    let err = Flags::new(&group).unmarshal(&mut value).unwrap_err();
    assert!(matches!(err, BindError::Programming(_)));
    assert!(err.to_string().contains("u32"));
    assert_eq!(value, 7);
}

// ============================================================================
// Registry and emitter
// ============================================================================

#[derive(Debug, Default, Clone, Copy, PartialEq)]
enum Level {
    #[default]
    Info,
    Debug,
}

value_field!(Level);

#[derive(Debug, Default, Bindable)]
struct Logging {
    #[flag(long = "level", short = "l")]
    level: Level,
    #[flag(long = "verbosity")]
    verbosity: Option<Level>,
}

fn level_registry() -> ParseRegistry {
    let mut registry = ParseRegistry::with_primitives();
    registry.register(|raw: &str| match raw {
        "info" => Ok(Level::Info),
        "debug" => Ok(Level::Debug),
        other => Err(CoercionError::Custom(format!("unknown level '{other}'"))),
    });
    registry
}

#[test]
fn test_custom_registry_type() {
    let groups = split(["-l=debug", "--verbosity=debug"]);
    let mut logging = Logging::default();
    Flags::with_registry(&groups[0], level_registry())
        .unmarshal(&mut logging)
        .unwrap();
    assert_eq!(logging.level, Level::Debug);
    assert_eq!(logging.verbosity, Some(Level::Debug));
}

#[test]
fn test_custom_type_without_registration_is_skipped() {
    let groups = split(["-l=debug"]);
    let mut logging = Logging::default();
    Flags::new(&groups[0]).unmarshal(&mut logging).unwrap();
    assert_eq!(logging.level, Level::Info);
}

#[test]
fn test_custom_error_is_wrapped() {
    let groups = split(["--level=loud"]);
    let mut logging = Logging::default();
    let err = Flags::with_registry(&groups[0], level_registry())
        .unmarshal(&mut logging)
        .unwrap_err();
    assert!(matches!(
        err,
        BindError::Parse {
            source: CoercionError::Custom(_),
            ..
        }
    ));
}

#[test]
fn test_emitter_reports_applied_values() {
    let groups = split(["-n=chris", "-d[1].n.c=3s", "-e"]);
    let mut config = AppConfig::default();
    let mut recorder = SetRecorder::new();
    Flags::new(&groups[0])
        .unmarshal_with_emitter(&mut config, &mut recorder)
        .unwrap();

    let records = recorder.records();
    assert_eq!(records.len(), 3);
    assert_eq!(
        records[0],
        SetRecord {
            struct_path: "name".to_string(),
            flag_name: "-n".to_string(),
            value: "chris".to_string(),
        }
    );
    assert_eq!(
        records[1].struct_path,
        "databases[1].nested_named.conn_timeout"
    );
    assert_eq!(records[1].flag_name, "-d[1].n.c");
    assert_eq!(records[2].flag_name, "-e");
    assert_eq!(records[2].value, "true");
}

#[test]
fn test_emitter_silent_when_setter_declines() {
    let mut registry = ParseRegistry::with_primitives();
    registry.register_setter(|_target: &mut Option<String>, _raw| Ok(false));

    let groups = split(["--name=ignored", "-c=2"]);
    let mut config = AppConfig::default();
    let mut recorder = SetRecorder::new();
    Flags::with_registry(&groups[0], registry)
        .unmarshal_with_emitter(&mut config, &mut recorder)
        .unwrap();

    assert_eq!(config.name, None);
    assert_eq!(config.thread_count, Some(2));
    assert_eq!(recorder.records().len(), 1);
    assert_eq!(recorder.records()[0].flag_name, "-c");
}

#[test]
fn test_recorded_assignments_replay_to_same_config() {
    let original_args = [
        "-n=svc",
        "--thread-count=3",
        "-d[0].h=a",
        "--databases[2].nested.ConnTimeout=250ms",
        "-d[2].n.c=2h",
        "-ef",
    ];
    let groups = split(original_args);
    let mut first = AppConfig::default();
    let mut recorder = SetRecorder::new();
    Flags::new(&groups[0])
        .unmarshal_with_emitter(&mut first, &mut recorder)
        .unwrap();

    let replay = recorder.to_group();
    let mut second = AppConfig::default();
    Flags::new(&replay).unmarshal(&mut second).unwrap();

    assert_eq!(first, second);
}

#[test]
fn test_replay_drops_length_from_keys_that_set_nothing() {
    let groups = split(["-d[0].h=a", "--databases[2].bogus=1"]);
    let mut first = AppConfig::default();
    let mut recorder = SetRecorder::new();
    Flags::new(&groups[0])
        .unmarshal_with_emitter(&mut first, &mut recorder)
        .unwrap();
    assert_eq!(first.databases.len(), 3);
    assert_eq!(recorder.records().len(), 1);

    let mut second = AppConfig::default();
    Flags::new(&recorder.to_group())
        .unmarshal(&mut second)
        .unwrap();
    assert_eq!(second.databases.len(), 1);
    assert_eq!(second.databases[0], first.databases[0]);
}

// ============================================================================
// Sources
// ============================================================================

#[test]
fn test_groups_resolve_root_first() {
    let groups = split(["--name=root", "serve", "--name=serve", "-c=4"]);
    let mut config = AppConfig::default();
    Flags::new(&groups).unmarshal(&mut config).unwrap();
    assert_eq!(config.name.as_deref(), Some("root"));
    assert_eq!(config.thread_count, Some(4));
}

#[test]
fn test_sub_command_group_alone() {
    let groups = split(["--name=root", "serve", "--name=serve"]);
    let mut config = AppConfig::default();
    Flags::new(&groups[1]).unmarshal(&mut config).unwrap();
    assert_eq!(config.name.as_deref(), Some("serve"));
}

#[test]
fn test_hash_map_source() {
    let map: HashMap<String, String> = [
        ("--databases[1].host", "b"),
        ("-d[0].user", "root"),
        ("--enabled", "1"),
    ]
    .into_iter()
    .map(|(k, v)| (k.to_string(), v.to_string()))
    .collect();

    let mut config = AppConfig::default();
    Flags::new(&map).unmarshal(&mut config).unwrap();
    assert_eq!(config.databases.len(), 2);
    assert_eq!(config.databases[0].user.as_deref(), Some("root"));
    assert_eq!(config.databases[1].host.as_deref(), Some("b"));
    assert!(config.enabled);
}

#[test]
fn test_parse_args_helper() {
    let config: AppConfig = parse_args(["-d[0].h=h", "--", "--name=after-terminator"]).unwrap();
    assert_eq!(config.databases.len(), 1);
    assert_eq!(config.databases[0].host.as_deref(), Some("h"));
    assert_eq!(config.name, None);
}
