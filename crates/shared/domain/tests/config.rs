use forma_domain::config::{CacheConfig, FormaConfig, LogSettings, ResolverConfig};
use serde_json::json;

#[test]
fn config_defaults_are_sane() {
    let cache = CacheConfig::default();
    assert_eq!(cache.max_size, 256);
    assert_eq!(cache.default_ttl_ms, 60_000);
    assert!(!cache.enable_logging);

    let log = LogSettings::default();
    assert_eq!(log.level, "info");
    assert!(log.console);
    assert!(log.directory.is_none());

    assert!(ResolverConfig::default().cache_enabled);
}

#[test]
fn forma_config_deserializes() {
    let raw = json!({
        "log": { "level": "debug", "json": true, "directory": "/tmp/forma" },
        "cache": { "max_size": 8, "default_ttl_ms": 0 },
        "resolver": { "cache_enabled": false }
    });

    let cfg: FormaConfig = serde_json::from_value(raw).expect("config deserialize");
    assert_eq!(cfg.log.level, "debug");
    assert!(cfg.log.json);
    assert!(cfg.log.console, "unspecified fields fall back to defaults");
    assert_eq!(cfg.cache.max_size, 8);
    assert_eq!(cfg.cache.default_ttl_ms, 0);
    assert!(!cfg.resolver.cache_enabled);
}

#[test]
fn cache_config_accepts_camel_case_keys() {
    let raw = json!({ "maxSize": 3, "defaultTtlMs": 1500, "enableLogging": true });
    let cache: CacheConfig = serde_json::from_value(raw).expect("cache config deserialize");
    assert_eq!(cache, CacheConfig { max_size: 3, default_ttl_ms: 1500, enable_logging: true });
}

#[test]
fn forma_config_is_cheap_to_clone_and_copy_on_write() {
    let original = FormaConfig::default();
    let mut edited = original.clone();
    edited.cache.max_size = 1;

    assert_eq!(original.cache.max_size, 256);
    assert_eq!(edited.cache.max_size, 1);
}
