use cubed_runtime::{
    DEFAULT_DRAIN_BUDGET, DEFAULT_SLOTS_PER_TIER, MAX_WORKER_IDLE_MS, StreamingConfig,
    default_render_distance,
};

#[test]
fn empty_toml_gives_defaults() {
    let cfg = StreamingConfig::from_toml_str("").unwrap();
    assert_eq!(cfg, StreamingConfig::default());
    assert_eq!(cfg.render_distance, default_render_distance());
    assert_eq!(cfg.slots_per_tier, DEFAULT_SLOTS_PER_TIER);
    assert_eq!(cfg.drain_budget, DEFAULT_DRAIN_BUDGET);
    assert_eq!(cfg.worker_idle_ms, 1);
    assert!(cfg.prefill_spawn);
    assert_eq!(cfg.worldgen.base_height, 128);
}

#[test]
fn partial_tables_override_only_named_fields() {
    let cfg = StreamingConfig::from_toml_str(
        r#"
render_distance = 4
drain_budget = 3

[worldgen]
seed = 7
amplitude = 4.0
"#,
    )
    .unwrap();
    assert_eq!(cfg.render_distance, 4);
    assert_eq!(cfg.drain_budget, 3);
    assert_eq!(cfg.slots_per_tier, DEFAULT_SLOTS_PER_TIER);
    assert_eq!(cfg.worldgen.seed, 7);
    assert_eq!(cfg.worldgen.amplitude, 4.0);
    assert_eq!(cfg.worldgen.spread, 16.0);
}

#[test]
fn invalid_values_are_rejected() {
    for bad in [
        "render_distance = 0",
        "slots_per_tier = 0",
        "drain_budget = 0",
        "[worldgen]\nspread = 0.0",
        "render_distance = \"far\"",
    ] {
        assert!(StreamingConfig::from_toml_str(bad).is_err(), "{bad}");
    }
}

#[test]
fn relative_blocks_path_resolves_next_to_the_config() {
    let dir = std::env::temp_dir().join(format!("cubed-config-{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    let path = dir.join("cubed.toml");
    std::fs::write(&path, "blocks_path = \"blocks.toml\"\n").unwrap();
    let cfg = StreamingConfig::load_from_path(&path).unwrap();
    assert_eq!(cfg.blocks_path, Some(dir.join("blocks.toml")));
    std::fs::remove_dir_all(&dir).unwrap();

    assert!(StreamingConfig::load_from_path(dir.join("missing.toml")).is_err());
}

#[test]
fn worker_idle_wait_must_be_short_and_nonzero() {
    assert!(StreamingConfig::from_toml_str("worker_idle_ms = 0").is_err());
    assert!(StreamingConfig::from_toml_str("worker_idle_ms = 3000").is_err());
    let over = format!("worker_idle_ms = {}", MAX_WORKER_IDLE_MS + 1);
    assert!(StreamingConfig::from_toml_str(&over).is_err());
    let max = format!("worker_idle_ms = {}", MAX_WORKER_IDLE_MS);
    assert_eq!(StreamingConfig::from_toml_str(&max).unwrap().worker_idle_ms, MAX_WORKER_IDLE_MS);

    let cfg = StreamingConfig {
        worker_idle_ms: 0,
        ..StreamingConfig::default()
    };
    assert!(cfg.validate().is_err());
}
