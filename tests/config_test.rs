// ==========================================
// ConfigManager 集成测试
// ==========================================
// 测试目标: 验证配置读取与 EngineConfig 加载的正确性
// ==========================================


use school_reconcile::config::{
    config_keys, ConfigManager, DepartmentNameMatch, DepartmentRule, EngineConfig,
    ReconcileConfigReader,
};
use school_reconcile::engine::EngineError;
use school_reconcile::repository::RepositoryError;
use test_helpers::create_test_db;

#[tokio::test]
async fn test_config_manager_creation() {
    let (_temp_file, db_path) = create_test_db().expect("Failed to create test db");

    let config_manager = ConfigManager::new(&db_path);
    assert!(
        config_manager.is_ok(),
        "ConfigManager should be created successfully"
    );
}

#[tokio::test]
async fn test_defaults_when_config_missing() {
    let (_temp_file, db_path) = create_test_db().expect("Failed to create test db");
    let config_manager = ConfigManager::new(&db_path).expect("Failed to create ConfigManager");

    let config = EngineConfig::load(&config_manager)
        .await
        .expect("Should load defaults");
    assert_eq!(config, EngineConfig::default());
}

#[tokio::test]
async fn test_overrides_are_applied() {
    let (_temp_file, db_path) = create_test_db().expect("Failed to create test db");
    let config_manager = ConfigManager::new(&db_path).expect("Failed to create ConfigManager");

    config_manager
        .set_global_config_value(config_keys::HOTSPOT_THRESHOLD, "40")
        .unwrap();
    config_manager
        .set_global_config_value(config_keys::MIN_OVERLAP_SCORE, "3")
        .unwrap();
    config_manager
        .set_global_config_value(config_keys::DRY_RUN, "TRUE")
        .unwrap();
    // 覆盖写入
    config_manager
        .set_global_config_value(config_keys::REPORT_TOP_N, "3")
        .unwrap();
    config_manager
        .set_global_config_value(config_keys::REPORT_TOP_N, "10")
        .unwrap();

    let config = EngineConfig::load(&config_manager).await.unwrap();
    assert_eq!(config.hotspot_threshold, 40);
    assert_eq!(config.min_overlap_score, 3);
    assert_eq!(config.report_top_n, 10);
    assert!(config.dry_run);
}

#[tokio::test]
async fn test_unparseable_number_falls_back_to_default() {
    let (_temp_file, db_path) = create_test_db().expect("Failed to create test db");
    let config_manager = ConfigManager::new(&db_path).expect("Failed to create ConfigManager");

    config_manager
        .set_global_config_value(config_keys::HOTSPOT_THRESHOLD, "abc")
        .unwrap();

    let threshold = config_manager.get_hotspot_threshold().await.unwrap();
    assert_eq!(threshold, 100);
}

#[tokio::test]
async fn test_department_rules_round_trip() {
    let (_temp_file, db_path) = create_test_db().expect("Failed to create test db");
    let config_manager = ConfigManager::new(&db_path).expect("Failed to create ConfigManager");

    let rules = vec![
        DepartmentRule::contains("ยานยนต์", "ยนต์"),
        DepartmentRule {
            keyword: "Computer".to_string(),
            department: DepartmentNameMatch::Equals("เทคโนโลยีสารสนเทศ".to_string()),
        },
    ];
    config_manager.save_department_rules(&rules).unwrap();

    let loaded = config_manager.get_department_rules().await.unwrap();
    assert_eq!(loaded, rules);

    let config = EngineConfig::load(&config_manager).await.unwrap();
    assert_eq!(config.department_rules.len(), 2);
}

#[tokio::test]
async fn test_invalid_rules_json_is_rejected() {
    let (_temp_file, db_path) = create_test_db().expect("Failed to create test db");
    let config_manager = ConfigManager::new(&db_path).expect("Failed to create ConfigManager");

    config_manager
        .set_global_config_value(config_keys::DEPARTMENT_RULES, "{not json")
        .unwrap();

    let result = config_manager.get_department_rules().await;
    assert!(matches!(result, Err(RepositoryError::FieldValueError { .. })));

    let result = EngineConfig::load(&config_manager).await;
    assert!(matches!(result, Err(EngineError::InvalidConfig(_))));
}

#[tokio::test]
async fn test_zero_progress_interval_fails_validation() {
    let (_temp_file, db_path) = create_test_db().expect("Failed to create test db");
    let config_manager = ConfigManager::new(&db_path).expect("Failed to create ConfigManager");

    config_manager
        .set_global_config_value(config_keys::PROGRESS_INTERVAL, "0")
        .unwrap();

    let result = EngineConfig::load(&config_manager).await;
    assert!(matches!(result, Err(EngineError::InvalidConfig(_))));
}

#[tokio::test]
async fn test_overlap_floor_below_two_fails_validation() {
    let (_temp_file, db_path) = create_test_db().expect("Failed to create test db");
    let config_manager = ConfigManager::new(&db_path).expect("Failed to create ConfigManager");

    config_manager
        .set_global_config_value(config_keys::MIN_OVERLAP_SCORE, "0")
        .unwrap();

    let result = EngineConfig::load(&config_manager).await;
    assert!(matches!(result, Err(EngineError::InvalidConfig(_))));
}
