//! 환경 변수 오버라이드 테스트.
//!
//! 프로세스 환경을 바꾸므로 다른 설정 테스트와 분리된 바이너리에서 실행합니다.

use coin_core::{Settings, ENV_PREFIX};
use secrecy::ExposeSecret;

const WITHOUT_API_KEY: &str = r#"
[api_config]
start = 1
limit = 2
currency = USD

[aws_boto_credentials]
access_key = AKIAEXAMPLE
secret_key = secret

[aws_boto_rds_postgres_config]
db_name = coins
db_instance_identifier = databasetest
master_username = admin_user
master_password = testpw0021
db_instance_class = db.t3.micro
db_engine = postgres
storage = 20
vpc_security_group_id = sg-0123
"#;

#[test]
fn test_env_overrides_file_values() {
    assert_eq!(ENV_PREFIX, "COIN_ETL");

    // 파일에 없는 키는 실패
    assert!(Settings::from_ini_str(WITHOUT_API_KEY).is_err());

    std::env::set_var("COIN_ETL__API_CONFIG__API_KEY", "env-key");
    std::env::set_var("COIN_ETL__API_CONFIG__CURRENCY", "EUR");
    std::env::set_var("COIN_ETL__AWS_BOTO_RDS_POSTGRES_CONFIG__STORAGE", "50");
    std::env::set_var("COIN_ETL__LOAD_CONFIG__DATABASE", "coins");

    let settings = Settings::from_ini_str(WITHOUT_API_KEY).unwrap();

    assert_eq!(settings.api_config.api_key.expose_secret(), "env-key");
    assert_eq!(settings.api_config.currency, "EUR");
    assert_eq!(settings.aws_boto_rds_postgres_config.storage, 50);
    assert_eq!(settings.load_database(), "coins");
    // 덮어쓰지 않은 값은 파일 그대로
    assert_eq!(settings.api_config.limit, 2);
    assert_eq!(
        settings.aws_boto_rds_postgres_config.db_instance_identifier,
        "databasetest"
    );

    // 오버라이드 값도 검증을 거침
    std::env::set_var("COIN_ETL__API_CONFIG__LIMIT", "0");
    let err = Settings::from_ini_str(WITHOUT_API_KEY).unwrap_err();
    assert!(err.to_string().contains("limit"));

    for key in [
        "COIN_ETL__API_CONFIG__API_KEY",
        "COIN_ETL__API_CONFIG__CURRENCY",
        "COIN_ETL__AWS_BOTO_RDS_POSTGRES_CONFIG__STORAGE",
        "COIN_ETL__LOAD_CONFIG__DATABASE",
        "COIN_ETL__API_CONFIG__LIMIT",
    ] {
        std::env::remove_var(key);
    }
}
