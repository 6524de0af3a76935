use figment::Jail;

use esdemo_core::config::{Config, DEFAULT_MAX_RESPONSE_BYTES};
use esdemo_core::types::{SamplePost, User};

#[test]
fn load_without_files_uses_defaults() {
    Jail::expect_with(|jail| {
        let config = Config::load_from(jail.directory(), Some("dev")).map_err(|e| e.to_string())?;
        let settings = config.settings().map_err(|e| e.to_string())?;
        assert_eq!(settings.elasticsearch.cluster_nodes, "127.0.0.1");
        assert_eq!(settings.elasticsearch.port, 9200);
        assert_eq!(settings.request.max_response_bytes, DEFAULT_MAX_RESPONSE_BYTES);
        assert_eq!(settings.demo.document_id, "0e057391f66940e9977b93463ba1f429");
        Ok(())
    });
}

#[test]
fn env_file_overrides_base_file() {
    Jail::expect_with(|jail| {
        jail.create_file(
            "config.toml",
            r#"
            [elasticsearch]
            cluster-nodes = "es.internal"
            port = 9201

            [demo]
            index = "users"
            "#,
        )?;
        jail.create_file(
            "config.test.toml",
            r#"
            [elasticsearch]
            port = 9299
            "#,
        )?;
        let config = Config::load_from(jail.directory(), Some("test")).map_err(|e| e.to_string())?;
        let settings = config.settings().map_err(|e| e.to_string())?;
        assert_eq!(settings.elasticsearch.cluster_nodes, "es.internal");
        assert_eq!(settings.elasticsearch.port, 9299, "config.test.toml wins over config.toml");
        assert_eq!(settings.demo.index, "users");

        let port: u16 = config.get("elasticsearch.port").map_err(|e| e.to_string())?;
        assert_eq!(port, 9299);
        Ok(())
    });
}

#[test]
fn env_vars_override_files() {
    Jail::expect_with(|jail| {
        jail.create_file("config.toml", "[elasticsearch]\nport = 9201\n")?;
        jail.set_env("APP_ELASTICSEARCH__PORT", 9400);
        jail.set_env("APP_REQUEST__HEADERS__AUTHORIZATION", "Bearer abc");
        let config = Config::load_from(jail.directory(), Some("dev")).map_err(|e| e.to_string())?;
        let settings = config.settings().map_err(|e| e.to_string())?;
        assert_eq!(settings.elasticsearch.port, 9400);
        assert_eq!(
            settings.request.headers.get("authorization").map(String::as_str),
            Some("Bearer abc")
        );
        Ok(())
    });
}

#[test]
fn env_var_overrides_kebab_cluster_nodes() {
    Jail::expect_with(|jail| {
        jail.create_file("config.toml", "[elasticsearch]\ncluster-nodes = \"127.0.0.1\"\n")?;
        jail.set_env("APP_ELASTICSEARCH__CLUSTER_NODES", "es.prod");
        let config = Config::load_from(jail.directory(), Some("dev")).map_err(|e| e.to_string())?;
        let settings = config.settings().map_err(|e| e.to_string())?;
        assert_eq!(settings.elasticsearch.cluster_nodes, "es.prod");
        Ok(())
    });
}

#[test]
fn env_file_snake_spelling_overrides_kebab_base() {
    Jail::expect_with(|jail| {
        jail.create_file("config.toml", "[elasticsearch]\ncluster-nodes = \"127.0.0.1\"\n")?;
        jail.create_file("config.dev.toml", "[elasticsearch]\ncluster_nodes = \"es.dev\"\n")?;
        let config = Config::load_from(jail.directory(), Some("dev")).map_err(|e| e.to_string())?;
        let settings = config.settings().map_err(|e| e.to_string())?;
        assert_eq!(settings.elasticsearch.cluster_nodes, "es.dev");
        Ok(())
    });
}

#[test]
fn env_file_kebab_spelling_overrides_snake_base() {
    Jail::expect_with(|jail| {
        jail.create_file("config.toml", "[elasticsearch]\ncluster_nodes = \"127.0.0.1\"\n")?;
        jail.create_file("config.prod.toml", "[elasticsearch]\ncluster-nodes = \"es.prod\"\n")?;
        let config = Config::load_from(jail.directory(), Some("prod")).map_err(|e| e.to_string())?;
        let settings = config.settings().map_err(|e| e.to_string())?;
        assert_eq!(settings.elasticsearch.cluster_nodes, "es.prod");
        Ok(())
    });
}

#[test]
fn invalid_file_values_fail_to_load() {
    Jail::expect_with(|jail| {
        jail.create_file("config.toml", "[elasticsearch]\nscheme = \"gopher\"\n")?;
        assert!(Config::load_from(jail.directory(), Some("dev")).is_err());
        Ok(())
    });
}

#[test]
fn user_builder_fills_every_field() {
    let user = User::builder()
        .username("li.lian")
        .password("123456")
        .description("test")
        .timestamp(1_675_209_600_000)
        .build();
    let json = serde_json::to_value(&user).unwrap();
    assert_eq!(json["username"], "li.lian");
    assert_eq!(json["password"], "123456");
    assert_eq!(json["description"], "test");
    assert_eq!(json["timestamp"], 1_675_209_600_000_i64);
}

#[test]
fn user_builder_leaves_unset_fields_empty() {
    let user = User::builder().username("only").build();
    assert_eq!(user.password, "");
    assert_eq!(user.timestamp, 0);
}

#[test]
fn sample_post_uses_camel_case_date() {
    let json = serde_json::to_value(SamplePost::default()).unwrap();
    assert_eq!(json, serde_json::json!({
        "user": "kimchy",
        "postDate": "2023-02-01",
        "message": "trying out Elasticsearch"
    }));
}
