//! End-to-end patch runs over files on disk

use benchkit_config::{
    load_document, patch_compose_file, patch_config_file, ConfigError, Document, ParamError,
};
use benchkit_test_utils::{Fixture, COMPOSE_YAML, CONFIGTX_YAML};
use pretty_assertions::assert_eq;

#[test]
fn test_configtx_parameters_are_applied_with_types() {
    let fx = Fixture::new();
    let config = fx.write("configtx.yaml", CONFIGTX_YAML);
    let params = fx.write(
        "params.txt",
        "BatchTimeout 500ms\nMaxMessageCount 500\nElectionTick ten\nPreferredMaxBytes 2 MB\n",
    );

    let outcome = patch_config_file(&config, &params).unwrap();
    assert_eq!(outcome.applied, 4);
    assert!(outcome.is_complete());

    let doc = load_document(&config).unwrap();
    let orderer = doc.get("Orderer").unwrap();
    assert_eq!(orderer.get("BatchTimeout"), Some(&Document::string("500ms")));

    let batch = orderer.get("BatchSize").unwrap();
    assert_eq!(batch.get("MaxMessageCount"), Some(&Document::integer(500)));
    assert_eq!(batch.get("PreferredMaxBytes"), Some(&Document::string("2 MB")));
    assert_eq!(batch.get("AbsoluteMaxBytes"), Some(&Document::string("99 MB")));

    let options = orderer.get("EtcdRaft").unwrap().get("Options").unwrap();
    assert_eq!(options.get("ElectionTick"), Some(&Document::string("ten")));
    assert_eq!(options.get("HeartbeatTick"), Some(&Document::integer(1)));
}

#[test]
fn test_unresolved_parameters_are_reported_and_file_still_written() {
    let fx = Fixture::new();
    let config = fx.write("configtx.yaml", CONFIGTX_YAML);
    let params = fx.write("params.txt", "NoSuchKey 1\nBatchTimeout 1s\nAlsoMissing x\n");

    let outcome = patch_config_file(&config, &params).unwrap();

    assert_eq!(outcome.applied, 1);
    assert_eq!(outcome.unresolved, ["NoSuchKey", "AlsoMissing"]);
    assert!(fx.read("configtx.yaml").contains("BatchTimeout: 1s"));
}

#[test]
fn test_empty_parameter_file_is_rejected_without_touching_document() {
    let fx = Fixture::new();
    let config = fx.write("configtx.yaml", CONFIGTX_YAML);
    let params = fx.write("params.txt", "\n\n   \nlonely\n");

    let err = patch_config_file(&config, &params).unwrap_err();

    assert!(matches!(err, ConfigError::Param(ParamError::NoParameters { .. })));
    assert_eq!(fx.read("configtx.yaml"), CONFIGTX_YAML);
}

#[test]
fn test_malformed_document_aborts_before_write() {
    let fx = Fixture::new();
    let broken = "Orderer: [unterminated\n";
    let config = fx.write("configtx.yaml", broken);
    let params = fx.write("params.txt", "Orderer x\n");

    let err = patch_config_file(&config, &params).unwrap_err();

    assert!(matches!(err, ConfigError::Document { .. }));
    assert_eq!(fx.read("configtx.yaml"), broken);
}

#[test]
fn test_patch_is_idempotent() {
    let fx = Fixture::new();
    let config = fx.write("configtx.yaml", CONFIGTX_YAML);
    let params = fx.write("params.txt", "MaxMessageCount 200\nTickInterval 250ms\n");

    patch_config_file(&config, &params).unwrap();
    let first = fx.read("configtx.yaml");
    patch_config_file(&config, &params).unwrap();

    assert_eq!(fx.read("configtx.yaml"), first);
}

#[test]
fn test_compose_environment_fan_out() {
    let fx = Fixture::new();
    let compose = fx.write("docker-compose.yaml", COMPOSE_YAML);
    let params = fx.write(
        "env.txt",
        "# logging\nFABRIC_LOGGING_SPEC DEBUG\nORDERER_GENERAL_TLS_ENABLED false\n",
    );

    let report = patch_compose_file(&compose, &params).unwrap();

    assert_eq!(report.count(), 3);
    assert_eq!(report.services.len(), 3);

    let written = fx.read("docker-compose.yaml");
    assert_eq!(written.matches("FABRIC_LOGGING_SPEC=DEBUG").count(), 3);
    assert!(written.contains("#ORDERER_GENERAL_TLS_ENABLED=true"));
    assert!(written.contains("couchdb:3.3"));
}

#[test]
fn test_compose_without_services_fails() {
    let fx = Fixture::new();
    let compose = fx.write("docker-compose.yaml", "version: '2.4'\n");
    let params = fx.write("env.txt", "A 1\n");

    let err = patch_compose_file(&compose, &params).unwrap_err();
    assert!(err.to_string().contains("services"));
}
