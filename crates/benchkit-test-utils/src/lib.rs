//! Testing utilities for benchkit workspace
//!
//! Shared fixtures: sample configuration files and benchmark output trees.

#![allow(missing_docs)]

use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Trimmed-down Fabric `configtx.yaml` orderer section
pub const CONFIGTX_YAML: &str = "\
Organizations:
  - Name: OrdererOrg
    ID: OrdererMSP
    MSPDir: crypto-config/ordererOrganizations/example.com/msp
Orderer:
  OrdererType: etcdraft
  BatchTimeout: 2s
  BatchSize:
    MaxMessageCount: 10
    AbsoluteMaxBytes: 99 MB
    PreferredMaxBytes: 512 KB
  EtcdRaft:
    Options:
      TickInterval: 500ms
      ElectionTick: 10
      HeartbeatTick: 1
      SnapshotIntervalSize: 16 MB
Capabilities:
  Channel:
    V2_0: true
";

/// Compose file with two peers and an orderer
pub const COMPOSE_YAML: &str = "\
version: '2.4'
services:
  orderer.example.com:
    image: hyperledger/fabric-orderer:2.5
    environment:
      - FABRIC_LOGGING_SPEC=INFO
      - ORDERER_GENERAL_LISTENPORT=7050
      - '#ORDERER_GENERAL_TLS_ENABLED=true'
  peer0.org1.example.com:
    image: hyperledger/fabric-peer:2.5
    environment:
      - FABRIC_LOGGING_SPEC=INFO
      - CORE_PEER_GOSSIP_USELEADERELECTION=true
  peer1.org1.example.com:
    image: hyperledger/fabric-peer:2.5
    environment:
      - FABRIC_LOGGING_SPEC=INFO
  couchdb0:
    image: couchdb:3.3
";

/// Caliper summary table with one `Create a car.` round
#[must_use]
pub fn caliper_summary(succ: u32, fail: u32, stats: [&str; 5]) -> String {
    format!(
        "\
+---------------+------+------+-----------------+-----------------+-----------------+-----------------+------------------+
| Name          | Succ | Fail | Send Rate (TPS) | Max Latency (s) | Min Latency (s) | Avg Latency (s) | Throughput (TPS) |
|---------------|------|------|-----------------|-----------------|-----------------|-----------------|------------------|
| Create a car. | {succ} | {fail} | {} | {} | {} | {} | {} |
+---------------+------+------+-----------------+-----------------+-----------------+-----------------+------------------+
",
        stats[0], stats[1], stats[2], stats[3], stats[4]
    )
}

/// Temporary directory with helpers for laying out fixture files
#[derive(Debug)]
pub struct Fixture {
    dir: TempDir,
}

impl Fixture {
    #[must_use]
    pub fn new() -> Self {
        Self {
            dir: tempfile::tempdir().expect("create temp dir"),
        }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Write `contents` to `relative`, creating parent directories
    pub fn write(&self, relative: impl AsRef<Path>, contents: &str) -> PathBuf {
        let path = self.dir.path().join(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("create fixture dirs");
        }
        fs::write(&path, contents).expect("write fixture file");
        path
    }

    #[must_use]
    pub fn read(&self, relative: impl AsRef<Path>) -> String {
        fs::read_to_string(self.dir.path().join(relative)).expect("read fixture file")
    }

    #[must_use]
    pub fn exists(&self, relative: impl AsRef<Path>) -> bool {
        self.dir.path().join(relative).exists()
    }
}

impl Default for Fixture {
    fn default() -> Self {
        Self::new()
    }
}
