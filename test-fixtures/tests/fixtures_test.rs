//! Sanity checks on the recorded scenarios themselves.

use std::collections::HashSet;

use test_fixtures::{fixture_path, list_fixtures, Scenario};

#[test]
fn scenario_directory_is_populated() {
    assert!(fixture_path("scenarios").is_dir());
    assert!(list_fixtures("scenarios").len() >= 5);
    assert!(list_fixtures("does-not-exist").is_empty());
}

#[test]
fn every_scenario_is_internally_consistent() {
    for (name, scenario) in Scenario::load_all() {
        assert!(!scenario.description.is_empty(), "{name}: missing description");
        // Panics on an invalid tolerance.
        let params = scenario.params();
        assert!(params.tolerance.value() > 1.0);

        let mut keys = HashSet::new();
        for alert in &scenario.alerts {
            assert!(alert.distance > 0.0, "{name}: {} has no radius", alert.device_id);
            assert!(keys.insert(alert.key()), "{name}: duplicate key {}", alert.key());
        }

        let devices: HashSet<&str> = scenario.alerts.iter().map(|a| a.device_id.as_str()).collect();
        for group in &scenario.expected {
            assert!(group.devices.len() >= 3, "{name}: expected group too small");
            for id in &group.devices {
                assert!(devices.contains(id.as_str()), "{name}: unknown device {id}");
            }
        }
    }
}

#[test]
fn capitalized_distance_field_is_accepted() {
    let scenario = Scenario::load("single_source");
    assert!(scenario.alerts.iter().all(|a| a.distance == 300.0));
    assert_eq!(scenario.alerts[0].payload.status, "new");
    assert_eq!(scenario.alerts[0].payload.created_at, "2025-10-08T17:00:00Z");
}

#[test]
fn optional_payload_fields_default_to_empty() {
    let scenario = Scenario::load("sparse_no_source");
    assert!(scenario.alerts.iter().all(|a| a.payload.s3_key.is_empty()));
    assert!(scenario.min_shared.is_none());
}
