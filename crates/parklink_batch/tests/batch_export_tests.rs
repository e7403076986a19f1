use std::fs;

use parklink_batch::{export, input, runner, BatchError};
use parklink_core::test_helpers::{
    perturbed_counterparts, synthetic_parks, synthetic_trails, yellowstone_fixture, TEST_REFERENCE,
};
use parklink_core::{
    AttributeFilter, EntityLink, LinkConfig, LinkStrategy, NamedGeoEntity, ProximityQuery,
    RawEntity,
};
use tempfile::tempdir;

fn write_entities(path: &std::path::Path, entities: &[NamedGeoEntity]) {
    let raw: Vec<RawEntity> = entities.iter().map(RawEntity::from).collect();
    fs::write(path, serde_json::to_string(&raw).expect("serialize")).expect("write");
}

#[test]
fn link_run_from_files_exports_one_row_per_link() {
    let dir = tempdir().expect("temp dir");
    let parks = synthetic_parks(40, 11);
    let graph = perturbed_counterparts(&parks, 12);
    write_entities(&dir.path().join("parks.json"), &parks);
    write_entities(&dir.path().join("graph.json"), &graph);

    let source_a = input::load_entities(dir.path().join("parks.json")).expect("load a");
    let source_b = input::load_entities(dir.path().join("graph.json")).expect("load b");
    assert_eq!(source_a.len(), parks.len());
    assert_eq!(
        source_b.iter().filter(|e| e.location.is_none()).count(),
        graph.iter().filter(|e| e.location.is_none()).count()
    );

    let config = LinkConfig::default();
    let report =
        runner::run_linking(&source_a, &source_b, LinkStrategy::Greedy, config).expect("link");
    assert!(report.link_count() > 0);

    let csv_path = dir.path().join("links.csv");
    export::links_to_csv(&report.links, &csv_path).expect("csv");
    let mut reader = csv::Reader::from_path(&csv_path).expect("reader");
    let headers = reader.headers().expect("headers").clone();
    assert_eq!(&headers[0], "source_a_id");
    assert_eq!(reader.records().count(), report.link_count());

    let json_path = dir.path().join("links.json");
    export::links_to_json(&report.links, &json_path).expect("json");
    let back: Vec<EntityLink> =
        serde_json::from_str(&fs::read_to_string(&json_path).expect("read")).expect("parse");
    assert_eq!(back.len(), report.links.len());
    for (read, written) in back.iter().zip(&report.links) {
        assert_eq!(read.source_a_id, written.source_a_id);
        assert_eq!(read.source_b_id, written.source_b_id);
        assert_eq!(read.method, written.method);
        assert!((read.score - written.score).abs() < 1e-12);
    }
}

#[test]
fn empty_exports() {
    let dir = tempdir().expect("temp dir");
    let (_, source_b) = yellowstone_fixture();
    let report = runner::run_linking(&[], &source_b, LinkStrategy::Greedy, LinkConfig::default())
        .expect("link");

    let err = export::links_to_csv(&report.links, dir.path().join("links.csv")).unwrap_err();
    assert!(matches!(err, BatchError::NothingToExport));

    let json_path = dir.path().join("links.json");
    export::links_to_json(&report.links, &json_path).expect("json");
    let written: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&json_path).expect("read")).expect("parse");
    assert_eq!(written, serde_json::json!([]));
}

#[test]
fn nearby_batch_exports_rows_for_every_admitted_candidate() {
    let dir = tempdir().expect("temp dir");
    let references = vec![
        NamedGeoEntity::new("yose", "Yosemite National Park")
            .with_location(TEST_REFERENCE.latitude, TEST_REFERENCE.longitude),
    ];
    let trails = synthetic_trails(TEST_REFERENCE, 200, 30_000.0, 3);

    let template = ProximityQuery::new(TEST_REFERENCE, 15_000.0)
        .with_filter(AttributeFilter::equals("difficulty", "easy"))
        .with_limit(10);
    let results =
        runner::run_nearby_batch(&references, &trails, &template, Some(1), false).expect("batch");
    let admitted: usize = results.iter().map(|r| r.results.len()).sum();
    assert!(admitted > 0 && admitted <= 10);

    let csv_path = dir.path().join("nearby.csv");
    export::nearby_to_csv(&results, &csv_path).expect("csv");
    let mut reader = csv::Reader::from_path(&csv_path).expect("reader");
    let rows: Vec<csv::StringRecord> = reader.records().collect::<Result<_, _>>().expect("rows");
    assert_eq!(rows.len(), admitted);
    assert!(rows.iter().all(|r| &r[0] == "yose"));
    assert_eq!(&rows[0][2], "1");
}

#[test]
fn nearby_csv_without_hits_is_rejected() {
    let dir = tempdir().expect("temp dir");
    let references = vec![NamedGeoEntity::new("yose", "Yosemite")
        .with_location(TEST_REFERENCE.latitude, TEST_REFERENCE.longitude)];
    let template = ProximityQuery::new(TEST_REFERENCE, 1_000.0);
    let results =
        runner::run_nearby_batch(&references, &[], &template, None, false).expect("batch");

    let err = export::nearby_to_csv(&results, dir.path().join("nearby.csv")).unwrap_err();
    assert!(matches!(err, BatchError::NothingToExport));
}

#[test]
fn malformed_record_names_file_and_index() {
    let dir = tempdir().expect("temp dir");
    let path = dir.path().join("bad.json");
    fs::write(
        &path,
        r#"[{"id": "ok", "name": "Zion"}, {"id": "bad", "name": "Arches", "latitude": 38.7}]"#,
    )
    .expect("write");

    match input::load_entities(&path).unwrap_err() {
        BatchError::Record { index, path: p, .. } => {
            assert_eq!(index, 1);
            assert_eq!(p, path);
        }
        other => panic!("unexpected error: {other}"),
    }
}
