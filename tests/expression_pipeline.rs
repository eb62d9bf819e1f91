//! End-to-end: upload samples, build matrices, enhance a filtered matrix

use std::collections::HashMap;
use std::path::Path;

use approx::assert_relative_eq;
use serde_json::json;

use expression_utils::data::{MatrixData, GENERIC_EXPRESSION_SET_TYPE};
use expression_utils::matrix::ENHANCED_COL_IDS;
use expression_utils::prelude::*;
use expression_utils::service::{GENE_TRACKING_FILE, SAMPLE_EXPRESSION_TYPE};

const GENOME: &str = "10/1/1";

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn genome_store() -> MemoryStore {
    let mut store = MemoryStore::new();
    store.insert_genome(
        GENOME,
        vec![
            ("AT1G01010", "NAC domain containing protein 1"),
            ("AT1G01020", "ARV1 family protein"),
            ("AT1G01030", "AP2/B3 transcription factor"),
            ("AT1G01040", ""),
        ],
    );
    store
}

fn write_tracking(dir: &Path, rows: &[(&str, f64)]) {
    let mut text = String::from("tracking_id\tclass_code\tgene_id\tlength\tFPKM\n");
    for (id, fpkm) in rows {
        text.push_str(&format!("{}\t-\t{}\t1000\t{}\n", id, id, fpkm));
    }
    std::fs::write(dir.join(GENE_TRACKING_FILE), text).unwrap();
}

fn upload(
    store: &mut MemoryStore,
    reference: &str,
    name: &str,
    condition: &str,
    rows: &[(&str, f64)],
) -> SampleExpression {
    let dir = tempfile::tempdir().unwrap();
    write_tracking(dir.path(), rows);
    let params = UploadParams::new(dir.path(), GENOME).with_condition(condition);
    let sample = upload_expression(&*store, &params).unwrap();
    store
        .insert_object(reference, name, &format!("{}-1.0", SAMPLE_EXPRESSION_TYPE), &sample)
        .unwrap();
    sample
}

#[test]
fn test_upload_then_build_matrices() {
    init_logging();
    let mut store = genome_store();

    let wt = upload(
        &mut store,
        "20/1/1",
        "wt_rep1",
        "wt",
        &[("AT1G01010", 4.0), ("AT1G01020", 12.0)],
    );
    upload(&mut store, "20/2/1", "heat_rep1", "heat", &[("AT1G01020", 1.0), ("AT1G01030", 0.0)]);
    store
        .insert_object(
            "20/9/1",
            "experiment",
            &format!("{}-2.0", GENERIC_EXPRESSION_SET_TYPE),
            &json!({"description": "wt vs heat", "items": [{"ref": "20/1/1"}, {"ref": "20/2/1"}]}),
        )
        .unwrap();

    let output =
        build_expression_matrices(&store, &MatrixParams::new("20/9/1", "experiment")).unwrap();
    assert_eq!(output.fpkm.name, "experiment_FPKM_ExpressionMatrix");
    let fpkm = &output.fpkm.matrix;
    assert_eq!(fpkm.genome_ref(), Some(GENOME));
    assert_eq!(fpkm.col_ids(), &["wt_rep1".to_string(), "heat_rep1".to_string()]);
    assert_eq!(fpkm.n_rows(), 3);
    assert_relative_eq!(fpkm.value("AT1G01010", "wt_rep1").unwrap(), 5.0f64.log2(), epsilon = 1e-9);
    assert_eq!(fpkm.value("AT1G01010", "heat_rep1"), Some(0.0));
    assert_eq!(fpkm.condition_mapping()["heat_rep1"], "heat");

    let tpm = output.tpm.expect("uploaded samples carry TPM");
    assert_eq!(tpm.name, "experiment_TPM_ExpressionMatrix");
    let wt_tpm = wt.tpm_expression_levels.unwrap();
    assert_relative_eq!(
        tpm.matrix.value("AT1G01020", "wt_rep1").unwrap(),
        wt_tpm["AT1G01020"],
        epsilon = 1e-12
    );
    assert_relative_eq!(wt_tpm["AT1G01020"], (0.75f64 * 1e6 + 1.0).log2(), epsilon = 1e-9);
}

#[test]
fn test_rnaseq_set_layout() {
    init_logging();
    let mut store = genome_store();
    upload(&mut store, "30/1/1", "s1", "wt", &[("AT1G01010", 1.0)]);
    store
        .insert_object(
            "30/9/1",
            "legacy_set",
            "KBaseRNASeq.RNASeqExpressionSet-3.0",
            &json!({"genome_id": GENOME, "mapped_expression_ids": [{"31/1/1": "30/1/1"}]}),
        )
        .unwrap();

    let output = build_expression_matrices(&store, &MatrixParams::new("30/9/1", "legacy")).unwrap();
    assert_eq!(output.fpkm.matrix.col_ids(), &["s1".to_string()]);
    assert_relative_eq!(output.fpkm.matrix.value("AT1G01010", "s1").unwrap(), 1.0, epsilon = 1e-12);
}

#[test]
fn test_foreign_feature_aborts_upload() {
    init_logging();
    let store = genome_store();
    let dir = tempfile::tempdir().unwrap();
    write_tracking(dir.path(), &[("AT1G01010", 1.0), ("ZM00001", 2.0)]);

    let err = upload_expression(&store, &UploadParams::new(dir.path(), GENOME)).unwrap_err();
    match err {
        ExprError::UnknownFeature { line_number, line } => {
            assert_eq!(line_number, 3);
            assert!(line.starts_with("ZM00001\t"));
        }
        other => panic!("unexpected error: {}", other),
    }
}

#[test]
fn test_enhanced_fem_with_and_without_dem() {
    init_logging();
    let mut store = genome_store();
    let fem_values = vec![
        vec![Some(1.0), Some(2.0), Some(3.0)],
        vec![Some(0.0), None, Some(4.0)],
        vec![None, None, None],
    ];
    let fem = FilteredExpressionMatrix {
        genome_ref: Some(GENOME.to_string()),
        scale: Some("log2".to_string()),
        value_type: Some("level".to_string()),
        data: MatrixData {
            row_ids: vec!["AT1G01030".into(), "AT1G01010".into(), "AT1G01040".into()],
            col_ids: vec!["a".into(), "b".into(), "c".into()],
            values: fem_values,
        },
        diff_expr_matrix_ref: None,
    };
    store
        .insert_object("40/1/1", "fem_plain", "KBaseFeatureValues.ExpressionMatrix-1.2", &fem)
        .unwrap();

    let mut linked = fem.clone();
    linked.diff_expr_matrix_ref = Some("40/3/1".to_string());
    store
        .insert_object("40/2/1", "fem_linked", "KBaseFeatureValues.ExpressionMatrix-1.2", &linked)
        .unwrap();
    store
        .insert_object(
            "40/3/1",
            "dem",
            "KBaseFeatureValues.DifferentialExpressionMatrix-1.2",
            &json!({"data": {
                "row_ids": ["AT1G01010", "AT1G01020"],
                "col_ids": ["log2_fold_change", "p_value", "q_value"],
                "values": [[1.75, 0.0001, 0.002], [-0.5, 0.3, 0.6]]
            }}),
        )
        .unwrap();

    let plain = get_enhanced_fem(&store, &store, &EnhancedFemParams::new("40/1/1")).unwrap();
    assert_eq!(plain.data.col_ids, ENHANCED_COL_IDS.to_vec());
    assert!(plain.data.values.iter().all(|row| row[1].is_na() && row[2].is_na()));

    let efem = get_enhanced_fem(&store, &store, &EnhancedFemParams::new("40/2/1")).unwrap();
    assert_eq!(efem.data.row_ids, fem.data.row_ids);
    assert_eq!(efem.scale.as_deref(), Some("log2"));

    let row = efem.row("AT1G01010").unwrap();
    assert_eq!(row[0], Cell::from("NAC domain containing protein 1"));
    assert_eq!(row[1], Cell::Number(1.75));
    assert_eq!(row[2], Cell::Number(0.002));
    assert_eq!(row[3], Cell::Number(0.0));
    assert_eq!(row[4], Cell::Number(4.0));
    assert_relative_eq!(row[6].as_f64().unwrap(), 8.0f64.sqrt(), epsilon = 1e-12);
    assert_eq!(row[7], Cell::from("Yes"));

    let row = efem.row("AT1G01030").unwrap();
    assert!(row[1].is_na());
    assert_relative_eq!(row[5].as_f64().unwrap(), 2.0, epsilon = 1e-12);
    assert_relative_eq!(row[6].as_f64().unwrap(), 1.0, epsilon = 1e-12);
    assert_eq!(row[7], Cell::from("No"));

    let row = efem.row("AT1G01040").unwrap();
    assert!(row[0].is_na(), "blank description stays NA");
    assert!(row[..7].iter().all(Cell::is_na));

    let json = serde_json::to_value(&efem).unwrap();
    assert_eq!(json["data"]["column_labels"][7], "Missing values?");
    assert_eq!(json["type"], "level");
}

#[test]
fn test_matrix_files_written() {
    init_logging();
    let mut store = genome_store();
    upload(&mut store, "50/1/1", "s1", "wt", &[("AT1G01010", 3.0)]);
    store
        .insert_object(
            "50/9/1",
            "set",
            &format!("{}-2.0", GENERIC_EXPRESSION_SET_TYPE),
            &json!({"items": [{"ref": "50/1/1"}]}),
        )
        .unwrap();
    let output = build_expression_matrices(&store, &MatrixParams::new("50/9/1", "exp")).unwrap();

    let dir = tempfile::tempdir().unwrap();
    let json_path = dir.path().join("fpkm.json");
    write_json(&json_path, &output.fpkm.matrix.to_persisted()).unwrap();
    let stored: expression_utils::data::PersistedExpressionMatrix = read_json(&json_path).unwrap();
    let reloaded = ExpressionMatrix::from_persisted(stored).unwrap();
    assert_eq!(reloaded.value("AT1G01010", "s1"), Some(2.0));
    assert_eq!(reloaded.genome_ref(), Some(GENOME));

    let tsv_path = dir.path().join("fpkm.tsv");
    write_expression_matrix(&tsv_path, &reloaded).unwrap();
    let text = std::fs::read_to_string(&tsv_path).unwrap();
    assert!(text.starts_with("feature_id\ts1\n"));

    let descriptions: HashMap<String, String> = store.feature_descriptions(GENOME).unwrap();
    assert_eq!(descriptions.len(), 3);
}
