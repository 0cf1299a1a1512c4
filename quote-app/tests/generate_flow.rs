//! Integration tests for the full generation flow against real files on
//! disk: session TOML in, PDF plus history row out.

use std::path::Path;

use pretty_assertions::assert_eq;
use quote_app::commands;
use quote_app::config::AppConfig;
use quote_app::session::DraftSession;
use quote_core::{Adjustment, HistoryLog, QuoteDraft};
use quote_store_csv::CsvHistoryLog;
use rust_decimal_macros::dec;

/// Config with every file routed into the test directory and no branding
/// assets on disk.
fn test_config(dir: &Path) -> AppConfig {
    let mut config = AppConfig::default();
    config.files.catalog = dir.join("materiais.csv");
    config.files.history = dir.join("historico.csv");
    config.files.output_dir = dir.join("orcamentos");
    config.assets.logo = None;
    config.assets.watermark = false;
    config
}

/// The end-to-end scenario: one block titled "Window Sealing", one material
/// line (2 x 950.00), labor 500.00.
fn window_sealing_draft() -> QuoteDraft {
    let mut draft = QuoteDraft::new();
    draft.client_name = "Acme Corp".to_string();
    draft.client_tax_id = "12.345.678/0001-90".to_string();
    let block = draft.add_block("Window Sealing");
    draft
        .add_material_line(block, "Selante Fibrado (Balde)", dec!(2), dec!(950.00))
        .expect("valid line");
    draft.set_labor_cost(block, dec!(500.00)).expect("valid labor");
    draft
}

fn save_draft(
    dir: &Path,
    draft: &QuoteDraft,
) -> DraftSession {
    let session = DraftSession::new(dir.join("rascunho.toml"));
    session.save(draft).expect("draft saves");
    session
}

#[test]
fn generate_produces_a_document_and_one_history_row() {
    let dir = tempfile::tempdir().unwrap();
    let config = test_config(dir.path());
    let session = save_draft(dir.path(), &window_sealing_draft());

    let generated = commands::generate(&config, &session).expect("generation succeeds");

    assert_eq!(generated.total, dec!(2400.00));
    assert_eq!(
        generated.pdf_path.file_name().unwrap(),
        "Orcamento_Acme_Corp.pdf"
    );

    let bytes = std::fs::read(&generated.pdf_path).expect("document on disk");
    assert!(!bytes.is_empty());
    assert_eq!(&bytes[..5], b"%PDF-");

    let rows = CsvHistoryLog::new(&config.files.history).load().unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].client_name, "Acme Corp");
    assert_eq!(rows[0].total, dec!(2400.00));
}

#[test]
fn each_generation_appends_exactly_one_row() {
    let dir = tempfile::tempdir().unwrap();
    let config = test_config(dir.path());
    let session = save_draft(dir.path(), &window_sealing_draft());

    for _ in 0..3 {
        commands::generate(&config, &session).expect("generation succeeds");
    }

    let rows = CsvHistoryLog::new(&config.files.history).load().unwrap();
    assert_eq!(rows.len(), 3);
    assert!(rows.iter().all(|r| r.client_name == "Acme Corp"));
}

#[test]
fn missing_client_name_aborts_with_no_partial_outputs() {
    let dir = tempfile::tempdir().unwrap();
    let config = test_config(dir.path());
    let mut draft = window_sealing_draft();
    draft.client_name = "   ".to_string();
    let session = save_draft(dir.path(), &draft);

    let err = commands::generate(&config, &session).unwrap_err();

    assert!(err.to_string().contains("nome do cliente"));
    assert!(!config.files.output_dir.exists(), "no document directory");
    assert!(!config.files.history.exists(), "no history row");
}

#[test]
fn empty_draft_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let config = test_config(dir.path());
    let mut draft = window_sealing_draft();
    draft.blocks.clear();
    let session = save_draft(dir.path(), &draft);

    assert!(commands::generate(&config, &session).is_err());
    assert!(!config.files.history.exists());
}

#[test]
fn discount_reaches_the_ledger_as_the_final_total() {
    let dir = tempfile::tempdir().unwrap();
    let config = test_config(dir.path());
    let mut draft = window_sealing_draft();
    draft.adjustment = Adjustment::percent(dec!(-10));
    let session = save_draft(dir.path(), &draft);

    let generated = commands::generate(&config, &session).expect("generation succeeds");

    assert_eq!(generated.total, dec!(2160.00));
    let rows = CsvHistoryLog::new(&config.files.history).load().unwrap();
    assert_eq!(rows[0].total, dec!(2160.00));
}

#[test]
fn contact_number_puts_the_link_in_the_ledger() {
    let dir = tempfile::tempdir().unwrap();
    let config = test_config(dir.path());
    let mut draft = window_sealing_draft();
    draft.contact_number = Some("(42) 99999-0000".to_string());
    let session = save_draft(dir.path(), &draft);

    let generated = commands::generate(&config, &session).expect("generation succeeds");

    let link = generated.whatsapp_link.expect("link for a contact number");
    assert!(link.starts_with("https://wa.me/5542999990000?text="));

    let rows = CsvHistoryLog::new(&config.files.history).load().unwrap();
    assert_eq!(rows[0].contact_link.as_deref(), Some(link.as_str()));
}

#[test]
fn manual_override_generates_with_the_confirmed_value() {
    let dir = tempfile::tempdir().unwrap();
    let config = test_config(dir.path());
    let mut draft = window_sealing_draft();
    draft.adjustment = Adjustment::Override(dec!(2000.00));
    let session = save_draft(dir.path(), &draft);

    let generated = commands::generate(&config, &session).expect("generation succeeds");

    assert_eq!(generated.total, dec!(2000.00));
    let totals = draft.totals();
    assert_eq!(totals.adjustment_value, dec!(-400.00));
    assert!(totals.is_discount());
}
