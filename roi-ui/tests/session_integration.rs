//! End-to-end tests: configuration file, book import, overrides and export
//! through the bundled HTML renderer.

use std::path::PathBuf;

use pretty_assertions::assert_eq;
use roi_core::InputField;
use roi_core::calculations::CommissionRate;
use roi_ui::App;
use roi_ui::config::AppConfig;
use rust_decimal_macros::dec;
use tempfile::TempDir;

fn fixture_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

fn app_from_fixtures(output_dir: PathBuf) -> App {
    let mut config = AppConfig::load(&fixture_path("adjustable.toml")).unwrap();
    config.export.output_dir = output_dir;
    let mut app = App::new(&config);
    app.load_book(&fixture_path("sample_book.csv")).unwrap();
    app
}

#[test]
fn test_config_and_book_drive_results() {
    let temp = TempDir::new().unwrap();
    let app = app_from_fixtures(temp.path().to_path_buf());
    let result = app.state().result();

    assert_eq!(app.state().commission_rate(), CommissionRate::Adjustable);
    assert_eq!(result.total_book_commission, dec!(24500));
    // 135000 * 20%
    assert_eq!(result.mgmt_fee_commission, dec!(27000));
    assert_eq!(result.total_revenue, dec!(51745));
    assert_eq!(result.scenarios.rows.len(), 3);
}

#[test]
fn test_overrides_recompute_results() {
    let temp = TempDir::new().unwrap();
    let mut app = app_from_fixtures(temp.path().to_path_buf());

    app.apply_overrides(&[
        (InputField::CommissionPct, "10".to_string()),
        (InputField::Clients, "".to_string()),
    ])
    .unwrap();

    let result = app.state().result();
    assert_eq!(result.total_wse, dec!(0));
    assert_eq!(result.mgmt_fee_commission, dec!(0));
    assert_eq!(result.total_revenue, dec!(24745));
}

#[tokio::test]
async fn test_export_writes_named_document() {
    let temp = TempDir::new().unwrap();
    // Nested so the export has to create the directory.
    let dir = temp.path().join("exports");
    let app = app_from_fixtures(dir.clone());

    let path = app.export().await.expect("export should succeed");

    assert_eq!(path, dir.join("partner-summary.html"));
    let html = std::fs::read_to_string(&path).unwrap();
    assert!(html.contains("@page { size: A4 portrait; margin: 0mm; }"));
    assert!(html.contains("$51,745"));
    assert!(html.contains("<td>Book 3</td>"));
    assert!(html.contains("class=\"total\""));
    assert!(!app.state().is_exporting());
}

#[tokio::test]
async fn test_export_failure_is_contained() {
    // A regular file cannot serve as the output directory.
    let app = app_from_fixtures(fixture_path("sample_book.csv"));
    let before = app.state().result().clone();

    let path = app.export().await;

    assert_eq!(path, None);
    assert!(!app.state().is_exporting());
    assert_eq!(app.state().result(), &before);
}

#[tokio::test]
async fn test_interactive_export_command() {
    let temp = TempDir::new().unwrap();
    let dir = temp.path().to_path_buf();
    let mut app = app_from_fixtures(dir.clone());
    let mut out = Vec::new();

    app.run_interactive(
        tokio::io::BufReader::new("remove 2\nexport\nquit\n".as_bytes()),
        &mut out,
    )
    .await
    .unwrap();

    let output = String::from_utf8(out).unwrap();
    assert!(output.contains("exported to"));
    let html = std::fs::read_to_string(dir.join("partner-summary.html")).unwrap();
    assert!(!html.contains("<td>Book 3</td>"));
}
