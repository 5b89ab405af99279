use httpmock::prelude::*;
use placement_stats::adapters::build_source;
use placement_stats::adapters::http::{COMPANY_PATH, PLACEMENT_PATH};
use placement_stats::{CliConfig, DashboardPipeline, LocalStorage, ReportEngine, StatsError};
use std::io::Read;
use tempfile::TempDir;

fn placement_payload() -> serde_json::Value {
    serde_json::json!({"data": [
        {"year": 2024, "branch": "CSE", "class_total": 300, "selected_total": 250,
         "selected_male": 150, "selected_female": 100},
        {"year": 2024, "branch": "ECE", "class_total": 200, "selected_total": 150},
        {"year": 2023, "branch": "CSE", "class_total": 250, "selected_total": 200},
        {"year": 2023, "branch": "ECE", "class_total": 150, "selected_total": 100}
    ]})
}

fn company_payload() -> serde_json::Value {
    serde_json::json!([
        {"year": 2024, "company_name": "A", "total_offers": 45, "salary": 12, "CSE": 30, "ECE": 15},
        {"year": 2024, "company_name": "B", "total_offers": 38, "salary": 9, "CSE": 20, "IT": 18},
        {"year": 2024, "company_name": "Cognizant Technology Solutions", "total_offers": 32,
         "salary": 15, "ECE": 32},
        {"year": 2023, "company_name": "A", "total_offers": 40, "salary": 10, "CSE": 40},
        {"year": 2023, "company_name": "D", "total_offers": 20, "MECH": 15}
    ])
}

fn cli_config(endpoint: String, output_path: String, formats: &[&str]) -> CliConfig {
    CliConfig {
        api_endpoint: Some(endpoint),
        placement_file: None,
        company_file: None,
        auth_token: None,
        timeout_seconds: 5,
        output_path,
        year: None,
        top_n: 10,
        trend_years: 5,
        formats: formats.iter().map(|f| f.to_string()).collect(),
        verbose: false,
        log_json: false,
    }
}

#[tokio::test]
async fn test_end_to_end_report_from_http_source() {
    let temp_dir = TempDir::new().unwrap();
    let output_path = temp_dir.path().to_str().unwrap().to_string();

    let server = MockServer::start();
    let placement_mock = server.mock(|when, then| {
        when.method(GET).path(PLACEMENT_PATH);
        then.status(200)
            .header("Content-Type", "application/json")
            .json_body(placement_payload());
    });
    let company_mock = server.mock(|when, then| {
        when.method(GET).path(COMPANY_PATH);
        then.status(200)
            .header("Content-Type", "application/json")
            .json_body(company_payload());
    });

    let config = cli_config(server.base_url(), output_path.clone(), &["json", "zip"]);
    let source = build_source(&config.source().unwrap(), LocalStorage::new(".".to_string())).unwrap();
    let storage = LocalStorage::new(output_path.clone());
    let engine = ReportEngine::new(DashboardPipeline::new(source, storage, config));

    let result = engine.run().await.unwrap();

    placement_mock.assert();
    company_mock.assert();
    assert!(result.ends_with("dashboard_report.zip"));

    let json_path = std::path::Path::new(&output_path).join("dashboard.json");
    let report: serde_json::Value =
        serde_json::from_slice(&std::fs::read(json_path).unwrap()).unwrap();

    assert_eq!(report["reportYear"], 2024);
    assert_eq!(report["previousYear"], 2023);
    assert_eq!(report["current"]["placementRate"], "80.0");
    assert_eq!(report["current"]["averagePackage"], "12.00");
    assert_eq!(report["current"]["highestPackage"], "15.00");
    assert_eq!(report["current"]["offersPerStudent"], "1.00");
    assert_eq!(report["growth"]["placementRatePoints"], 5.0);
    assert_eq!(report["growth"]["companies"], 50.0);
    assert_eq!(report["topRecruiters"][2]["displayName"], "Cognizant Techn...");
    assert_eq!(
        report["topRecruiters"][2]["fullName"],
        "Cognizant Technology Solutions"
    );
    assert_eq!(report["trends"].as_array().unwrap().len(), 2);

    let zip_data = std::fs::read(std::path::Path::new(&output_path).join("dashboard_report.zip"))
        .unwrap();
    let mut archive = zip::ZipArchive::new(std::io::Cursor::new(zip_data)).unwrap();
    let mut salary_csv = String::new();
    archive
        .by_name("salary_distribution.csv")
        .unwrap()
        .read_to_string(&mut salary_csv)
        .unwrap();
    assert!(salary_csv.contains("10-15 LPA,10.0,15.0,1"));
}

#[tokio::test]
async fn test_requested_year_uses_earlier_baseline() {
    let temp_dir = TempDir::new().unwrap();
    let output_path = temp_dir.path().to_str().unwrap().to_string();

    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path(PLACEMENT_PATH);
        then.status(200).json_body(placement_payload());
    });
    server.mock(|when, then| {
        when.method(GET).path(COMPANY_PATH);
        then.status(200).json_body(company_payload());
    });

    let mut config = cli_config(server.base_url(), output_path.clone(), &["json"]);
    config.year = Some(2023);
    let source = build_source(&config.source().unwrap(), LocalStorage::new(".".to_string())).unwrap();
    let engine = ReportEngine::new(DashboardPipeline::new(
        source,
        LocalStorage::new(output_path.clone()),
        config,
    ));

    engine.run().await.unwrap();

    let report: serde_json::Value = serde_json::from_slice(
        &std::fs::read(std::path::Path::new(&output_path).join("dashboard.json")).unwrap(),
    )
    .unwrap();
    assert_eq!(report["reportYear"], 2023);
    assert!(report["previousYear"].is_null());
    assert_eq!(report["current"]["placementRate"], "75.0");
    // 60 offers / 55 branch slots
    assert_eq!(report["current"]["offersPerStudent"], "1.09");
    assert_eq!(report["growth"]["offers"], 0.0);
}

#[tokio::test]
async fn test_backend_failure_surfaces_source_error() {
    let temp_dir = TempDir::new().unwrap();
    let output_path = temp_dir.path().to_str().unwrap().to_string();

    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path(PLACEMENT_PATH);
        then.status(503);
    });
    server.mock(|when, then| {
        when.method(GET).path(COMPANY_PATH);
        then.status(200).json_body(company_payload());
    });

    let config = cli_config(server.base_url(), output_path.clone(), &["json"]);
    let source = build_source(&config.source().unwrap(), LocalStorage::new(".".to_string())).unwrap();
    let engine = ReportEngine::new(DashboardPipeline::new(
        source,
        LocalStorage::new(output_path.clone()),
        config,
    ));

    let err = engine.run().await.unwrap_err();

    assert!(matches!(err, StatsError::SourceError { status: 503, .. }));
    assert!(!std::path::Path::new(&output_path)
        .join("dashboard.json")
        .exists());
}

#[tokio::test]
async fn test_malformed_collection_is_input_shape_error() {
    let temp_dir = TempDir::new().unwrap();
    let output_path = temp_dir.path().to_str().unwrap().to_string();

    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path(PLACEMENT_PATH);
        then.status(200).json_body(placement_payload());
    });
    server.mock(|when, then| {
        when.method(GET).path(COMPANY_PATH);
        then.status(200)
            .json_body(serde_json::json!({"message": "No data found."}));
    });

    let config = cli_config(server.base_url(), output_path.clone(), &["json"]);
    let source = build_source(&config.source().unwrap(), LocalStorage::new(".".to_string())).unwrap();
    let engine = ReportEngine::new(DashboardPipeline::new(
        source,
        LocalStorage::new(output_path),
        config,
    ));

    let err = engine.run().await.unwrap_err();
    assert!(matches!(err, StatsError::InputShapeError { ref entity, .. } if entity == "company"));
}
