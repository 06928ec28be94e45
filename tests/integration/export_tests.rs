//! Integration tests for exporting extracted listings

use job_harvest::extract::extract_listings;
use job_harvest::output::{export_records, OutputFormat, COLUMNS};
use job_harvest::ListingRecord;

const RESULTS_PAGE: &str = r#"
<html><body>
  <div data-testid="result">
    <h2 data-testid="title">Senior Software Developer</h2>
    <span data-testid="company-name">Acme Corp</span>
    <div data-testid="text-location">Toronto, ON</div>
    <a href="/rc/clk?jk=e1">View</a>
    <div data-testid="attribute-salary">CA$90,000 - CA$110,000 a year</div>
    <div data-testid="attribute-snippet"><span>Full-time</span><span>Hybrid work</span></div>
    <span data-testid="taxonomy-item">Engineering</span>
    <span data-testid="taxonomy-item">Backend</span>
  </div>
  <div data-testid="result">
    <h2 data-testid="title">Support Analyst</h2>
    <a href="/viewjob?jk=e2">View</a>
  </div>
</body></html>
"#;

fn records() -> Vec<ListingRecord> {
    extract_listings(RESULTS_PAGE, "https://example.com/jobs?q=dev&start=0")
}

#[test]
fn test_json_export_reads_back() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("out/listings.json");
    let records = records();

    export_records(&records, OutputFormat::Json, &path).unwrap();

    let content = std::fs::read_to_string(&path).unwrap();
    let parsed: Vec<ListingRecord> = serde_json::from_str(&content).unwrap();
    assert_eq!(parsed, records);

    let value: serde_json::Value = serde_json::from_str(&content).unwrap();
    assert_eq!(value[0]["extractedSalary"]["currency"], "CAD");
    assert_eq!(value[0]["extractedSalary"]["cadence"], "yearly");
    assert_eq!(value[0]["remoteWorkModel"], "HYBRID");
    assert!(value[1]["extractedSalary"].is_null());
}

#[test]
fn test_csv_export_flattens_records() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("listings.csv");

    export_records(&records(), OutputFormat::Csv, &path).unwrap();

    let mut reader = csv::Reader::from_path(&path).unwrap();
    let headers = reader.headers().unwrap().clone();
    assert_eq!(headers.iter().collect::<Vec<_>>(), COLUMNS.to_vec());

    let column = |name: &str| headers.iter().position(|h| h == name).unwrap();
    let rows: Vec<csv::StringRecord> = reader.records().map(|r| r.unwrap()).collect();
    assert_eq!(rows.len(), 2);

    let first = &rows[0];
    assert_eq!(&first[column("jobKey")], "e1");
    assert_eq!(&first[column("normalizedTitle")], "Sr Software Engineer");
    assert_eq!(&first[column("extractedSalary.min")], "90000");
    assert_eq!(&first[column("extractedSalary.max")], "110000");
    assert_eq!(&first[column("jobTypeTags")], "Full-time|Hybrid work");
    assert_eq!(&first[column("taxonomyTags.label")], "Engineering|Backend");

    let second = &rows[1];
    assert_eq!(&second[column("jobKey")], "e2");
    assert_eq!(&second[column("company")], "");
    assert_eq!(&second[column("extractedSalary.min")], "");
}

#[test]
fn test_tsv_export_with_no_records() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("empty.tsv");

    export_records(&[], OutputFormat::Tsv, &path).unwrap();

    let content = std::fs::read_to_string(&path).unwrap();
    assert_eq!(content.lines().count(), 1);
    assert_eq!(content.trim_end(), COLUMNS.join("\t"));
}
