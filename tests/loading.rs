mod common;

use std::io::Write;

use arbor::{ArborError, DocumentBuilder, SourceFormat, load_from_file, load_from_str};
use common::{TestResult, data_path};

#[test]
fn fixture_formats_are_detected_by_extension() -> TestResult {
    assert_eq!(load_from_file(data_path("timeline.xml"))?.format(), SourceFormat::Xml);
    assert_eq!(load_from_file(data_path("document.json"))?.format(), SourceFormat::Json);
    Ok(())
}

#[test]
fn unknown_extension_sniffs_content() -> TestResult {
    let mut file = tempfile::Builder::new().suffix(".txt").tempfile()?;
    writeln!(file, "\n  <root><item/></root>")?;

    let source = load_from_file(file.path())?;
    assert_eq!(source.format(), SourceFormat::Xml);
    let doc = source.parse()?;
    assert_eq!(doc.find("root > item")?.len(), 1);
    Ok(())
}

#[test]
fn json_file_round_trip() -> TestResult {
    let mut file = tempfile::Builder::new().suffix(".json").tempfile()?;
    write!(file, r#"{{"items": [{{"n": "x"}}, {{"n": "y"}}]}}"#)?;

    let source = DocumentBuilder::new().from_file(file.path())?;
    let doc = source.parse()?;
    assert_eq!(doc.find("items n")?.data().as_deref(), Some("xy"));
    Ok(())
}

#[test]
fn explicit_format_overrides_extension() -> TestResult {
    let mut file = tempfile::Builder::new().suffix(".xml").tempfile()?;
    write!(file, "[1, 2, 3]")?;

    let source = DocumentBuilder::new()
        .with_format(SourceFormat::Json)
        .from_file(file.path())?;
    let doc = source.parse()?;
    assert_eq!(doc.children().len(), 3);
    Ok(())
}

#[test]
fn missing_file_is_an_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = load_from_file(dir.path().join("absent.xml")).unwrap_err();
    assert!(matches!(err, ArborError::Io(_)));
    assert!(err.to_string().contains("absent.xml"));
}

#[test]
fn undetectable_text_is_rejected() {
    let err = load_from_str("just words").unwrap_err();
    assert!(matches!(err, ArborError::UnknownFormat { .. }));
}

#[test]
fn malformed_documents_report_parser_errors() -> TestResult {
    let xml = load_from_str("<a><b></a>")?;
    assert!(matches!(xml.parse(), Err(ArborError::Xml(_))));

    let json = load_from_str("{\"a\": }")?;
    assert!(matches!(json.parse(), Err(ArborError::Json(_))));
    Ok(())
}
