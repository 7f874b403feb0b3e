use super::*;
use std::io::Cursor;

const MISEQ_RUN_PARAMETERS: &str = r#"<?xml version="1.0"?>
<RunParameters xmlns:xsd="http://www.w3.org/2001/XMLSchema" xmlns:xsi="http://www.w3.org/2001/XMLSchema-instance">
  <EnableCloud>false</EnableCloud>
  <RunParametersVersion>MiSeq_1_1</RunParametersVersion>
  <CopyManifests>true</CopyManifests>
  <FlowcellRFIDTag>
    <SerialNumber>000000000-ARW6K</SerialNumber>
    <PartNumber>15028382</PartNumber>
    <ExpirationDate>2017-03-16T00:00:00</ExpirationDate>
  </FlowcellRFIDTag>
  <PR2BottleRFIDTag>
    <SerialNumber>MS4192370-00PR2</SerialNumber>
    <PartNumber>15041807</PartNumber>
    <ExpirationDate>2017-02-02T00:00:00</ExpirationDate>
  </PR2BottleRFIDTag>
  <ReagentKitRFIDTag>
    <SerialNumber>MS4309218-600V3</SerialNumber>
    <PartNumber>15043962</PartNumber>
    <ExpirationDate>2017-03-07T00:00:00</ExpirationDate>
  </ReagentKitRFIDTag>
  <Resumable>true</Resumable>
  <ManifestFiles />
  <Setup>
    <SupportMultipleSurfacesInUI>true</SupportMultipleSurfacesInUI>
    <ApplicationVersion>2.6.2.1</ApplicationVersion>
    <ApplicationName>MiSeq Control Software</ApplicationName>
    <NumTilesPerSwath>19</NumTilesPerSwath>
  </Setup>
  <RunID>160615_M00766_0123_000000000-ARW6K</RunID>
  <ScannerID>M00766</ScannerID>
  <RunNumber>123</RunNumber>
  <FPGAVersion>9.5.12</FPGAVersion>
  <MCSVersion>2.6.2.1</MCSVersion>
  <RTAVersion>1.18.54</RTAVersion>
  <ExperimentName>Run42</ExperimentName>
  <RunStartDate>160615</RunStartDate>
</RunParameters>"#;

fn parse_str(xml: &str) -> Result<RunParametersData> {
    parse_reader(
        Cursor::new(xml),
        Path::new("RunParameters.xml"),
        &ElementPaths::default(),
    )
}

fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[test]
fn test_parse_miseq_run_parameters() {
    let data = parse_str(MISEQ_RUN_PARAMETERS).unwrap();

    assert_eq!(data.scanner_id, "M00766");
    assert_eq!(data.run_identifier, "160615_M00766_0123_000000000-ARW6K");
    assert_eq!(data.run_start_date, ymd(2016, 6, 15));
    assert_eq!(data.application_version, "2.6.2.1");
    assert_eq!(data.rta_version, "1.18.54");

    assert_eq!(data.flowcell.part_number, "15028382");
    assert_eq!(data.flowcell.serial_number, "000000000-ARW6K");
    assert_eq!(data.flowcell.expiration_date, ymd(2017, 3, 16));
    assert_eq!(data.pr2.serial_number, "MS4192370-00PR2");
    assert_eq!(data.pr2.expiration_date, ymd(2017, 2, 2));
    assert_eq!(data.reagent.part_number, "15043962");
    assert_eq!(data.reagent.expiration_date, ymd(2017, 3, 7));

    assert_eq!(data.application_name.as_deref(), Some("MiSeq Control Software"));
    assert_eq!(data.run_number.as_deref(), Some("123"));
    assert_eq!(data.experiment_name.as_deref(), Some("Run42"));
}

#[test]
fn test_reordered_and_extra_elements() {
    let xml = r#"<RunParameters>
  <RunStartDate>20160615</RunStartDate>
  <NewFeatureFlag>on</NewFeatureFlag>
  <ReagentKitRFIDTag>
    <ExpirationDate>2017-03-07</ExpirationDate>
    <LotNumber>1234</LotNumber>
    <PartNumber>R1</PartNumber>
    <SerialNumber>RS1</SerialNumber>
  </ReagentKitRFIDTag>
  <Consumables>
    <PR2BottleRFIDTag>
      <PartNumber>P1</PartNumber>
      <SerialNumber>PS1</SerialNumber>
      <ExpirationDate>2017-02-02T00:00:00Z</ExpirationDate>
    </PR2BottleRFIDTag>
    <FlowcellRFIDTag>
      <PartNumber>F1</PartNumber>
      <SerialNumber>FS1</SerialNumber>
      <ExpirationDate>20170316</ExpirationDate>
    </FlowcellRFIDTag>
  </Consumables>
  <RTAVersion>2.4.11</RTAVersion>
  <ApplicationVersion>4.0.0</ApplicationVersion>
  <ScannerID>M1</ScannerID>
  <RunID>RUN1</RunID>
</RunParameters>"#;

    let data = parse_str(xml).unwrap();
    assert_eq!(data.run_start_date, ymd(2016, 6, 15));
    assert_eq!(data.application_version, "4.0.0");
    assert_eq!(data.flowcell.part_number, "F1");
    assert_eq!(data.flowcell.expiration_date, ymd(2017, 3, 16));
    assert_eq!(data.pr2.serial_number, "PS1");
    assert_eq!(data.reagent.serial_number, "RS1");
    assert_eq!(data.application_name, None);
}

#[test]
fn test_shallowest_match_wins() {
    let xml = MISEQ_RUN_PARAMETERS.replace(
        "<EnableCloud>false</EnableCloud>",
        "<Previous><RunID>OLD_RUN</RunID></Previous>",
    );
    let data = parse_str(&xml).unwrap();
    assert_eq!(data.run_identifier, "160615_M00766_0123_000000000-ARW6K");
}

#[test]
fn test_mcs_version_fallback() {
    let xml = MISEQ_RUN_PARAMETERS.replace("<ApplicationVersion>2.6.2.1</ApplicationVersion>", "");
    let xml = xml.replace("<MCSVersion>2.6.2.1</MCSVersion>", "<MCSVersion>2.5.0.5</MCSVersion>");
    assert_eq!(parse_str(&xml).unwrap().application_version, "2.5.0.5");
}

#[test]
fn test_escaped_text_and_namespaces() {
    let xml = MISEQ_RUN_PARAMETERS
        .replace("<RunParameters ", "<rp:RunParameters xmlns:rp=\"urn:x\" ")
        .replace("</RunParameters>", "</rp:RunParameters>")
        .replace("<ScannerID>M00766</ScannerID>", "<ScannerID>M&amp;00766</ScannerID>");
    assert_eq!(parse_str(&xml).unwrap().scanner_id, "M&00766");
}

#[test]
fn test_missing_element() {
    let xml = MISEQ_RUN_PARAMETERS.replace("<RTAVersion>1.18.54</RTAVersion>", "");
    match parse_str(&xml) {
        Err(RunLogError::MissingFieldError { field, source_file }) => {
            assert_eq!(field, "RTAVersion");
            assert_eq!(source_file, "RunParameters.xml");
        }
        other => panic!("expected MissingFieldError, got {:?}", other),
    }
}

#[test]
fn test_missing_consumable_element_names_path() {
    let xml = MISEQ_RUN_PARAMETERS.replace("<PartNumber>15041807</PartNumber>", "");
    assert!(matches!(
        parse_str(&xml),
        Err(RunLogError::MissingFieldError { field, .. }) if field == "PR2BottleRFIDTag/PartNumber"
    ));
}

#[test]
fn test_empty_element_is_present() {
    let xml = MISEQ_RUN_PARAMETERS.replace("<RTAVersion>1.18.54</RTAVersion>", "<RTAVersion/>");
    assert_eq!(parse_str(&xml).unwrap().rta_version, "");
}

#[test]
fn test_bad_date_token() {
    let xml = MISEQ_RUN_PARAMETERS.replace("<RunStartDate>160615</RunStartDate>", "<RunStartDate>yesterday</RunStartDate>");
    assert!(matches!(
        parse_str(&xml),
        Err(RunLogError::DateFormatError { field, value, .. }) if field == "RunStartDate" && value == "yesterday"
    ));

    let err = parse_reader(
        Cursor::new(xml),
        Path::new("runs/M00766/RunParameters.xml"),
        &ElementPaths::default(),
    )
    .unwrap_err();
    assert!(err.to_string().contains("runs/M00766/RunParameters.xml"), "{err}");
}

#[test]
fn test_malformed_xml() {
    for xml in [
        "<RunParameters><RunID>x</RunParameters>",
        "<RunParameters><RunID>x</RunID>",
        "not xml at all",
        "",
    ] {
        assert!(
            matches!(parse_str(xml), Err(RunLogError::XmlParseError { .. })),
            "{xml:?}"
        );
    }
}

#[test]
fn test_custom_element_paths() {
    let xml = MISEQ_RUN_PARAMETERS.replace("ScannerID", "InstrumentSerial");
    assert!(parse_str(&xml).is_err());

    let mut paths = ElementPaths::default();
    paths.scanner_id = vec!["InstrumentSerial".to_string()];
    let data = parse_reader(Cursor::new(xml), Path::new("RunParameters.xml"), &paths).unwrap();
    assert_eq!(data.scanner_id, "M00766");
}

#[test]
fn test_empty_path_list_is_config_error() {
    let mut paths = ElementPaths::default();
    paths.rta_version.clear();
    let result = parse_reader(Cursor::new(MISEQ_RUN_PARAMETERS), Path::new("x.xml"), &paths);
    assert!(matches!(result, Err(RunLogError::ConfigError(_))));
}

#[test]
fn test_parse_missing_file() {
    assert!(matches!(
        parse("/nonexistent/RunParameters.xml"),
        Err(RunLogError::IoError { .. })
    ));
}
