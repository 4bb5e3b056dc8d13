mod common;

use common::TestWorkspace;
use mbti_atlas::{
    error::PipelineError,
    loader::{DataSource, LoadOptions, Upload, load},
};

#[test]
fn default_file_wins_over_upload() {
    let workspace = TestWorkspace::new();
    let default = workspace.write("default.csv", "Country,INFJ\nDefault,0.1\n");
    let upload = Upload::new("upload.csv", "Country,INFJ\nUploaded,0.2\n".as_bytes());

    let loaded = load(Some(default.as_path()), Some(upload), &LoadOptions::default()).unwrap();

    assert_eq!(loaded.source, DataSource::Default(default.clone()));
    assert_eq!(loaded.table.cell(0, 0), "Default");
}

#[test]
fn upload_path_is_not_opened_when_default_is_readable() {
    let workspace = TestWorkspace::new();
    let default = workspace.write("default.csv", "Country,INFJ\nDefault,0.1\n");
    let upload = Upload::from_path(&workspace.missing("absent.csv"));

    let loaded = load(Some(default.as_path()), Some(upload), &LoadOptions::default()).unwrap();
    assert_eq!(loaded.source, DataSource::Default(default));
}

#[test]
fn upload_path_used_when_default_is_missing() {
    let workspace = TestWorkspace::new();
    let upload_path = workspace.write("mine.tsv", "Country\tENTJ\nPeru\t0.03\n");
    let upload = Upload::from_path(&upload_path);

    let loaded = load(
        Some(workspace.missing("default.csv").as_path()),
        Some(upload),
        &LoadOptions::default(),
    )
    .unwrap();

    assert_eq!(
        loaded.source,
        DataSource::Upload(upload_path.display().to_string())
    );
    assert_eq!(loaded.table.headers(), ["Country", "ENTJ"]);
}

#[test]
fn nothing_to_load_halts_with_no_data_source() {
    let workspace = TestWorkspace::new();
    let err = load(
        Some(workspace.missing("default.csv").as_path()),
        None,
        &LoadOptions::default(),
    )
    .unwrap_err();
    assert!(matches!(
        err.downcast_ref::<PipelineError>(),
        Some(PipelineError::NoDataSource)
    ));
}

#[test]
fn explicit_encoding_decodes_latin1() {
    let options = LoadOptions {
        delimiter: None,
        encoding: mbti_atlas::io_utils::resolve_encoding(Some("latin1")).unwrap(),
    };
    let bytes: &[u8] = b"Country,INFP\nC\xf4te d'Ivoire,0.04\n";
    let loaded = load(None, Some(Upload::new("latin.csv", bytes)), &options).unwrap();
    assert_eq!(loaded.table.cell(0, 0), "Côte d'Ivoire");
}

#[test]
fn directory_default_falls_back_to_upload() {
    let workspace = TestWorkspace::new();
    let upload = Upload::new("u.csv", "Country,INFJ\nA,0.1\n".as_bytes());

    let loaded = load(Some(workspace.path()), Some(upload), &LoadOptions::default()).unwrap();

    assert_eq!(loaded.source, DataSource::Upload("u.csv".to_string()));
    assert_eq!(loaded.table.cell(0, 0), "A");
}

#[test]
fn malformed_default_file_is_an_error_not_a_fallback() {
    let workspace = TestWorkspace::new();
    let default = workspace.write("default.csv", "Country,INFJ\nA,0.1,extra\n");
    let upload = Upload::new("u.csv", "Country,INFJ\nB,0.2\n".as_bytes());

    let err = load(Some(default.as_path()), Some(upload), &LoadOptions::default()).unwrap_err();
    assert!(format!("{err:#}").contains("Parsing default table"));
}
