use indoc::indoc;
use std::io::Write;

use crate::shared::config::model::load_settings;

// one test body: both cases touch the MDSCAN_CONFIG process environment
#[test]
fn loads_defaults_without_a_file_and_values_from_one() {
    let settings = load_settings().expect("defaults should load");
    assert_eq!(settings.logging.log_dir, "logs");
    assert_eq!(settings.logging.stdout_level, "info");
    assert_eq!(settings.logging.file_level, "debug");

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("mdscan.toml");
    let mut file = std::fs::File::create(&path).unwrap();
    file.write_all(
        indoc! {r#"
            [logging]
            log_dir = "/tmp/mdscan-logs"
            stdout_level = "warn"
            file_level = "trace"
        "#}
        .as_bytes(),
    )
    .unwrap();

    // config resolves the extension itself, so the env var omits it
    let base = dir.path().join("mdscan");
    unsafe { std::env::set_var("MDSCAN_CONFIG", base.to_str().unwrap()) };
    let settings = load_settings().expect("file should load");
    unsafe { std::env::remove_var("MDSCAN_CONFIG") };

    assert_eq!(settings.logging.log_dir, "/tmp/mdscan-logs");
    assert_eq!(settings.logging.stdout_level, "warn");
    assert_eq!(settings.logging.file_level, "trace");
}
