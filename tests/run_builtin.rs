use std::io::Write;
use std::rc::Rc;

use tempfile::NamedTempFile;
use wisp_lang::config::Config;
use wisp_lang::value::{NumKind, Value};

fn int(v: &Value) -> i64 {
    match v {
        Value::Number(n) => match n.num {
            NumKind::Int(i) => i,
            NumKind::Float(f) => panic!("expected int, got float {}", f),
        },
        other => panic!("expected number, got {:?}", other),
    }
}

#[test]
fn run_executes_another_script_and_returns_null_on_success() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "PRINT(1 + 1)").unwrap();
    let path = file.path().to_string_lossy().into_owned();

    let src = format!("RUN(\"{}\")", path.replace('\\', "\\\\"));
    let (value, err) = wisp_lang::run("<test>", &src);
    assert!(err.is_none(), "unexpected error: {:?}", err.map(|e| e.render()));
    assert_eq!(int(&value.unwrap()), 0); // NULL is Number(0)
}

#[test]
fn run_surfaces_a_failure_from_the_nested_script() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "1 / 0").unwrap();
    let path = file.path().to_string_lossy().into_owned();

    let src = format!("RUN(\"{}\")", path.replace('\\', "\\\\"));
    let (value, err) = wisp_lang::run("<test>", &src);
    assert!(value.is_none());
    assert!(err.unwrap().render().contains("Failed to finish executing script"));
}

#[test]
fn run_reports_a_missing_file() {
    let (value, err) = wisp_lang::run("<test>", "RUN(\"/nonexistent/path/script.wisp\")");
    assert!(value.is_none());
    assert!(err.unwrap().render().contains("Failed to load script"));
}

#[test]
fn run_resolves_relative_paths_against_the_configured_search_path() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("helper.wisp"), "PRINT(1 + 1)").unwrap();

    let config = Rc::new(Config {
        verbose: false,
        run_search_path: vec![dir.path().to_string_lossy().into_owned()],
    });

    let (value, err) =
        wisp_lang::run_with_config("<test>", "RUN(\"helper.wisp\")", &config);
    assert!(err.is_none(), "unexpected error: {:?}", err.map(|e| e.render()));
    assert_eq!(int(&value.unwrap()), 0);
}
