//! Error handling tests

use std::path::Path;

use sharpuml::prelude::*;
use sharpuml::{render_solution, Config};

#[test]
fn test_invalid_argument_message_names_parameter() {
    let error = generate_diagram(None).unwrap_err();
    let message = format!("{}", error);
    assert!(message.contains("dependencies"));
}

#[test]
fn test_missing_solution_fails() {
    let error = render_solution(Path::new("/no/such/solution.sln")).unwrap_err();
    assert!(format!("{}", error).contains("Failed to load project"));
}

#[test]
fn test_unsupported_solution_extension_fails() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("App.vbproj");
    std::fs::write(&path, "<Project></Project>").unwrap();
    assert!(render_solution(&path).is_err());
}

#[test]
fn test_broken_project_is_omitted() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::create_dir_all(dir.path().join("Good")).unwrap();
    std::fs::create_dir_all(dir.path().join("Bad")).unwrap();
    std::fs::write(dir.path().join("Good/Good.csproj"), "<Project></Project>").unwrap();
    std::fs::write(dir.path().join("Bad/Bad.csproj"), "garbage").unwrap();
    std::fs::write(
        dir.path().join("App.sln"),
        concat!(
            "Project(\"{FAE04EC0-301F-11D3-BF4B-00C04F79EFBC}\") = \"Good\", \"Good\\Good.csproj\", \"{A1}\"\n",
            "EndProject\n",
            "Project(\"{FAE04EC0-301F-11D3-BF4B-00C04F79EFBC}\") = \"Bad\", \"Bad\\Bad.csproj\", \"{B2}\"\n",
            "EndProject\n",
        ),
    )
    .unwrap();

    let diagram = render_solution(&dir.path().join("App.sln")).unwrap();
    assert!(diagram.contains("component [Good]"));
    assert!(!diagram.contains("[Bad]"));
}

#[test]
fn test_malformed_source_does_not_abort() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("App.csproj"), "<Project></Project>").unwrap();
    std::fs::write(dir.path().join("Broken.cs"), "public class { int x = ; }}}").unwrap();
    std::fs::write(dir.path().join("Good.cs"), "public class Good { }").unwrap();

    let diagram = render_solution(&dir.path().join("App.csproj")).unwrap();
    assert!(diagram.contains("class Good {"));
}

#[test]
fn test_bad_rules_file_is_config_error() {
    let error = Config::from_toml_str("[classifier]\nrules = 5\n").unwrap_err();
    assert!(matches!(error, DiagramError::Config { .. }));
}
