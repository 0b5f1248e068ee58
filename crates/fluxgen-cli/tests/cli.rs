//! Tests that drive the `fluxgen` binary.

use std::path::Path;
use std::process::{Command, Output};

use pretty_assertions::assert_eq;

fn fluxgen(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_fluxgen"))
        .args(args)
        .env_remove("FLUXTION_EXE")
        .env_remove("RUST_LOG")
        .output()
        .expect("failed to run fluxgen")
}

fn path_str(path: &Path) -> String {
    path.to_string_lossy().into_owned()
}

#[test]
fn command_json_prints_argument_list() {
    let dir = tempfile::tempdir().unwrap();
    let base = path_str(dir.path());

    let output = fluxgen(&[
        "command",
        "--json",
        "--base-dir",
        base.as_str(),
        "--fluxtion-exe",
        "/opt/fluxtion/bin/fluxtion",
        "--package-name",
        "com.acme.fx",
        "--class-name",
        "BiasMonitor",
        "--log-debug",
        "--path-separator",
        ":",
        "-c",
        "/repo/a.jar",
        "-c",
        "/repo/b.jar",
    ]);
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));

    let tokens: Vec<String> = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(tokens[0], "/opt/fluxtion/bin/fluxtion");
    assert_eq!(tokens[1], "--debug");
    assert_eq!(tokens[tokens.len() - 2], "-cp");
    assert_eq!(tokens[tokens.len() - 1], "/repo/a.jar:/repo/b.jar");
    assert_eq!(tokens.len(), 16);
}

#[test]
fn settings_file_supplies_surface() {
    let dir = tempfile::tempdir().unwrap();
    let settings = dir.path().join("fluxgen.json");
    std::fs::write(
        &settings,
        r#"{
            "fluxtionExe": "/opt/fluxtion/bin/fluxtion",
            "packageName": "com.acme.fx",
            "className": "BiasMonitor",
            "biasConfig": "com.acme.fx.BiasConfig",
            "outputDirectory": "/gen/src",
            "pathSeparator": ";"
        }"#,
    )
    .unwrap();

    let output = fluxgen(&[
        "command",
        "--config",
        path_str(&settings).as_str(),
        "--base-dir",
        path_str(dir.path()).as_str(),
        "--classpath",
        "/repo/a.jar;/repo/b.jar",
    ]);
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));

    let line = String::from_utf8_lossy(&output.stdout);
    assert!(line.contains("-outDirectory /gen/src"));
    assert!(line.contains("-biasConfig com.acme.fx.BiasConfig"));
    assert!(line.trim_end().ends_with("-cp /repo/a.jar;/repo/b.jar"));
}

#[test]
fn empty_classpath_exits_with_config_error() {
    let dir = tempfile::tempdir().unwrap();

    let output = fluxgen(&[
        "generate",
        "--base-dir",
        path_str(dir.path()).as_str(),
        "--fluxtion-exe",
        "/opt/fluxtion/bin/fluxtion",
        "--package-name",
        "com.acme.fx",
        "--class-name",
        "BiasMonitor",
    ]);

    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("FLUXGEN_006"));
}

#[test]
fn missing_required_value_exits_with_config_error() {
    let dir = tempfile::tempdir().unwrap();

    let output = fluxgen(&[
        "command",
        "--base-dir",
        path_str(dir.path()).as_str(),
        "--fluxtion-exe",
        "/opt/fluxtion/bin/fluxtion",
        "--class-name",
        "BiasMonitor",
        "-c",
        "/repo/a.jar",
    ]);

    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("packageName"));
}

#[cfg(unix)]
mod unix {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::os::unix::fs::PermissionsExt;

    fn fake_generator(dir: &Path, exit_code: i32) -> String {
        let exe = dir.join("fluxtion");
        std::fs::write(
            &exe,
            format!(
                "#!/bin/sh\necho generated \"$#\" args\necho generator-diagnostic 1>&2\nexit {}\n",
                exit_code
            ),
        )
        .unwrap();
        std::fs::set_permissions(&exe, std::fs::Permissions::from_mode(0o755)).unwrap();
        path_str(&exe)
    }

    fn generate(dir: &Path, exe: &str, extra: &[&str]) -> Output {
        let base = path_str(dir);
        let mut args = vec![
            "generate",
            "--base-dir",
            base.as_str(),
            "--fluxtion-exe",
            exe,
            "--package-name",
            "com.acme.fx",
            "--class-name",
            "BiasMonitor",
            "-c",
            "/repo/a.jar",
        ];
        args.extend_from_slice(extra);
        fluxgen(&args)
    }

    #[test]
    fn generate_forwards_generator_output() {
        let dir = tempfile::tempdir().unwrap();
        let exe = fake_generator(dir.path(), 0);

        let output = generate(dir.path(), &exe, &[]);
        assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));
        assert!(String::from_utf8_lossy(&output.stdout).contains("generated 14 args"));
        assert!(String::from_utf8_lossy(&output.stderr).contains("-outPackage com.acme.fx"));
    }

    #[test]
    fn generate_merges_generator_stderr_into_stdout() {
        let dir = tempfile::tempdir().unwrap();
        let exe = fake_generator(dir.path(), 0);

        let output = generate(dir.path(), &exe, &[]);
        assert!(output.status.success());
        assert!(String::from_utf8_lossy(&output.stdout).contains("generator-diagnostic"));
        assert!(!String::from_utf8_lossy(&output.stderr).contains("generator-diagnostic"));
    }

    #[test]
    fn relative_executable_resolves_against_base_dir() {
        let dir = tempfile::tempdir().unwrap();
        let project = dir.path().join("proj");
        std::fs::create_dir_all(project.join("bin")).unwrap();
        fake_generator(&project.join("bin"), 0);

        let output = generate(&project, "bin/fluxtion", &[]);
        assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));
        assert!(String::from_utf8_lossy(&output.stdout).contains("generated 14 args"));
    }

    #[test]
    fn generator_failure_exits_with_generation_error() {
        let dir = tempfile::tempdir().unwrap();
        let exe = fake_generator(dir.path(), 5);

        let output = generate(dir.path(), &exe, &[]);
        assert_eq!(output.status.code(), Some(2));
        assert!(String::from_utf8_lossy(&output.stderr)
            .contains("unable to execute fluxtion-statemachine generator"));

        let ignored = generate(dir.path(), &exe, &["--ignore-errors"]);
        assert!(ignored.status.success());
    }

    #[test]
    fn doctor_reports_executable() {
        let dir = tempfile::tempdir().unwrap();
        let exe = fake_generator(dir.path(), 0);

        let output = fluxgen(&["doctor", "--fluxtion-exe", exe.as_str()]);
        assert!(output.status.success());

        let output = fluxgen(&["doctor", "--fluxtion-exe", "/no/such/fluxtion"]);
        assert_eq!(output.status.code(), Some(1));
    }
}
