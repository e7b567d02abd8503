use assert_cmd::Command;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

const SOURCE: &str = r#"
pub fn clamp(x: i32, lo: i32, hi: i32) -> i32 {
    if x < lo {
        lo
    } else if x > hi {
        hi
    } else {
        x + 0 * (hi - lo)
    }
}
"#;

fn write_source(dir: &TempDir) -> std::path::PathBuf {
    let path = dir.path().join("clamp.rs");
    fs::write(&path, SOURCE).expect("write source");
    path
}

fn bin() -> Command {
    Command::cargo_bin("operator-mutants").expect("binary should build")
}

fn read_dir_sorted(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = fs::read_dir(dir)
        .expect("read output dir")
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}

#[test]
fn generate_writes_one_file_per_mutant() {
    let td = TempDir::new().unwrap();
    let source = write_source(&td);
    let out = td.path().join("mutants");

    bin()
        .arg("generate")
        .arg(&source)
        .arg("5")
        .arg("--family")
        .arg("comparison")
        .arg("--out-dir")
        .arg(&out)
        .arg("--manifest")
        .assert()
        .success();

    assert_eq!(
        read_dir_sorted(&out),
        vec!["0.rs", "1.rs", "2.rs", "3.rs", "4.rs", "manifest.json"]
    );

    let manifest: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(out.join("manifest.json")).unwrap()).unwrap();
    let entries = manifest["entries"].as_array().unwrap();
    assert_eq!(entries.len(), 5);
    for entry in entries {
        assert_eq!(entry["family"], "comparison");
        assert_eq!(entry["status"], "mutated");
        assert_ne!(entry["original"], entry["replacement"]);
    }

    // Exactly one of the two comparisons changed in every mutant
    for i in 0..5 {
        let text = fs::read_to_string(out.join(format!("{}.rs", i))).unwrap();
        let kept = ["x < lo", "x > hi"]
            .iter()
            .filter(|needle| text.contains(*needle))
            .count();
        assert_eq!(kept, 1, "mutant {} changed the wrong number of sites:\n{}", i, text);
    }
}

#[test]
fn generate_is_reproducible_across_runs() {
    let td = TempDir::new().unwrap();
    let source = write_source(&td);

    let run = |dir: &str, parallel: bool| {
        let out = td.path().join(dir);
        let mut cmd = bin();
        cmd.arg("generate")
            .arg(&source)
            .arg("8")
            .arg("--round-robin")
            .arg("--seed")
            .arg("99")
            .arg("--out-dir")
            .arg(&out);
        if parallel {
            cmd.arg("--parallel");
        }
        cmd.assert().success();
        (0..8)
            .map(|i| fs::read_to_string(out.join(format!("{}.rs", i))).unwrap())
            .collect::<Vec<_>>()
    };

    let first = run("a", false);
    let second = run("b", false);
    let parallel = run("c", true);
    assert_eq!(first, second);
    assert_eq!(first, parallel);
}

#[test]
fn generate_without_candidates_fails() {
    let td = TempDir::new().unwrap();
    let source = td.path().join("plain.rs");
    fs::write(&source, "pub fn id(x: i32) -> i32 { x }\n").unwrap();

    let output = bin()
        .arg("generate")
        .arg(&source)
        .arg("1")
        .arg("--family")
        .arg("comparison")
        .arg("--out-dir")
        .arg(td.path().join("out"))
        .output()
        .unwrap();

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("No candidate sites"), "stderr: {}", stderr);
}

#[test]
fn generate_rejects_unparsable_source() {
    let td = TempDir::new().unwrap();
    let source = td.path().join("broken.rs");
    fs::write(&source, "pub fn broken( {").unwrap();

    let output = bin().arg("generate").arg(&source).output().unwrap();
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("Failed to parse"));
}

#[test]
fn generate_reads_config_file() {
    let td = TempDir::new().unwrap();
    let source = write_source(&td);
    let out = td.path().join("from-config");
    let config = td.path().join("mutants.yaml");
    fs::write(
        &config,
        format!(
            "version: \"1.0\"\nsettings:\n  count: 3\n  family: sub\noutput:\n  dir: {}\n  extension: txt\n",
            out.display()
        ),
    )
    .unwrap();

    bin()
        .arg("generate")
        .arg(&source)
        .arg("--config")
        .arg(&config)
        .assert()
        .success();

    assert_eq!(read_dir_sorted(&out), vec!["0.txt", "1.txt", "2.txt"]);
}

#[test]
fn families_lists_catalog() {
    let output = bin().arg("families").output().unwrap();
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    for name in ["arithmetic", "comparison", "logical", "compound-assign"] {
        assert!(stdout.contains(name), "missing {} in:\n{}", name, stdout);
    }
}

#[test]
fn sites_lists_candidates() {
    let td = TempDir::new().unwrap();
    let source = write_source(&td);

    let output = bin()
        .arg("sites")
        .arg(&source)
        .arg("--family")
        .arg("gt")
        .output()
        .unwrap();
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("gt"));
    assert!(stdout.contains("clamp.rs:5:"), "stdout:\n{}", stdout);
}

#[test]
fn generate_writes_large_counts() {
    let td = TempDir::new().unwrap();
    let source = write_source(&td);

    for (dir, parallel) in [("seq", false), ("par", true)] {
        let out = td.path().join(dir);
        let mut cmd = bin();
        cmd.arg("generate")
            .arg(&source)
            .arg("500")
            .arg("--round-robin")
            .arg("--out-dir")
            .arg(&out)
            .arg("--manifest");
        if parallel {
            cmd.arg("--parallel");
        }
        cmd.assert().success();

        assert!(out.join("0.rs").is_file());
        assert!(out.join("499.rs").is_file());
        assert!(!out.join("500.rs").exists());

        let manifest: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(out.join("manifest.json")).unwrap()).unwrap();
        let entries = manifest["entries"].as_array().unwrap();
        assert_eq!(entries.len(), 500);
        assert_eq!(entries[499]["index"], 499);
    }
}

#[test]
fn generate_fails_when_output_dir_is_a_file() {
    let td = TempDir::new().unwrap();
    let source = write_source(&td);
    let blocked = td.path().join("blocked");
    fs::write(&blocked, "").unwrap();

    let output = bin()
        .arg("generate")
        .arg(&source)
        .arg("3")
        .arg("--out-dir")
        .arg(&blocked)
        .output()
        .unwrap();

    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("Failed to write"));
}
