//! End-to-end tests for the `ratecard` binary.

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

/// A command isolated from any policy file on the host.
fn ratecard() -> (TempDir, Command) {
    let home = tempfile::tempdir().unwrap();
    let mut cmd = Command::cargo_bin("ratecard").unwrap();
    cmd.env_remove("RATECARD_CONFIG")
        .env_remove("RUST_LOG")
        .env("HOME", home.path())
        .env("XDG_CONFIG_HOME", home.path());
    (home, cmd)
}

#[test]
fn quote_prints_every_offer() {
    let (_home, mut cmd) = ratecard();
    cmd.args(["quote", "1399", "--name", "Phone A"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Product Name: Phone A"))
        .stdout(predicate::str::contains("$1,399.00"))
        .stdout(predicate::str::contains("$949.00"))
        .stdout(predicate::str::contains("MaaS Price"))
        .stdout(predicate::str::contains("$66.18"));
}

#[test]
fn quote_json_normalized() {
    let (_home, mut cmd) = ratecard();
    let output = cmd
        .args(["--format", "json", "quote", "399", "--normalize"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let row: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(row["name"], "Undefined Product");
    assert_eq!(row["contract"], "0.00");
    assert_eq!(row["subscription"], "16.63");
    assert_eq!(row["finance_24"], "18.99");
    assert_eq!(row["finance_36"], "13.49");
}

#[test]
fn quote_rejects_negative_price() {
    let (_home, mut cmd) = ratecard();
    cmd.args(["quote", "--", "-5"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("must not be negative"));
}

#[test]
fn quote_rejects_garbage_price() {
    let (_home, mut cmd) = ratecard();
    cmd.args(["quote", "abc"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not a number"));
}

#[test]
fn table_csv_keeps_order() {
    let (_home, mut cmd) = ratecard();
    cmd.args([
        "-f", "csv", "table", "-p", "1399=Phone A", "-p", "799=Phone B",
    ])
    .assert()
    .success()
    .stdout(
        "Product,Retail,Contract,MaaS,24M Finance,36M Finance\n\
         Phone A,1399.00,949.00,58.29,66.18,46.80\n\
         Phone B,799.00,349.00,33.29,37.80,26.73\n",
    );
}

#[test]
fn table_demo_products() {
    let (_home, mut cmd) = ratecard();
    cmd.args(["table", "--demo"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Apple iPhone SE (2020) 64GB"))
        .stdout(predicate::str::contains("Samsung Galaxy S22"));
}

#[test]
fn table_without_products_fails() {
    let (_home, mut cmd) = ratecard();
    cmd.arg("table")
        .assert()
        .failure()
        .stderr(predicate::str::contains("No products given"));
}

#[test]
fn table_from_file_to_file() {
    let (home, mut cmd) = ratecard();
    let input = home.path().join("products.csv");
    let output = home.path().join("rates.csv");
    std::fs::write(&input, "retail,name\n1399,Phone A\n799,Phone B\n").unwrap();

    cmd.arg("table")
        .arg("--input")
        .arg(&input)
        .arg("--output")
        .arg(&output)
        .arg("--normalize")
        .assert()
        .success()
        .stdout(predicate::str::contains("Wrote 2 rows"));

    let written = std::fs::read_to_string(&output).unwrap();
    let lines: Vec<_> = written.lines().collect();
    assert_eq!(lines.len(), 3);
    assert_eq!(lines[1], "Phone A,1399.00,949.00,58.29,66.49,46.99");
    assert_eq!(lines[2], "Phone B,799.00,349.00,33.29,37.99,26.49");
}

#[test]
fn device_policy_from_config_file() {
    let (home, mut init) = ratecard();
    let policy = home.path().join("device.toml");
    init.args(["config", "init", "--preset", "device", "--path"])
        .arg(&policy)
        .assert()
        .success();

    let mut cmd = Command::cargo_bin("ratecard").unwrap();
    cmd.env("RATECARD_CONFIG", &policy)
        .args(["-f", "csv", "table", "-p", "999.99=Laptop"])
        .assert()
        .success()
        .stdout(predicate::str::contains("MDaaS"))
        .stdout(predicate::str::contains("Laptop,999.99,549.99,41.67,47.31,33.45"));
}

#[test]
fn config_init_refuses_overwrite() {
    let (home, mut first) = ratecard();
    let policy = home.path().join("policy.toml");
    first
        .args(["config", "init", "--path"])
        .arg(&policy)
        .assert()
        .success();

    let (_other, mut second) = ratecard();
    second
        .args(["config", "init", "--path"])
        .arg(&policy)
        .assert()
        .failure()
        .stderr(predicate::str::contains("--force"));
}

#[test]
fn config_show_reports_defaults() {
    let (_home, mut cmd) = ratecard();
    cmd.args(["config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("450.00"))
        .stdout(predicate::str::contains("12.5%"))
        .stdout(predicate::str::contains("built-in defaults"));
}
