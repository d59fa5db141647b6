use assert_cmd::Command;
use std::fs;
use tempfile::tempdir;

#[allow(deprecated)]
fn host_lca() -> Command {
    let mut cmd = Command::cargo_bin("host-lca").expect("binary");
    cmd.env_remove("HOST_LCA_CONFIG");
    cmd
}

#[test]
fn links_rejects_relative_url() {
    host_lca()
        .args(["links", "--url", "/page/download/deNovoDownload"])
        .assert()
        .failure()
        .stderr(predicates::str::contains("base_url is not an absolute URL"));
}

#[test]
fn links_rejects_invalid_config_file() {
    let temp = tempdir().unwrap();
    let config = temp.path().join("host-lca.toml");
    fs::write(&config, "[fetch]\ntimeout_secs = 0\n").unwrap();

    host_lca()
        .arg("--config")
        .arg(&config)
        .arg("links")
        .assert()
        .failure()
        .stderr(predicates::str::contains("Invalid config"));
}
