//! Integration tests for pkgdocs

mod cli_tests {
    use assert_cmd::{cargo::cargo_bin_cmd, Command};
    use predicates::prelude::*;
    use tempfile::TempDir;

    fn pkgdocs() -> Command {
        cargo_bin_cmd!("pkgdocs")
    }

    #[test]
    fn help_displays() {
        pkgdocs()
            .arg("--help")
            .assert()
            .success()
            .stdout(predicate::str::contains("Browse package registry documentation"));
    }

    #[test]
    fn version_displays() {
        pkgdocs()
            .arg("--version")
            .assert()
            .success()
            .stdout(predicate::str::contains("pkgdocs"));
    }

    #[test]
    fn config_path() {
        pkgdocs()
            .args(["config", "path"])
            .assert()
            .success()
            .stdout(predicate::str::contains("config.toml"));
    }

    #[test]
    fn config_path_honors_env() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("custom.toml");

        pkgdocs()
            .env("PKGDOCS_CONFIG", &path)
            .args(["config", "path"])
            .assert()
            .success()
            .stdout(predicate::str::contains("custom.toml"));
    }

    #[test]
    fn config_show() {
        let temp = TempDir::new().unwrap();
        pkgdocs()
            .env("PKGDOCS_CONFIG", temp.path().join("config.toml"))
            .args(["config", "show"])
            .assert()
            .success()
            .stdout(predicate::str::contains("[registry]"));
    }

    #[test]
    fn config_init_then_set() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.toml");

        pkgdocs()
            .env("PKGDOCS_CONFIG", &path)
            .args(["config", "init"])
            .assert()
            .success();
        assert!(path.exists());

        pkgdocs()
            .env("PKGDOCS_CONFIG", &path)
            .args(["config", "set", "registry.timeout_secs", "5"])
            .assert()
            .success();

        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.contains("timeout_secs = 5"));
    }

    #[test]
    fn config_set_unknown_key_fails() {
        let temp = TempDir::new().unwrap();
        pkgdocs()
            .env("PKGDOCS_CONFIG", temp.path().join("config.toml"))
            .args(["config", "set", "registry.port", "80"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("Unknown config key"));
    }

    #[test]
    fn invalid_package_name() {
        pkgdocs()
            .args(["releases", "not-a-package"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("author/project"));
    }

    #[test]
    fn invalid_version() {
        pkgdocs()
            .args(["readme", "elm/core", "--version", "one"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("Invalid version"));
    }

    #[test]
    fn completions_bash() {
        pkgdocs()
            .args(["completions", "bash"])
            .assert()
            .success()
            .stdout(predicate::str::contains("pkgdocs"));
    }
}

/// Runs the CLI against a mock registry
mod registry_tests {
    use assert_cmd::{cargo::cargo_bin_cmd, Command};
    use predicates::prelude::*;
    use std::path::PathBuf;
    use tempfile::TempDir;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const RELEASES: &str = r#"{"1.0.0": 1534000000, "1.0.5": 1580000000}"#;

    /// Serve fixed bodies by path; unknown paths are 404
    async fn serve(routes: &[(&str, &str)]) -> MockServer {
        let server = MockServer::start().await;
        for (route, body) in routes {
            Mock::given(method("GET"))
                .and(path(*route))
                .respond_with(ResponseTemplate::new(200).set_body_string(*body))
                .mount(&server)
                .await;
        }
        server
    }

    fn config_for(temp: &TempDir, base_url: &str) -> PathBuf {
        let path = temp.path().join("config.toml");
        std::fs::write(
            &path,
            format!(
                "[registry]\nbase_url = \"{}\"\ntimeout_secs = 5\n\n[display]\ncolor = false\n",
                base_url
            ),
        )
        .unwrap();
        path
    }

    fn pkgdocs(config: &PathBuf) -> Command {
        let mut cmd = cargo_bin_cmd!("pkgdocs");
        cmd.env("PKGDOCS_CONFIG", config);
        cmd
    }

    // The CLI blocks its test thread, so the mock server needs another worker
    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn releases_page_lists_versions() {
        let server = serve(&[("/packages/elm/core/releases.json", RELEASES)]).await;
        let temp = TempDir::new().unwrap();
        let config = config_for(&temp, &server.uri());

        pkgdocs(&config)
            .args(["releases", "elm/core"])
            .assert()
            .success()
            .stdout(predicate::str::contains("elm/core releases"))
            .stdout(predicate::str::contains("1.0.5"))
            .stdout(predicate::str::contains("latest"));
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn latest_readme_resolves_version() {
        let server = serve(&[
            ("/packages/elm/core/releases.json", RELEASES),
            ("/packages/elm/core/1.0.5/README.md", "# core\n\nThe core library.\n"),
        ])
        .await;
        let temp = TempDir::new().unwrap();
        let config = config_for(&temp, &server.uri());

        pkgdocs(&config)
            .args(["readme", "elm/core"])
            .assert()
            .success()
            .stdout(predicate::str::contains("elm/core 1.0.5"))
            .stdout(predicate::str::contains("The core library."));
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn json_format_prints_page_data() {
        let server = serve(&[("/packages/elm/core/releases.json", RELEASES)]).await;
        let temp = TempDir::new().unwrap();
        let config = config_for(&temp, &server.uri());

        pkgdocs(&config)
            .args(["--format", "json", "releases", "elm/core"])
            .assert()
            .success()
            .stdout(predicate::str::contains(r#""page": "releases""#))
            .stdout(predicate::str::contains(r#""latest": "1.0.5""#));
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn missing_package_shows_error_page() {
        let server = serve(&[]).await;
        let temp = TempDir::new().unwrap();
        let config = config_for(&temp, &server.uri());

        pkgdocs(&config)
            .args(["releases", "nobody/nothing"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("not found"));
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn registry_outage_shows_error_page() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&server)
            .await;
        let temp = TempDir::new().unwrap();
        let config = config_for(&temp, &server.uri());

        pkgdocs(&config)
            .args(["releases", "elm/core"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("HTTP 503"));
    }
}
