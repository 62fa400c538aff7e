// ═══════════════════════════════════════════════════════════════════
// CLI Tests — subcommands against on-disk fixtures
// ═══════════════════════════════════════════════════════════════════

use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;

fn write_dataset_dir(dir: &Path) {
    std::fs::write(
        dir.join("adjusted_df.json"),
        r#"[
            {"Symbol": "AAPL", "Quantity": 10, "Proceeds": -1850.0, "Date/Time": "2024-01-05 10:00:00"},
            {"Symbol": "GME", "Quantity": 5, "Proceeds": -100.0, "Date/Time": "2024-02-20 11:00:00"}
        ]"#,
    )
    .unwrap();
    std::fs::write(
        dir.join("price_data.json"),
        r#"{"columns":["AAPL","GME"],"index":["2024-01-05","2024-02-20"],"data":[[185.0,null],[190.0,20.0]]}"#,
    )
    .unwrap();
    std::fs::write(
        dir.join("holdings_pivot.json"),
        r#"{"columns":["AAPL","GME"],"index":["2024-02-20"],"data":[[10,5]]}"#,
    )
    .unwrap();
    std::fs::write(
        dir.join("daily_stocks_value.json"),
        r#"{"columns":["Total Value"],"index":["2024-02-19","2024-02-20"],"data":[[1950.0],[2000.0]]}"#,
    )
    .unwrap();
    std::fs::write(
        dir.join("xirr_results.json"),
        r#"{"AAPL": 0.153, "GME": -0.02, "TSLA": "NaN"}"#,
    )
    .unwrap();
}

/// Binary run from `dir`, with the dashboard's environment cleared.
fn dashboard(dir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("portfolio-dashboard").unwrap();
    cmd.current_dir(dir)
        .env_remove("NEWSAPI_KEY")
        .env_remove("DASHBOARD_DATA_DIR")
        .env_remove("CLICOLOR_FORCE")
        .env("NO_COLOR", "1")
        .env("CLICOLOR", "0");
    cmd
}

mod pages {
    use super::*;

    #[test]
    fn overview_table() {
        let dir = tempfile::tempdir().unwrap();
        write_dataset_dir(dir.path());

        dashboard(dir.path())
            .args(["--data-dir", ".", "overview"])
            .assert()
            .success()
            .stdout(predicate::str::contains("Portfolio Overview"))
            .stdout(predicate::str::contains("Current Total Value (2024-02-20): 2000.00"))
            .stdout(predicate::str::contains("Active Holdings (2024-02-20): 2"));
    }

    #[test]
    fn xirr_json() {
        let dir = tempfile::tempdir().unwrap();
        write_dataset_dir(dir.path());

        let output = dashboard(dir.path())
            .args(["--format", "json", "xirr", "--symbol", "GME"])
            .env("DASHBOARD_DATA_DIR", dir.path())
            .output()
            .unwrap();
        assert!(output.status.success());

        let page: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
        assert_eq!(page["view"], "XirrAnalysis");
        assert_eq!(page["widgets"][0]["data"]["rows"][0][1], "15.30%");
        let last = page["widgets"].as_array().unwrap().last().unwrap().clone();
        assert_eq!(last["data"]["label"], "XIRR for GME");
        assert_eq!(last["data"]["value"], "-2.00%");
    }

    #[test]
    fn stock_unknown_symbol_warns() {
        let dir = tempfile::tempdir().unwrap();
        write_dataset_dir(dir.path());

        dashboard(dir.path())
            .args(["stock", "--symbol", "NVDA"])
            .args(["--data-dir", "."])
            .assert()
            .success()
            .stderr(predicate::str::contains("No trades for NVDA. Available: AAPL, GME"));
    }

    #[test]
    fn news_without_key_warns() {
        let dir = tempfile::tempdir().unwrap();
        write_dataset_dir(dir.path());

        dashboard(dir.path())
            .args(["--data-dir", ".", "news"])
            .assert()
            .success()
            .stderr(predicate::str::contains("NEWSAPI_KEY"));
    }
}

mod upload {
    use super::*;

    #[test]
    fn each_file_is_handled_independently() {
        let dir = tempfile::tempdir().unwrap();
        write_dataset_dir(dir.path());
        std::fs::write(dir.path().join("good.csv"), "a,b\n1,2\n3,4\n").unwrap();
        std::fs::write(dir.path().join("empty.csv"), "").unwrap();

        dashboard(dir.path())
            .args(["--data-dir", ".", "upload", "good.csv", "empty.csv", "missing.csv"])
            .assert()
            .success()
            .stdout(predicate::str::contains("Uploaded: good.csv - 2 rows"))
            .stderr(predicate::str::contains("Could not parse empty.csv"))
            .stderr(predicate::str::contains("Could not read missing.csv"));
    }
}

mod errors {
    use super::*;

    #[test]
    fn missing_data_dir_fails() {
        let dir = tempfile::tempdir().unwrap();

        dashboard(dir.path())
            .args(["--data-dir", "nowhere", "overview"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("failed to load datasets from nowhere"));
    }

    #[test]
    fn unknown_subcommand_fails() {
        let dir = tempfile::tempdir().unwrap();
        dashboard(dir.path()).arg("settings").assert().failure();
    }

    #[test]
    fn zero_news_timeout_rejected() {
        let dir = tempfile::tempdir().unwrap();
        write_dataset_dir(dir.path());

        dashboard(dir.path())
            .args(["--data-dir", ".", "news", "--timeout-secs", "0"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("--timeout-secs"))
            .stderr(predicate::str::contains("0"));
    }
}

mod bundle {
    use super::*;

    #[test]
    fn bundle_then_render_from_it() {
        let dir = tempfile::tempdir().unwrap();
        write_dataset_dir(dir.path());

        dashboard(dir.path())
            .args(["--data-dir", ".", "bundle", "portfolio.pfdb"])
            .assert()
            .success()
            .stdout(predicate::str::contains("Wrote bundle to portfolio.pfdb"));

        dashboard(dir.path())
            .args(["--data-dir", "portfolio.pfdb", "daily-value"])
            .assert()
            .success()
            .stdout(predicate::str::contains("Total Value (2024-02-20): 2000.00"));
    }
}
