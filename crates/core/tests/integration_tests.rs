// ═══════════════════════════════════════════════════════════════════
// Integration Tests — PortfolioDashboard end to end
// ═══════════════════════════════════════════════════════════════════

use std::path::Path;

use async_trait::async_trait;

use portfolio_dashboard_core::errors::CoreError;
use portfolio_dashboard_core::models::dataset::DatasetBundle;
use portfolio_dashboard_core::models::news::{Article, NewsFailure};
use portfolio_dashboard_core::models::settings::{DashboardSettings, NewsSettings};
use portfolio_dashboard_core::models::upload::UploadedFile;
use portfolio_dashboard_core::models::view::{ViewId, ViewRequest, Widget};
use portfolio_dashboard_core::models::xirr::XirrDisplayMode;
use portfolio_dashboard_core::providers::traits::NewsProvider;
use portfolio_dashboard_core::services::news_service::NewsService;
use portfolio_dashboard_core::views::daily_value::DailyValueView;
use portfolio_dashboard_core::views::news::NewsView;
use portfolio_dashboard_core::views::overview::OverviewView;
use portfolio_dashboard_core::views::registry::ViewRouter;
use portfolio_dashboard_core::views::stock_charts::StockChartsView;
use portfolio_dashboard_core::views::upload::UploadView;
use portfolio_dashboard_core::views::xirr::XirrView;
use portfolio_dashboard_core::PortfolioDashboard;

fn write_dataset_dir(dir: &Path) {
    std::fs::write(
        dir.join("adjusted_df.json"),
        r#"[
            {"Symbol": "AAPL", "Quantity": 10, "Proceeds": -1850.0, "Date/Time": "2024-01-05 10:00:00"},
            {"Symbol": "GME", "Quantity": 5, "Proceeds": -100.0, "Date/Time": "2024-01-20 11:00:00"},
            {"Symbol": "AAPL", "Quantity": -4, "Proceeds": 760.0, "Date/Time": "2024-03-03 14:00:00"}
        ]"#,
    )
    .unwrap();
    std::fs::write(
        dir.join("price_data.json"),
        r#"{"columns":["AAPL","GME"],"index":["2024-01-05","2024-03-03"],"data":[[185.0,20.0],[190.0,null]]}"#,
    )
    .unwrap();
    std::fs::write(
        dir.join("holdings_pivot.json"),
        r#"{"columns":["AAPL","GME","TSLA"],"index":["2024-03-02","2024-03-03"],"data":[[10,5,0],[6,5,0]]}"#,
    )
    .unwrap();
    std::fs::write(
        dir.join("daily_stocks_value.json"),
        r#"{"columns":["AAPL","GME","Total Value"],"index":["2024-03-02","2024-03-03"],
            "data":[[1850,100,1950],[1140,100,1240.456]]}"#,
    )
    .unwrap();
    std::fs::write(
        dir.join("xirr_results.json"),
        r#"{"AAPL": 0.153, "GME": -0.02, "TSLA": "NaN"}"#,
    )
    .unwrap();
}

fn settings_for(dir: &Path) -> DashboardSettings {
    DashboardSettings {
        data_dir: dir.to_path_buf(),
        ..DashboardSettings::default()
    }
}

fn load_dashboard() -> (tempfile::TempDir, PortfolioDashboard) {
    let dir = tempfile::tempdir().unwrap();
    write_dataset_dir(dir.path());
    let dashboard = PortfolioDashboard::load(settings_for(dir.path())).unwrap();
    (dir, dashboard)
}

struct StaticNews(Result<Vec<Article>, NewsFailure>);

#[async_trait]
impl NewsProvider for StaticNews {
    fn name(&self) -> &str {
        "static"
    }

    async fn latest_articles(&self, _limit: usize) -> Result<Vec<Article>, NewsFailure> {
        self.0.clone()
    }
}

fn dashboard_with_news(result: Result<Vec<Article>, NewsFailure>) -> PortfolioDashboard {
    let dir = tempfile::tempdir().unwrap();
    write_dataset_dir(dir.path());
    let datasets = portfolio_dashboard_core::storage::loader::DatasetLoader::load(dir.path()).unwrap();
    let news = NewsService::with_provider(Box::new(StaticNews(result)), 5);
    PortfolioDashboard::with_news_service(datasets, DashboardSettings::default(), news)
}

// ═══════════════════════════════════════════════════════════════════
// Loading & metrics
// ═══════════════════════════════════════════════════════════════════

mod loading {
    use super::*;

    #[test]
    fn missing_data_dir_fails() {
        let dir = tempfile::tempdir().unwrap();
        let err = PortfolioDashboard::load(settings_for(&dir.path().join("absent"))).unwrap_err();
        assert!(matches!(err, CoreError::DatasetMissing { .. }));
    }

    #[test]
    fn derived_metrics() {
        let (_dir, dashboard) = load_dashboard();

        assert_eq!(dashboard.symbols(), vec!["AAPL", "GME"]);

        let volume = dashboard.trade_volume();
        assert_eq!(volume[0].symbol, "AAPL");
        assert_eq!(volume[0].quantity, 6.0);
        assert_eq!(volume[1].quantity, 5.0);

        let xirr = dashboard.xirr_table();
        assert_eq!(xirr.len(), 2);
        assert_eq!(xirr.get("AAPL"), Some(15.3));
        assert_eq!(xirr.get("GME"), Some(-2.0));

        let activity = dashboard.monthly_activity("AAPL");
        assert_eq!(activity.points.len(), 2);

        let summary = dashboard.snapshot_summary().unwrap();
        assert_eq!(summary.current_total_value, 1240.456);
        assert_eq!(summary.active_holdings, 2);
    }

    #[test]
    fn menu_lists_six_views() {
        let (_dir, dashboard) = load_dashboard();
        assert_eq!(dashboard.menu(), ViewId::ALL.to_vec());
        assert!(format!("{dashboard:?}").contains("trades: 3"));
    }

    #[test]
    fn menu_order_ignores_registration_order() {
        let mut router = ViewRouter::new();
        router.register(Box::new(NewsView::new(NewsService::from_settings(&NewsSettings::default()))));
        router.register(Box::new(UploadView::new()));
        router.register(Box::new(StockChartsView::new()));
        router.register(Box::new(DailyValueView::new()));
        router.register(Box::new(XirrView::new()));
        assert_eq!(
            router.menu(),
            vec![
                ViewId::XirrAnalysis,
                ViewId::DailyPortfolioValue,
                ViewId::IndividualStockCharts,
                ViewId::UploadNewData,
                ViewId::LatestNews,
            ]
        );

        router.register(Box::new(OverviewView::new()));
        assert_eq!(router.menu(), ViewId::ALL.to_vec());
    }

    #[tokio::test]
    async fn empty_datasets_still_render_overview() {
        let dashboard =
            PortfolioDashboard::from_datasets(DatasetBundle::default(), DashboardSettings::default());
        let page = dashboard
            .render(ViewId::PortfolioOverview, &ViewRequest::default())
            .await
            .unwrap();
        assert!(page
            .widgets
            .iter()
            .any(|w| matches!(w, Widget::Info(msg) if msg.contains("is empty"))));
        assert!(page
            .widgets
            .iter()
            .any(|w| matches!(w, Widget::Info(msg) if msg == "No trades loaded.")));
    }
}

// ═══════════════════════════════════════════════════════════════════
// Views
// ═══════════════════════════════════════════════════════════════════

mod views {
    use super::*;

    #[tokio::test]
    async fn every_view_renders() {
        let (_dir, dashboard) = load_dashboard();
        for view in ViewId::ALL {
            let page = dashboard.render(view, &ViewRequest::default()).await.unwrap();
            assert_eq!(page.view, view);
            assert!(!page.widgets.is_empty(), "{view} rendered nothing");
        }
    }

    #[tokio::test]
    async fn overview_metrics() {
        let (_dir, dashboard) = load_dashboard();
        let page = dashboard
            .render(ViewId::PortfolioOverview, &ViewRequest::default())
            .await
            .unwrap();
        assert_eq!(
            page.widgets[0],
            Widget::Metric {
                label: "Current Total Value (2024-03-03)".into(),
                value: "1240.46".into(),
            }
        );
        assert_eq!(
            page.widgets[1],
            Widget::Metric {
                label: "Active Holdings (2024-03-03)".into(),
                value: "2".into(),
            }
        );
    }

    #[tokio::test]
    async fn xirr_defaults_to_top_symbol() {
        let (_dir, dashboard) = load_dashboard();
        let page = dashboard
            .render(ViewId::XirrAnalysis, &ViewRequest::default())
            .await
            .unwrap();
        let Some(Widget::Table(table)) = page.widgets.first() else {
            panic!("expected table first");
        };
        assert_eq!(table.columns, vec!["Symbol", "XIRR (%)"]);
        assert_eq!(table.rows[0], vec!["AAPL", "15.30%"]);
        assert_eq!(table.rows[1], vec!["GME", "-2.00%"]);
        assert!(matches!(
            page.widgets.last(),
            Some(Widget::Metric { label, .. }) if label == "XIRR for AAPL"
        ));
    }

    #[tokio::test]
    async fn xirr_unknown_symbol_warns() {
        let (_dir, dashboard) = load_dashboard();
        let page = dashboard
            .render(ViewId::XirrAnalysis, &ViewRequest::with_symbol("TSLA"))
            .await
            .unwrap();
        assert_eq!(page.warnings().collect::<Vec<_>>(), vec!["No valid XIRR result for TSLA."]);
    }

    #[tokio::test]
    async fn xirr_fraction_mode() {
        let dir = tempfile::tempdir().unwrap();
        write_dataset_dir(dir.path());
        let settings = DashboardSettings {
            xirr_display: XirrDisplayMode::Fraction,
            ..settings_for(dir.path())
        };
        let dashboard = PortfolioDashboard::load(settings).unwrap();
        assert_eq!(dashboard.xirr_table().get("AAPL"), Some(0.153));

        let page = dashboard
            .render(ViewId::XirrAnalysis, &ViewRequest::with_symbol("GME"))
            .await
            .unwrap();
        assert!(matches!(
            page.widgets.last(),
            Some(Widget::Metric { value, .. }) if value == "-2.00%"
        ));
    }

    #[tokio::test]
    async fn stock_charts_for_selected_symbol() {
        let (_dir, dashboard) = load_dashboard();
        let page = dashboard
            .render(ViewId::IndividualStockCharts, &ViewRequest::with_symbol("AAPL"))
            .await
            .unwrap();
        let Some(Widget::BarChart(quantity)) = page.widgets.get(1) else {
            panic!("expected quantity chart");
        };
        let labels: Vec<&str> = quantity.bars.iter().map(|b| b.label.as_str()).collect();
        assert_eq!(labels, vec!["2024-01-31", "2024-03-31"]);
        assert!(page
            .widgets
            .iter()
            .any(|w| matches!(w, Widget::LineChart(line) if line.points.len() == 2)));
    }

    #[tokio::test]
    async fn stock_charts_unknown_symbol() {
        let (_dir, dashboard) = load_dashboard();
        let page = dashboard
            .render(ViewId::IndividualStockCharts, &ViewRequest::with_symbol("NVDA"))
            .await
            .unwrap();
        assert_eq!(
            page.warnings().collect::<Vec<_>>(),
            vec!["No trades for NVDA. Available: AAPL, GME"]
        );
    }

    #[tokio::test]
    async fn daily_value_line() {
        let (_dir, dashboard) = load_dashboard();
        let page = dashboard
            .render(ViewId::DailyPortfolioValue, &ViewRequest::default())
            .await
            .unwrap();
        assert!(matches!(&page.widgets[1], Widget::LineChart(line) if line.points.len() == 2));
    }

    #[tokio::test]
    async fn upload_handles_each_file() {
        let (_dir, dashboard) = load_dashboard();
        let request = ViewRequest::with_uploads(vec![
            UploadedFile::new("good.csv", "a,b\n1,2\n3,4\n"),
            UploadedFile::new("empty.csv", ""),
            UploadedFile::new("also_good.csv", "x\n1\n"),
        ]);
        let page = dashboard.render(ViewId::UploadNewData, &request).await.unwrap();

        let successes: Vec<&str> = page
            .widgets
            .iter()
            .filter_map(|w| match w {
                Widget::Success(msg) => Some(msg.as_str()),
                _ => None,
            })
            .collect();
        assert_eq!(
            successes,
            vec!["Uploaded: good.csv - 2 rows", "Uploaded: also_good.csv - 1 rows"]
        );
        let warnings: Vec<&str> = page.warnings().collect();
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].starts_with("Could not parse empty.csv"));
    }

    #[tokio::test]
    async fn view_json_export() {
        let (_dir, dashboard) = load_dashboard();
        let page = dashboard
            .render(ViewId::DailyPortfolioValue, &ViewRequest::default())
            .await
            .unwrap();
        let json = PortfolioDashboard::view_to_json(&page).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["view"], "DailyPortfolioValue");
        assert_eq!(value["widgets"][0]["kind"], "metric");
    }
}

// ═══════════════════════════════════════════════════════════════════
// News
// ═══════════════════════════════════════════════════════════════════

mod news {
    use super::*;

    #[tokio::test]
    async fn articles_are_listed_with_dividers() {
        let articles = vec![Article {
            title: "Stocks rally".into(),
            description: None,
            url: "https://n.example/1".into(),
        }];
        let dashboard = dashboard_with_news(Ok(articles));
        let page = dashboard
            .render(ViewId::LatestNews, &ViewRequest::default())
            .await
            .unwrap();
        assert_eq!(page.widgets.len(), 2);
        assert!(matches!(&page.widgets[0], Widget::Article(a) if a.title == "Stocks rally"));
        assert_eq!(page.widgets[1], Widget::Divider);
    }

    #[tokio::test]
    async fn failure_becomes_warning() {
        let dashboard = dashboard_with_news(Err(NewsFailure::Network("timed out".into())));
        let page = dashboard
            .render(ViewId::LatestNews, &ViewRequest::default())
            .await
            .unwrap();
        let warnings: Vec<&str> = page.warnings().collect();
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].contains("internet connection"));
    }

    #[tokio::test]
    async fn no_articles_is_info() {
        let dashboard = dashboard_with_news(Ok(Vec::new()));
        let page = dashboard
            .render(ViewId::LatestNews, &ViewRequest::default())
            .await
            .unwrap();
        assert_eq!(page.widgets, vec![Widget::Info("No articles found.".into())]);
    }

    #[tokio::test]
    async fn missing_key_warns_but_other_views_work() {
        let (_dir, dashboard) = load_dashboard();
        let page = dashboard
            .render(ViewId::LatestNews, &ViewRequest::default())
            .await
            .unwrap();
        assert!(page.warnings().next().unwrap().contains("NEWSAPI_KEY"));

        let overview = dashboard
            .render(ViewId::PortfolioOverview, &ViewRequest::default())
            .await;
        assert!(overview.is_ok());
    }
}

// ═══════════════════════════════════════════════════════════════════
// Bundle export
// ═══════════════════════════════════════════════════════════════════

mod bundle {
    use super::*;

    #[test]
    fn save_then_load_bundle() {
        let (dir, dashboard) = load_dashboard();
        let path = dir.path().join("portfolio.pfdb");
        dashboard.save_bundle(&path).unwrap();

        let reloaded = PortfolioDashboard::load(settings_for(&path)).unwrap();
        assert_eq!(reloaded.context().datasets(), dashboard.context().datasets());
        assert_eq!(reloaded.xirr_table(), dashboard.xirr_table());
    }
}
