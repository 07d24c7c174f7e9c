// tests/source_filter.rs
use etl_pipeline_monitor::catalog::{Catalog, SourceCategory, SourceFilter};
use etl_pipeline_monitor::{Dashboard, DashboardConfig, MemorySurface, Slot};

#[test]
fn database_filter_returns_exactly_the_database_subset() {
    let catalog = Catalog::default_seed();
    let got: Vec<&str> = catalog
        .filtered_sources(SourceFilter::Category(SourceCategory::Database))
        .iter()
        .map(|s| s.name.as_str())
        .collect();
    let want: Vec<&str> = catalog
        .sources()
        .iter()
        .filter(|s| s.category == SourceCategory::Database)
        .map(|s| s.name.as_str())
        .collect();
    assert_eq!(got, want);
    assert_eq!(
        got,
        vec!["PostgreSQL - Users", "MySQL - Transactions", "MongoDB - Events"]
    );
}

#[test]
fn all_filter_returns_full_catalog() {
    let catalog = Catalog::default_seed();
    assert_eq!(
        catalog.filtered_sources(SourceFilter::All).len(),
        catalog.sources().len()
    );
}

#[test]
fn categories_partition_the_catalog() {
    let catalog = Catalog::default_seed();
    let total: usize = SourceCategory::ALL
        .iter()
        .map(|c| catalog.filtered_sources(SourceFilter::Category(*c)).len())
        .sum();
    assert_eq!(total, catalog.sources().len());
}

fn rows(html: &str) -> usize {
    html.matches("<tr").count()
}

#[test]
fn filter_click_marks_one_control_and_rerenders_table() {
    let surface = MemorySurface::new();
    let cfg = DashboardConfig {
        rng_seed: Some(8),
        ..DashboardConfig::default()
    };
    let mut d = Dashboard::new(cfg, surface.clone());
    d.start();
    assert_eq!(surface.active_filter(), SourceFilter::All);
    assert_eq!(rows(&surface.text(Slot::SourcesBody).unwrap()), 8);

    for filter in SourceFilter::ALL {
        d.select_filter(filter);
        assert_eq!(surface.active_filter(), filter);
        assert_eq!(d.active_filter(), filter);
        let html = surface.text(Slot::SourcesBody).unwrap();
        assert_eq!(rows(&html), d.catalog().filtered_sources(filter).len());
        if let SourceFilter::Category(c) = filter {
            assert_eq!(html.matches(&format!("data-category=\"{c}\"")).count(), rows(&html));
        }
    }
}

#[test]
fn periodic_table_refresh_keeps_the_active_filter() {
    let surface = MemorySurface::new();
    let mut d = Dashboard::new(DashboardConfig::default(), surface.clone());
    d.start();
    d.select_filter("file".parse().unwrap());
    d.advance(std::time::Duration::from_secs(5));
    let html = surface.text(Slot::SourcesBody).unwrap();
    assert_eq!(rows(&html), 2);
    assert!(html.contains("CSV Uploads"));
    assert!(html.contains("S3 - Logs"));
}
