//! End-to-end query tests over an in-memory registry

mod helper;

use helper::{StubRegistry, create_test_resolver};
use pypi_versions::output::{OutputFormat, RenderOptions, render};
use pypi_versions::query::tokens::{disambiguate, packages};
use pypi_versions::query::{
    QueryKind, QueryOptions, QueryOutcome, QueryRequest, Resolution, ResolveError,
};
use pypi_versions::version::channel::ChannelFilter;

fn pandas_registry() -> StubRegistry {
    StubRegistry::new()
        .with_package("pandas", "2.0.0", &["1.5.3", "2.0.0-rc.0", "2.0.0", "0.25.3"])
        .with_release("pandas", "2.0.0", &["numpy>=1.21.0", "pytz>=2020.1"])
        .with_release("pandas", "1.5.3", &["python-dateutil>=2.8.1"])
        .with_package("requests", "2.31.0", &["2.31.0"])
        .with_release("requests", "2.31.0", &["idna<4,>=2.5"])
        .with_package("numpy", "1.26.0", &["1.26.0"])
        .with_release("numpy", "1.26.0", &[])
}

fn resolution(outcome: &QueryOutcome) -> &Resolution {
    match &outcome.result {
        Ok(resolution) => resolution,
        Err(e) => panic!("{} failed: {}", outcome.request.package, e),
    }
}

fn rendered_text(outcomes: &[QueryOutcome]) -> String {
    let mut buffer = Vec::new();
    render(outcomes, &RenderOptions::default(), &mut buffer).unwrap();
    String::from_utf8(buffer).unwrap()
}

#[tokio::test]
async fn deps_binds_version_token_to_preceding_package() {
    let (registry, resolver) = create_test_resolver(pandas_registry(), QueryOptions::default());

    let outcomes = resolver
        .run(QueryKind::Dependencies, disambiguate(&["pandas", "2.0.0"]))
        .await;

    assert_eq!(outcomes.len(), 1);
    assert_eq!(
        resolution(&outcomes[0]),
        &Resolution::Dependencies {
            version: "2.0.0".to_string(),
            via_latest: false,
            requirements: vec!["numpy>=1.21.0".to_string(), "pytz>=2020.1".to_string()],
        }
    );
    assert_eq!(registry.calls(), vec!["pandas@2.0.0"]);
}

#[tokio::test]
async fn deps_without_version_resolves_current_version_first() {
    let (registry, resolver) = create_test_resolver(pandas_registry(), QueryOptions::default());

    let outcomes = resolver
        .run(QueryKind::Dependencies, disambiguate(&["pandas"]))
        .await;

    assert_eq!(
        resolution(&outcomes[0]),
        &Resolution::Dependencies {
            version: "2.0.0".to_string(),
            via_latest: true,
            requirements: vec!["numpy>=1.21.0".to_string(), "pytz>=2020.1".to_string()],
        }
    );
    assert_eq!(registry.calls(), vec!["pandas", "pandas@2.0.0"]);
}

#[tokio::test]
async fn deps_mixed_tokens_resolve_in_order() {
    let (registry, resolver) = create_test_resolver(pandas_registry(), QueryOptions::default());

    let requests = disambiguate(&["pandas", "1.5.3", "requests", "numpy", "latest"]);
    assert_eq!(
        requests,
        vec![
            QueryRequest::exact("pandas", "1.5.3"),
            QueryRequest::latest("requests"),
            QueryRequest::latest("numpy"),
        ]
    );

    let outcomes = resolver.run(QueryKind::Dependencies, requests).await;

    assert!(outcomes.iter().all(QueryOutcome::is_success));
    assert_eq!(
        registry.calls(),
        vec![
            "pandas@1.5.3",
            "requests",
            "requests@2.31.0",
            "numpy",
            "numpy@1.26.0"
        ]
    );
    assert_eq!(
        rendered_text(&outcomes),
        "Dependencies for pandas version 1.5.3:\n\
         \x20 - python-dateutil>=2.8.1\n\
         \n\
         Fetching dependencies for package 'requests' version '2.31.0' (latest).\n\
         Dependencies for requests version 2.31.0:\n\
         \x20 - idna<4,>=2.5\n\
         \n\
         Fetching dependencies for package 'numpy' version '1.26.0' (latest).\n\
         No dependencies found for package 'numpy' version '1.26.0'.\n"
    );
}

#[tokio::test]
async fn failing_package_does_not_stop_the_run() {
    let (_registry, resolver) = create_test_resolver(pandas_registry(), QueryOptions::default());

    let outcomes = resolver
        .run(QueryKind::Versions, packages(&["missing", "requests"]))
        .await;

    assert!(matches!(outcomes[0].result, Err(ResolveError::Registry(_))));
    assert_eq!(
        resolution(&outcomes[1]),
        &Resolution::Versions(vec!["2.31.0".to_string()])
    );
    assert_eq!(
        rendered_text(&outcomes),
        "Error: Package 'missing' not found. HTTP Status: 404\n\
         Available versions for requests:\n\
         2.31.0\n"
    );
}

#[tokio::test]
async fn versions_are_sorted_and_skip_malformed_keys() {
    let registry = StubRegistry::new().with_package(
        "legacy",
        "1.10.0",
        &["1.10.0", "not-a-version", "1.2.0", "1.9", ""],
    );
    let (_registry, resolver) = create_test_resolver(registry, QueryOptions::default());

    let outcomes = resolver
        .run(QueryKind::Versions, packages(&["legacy"]))
        .await;

    assert_eq!(
        resolution(&outcomes[0]),
        &Resolution::Versions(vec![
            "1.2.0".to_string(),
            "1.9".to_string(),
            "1.10.0".to_string(),
        ])
    );
}

#[tokio::test]
async fn prerelease_versions_are_hidden_unless_requested() {
    let (_registry, stable) = create_test_resolver(pandas_registry(), QueryOptions::default());
    let (_registry, all) = create_test_resolver(
        pandas_registry(),
        QueryOptions {
            channel: ChannelFilter::new(true),
            ..Default::default()
        },
    );

    let stable_outcomes = stable.run(QueryKind::Versions, packages(&["pandas"])).await;
    let all_outcomes = all.run(QueryKind::Versions, packages(&["pandas"])).await;

    assert_eq!(
        resolution(&stable_outcomes[0]),
        &Resolution::Versions(vec![
            "0.25.3".to_string(),
            "1.5.3".to_string(),
            "2.0.0".to_string(),
        ])
    );
    let Ok(Resolution::Versions(versions)) = &all_outcomes[0].result else {
        panic!("expected versions, got {:?}", all_outcomes[0].result);
    };
    assert_eq!(versions.len(), 4);
}

#[tokio::test]
async fn latest_only_reports_greatest_stable_version() {
    let (_registry, resolver) = create_test_resolver(
        pandas_registry(),
        QueryOptions {
            latest_only: true,
            ..Default::default()
        },
    );

    let outcomes = resolver.run(QueryKind::Versions, packages(&["pandas"])).await;

    assert_eq!(
        resolution(&outcomes[0]),
        &Resolution::Latest("2.0.0".to_string())
    );
    assert_eq!(rendered_text(&outcomes), "Latest version of pandas: 2.0.0\n");
}

#[tokio::test]
async fn prerelease_only_package_has_no_qualifying_versions() {
    let registry = StubRegistry::new().with_package("preonly", "1.0.0-rc.1", &["1.0.0-rc.1"]);
    let (_registry, resolver) = create_test_resolver(
        registry,
        QueryOptions {
            latest_only: true,
            ..Default::default()
        },
    );

    let outcomes = resolver.run(QueryKind::Versions, packages(&["preonly"])).await;

    assert!(!outcomes[0].is_success());
    assert_eq!(
        rendered_text(&outcomes),
        "No versions found for package preonly.\n"
    );
}

#[tokio::test]
async fn concurrent_run_keeps_request_order() {
    let (_registry, resolver) = create_test_resolver(
        pandas_registry(),
        QueryOptions {
            concurrency: 4,
            ..Default::default()
        },
    );

    let outcomes = resolver
        .run(QueryKind::Metadata, packages(&["numpy", "pandas", "requests"]))
        .await;

    let names: Vec<_> = outcomes
        .iter()
        .map(|outcome| match &outcome.result {
            Ok(Resolution::Metadata(info)) => info.name.clone(),
            other => panic!("unexpected outcome {:?}", other),
        })
        .collect();
    assert_eq!(names, vec!["numpy", "pandas", "requests"]);
}

#[tokio::test]
async fn json_output_has_one_document_per_package() {
    let (_registry, resolver) = create_test_resolver(pandas_registry(), QueryOptions::default());

    let outcomes = resolver
        .run(QueryKind::Versions, packages(&["requests", "missing"]))
        .await;
    let mut buffer = Vec::new();
    render(
        &outcomes,
        &RenderOptions {
            format: OutputFormat::Json,
            show_description: false,
        },
        &mut buffer,
    )
    .unwrap();

    let documents: Vec<serde_json::Value> = serde_json::Deserializer::from_slice(&buffer)
        .into_iter()
        .collect::<Result<_, _>>()
        .unwrap();
    assert_eq!(documents.len(), 2);
    assert_eq!(documents[0]["versions"], serde_json::json!(["2.31.0"]));
    assert_eq!(documents[1]["kind"], "upstream_not_found");
    assert!(documents[1].get("version").is_none());
}
