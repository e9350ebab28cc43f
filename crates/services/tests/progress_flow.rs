use api::Api;
use tracker_core::model::{Catalog, Category, Level, Roadmap, RoadmapId, SubtopicId, Topic};
use tracker_core::progress;
use tracker_core::time::fixed_now;
use services::{AppServices, Clock, FetchGuard, UserInfo};

fn catalog() -> Catalog {
    let topic = |id: &str, labels: &[&str]| {
        Topic::new(
            id,
            id,
            Level::Beginner,
            labels.iter().map(|s| (*s).to_string()).collect(),
        )
    };
    Catalog::new(
        vec![Roadmap::new(
            "calculus",
            "Calculus",
            "Limits and derivatives",
            Category::Academic,
            vec![topic("limits", &["Epsilon-delta", "Continuity"])],
        )],
        vec![Roadmap::new(
            "frontend",
            "Frontend Development",
            "Browsers and the DOM",
            Category::NonAcademic,
            vec![
                topic("html", &["Semantics", "Forms"]),
                topic("css", &["Flexbox", "Grid", "Cascade"]),
            ],
        )],
    )
}

fn services() -> AppServices {
    let clock = Clock::fixed(fixed_now());
    AppServices::new(clock, &Api::in_memory(clock, catalog()))
}

#[tokio::test]
async fn learner_completes_a_roadmap_and_exports() {
    let services = services();
    let frontend = RoadmapId::new("frontend");

    let dashboard = services.dashboard().load("").await.expect("load dashboard");
    assert_eq!(dashboard.overall_percent, 0);
    assert_eq!(dashboard.non_academic.len(), 1);

    let detail = services
        .roadmaps()
        .detail(&frontend)
        .await
        .expect("load detail");
    assert_eq!(detail.topics[1].subtopics[2].id, SubtopicId::from_raw("css-sub-2"));

    let record = services
        .roadmaps()
        .toggle(&frontend, &SubtopicId::from_raw("html-sub-0"))
        .await
        .expect("toggle subtopic");
    let detail = detail.with_progress(record);
    assert_eq!(detail.percent, 20);

    let record = services
        .roadmaps()
        .mark_all_complete(&detail.roadmap)
        .await
        .expect("mark all complete");
    assert!(progress::is_roadmap_effectively_complete(
        &detail.roadmap,
        Some(&record),
        progress::DEFAULT_COMPLETION_THRESHOLD
    ));

    let dashboard = services.dashboard().load("").await.expect("reload dashboard");
    // (0 + 100) / 2
    assert_eq!(dashboard.overall_percent, 50);

    let profile = services.profile().load().await.expect("load profile");
    assert_eq!(profile.stats.completed_roadmaps, 1);
    assert_eq!(profile.stats.completed_subtopics, 5);
    assert_eq!(profile.category_percent(Category::Academic), 0);
    assert_eq!(profile.top_roadmaps[0].id, frontend);

    let export = services
        .profile()
        .export(&UserInfo::default())
        .await
        .expect("export progress");
    assert!(export.file_name.starts_with("learning-progress-"));
    assert!(export.contents.contains("\"completedTopics\": 5"));
}

#[tokio::test]
async fn reset_returns_roadmap_to_zero() {
    let services = services();
    let calculus = RoadmapId::new("calculus");
    services
        .roadmaps()
        .toggle(&calculus, &SubtopicId::from_raw("limits-sub-1"))
        .await
        .expect("toggle subtopic");
    services.roadmaps().reset(&calculus).await.expect("reset");

    let detail = services
        .roadmaps()
        .detail(&calculus)
        .await
        .expect("load detail");
    assert_eq!(detail.percent, 0);
    assert!(detail.progress.notes.is_empty());
}

#[tokio::test]
async fn superseded_fetch_is_discarded() {
    let services = services();
    let guard = FetchGuard::new();

    let first = guard.begin();
    let second = guard.begin();
    let dashboard = services.dashboard().load("front").await.expect("load dashboard");

    assert!(guard.accept(first, dashboard.clone()).is_none());
    let accepted = guard.accept(second, dashboard).expect("newest fetch applies");
    assert!(accepted.academic.is_empty());

    guard.cancel();
    assert!(!guard.is_current(second));
}
