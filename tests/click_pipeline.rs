mod common;

use common::{InMemoryClickRepository, create_test_state, new_link, test_server};
use link_tracker::application::services::ClickRecorder;
use link_tracker::domain::click_worker::{click_channel, run_click_worker};
use link_tracker::domain::raw_visit::RawVisit;
use link_tracker::infrastructure::geo::NullGeoLookup;
use std::sync::Arc;
use std::time::Duration;

const ANDROID_UA: &str = "Mozilla/5.0 (Linux; Android 13; Pixel 7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Mobile Safari/537.36";

#[tokio::test]
async fn test_redirect_click_is_recorded_by_worker() {
    let ctx = create_test_state();
    let link = ctx.links.seed(new_link("flow01", 1));
    let recorder = Arc::new(ClickRecorder::new(
        ctx.clicks.clone(),
        Arc::new(NullGeoLookup::new()),
    ));
    let worker = tokio::spawn(run_click_worker(ctx.rx, recorder, 2));
    let server = test_server(ctx.state);

    let response = server
        .get("/flow01")
        .add_header("User-Agent", ANDROID_UA)
        .add_header("Referrer", "https://social.example")
        .await;
    assert_eq!(response.status_code(), 302);

    for _ in 0..100 {
        if !ctx.clicks.all().is_empty() {
            break;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    worker.abort();

    let clicks = ctx.clicks.all();
    assert_eq!(clicks.len(), 1);

    let click = &clicks[0];
    assert_eq!(click.link_id, link.id);
    assert_eq!(click.ip_address, "127.0.0.1");
    assert_eq!(click.referrer.as_deref(), Some("https://social.example"));
    assert_eq!(click.device_type, "mobile");
    assert!(click.browser.starts_with("Chrome"));
    assert!(click.country.is_none());
}

#[tokio::test]
async fn test_worker_drains_queue_after_senders_drop() {
    let clicks = Arc::new(InMemoryClickRepository::default());
    let recorder = Arc::new(ClickRecorder::new(clicks.clone(), Arc::new(NullGeoLookup::new())));
    let (sender, rx) = click_channel(8);

    for link_id in 1..=3 {
        let visit = RawVisit::new(link_id, "198.51.100.4".to_string(), None, None);
        assert!(sender.dispatch(visit));
    }
    drop(sender);

    run_click_worker(rx, recorder, 1).await;

    let recorded = clicks.all();
    assert_eq!(recorded.len(), 3);
    assert!(recorded.iter().all(|c| c.user_agent == "Unknown"));
}
