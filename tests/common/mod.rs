#![allow(dead_code)]

use async_trait::async_trait;
use axum::extract::ConnectInfo;
use chrono::{DateTime, Duration, Utc};
use link_tracker::application::services::AuthService;
use link_tracker::domain::click_worker::click_channel;
use link_tracker::domain::entities::{ClickEvent, InsertOutcome, Link, NewClickEvent, NewLink};
use link_tracker::domain::raw_visit::RawVisit;
use link_tracker::domain::repositories::{ClickFilter, ClickRepository, LinkRepository};
use link_tracker::error::AppError;
use link_tracker::state::AppState;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use tokio::sync::mpsc;
use tower::Layer;

pub const TEST_JWT_SECRET: &str = "test-jwt-secret";
pub const TEST_BASE_URL: &str = "https://sho.rt";

/// Link store backed by a vector, enforcing short-code uniqueness like the database.
#[derive(Default)]
pub struct InMemoryLinkRepository {
    links: Mutex<Vec<Link>>,
}

impl InMemoryLinkRepository {
    pub fn seed(&self, new_link: NewLink) -> Link {
        let mut links = self.links.lock().unwrap();
        let link = Link {
            id: links.len() as i64 + 1,
            short_code: new_link.short_code,
            long_url_desktop: new_link.long_url_desktop,
            long_url_mobile: new_link.long_url_mobile,
            name: new_link.name,
            expiry: new_link.expiry,
            image_url: new_link.image_url,
            created_by: new_link.created_by,
            created_at: Utc::now() + Duration::milliseconds(links.len() as i64),
        };
        links.push(link.clone());
        link
    }
}

#[async_trait]
impl LinkRepository for InMemoryLinkRepository {
    async fn insert(&self, new_link: NewLink) -> Result<InsertOutcome, AppError> {
        let taken = self
            .links
            .lock()
            .unwrap()
            .iter()
            .any(|l| l.short_code == new_link.short_code);

        if taken {
            return Ok(InsertOutcome::CodeTaken);
        }
        Ok(InsertOutcome::Created(self.seed(new_link)))
    }

    async fn exists_by_code(&self, short_code: &str) -> Result<bool, AppError> {
        Ok(self.find_by_code(short_code).await?.is_some())
    }

    async fn find_by_code(&self, short_code: &str) -> Result<Option<Link>, AppError> {
        Ok(self
            .links
            .lock()
            .unwrap()
            .iter()
            .find(|l| l.short_code == short_code)
            .cloned())
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Link>, AppError> {
        Ok(self.links.lock().unwrap().iter().find(|l| l.id == id).cloned())
    }

    async fn list_by_owner(&self, owner_id: i64) -> Result<Vec<Link>, AppError> {
        let mut links: Vec<Link> = self
            .links
            .lock()
            .unwrap()
            .iter()
            .filter(|l| l.created_by == owner_id)
            .cloned()
            .collect();
        links.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        Ok(links)
    }

    async fn ping(&self) -> Result<(), AppError> {
        Ok(())
    }
}

/// Click store backed by a vector.
#[derive(Default)]
pub struct InMemoryClickRepository {
    clicks: Mutex<Vec<ClickEvent>>,
}

impl InMemoryClickRepository {
    pub fn seed(&self, link_id: i64, clicked_at: DateTime<Utc>) -> ClickEvent {
        let mut clicks = self.clicks.lock().unwrap();
        let click = ClickEvent {
            id: clicks.len() as i64 + 1,
            link_id,
            ip_address: "203.0.113.5".to_string(),
            user_agent: "TestAgent/1.0".to_string(),
            referrer: None,
            country: None,
            region: None,
            city: None,
            latitude: None,
            longitude: None,
            device_type: "desktop".to_string(),
            browser: "Unknown".to_string(),
            os: "Unknown".to_string(),
            clicked_at,
        };
        clicks.push(click.clone());
        click
    }

    pub fn all(&self) -> Vec<ClickEvent> {
        self.clicks.lock().unwrap().clone()
    }

    fn matching(&self, link_id: i64, filter: &ClickFilter) -> Vec<ClickEvent> {
        let mut clicks: Vec<ClickEvent> = self
            .clicks
            .lock()
            .unwrap()
            .iter()
            .filter(|c| c.link_id == link_id && filter.matches(c.clicked_at))
            .cloned()
            .collect();
        clicks.sort_by(|a, b| b.clicked_at.cmp(&a.clicked_at).then(b.id.cmp(&a.id)));
        clicks
    }
}

#[async_trait]
impl ClickRepository for InMemoryClickRepository {
    async fn insert(&self, new_click: NewClickEvent) -> Result<ClickEvent, AppError> {
        let mut clicks = self.clicks.lock().unwrap();
        let click = ClickEvent {
            id: clicks.len() as i64 + 1,
            link_id: new_click.link_id,
            ip_address: new_click.ip_address,
            user_agent: new_click.user_agent,
            referrer: new_click.referrer,
            country: new_click.country,
            region: new_click.region,
            city: new_click.city,
            latitude: new_click.latitude,
            longitude: new_click.longitude,
            device_type: new_click.device_type,
            browser: new_click.browser,
            os: new_click.os,
            clicked_at: Utc::now(),
        };
        clicks.push(click.clone());
        Ok(click)
    }

    async fn find_page(
        &self,
        link_id: i64,
        filter: ClickFilter,
    ) -> Result<Vec<ClickEvent>, AppError> {
        Ok(self
            .matching(link_id, &filter)
            .into_iter()
            .skip(filter.offset as usize)
            .take(filter.limit as usize)
            .collect())
    }

    async fn count(&self, link_id: i64, filter: ClickFilter) -> Result<i64, AppError> {
        Ok(self.matching(link_id, &filter).len() as i64)
    }
}

pub struct TestContext {
    pub state: AppState,
    pub rx: mpsc::Receiver<RawVisit>,
    pub links: Arc<InMemoryLinkRepository>,
    pub clicks: Arc<InMemoryClickRepository>,
}

pub fn create_test_state() -> TestContext {
    let links = Arc::new(InMemoryLinkRepository::default());
    let clicks = Arc::new(InMemoryClickRepository::default());
    let (sender, rx) = click_channel(100);

    let state = AppState::new(
        links.clone(),
        clicks.clone(),
        AuthService::new(TEST_JWT_SECRET),
        sender,
        TEST_BASE_URL,
    );

    TestContext {
        state,
        rx,
        links,
        clicks,
    }
}

pub fn new_link(code: &str, owner: i64) -> NewLink {
    NewLink {
        short_code: code.to_string(),
        long_url_desktop: "https://example.com/desktop".to_string(),
        long_url_mobile: None,
        name: None,
        expiry: None,
        image_url: None,
        created_by: owner,
    }
}

/// `Authorization` header value for `user_id`.
pub fn bearer(user_id: i64) -> String {
    let token = AuthService::new(TEST_JWT_SECRET)
        .issue(user_id, Duration::hours(1))
        .unwrap();
    format!("Bearer {token}")
}

/// Injects a fixed peer address, standing in for `into_make_service_with_connect_info`.
#[derive(Clone)]
pub struct MockConnectInfoLayer;

impl<S> Layer<S> for MockConnectInfoLayer {
    type Service = MockConnectInfoService<S>;

    fn layer(&self, inner: S) -> Self::Service {
        MockConnectInfoService { inner }
    }
}

#[derive(Clone)]
pub struct MockConnectInfoService<S> {
    inner: S,
}

impl<S, B> tower::Service<axum::http::Request<B>> for MockConnectInfoService<S>
where
    S: tower::Service<axum::http::Request<B>> + Clone + Send + 'static,
    S::Future: Send + 'static,
    B: Send + 'static,
{
    type Response = S::Response;
    type Error = S::Error;
    type Future = S::Future;

    fn poll_ready(
        &mut self,
        cx: &mut std::task::Context<'_>,
    ) -> std::task::Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, mut req: axum::http::Request<B>) -> Self::Future {
        let addr: SocketAddr = "127.0.0.1:12345".parse().unwrap();
        req.extensions_mut().insert(ConnectInfo(addr));
        self.inner.call(req)
    }
}

pub fn test_server(state: AppState) -> axum_test::TestServer {
    let app = link_tracker::routes::build_router(state).layer(MockConnectInfoLayer);
    axum_test::TestServer::new(app).unwrap()
}
