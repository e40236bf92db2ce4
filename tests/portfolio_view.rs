use folio::app::{App, AppEvent, PopupType, ViewMode};
use folio::config::Config;
use folio::github::{ClientOptions, GitHubClient};
use folio::preview::PreviewStatus;
use folio::settings::{FileStore, MemoryStore, PreferenceStore, Settings, LANGUAGE_KEY};
use folio::ui::{self, TitleSync};
use ratatui::backend::TestBackend;
use ratatui::Terminal;
use serde_json::json;
use std::time::Duration;
use tokio::sync::mpsc::UnboundedReceiver;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const CHIP: &str = "GitHub Repository";

fn app_for(server: &MockServer, settings: Settings) -> (App, UnboundedReceiver<AppEvent>) {
    let config = Config {
        account: "bar".to_string(),
        api_base_url: server.uri(),
        preview_url_template: format!("{}/pages/{{account}}/{{name}}", server.uri()),
        ..Config::default()
    };
    let client = GitHubClient::new(ClientOptions {
        api_base_url: server.uri(),
        token: None,
        request_timeout: Duration::from_secs(2),
        probe_timeout: Duration::from_secs(2),
    })
    .unwrap();
    let (mut app, rx) = App::new(config, settings, client);
    app.switch_view(ViewMode::Projects);
    (app, rx)
}

fn english() -> Settings {
    Settings::load(Box::new(MemoryStore::default()))
}

async fn next_event(rx: &mut UnboundedReceiver<AppEvent>) -> AppEvent {
    tokio::time::timeout(Duration::from_secs(5), rx.recv())
        .await
        .expect("event within five seconds")
        .expect("channel open")
}

/// Wait until the repository list has been applied
async fn load_repos(app: &mut App, rx: &mut UnboundedReceiver<AppEvent>) {
    app.start();
    while app.repos.is_loading() {
        let event = next_event(rx).await;
        app.handle_event(event);
    }
}

/// Apply events until the open preview has a final status
async fn settle_probe(app: &mut App, rx: &mut UnboundedReceiver<AppEvent>) {
    while !app.preview_status().is_terminal() {
        let event = next_event(rx).await;
        app.handle_event(event);
    }
}

fn render(app: &mut App) -> String {
    render_sized(app, 100, 60)
}

fn render_sized(app: &mut App, width: u16, height: u16) -> String {
    let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
    terminal.draw(|f| ui::draw(f, app)).unwrap();
    let buffer = terminal.backend().buffer().clone();
    let width = buffer.area.width as usize;
    buffer
        .content
        .chunks(width)
        .map(|row| row.iter().map(|cell| cell.symbol()).collect::<String>())
        .collect::<Vec<_>>()
        .join("\n")
}

async fn mount_repos(server: &MockServer, body: serde_json::Value) {
    Mock::given(method("GET"))
        .and(path("/users/bar/repos"))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(server)
        .await;
}

fn repo_json(id: u64, name: &str, description: Option<&str>) -> serde_json::Value {
    json!({
        "id": id,
        "name": name,
        "description": description,
        "html_url": format!("https://github.com/bar/{name}"),
    })
}

#[tokio::test]
async fn renders_one_card_per_repository_in_order() {
    let server = MockServer::start().await;
    mount_repos(
        &server,
        json!([
            repo_json(1, "weather-app", Some("Forecasts")),
            repo_json(2, "blog", Some("Static blog")),
            repo_json(3, "dotfiles", None),
            repo_json(4, "api-server", Some("REST backend")),
        ]),
    )
    .await;

    let (mut app, mut rx) = app_for(&server, english());
    load_repos(&mut app, &mut rx).await;
    let screen = render(&mut app);

    assert_eq!(screen.matches(CHIP).count(), 4);
    let positions: Vec<usize> = ["weather-app", "blog", "dotfiles", "api-server"]
        .iter()
        .map(|name| screen.find(name).expect("card rendered"))
        .collect();
    assert!(positions.windows(2).all(|w| w[0] < w[1]), "{positions:?}");
    assert!(screen.contains("No description available."));
    assert!(screen.contains("My Projects"));
}

#[tokio::test]
async fn list_failure_shows_error_page_without_cards() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/users/bar/repos"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let (mut app, mut rx) = app_for(&server, english());
    load_repos(&mut app, &mut rx).await;
    let screen = render(&mut app);

    assert!(screen.contains("Oops! Something Went Wrong"));
    assert!(!screen.contains(CHIP));
}

#[tokio::test]
async fn loading_shows_placeholder_cards() {
    let server = MockServer::start().await;
    let (mut app, _rx) = app_for(&server, english());
    let screen = render(&mut app);

    assert_eq!(screen.matches("(◌)").count(), app.config.placeholder_cards);
    assert!(!screen.contains(CHIP));
}

#[tokio::test]
async fn empty_account_shows_empty_state() {
    let server = MockServer::start().await;
    mount_repos(&server, json!([])).await;

    let (mut app, mut rx) = app_for(&server, english());
    load_repos(&mut app, &mut rx).await;
    let screen = render(&mut app);

    assert!(screen.contains("No repositories to show."));
    assert!(!screen.contains(CHIP));
}

#[tokio::test]
async fn missing_description_uses_active_language() {
    let server = MockServer::start().await;
    mount_repos(&server, json!([repo_json(1, "foo", None)])).await;

    let turkish = Settings::load(Box::new(MemoryStore::with(&[(LANGUAGE_KEY, "tr")])));
    let (mut app, mut rx) = app_for(&server, turkish);
    load_repos(&mut app, &mut rx).await;

    let screen = render(&mut app);
    assert!(screen.contains("Açıklama bulunmuyor."));
    assert!(screen.contains("Projelerim"));

    app.cycle_language();
    let screen = render(&mut app);
    assert!(screen.contains("Keine Beschreibung verfügbar."));
}

#[tokio::test]
async fn missing_site_shows_mock_listing() {
    let server = MockServer::start().await;
    mount_repos(&server, json!([repo_json(1, "foo", None)])).await;
    // No mock for /pages/bar/foo, so the probe gets a 404

    let (mut app, mut rx) = app_for(&server, english());
    load_repos(&mut app, &mut rx).await;
    app.open_preview();
    assert_eq!(app.preview_status(), PreviewStatus::Probing);

    settle_probe(&mut app, &mut rx).await;
    assert_eq!(app.preview_status(), PreviewStatus::Unavailable);

    let screen = render(&mut app);
    assert!(screen.contains("public/"));
    assert!(screen.contains("index.html"));
    assert!(screen.contains("Click to visit foo repository..."));
    assert!(screen.contains("https://github.com/bar/foo"));
    assert_eq!(app.preview.external_target(), Some("https://github.com/bar/foo"));
}

#[tokio::test]
async fn live_site_shows_preview_url() {
    let server = MockServer::start().await;
    mount_repos(&server, json!([repo_json(1, "foo", Some("Live one"))])).await;
    Mock::given(method("GET"))
        .and(path("/pages/bar/foo"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html></html>"))
        .mount(&server)
        .await;

    let (mut app, mut rx) = app_for(&server, english());
    load_repos(&mut app, &mut rx).await;
    app.open_preview();
    settle_probe(&mut app, &mut rx).await;

    let expected = format!("{}/pages/bar/foo", server.uri());
    assert_eq!(app.preview_status(), PreviewStatus::Available);
    assert!(render(&mut app).contains(&expected));
    assert_eq!(app.preview.external_target(), Some(expected.as_str()));
    assert_eq!(app.window_title(), "foo");
}

#[tokio::test]
async fn slow_earlier_probe_never_overrides_later_selection() {
    let server = MockServer::start().await;
    mount_repos(
        &server,
        json!([repo_json(1, "slow", None), repo_json(2, "fast", None)]),
    )
    .await;
    Mock::given(method("GET"))
        .and(path("/pages/bar/slow"))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_millis(400)))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/pages/bar/fast"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let (mut app, mut rx) = app_for(&server, english());
    load_repos(&mut app, &mut rx).await;

    app.open_preview();
    app.next();
    app.open_preview();

    settle_probe(&mut app, &mut rx).await;
    tokio::time::sleep(Duration::from_millis(700)).await;
    while let Ok(event) = rx.try_recv() {
        app.handle_event(event);
    }

    assert_eq!(app.preview.selected().map(|r| r.name.as_str()), Some("fast"));
    assert_eq!(app.preview_status(), PreviewStatus::Unavailable);
    assert!(render(&mut app).contains("Click to visit fast repository..."));
}

#[tokio::test]
async fn preferences_survive_restart() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("prefs.toml");

    let mut settings = Settings::load(Box::new(FileStore::open(path.clone())));
    assert!(!settings.dark_mode());
    settings.toggle_dark_mode();
    settings.set_language(folio::i18n::Language::German);

    let reopened = Settings::load(Box::new(FileStore::open(path.clone())));
    assert!(reopened.dark_mode());
    assert_eq!(reopened.language(), folio::i18n::Language::German);
    assert_eq!(reopened.store().get(LANGUAGE_KEY).as_deref(), Some("de"));
}

#[tokio::test]
async fn readme_tail_is_reachable_on_small_terminal() {
    let server = MockServer::start().await;
    mount_repos(&server, json!([repo_json(1, "foo", None)])).await;
    let readme: String = (0..30).map(|i| format!("line{i}\n")).collect();
    Mock::given(method("GET"))
        .and(path("/repos/bar/foo/contents/README.md"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "encoding": "base64",
            "content": base64::Engine::encode(&base64::engine::general_purpose::STANDARD, readme),
        })))
        .mount(&server)
        .await;

    let (mut app, mut rx) = app_for(&server, english());
    load_repos(&mut app, &mut rx).await;
    app.show_readme();
    while app.popup.as_ref().is_some_and(|p| p.loading) {
        let event = next_event(&mut rx).await;
        app.handle_event(event);
    }
    assert_eq!(app.popup.as_ref().unwrap().content.len(), 30);

    let screen = render_sized(&mut app, 80, 24);
    assert!(screen.contains("line0"));
    assert!(!screen.contains("line29"));

    for _ in 0..100 {
        app.scroll_down();
    }
    let screen = render_sized(&mut app, 80, 24);
    assert!(screen.contains("line29"), "{screen}");
}

#[tokio::test]
async fn window_title_follows_state() {
    let server = MockServer::start().await;
    mount_repos(&server, json!([repo_json(1, "foo", None)])).await;

    let (mut app, mut rx) = app_for(&server, english());
    let mut sync = TitleSync::default();
    let mut out = Vec::new();

    assert!(sync.sync(&mut out, app.window_title()).unwrap());
    assert!(String::from_utf8_lossy(&out).contains("Loading..."));

    load_repos(&mut app, &mut rx).await;
    out.clear();
    assert!(sync.sync(&mut out, app.window_title()).unwrap());
    assert!(String::from_utf8_lossy(&out).contains("My Projects"));

    out.clear();
    assert!(!sync.sync(&mut out, app.window_title()).unwrap());
    assert!(out.is_empty());

    app.open_preview();
    assert!(sync.sync(&mut out, app.window_title()).unwrap());
    assert!(String::from_utf8_lossy(&out).contains("foo"));
}

#[tokio::test]
async fn home_lists_links_and_profile() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/users/bar"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "login": "bar",
            "name": "Bar Baz",
            "html_url": "https://github.com/bar",
        })))
        .mount(&server)
        .await;

    let (mut app, mut rx) = app_for(&server, english());
    app.switch_view(ViewMode::Home);
    app.start();
    while app.profile.is_loading() {
        let event = next_event(&mut rx).await;
        app.handle_event(event);
    }

    let screen = render(&mut app);
    assert!(screen.contains("Bar Baz (bar)"));
    for label in ["GitHub", "Discord", "Instagram", "LinkedIn"] {
        assert!(screen.contains(label), "missing {label}");
    }
    assert_eq!(app.profile_url(), "https://github.com/bar");

    app.show_links_popup();
    assert_eq!(app.popup.as_ref().map(|p| &p.popup_type), Some(&PopupType::Links));
    let screen = render(&mut app);
    assert!(screen.contains("https://discord.com/invite/eemirmutlu"));
}
