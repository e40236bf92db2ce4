use crate::browser;
use crate::config::{Config, Link};
use crate::document::{self, DocumentSource, DocumentViewer};
use crate::github::{GitHubClient, ProbeOutcome, Profile, Repository};
use crate::home::HomePage;
use crate::i18n::{strings, Language, Strings};
use crate::preview::{PreviewResolver, PreviewStatus};
use crate::settings::Settings;
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::mpsc::{unbounded_channel, UnboundedReceiver, UnboundedSender};
use tokio::task::AbortHandle;
use tracing::{debug, info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewMode {
    Home,
    Projects,
}

#[derive(Debug, Clone, PartialEq)]
pub enum PopupType {
    Help,
    Language,
    Links,
    /// README of the named repository
    Readme(String),
}

#[derive(Debug, Clone)]
pub struct Popup {
    pub popup_type: PopupType,
    pub scroll: usize,
    pub content: Vec<String>,
    pub selected: usize,
    /// Still waiting for content
    pub loading: bool,
    /// Rows available for content, recorded on every draw
    pub viewport: usize,
}

impl Popup {
    pub fn new(popup_type: PopupType, content: Vec<String>) -> Self {
        Self {
            popup_type,
            scroll: 0,
            content,
            selected: 0,
            loading: false,
            viewport: 0,
        }
    }

    /// Largest scroll offset that still fills the viewport
    pub fn max_scroll(&self) -> usize {
        self.content.len().saturating_sub(self.viewport.max(1))
    }

    pub fn scroll_down(&mut self) {
        let max_scroll = self.max_scroll();
        self.scroll = (self.scroll + 1).min(max_scroll);
    }

    pub fn scroll_up(&mut self) {
        self.scroll = self.scroll.saturating_sub(1);
    }
}

/// Lifecycle of one remote fetch
#[derive(Debug, Clone, PartialEq)]
pub enum LoadState<T> {
    Loading,
    Ready(T),
    Failed(String),
}

impl<T> LoadState<T> {
    pub fn ready(&self) -> Option<&T> {
        match self {
            LoadState::Ready(value) => Some(value),
            _ => None,
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, LoadState::Loading)
    }
}

/// Results of background work, applied on the UI loop
#[derive(Debug)]
pub enum AppEvent {
    ReposLoaded(Result<Vec<Repository>, String>),
    ProfileLoaded(Result<Profile, String>),
    ProbeFinished { generation: u64, outcome: ProbeOutcome },
    ReadmeLoaded { repo: String, result: Result<String, String> },
}

pub struct App {
    pub config: Config,
    pub settings: Settings,
    pub view_mode: ViewMode,

    // Data
    pub profile: LoadState<Profile>,
    pub repos: LoadState<Vec<Repository>>,

    // Selection
    pub selected: usize,
    pub preview: PreviewResolver,
    pub home: HomePage,
    pub documents: DocumentViewer,

    // UI state
    pub status_message: Option<String>,
    pub popup: Option<Popup>,
    pub tick: u64,

    client: Arc<GitHubClient>,
    events: UnboundedSender<AppEvent>,
    probe_task: Option<AbortHandle>,
    started: bool,
}

impl App {
    pub fn new(
        config: Config,
        settings: Settings,
        client: GitHubClient,
    ) -> (Self, UnboundedReceiver<AppEvent>) {
        let (events, rx) = unbounded_channel();
        let preview = PreviewResolver::new(
            &config.account,
            &config.preview_url_template,
            config.probe_failure,
        );
        let home = HomePage::new(&config.home);
        let documents = DocumentViewer::new(config.documents.clone());

        let app = Self {
            config,
            settings,
            view_mode: ViewMode::Home,
            profile: LoadState::Loading,
            repos: LoadState::Loading,
            selected: 0,
            preview,
            home,
            documents,
            status_message: None,
            popup: None,
            tick: 0,
            client: Arc::new(client),
            events,
            probe_task: None,
            started: false,
        };
        (app, rx)
    }

    pub fn language(&self) -> Language {
        self.settings.language()
    }

    pub fn strings(&self) -> &'static Strings {
        strings(self.language())
    }

    /// Kick off the one-time fetches for the list and the profile
    pub fn start(&mut self) {
        if self.started {
            return;
        }
        self.started = true;
        let account = self.config.account.clone();
        info!("loading repositories for {}", account);

        let client = Arc::clone(&self.client);
        let tx = self.events.clone();
        let repos_account = account.clone();
        tokio::spawn(async move {
            let result = client
                .list_repositories(&repos_account)
                .await
                .map_err(|e| e.to_string());
            let _ = tx.send(AppEvent::ReposLoaded(result));
        });

        let client = Arc::clone(&self.client);
        let tx = self.events.clone();
        tokio::spawn(async move {
            let result = client.user_profile(&account).await.map_err(|e| e.to_string());
            let _ = tx.send(AppEvent::ProfileLoaded(result));
        });
    }

    pub fn handle_event(&mut self, event: AppEvent) {
        match event {
            AppEvent::ReposLoaded(Ok(repos)) => {
                info!("loaded {} repositories", repos.len());
                self.selected = 0;
                self.repos = LoadState::Ready(repos);
            }
            AppEvent::ReposLoaded(Err(e)) => {
                warn!("error fetching repositories: {}", e);
                self.repos = LoadState::Failed(e);
            }
            AppEvent::ProfileLoaded(Ok(profile)) => {
                self.profile = LoadState::Ready(profile);
            }
            AppEvent::ProfileLoaded(Err(e)) => {
                warn!("error fetching profile: {}", e);
                self.profile = LoadState::Failed(e);
            }
            AppEvent::ProbeFinished { generation, outcome } => {
                if self.preview.complete(generation, &outcome) {
                    debug!("probe {} finished: {:?} -> {:?}", generation, outcome, self.preview.status());
                } else {
                    debug!("discarding stale probe {} ({:?})", generation, outcome);
                }
            }
            AppEvent::ReadmeLoaded { repo, result } => self.apply_readme(repo, result),
        }
    }

    /// Advance animations; called once per frame
    pub fn on_tick(&mut self, now: Instant) {
        self.tick = self.tick.wrapping_add(1);
        if self.view_mode == ViewMode::Home {
            self.home.headline.tick(now);
        }
    }

    pub fn switch_view(&mut self, mode: ViewMode) {
        if self.view_mode != mode {
            self.close_preview();
            self.documents.close();
            self.view_mode = mode;
        }
    }

    pub fn toggle_view_mode(&mut self) {
        let next = match self.view_mode {
            ViewMode::Home => ViewMode::Projects,
            ViewMode::Projects => ViewMode::Home,
        };
        self.switch_view(next);
    }

    /// Title for the current state, like a browser tab title
    pub fn window_title(&self) -> String {
        let s = strings(self.language());
        if let Some(repo) = self.preview.selected() {
            return repo.name.clone();
        }
        match self.view_mode {
            ViewMode::Home => {
                if let Some(doc) = self.documents.is_open().then(|| self.documents.current()).flatten() {
                    doc.title.clone()
                } else {
                    s.home_title.to_string()
                }
            }
            ViewMode::Projects => {
                if self.repos.is_loading() {
                    s.loading.to_string()
                } else {
                    s.projects_title.to_string()
                }
            }
        }
    }

    pub fn visible_repos(&self) -> &[Repository] {
        self.repos.ready().map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn next(&mut self) {
        match self.view_mode {
            ViewMode::Home => self.home.next(),
            ViewMode::Projects => {
                let count = self.visible_repos().len();
                if count > 0 {
                    self.selected = (self.selected + 1).min(count - 1);
                }
            }
        }
    }

    pub fn previous(&mut self) {
        match self.view_mode {
            ViewMode::Home => self.home.previous(),
            ViewMode::Projects => self.selected = self.selected.saturating_sub(1),
        }
    }

    pub fn get_selected_repo(&self) -> Option<&Repository> {
        self.visible_repos().get(self.selected)
    }

    /// Select the highlighted card and probe its preview URL
    pub fn open_preview(&mut self) {
        let Some(repo) = self.get_selected_repo().cloned() else {
            return;
        };
        self.select_repository(&repo);
    }

    pub fn select_repository(&mut self, repo: &Repository) {
        if let Some(handle) = self.probe_task.take() {
            handle.abort();
        }
        let ticket = self.preview.resolve(repo);
        info!("probing {} (generation {})", ticket.url, ticket.generation);

        let client = Arc::clone(&self.client);
        let tx = self.events.clone();
        let handle = tokio::spawn(async move {
            let outcome = client.probe(&ticket.url).await;
            let _ = tx.send(AppEvent::ProbeFinished {
                generation: ticket.generation,
                outcome,
            });
        });
        self.probe_task = Some(handle.abort_handle());
    }

    pub fn close_preview(&mut self) {
        if let Some(handle) = self.probe_task.take() {
            handle.abort();
        }
        self.preview.close();
    }

    /// Open the live site or, without one, the repository page
    pub fn open_preview_externally(&mut self) {
        if let Some(target) = self.preview.external_target().map(str::to_string) {
            self.open_external(&target);
        }
    }

    fn open_external(&mut self, target: &str) {
        match browser::open(target) {
            Ok(()) => {
                self.status_message = Some(self.strings().opened.replace("{target}", target))
            }
            Err(e) => {
                warn!("{:#}", e);
                self.status_message = Some(format!("{:#}", e));
            }
        }
    }

    // Theme and language
    pub fn toggle_dark_mode(&mut self) {
        self.settings.toggle_dark_mode();
    }

    pub fn show_language_popup(&mut self) {
        let content = Language::ALL.iter().map(|l| l.label().to_string()).collect();
        let mut popup = Popup::new(PopupType::Language, content);
        popup.selected = Language::ALL
            .iter()
            .position(|l| *l == self.language())
            .unwrap_or(0);
        self.popup = Some(popup);
    }

    pub fn choose_language_in_popup(&mut self) {
        let chosen = match self.popup {
            Some(ref popup) if popup.popup_type == PopupType::Language => {
                Language::ALL.get(popup.selected).copied()
            }
            _ => None,
        };
        if let Some(lang) = chosen {
            self.settings.set_language(lang);
            self.popup = None;
        }
    }

    pub fn cycle_language(&mut self) {
        let next = self.language().next();
        self.settings.set_language(next);
    }

    // Popups
    pub fn toggle_help(&mut self) {
        if self.popup.is_some() {
            self.popup = None;
        } else {
            let content = get_help_content(self.view_mode, self.strings());
            self.popup = Some(Popup::new(PopupType::Help, content));
        }
    }

    pub fn close_popup(&mut self) {
        self.popup = None;
    }

    pub fn scroll_down(&mut self) {
        if let Some(ref mut popup) = self.popup {
            popup.scroll_down();
        }
    }

    pub fn scroll_up(&mut self) {
        if let Some(ref mut popup) = self.popup {
            popup.scroll_up();
        }
    }

    pub fn popup_next(&mut self) {
        if let Some(ref mut popup) = self.popup {
            let max = popup.content.len().saturating_sub(1);
            popup.selected = (popup.selected + 1).min(max);
        }
    }

    pub fn popup_prev(&mut self) {
        if let Some(ref mut popup) = self.popup {
            popup.selected = popup.selected.saturating_sub(1);
        }
    }

    /// Fetch the highlighted repository's README into a popup
    pub fn show_readme(&mut self) {
        let Some(name) = self.get_selected_repo().map(|r| r.name.clone()) else {
            return;
        };
        let mut popup = Popup::new(
            PopupType::Readme(name.clone()),
            vec![strings(self.language()).readme_loading.to_string()],
        );
        popup.loading = true;
        self.popup = Some(popup);

        let client = Arc::clone(&self.client);
        let tx = self.events.clone();
        let owner = self.config.account.clone();
        tokio::spawn(async move {
            let result = client
                .file_content(&owner, &name, "README.md")
                .await
                .map_err(|e| e.to_string());
            let _ = tx.send(AppEvent::ReadmeLoaded { repo: name, result });
        });
    }

    fn apply_readme(&mut self, repo: String, result: Result<String, String>) {
        let Some(ref mut popup) = self.popup else {
            debug!("README for {} arrived after its popup closed", repo);
            return;
        };
        if popup.popup_type != PopupType::Readme(repo.clone()) || !popup.loading {
            debug!("README for {} no longer wanted", repo);
            return;
        }
        popup.loading = false;
        popup.scroll = 0;
        popup.content = match result {
            Ok(text) => text.lines().map(str::to_string).collect(),
            Err(e) => {
                warn!("error fetching README for {}: {}", repo, e);
                vec![strings(self.settings.language())
                    .readme_unavailable
                    .replace("{error}", &e)]
            }
        };
    }

    // Profile and links
    /// GitHub profile page, from the fetched profile when there is one
    pub fn profile_url(&self) -> String {
        match self.profile {
            LoadState::Ready(ref profile) => profile
                .html_url
                .clone()
                .filter(|url| !url.trim().is_empty())
                .unwrap_or_else(|| format!("https://github.com/{}", profile.login)),
            _ => format!("https://github.com/{}", self.config.account),
        }
    }

    pub fn open_profile(&mut self) {
        let url = self.profile_url();
        self.open_external(&url);
    }

    pub fn show_links_popup(&mut self) {
        if self.config.links.is_empty() {
            return;
        }
        let content = self
            .config
            .links
            .iter()
            .map(|link| format!("{:<10} {}", link.label, link.url))
            .collect();
        self.popup = Some(Popup::new(PopupType::Links, content));
    }

    /// Link highlighted in the links popup
    pub fn selected_link(&self) -> Option<&Link> {
        match self.popup {
            Some(ref popup) if popup.popup_type == PopupType::Links => {
                self.config.links.get(popup.selected)
            }
            _ => None,
        }
    }

    pub fn open_selected_link(&mut self) {
        if let Some(url) = self.selected_link().map(|link| link.url.clone()) {
            self.popup = None;
            self.open_external(&url);
        }
    }

    // Documents
    pub fn open_documents(&mut self) {
        self.documents.open();
    }

    pub fn close_documents(&mut self) {
        self.documents.close();
    }

    /// Open the current document outside the terminal
    pub fn open_current_document(&mut self) {
        let Some(doc) = self.documents.current().cloned() else {
            return;
        };
        match document::resolve(&doc) {
            Ok(DocumentSource::Link(url)) => self.open_external(&url),
            Ok(DocumentSource::Inline(bytes)) => {
                match document::write_inline(&Config::cache_dir(), &doc.title, &bytes) {
                    Ok(path) => self.open_external(&path.to_string_lossy()),
                    Err(e) => {
                        warn!("{:#}", e);
                        self.status_message = Some(format!("{:#}", e));
                    }
                }
            }
            Ok(DocumentSource::Missing) => {
                self.status_message = Some(strings(self.language()).error_title.to_string());
            }
            Err(e) => self.status_message = Some(e.to_string()),
        }
    }

    pub fn preview_status(&self) -> PreviewStatus {
        self.preview.status()
    }
}

// Help content lines - format: "KEY|DESCRIPTION|COLOR" where COLOR is optional
// Colors: cyan, magenta, yellow, green, red, blue
pub fn get_help_content(view_mode: ViewMode, s: &Strings) -> Vec<String> {
    let mut lines = vec![
        format!("HEADER|{}", s.help_navigation),
        format!("j/↓|{}|", s.help_move_down),
        format!("k/↑|{}|", s.help_move_up),
        format!("Tab|{}|cyan", s.help_switch_page),
        format!("1/2|{}|cyan", s.help_pages),
        "".to_string(),
        format!("HEADER|{}", s.help_appearance),
        format!("t|{}|magenta", s.help_theme),
        format!("L|{}|magenta", s.help_language),
        "".to_string(),
        format!("HEADER|{}", s.links_title),
        format!("g|{}|blue", s.help_profile),
        format!("s|{}|blue", s.help_links),
        "".to_string(),
    ];
    match view_mode {
        ViewMode::Home => lines.extend([
            format!("HEADER|{}", s.home_tab),
            format!("Enter|{}|", s.help_toggle_skill),
            format!("v|{}|green", s.view_cv),
            format!("o|{}|green", s.help_open_document),
            format!("h/l|{}|", s.help_switch_document),
        ]),
        ViewMode::Projects => lines.extend([
            format!("HEADER|{}", s.projects_tab),
            format!("Enter|{}|green", s.help_preview),
            format!("o|{}|green", s.help_open_preview),
            format!("r|{}|yellow", s.help_readme),
            format!("Esc|{}|", s.help_close_preview),
        ]),
    }
    lines.push("".to_string());
    lines.push(format!("|{}|", s.help_close));
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::github::ClientOptions;
    use crate::settings::MemoryStore;

    fn repo(id: u64, name: &str) -> Repository {
        Repository {
            id,
            name: name.to_string(),
            description: None,
            html_url: format!("https://github.com/bar/{name}"),
            updated_at: None,
        }
    }

    fn test_app() -> (App, UnboundedReceiver<AppEvent>) {
        let config = Config {
            account: "bar".to_string(),
            // Nothing listens on the discard port, probes fail fast
            preview_url_template: "http://127.0.0.1:9/{name}".to_string(),
            ..Config::default()
        };
        let client = GitHubClient::new(ClientOptions::default()).unwrap();
        App::new(config, Settings::load(Box::new(MemoryStore::default())), client)
    }

    #[tokio::test]
    async fn list_load_and_failure_states() {
        let (mut app, _rx) = test_app();
        assert!(app.repos.is_loading());

        app.handle_event(AppEvent::ReposLoaded(Ok(vec![repo(1, "a"), repo(2, "b")])));
        assert_eq!(app.visible_repos().len(), 2);

        let (mut app, _rx) = test_app();
        app.handle_event(AppEvent::ReposLoaded(Err("boom".into())));
        assert_eq!(app.repos, LoadState::Failed("boom".into()));
        assert!(app.visible_repos().is_empty());
    }

    #[tokio::test]
    async fn latest_selection_wins() {
        let (mut app, _rx) = test_app();
        app.view_mode = ViewMode::Projects;
        app.handle_event(AppEvent::ReposLoaded(Ok(vec![repo(1, "a"), repo(2, "b")])));

        app.open_preview();
        let first = app.preview.generation();
        app.next();
        app.open_preview();
        let second = app.preview.generation();

        app.handle_event(AppEvent::ProbeFinished {
            generation: second,
            outcome: ProbeOutcome::Status(200),
        });
        app.handle_event(AppEvent::ProbeFinished {
            generation: first,
            outcome: ProbeOutcome::Status(404),
        });

        assert_eq!(app.preview_status(), PreviewStatus::Available);
        assert_eq!(app.preview.selected().map(|r| r.name.as_str()), Some("b"));
        assert_eq!(app.window_title(), "b");
    }

    #[tokio::test]
    async fn closing_preview_ignores_late_result() {
        let (mut app, _rx) = test_app();
        app.handle_event(AppEvent::ReposLoaded(Ok(vec![repo(1, "a")])));
        app.view_mode = ViewMode::Projects;
        app.open_preview();
        let generation = app.preview.generation();
        app.close_preview();
        app.handle_event(AppEvent::ProbeFinished {
            generation,
            outcome: ProbeOutcome::Status(200),
        });
        assert_eq!(app.preview_status(), PreviewStatus::Idle);
    }

    #[tokio::test]
    async fn switching_pages_closes_preview() {
        let (mut app, _rx) = test_app();
        app.handle_event(AppEvent::ReposLoaded(Ok(vec![repo(1, "a")])));
        app.switch_view(ViewMode::Projects);
        app.open_preview();
        app.switch_view(ViewMode::Home);
        assert!(app.preview.selected().is_none());
    }

    #[tokio::test]
    async fn readme_only_applies_to_waiting_popup() {
        let (mut app, _rx) = test_app();
        app.handle_event(AppEvent::ReposLoaded(Ok(vec![repo(1, "a"), repo(2, "b")])));
        app.view_mode = ViewMode::Projects;
        app.show_readme();

        app.handle_event(AppEvent::ReadmeLoaded {
            repo: "b".into(),
            result: Ok("wrong".into()),
        });
        assert!(app.popup.as_ref().unwrap().loading);

        app.handle_event(AppEvent::ReadmeLoaded {
            repo: "a".into(),
            result: Ok("# a\nhello".into()),
        });
        let popup = app.popup.as_ref().unwrap();
        assert!(!popup.loading);
        assert_eq!(popup.content, vec!["# a", "hello"]);
    }

    #[tokio::test]
    async fn language_popup_sets_language() {
        let (mut app, _rx) = test_app();
        app.show_language_popup();
        app.popup_next();
        app.choose_language_in_popup();
        assert_eq!(app.language(), Language::Turkish);
        assert!(app.popup.is_none());
    }

    #[tokio::test]
    async fn window_title_tracks_loading() {
        let (mut app, _rx) = test_app();
        app.switch_view(ViewMode::Projects);
        assert_eq!(app.window_title(), "Loading...");
        app.handle_event(AppEvent::ReposLoaded(Ok(Vec::new())));
        assert_eq!(app.window_title(), "My Projects");
        app.cycle_language();
        assert_eq!(app.window_title(), "Projelerim");
    }

    #[tokio::test]
    async fn profile_url_prefers_fetched_profile() {
        let (mut app, _rx) = test_app();
        assert_eq!(app.profile_url(), "https://github.com/bar");

        app.handle_event(AppEvent::ProfileLoaded(Ok(Profile {
            login: "Bar".into(),
            name: Some("Bar Baz".into()),
            bio: None,
            html_url: None,
        })));
        assert_eq!(app.profile_url(), "https://github.com/Bar");

        app.handle_event(AppEvent::ProfileLoaded(Ok(Profile {
            login: "Bar".into(),
            name: None,
            bio: None,
            html_url: Some("https://github.example/bar".into()),
        })));
        assert_eq!(app.profile_url(), "https://github.example/bar");
    }

    #[tokio::test]
    async fn links_popup_tracks_selection() {
        let (mut app, _rx) = test_app();
        assert!(app.selected_link().is_none());

        app.show_links_popup();
        assert_eq!(app.popup.as_ref().unwrap().content.len(), 4);
        assert_eq!(app.selected_link().map(|l| l.label.as_str()), Some("GitHub"));
        app.popup_next();
        app.popup_next();
        assert_eq!(
            app.selected_link().map(|l| l.url.as_str()),
            Some("https://www.instagram.com/eemirmutlu")
        );

        app.config.links.clear();
        app.close_popup();
        app.show_links_popup();
        assert!(app.popup.is_none());
    }

    #[test]
    fn help_follows_language() {
        let help = get_help_content(ViewMode::Projects, strings(Language::German));
        assert!(help.contains(&"r|README anzeigen|yellow".to_string()));
        assert_eq!(help.last().map(String::as_str), Some("|Mit ? oder Esc schließen|"));
    }

    #[test]
    fn scrolling_stops_when_last_line_is_visible() {
        let content = (0..30).map(|i| format!("line{i}")).collect();
        let mut popup = Popup::new(PopupType::Readme("a".into()), content);
        popup.viewport = 12;
        for _ in 0..100 {
            popup.scroll_down();
        }
        assert_eq!(popup.scroll, 18);
        assert_eq!(popup.max_scroll(), 18);
    }

    #[tokio::test]
    async fn readme_failure_is_localized() {
        let (mut app, _rx) = test_app();
        app.handle_event(AppEvent::ReposLoaded(Ok(vec![repo(1, "a")])));
        app.view_mode = ViewMode::Projects;
        app.cycle_language();
        app.show_readme();
        app.handle_event(AppEvent::ReadmeLoaded {
            repo: "a".into(),
            result: Err("404".into()),
        });
        assert_eq!(
            app.popup.as_ref().unwrap().content,
            vec!["README alınamadı: 404".to_string()]
        );
    }
}
