/// Display languages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Language {
    English,
    Turkish,
    German,
}

impl Language {
    pub const ALL: [Language; 3] = [Language::English, Language::Turkish, Language::German];

    /// Short code used in the preference store
    pub fn code(&self) -> &'static str {
        match self {
            Language::English => "en",
            Language::Turkish => "tr",
            Language::German => "de",
        }
    }

    pub fn from_code(code: &str) -> Option<Language> {
        match code.trim().to_lowercase().as_str() {
            "en" => Some(Language::English),
            "tr" => Some(Language::Turkish),
            "de" => Some(Language::German),
            _ => None,
        }
    }

    /// Name of the language in itself
    pub fn label(&self) -> &'static str {
        match self {
            Language::English => "English",
            Language::Turkish => "Türkçe",
            Language::German => "Deutsch",
        }
    }

    pub fn next(&self) -> Language {
        match self {
            Language::English => Language::Turkish,
            Language::Turkish => Language::German,
            Language::German => Language::English,
        }
    }
}

/// Every user-facing string, per language
#[derive(Debug)]
pub struct Strings {
    pub home_tab: &'static str,
    pub projects_tab: &'static str,
    pub home_title: &'static str,
    pub projects_title: &'static str,
    pub loading: &'static str,
    pub no_description: &'static str,
    pub no_repositories: &'static str,
    pub repository_chip: &'static str,
    pub error_title: &'static str,
    pub error_body: &'static str,
    pub skills_title: &'static str,
    pub proficiency: &'static str,
    pub view_cv: &'static str,
    pub preview_probing: &'static str,
    pub preview_available: &'static str,
    pub preview_open: &'static str,
    pub preview_visit: &'static str,
    pub document: &'static str,
    pub language_title: &'static str,
    pub readme_loading: &'static str,
    /// `{error}` is replaced
    pub readme_unavailable: &'static str,
    /// `{target}` is replaced
    pub opened: &'static str,
    pub unnamed_document: &'static str,
    pub document_hint: &'static str,
    pub document_download_hint: &'static str,
    /// `{bytes}` is replaced
    pub pdf_size: &'static str,
    pub links_title: &'static str,
    pub links_hint: &'static str,

    // Status bar
    pub status_popup: &'static str,
    pub status_preview: &'static str,
    pub status_documents: &'static str,
    pub status_home: &'static str,
    pub status_projects: &'static str,

    // Help popup
    pub help_title: &'static str,
    pub help_close: &'static str,
    pub help_navigation: &'static str,
    pub help_move_down: &'static str,
    pub help_move_up: &'static str,
    pub help_switch_page: &'static str,
    pub help_pages: &'static str,
    pub help_appearance: &'static str,
    pub help_theme: &'static str,
    pub help_language: &'static str,
    pub help_profile: &'static str,
    pub help_links: &'static str,
    pub help_toggle_skill: &'static str,
    pub help_open_document: &'static str,
    pub help_switch_document: &'static str,
    pub help_preview: &'static str,
    pub help_open_preview: &'static str,
    pub help_readme: &'static str,
    pub help_close_preview: &'static str,
}

const EN: Strings = Strings {
    home_tab: "Home",
    projects_tab: "Projects",
    home_title: "Home",
    projects_title: "My Projects",
    loading: "Loading...",
    no_description: "No description available.",
    no_repositories: "No repositories to show.",
    repository_chip: "GitHub Repository",
    error_title: "Oops! Something Went Wrong",
    error_body: "We encountered an error while fetching the data. Please try again later.",
    skills_title: "My Skills",
    proficiency: "Proficiency",
    view_cv: "View CV",
    preview_probing: "Checking for a live site...",
    preview_available: "Live preview",
    preview_open: "Press o to open it in your browser",
    preview_visit: "Click to visit {name} repository...",
    document: "Document",
    language_title: "Language",
    readme_loading: "Fetching README...",
    readme_unavailable: "README unavailable: {error}",
    opened: "Opened {target}",
    unnamed_document: "Unnamed",
    document_hint: "o: open",
    document_download_hint: "o: open / download",
    pdf_size: "PDF · {bytes} bytes",
    links_title: "Links",
    links_hint: "s: links │ g: GitHub profile",
    status_popup: "j/k: move │ Enter: choose │ Esc: close",
    status_preview: "o: open │ Esc: close",
    status_documents: "h/l: tab │ o: open │ Esc: close",
    status_home: "j/k: skills │ Enter: details │ v: CV │ Tab: projects │ t: theme │ L: language │ ?: help │ q: quit",
    status_projects: "j/k: nav │ Enter: preview │ r: readme │ Tab: home │ t: theme │ L: language │ ?: help │ q: quit",
    help_title: "Help",
    help_close: "Press ? or Esc to close",
    help_navigation: "Navigation",
    help_move_down: "Move down",
    help_move_up: "Move up",
    help_switch_page: "Switch page",
    help_pages: "Home / Projects",
    help_appearance: "Appearance",
    help_theme: "Toggle dark mode",
    help_language: "Choose language",
    help_profile: "Open GitHub profile",
    help_links: "Show links",
    help_toggle_skill: "Show or hide skill details",
    help_open_document: "Open document in browser",
    help_switch_document: "Previous / next document",
    help_preview: "Preview repository",
    help_open_preview: "Open preview or repository",
    help_readme: "Show README",
    help_close_preview: "Close preview",
};

const TR: Strings = Strings {
    home_tab: "Ana Sayfa",
    projects_tab: "Projeler",
    home_title: "Ana Sayfa",
    projects_title: "Projelerim",
    loading: "Yükleniyor...",
    no_description: "Açıklama bulunmuyor.",
    no_repositories: "Gösterilecek proje yok.",
    repository_chip: "GitHub Deposu",
    error_title: "Hay aksi! Bir şeyler ters gitti",
    error_body: "Veriler alınırken bir hata oluştu. Lütfen daha sonra tekrar deneyin.",
    skills_title: "Yeteneklerim",
    proficiency: "Yetkinlik",
    view_cv: "CV Görüntüle",
    preview_probing: "Canlı site kontrol ediliyor...",
    preview_available: "Canlı önizleme",
    preview_open: "Tarayıcıda açmak için o tuşuna basın",
    preview_visit: "{name} deposunu ziyaret etmek için tıklayın...",
    document: "Belge",
    language_title: "Dil",
    readme_loading: "README alınıyor...",
    readme_unavailable: "README alınamadı: {error}",
    opened: "Açıldı: {target}",
    unnamed_document: "Adsız",
    document_hint: "o: aç",
    document_download_hint: "o: aç / indir",
    pdf_size: "PDF · {bytes} bayt",
    links_title: "Bağlantılar",
    links_hint: "s: bağlantılar │ g: GitHub profili",
    status_popup: "j/k: gezin │ Enter: seç │ Esc: kapat",
    status_preview: "o: aç │ Esc: kapat",
    status_documents: "h/l: sekme │ o: aç │ Esc: kapat",
    status_home: "j/k: yetenekler │ Enter: ayrıntı │ v: CV │ Tab: projeler │ t: tema │ L: dil │ ?: yardım │ q: çıkış",
    status_projects: "j/k: gezin │ Enter: önizle │ r: readme │ Tab: ana sayfa │ t: tema │ L: dil │ ?: yardım │ q: çıkış",
    help_title: "Yardım",
    help_close: "Kapatmak için ? veya Esc",
    help_navigation: "Gezinme",
    help_move_down: "Aşağı",
    help_move_up: "Yukarı",
    help_switch_page: "Sayfa değiştir",
    help_pages: "Ana Sayfa / Projeler",
    help_appearance: "Görünüm",
    help_theme: "Karanlık modu aç/kapat",
    help_language: "Dil seç",
    help_profile: "GitHub profilini aç",
    help_links: "Bağlantıları göster",
    help_toggle_skill: "Yetenek ayrıntısını göster/gizle",
    help_open_document: "Belgeyi tarayıcıda aç",
    help_switch_document: "Önceki / sonraki belge",
    help_preview: "Depoyu önizle",
    help_open_preview: "Önizlemeyi veya depoyu aç",
    help_readme: "README göster",
    help_close_preview: "Önizlemeyi kapat",
};

const DE: Strings = Strings {
    home_tab: "Startseite",
    projects_tab: "Projekte",
    home_title: "Homepage",
    projects_title: "Meine Projekte",
    loading: "Laden...",
    no_description: "Keine Beschreibung verfügbar.",
    no_repositories: "Keine Projekte vorhanden.",
    repository_chip: "GitHub-Repository",
    error_title: "Hoppla! Etwas ist schiefgelaufen",
    error_body: "Beim Abrufen der Daten ist ein Fehler aufgetreten. Bitte später erneut versuchen.",
    skills_title: "Meine Fähigkeiten",
    proficiency: "Kenntnisstand",
    view_cv: "Sicht CV",
    preview_probing: "Suche nach einer Live-Seite...",
    preview_available: "Live-Vorschau",
    preview_open: "Mit o im Browser öffnen",
    preview_visit: "Klicken, um das Repository {name} zu besuchen...",
    document: "Dokument",
    language_title: "Sprache",
    readme_loading: "README wird geladen...",
    readme_unavailable: "README nicht verfügbar: {error}",
    opened: "Geöffnet: {target}",
    unnamed_document: "Unbenannt",
    document_hint: "o: öffnen",
    document_download_hint: "o: öffnen / herunterladen",
    pdf_size: "PDF · {bytes} Bytes",
    links_title: "Links",
    links_hint: "s: Links │ g: GitHub-Profil",
    status_popup: "j/k: bewegen │ Enter: wählen │ Esc: schließen",
    status_preview: "o: öffnen │ Esc: schließen",
    status_documents: "h/l: Tab │ o: öffnen │ Esc: schließen",
    status_home: "j/k: Fähigkeiten │ Enter: Details │ v: CV │ Tab: Projekte │ t: Thema │ L: Sprache │ ?: Hilfe │ q: Beenden",
    status_projects: "j/k: Navigation │ Enter: Vorschau │ r: Readme │ Tab: Start │ t: Thema │ L: Sprache │ ?: Hilfe │ q: Beenden",
    help_title: "Hilfe",
    help_close: "Mit ? oder Esc schließen",
    help_navigation: "Navigation",
    help_move_down: "Nach unten",
    help_move_up: "Nach oben",
    help_switch_page: "Seite wechseln",
    help_pages: "Start / Projekte",
    help_appearance: "Darstellung",
    help_theme: "Dunkelmodus umschalten",
    help_language: "Sprache wählen",
    help_profile: "GitHub-Profil öffnen",
    help_links: "Links anzeigen",
    help_toggle_skill: "Details ein- oder ausblenden",
    help_open_document: "Dokument im Browser öffnen",
    help_switch_document: "Vorheriges / nächstes Dokument",
    help_preview: "Repository ansehen",
    help_open_preview: "Vorschau oder Repository öffnen",
    help_readme: "README anzeigen",
    help_close_preview: "Vorschau schließen",
};

pub fn strings(lang: Language) -> &'static Strings {
    match lang {
        Language::English => &EN,
        Language::Turkish => &TR,
        Language::German => &DE,
    }
}
