use crate::document::{Document, DocumentKind};
use crate::home::Skill;
use crate::i18n::Language;
use crate::preview::FailurePolicy;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::warn;

/// Text with per-language variants, English is mandatory
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocalizedText {
    pub en: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tr: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub de: Option<String>,
}

impl LocalizedText {
    pub fn new(en: &str, tr: &str, de: &str) -> Self {
        Self {
            en: en.to_string(),
            tr: Some(tr.to_string()),
            de: Some(de.to_string()),
        }
    }

    /// Variant for `lang`, English when missing
    pub fn get(&self, lang: Language) -> &str {
        let variant = match lang {
            Language::English => None,
            Language::Turkish => self.tr.as_deref(),
            Language::German => self.de.as_deref(),
        };
        variant.unwrap_or(&self.en)
    }
}

/// Content of the home page
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HomeConfig {
    /// Typed without animation
    #[serde(default = "default_headline_prefix")]
    pub headline_prefix: String,

    /// Typed and deleted in a loop
    #[serde(default = "default_headline")]
    pub headline: String,

    #[serde(default = "default_bio")]
    pub bio: LocalizedText,

    #[serde(default = "default_skills")]
    pub skills: Vec<Skill>,
}

impl Default for HomeConfig {
    fn default() -> Self {
        Self {
            headline_prefix: default_headline_prefix(),
            headline: default_headline(),
            bio: default_bio(),
            skills: default_skills(),
        }
    }
}

/// An external link listed on the home page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Link {
    pub label: String,
    pub url: String,
}

impl Link {
    pub fn new(label: &str, url: &str) -> Self {
        Self {
            label: label.to_string(),
            url: url.to_string(),
        }
    }
}

/// Application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// GitHub account whose repositories are listed
    #[serde(default = "default_account")]
    pub account: String,

    /// Environment variable holding the API token
    #[serde(default = "default_token_env")]
    pub token_env: String,

    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,

    /// `{account}` and `{name}` are substituted
    #[serde(default = "default_preview_url_template")]
    pub preview_url_template: String,

    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,

    #[serde(default = "default_probe_timeout_secs")]
    pub probe_timeout_secs: u64,

    /// How a probe that never got a response is shown
    #[serde(default)]
    pub probe_failure: FailurePolicy,

    /// Skeleton cards shown while the list loads
    #[serde(default = "default_placeholder_cards")]
    pub placeholder_cards: usize,

    #[serde(default)]
    pub home: HomeConfig,

    #[serde(default = "default_documents")]
    pub documents: Vec<Document>,

    /// Social links, in display order
    #[serde(default = "default_links")]
    pub links: Vec<Link>,
}

fn default_account() -> String {
    "eemirmutlu".to_string()
}

fn default_token_env() -> String {
    "GITHUB_TOKEN".to_string()
}

fn default_api_base_url() -> String {
    "https://api.github.com".to_string()
}

fn default_preview_url_template() -> String {
    "https://{account}.github.io/{name}".to_string()
}

fn default_request_timeout_secs() -> u64 {
    10
}

fn default_probe_timeout_secs() -> u64 {
    8
}

fn default_placeholder_cards() -> usize {
    6
}

fn default_headline_prefix() -> String {
    "H".to_string()
}

fn default_headline() -> String {
    "ello Welcome to my Portfolio".to_string()
}

fn default_bio() -> LocalizedText {
    LocalizedText::new(
        "Hello, I'm Emir. I was born in Turkey in 2003 and I work as a front-end developer \
         while studying Econometrics at Uludağ University. Writing front-end code gives me a \
         lot of joy, and I speak both English and Turkish fluently.",
        "Merhaba, ben Emir. 2003 yılında Türkiye'de doğdum; Uludağ Üniversitesi'nde \
         Ekonometri okurken ön uç geliştiricisi olarak çalışıyorum. Ön uç kodu yazmak bana \
         büyük keyif veriyor ve hem İngilizce hem Türkçe dillerini akıcı konuşabiliyorum.",
        "Hallo, ich bin Emir. Ich wurde 2003 in der Türkei geboren und arbeite als \
         Frontend-Entwickler, während ich an der Uludağ-Universität Ökonometrie studiere. \
         Ich spreche fließend Englisch und Türkisch.",
    )
}

fn default_skills() -> Vec<Skill> {
    vec![
        Skill::new(
            "JavaScript",
            70,
            LocalizedText::new(
                "Experienced with ES6+ features and frameworks like React.",
                "ES6+ özellikleri ve React gibi frameworklerle deneyimliyim.",
                "Ich habe Erfahrung mit ES6+ Features und Frameworks wie React.",
            ),
        ),
        Skill::new(
            "React",
            70,
            LocalizedText::new(
                "Skilled in building responsive and dynamic UIs with React.",
                "React ile duyarlı ve dinamik kullanıcı arayüzleri oluşturma konusunda yetenekliyim.",
                "Ich bin in der Lage, mit React responsive und dynamische Benutzeroberflächen zu erstellen.",
            ),
        ),
        Skill::new(
            "TypeScript",
            90,
            LocalizedText::new(
                "Strong understanding of TypeScript's type system and tooling.",
                "TypeScript'in type sistemi ve araçları konusunda güçlü bir anlayışa sahibim.",
                "Ich habe ein fundiertes Verständnis des Typsystems und der Tools von TypeScript.",
            ),
        ),
        Skill::new(
            "CSS",
            90,
            LocalizedText::new(
                "Proficient in CSS, Sass, and responsive design techniques.",
                "CSS, Sass ve duyarlı tasarım tekniklerinde yetkinim.",
                "Ich bin versiert in CSS, Sass und Techniken des responsiven Designs.",
            ),
        ),
        Skill::new(
            "Python",
            60,
            LocalizedText::new(
                "Good understanding of Python for backend and scripting.",
                "Backend ve Script yazımı için Python konusunda yetkinim.",
                "Ich bin versiert in Python für Backend-Entwicklung und Skripterstellung.",
            ),
        ),
        Skill::new(
            "Visual Basic",
            75,
            LocalizedText::new(
                "Proficient in using Office programs effectively with Visual Basic.",
                "Visual Basic ile Office programlarını etkin bir şekilde kullanabilirim.",
                "Ich kann Office-Programme effektiv mit Visual Basic nutzen.",
            ),
        ),
    ]
}

fn default_documents() -> Vec<Document> {
    vec![Document {
        title: "CV".to_string(),
        url: "https://heyzine.com/flip-book/b19e5a6603.html".to_string(),
        kind: DocumentKind::String,
    }]
}

fn default_links() -> Vec<Link> {
    vec![
        Link::new("GitHub", "https://github.com/eemirmutlu"),
        Link::new("Discord", "https://discord.com/invite/eemirmutlu"),
        Link::new("Instagram", "https://www.instagram.com/eemirmutlu"),
        Link::new("LinkedIn", "https://www.linkedin.com/in/eemirmutlu/"),
    ]
}

impl Default for Config {
    fn default() -> Self {
        Self {
            account: default_account(),
            token_env: default_token_env(),
            api_base_url: default_api_base_url(),
            preview_url_template: default_preview_url_template(),
            request_timeout_secs: default_request_timeout_secs(),
            probe_timeout_secs: default_probe_timeout_secs(),
            probe_failure: FailurePolicy::default(),
            placeholder_cards: default_placeholder_cards(),
            home: HomeConfig::default(),
            documents: default_documents(),
            links: default_links(),
        }
    }
}

impl Config {
    /// Get the config directory path
    pub fn config_dir() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("folio")
    }

    /// Get the config file path
    pub fn config_path() -> PathBuf {
        Self::config_dir().join("config.toml")
    }

    /// Directory for the log file and decoded documents
    pub fn cache_dir() -> PathBuf {
        dirs::cache_dir()
            .unwrap_or_else(std::env::temp_dir)
            .join("folio")
    }

    /// Load config from the default path, falling back to defaults
    pub fn load() -> Self {
        Self::load_from(&Self::config_path())
    }

    /// Load config from `path`; a missing file means defaults, a broken one is logged
    pub fn load_from(path: &Path) -> Self {
        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(_) => return Config::default(),
        };
        match toml::from_str(&content) {
            Ok(config) => config,
            Err(e) => {
                warn!("ignoring invalid config {}: {}", path.display(), e);
                Config::default()
            }
        }
    }

    /// API token from the configured environment variable, if set and non-empty
    pub fn token(&self) -> Option<String> {
        env::var(&self.token_env)
            .ok()
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty())
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn probe_timeout(&self) -> Duration {
        Duration::from_secs(self.probe_timeout_secs)
    }
}
