use crate::app::{App, LoadState, Popup, PopupType, ViewMode};
use crate::document::DocumentSource;
use crate::github::Repository;
use crate::i18n::{strings, Language, Strings};
use crate::preview::{PreviewStatus, PreviewView};
use crate::theme::Palette;
use crossterm::{execute, terminal::SetTitle};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Margin, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{
        Block, BorderType, Borders, Clear, Gauge, Paragraph, Scrollbar, ScrollbarOrientation,
        ScrollbarState, Tabs, Wrap,
    },
    Frame,
};
use std::io::{self, Write};

/// Height of one repository card including its border
pub const CARD_HEIGHT: u16 = 5;

const SPINNER_FRAMES: [&str; 10] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

/// Static stand-in shown when a repository has no live site
pub const MOCK_TREE: [&str; 8] = [
    "public/",
    "    index.html",
    "    favicon.ico",
    "src/",
    "    App.js",
    "    index.js",
    "    components/",
    "    utils/",
];

/// Terminal window title, written only when it changes
#[derive(Debug, Default)]
pub struct TitleSync {
    last: Option<String>,
}

impl TitleSync {
    /// Returns whether a title was written
    pub fn sync<W: Write>(&mut self, out: &mut W, title: String) -> io::Result<bool> {
        if self.last.as_deref() == Some(title.as_str()) {
            return Ok(false);
        }
        execute!(out, SetTitle(&title))?;
        self.last = Some(title);
        Ok(true)
    }
}

pub fn draw(f: &mut Frame, app: &mut App) {
    // Scrolling is clamped against what the popup can actually show
    if let Some(ref mut popup) = app.popup {
        popup.viewport = popup_inner(&popup.popup_type, f.area()).height as usize;
    }
    let app = &*app;
    let palette = Palette::for_mode(app.settings.dark_mode());
    let s = strings(app.language());

    f.render_widget(Block::default().style(palette.base()), f.area());

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Title bar with page tabs
            Constraint::Min(0),    // Page
            Constraint::Length(1), // Status bar
        ])
        .split(f.area());

    draw_title_bar(f, chunks[0], app, &palette, s);

    match app.view_mode {
        ViewMode::Home => draw_home(f, chunks[1], app, &palette, s),
        ViewMode::Projects => draw_projects(f, chunks[1], app, &palette, s),
    }

    let status = if let Some(ref msg) = app.status_message {
        msg.clone()
    } else {
        get_status_bar_text(app, s).to_string()
    };
    let status_bar = Paragraph::new(status).style(palette.dim());
    f.render_widget(status_bar, chunks[2]);

    // Overlays, topmost last
    if let Some(view) = app.preview.view() {
        if let Some(repo) = app.preview.selected() {
            draw_preview(f, app, repo, &view, &palette, s);
        }
    }
    if app.documents.is_open() {
        draw_documents(f, app, &palette, s);
    }
    if let Some(ref popup) = app.popup {
        draw_popup(f, popup, app.language(), &palette, s);
    }
}

fn draw_title_bar(f: &mut Frame, area: Rect, app: &App, palette: &Palette, s: &Strings) {
    let active = Style::default().fg(palette.accent).add_modifier(Modifier::BOLD);
    let inactive = palette.dim();
    let (home_style, projects_style) = match app.view_mode {
        ViewMode::Home => (active, inactive),
        ViewMode::Projects => (inactive, active),
    };

    let who = match app.profile {
        LoadState::Loading => Span::styled("░░░░░░░░", palette.dim()),
        LoadState::Ready(ref profile) => {
            let who = match profile.name.as_deref().map(str::trim).filter(|n| !n.is_empty()) {
                Some(name) => format!("{} ({})", name, profile.login),
                None => profile.login.clone(),
            };
            let bio = profile
                .bio
                .as_deref()
                .map(str::trim)
                .filter(|b| !b.is_empty())
                .map(|b| format!(" · {}", truncate(b, 40)))
                .unwrap_or_default();
            Span::styled(
                format!("{}{}", who, bio),
                Style::default().fg(palette.foreground),
            )
        }
        LoadState::Failed(_) => Span::styled(app.config.account.clone(), palette.dim()),
    };

    let mode_icon = if app.settings.dark_mode() { "☾" } else { "☀" };

    let title = Line::from(vec![
        Span::styled(" folio ", palette.title()),
        Span::raw("│ "),
        who,
        Span::raw(" │ "),
        Span::styled(format!("[1] {}", s.home_tab), home_style),
        Span::raw("  "),
        Span::styled(format!("[2] {}", s.projects_tab), projects_style),
        Span::raw(" │ "),
        Span::styled(mode_icon, Style::default().fg(palette.accent)),
        Span::raw(" "),
        Span::styled(app.language().code().to_uppercase(), palette.dim()),
    ]);

    f.render_widget(Paragraph::new(title), area);
}

// Projects page
fn draw_projects(f: &mut Frame, area: Rect, app: &App, palette: &Palette, s: &Strings) {
    if let LoadState::Failed(_) = app.repos {
        draw_error_page(f, area, palette, s);
        return;
    }

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(2), Constraint::Min(0)])
        .split(area);

    let heading = if app.repos.is_loading() {
        Line::from(Span::styled("░".repeat(16), palette.dim()))
    } else {
        Line::from(Span::styled(s.projects_title, palette.title()))
    };
    f.render_widget(Paragraph::new(heading).alignment(Alignment::Center), chunks[0]);

    let list_area = chunks[1].inner(Margin {
        horizontal: 1,
        vertical: 0,
    });

    match app.repos {
        LoadState::Loading => {
            for (i, slot) in card_slots(list_area, app.config.placeholder_cards).into_iter().enumerate() {
                draw_skeleton_card(f, slot, palette, i);
            }
        }
        LoadState::Ready(ref repos) if repos.is_empty() => {
            let empty = Paragraph::new(s.no_repositories)
                .style(palette.dim())
                .alignment(Alignment::Center);
            f.render_widget(empty, list_area);
        }
        LoadState::Ready(ref repos) => {
            let slots = card_slots(list_area, repos.len());
            let first = first_visible(app.selected, slots.len());
            for (slot, (idx, repo)) in slots.into_iter().zip(repos.iter().enumerate().skip(first)) {
                draw_repo_card(f, slot, repo, idx == app.selected, palette, s);
            }
        }
        LoadState::Failed(_) => {}
    }
}

/// Rects for up to `count` cards stacked in `area`
fn card_slots(area: Rect, count: usize) -> Vec<Rect> {
    let fit = (area.height / CARD_HEIGHT) as usize;
    (0..count.min(fit))
        .map(|i| Rect {
            x: area.x,
            y: area.y + i as u16 * CARD_HEIGHT,
            width: area.width,
            height: CARD_HEIGHT,
        })
        .collect()
}

/// First card index so that `selected` stays on screen
fn first_visible(selected: usize, visible: usize) -> usize {
    if visible == 0 {
        0
    } else {
        selected.saturating_sub(visible - 1)
    }
}

fn draw_skeleton_card(f: &mut Frame, area: Rect, palette: &Palette, seed: usize) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(palette.dim());
    let inner = block.inner(area);
    f.render_widget(block, area);

    let width = inner.width as usize;
    let lines = vec![
        Line::from(Span::styled(
            format!("(◌) {}", "░".repeat((width / 3 + seed % 4).min(width.saturating_sub(4)))),
            palette.dim(),
        )),
        Line::from(Span::styled("░".repeat(width.saturating_sub(8)), palette.dim())),
        Line::from(Span::styled("░".repeat(width / 5), palette.dim())),
    ];
    f.render_widget(Paragraph::new(lines), inner);
}

fn draw_repo_card(
    f: &mut Frame,
    area: Rect,
    repo: &Repository,
    selected: bool,
    palette: &Palette,
    s: &Strings,
) {
    let border_style = if selected {
        Style::default().fg(palette.accent).add_modifier(Modifier::BOLD)
    } else {
        palette.dim()
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(border_style)
        .style(Style::default().bg(palette.card));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let width = inner.width as usize;
    let avatar = Span::styled(
        format!(" {} ", repo.initial()),
        Style::default().fg(Color::White).bg(palette.accent).add_modifier(Modifier::BOLD),
    );
    let name = Span::styled(
        format!(" {}", truncate(&repo.name, width.saturating_sub(5))),
        Style::default().fg(palette.foreground).add_modifier(Modifier::BOLD),
    );
    let description = repo
        .description_text()
        .unwrap_or(s.no_description);
    let updated = repo
        .updated_at
        .map(|t| format!("  {}", t.format("%Y-%m-%d")))
        .unwrap_or_default();

    let lines = vec![
        Line::from(vec![avatar, name]),
        Line::from(Span::styled(truncate(description, width), palette.dim())),
        Line::from(vec![
            Span::styled(
                format!(" {} ", s.repository_chip),
                Style::default().fg(Color::White).bg(palette.accent),
            ),
            Span::styled(updated, palette.dim()),
        ]),
    ];
    f.render_widget(Paragraph::new(lines), inner);
}

fn draw_error_page(f: &mut Frame, area: Rect, palette: &Palette, s: &Strings) {
    let lines = vec![
        Line::from(""),
        Line::from(Span::styled("(×_×)", Style::default().fg(palette.error))),
        Line::from(""),
        Line::from(Span::styled(
            s.error_title,
            Style::default().fg(palette.foreground).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(Span::styled(s.error_body, palette.dim())),
    ];
    let height = (lines.len() as u16).min(area.height);
    let top = area.y + area.height.saturating_sub(height) / 2;
    let body = Rect {
        x: area.x,
        y: top,
        width: area.width,
        height,
    };
    f.render_widget(
        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true }),
        body,
    );
}

fn draw_preview(
    f: &mut Frame,
    app: &App,
    repo: &Repository,
    view: &PreviewView,
    palette: &Palette,
    s: &Strings,
) {
    let area = centered_rect(80, 70, f.area());
    f.render_widget(Clear, area);

    let block = Block::default()
        .title(format!(" {} ", repo.name))
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(palette.accent))
        .style(palette.base());
    let inner = block.inner(area);
    f.render_widget(block, area);

    match view.status {
        PreviewStatus::Idle | PreviewStatus::Probing => {
            let frame = SPINNER_FRAMES[(app.tick as usize) % SPINNER_FRAMES.len()];
            let spinner = Paragraph::new(vec![
                Line::from(""),
                Line::from(Span::styled(frame, Style::default().fg(palette.accent))),
                Line::from(""),
                Line::from(Span::styled(s.preview_probing, palette.dim())),
            ])
            .alignment(Alignment::Center);
            f.render_widget(spinner, inner);
        }
        PreviewStatus::Available => {
            let frame = Block::default()
                .title(format!(" {} ", s.preview_available))
                .borders(Borders::ALL)
                .border_style(Style::default().fg(palette.success));
            let frame_area = inner.inner(Margin {
                horizontal: 1,
                vertical: 1,
            });
            let content = Paragraph::new(vec![
                Line::from(""),
                Line::from(Span::styled(
                    view.preview_url.clone(),
                    Style::default()
                        .fg(palette.foreground)
                        .add_modifier(Modifier::UNDERLINED),
                )),
                Line::from(""),
                Line::from(Span::styled(s.preview_open, palette.dim())),
            ])
            .alignment(Alignment::Center)
            .block(frame);
            f.render_widget(content, frame_area);
        }
        PreviewStatus::Unavailable => {
            let mut lines = vec![
                Line::from(Span::styled(
                    repo.name.clone(),
                    Style::default().fg(palette.foreground).add_modifier(Modifier::BOLD),
                )),
                Line::from(""),
            ];
            for entry in MOCK_TREE {
                let style = if entry.ends_with('/') && !entry.starts_with(' ') {
                    Style::default().fg(palette.highlight).add_modifier(Modifier::BOLD)
                } else {
                    Style::default().fg(palette.foreground)
                };
                lines.push(Line::from(Span::styled(format!("  {}", entry), style)));
            }
            lines.push(Line::from(""));
            lines.push(Line::from(Span::styled(
                s.preview_visit.replace("{name}", &repo.name),
                Style::default().fg(palette.accent).add_modifier(Modifier::ITALIC),
            )));
            lines.push(Line::from(Span::styled(
                format!("o → {}", repo.html_url),
                palette.dim(),
            )));
            let listing = Paragraph::new(lines).wrap(Wrap { trim: false });
            f.render_widget(
                listing,
                inner.inner(Margin {
                    horizontal: 2,
                    vertical: 1,
                }),
            );
        }
    }
}

// Home page
fn draw_home(f: &mut Frame, area: Rect, app: &App, palette: &Palette, s: &Strings) {
    let area = area.inner(Margin {
        horizontal: 2,
        vertical: 1,
    });
    let lang = app.language();
    let bio = app.home.bio.get(lang);
    let bio_height = wrapped_height(bio, area.width).min(area.height / 2).max(1);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2),          // Headline
            Constraint::Length(bio_height), // Biography
            Constraint::Length(2),          // CV button
            Constraint::Length(2),          // Links
            Constraint::Length(2),          // Skills heading
            Constraint::Min(0),             // Skills
        ])
        .split(area);

    let headline = Line::from(vec![
        Span::styled(
            app.home.headline.display(),
            Style::default().fg(palette.highlight).add_modifier(Modifier::BOLD),
        ),
        Span::styled("▌", Style::default().fg(palette.highlight)),
    ]);
    f.render_widget(Paragraph::new(headline), chunks[0]);

    f.render_widget(
        Paragraph::new(bio)
            .style(Style::default().fg(palette.foreground))
            .wrap(Wrap { trim: true }),
        chunks[1],
    );

    let button = Line::from(vec![
        Span::styled(
            format!(" {} ", s.view_cv),
            Style::default()
                .fg(Color::White)
                .bg(palette.highlight)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled("  v", palette.dim()),
    ]);
    f.render_widget(Paragraph::new(button), chunks[2]);
    f.render_widget(Paragraph::new(links_line(app, palette, s)), chunks[3]);

    f.render_widget(
        Paragraph::new(Span::styled(s.skills_title, palette.title())).alignment(Alignment::Center),
        chunks[4],
    );

    draw_skills(f, chunks[5], app, palette, s);
}

/// Link labels separated by dots, followed by the key hint
fn links_line(app: &App, palette: &Palette, s: &Strings) -> Line<'static> {
    let mut spans = Vec::new();
    for (idx, link) in app.config.links.iter().enumerate() {
        if idx > 0 {
            spans.push(Span::styled(" · ", palette.dim()));
        }
        spans.push(Span::styled(
            link.label.clone(),
            Style::default().fg(palette.accent).add_modifier(Modifier::BOLD),
        ));
    }
    if !spans.is_empty() {
        spans.push(Span::raw("   "));
    }
    spans.push(Span::styled(s.links_hint, palette.dim()));
    Line::from(spans)
}

fn draw_skills(f: &mut Frame, area: Rect, app: &App, palette: &Palette, s: &Strings) {
    let lang = app.language();
    let mut y = area.y;
    let bottom = area.y + area.height;

    for (idx, skill) in app.home.skills.iter().enumerate() {
        let expanded = app.home.is_expanded(idx);
        let description = skill.description.get(lang);
        let extra = if expanded {
            wrapped_height(description, area.width.saturating_sub(2))
        } else {
            0
        };
        let height = 3 + extra;
        if y + height > bottom {
            break;
        }

        let is_selected = idx == app.home.selected;
        let marker = if expanded { "▾" } else { "▸" };
        let name_style = if is_selected {
            Style::default().fg(palette.accent).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(palette.foreground)
        };
        f.render_widget(
            Paragraph::new(Line::from(vec![
                Span::styled(format!("{} ", marker), name_style),
                Span::styled(skill.name.clone(), name_style),
            ])),
            Rect { x: area.x, y, width: area.width, height: 1 },
        );

        let gauge = Gauge::default()
            .gauge_style(Style::default().fg(palette.highlight).bg(palette.card))
            .ratio(skill.ratio())
            .label(format!("{}: {}%", s.proficiency, skill.level.min(100)));
        f.render_widget(gauge, Rect { x: area.x, y: y + 1, width: area.width, height: 1 });

        if expanded {
            f.render_widget(
                Paragraph::new(description)
                    .style(palette.dim())
                    .wrap(Wrap { trim: true }),
                Rect {
                    x: area.x + 2,
                    y: y + 2,
                    width: area.width.saturating_sub(2),
                    height: extra,
                },
            );
        }
        y += height;
    }
}

fn draw_documents(f: &mut Frame, app: &App, palette: &Palette, s: &Strings) {
    let area = centered_rect(85, 80, f.area());
    f.render_widget(Clear, area);

    let title = app
        .documents
        .current()
        .map(|d| d.title.as_str())
        .filter(|t| !t.is_empty())
        .unwrap_or(s.unnamed_document);
    let block = Block::default()
        .title(format!(" {} | {} ", s.document, title))
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(palette.highlight))
        .style(palette.base());
    let inner = block.inner(area);
    f.render_widget(block, area);

    let body = if app.documents.has_tabs() {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(2), Constraint::Min(0)])
            .split(inner);
        let titles: Vec<String> = app.documents.documents().iter().map(|d| d.title.clone()).collect();
        let tabs = Tabs::new(titles)
            .select(app.documents.selected())
            .style(palette.dim())
            .highlight_style(Style::default().fg(palette.accent).add_modifier(Modifier::BOLD));
        f.render_widget(tabs, chunks[0]);
        chunks[1]
    } else {
        inner
    };

    let download_hint = if app.documents.downloadable {
        s.document_download_hint
    } else {
        s.document_hint
    };
    match app.documents.current_source() {
        Some(Ok(DocumentSource::Link(url))) => {
            let content = Paragraph::new(vec![
                Line::from(""),
                Line::from(Span::styled(
                    url,
                    Style::default()
                        .fg(palette.foreground)
                        .add_modifier(Modifier::UNDERLINED),
                )),
                Line::from(""),
                Line::from(Span::styled(download_hint, palette.dim())),
            ])
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true });
            f.render_widget(content, body);
        }
        Some(Ok(DocumentSource::Inline(bytes))) => {
            let content = Paragraph::new(vec![
                Line::from(""),
                Line::from(Span::styled(
                    s.pdf_size.replace("{bytes}", &bytes.len().to_string()),
                    Style::default().fg(palette.foreground),
                )),
                Line::from(""),
                Line::from(Span::styled(download_hint, palette.dim())),
            ])
            .alignment(Alignment::Center);
            f.render_widget(content, body);
        }
        Some(Ok(DocumentSource::Missing)) | Some(Err(_)) | None => {
            draw_error_page(f, body, palette, s);
        }
    }
}

// Popups
fn popup_area(popup_type: &PopupType, screen: Rect) -> Rect {
    let (width, height) = match popup_type {
        PopupType::Help => (60, 70),
        PopupType::Language => (30, 30),
        PopupType::Links => (60, 30),
        PopupType::Readme(_) => (80, 85),
    };
    centered_rect(width, height, screen)
}

/// Content rows of a popup, inside its border
fn popup_inner(popup_type: &PopupType, screen: Rect) -> Rect {
    popup_area(popup_type, screen).inner(Margin {
        horizontal: 1,
        vertical: 1,
    })
}

fn draw_popup(f: &mut Frame, popup: &Popup, lang: Language, palette: &Palette, s: &Strings) {
    let area = popup_area(&popup.popup_type, f.area());
    f.render_widget(Clear, area);

    let title = match popup.popup_type {
        PopupType::Help => format!(" {} ", s.help_title),
        PopupType::Language => format!(" {} ", s.language_title),
        PopupType::Links => format!(" {} ", s.links_title),
        PopupType::Readme(ref name) => format!(" {} · README ", name),
    };

    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(palette.accent))
        .style(palette.base());

    let inner_area = block.inner(area);
    f.render_widget(block, area);

    if matches!(popup.popup_type, PopupType::Language | PopupType::Links) {
        let lines: Vec<Line> = popup
            .content
            .iter()
            .enumerate()
            .map(|(idx, label)| {
                let current = popup.popup_type == PopupType::Language
                    && Language::ALL.get(idx) == Some(&lang);
                let marker = if current { "● " } else { "  " };
                let style = if idx == popup.selected {
                    Style::default().fg(Color::White).bg(palette.accent)
                } else {
                    Style::default().fg(palette.foreground)
                };
                Line::from(Span::styled(format!("{}{}", marker, label), style))
            })
            .collect();
        f.render_widget(Paragraph::new(lines), inner_area);
        return;
    }

    // Calculate visible content with scroll
    let visible_height = inner_area.height as usize;
    let total_lines = popup.content.len();
    let scroll = popup.scroll.min(total_lines.saturating_sub(visible_height));

    let visible_content: Vec<Line> = popup
        .content
        .iter()
        .skip(scroll)
        .take(visible_height)
        .map(|line| match popup.popup_type {
            PopupType::Help => help_line(line, palette),
            _ => markdown_line(line, palette),
        })
        .collect();

    f.render_widget(Paragraph::new(visible_content), inner_area);

    // Draw scrollbar if content overflows
    if total_lines > visible_height {
        let scrollbar = Scrollbar::new(ScrollbarOrientation::VerticalRight);
        let mut scrollbar_state = ScrollbarState::new(total_lines).position(scroll);

        f.render_stateful_widget(
            scrollbar,
            area.inner(Margin {
                horizontal: 0,
                vertical: 1,
            }),
            &mut scrollbar_state,
        );
    }
}

/// Render a "KEY|DESCRIPTION|COLOR" help entry
fn help_line(line: &str, palette: &Palette) -> Line<'static> {
    let parts: Vec<&str> = line.split('|').collect();
    match parts.as_slice() {
        ["HEADER", title] => Line::from(Span::styled(title.to_string(), palette.title())),
        [key, desc, color] => {
            let key_style = Style::default()
                .fg(named_color(color).unwrap_or(palette.foreground))
                .add_modifier(Modifier::BOLD);
            Line::from(vec![
                Span::styled(format!("  {:<8}", key), key_style),
                Span::styled(desc.to_string(), Style::default().fg(palette.foreground)),
            ])
        }
        _ => Line::from(line.to_string()),
    }
}

fn named_color(name: &str) -> Option<Color> {
    match name {
        "cyan" => Some(Color::Cyan),
        "magenta" => Some(Color::Magenta),
        "yellow" => Some(Color::Yellow),
        "green" => Some(Color::Green),
        "red" => Some(Color::Red),
        "blue" => Some(Color::Blue),
        _ => None,
    }
}

/// Light highlighting for README text
fn markdown_line(line: &str, palette: &Palette) -> Line<'static> {
    if line.starts_with('#') {
        Line::from(Span::styled(line.to_string(), palette.title()))
    } else if line.starts_with("```") {
        Line::from(Span::styled(line.to_string(), palette.dim()))
    } else if line.trim_start().starts_with("- ") || line.trim_start().starts_with("* ") {
        Line::from(Span::styled(line.to_string(), Style::default().fg(palette.highlight)))
    } else {
        Line::from(Span::styled(line.to_string(), Style::default().fg(palette.foreground)))
    }
}

// Utility functions
fn truncate(s: &str, max_len: usize) -> String {
    if max_len == 0 {
        return String::new();
    }
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let truncated: String = s.chars().take(max_len - 1).collect();
        format!("{}…", truncated)
    }
}

/// Rough line count of `text` wrapped at `width`
fn wrapped_height(text: &str, width: u16) -> u16 {
    let width = width.max(1) as usize;
    let lines: usize = text
        .lines()
        .map(|l| l.chars().count().div_ceil(width).max(1))
        .sum();
    lines.max(1) as u16
}

fn get_status_bar_text(app: &App, s: &Strings) -> &'static str {
    if app.popup.is_some() {
        return s.status_popup;
    }
    if app.preview.selected().is_some() {
        return s.status_preview;
    }
    if app.documents.is_open() {
        return s.status_documents;
    }

    match app.view_mode {
        ViewMode::Home => s.status_home,
        ViewMode::Projects => s.status_projects,
    }
}

fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
