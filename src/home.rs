use crate::config::{HomeConfig, LocalizedText};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::time::{Duration, Instant};

pub const TYPE_STEP: Duration = Duration::from_millis(200);
pub const FULL_HOLD: Duration = Duration::from_millis(1000);

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Skill {
    pub name: String,
    /// Percent, clamped to 100 when drawn
    pub level: u16,
    pub description: LocalizedText,
}

impl Skill {
    pub fn new(name: &str, level: u16, description: LocalizedText) -> Self {
        Self {
            name: name.to_string(),
            level,
            description,
        }
    }

    pub fn ratio(&self) -> f64 {
        f64::from(self.level.min(100)) / 100.0
    }
}

/// Headline that types itself out, pauses, then erases
#[derive(Debug, Clone)]
pub struct Typewriter {
    prefix: String,
    text: Vec<char>,
    shown: usize,
    deleting: bool,
    next_step: Option<Instant>,
}

impl Typewriter {
    pub fn new(prefix: &str, text: &str) -> Self {
        Self {
            prefix: prefix.to_string(),
            text: text.chars().collect(),
            shown: 0,
            deleting: false,
            next_step: None,
        }
    }

    pub fn display(&self) -> String {
        let typed: String = self.text[..self.shown].iter().collect();
        format!("{}{}", self.prefix, typed)
    }

    /// Advance as many steps as are due at `now`
    pub fn tick(&mut self, now: Instant) {
        let mut due = match self.next_step {
            Some(at) => at,
            None => {
                self.next_step = Some(now + TYPE_STEP);
                return;
            }
        };
        while due <= now {
            due += self.step();
        }
        self.next_step = Some(due);
    }

    /// One typing or erasing step; returns the delay until the next one
    fn step(&mut self) -> Duration {
        if self.text.is_empty() {
            return TYPE_STEP;
        }
        if self.deleting {
            self.shown = self.shown.saturating_sub(1);
            if self.shown == 0 {
                self.deleting = false;
            }
            TYPE_STEP
        } else {
            self.shown += 1;
            if self.shown == self.text.len() {
                self.deleting = true;
                FULL_HOLD
            } else {
                TYPE_STEP
            }
        }
    }
}

/// State of the home page
#[derive(Debug, Clone)]
pub struct HomePage {
    pub headline: Typewriter,
    pub bio: LocalizedText,
    pub skills: Vec<Skill>,
    pub selected: usize,
    expanded: HashSet<usize>,
}

impl HomePage {
    pub fn new(config: &HomeConfig) -> Self {
        Self {
            headline: Typewriter::new(&config.headline_prefix, &config.headline),
            bio: config.bio.clone(),
            skills: config.skills.clone(),
            selected: 0,
            expanded: HashSet::new(),
        }
    }

    pub fn next(&mut self) {
        if !self.skills.is_empty() {
            self.selected = (self.selected + 1).min(self.skills.len() - 1);
        }
    }

    pub fn previous(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    pub fn toggle_selected(&mut self) {
        if self.selected >= self.skills.len() {
            return;
        }
        if !self.expanded.remove(&self.selected) {
            self.expanded.insert(self.selected);
        }
    }

    pub fn is_expanded(&self, idx: usize) -> bool {
        self.expanded.contains(&idx)
    }
}
