//! List view built from the current fetch state.
//!
//! [`ListView::build`] is the composition root: it runs the grouper over the
//! latest response and maps every location to a row with its icon and
//! actions. [`ListView::lines`] lays the rows out as styled spans; how a
//! style reaches the screen is up to [`crate::terminal`].

use chrono::{DateTime, Local, Utc};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use dining_client::FetchState;
use dining_core::presentation::{subtitle, title};
use dining_core::{group_by_label, icon_for, StatusIcon, Tint};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Modifier {
    /// Cmd on macOS, Ctrl elsewhere.
    Primary,
}

impl Modifier {
    fn is_held(self, held: KeyModifiers) -> bool {
        match self {
            // most macOS terminals keep Cmd for themselves, so Ctrl counts there too
            Modifier::Primary if cfg!(target_os = "macos") => {
                held.intersects(KeyModifiers::CONTROL | KeyModifiers::SUPER)
            }
            Modifier::Primary => held.contains(KeyModifiers::CONTROL),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Shortcut {
    pub modifier: Modifier,
    pub key: char,
}

impl Shortcut {
    pub(crate) const REFRESH: Shortcut = Shortcut {
        modifier: Modifier::Primary,
        key: 'r',
    };

    /// Whether a key press is this chord. The bare key never matches.
    pub(crate) fn matches(self, event: &KeyEvent) -> bool {
        let KeyCode::Char(pressed) = event.code else {
            return false;
        };
        pressed.eq_ignore_ascii_case(&self.key) && self.modifier.is_held(event.modifiers)
    }
}

impl std::fmt::Display for Shortcut {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let modifier = match self.modifier {
            Modifier::Primary if cfg!(target_os = "macos") => "Cmd",
            Modifier::Primary => "Ctrl",
        };
        write!(f, "{modifier}+{}", self.key.to_ascii_uppercase())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum ItemAction {
    Refresh { shortcut: Shortcut },
    OpenInBrowser { title: &'static str, url: String },
}

impl ItemAction {
    pub(crate) fn title(&self) -> &str {
        match self {
            ItemAction::Refresh { .. } => "Refresh",
            ItemAction::OpenInBrowser { title, .. } => title,
        }
    }
}

fn row_actions(hours_url: &str) -> Vec<ItemAction> {
    vec![
        ItemAction::Refresh {
            shortcut: Shortcut::REFRESH,
        },
        ItemAction::OpenInBrowser {
            title: "View Operational Hours",
            url: hours_url.to_string(),
        },
    ]
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct ListItem {
    pub title: String,
    pub subtitle: String,
    pub icon: StatusIcon,
    pub actions: Vec<ItemAction>,
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Section {
    pub title: String,
    pub items: Vec<ListItem>,
}

/// How a run of text should look. Mapped to terminal attributes at draw time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Style {
    Plain,
    Heading,
    Muted,
    Tint(Tint),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Span {
    pub text: String,
    pub style: Style,
}

impl Span {
    pub(crate) fn new(text: impl Into<String>, style: Style) -> Self {
        Self {
            text: text.into(),
            style,
        }
    }
}

pub(crate) type Line = Vec<Span>;

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct ListView {
    /// Show the loading indicator: a request is outstanding and nothing has
    /// been received yet.
    pub loading: bool,
    pub sections: Vec<Section>,
    pub updated_at: Option<DateTime<Utc>>,
    pub error: Option<String>,
    /// Actions every row carries, kept here so the legend survives an empty list.
    pub actions: Vec<ItemAction>,
}

impl ListView {
    pub(crate) fn build(state: &FetchState, hours_url: &str) -> Self {
        let loading = state.is_loading() && state.data().is_none();
        let locations = state.data().map(|d| d.locations()).unwrap_or_default();
        let actions = row_actions(hours_url);

        let sections = group_by_label(locations)
            .groups()
            .iter()
            .map(|group| Section {
                title: group.label.clone(),
                items: group
                    .locations
                    .iter()
                    .map(|location| ListItem {
                        title: title(location).to_string(),
                        subtitle: subtitle(location).to_string(),
                        icon: icon_for(&location.status.color_name),
                        actions: actions.clone(),
                    })
                    .collect(),
            })
            .collect();

        Self {
            loading,
            sections,
            updated_at: state.fetched_at(),
            error: state.last_error().map(str::to_string),
            actions,
        }
    }

    pub(crate) fn item_count(&self) -> usize {
        self.sections.iter().map(|s| s.items.len()).sum()
    }

    /// Target of the "View Operational Hours" action.
    pub(crate) fn hours_url(&self) -> Option<&str> {
        self.actions.iter().find_map(|action| match action {
            ItemAction::OpenInBrowser { url, .. } => Some(url.as_str()),
            ItemAction::Refresh { .. } => None,
        })
    }

    pub(crate) fn lines(&self) -> Vec<Line> {
        let mut lines = Vec::new();
        if self.loading {
            lines.push(vec![Span::new("Loading\u{2026}", Style::Plain)]);
        }

        for section in &self.sections {
            lines.push(vec![Span::new(section.title.as_str(), Style::Heading)]);
            for item in &section.items {
                lines.push(vec![
                    Span::new("  ", Style::Plain),
                    Span::new(item.icon.symbol.glyph(), Style::Tint(item.icon.tint)),
                    Span::new(format!(" {}  ", item.title), Style::Plain),
                    Span::new(item.subtitle.as_str(), Style::Muted),
                ]);
            }
            lines.push(Vec::new());
        }

        if let Some(updated) = self.updated_at {
            let local: DateTime<Local> = updated.into();
            let text = format!("Updated {}", local.format("%H:%M:%S"));
            lines.push(vec![Span::new(text, Style::Muted)]);
        }
        if let Some(err) = &self.error {
            let text = format!("Last refresh failed: {err}");
            lines.push(vec![Span::new(text, Style::Muted)]);
        }

        lines
    }

    /// One-line key legend for the row actions, shown even when the list is empty.
    pub(crate) fn action_legend(&self) -> String {
        let mut legend = String::new();
        for action in &self.actions {
            let key = match action {
                ItemAction::Refresh { shortcut } => shortcut.to_string(),
                ItemAction::OpenInBrowser { .. } => "o".to_string(),
            };
            legend.push_str(&format!("[{key}] {}  ", action.title()));
        }
        legend.push_str("[q] Quit");
        legend
    }
}
