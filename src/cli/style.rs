//! Terminal styling for outcome and status output
//!
//! Each piece of output has a [`Role`]; the role picks both the color and
//! the stream whose color support (`NO_COLOR`, `CLICOLOR`, TTY) decides
//! whether the color is emitted.

use indicatif::ProgressStyle;
use owo_colors::{OwoColorize, Style};
use std::fmt::{self, Display};
use std::sync::OnceLock;

pub use owo_colors::Stream;

/// What a piece of output means to the reader
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    /// Issue numbers, repositories, commands
    Accent,
    /// New issue created
    Success,
    /// Duplicate or already fixed
    Warn,
    /// Failed submission
    Error,
    /// Hints and metadata
    Muted,
    /// Headings
    Emphasis,
}

impl Role {
    const fn style(self) -> Style {
        match self {
            Self::Accent => Style::new().cyan(),
            Self::Success => Style::new().green(),
            Self::Warn => Style::new().yellow(),
            Self::Error => Style::new().red(),
            Self::Muted => Style::new().dimmed(),
            Self::Emphasis => Style::new().bold(),
        }
    }

    const fn stream(self) -> Stream {
        match self {
            Self::Error => Stream::Stderr,
            _ => Stream::Stdout,
        }
    }
}

/// A value rendered in a [`Role`]
#[derive(Clone, Debug)]
pub struct Painted<T> {
    value: T,
    role: Role,
}

impl<T: Display> Display for Painted<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let style = self.role.style();
        let shown = self
            .value
            .if_supports_color(self.role.stream(), |v| v.style(style));
        write!(f, "{shown}")
    }
}

/// Paint anything displayable in a role
pub trait Stylize: Display {
    /// Paint in an explicit role
    fn paint(&self, role: Role) -> Painted<&Self> {
        Painted { value: self, role }
    }

    fn accent(&self) -> Painted<&Self> {
        self.paint(Role::Accent)
    }

    fn success(&self) -> Painted<&Self> {
        self.paint(Role::Success)
    }

    fn warn(&self) -> Painted<&Self> {
        self.paint(Role::Warn)
    }

    fn error(&self) -> Painted<&Self> {
        self.paint(Role::Error)
    }

    fn muted(&self) -> Painted<&Self> {
        self.paint(Role::Muted)
    }

    fn emphasis(&self) -> Painted<&Self> {
        self.paint(Role::Emphasis)
    }
}

impl<T: Display + ?Sized> Stylize for T {}

/// Leading mark for an outcome line
pub const fn mark(role: Role) -> Painted<&'static str> {
    let value = match role {
        Role::Success => "✓",
        Role::Warn => "●",
        Role::Error => "✗",
        _ => "•",
    };
    Painted { value, role }
}

/// Clickable OSC 8 hyperlink, or `text (url)` where unsupported
pub fn hyperlink(stream: Stream, text: &str, url: &str) -> String {
    let target = match stream {
        Stream::Stdout => supports_hyperlinks::Stream::Stdout,
        Stream::Stderr => supports_hyperlinks::Stream::Stderr,
    };

    if supports_hyperlinks::on(target) {
        terminal_link::Link::new(text, url).to_string()
    } else if text == url {
        url.to_string()
    } else {
        format!("{text} ({url})")
    }
}

/// Spinner shown while the tracker is contacted
pub fn spinner_style() -> ProgressStyle {
    static STYLE: OnceLock<ProgressStyle> = OnceLock::new();
    STYLE
        .get_or_init(|| {
            ProgressStyle::default_spinner()
                .template("{spinner:.cyan} {msg}")
                .expect("hardcoded spinner template is valid")
                .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏")
        })
        .clone()
}
