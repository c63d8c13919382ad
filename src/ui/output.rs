//! ui::output
//!
//! What the person running the command reads.
//!
//! Results go to stdout, warnings and `--debug` detail to stderr. `--quiet`
//! silences everything except errors. Developer diagnostics go through
//! `tracing` instead.

use std::fmt::Display;

use crate::engine::Context;
use crate::store::{LinkChange, LinkOutcome};

/// Console printer bound to the `--quiet` and `--debug` flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Printer {
    quiet: bool,
    debug: bool,
}

impl Printer {
    /// Quiet wins over debug.
    pub fn new(quiet: bool, debug: bool) -> Self {
        Self {
            quiet,
            debug: debug && !quiet,
        }
    }

    pub fn for_context(ctx: &Context) -> Self {
        Self::new(ctx.quiet, ctx.debug)
    }

    /// Whether `detail` lines are shown.
    pub fn shows_detail(&self) -> bool {
        self.debug
    }

    /// A result line on stdout.
    pub fn line(&self, message: impl Display) {
        if !self.quiet {
            println!("{}", message);
        }
    }

    /// A `[debug]` line on stderr, only with `--debug`.
    pub fn detail(&self, message: impl Display) {
        if self.debug {
            eprintln!("[debug] {}", message);
        }
    }

    pub fn warn(&self, message: impl Display) {
        if !self.quiet {
            eprintln!("warning: {}", message);
        }
    }

    /// A heading followed by indented items, or `Heading: (none)`.
    pub fn section<T: Display>(&self, heading: &str, items: &[T]) {
        if !self.quiet {
            println!("{}", render_section(heading, items));
        }
    }

    /// Report a bound alias link. Untouched links are detail only.
    pub fn link(&self, outcome: &LinkOutcome) {
        match outcome.change {
            LinkChange::Unchanged => self.detail(describe_link(outcome)),
            LinkChange::Created | LinkChange::Replaced => self.line(describe_link(outcome)),
        }
    }
}

/// Print an error message. Always shown.
pub fn error(message: impl Display) {
    eprintln!("error: {}", message);
}

/// `value`, or `(none)` when absent.
pub fn or_none<T: Display>(value: Option<T>) -> String {
    match value {
        Some(v) => v.to_string(),
        None => "(none)".to_string(),
    }
}

fn describe_link(outcome: &LinkOutcome) -> String {
    let verb = match outcome.change {
        LinkChange::Created => "Linked",
        LinkChange::Replaced => "Relinked",
        LinkChange::Unchanged => "Kept",
    };
    format!("{} {} -> {}", verb, outcome.name, outcome.target)
}

fn render_section<T: Display>(heading: &str, items: &[T]) -> String {
    if items.is_empty() {
        return format!("{}: (none)", heading);
    }
    let mut out = format!("{}:", heading);
    for item in items {
        out.push_str("\n  ");
        out.push_str(&item.to_string());
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::version::Version;

    fn outcome(name: &str, target: &str, change: LinkChange) -> LinkOutcome {
        LinkOutcome {
            name: name.to_string(),
            target: Version::normalize(target).unwrap(),
            change,
        }
    }

    #[test]
    fn quiet_wins_over_debug() {
        assert!(!Printer::new(true, true).shows_detail());
        assert!(Printer::new(false, true).shows_detail());
        assert!(!Printer::new(false, false).shows_detail());
    }

    #[test]
    fn link_descriptions() {
        assert_eq!(
            describe_link(&outcome("stable", "1.1.0", LinkChange::Created)),
            "Linked stable -> v1.1.0"
        );
        assert_eq!(
            describe_link(&outcome("v1.0", "1.0.1", LinkChange::Replaced)),
            "Relinked v1.0 -> v1.0.1"
        );
        assert_eq!(
            describe_link(&outcome("dev", "2.0.0-rc.1", LinkChange::Unchanged)),
            "Kept dev -> v2.0.0-rc.1"
        );
    }

    #[test]
    fn sections() {
        assert_eq!(render_section("Versions", &["v1.1.0", "v1.0.0"]), "Versions:\n  v1.1.0\n  v1.0.0");
        assert_eq!(render_section::<&str>("Versions", &[]), "Versions: (none)");
    }

    #[test]
    fn none_placeholder() {
        assert_eq!(or_none(Some("v1.0.0")), "v1.0.0");
        assert_eq!(or_none(None::<&str>), "(none)");
    }
}
