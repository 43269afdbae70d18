//! Numeric placeholder validation.
//!
//! Amount arguments accept `%...%` placeholders. The name determines the
//! accepted argument count; the output is the canonical `%name/args%` form
//! regardless of how the source spelled it.

use crate::error::{Diagnostic, ErrorCode};
use crate::span::Span;

/// Placeholders that resolve to a number and take no arguments.
const NUMERIC: [&str; 17] = [
    "player.ping",
    "player.health",
    "player.maxhealth",
    "player.hunger",
    "player.experience",
    "player.level",
    "player.protocol",
    "player.location.x",
    "player.location.y",
    "player.location.z",
    "player.location.pitch",
    "player.location.yaw",
    "player.group.priority",
    "player.parkour.ticks",
    "house.guests",
    "house.cookies",
    "house.players",
];

/// Placeholders that resolve to text, and are therefore invalid wherever a
/// number is required.
const TEXTUAL: [&str; 10] = [
    "server.name",
    "player.name",
    "player.version",
    "player.gamemode",
    "player.region.name",
    "player.group.name",
    "player.team.name",
    "player.team.color",
    "house.name",
    "house.visitingrules",
];

/// Validates placeholder `content` (without the `%` pair) in a numeric
/// position and returns its canonical `%...%` form.
pub(crate) fn canonical_numeric(content: &str, span: Span) -> Result<String, Diagnostic> {
    let trimmed = content.trim();
    let (name, args) = match trimmed.split_once('/') {
        Some((name, rest)) => {
            let args: Vec<&str> = rest.split_whitespace().collect();
            (name, args)
        }
        None => (trimmed, Vec::new()),
    };

    match name {
        "stat.player" | "stat.global" => {
            if args.len() != 1 {
                return Err(Diagnostic::error(format!(
                    "`%{name}%` takes a stat key, got {} arguments",
                    args.len()
                ))
                .with_code(ErrorCode::InvalidPlaceholder)
                .with_label(span)
                .with_help(format!("write `%{name}/key%`")));
            }
            Ok(format!("%{name}/{}%", args[0]))
        }
        "stat.team" => {
            if args.len() != 2 {
                return Err(Diagnostic::error(format!(
                    "`%stat.team%` takes a stat key and a team, got {} arguments",
                    args.len()
                ))
                .with_code(ErrorCode::InvalidPlaceholder)
                .with_label(span)
                .with_help("write `%stat.team/key team%`"));
            }
            Ok(format!("%stat.team/{} {}%", args[0], args[1]))
        }
        name if NUMERIC.contains(&name) => {
            if !args.is_empty() {
                return Err(Diagnostic::error(format!(
                    "`%{name}%` takes no arguments"
                ))
                .with_code(ErrorCode::InvalidPlaceholder)
                .with_label(span));
            }
            Ok(format!("%{name}%"))
        }
        name if TEXTUAL.contains(&name) => Err(Diagnostic::error(format!(
            "placeholder `%{name}%` is not numeric"
        ))
        .with_code(ErrorCode::InvalidPlaceholder)
        .with_label(span)),
        other => Err(Diagnostic::error(format!("invalid placeholder `%{other}%`"))
            .with_code(ErrorCode::InvalidPlaceholder)
            .with_label(span)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stat_placeholders_need_a_key() {
        let span = Span::new(0, 10);
        assert_eq!(
            canonical_numeric("stat.player/kills", span).unwrap(),
            "%stat.player/kills%"
        );
        let err = canonical_numeric("stat.player", span).unwrap_err();
        assert_eq!(err.code, Some(ErrorCode::InvalidPlaceholder));
    }

    #[test]
    fn team_stats_take_two_arguments() {
        let span = Span::new(0, 10);
        assert_eq!(
            canonical_numeric("stat.team/points red", span).unwrap(),
            "%stat.team/points red%"
        );
        assert!(canonical_numeric("stat.team/points", span).is_err());
    }

    #[test]
    fn bare_numeric_placeholders() {
        let span = Span::new(0, 10);
        assert_eq!(
            canonical_numeric("player.health", span).unwrap(),
            "%player.health%"
        );
        assert!(canonical_numeric("player.health/extra", span).is_err());
    }

    #[test]
    fn textual_placeholders_are_rejected() {
        let err = canonical_numeric("player.name", Span::new(0, 10)).unwrap_err();
        assert!(err.message.contains("not numeric"));
    }

    #[test]
    fn unknown_placeholders_are_rejected() {
        assert!(canonical_numeric("bogus.thing", Span::new(0, 10)).is_err());
    }

    #[test]
    fn whitespace_is_normalized() {
        assert_eq!(
            canonical_numeric("  stat.team/points   red ", Span::new(0, 10)).unwrap(),
            "%stat.team/points red%"
        );
    }
}
