//! Plain-text rendering of session detail payloads

use super::types::{Panel, Person, Presentation, Session, SessionDetails};

/// Shown when a session has nothing to say yet. Sessions formatted to this
/// text do not open an overlay.
pub const DETAILS_COMING_SOON: &str = "Details coming soon.";

/// Format a session's details for display. Never fails; empty or missing
/// payloads produce [`DETAILS_COMING_SOON`].
pub fn format_details(session: &Session) -> String {
    let formatted = match &session.details {
        None => None,
        Some(SessionDetails::Text(text)) => format_text(text),
        Some(SessionDetails::Presentations(list)) => format_presentations(list),
        Some(SessionDetails::Panel(panel)) => format_panel(panel),
    };
    formatted.unwrap_or_else(|| DETAILS_COMING_SOON.to_string())
}

fn format_text(text: &str) -> Option<String> {
    let trimmed = text.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

fn format_presentations(list: &[Presentation]) -> Option<String> {
    let lines: Vec<String> = list
        .iter()
        .filter(|p| !p.topic.trim().is_empty())
        .enumerate()
        .map(|(i, p)| {
            let mut entry = format!("{}. {}", i + 1, p.topic.trim());
            let byline = name_with_affiliation(&p.presenter, &p.affiliation);
            if !byline.is_empty() {
                entry.push_str("\n   ");
                entry.push_str(&byline);
            }
            entry
        })
        .collect();

    (!lines.is_empty()).then(|| lines.join("\n"))
}

fn format_panel(panel: &Panel) -> Option<String> {
    let mut lines: Vec<String> = Vec::new();

    if let Some(moderator) = panel.moderator.as_ref().map(person_line).filter(|s| !s.is_empty()) {
        lines.push(format!("Moderator: {}", moderator));
    }

    let panelists: Vec<String> = panel
        .panelists
        .iter()
        .map(person_line)
        .filter(|s| !s.is_empty())
        .collect();
    if !panelists.is_empty() {
        lines.push("Panelists:".to_string());
        lines.extend(panelists.into_iter().map(|p| format!("• {}", p)));
    }

    (!lines.is_empty()).then(|| lines.join("\n"))
}

fn person_line(person: &Person) -> String {
    name_with_affiliation(&person.name, &person.affiliation)
}

fn name_with_affiliation(name: &str, affiliation: &str) -> String {
    match (name.trim(), affiliation.trim()) {
        ("", "") => String::new(),
        (name, "") => name.to_string(),
        ("", affiliation) => format!("({})", affiliation),
        (name, affiliation) => format!("{} ({})", name, affiliation),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::TimePoint;

    fn session(details: Option<SessionDetails>) -> Session {
        Session {
            day: 1,
            start: TimePoint::from("09:00"),
            end: TimePoint::from("10:00"),
            category: "talk".into(),
            title: "Test".into(),
            column: None,
            column_span: None,
            details,
        }
    }

    fn person(name: &str, affiliation: &str) -> Person {
        Person { name: name.into(), affiliation: affiliation.into() }
    }

    #[test]
    fn missing_details_is_coming_soon() {
        assert_eq!(format_details(&session(None)), DETAILS_COMING_SOON);
    }

    #[test]
    fn blank_text_is_coming_soon() {
        let s = session(Some(SessionDetails::Text("   ".into())));
        assert_eq!(format_details(&s), DETAILS_COMING_SOON);
    }

    #[test]
    fn text_is_trimmed() {
        let s = session(Some(SessionDetails::Text("  Doors open at 8.\n".into())));
        assert_eq!(format_details(&s), "Doors open at 8.");
    }

    #[test]
    fn presentations_are_numbered() {
        let s = session(Some(SessionDetails::Presentations(vec![
            Presentation { topic: "Lifetimes".into(), presenter: "Ana".into(), affiliation: "Uni".into() },
            Presentation { topic: "Traits".into(), presenter: "Ben".into(), affiliation: String::new() },
            Presentation { topic: "Macros".into(), presenter: String::new(), affiliation: String::new() },
        ])));
        assert_eq!(
            format_details(&s),
            "1. Lifetimes\n   Ana (Uni)\n2. Traits\n   Ben\n3. Macros"
        );
    }

    #[test]
    fn empty_presentation_list_is_coming_soon() {
        let s = session(Some(SessionDetails::Presentations(Vec::new())));
        assert_eq!(format_details(&s), DETAILS_COMING_SOON);
    }

    #[test]
    fn panel_lists_moderator_then_panelists() {
        let s = session(Some(SessionDetails::Panel(Panel {
            moderator: Some(person("Kim", "Org")),
            panelists: vec![person("Lee", "Lab"), person("Max", "")],
        })));
        assert_eq!(
            format_details(&s),
            "Moderator: Kim (Org)\nPanelists:\n• Lee (Lab)\n• Max"
        );
    }

    #[test]
    fn panel_without_moderator() {
        let s = session(Some(SessionDetails::Panel(Panel {
            moderator: None,
            panelists: vec![person("Lee", "Lab")],
        })));
        assert_eq!(format_details(&s), "Panelists:\n• Lee (Lab)");
    }

    #[test]
    fn empty_panel_is_coming_soon() {
        let s = session(Some(SessionDetails::Panel(Panel {
            moderator: Some(person("", "")),
            panelists: Vec::new(),
        })));
        assert_eq!(format_details(&s), DETAILS_COMING_SOON);
    }
}
