use ratatui::style::{Color, Modifier, Style};

// Color palette
pub const PRIMARY: Color = Color::Rgb(64, 128, 192);
pub const SECONDARY: Color = Color::Rgb(96, 160, 96);
pub const ACCENT: Color = Color::Rgb(192, 160, 64);
pub const ERROR: Color = Color::Rgb(192, 64, 64);
pub const MUTED: Color = Color::Rgb(128, 128, 128);
pub const HIGHLIGHT: Color = Color::Rgb(48, 48, 64);

pub fn title_style() -> Style {
    Style::default().fg(PRIMARY).add_modifier(Modifier::BOLD)
}

pub fn selected_style() -> Style {
    Style::default().bg(HIGHLIGHT).add_modifier(Modifier::BOLD)
}

pub fn list_item_style() -> Style {
    Style::default().fg(Color::White)
}

pub fn muted_style() -> Style {
    Style::default().fg(MUTED)
}

pub fn highlight_style() -> Style {
    Style::default().fg(ACCENT)
}

pub fn success_style() -> Style {
    Style::default().fg(SECONDARY)
}

pub fn error_style() -> Style {
    Style::default().fg(ERROR)
}

pub fn tab_style(selected: bool) -> Style {
    if selected {
        Style::default()
            .fg(PRIMARY)
            .add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
    } else {
        muted_style()
    }
}

pub fn border_style(focused: bool) -> Style {
    if focused {
        Style::default().fg(PRIMARY)
    } else {
        Style::default().fg(MUTED)
    }
}

pub fn search_style() -> Style {
    Style::default().fg(ACCENT)
}

pub fn status_bar_style() -> Style {
    Style::default().bg(Color::Rgb(32, 32, 40)).fg(Color::White)
}

pub fn help_key_style() -> Style {
    Style::default().fg(ACCENT).add_modifier(Modifier::BOLD)
}

pub fn help_desc_style() -> Style {
    Style::default().fg(Color::White)
}

/// Colour a categorical label by how much attention it needs.
pub fn status_style(label: &str) -> Style {
    match label {
        "Compliant" | "Active" | "Complete" | "Cleared" | "Received" | "Awarded" => success_style(),
        "Pending" | "In Progress" | "Invited" | "Submitted" | "Drafting" | "Requested"
        | "On Leave" | "Onboarding" => highlight_style(),
        "Expired" | "Missing" | "Suspended" | "Flagged" | "Declined" | "Exiting" => error_style(),
        _ => list_item_style(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_style_buckets() {
        assert_eq!(status_style("Compliant"), success_style());
        assert_eq!(status_style("Pending"), highlight_style());
        assert_eq!(status_style("Expired"), error_style());
        assert_eq!(status_style("Prospect"), list_item_style());
    }
}
