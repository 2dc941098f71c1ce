use ratatui::{
    style::{Color, Style},
    text::Span,
};

/// Icon colors using terminal colors (respects user's terminal theme)
#[derive(Debug, Clone)]
pub struct IconTheme {
    pub folder_color: Color,
    pub file_color: Color,
    pub favorite_color: Color,
    pub selected_color: Color,
    pub online_color: Color,
    pub offline_color: Color,
}

impl Default for IconTheme {
    fn default() -> Self {
        Self {
            folder_color: Color::Blue,
            file_color: Color::Cyan,
            favorite_color: Color::Yellow,
            selected_color: Color::Green,
            online_color: Color::Green,
            offline_color: Color::DarkGray,
        }
    }
}

/// Emoji icons for list rows
#[derive(Debug, Clone, Default)]
pub struct IconRenderer {
    theme: IconTheme,
}

impl IconRenderer {
    /// Selection mark, type icon and favorite star of a drive row
    pub fn item(&self, is_dir: bool, selected: bool, favorited: bool) -> Vec<Span<'static>> {
        let mut spans = Vec::with_capacity(3);

        spans.push(if selected {
            Span::styled("✔ ", Style::default().fg(self.theme.selected_color))
        } else {
            Span::raw("  ")
        });

        spans.push(if is_dir {
            Span::styled("📁 ", Style::default().fg(self.theme.folder_color))
        } else {
            Span::styled("📄 ", Style::default().fg(self.theme.file_color))
        });

        if favorited {
            spans.push(Span::styled("★ ", Style::default().fg(self.theme.favorite_color)));
        }

        spans
    }

    /// Presence dot of a contact
    pub fn presence(&self, online: bool) -> Span<'static> {
        if online {
            Span::styled("● ", Style::default().fg(self.theme.online_color))
        } else {
            Span::styled("○ ", Style::default().fg(self.theme.offline_color))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(spans: &[Span]) -> String {
        spans.iter().map(|s| s.content.as_ref()).collect()
    }

    #[test]
    fn test_item_icons() {
        let icons = IconRenderer::default();
        assert_eq!(text(&icons.item(true, false, false)), "  📁 ");
        assert_eq!(text(&icons.item(false, true, true)), "✔ 📄 ★ ");
    }
}
