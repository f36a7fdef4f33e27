use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use crate::config::ThemeConfig;
use crate::logs::{Notification, NotificationLevel};

const TOAST_WIDTH: u16 = 48;

/// Top-right corner, sized to the message
pub fn toast_rect(message: &str, screen: Rect) -> Rect {
    let width = TOAST_WIDTH.min(screen.width);
    let inner = width.saturating_sub(4).max(1) as usize;
    let lines = message.chars().count().div_ceil(inner).max(1) as u16;
    let height = (lines + 2).min(screen.height);
    Rect::new(
        screen.right().saturating_sub(width + 1).max(screen.x),
        screen.y + 1u16.min(screen.height.saturating_sub(height)),
        width,
        height,
    )
}

pub fn render_toast(f: &mut Frame, notification: &Notification, theme: &ThemeConfig) {
    let (icon, color) = match notification.level {
        NotificationLevel::Success => ("✓", theme.success()),
        NotificationLevel::Info => ("i", theme.info()),
        NotificationLevel::Error => ("✗", theme.error()),
    };

    let area = toast_rect(&notification.message, f.area());
    f.render_widget(Clear, area);

    let text = Line::from(vec![
        Span::styled(format!("{} ", icon), Style::default().fg(color)),
        Span::styled(notification.message.as_str(), Style::default().fg(theme.fg())),
    ]);
    let paragraph = Paragraph::new(text)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(color))
                .style(Style::default().bg(theme.bg_panel())),
        )
        .wrap(Wrap { trim: true });
    f.render_widget(paragraph, area);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toast_sits_top_right() {
        let rect = toast_rect("Successfully loaded 20 records", Rect::new(0, 0, 120, 40));
        assert_eq!(rect.right(), 119);
        assert_eq!(rect.y, 1);
        assert_eq!(rect.height, 3);
    }

    #[test]
    fn long_message_wraps() {
        let msg = "Unable to load email data. Please check your connection and try again.";
        let rect = toast_rect(msg, Rect::new(0, 0, 120, 40));
        assert_eq!(rect.height, 4);
    }
}
