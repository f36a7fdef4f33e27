use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::Line,
    widgets::{Block, Borders, Clear},
    Frame,
};

use crate::config::ThemeConfig;

/// Bordered frame around the records table, with an optional status on the
/// right of the top border
pub struct Pane<'a> {
    title: &'a str,
    status: Option<String>,
    theme: &'a ThemeConfig,
}

impl<'a> Pane<'a> {
    pub fn new(title: &'a str, theme: &'a ThemeConfig) -> Self {
        Self {
            title,
            status: None,
            theme,
        }
    }

    pub fn status(mut self, status: impl Into<String>) -> Self {
        self.status = Some(status.into());
        self
    }

    pub fn block(self) -> Block<'a> {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(self.theme.border_active()))
            .title(Line::styled(
                self.title,
                Style::default()
                    .fg(self.theme.primary())
                    .add_modifier(Modifier::BOLD),
            ));
        match self.status {
            Some(status) => block.title(
                Line::styled(status, Style::default().fg(self.theme.fg_muted())).right_aligned(),
            ),
            None => block,
        }
    }
}

/// Centre a `width` x `height` box in `area`, keeping a two-cell margin
pub fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width.saturating_sub(4));
    let height = height.min(area.height.saturating_sub(4));
    Rect::new(
        area.x + (area.width - width) / 2,
        area.y + (area.height - height) / 2,
        width,
        height,
    )
}

/// Popup drawn over the dashboard: loading spinner, record detail, body preview
pub struct Modal<'a> {
    title: &'a str,
    theme: &'a ThemeConfig,
}

impl<'a> Modal<'a> {
    pub fn new(title: &'a str, theme: &'a ThemeConfig) -> Self {
        Self { title, theme }
    }

    /// Clear `area`, draw the frame and return the space inside it
    pub fn open(&self, f: &mut Frame, area: Rect) -> Rect {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(self.theme.border_active()))
            .title(Line::styled(self.title, Style::default().fg(self.theme.primary())).centered())
            .style(Style::default().bg(self.theme.bg_panel()));
        let inner = block.inner(area);
        f.render_widget(Clear, area);
        f.render_widget(block, area);
        inner
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::{Terminal, backend::TestBackend};

    #[test]
    fn centered_box_keeps_margin() {
        assert_eq!(
            centered(Rect::new(0, 0, 100, 30), 40, 10),
            Rect::new(30, 10, 40, 10)
        );
        assert_eq!(centered(Rect::new(0, 0, 50, 30), 200, 10).width, 46);
        assert_eq!(centered(Rect::new(0, 0, 2, 2), 10, 10), Rect::new(1, 1, 0, 0));
    }

    #[test]
    fn status_sits_on_the_right() {
        let theme = ThemeConfig::default();
        let mut terminal = Terminal::new(TestBackend::new(40, 3)).unwrap();
        terminal
            .draw(|f| {
                let block = Pane::new("Logs", &theme).status("Page 1 of 2");
                f.render_widget(block.block(), f.area());
            })
            .unwrap();

        let buffer = terminal.backend().buffer();
        let top: String = (0..40).map(|x| buffer[(x, 0)].symbol()).collect();
        assert!(top.contains("Logs"));
        assert!(top.trim_end_matches('┐').ends_with("Page 1 of 2"));
    }

    #[test]
    fn modal_inner_excludes_border() {
        let theme = ThemeConfig::default();
        let mut terminal = Terminal::new(TestBackend::new(20, 6)).unwrap();
        let mut inner = Rect::default();
        terminal
            .draw(|f| inner = Modal::new(" x ", &theme).open(f, Rect::new(2, 1, 10, 4)))
            .unwrap();
        assert_eq!(inner, Rect::new(3, 2, 8, 2));
    }
}
