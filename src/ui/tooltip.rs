use ratatui::{
    layout::Rect,
    style::Style,
    widgets::{Paragraph, Wrap},
    Frame,
};

use super::Modal;
use crate::app::HoverPreview;
use crate::config::ThemeConfig;

const MAX_WIDTH: u16 = 60;
const MAX_HEIGHT: u16 = 16;

/// Lines `content` takes when wrapped to `width` columns
fn wrapped_height(content: &str, width: u16) -> u16 {
    let width = width.max(1) as usize;
    content
        .lines()
        .map(|l| l.chars().count().div_ceil(width).max(1))
        .sum::<usize>()
        .max(1)
        .min(u16::MAX as usize) as u16
}

/// Place the tooltip just below the anchor cell with its right edge at the
/// cell's centre, flipping above when there is no room and clamping to the
/// screen.
pub fn tooltip_rect(anchor: Rect, content: &str, screen: Rect) -> Rect {
    let width = MAX_WIDTH.min(screen.width);
    let height = (wrapped_height(content, width.saturating_sub(2)) + 2)
        .min(MAX_HEIGHT)
        .min(screen.height);

    let center = anchor.x + anchor.width / 2;
    let x = center
        .saturating_sub(width)
        .max(screen.x)
        .min(screen.right().saturating_sub(width));

    let below = anchor.bottom();
    let y = if below + height <= screen.bottom() {
        below
    } else {
        anchor
            .y
            .saturating_sub(height)
            .max(screen.y)
            .min(screen.bottom().saturating_sub(height))
    };

    Rect::new(x, y, width, height)
}

pub fn render_tooltip(f: &mut Frame, preview: &HoverPreview, theme: &ThemeConfig) {
    let area = tooltip_rect(preview.anchor, &preview.content, f.area());
    let inner = Modal::new(" Body ", theme).open(f, area);

    let paragraph = Paragraph::new(preview.content.as_str())
        .style(Style::default().fg(theme.fg()))
        .wrap(Wrap { trim: false });
    f.render_widget(paragraph, inner);
}
