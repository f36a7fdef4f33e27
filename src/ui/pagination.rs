use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::app::PageTarget;
use crate::config::ThemeConfig;
use crate::logs::ListView;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageItem {
    Previous { enabled: bool },
    Page { number: u32, active: bool },
    /// Shown instead of page links when the size is "All"; never clickable
    All,
    Gap,
    Next { enabled: bool },
}

impl PageItem {
    pub fn label(&self) -> String {
        match self {
            PageItem::Previous { .. } => "‹ Prev".to_string(),
            PageItem::Page { number, .. } => format!(" {} ", number),
            PageItem::All => " All ".to_string(),
            PageItem::Gap => "…".to_string(),
            PageItem::Next { .. } => "Next ›".to_string(),
        }
    }

    fn width(&self) -> u16 {
        match *self {
            PageItem::Previous { .. } | PageItem::Next { .. } => 6,
            PageItem::Page { number, .. } => number.checked_ilog10().unwrap_or(0) as u16 + 3,
            PageItem::All => 5,
            PageItem::Gap => 1,
        }
    }

    pub fn target(&self) -> Option<PageTarget> {
        match *self {
            PageItem::Previous { enabled: true } => Some(PageTarget::Previous),
            PageItem::Next { enabled: true } => Some(PageTarget::Next),
            PageItem::Page { number, .. } => Some(PageTarget::Page(number)),
            _ => None,
        }
    }
}

fn items_width(items: &[PageItem]) -> u32 {
    let labels: u32 = items.iter().map(|i| i.width() as u32).sum();
    labels + items.len().saturating_sub(1) as u32
}

fn with_pages(view: &ListView, pages: &[u32]) -> Vec<PageItem> {
    let mut items = vec![PageItem::Previous {
        enabled: view.can_go_previous(),
    }];
    if view.page_size().is_unbounded() {
        items.push(PageItem::All);
    } else {
        let mut last = 0;
        for &number in pages {
            if last != 0 && number != last + 1 {
                items.push(PageItem::Gap);
            }
            items.push(PageItem::Page {
                number,
                active: number == view.page(),
            });
            last = number;
        }
    }
    items.push(PageItem::Next {
        enabled: view.can_go_next(),
    });
    items
}

/// Prev, page links, Next. When not every page fits in `max_width` the
/// first, last and the widest window around the current page are kept.
pub fn pagination_items(view: &ListView, max_width: u16) -> Vec<PageItem> {
    let mut best = with_pages(view, &view.page_links(0));
    if view.page_size().is_unbounded() {
        return best;
    }

    let mut radius = 0;
    while !view.links_cover_all(radius) {
        radius += 1;
        let candidate = with_pages(view, &view.page_links(radius));
        if items_width(&candidate) > max_width as u32 {
            break;
        }
        best = candidate;
    }
    best
}

/// Render rows-per-page on the left and page links on the right. Returns
/// the clickable areas.
pub fn render_pagination(
    f: &mut Frame,
    area: Rect,
    view: &ListView,
    theme: &ThemeConfig,
) -> Vec<(Rect, PageTarget)> {
    let [left, right] =
        Layout::horizontal([Constraint::Length(26), Constraint::Min(0)]).areas(area);

    let size = Line::from(vec![
        Span::styled("Rows per page: ", Style::default().fg(theme.fg_muted())),
        Span::styled(
            view.page_size().to_string(),
            Style::default().fg(theme.fg()).add_modifier(Modifier::BOLD),
        ),
    ]);
    f.render_widget(Paragraph::new(size), left);

    let items = pagination_items(view, right.width);
    let total = items_width(&items).min(right.width as u32) as u16;
    let mut x = right.right().saturating_sub(total);

    let mut spans = Vec::new();
    let mut targets = Vec::new();
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            spans.push(Span::raw(" "));
            x = x.saturating_add(1);
        }
        let width = item.width();
        let style = match item {
            PageItem::Page { active: true, .. } | PageItem::All => Style::default()
                .fg(theme.bg())
                .bg(theme.primary())
                .add_modifier(Modifier::BOLD),
            PageItem::Previous { enabled: false } | PageItem::Next { enabled: false } => {
                Style::default()
                    .fg(theme.fg_muted())
                    .add_modifier(Modifier::DIM)
            }
            PageItem::Gap => Style::default().fg(theme.fg_muted()),
            _ => Style::default().fg(theme.fg()),
        };
        spans.push(Span::styled(item.label(), style));

        if let Some(target) = item.target()
            && x.saturating_add(width) <= right.right()
        {
            targets.push((Rect::new(x, right.y, width, 1), target));
        }
        x = x.saturating_add(width);
    }

    let links_area = Rect::new(right.right().saturating_sub(total), right.y, total, 1);
    f.render_widget(Paragraph::new(Line::from(spans)), links_area);

    targets
}
