use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph, Widget},
};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::application::carousel::ItemStyle;
use crate::domain::entities::CatalogEntry;

const ELLIPSIS: char = '…';

/// Truncates `text` to at most `max_width` terminal cells, ending with an ellipsis
/// when shortened.
#[must_use]
pub fn truncate_to_width(text: &str, max_width: usize) -> String {
    if text.width() <= max_width {
        return text.to_string();
    }
    if max_width == 0 {
        return String::new();
    }

    let budget = max_width - 1;
    let mut used = 0;
    let mut out = String::new();
    for ch in text.chars() {
        let w = ch.width().unwrap_or(0);
        if used + w > budget {
            break;
        }
        used += w;
        out.push(ch);
    }
    out.push(ELLIPSIS);
    out
}

fn format_price(price: f64) -> String {
    format!("${price:.2}")
}

/// One carousel item drawn as a bordered card.
pub struct ProductCard<'a> {
    entry: &'a CatalogEntry,
    style: ItemStyle,
    image_url: Option<&'a str>,
    focal: bool,
    hovered: bool,
}

impl<'a> ProductCard<'a> {
    #[must_use]
    pub const fn new(entry: &'a CatalogEntry, style: ItemStyle) -> Self {
        Self {
            entry,
            style,
            image_url: None,
            focal: false,
            hovered: false,
        }
    }

    #[must_use]
    pub const fn image_url(mut self, url: Option<&'a str>) -> Self {
        self.image_url = url;
        self
    }

    #[must_use]
    pub const fn focal(mut self, focal: bool) -> Self {
        self.focal = focal;
        self
    }

    #[must_use]
    pub const fn hovered(mut self, hovered: bool) -> Self {
        self.hovered = hovered;
        self
    }

    fn base_style(&self) -> Style {
        if self.style.opacity < 1.0 {
            Style::default().fg(Color::DarkGray)
        } else {
            Style::default().fg(Color::White)
        }
    }

    fn border_style(&self) -> Style {
        if self.focal {
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD)
        } else if self.hovered {
            Style::default().fg(Color::Cyan)
        } else {
            self.base_style()
        }
    }

    fn lines(&self, width: usize) -> Vec<Line<'static>> {
        let product = self.entry.product();
        let base = self.base_style();
        let dim = Style::default().fg(Color::DarkGray);

        let name_style = if self.focal {
            base.add_modifier(Modifier::BOLD)
        } else {
            base
        };

        let mut price = vec![Span::styled(format_price(product.price()), base)];
        if let (Some(original), Some(percent)) =
            (product.original_price(), product.discount_percent())
        {
            price.push(Span::raw(" "));
            price.push(Span::styled(
                format_price(original),
                dim.add_modifier(Modifier::CROSSED_OUT),
            ));
            price.push(Span::styled(
                format!(" -{percent}%"),
                Style::default().fg(Color::Green),
            ));
        }

        let mut lines = vec![
            Line::styled(truncate_to_width(product.name(), width), name_style),
            Line::styled(truncate_to_width(&self.entry.breadcrumb(), width), dim),
            Line::from(price),
        ];
        if let Some(url) = self.image_url {
            lines.push(Line::styled(truncate_to_width(url, width), dim));
        }
        lines
    }
}

impl Widget for ProductCard<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.width < 3 || area.height < 3 {
            return;
        }

        Clear.render(area, buf);

        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(if self.focal {
                BorderType::Thick
            } else {
                BorderType::Rounded
            })
            .border_style(self.border_style());
        let inner = block.inner(area);
        block.render(area, buf);

        let lines = self.lines(usize::from(inner.width));
        Paragraph::new(lines).render(inner, buf);
    }
}
