//! Projects the ring onto the terminal grid.

use ratatui::{
    buffer::Buffer,
    layout::{Position, Rect},
    widgets::{StatefulWidget, Widget},
};

use super::product_card::ProductCard;
use crate::application::carousel::ItemStyle;
use crate::domain::entities::CatalogEntry;

const CARD_WIDTH_RATIO: f64 = 0.4;
const CARD_HEIGHT_RATIO: f64 = 0.8;
const MIN_CARD_SIZE: u16 = 3;

/// Card rectangles from the last render, back to front.
#[derive(Debug, Default, Clone)]
pub struct CarouselViewState {
    hit_areas: Vec<(usize, Rect)>,
    area: Rect,
}

impl CarouselViewState {
    /// Returns the front-most item under the given cell.
    #[must_use]
    pub fn hit_test(&self, column: u16, row: u16) -> Option<usize> {
        let position = Position::new(column, row);
        self.hit_areas
            .iter()
            .rev()
            .find(|(_, rect)| rect.contains(position))
            .map(|(index, _)| *index)
    }

    /// Area the carousel occupied in the last render.
    #[must_use]
    pub const fn area(&self) -> Rect {
        self.area
    }
}

/// Maps an item style to its card rectangle inside `area`.
#[must_use]
#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_precision_loss
)]
pub fn card_rect(area: Rect, style: &ItemStyle, radius: f64) -> Rect {
    if area.width < MIN_CARD_SIZE || area.height < MIN_CARD_SIZE {
        return Rect::new(area.x, area.y, 0, 0);
    }

    let scale = style.scale.max(0.0);
    let width = ((f64::from(area.width) * CARD_WIDTH_RATIO * scale).round() as u16)
        .clamp(MIN_CARD_SIZE, area.width);
    let height = ((f64::from(area.height) * CARD_HEIGHT_RATIO * scale).round() as u16)
        .clamp(MIN_CARD_SIZE, area.height);

    let travel = f64::from(area.width - width) / 2.0;
    let offset = if radius > 0.0 {
        (style.translate_x / radius).clamp(-1.0, 1.0) * travel
    } else {
        0.0
    };
    let left = (f64::from(area.x) + travel + offset).round() as u16;
    let x = left.clamp(area.x, area.right() - width);

    let lift = u16::from(style.translate_y < 0.0);
    let y = (area.y + (area.height - height) / 2)
        .saturating_sub(lift)
        .max(area.y);

    Rect::new(x, y, width, height)
}

/// Renders every item as a card, back to front.
pub struct CarouselView<'a> {
    items: &'a [CatalogEntry],
    styles: &'a [ItemStyle],
    image_urls: &'a [Option<String>],
    focal_index: usize,
    hovered: Option<usize>,
    radius: f64,
}

impl<'a> CarouselView<'a> {
    #[must_use]
    pub const fn new(items: &'a [CatalogEntry], styles: &'a [ItemStyle], radius: f64) -> Self {
        Self {
            items,
            styles,
            image_urls: &[],
            focal_index: 0,
            hovered: None,
            radius,
        }
    }

    #[must_use]
    pub const fn image_urls(mut self, urls: &'a [Option<String>]) -> Self {
        self.image_urls = urls;
        self
    }

    #[must_use]
    pub const fn focal_index(mut self, index: usize) -> Self {
        self.focal_index = index;
        self
    }

    #[must_use]
    pub const fn hovered(mut self, index: Option<usize>) -> Self {
        self.hovered = index;
        self
    }
}

impl StatefulWidget for CarouselView<'_> {
    type State = CarouselViewState;

    fn render(self, area: Rect, buf: &mut Buffer, state: &mut Self::State) {
        state.area = area;
        state.hit_areas.clear();

        let mut order: Vec<usize> = (0..self.items.len().min(self.styles.len())).collect();
        order.sort_by_key(|&i| self.styles[i].z_index);

        for index in order {
            let style = &self.styles[index];
            let rect = card_rect(area, style, self.radius);
            if rect.is_empty() {
                continue;
            }

            let url = self.image_urls.get(index).and_then(Option::as_deref);
            ProductCard::new(&self.items[index], *style)
                .image_url(url)
                .focal(index == self.focal_index)
                .hovered(self.hovered == Some(index))
                .render(rect, buf);

            state.hit_areas.push((index, rect));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::carousel::geometry::{layout, radius};
    use crate::domain::entities::{Product, ViewportClass};
    use crate::domain::ports::NoopMotion;

    fn styles(focal: usize, n: usize) -> Vec<ItemStyle> {
        layout(focal, n, ViewportClass::Desktop)
            .iter()
            .map(|p| ItemStyle::compute(p, false, &NoopMotion))
            .collect()
    }

    fn items(n: usize) -> Vec<CatalogEntry> {
        (0..n)
            .map(|i| CatalogEntry::in_category(Product::new(format!("p{i}"), format!("Item {i}"), 10.0), "All"))
            .collect()
    }

    #[test]
    fn test_focal_card_is_centered_and_largest() {
        let area = Rect::new(0, 0, 100, 20);
        let styles = styles(0, 4);
        let r = radius(ViewportClass::Desktop);

        let focal = card_rect(area, &styles[0], r);
        let side = card_rect(area, &styles[1], r);

        assert_eq!(focal.x + focal.width / 2, 50);
        assert!(focal.width >= side.width);
        assert!(side.x > focal.x);
    }

    #[test]
    fn test_cards_stay_inside_area() {
        let area = Rect::new(5, 2, 60, 12);
        let r = radius(ViewportClass::Desktop);

        for style in styles(2, 7) {
            let rect = card_rect(area, &style, r);
            assert!(rect.x >= area.x && rect.right() <= area.right());
            assert!(rect.y >= area.y && rect.bottom() <= area.bottom());
        }
    }

    #[test]
    fn test_hit_test_prefers_front_card() {
        let area = Rect::new(0, 0, 100, 20);
        let items = items(4);
        let styles = styles(0, 4);
        let mut buf = Buffer::empty(area);
        let mut state = CarouselViewState::default();

        CarouselView::new(&items, &styles, radius(ViewportClass::Desktop))
            .render(area, &mut buf, &mut state);

        assert_eq!(state.hit_test(50, 10), Some(0));
        assert_eq!(state.hit_test(0, 0), None);
        assert_eq!(state.area(), area);
    }
}
