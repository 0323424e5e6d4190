mod carousel_view;
mod product_card;
mod status_bar;

pub use carousel_view::{CarouselView, CarouselViewState, card_rect};
pub use product_card::{ProductCard, truncate_to_width};
pub use status_bar::{StatusBar, StatusLevel};
