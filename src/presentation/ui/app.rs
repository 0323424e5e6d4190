//! Main application orchestrator.

use std::sync::Arc;

use crossterm::event::EventStream;
use futures_util::StreamExt;
use futures_util::future::Either;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::{DefaultTerminal, Frame};
use tokio::sync::{mpsc, watch};
use tracing::{debug, info, warn};

use super::visibility::TerminalVisibility;
use crate::application::carousel::geometry::radius;
use crate::application::carousel::{
    Activation, CarouselDriver, CarouselEngine, CarouselSettings, EasedMotion,
};
use crate::application::services::{ImageIntent, ImageUrlTransformer};
use crate::application::use_cases::{FeaturedProducts, LoadFeaturedProductsUseCase, LoadSource};
use crate::domain::entities::{CatalogEntry, ViewportClass};
use crate::domain::errors::CatalogError;
use crate::domain::ports::{MotionCapability, NoopMotion, SelectionPort};
use crate::infrastructure::config::AppConfig;
use crate::presentation::events::{Command, columns_to_px, map_event};
use crate::presentation::widgets::{CarouselView, CarouselViewState, StatusBar};

const DEFAULT_VIEWPORT_PX: u32 = 1280;
const KEY_HINTS: &str = "←/→ browse  ⏎ open  r refresh  q quit";

#[derive(Debug)]
enum Action {
    Loaded(Result<FeaturedProducts, CatalogError>),
}

struct ReadyState {
    driver: CarouselDriver,
    index_rx: watch::Receiver<usize>,
    image_urls: Vec<Option<String>>,
    source: LoadSource,
}

enum Screen {
    Loading,
    Ready(Box<ReadyState>),
    Empty,
    Failed(&'static str),
}

/// Optimized image URL of every entry for the given viewport.
#[must_use]
pub fn image_urls(
    entries: &[CatalogEntry],
    transformer: &ImageUrlTransformer,
    viewport: ViewportClass,
) -> Vec<Option<String>> {
    let intent = ImageIntent::gallery(viewport);
    entries
        .iter()
        .map(|e| {
            e.product()
                .primary_image()
                .map(|url| transformer.optimize(url, intent))
        })
        .collect()
}

pub struct App {
    use_case: Arc<LoadFeaturedProductsUseCase>,
    selection: Arc<dyn SelectionPort>,
    settings: CarouselSettings,
    motion: Arc<dyn MotionCapability>,
    transformer: ImageUrlTransformer,
    visibility: Arc<TerminalVisibility>,
    viewport_override: Option<u32>,
    viewport_width: u32,
    mouse: bool,
    force_refresh: bool,
    screen: Screen,
    view_state: CarouselViewState,
    pointer_origin: Option<u16>,
    status: Option<StatusBar>,
    loading: bool,
    should_quit: bool,
    action_tx: mpsc::UnboundedSender<Action>,
    action_rx: mpsc::UnboundedReceiver<Action>,
}

impl App {
    #[must_use]
    pub fn new(
        use_case: LoadFeaturedProductsUseCase,
        selection: Arc<dyn SelectionPort>,
        config: &AppConfig,
    ) -> Self {
        let (action_tx, action_rx) = mpsc::unbounded_channel();
        let motion: Arc<dyn MotionCapability> = if config.carousel.animations {
            Arc::new(EasedMotion::new(config.carousel.transition_ms))
        } else {
            Arc::new(NoopMotion)
        };

        Self {
            use_case: Arc::new(use_case),
            selection,
            settings: config.carousel.settings(),
            motion,
            transformer: config.images.transformer(),
            visibility: Arc::new(TerminalVisibility::new()),
            viewport_override: config.viewport_width,
            viewport_width: config.viewport_width.unwrap_or(DEFAULT_VIEWPORT_PX),
            mouse: config.mouse,
            force_refresh: config.refresh,
            screen: Screen::Loading,
            view_state: CarouselViewState::default(),
            pointer_origin: None,
            status: None,
            loading: false,
            should_quit: false,
            action_tx,
            action_rx,
        }
    }

    /// # Errors
    /// Returns error if drawing to the terminal fails.
    pub async fn run(mut self, terminal: &mut DefaultTerminal) -> color_eyre::Result<()> {
        let size = terminal.size()?;
        self.apply_resize(size.width);

        self.start_load(self.force_refresh);
        self.run_event_loop(terminal).await?;

        if let Screen::Ready(state) = std::mem::replace(&mut self.screen, Screen::Loading) {
            state.driver.unmount();
        }
        info!("Application exiting normally");
        Ok(())
    }

    async fn run_event_loop(&mut self, terminal: &mut DefaultTerminal) -> color_eyre::Result<()> {
        let mut terminal_events = EventStream::new();

        terminal.draw(|frame| self.render(frame))?;

        while !self.should_quit {
            let index_future = match &mut self.screen {
                Screen::Ready(state) => Either::Left(state.index_rx.changed()),
                _ => Either::Right(std::future::pending()),
            };
            let terminal_event = terminal_events.next();

            tokio::select! {
                biased;

                Some(action) = self.action_rx.recv() => {
                    self.handle_action(action);
                }

                Ok(()) = index_future => {}

                Some(Ok(event)) = terminal_event => {
                    if let Some(command) = map_event(&event, self.mouse) {
                        self.handle_command(command);
                    }
                }
            }

            terminal.draw(|frame| self.render(frame))?;
        }

        Ok(())
    }

    fn start_load(&mut self, force: bool) {
        if self.loading {
            return;
        }
        self.loading = true;

        let use_case = Arc::clone(&self.use_case);
        let tx = self.action_tx.clone();
        tokio::spawn(async move {
            let result = if force {
                use_case.refresh().await
            } else {
                use_case.execute().await
            };
            if tx.send(Action::Loaded(result)).is_err() {
                debug!("Load finished after shutdown");
            }
        });
    }

    fn handle_action(&mut self, action: Action) {
        match action {
            Action::Loaded(result) => {
                self.loading = false;
                self.handle_loaded(result);
            }
        }
    }

    fn handle_loaded(&mut self, result: Result<FeaturedProducts, CatalogError>) {
        match result {
            Ok(featured) => self.show_carousel(featured),
            Err(e) if matches!(self.screen, Screen::Ready(_)) => {
                warn!(error = %e, "Refresh failed, keeping current products");
                self.status = Some(StatusBar::error(e.user_message()));
            }
            Err(CatalogError::EmptyCatalog) => self.replace_screen(Screen::Empty),
            Err(e) => {
                warn!(error = %e, "Failed to load featured products");
                self.replace_screen(Screen::Failed(e.user_message()));
            }
        }
    }

    fn show_carousel(&mut self, featured: FeaturedProducts) {
        let FeaturedProducts { entries, source } = featured;
        let count = entries.len();

        let engine = match CarouselEngine::new(
            entries,
            self.viewport_width,
            self.settings,
            Arc::clone(&self.selection),
        ) {
            Ok(engine) => engine
                .with_visibility_probe(self.visibility.clone())
                .with_motion(Arc::clone(&self.motion)),
            Err(e) => {
                self.replace_screen(Screen::Failed(e.user_message()));
                return;
            }
        };

        let urls = image_urls(engine.items(), &self.transformer, engine.viewport());
        let driver = CarouselDriver::mount(engine);
        let index_rx = driver.subscribe();

        info!(count, source = %source, "Showing featured products");
        self.status = Some(StatusBar::info(format!("Loaded {count} products from {source}")));
        self.replace_screen(Screen::Ready(Box::new(ReadyState {
            driver,
            index_rx,
            image_urls: urls,
            source,
        })));
    }

    fn replace_screen(&mut self, screen: Screen) {
        if let Screen::Ready(old) = std::mem::replace(&mut self.screen, screen) {
            old.driver.unmount();
        }
        if !matches!(self.screen, Screen::Ready(_)) {
            self.visibility.clear();
            self.view_state = CarouselViewState::default();
        }
    }

    fn apply_resize(&mut self, columns: u16) {
        self.viewport_width = self
            .viewport_override
            .unwrap_or_else(|| columns_to_px(columns));

        if let Screen::Ready(state) = &mut self.screen {
            let outcome = state.driver.resize(self.viewport_width);
            if outcome.viewport_changed {
                let viewport = state.driver.with_engine(CarouselEngine::viewport);
                state.image_urls = state
                    .driver
                    .with_engine(|e| image_urls(e.items(), &self.transformer, viewport));
            }
        }
    }

    fn handle_command(&mut self, command: Command) {
        match command {
            Command::Quit => self.should_quit = true,
            Command::Refresh => {
                self.status = Some(StatusBar::info("Refreshing…"));
                self.start_load(true);
            }
            Command::Resize { width, .. } => self.apply_resize(width),
            other => self.handle_carousel_command(other),
        }
    }

    fn handle_carousel_command(&mut self, command: Command) {
        let Screen::Ready(state) = &self.screen else {
            return;
        };
        let driver = &state.driver;
        let mobile = driver.with_engine(|e| e.viewport().is_mobile());

        let activation = match command {
            Command::Previous => {
                driver.previous();
                None
            }
            Command::Next => {
                driver.next();
                None
            }
            Command::Wheel(delta) => {
                driver.wheel(delta);
                None
            }
            Command::ActivateFocal => Some(driver.activate(driver.focal_index())),
            Command::PointerDown { column, .. } => {
                self.pointer_origin = Some(column);
                if mobile {
                    driver.touch_start(f64::from(columns_to_px(column)));
                }
                None
            }
            Command::PointerUp { column, row } => {
                let origin = self.pointer_origin.take();
                let swiped = mobile
                    && driver
                        .touch_end(f64::from(columns_to_px(column)))
                        .is_some();
                let clicked = origin.is_some_and(|o| o.abs_diff(column) <= 1);
                if swiped || !clicked {
                    None
                } else {
                    self.view_state
                        .hit_test(column, row)
                        .map(|index| driver.activate(index))
                }
            }
            Command::PointerMove { column, row } => {
                driver.set_hovered(self.view_state.hit_test(column, row));
                None
            }
            Command::Quit | Command::Refresh | Command::Resize { .. } => None,
        };

        if let Some(Activation::Selected(index)) = activation {
            let name = driver.with_engine(|e| e.items()[index].product().name().to_string());
            self.status = Some(StatusBar::info(format!("Opening {name}…")));
        }
    }

    fn render(&mut self, frame: &mut Frame) {
        let [header, body, footer] = Layout::vertical([
            Constraint::Length(1),
            Constraint::Min(3),
            Constraint::Length(1),
        ])
        .areas(frame.area());

        frame.render_widget(
            Paragraph::new(Line::from(vec![
                Span::styled(
                    crate::NAME,
                    Style::default()
                        .fg(Color::Yellow)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::styled(" · Featured products", Style::default().fg(Color::DarkGray)),
            ])),
            header,
        );

        let details = match &self.screen {
            Screen::Loading => {
                render_message(frame, body, "Loading featured products…", Color::Cyan);
                String::new()
            }
            Screen::Empty => {
                render_message(frame, body, CatalogError::EmptyCatalog.user_message(), Color::DarkGray);
                String::new()
            }
            Screen::Failed(message) => {
                render_message(frame, body, message, Color::Red);
                "r to retry".to_string()
            }
            Screen::Ready(state) => {
                let view_state = &mut self.view_state;
                let details = state.driver.with_engine(|engine| {
                    let styles = engine.styles();
                    let view = CarouselView::new(engine.items(), &styles, radius(engine.viewport()))
                        .image_urls(&state.image_urls)
                        .focal_index(engine.focal_index())
                        .hovered(engine.hovered());
                    frame.render_stateful_widget(view, body, view_state);
                    format!(
                        "{}/{} · {} · {}",
                        engine.focal_index() + 1,
                        engine.len(),
                        engine.viewport(),
                        state.source
                    )
                });
                self.visibility.update(body, frame.area().height);
                details
            }
        };

        let status = self
            .status
            .clone()
            .unwrap_or_else(|| StatusBar::info(KEY_HINTS))
            .details(details);
        frame.render_widget(&status, footer);
    }
}

fn render_message(frame: &mut Frame, area: Rect, message: &str, color: Color) {
    let [_, center, _] = Layout::vertical([
        Constraint::Fill(1),
        Constraint::Length(1),
        Constraint::Fill(1),
    ])
    .areas(area);

    frame.render_widget(
        Paragraph::new(message)
            .style(Style::default().fg(color))
            .alignment(Alignment::Center),
        center,
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    use crate::application::services::{CatalogAggregator, ResultCache};
    use crate::domain::entities::{Category, Product, Subcategory};
    use crate::domain::ports::mocks::{ManualClock, MockCatalog, MockKeyValueStore, RecordingSelection};

    const CDN_IMAGE: &str = "https://res.cloudinary.com/demo/image/upload/v1700000000/shop/tee.jpg";

    fn catalog() -> MockCatalog {
        MockCatalog::new()
            .with_category(Category::new("c1", "Shirts"))
            .with_subcategory(Subcategory::new("s1", "Linen", "c1"))
            .with_subcategory(Subcategory::new("s2", "Polo", "c1"))
            .with_subcategory_product(
                "s1",
                Product::new("p1", "Linen Shirt", 40.0).with_images(vec![CDN_IMAGE.to_string()]),
            )
            .with_subcategory_product("s2", Product::new("p2", "Polo Shirt", 30.0))
    }

    fn app_with(catalog: MockCatalog, config: &AppConfig) -> (App, Arc<RecordingSelection>) {
        let use_case = LoadFeaturedProductsUseCase::new(
            CatalogAggregator::new(Arc::new(catalog)),
            ResultCache::new(Arc::new(MockKeyValueStore::new()), Arc::new(ManualClock::at(0))),
        );
        let selection = Arc::new(RecordingSelection::new());
        (App::new(use_case, selection.clone(), config), selection)
    }

    fn desktop_config() -> AppConfig {
        AppConfig {
            viewport_width: Some(1440),
            ..AppConfig::default()
        }
    }

    fn focal(app: &App) -> Option<usize> {
        match &app.screen {
            Screen::Ready(state) => Some(state.driver.focal_index()),
            _ => None,
        }
    }

    async fn load(app: &mut App) {
        let featured = app.use_case.execute().await;
        app.handle_action(Action::Loaded(featured));
    }

    #[test]
    fn test_image_urls_are_optimized() {
        let entries = vec![
            CatalogEntry::in_category(
                Product::new("p1", "Tee", 1.0).with_images(vec![CDN_IMAGE.to_string()]),
                "All",
            ),
            CatalogEntry::in_category(Product::new("p2", "Cap", 1.0), "All"),
        ];

        let urls = image_urls(&entries, &ImageUrlTransformer::default(), ViewportClass::Desktop);

        assert!(urls[0].as_deref().is_some_and(|u| u.contains("w_600")));
        assert_eq!(urls[1], None);
    }

    #[tokio::test]
    async fn test_loaded_products_show_carousel_and_navigate() {
        let (mut app, _) = app_with(catalog(), &desktop_config());

        load(&mut app).await;
        assert_eq!(focal(&app), Some(0));

        app.handle_command(Command::Next);
        assert_eq!(focal(&app), Some(1));

        // Desktop clamps at the last item.
        app.handle_command(Command::Next);
        assert_eq!(focal(&app), Some(1));
    }

    #[tokio::test]
    async fn test_activate_focal_selects_product() {
        let (mut app, selection) = app_with(catalog(), &desktop_config());
        load(&mut app).await;

        app.handle_command(Command::ActivateFocal);

        assert_eq!(selection.selected().len(), 1);
        assert_eq!(selection.selected()[0].as_str(), "p1");
    }

    #[tokio::test]
    async fn test_empty_catalog_shows_empty_state() {
        let (mut app, _) = app_with(MockCatalog::new(), &desktop_config());

        load(&mut app).await;

        assert!(matches!(app.screen, Screen::Empty));
    }

    #[tokio::test]
    async fn test_network_failure_shows_error_state() {
        let (mut app, _) = app_with(catalog(), &desktop_config());

        app.handle_action(Action::Loaded(Err(CatalogError::network("down"))));

        assert!(matches!(
            app.screen,
            Screen::Failed("Failed to load products. Please try again later.")
        ));
    }

    #[tokio::test]
    async fn test_failed_refresh_keeps_products() {
        let (mut app, _) = app_with(catalog(), &desktop_config());
        load(&mut app).await;
        app.handle_command(Command::Next);

        app.handle_action(Action::Loaded(Err(CatalogError::network("down"))));

        assert_eq!(focal(&app), Some(1));
        assert!(app.status.is_some());
    }

    #[tokio::test]
    async fn test_quit_command() {
        let (mut app, _) = app_with(catalog(), &desktop_config());

        app.handle_command(Command::Quit);

        assert!(app.should_quit);
    }

    #[tokio::test]
    async fn test_render_ready_screen() {
        let (mut app, _) = app_with(catalog(), &desktop_config());
        load(&mut app).await;
        let mut terminal = Terminal::new(TestBackend::new(100, 20)).unwrap();

        terminal.draw(|frame| app.render(frame)).unwrap();

        let buffer = terminal.backend().buffer();
        let content: String = buffer.content().iter().map(|c| c.symbol()).collect();
        assert!(content.contains("Linen Shirt"));
        assert!(content.contains("1/2"));
        assert_eq!(app.view_state.area(), Rect::new(0, 1, 100, 18));
    }

    #[tokio::test]
    async fn test_render_loading_screen() {
        let (mut app, _) = app_with(catalog(), &desktop_config());
        let mut terminal = Terminal::new(TestBackend::new(60, 10)).unwrap();

        terminal.draw(|frame| app.render(frame)).unwrap();

        let content: String = terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect();
        assert!(content.contains("Loading featured products"));
    }
}
