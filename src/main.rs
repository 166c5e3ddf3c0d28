//! Neon Folio entry point
//!
//! Mounts the page engine in the browser. The native build runs a headless
//! pass over the engine instead.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_app {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::JsCast;
    use web_sys::{Document, Element, Event, HtmlCanvasElement, KeyboardEvent, MouseEvent};

    use neon_folio::content::Project;
    use neon_folio::engine::{
        FieldPhase, MediaCarousel, MediaView, NavigationController, ParticleField, RevealConfig,
        Section,
    };
    use neon_folio::platform::{CancelToken, Scope, dom, events, frame_loop, reveal};
    use neon_folio::renderer::Canvas2dPainter;
    use neon_folio::{Catalogue, Settings};

    /// State touched by event handlers
    struct Page {
        nav: NavigationController,
        carousel: MediaCarousel,
        catalogue: Catalogue,
    }

    /// A mounted page. Dropping it releases every subscription.
    pub struct App {
        scope: Scope,
        _page: Rc<RefCell<Page>>,
    }

    thread_local! {
        static APP: RefCell<Option<App>> = const { RefCell::new(None) };
    }

    pub fn mount() {
        console_error_panic_hook::set_once();
        let _ = console_log::init_with_level(log::Level::Info);

        log::info!("Neon Folio starting...");

        let Some(document) = dom::document() else {
            log::error!("No document, nothing to mount");
            return;
        };

        let mut settings = Settings::load();
        if settings.sync_reduced_motion(dom::prefers_reduced_motion()) {
            settings.save();
        }
        let catalogue = Catalogue::embedded().unwrap_or_else(|e| {
            log::error!("{}", e);
            Catalogue::default()
        });

        let page = Rc::new(RefCell::new(Page {
            nav: NavigationController::new(settings.scroll_offset),
            carousel: MediaCarousel::new(),
            catalogue,
        }));
        let mut scope = Scope::new("page");

        {
            let p = page.borrow();
            render_nav(&document, &p.nav);
            render_tech_stack(&document, &p.catalogue);
            render_achievements(&document, &p.catalogue);
            render_projects(&document, &p.catalogue.projects);
        }

        setup_scroll_spy(&mut scope, page.clone());
        setup_clicks(&mut scope, &document, page.clone());
        setup_keys(&mut scope, &document, page.clone());
        setup_media_errors(&mut scope, page.clone());

        // Reveal targets include the cards rendered above
        let _ = reveal::watch(&mut scope, RevealConfig::default());

        setup_particles(&mut scope, &settings);

        APP.with(|app| {
            if let Some(old) = app.borrow_mut().replace(App { scope, _page: page }) {
                log::warn!("Replacing an already mounted page");
                drop(old);
            }
        });

        log::info!("Neon Folio running!");
    }

    pub fn unmount() {
        let app = APP.with(|app| app.borrow_mut().take());
        match app {
            Some(mut app) => {
                app.scope.close();
                log::info!("Page unmounted");
            }
            None => log::debug!("unmount: nothing mounted"),
        }
    }

    fn setup_scroll_spy(scope: &mut Scope, page: Rc<RefCell<Page>>) {
        let Some(window) = dom::window() else {
            return;
        };
        let update = move || {
            let mut p = page.borrow_mut();
            if p.nav.on_scroll(dom::scroll_y(), &dom::section_bounds) {
                if let Some(document) = dom::document() {
                    sync_nav(&document, &p.nav);
                }
            }
        };

        // Once at mount, then on every scroll
        update();
        events::listen(scope, &window, "scroll", move |_: Event| update());
    }

    fn setup_particles(scope: &mut Scope, settings: &Settings) {
        let seed = js_sys::Date::now() as u64;
        let config = settings.field_config(seed);
        if config.count == 0 {
            log::info!("Particle background disabled by settings");
            return;
        }

        let canvas = dom::by_id("particle-canvas")
            .and_then(|el| el.dyn_into::<HtmlCanvasElement>().ok());
        let painter = canvas.as_ref().and_then(Canvas2dPainter::new);
        let surface = match (&canvas, &painter, dom::viewport_size()) {
            (Some(canvas), Some(_), Some((w, h))) => {
                canvas.set_width(w as u32);
                canvas.set_height(h as u32);
                Some((w as f32, h as f32))
            }
            _ => None,
        };

        let field = Rc::new(RefCell::new(ParticleField::new(config)));
        if !field.borrow_mut().start(surface) {
            return;
        }
        let (Some(canvas), Some(mut painter)) = (canvas, painter) else {
            return;
        };

        {
            let field = field.clone();
            scope.defer(move || field.borrow_mut().stop());
        }

        if let Some(window) = dom::window() {
            let field = field.clone();
            events::listen(scope, &window, "resize", move |_: Event| {
                if let Some((w, h)) = dom::viewport_size() {
                    canvas.set_width(w as u32);
                    canvas.set_height(h as u32);
                    field.borrow_mut().resize(w as f32, h as f32);
                }
            });
        }

        let token = CancelToken::new();
        frame_loop::run(scope, token, move |_time| {
            let mut f = field.borrow_mut();
            if f.phase() == FieldPhase::Running {
                f.frame(&mut painter);
            }
        });
    }

    /// One delegated click handler for nav, hero buttons, cards and the lightbox
    fn setup_clicks(scope: &mut Scope, document: &Document, page: Rc<RefCell<Page>>) {
        let doc = document.clone();
        events::listen(scope, document, "click", move |event: MouseEvent| {
            let Some(target) = event.target().and_then(|t| t.dyn_into::<Element>().ok()) else {
                return;
            };
            let mut p = page.borrow_mut();

            if let Ok(Some(el)) = target.closest("[data-section]") {
                if let Some(id) = el.get_attribute("data-section") {
                    event.prevent_default();
                    p.nav.activate(&id, &dom::scroll_to_section);
                    sync_nav(&doc, &p.nav);
                }
                return;
            }

            if let Ok(Some(_)) = target.closest("#nav-toggle") {
                p.nav.toggle_menu();
                sync_nav(&doc, &p.nav);
                return;
            }

            if let Ok(Some(el)) = target.closest("[data-gallery]") {
                let index = el.get_attribute("data-gallery").and_then(|v| v.parse::<usize>().ok());
                if let Some(project) = index.and_then(|i| p.catalogue.projects.get(i)).cloned() {
                    event.prevent_default();
                    if let Err(e) = p.carousel.open_gallery(project.media, project.title) {
                        log::warn!("{}", e);
                    }
                    render_modal(&doc, &p.carousel);
                }
                return;
            }

            if let Ok(Some(el)) = target.closest("[data-action]") {
                match el.get_attribute("data-action").as_deref() {
                    Some("close") => p.carousel.close(),
                    Some("next") => {
                        p.carousel.next();
                    }
                    Some("prev") => {
                        p.carousel.previous();
                    }
                    Some("goto") => {
                        let index = el.get_attribute("data-index").and_then(|v| v.parse().ok());
                        if let Some(index) = index {
                            if let Err(e) = p.carousel.go_to(index) {
                                log::error!("{}", e);
                            }
                        }
                    }
                    _ => return,
                }
                render_modal(&doc, &p.carousel);
            }
        });
    }

    fn setup_keys(scope: &mut Scope, document: &Document, page: Rc<RefCell<Page>>) {
        let doc = document.clone();
        events::listen(scope, document, "keydown", move |event: KeyboardEvent| {
            let mut p = page.borrow_mut();
            if !p.carousel.is_open() {
                return;
            }
            match event.key().as_str() {
                "Escape" => p.carousel.close(),
                "ArrowRight" => {
                    p.carousel.next();
                }
                "ArrowLeft" => {
                    p.carousel.previous();
                }
                _ => return,
            }
            render_modal(&doc, &p.carousel);
        });
    }

    fn setup_media_errors(scope: &mut Scope, page: Rc<RefCell<Page>>) {
        let Some(modal) = dom::by_id("media-modal") else {
            return;
        };
        events::listen_capture(scope, &modal, "error", move |event: Event| {
            let index = event
                .target()
                .and_then(|t| t.dyn_into::<Element>().ok())
                .and_then(|el| el.get_attribute("data-index"))
                .and_then(|v| v.parse().ok());
            if let Some(index) = index {
                page.borrow().carousel.report_load_failure(index, &event.type_());
            }
        });
    }

    fn render_nav(document: &Document, nav: &NavigationController) {
        let Some(menu) = document.get_element_by_id("nav-menu") else {
            return;
        };
        menu.set_inner_html("");
        for section in Section::ALL {
            let class = nav.item_class(section);
            if let Some(btn) = dom::text_element(document, "button", class, &section.label()) {
                btn.set_id(&format!("nav-{}", section.id()));
                let _ = btn.set_attribute("data-section", section.id());
                let _ = menu.append_child(&btn);
            }
        }
        sync_nav(document, nav);
    }

    fn sync_nav(document: &Document, nav: &NavigationController) {
        for section in Section::ALL {
            if let Some(btn) = document.get_element_by_id(&format!("nav-{}", section.id())) {
                btn.set_class_name(nav.item_class(section));
            }
        }
        if let Some(menu) = document.get_element_by_id("nav-menu") {
            menu.set_class_name(nav.menu_class());
        }
        if let Some(toggle) = document.get_element_by_id("nav-toggle") {
            toggle.set_class_name(nav.toggle_class());
        }
    }

    fn render_tech_stack(document: &Document, catalogue: &Catalogue) {
        let Some(grid) = document.get_element_by_id("tech-grid") else {
            return;
        };
        for skill in &catalogue.tech_stack {
            let Some(card) = dom::element(document, "div", "tech-card") else {
                continue;
            };
            if let Some(icon) = dom::element(document, "img", "tech-icon") {
                let _ = icon.set_attribute("src", &skill.icon);
                let _ = icon.set_attribute("alt", &skill.name);
                let _ = card.append_child(&icon);
            }
            if let Some(name) = dom::text_element(document, "div", "tech-name", &skill.name) {
                let _ = card.append_child(&name);
            }
            let _ = grid.append_child(&card);
        }
    }

    fn render_achievements(document: &Document, catalogue: &Catalogue) {
        let Some(grid) = document.get_element_by_id("awards-grid") else {
            return;
        };
        for award in &catalogue.achievements {
            let Some(card) = dom::element(document, "div", "award-card") else {
                continue;
            };
            for (class, text) in [
                ("award-title", award.achievement.as_str()),
                ("award-recognition", award.recognition.as_str()),
                ("award-year", award.year.as_str()),
            ] {
                if let Some(el) = dom::text_element(document, "div", class, text) {
                    let _ = card.append_child(&el);
                }
            }
            if let Some(desc) = &award.description {
                if let Some(el) = dom::text_element(document, "p", "award-description", desc) {
                    let _ = card.append_child(&el);
                }
            }
            let href = award.external_link.as_ref().or(award.image_url.as_ref());
            if let Some(href) = href {
                let label = award.link_label();
                if let Some(link) = dom::text_element(document, "a", "award-link", label) {
                    let _ = link.set_attribute("href", href);
                    let _ = link.set_attribute("target", "_blank");
                    let _ = link.set_attribute("rel", "noopener noreferrer");
                    let _ = card.append_child(&link);
                }
            }
            let _ = grid.append_child(&card);
        }
    }

    fn render_projects(document: &Document, projects: &[Project]) {
        let Some(grid) = document.get_element_by_id("project-grid") else {
            return;
        };
        for (index, project) in projects.iter().enumerate() {
            if let Some(card) = project_card(document, index, project) {
                let _ = grid.append_child(&card);
            }
        }
    }

    fn project_card(document: &Document, index: usize, project: &Project) -> Option<Element> {
        let card = dom::element(document, "div", "project-card")?;
        let delay = format!("animation-delay: {:.1}s", index as f32 * 0.2);
        let _ = card.set_attribute("style", &delay);

        let header = dom::element(document, "div", "project-header")?;
        append_text(document, &header, "h3", "project-title", &project.title)?;
        let status_class = format!("project-status {}", project.status.slug());
        append_text(document, &header, "span", &status_class, project.status.as_str())?;
        if let Some(duration) = &project.duration {
            append_text(document, &header, "span", "project-duration", duration)?;
        }
        if let Some(team) = project.team_label() {
            append_text(document, &header, "span", "project-team", &team)?;
        }
        card.append_child(&header).ok()?;

        append_text(document, &card, "p", "project-description", &project.description)?;

        let tech = dom::element(document, "div", "project-tech")?;
        for name in &project.tech {
            append_text(document, &tech, "span", "tech-badge", name)?;
        }
        card.append_child(&tech).ok()?;

        let links = dom::element(document, "div", "project-links")?;
        for repo in &project.github {
            let text = format!("🔗 {}", repo.label);
            let a = dom::text_element(document, "a", "project-link", &text)?;
            let _ = a.set_attribute("href", &repo.url);
            let _ = a.set_attribute("target", "_blank");
            let _ = a.set_attribute("rel", "noopener noreferrer");
            links.append_child(&a).ok()?;
        }
        if let Some(label) = project.gallery_label() {
            let text = format!("🎬 {label}");
            let btn = dom::text_element(document, "button", "project-link", &text)?;
            let _ = btn.set_attribute("data-gallery", &index.to_string());
            links.append_child(&btn).ok()?;
        }
        card.append_child(&links).ok()?;

        Some(card)
    }

    /// Append a text element to `parent`
    fn append_text(
        document: &Document,
        parent: &Element,
        tag: &str,
        class: &str,
        text: &str,
    ) -> Option<Element> {
        let el = dom::text_element(document, tag, class, text)?;
        parent.append_child(&el).ok()?;
        Some(el)
    }

    fn render_modal(document: &Document, carousel: &MediaCarousel) {
        let Some(modal) = document.get_element_by_id("media-modal") else {
            return;
        };
        modal.set_inner_html("");
        let Some(state) = carousel.state() else {
            modal.set_class_name("media-modal hidden");
            return;
        };
        modal.set_class_name("media-modal");
        let _ = modal.set_attribute("data-action", "close");
        let _ = build_modal(document, &modal, state);
    }

    fn build_modal(
        document: &Document,
        modal: &Element,
        state: &neon_folio::engine::CarouselState,
    ) -> Option<()> {
        let content = dom::element(document, "div", "media-content")?;
        // Clicks inside the content must not reach the backdrop's close action
        let _ = content.set_attribute("data-action", "none");

        let header = dom::element(document, "div", "media-header")?;
        append_text(document, &header, "h3", "media-subject", state.subject())?;
        append_text(document, &header, "span", "media-counter", &state.counter())?;
        let close = dom::text_element(document, "button", "media-close", "✕")?;
        let _ = close.set_attribute("data-action", "close");
        header.append_child(&close).ok()?;
        content.append_child(&header).ok()?;

        let view = state.view();
        let media = match &view {
            MediaView::Embed { src, .. } => {
                let el = dom::element(document, "iframe", "media-frame")?;
                let _ = el.set_attribute("allow", "autoplay");
                let _ = el.set_attribute("allowfullscreen", "");
                let _ = el.set_attribute("src", src);
                el
            }
            MediaView::Video { src, .. } => {
                let el = dom::element(document, "video", "media-video")?;
                let _ = el.set_attribute("controls", "");
                let _ = el.set_attribute("src", src);
                el
            }
            MediaView::Image { src, caption } => {
                let el = dom::element(document, "img", "media-image")?;
                let _ = el.set_attribute("alt", caption);
                let _ = el.set_attribute("src", src);
                el
            }
        };
        let _ = media.set_attribute("data-index", &state.current_index().to_string());
        content.append_child(&media).ok()?;
        append_text(document, &content, "p", "media-caption", view.caption())?;

        if state.len() > 1 {
            let nav = dom::element(document, "div", "media-nav")?;
            let prev = dom::text_element(document, "button", "media-prev", "‹")?;
            let _ = prev.set_attribute("data-action", "prev");
            nav.append_child(&prev).ok()?;
            for (i, active) in state.indicators().into_iter().enumerate() {
                let class = if active { "media-indicator active" } else { "media-indicator" };
                let dot = dom::element(document, "button", class)?;
                let _ = dot.set_attribute("data-action", "goto");
                let _ = dot.set_attribute("data-index", &i.to_string());
                nav.append_child(&dot).ok()?;
            }
            let next = dom::text_element(document, "button", "media-next", "›")?;
            let _ = next.set_attribute("data-action", "next");
            nav.append_child(&next).ok()?;
            content.append_child(&nav).ok()?;

            let strip = dom::element(document, "div", "media-thumbnails")?;
            for thumb in state.thumbnails() {
                let class = if thumb.active { "media-thumb active" } else { "media-thumb" };
                let button = dom::element(document, "button", class)?;
                let _ = button.set_attribute("data-action", "goto");
                let _ = button.set_attribute("data-index", &thumb.index.to_string());
                let preview = match &thumb.image {
                    Some(src) => {
                        let img = dom::element(document, "img", "media-thumb-image")?;
                        let _ = img.set_attribute("src", src);
                        let _ = img.set_attribute("alt", "");
                        img
                    }
                    None => dom::text_element(document, "span", "media-thumb-play", "▶")?,
                };
                button.append_child(&preview).ok()?;
                append_text(document, &button, "span", "media-thumb-index", &thumb.label())?;
                strip.append_child(&button).ok()?;
            }
            content.append_child(&strip).ok()?;
        }

        modal.append_child(&content).ok()?;
        Some(())
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    wasm_app::mount();
}

/// Tear the page down: stops the particle loop and removes every listener
#[cfg(target_arch = "wasm32")]
#[wasm_bindgen]
pub fn unmount() {
    wasm_app::unmount();
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Neon Folio (native) starting...");
    log::info!("The page runs in the browser - build with `trunk serve`; running a headless pass");

    if let Err(e) = headless::run() {
        log::error!("{}", e);
        std::process::exit(1);
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use neon_folio::engine::{
        MediaCarousel, NavigationController, ParticleField, Section, SectionBounds,
    };
    use neon_folio::renderer::RecordingPainter;
    use neon_folio::{Catalogue, Result, Settings};

    const FRAMES: u64 = 600;
    const SURFACE: (f32, f32) = (1280.0, 720.0);

    pub fn run() -> Result<()> {
        let settings = Settings::load();
        let catalogue = Catalogue::embedded()?;
        log::info!(
            "Catalogue: {} projects, {} achievements, {} skills",
            catalogue.projects.len(),
            catalogue.achievements.len(),
            catalogue.tech_stack.len()
        );

        // Particle field against a recording surface
        let mut field = ParticleField::new(settings.field_config(0x5eed));
        field.start(Some(SURFACE));
        let mut painter = RecordingPainter::default();
        let mut max_lines = 0;
        for _ in 0..FRAMES {
            field.frame(&mut painter);
            let stats = painter.take_stats();
            max_lines = max_lines.max(stats.lines);
            if field.frames() % 120 == 0 {
                log::info!(
                    "frame {}: {} particles, {} links",
                    field.frames(),
                    stats.circles,
                    stats.lines
                );
            }
        }
        field.stop();
        log::info!("Particle field: {} frames, peak {} links", FRAMES, max_lines);

        // Scroll through a page of four 900px sections
        let layout = |s: Section| {
            let i = Section::ALL.iter().position(|x| *x == s)?;
            Some(SectionBounds::new(i as f64 * 900.0, 900.0))
        };
        let mut nav = NavigationController::new(settings.scroll_offset);
        for y in (0..3600).step_by(300) {
            if nav.on_scroll(y as f64, &layout) {
                log::info!("scroll {:>4}: active #{}", y, nav.active_section());
            }
        }

        // Walk every gallery once around
        let mut carousel = MediaCarousel::new();
        for project in catalogue.projects.iter().filter(|p| p.has_gallery()) {
            let len = carousel.open_gallery(project.media.clone(), project.title.clone())?.len();
            for _ in 0..len {
                if let Some(state) = carousel.state() {
                    log::info!("{} [{}] {}", state.subject(), state.counter(), state.view().src());
                }
                carousel.next();
            }
            carousel.close();
        }

        Ok(())
    }
}
