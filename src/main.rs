//! Memory Walk entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{Document, Element, HtmlCanvasElement};

    use memory_walk::modal::{CLOSE_LABEL, ModalLayout};
    use memory_walk::renderer::{RenderError, SceneRenderState};
    use memory_walk::scene::SceneSetup;
    use memory_walk::{Game, Settings};

    /// DOM elements backing the memory dialog
    struct ModalView {
        container: Element,
        content: Element,
        title: Element,
        description: Element,
        // Last values pushed to the DOM
        shown_title: String,
        shown_description: String,
        container_style: String,
        content_style: String,
    }

    impl ModalView {
        fn new(document: &Document) -> Result<Self, JsValue> {
            let container = document.create_element("div")?;
            container.set_id("memory-modal");
            let content = document.create_element("div")?;
            content.set_id("memory-modal-content");
            let title = document.create_element("h2")?;
            let description = document.create_element("p")?;
            let close = document.create_element("button")?;
            close.set_id("memory-modal-close");
            close.set_text_content(Some(CLOSE_LABEL));
            close.set_attribute("style", &ModalLayout::close_button_css(false))?;

            content.append_child(&title)?;
            content.append_child(&description)?;
            content.append_child(&close)?;
            container.append_child(&content)?;
            if let Some(body) = document.body() {
                body.append_child(&container)?;
            }

            let view = Self {
                container,
                content,
                title,
                description,
                shown_title: String::new(),
                shown_description: String::new(),
                container_style: String::new(),
                content_style: String::new(),
            };
            Ok(view)
        }

        /// Mirror the modal state into the DOM, touching only what changed
        fn sync(&mut self, game: &Game, viewport_width: f64) {
            let modal = &game.modal;

            if modal.title() != self.shown_title {
                self.shown_title = modal.title().to_string();
                self.title.set_text_content(Some(&self.shown_title));
            }
            if modal.description() != self.shown_description {
                self.shown_description = modal.description().to_string();
                self.description
                    .set_text_content(Some(&self.shown_description));
            }

            let container_style =
                ModalLayout::container_css(modal.is_displayed(), modal.opacity());
            if container_style != self.container_style {
                let _ = self.container.set_attribute("style", &container_style);
                self.container_style = container_style;
            }

            let layout = ModalLayout::for_viewport(viewport_width);
            let content_style = layout.content_css(modal.content_scale());
            if content_style != self.content_style {
                let _ = self.content.set_attribute("style", &content_style);
                let _ = self.title.set_attribute("style", &layout.title_css());
                let _ = self
                    .description
                    .set_attribute("style", &layout.description_css());
                self.content_style = content_style;
            }
        }
    }

    /// Browser-side application state
    struct App {
        game: Game,
        render_state: Option<SceneRenderState>,
        modal_view: Option<ModalView>,
        fps_el: Option<Element>,
        last_time: f64,
        // FPS tracking
        frame_times: [f64; 60],
        frame_index: usize,
        fps: u32,
    }

    impl App {
        fn new(game: Game) -> Self {
            Self {
                game,
                render_state: None,
                modal_view: None,
                fps_el: None,
                last_time: 0.0,
                frame_times: [0.0; 60],
                frame_index: 0,
                fps: 0,
            }
        }

        fn update(&mut self, dt: f32, time: f64) {
            self.game.update(dt);

            self.frame_times[self.frame_index] = time;
            self.frame_index = (self.frame_index + 1) % 60;
            let oldest_time = self.frame_times[self.frame_index];
            if oldest_time > 0.0 {
                let elapsed = time - oldest_time;
                if elapsed > 0.0 {
                    self.fps = (60000.0 / elapsed).round() as u32;
                }
            }
        }

        fn render(&mut self) {
            if let Some(ref mut render_state) = self.render_state {
                match render_state.render(&self.game.state, &self.game.settings) {
                    Ok(_) => {}
                    Err(wgpu::SurfaceError::Lost) => {
                        log::warn!("Surface lost, reconfiguring");
                        render_state.resize(render_state.size.0, render_state.size.1);
                    }
                    Err(wgpu::SurfaceError::OutOfMemory) => {
                        log::error!("Out of memory!");
                    }
                    Err(e) => log::warn!("Render error: {:?}", e),
                }
            }
        }

        fn update_dom(&mut self) {
            let viewport_width = web_sys::window()
                .and_then(|w| w.inner_width().ok())
                .and_then(|v| v.as_f64())
                .unwrap_or(1024.0);
            if let Some(ref mut view) = self.modal_view {
                view.sync(&self.game, viewport_width);
            }
            if let Some(ref el) = self.fps_el {
                el.set_text_content(Some(&format!("{} fps", self.fps)));
            }
        }
    }

    async fn init_renderer(
        canvas: &HtmlCanvasElement,
        width: u32,
        height: u32,
        scene: SceneSetup,
    ) -> Result<SceneRenderState, RenderError> {
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::BROWSER_WEBGPU | wgpu::Backends::GL,
            ..Default::default()
        });

        let surface = instance.create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await?;

        log::info!("Using adapter: {:?}", adapter.get_info().name);

        SceneRenderState::new(surface, &adapter, width, height, scene).await
    }

    /// Canvas size in CSS pixels and in device pixels
    fn canvas_size(canvas: &HtmlCanvasElement) -> ((f32, f32), (u32, u32)) {
        let dpr = web_sys::window()
            .map(|w| w.device_pixel_ratio())
            .unwrap_or(1.0);
        let client_w = canvas.client_width();
        let client_h = canvas.client_height();
        (
            (client_w as f32, client_h as f32),
            ((client_w as f64 * dpr) as u32, (client_h as f64 * dpr) as u32),
        )
    }

    pub async fn run() {
        console_error_panic_hook::set_once();
        if let Err(e) = console_log::init_with_level(log::Level::Info) {
            web_sys::console::error_1(&format!("Failed to init logger: {e}").into());
        }

        log::info!("Memory Walk starting...");

        let Some(window) = web_sys::window() else {
            log::error!("No window available");
            return;
        };
        let Some(document) = window.document() else {
            log::error!("No document available");
            return;
        };

        if let Some(loading) = document.get_element_by_id("loading") {
            let _ = loading.set_attribute("class", "hidden");
        }

        let Some(canvas) = document
            .get_element_by_id("canvas")
            .and_then(|el| el.dyn_into::<HtmlCanvasElement>().ok())
        else {
            log::error!("No <canvas id=\"canvas\"> element found");
            return;
        };

        let ((client_w, client_h), (width, height)) = canvas_size(&canvas);
        canvas.set_width(width);
        canvas.set_height(height);

        let settings = Settings::load();
        let seed = js_sys::Date::now() as u64;
        let mut game = Game::new(seed, settings);
        game.resize(client_w, client_h);
        log::info!("Game initialized with seed: {}", seed);

        let scene = game.scene.clone();
        let show_fps = game.settings.show_fps;
        let app = Rc::new(RefCell::new(App::new(game)));

        match init_renderer(&canvas, width, height, scene).await {
            Ok(render_state) => app.borrow_mut().render_state = Some(render_state),
            Err(e) => log::error!("Renderer unavailable: {}", e),
        }

        match ModalView::new(&document) {
            Ok(view) => app.borrow_mut().modal_view = Some(view),
            Err(e) => log::error!("Failed to build memory dialog: {:?}", e),
        }

        if show_fps {
            if let Ok(el) = document.create_element("div") {
                el.set_id("fps");
                let _ = el.set_attribute(
                    "style",
                    "position:fixed;top:8px;right:8px;color:#fff;font:12px monospace",
                );
                if let Some(body) = document.body() {
                    let _ = body.append_child(&el);
                }
                app.borrow_mut().fps_el = Some(el);
            }
        }

        setup_input_handlers(&window, app.clone());
        setup_resize_handler(&window, canvas, app.clone());
        setup_close_button(&document, app.clone());

        app.borrow_mut().game.start();
        request_animation_frame(app);

        log::info!("Memory Walk running!");
    }

    fn setup_input_handlers(window: &web_sys::Window, app: Rc<RefCell<App>>) {
        // Key down
        {
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: web_sys::KeyboardEvent| {
                let key = event.key();
                if key.starts_with("Arrow") {
                    event.prevent_default();
                }
                app.borrow_mut().game.key_down(&key);
            });
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Key up
        {
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: web_sys::KeyboardEvent| {
                app.borrow_mut().game.key_up(&event.key());
            });
            let _ =
                window.add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Window blur drops held keys so the player doesn't keep walking
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                app.borrow_mut().game.blur();
            });
            let _ =
                window.add_event_listener_with_callback("blur", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_resize_handler(
        window: &web_sys::Window,
        canvas: HtmlCanvasElement,
        app: Rc<RefCell<App>>,
    ) {
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            let ((client_w, client_h), (width, height)) = canvas_size(&canvas);
            canvas.set_width(width);
            canvas.set_height(height);

            let mut a = app.borrow_mut();
            a.game.resize(client_w, client_h);
            if let Some(ref mut render_state) = a.render_state {
                render_state.resize(width, height);
            }
        });
        let _ =
            window.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn setup_close_button(document: &Document, app: Rc<RefCell<App>>) {
        let Some(btn) = document.get_element_by_id("memory-modal-close") else {
            return;
        };

        {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
                app.borrow_mut().game.modal.hide();
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Hover shading
        for (event, hovered) in [("mouseover", true), ("mouseout", false)] {
            let target = btn.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
                let _ = target.set_attribute("style", &ModalLayout::close_button_css(hovered));
            });
            let _ = btn.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn request_animation_frame(app: Rc<RefCell<App>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::once(move |time: f64| {
            game_loop(app, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(app: Rc<RefCell<App>>, time: f64) {
        {
            let mut a = app.borrow_mut();
            if !a.game.is_running() {
                log::info!("Game loop stopped");
                return;
            }

            let dt = if a.last_time > 0.0 {
                ((time - a.last_time) / 1000.0) as f32
            } else {
                0.0
            };
            a.last_time = time;

            a.update(dt, time);
            a.render();
            a.update_dom();
        }

        request_animation_frame(app);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() {
    wasm_game::run().await;
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Memory Walk (native) starting...");
    log::info!("Native mode runs headless - use `trunk serve` for the web version");

    let seed = std::env::args()
        .nth(1)
        .and_then(|s| s.parse().ok())
        .unwrap_or(42);
    headless_walk(seed);
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

/// Walk the player to the nearest memory and print what it says
#[cfg(not(target_arch = "wasm32"))]
fn headless_walk(seed: u64) {
    use memory_walk::{Game, Settings};

    const FRAME_DT: f32 = 1.0 / 60.0;
    const MAX_FRAMES: usize = 60 * 60;

    let mut game = Game::new(seed, Settings::default());
    game.start();

    let Some(target) = game.state.nearest_idle_block() else {
        log::warn!("No memory blocks to visit");
        return;
    };
    let goal = game.state.blocks[target].position;
    log::info!("Walking to block {} at ({:.1}, {:.1})", target, goal.x, goal.z);

    for frame in 0..MAX_FRAMES {
        let delta = goal - game.state.player.position;
        game.input.clear();
        if delta.x > 0.1 {
            game.key_down("d");
        } else if delta.x < -0.1 {
            game.key_down("a");
        }
        if delta.z > 0.1 {
            game.key_down("s");
        } else if delta.z < -0.1 {
            game.key_down("w");
        }

        if game.update(FRAME_DT) > 0 {
            println!(
                "Frame {} ({:.2}s): {}\n  {}",
                frame,
                game.state.elapsed,
                game.modal.title(),
                game.modal.description()
            );
            game.key_down("Escape");
            game.stop();
            return;
        }
    }

    log::warn!("No memory reached after {} frames", MAX_FRAMES);
}
