// SPDX-License-Identifier: MIT

//!
//! The HTML Canvas frontend
//!
//! ```sh
//! wasm-pack build --target web
//! python3 -m http.server 8000 --bind 0.0.0.0
//! ```
//!

use crate::{
    Bounds, EdgeOut, Engine, FrameSurface, HIGHLIGHT_CIRCLE_THICKNESS, ObjectOut, Point,
    SceneConfig, Shape, Size, TextOut,
};
use algoscene_core::{Colour, Command, Layer};
use log::{debug, info};
use std::cell::RefCell;
use std::f64::consts::TAU;
use std::rc::Rc;
use wasm_bindgen::prelude::{Closure, wasm_bindgen};
use wasm_bindgen::{JsCast, JsValue, UnwrapThrowExt};
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, HtmlElement};

/// The font family all text is set in
const FONT_FAMILY: &str = "sans-serif";

/// Measure text using the canvas's own context
fn measure_text(ctx: &CanvasRenderingContext2d, font_size: f64, text: &str) -> (f64, f64) {
    ctx.set_font(&format!("{font_size}px {FONT_FAMILY}"));
    match ctx.measure_text(text) {
        Ok(metrics) => {
            let height = metrics.actual_bounding_box_ascent() + metrics.actual_bounding_box_descent();
            (metrics.width(), height)
        }
        Err(_) => (0.0, font_size),
    }
}

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    std::panic::set_hook(Box::new(console_error_panic_hook::hook));
    console_log::init_with_level(log::Level::Debug)
        .map_err(|error| JsValue::from_str(&error.to_string()))?;
    log::info!("Start AlgoScene");
    Ok(())
}

fn device_pixel_ratio() -> f64 {
    web_sys::window().map_or(1.0, |window| window.device_pixel_ratio())
}

/// Convert a [`Colour`] to a CSS colour string
fn css_colour(colour: Colour) -> String {
    let (r, g, b) = colour.as_rgb();
    format!("rgba({r}, {g}, {b}, 1.0)")
}

#[derive(Debug, Default)]
struct State {
    /// The last frame rendered (redrawn when the canvas is resized)
    last_frame_index: u64,
}

/// A canvas, its context, and what to clear it to
#[derive(Debug, Clone)]
struct CanvasSurface {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
    background: Colour,
}

impl CanvasSurface {
    fn from_selector(selector: &str, background: Colour) -> Result<Self, JsValue> {
        let document = web_sys::window()
            .and_then(|window| window.document())
            .ok_or_else(|| JsValue::from_str("no document"))?;
        let canvas = document
            .query_selector(selector)?
            .ok_or_else(|| JsValue::from_str(&format!("no element matches {selector}")))?
            .dyn_into::<HtmlCanvasElement>()
            .map_err(|_| JsValue::from_str(&format!("{selector} is not a canvas")))?;
        let ctx = canvas
            .get_context("2d")?
            .ok_or_else(|| JsValue::from_str("no 2d context"))?
            .dyn_into::<CanvasRenderingContext2d>()?;
        Ok(Self {
            canvas,
            ctx,
            background,
        })
    }

    /// Match the canvas's backing store to its parent's size (at the device's
    /// pixel ratio) and draw in CSS pixels
    fn fit_to_parent(&self) {
        let Some(parent) = self
            .canvas
            .parent_element()
            .and_then(|parent| parent.dyn_into::<HtmlElement>().ok())
        else {
            return;
        };
        let dpr = device_pixel_ratio();
        let (width, height) = (parent.client_width(), parent.client_height());
        self.canvas.set_width((width as f64 * dpr) as u32);
        self.canvas.set_height((height as f64 * dpr) as u32);
        let style = self.canvas.style();
        let _ = style.set_property("width", &format!("{width}px"));
        let _ = style.set_property("height", &format!("{height}px"));
        let _ = self.ctx.set_transform(dpr, 0.0, 0.0, dpr, 0.0, 0.0);
        debug!("canvas resized to {width}x{height} (dpr {dpr})");
    }

    fn set_fill(&self, colour: Colour) {
        self.ctx.set_fill_style_str(&css_colour(colour));
    }

    fn set_stroke(&self, colour: Colour, thickness: f64) {
        self.ctx.set_stroke_style_str(&css_colour(colour));
        self.ctx.set_line_width(thickness);
    }

    fn circle_path(&self, centre: Point, radius: f64) {
        self.ctx.begin_path();
        let _ = self.ctx.arc(centre.x, centre.y, radius.max(0.0), 0.0, TAU);
    }

    fn stroke_bounds(&self, bounds: Bounds) {
        self.ctx
            .stroke_rect(bounds.position.x, bounds.position.y, bounds.width, bounds.height);
    }

    fn fill_bounds(&self, bounds: Bounds) {
        self.ctx
            .fill_rect(bounds.position.x, bounds.position.y, bounds.width, bounds.height);
    }

    fn line(&self, from: Point, to: Point) {
        self.ctx.begin_path();
        self.ctx.move_to(from.x, from.y);
        self.ctx.line_to(to.x, to.y);
        self.ctx.stroke();
    }

    fn text(&self, text: &TextOut) {
        if text.text.is_empty() {
            return;
        }
        self.ctx
            .set_font(&format!("{}px {FONT_FAMILY}", text.font_size));
        if text.centred {
            self.ctx.set_text_align("center");
            self.ctx.set_text_baseline("middle");
        } else {
            self.ctx.set_text_align("left");
            self.ctx.set_text_baseline("top");
        }
        self.set_fill(text.colour);
        let _ = self.ctx.fill_text(&text.text, text.position.x, text.position.y);
    }

    fn edge_path(&self, edge: &EdgeOut) {
        self.ctx.begin_path();
        self.ctx.move_to(edge.start.x, edge.start.y);
        match edge.control {
            Some(control) => {
                self.ctx
                    .quadratic_curve_to(control.x, control.y, edge.end.x, edge.end.y)
            }
            None => self.ctx.line_to(edge.end.x, edge.end.y),
        }
    }
}

impl FrameSurface for CanvasSurface {
    fn size(&self) -> Size {
        let dpr = device_pixel_ratio();
        Size::new(
            self.canvas.width() as f64 / dpr,
            self.canvas.height() as f64 / dpr,
        )
    }

    fn clear(&mut self) {
        let size = self.size();
        self.ctx.set_global_alpha(1.0);
        self.set_fill(self.background);
        self.ctx.fill_rect(0.0, 0.0, size.x, size.y);
    }

    fn draw_object(&mut self, object: &ObjectOut) {
        self.ctx.set_global_alpha(object.alpha);

        // The pulsing highlight goes underneath the outline
        if let Some(highlight) = object.highlight {
            self.set_stroke(highlight.colour, highlight.thickness);
            match object.shape {
                Shape::Circle { radius } | Shape::HighlightCircle { radius } => {
                    self.circle_path(object.centre, radius);
                    self.ctx.stroke();
                }
                _ => self.stroke_bounds(object.bounds),
            }
        }

        match object.shape {
            Shape::Circle { radius } => {
                self.circle_path(object.centre, radius);
                self.set_fill(object.background);
                self.ctx.fill();
                self.set_stroke(object.foreground, 1.0);
                self.ctx.stroke();
            }
            Shape::HighlightCircle { radius } => {
                self.circle_path(object.centre, radius);
                self.set_stroke(object.foreground, HIGHLIGHT_CIRCLE_THICKNESS);
                self.ctx.stroke();
            }
            Shape::Label { .. } => {}
            Shape::Rectangle { .. } | Shape::LinkedListNode { .. } | Shape::BTreeNode { .. } => {
                self.set_fill(object.background);
                self.fill_bounds(object.bounds);
                if let Some(slot) = object.highlighted_slot {
                    self.set_fill(Colour::lightened_colour(object.foreground));
                    self.fill_bounds(slot);
                }
                self.set_stroke(object.foreground, 1.0);
                self.stroke_bounds(object.bounds);
                for slot in &object.slots {
                    self.stroke_bounds(*slot);
                }
                if let Some(link) = object.link_slot {
                    self.stroke_bounds(link);
                    if object.null_pointer {
                        let top_right = link.position.offset(link.width, 0.0);
                        let bottom_left = link.position.offset(0.0, link.height);
                        self.line(top_right, bottom_left);
                    }
                }
            }
        }

        for text in &object.texts {
            self.text(text);
        }
    }

    fn draw_edge(&mut self, edge: &EdgeOut) {
        self.ctx.set_global_alpha(edge.alpha);
        if let Some(highlight) = edge.highlight {
            self.set_stroke(highlight.colour, highlight.thickness);
            self.edge_path(edge);
            self.ctx.stroke();
        }
        self.set_stroke(edge.colour, edge.thickness);
        self.edge_path(edge);
        self.ctx.stroke();

        if let Some([tip, left, right]) = edge.arrow_head() {
            self.ctx.begin_path();
            self.ctx.move_to(tip.x, tip.y);
            self.ctx.line_to(left.x, left.y);
            self.ctx.line_to(right.x, right.y);
            self.ctx.close_path();
            self.set_fill(edge.colour);
            self.ctx.fill();
        }
        if let Some(label) = &edge.label {
            self.text(label);
        }
    }

    fn draw_status(&mut self, status: &TextOut) {
        self.ctx.set_global_alpha(1.0);
        self.text(status);
    }
}

/// The HTML canvas frontend for use on the web
#[wasm_bindgen]
pub struct SceneHtmlCanvas {
    /// The underlying scene [`Engine`]
    engine: Rc<RefCell<Engine>>,

    state: Rc<RefCell<State>>,

    surface: Rc<RefCell<CanvasSurface>>,
}

#[wasm_bindgen]
impl SceneHtmlCanvas {
    //--------------------------------------------------------------------------
    // WASM bindgen functions
    //--------------------------------------------------------------------------

    /// Create a scene drawn on the canvas matching `selector`.  `config` is a
    /// (possibly partial) [`SceneConfig`] object, or `undefined`
    #[wasm_bindgen(constructor)]
    pub fn new(selector: &str, config: JsValue) -> Result<SceneHtmlCanvas, JsValue> {
        info!("Constructing a new SceneHtmlCanvas in Rust");
        let config: SceneConfig = if config.is_undefined() || config.is_null() {
            SceneConfig::default()
        } else {
            serde_wasm_bindgen::from_value(config)?
        };
        let surface = CanvasSurface::from_selector(selector, config.colours.surface)?;
        surface.fit_to_parent();

        let measuring_ctx = surface.ctx.clone();
        let engine = Engine::with_config(config, move |font_size, text: String| {
            measure_text(&measuring_ctx, font_size, &text)
        });

        let mut html_canvas = Self {
            engine: Rc::new(RefCell::new(engine)),
            state: Rc::new(RefCell::new(State::default())),
            surface: Rc::new(RefCell::new(surface)),
        };
        html_canvas.listen_for_resize();
        Ok(html_canvas)
    }

    /// Apply an array of commands in order.  Returns the array of effects, or
    /// throws at the first command that fails (earlier commands stay applied)
    #[wasm_bindgen]
    pub fn apply_commands(&mut self, commands: JsValue) -> Result<JsValue, JsValue> {
        let commands: Vec<Command> = serde_wasm_bindgen::from_value(commands)?;
        let names: Vec<&'static str> = commands.iter().map(Command::name).collect();
        let (effects, failure) = self.engine.borrow_mut().apply_all(commands);
        if let Some((index, error)) = failure {
            let name = names.get(index).copied().unwrap_or_default();
            return Err(JsValue::from_str(&format!(
                "Error at command {index} ({name}): {error}"
            )));
        }
        Ok(serde_wasm_bindgen::to_value(&effects)?)
    }

    #[wasm_bindgen]
    pub fn set_layer_active(&mut self, layer: Layer, active: bool) {
        self.engine.borrow_mut().set_layer_active(layer, active);
    }

    #[wasm_bindgen]
    pub fn set_active_layers(&mut self, layers: Vec<Layer>) {
        self.engine.borrow_mut().set_active_layers(&layers);
    }

    #[wasm_bindgen]
    pub fn active_layers(&self) -> Vec<Layer> {
        self.engine.borrow().active_layers()
    }

    #[wasm_bindgen]
    pub fn set_status(&mut self, text: String) {
        self.engine.borrow_mut().set_status(text);
    }

    /// Draw the given frame (the caller's animation loop supplies the index)
    #[wasm_bindgen]
    pub fn render_frame(&mut self, frame_index: f64) {
        let frame_index = frame_index.max(0.0) as u64;
        self.state.borrow_mut().last_frame_index = frame_index;
        render(&self.engine, &self.surface, frame_index);
    }

    //--------------------------------------------------------------------------
    // Manage events
    //--------------------------------------------------------------------------

    fn add_listener<F>(&mut self, event_name: &str, mut listener: F)
    where
        F: FnMut(web_sys::Event) + 'static,
    {
        let closure = Closure::wrap(Box::new(move |event: web_sys::Event| {
            listener(event);
        }) as Box<dyn FnMut(web_sys::Event)>);

        if let Some(window) = web_sys::window() {
            window
                .add_event_listener_with_callback(event_name, closure.as_ref().unchecked_ref())
                .unwrap_throw();
        }

        // Keep the closure
        closure.forget();
    }

    /// Resize event handler.  Refits the canvas and redraws the last frame
    fn listen_for_resize(&mut self) {
        let engine = self.engine.clone();
        let state = self.state.clone();
        let surface = self.surface.clone();
        self.add_listener("resize", move |_event| {
            surface.borrow().fit_to_parent();
            render(&engine, &surface, state.borrow().last_frame_index);
        });
    }
}

fn render(engine: &Rc<RefCell<Engine>>, surface: &Rc<RefCell<CanvasSurface>>, frame_index: u64) {
    engine
        .borrow()
        .render_frame(frame_index, &mut *surface.borrow_mut());
}
