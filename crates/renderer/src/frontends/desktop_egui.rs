// SPDX-License-Identifier: MIT

//!
//! The egui frontend
//!

use crate::{
    Bounds, EdgeOut, Effect, Engine, FrameSurface, HIGHLIGHT_CIRCLE_THICKNESS, ObjectOut, Point,
    SceneConfig, SceneError, Shape, Size, TextOut,
};
use algoscene_core::{Colour, Command};
use eframe::egui::epaint::QuadraticBezierShape;
use eframe::egui::{
    Align2, Color32, Context, FontId, Painter, Pos2, Rect, Sense, Stroke, StrokeKind, Ui, Vec2,
};
use log::info;

/// The scene engine for use in an `egui` application
pub struct SceneEgui {
    /// The underlying scene [`Engine`].
    engine: Engine,
}

impl SceneEgui {
    /// Create a scene with the default config
    pub fn new(ctx: &Context) -> Self {
        Self::with_config(ctx, SceneConfig::default())
    }

    pub fn with_config(ctx: &Context, config: SceneConfig) -> Self {
        info!("Constructing a new SceneEgui in Rust");
        let ctx_clone = ctx.clone();
        let text_measurer =
            move |font_size, text| measure_text_fn(ctx_clone.clone(), font_size, text);
        Self {
            engine: Engine::with_config(config, text_measurer),
        }
    }

    pub fn engine(&self) -> &Engine {
        &self.engine
    }

    pub fn engine_mut(&mut self) -> &mut Engine {
        &mut self.engine
    }

    pub fn apply(&mut self, command: Command) -> Result<Effect, SceneError> {
        self.engine.apply(command)
    }

    /// Paint the given frame into all the space the `Ui` has left
    pub fn draw(&self, ui: &mut Ui, frame_index: u64) {
        let width = ui.available_width();
        let height = ui.available_height();
        let (painter_response, painter) = ui.allocate_painter(Vec2::new(width, height), Sense::hover());
        let canvas_rect = painter_response.rect;
        let mut surface = EguiSurface {
            painter: &painter,
            origin: canvas_rect.min.to_vec2(),
            size: Size::new(canvas_rect.width().into(), canvas_rect.height().into()),
            background: self.engine.config().colours.surface,
        };
        self.engine.render_frame(frame_index, &mut surface);
    }
}

/// Function supplied to the [`Engine`] so that it can measure text (used in its
/// calculations)
fn measure_text_fn(ctx: Context, font_size: f64, text: String) -> (f64, f64) {
    let text_galley = ctx.fonts_mut(|f| {
        f.layout_no_wrap(text, FontId::proportional(font_size as f32), Color32::BLACK)
    });
    let text_width: f64 = text_galley.rect.width().into();
    let text_height: f64 = text_galley.rect.height().into();
    (text_width, text_height)
}

/// Convert a [`Colour`] (and an alpha) to a [`Color32`]
fn egui_colour(colour: Colour, alpha: f64) -> Color32 {
    let (r, g, b) = colour.as_rgb();
    let alpha = (alpha.clamp(0.0, 1.0) * 255.0).round() as u8;
    Color32::from_rgba_unmultiplied(r, g, b, alpha)
}

/// A painter region the engine's frames are drawn into
struct EguiSurface<'a> {
    painter: &'a Painter,

    /// Where the scene's origin is on screen
    origin: Vec2,

    size: Size,
    background: Colour,
}

impl EguiSurface<'_> {
    fn pos(&self, point: Point) -> Pos2 {
        Pos2::new(point.x as f32, point.y as f32) + self.origin
    }

    fn rect(&self, bounds: Bounds) -> Rect {
        Rect::from_min_size(
            self.pos(bounds.position),
            Vec2::new(bounds.width as f32, bounds.height as f32),
        )
    }

    fn text(&self, text: &TextOut, alpha: f64) {
        if text.text.is_empty() {
            return;
        }
        let anchor = if text.centred {
            Align2::CENTER_CENTER
        } else {
            Align2::LEFT_TOP
        };
        self.painter.text(
            self.pos(text.position),
            anchor,
            &text.text,
            FontId::proportional(text.font_size as f32),
            egui_colour(text.colour, alpha),
        );
    }

    fn edge_line(&self, edge: &EdgeOut, stroke: Stroke) {
        match edge.control {
            Some(control) => {
                let points = [self.pos(edge.start), self.pos(control), self.pos(edge.end)];
                self.painter.add(QuadraticBezierShape::from_points_stroke(
                    points,
                    false,
                    Color32::TRANSPARENT,
                    stroke,
                ));
            }
            None => {
                self.painter
                    .line_segment([self.pos(edge.start), self.pos(edge.end)], stroke);
            }
        }
    }
}

impl FrameSurface for EguiSurface<'_> {
    fn size(&self) -> Size {
        self.size
    }

    fn clear(&mut self) {
        let rect = Rect::from_min_size(
            self.pos(Point::default()),
            Vec2::new(self.size.x as f32, self.size.y as f32),
        );
        self.painter
            .rect_filled(rect, 0.0, egui_colour(self.background, 1.0));
    }

    fn draw_object(&mut self, object: &ObjectOut) {
        let alpha = object.alpha;
        let centre = self.pos(object.centre);
        let outline = Stroke::new(1.0, egui_colour(object.foreground, alpha));

        // The pulsing highlight goes underneath the outline
        if let Some(highlight) = object.highlight {
            let stroke = Stroke::new(
                highlight.thickness as f32,
                egui_colour(highlight.colour, alpha),
            );
            match object.shape {
                Shape::Circle { radius } | Shape::HighlightCircle { radius } => {
                    self.painter.circle_stroke(centre, radius as f32, stroke);
                }
                _ => {
                    self.painter.rect_stroke(
                        self.rect(object.bounds),
                        0.0,
                        stroke,
                        StrokeKind::Middle,
                    );
                }
            }
        }

        match object.shape {
            Shape::Circle { radius } => {
                self.painter
                    .circle_filled(centre, radius as f32, egui_colour(object.background, alpha));
                self.painter.circle_stroke(centre, radius as f32, outline);
            }
            Shape::HighlightCircle { radius } => {
                let ring = Stroke::new(
                    HIGHLIGHT_CIRCLE_THICKNESS as f32,
                    egui_colour(object.foreground, alpha),
                );
                self.painter.circle_stroke(centre, radius as f32, ring);
            }
            Shape::Label { .. } => {}
            Shape::Rectangle { .. } | Shape::LinkedListNode { .. } | Shape::BTreeNode { .. } => {
                self.painter.rect(
                    self.rect(object.bounds),
                    0.0,
                    egui_colour(object.background, alpha),
                    outline,
                    StrokeKind::Middle,
                );
                if let Some(slot) = object.highlighted_slot {
                    self.painter.rect_filled(
                        self.rect(slot),
                        0.0,
                        egui_colour(Colour::lightened_colour(object.foreground), alpha),
                    );
                }
                for slot in &object.slots {
                    self.painter
                        .rect_stroke(self.rect(*slot), 0.0, outline, StrokeKind::Middle);
                }
                if let Some(link) = object.link_slot {
                    self.painter
                        .rect_stroke(self.rect(link), 0.0, outline, StrokeKind::Middle);
                    if object.null_pointer {
                        let top_right = self.pos(link.position.offset(link.width, 0.0));
                        let bottom_left = self.pos(link.position.offset(0.0, link.height));
                        self.painter.line_segment([top_right, bottom_left], outline);
                    }
                }
            }
        }

        for text in &object.texts {
            self.text(text, alpha);
        }
    }

    fn draw_edge(&mut self, edge: &EdgeOut) {
        if let Some(highlight) = edge.highlight {
            let stroke = Stroke::new(
                highlight.thickness as f32,
                egui_colour(highlight.colour, edge.alpha),
            );
            self.edge_line(edge, stroke);
        }
        let colour = egui_colour(edge.colour, edge.alpha);
        self.edge_line(edge, Stroke::new(edge.thickness as f32, colour));

        if let Some(corners) = edge.arrow_head() {
            let points = corners.iter().map(|corner| self.pos(*corner)).collect();
            self.painter.add(eframe::egui::Shape::convex_polygon(
                points,
                colour,
                Stroke::NONE,
            ));
        }
        if let Some(label) = &edge.label {
            self.text(label, edge.alpha);
        }
    }

    fn draw_status(&mut self, status: &TextOut) {
        self.text(status, 1.0);
    }
}
