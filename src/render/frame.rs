use serde::{Deserialize, Serialize};

use crate::core::Viewport;
use crate::error::{ChartError, ChartResult};
use crate::render::{
    ArcPrimitive, Color, DrawLayer, LinePrimitive, PointPrimitive, RectPrimitive, TextPrimitive,
};

/// One drawing-surface call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum DrawCommand {
    Clear(Color),
    Line(LinePrimitive),
    Rect(RectPrimitive),
    Arc(ArcPrimitive),
    Point(PointPrimitive),
    Text(TextPrimitive),
}

impl DrawCommand {
    fn validate(&self) -> ChartResult<()> {
        match self {
            Self::Clear(color) => color.validate(),
            Self::Line(line) => line.validate(),
            Self::Rect(rect) => rect.validate(),
            Self::Arc(arc) => arc.validate(),
            Self::Point(point) => point.validate(),
            Self::Text(text) => text.validate(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayeredCommand {
    pub layer: DrawLayer,
    pub command: DrawCommand,
}

/// Backend-agnostic, ordered scene for one chart draw pass.
///
/// Commands are replayed in insertion order; the order encodes overdraw
/// (a threshold bar pushed after a value bar paints over it).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderFrame {
    pub viewport: Viewport,
    pub commands: Vec<LayeredCommand>,
}

impl RenderFrame {
    #[must_use]
    pub fn new(viewport: Viewport) -> Self {
        Self {
            viewport,
            commands: Vec::new(),
        }
    }

    pub fn push(&mut self, layer: DrawLayer, command: DrawCommand) {
        self.commands.push(LayeredCommand { layer, command });
    }

    pub fn clear(&mut self, color: Color) {
        self.push(DrawLayer::Background, DrawCommand::Clear(color));
    }

    pub fn line(&mut self, layer: DrawLayer, line: LinePrimitive) {
        self.push(layer, DrawCommand::Line(line));
    }

    pub fn rect(&mut self, layer: DrawLayer, rect: RectPrimitive) {
        self.push(layer, DrawCommand::Rect(rect));
    }

    pub fn arc(&mut self, layer: DrawLayer, arc: ArcPrimitive) {
        self.push(layer, DrawCommand::Arc(arc));
    }

    pub fn point(&mut self, layer: DrawLayer, point: PointPrimitive) {
        self.push(layer, DrawCommand::Point(point));
    }

    pub fn text(&mut self, layer: DrawLayer, text: TextPrimitive) {
        self.push(layer, DrawCommand::Text(text));
    }

    pub fn lines(&self) -> impl Iterator<Item = &LinePrimitive> {
        self.commands.iter().filter_map(|entry| match &entry.command {
            DrawCommand::Line(line) => Some(line),
            _ => None,
        })
    }

    pub fn rects(&self) -> impl Iterator<Item = &RectPrimitive> {
        self.commands.iter().filter_map(|entry| match &entry.command {
            DrawCommand::Rect(rect) => Some(rect),
            _ => None,
        })
    }

    pub fn arcs(&self) -> impl Iterator<Item = &ArcPrimitive> {
        self.commands.iter().filter_map(|entry| match &entry.command {
            DrawCommand::Arc(arc) => Some(arc),
            _ => None,
        })
    }

    pub fn points(&self) -> impl Iterator<Item = &PointPrimitive> {
        self.commands.iter().filter_map(|entry| match &entry.command {
            DrawCommand::Point(point) => Some(point),
            _ => None,
        })
    }

    pub fn texts(&self) -> impl Iterator<Item = &TextPrimitive> {
        self.commands.iter().filter_map(|entry| match &entry.command {
            DrawCommand::Text(text) => Some(text),
            _ => None,
        })
    }

    /// Commands recorded on `layer`, in paint order.
    pub fn layer(&self, layer: DrawLayer) -> impl Iterator<Item = &DrawCommand> {
        self.commands
            .iter()
            .filter(move |entry| entry.layer == layer)
            .map(|entry| &entry.command)
    }

    pub fn validate(&self) -> ChartResult<()> {
        if !self.viewport.is_valid() {
            return Err(ChartError::InvalidViewport {
                width: self.viewport.width,
                height: self.viewport.height,
            });
        }

        let mut current = DrawLayer::Background;
        for entry in &self.commands {
            if entry.layer < current {
                return Err(ChartError::InvalidData(format!(
                    "{:?} command recorded after {:?} layer",
                    entry.layer, current
                )));
            }
            current = entry.layer;
            entry.command.validate()?;
        }

        Ok(())
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.commands.len()
    }

    /// Pretty JSON dump of the scene for diagnostics and snapshots.
    pub fn to_json_pretty(&self) -> ChartResult<String> {
        serde_json::to_string_pretty(self)
            .map_err(|err| ChartError::InvalidData(format!("failed to serialize frame: {err}")))
    }
}
