//! Draw commands issued by the game core each frame.
//!
//! Coordinates are canvas pixels with the origin at the top-left corner and
//! y growing downwards. Hosts translate them to whatever surface they own.

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f32,
}

impl Rgba {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Composite over a black background.
    pub fn over_black(&self) -> (u8, u8, u8) {
        let a = self.a.clamp(0.0, 1.0);
        let mix = |c: u8| (c as f32 * a).round() as u8;
        (mix(self.r), mix(self.g), mix(self.b))
    }
}

pub const WHITE: Rgba = Rgba::rgb(255, 255, 255);
pub const BLACK: Rgba = Rgba::rgb(0, 0, 0);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextAlign {
    Left,
    Center,
    Right,
}

#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Clear,
    FillRect {
        x: f64,
        y: f64,
        w: f64,
        h: f64,
        color: Rgba,
    },
    /// Square of side `size` centred on `(cx, cy)`, rotated by `rotation` radians.
    FillRotatedSquare {
        cx: f64,
        cy: f64,
        size: f64,
        rotation: f64,
        color: Rgba,
    },
    FillCircle {
        cx: f64,
        cy: f64,
        r: f64,
        color: Rgba,
    },
    FillEllipse {
        cx: f64,
        cy: f64,
        rx: f64,
        ry: f64,
        color: Rgba,
    },
    FillPolygon {
        points: Vec<(f64, f64)>,
        color: Rgba,
    },
    /// `size` is the nominal font size in canvas pixels; `y` is the baseline.
    Text {
        x: f64,
        y: f64,
        text: String,
        size: f64,
        align: TextAlign,
        color: Rgba,
    },
}

/// Ordered draw commands for one frame.
#[derive(Debug, Default, Clone)]
pub struct DisplayList {
    commands: Vec<DrawCommand>,
}

impl DisplayList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, command: DrawCommand) {
        self.commands.push(command);
    }

    pub fn clear(&mut self) {
        self.commands.clear();
        self.commands.push(DrawCommand::Clear);
    }

    pub fn fill_rect(&mut self, x: f64, y: f64, w: f64, h: f64, color: Rgba) {
        self.push(DrawCommand::FillRect { x, y, w, h, color });
    }

    pub fn fill_circle(&mut self, cx: f64, cy: f64, r: f64, color: Rgba) {
        self.push(DrawCommand::FillCircle { cx, cy, r, color });
    }

    pub fn fill_ellipse(&mut self, cx: f64, cy: f64, rx: f64, ry: f64, color: Rgba) {
        self.push(DrawCommand::FillEllipse { cx, cy, rx, ry, color });
    }

    pub fn fill_polygon(&mut self, points: Vec<(f64, f64)>, color: Rgba) {
        self.push(DrawCommand::FillPolygon { points, color });
    }

    pub fn text(&mut self, x: f64, y: f64, text: impl Into<String>, size: f64, align: TextAlign, color: Rgba) {
        self.push(DrawCommand::Text {
            x,
            y,
            text: text.into(),
            size,
            align,
            color,
        });
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Text payloads in emission order.
    pub fn texts(&self) -> Vec<&str> {
        self.commands
            .iter()
            .filter_map(|c| match c {
                DrawCommand::Text { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }
}
