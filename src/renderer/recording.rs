//! In-memory painter

use glam::Vec2;

use super::Painter;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DrawCommand {
    Clear { width: f32, height: f32 },
    Circle { center: Vec2, radius: f32, alpha: f32 },
    Line { from: Vec2, to: Vec2, alpha: f32 },
}

/// Records every primitive in call order
#[derive(Debug, Clone, Default)]
pub struct RecordingPainter {
    pub commands: Vec<DrawCommand>,
}

impl RecordingPainter {
    pub fn circle_count(&self) -> usize {
        self.commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::Circle { .. }))
            .count()
    }

    pub fn line_count(&self) -> usize {
        self.commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::Line { .. }))
            .count()
    }

    /// Summarize and forget the recorded frame
    pub fn take_stats(&mut self) -> FrameStats {
        let stats = FrameStats {
            circles: self.circle_count(),
            lines: self.line_count(),
        };
        self.commands.clear();
        stats
    }
}

impl Painter for RecordingPainter {
    fn clear(&mut self, width: f32, height: f32) {
        self.commands.push(DrawCommand::Clear { width, height });
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32, alpha: f32) {
        self.commands.push(DrawCommand::Circle { center, radius, alpha });
    }

    fn stroke_line(&mut self, from: Vec2, to: Vec2, alpha: f32) {
        self.commands.push(DrawCommand::Line { from, to, alpha });
    }
}

/// Primitive counts for one frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FrameStats {
    pub circles: usize,
    pub lines: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_take_stats_resets() {
        let mut p = RecordingPainter::default();
        p.clear(10.0, 10.0);
        p.fill_circle(Vec2::ONE, 1.0, 0.2);
        p.stroke_line(Vec2::ZERO, Vec2::ONE, 0.05);
        p.stroke_line(Vec2::ZERO, Vec2::X, 0.05);

        assert_eq!(p.take_stats(), FrameStats { circles: 1, lines: 2 });
        assert!(p.commands.is_empty());
    }
}
