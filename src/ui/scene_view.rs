//! Half-block widget for a [`PixelBuffer`].
//!
//! Each terminal cell shows two pixels: the upper one as the foreground of
//! `▀`, the lower one as the background.

use crate::render::PixelBuffer;
use crate::scene::Rgb;
use ratatui::{buffer::Buffer, layout::Rect, style::Color, widgets::Widget};

pub struct SceneView<'a> {
    pixels: &'a PixelBuffer,
}

impl<'a> SceneView<'a> {
    pub fn new(pixels: &'a PixelBuffer) -> Self {
        Self { pixels }
    }
}

fn to_color(c: Rgb) -> Color {
    let [r, g, b] = c.to_bytes();
    Color::Rgb(r, g, b)
}

impl Widget for SceneView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let area = area.intersection(buf.area);
        for row in 0..area.height {
            for col in 0..area.width {
                let (x, y) = (col as usize, row as usize * 2);
                let (Some(top), Some(bottom)) = (self.pixels.get(x, y), self.pixels.get(x, y + 1))
                else {
                    continue;
                };
                buf.get_mut(area.x + col, area.y + row)
                    .set_char('▀')
                    .set_fg(to_color(top))
                    .set_bg(to_color(bottom));
            }
        }
    }
}
