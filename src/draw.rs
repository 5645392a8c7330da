use crate::config::{Palette, Rgba};
use crate::game::Game;
use crate::grid::Cell;

/// An RGBA8 framebuffer, row-major, four bytes per pixel.
pub struct Frame<'a> {
    pixels: &'a mut [u8],
    width: u32,
    height: u32,
}

impl<'a> Frame<'a> {
    pub fn new(pixels: &'a mut [u8], width: u32, height: u32) -> Self {
        debug_assert_eq!(pixels.len(), (width * height * 4) as usize);
        Self { pixels, width, height }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn pixel(&self, x: u32, y: u32) -> Rgba {
        let idx = ((y * self.width + x) * 4) as usize;
        [self.pixels[idx], self.pixels[idx + 1], self.pixels[idx + 2], self.pixels[idx + 3]]
    }

    pub fn clear(&mut self, [r, g, b, a]: Rgba) {
        for px in self.pixels.chunks_exact_mut(4) {
            px[0] = r;
            px[1] = g;
            px[2] = b;
            px[3] = a;
        }
    }

    /// Source-over blend; the result is always opaque.
    pub fn blend_pixel(&mut self, x: u32, y: u32, [r, g, b, a]: Rgba) {
        if x >= self.width || y >= self.height {
            return;
        }
        let idx = ((y * self.width + x) * 4) as usize;
        let ar = a as u16;
        let iar = (255 - a) as u16;
        for (i, c) in [r, g, b].into_iter().enumerate() {
            let d = self.pixels[idx + i] as u16;
            self.pixels[idx + i] = ((c as u16 * ar + d * iar) / 255) as u8;
        }
        self.pixels[idx + 3] = 255;
    }

    pub fn fill_rect(&mut self, x: u32, y: u32, w: u32, h: u32, col: Rgba) {
        let x2 = (x + w).min(self.width);
        let y2 = (y + h).min(self.height);
        for py in y..y2 {
            for px in x..x2 {
                self.blend_pixel(px, py, col);
            }
        }
    }

    /// Fills every pixel whose center lies inside the circle.
    pub fn fill_circle(&mut self, cx: f32, cy: f32, radius: f32, col: Rgba) {
        let x0 = (cx - radius).floor().max(0.0) as u32;
        let y0 = (cy - radius).floor().max(0.0) as u32;
        let x1 = ((cx + radius).ceil() as u32).min(self.width);
        let y1 = ((cy + radius).ceil() as u32).min(self.height);
        let r2 = radius * radius;
        for py in y0..y1 {
            for px in x0..x1 {
                let dx = px as f32 + 0.5 - cx;
                let dy = py as f32 + 0.5 - cy;
                if dx * dx + dy * dy <= r2 {
                    self.blend_pixel(px, py, col);
                }
            }
        }
    }
}

fn fill_cell(frame: &mut Frame, c: Cell, tile: u32, col: Rgba) {
    frame.fill_rect(c.x as u32 * tile, c.y as u32 * tile, tile, tile, col);
}

fn fill_cell_circle(frame: &mut Frame, c: Cell, tile: u32, col: Rgba) {
    let radius = tile as f32 / 2.0;
    let cx = c.x as f32 * tile as f32 + radius;
    let cy = c.y as f32 * tile as f32 + radius;
    frame.fill_circle(cx, cy, radius, col);
}

/// Draws the board: background, food square, then the snake as circles with
/// the head in its own color.
pub fn render(game: &Game, palette: &Palette, tile: u32, frame: &mut Frame) {
    frame.clear(palette.background);
    fill_cell(frame, game.food, tile, palette.food);

    for (i, &pos) in game.snake.iter().enumerate() {
        let col = if i == 0 { palette.head } else { palette.body };
        fill_cell_circle(frame, pos, tile, col);
    }
}

pub fn render_overlay(palette: &Palette, frame: &mut Frame) {
    let (w, h) = (frame.width(), frame.height());
    frame.fill_rect(0, 0, w, h, palette.overlay);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::FoodPolicy;
    use crate::grid::Board;
    use rand::SeedableRng;
    use rand::rngs::SmallRng;
    use std::collections::VecDeque;

    const TILE: u32 = 32;

    fn buffer() -> Vec<u8> {
        vec![0; 640 * 480 * 4]
    }

    fn center_of(c: Cell) -> (u32, u32) {
        (c.x as u32 * TILE + TILE / 2, c.y as u32 * TILE + TILE / 2)
    }

    fn sample_game() -> Game {
        let mut rng = SmallRng::seed_from_u64(1);
        let mut g = Game::new(Board::new(20, 15), FoodPolicy::Anywhere, &mut rng);
        g.snake = VecDeque::from(vec![Cell::new(5, 5), Cell::new(4, 5), Cell::new(3, 5)]);
        g.food = Cell::new(12, 9);
        g
    }

    #[test]
    fn draws_food_and_snake_over_background() {
        let palette = Palette::default();
        let game = sample_game();
        let mut buf = buffer();
        let mut frame = Frame::new(&mut buf, 640, 480);
        render(&game, &palette, TILE, &mut frame);

        assert_eq!(frame.pixel(0, 479), palette.background);
        // Food fills its whole tile, corners included.
        assert_eq!(frame.pixel(12 * TILE, 9 * TILE), palette.food);
        assert_eq!(frame.pixel(13 * TILE - 1, 10 * TILE - 1), palette.food);

        let (hx, hy) = center_of(Cell::new(5, 5));
        assert_eq!(frame.pixel(hx, hy), palette.head);
        for c in [Cell::new(4, 5), Cell::new(3, 5)] {
            let (x, y) = center_of(c);
            assert_eq!(frame.pixel(x, y), palette.body);
        }
        // Snake cells are circles: tile corners stay background.
        assert_eq!(frame.pixel(5 * TILE, 5 * TILE), palette.background);
    }

    #[test]
    fn overlay_darkens_every_pixel() {
        let palette = Palette::default();
        let game = sample_game();
        let mut buf = buffer();
        let mut frame = Frame::new(&mut buf, 640, 480);
        render(&game, &palette, TILE, &mut frame);
        let before = frame.pixel(0, 0);
        render_overlay(&palette, &mut frame);
        let after = frame.pixel(0, 0);
        assert!(after[1] < before[1]);
        assert_eq!(after[3], 255);
        // 100 * (255 - 85) / 255
        assert_eq!(after, [0, 66, 0, 255]);
    }

    #[test]
    fn drawing_is_clipped_to_the_frame() {
        let mut buf = vec![0; 4 * 4 * 4];
        let mut frame = Frame::new(&mut buf, 4, 4);
        frame.fill_rect(2, 2, 10, 10, [9, 9, 9, 255]);
        frame.fill_circle(3.0, 3.0, 5.0, [1, 1, 1, 255]);
        frame.blend_pixel(99, 0, [7, 7, 7, 255]);
        assert_eq!(frame.pixel(3, 3), [1, 1, 1, 255]);
    }
}
