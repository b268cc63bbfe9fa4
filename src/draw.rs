//! Line and triangle outlines.

use crate::error::BitmapError;
use crate::image::Image;
use crate::pixel::Color;

fn check_point(image: &Image, x: u32, y: u32) -> Result<(), BitmapError> {
    if x >= image.width() || y >= image.height() {
        return Err(BitmapError::OutOfBounds {
            x: i64::from(x),
            y: i64::from(y),
            width: image.width(),
            height: image.height(),
        });
    }
    Ok(())
}

/// Bresenham line from (x0, y0) to (x1, y1), both endpoints included.
pub fn draw_line(
    image: &mut Image,
    x0: u32,
    y0: u32,
    x1: u32,
    y1: u32,
    color: Color,
) -> Result<(), BitmapError> {
    check_point(image, x0, y0)?;
    check_point(image, x1, y1)?;

    let (mut x, mut y) = (i64::from(x0), i64::from(y0));
    let (x1, y1) = (i64::from(x1), i64::from(y1));
    let dx = (x1 - x).abs();
    let dy = -(y1 - y).abs();
    let sx = if x < x1 { 1 } else { -1 };
    let sy = if y < y1 { 1 } else { -1 };
    let mut err = dx + dy;

    loop {
        // Every visited point lies within the bounding box of two checked endpoints.
        image.set_pixel(x as u32, y as u32, color)?;
        if x == x1 && y == y1 {
            return Ok(());
        }
        let e2 = 2 * err;
        if e2 >= dy {
            err += dy;
            x += sx;
        }
        if e2 <= dx {
            err += dx;
            y += sy;
        }
    }
}

/// Outline of the triangle with corners `a`, `b`, `c`.
pub fn draw_triangle(
    image: &mut Image,
    a: (u32, u32),
    b: (u32, u32),
    c: (u32, u32),
    color: Color,
) -> Result<(), BitmapError> {
    for (x, y) in [a, b, c] {
        check_point(image, x, y)?;
    }
    draw_line(image, a.0, a.1, b.0, b.1, color)?;
    draw_line(image, b.0, b.1, c.0, c.1, color)?;
    draw_line(image, c.0, c.1, a.0, a.1, color)
}

#[cfg(test)]
mod tests {
    use super::*;

    const INK: Color = [255, 255, 255, 255];

    fn inked(img: &Image) -> usize {
        img.as_bytes()
            .chunks_exact(4)
            .filter(|px| px[0] == 255)
            .count()
    }

    #[test]
    fn horizontal_and_diagonal_lines() {
        let mut img = Image::new(5, 5, [0, 0, 0, 255]).unwrap();
        draw_line(&mut img, 0, 0, 4, 0, INK).unwrap();
        assert_eq!(inked(&img), 5);
        draw_line(&mut img, 4, 4, 0, 0, INK).unwrap();
        assert_eq!(inked(&img), 9);
        assert_eq!(img.pixel(2, 2).unwrap(), INK);
    }

    #[test]
    fn single_point_line() {
        let mut img = Image::new(3, 3, [0; 4]).unwrap();
        draw_line(&mut img, 1, 1, 1, 1, INK).unwrap();
        assert_eq!(inked(&img), 1);
    }

    #[test]
    fn endpoints_are_bounds_checked() {
        let mut img = Image::new(3, 3, [0; 4]).unwrap();
        assert!(matches!(
            draw_line(&mut img, 0, 0, 3, 0, INK),
            Err(BitmapError::OutOfBounds { .. })
        ));
        assert_eq!(inked(&img), 0);
        assert!(draw_triangle(&mut img, (0, 0), (2, 0), (0, 5), INK).is_err());
        assert_eq!(inked(&img), 0);
    }

    #[test]
    fn triangle_outline() {
        let mut img = Image::new(4, 4, [0, 0, 0, 255]).unwrap();
        draw_triangle(&mut img, (0, 0), (3, 0), (0, 3), INK).unwrap();
        assert_eq!(img.pixel(3, 0).unwrap(), INK);
        assert_eq!(img.pixel(0, 3).unwrap(), INK);
        assert_eq!(img.pixel(1, 2).unwrap(), INK);
        assert_eq!(img.pixel(1, 1).unwrap(), [0, 0, 0, 255]);
    }
}
