//! Shape generation for 2D primitives

use super::vertex::{Color, Vertex};
use crate::sim::Rect;

/// Two triangles covering `rect`
pub fn rect(rect: &Rect, color: Color) -> [Vertex; 6] {
    let (l, r) = (rect.left(), rect.right());
    let (t, b) = (rect.top(), rect.bottom());
    [
        Vertex::new(l, t, color),
        Vertex::new(l, b, color),
        Vertex::new(r, t, color),
        Vertex::new(r, t, color),
        Vertex::new(l, b, color),
        Vertex::new(r, b, color),
    ]
}

/// Map field coordinates (origin top-left, y down) into NDC, letterboxing
/// the field into a viewport of `viewport` pixels.
pub fn field_to_ndc(x: f32, y: f32, field: (f32, f32), viewport: (u32, u32)) -> (f32, f32) {
    let (fw, fh) = field;
    let (vw, vh) = (viewport.0.max(1) as f32, viewport.1.max(1) as f32);

    // Uniform scale that fits the whole field
    let scale = (vw / fw).min(vh / fh);
    let sx = fw * scale / vw;
    let sy = fh * scale / vh;

    let nx = (x / fw) * 2.0 - 1.0;
    let ny = 1.0 - (y / fh) * 2.0;
    (nx * sx, ny * sy)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rect_covers_corners() {
        let verts = rect(&Rect::new(10.0, 20.0, 30.0, 40.0), [1.0; 4]);
        let xs: Vec<f32> = verts.iter().map(|v| v.position[0]).collect();
        let ys: Vec<f32> = verts.iter().map(|v| v.position[1]).collect();
        assert!(xs.iter().all(|&x| x == 10.0 || x == 40.0));
        assert!(ys.iter().all(|&y| y == 20.0 || y == 60.0));
    }

    #[test]
    fn test_field_to_ndc_square_viewport() {
        let field = (500.0, 500.0);
        assert_eq!(field_to_ndc(0.0, 0.0, field, (500, 500)), (-1.0, 1.0));
        assert_eq!(field_to_ndc(500.0, 500.0, field, (500, 500)), (1.0, -1.0));
        assert_eq!(field_to_ndc(250.0, 250.0, field, (1000, 1000)), (0.0, 0.0));
    }

    #[test]
    fn test_field_to_ndc_letterboxed() {
        // Twice as wide as tall: field occupies the middle half horizontally
        let (x, y) = field_to_ndc(0.0, 0.0, (500.0, 500.0), (1000, 500));
        assert!((x + 0.5).abs() < 1e-6);
        assert!((y - 1.0).abs() < 1e-6);
    }
}
