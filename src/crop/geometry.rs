//! Crop rectangle geometry for move, resize and draw.
//!
//! Every function returns a rectangle that lies inside `image` (the
//! displayed, contain-fit image rectangle) with width and height of at
//! least [`MIN_SIZE`].

use super::handles::HandleIndex;
use super::AspectLock;
use crate::constants::crop::MIN_SIZE;
use daylens_input::{Point, Rect};

/// Move `original` so its origin sits at `pointer - grab_offset`, staying inside `image`.
pub fn move_rect(original: &Rect, grab_offset: Point, pointer: Point, image: &Rect) -> Rect {
    let origin = pointer - grab_offset;
    keep_inside(Rect::new(origin.x, origin.y, original.width, original.height), image)
}

/// Resize `original` by dragging `handle` by `delta` from where it was grabbed.
pub fn resize_rect(original: &Rect, handle: HandleIndex, delta: Point, aspect: AspectLock, image: &Rect) -> Rect {
    match aspect.ratio() {
        Some(ratio) => resize_locked(original, handle, delta, ratio, image),
        None => resize_free(original, handle, delta, image),
    }
}

/// Free-form resize: each handle moves its own edge(s), then the result is intersected with `image`.
pub fn resize_free(original: &Rect, handle: HandleIndex, delta: Point, image: &Rect) -> Rect {
    let (width, height) = dragged_size(original, handle, delta);
    let x = if moves_left_edge(handle) {
        original.right() - width
    } else {
        original.x
    };
    let y = if moves_top_edge(handle) {
        original.bottom() - height
    } else {
        original.y
    };
    clamp_to_image(Rect::new(x, y, width, height), image)
}

/// Aspect-locked resize around the anchor opposite `handle`.
///
/// The anchor is taken from `original` and is reproduced exactly in the
/// result. The size is limited by the room between the anchor and the image
/// edges, and both dimensions are derived together so `width / height == ratio`.
pub fn resize_locked(original: &Rect, handle: HandleIndex, delta: Point, ratio: f32, image: &Rect) -> Rect {
    let (raw_w, raw_h) = dragged_size(original, handle, delta);
    let anchor = handle.anchor(original);

    let (width, height) = match handle {
        HandleIndex::Top | HandleIndex::Bottom => (raw_h * ratio, raw_h),
        HandleIndex::Left | HandleIndex::Right => (raw_w, raw_w / ratio),
        _ => {
            // Corners follow whichever dimension the drag changed more
            if (raw_w - original.width).abs() >= (raw_h - original.height).abs() {
                (raw_w, raw_w / ratio)
            } else {
                (raw_h * ratio, raw_h)
            }
        }
    };

    let (avail_w, avail_h) = available_space(handle, anchor, image);
    let (width, height) = fit_locked(width, height, ratio, avail_w, avail_h);

    let (x, y) = match handle {
        HandleIndex::TopLeft => (anchor.x - width, anchor.y - height),
        HandleIndex::TopRight => (anchor.x, anchor.y - height),
        HandleIndex::BottomLeft => (anchor.x - width, anchor.y),
        HandleIndex::BottomRight => (anchor.x, anchor.y),
        HandleIndex::Top => (anchor.x - width / 2.0, anchor.y - height),
        HandleIndex::Bottom => (anchor.x - width / 2.0, anchor.y),
        HandleIndex::Left => (anchor.x - width, anchor.y - height / 2.0),
        HandleIndex::Right => (anchor.x, anchor.y - height / 2.0),
    };
    let rect = Rect::new(x.max(image.x), y.max(image.y), width, height);
    if image.contains_rect(&rect) {
        rect
    } else {
        // Only reachable when the minimum size does not fit next to the anchor
        keep_inside(rect, image)
    }
}

/// New selection spanning `start` to `current`.
///
/// With an aspect lock the larger drag delta drives the size, the rectangle
/// grows away from `start` in the drag direction and shrinks (rather than
/// being cut) where it would leave the image.
pub fn draw_rect(start: Point, current: Point, aspect: AspectLock, image: &Rect) -> Rect {
    let start = clamp_point(start, image);
    let Some(ratio) = aspect.ratio() else {
        return clamp_to_image(Rect::from_corners(start, current), image);
    };

    let dx = current.x - start.x;
    let dy = current.y - start.y;
    let (width, height) = if dx.abs() >= dy.abs() {
        (dx.abs(), dx.abs() / ratio)
    } else {
        (dy.abs() * ratio, dy.abs())
    };

    let avail_w = if dx < 0.0 { start.x - image.x } else { image.right() - start.x };
    let avail_h = if dy < 0.0 { start.y - image.y } else { image.bottom() - start.y };
    let (width, height) = fit_locked(width, height, ratio, avail_w, avail_h);

    let x = if dx < 0.0 { start.x - width } else { start.x };
    let y = if dy < 0.0 { start.y - height } else { start.y };
    keep_inside(Rect::new(x, y, width, height), image)
}

/// Largest rectangle of `ratio` inside `image`, centered on `rect`'s center where possible.
pub fn fit_aspect(rect: &Rect, ratio: f32, image: &Rect) -> Rect {
    let width = image.width.min(image.height * ratio).max(MIN_SIZE);
    let height = (width / ratio).max(MIN_SIZE);
    let center = rect.center();
    keep_inside(
        Rect::new(center.x - width / 2.0, center.y - height / 2.0, width, height),
        image,
    )
}

/// Intersect with `image`, flooring width and height at [`MIN_SIZE`].
pub fn clamp_to_image(rect: Rect, image: &Rect) -> Rect {
    if image.contains_rect(&rect) && rect.width >= MIN_SIZE && rect.height >= MIN_SIZE {
        return rect;
    }
    let mut x = rect.x.max(image.x);
    let mut y = rect.y.max(image.y);
    let mut width = rect.right().min(image.right()) - x;
    let mut height = rect.bottom().min(image.bottom()) - y;
    if width < MIN_SIZE {
        width = MIN_SIZE;
        x = x.min(image.right() - MIN_SIZE).max(image.x);
    }
    if height < MIN_SIZE {
        height = MIN_SIZE;
        y = y.min(image.bottom() - MIN_SIZE).max(image.y);
    }
    Rect::new(x, y, width, height)
}

/// Shift (never resize) `rect` so it lies inside `image` where it fits.
fn keep_inside(rect: Rect, image: &Rect) -> Rect {
    let x = rect.x.min(image.right() - rect.width).max(image.x);
    let y = rect.y.min(image.bottom() - rect.height).max(image.y);
    Rect::new(x, y, rect.width, rect.height)
}

fn clamp_point(point: Point, image: &Rect) -> Point {
    Point::new(
        point.x.min(image.right()).max(image.x),
        point.y.min(image.bottom()).max(image.y),
    )
}

/// Width and height after moving the handle's edge(s) by `delta`, floored at [`MIN_SIZE`].
fn dragged_size(original: &Rect, handle: HandleIndex, delta: Point) -> (f32, f32) {
    let (dw, dh) = match handle {
        HandleIndex::TopLeft => (-delta.x, -delta.y),
        HandleIndex::TopRight => (delta.x, -delta.y),
        HandleIndex::BottomLeft => (-delta.x, delta.y),
        HandleIndex::BottomRight => (delta.x, delta.y),
        HandleIndex::Top => (0.0, -delta.y),
        HandleIndex::Bottom => (0.0, delta.y),
        HandleIndex::Left => (-delta.x, 0.0),
        HandleIndex::Right => (delta.x, 0.0),
    };
    (
        (original.width + dw).max(MIN_SIZE),
        (original.height + dh).max(MIN_SIZE),
    )
}

fn moves_left_edge(handle: HandleIndex) -> bool {
    matches!(
        handle,
        HandleIndex::TopLeft | HandleIndex::BottomLeft | HandleIndex::Left
    )
}

fn moves_top_edge(handle: HandleIndex) -> bool {
    matches!(
        handle,
        HandleIndex::TopLeft | HandleIndex::TopRight | HandleIndex::Top
    )
}

/// Room between the anchor and the image edges in the directions the rect grows.
///
/// Edge handles keep the rect centered on the anchor along the edge, so the
/// parallel room is twice the distance to the nearer image edge.
fn available_space(handle: HandleIndex, anchor: Point, image: &Rect) -> (f32, f32) {
    let left = anchor.x - image.x;
    let right = image.right() - anchor.x;
    let up = anchor.y - image.y;
    let down = image.bottom() - anchor.y;
    match handle {
        HandleIndex::TopLeft => (left, up),
        HandleIndex::TopRight => (right, up),
        HandleIndex::BottomLeft => (left, down),
        HandleIndex::BottomRight => (right, down),
        HandleIndex::Top => (2.0 * left.min(right), up),
        HandleIndex::Bottom => (2.0 * left.min(right), down),
        HandleIndex::Left => (left, 2.0 * up.min(down)),
        HandleIndex::Right => (right, 2.0 * up.min(down)),
    }
}

/// Limit a ratio-locked size to the available room, re-deriving both dimensions from the ratio.
fn fit_locked(width: f32, height: f32, ratio: f32, avail_w: f32, avail_h: f32) -> (f32, f32) {
    let max_w = avail_w.min(avail_h * ratio).max(0.0);
    let (mut width, mut height) = if width > max_w {
        (max_w, max_w / ratio)
    } else {
        (width, height)
    };
    if height < MIN_SIZE {
        height = MIN_SIZE;
        width = height * ratio;
    }
    if width < MIN_SIZE {
        width = MIN_SIZE;
        height = width / ratio;
    }
    (width, height)
}

#[cfg(test)]
mod tests {
    use super::*;

    const IMAGE: Rect = Rect {
        x: 0.0,
        y: 0.0,
        width: 200.0,
        height: 200.0,
    };
    const RECT: Rect = Rect {
        x: 10.0,
        y: 10.0,
        width: 100.0,
        height: 50.0,
    };

    fn assert_inside(rect: &Rect, image: &Rect) {
        assert!(rect.x >= image.x, "{:?} leaves {:?}", rect, image);
        assert!(rect.y >= image.y, "{:?} leaves {:?}", rect, image);
        assert!(rect.right() <= image.right() + 1e-3, "{:?} leaves {:?}", rect, image);
        assert!(rect.bottom() <= image.bottom() + 1e-3, "{:?} leaves {:?}", rect, image);
        assert!(rect.width >= MIN_SIZE && rect.height >= MIN_SIZE);
    }

    #[test]
    fn test_locked_bottom_right_scenario() {
        let rect = resize_locked(&RECT, HandleIndex::BottomRight, Point::new(40.0, 5.0), 2.0, &IMAGE);
        assert_eq!(rect, Rect::new(10.0, 10.0, 140.0, 70.0));
    }

    #[test]
    fn test_locked_height_dominant_corner() {
        let rect = resize_locked(&RECT, HandleIndex::BottomRight, Point::new(2.0, 30.0), 2.0, &IMAGE);
        assert_eq!(rect, Rect::new(10.0, 10.0, 160.0, 80.0));
    }

    #[test]
    fn test_locked_clamps_to_available_space() {
        // Width wants 300 but only 190 px remain right of the anchor
        let rect = resize_locked(&RECT, HandleIndex::BottomRight, Point::new(200.0, 0.0), 2.0, &IMAGE);
        assert_eq!(rect.origin(), Point::new(10.0, 10.0));
        assert_eq!(rect.width, 190.0);
        assert_eq!(rect.height, 95.0);
        assert_inside(&rect, &IMAGE);
    }

    #[test]
    fn test_locked_vertical_room_limits_width() {
        let rect = Rect::new(10.0, 120.0, 40.0, 20.0);
        let out = resize_locked(&rect, HandleIndex::BottomRight, Point::new(150.0, 0.0), 2.0, &IMAGE);
        // Only 80 px below the anchor: height 80, width 160
        assert_eq!(out, Rect::new(10.0, 120.0, 160.0, 80.0));
    }

    #[test]
    fn test_locked_top_left_keeps_bottom_right_anchor() {
        let rect = resize_locked(&RECT, HandleIndex::TopLeft, Point::new(-8.0, -1.0), 2.0, &IMAGE);
        assert_eq!(rect.right(), RECT.right());
        assert_eq!(rect.bottom(), RECT.bottom());
        // Width-dominant drag: 108 wide fits in the 110 px of room left of the anchor
        assert_eq!(rect.width, 108.0);
        assert_eq!(rect.height, 54.0);
        assert_inside(&rect, &IMAGE);
    }

    #[test]
    fn test_locked_edge_handles() {
        // Bottom edge: height authoritative, width derived, centered on the top-mid anchor
        let rect = resize_locked(&RECT, HandleIndex::Bottom, Point::new(0.0, 10.0), 2.0, &IMAGE);
        assert_eq!(rect, Rect::new(0.0, 10.0, 120.0, 60.0));

        // Right edge: width authoritative
        let rect = resize_locked(&RECT, HandleIndex::Right, Point::new(20.0, 0.0), 2.0, &IMAGE);
        assert_eq!(rect.width, 120.0);
        assert_eq!(rect.height, 60.0);
        assert_eq!(rect.x, 10.0);
        assert_eq!(rect.center().y, RECT.center().y);
    }

    #[test]
    fn test_locked_ratio_holds_for_all_handles() {
        let deltas = [
            Point::new(15.0, -7.0),
            Point::new(-40.0, 25.0),
            Point::new(300.0, 300.0),
            Point::new(-300.0, -300.0),
            Point::new(3.0, 90.0),
        ];
        for ratio in [0.5, 1.0, 4.0 / 5.0, 16.0 / 9.0, 2.0] {
            let original = fit_aspect(&Rect::new(50.0, 50.0, 60.0, 60.0), ratio, &Rect::new(0.0, 0.0, 120.0, 120.0));
            let original = Rect::new(original.x + 40.0, original.y + 40.0, original.width / 2.0, original.height / 2.0);
            for handle in HandleIndex::ALL {
                for delta in deltas {
                    let rect = resize_locked(&original, handle, delta, ratio, &IMAGE);
                    assert!(
                        (rect.width / rect.height - ratio).abs() < 1e-3,
                        "{:?} {:?} ratio {} -> {:?}",
                        handle,
                        delta,
                        ratio,
                        rect
                    );
                    assert_inside(&rect, &IMAGE);
                }
            }
        }
    }

    #[test]
    fn test_bottom_right_anchor_is_exact() {
        let originals = [RECT, Rect::new(12.25, 33.5, 70.125, 40.75), Rect::new(0.0, 0.0, 1.0, 1.0)];
        for original in originals {
            for delta in [Point::new(13.3, -2.7), Point::new(-500.0, 500.0), Point::new(1000.0, 7.0)] {
                for aspect in [AspectLock::Free, AspectLock::Ratio(1.5), AspectLock::SQUARE] {
                    let rect = resize_rect(&original, HandleIndex::BottomRight, delta, aspect, &IMAGE);
                    assert_eq!(rect.x, original.x);
                    assert_eq!(rect.y, original.y);
                }
            }
        }
    }

    #[test]
    fn test_free_resize_edges() {
        let rect = resize_free(&RECT, HandleIndex::Left, Point::new(20.0, 99.0), &IMAGE);
        assert_eq!(rect, Rect::new(30.0, 10.0, 80.0, 50.0));

        let rect = resize_free(&RECT, HandleIndex::Top, Point::new(0.0, -30.0), &IMAGE);
        // Clamped at the image top
        assert_eq!(rect, Rect::new(10.0, 0.0, 100.0, 60.0));
    }

    #[test]
    fn test_free_resize_floors_at_min_size() {
        let rect = resize_free(&RECT, HandleIndex::TopLeft, Point::new(500.0, 500.0), &IMAGE);
        assert_eq!(rect.width, MIN_SIZE);
        assert_eq!(rect.height, MIN_SIZE);
        assert_eq!(rect.right(), RECT.right());
        assert_eq!(rect.bottom(), RECT.bottom());
    }

    #[test]
    fn test_free_resize_stays_inside_image() {
        for handle in HandleIndex::ALL {
            for delta in [Point::new(-400.0, -400.0), Point::new(400.0, 400.0), Point::new(-400.0, 400.0)] {
                let rect = resize_free(&RECT, handle, delta, &IMAGE);
                assert_inside(&rect, &IMAGE);
            }
        }
    }

    #[test]
    fn test_move_clamps_inside_image() {
        let moved = move_rect(&RECT, Point::new(5.0, 5.0), Point::new(60.0, 40.0), &IMAGE);
        assert_eq!(moved, Rect::new(55.0, 35.0, 100.0, 50.0));

        let moved = move_rect(&RECT, Point::new(5.0, 5.0), Point::new(500.0, -50.0), &IMAGE);
        assert_eq!(moved, Rect::new(100.0, 0.0, 100.0, 50.0));
    }

    #[test]
    fn test_draw_free_flips_origin() {
        let rect = draw_rect(Point::new(100.0, 100.0), Point::new(40.0, 130.0), AspectLock::Free, &IMAGE);
        assert_eq!(rect, Rect::new(40.0, 100.0, 60.0, 30.0));

        // Dragging past the image is cut at its edge
        let rect = draw_rect(Point::new(100.0, 100.0), Point::new(260.0, -20.0), AspectLock::Free, &IMAGE);
        assert_eq!(rect, Rect::new(100.0, 0.0, 100.0, 100.0));
    }

    #[test]
    fn test_draw_locked_uses_larger_delta() {
        let rect = draw_rect(Point::new(100.0, 100.0), Point::new(40.0, 110.0), AspectLock::Ratio(2.0), &IMAGE);
        // |dx| = 60 drives: width 60, height 30, growing left and down
        assert_eq!(rect, Rect::new(40.0, 100.0, 60.0, 30.0));

        let rect = draw_rect(Point::new(100.0, 100.0), Point::new(110.0, 20.0), AspectLock::Ratio(0.5), &IMAGE);
        // |dy| = 80 drives: height 80, width 40, growing right and up
        assert_eq!(rect, Rect::new(100.0, 20.0, 40.0, 80.0));
    }

    #[test]
    fn test_draw_locked_shrinks_at_edges() {
        let rect = draw_rect(Point::new(150.0, 150.0), Point::new(400.0, 160.0), AspectLock::Ratio(1.0), &IMAGE);
        assert_eq!(rect, Rect::new(150.0, 150.0, 50.0, 50.0));
        assert_inside(&rect, &IMAGE);
    }

    #[test]
    fn test_fit_aspect() {
        let rect = fit_aspect(&Rect::new(0.0, 0.0, 200.0, 200.0), 2.0, &IMAGE);
        assert_eq!(rect, Rect::new(0.0, 50.0, 200.0, 100.0));

        // Off-center rects are shifted back inside
        let rect = fit_aspect(&Rect::new(180.0, 0.0, 20.0, 20.0), 1.0, &Rect::new(0.0, 0.0, 300.0, 100.0));
        assert_eq!(rect, Rect::new(140.0, 0.0, 100.0, 100.0));
    }
}
