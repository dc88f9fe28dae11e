//! The eight resize handles of a crop rectangle.

use daylens_input::{Point, Rect};

/// Handle positions, indexed 0-7: corners first, then edge midpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum HandleIndex {
    TopLeft = 0,
    TopRight = 1,
    BottomLeft = 2,
    BottomRight = 3,
    Top = 4,
    Bottom = 5,
    Left = 6,
    Right = 7,
}

impl HandleIndex {
    /// All handles in index order; earlier entries win overlapping hit tests.
    pub const ALL: [HandleIndex; 8] = [
        HandleIndex::TopLeft,
        HandleIndex::TopRight,
        HandleIndex::BottomLeft,
        HandleIndex::BottomRight,
        HandleIndex::Top,
        HandleIndex::Bottom,
        HandleIndex::Left,
        HandleIndex::Right,
    ];

    pub fn from_index(index: u8) -> Option<HandleIndex> {
        Self::ALL.get(index as usize).copied()
    }

    pub fn index(self) -> u8 {
        self as u8
    }

    pub fn is_corner(self) -> bool {
        self.index() < 4
    }

    /// Where this handle sits on `rect`.
    pub fn position(self, rect: &Rect) -> Point {
        let mid_x = rect.x + rect.width / 2.0;
        let mid_y = rect.y + rect.height / 2.0;
        match self {
            HandleIndex::TopLeft => Point::new(rect.x, rect.y),
            HandleIndex::TopRight => Point::new(rect.right(), rect.y),
            HandleIndex::BottomLeft => Point::new(rect.x, rect.bottom()),
            HandleIndex::BottomRight => Point::new(rect.right(), rect.bottom()),
            HandleIndex::Top => Point::new(mid_x, rect.y),
            HandleIndex::Bottom => Point::new(mid_x, rect.bottom()),
            HandleIndex::Left => Point::new(rect.x, mid_y),
            HandleIndex::Right => Point::new(rect.right(), mid_y),
        }
    }

    /// The handle on the opposite side, whose position stays fixed while this one is dragged.
    pub fn opposite(self) -> HandleIndex {
        match self {
            HandleIndex::TopLeft => HandleIndex::BottomRight,
            HandleIndex::TopRight => HandleIndex::BottomLeft,
            HandleIndex::BottomLeft => HandleIndex::TopRight,
            HandleIndex::BottomRight => HandleIndex::TopLeft,
            HandleIndex::Top => HandleIndex::Bottom,
            HandleIndex::Bottom => HandleIndex::Top,
            HandleIndex::Left => HandleIndex::Right,
            HandleIndex::Right => HandleIndex::Left,
        }
    }

    /// Fixed anchor point of a resize driven by this handle.
    pub fn anchor(self, rect: &Rect) -> Point {
        self.opposite().position(rect)
    }
}

/// First handle whose hit box contains `point`.
///
/// The hit box is `handle_size` square, centered on the handle, grown by
/// `tolerance` on every side.
pub fn hit_test_handles(rect: &Rect, point: Point, handle_size: f32, tolerance: f32) -> Option<HandleIndex> {
    let reach = handle_size / 2.0 + tolerance;
    HandleIndex::ALL.into_iter().find(|handle| {
        let p = handle.position(rect);
        (point.x - p.x).abs() <= reach && (point.y - p.y).abs() <= reach
    })
}
