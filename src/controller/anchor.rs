//! Provides [`WindowAnchor`], the nine screen-space placements a window snaps between.

use bevy_reflect::prelude::*;

/// Horizontal offsets beyond this distance from the midpoint move the anchor out of the center
/// column.
pub const X_THRESHOLD: f32 = 0.2;
/// Vertical offsets beyond this distance from the midpoint move the anchor out of the middle row.
pub const Y_THRESHOLD: f32 = 0.15;

/// A row of the 3x3 anchor grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Reflect)]
pub enum AnchorRow {
    /// Above the view axis.
    Top,
    /// On the view axis.
    Middle,
    /// Below the view axis.
    Bottom,
}

impl AnchorRow {
    /// Pick the row for a vertical offset centered on zero. Offsets exactly at the threshold stay
    /// in the middle row.
    pub fn from_vertical_offset(y: f32) -> Self {
        if y > Y_THRESHOLD {
            Self::Top
        } else if y < -Y_THRESHOLD {
            Self::Bottom
        } else {
            Self::Middle
        }
    }
}

/// A column of the 3x3 anchor grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Reflect)]
pub enum AnchorColumn {
    /// Left of the view axis.
    Left,
    /// On the view axis.
    Center,
    /// Right of the view axis.
    Right,
}

impl AnchorColumn {
    /// Pick the column for a horizontal offset centered on zero. Offsets exactly at the threshold
    /// stay in the center column.
    pub fn from_horizontal_offset(x: f32) -> Self {
        if x > X_THRESHOLD {
            Self::Right
        } else if x < -X_THRESHOLD {
            Self::Left
        } else {
            Self::Center
        }
    }
}

/// Where the window is parked within the viewer's field, as a cell of a 3x3 grid.
///
/// The anchor is normally derived from the window offset by
/// [`FollowWindow::set_horizontal_offset`](crate::controller::component::FollowWindow::set_horizontal_offset)
/// and
/// [`FollowWindow::set_vertical_offset`](crate::controller::component::FollowWindow::set_vertical_offset).
/// Each axis only ever changes its own half of the anchor, so the grid snaps per axis instead of
/// drifting as both offsets move.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Reflect)]
pub enum WindowAnchor {
    TopLeft,
    TopCenter,
    TopRight,
    MiddleLeft,
    #[default]
    MiddleCenter,
    MiddleRight,
    BottomLeft,
    BottomCenter,
    BottomRight,
}

impl WindowAnchor {
    /// Every anchor, in row-major order.
    pub const ALL: [Self; 9] = [
        Self::TopLeft,
        Self::TopCenter,
        Self::TopRight,
        Self::MiddleLeft,
        Self::MiddleCenter,
        Self::MiddleRight,
        Self::BottomLeft,
        Self::BottomCenter,
        Self::BottomRight,
    ];

    /// The grid row of this anchor.
    pub fn row(self) -> AnchorRow {
        match self {
            Self::TopLeft | Self::TopCenter | Self::TopRight => AnchorRow::Top,
            Self::MiddleLeft | Self::MiddleCenter | Self::MiddleRight => AnchorRow::Middle,
            Self::BottomLeft | Self::BottomCenter | Self::BottomRight => AnchorRow::Bottom,
        }
    }

    /// The grid column of this anchor.
    pub fn column(self) -> AnchorColumn {
        match self {
            Self::TopLeft | Self::MiddleLeft | Self::BottomLeft => AnchorColumn::Left,
            Self::TopCenter | Self::MiddleCenter | Self::BottomCenter => AnchorColumn::Center,
            Self::TopRight | Self::MiddleRight | Self::BottomRight => AnchorColumn::Right,
        }
    }

    /// The anchor at the given grid cell.
    pub fn from_row_column(row: AnchorRow, column: AnchorColumn) -> Self {
        use AnchorColumn::*;
        use AnchorRow::*;
        match (row, column) {
            (Top, Left) => Self::TopLeft,
            (Top, Center) => Self::TopCenter,
            (Top, Right) => Self::TopRight,
            (Middle, Left) => Self::MiddleLeft,
            (Middle, Center) => Self::MiddleCenter,
            (Middle, Right) => Self::MiddleRight,
            (Bottom, Left) => Self::BottomLeft,
            (Bottom, Center) => Self::BottomCenter,
            (Bottom, Right) => Self::BottomRight,
        }
    }

    /// Same row, different column.
    pub fn with_column(self, column: AnchorColumn) -> Self {
        Self::from_row_column(self.row(), column)
    }

    /// Same column, different row.
    pub fn with_row(self, row: AnchorRow) -> Self {
        Self::from_row_column(row, self.column())
    }

    /// Resolve a new horizontal offset (centered on zero) against this anchor, keeping its row.
    pub fn resolve_horizontal(self, x: f32) -> Self {
        self.with_column(AnchorColumn::from_horizontal_offset(x))
    }

    /// Resolve a new vertical offset (centered on zero) against this anchor, keeping its column.
    pub fn resolve_vertical(self, y: f32) -> Self {
        self.with_row(AnchorRow::from_vertical_offset(y))
    }
}
