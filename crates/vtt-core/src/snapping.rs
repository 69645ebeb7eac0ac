//! Grid snapping
//!
//! Snap modes are hierarchical: every mode's targets include the targets of
//! the coarser modes before it.
//! - Free: no snapping
//! - Full: cell centers only
//! - Half: cell corners, edge midpoints and centers (1/2 cell lattice)
//! - Quarter: the 1/4 cell lattice
//! - Micro: the 1/8 cell lattice

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::grid::GridConfig;

/// Precision tier used when rounding a point to the grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum SnapMode {
    Free,
    Full,
    #[default]
    Half,
    Quarter,
    Micro,
}

impl SnapMode {
    /// Lattice step as a fraction of a cell, for lattice-based modes
    fn lattice_step(&self) -> Option<f32> {
        match self {
            SnapMode::Free | SnapMode::Full => None,
            SnapMode::Half => Some(0.5),
            SnapMode::Quarter => Some(0.25),
            SnapMode::Micro => Some(0.125),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            SnapMode::Free => "Free",
            SnapMode::Full => "Full",
            SnapMode::Half => "Half",
            SnapMode::Quarter => "Quarter",
            SnapMode::Micro => "Micro",
        }
    }
}

/// Keyboard modifier state at the time of a pointer or key event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct KeyModifiers {
    pub alt: bool,
    pub ctrl: bool,
    pub shift: bool,
    /// Cmd on macOS, the Windows key elsewhere
    pub meta: bool,
}

impl KeyModifiers {
    pub const NONE: Self = Self {
        alt: false,
        ctrl: false,
        shift: false,
        meta: false,
    };

    pub fn alt() -> Self {
        Self {
            alt: true,
            ..Self::NONE
        }
    }

    pub fn ctrl() -> Self {
        Self {
            ctrl: true,
            ..Self::NONE
        }
    }

    pub fn shift() -> Self {
        Self {
            shift: true,
            ..Self::NONE
        }
    }

    pub fn alt_ctrl() -> Self {
        Self {
            alt: true,
            ctrl: true,
            ..Self::NONE
        }
    }

    /// Ctrl or Cmd, the platform "toggle selection" modifier
    pub fn command(&self) -> bool {
        self.ctrl || self.meta
    }
}

/// Snap modes selected by modifier keys
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SnapConfig {
    /// Mode with no modifiers held
    pub default: SnapMode,
    /// Mode with Alt+Ctrl held
    pub precise: SnapMode,
}

/// Walls and regions: half-cell by default, quarter-cell with Alt+Ctrl
pub const WALL_SNAP: SnapConfig = SnapConfig {
    default: SnapMode::Half,
    precise: SnapMode::Quarter,
};

/// Assets: cell centers by default, half-cell with Alt+Ctrl
pub const ASSET_SNAP: SnapConfig = SnapConfig {
    default: SnapMode::Full,
    precise: SnapMode::Half,
};

impl Default for SnapConfig {
    fn default() -> Self {
        WALL_SNAP
    }
}

/// Resolve the snap mode from modifier keys.
///
/// Alt+Ctrl selects the precise mode, Alt alone disables snapping, anything
/// else uses the default mode.
pub fn resolve_snap_mode(modifiers: KeyModifiers, config: &SnapConfig) -> SnapMode {
    match (modifiers.alt, modifiers.ctrl) {
        (true, true) => config.precise,
        (true, false) => SnapMode::Free,
        _ => config.default,
    }
}

/// Snap a world position to the nearest grid target for the given mode.
///
/// With a tolerance, targets farther away than the tolerance are ignored and
/// the point is returned unchanged.
pub fn snap_to_nearest(
    point: Vec2,
    grid: &GridConfig,
    mode: SnapMode,
    tolerance: Option<f32>,
) -> Vec2 {
    if mode == SnapMode::Free || !grid.snap || grid.is_degenerate() || !point.is_finite() {
        return point;
    }

    let local = (point - grid.offset) / grid.cell_size;
    let snapped_local = match mode.lattice_step() {
        Some(step) => (local / step).round() * step,
        // Nearest cell center is the center of the containing cell
        None => local.floor() + Vec2::splat(0.5),
    };
    let target = grid.offset + snapped_local * grid.cell_size;

    match tolerance {
        Some(radius) if target.distance(point) > radius => point,
        _ => target,
    }
}

/// Snap a world position to the nearest grid target, without a tolerance
pub fn snap(point: Vec2, grid: &GridConfig, mode: SnapMode) -> Vec2 {
    snap_to_nearest(point, grid, mode, None)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn grid() -> GridConfig {
        GridConfig::square(50.0)
    }

    #[test]
    fn test_resolve_snap_mode() {
        assert_eq!(resolve_snap_mode(KeyModifiers::NONE, &WALL_SNAP), SnapMode::Half);
        assert_eq!(resolve_snap_mode(KeyModifiers::alt(), &WALL_SNAP), SnapMode::Free);
        assert_eq!(
            resolve_snap_mode(KeyModifiers::alt_ctrl(), &WALL_SNAP),
            SnapMode::Quarter
        );
        assert_eq!(resolve_snap_mode(KeyModifiers::ctrl(), &WALL_SNAP), SnapMode::Half);
        assert_eq!(
            resolve_snap_mode(KeyModifiers::alt_ctrl(), &ASSET_SNAP),
            SnapMode::Half
        );
    }

    #[test]
    fn test_free_mode_and_disabled_grid_pass_through() {
        let p = Vec2::new(13.3, 47.1);
        assert_eq!(snap(p, &grid(), SnapMode::Free), p);
        assert_eq!(snap(p, &grid().with_snap(false), SnapMode::Half), p);
        assert_eq!(snap(p, &GridConfig::square(0.0), SnapMode::Half), p);
    }

    #[test]
    fn test_full_snaps_to_cell_center() {
        let p = snap(Vec2::new(3.0, 48.0), &grid(), SnapMode::Full);
        assert_eq!(p, Vec2::new(25.0, 25.0));
        let p = snap(Vec2::new(-3.0, 51.0), &grid(), SnapMode::Full);
        assert_eq!(p, Vec2::new(-25.0, 75.0));
    }

    #[test]
    fn test_hierarchical_lattices() {
        let p = Vec2::new(14.0, 61.0);
        assert_eq!(snap(p, &grid(), SnapMode::Half), Vec2::new(25.0, 50.0));
        assert_eq!(snap(p, &grid(), SnapMode::Quarter), Vec2::new(12.5, 62.5));
        let micro = snap(p, &grid(), SnapMode::Micro);
        assert_relative_eq!(micro.x, 12.5);
        assert_relative_eq!(micro.y, 62.5);
        let micro = snap(Vec2::new(7.0, 0.0), &grid(), SnapMode::Micro);
        assert_relative_eq!(micro.x, 6.25);
    }

    #[test]
    fn test_offset_grid() {
        let grid = grid().with_offset(Vec2::new(10.0, 10.0));
        assert_eq!(snap(Vec2::new(12.0, 58.0), &grid, SnapMode::Half), Vec2::new(10.0, 60.0));
    }

    #[test]
    fn test_tolerance_rejects_far_targets() {
        let p = Vec2::new(12.0, 12.0);
        assert_eq!(snap_to_nearest(p, &grid(), SnapMode::Half, Some(10.0)), p);
        assert_eq!(
            snap_to_nearest(p, &grid(), SnapMode::Half, Some(50.0)),
            Vec2::ZERO
        );
    }
}
