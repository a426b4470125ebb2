//! Gap compaction.
//!
//! Scales gaps down uniformly so that content fits the target canvas, without
//! ever going below the configured minimum gaps.

use log::debug;

use crate::config::{Gaps, Spacing};

/// Computes compacted gaps for content of the given flow-space extent.
///
/// The scale is the smaller of the two per-axis ratios of available canvas
/// (canvas minus padding on both sides) to needed extent, capped at `1.0`.
/// Each scaled gap is clamped to its configured minimum; the zone gap is left
/// unchanged. `vertical` maps the primary axis onto the canvas height.
///
/// # Examples
///
/// ```
/// # use stagehand::config::Spacing;
/// # use stagehand::layout::compact_gaps;
/// let spacing = Spacing::default();
/// let gaps = compact_gaps(&spacing, spacing.gaps(), 5000.0, 100.0, false);
/// assert_eq!(gaps.column, spacing.min_column_gap);
///
/// let roomy = compact_gaps(&spacing, spacing.gaps(), 100.0, 100.0, false);
/// assert_eq!(roomy, spacing.gaps());
/// ```
pub fn compact_gaps(
    spacing: &Spacing,
    gaps: Gaps,
    needed_primary: f32,
    needed_secondary: f32,
    vertical: bool,
) -> Gaps {
    let available_width = (spacing.canvas_width - 2.0 * spacing.padding).max(0.0);
    let available_height = (spacing.canvas_height - 2.0 * spacing.padding).max(0.0);
    let (available_primary, available_secondary) = if vertical {
        (available_height, available_width)
    } else {
        (available_width, available_height)
    };

    let ratio = axis_ratio(available_primary, needed_primary)
        .min(axis_ratio(available_secondary, needed_secondary))
        .min(1.0);
    debug!(ratio, needed_primary, needed_secondary; "Gap compaction ratio");

    if ratio >= 1.0 {
        return gaps;
    }

    Gaps {
        column: scale_gap(gaps.column, ratio, spacing.min_column_gap),
        row: scale_gap(gaps.row, ratio, spacing.min_row_gap),
        component: scale_gap(gaps.component, ratio, spacing.min_component_gap),
        zone: gaps.zone,
    }
}

fn axis_ratio(available: f32, needed: f32) -> f32 {
    if needed > 0.0 && needed.is_finite() {
        available / needed
    } else {
        1.0
    }
}

/// Scales `gap`, flooring at `minimum` unless the gap was already smaller.
fn scale_gap(gap: f32, ratio: f32, minimum: f32) -> f32 {
    (gap * ratio).max(minimum.min(gap))
}
