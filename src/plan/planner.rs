//! Recursive layout planning.
//!
//! The glyph run is placed once at depth 0, large and centered, then repeatedly shrunk by the
//! decay factor and faded by the falloff factor. Each child stays inside its parent's box and
//! drifts along a golden-angle spiral so copies are nested but not concentric.

use crate::foundation::core::{Point, Size, Vec2};
use crate::foundation::error::{CoghazError, CoghazResult};

/// Golden angle in radians; successive depths drift in directions that never line up.
const GOLDEN_ANGLE: f64 = 2.399_963_229_728_653;

/// Which tint a placement is painted with.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tone {
    /// The configured foreground color.
    Foreground,
    /// Channel-wise inverse of the foreground color.
    Inverse,
}

/// One stamped copy of the glyph run.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Placement {
    /// Multiplier from glyph-run pixels to canvas pixels.
    pub scale: f64,
    /// Center of the stamped run in canvas pixel coordinates.
    pub center: Point,
    /// Opacity in `[0, 1]`.
    pub opacity: f64,
    /// Recursion depth, 0 for the outermost copy.
    pub depth: u32,
    /// Tint selector.
    pub tone: Tone,
}

impl Placement {
    /// Size of the glyph run's bounds at this placement's scale.
    pub fn extent(&self, bounds: Size) -> Size {
        bounds * self.scale
    }
}

/// Placements ordered by increasing depth, which is also back-to-front paint order.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct PlacementPlan {
    placements: Vec<Placement>,
}

impl PlacementPlan {
    /// Wrap an already ordered placement list.
    pub fn from_placements(placements: Vec<Placement>) -> Self {
        Self { placements }
    }

    /// Number of placements.
    pub fn len(&self) -> usize {
        self.placements.len()
    }

    /// `true` when nothing will be painted.
    pub fn is_empty(&self) -> bool {
        self.placements.is_empty()
    }

    /// Placements in paint order.
    pub fn placements(&self) -> &[Placement] {
        &self.placements
    }

    /// Iterate placements in paint order.
    pub fn iter(&self) -> std::slice::Iter<'_, Placement> {
        self.placements.iter()
    }

    /// Deepest depth in the plan.
    pub fn max_depth(&self) -> Option<u32> {
        self.placements.last().map(|p| p.depth)
    }
}

impl<'a> IntoIterator for &'a PlacementPlan {
    type Item = &'a Placement;
    type IntoIter = std::slice::Iter<'a, Placement>;

    fn into_iter(self) -> Self::IntoIter {
        self.placements.iter()
    }
}

/// Constants that shape the recursion.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct PlanParams {
    /// Scale multiplier per depth, in `(0, 1)`.
    pub decay: f64,
    /// Opacity multiplier per depth, in `(0, 1]`.
    pub falloff: f64,
    /// Fraction of the shorter canvas side the depth-0 copy spans, in `(0, 1]`.
    pub fill: f64,
    /// How far a child drifts toward its parent's edge, in `[0, 1]`.
    pub jitter: f64,
    /// Stop once the scaled run's longest side is below this many pixels.
    pub min_extent_px: f64,
    /// Stop once opacity is below this.
    pub min_opacity: f64,
    /// Hard bound on depth.
    pub max_depth: u32,
    /// Paint odd depths with the inverse tint.
    pub alternate_tone: bool,
}

impl Default for PlanParams {
    fn default() -> Self {
        Self {
            decay: 0.6,
            falloff: 0.8,
            fill: 0.8,
            jitter: 0.35,
            min_extent_px: 2.0,
            min_opacity: 1.0 / 255.0,
            max_depth: 64,
            alternate_tone: true,
        }
    }
}

impl PlanParams {
    /// Reject parameters that would break strict shrinking or produce nonsense opacity.
    pub fn validate(&self) -> CoghazResult<()> {
        fn in_range(name: &str, v: f64, ok: bool) -> CoghazResult<()> {
            if v.is_finite() && ok {
                Ok(())
            } else {
                Err(CoghazError::configuration(format!(
                    "plan parameter {name} = {v} is out of range"
                )))
            }
        }
        in_range("decay", self.decay, self.decay > 0.0 && self.decay < 1.0)?;
        in_range(
            "falloff",
            self.falloff,
            self.falloff > 0.0 && self.falloff <= 1.0,
        )?;
        in_range("fill", self.fill, self.fill > 0.0 && self.fill <= 1.0)?;
        in_range(
            "jitter",
            self.jitter,
            (0.0..=1.0).contains(&self.jitter),
        )?;
        in_range("min_extent_px", self.min_extent_px, self.min_extent_px > 0.0)?;
        in_range("min_opacity", self.min_opacity, self.min_opacity > 0.0)?;
        Ok(())
    }
}

/// Compute every nested placement of a glyph run with natural size `bounds`.
///
/// Depth 0 is always present for non-degenerate bounds; deeper copies stop at whichever of
/// the extent, opacity, or depth limits triggers first. Degenerate bounds give an empty plan.
pub fn plan(
    bounds: Size,
    canvas_height: u32,
    canvas_width: u32,
    params: &PlanParams,
) -> CoghazResult<PlacementPlan> {
    params.validate()?;
    if canvas_height == 0 || canvas_width == 0 {
        return Err(CoghazError::invalid_dimension(
            "canvas height and width must be > 0",
        ));
    }

    let longest = bounds.max_side();
    if !(bounds.is_finite() && bounds.width > 0.0 && bounds.height > 0.0) {
        return Ok(PlacementPlan::default());
    }

    let short_side = f64::from(canvas_width.min(canvas_height));
    let mut current = Placement {
        scale: short_side / longest * params.fill,
        center: Point::new(f64::from(canvas_width) / 2.0, f64::from(canvas_height) / 2.0),
        opacity: 1.0,
        depth: 0,
        tone: Tone::Foreground,
    };
    let mut placements = vec![current];

    for depth in 1..=params.max_depth {
        let scale = current.scale * params.decay;
        let opacity = current.opacity * params.falloff;
        if longest * scale < params.min_extent_px || opacity < params.min_opacity {
            break;
        }

        // Half the slack between parent and child boxes; any drift within it keeps the
        // child inside its parent.
        let slack = bounds * ((current.scale - scale) / 2.0);
        let angle = f64::from(depth) * GOLDEN_ANGLE;
        let drift = Vec2::new(
            slack.width * params.jitter * angle.cos(),
            slack.height * params.jitter * angle.sin(),
        );

        current = Placement {
            scale,
            center: current.center + drift,
            opacity,
            depth,
            tone: if params.alternate_tone && depth % 2 == 1 {
                Tone::Inverse
            } else {
                Tone::Foreground
            },
        };
        placements.push(current);
    }

    tracing::debug!(
        placements = placements.len(),
        deepest_scale = current.scale,
        "planned glyph nesting"
    );
    Ok(PlacementPlan { placements })
}

#[cfg(test)]
#[path = "../../tests/unit/plan/planner.rs"]
mod tests;
