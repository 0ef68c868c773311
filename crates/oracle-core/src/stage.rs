//! Visual stage abstractions.
//!
//! The scene engine never renders anything itself. It describes property
//! transitions on named targets and awaits their completion; the concrete
//! tween engine, shader and page navigation live behind these traits.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Opaque handle to one unit of on-screen content.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BlockHandle(pub String);

impl fmt::Display for BlockHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Something the stage can animate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VisualTarget {
    /// A content block (intro copy, quote, prompt, ...).
    ContentBlock(BlockHandle),
    /// The scene title.
    Title,
    /// The primary visual element.
    Metatron,
    /// The divination hotspot at the center of the primary element.
    MetatronCenter,
    /// Every outline shape of the primary element, as one group.
    MetatronShapes,
    /// The secondary focal glyph.
    Goddess,
}

/// Animatable properties. `None` leaves a property untouched.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct VisualProps {
    /// Uniform scale, `1.0` is natural size.
    pub scale: Option<f64>,
    /// Opacity in `[0, 1]`; zero also hides the element.
    pub opacity: Option<f64>,
    /// Vertical offset in viewport-height units.
    pub offset_y: Option<f64>,
    /// Rotation in degrees, relative to the current rotation.
    pub rotation: Option<f64>,
    /// Whether the element accepts pointer input.
    pub interactive: Option<bool>,
}

impl VisualProps {
    /// Empty property set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the scale.
    #[must_use]
    pub fn scale(mut self, scale: f64) -> Self {
        self.scale = Some(scale);
        self
    }

    /// Sets the opacity.
    #[must_use]
    pub fn opacity(mut self, opacity: f64) -> Self {
        self.opacity = Some(opacity);
        self
    }

    /// Sets the vertical offset.
    #[must_use]
    pub fn offset_y(mut self, offset_y: f64) -> Self {
        self.offset_y = Some(offset_y);
        self
    }

    /// Sets the relative rotation.
    #[must_use]
    pub fn rotation(mut self, degrees: f64) -> Self {
        self.rotation = Some(degrees);
        self
    }

    /// Sets pointer interactivity.
    #[must_use]
    pub fn interactive(mut self, interactive: bool) -> Self {
        self.interactive = Some(interactive);
        self
    }
}

/// Easing curve of a transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Easing {
    /// Constant speed.
    Linear,
    /// Accelerating.
    PowerIn,
    /// Decelerating.
    PowerOut,
    /// Accelerating then decelerating.
    PowerInOut,
    /// Gentle sinusoidal in-out.
    SineInOut,
}

/// A single property transition.
#[derive(Debug, Clone, PartialEq)]
pub struct Transition {
    /// What to animate.
    pub target: VisualTarget,
    /// Starting properties, applied immediately. `None` animates from the
    /// current values.
    pub from: Option<VisualProps>,
    /// Final properties.
    pub to: VisualProps,
    /// Total duration.
    pub duration: Duration,
    /// Easing curve.
    pub easing: Easing,
}

impl Transition {
    /// Animates `target` from its current values to `to`.
    #[must_use]
    pub fn to(target: VisualTarget, to: VisualProps, duration: Duration, easing: Easing) -> Self {
        Self {
            target,
            from: None,
            to,
            duration,
            easing,
        }
    }

    /// Animates `target` from `from` to `to`.
    #[must_use]
    pub fn from_to(
        target: VisualTarget,
        from: VisualProps,
        to: VisualProps,
        duration: Duration,
        easing: Easing,
    ) -> Self {
        Self {
            target,
            from: Some(from),
            to,
            duration,
            easing,
        }
    }
}

/// Tween playback.
#[async_trait]
pub trait Animator: Send + Sync {
    /// Plays `transition` and completes when it has finished.
    async fn animate(&self, transition: Transition);

    /// Applies `props` to `target` immediately, without a tween.
    fn set(&self, target: VisualTarget, props: VisualProps);
}

/// The ambient shader layer behind the scene.
pub trait AmbientEffect: Send + Sync {
    /// Fades the effect in.
    fn reveal(&self);

    /// Fades the effect out.
    fn hide(&self);
}

/// The continuous facet shimmer on the primary element during meditation.
pub trait FacetLoop: Send + Sync {
    /// Starts the loop. Starting a running loop is a no-op.
    fn start(&self);

    /// Stops the loop. Stopping a stopped loop is a no-op.
    fn stop(&self);
}

/// Full-page location changes.
pub trait Navigator: Send + Sync {
    /// Leaves the current page for `url`.
    fn navigate_to(&self, url: &str);
}

/// The visual collaborators of one scene, shared by every controller.
#[derive(Clone)]
pub struct Stage {
    /// Tween playback.
    pub animator: Arc<dyn Animator>,
    /// Ambient shader layer.
    pub ambient: Arc<dyn AmbientEffect>,
    /// Facet shimmer loop.
    pub facets: Arc<dyn FacetLoop>,
    /// Page navigation.
    pub navigator: Arc<dyn Navigator>,
}

impl fmt::Debug for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Stage").finish_non_exhaustive()
    }
}
