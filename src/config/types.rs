//! Configuration type definitions.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::enums::{ArmingMode, ColorSpec, SelectionPolicy};

/// Selection behavior settings.
#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct SelectionConfig {
    /// Policy applied when a stroke crosses an item box:
    /// "additive" (crossing only ever selects) or "toggle" (crossing
    /// flips the item's selection state)
    #[serde(default = "default_policy")]
    pub policy: SelectionPolicy,

    /// Clear the selection when the host disables drawing
    /// (e.g. leaving edit mode)
    #[serde(default = "default_clear_on_disable")]
    pub clear_on_disable: bool,
}

impl Default for SelectionConfig {
    fn default() -> Self {
        Self {
            policy: default_policy(),
            clear_on_disable: default_clear_on_disable(),
        }
    }
}

/// Pointer handling settings.
#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct PointerConfig {
    /// Track every active contact of a multi-touch device.
    /// When false, only the first contact is used regardless of device
    /// capability.
    #[serde(default = "default_multi_pointer")]
    pub multi_pointer: bool,

    /// How drawing capability becomes enabled: "always", "manual"
    /// (host-toggled), or "double-tap"
    #[serde(default = "default_arming")]
    pub arming: ArmingMode,

    /// Window for the second tap of a double-tap arm, in milliseconds
    /// (valid range: 50 - 2000)
    #[serde(default = "default_double_tap_window_ms")]
    pub double_tap_window_ms: u64,

    /// Revoke drawing capability once a gesture fully ends (cooldown
    /// expiry), requiring a fresh arm before the next gesture
    #[serde(default = "default_revoke_after_gesture")]
    pub revoke_after_gesture: bool,
}

impl Default for PointerConfig {
    fn default() -> Self {
        Self {
            multi_pointer: default_multi_pointer(),
            arming: default_arming(),
            double_tap_window_ms: default_double_tap_window_ms(),
            revoke_after_gesture: default_revoke_after_gesture(),
        }
    }
}

/// Stroke feedback styling.
///
/// These values are styling hints handed to the renderer collaborator;
/// the engine itself never draws.
#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct StrokeConfig {
    /// Stroke color - either a named color (black, white, red, green,
    /// blue, yellow, orange, pink) or an RGB array like `[255, 0, 0]`
    #[serde(default = "default_line_color")]
    pub line_color: ColorSpec,

    /// Stroke line width in pixels (valid range: 1.0 - 20.0)
    #[serde(default = "default_line_width")]
    pub line_width: f64,
}

impl Default for StrokeConfig {
    fn default() -> Self {
        Self {
            line_color: default_line_color(),
            line_width: default_line_width(),
        }
    }
}

/// Gesture lifecycle tuning.
#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct GestureConfig {
    /// Grace period after a pointer lift before the gesture is torn
    /// down, in milliseconds (valid range: 0 - 1000). Absorbs synthetic
    /// trailing end events on combined mouse+touch environments.
    #[serde(default = "default_cooldown_ms")]
    pub cooldown_ms: u64,
}

impl Default for GestureConfig {
    fn default() -> Self {
        Self {
            cooldown_ms: default_cooldown_ms(),
        }
    }
}

// =============================================================================
// Default value functions
// =============================================================================

fn default_policy() -> SelectionPolicy {
    SelectionPolicy::Additive
}

fn default_clear_on_disable() -> bool {
    true
}

fn default_multi_pointer() -> bool {
    false
}

fn default_arming() -> ArmingMode {
    ArmingMode::Always
}

fn default_double_tap_window_ms() -> u64 {
    300
}

fn default_revoke_after_gesture() -> bool {
    false
}

fn default_line_color() -> ColorSpec {
    ColorSpec::Name("black".to_string())
}

fn default_line_width() -> f64 {
    5.0
}

fn default_cooldown_ms() -> u64 {
    50
}
