#![warn(missing_docs)]
//! # content-studio-core
//!
//! ## Purpose
//! Defines the pure data model shared across the `content-studio` workspace.
//!
//! ## Responsibilities
//! - Represent the tiered content request and its control [`Level`].
//! - Represent the generated content response.
//! - Generate random five-color palettes for the creative-direction tier.
//!
//! ## Data flow
//! The dashboard edits a [`ContentRequest`] field by field, optionally seeding
//! `color_palette` from a [`Palette`]. On submit the whole record (every tier,
//! visited or not) is serialized and sent; the server answers with a
//! [`ContentResponse`].
//!
//! ## Ownership and lifetimes
//! Requests and responses own their strings so they can move freely between
//! screen state, the API client and the orchestrator.
//!
//! ## Error model
//! Invalid levels, unknown enumerated options and blank required fields return
//! [`CoreError`] variants.
//!
//! ## Example
//! ```rust
//! use content_studio_core::{ContentRequest, Level, RequestField};
//!
//! let mut request = ContentRequest::default();
//! request.set_field(RequestField::BrandName, "Acme");
//! request.set_field(RequestField::Topic, "Launch day");
//! request.level = Level::Director;
//! assert!(request.validate().is_ok());
//! assert_eq!(request.objective, "Engagement");
//! ```

use std::fmt;

use rand::Rng;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Number of colors in one generated palette.
pub const PALETTE_SIZE: usize = 5;

/// Separator used when a palette is written into the `color_palette` field.
pub const PALETTE_SEPARATOR: &str = ", ";

/// Choices offered for the `objective` field.
pub const OBJECTIVE_OPTIONS: &[&str] = &[
    "Engagement",
    "Drive Sales/Action",
    "Brand Awareness",
    "Educate/Inform",
    "Festive Greeting",
];

/// Choices offered for the `tone` field.
pub const TONE_OPTIONS: &[&str] = &[
    "Modern",
    "Professional",
    "Witty/Fun",
    "Emotional",
    "Bold/Loud",
    "Minimalist",
];

/// Choices offered for the `art_style` field.
pub const ART_STYLE_OPTIONS: &[&str] = &[
    "Photorealistic",
    "3D Render (Blender)",
    "Flat Vector",
    "Vintage Indian Poster",
    "Cyberpunk/Neon",
    "Minimalist Line Art",
];

/// Control level selected on the dashboard.
///
/// Each level reveals one more tier of fields. Selecting a level never
/// clears or requires fields of any tier.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(into = "u8", try_from = "u8")]
pub enum Level {
    /// Brand identity only.
    #[default]
    Quick,
    /// Adds strategy and tone.
    Studio,
    /// Adds creative direction.
    Director,
}

impl Level {
    /// All levels in ascending order.
    pub const ALL: [Level; 3] = [Level::Quick, Level::Studio, Level::Director];

    /// Parses a numeric level.
    ///
    /// # Errors
    /// Returns [`CoreError::InvalidLevel`] outside `1..=3`.
    pub fn from_number(value: u8) -> Result<Self, CoreError> {
        match value {
            1 => Ok(Level::Quick),
            2 => Ok(Level::Studio),
            3 => Ok(Level::Director),
            other => Err(CoreError::InvalidLevel(other)),
        }
    }

    /// Numeric wire value.
    pub fn number(self) -> u8 {
        match self {
            Level::Quick => 1,
            Level::Studio => 2,
            Level::Director => 3,
        }
    }

    /// Tab label shown for this level.
    pub fn label(self) -> &'static str {
        match self {
            Level::Quick => "Quick Gen",
            Level::Studio => "Studio Mode",
            Level::Director => "Director Mode",
        }
    }

    /// Short tab description.
    pub fn description(self) -> &'static str {
        match self {
            Level::Quick => "Fast & Simple",
            Level::Studio => "Strategic Control",
            Level::Director => "Full Art Control",
        }
    }
}

impl From<Level> for u8 {
    fn from(level: Level) -> Self {
        level.number()
    }
}

impl TryFrom<u8> for Level {
    type Error = CoreError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Level::from_number(value)
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.number(), self.label())
    }
}

/// Addressable field of a [`ContentRequest`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RequestField {
    /// Brand or organization name.
    BrandName,
    /// Topic or occasion.
    Topic,
    /// Campaign objective.
    Objective,
    /// Intended audience.
    TargetAudience,
    /// Publishing platform.
    Platform,
    /// Tone of voice.
    Tone,
    /// Visual art style.
    ArtStyle,
    /// Regional/cultural context notes.
    IndianContext,
    /// Color palette or detail notes.
    ColorPalette,
    /// Shape of the generated text.
    TextStructure,
}

impl RequestField {
    /// Every field in form order.
    pub const ALL: [RequestField; 10] = [
        RequestField::BrandName,
        RequestField::Topic,
        RequestField::Objective,
        RequestField::TargetAudience,
        RequestField::Platform,
        RequestField::Tone,
        RequestField::ArtStyle,
        RequestField::IndianContext,
        RequestField::ColorPalette,
        RequestField::TextStructure,
    ];

    /// JSON key used on the wire.
    pub fn key(self) -> &'static str {
        match self {
            RequestField::BrandName => "brand_name",
            RequestField::Topic => "topic",
            RequestField::Objective => "objective",
            RequestField::TargetAudience => "target_audience",
            RequestField::Platform => "platform",
            RequestField::Tone => "tone",
            RequestField::ArtStyle => "art_style",
            RequestField::IndianContext => "indian_context",
            RequestField::ColorPalette => "color_palette",
            RequestField::TextStructure => "text_structure",
        }
    }

    /// Form label.
    pub fn label(self) -> &'static str {
        match self {
            RequestField::BrandName => "Brand Name",
            RequestField::Topic => "Topic / Context",
            RequestField::Objective => "Objective",
            RequestField::TargetAudience => "Target Audience",
            RequestField::Platform => "Platform",
            RequestField::Tone => "Tone (Vibe)",
            RequestField::ArtStyle => "Visual Art Style",
            RequestField::IndianContext => "Indian Context (Optional)",
            RequestField::ColorPalette => "Details / Color Palette",
            RequestField::TextStructure => "Text Structure",
        }
    }

    /// Lowest level at which the field is shown.
    pub fn tier(self) -> Level {
        match self {
            RequestField::BrandName | RequestField::Topic => Level::Quick,
            RequestField::Objective
            | RequestField::TargetAudience
            | RequestField::Platform
            | RequestField::Tone => Level::Studio,
            RequestField::ArtStyle
            | RequestField::IndianContext
            | RequestField::ColorPalette
            | RequestField::TextStructure => Level::Director,
        }
    }

    /// Only the first-tier fields are mandatory, whatever level is selected.
    pub fn is_required(self) -> bool {
        self.tier() == Level::Quick
    }

    /// Fixed choices for enumerated fields, `None` for free text.
    pub fn options(self) -> Option<&'static [&'static str]> {
        match self {
            RequestField::Objective => Some(OBJECTIVE_OPTIONS),
            RequestField::Tone => Some(TONE_OPTIONS),
            RequestField::ArtStyle => Some(ART_STYLE_OPTIONS),
            _ => None,
        }
    }

    /// Looks a field up by its wire key.
    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|field| field.key() == key)
    }

    /// Fields visible at `level`, in form order.
    pub fn visible_at(level: Level) -> impl Iterator<Item = RequestField> {
        Self::ALL.into_iter().filter(move |field| field.tier() <= level)
    }
}

/// Aggregate request submitted to `POST /generate`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentRequest {
    /// Brand or organization name (required).
    pub brand_name: String,
    /// Topic or occasion (required).
    pub topic: String,
    /// Campaign objective.
    pub objective: String,
    /// Intended audience.
    pub target_audience: String,
    /// Publishing platform.
    pub platform: String,
    /// Tone of voice.
    pub tone: String,
    /// Visual art style.
    pub art_style: String,
    /// Regional/cultural context notes.
    pub indian_context: String,
    /// Palette or detail notes, often a generated [`Palette`].
    pub color_palette: String,
    /// Shape of the generated text.
    pub text_structure: String,
    /// Selected control level.
    pub level: Level,
}

impl Default for ContentRequest {
    fn default() -> Self {
        Self {
            brand_name: String::new(),
            topic: String::new(),
            objective: "Engagement".to_string(),
            target_audience: String::new(),
            platform: "Instagram".to_string(),
            tone: "Modern".to_string(),
            art_style: "Photorealistic".to_string(),
            indian_context: String::new(),
            color_palette: String::new(),
            text_structure: "Short Caption".to_string(),
            level: Level::Quick,
        }
    }
}

impl ContentRequest {
    /// Returns the current value of `field`.
    pub fn field(&self, field: RequestField) -> &str {
        match field {
            RequestField::BrandName => &self.brand_name,
            RequestField::Topic => &self.topic,
            RequestField::Objective => &self.objective,
            RequestField::TargetAudience => &self.target_audience,
            RequestField::Platform => &self.platform,
            RequestField::Tone => &self.tone,
            RequestField::ArtStyle => &self.art_style,
            RequestField::IndianContext => &self.indian_context,
            RequestField::ColorPalette => &self.color_palette,
            RequestField::TextStructure => &self.text_structure,
        }
    }

    /// Overwrites `field` with free text.
    ///
    /// Enumerated fields accept any string here; use [`Self::select_option`]
    /// to restrict input to the offered choices.
    pub fn set_field(&mut self, field: RequestField, value: impl Into<String>) {
        let slot = match field {
            RequestField::BrandName => &mut self.brand_name,
            RequestField::Topic => &mut self.topic,
            RequestField::Objective => &mut self.objective,
            RequestField::TargetAudience => &mut self.target_audience,
            RequestField::Platform => &mut self.platform,
            RequestField::Tone => &mut self.tone,
            RequestField::ArtStyle => &mut self.art_style,
            RequestField::IndianContext => &mut self.indian_context,
            RequestField::ColorPalette => &mut self.color_palette,
            RequestField::TextStructure => &mut self.text_structure,
        };
        *slot = value.into();
    }

    /// Sets an enumerated field to one of its offered choices.
    ///
    /// # Errors
    /// Returns [`CoreError::UnknownOption`] when `value` is not offered for
    /// `field`, or when `field` is free text.
    pub fn select_option(&mut self, field: RequestField, value: &str) -> Result<(), CoreError> {
        let offered = field
            .options()
            .is_some_and(|options| options.contains(&value));
        if !offered {
            return Err(CoreError::UnknownOption {
                field: field.key(),
                value: value.to_string(),
            });
        }

        self.set_field(field, value);
        Ok(())
    }

    /// Required fields that are currently blank.
    pub fn missing_required(&self) -> Vec<RequestField> {
        RequestField::ALL
            .into_iter()
            .filter(|field| field.is_required() && self.field(*field).trim().is_empty())
            .collect()
    }

    /// Checks the required-field constraint.
    ///
    /// # Errors
    /// Returns [`CoreError::MissingRequiredField`] for the first blank
    /// required field.
    pub fn validate(&self) -> Result<(), CoreError> {
        match self.missing_required().first() {
            Some(field) => Err(CoreError::MissingRequiredField(field.key())),
            None => Ok(()),
        }
    }

    /// Serializes the request to a JSON value.
    ///
    /// # Errors
    /// Returns [`CoreError::Codec`] when serialization fails.
    pub fn to_json(&self) -> Result<serde_json::Value, CoreError> {
        serde_json::to_value(self).map_err(CoreError::Codec)
    }
}

/// Generated content returned by `POST /generate`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentResponse {
    /// Generated post text.
    pub script: String,
    /// Prompt describing the accompanying visual.
    pub visual_prompt: String,
    /// Rendered image location, when the server produced one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

/// Five random colors offered for the `color_palette` field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Palette {
    colors: [String; PALETTE_SIZE],
}

impl Palette {
    /// Draws a fresh palette from `rng`.
    pub fn generate<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self {
            colors: std::array::from_fn(|_| random_hex_color(rng)),
        }
    }

    /// Colors as `#RRGGBB` strings.
    pub fn colors(&self) -> &[String] {
        &self.colors
    }

    /// Colors joined with [`PALETTE_SEPARATOR`].
    pub fn joined(&self) -> String {
        self.colors.join(PALETTE_SEPARATOR)
    }
}

impl fmt::Display for Palette {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.joined())
    }
}

/// Produces one uppercase `#RRGGBB` color.
pub fn random_hex_color<R: Rng + ?Sized>(rng: &mut R) -> String {
    let value: u32 = rng.random_range(0..=0x00FF_FFFF);
    format!("#{value:06X}")
}

/// Returns `true` when `value` looks like `#RRGGBB` with uppercase hex digits.
pub fn is_hex_color(value: &str) -> bool {
    let Some(digits) = value.strip_prefix('#') else {
        return false;
    };
    digits.len() == 6
        && digits
            .chars()
            .all(|c| c.is_ascii_digit() || ('A'..='F').contains(&c))
}

/// Error type for data-model validation and codec failures.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Level outside `1..=3`.
    #[error("invalid level {0}: expected 1, 2 or 3")]
    InvalidLevel(u8),
    /// Value is not one of the choices offered for an enumerated field.
    #[error("'{value}' is not an option for {field}")]
    UnknownOption {
        /// Wire key of the field.
        field: &'static str,
        /// Rejected value.
        value: String,
    },
    /// A required field is blank.
    #[error("{0} is required")]
    MissingRequiredField(&'static str),
    /// JSON encoding/decoding error.
    #[error("request codec failure: {0}")]
    Codec(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    //! Unit tests for request defaults, levels and palettes.

    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use super::*;

    #[test]
    fn level_serializes_as_number() {
        let json = serde_json::to_value(Level::Studio).expect("level should serialize");
        assert_eq!(json, serde_json::json!(2));
        assert!(serde_json::from_value::<Level>(serde_json::json!(4)).is_err());
    }

    #[test]
    fn visible_fields_grow_with_level() {
        assert_eq!(RequestField::visible_at(Level::Quick).count(), 2);
        assert_eq!(RequestField::visible_at(Level::Studio).count(), 6);
        assert_eq!(RequestField::visible_at(Level::Director).count(), 10);
    }

    #[test]
    fn select_option_rejects_free_text_fields() {
        let mut request = ContentRequest::default();
        assert!(request.select_option(RequestField::Tone, "Emotional").is_ok());
        assert_eq!(request.tone, "Emotional");
        assert!(request.select_option(RequestField::Tone, "Sarcastic").is_err());
        assert!(request.select_option(RequestField::Topic, "anything").is_err());
    }

    #[test]
    fn blank_required_fields_fail_validation() {
        let mut request = ContentRequest::default();
        request.set_field(RequestField::BrandName, "Acme");
        request.set_field(RequestField::Topic, "   ");

        assert!(matches!(
            request.validate(),
            Err(CoreError::MissingRequiredField("topic"))
        ));
    }

    #[test]
    fn palette_colors_are_uppercase_hex() {
        let mut rng = StdRng::seed_from_u64(42);
        let palette = Palette::generate(&mut rng);

        assert_eq!(palette.colors().len(), PALETTE_SIZE);
        assert!(palette.colors().iter().all(|color| is_hex_color(color)));
        assert_eq!(palette.joined().split(PALETTE_SEPARATOR).count(), PALETTE_SIZE);
    }

    #[test]
    fn hex_color_check_rejects_lowercase_and_short_values() {
        assert!(is_hex_color("#00FFAA"));
        assert!(!is_hex_color("#00ffaa"));
        assert!(!is_hex_color("#FFF"));
        assert!(!is_hex_color("00FFAA"));
    }
}
