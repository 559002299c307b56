//! Core data types for the penguin sighting pipeline

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Biometric measurements estimated from a penguin photo.
///
/// Field order matters: the classifier consumes these as a fixed
/// 5-column row (bill length, bill depth, flipper length, body mass, sex).
/// Unknown fields in the upstream reply are rejected at deserialization.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BiometricRecord {
    pub bill_length_mm: f64,
    pub bill_depth_mm: f64,
    pub flipper_length_mm: f64,
    pub body_mass_g: f64,
    /// 0 = female, 1 = male
    pub sex: u8,
}

impl BiometricRecord {
    /// Single-row classifier input in the exact order the artifact expects
    pub fn as_model_input(&self) -> [f32; 5] {
        [
            self.bill_length_mm as f32,
            self.bill_depth_mm as f32,
            self.flipper_length_mm as f32,
            self.body_mass_g as f32,
            self.sex as f32,
        ]
    }
}

/// Species predicted by the classifier artifact
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SpeciesLabel {
    Adelie,
    Chinstrap,
    Gentoo,
    Unknown,
}

impl SpeciesLabel {
    /// Map a raw classifier output code to a label.
    ///
    /// The artifact was trained on three classes; any other code falls
    /// back to Unknown rather than erroring.
    pub fn from_class_index(index: i64) -> Self {
        match index {
            0 => SpeciesLabel::Adelie,
            1 => SpeciesLabel::Chinstrap,
            2 => SpeciesLabel::Gentoo,
            _ => SpeciesLabel::Unknown,
        }
    }

    /// Parse a stored species name; unrecognized names map to Unknown
    pub fn from_name(name: &str) -> Self {
        match name {
            "Adelie" => SpeciesLabel::Adelie,
            "Chinstrap" => SpeciesLabel::Chinstrap,
            "Gentoo" => SpeciesLabel::Gentoo,
            _ => SpeciesLabel::Unknown,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SpeciesLabel::Adelie => "Adelie",
            SpeciesLabel::Chinstrap => "Chinstrap",
            SpeciesLabel::Gentoo => "Gentoo",
            SpeciesLabel::Unknown => "Unknown",
        }
    }
}

impl fmt::Display for SpeciesLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Geographic point (degrees). Sampled coordinates are not clamped to
/// valid lat/lon ranges; habitat regions are configured to stay plausible.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub lat: f64,
    pub lon: f64,
}

/// One persisted submission result, as served by the community listing.
///
/// Append-only: entries are never mutated or reclassified after the write.
/// The store's internal row id is deliberately absent from this type.
#[derive(Debug, Clone, Serialize)]
pub struct CommunityEntry {
    pub created_at: DateTime<Utc>,
    pub img_url: String,
    pub features: BiometricRecord,
    pub species: SpeciesLabel,
    pub nickname: String,
    pub coordinate: Coordinate,
}
