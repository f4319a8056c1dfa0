use serde::{Deserialize, Serialize};

/// Structural element classes the rationalizer is allowed to report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FeatureKind {
    Stairs,
    Door,
    Window,
    Fireplace,
    Deck,
    Opening,
    Niche,
}

/// A single structural element anchored to a room.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StructuralFeature {
    #[serde(rename = "type")]
    pub kind: FeatureKind,
    pub location: String,
    #[serde(default)]
    pub details: String,
}

/// One room of the rationalized building map.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Room {
    pub id: String,
    pub name: String,
    pub level: i32,
    #[serde(default)]
    pub dimensions: String,
    #[serde(default)]
    pub sq_ft: f64,
    #[serde(default)]
    pub structural_features: Vec<StructuralFeature>,
    #[serde(default)]
    pub adjacencies: Vec<String>,
}

impl Room {
    /// Minimal room stub used for the fixed fallback roster.
    pub fn stub(id: impl Into<String>, name: impl Into<String>, level: i32) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            level,
            dimensions: String::new(),
            sq_ft: 0.0,
            structural_features: Vec::new(),
            adjacencies: Vec::new(),
        }
    }
}

/// Whole-building spatial map produced by one rationalization call.
///
/// There is a single current map per studio; a new rationalization replaces
/// it wholesale. No versioning or merge.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BuildingMap {
    pub total_levels: i32,
    #[serde(default)]
    pub global_footprint: String,
    #[serde(default)]
    pub exterior_features: Vec<String>,
    #[serde(default)]
    pub rooms: Vec<Room>,
}

impl BuildingMap {
    pub fn room_by_id(&self, room_id: &str) -> Option<&Room> {
        self.rooms.iter().find(|room| room.id == room_id)
    }
}

/// Material inventory buckets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MaterialCategory {
    Finishes,
    Furnishings,
    Structural,
    Electrical,
    Plumbing,
}

/// One material-inventory line item reported alongside the map.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MaterialItem {
    pub room: String,
    pub category: MaterialCategory,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub quantity: String,
    #[serde(default)]
    pub notes: String,
}

/// Parsed payload of a spatial rationalization call.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RationalizedPlan {
    pub map: BuildingMap,
    #[serde(default)]
    pub inventory: Vec<MaterialItem>,
}
