//! # Reference Datasets
//!
//! Published measurements for banana pseudostem core candy, kept as plain
//! records so reports can show them next to a simulated trajectory.
//! Nothing here is computed.

use crate::ProcessError;
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// One nutrient and its amount per 100 g (unit is part of the name).
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Nutrient {
    /// Nutrient name with its unit, e.g. `Iron (mg/100g)`.
    pub name: &'static str,
    /// Measured amount in the named unit.
    pub amount: f64,
}

/// Panel scores (9-point hedonic scale) for one treatment.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SensoryScore {
    /// Treatment code (`Tc` is the control).
    pub treatment: &'static str,
    /// Texture score.
    pub texture: f64,
    /// Colour score.
    pub colour: f64,
    /// Taste score.
    pub taste: f64,
    /// Flavour score.
    pub flavour: f64,
    /// Overall acceptability.
    pub overall: f64,
}

/// Moisture content (%) during storage for one treatment.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct StorageMoisture {
    /// Treatment code.
    pub treatment: &'static str,
    /// Moisture right after processing.
    pub initial: f64,
    /// Moisture after 15 days of storage.
    pub day_15: f64,
    /// Moisture after 30 days of storage.
    pub day_30: f64,
}

/// Microbial load on a given storage day.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MicrobialCount {
    /// Treatment code.
    pub treatment: &'static str,
    /// Days in storage when the count was taken.
    pub storage_days: u32,
    /// Bacteria, ×10⁴ CFU/g.
    pub bacterial: u32,
    /// Fungi, ×10² CFU/g.
    pub fungal: u32,
}

const fn nutrient(name: &'static str, amount: f64) -> Nutrient {
    Nutrient { name, amount }
}

/// Composition of the finished candy.
pub const NUTRITIONAL_COMPOSITION: [Nutrient; 7] = [
    nutrient("Dietary Fiber (g/100g)", 3.5),
    nutrient("Potassium (mg/100g)", 400.0),
    nutrient("Calcium (mg/100g)", 65.0),
    nutrient("Magnesium (mg/100g)", 40.0),
    nutrient("Iron (mg/100g)", 2.5),
    nutrient("Phenolic Compounds (mg GAE/g)", 1.35),
    nutrient("Antioxidants (% activity)", 22.5),
];

const fn sensory(
    treatment: &'static str,
    texture: f64,
    colour: f64,
    taste: f64,
    flavour: f64,
    overall: f64,
) -> SensoryScore {
    SensoryScore {
        treatment,
        texture,
        colour,
        taste,
        flavour,
        overall,
    }
}

/// Mean panel scores for the control and six treatments.
pub const SENSORY_EVALUATION: [SensoryScore; 7] = [
    sensory("Tc", 7.5, 7.6, 7.6, 5.0, 7.0),
    sensory("T1", 8.0, 7.71, 7.85, 7.71, 7.85),
    sensory("T2", 8.28, 8.65, 8.15, 8.15, 8.6),
    sensory("T3", 8.0, 7.85, 7.71, 7.9, 8.0),
    sensory("T4", 7.6, 7.82, 7.3, 7.6, 7.8),
    sensory("T5", 8.32, 8.01, 8.2, 8.0, 8.4),
    sensory("T6", 7.83, 7.8, 8.1, 7.78, 7.8),
];

const fn storage(
    treatment: &'static str,
    initial: f64,
    day_15: f64,
    day_30: f64,
) -> StorageMoisture {
    StorageMoisture {
        treatment,
        initial,
        day_15,
        day_30,
    }
}

/// Moisture pick-up of the control and the two best treatments.
pub const STORAGE_MOISTURE: [StorageMoisture; 3] = [
    storage("Tc", 6.28, 8.91, 12.40),
    storage("T2", 6.28, 8.90, 12.36),
    storage("T5", 6.31, 8.82, 12.33),
];

const fn microbial(
    treatment: &'static str,
    storage_days: u32,
    bacterial: u32,
    fungal: u32,
) -> MicrobialCount {
    MicrobialCount {
        treatment,
        storage_days,
        bacterial,
        fungal,
    }
}

/// Bacterial and fungal counts over 30 days of storage.
pub const MICROBIAL_LOAD: [MicrobialCount; 8] = [
    microbial("T2", 0, 0, 0),
    microbial("T2", 5, 2, 0),
    microbial("T2", 15, 6, 6),
    microbial("T2", 30, 10, 11),
    microbial("T5", 0, 0, 0),
    microbial("T5", 5, 6, 2),
    microbial("T5", 15, 11, 9),
    microbial("T5", 30, 27, 13),
];

// =============================================================================
// SECTIONS
// =============================================================================

/// Selects one of the datasets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReferenceSection {
    /// [`NUTRITIONAL_COMPOSITION`]
    Nutrition,
    /// [`SENSORY_EVALUATION`]
    Sensory,
    /// [`STORAGE_MOISTURE`]
    Moisture,
    /// [`MICROBIAL_LOAD`]
    Microbial,
}

impl ReferenceSection {
    /// Every section, in menu order.
    pub const ALL: [ReferenceSection; 4] = [
        ReferenceSection::Nutrition,
        ReferenceSection::Sensory,
        ReferenceSection::Moisture,
        ReferenceSection::Microbial,
    ];

    /// Heading used when printing the section.
    #[must_use]
    pub fn title(&self) -> &'static str {
        match self {
            ReferenceSection::Nutrition => "Nutritional Composition",
            ReferenceSection::Sensory => "Sensory Evaluation Scores",
            ReferenceSection::Moisture => "Moisture Content During Storage",
            ReferenceSection::Microbial => "Microbial Evaluation",
        }
    }

    /// The dataset as JSON, for machine-readable output.
    pub fn to_json(&self) -> Result<serde_json::Value, ProcessError> {
        let value = match self {
            ReferenceSection::Nutrition => serde_json::to_value(NUTRITIONAL_COMPOSITION),
            ReferenceSection::Sensory => serde_json::to_value(SENSORY_EVALUATION),
            ReferenceSection::Moisture => serde_json::to_value(STORAGE_MOISTURE),
            ReferenceSection::Microbial => serde_json::to_value(MICROBIAL_LOAD),
        };
        value.map_err(|e| ProcessError::SerializationError(e.to_string()))
    }

    /// The dataset as aligned text rows, header first.
    #[must_use]
    pub fn to_rows(&self) -> Vec<Vec<String>> {
        let mut rows: Vec<Vec<String>> = Vec::new();
        match self {
            ReferenceSection::Nutrition => {
                rows.push(vec!["Nutrient".into(), "Amount".into()]);
                for n in &NUTRITIONAL_COMPOSITION {
                    rows.push(vec![n.name.into(), n.amount.to_string()]);
                }
            }
            ReferenceSection::Sensory => {
                rows.push(
                    ["Treatment", "Texture", "Colour", "Taste", "Flavour", "Overall"]
                        .map(String::from)
                        .to_vec(),
                );
                for s in &SENSORY_EVALUATION {
                    rows.push(vec![
                        s.treatment.into(),
                        s.texture.to_string(),
                        s.colour.to_string(),
                        s.taste.to_string(),
                        s.flavour.to_string(),
                        s.overall.to_string(),
                    ]);
                }
            }
            ReferenceSection::Moisture => {
                rows.push(
                    ["Treatment", "Initial MC%", "After 15 days MC%", "After 30 days MC%"]
                        .map(String::from)
                        .to_vec(),
                );
                for m in &STORAGE_MOISTURE {
                    rows.push(vec![
                        m.treatment.into(),
                        format!("{:.2}", m.initial),
                        format!("{:.2}", m.day_15),
                        format!("{:.2}", m.day_30),
                    ]);
                }
            }
            ReferenceSection::Microbial => {
                rows.push(
                    [
                        "Treatment",
                        "Storage Days",
                        "Bacterial Count (x10⁴ CFU/g)",
                        "Fungal Count (x10² CFU/g)",
                    ]
                    .map(String::from)
                    .to_vec(),
                );
                for c in &MICROBIAL_LOAD {
                    rows.push(vec![
                        c.treatment.into(),
                        c.storage_days.to_string(),
                        c.bacterial.to_string(),
                        c.fungal.to_string(),
                    ]);
                }
            }
        }
        rows
    }
}

impl FromStr for ReferenceSection {
    type Err = ProcessError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "1" | "nutrition" | "nutritional" => Ok(ReferenceSection::Nutrition),
            "2" | "sensory" => Ok(ReferenceSection::Sensory),
            "3" | "moisture" => Ok(ReferenceSection::Moisture),
            "4" | "microbial" => Ok(ReferenceSection::Microbial),
            other => Err(ProcessError::ConfigError(format!(
                "Unknown reference section: {}. Use: nutrition, sensory, moisture, microbial",
                other
            ))),
        }
    }
}

impl fmt::Display for ReferenceSection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.title())
    }
}
