use serde::{Deserialize, Serialize};
use std::fmt;

/// Coarse flower guess derived from the petal estimate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FlowerType {
    #[serde(rename = "Tulip or Lily")]
    TulipOrLily,
    #[serde(rename = "Rose or Apple Blossom")]
    RoseOrAppleBlossom,
    #[serde(rename = "Daisy or Sunflower")]
    DaisyOrSunflower,
    #[serde(rename = "Chrysanthemum or Dahlia")]
    ChrysanthemumOrDahlia,
    Unknown,
}

fn four_to_six(count: u32) -> bool {
    (4..=6).contains(&count)
}

fn exactly_five(count: u32) -> bool {
    count == 5
}

fn eight_to_fifteen(count: u32) -> bool {
    (8..=15).contains(&count)
}

fn twenty_or_more(count: u32) -> bool {
    count >= 20
}

/// Checked in order; the first matching predicate wins.
///
/// `exactly_five` sits behind `four_to_six` and therefore never matches.  It
/// stays where it is so the table keeps producing the same labels.
const RULES: [(fn(u32) -> bool, FlowerType); 4] = [
    (four_to_six, FlowerType::TulipOrLily),
    (exactly_five, FlowerType::RoseOrAppleBlossom),
    (eight_to_fifteen, FlowerType::DaisyOrSunflower),
    (twenty_or_more, FlowerType::ChrysanthemumOrDahlia),
];

impl FlowerType {
    pub fn from_petal_count(count: u32) -> FlowerType {
        RULES
            .iter()
            .find(|(matches, _)| matches(count))
            .map(|&(_, flower)| flower)
            .unwrap_or(FlowerType::Unknown)
    }

    pub fn label(self) -> &'static str {
        match self {
            FlowerType::TulipOrLily => "Tulip or Lily",
            FlowerType::RoseOrAppleBlossom => "Rose or Apple Blossom",
            FlowerType::DaisyOrSunflower => "Daisy or Sunflower",
            FlowerType::ChrysanthemumOrDahlia => "Chrysanthemum or Dahlia",
            FlowerType::Unknown => "Unknown",
        }
    }
}

impl fmt::Display for FlowerType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
