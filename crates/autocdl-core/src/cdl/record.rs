use serde::{Deserialize, Serialize};

use super::CdlParameters;

/// Wire form of a CDL as handed to the grading host. Every value is a string;
/// channel triples are space-separated.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CdlRecord {
    #[serde(rename = "NodeIndex")]
    pub node_index: String,
    #[serde(rename = "Slope")]
    pub slope: String,
    #[serde(rename = "Offset")]
    pub offset: String,
    #[serde(rename = "Power")]
    pub power: String,
    #[serde(rename = "Saturation")]
    pub saturation: String,
}

fn triple(values: &[f64; 3]) -> String {
    format!("{:.4} {:.4} {:.4}", values[0], values[1], values[2])
}

impl From<&CdlParameters> for CdlRecord {
    fn from(cdl: &CdlParameters) -> Self {
        Self {
            node_index: cdl.node_index.to_string(),
            slope: triple(&cdl.slope),
            offset: triple(&cdl.offset),
            power: triple(&cdl.power),
            saturation: format!("{:.4}", cdl.saturation),
        }
    }
}
