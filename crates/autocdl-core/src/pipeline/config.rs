use serde::{Deserialize, Serialize};

use crate::consts::DEFAULT_NODE_INDEX;
use crate::exposure::ExposureConfig;
use crate::scene::ClassifierConfig;
use crate::stats::{ExtractionConfig, FaceRoiConfig};
use crate::verify::VerifyConfig;

/// Full configuration of a grading pass. Every section has defaults, so an
/// empty TOML document is a valid config.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GradeConfig {
    /// Grading node that receives the CDL.
    #[serde(default = "default_node_index")]
    pub node_index: u32,
    #[serde(default)]
    pub extraction: ExtractionConfig,
    #[serde(default)]
    pub faces: FaceRoiConfig,
    #[serde(default)]
    pub classifier: ClassifierConfig,
    #[serde(default)]
    pub exposure: ExposureConfig,
    #[serde(default)]
    pub verify: VerifyConfig,
}

fn default_node_index() -> u32 {
    DEFAULT_NODE_INDEX
}

impl Default for GradeConfig {
    fn default() -> Self {
        Self {
            node_index: DEFAULT_NODE_INDEX,
            extraction: ExtractionConfig::default(),
            faces: FaceRoiConfig::default(),
            classifier: ClassifierConfig::default(),
            exposure: ExposureConfig::default(),
            verify: VerifyConfig::default(),
        }
    }
}
