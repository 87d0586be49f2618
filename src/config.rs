// 📁 Fixed input/output locations
// These are constant paths relative to the working directory, not user config.

use std::path::{Path, PathBuf};

pub const RAW_INPUT: &str = "data/raw/bank_marketing.csv";
pub const PROCESSED_DIR: &str = "data/processed";
pub const CLIENT_FILE: &str = "client.csv";
pub const CAMPAIGN_FILE: &str = "campaign.csv";
pub const ECONOMICS_FILE: &str = "economics.csv";
pub const DATABASE_FILE: &str = "bank_marketing.db";

/// Where the pipeline reads from and writes to
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineConfig {
    pub input_path: PathBuf,
    pub output_dir: PathBuf,
    pub client_output: PathBuf,
    pub campaign_output: PathBuf,
    pub economics_output: PathBuf,
    pub database_path: PathBuf,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        PipelineConfig::rooted_at(Path::new(""))
    }
}

impl PipelineConfig {
    /// Same layout as the default, placed under `root`
    pub fn rooted_at(root: &Path) -> Self {
        let output_dir = root.join(PROCESSED_DIR);
        PipelineConfig {
            input_path: root.join(RAW_INPUT),
            client_output: output_dir.join(CLIENT_FILE),
            campaign_output: output_dir.join(CAMPAIGN_FILE),
            economics_output: output_dir.join(ECONOMICS_FILE),
            database_path: output_dir.join(DATABASE_FILE),
            output_dir,
        }
    }
}
