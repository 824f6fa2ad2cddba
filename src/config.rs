use serde::Deserialize;

const DEFAULT_CYCLE_LIMIT: u64 = 100;
const DEFAULT_MIN_LATENCY: u32 = 2;
const DEFAULT_MAX_LATENCY: u32 = 3;
const DEFAULT_FIXED_LATENCY: u32 = 2;

#[derive(Debug, Deserialize, Clone, Default)]
pub struct Config {
    #[serde(default)]
    pub general: GeneralConfig,

    #[serde(default)]
    pub pipeline: PipelineConfig,

    #[serde(default)]
    pub memory: MemoryConfig,
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct GeneralConfig {
    #[serde(default)]
    pub trace_pipeline: bool,
}

#[derive(Debug, Deserialize, Clone)]
pub struct PipelineConfig {
    #[serde(default = "default_cycle_limit")]
    pub cycle_limit: u64,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            cycle_limit: DEFAULT_CYCLE_LIMIT,
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct MemoryConfig {
    /// Latency model for the memory-access stage: "Random" or "Fixed".
    #[serde(default = "default_latency_model")]
    pub latency_model: String,

    #[serde(default = "default_min_latency")]
    pub min_latency: u32,

    #[serde(default = "default_max_latency")]
    pub max_latency: u32,

    #[serde(default = "default_fixed_latency")]
    pub fixed_latency: u32,

    /// Address/value pairs seeded into data memory before the run.
    #[serde(default)]
    pub preload: Vec<[i32; 2]>,
}

impl Default for MemoryConfig {
    fn default() -> Self {
        Self {
            latency_model: default_latency_model(),
            min_latency: DEFAULT_MIN_LATENCY,
            max_latency: DEFAULT_MAX_LATENCY,
            fixed_latency: DEFAULT_FIXED_LATENCY,
            preload: Vec::new(),
        }
    }
}

fn default_latency_model() -> String {
    "Random".to_string()
}

fn default_cycle_limit() -> u64 {
    DEFAULT_CYCLE_LIMIT
}

fn default_min_latency() -> u32 {
    DEFAULT_MIN_LATENCY
}

fn default_max_latency() -> u32 {
    DEFAULT_MAX_LATENCY
}

fn default_fixed_latency() -> u32 {
    DEFAULT_FIXED_LATENCY
}
