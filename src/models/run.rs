use serde::Deserialize;

/// The subset of Litani's `run.json` needed to summarize a run
#[derive(Debug, Clone, Deserialize)]
pub struct LitaniRun {
    pub pipelines: Vec<Pipeline>,
}

/// One proof pipeline within a Litani run
#[derive(Debug, Clone, Deserialize)]
pub struct Pipeline {
    pub name: String,
    pub status: String,
}
