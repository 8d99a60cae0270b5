//! Configuration for the research pipeline.

use std::path::PathBuf;

/// Configuration for a [`crate::ResearchEngine`].
#[derive(Debug, Clone)]
pub struct RagConfig {
    /// Path to the persisted index file.
    pub index_path: PathBuf,
    /// Maximum chunk length in characters.
    pub chunk_size: usize,
    /// Characters shared between consecutive chunks.
    pub chunk_overlap: usize,
    /// Number of chunks retrieved per question.
    pub top_k: usize,
    /// Sampling temperature forwarded to the completion model.
    pub temperature: f32,
    /// Maximum URLs accepted per ingest batch.
    pub max_urls: usize,
}

impl Default for RagConfig {
    fn default() -> Self {
        Self {
            index_path: PathBuf::from("./finsight_index.json"),
            chunk_size: 500,
            chunk_overlap: 100,
            top_k: 4,
            temperature: 0.9,
            max_urls: 3,
        }
    }
}

impl RagConfig {
    /// Creates a new configuration with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a builder for custom configuration.
    #[must_use]
    pub fn builder() -> RagConfigBuilder {
        RagConfigBuilder::new()
    }
}

/// Builder for pipeline configuration.
#[derive(Debug, Default)]
pub struct RagConfigBuilder {
    config: RagConfig,
}

impl RagConfigBuilder {
    /// Creates a new configuration builder with default values.
    #[must_use]
    pub fn new() -> Self {
        Self {
            config: RagConfig::default(),
        }
    }

    /// Sets the index persistence path.
    #[must_use]
    pub fn index_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.index_path = path.into();
        self
    }

    /// Sets the maximum chunk length in characters.
    #[must_use]
    pub const fn chunk_size(mut self, size: usize) -> Self {
        self.config.chunk_size = size;
        self
    }

    /// Sets the character overlap between consecutive chunks.
    #[must_use]
    pub const fn chunk_overlap(mut self, overlap: usize) -> Self {
        self.config.chunk_overlap = overlap;
        self
    }

    /// Sets the number of chunks retrieved per question.
    #[must_use]
    pub const fn top_k(mut self, k: usize) -> Self {
        self.config.top_k = k;
        self
    }

    /// Sets the generation temperature.
    #[must_use]
    pub const fn temperature(mut self, temperature: f32) -> Self {
        self.config.temperature = temperature;
        self
    }

    /// Sets the maximum URLs accepted per ingest batch.
    #[must_use]
    pub const fn max_urls(mut self, max: usize) -> Self {
        self.config.max_urls = max;
        self
    }

    /// Builds the configuration.
    #[must_use]
    pub fn build(self) -> RagConfig {
        self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let config = RagConfig::default();
        assert_eq!(config.index_path, PathBuf::from("./finsight_index.json"));
        assert_eq!(config.chunk_size, 500);
        assert_eq!(config.chunk_overlap, 100);
        assert_eq!(config.top_k, 4);
        assert!((config.temperature - 0.9).abs() < f32::EPSILON);
        assert_eq!(config.max_urls, 3);
    }

    #[test]
    fn builder_config() {
        let config = RagConfig::builder()
            .index_path("/custom/index.json")
            .chunk_size(200)
            .chunk_overlap(50)
            .top_k(2)
            .temperature(0.2)
            .max_urls(5)
            .build();

        assert_eq!(config.index_path, PathBuf::from("/custom/index.json"));
        assert_eq!(config.chunk_size, 200);
        assert_eq!(config.chunk_overlap, 50);
        assert_eq!(config.top_k, 2);
        assert!((config.temperature - 0.2).abs() < f32::EPSILON);
        assert_eq!(config.max_urls, 5);
    }
}
