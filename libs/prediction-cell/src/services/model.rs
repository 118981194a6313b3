use std::fs;
use std::path::Path;
use std::sync::Arc;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, error, info};

use shared_config::AppConfig;
use shared_models::feature::{FeatureRecord, FEATURE_COLUMNS};
use shared_models::predictor::{PredictorError, WaitPredictor};

use crate::models::WaitingTimeResponse;

#[derive(Debug, Deserialize)]
struct ModelArtifact {
    feature_names: Vec<String>,
    trees: Vec<Tree>,
}

#[derive(Debug, Deserialize)]
struct Tree {
    nodes: Vec<TreeNode>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum TreeNode {
    Split {
        feature: usize,
        threshold: f64,
        left: usize,
        right: usize,
    },
    Leaf {
        value: f64,
    },
}

impl Tree {
    // Indices are validated at load time, so the walk always ends in a leaf.
    fn score(&self, x: &[f64; 6]) -> f64 {
        let mut idx = 0;
        loop {
            match &self.nodes[idx] {
                TreeNode::Leaf { value } => return *value,
                TreeNode::Split {
                    feature,
                    threshold,
                    left,
                    right,
                } => {
                    idx = if x[*feature] <= *threshold { *left } else { *right };
                }
            }
        }
    }
}

/// Regression forest deserialized from a JSON artifact exported at training
/// time. Loaded once at startup and reused for the process lifetime; the
/// prediction is the mean of the per-tree scores, floored at zero.
#[derive(Debug)]
pub struct TreeEnsembleModel {
    trees: Vec<Tree>,
}

impl TreeEnsembleModel {
    pub fn load(path: &Path) -> Result<Self, PredictorError> {
        let raw = fs::read_to_string(path).map_err(|e| {
            PredictorError::ModelUnavailable(format!("failed to read {}: {}", path.display(), e))
        })?;
        let artifact: ModelArtifact = serde_json::from_str(&raw).map_err(|e| {
            PredictorError::ModelUnavailable(format!("malformed model artifact: {}", e))
        })?;
        Self::from_artifact(artifact)
    }

    fn from_artifact(artifact: ModelArtifact) -> Result<Self, PredictorError> {
        if artifact
            .feature_names
            .iter()
            .map(String::as_str)
            .ne(FEATURE_COLUMNS)
        {
            return Err(PredictorError::ModelUnavailable(format!(
                "artifact feature columns {:?} do not match {:?}",
                artifact.feature_names, FEATURE_COLUMNS
            )));
        }

        if artifact.trees.is_empty() {
            return Err(PredictorError::ModelUnavailable(
                "artifact contains no trees".to_string(),
            ));
        }

        for (tree_idx, tree) in artifact.trees.iter().enumerate() {
            if tree.nodes.is_empty() {
                return Err(PredictorError::ModelUnavailable(format!(
                    "tree {} has no nodes",
                    tree_idx
                )));
            }
            for (node_idx, node) in tree.nodes.iter().enumerate() {
                if let TreeNode::Split {
                    feature,
                    left,
                    right,
                    ..
                } = node
                {
                    // children must stay in bounds and point forward so
                    // every walk terminates
                    let valid = *feature < FEATURE_COLUMNS.len()
                        && *left < tree.nodes.len()
                        && *right < tree.nodes.len()
                        && *left > node_idx
                        && *right > node_idx;
                    if !valid {
                        return Err(PredictorError::ModelUnavailable(format!(
                            "tree {} node {} has invalid split indices",
                            tree_idx, node_idx
                        )));
                    }
                }
            }
        }

        Ok(Self {
            trees: artifact.trees,
        })
    }
}

#[async_trait]
impl WaitPredictor for TreeEnsembleModel {
    async fn predict(&self, features: &FeatureRecord) -> Result<f64, PredictorError> {
        let x = features.to_vector();
        let total: f64 = self.trees.iter().map(|tree| tree.score(&x)).sum();
        Ok((total / self.trees.len() as f64).max(0.0))
    }
}

/// Remote inference service speaking the same JSON contract as the local
/// `/predict_waiting_time` endpoint.
pub struct RemoteInferenceModel {
    client: Client,
    endpoint: String,
}

impl RemoteInferenceModel {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            endpoint: endpoint.into(),
        }
    }
}

#[async_trait]
impl WaitPredictor for RemoteInferenceModel {
    async fn predict(&self, features: &FeatureRecord) -> Result<f64, PredictorError> {
        debug!("requesting prediction from {}", self.endpoint);

        let response = self
            .client
            .post(&self.endpoint)
            .json(features)
            .send()
            .await
            .map_err(|e| {
                PredictorError::ModelUnavailable(format!("inference request failed: {}", e))
            })?;

        let status = response.status();
        if !status.is_success() {
            error!("inference endpoint returned {}", status);
            return Err(PredictorError::ModelUnavailable(format!(
                "inference endpoint returned {}",
                status
            )));
        }

        let body: WaitingTimeResponse = response.json().await.map_err(|e| {
            PredictorError::ModelUnavailable(format!("malformed inference response: {}", e))
        })?;

        if !body.predicted_waiting_time.is_finite() {
            return Err(PredictorError::ModelUnavailable(
                "inference response is not a finite number".to_string(),
            ));
        }

        Ok(body.predicted_waiting_time.max(0.0))
    }
}

/// Build the process-wide predictor from configuration. Called once at
/// startup; a failure here is fatal since every request depends on the
/// model.
pub fn load_predictor(config: &AppConfig) -> Result<Arc<dyn WaitPredictor>, PredictorError> {
    match &config.model_inference_url {
        Some(url) => {
            info!("using remote inference endpoint {}", url);
            Ok(Arc::new(RemoteInferenceModel::new(url.clone())))
        }
        None => {
            info!("loading model artifact from {}", config.model_path);
            let model = TreeEnsembleModel::load(Path::new(&config.model_path))?;
            Ok(Arc::new(model))
        }
    }
}
