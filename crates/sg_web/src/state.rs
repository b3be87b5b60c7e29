use sg_pipeline::ArticlePipeline;
use std::sync::Arc;

pub struct AppState {
    pub pipeline: Arc<ArticlePipeline>,
}

impl AppState {
    pub fn new(pipeline: ArticlePipeline) -> Self {
        Self {
            pipeline: Arc::new(pipeline),
        }
    }
}
