mod null_renderer;

pub use null_renderer::{NullChartInstance, NullRenderer, RenderCall, RenderLog};

use serde::{Deserialize, Serialize};

use crate::core::RenderConfig;
use crate::error::ChartResult;

/// Surface the backend draws on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RendererMode {
    #[default]
    Canvas,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct InitOptions {
    pub renderer: RendererMode,
}

impl InitOptions {
    #[must_use]
    pub fn canvas() -> Self {
        Self {
            renderer: RendererMode::Canvas,
        }
    }
}

/// Contract implemented by any charting library binding.
///
/// `init` binds a new chart to a host element; the returned instance is the
/// only handle the widgets keep.
pub trait ChartBackend {
    type Instance: ChartInstance;

    fn init(
        &mut self,
        element_id: &str,
        theme: Option<&str>,
        options: InitOptions,
    ) -> ChartResult<Self::Instance>;
}

/// Live chart bound to one element.
pub trait ChartInstance {
    fn clear(&mut self) -> ChartResult<()>;

    fn set_option(&mut self, config: &RenderConfig) -> ChartResult<()>;
}
