use std::cell::RefCell;
use std::rc::Rc;

use crate::core::RenderConfig;
use crate::error::{ChartError, ChartResult};
use crate::render::{ChartBackend, ChartInstance, InitOptions};

/// Backend call observed by [`NullRenderer`].
#[derive(Debug, Clone, PartialEq)]
pub enum RenderCall {
    Init {
        instance: usize,
        element_id: String,
        theme: Option<String>,
        options: InitOptions,
    },
    Clear {
        instance: usize,
    },
    SetOption {
        instance: usize,
        config: RenderConfig,
    },
}

/// Ordered record of backend calls, shared between a renderer and its
/// instances.
#[derive(Debug, Default)]
pub struct RenderLog {
    calls: Vec<RenderCall>,
    instances: usize,
}

impl RenderLog {
    #[must_use]
    pub fn calls(&self) -> &[RenderCall] {
        &self.calls
    }

    #[must_use]
    pub fn init_count(&self) -> usize {
        self.instances
    }

    #[must_use]
    pub fn clear_count(&self) -> usize {
        self.calls
            .iter()
            .filter(|call| matches!(call, RenderCall::Clear { .. }))
            .count()
    }

    #[must_use]
    pub fn set_option_count(&self) -> usize {
        self.calls
            .iter()
            .filter(|call| matches!(call, RenderCall::SetOption { .. }))
            .count()
    }

    /// Options most recently pushed to any instance.
    #[must_use]
    pub fn last_config(&self) -> Option<&RenderConfig> {
        self.calls.iter().rev().find_map(|call| match call {
            RenderCall::SetOption { config, .. } => Some(config),
            _ => None,
        })
    }
}

/// Headless backend used by tests and hosts without a display.
///
/// It rejects an empty element id, the way a real binding fails when the host
/// element cannot be found, and records every call it receives.
#[derive(Debug, Clone, Default)]
pub struct NullRenderer {
    log: Rc<RefCell<RenderLog>>,
}

impl NullRenderer {
    /// Handle onto the call log that stays readable after the renderer is
    /// moved into a widget.
    #[must_use]
    pub fn log(&self) -> Rc<RefCell<RenderLog>> {
        Rc::clone(&self.log)
    }
}

impl ChartBackend for NullRenderer {
    type Instance = NullChartInstance;

    fn init(
        &mut self,
        element_id: &str,
        theme: Option<&str>,
        options: InitOptions,
    ) -> ChartResult<Self::Instance> {
        if element_id.trim().is_empty() {
            return Err(ChartError::Backend(
                "cannot bind chart to an empty element id".to_owned(),
            ));
        }

        let mut log = self.log.borrow_mut();
        log.instances += 1;
        let instance = log.instances;
        log.calls.push(RenderCall::Init {
            instance,
            element_id: element_id.to_owned(),
            theme: theme.map(str::to_owned),
            options,
        });

        Ok(NullChartInstance {
            instance,
            log: Rc::clone(&self.log),
        })
    }
}

#[derive(Debug)]
pub struct NullChartInstance {
    instance: usize,
    log: Rc<RefCell<RenderLog>>,
}

impl ChartInstance for NullChartInstance {
    fn clear(&mut self) -> ChartResult<()> {
        self.log.borrow_mut().calls.push(RenderCall::Clear {
            instance: self.instance,
        });
        Ok(())
    }

    fn set_option(&mut self, config: &RenderConfig) -> ChartResult<()> {
        self.log.borrow_mut().calls.push(RenderCall::SetOption {
            instance: self.instance,
            config: config.clone(),
        });
        Ok(())
    }
}
