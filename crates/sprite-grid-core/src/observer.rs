use crate::model::LayoutPlan;

/// A pipeline stage that just completed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Planned(LayoutPlan),
    Placed { count: usize },
    Composed { width: u32, height: u32 },
    Documented { image_count: usize, unique_keys: usize },
}

impl Stage {
    pub fn label(&self) -> &'static str {
        match self {
            Stage::Planned(_) => "planned",
            Stage::Placed { .. } => "placed",
            Stage::Composed { .. } => "composed",
            Stage::Documented { .. } => "documented",
        }
    }
}

/// Receives a notification after each successful pipeline stage.
///
/// Observers see results but cannot alter them; a failing stage produces no
/// notification.
pub trait PackObserver {
    fn on_stage(&mut self, stage: Stage);
}

/// Observer that ignores everything.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopObserver;

impl PackObserver for NoopObserver {
    fn on_stage(&mut self, _stage: Stage) {}
}

impl<F: FnMut(Stage)> PackObserver for F {
    fn on_stage(&mut self, stage: Stage) {
        self(stage)
    }
}
