//! Terminal graph of the tracked metrics.
//! [TerminalVisualizer] is the main artifact of this module. The rest is split into the data
//! shown ([model]), the visible window ([view]), drawing ([render]) and keybindings ([input]).

pub mod app;
pub mod input;
pub mod model;
pub mod render;
pub mod style;
pub mod view;

use anyhow::Result;
use tracing::{debug, instrument};

use crate::{
    series::{interpolation::FillPolicy, DateRange},
    storage::entities::Dataset,
};

use self::{app::App, model::ChartModel};

/// Intended to serve as a contract for showing metrics to the user.
#[cfg_attr(test, mockall::automock)]
pub trait Visualizer {
    /// Shows every metric of `dataset` with gaps filled by `policy`. `zoom` is the initial date
    /// window. Returns once the user is done looking.
    fn render(
        &mut self,
        dataset: &Dataset,
        policy: FillPolicy,
        zoom: Option<DateRange>,
    ) -> Result<()>;
}

/// Interactive graph drawn in the alternate screen of the terminal.
pub struct TerminalVisualizer;

impl Visualizer for TerminalVisualizer {
    #[instrument(skip(self, dataset))]
    fn render(
        &mut self,
        dataset: &Dataset,
        policy: FillPolicy,
        zoom: Option<DateRange>,
    ) -> Result<()> {
        let model = ChartModel::build(dataset, policy);
        debug!(
            "Showing {} series over {:?}",
            model.series.len(),
            model.span
        );
        App::new(&model, zoom).run()?;
        Ok(())
    }
}
