use crate::domain::entities::chart::{ChartError, ChartSpec};

pub trait ChartRenderer: Send + Sync {
    /// Renders the chart into a standalone SVG document.
    fn render_svg(&self, spec: &ChartSpec) -> Result<String, ChartError>;
}
