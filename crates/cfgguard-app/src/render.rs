//! Render use cases: markdown, GitHub annotations, and terminal text from in-memory reports.

use cfgguard_render::RenderableReport;

pub fn render_markdown(report: &RenderableReport) -> String {
    cfgguard_render::render_markdown(report)
}

pub fn render_annotations(report: &RenderableReport, max: usize) -> Vec<String> {
    cfgguard_render::render_github_annotations(report)
        .into_iter()
        .take(max)
        .collect()
}

pub fn render_text(report: &RenderableReport) -> String {
    cfgguard_render::render_text(report)
}
