use async_trait::async_trait;

use crate::context::DashboardContext;
use crate::errors::CoreError;
use crate::models::upload::UploadOutcome;
use crate::models::view::{RenderedView, TableWidget, ViewId, ViewRequest, Widget};
use crate::services::upload_service::UploadService;

use super::traits::View;

/// Row count and preview for each uploaded CSV file.
pub struct UploadView;

impl UploadView {
    pub fn new() -> Self {
        Self
    }
}

impl Default for UploadView {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl View for UploadView {
    fn id(&self) -> ViewId {
        ViewId::UploadNewData
    }

    async fn render(
        &self,
        ctx: &DashboardContext,
        request: &ViewRequest,
    ) -> Result<RenderedView, CoreError> {
        let mut page = RenderedView::new(self.id(), "📂 Upload CSV Files");

        if request.uploads.is_empty() {
            page.push(Widget::Info("No files uploaded.".into()));
            return Ok(page);
        }

        let service = UploadService::new(ctx.settings().preview_rows);
        for outcome in service.ingest(&request.uploads) {
            match outcome {
                UploadOutcome::Parsed(preview) => {
                    page.push(Widget::Success(format!(
                        "Uploaded: {} - {} rows",
                        preview.name, preview.row_count
                    )));
                    page.push(Widget::Table(TableWidget {
                        columns: preview.headers,
                        rows: preview.rows,
                    }));
                }
                UploadOutcome::Failed { name, reason } => {
                    page.push(Widget::Warning(format!("Could not parse {name}: {reason}")));
                }
            }
        }

        Ok(page)
    }
}
