use async_trait::async_trait;

use crate::context::DashboardContext;
use crate::errors::CoreError;
use crate::models::view::{RenderedView, ViewId, ViewRequest};

/// A dashboard page.
///
/// Each page is independent: it reads the shared context, applies the
/// request's transient selections and returns a complete [`RenderedView`].
#[async_trait]
pub trait View: Send + Sync {
    /// Which menu entry this page serves.
    fn id(&self) -> ViewId;

    async fn render(
        &self,
        ctx: &DashboardContext,
        request: &ViewRequest,
    ) -> Result<RenderedView, CoreError>;
}
