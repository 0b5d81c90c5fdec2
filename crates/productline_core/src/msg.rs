use crate::{ErrorInfo, PanelMsg, ProductLine, ProductLineId, StoreAction, Timestamp};

#[derive(Debug, Clone, PartialEq)]
pub enum Msg {
    /// Start the bulk product-line load.
    LoadProductLines,
    /// Bulk load finished; `received_at` anchors the default window of new panels.
    ProductLinesLoaded {
        records: Vec<ProductLine>,
        received_at: Timestamp,
    },
    ProductLinesFailed(ErrorInfo),
    /// Fetch and import lifecycle for the job store.
    Store(StoreAction),
    /// Interaction with, or fetch result for, one product line's panel.
    Panel {
        product_line_id: ProductLineId,
        msg: PanelMsg,
    },
    /// UI/render tick to coalesce rendering.
    Tick,
}
