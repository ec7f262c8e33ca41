use serde::{Deserialize, Serialize};

use crate::dom::dom_model::NodeId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PointerEvent {
    Over,
    Out,
    Click,
}

/// Messages a page context answers, tagged by `type` on the wire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Request {
    ToggleInspector {
        /// Drop all inspector state before toggling.
        #[serde(default)]
        reset: bool,
    },
    GetSelectedDom,
    ClearSelection,
    Cleanup,
    /// Pointer event forwarded by the host page.
    Pointer { event: PointerEvent, node: NodeId },
    /// Scan now, or with `debounced` go through the capture timer and answer
    /// once the pass has run.
    CaptureNow {
        #[serde(default)]
        debounced: bool,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Response {
    #[serde(rename_all = "camelCase")]
    InspectorState { is_active: bool, has_content: bool },
    SelectedDom { dom: Vec<String> },
    /// Pushed after a click changes the selection.
    SelectedDomContent { content: String },
    Success { success: bool },
    Captured { elements: usize, fingerprint: String },
    Error { error: String },
}

/// Handler outcome. `respond_async` tells the sender to keep its channel
/// open because the answer arrives later.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    pub response: Option<Response>,
    pub respond_async: bool,
}

impl Reply {
    pub fn now(response: Response) -> Self {
        Self {
            response: Some(response),
            respond_async: false,
        }
    }

    pub fn none() -> Self {
        Self {
            response: None,
            respond_async: false,
        }
    }

    pub fn later() -> Self {
        Self {
            response: None,
            respond_async: true,
        }
    }

    pub fn success() -> Self {
        Self::now(Response::Success { success: true })
    }
}
