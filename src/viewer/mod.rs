// SPDX-License-Identifier: MPL-2.0
//! Display geometry: zoom, panning and device-to-image coordinate mapping.

mod coordinator;
mod drag;

pub use coordinator::ViewCoordinator;
pub use drag::DragState;
