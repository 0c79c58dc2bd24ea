//! Shared type definitions for the DevEvents service.
//!
//! Every crate in the workspace speaks in these types. The transport shapes
//! in [`models`] also flow to `TypeScript` via `ts-rs`.
//!
//! # Modules
//!
//! - [`ids`] -- Type-safe UUID wrappers for event and speaker identifiers
//! - [`structs`] -- The `Event`/`Speaker` aggregate and the field sets written to storage
//! - [`models`] -- Request inputs and response views

pub mod ids;
pub mod models;
pub mod structs;

// Re-export all public types at crate root for convenience.
pub use ids::{EventId, SpeakerId};
pub use models::{EventInput, EventView, SpeakerInput, SpeakerView};
pub use structs::{DESCRIPTION_MAX_CHARS, Event, EventFields, Speaker, SpeakerFields};

#[cfg(test)]
mod tests {
    //! `TypeScript` binding generation for the wire shapes.

    #[test]
    fn export_bindings() {
        // Files land in `bindings/` relative to the crate root.
        use ts_rs::TS;

        let _ = crate::ids::EventId::export_all();
        let _ = crate::ids::SpeakerId::export_all();

        let _ = crate::models::EventInput::export_all();
        let _ = crate::models::SpeakerInput::export_all();
        let _ = crate::models::EventView::export_all();
        let _ = crate::models::SpeakerView::export_all();
    }
}
