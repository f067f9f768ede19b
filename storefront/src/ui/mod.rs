//! # Headless UI Layer
//!
//! State for everything a storefront page shows besides its content:
//!
//! - **[`notifications`]**: per-target inline messages with auto-hide
//! - **[`overlay`]**: the blocking busy overlay
//! - **[`modal`]**: the login-required modal
//! - **[`bindings`]**: display cells and bound forms owned by page controllers
//! - **[`navigator`]**: delayed redirects emitted as [`crate::AppEvent`]s
//! - **[`state`]**: [`UiState`], the bundle handed to every controller
//!
//! Nothing here draws. A host renders the snapshots (`view()`) however it likes.

pub mod bindings;
pub mod modal;
pub mod navigator;
pub mod notifications;
pub mod overlay;
pub mod state;

pub use bindings::{BoundForm, DisplayCell};
pub use modal::{LoginModal, LOGIN_PAGE};
pub use navigator::Navigator;
pub use notifications::{MessageKind, MessagePhase, MessageView, NotificationSurface};
pub use overlay::{BusyOverlay, OverlayIcon, OverlayView};
pub use state::UiState;
