//! JSON-RPC 2.0 communication layer for embedding the planner in a web page.
//!
//! Implements bidirectional messaging between the Bevy app and its host page via
//! iframe postMessage, supporting both request-response and notification patterns.
//!
//! ## Architecture
//!
//! The RPC system uses standard JSON-RPC 2.0 protocol with:
//! - **Requests**: Expect responses with matching IDs
//! - **Notifications**: One-way messages without responses
//! - **Responses**: Reply to requests with results or errors
//!
//! ## Message Flow
//!
//! ```text
//! Host page (parent)     <──postMessage──>  Bevy (iframe)
//!        │                                        │
//!        ├─ Request (with ID) ──────────────────> │
//!        │                                        ├─ Process request
//!        │ <───────────────── Response (with ID) ─┤
//!        │                                        │
//!        │ <────────── Notification (no ID) ─────┤
//! ```
//!
//! ## Adding New RPC Methods
//!
//! Add a case to `handle_rpc_request()` and a handler returning
//! `Result<Value, RpcError>`:
//!
//! ```rust,ignore
//! "your_method_name" => handle_your_method(&request.params, ...),
//! ```
//!
//! Parameters are deserialised with `serde_json::from_value` into a local
//! struct; failures map to `RpcError::invalid_params`.
//!
//! ## Sending Notifications from Bevy
//!
//! Use `WebRpcInterface::send_notification()` to push updates to the host page:
//!
//! ```rust,ignore
//! fn your_system(mut rpc: ResMut<WebRpcInterface>) {
//!     rpc.send_notification("event_name", json!({
//!         "data": "value",
//!         "timestamp": 123456
//!     }));
//! }
//! ```
//!
//! ## Error Handling
//!
//! Standard JSON-RPC 2.0 error codes:
//! - `-32600`: Invalid request
//! - `-32601`: Method not found
//! - `-32602`: Invalid params
//! - `-32603`: Internal error
//!
//! ## Methods
//!
//! - `update_site`: queue a reconfiguration from plot, house and garage
//!   dimensions plus scale. Replies `{"queued": true}`; the outcome arrives
//!   as a notification.
//! - `get_site`: pixel sizes, centers, scale, generation and drag state.
//! - `get_setbacks`: the eight setback distances keyed by structure, then side.
//!
//! ## Notifications
//!
//! - `site_updated`: a new layout was built (`generation`, `plot_size`, `scale`)
//! - `site_update_rejected`: validation failed (`message`, `field`)
//! - `structure_released`: a drag ended (`structure`, `center` in real units)

/// JSON-RPC 2.0 bidirectional communication over postMessage.
///
/// Handles request-response patterns, notifications, and WASM message listeners.
pub mod web_rpc;
