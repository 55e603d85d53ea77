use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::engine::scene::reconfigure::{ReconfigureSiteEvent, ReconfigureSource};
use crate::engine::scene::site_inputs::SiteInputs;
use crate::engine::scene::site_model::{Extent, SiteLayout, StructureKind};
use crate::tools::drag::DragState;
use crate::tools::setback::measure_all;

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::JsValue;

#[cfg(target_arch = "wasm32")]
use web_sys::{MessageEvent, window};

/// JSON-RPC 2.0 request structure.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct RpcRequest {
    pub jsonrpc: String,
    pub method: String,
    #[serde(default)]
    pub params: serde_json::Value,
    pub id: Option<serde_json::Value>,
}

/// JSON-RPC 2.0 response structure.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct RpcResponse {
    pub jsonrpc: String,
    pub result: Option<serde_json::Value>,
    pub error: Option<RpcError>,
    pub id: Option<serde_json::Value>,
}

/// JSON-RPC 2.0 notification structure for one-way communication.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct RpcNotification {
    pub jsonrpc: String,
    pub method: String,
    pub params: serde_json::Value,
}

/// JSON-RPC 2.0 error object.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct RpcError {
    pub code: i32,
    pub message: String,
    pub data: Option<serde_json::Value>,
}

/// Resource managing bidirectional RPC communication with the host page.
#[derive(Resource, Default)]
pub struct WebRpcInterface {
    outgoing_notifications: Vec<RpcNotification>,
    outgoing_responses: Vec<RpcResponse>,
}

impl WebRpcInterface {
    /// Send notification to the host page without expecting a response.
    pub fn send_notification(&mut self, method: &str, params: serde_json::Value) {
        self.outgoing_notifications.push(RpcNotification {
            jsonrpc: "2.0".to_string(),
            method: method.to_string(),
            params,
        });
    }

    fn queue_response(&mut self, response: RpcResponse) {
        self.outgoing_responses.push(response);
    }

    #[cfg(test)]
    pub fn pending_notifications(&self) -> &[RpcNotification] {
        &self.outgoing_notifications
    }
}

/// Plugin establishing the postMessage RPC layer for iframe deployment.
pub struct WebRpcPlugin;

impl Plugin for WebRpcPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<WebRpcInterface>()
            .add_event::<IncomingRpcMessage>()
            .add_systems(
                Update,
                (
                    process_incoming_messages,
                    handle_rpc_messages,
                    send_outgoing_messages,
                )
                    .chain(),
            );

        #[cfg(target_arch = "wasm32")]
        app.add_systems(Startup, setup_message_listener);
    }
}

#[cfg(target_arch = "wasm32")]
fn setup_message_listener(mut commands: Commands) {
    use std::sync::Arc;
    use std::sync::Mutex;

    let message_queue: Arc<Mutex<Vec<String>>> = Arc::new(Mutex::new(Vec::new()));
    let queue_clone = message_queue.clone();

    let closure = Closure::wrap(Box::new(move |event: MessageEvent| {
        if let Ok(data) = event.data().dyn_into::<js_sys::JsString>() {
            let message_str: String = data.into();

            if message_str.contains("jsonrpc") {
                if let Ok(mut queue) = queue_clone.lock() {
                    queue.push(message_str);
                }
            }
        }
    }) as Box<dyn FnMut(MessageEvent)>);

    if let Some(window) = window() {
        if let Err(e) =
            window.add_event_listener_with_callback("message", closure.as_ref().unchecked_ref())
        {
            error!("Failed to register message listener: {:?}", e);
        }
    }

    // Hand ownership of the closure to JS.
    closure.forget();
    commands.insert_resource(MessageQueue(message_queue));
}

/// Messages pushed by the JS listener, drained once per frame.
#[derive(Resource)]
struct MessageQueue(std::sync::Arc<std::sync::Mutex<Vec<String>>>);

#[derive(Event)]
struct IncomingRpcMessage {
    content: String,
}

fn process_incoming_messages(
    message_queue: Option<Res<MessageQueue>>,
    mut message_events: EventWriter<IncomingRpcMessage>,
) {
    let Some(queue_res) = message_queue else {
        return;
    };

    let messages = if let Ok(mut queue) = queue_res.0.lock() {
        std::mem::take(&mut *queue)
    } else {
        Vec::new()
    };

    for message_str in messages {
        message_events.write(IncomingRpcMessage {
            content: message_str,
        });
    }
}

fn handle_rpc_messages(
    mut events: EventReader<IncomingRpcMessage>,
    layout: Option<Res<SiteLayout>>,
    drag: Res<DragState>,
    mut rpc_interface: ResMut<WebRpcInterface>,
    mut reconfigure: EventWriter<ReconfigureSiteEvent>,
) {
    for event in events.read() {
        match serde_json::from_str::<RpcRequest>(&event.content) {
            Ok(request) => {
                let response = handle_rpc_request(
                    &request,
                    layout.as_deref(),
                    &drag,
                    &mut reconfigure,
                );
                if let Some(response) = response {
                    rpc_interface.queue_response(response);
                }
            }
            Err(parse_error) => {
                warn!("Ignoring malformed RPC message: {}", parse_error);
            }
        }
    }
}

/// Dispatch one request. Only requests carrying an ID get a response.
fn handle_rpc_request(
    request: &RpcRequest,
    layout: Option<&SiteLayout>,
    drag: &DragState,
    reconfigure: &mut EventWriter<ReconfigureSiteEvent>,
) -> Option<RpcResponse> {
    let result = match request.method.as_str() {
        "update_site" => handle_update_site(&request.params, reconfigure),
        "get_site" => require_layout(layout).map(|layout| site_snapshot(layout, drag)),
        "get_setbacks" => require_layout(layout).map(setbacks_snapshot),
        _ => {
            warn!("Unknown RPC method: {}", request.method);
            return Some(create_error_response(
                request.id.clone()?,
                -32601,
                "Method not found",
                Some(serde_json::json!({"method": request.method})),
            ));
        }
    };

    let id = request.id.clone()?;
    match result {
        Ok(result_value) => Some(RpcResponse {
            jsonrpc: "2.0".to_string(),
            result: Some(result_value),
            error: None,
            id: Some(id),
        }),
        Err(error) => Some(RpcResponse {
            jsonrpc: "2.0".to_string(),
            result: None,
            error: Some(error),
            id: Some(id),
        }),
    }
}

#[derive(Deserialize)]
struct UpdateSiteParams {
    plot_width: f32,
    plot_height: f32,
    house_width: f32,
    house_height: f32,
    garage_width: f32,
    garage_height: f32,
    scale: f32,
}

/// Convert `update_site` params into raw inputs. Range checks are left to
/// the reconfiguration itself, which reports through `site_update_rejected`.
fn parse_update_site(params: &serde_json::Value) -> Result<SiteInputs, RpcError> {
    let p = serde_json::from_value::<UpdateSiteParams>(params.clone()).map_err(|e| {
        RpcError::invalid_params(&format!("Expected numeric site dimensions: {e}"))
    })?;

    Ok(SiteInputs::from_values(
        Extent::new(p.plot_width, p.plot_height),
        Extent::new(p.house_width, p.house_height),
        Extent::new(p.garage_width, p.garage_height),
        p.scale,
    ))
}

fn handle_update_site(
    params: &serde_json::Value,
    reconfigure: &mut EventWriter<ReconfigureSiteEvent>,
) -> Result<serde_json::Value, RpcError> {
    let inputs = parse_update_site(params)?;
    reconfigure.write(ReconfigureSiteEvent {
        inputs,
        source: ReconfigureSource::Rpc,
    });
    info!("Site update queued from RPC");

    Ok(serde_json::json!({ "queued": true }))
}

fn require_layout(layout: Option<&SiteLayout>) -> Result<&SiteLayout, RpcError> {
    layout.ok_or_else(|| RpcError::internal_error("Site is not configured yet"))
}

fn site_snapshot(layout: &SiteLayout, drag: &DragState) -> serde_json::Value {
    let structure = |kind: StructureKind| {
        let footprint = layout.footprint(kind);
        serde_json::json!({
            "size": [footprint.size.x, footprint.size.y],
            "center": [footprint.center.x, footprint.center.y],
        })
    };

    serde_json::json!({
        "generation": layout.generation,
        "scale": layout.scale(),
        "plot_size": [layout.plot_size.x, layout.plot_size.y],
        "house": structure(StructureKind::House),
        "garage": structure(StructureKind::Garage),
        "dragging": drag.is_dragging(),
        "selected": drag.selected().map(|kind| kind.as_str()),
    })
}

fn setbacks_snapshot(layout: &SiteLayout) -> serde_json::Value {
    let mut by_structure = serde_json::Map::new();
    for measurement in measure_all(layout) {
        let entry = by_structure
            .entry(measurement.structure.as_str())
            .or_insert_with(|| serde_json::json!({}));
        entry[measurement.side.as_str()] = serde_json::json!(measurement.distance);
    }
    serde_json::Value::Object(by_structure)
}

fn create_error_response(
    id: serde_json::Value,
    code: i32,
    message: &str,
    data: Option<serde_json::Value>,
) -> RpcResponse {
    RpcResponse {
        jsonrpc: "2.0".to_string(),
        result: None,
        error: Some(RpcError {
            code,
            message: message.to_string(),
            data,
        }),
        id: Some(id),
    }
}

/// Send queued notifications, then responses, to the host page.
fn send_outgoing_messages(mut rpc_interface: ResMut<WebRpcInterface>) {
    for notification in rpc_interface.outgoing_notifications.drain(..) {
        send_message_to_parent(&notification);
    }

    for response in rpc_interface.outgoing_responses.drain(..) {
        send_message_to_parent(&response);
    }
}

fn send_message_to_parent<T: Serialize>(message: &T) {
    #[cfg(target_arch = "wasm32")]
    {
        match serde_json::to_string(message) {
            Ok(json) => {
                if let Some(window) = window() {
                    if let Some(parent) = window.parent().ok().flatten() {
                        if let Err(e) = parent.post_message(&JsValue::from_str(&json), "*") {
                            error!("Failed to send message to parent: {:?}", e);
                        }
                    } else {
                        warn!("No parent window available for message transmission");
                    }
                } else {
                    error!("Window object not available");
                }
            }
            Err(e) => {
                error!("Failed to serialize message: {}", e);
            }
        }
    }

    #[cfg(not(target_arch = "wasm32"))]
    {
        let _ = message;
    }
}

/// Standard RPC error codes and constructors.
impl RpcError {
    pub fn invalid_params(message: &str) -> Self {
        Self {
            code: -32602,
            message: message.to_string(),
            data: None,
        }
    }

    pub fn internal_error(message: &str) -> Self {
        Self {
            code: -32603,
            message: message.to_string(),
            data: None,
        }
    }
}
