//! An in-process stand-in for a fixture's HTTP API.

#![allow(dead_code)]

use std::convert::Infallible;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use hyper::service::{make_service_fn, service_fn};
use hyper::{Body, Method, Request, Response, Server, StatusCode};
use serde_json::{Value, json};

/// What the fake firmware currently holds, in wire units.
#[derive(Debug, Clone)]
pub struct DeviceState {
    pub on: u8,
    pub brightness: u8,
    pub temperature: u16,
    /// Report this brightness after any write, as if firmware adjusted it.
    pub brightness_override: Option<u8>,
    /// Answer `/elgato/lights` with a body that is not the expected shape.
    pub malformed: bool,
    /// Hold every response for this long.
    pub stall: Option<Duration>,
    pub requests: Vec<(Method, String, Value)>,
}

impl Default for DeviceState {
    fn default() -> Self {
        DeviceState {
            on: 0,
            brightness: 50,
            temperature: 277,
            brightness_override: None,
            malformed: false,
            stall: None,
            requests: Vec::new(),
        }
    }
}

pub struct FakeFixture {
    pub addr: SocketAddr,
    pub device: Arc<Mutex<DeviceState>>,
}

impl FakeFixture {
    pub async fn start() -> Self {
        Self::start_with(DeviceState::default()).await
    }

    pub async fn start_with(state: DeviceState) -> Self {
        let device = Arc::new(Mutex::new(state));
        let shared = device.clone();
        let make_svc = make_service_fn(move |_conn| {
            let device = shared.clone();
            async move {
                Ok::<_, Infallible>(service_fn(move |req| handle(device.clone(), req)))
            }
        });

        let server = Server::bind(&SocketAddr::from(([127, 0, 0, 1], 0))).serve(make_svc);
        let addr = server.local_addr();
        tokio::spawn(server);

        FakeFixture { addr, device }
    }

    pub fn port(&self) -> u16 {
        self.addr.port()
    }

    pub fn update(&self, f: impl FnOnce(&mut DeviceState)) {
        f(&mut self.device.lock().unwrap());
    }

    pub fn snapshot(&self) -> DeviceState {
        self.device.lock().unwrap().clone()
    }

    pub fn request_count(&self) -> usize {
        self.device.lock().unwrap().requests.len()
    }

    pub fn last_request(&self) -> Option<(Method, String, Value)> {
        self.device.lock().unwrap().requests.last().cloned()
    }
}

fn accessory_info() -> Value {
    json!({
        "productName": "Elgato Ring Light",
        "hardwareBoardType": 53,
        "firmwareBuildNumber": 218,
        "firmwareVersion": "1.0.3",
        "serialNumber": "CW01J1A01234",
        "displayName": "Desk Ring",
        "features": ["lights"],
    })
}

fn lights_body(device: &DeviceState) -> Value {
    json!({
        "numberOfLights": 1,
        "lights": [{
            "on": device.on,
            "brightness": device.brightness,
            "temperature": device.temperature,
        }]
    })
}

fn json_response(status: StatusCode, body: &Value) -> Response<Body> {
    Response::builder()
        .status(status)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn handle(
    device: Arc<Mutex<DeviceState>>,
    req: Request<Body>,
) -> Result<Response<Body>, Infallible> {
    let method = req.method().clone();
    let path = req.uri().path().to_string();
    let bytes = hyper::body::to_bytes(req.into_body()).await.unwrap();
    let body: Value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);

    let stall = {
        let mut device = device.lock().unwrap();
        device.requests.push((method.clone(), path.clone(), body.clone()));
        device.stall
    };
    if let Some(delay) = stall {
        tokio::time::sleep(delay).await;
    }

    let mut device = device.lock().unwrap();
    let response = match (method, path.as_str()) {
        (Method::GET, "/elgato/accessory-info") => json_response(StatusCode::OK, &accessory_info()),
        (_, "/elgato/lights") if device.malformed => {
            json_response(StatusCode::OK, &json!({"lights": "nope"}))
        }
        (Method::GET, "/elgato/lights") => json_response(StatusCode::OK, &lights_body(&device)),
        (Method::PUT, "/elgato/lights") => {
            let light = &body["lights"][0];
            if let Some(on) = light["on"].as_u64() {
                device.on = on as u8;
            }
            if let Some(brightness) = light["brightness"].as_u64() {
                device.brightness = device.brightness_override.unwrap_or(brightness as u8);
            }
            if let Some(temperature) = light["temperature"].as_u64() {
                device.temperature = temperature as u16;
            }
            json_response(StatusCode::OK, &lights_body(&device))
        }
        _ => json_response(StatusCode::NOT_FOUND, &json!({})),
    };
    Ok(response)
}
