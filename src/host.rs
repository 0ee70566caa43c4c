//! ytcontrols host: newline-delimited JSON over stdin/stdout.
//!
//! Protocol: one JSON object per line.
//! Request:  {"id":1, "shortcut":"Ctrl+Shift+Space"}
//!           {"id":2, "command":"forward-10s"}
//! Response: {"id":1, "result":{...}} or {"id":1, "error":"..."}
//!
//! Drives the extension core against the simulated browser, seeded with one
//! YouTube watch tab carrying a playing video.

use std::io::{self, BufRead, Write};
use std::time::Instant;

use serde_json::{json, Value};

use ytcontrols::app::Extension;
use ytcontrols::platform::sim::SimBrowser;
use ytcontrols::services::settings::ControlSettings;
use ytcontrols::types::command::Command;

/// Simple rate limiter: max shortcut triggers per second. Duplicate presses
/// beyond this are dropped rather than queued.
struct RateLimiter {
    window_start: Instant,
    request_count: u32,
    max_per_second: u32,
}

impl RateLimiter {
    fn new(max_per_second: u32) -> Self {
        Self {
            window_start: Instant::now(),
            request_count: 0,
            max_per_second,
        }
    }

    /// Returns true if the request is allowed, false if rate-limited.
    fn check(&mut self) -> bool {
        if self.window_start.elapsed().as_secs() >= 1 {
            self.window_start = Instant::now();
            self.request_count = 0;
        }
        self.request_count += 1;
        self.request_count <= self.max_per_second
    }
}

fn seed() -> Extension<SimBrowser> {
    let mut browser = SimBrowser::new();
    let watch = browser.open_tab("https://www.youtube.com/watch?v=seed", true);
    if let Some(page) = browser.page(watch) {
        let media = page.load_video(600.0);
        media.begin_playback(1.0);
    }
    let mut ext = Extension::new(browser, ControlSettings::load());
    ext.startup();
    ext
}

/// Deliver pending page detection ticks, forwarding readiness signals the
/// way the platform would.
fn pump(ext: &mut Extension<SimBrowser>) {
    for id in ext.coordinator.platform().tab_ids() {
        if ext.coordinator.platform_mut().tick_page(id) {
            ext.coordinator.on_tab_ready(id);
        }
    }
}

fn handle(ext: &mut Extension<SimBrowser>, request: &Value) -> Result<Value, String> {
    pump(ext);

    if let Some(keys) = request.get("shortcut").and_then(|v| v.as_str()) {
        if !ext.handle_shortcut(keys) {
            return Err(format!("no command bound to '{}'", keys));
        }
    } else if let Some(name) = request.get("command").and_then(|v| v.as_str()) {
        let command = Command::from_wire(name).ok_or_else(|| format!("unknown command: {}", name))?;
        ext.handle_command(command);
    } else {
        return Err("missing 'shortcut' or 'command'".to_string());
    }

    let coordinator = &ext.coordinator;
    Ok(json!({
        "ok": true,
        "active_tab": coordinator.active_tab().map(|id| id.0),
        "last_notification": coordinator.platform().last_notification().map(|n| n.id.clone()),
    }))
}

fn main() {
    env_logger::init();

    let mut ext = seed();

    // Signal ready
    let ready = json!({"event": "ready", "version": env!("CARGO_PKG_VERSION")});
    println!("{}", ready);
    let _ = io::stdout().flush();

    // Shortcut floods are dropped, not queued; each press is independent.
    let mut rate_limiter = RateLimiter::new(20);

    let stdin = io::stdin();
    for line in stdin.lock().lines() {
        let line = match line {
            Ok(l) => l,
            Err(_) => break,
        };
        if line.trim().is_empty() {
            continue;
        }

        let request: Value = match serde_json::from_str(&line) {
            Ok(v) => v,
            Err(e) => {
                println!("{}", json!({"id": null, "error": format!("parse error: {}", e)}));
                let _ = io::stdout().flush();
                continue;
            }
        };

        let id = request.get("id").cloned().unwrap_or(Value::Null);

        if !rate_limiter.check() {
            println!("{}", json!({"id": id, "error": "rate limit exceeded"}));
            let _ = io::stdout().flush();
            continue;
        }

        let response = match handle(&mut ext, &request) {
            Ok(result) => json!({"id": id, "result": result}),
            Err(error) => json!({"id": id, "error": error}),
        };
        println!("{}", response);
        let _ = io::stdout().flush();
    }
}
