//! Host-side helper: `cargo run` builds the wasm bundle into `static/pkg` and
//! serves the demo page from `static/`.

use std::process::{Command, Stdio};
use std::{env, thread, time::Duration};

const PORT: &str = "8000";

fn main() {
    // Only meaningful on non-wasm targets.
    if env::var("TARGET").unwrap_or_default() == "wasm32-unknown-unknown" {
        return;
    }

    println!("Building WASM pkg …");
    match Command::new("wasm-pack")
        .args(["build", "--release", "--target", "web", "--out-dir", "static/pkg"])
        .status()
    {
        Ok(st) if st.success() => {}
        Ok(_) => {
            eprintln!("wasm-pack build of backdrop_wasm failed; see the output above.");
            std::process::exit(1);
        }
        Err(_) => {
            eprintln!("wasm-pack is not installed; serving whatever is already in static/pkg.");
        }
    }

    println!("Serving backdrop demo at http://127.0.0.1:{PORT} …");
    let server = Command::new("python3")
        .args(["-m", "http.server", PORT, "--directory", "static"])
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn();
    if server.is_err() {
        eprintln!("python3 not found; serve static/ with any HTTP server instead.");
        std::process::exit(1);
    }

    // Keep process alive
    loop {
        thread::sleep(Duration::from_secs(60));
    }
}
