//! Typed wrappers around JS interop via `js_sys::eval()`.
//!
//! The map is drawn by Plotly. `assets/js/choropleth-map.js` is embedded at
//! compile time and evaluated as a global once Plotly has loaded; the
//! functions here serialize map layers and call into it.

use fdv_dashboard::render::MapLayer;

static CHOROPLETH_MAP_JS: &str = include_str!("../assets/js/choropleth-map.js");

/// Execute arbitrary JS, wrapping in try/catch to avoid panics.
pub fn call_js(code: &str) {
    let wrapped = format!(
        "try {{ {} }} catch(e) {{ console.warn('FDV JS call failed:', e); }}",
        code
    );
    let _ = js_sys::eval(&wrapped);
}

/// Evaluate the map script once Plotly is available. Call once at app startup.
///
/// The script is stored on `window` and evaluated with an indirect `eval`
/// so its function declarations land at global scope rather than inside
/// the polling callback.
pub fn init_map() {
    let store_js = format!(
        "window.__fdvMapScript = {};",
        serde_json::to_string(CHOROPLETH_MAP_JS).unwrap_or_default()
    );
    let _ = js_sys::eval(&store_js);

    let init_js = r#"
        (function() {
            if (window.__fdvMapReady || window.__fdvMapPending) { return; }
            window.__fdvMapPending = true;
            var waitForPlotly = setInterval(function() {
                if (typeof Plotly !== 'undefined') {
                    clearInterval(waitForPlotly);
                    (0, eval)(window.__fdvMapScript);
                    delete window.__fdvMapScript;
                    if (typeof renderChoroplethMap !== 'undefined') window.renderChoroplethMap = renderChoroplethMap;
                    window.__fdvMapReady = true;
                    console.log('FDV map initialized');
                }
            }, 100);
        })();
    "#;
    let _ = js_sys::eval(init_js);
}

/// Draw `layer` into the element with id `container_id`.
///
/// Polls until the map script is ready and the container exists, so it is
/// safe to call right after the container is first rendered.
pub fn render_choropleth_map(container_id: &str, layer: &MapLayer) {
    let layer_json = match serde_json::to_string(layer) {
        Ok(json) => json,
        Err(e) => {
            log::error!("Failed to serialize map layer: {}", e);
            return;
        }
    };
    // JSON string literal, safe to splice into JS source
    let layer_literal = serde_json::to_string(&layer_json).unwrap_or_default();
    call_js(&format!(
        r#"
        (function() {{
            var poll = setInterval(function() {{
                if (window.__fdvMapReady &&
                    typeof window.renderChoroplethMap !== 'undefined' &&
                    document.getElementById('{container_id}')) {{
                    clearInterval(poll);
                    try {{
                        window.renderChoroplethMap('{container_id}', {layer_literal});
                    }} catch(e) {{ console.error('[FDV] renderChoroplethMap error:', e); }}
                }}
            }}, 100);
        }})();
        "#,
    ));
}
