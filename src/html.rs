//! Static HTML assembly.
//!
//! The dashboard page is a single self-contained file: template + inlined
//! or CDN-referenced Vega bundles + one `<script>` block carrying the
//! explorer configuration, precomputed bins, and base64 typed arrays.
//! Injection works the way the prototypes did: the payload script is
//! spliced in immediately before `</body>`.

use crate::data::{DataError, DataResult};
use crate::settings::Theme;
use std::path::Path;

/// CDN locations of the charting bundles, used when no vendor dir is given.
pub const VEGA_CDN_URLS: [&str; 3] = [
    "https://cdn.jsdelivr.net/npm/vega@5/build/vega.min.js",
    "https://cdn.jsdelivr.net/npm/vega-lite@5/build/vega-lite.min.js",
    "https://cdn.jsdelivr.net/npm/vega-embed@6/build/vega-embed.min.js",
];

/// File names expected inside a vendor directory for offline output.
pub const VENDOR_BUNDLES: [&str; 3] = ["vega.min.js", "vega-lite.min.js", "vega-embed.min.js"];

/// Render the full dashboard page.
///
/// `payload_json` is the serialized build output (config, bins, vega spec,
/// typed arrays); `template` overrides the built-in page when given.
pub fn render_page(
    title: &str,
    payload_json: &str,
    theme: Theme,
    vendor_dir: Option<&Path>,
    template: Option<&Path>,
) -> DataResult<String> {
    let mut html = match template {
        Some(path) => std::fs::read_to_string(path)?,
        None => default_template(theme),
    };

    html = html.replace("{{TITLE}}", title);
    html = html.replace("{{VEGA_SCRIPTS}}", &vega_scripts(vendor_dir)?);

    let script = format!(
        "<script>\nwindow.DATADECK_CONFIG = {payload_json};\n</script>\n<script>\n{}\n</script>",
        RUNTIME_JS
    );
    Ok(inject_before_body(&html, &script))
}

/// Splice `script` in just before the closing `</body>` tag, appending at
/// the end when the template has none.
pub fn inject_before_body(html: &str, script: &str) -> String {
    if html.contains("</body>") {
        html.replacen("</body>", &format!("{script}\n</body>"), 1)
    } else {
        let mut out = html.to_string();
        out.push('\n');
        out.push_str(script);
        out
    }
}

/// Script tags for the Vega bundles: inlined file contents when a vendor
/// directory is supplied, CDN references otherwise.
fn vega_scripts(vendor_dir: Option<&Path>) -> DataResult<String> {
    match vendor_dir {
        None => Ok(VEGA_CDN_URLS
            .iter()
            .map(|url| format!("<script src=\"{url}\"></script>"))
            .collect::<Vec<_>>()
            .join("\n")),
        Some(dir) => {
            let mut scripts = String::new();
            for bundle in VENDOR_BUNDLES {
                let path = dir.join(bundle);
                let content = std::fs::read_to_string(&path).map_err(|e| {
                    DataError::InvalidData(format!("vendor bundle {}: {e}", path.display()))
                })?;
                scripts.push_str("<script>\n");
                scripts.push_str(&content);
                scripts.push_str("\n</script>\n");
            }
            Ok(scripts)
        }
    }
}

fn default_template(theme: Theme) -> String {
    let (bg, panel, text, accent, muted, border) = match theme {
        Theme::Dark => ("#0d1117", "#161b22", "#c9d1d9", "#58a6ff", "#8b949e", "#30363d"),
        Theme::Light => ("#ffffff", "#f6f8fa", "#1f2328", "#0969da", "#656d76", "#d0d7de"),
    };

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{{{{TITLE}}}}</title>
    <style>
        * {{ margin: 0; padding: 0; box-sizing: border-box; }}
        body {{ font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Arial, sans-serif; background: {bg}; color: {text}; }}
        .header {{ background: {panel}; border-bottom: 1px solid {border}; padding: 15px 20px; display: flex; justify-content: space-between; align-items: center; }}
        .header h1 {{ color: {accent}; font-size: 20px; margin: 0; }}
        .stats {{ display: flex; gap: 15px; font-size: 13px; }}
        .stats strong {{ color: {accent}; }}
        .mini-grid {{ display: flex; gap: 8px; padding: 10px 20px; }}
        .mini-panel {{ background: {panel}; border: 1px solid {border}; border-radius: 6px; padding: 12px 16px; text-align: center; min-width: 120px; }}
        .mini-value {{ font-size: 22px; font-weight: 600; color: {accent}; }}
        .mini-label {{ font-size: 11px; color: {muted}; margin-top: 4px; text-transform: uppercase; letter-spacing: 0.5px; }}
        .main-container {{ display: flex; gap: 20px; padding: 20px; }}
        #visualization {{ background: {panel}; border: 1px solid {border}; border-radius: 6px; padding: 20px; flex: 1; }}
        .stats-panel {{ background: {panel}; border: 1px solid {border}; border-radius: 6px; padding: 20px; width: 300px; }}
        .stats-panel h3 {{ color: {accent}; margin-top: 0; margin-bottom: 15px; }}
        .stat-group {{ margin-bottom: 20px; }}
        .stat-group h4 {{ color: {text}; margin: 10px 0 5px 0; font-size: 14px; }}
        .stat-item {{ display: flex; justify-content: space-between; padding: 3px 0; font-size: 13px; }}
        .stat-label {{ color: {muted}; }}
        .stat-value {{ color: {text}; font-weight: 600; }}
        button {{ background: #238636; color: white; border: none; padding: 6px 12px; border-radius: 6px; cursor: pointer; font-size: 13px; font-weight: 500; }}
        button:hover {{ background: #2ea043; }}
        .loading {{ text-align: center; padding: 40px; color: {muted}; }}
    </style>
</head>
<body>
    <div class="header">
        <h1 id="title">{{{{TITLE}}}}</h1>
        <div class="stats">
            <span>Total: <strong id="totalRows">0</strong></span>
            <span>Selected: <strong id="selectedRows">-</strong></span>
            <span><strong id="selectedPercent">100%</strong></span>
        </div>
        <div>
            <button onclick="Datadeck.exportCsv()">Export CSV</button>
        </div>
    </div>
    <div class="mini-grid" id="miniGrid"></div>
    <div class="main-container">
        <div id="visualization">
            <div class="loading">Loading visualization...</div>
        </div>
        <div class="stats-panel">
            <h3>Summary Statistics</h3>
            <div id="column-stats"></div>
        </div>
    </div>
    {{{{VEGA_SCRIPTS}}}}
</body>
</html>"#
    )
}

/// Client-side runtime: decodes typed arrays, materializes rows, embeds
/// the Vega view, and keeps the stats panel in sync with the brush.
const RUNTIME_JS: &str = r#"
const Datadeck = (() => {
    const cfg = window.DATADECK_CONFIG;
    let rows = [];
    let typed = {};
    let view = null;

    function decodeTypedArray(encoded) {
        const bytes = atob(encoded.data);
        const buffer = new ArrayBuffer(bytes.length);
        const u8 = new Uint8Array(buffer);
        for (let i = 0; i < bytes.length; i++) u8[i] = bytes.charCodeAt(i);
        switch (encoded.dtype) {
            case 'float32': return new Float32Array(buffer);
            case 'uint32': return new Uint32Array(buffer);
            case 'uint16': return new Uint16Array(buffer);
            case 'uint8': return new Uint8Array(buffer);
            default: throw new Error('Unknown dtype: ' + encoded.dtype);
        }
    }

    function materialize() {
        const cols = cfg.payload.metadata.columns;
        for (const col of cols) {
            const encoded = cfg.payload.data[col];
            const arr = decodeTypedArray(encoded);
            typed[col] = encoded.labels
                ? Array.from(arr, c => encoded.labels[c])
                : arr;
        }
        const n = cfg.payload.metadata.total_rows;
        rows = new Array(n);
        for (let i = 0; i < n; i++) {
            const row = {};
            for (const col of cols) row[col] = typed[col][i];
            rows[i] = row;
        }
    }

    function sampleRows(size) {
        const step = Math.max(1, Math.floor(rows.length / size));
        const out = [];
        for (let i = 0; i < rows.length && out.length < size; i += step) out.push(rows[i]);
        return out;
    }

    function columnStats(values) {
        const sorted = Array.from(values).sort((a, b) => a - b);
        const n = sorted.length;
        if (n === 0) return null;
        const mean = sorted.reduce((a, b) => a + b, 0) / n;
        const variance = sorted.reduce((acc, v) => acc + Math.pow(v - mean, 2), 0) / n;
        return {
            min: sorted[0],
            max: sorted[n - 1],
            mean: mean,
            median: n % 2 === 0 ? (sorted[n / 2 - 1] + sorted[n / 2]) / 2 : sorted[Math.floor(n / 2)],
            stdDev: Math.sqrt(variance)
        };
    }

    function updateStats(selection) {
        let indices = [];
        if (!selection || Object.keys(selection).length === 0) {
            document.getElementById('selectedRows').textContent = 'All';
            document.getElementById('selectedPercent').textContent = '100%';
            indices = Array.from({ length: rows.length }, (_, i) => i);
        } else {
            for (let i = 0; i < rows.length; i++) {
                let keep = true;
                for (const [field, range] of Object.entries(selection)) {
                    const v = typed[field][i];
                    if (v < range[0] || v > range[1]) { keep = false; break; }
                }
                if (keep) indices.push(i);
            }
            document.getElementById('selectedRows').textContent = indices.length.toLocaleString();
            document.getElementById('selectedPercent').textContent =
                (indices.length / rows.length * 100).toFixed(1) + '%';
        }

        const numericCols = cfg.config.columns
            .filter(c => ['integer', 'number', 'angle'].includes(c.column_type))
            .map(c => c.name);
        document.getElementById('column-stats').innerHTML = numericCols.map(col => {
            const stats = columnStats(indices.map(i => typed[col][i]));
            if (!stats) return '';
            return `<div class="stat-group"><h4>${col}</h4>` +
                [['Min', stats.min], ['Max', stats.max], ['Mean', stats.mean],
                 ['Median', stats.median], ['Std Dev', stats.stdDev]]
                    .map(([label, v]) => `<div class="stat-item"><span class="stat-label">${label}:</span><span class="stat-value">${v.toFixed(2)}</span></div>`)
                    .join('') + '</div>';
        }).join('');

        updateMiniMetrics(indices);
    }

    function updateMiniMetrics(indices) {
        const grid = document.getElementById('miniGrid');
        grid.innerHTML = cfg.config.mini_metrics.map(m => {
            let value;
            if (m.id === 'filtered') value = indices.length.toLocaleString();
            else if (m.id === 'percent') value = (indices.length / rows.length * 100).toFixed(1) + '%';
            else if (m.id.startsWith('avg_')) {
                const col = m.id.slice(4);
                const stats = columnStats(indices.map(i => typed[col][i]));
                value = stats ? stats.mean.toFixed(2) : '-';
            } else value = '-';
            return `<div class="mini-panel"><div class="mini-value">${value}</div><div class="mini-label">${m.label}</div></div>`;
        }).join('');
    }

    function exportCsv() {
        const cols = cfg.payload.metadata.columns;
        const csv = [cols.join(',')]
            .concat(rows.map(row => cols.map(c => row[c]).join(',')))
            .join('\n');
        const blob = new Blob([csv], { type: 'text/csv' });
        const url = URL.createObjectURL(blob);
        const a = document.createElement('a');
        a.href = url;
        a.download = 'data_export.csv';
        a.click();
        URL.revokeObjectURL(url);
    }

    async function init() {
        materialize();
        document.getElementById('totalRows').textContent = rows.length.toLocaleString();

        const sample = cfg.config.scatter ? sampleRows(cfg.config.scatter.sample) : [];
        document.getElementById('visualization').innerHTML = '';
        const result = await vegaEmbed('#visualization', cfg.vega, {
            actions: false,
            datasets: { table: rows, sample: sample }
        });
        view = result.view;
        view.addSignalListener('brush', (_name, value) => updateStats(value));
        updateStats(null);
    }

    init().catch(err => {
        document.getElementById('visualization').innerHTML =
            '<div class="loading">Error: ' + err.message + '</div>';
    });

    return { exportCsv };
})();
"#;
