//! Single-page map console served at `/`.

pub const INDEX_HTML: &str = r#"<!doctype html>
<html lang="en">
<head>
  <meta charset="utf-8" />
  <meta name="viewport" content="width=device-width,initial-scale=1" />
  <title>Impactor</title>
  <link rel="stylesheet" href="https://unpkg.com/leaflet@1.9.4/dist/leaflet.css" crossorigin="" />
  <script src="https://unpkg.com/leaflet@1.9.4/dist/leaflet.js" crossorigin=""></script>
  <style>
    body { font-family: Arial, sans-serif; margin: 0; display: flex; height: 100vh; }
    #panel { width: 320px; padding: 14px; box-sizing: border-box; overflow-y: auto; border-right: 1px solid #ddd; }
    #map { flex: 1; }
    label { display:block; margin: 10px 0 4px; font-weight: 600; }
    input, select { width: 100%; padding: 6px; box-sizing: border-box; }
    .presets button { margin: 6px 4px 0 0; }
    pre { background: #111; color: #aef2ae; padding: 10px; border-radius: 6px; white-space: pre-wrap; min-height: 120px; }
    .hint { color: #666; font-size: 0.85rem; }
  </style>
</head>
<body>
  <div id="panel">
    <h2>Asteroid impact</h2>
    <div class="presets" id="presets"></div>
    <label for="density">Density (kg/m³)</label>
    <input id="density" type="number" min="1" value="7800" />
    <label for="speed">Speed (m/s)</label>
    <input id="speed" type="number" min="1" value="17000" />
    <label for="diameter">Diameter (m)</label>
    <input id="diameter" type="number" min="1" value="50" />
    <label for="surface">Surface</label>
    <select id="surface">
      <option value="land">Land</option>
      <option value="water">Water</option>
    </select>
    <p class="hint">Click the map to place the impact. Right-click to check which zone a point falls in.</p>
    <pre id="output">Ready.</pre>
  </div>
  <div id="map"></div>

  <script>
    const output = document.getElementById('output');
    const map = L.map('map').setView([40.7, -74.0], 9);
    L.tileLayer('https://{s}.tile.openstreetmap.org/{z}/{x}/{y}.png', {
      maxZoom: 18,
      attribution: '&copy; OpenStreetMap contributors'
    }).addTo(map);

    let site = null;
    let layers = [];

    function inputs() {
      return {
        density: Number(document.getElementById('density').value),
        speed: Number(document.getElementById('speed').value),
        diameter: Number(document.getElementById('diameter').value),
        surface: document.getElementById('surface').value,
      };
    }

    function clearLayers() {
      layers.forEach(l => map.removeLayer(l));
      layers = [];
    }

    async function post(path, payload) {
      const response = await fetch(path, {
        method: 'POST',
        headers: { 'Content-Type': 'application/json' },
        body: JSON.stringify(payload),
      });
      return { ok: response.ok, body: await response.json() };
    }

    async function evaluate() {
      if (!site) return;
      const { ok, body } = await post('/api/impact', { ...inputs(), site });
      clearLayers();
      if (!ok) { output.textContent = JSON.stringify(body, null, 2); return; }
      layers.push(L.marker([site.latitude, site.longitude]).addTo(map));
      body.circles.forEach(c => {
        layers.push(L.circle([site.latitude, site.longitude], {
          radius: c.radius_m, color: c.color, fillColor: c.color, fillOpacity: 0.25, weight: 1
        }).addTo(map));
      });
      const r = body.report;
      output.textContent =
        'Kinetic energy: ' + r.kinetic_energy_joules.toExponential(2) + ' J\n' +
        'Severe:   ' + r.severe_radius_km.toFixed(2) + ' km\n' +
        'Moderate: ' + r.moderate_radius_km.toFixed(2) + ' km\n' +
        'Light:    ' + r.light_radius_km.toFixed(2) + ' km\n' +
        'Classification: ' + r.damage_classification;
    }

    map.on('click', e => {
      site = { latitude: e.latlng.lat, longitude: e.latlng.lng };
      evaluate();
    });

    map.on('contextmenu', async e => {
      if (!site) return;
      const point = { latitude: e.latlng.lat, longitude: e.latlng.lng };
      const { body } = await post('/api/zone', { ...inputs(), site, point });
      if (body.status !== 'ok') { output.textContent = JSON.stringify(body, null, 2); return; }
      L.popup().setLatLng(e.latlng)
        .setContent((body.zone || 'outside') + ' (' + body.distance_km.toFixed(1) + ' km)')
        .openOn(map);
    });

    ['density', 'speed', 'diameter', 'surface'].forEach(id => {
      document.getElementById(id).addEventListener('change', evaluate);
    });

    fetch('/api/presets').then(r => r.json()).then(data => {
      const box = document.getElementById('presets');
      data.presets.forEach(p => {
        const btn = document.createElement('button');
        btn.textContent = p.name;
        btn.addEventListener('click', () => {
          document.getElementById('density').value = p.density;
          document.getElementById('speed').value = p.typical_speed;
          document.getElementById('diameter').value = p.typical_diameter;
          evaluate();
        });
        box.appendChild(btn);
      });
    });
  </script>
</body>
</html>
"#;
