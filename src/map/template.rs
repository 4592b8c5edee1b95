/// Page skeleton. `__TITLE__`, `__GENERATED__` and `__MAP_DATA__` are
/// substituted at render time; the data is a JSON object.
pub const MAP_HTML: &str = r##"<!doctype html>
<html lang="en">

<head>
  <meta charset="UTF-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1.0" />
  <meta name="generator" content="racemap __GENERATED__" />
  <title>__TITLE__</title>

  <!-- Leaflet 1.9.4 -->
  <link rel="stylesheet" href="https://cdnjs.cloudflare.com/ajax/libs/leaflet/1.9.4/leaflet.css" crossorigin="anonymous" />
  <script src="https://cdnjs.cloudflare.com/ajax/libs/leaflet/1.9.4/leaflet.js" crossorigin="anonymous"></script>

  <!-- Leaflet.awesome-markers 2.0.2 + Font Awesome -->
  <link rel="stylesheet" href="https://cdnjs.cloudflare.com/ajax/libs/Leaflet.awesome-markers/2.0.2/leaflet.awesome-markers.css" />
  <script src="https://cdnjs.cloudflare.com/ajax/libs/Leaflet.awesome-markers/2.0.2/leaflet.awesome-markers.js"></script>
  <link rel="stylesheet" href="https://cdnjs.cloudflare.com/ajax/libs/font-awesome/4.7.0/css/font-awesome.min.css" />

  <style>
    html, body { width: 100%; height: 100%; margin: 0; padding: 0; }
    #map { position: absolute; top: 0; bottom: 0; right: 0; left: 0; width: 100%; height: 100%; }
  </style>
</head>

<body>
  <div id="map"></div>
  <script>
    const data = __MAP_DATA__;

    const map = L.map("map", { center: data.center, zoom: data.zoom });
    L.tileLayer("https://{s}.tile.openstreetmap.org/{z}/{x}/{y}.png", {
      maxZoom: 18,
      attribution: "&copy; OpenStreetMap contributors",
    }).addTo(map);

    for (const line of data.polylines) {
      L.polyline(line, { color: "#3388ff", weight: 3 }).addTo(map);
    }

    for (const wp of data.waypoints) {
      L.circleMarker(wp.position, { radius: 3, color: "#555", fillOpacity: 0.8 })
        .bindTooltip(wp.name)
        .addTo(map);
    }

    for (const m of data.markers) {
      const icon = L.AwesomeMarkers.icon({ icon: m.icon, markerColor: m.color, prefix: m.prefix });
      L.marker(m.position, { icon })
        .bindTooltip(m.tooltip)
        .bindPopup(m.popup)
        .addTo(map);
    }
  </script>
</body>

</html>
"##;
