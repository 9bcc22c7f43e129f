use super::{format_rating, format_reviews, segment_label, stat_cards};
use crate::session::DashboardSnapshot;

const PIE_COLORS: [&str; 6] = [
    "#0088FE", "#00C49F", "#FFBB28", "#FF8042", "#8884D8", "#82ca9d",
];

fn json_for_script_tag(value: &str) -> String {
    value
        .replace('<', "\\u003c")
        .replace('>', "\\u003e")
        .replace('&', "\\u0026")
}

fn escape_html(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

fn render_cards(snapshot: &DashboardSnapshot<'_>) -> String {
    let mut out = String::new();
    for (title, value, caption) in stat_cards(&snapshot.statistics.summary) {
        out.push_str(&format!(
            r#"<div class="bg-white dark:bg-slate-900 rounded-2xl border border-slate-200 dark:border-slate-800 p-6 shadow-sm">
          <h3 class="text-slate-500 dark:text-slate-400 text-sm font-medium mb-1">{}</h3>
          <p class="text-3xl font-bold text-slate-900 dark:text-white mb-1">{}</p>
          <p class="text-sm text-slate-500 dark:text-slate-400">{}</p>
        </div>
"#,
            escape_html(title),
            escape_html(&value),
            escape_html(&caption)
        ));
    }
    out
}

fn render_rating_bars(snapshot: &DashboardSnapshot<'_>) -> String {
    let max = snapshot
        .statistics
        .ratings
        .iter()
        .map(|b| b.count)
        .max()
        .unwrap_or(0);
    let mut out = String::new();
    for band in &snapshot.statistics.ratings {
        let width = if max == 0 { 0 } else { band.count * 100 / max };
        out.push_str(&format!(
            r#"<div class="flex items-center gap-3 mb-2">
            <span class="w-16 text-xs font-bold text-slate-500">{}</span>
            <div class="flex-1 bg-slate-100 dark:bg-slate-800 rounded"><div class="bg-blue-500 h-5 rounded" style="width: {}%"></div></div>
            <span class="w-10 text-right text-xs font-bold">{}</span>
          </div>
"#,
            escape_html(band.band.label()),
            width,
            band.count
        ));
    }
    out
}

fn render_segment_pie(snapshot: &DashboardSnapshot<'_>) -> (String, String) {
    let total: usize = snapshot.statistics.categories.iter().map(|c| c.count).sum();
    let mut stops = Vec::new();
    let mut legend = String::new();
    let mut start = 0.0f64;
    for (i, category) in snapshot.statistics.categories.iter().enumerate() {
        let color = PIE_COLORS[i % PIE_COLORS.len()];
        let share = if total == 0 {
            0.0
        } else {
            category.count as f64 / total as f64 * 100.0
        };
        stops.push(format!("{color} {start:.2}% {:.2}%", start + share));
        start += share;
        legend.push_str(&format!(
            r#"<li class="flex items-center gap-2 text-sm"><span class="inline-block size-3 rounded-full" style="background: {color}"></span>{}: {}%</li>
"#,
            escape_html(&category.label),
            category.percent
        ));
    }
    let gradient = if stops.is_empty() {
        "#e2e8f0 0% 100%".to_string()
    } else {
        stops.join(", ")
    };
    (gradient, legend)
}

fn render_rows(snapshot: &DashboardSnapshot<'_>) -> String {
    let mut out = String::new();
    for hotel in &snapshot.rows {
        let mut contact = String::new();
        if let Some(phone) = hotel.phone() {
            contact.push_str(&format!(
                r#"<a class="text-primary hover:underline" href="tel:{0}">{0}</a>"#,
                escape_html(phone)
            ));
        }
        if let Some(email) = hotel.first_email() {
            contact.push_str(&format!(
                r#"<a class="text-primary hover:underline" href="mailto:{0}">{0}</a>"#,
                escape_html(email)
            ));
        }
        if let Some(website) = hotel.website() {
            contact.push_str(&format!(
                r#"<a class="text-primary hover:underline" href="{}" target="_blank" rel="noopener noreferrer">Website</a>"#,
                escape_html(website)
            ));
        }
        out.push_str(&format!(
            r#"<tr class="hover:bg-slate-50 dark:hover:bg-slate-800/30" data-id="{}">
              <td class="px-6 py-4"><div class="text-sm font-semibold text-slate-900 dark:text-white">{}</div><div class="text-xs text-slate-500 dark:text-slate-400 mt-1">{}</div></td>
              <td class="px-6 py-4"><span class="px-2 py-1 text-xs font-semibold rounded-full bg-blue-100 dark:bg-blue-900 text-blue-800 dark:text-blue-200">{}</span></td>
              <td class="px-6 py-4 text-sm font-medium">{}</td>
              <td class="px-6 py-4 text-sm text-slate-500 dark:text-slate-400">{}</td>
              <td class="px-6 py-4"><div class="flex flex-col gap-1 text-sm">{}</div></td>
            </tr>
"#,
            escape_html(&hotel.google_place_id),
            escape_html(&hotel.hotel_name),
            escape_html(&hotel.full_address),
            escape_html(segment_label(hotel)),
            escape_html(&format_rating(hotel.google_rating)),
            escape_html(&format_reviews(hotel.user_ratings_total)),
            contact
        ));
    }
    out
}

pub fn render_html(snapshot: &DashboardSnapshot<'_>) -> Vec<u8> {
    let markers = serde_json::to_string(&snapshot.markers).unwrap_or_else(|_| "[]".to_string());
    let markers = json_for_script_tag(&markers);
    let (lat, lng) = snapshot.map.center;
    let zoom = snapshot.map.zoom;
    let total = snapshot.statistics.summary.total;
    let cards = render_cards(snapshot);
    let bars = render_rating_bars(snapshot);
    let (gradient, legend) = render_segment_pie(snapshot);
    let rows = render_rows(snapshot);
    let summary = escape_html(&snapshot.summary);
    let view = snapshot.view;
    let filters = escape_html(&format!(
        "search \"{}\" · segment {} · sort {} {}",
        view.search,
        view.category.label(),
        view.sort_key.label(),
        view.direction.label()
    ));
    let pager = if snapshot.pager.controls_visible {
        format!(
            r#"<span class="text-sm text-slate-700 dark:text-slate-300">Page {} of {}</span>"#,
            snapshot.pager.page, snapshot.pager.page_count
        )
    } else {
        String::new()
    };

    let html = format!(
        r####"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="utf-8"/>
  <meta content="width=device-width, initial-scale=1.0" name="viewport"/>
  <title>Hotels Dashboard</title>
  <script src="https://cdn.tailwindcss.com?plugins=forms,container-queries"></script>
  <link rel="stylesheet" href="https://unpkg.com/leaflet@1.9.4/dist/leaflet.css"/>
  <script src="https://unpkg.com/leaflet@1.9.4/dist/leaflet.js"></script>
  <script id="tailwind-config">
    tailwind.config = {{
      darkMode: "class",
      theme: {{ extend: {{ colors: {{ "primary": "#2563eb" }} }} }}
    }};
  </script>
</head>
<body class="bg-slate-50 dark:bg-slate-950 text-slate-900 dark:text-slate-100 min-h-screen">
  <script type="application/json" id="markers-data">{markers}</script>
  <header class="bg-white dark:bg-slate-900 shadow-md border-b border-slate-200 dark:border-slate-800">
    <div class="max-w-7xl mx-auto px-8 py-6 flex items-center justify-between">
      <div>
        <h1 class="text-3xl font-bold text-slate-900 dark:text-white">Hotels Dashboard</h1>
        <p class="mt-2 text-sm text-slate-500 dark:text-slate-400">Comprehensive view of {total} hotel leads</p>
      </div>
      <button id="theme-toggle" class="rounded-xl bg-slate-100 dark:bg-slate-800 px-4 py-2 text-sm font-bold" type="button">Theme</button>
    </div>
  </header>

  <main class="max-w-7xl mx-auto px-8 py-8">
    <div class="grid grid-cols-1 md:grid-cols-2 lg:grid-cols-3 gap-6 mb-8">
        {cards}
    </div>

    <div class="grid grid-cols-1 lg:grid-cols-2 gap-6 mb-8">
      <div class="bg-white dark:bg-slate-900 rounded-2xl border border-slate-200 dark:border-slate-800 p-6 shadow-sm">
        <h3 class="text-lg font-semibold mb-4">Rating Distribution</h3>
          {bars}
      </div>
      <div class="bg-white dark:bg-slate-900 rounded-2xl border border-slate-200 dark:border-slate-800 p-6 shadow-sm">
        <h3 class="text-lg font-semibold mb-4">Star Segment Distribution</h3>
        <div class="flex items-center gap-8">
          <div class="size-48 rounded-full" style="background: conic-gradient({gradient})"></div>
          <ul class="flex flex-col gap-2">
            {legend}
          </ul>
        </div>
      </div>
    </div>

    <div class="bg-white dark:bg-slate-900 border border-slate-200 dark:border-slate-800 rounded-2xl overflow-hidden shadow-sm mb-8">
      <div class="p-6 border-b border-slate-200 dark:border-slate-800">
        <p class="text-sm text-slate-500 dark:text-slate-400">{filters}</p>
        <p class="mt-2 text-sm text-slate-600 dark:text-slate-400">{summary}</p>
      </div>
      <div class="overflow-x-auto">
        <table class="w-full text-left border-collapse">
          <thead class="bg-slate-50 dark:bg-slate-800/50">
            <tr>
              <th class="px-6 py-3 text-xs font-medium uppercase tracking-wider">Hotel Name</th>
              <th class="px-6 py-3 text-xs font-medium uppercase tracking-wider">Segment</th>
              <th class="px-6 py-3 text-xs font-medium uppercase tracking-wider">Rating</th>
              <th class="px-6 py-3 text-xs font-medium uppercase tracking-wider">Reviews</th>
              <th class="px-6 py-3 text-xs font-medium uppercase tracking-wider">Contact</th>
            </tr>
          </thead>
          <tbody class="divide-y divide-slate-100 dark:divide-slate-800">
            {rows}
          </tbody>
        </table>
      </div>
      <div class="px-6 py-4 border-t border-slate-200 dark:border-slate-800">{pager}</div>
    </div>

    <div class="bg-white dark:bg-slate-900 border border-slate-200 dark:border-slate-800 rounded-2xl overflow-hidden shadow-sm">
      <div class="p-4 border-b border-slate-200 dark:border-slate-800">
        <h3 class="text-lg font-semibold">Hotel Locations</h3>
        <p class="text-sm text-slate-500 dark:text-slate-400 mt-1">Click on markers to view hotel details</p>
      </div>
      <div id="map" style="height: 500px"></div>
    </div>
  </main>

  <script>
    (function() {{
      function escapeHtml(value) {{
        return String(value)
          .replaceAll('&', '&amp;')
          .replaceAll('<', '&lt;')
          .replaceAll('>', '&gt;')
          .replaceAll('"', '&quot;')
          .replaceAll("'", '&#39;');
      }}

      const htmlEl = document.documentElement;
      function setTheme(mode) {{
        htmlEl.classList.toggle('dark', mode === 'dark');
        localStorage.setItem('hb-theme', mode);
      }}
      const storedTheme = localStorage.getItem('hb-theme');
      setTheme(storedTheme || (window.matchMedia && window.matchMedia('(prefers-color-scheme: dark)').matches ? 'dark' : 'light'));
      document.getElementById('theme-toggle').addEventListener('click', function() {{
        setTheme(htmlEl.classList.contains('dark') ? 'light' : 'dark');
      }});

      if (typeof L === 'undefined') return;
      const markers = JSON.parse(document.getElementById('markers-data').textContent || '[]');
      const map = L.map('map').setView([{lat}, {lng}], {zoom});
      L.tileLayer('https://{{s}}.tile.openstreetmap.org/{{z}}/{{x}}/{{y}}.png', {{
        attribution: '&copy; <a href="https://www.openstreetmap.org/copyright">OpenStreetMap</a> contributors'
      }}).addTo(map);
      for (const m of markers) {{
        const lines = [`<h4 class="font-semibold text-sm mb-2">${{escapeHtml(m.name)}}</h4>`];
        if (m.category) lines.push(`<p><b>Segment:</b> ${{escapeHtml(m.category)}}</p>`);
        if (m.rating != null) lines.push(`<p><b>Rating:</b> ${{Number(m.rating).toFixed(1)}}</p>`);
        if (m.phone) lines.push(`<p><b>Phone:</b> ${{escapeHtml(m.phone)}}</p>`);
        if (m.emails.length) lines.push(`<p><b>Email:</b> ${{escapeHtml(m.emails.join(', '))}}</p>`);
        if (m.website) lines.push(`<a href="${{escapeHtml(m.website)}}" target="_blank" rel="noopener noreferrer">Visit Website</a>`);
        L.marker([m.latitude, m.longitude]).addTo(map).bindPopup(lines.join(''));
      }}
    }})();
  </script>
</body>
</html>"####,
    );

    html.into_bytes()
}
