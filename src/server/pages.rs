//! Server-rendered pages.
//!
//! Each page is a self-contained HTML document with inline CSS and the
//! small amount of JavaScript glue that talks to the JSON API. There is no
//! template engine and no static asset pipeline.

/// The public gallery page.
///
/// Loads the location list and the first photo page on startup. Changing
/// the filter discards the visible list and reloads; the load-more button
/// is only shown while the server reports a further page may exist, and
/// only in "all" mode.
pub fn gallery_page() -> String {
    r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>Photostream</title>
<style>
  body { font-family: system-ui, sans-serif; margin: 0; background: #fafafa; color: #222; }
  header { display: flex; align-items: baseline; gap: 1.5rem; padding: 1rem 1.5rem; background: #fff; border-bottom: 1px solid #e2e2e2; }
  header h1 { font-size: 1.25rem; margin: 0; }
  header a { margin-left: auto; color: #888; font-size: 0.85rem; text-decoration: none; }
  select { padding: 0.3rem 0.5rem; font-size: 0.9rem; }
  main { max-width: 900px; margin: 0 auto; padding: 1.5rem; }
  .grid { display: grid; grid-template-columns: repeat(auto-fill, minmax(260px, 1fr)); gap: 1rem; }
  .card { background: #fff; border: 1px solid #e2e2e2; border-radius: 6px; overflow: hidden; }
  .card img { width: 100%; height: 200px; object-fit: cover; display: block; }
  .card .meta { padding: 0.6rem 0.8rem; }
  .card .comment { margin: 0 0 0.3rem; font-size: 0.95rem; }
  .card .location { margin: 0; font-size: 0.8rem; color: #888; }
  #more { display: none; margin: 1.5rem auto 0; padding: 0.5rem 1.5rem; font-size: 0.95rem; cursor: pointer; }
  #status { text-align: center; color: #888; margin-top: 1.5rem; }
</style>
</head>
<body>
<header>
  <h1>Photostream</h1>
  <select id="filter"><option value="all">All locations</option></select>
  <a href="/login">Admin</a>
</header>
<main>
  <div class="grid" id="grid"></div>
  <button id="more">Load more</button>
  <p id="status"></p>
</main>
<script>
const grid = document.getElementById('grid');
const more = document.getElementById('more');
const filter = document.getElementById('filter');
const status = document.getElementById('status');

let cursor = null;
let loading = false;
let generation = 0;

function render(photos) {
  for (const p of photos) {
    const card = document.createElement('div');
    card.className = 'card';
    const img = document.createElement('img');
    img.src = p.image_url;
    img.alt = p.comment;
    img.loading = 'lazy';
    const meta = document.createElement('div');
    meta.className = 'meta';
    const comment = document.createElement('p');
    comment.className = 'comment';
    comment.textContent = p.comment;
    const location = document.createElement('p');
    location.className = 'location';
    location.textContent = p.location;
    meta.append(comment, location);
    card.append(img, meta);
    grid.appendChild(card);
  }
}

async function load(reset) {
  if (loading) return;
  loading = true;
  const gen = reset ? ++generation : generation;
  if (reset) {
    grid.replaceChildren();
    cursor = null;
    more.style.display = 'none';
  }
  status.textContent = 'Loading…';
  const params = new URLSearchParams();
  if (filter.value !== 'all') params.set('location', filter.value);
  if (cursor) params.set('cursor', cursor);
  try {
    const resp = await fetch('/api/photos?' + params);
    if (!resp.ok) throw new Error('request failed');
    const page = await resp.json();
    if (gen !== generation) return;
    render(page.photos);
    cursor = page.next_cursor || null;
    more.style.display = page.has_more && filter.value === 'all' ? 'block' : 'none';
    status.textContent = grid.childElementCount ? '' : 'No photos yet';
  } catch (err) {
    if (gen !== generation) return;
    more.style.display = 'none';
    status.textContent = 'Could not load photos';
  } finally {
    if (gen === generation) loading = false;
  }
}

async function loadLocations() {
  try {
    const resp = await fetch('/api/locations');
    if (!resp.ok) return;
    const body = await resp.json();
    for (const loc of body.locations) {
      const option = document.createElement('option');
      option.value = loc;
      option.textContent = loc;
      filter.appendChild(option);
    }
  } catch (err) { /* filter stays at "all" */ }
}

filter.addEventListener('change', () => load(true));
more.addEventListener('click', () => load(false));
loadLocations();
load(true);
</script>
</body>
</html>"#
        .to_string()
}

/// The sign-in page, optionally with an error banner from a failed attempt.
pub fn login_page(error: Option<&str>) -> String {
    let banner = match error {
        Some(message) => format!(r#"<p class="error">{}</p>"#, escape_html(message)),
        None => String::new(),
    };
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>Sign in - Photostream</title>
<style>
  body {{ font-family: system-ui, sans-serif; background: #fafafa; color: #222; display: flex; justify-content: center; padding-top: 10vh; }}
  form {{ background: #fff; border: 1px solid #e2e2e2; border-radius: 6px; padding: 2rem; width: 320px; }}
  h1 {{ font-size: 1.1rem; margin: 0 0 1rem; }}
  label {{ display: block; font-size: 0.85rem; margin-bottom: 0.2rem; }}
  input {{ width: 100%; box-sizing: border-box; padding: 0.45rem; margin-bottom: 1rem; font-size: 0.95rem; }}
  button {{ width: 100%; padding: 0.5rem; font-size: 0.95rem; cursor: pointer; }}
  .error {{ color: #b00020; font-size: 0.85rem; }}
</style>
</head>
<body>
<form method="post" action="/login">
  <h1>Sign in</h1>
  {banner}
  <label for="email">Email</label>
  <input id="email" name="email" type="email" required autofocus>
  <label for="password">Password</label>
  <input id="password" name="password" type="password" required>
  <button type="submit">Sign in</button>
</form>
</body>
</html>"#
    )
}

/// The admin upload page. Only rendered behind the access gate.
pub fn admin_page(subject: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>Upload - Photostream</title>
<style>
  body {{ font-family: system-ui, sans-serif; background: #fafafa; color: #222; margin: 0; }}
  header {{ display: flex; align-items: baseline; gap: 1rem; padding: 1rem 1.5rem; background: #fff; border-bottom: 1px solid #e2e2e2; }}
  header h1 {{ font-size: 1.1rem; margin: 0; }}
  header span {{ margin-left: auto; color: #888; font-size: 0.85rem; }}
  main {{ max-width: 480px; margin: 2rem auto; background: #fff; border: 1px solid #e2e2e2; border-radius: 6px; padding: 2rem; }}
  label {{ display: block; font-size: 0.85rem; margin-bottom: 0.2rem; }}
  input {{ width: 100%; box-sizing: border-box; padding: 0.45rem; margin-bottom: 1rem; font-size: 0.95rem; }}
  button {{ padding: 0.5rem 1.5rem; font-size: 0.95rem; cursor: pointer; }}
  #status {{ margin-top: 1rem; font-size: 0.9rem; }}
  #status.error {{ color: #b00020; }}
</style>
</head>
<body>
<header>
  <h1>Upload a photo</h1>
  <span>{subject}</span>
  <form method="post" action="/logout"><button type="submit">Sign out</button></form>
</header>
<main>
  <form id="upload">
    <label for="file">Photo</label>
    <input id="file" name="file" type="file" accept="image/*">
    <label for="comment">Comment</label>
    <input id="comment" name="comment" type="text">
    <label for="location">Location</label>
    <input id="location" name="location" type="text">
    <button type="submit" id="submit">Upload</button>
  </form>
  <p id="status"></p>
</main>
<script>
const form = document.getElementById('upload');
const submit = document.getElementById('submit');
const status = document.getElementById('status');

form.addEventListener('submit', async (event) => {{
  event.preventDefault();
  submit.disabled = true;
  status.className = '';
  status.textContent = 'Uploading…';
  try {{
    const resp = await fetch('/admin/upload', {{
      method: 'POST',
      body: new FormData(form),
    }});
    const body = await resp.json();
    status.textContent = body.status;
    if (body.ok) {{
      form.reset();
    }} else {{
      status.className = 'error';
    }}
  }} catch (err) {{
    status.className = 'error';
    status.textContent = 'Error: upload request failed';
  }} finally {{
    submit.disabled = false;
  }}
}});
</script>
</body>
</html>"#,
        subject = escape_html(subject)
    )
}

/// Minimal HTML escaping for text interpolated into a page.
fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
