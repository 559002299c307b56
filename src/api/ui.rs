//! UI routes: HTML pages (vanilla HTML/CSS/JS, no template engine)

use axum::response::Html;

/// Minimal HTML escaping for user-supplied strings interpolated into views
pub(crate) fn escape_html(input: &str) -> String {
    input
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

pub(crate) const PAGE_STYLE: &str = r#"
        body {
            font-family: system-ui, -apple-system, sans-serif;
            max-width: 800px;
            margin: 40px auto;
            padding: 20px;
            line-height: 1.6;
            background: #f4f9fc;
        }
        h1 {
            color: #1a3c5e;
            border-bottom: 2px solid #0066cc;
            padding-bottom: 10px;
        }
        .card {
            background: white;
            border: 1px solid #d0e0ec;
            border-radius: 8px;
            padding: 16px;
            margin: 12px 0;
        }
        .card img { max-width: 180px; border-radius: 4px; }
        input[type=text] {
            width: 70%;
            padding: 8px;
            border: 1px solid #ccc;
            border-radius: 4px;
        }
        .button {
            display: inline-block;
            padding: 10px 20px;
            background: #0066cc;
            color: white;
            border: none;
            text-decoration: none;
            border-radius: 4px;
            cursor: pointer;
        }
        .button:hover { background: #0052a3; }
        .error { color: #a31919; }
"#;

/// GET / - landing page: submission form plus the community gallery
pub async fn landing_page() -> Html<String> {
    Html(format!(
        r#"<!DOCTYPE html>
<html lang="es">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>Pinguinos - Clasificador de pingüinos</title>
    <style>{PAGE_STYLE}</style>
</head>
<body>
    <h1>🐧 Clasificador de pingüinos</h1>
    <p>Pega la URL de una foto de un pingüino y el modelo estimará sus
       medidas biométricas y predecirá la especie.</p>
    <div class="card">
        <form action="/inicio" method="post">
            <input type="text" name="img_url" placeholder="https://ejemplo.com/pinguino.jpg" required>
            <button class="button" type="submit">Clasificar</button>
        </form>
    </div>
    <p><a href="/presentacion">Sobre el proyecto</a></p>

    <h1>Avistamientos recientes</h1>
    <div id="gallery"><p>Cargando…</p></div>

    <script>
        async function loadGallery() {{
            const gallery = document.getElementById('gallery');
            try {{
                const response = await fetch('/api/community');
                const entries = await response.json();
                if (entries.length === 0) {{
                    gallery.innerHTML = '<p>Todavía no hay avistamientos.</p>';
                    return;
                }}
                gallery.innerHTML = entries.map(e => `
                    <div class="card">
                        <img src="${{e.img_url}}" alt="pingüino">
                        <p><strong>${{e.nickname}}</strong> — ${{e.species}}</p>
                        <p>Visto en (${{e.coordinate.lat.toFixed(2)}}, ${{e.coordinate.lon.toFixed(2)}})
                           el ${{new Date(e.created_at).toLocaleString()}}</p>
                    </div>
                `).join('');
            }} catch (err) {{
                gallery.innerHTML = '<p class="error">No se pudo cargar la galería.</p>';
            }}
        }}
        loadGallery();
    </script>
</body>
</html>"#
    ))
}

/// GET /inicio - the submission form without a prediction
pub async fn submit_form_page() -> Html<String> {
    Html(format!(
        r#"<!DOCTYPE html>
<html lang="es">
<head>
    <meta charset="UTF-8">
    <title>Pinguinos - Nueva clasificación</title>
    <style>{PAGE_STYLE}</style>
</head>
<body>
    <h1>Nueva clasificación</h1>
    <div class="card">
        <form action="/inicio" method="post">
            <input type="text" name="img_url" placeholder="URL de la imagen" required>
            <button class="button" type="submit">Clasificar</button>
        </form>
    </div>
    <p><a href="/">Volver al inicio</a></p>
</body>
</html>"#
    ))
}

/// GET /presentacion - static informational page
pub async fn presentacion_page() -> Html<String> {
    Html(format!(
        r#"<!DOCTYPE html>
<html lang="es">
<head>
    <meta charset="UTF-8">
    <title>Pinguinos - Presentación</title>
    <style>{PAGE_STYLE}</style>
</head>
<body>
    <h1>Sobre el proyecto</h1>
    <div class="card">
        <p>Este demo combina tres piezas:</p>
        <ul>
            <li>Un modelo de visión alojado que estima las medidas
                biométricas de un pingüino a partir de una foto.</li>
            <li>Un clasificador pre-entrenado (random forest exportado a
                ONNX) que predice la especie: Adelie, Chinstrap o Gentoo.</li>
            <li>Un registro comunitario de avistamientos con apodo y
                coordenada de hábitat generados aleatoriamente.</li>
        </ul>
        <p>Las medidas se basan en el conjunto de datos de pingüinos de
           Palmer Station, Antártida.</p>
    </div>
    <p><a href="/">Volver al inicio</a></p>
</body>
</html>"#
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escapes_html_metacharacters() {
        assert_eq!(
            escape_html(r#"<img src="x" onerror='alert(1)'>"#),
            "&lt;img src=&quot;x&quot; onerror=&#39;alert(1)&#39;&gt;"
        );
        assert_eq!(escape_html("a & b"), "a &amp; b");
    }
}
