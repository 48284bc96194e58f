//! Small HTML writing helpers shared by the renderers.

use std::fmt::{self, Write};

/// Escape text for use in element content and double-quoted attributes.
pub fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

/// Write `<ul class=...>` with one escaped `<li>` per entry.
pub fn write_list(out: &mut impl Write, class: &str, entries: &[String]) -> fmt::Result {
    writeln!(out, "<ul class=\"{class}\">")?;
    for entry in entries {
        writeln!(out, "  <li>{}</li>", escape_html(entry))?;
    }
    writeln!(out, "</ul>")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escapes_markup_and_quotes() {
        assert_eq!(
            escape_html("<b>\"Trade\" & 'Tariffs'</b>"),
            "&lt;b&gt;&quot;Trade&quot; &amp; &#39;Tariffs&#39;&lt;/b&gt;"
        );
    }

    #[test]
    fn list_escapes_each_entry() {
        let mut out = String::new();
        write_list(&mut out, "areas", &["a<b".to_string(), "c".to_string()]).unwrap();
        assert_eq!(
            out,
            "<ul class=\"areas\">\n  <li>a&lt;b</li>\n  <li>c</li>\n</ul>\n"
        );
    }
}
