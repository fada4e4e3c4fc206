const COPYRIGHT: &str = "\u{a9} 2023 ALL GOOD's Inc , All rights reserved.";

pub fn footer_text() -> &'static str {
    COPYRIGHT
}

fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            '\u{a9}' => out.push_str("&copy;"),
            _ => out.push(ch),
        }
    }
    out
}

pub fn render_footer() -> String {
    format!(
        concat!(
            r#"<footer class="bg-white border-t">"#,
            r#"<div class="mx-auto py-10">"#,
            r#"<p class="text-center text-xs text-black">{}</p>"#,
            "</div></footer>"
        ),
        escape_html(COPYRIGHT)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn footer() {
        assert_eq!(footer_text(), "© 2023 ALL GOOD's Inc , All rights reserved.");
        let html = render_footer();
        assert!(html.starts_with("<footer"));
        assert!(html.contains("&copy; 2023 ALL GOOD&#39;s Inc , All rights reserved."));
        assert!(html.ends_with("</footer>"));
    }
}
