//! Image rendering and attachment resolution.

use markup5ever_rcdom::{Handle, NodeData};

use super::context::ConvertContext;
use super::node_util::{attr, collapse_whitespace, node_id, parent, tag_name};

/// Render an `img` element as `![alt](src "title")`.
///
/// Local sources are looked up in the asset catalog when one is
/// attached; a hit records a copy pair, a miss records a warning and
/// (by default) drops the image. An image that is the only meaningful
/// content of its parent paragraph becomes an isolated block.
pub(crate) fn render_image(node: &Handle, ctx: &mut ConvertContext<'_>) -> String {
    let Some(src) = attr(node, "src").map(|s| s.trim().to_string()).filter(|s| !s.is_empty())
    else {
        return String::new();
    };

    if !is_remote(&src)
        && let Some(catalog) = ctx.assets
    {
        match catalog.resolve(&src) {
            Some(pair) => ctx.images.push(pair),
            None => {
                ctx.warn(format!("image not found in export: {src}"));
                if ctx.options.drop_missing_images {
                    return String::new();
                }
            }
        }
    }

    let alt = collapse_whitespace(&attr(node, "alt").unwrap_or_default());
    let display = if is_bare_relative(&src) {
        format!("./{src}")
    } else {
        src
    };

    let md = match attr(node, "title").map(|t| collapse_whitespace(&t)) {
        Some(title) if !title.is_empty() => format!("![{alt}]({display} \"{title}\")"),
        _ => format!("![{alt}]({display})"),
    };

    if is_lone_in_paragraph(node) {
        format!("{md}\n\n")
    } else {
        md
    }
}

fn is_remote(src: &str) -> bool {
    src.starts_with("http://")
        || src.starts_with("https://")
        || src.starts_with("data:")
        || src.starts_with("//")
}

fn is_bare_relative(src: &str) -> bool {
    !is_remote(src)
        && !src.starts_with('/')
        && !src.starts_with("./")
        && !src.starts_with("../")
        && !src.starts_with('#')
}

/// True when every sibling is whitespace text or a `br`.
fn is_lone_in_paragraph(node: &Handle) -> bool {
    let Some(p) = parent(node) else {
        return false;
    };
    if tag_name(&p) != Some("p") {
        return false;
    }
    p.children.borrow().iter().all(|sibling| {
        if node_id(sibling) == node_id(node) {
            return true;
        }
        match &sibling.data {
            NodeData::Text { contents } => contents.borrow().trim().is_empty(),
            NodeData::Element { .. } => tag_name(sibling) == Some("br"),
            _ => true,
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ConvertOptions;
    use crate::converter::node_util::{find_descendant, is_element};
    use crate::converter::slug::SlugRegistry;
    use html5ever::parse_document;
    use html5ever::tendril::TendrilSink;
    use markup5ever_rcdom::RcDom;

    fn convert_first_image(html: &str) -> String {
        let doc = parse_document(RcDom::default(), Default::default())
            .one(html)
            .document;
        let img = find_descendant(&doc, &|n| is_element(n, "img")).unwrap();
        let options = ConvertOptions::default();
        let mut ctx =
            ConvertContext::new(&options, SlugRegistry::index_document(&doc), None);
        render_image(&img, &mut ctx)
    }

    #[test]
    fn bare_relative_src_gets_dot_slash() {
        assert_eq!(
            convert_first_image(r#"<p>before <img src="a.png" alt="x"> after</p>"#),
            "![x](./a.png)"
        );
    }

    #[test]
    fn absolute_and_remote_srcs_are_untouched() {
        assert_eq!(
            convert_first_image(r#"<p>t <img src="https://x.test/a.png" alt="a"></p>"#),
            "![a](https://x.test/a.png)"
        );
        assert_eq!(
            convert_first_image(r#"<p>t <img src="/img/a.png" alt="a"></p>"#),
            "![a](/img/a.png)"
        );
    }

    #[test]
    fn title_is_included_when_present() {
        assert_eq!(
            convert_first_image(r#"<p>t <img src="a.png" alt="x" title="cap"></p>"#),
            r#"![x](./a.png "cap")"#
        );
    }

    #[test]
    fn lone_image_in_paragraph_becomes_a_block() {
        assert_eq!(
            convert_first_image(r#"<p> <img src="a.png" alt="x"> <br> </p>"#),
            "![x](./a.png)\n\n"
        );
    }

    #[test]
    fn missing_src_contributes_nothing() {
        assert_eq!(convert_first_image(r#"<p>t <img alt="x"></p>"#), "");
    }
}
