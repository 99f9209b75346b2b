//! End-to-end conversion scenarios through the public API: parse,
//! dispatch, cleanup, and the collected outputs.

use confluence2md::{ConvertOptions, PageConverter};

fn convert(html: &str) -> String {
    PageConverter::new(ConvertOptions::default())
        .convert_html(html)
        .unwrap()
        .markdown
}

#[test]
fn heading_gets_slug_anchor() {
    assert_eq!(
        convert("<h2>Getting Started</h2>"),
        "## Getting Started {#getting-started}\n"
    );
}

#[test]
fn list_with_break_keeps_continuation_indented() {
    assert_eq!(
        convert("<ul><li>A</li><li>B<br>C</li></ul>"),
        "- A\n- B\n  C\n"
    );
}

#[test]
fn plain_table_renders_with_single_separator() {
    let md = convert(
        r#"<table border="1"><tr><td>a</td><td>b</td></tr>
           <tr><td>c</td><td>d</td></tr></table>"#,
    );
    assert_eq!(md, "| a | b |\n|---|---|\n| c | d |\n");
}

#[test]
fn table_with_list_cell_becomes_sections() {
    let md = convert(
        "<table border=\"1\"><tr><td>Steps</td>\
         <td><ul><li>1</li><li>2</li><li>3</li><li>4</li><li>5</li></ul></td></tr></table>",
    );
    assert!(md.contains("## Steps"), "got: {md}");
    assert!(md.contains("- 1"), "got: {md}");
    assert!(!md.contains('|'), "grid should be gone: {md}");
}

#[test]
fn fragment_link_follows_heading_slug() {
    let md = convert(
        r##"<p><a href="#sec1">jump</a></p><h3 id="sec1">My Section</h3>"##,
    );
    assert!(md.contains("[jump](#my-section)"), "got: {md}");
    assert!(md.contains("### My Section {#my-section}"), "got: {md}");
}

#[test]
fn prose_keeps_spaces_around_inline_markup() {
    assert_eq!(
        convert(r#"<p>see <a href="x.html">here</a> now</p>"#),
        "see [here](x.html) now\n"
    );
    assert_eq!(convert("<p>a <b>b</b> c</p>"), "a **b** c\n");
}

#[test]
fn conversion_is_deterministic() {
    let html = r#"<div id="main-content">
        <h1>Title</h1>
        <p>Intro with <b>bold</b> and <a href="other.html">a link</a>.</p>
        <ul><li>one</li><li>two</li></ul>
        <table border="1"><tr><th>K</th><th>V</th></tr><tr><td>a</td><td>b</td></tr></table>
    </div>"#;
    let converter = PageConverter::new(ConvertOptions::default());
    let first = converter.convert_html(html).unwrap().markdown;
    let second = converter.convert_html(html).unwrap().markdown;
    assert_eq!(first, second);
}

#[test]
fn chrome_outside_main_content_is_dropped() {
    let md = convert(
        r#"<body>
            <div id="breadcrumb-section"><a href="index.html">Home</a></div>
            <div id="main-content"><p>the article</p></div>
            <div class="footer">footer text</div>
        </body>"#,
    );
    assert_eq!(md, "the article\n");
}

#[test]
fn hidden_and_scripted_content_never_appears() {
    let md = convert(
        r#"<div id="main-content">
            <p>visible</p>
            <p style="display:none">invisible</p>
            <script>alert("x")</script>
            <p aria-hidden="true">also invisible</p>
        </div>"#,
    );
    assert_eq!(md, "visible\n");
}

#[test]
fn panel_renders_title_and_quoted_body() {
    let md = convert(
        r#"<div id="main-content"><div class="panel">
            <div class="panelHeader">Warning</div>
            <div class="panelContent"><p>Do not do the thing.</p></div>
        </div></div>"#,
    );
    assert_eq!(md, "**Warning**\n\n> Do not do the thing.\n");
}

#[test]
fn code_block_language_survives_end_to_end() {
    let md = convert(
        r#"<div id="main-content"><pre data-language="bash">echo hi</pre></div>"#,
    );
    assert_eq!(md, "```bash\necho hi\n```\n");
}

#[test]
fn unknown_markup_loses_no_content() {
    let md = convert(
        r#"<div id="main-content"><ac-layout><ac-cell><p>buried text</p></ac-cell></ac-layout></div>"#,
    );
    assert_eq!(md, "buried text\n");
}

#[test]
fn missing_images_warn_when_catalog_attached() {
    let dir = tempfile::tempdir().unwrap();
    let catalog = confluence2md::AssetCatalog::scan(dir.path());
    let converter = PageConverter::with_assets(ConvertOptions::default(), catalog);
    let out = converter
        .convert_html(r#"<p>see <img src="gone.png" alt="g"></p>"#)
        .unwrap();
    assert_eq!(out.warnings.len(), 1);
    assert!(out.warnings[0].contains("gone.png"));
    assert!(!out.markdown.contains("gone.png"));
}

#[test]
fn resolved_images_produce_copy_pairs() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::create_dir_all(dir.path().join("attachments")).unwrap();
    std::fs::write(dir.path().join("attachments/pic.png"), b"png").unwrap();
    let catalog = confluence2md::AssetCatalog::scan(dir.path());
    let converter = PageConverter::with_assets(ConvertOptions::default(), catalog);
    let out = converter
        .convert_html(r#"<p>see <img src="attachments/pic.png" alt="p"></p>"#)
        .unwrap();
    assert_eq!(out.images.len(), 1);
    assert_eq!(
        out.images[0].relative,
        std::path::PathBuf::from("attachments/pic.png")
    );
    assert!(out.markdown.contains("![p](./attachments/pic.png)"));
}

#[test]
fn empty_file_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("blank.html");
    std::fs::write(&path, "   \n").unwrap();
    let converter = PageConverter::new(ConvertOptions::default());
    let err = converter.convert_file(&path).unwrap_err();
    assert!(err.to_string().contains("no content"));
}
