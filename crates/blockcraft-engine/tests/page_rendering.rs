use blockcraft_engine::{
    BlockRegistry, Interactivity, Page, RenderOptions, Renderer, UploadPolicy,
};
use pretty_assertions::assert_eq;

fn fixture(name: &str) -> String {
    std::fs::read_to_string(format!(
        "{}/tests/fixtures/{name}.json",
        env!("CARGO_MANIFEST_DIR")
    ))
    .unwrap()
}

fn render_fixture(name: &str) -> String {
    let page = Page::from_json(&fixture(name)).unwrap();
    Renderer::default().render_page(&page)
}

#[test]
fn numbered_steps_page() {
    insta::assert_snapshot!(
        render_fixture("numbered_steps"),
        @r#"<section class="bk-section has-text-color has-contrast-text-color"><ol class="bk-list bk-list--upper-roman" role="list"><li class="bk-list-item"><span class="bk-list-item__marker" aria-hidden="true">III.</span><span class="bk-list-item__text">Unpack</span></li><li class="bk-list-item"><span class="bk-list-item__marker" aria-hidden="true">II.</span><span class="bk-list-item__text">Assemble</span></li><li class="bk-list-item"><span class="bk-list-item__marker" aria-hidden="true">I.</span><span class="bk-list-item__text">Enjoy</span></li></ol></section>"#
    );
}

#[test]
fn faq_page_drops_incomplete_items() {
    let html = render_fixture("faq");

    assert_eq!(html.matches("data-wp-class--is-open").count(), 2);
    assert!(html.contains("Do you ship abroad?"));
    assert!(!html.contains("Draft question"));
    assert!(html.contains(r#"<p>Yes, worldwide.</p>"#));
}

#[test]
fn page_with_only_suppressed_blocks_is_empty() {
    let page = Page::from_json(
        r#"[
            {"name": "address", "attrs": {}},
            {"name": "section", "innerBlocks": [{"name": "icon"}]},
            {"name": "accordion", "innerBlocks": [{"name": "accordion-item", "attrs": {"title": "Q"}}]}
        ]"#,
    )
    .unwrap();
    assert_eq!(Renderer::default().render_page(&page), "");
}

#[test]
fn custom_directive_prefix_and_class_prefix() {
    let options = RenderOptions {
        class_prefix: "acme".to_string(),
        interactivity: Interactivity::new("x", "acme/store"),
    };
    let renderer = Renderer::new(BlockRegistry::with_defaults(), options);
    let page = Page::from_json(r#"[{"name": "counter", "attrs": {"number": 5}}]"#).unwrap();
    let html = renderer.render_page(&page);

    assert!(html.starts_with(r#"<div class="acme-counter" data-x-interactive="acme/store""#));
    assert!(html.contains(r#"data-x-init="callbacks.countUp""#));
}

#[test]
fn rendering_the_same_page_twice_is_identical() {
    let page = Page::from_json(&fixture("faq")).unwrap();
    let renderer = Renderer::default();
    assert_eq!(renderer.render_page(&page), renderer.render_page(&page));
}

#[test]
fn default_registry_knows_every_builtin_block() {
    assert_eq!(
        BlockRegistry::with_defaults().names(),
        vec![
            "accordion",
            "accordion-details",
            "accordion-item",
            "address",
            "counter",
            "counters",
            "icon",
            "icon-list",
            "list",
            "list-item",
            "section",
            "tab",
            "tabs",
        ]
    );
}

#[test]
fn upload_policy_with_svg() {
    let policy = UploadPolicy::default().with_svg();
    assert_eq!(policy.mime_for("logo.svg"), Some("image/svg+xml"));
}
