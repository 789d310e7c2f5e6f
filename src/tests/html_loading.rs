use super::*;

#[test]
fn site_markup_loads_with_every_binding() -> Result<()> {
    let page = Page::from_html(SITE_HTML)?;
    let controller = page
        .controller()
        .ok_or_else(|| Error::Runtime("page should be loaded".into()))?;
    assert_eq!(
        controller.bound_form_ids(),
        ["appointmentForm", "contactForm"]
    );
    assert!(controller.listener_count() > 20);
    page.assert_text("title", "HairRestore Clinic")?;
    page.assert_text("#scrollToTop", "↑")?;
    page.assert_count("head meta", 1)?;
    Ok(())
}

#[test]
fn fragments_get_a_synthesized_body() -> Result<()> {
    let page = Page::from_html("<header id='header'></header><p>Hi</p>")?;
    page.assert_exists("body > #header")?;
    page.assert_exists("body > p")?;

    let with_head = Page::from_html("<html><head><title>T</title></head><main></main></html>")?;
    with_head.assert_exists("html > head > title")?;
    with_head.assert_exists("html > body > main")?;
    with_head.assert_missing("body title")?;
    Ok(())
}

#[test]
fn implied_end_tags_close_list_items_options_and_paragraphs() -> Result<()> {
    let page = Page::from_html(
        r#"
        <ul id="list"><li>One<li>Two<li>Three</ul>
        <select id="pick"><option value="a">A<option value="b" selected>B</select>
        <p id="para">Intro<div id="after">Block</div>
        "#,
    )?;
    page.assert_count("#list > li", 3)?;
    page.assert_count("#pick > option", 2)?;
    page.assert_value("#pick", "b")?;
    page.assert_text("#para", "Intro")?;
    page.assert_missing("p > #after")?;
    Ok(())
}

#[test]
fn comments_doctype_and_raw_text_are_not_markup() -> Result<()> {
    let page = Page::from_html(
        r#"<!DOCTYPE html>
        <!-- <div id="ghost"></div> -->
        <script>if (a < b && c > d) { document.write("<p id='fake'>") }</script>
        <style>.a > .b { color: red; }</style>
        <p id="real">ok</p>
        "#,
    )?;
    page.assert_missing("#ghost")?;
    page.assert_missing("#fake")?;
    page.assert_count("p", 1)?;
    assert!(page.text("script")?.contains("<p id='fake'>"));
    Ok(())
}

#[test]
fn attributes_support_every_quoting_style() -> Result<()> {
    let page = Page::from_html(
        r#"<input id=plain type='tel' data-note="a &amp; b" required disabled value=5551234567>"#,
    )?;
    assert_eq!(page.attr("#plain", "type")?.as_deref(), Some("tel"));
    assert_eq!(page.attr("#plain", "data-note")?.as_deref(), Some("a & b"));
    assert_eq!(page.attr("#plain", "required")?.as_deref(), Some(""));
    page.assert_value("#plain", "5551234567")?;
    page.assert_exists("input[required][disabled]")?;
    Ok(())
}

#[test]
fn character_references_decode_in_text() -> Result<()> {
    let page = Page::from_html("<p id='t'>&copy; 2024 &lt;Clinic&gt; &#8212; &#x41;&unknown;</p>")?;
    page.assert_text("#t", "© 2024 <Clinic> — A&unknown;")?;
    Ok(())
}

#[test]
fn stray_angle_bracket_is_text() -> Result<()> {
    let page = Page::from_html("<p id='t'>1 < 2</p>")?;
    page.assert_text("#t", "1 < 2")?;
    Ok(())
}

#[test]
fn unmatched_end_tags_are_ignored() -> Result<()> {
    let page = Page::from_html("<div id='a'><span>x</em></span></p></div><div id='b'></div>")?;
    page.assert_exists("#a > span")?;
    page.assert_missing("#a #b")?;
    Ok(())
}

#[test]
fn malformed_markup_is_a_parse_error() {
    for html in ["<div", "<!-- never closed", "<script>no end", "<!DOCTYPE html"] {
        assert!(
            matches!(Page::from_html(html), Err(Error::HtmlParse(_))),
            "{html:?}"
        );
    }
}

#[test]
fn first_duplicate_id_wins() -> Result<()> {
    let page = Page::from_html("<p id='x'>first</p><p id='x'>second</p>")?;
    page.assert_text("#x", "first")?;
    page.assert_count("p#x", 2)?;
    Ok(())
}

#[test]
fn dump_dom_serializes_sorted_attributes_and_escapes() -> Result<()> {
    let page = Page::from_html(
        r#"<div id="d" class="c" title='say "hi"'>a &amp; b<br><img src="x.png"></div>"#,
    )?;
    assert_eq!(
        page.dump_dom("#d")?,
        r#"<div class="c" id="d" title="say &quot;hi&quot;">a &amp; b<br><img src="x.png"></div>"#
    );
    Ok(())
}
