use clinic_page::{
    DropdownGate, Error, FormState, InteractionConfig, Page, Rect, Result, ScrollBehavior,
    ScrollRequest, TimerKind,
};

const HOME_PAGE: &str = r##"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8">
  <meta name="viewport" content="width=device-width, initial-scale=1.0">
  <title>HairRestore Clinic - Hair Transplant &amp; Restoration</title>
  <link rel="stylesheet" href="styles.css">
</head>
<body>
  <header class="header" id="header">
    <div class="container">
      <nav class="navbar">
        <div class="logo"><a href="index.html"><span>Hair</span>Restore</a></div>
        <ul class="nav-menu" id="navMenu">
          <li class="nav-item"><a href="index.html" class="nav-link">Home</a></li>
          <li class="nav-item nav-dropdown" id="treatments">
            <a href="#" class="nav-link">Treatments <i class="arrow"></i></a>
            <ul class="dropdown-menu">
              <li><a href="fue.html">FUE Transplant</a></li>
              <li><a href="prp.html">PRP Therapy</a></li>
            </ul>
          </li>
          <li class="nav-item"><a href="doctors.html" class="nav-link">Doctors</a></li>
          <li class="nav-item"><a href="contact.html" class="nav-link">Contact</a></li>
        </ul>
        <div class="nav-toggle" id="navToggle"><span></span><span></span><span></span></div>
      </nav>
    </div>
  </header>

  <section class="hero">
    <h1>Restore Your Confidence</h1>
    <a href="#appointment" class="btn" id="bookNow">Book a consultation</a>
  </section>

  <section class="services" id="servicesSection">
    <div class="service-card" id="fue"><h3>FUE</h3></div>
    <div class="service-card" id="prp"><h3>PRP</h3></div>
  </section>

  <section class="about">
    <div class="about-image-item" id="clinicPhoto"></div>
    <div class="feature-box" id="experience"><p>15+ years</p></div>
  </section>

  <section class="news">
    <article class="news-card" id="news1"><h3>Open day</h3></article>
  </section>

  <section class="appointment" id="appointment">
    <form id="appointmentForm" class="appointment-form">
      <div class="form-row">
        <div class="form-group"><label for="appointment-name">Name</label><input type="text" id="appointment-name" required></div>
        <div class="form-group"><label for="appointment-phone">Phone</label><input type="tel" id="appointment-phone" required></div>
      </div>
      <div class="form-row">
        <div class="form-group">
          <select id="department" required>
            <option value="">Select Department</option>
            <option value="transplant">Hair Transplant</option>
            <option value="prp">PRP</option>
          </select>
        </div>
        <div class="form-group">
          <select id="doctor" required>
            <option value="">Select Doctor</option>
            <option value="dr-kim">Dr. Kim</option>
          </select>
        </div>
      </div>
      <div class="form-group"><input type="date" id="appointment-date" required></div>
      <button type="submit" class="btn btn-primary">Book Appointment</button>
    </form>
  </section>

  <footer>
    <p>&copy; 2024 HairRestore Clinic</p>
  </footer>

  <button class="scroll-to-top" id="scrollToTop"><i class="arrow-up"></i></button>
  <script src="script.js"></script>
</body>
</html>
"##;

const CONTACT_PAGE: &str = r#"
<header class="header" id="header">
  <ul class="nav-menu" id="navMenu">
    <li><a href="index.html" class="nav-link" id="home">Home</a></li>
    <li><a href="contact.html" class="nav-link" id="contact">Contact</a></li>
  </ul>
  <div class="nav-toggle" id="navToggle"></div>
</header>
<form id="contactForm">
  <div class="form-group"><input type="text" id="name" required><span class="error-message"></span></div>
  <div class="form-group"><input type="tel" id="phone" required><span class="error-message"></span></div>
  <div class="form-group"><input type="email" id="email" required><span class="error-message"></span></div>
  <div class="form-group"><input type="text" id="subject"><span class="error-message"></span></div>
  <div class="form-group"><textarea id="message" required></textarea><span class="error-message"></span></div>
  <button type="submit" id="send">Send</button>
</form>
"#;

fn mobile_home() -> Result<Page> {
    let mut page = Page::parse(HOME_PAGE)?;
    page.set_viewport_size(390.0, 844.0);
    page.load()?;
    Ok(page)
}

#[test]
fn visitor_scrolls_the_home_page() -> Result<()> {
    let mut page = Page::parse(HOME_PAGE)?;
    page.set_layout("#fue", Rect::new(0.0, 620.0, 400.0, 300.0))?;
    page.set_layout("#prp", Rect::new(420.0, 620.0, 400.0, 300.0))?;
    page.set_layout("#clinicPhoto", Rect::new(0.0, 1_400.0, 600.0, 400.0))?;
    page.set_layout("#experience", Rect::new(620.0, 1_400.0, 600.0, 400.0))?;
    page.set_layout("#news1", Rect::new(0.0, 2_900.0, 600.0, 300.0))?;
    page.set_layout("#appointment", Rect::new(0.0, 3_000.0, 1_280.0, 900.0))?;
    page.load()?;

    page.assert_count(".fade-in", 5)?;
    page.assert_count(".visible", 2)?;
    page.assert_lacks_class("#header", "scrolled")?;

    page.scroll_to(700.0)?;
    page.assert_has_class("#header", "scrolled")?;
    page.assert_has_class("#scrollToTop", "visible")?;
    page.assert_has_class("#clinicPhoto", "visible")?;
    page.assert_has_class("#experience", "visible")?;
    page.assert_lacks_class("#news1", "visible")?;

    page.click("#bookNow")?;
    assert_eq!(page.scroll_y(), 2_920.0);
    page.assert_has_class("#news1", "visible")?;

    page.click("#scrollToTop")?;
    assert_eq!(page.scroll_y(), 0.0);
    page.assert_count(".visible", 5)?;
    page.assert_lacks_class("#header", "scrolled")?;

    let behaviors = page
        .scroll_requests()
        .iter()
        .map(|request| request.behavior)
        .collect::<Vec<_>>();
    assert_eq!(
        behaviors,
        [
            ScrollBehavior::Instant,
            ScrollBehavior::Smooth,
            ScrollBehavior::Smooth
        ]
    );
    Ok(())
}

#[test]
fn header_threshold_boundary() -> Result<()> {
    let mut page = Page::from_html(HOME_PAGE)?;
    let cases = [
        (0.0, false),
        (99.0, false),
        (100.0, false),
        (100.1, true),
        (4_000.0, true),
    ];
    for (offset, scrolled) in cases {
        page.scroll_to(offset)?;
        assert_eq!(
            page.has_class("#header", "scrolled")?,
            scrolled,
            "offset {offset}"
        );
    }
    Ok(())
}

#[test]
fn mobile_visitor_uses_the_menu() -> Result<()> {
    let mut page = mobile_home()?;

    page.click("#navToggle")?;
    page.assert_has_class("#navMenu", "active")?;
    assert_eq!(page.body_overflow(), "hidden");

    page.click("#treatments > .nav-link")?;
    page.assert_has_class("#treatments", "active")?;
    // The trigger is a nav link too, so the menu closes behind it.
    page.assert_lacks_class("#navMenu", "active")?;

    page.click("#navToggle")?;
    page.click(".hero h1")?;
    page.assert_lacks_class("#navMenu", "active")?;
    page.assert_lacks_class("#treatments", "active")?;
    assert_eq!(page.body_overflow(), "");

    page.click(".hero h1")?;
    page.assert_lacks_class("#navMenu", "active")?;
    assert_eq!(page.body_overflow(), "");
    Ok(())
}

#[test]
fn rotating_to_desktop_closes_the_menu() -> Result<()> {
    let mut page = mobile_home()?;
    page.click("#navToggle")?;

    page.resize(700.0)?;
    page.resize(900.0)?;
    page.resize(1_280.0)?;
    assert_eq!(page.pending_timers().len(), 1);
    page.assert_has_class("#navMenu", "active")?;

    page.advance_time(250)?;
    page.assert_lacks_class("#navMenu", "active")?;
    assert_eq!(page.body_overflow(), "");
    Ok(())
}

#[test]
fn wide_nav_link_clicks_leave_menu_state_alone() -> Result<()> {
    let mut page = Page::from_html(HOME_PAGE)?;
    page.click("#navToggle")?;
    page.click(".nav-link")?;
    page.assert_has_class("#navMenu", "active")?;
    page.resize(1_600.0)?;
    page.flush()?;
    page.assert_lacks_class("#navMenu", "active")?;
    Ok(())
}

#[test]
fn appointment_with_short_name_flags_only_the_name() -> Result<()> {
    let mut page = Page::from_html(HOME_PAGE)?;
    page.type_text("#appointment-name", "A")?;
    page.type_text("#appointment-phone", "555-123-4567")?;
    page.select_option("#department", "prp")?;
    page.select_option("#doctor", "dr-kim")?;
    page.type_text("#appointment-date", "2026-12-01")?;
    page.click("#appointmentForm button")?;

    assert_eq!(page.form_state("appointmentForm"), Some(FormState::Invalid));
    page.assert_count(".form-group.error", 1)?;
    page.assert_text(
        ".form-group.error .error-message",
        "Name must be at least 2 characters long",
    )?;
    page.assert_value("#appointment-name", "A")?;
    page.assert_value("#department", "prp")?;
    page.assert_missing(".form-success")?;
    assert!(page.pending_timers().is_empty());
    Ok(())
}

#[test]
fn appointment_booking_round_trip() -> Result<()> {
    let mut page = Page::from_html(HOME_PAGE)?;
    page.click("#appointmentForm button")?;
    page.assert_count(".form-group.error", 5)?;

    page.type_text("#appointment-name", "Jane Doe")?;
    page.type_text("#appointment-phone", "+1 (555) 123-4567")?;
    page.select_option("#department", "transplant")?;
    page.select_option("#doctor", "dr-kim")?;
    page.type_text("#appointment-date", "2026-12-01")?;
    page.assert_count(".form-group.error", 0)?;
    page.assert_count(".error-message", 0)?;

    page.click("#appointmentForm button")?;
    assert_eq!(page.form_state("appointmentForm"), Some(FormState::Submitted));
    page.assert_text(
        "#appointmentForm > .form-success",
        "Thank you! Your appointment request has been submitted successfully. We will contact you soon.",
    )?;
    page.assert_value("#appointment-name", "")?;
    page.assert_value("#doctor", "")?;
    assert_eq!(page.native_submission_count(), 0);

    page.advance_time(5_000)?;
    page.assert_missing(".form-success")?;
    Ok(())
}

#[test]
fn contact_form_success_and_banner_lifetime() -> Result<()> {
    let mut page = Page::parse(CONTACT_PAGE)?;
    page.set_location("/contact.html");
    page.load()?;
    page.assert_has_class("#contact", "active")?;
    page.assert_lacks_class("#home", "active")?;

    page.type_text("#name", "Al")?;
    page.type_text("#phone", "555-123-4567")?;
    page.type_text("#email", "a@b.com")?;
    page.click("#send")?;

    assert_eq!(page.form_state("contactForm"), Some(FormState::Submitted));
    page.assert_count(".form-group.error", 0)?;
    page.assert_count(".form-success", 1)?;
    assert!(page.dump_dom("#contactForm")?.starts_with(
        r#"<form id="contactForm"><div class="form-success""#
    ));
    page.assert_value("#name", "")?;
    page.assert_value("#email", "")?;

    let timers = page.pending_timers();
    assert_eq!(timers.len(), 1);
    assert_eq!(timers[0].kind, TimerKind::BannerDismiss);

    page.advance_time(4_999)?;
    page.assert_count(".form-success", 1)?;
    page.advance_time(1)?;
    page.assert_count(".form-success", 0)?;
    Ok(())
}

#[test]
fn contact_live_validation_walks_the_rule_chain() -> Result<()> {
    let mut page = Page::from_html(CONTACT_PAGE)?;
    let error_text = ".form-group.error .error-message";

    page.focus("#email")?;
    page.blur("#email")?;
    page.assert_text(error_text, "This field is required")?;

    page.type_text("#email", "a b@c.com")?;
    page.assert_count(".form-group.error", 0)?;
    page.focus("#email")?;
    page.blur("#email")?;
    page.assert_text(error_text, "Please enter a valid email address")?;

    page.type_text("#email", "a@b.com")?;
    page.focus("#email")?;
    page.blur("#email")?;
    page.assert_count(".form-group.error", 0)?;

    // Optional fields only check their shape when filled.
    page.focus("#subject")?;
    page.blur("#subject")?;
    page.assert_count(".form-group.error", 0)?;

    // The textarea is required on this page, so blur flags it.
    page.focus("#message")?;
    page.blur("#message")?;
    page.assert_text(error_text, "This field is required")?;
    Ok(())
}

#[test]
fn configuration_from_json() -> Result<()> {
    let config = InteractionConfig::from_json_str(
        r#"{
            "mobile_breakpoint": 1024,
            "dropdown_gate": "per_click",
            "banner_dismiss_ms": 1000
        }"#,
    )?;
    assert_eq!(config.dropdown_gate, DropdownGate::PerClick);

    let mut page = Page::parse(CONTACT_PAGE)?;
    page.set_config(config)?;
    page.set_viewport_size(1_000.0, 700.0);
    page.load()?;

    page.click("#navToggle")?;
    page.click("#home")?;
    page.assert_lacks_class("#navMenu", "active")?;

    page.type_text("#name", "Al")?;
    page.type_text("#phone", "555-123-4567")?;
    page.type_text("#email", "a@b.com")?;
    page.click("#send")?;
    page.advance_time(1_000)?;
    page.assert_missing(".form-success")?;

    assert!(matches!(
        InteractionConfig::from_json_str(r#"{ "reveal_threshold": -0.5 }"#),
        Err(Error::Config(_))
    ));
    Ok(())
}

#[test]
fn load_resets_scroll_to_top() -> Result<()> {
    let mut page = Page::parse(HOME_PAGE)?;
    page.scroll_to(1_500.0)?;
    page.load()?;
    assert_eq!(page.scroll_y(), 0.0);
    assert_eq!(
        page.scroll_requests(),
        &[ScrollRequest {
            top: 0.0,
            behavior: ScrollBehavior::Instant
        }]
    );
    Ok(())
}

#[test]
fn independent_pages_do_not_share_state() -> Result<()> {
    let mut first = Page::from_html(HOME_PAGE)?;
    let second = Page::from_html(HOME_PAGE)?;
    first.scroll_to(900.0)?;
    first.assert_has_class("#header", "scrolled")?;
    second.assert_lacks_class("#header", "scrolled")?;
    Ok(())
}
