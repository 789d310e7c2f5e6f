use clinic_page::decisions::{
    header_is_scrolled, intersection_ratio, is_narrow_viewport, reveal_root, reveal_should_fire,
    should_close_menu_after_resize,
};
use clinic_page::{Page, Rect, is_valid_email, is_valid_phone};
use proptest::collection::vec;
use proptest::prelude::*;
use proptest::test_runner::{FileFailurePersistence, TestCaseError, TestCaseResult};

const PROPERTY_REGRESSION_FILE: &str = "tests/proptest-regressions/property_checks.txt";
const DEFAULT_PROPTEST_CASES: u32 = 128;

const NAV_PAGE: &str = r##"
<header id="header">
  <ul class="nav-menu" id="navMenu">
    <li><a href="index.html" class="nav-link" id="home">Home</a></li>
    <li class="nav-dropdown" id="drop">
      <a href="#" class="nav-link" id="dropLink">More</a>
      <ul class="dropdown-menu"><li><a href="faq.html" id="faq">FAQ</a></li></ul>
    </li>
  </ul>
  <button class="nav-toggle" id="navToggle"></button>
</header>
<main id="main"><div class="service-card" id="card"></div></main>
<button id="scrollToTop"></button>
"##;

fn proptest_cases() -> u32 {
    std::env::var("CLINIC_PAGE_PROPTEST_CASES")
        .ok()
        .and_then(|raw| raw.parse::<u32>().ok())
        .filter(|value| *value > 0)
        .unwrap_or(DEFAULT_PROPTEST_CASES)
}

#[derive(Clone, Debug)]
enum VisitorAction {
    Scroll(f64),
    Resize(f64),
    Wait(i64),
    ClickToggle,
    ClickHome,
    ClickDropdown,
    ClickFaq,
    ClickMain,
    ClickScrollTop,
}

fn visitor_action_strategy() -> BoxedStrategy<VisitorAction> {
    prop_oneof![
        3 => (0.0f64..3_000.0).prop_map(VisitorAction::Scroll),
        2 => (320.0f64..1_600.0).prop_map(VisitorAction::Resize),
        2 => (0i64..600).prop_map(VisitorAction::Wait),
        3 => Just(VisitorAction::ClickToggle),
        1 => Just(VisitorAction::ClickHome),
        2 => Just(VisitorAction::ClickDropdown),
        1 => Just(VisitorAction::ClickFaq),
        2 => Just(VisitorAction::ClickMain),
        1 => Just(VisitorAction::ClickScrollTop),
    ]
    .boxed()
}

fn run_action(page: &mut Page, action: &VisitorAction) -> clinic_page::Result<()> {
    match action {
        VisitorAction::Scroll(offset) => page.scroll_to(*offset),
        VisitorAction::Resize(width) => page.resize(*width),
        VisitorAction::Wait(ms) => page.advance_time(*ms),
        VisitorAction::ClickToggle => page.click("#navToggle"),
        VisitorAction::ClickHome => page.click("#home"),
        VisitorAction::ClickDropdown => page.click("#dropLink"),
        VisitorAction::ClickFaq => page.click("#faq"),
        VisitorAction::ClickMain => page.click("#main"),
        VisitorAction::ClickScrollTop => page.click("#scrollToTop"),
    }
}

fn fail(err: clinic_page::Error) -> TestCaseError {
    TestCaseError::fail(format!("{err:?}"))
}

fn assert_visitor_invariants(start_width: f64, actions: &[VisitorAction]) -> TestCaseResult {
    let mut page = Page::parse(NAV_PAGE).map_err(fail)?;
    page.set_viewport_size(start_width, 800.0);
    page.set_layout("#card", Rect::new(0.0, 1_200.0, 300.0, 300.0))
        .map_err(fail)?;
    page.load().map_err(fail)?;
    let mut revealed = false;

    for (step, action) in actions.iter().enumerate() {
        run_action(&mut page, action).map_err(fail)?;

        let menu_open = page.has_class("#navMenu", "active").map_err(fail)?;
        let toggle_open = page.has_class("#navToggle", "active").map_err(fail)?;
        prop_assert_eq!(menu_open, toggle_open, "step {}: {:?}", step, action);
        prop_assert_eq!(
            page.body_overflow() == "hidden",
            menu_open,
            "step {}: {:?}",
            step,
            action
        );

        let scrolled = page.has_class("#header", "scrolled").map_err(fail)?;
        prop_assert_eq!(scrolled, page.scroll_y() > 100.0, "step {}", step);

        // Once shown, a card stays shown.
        let visible = page.has_class("#card", "visible").map_err(fail)?;
        prop_assert!(!revealed || visible, "card hidden again at step {}", step);
        revealed = visible;

        prop_assert!(page.pending_timers().len() <= 1);
    }

    page.flush().map_err(fail)?;
    prop_assert!(page.pending_timers().is_empty());
    Ok(())
}

fn phone_char_strategy() -> BoxedStrategy<char> {
    prop_oneof![
        6 => proptest::char::range('0', '9'),
        1 => Just(' '),
        1 => Just('-'),
        1 => Just('+'),
        1 => Just('('),
        1 => Just(')'),
    ]
    .boxed()
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: proptest_cases(),
        failure_persistence: Some(Box::new(
            FileFailurePersistence::Direct(PROPERTY_REGRESSION_FILE),
        )),
        .. ProptestConfig::default()
    })]

    #[test]
    fn header_state_tracks_strict_threshold(offset in 0.0f64..10_000.0) {
        prop_assert_eq!(header_is_scrolled(offset, 100.0), offset > 100.0);
    }

    #[test]
    fn resize_close_and_narrow_are_complementary(width in 0.0f64..4_000.0) {
        prop_assert_ne!(
            is_narrow_viewport(width, 968.0),
            should_close_menu_after_resize(width, 968.0)
        );
    }

    #[test]
    fn phones_from_allowed_chars_pass_with_ten_digits(chars in vec(phone_char_strategy(), 0..24)) {
        let phone = chars.iter().collect::<String>();
        let digits = chars.iter().filter(|ch| ch.is_ascii_digit()).count();
        prop_assert_eq!(is_valid_phone(&phone), !phone.is_empty() && digits >= 10);
    }

    #[test]
    fn phones_with_letters_always_fail(prefix in "[0-9]{10}", letter in "[a-zA-Z]") {
        let phone = format!("{prefix}{letter}");
        prop_assert!(!is_valid_phone(&phone), "accepted {:?}", phone);
    }

    #[test]
    fn simple_addresses_are_valid_emails(
        local in "[a-z0-9._]{1,12}",
        domain in "[a-z0-9]{1,12}",
        tld in "[a-z]{2,6}",
    ) {
        let address = format!("{local}@{domain}.{tld}");
        prop_assert!(is_valid_email(&address));
        let spaced = format!("{local} x@{domain}.{tld}");
        prop_assert!(!is_valid_email(&spaced));
        let no_dot = format!("{local}@{domain}");
        prop_assert!(!is_valid_email(&no_dot));
    }

    #[test]
    fn intersection_ratio_is_a_fraction(
        y in -2_000.0f64..4_000.0,
        height in 1.0f64..1_500.0,
        scroll in 0.0f64..3_000.0,
    ) {
        let root = reveal_root(scroll, 1_280.0, 800.0, 50.0);
        let ratio = intersection_ratio(&Rect::new(0.0, y, 300.0, height), &root);
        prop_assert!((0.0..=1.0).contains(&ratio));
        if reveal_should_fire(ratio, 0.1) {
            prop_assert!(ratio >= 0.1);
        }
    }

    #[test]
    fn random_visits_keep_page_state_consistent(
        start_width in 320.0f64..1_600.0,
        actions in vec(visitor_action_strategy(), 1..=24),
    ) {
        assert_visitor_invariants(start_width, &actions)?;
    }
}
