use authpage::behaviors::password::{self, HIDE_GLYPH, REVEAL_GLYPH};
use authpage::dom::Element;
use authpage::{BehaviorConfig, Error, PageBehaviors};
use test_support::{ElementSpec, ManualClock, TestDocument, login_page};

#[test]
fn two_clicks_round_trip_to_masked() {
    let page = login_page();
    let wiring = PageBehaviors::init(&page.document, &ManualClock::new(), &BehaviorConfig::default());
    assert_eq!(wiring.password_toggles, 3);

    let (input, icon) = (&page.passwords[0], &page.toggles[0]);
    assert_eq!(input.input_type().as_deref(), Some("password"));

    icon.dispatch_click();
    assert_eq!(input.input_type().as_deref(), Some("text"));
    assert_eq!(icon.text_content(), HIDE_GLYPH);

    icon.dispatch_click();
    assert_eq!(input.input_type().as_deref(), Some("password"));
    assert_eq!(icon.text_content(), REVEAL_GLYPH);
}

#[test]
fn pairs_toggle_independently() {
    let page = login_page();
    PageBehaviors::init(&page.document, &ManualClock::new(), &BehaviorConfig::default());

    page.toggles[1].dispatch_click();

    assert_eq!(page.passwords[0].input_type().as_deref(), Some("password"));
    assert_eq!(page.passwords[1].input_type().as_deref(), Some("text"));
    assert_eq!(page.passwords[2].input_type().as_deref(), Some("password"));
    assert_eq!(page.toggles[0].text_content(), REVEAL_GLYPH);
    assert_eq!(page.toggles[1].text_content(), HIDE_GLYPH);
    assert_eq!(page.toggles[2].text_content(), REVEAL_GLYPH);
}

#[test]
fn input_declared_as_text_masks_on_first_click() {
    let document = TestDocument::new();
    let field = document.append(ElementSpec::new("div"));
    let input = field.append(ElementSpec::new("input").attr("type", "text"));
    let icon = field.append(ElementSpec::new("span").class("toggle-password"));
    PageBehaviors::init(&document, &ManualClock::new(), &BehaviorConfig::default());

    icon.dispatch_click();

    assert_eq!(input.input_type().as_deref(), Some("password"));
    assert_eq!(icon.text_content(), REVEAL_GLYPH);
}

#[test]
fn icon_without_preceding_input_is_ignored() {
    let document = TestDocument::new();
    let field = document.append(ElementSpec::new("div"));
    let icon = field.append(
        ElementSpec::new("span")
            .class("toggle-password")
            .text(REVEAL_GLYPH),
    );
    let wiring = PageBehaviors::init(&document, &ManualClock::new(), &BehaviorConfig::default());
    assert_eq!(wiring.password_toggles, 1);

    icon.dispatch_click();

    assert_eq!(icon.text_content(), REVEAL_GLYPH);
    assert!(matches!(
        password::toggle(&icon),
        Err(Error::MissingPasswordInput)
    ));
}

#[test]
fn icon_after_a_non_input_is_ignored() {
    let document = TestDocument::new();
    let field = document.append(ElementSpec::new("div"));
    let label = field.append(ElementSpec::new("label").text("Password"));
    let icon = field.append(
        ElementSpec::new("span")
            .class("toggle-password")
            .text(REVEAL_GLYPH),
    );
    PageBehaviors::init(&document, &ManualClock::new(), &BehaviorConfig::default());

    icon.dispatch_click();

    assert_eq!(icon.text_content(), REVEAL_GLYPH);
    assert_eq!(label.text_content(), "Password");
    assert!(matches!(password::toggle(&icon), Err(Error::NotAnInput)));
}

#[test]
fn page_without_toggles_wires_none() {
    let page = login_page();
    for icon in &page.toggles {
        icon.remove();
    }

    let wiring = PageBehaviors::init(&page.document, &ManualClock::new(), &BehaviorConfig::default());

    assert_eq!(wiring.password_toggles, 0);
}
