//! The server-rendered login/signup page, built in memory.

use crate::document::{ElementSpec, TestDocument, TestElement};
use authpage::behaviors::password::REVEAL_GLYPH;

/// Handles to the interesting parts of [`login_page`].
pub struct LoginPage {
    pub document: TestDocument,
    pub login_control: TestElement,
    pub signup_control: TestElement,
    pub login_tab: TestElement,
    pub signup_tab: TestElement,
    pub form_inner: TestElement,
    pub signup_link: TestElement,
    /// Password inputs in document order: login, signup, signup confirmation.
    pub passwords: Vec<TestElement>,
    /// Toggle icons, each placed right after the matching entry in `passwords`.
    pub toggles: Vec<TestElement>,
    pub message: TestElement,
}

fn radio(id: &str) -> ElementSpec {
    ElementSpec::new("input")
        .attr("type", "radio")
        .attr("name", "slide")
        .id(id)
}

fn password_field(name: &str) -> ElementSpec {
    ElementSpec::new("div")
        .class("field")
        .child(
            ElementSpec::new("input")
                .attr("type", "password")
                .attr("name", name)
                .attr("placeholder", "Password"),
        )
        .child(
            ElementSpec::new("span")
                .class("toggle-password")
                .text(REVEAL_GLYPH),
        )
}

fn email_field() -> ElementSpec {
    ElementSpec::new("div").class("field").child(
        ElementSpec::new("input")
            .attr("type", "text")
            .attr("name", "email")
            .attr("placeholder", "Email Address"),
    )
}

/// Login tab selected, no inline offset, and a success flash message.
#[must_use]
pub fn login_page() -> LoginPage {
    let document = TestDocument::new();

    let wrapper = document.append(ElementSpec::new("div").class("wrapper"));
    wrapper.append(
        ElementSpec::new("div")
            .class("message")
            .class("success")
            .text("Registered, please log in"),
    );
    let container = wrapper.append(ElementSpec::new("div").class("form-container"));
    container.append(
        ElementSpec::new("div")
            .class("slide-controls")
            .child(radio("login").checked())
            .child(radio("signup"))
            .child(
                ElementSpec::new("label")
                    .class("slide")
                    .class("login")
                    .attr("for", "login")
                    .text("Login"),
            )
            .child(
                ElementSpec::new("label")
                    .class("slide")
                    .class("signup")
                    .attr("for", "signup")
                    .text("Signup"),
            ),
    );
    let form_inner = container.append(ElementSpec::new("div").class("form-inner"));
    form_inner.append(
        ElementSpec::new("form")
            .class("login")
            .attr("method", "post")
            .child(email_field())
            .child(password_field("password"))
            .child(
                ElementSpec::new("div").class("signup-link").child(
                    ElementSpec::new("a")
                        .id("signup-link")
                        .attr("href", "")
                        .text("Signup now"),
                ),
            ),
    );
    form_inner.append(
        ElementSpec::new("form")
            .class("signup")
            .attr("method", "post")
            .attr("action", "/signup")
            .child(email_field())
            .child(password_field("password"))
            .child(password_field("confirm_password")),
    );

    LoginPage {
        login_control: document.get("input[type=radio]#login"),
        signup_control: document.get("input[type=radio]#signup"),
        login_tab: document.get("label.login"),
        signup_tab: document.get("label.signup"),
        form_inner: document.get(".form-inner"),
        signup_link: document.get("#signup-link"),
        passwords: query_all(&document, "input[type=password]"),
        toggles: query_all(&document, ".toggle-password"),
        message: document.get(".message"),
        document,
    }
}

fn query_all(document: &TestDocument, selectors: &str) -> Vec<TestElement> {
    use authpage::dom::Document;
    document.query_selector_all(selectors)
}
