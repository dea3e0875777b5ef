//! Test doubles for the page behaviors: an in-memory DOM, a manual timer
//! clock and a fixture of the login/signup page.

pub mod clock;
pub mod document;
pub mod fixtures;
pub mod selector;

pub use clock::ManualClock;
pub use document::{ElementSpec, TestDocument, TestElement};
pub use fixtures::{LoginPage, login_page};
