//! Arena-backed DOM implementing `authpage::dom` for native tests.
//!
//! Elements are handles into a shared tree, so clones observe each other's
//! mutations the way browser element references do. Clicks are dispatched
//! synchronously to the target's listeners only; there is no bubbling and no
//! default action beyond recording `preventDefault`.

use crate::selector::Selector;
use authpage::dom::{ClickEvent, ClickListener, Document, Element};
use std::{
    cell::{Cell, RefCell},
    collections::BTreeMap,
    fmt,
    rc::Rc,
};

type Listener = Rc<RefCell<ClickListener>>;

const ROOT: usize = 0;

#[derive(Default)]
struct Node {
    tag: String,
    attributes: BTreeMap<String, String>,
    checked: bool,
    style: BTreeMap<String, String>,
    text: String,
    parent: Option<usize>,
    children: Vec<usize>,
    listeners: Vec<Listener>,
    rejects_listeners: bool,
}

impl Node {
    fn classes(&self) -> impl Iterator<Item = &str> {
        self.attributes
            .get("class")
            .map(String::as_str)
            .unwrap_or_default()
            .split_whitespace()
    }

    fn input_type(&self) -> Option<String> {
        (self.tag == "input").then(|| {
            self.attributes
                .get("type")
                .cloned()
                .unwrap_or_else(|| "text".to_string())
        })
    }

    fn matches(&self, selector: &Selector) -> bool {
        if selector.tag.as_ref().is_some_and(|tag| *tag != self.tag) {
            return false;
        }
        if selector
            .id
            .as_ref()
            .is_some_and(|id| self.attributes.get("id") != Some(id))
        {
            return false;
        }
        if !selector
            .classes
            .iter()
            .all(|class| self.classes().any(|own| own == class.as_str()))
        {
            return false;
        }
        selector
            .attributes
            .iter()
            .all(|(name, value)| self.attributes.get(name) == Some(value))
    }
}

struct Tree {
    nodes: Vec<Node>,
}

impl Tree {
    fn is_connected(&self, mut id: usize) -> bool {
        loop {
            if id == ROOT {
                return true;
            }
            match self.nodes[id].parent {
                Some(parent) => id = parent,
                None => return false,
            }
        }
    }

    /// Attached element ids in document order.
    fn document_order(&self) -> Vec<usize> {
        let mut order = Vec::new();
        let mut stack: Vec<usize> = self.nodes[ROOT].children.iter().rev().copied().collect();
        while let Some(id) = stack.pop() {
            order.push(id);
            stack.extend(self.nodes[id].children.iter().rev().copied());
        }
        order
    }

    fn insert(&mut self, parent: usize, spec: ElementSpec) -> usize {
        let id = self.nodes.len();
        self.nodes.push(Node {
            tag: spec.tag,
            attributes: spec.attributes,
            checked: spec.checked,
            text: spec.text,
            parent: Some(parent),
            ..Node::default()
        });
        self.nodes[parent].children.push(id);
        for child in spec.children {
            self.insert(id, child);
        }
        id
    }
}

/// Declarative description of an element and its subtree.
#[derive(Clone, Debug, Default)]
pub struct ElementSpec {
    tag: String,
    attributes: BTreeMap<String, String>,
    checked: bool,
    text: String,
    children: Vec<ElementSpec>,
}

impl ElementSpec {
    #[must_use]
    pub fn new(tag: &str) -> Self {
        Self {
            tag: tag.to_lowercase(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn id(self, id: &str) -> Self {
        self.attr("id", id)
    }

    /// Adds a class, keeping any already present.
    #[must_use]
    pub fn class(mut self, class: &str) -> Self {
        let classes = self.attributes.entry("class".to_string()).or_default();
        if !classes.is_empty() {
            classes.push(' ');
        }
        classes.push_str(class);
        self
    }

    #[must_use]
    pub fn attr(mut self, name: &str, value: &str) -> Self {
        self.attributes
            .insert(name.to_lowercase(), value.to_string());
        self
    }

    #[must_use]
    pub fn checked(mut self) -> Self {
        self.checked = true;
        self
    }

    #[must_use]
    pub fn text(mut self, text: &str) -> Self {
        self.text = text.to_string();
        self
    }

    #[must_use]
    pub fn child(mut self, child: ElementSpec) -> Self {
        self.children.push(child);
        self
    }
}

#[derive(Clone)]
pub struct TestDocument {
    tree: Rc<RefCell<Tree>>,
}

impl Default for TestDocument {
    fn default() -> Self {
        Self::new()
    }
}

impl TestDocument {
    #[must_use]
    pub fn new() -> Self {
        let root = Node {
            tag: "#document".to_string(),
            ..Node::default()
        };
        Self {
            tree: Rc::new(RefCell::new(Tree { nodes: vec![root] })),
        }
    }

    /// Appends `spec` as a top-level element and returns a handle to it.
    pub fn append(&self, spec: ElementSpec) -> TestElement {
        let id = self.tree.borrow_mut().insert(ROOT, spec);
        self.element(id)
    }

    /// Like `query_selector`, but panics with the selector when nothing matches.
    #[must_use]
    pub fn get(&self, selectors: &str) -> TestElement {
        self.query_selector(selectors)
            .unwrap_or_else(|| panic!("no element matches `{selectors}`"))
    }

    fn element(&self, id: usize) -> TestElement {
        TestElement {
            tree: Rc::clone(&self.tree),
            id,
        }
    }

    fn matching(&self, selectors: &str) -> Vec<usize> {
        let selector = Selector::parse(selectors)
            .unwrap_or_else(|err| panic!("unsupported selector: {err}"));
        let tree = self.tree.borrow();
        tree.document_order()
            .into_iter()
            .filter(|&id| tree.nodes[id].matches(&selector))
            .collect()
    }
}

impl Document for TestDocument {
    type Element = TestElement;

    fn query_selector(&self, selectors: &str) -> Option<TestElement> {
        self.matching(selectors)
            .first()
            .map(|&id| self.element(id))
    }

    fn query_selector_all(&self, selectors: &str) -> Vec<TestElement> {
        self.matching(selectors)
            .into_iter()
            .map(|id| self.element(id))
            .collect()
    }
}

#[derive(Clone)]
pub struct TestElement {
    tree: Rc<RefCell<Tree>>,
    id: usize,
}

impl fmt::Debug for TestElement {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tree = self.tree.borrow();
        let node = &tree.nodes[self.id];
        formatter
            .debug_struct("TestElement")
            .field("tag", &node.tag)
            .field("attributes", &node.attributes)
            .finish_non_exhaustive()
    }
}

impl PartialEq for TestElement {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.tree, &other.tree) && self.id == other.id
    }
}

impl TestElement {
    /// Appends `spec` as the last child of this element.
    pub fn append(&self, spec: ElementSpec) -> TestElement {
        let id = self.tree.borrow_mut().insert(self.id, spec);
        TestElement {
            tree: Rc::clone(&self.tree),
            id,
        }
    }

    #[must_use]
    pub fn attribute(&self, name: &str) -> Option<String> {
        self.tree.borrow().nodes[self.id].attributes.get(name).cloned()
    }

    #[must_use]
    pub fn listener_count(&self) -> usize {
        self.tree.borrow().nodes[self.id].listeners.len()
    }

    /// Makes later `add_click_listener` calls on this element fail.
    pub fn reject_listeners(&self) {
        self.tree.borrow_mut().nodes[self.id].rejects_listeners = true;
    }

    /// Dispatches a click and reports whether a listener prevented the default action.
    pub fn dispatch_click(&self) -> bool {
        let listeners = self.tree.borrow().nodes[self.id].listeners.clone();
        let event = TestClickEvent::default();
        for listener in listeners {
            let mut callback = listener.borrow_mut();
            (&mut **callback)(&event);
        }
        event.default_prevented.get()
    }
}

impl Element for TestElement {
    fn set_checked(&self, checked: bool) {
        let mut tree = self.tree.borrow_mut();
        let node = &tree.nodes[self.id];
        let Some(input_type) = node.input_type() else {
            return;
        };
        if input_type != "radio" && input_type != "checkbox" {
            return;
        }

        let group = node.attributes.get("name").cloned();
        if checked && input_type == "radio" {
            if let Some(group) = group {
                for id in tree.document_order() {
                    let other = &tree.nodes[id];
                    if id != self.id
                        && other.input_type().as_deref() == Some("radio")
                        && other.attributes.get("name") == Some(&group)
                    {
                        tree.nodes[id].checked = false;
                    }
                }
            }
        }
        tree.nodes[self.id].checked = checked;
    }

    fn is_checked(&self) -> bool {
        self.tree.borrow().nodes[self.id].checked
    }

    fn set_style_property(&self, name: &str, value: &str) {
        self.tree.borrow_mut().nodes[self.id]
            .style
            .insert(name.to_string(), value.to_string());
    }

    fn style_property(&self, name: &str) -> String {
        self.tree.borrow().nodes[self.id]
            .style
            .get(name)
            .cloned()
            .unwrap_or_default()
    }

    fn input_type(&self) -> Option<String> {
        self.tree.borrow().nodes[self.id].input_type()
    }

    fn set_input_type(&self, value: &str) {
        let mut tree = self.tree.borrow_mut();
        let node = &mut tree.nodes[self.id];
        if node.tag == "input" {
            node.attributes.insert("type".to_string(), value.to_string());
        }
    }

    fn text_content(&self) -> String {
        self.tree.borrow().nodes[self.id].text.clone()
    }

    fn set_text_content(&self, text: &str) {
        self.tree.borrow_mut().nodes[self.id].text = text.to_string();
    }

    fn has_class(&self, class: &str) -> bool {
        self.tree.borrow().nodes[self.id]
            .classes()
            .any(|own| own == class)
    }

    fn previous_element_sibling(&self) -> Option<Self> {
        let tree = self.tree.borrow();
        let parent = tree.nodes[self.id].parent?;
        let siblings = &tree.nodes[parent].children;
        let position = siblings.iter().position(|&id| id == self.id)?;
        let previous = siblings.get(position.checked_sub(1)?)?;
        Some(TestElement {
            tree: Rc::clone(&self.tree),
            id: *previous,
        })
    }

    fn is_connected(&self) -> bool {
        self.tree.borrow().is_connected(self.id)
    }

    fn remove(&self) {
        let mut tree = self.tree.borrow_mut();
        let Some(parent) = tree.nodes[self.id].parent.take() else {
            return;
        };
        tree.nodes[parent].children.retain(|&id| id != self.id);
    }

    fn click(&self) {
        self.dispatch_click();
    }

    fn add_click_listener(&self, listener: ClickListener) -> authpage::Result<()> {
        let mut tree = self.tree.borrow_mut();
        let node = &mut tree.nodes[self.id];
        if node.rejects_listeners {
            return Err(authpage::Error::Listener(format!(
                "<{}> refused the click listener",
                node.tag
            )));
        }
        node.listeners.push(Rc::new(RefCell::new(listener)));
        Ok(())
    }
}

#[derive(Default)]
struct TestClickEvent {
    default_prevented: Cell<bool>,
}

impl ClickEvent for TestClickEvent {
    fn prevent_default(&self) {
        self.default_prevented.set(true);
    }
}
