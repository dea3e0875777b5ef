//! Compound CSS selectors: an optional tag followed by any mix of `#id`,
//! `.class` and `[attr=value]`. Combinators and selector lists are not
//! supported; the page behaviors never use them.

#[derive(Debug, Default, PartialEq, Eq)]
pub struct Selector {
    pub tag: Option<String>,
    pub id: Option<String>,
    pub classes: Vec<String>,
    pub attributes: Vec<(String, String)>,
}

impl Selector {
    /// Parses a compound selector.
    ///
    /// # Errors
    /// Returns a description of the first unsupported construct.
    pub fn parse(input: &str) -> Result<Self, String> {
        let mut selector = Self::default();
        let mut chars = input.trim().chars().peekable();

        let tag = take_ident(&mut chars);
        if !tag.is_empty() {
            selector.tag = Some(tag.to_lowercase());
        }

        while let Some(marker) = chars.next() {
            match marker {
                '#' => {
                    let id = take_ident(&mut chars);
                    if id.is_empty() {
                        return Err(format!("empty id in `{input}`"));
                    }
                    selector.id = Some(id);
                }
                '.' => {
                    let class = take_ident(&mut chars);
                    if class.is_empty() {
                        return Err(format!("empty class in `{input}`"));
                    }
                    selector.classes.push(class);
                }
                '[' => {
                    let name = take_ident(&mut chars);
                    if chars.next() != Some('=') {
                        return Err(format!("expected `[name=value]` in `{input}`"));
                    }
                    let mut value = String::new();
                    for next in chars.by_ref() {
                        if next == ']' {
                            break;
                        }
                        value.push(next);
                    }
                    let value = value.trim_matches(|c| c == '"' || c == '\'').to_string();
                    selector.attributes.push((name.to_lowercase(), value));
                }
                other => return Err(format!("unsupported `{other}` in `{input}`")),
            }
        }

        Ok(selector)
    }
}

fn take_ident(chars: &mut std::iter::Peekable<std::str::Chars<'_>>) -> String {
    let mut ident = String::new();
    while let Some(&next) = chars.peek() {
        if next.is_alphanumeric() || next == '-' || next == '_' {
            ident.push(next);
            chars.next();
        } else {
            break;
        }
    }
    ident
}
