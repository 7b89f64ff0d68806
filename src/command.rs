//! Request line grammar.
//!
//! ```text
//! request  := category | "add" SP category SP url
//! ```
//!
//! A line is split on whitespace into at most three tokens; the third token
//! keeps the rest of the line as-is so a URL is never split further.

const MAX_TOKENS: usize = 3;

/// A parsed request line. Tokens are kept as sent; case folding is up to the
/// handler.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// A single token naming a mood.
    Lookup { category: String },
    /// `add <category> <url>`.
    Add { category: String, url: String },
    /// Anything else.
    Malformed,
}

impl Command {
    pub fn parse(line: &str) -> Self {
        match split_tokens(line).as_slice() {
            [category] => Self::Lookup {
                category: category.to_string(),
            },
            [verb, category, url] if verb.eq_ignore_ascii_case("add") => Self::Add {
                category: category.to_string(),
                url: url.to_string(),
            },
            _ => Self::Malformed,
        }
    }
}

/// Whitespace split with a bounded token count; the last token is the
/// unsplit remainder.
fn split_tokens(line: &str) -> Vec<&str> {
    let mut tokens = Vec::with_capacity(MAX_TOKENS);
    let mut rest = line.trim();

    while !rest.is_empty() {
        if tokens.len() == MAX_TOKENS - 1 {
            tokens.push(rest);
            break;
        }
        match rest.find(char::is_whitespace) {
            Some(end) => {
                tokens.push(&rest[..end]);
                rest = rest[end..].trim_start();
            }
            None => {
                tokens.push(rest);
                break;
            }
        }
    }

    tokens
}
