//! # Search-box query syntax
//!
//! `query-syntax` turns the free text typed into a search box into a stream of
//! [`Term`]s: plain literals (optionally negated) and `{...}` OR-groups. It
//! never rejects input. Malformed quoting is repaired by dropping the stray
//! quote character, stray braces and dashes are absorbed by the term builder.
//!
//! Supported syntax:
//! - `word`, `"quoted phrase"`, `'single quoted'`
//! - `-word`, `-"not this phrase"` (a doubled `--` cancels out)
//! - `{one of these {or these}}`
//! - `category:...`, `feed:...`, `search:...`, `tag:...`, `user:...`,
//!   `playlist:...` (see [`ReferenceKind`])
//!
//! ## Example
//! ```
//! use query_syntax::{parse_terms, split_reference, ReferenceKind, Term};
//!
//! let terms: Vec<Term> = parse_terms("car -boring {cats dogs} category:Funny").collect();
//! assert_eq!(
//!     terms,
//!     [
//!         Term::literal("car"),
//!         Term::negated("boring"),
//!         Term::group([Term::literal("cats"), Term::literal("dogs")]),
//!         Term::literal("category:Funny"),
//!     ]
//! );
//! assert_eq!(
//!     split_reference("category:Funny"),
//!     Some((ReferenceKind::Category, "Funny"))
//! );
//! ```
mod keyword;
mod lexer;
mod term;

pub use keyword::{ReferenceKind, split_reference};
pub use lexer::{LexError, Token, Tokens, repair_quotes, tokenize, try_tokenize};
pub use term::{Term, Terms, build_terms, parse_terms};
