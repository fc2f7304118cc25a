mod compiler;
mod parser;
mod wildcard_trie;

pub use compiler::{InMemoryRuleList, InMemoryRuleListCompiler};
