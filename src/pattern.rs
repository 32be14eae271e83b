//! Search pattern construction for definition and reference queries.
//!
//! A definition pattern is anchored at line start and accepts either an
//! equate declaration (`NAME equ value`) or a label. A reference pattern is
//! chosen by looking at the line the selection came from:
//! - the line holds a branch/jump/call: the token is a branch target label
//! - otherwise: the token is a data operand of any known instruction
//!
//! RAM variables may be written bare (`Counter`) or with the address-register
//! alias prefix (`aCounter`); both spellings are always searched.

use regex::{Regex, RegexBuilder};

use crate::opcodes::{self, OPERAND_CLASSES, PROGRAM_CONTROL};
use crate::types::{QueryKind, SearchQuery, Token};

/// Default register-prefix letter for RAM variable aliases.
pub const DEFAULT_REGISTER_PREFIX: char = 'a';

/// Which alternation group a pattern was built from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PatternForm {
    /// Line-start equate or label declaration.
    Declaration,
    /// Program-control mnemonic followed by a label.
    BranchTarget,
    /// Any operand-taking mnemonic followed by a variable.
    Operand,
    /// Long-address call check used by `lint`.
    UnsafeCall,
}

/// How a reference token is used, judged from its containing line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperandRole {
    BranchTarget,
    DataOperand,
}

impl OperandRole {
    /// Classify solely from the containing line; the token plays no part.
    pub fn classify(context: Option<&str>) -> Self {
        match context {
            Some(line) if opcodes::is_program_control(line) => OperandRole::BranchTarget,
            _ => OperandRole::DataOperand,
        }
    }
}

/// A compiled, case-insensitive search pattern.
#[derive(Debug, Clone)]
pub struct CompiledPattern {
    source: String,
    regex: Regex,
    form: PatternForm,
}

impl CompiledPattern {
    pub(crate) fn new(source: String, form: PatternForm) -> Result<Self, regex::Error> {
        let regex = RegexBuilder::new(&source).case_insensitive(true).build()?;
        Ok(Self {
            source,
            regex,
            form,
        })
    }

    /// Pattern text without the case-insensitivity flag.
    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn form(&self) -> PatternForm {
        self.form
    }

    /// Byte offset of the first match in `line`, if any.
    pub fn find_start(&self, line: &str) -> Option<usize> {
        self.regex.find(line).map(|m| m.start())
    }

    pub fn is_match(&self, line: &str) -> bool {
        self.regex.is_match(line)
    }
}

/// Builds search patterns for a given register-prefix letter.
#[derive(Debug, Clone, Copy)]
pub struct PatternBuilder {
    prefix: char,
}

impl Default for PatternBuilder {
    fn default() -> Self {
        Self::new(DEFAULT_REGISTER_PREFIX)
    }
}

impl PatternBuilder {
    pub fn new(prefix: char) -> Self {
        Self { prefix }
    }

    /// Build the single pattern answering `query`.
    pub fn build(&self, query: &SearchQuery) -> Result<CompiledPattern, regex::Error> {
        match query.kind {
            QueryKind::Definition => self.definition(&query.token),
            QueryKind::Reference => self.reference(&query.token, query.context.as_deref()),
        }
    }

    /// Pattern matching an equate or label declaration of `token`.
    pub fn definition(&self, token: &Token) -> Result<CompiledPattern, regex::Error> {
        let (with_prefix, bare) = self.variable_forms(token);
        let (labeled, unlabeled) = label_forms(token);

        let equate = alternation(&[&with_prefix, &bare]);
        let source = format!(
            r"^{equate}\s+equ\b|^(?:{}|{}\b)",
            regex::escape(&labeled),
            regex::escape(&unlabeled),
        );
        tracing::debug!(pattern = %source, "definition pattern");
        CompiledPattern::new(source, PatternForm::Declaration)
    }

    /// Pattern matching uses of `token`, shaped by the line it was selected on.
    pub fn reference(
        &self,
        token: &Token,
        context: Option<&str>,
    ) -> Result<CompiledPattern, regex::Error> {
        let role = OperandRole::classify(context);
        let (source, form) = match role {
            OperandRole::BranchTarget => {
                let label = token.as_str().trim_end_matches(':');
                let source = format!(
                    r"\b{PROGRAM_CONTROL}(?:\.[bswl])?\s+{}(?:\.[bwl])?\b",
                    regex::escape(label),
                );
                (source, PatternForm::BranchTarget)
            }
            OperandRole::DataOperand => {
                let (with_prefix, bare) = self.variable_forms(token);
                let target = format!(r"{}(?:\s+equ)?\b", alternation(&[&with_prefix, &bare]));
                let opcode = OPERAND_CLASSES
                    .iter()
                    .map(|class| opcodes::sized_mnemonic(class))
                    .collect::<Vec<_>>()
                    .join("|");
                (format!(r"(?:{opcode})\s+{target}"), PatternForm::Operand)
            }
        };
        tracing::debug!(?role, pattern = %source, "reference pattern");
        CompiledPattern::new(source, form)
    }

    /// `(with_prefix, bare)` spellings of a RAM variable.
    fn variable_forms(&self, token: &Token) -> (String, String) {
        let raw = token.as_str();
        if token.has_register_prefix(self.prefix) {
            (raw.to_string(), raw[self.prefix.len_utf8()..].to_string())
        } else {
            (format!("{}{raw}", self.prefix), raw.to_string())
        }
    }
}

/// `(labeled, unlabeled)` spellings of a label.
fn label_forms(token: &Token) -> (String, String) {
    let raw = token.as_str();
    if token.is_labeled() {
        (raw.to_string(), raw.trim_end_matches(':').to_string())
    } else {
        (format!("{raw}:"), raw.to_string())
    }
}

/// Escaped non-capturing alternation, skipping empty forms.
fn alternation(forms: &[&str]) -> String {
    let escaped: Vec<String> = forms
        .iter()
        .filter(|f| !f.is_empty())
        .map(|f| regex::escape(f))
        .collect();
    format!("(?:{})", escaped.join("|"))
}
